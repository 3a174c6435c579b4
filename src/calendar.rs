//! Calendar Utilities
//!
//! Month grid generation for the deadline calendar. Weeks start on Sunday.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::Task;

/// One cell of the month view
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months
    pub in_month: bool,
    /// Tasks due on this date, highest priority first
    pub tasks: Vec<Task>,
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Saturday on or after `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    date + Duration::days(6 - date.weekday().num_days_from_sunday() as i64)
}

/// Move by whole months, clamping to the last day of a shorter month
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta as u32))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Stable sort by status priority (overdue first, unknown last)
pub fn sort_by_priority(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.status.rank());
}

/// Tasks whose deadline falls on `date`, sorted by priority
pub fn tasks_on(date: NaiveDate, tasks: &[Task]) -> Vec<Task> {
    let mut due: Vec<Task> = tasks.iter().filter(|t| t.deadline == date).cloned().collect();
    sort_by_priority(&mut due);
    due
}

/// Every cell a month view renders, from the Sunday before the 1st to the
/// Saturday after the last day, each with its due tasks.
pub fn month_grid(reference: NaiveDate, tasks: &[Task]) -> Vec<CalendarDay> {
    let first = month_start(reference);
    let last = month_end(reference);
    let grid_start = week_start(first);
    let grid_end = week_end(last);

    grid_start
        .iter_days()
        .take_while(|day| *day <= grid_end)
        .map(|date| CalendarDay {
            date,
            in_month: date.year() == first.year() && date.month() == first.month(),
            tasks: tasks_on(date, tasks),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use crate::station::StationCode;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_task(uid: &str, deadline: NaiveDate, status: TaskStatus) -> Task {
        Task::new(uid, StationCode::Baifu, format!("Item {}", uid), deadline, status)
    }

    #[test]
    fn test_grid_shape_for_every_month() {
        for year in 2023..=2026 {
            for month in 1..=12 {
                let reference = ymd(year, month, 15);
                let grid = month_grid(reference, &[]);
                assert!(!grid.is_empty());
                assert_eq!(grid.len() % 7, 0, "{}-{}", year, month);
                assert_eq!(grid.first().unwrap().date.weekday(), Weekday::Sun);
                assert_eq!(grid.last().unwrap().date.weekday(), Weekday::Sat);

                // consecutive days, no gaps or duplicates
                for pair in grid.windows(2) {
                    assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
                }

                let in_month: Vec<_> = grid.iter().filter(|d| d.in_month).map(|d| d.date).collect();
                assert_eq!(in_month.first().copied(), Some(month_start(reference)));
                assert_eq!(in_month.last().copied(), Some(month_end(reference)));
                assert_eq!(in_month.len() as u32, month_end(reference).day());
            }
        }
    }

    #[test]
    fn test_december_2024_starts_on_sunday() {
        let grid = month_grid(ymd(2024, 12, 25), &[]);
        assert_eq!(grid[0].date, ymd(2024, 12, 1));
        assert!(grid.iter().all(|d| d.date.month() != 11));
        assert_eq!(grid.last().unwrap().date, ymd(2025, 1, 4));
        assert_eq!(grid.len(), 35);
        let january: Vec<_> = grid.iter().filter(|d| !d.in_month).map(|d| d.date).collect();
        assert_eq!(january, vec![ymd(2025, 1, 1), ymd(2025, 1, 2), ymd(2025, 1, 3), ymd(2025, 1, 4)]);
    }

    #[test]
    fn test_one_day_fragments() {
        // November 2025: the 1st is a Saturday and the 30th a Sunday, so both
        // the first and last rows hold a single in-month day.
        let grid = month_grid(ymd(2025, 11, 1), &[]);
        assert_eq!(grid[0].date, ymd(2025, 10, 26));
        assert_eq!(grid[6].date, ymd(2025, 11, 1));
        assert!(grid[6].in_month);
        // November 30 2025 is a Sunday
        assert_eq!(grid.last().unwrap().date, ymd(2025, 12, 6));

        // June 2025: 1st is Sunday, 30th is Monday
        let june = month_grid(ymd(2025, 6, 30), &[]);
        assert_eq!(june[0].date, ymd(2025, 6, 1));
        assert_eq!(june.last().unwrap().date, ymd(2025, 7, 5));
    }

    #[test]
    fn test_year_boundary_leading_days() {
        // January 2025 starts on Wednesday
        let grid = month_grid(ymd(2025, 1, 1), &[]);
        assert_eq!(grid[0].date, ymd(2024, 12, 29));
        assert_eq!(grid.iter().filter(|d| d.date.year() == 2024).count(), 3);
    }

    #[test]
    fn test_bucketing_by_date() {
        let tasks = vec![
            make_task("A", ymd(2024, 12, 3), TaskStatus::Pending),
            make_task("B", ymd(2024, 12, 4), TaskStatus::Pending),
            make_task("C", ymd(2025, 1, 2), TaskStatus::Completed),
        ];
        let grid = month_grid(ymd(2024, 12, 1), &tasks);
        let dec3 = grid.iter().find(|d| d.date == ymd(2024, 12, 3)).unwrap();
        assert_eq!(dec3.tasks.len(), 1);
        assert_eq!(dec3.tasks[0].uid, "A");
        // trailing January cell still gets its task
        let jan2 = grid.iter().find(|d| d.date == ymd(2025, 1, 2)).unwrap();
        assert_eq!(jan2.tasks[0].uid, "C");
        let total: usize = grid.iter().map(|d| d.tasks.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_priority_order_is_stable() {
        let day = ymd(2024, 12, 10);
        let tasks = vec![
            make_task("completed", day, TaskStatus::Completed),
            make_task("overdue", day, TaskStatus::Overdue),
            make_task("pending-1", day, TaskStatus::Pending),
            make_task("unknown", day, TaskStatus::Other("暫停".to_string())),
            make_task("in-progress", day, TaskStatus::InProgress),
            make_task("pending-2", day, TaskStatus::Pending),
        ];
        let ordered: Vec<_> = tasks_on(day, &tasks).into_iter().map(|t| t.uid).collect();
        assert_eq!(ordered, vec!["overdue", "in-progress", "pending-1", "pending-2", "completed", "unknown"]);
    }

    #[test]
    fn test_shift_months_clamps() {
        assert_eq!(shift_months(ymd(2025, 1, 31), 1), ymd(2025, 2, 28));
        assert_eq!(shift_months(ymd(2025, 1, 15), -1), ymd(2024, 12, 15));
        assert_eq!(shift_months(ymd(2024, 12, 15), 1), ymd(2025, 1, 15));
    }

    #[test]
    fn test_week_bounds() {
        // 2024-12-04 is a Wednesday
        assert_eq!(week_start(ymd(2024, 12, 4)), ymd(2024, 12, 1));
        assert_eq!(week_end(ymd(2024, 12, 4)), ymd(2024, 12, 7));
        assert_eq!(week_start(ymd(2024, 12, 1)), ymd(2024, 12, 1));
        assert_eq!(week_end(ymd(2024, 12, 7)), ymd(2024, 12, 7));
    }
}
