//! Dashboard Statistics

use chrono::NaiveDate;

use crate::models::{Task, TaskStatus};
use crate::station::{StationCode, STATIONS};

/// Completion figures for one station tile
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub station: StationCode,
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Rounded completion percentage, 0 when the station has no tasks
    pub rate: u32,
}

/// Global count per status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusBreakdown {
    pub completed: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub overdue: usize,
}

impl StatusBreakdown {
    pub fn total(&self) -> usize {
        self.completed + self.pending + self.in_progress + self.overdue
    }

    /// (label, count, css class) rows in legend order
    pub fn rows(&self) -> [(&'static str, usize, &'static str); 4] {
        [
            ("已完成", self.completed, TaskStatus::Completed.css_class()),
            ("待處理", self.pending, TaskStatus::Pending.css_class()),
            ("執行中", self.in_progress, TaskStatus::InProgress.css_class()),
            ("逾期", self.overdue, TaskStatus::Overdue.css_class()),
        ]
    }
}

pub fn station_stats(tasks: &[Task]) -> Vec<StationStats> {
    STATIONS
        .into_iter()
        .map(|station| {
            let own: Vec<&Task> = tasks.iter().filter(|t| t.station_code == station).collect();
            let total = own.len();
            let completed = own.iter().filter(|t| t.status == TaskStatus::Completed).count();
            let overdue = own.iter().filter(|t| t.status == TaskStatus::Overdue).count();
            let rate = if total > 0 {
                ((completed as f64 / total as f64) * 100.0).round() as u32
            } else {
                0
            };
            StationStats { station, total, completed, overdue, rate }
        })
        .collect()
}

pub fn status_breakdown(tasks: &[Task]) -> StatusBreakdown {
    tasks.iter().fold(StatusBreakdown::default(), |mut acc, task| {
        match task.status {
            TaskStatus::Completed => acc.completed += 1,
            TaskStatus::Pending => acc.pending += 1,
            TaskStatus::InProgress => acc.in_progress += 1,
            TaskStatus::Overdue => acc.overdue += 1,
            TaskStatus::Other(_) => {}
        }
        acc
    })
}

/// Tasks flagged overdue or past their deadline, at most `limit`
pub fn needs_attention(tasks: &[Task], today: NaiveDate, limit: usize) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Overdue || t.is_late(today))
        .take(limit)
        .cloned()
        .collect()
}

/// Completed tasks of one station, most recently updated first
pub fn station_history(tasks: &[Task], station: StationCode) -> Vec<Task> {
    let mut done: Vec<Task> = tasks
        .iter()
        .filter(|t| t.station_code == station && t.status == TaskStatus::Completed)
        .cloned()
        .collect();
    done.sort_by(|a, b| b.last_updated_at().cmp(&a.last_updated_at()));
    done
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_task(uid: &str, station: StationCode, deadline: NaiveDate, status: TaskStatus) -> Task {
        Task::new(uid, station, uid, deadline, status)
    }

    #[test]
    fn test_station_rates() {
        let d = ymd(2025, 5, 1);
        let tasks = vec![
            make_task("1", StationCode::Baifu, d, TaskStatus::Completed),
            make_task("2", StationCode::Baifu, d, TaskStatus::Completed),
            make_task("3", StationCode::Baifu, d, TaskStatus::Overdue),
            make_task("4", StationCode::Cheng, d, TaskStatus::Pending),
        ];
        let stats = station_stats(&tasks);
        assert_eq!(stats.len(), 4);
        assert_eq!(stats[0], StationStats { station: StationCode::Baifu, total: 3, completed: 2, overdue: 1, rate: 67 });
        assert_eq!(stats[1].rate, 0);
        assert_eq!(stats[2].total, 0);
        assert_eq!(stats[2].rate, 0);
    }

    #[test]
    fn test_breakdown_skips_unknown() {
        let d = ymd(2025, 5, 1);
        let tasks = vec![
            make_task("1", StationCode::Baifu, d, TaskStatus::Completed),
            make_task("2", StationCode::Baifu, d, TaskStatus::InProgress),
            make_task("3", StationCode::Baifu, d, TaskStatus::Other("?".into())),
        ];
        let breakdown = status_breakdown(&tasks);
        assert_eq!(breakdown.total(), 2);
        assert_eq!(breakdown.in_progress, 1);
        assert_eq!(breakdown.rows()[0].0, "已完成");
    }

    #[test]
    fn test_needs_attention() {
        let today = ymd(2025, 5, 10);
        let tasks = vec![
            make_task("late", StationCode::Baifu, ymd(2025, 5, 1), TaskStatus::Pending),
            make_task("done-late", StationCode::Baifu, ymd(2025, 5, 1), TaskStatus::Completed),
            make_task("flagged", StationCode::Cheng, ymd(2025, 6, 1), TaskStatus::Overdue),
            make_task("future", StationCode::Cheng, ymd(2025, 6, 1), TaskStatus::InProgress),
            make_task("today", StationCode::Cheng, today, TaskStatus::Pending),
        ];
        let uids: Vec<_> = needs_attention(&tasks, today, 5).into_iter().map(|t| t.uid).collect();
        assert_eq!(uids, vec!["late", "flagged"]);
        assert_eq!(needs_attention(&tasks, today, 1).len(), 1);
    }

    #[test]
    fn test_station_history_newest_first() {
        let d = ymd(2025, 5, 1);
        let mut older = make_task("older", StationCode::Xinyi, d, TaskStatus::Completed);
        older.last_updated = "2025-04-01T08:00:00.000Z".to_string();
        let mut newer = make_task("newer", StationCode::Xinyi, d, TaskStatus::Completed);
        newer.last_updated = "2025-04-20 09:30:00".to_string();
        let open = make_task("open", StationCode::Xinyi, d, TaskStatus::Pending);
        let other = make_task("other", StationCode::Baifu, d, TaskStatus::Completed);

        let history = station_history(&[older, open, newer, other], StationCode::Xinyi);
        let uids: Vec<_> = history.into_iter().map(|t| t.uid).collect();
        assert_eq!(uids, vec!["newer", "older"]);
    }
}
