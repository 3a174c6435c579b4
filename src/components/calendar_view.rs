//! Calendar View Component
//!
//! Month grid of task deadlines with previous/next month and jump to today.
//! Selecting a day lists its tasks below the grid.

use chrono::{Datelike, NaiveDate};
use leptos::prelude::*;

use crate::calendar::{month_grid, month_start, shift_months, tasks_on};
use crate::components::StatusBadge;
use crate::context::{today, AppContext};
use crate::filter::{visible_tasks, TaskFilter};
use crate::store::AppStateStoreFields;

const WEEKDAY_LABELS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

#[component]
pub fn CalendarView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (displayed, set_displayed) = signal(month_start(today()));
    let (selected, set_selected) = signal::<Option<NaiveDate>>(None);

    let scoped = Memo::new(move |_| {
        ctx.store.tasks().with(|tasks| visible_tasks(tasks, ctx.scope(), &TaskFilter::default()))
    });
    let grid = move || month_grid(displayed.get(), &scoped.get());

    let go_to = move |month: NaiveDate| {
        set_displayed.set(month_start(month));
        set_selected.set(None);
    };

    let select_day = move |date: NaiveDate| {
        set_selected.update(|current| {
            *current = if *current == Some(date) { None } else { Some(date) };
        });
    };

    view! {
        <section class="calendar">
            <div class="calendar-header">
                <button on:click=move |_| go_to(shift_months(displayed.get(), -1))>"‹"</button>
                <h2>{move || {
                    let month = displayed.get();
                    format!("{} 年 {} 月", month.year(), month.month())
                }}</h2>
                <button on:click=move |_| go_to(shift_months(displayed.get(), 1))>"›"</button>
                <button class="small" on:click=move |_| go_to(today())>"今天"</button>
            </div>
            <div class="calendar-grid">
                {WEEKDAY_LABELS.into_iter().map(|label| view! { <div class="weekday">{label}</div> }).collect_view()}
                {move || {
                    let now = today();
                    grid()
                        .into_iter()
                        .map(|day| {
                            let date = day.date;
                            let mut class = String::from("day-cell");
                            if !day.in_month {
                                class.push_str(" outside");
                            }
                            if date == now {
                                class.push_str(" today");
                            }
                            if selected.get() == Some(date) {
                                class.push_str(" selected");
                            }
                            view! {
                                <div class=class on:click=move |_| select_day(date)>
                                    <div class="day-number">{date.day()}</div>
                                    {day.tasks.into_iter().map(|task| view! {
                                        <div class=format!("day-task {}", task.status.css_class()) title=task.station_name.clone()>
                                            {task.item_name.clone()}
                                        </div>
                                    }).collect_view()}
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
            {move || selected.get().map(|date| {
                let due = tasks_on(date, &scoped.get());
                view! {
                    <div class="panel day-detail">
                        <h3>{date.format("%Y-%m-%d").to_string()}</h3>
                        {if due.is_empty() {
                            view! { <p class="hint">"當日沒有到期工項"</p> }.into_any()
                        } else {
                            view! {
                                <ul>
                                    {due.into_iter().map(|task| view! {
                                        <li>
                                            <StatusBadge status=task.status.clone() />
                                            " " {task.station_name.clone()} " · " {task.item_name.clone()}
                                        </li>
                                    }).collect_view()}
                                </ul>
                            }.into_any()
                        }}
                    </div>
                }
            })}
        </section>
    }
}
