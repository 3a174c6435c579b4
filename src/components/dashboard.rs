//! Dashboard Component
//!
//! Per-station completion tiles, a global status breakdown and the list of
//! tasks needing attention. Clicking a tile opens that station's history.

use leptos::prelude::*;

use crate::components::{StationHistoryModal, StatusBadge};
use crate::context::{today, AppContext};
use crate::filter::{visible_tasks, TaskFilter};
use crate::stats::{needs_attention, station_stats, status_breakdown};
use crate::station::StationCode;
use crate::store::AppStateStoreFields;

const ATTENTION_LIMIT: usize = 5;

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (history_station, set_history_station) = signal::<Option<StationCode>>(None);

    // Everything below is derived from the scoped task set
    let scoped = Memo::new(move |_| {
        ctx.store.tasks().with(|tasks| visible_tasks(tasks, ctx.scope(), &TaskFilter::default()))
    });

    let tiles = move || {
        let scope = ctx.scope();
        station_stats(&scoped.get())
            .into_iter()
            .filter(|s| scope.permits(s.station))
            .map(|s| {
                let station = s.station;
                view! {
                    <button class="station-tile" on:click=move |_| set_history_station.set(Some(station))>
                        <div class="tile-title">{station.name()}</div>
                        <div class="tile-rate">{format!("{}%", s.rate)}</div>
                        <div class="progress-bar">
                            <div class="progress-fill" style=format!("width: {}%", s.rate)></div>
                        </div>
                        <div class="tile-meta">
                            {format!("完成 {} / {}", s.completed, s.total)}
                            {(s.overdue > 0).then(|| view! { <span class="tile-overdue">{format!(" · 逾期 {}", s.overdue)}</span> })}
                        </div>
                    </button>
                }
            })
            .collect_view()
    };

    let breakdown = move || {
        let counts = status_breakdown(&scoped.get());
        let total = counts.total().max(1);
        counts
            .rows()
            .into_iter()
            .map(|(label, count, class)| {
                let pct = count * 100 / total;
                view! {
                    <div class="breakdown-row">
                        <span class=format!("legend-dot {}", class)></span>
                        <span class="breakdown-label">{label}</span>
                        <span class="breakdown-count">{count}</span>
                        <div class="progress-bar small">
                            <div class=format!("progress-fill {}", class) style=format!("width: {}%", pct)></div>
                        </div>
                    </div>
                }
            })
            .collect_view()
    };

    let attention = move || needs_attention(&scoped.get(), today(), ATTENTION_LIMIT);

    view! {
        <section class="dashboard">
            <h2>"各場站執行概況"</h2>
            <Show when=move || ctx.loading.get()>
                <p class="hint">"載入中..."</p>
            </Show>
            <div class="station-tiles">{tiles}</div>

            <div class="dashboard-row">
                <div class="panel">
                    <h3>"狀態分佈"</h3>
                    {breakdown}
                </div>
                <div class="panel">
                    <h3>"需注意事項"</h3>
                    <Show
                        when=move || !attention().is_empty()
                        fallback=|| view! { <p class="hint">"目前沒有逾期工項"</p> }
                    >
                        <ul class="attention-list">
                            <For
                                each=attention
                                key=|task| task.uid.clone()
                                children=move |task| view! {
                                    <li>
                                        <span class="attention-station">{task.station_name.clone()}</span>
                                        <span class="attention-item">{task.item_name.clone()}</span>
                                        <span class="attention-deadline">{task.deadline.format("%Y-%m-%d").to_string()}</span>
                                        <StatusBadge status=task.status.clone() />
                                    </li>
                                }
                            />
                        </ul>
                    </Show>
                </div>
            </div>

            {move || history_station.get().map(|station| view! {
                <StationHistoryModal
                    station=station
                    on_close=Callback::new(move |_| set_history_station.set(None))
                />
            })}
        </section>
    }
}
