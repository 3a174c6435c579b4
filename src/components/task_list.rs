//! Task List Component
//!
//! Scoped, filterable task table with status updates, history, and task
//! creation for roles allowed to create.

use leptos::prelude::*;

use crate::components::{CreateTaskModal, EditTaskModal, StatusBadge, TaskHistoryModal};
use crate::context::AppContext;
use crate::filter::{visible_tasks, TaskFilter};
use crate::models::{Role, Task, TaskStatus, TASK_STATUSES};
use crate::station::{StationCode, StationScope, STATIONS};
use crate::store::AppStateStoreFields;

#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (station, set_station) = signal::<Option<StationCode>>(None);
    let (status, set_status) = signal::<Option<TaskStatus>>(None);
    let (search, set_search) = signal(String::new());
    let (editing, set_editing) = signal::<Option<Task>>(None);
    let (history_of, set_history_of) = signal::<Option<Task>>(None);
    let (creating, set_creating) = signal(false);

    let rows = move || {
        let filter = TaskFilter {
            station: station.get(),
            status: status.get(),
            search: search.get(),
        };
        ctx.store.tasks().with(|tasks| visible_tasks(tasks, ctx.scope(), &filter))
    };

    let can_create = move || ctx.role().is_some_and(Role::can_create_tasks);
    let sees_all = move || ctx.scope() == StationScope::All;

    view! {
        <section class="task-list">
            <div class="toolbar">
                <Show when=sees_all>
                    <select on:change=move |ev| set_station.set(StationCode::from_code(&event_target_value(&ev)))>
                        <option value="">"全部場站"</option>
                        {STATIONS.into_iter().map(|s| view! { <option value=s.code()>{s.name()}</option> }).collect_view()}
                    </select>
                </Show>
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    set_status.set((!value.is_empty()).then(|| TaskStatus::parse(&value)));
                }>
                    <option value="">"全部狀態"</option>
                    {TASK_STATUSES.iter().map(|s| view! { <option value=s.as_wire().to_string()>{s.as_wire().to_string()}</option> }).collect_view()}
                </select>
                <input
                    type="search"
                    placeholder="搜尋工項或編號"
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <button on:click=move |_| ctx.refresh_tasks() disabled=move || ctx.loading.get()>"重新整理"</button>
                <Show when=can_create>
                    <button class="btn-primary" on:click=move |_| set_creating.set(true)>"新增工項"</button>
                </Show>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"編號"</th><th>"場站"</th><th>"工項"</th><th>"截止日"</th>
                        <th>"狀態"</th><th>"執行人"</th><th>"附件"</th><th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|task| (task.uid.clone(), task.status.clone(), task.last_updated.clone())
                        children=move |task| {
                            let for_edit = task.clone();
                            let for_history = task.clone();
                            view! {
                                <tr>
                                    <td class="mono">{task.uid.clone()}</td>
                                    <td>{task.station_name.clone()}</td>
                                    <td>{task.item_name.clone()}</td>
                                    <td>{task.deadline.format("%Y-%m-%d").to_string()}</td>
                                    <td><StatusBadge status=task.status.clone() /></td>
                                    <td>{task.executor_email.clone()}</td>
                                    <td>{task.attachment_url.clone().map(|url| view! {
                                        <a href=url target="_blank" rel="noopener">"檢視"</a>
                                    })}</td>
                                    <td class="row-actions">
                                        <button class="small" on:click=move |_| set_editing.set(Some(for_edit.clone()))>"回報"</button>
                                        <button class="small" on:click=move |_| set_history_of.set(Some(for_history.clone()))>"歷程"</button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || rows().is_empty()>
                <p class="hint">{move || if ctx.loading.get() { "載入中..." } else { "沒有符合條件的工項" }}</p>
            </Show>

            {move || editing.get().map(|task| view! {
                <EditTaskModal task=task on_close=Callback::new(move |_| set_editing.set(None)) />
            })}
            {move || history_of.get().map(|task| view! {
                <TaskHistoryModal task=task on_close=Callback::new(move |_| set_history_of.set(None)) />
            })}
            <Show when=move || creating.get()>
                <CreateTaskModal on_close=Callback::new(move |_| set_creating.set(false)) />
            </Show>
        </section>
    }
}
