use leptos::prelude::*;

use crate::components::Modal;
use crate::context::AppContext;
use crate::filter::task_history;
use crate::models::Task;
use crate::store::AppStateStoreFields;

/// Audit entries recorded for one task during this session
#[component]
pub fn TaskHistoryModal(task: Task, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let uid = task.uid.clone();
    let entries = move || ctx.store.logs().with(|logs| task_history(logs, &uid));

    view! {
        <Modal title=format!("{} 歷程", task.item_name) on_close=Some(on_close)>
            <p class="hint">{format!("最後更新：{}", task.last_updated)}</p>
            <ul class="history-list">
                <For
                    each=entries
                    key=|entry| entry.id.clone()
                    children=move |entry| view! {
                        <li>
                            <span class="history-time">{entry.timestamp.clone()}</span>
                            <span class="history-action">{entry.action.label()}</span>
                            <span class="history-user">{entry.user_email.clone()}</span>
                            <span class="history-details">{entry.details.clone()}</span>
                        </li>
                    }
                />
            </ul>
        </Modal>
    }
}
