use leptos::prelude::*;

use crate::components::Modal;
use crate::context::AppContext;
use crate::stats::station_history;
use crate::station::StationCode;
use crate::store::AppStateStoreFields;

/// Completed tasks of one station, newest update first
#[component]
pub fn StationHistoryModal(
    station: StationCode,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let done = move || ctx.store.tasks().with(|tasks| station_history(tasks, station));

    view! {
        <Modal title=format!("{} 已完成紀錄", station.name()) on_close=Some(on_close)>
            <Show
                when=move || !done().is_empty()
                fallback=|| view! { <p class="hint">"尚無已完成的工項"</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr><th>"工項"</th><th>"截止日"</th><th>"完成時間"</th><th>"執行人"</th><th>"附件"</th></tr>
                    </thead>
                    <tbody>
                        <For
                            each=done
                            key=|task| task.uid.clone()
                            children=move |task| view! {
                                <tr>
                                    <td>{task.item_name.clone()}</td>
                                    <td>{task.deadline.format("%Y-%m-%d").to_string()}</td>
                                    <td>{task.last_updated_at().map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default()}</td>
                                    <td>{task.executor_email.clone()}</td>
                                    <td>{task.attachment_url.clone().map(|url| view! {
                                        <a href=url target="_blank" rel="noopener">"檢視"</a>
                                    })}</td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </Modal>
    }
}
