//! Edit Task Modal
//!
//! Progress report: new status and attachment link for one task.

use leptos::prelude::*;

use crate::components::Modal;
use crate::context::AppContext;
use crate::models::{status_choices, Task, TaskStatus};

#[component]
pub fn EditTaskModal(task: Task, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (status, set_status) = signal(task.status.clone());
    let (attachment, set_attachment) = signal(task.attachment_url.clone().unwrap_or_default());

    let title = format!("{} · {}", task.station_name, task.item_name);
    let current = task.status.clone();
    let deadline = task.deadline.format("%Y-%m-%d").to_string();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.update_task_status(task.clone(), status.get(), attachment.get(), on_close);
    };

    view! {
        <Modal title=title on_close=Some(on_close)>
            <form class="modal-form" on:submit=on_submit>
                <p class="hint">{format!("截止日 {} · 目前狀態 {}", deadline, current.as_wire())}</p>
                <label>"狀態"</label>
                <select on:change=move |ev| set_status.set(TaskStatus::parse(&event_target_value(&ev)))>
                    {status_choices(&current).into_iter().map(|s| {
                        let value = s.as_wire().to_string();
                        let is_selected = s == current;
                        view! { <option value=value.clone() selected=is_selected>{value.clone()}</option> }
                    }).collect_view()}
                </select>
                <label>"附件連結"</label>
                <input
                    type="url"
                    placeholder="https://"
                    prop:value=move || attachment.get()
                    on:input=move |ev| set_attachment.set(event_target_value(&ev))
                />
                <div class="modal-actions">
                    <button type="button" on:click=move |_| on_close.run(())>"取消"</button>
                    <button type="submit" class="btn-primary" disabled=move || ctx.busy.get()>"送出"</button>
                </div>
            </form>
        </Modal>
    }
}
