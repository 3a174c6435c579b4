//! Create Task Modal
//!
//! New task for one or more stations, or a common task for all of them.

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::commands::NewTask;
use crate::components::Modal;
use crate::context::AppContext;
use crate::station::{StationCode, STATIONS};

#[component]
pub fn CreateTaskModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (item_name, set_item_name) = signal(String::new());
    let (deadline, set_deadline) = signal(String::new());
    let (stations, set_stations) = signal(Vec::<StationCode>::new());
    let (is_common, set_is_common) = signal(false);
    let (error, set_error) = signal::<Option<&'static str>>(None);

    let toggle_station = move |station: StationCode, checked: bool| {
        set_stations.update(|list| {
            list.retain(|s| *s != station);
            if checked {
                list.push(station);
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let date = NaiveDate::parse_from_str(&deadline.get(), "%Y-%m-%d").ok();
        match NewTask::build(&item_name.get(), date, &stations.get(), is_common.get()) {
            Ok(task) => {
                set_error.set(None);
                ctx.create_task(task, on_close);
            }
            Err(msg) => set_error.set(Some(msg)),
        }
    };

    view! {
        <Modal title="新增工項" on_close=Some(on_close)>
            <form class="modal-form" on:submit=on_submit>
                <label>"工項名稱"</label>
                <input
                    type="text"
                    prop:value=move || item_name.get()
                    on:input=move |ev| set_item_name.set(event_target_value(&ev))
                />
                <label>"截止日期"</label>
                <input
                    type="date"
                    prop:value=move || deadline.get()
                    on:input=move |ev| set_deadline.set(event_target_value(&ev))
                />
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || is_common.get()
                        on:change=move |ev| set_is_common.set(event_target_checked(&ev))
                    />
                    "共同工項（全部場站）"
                </label>
                <Show when=move || !is_common.get()>
                    <fieldset class="station-picker">
                        <legend>"場站"</legend>
                        {STATIONS.into_iter().map(|station| view! {
                            <label class="checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || stations.get().contains(&station)
                                    on:change=move |ev| toggle_station(station, event_target_checked(&ev))
                                />
                                {station.name()}
                            </label>
                        }).collect_view()}
                    </fieldset>
                </Show>
                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <div class="modal-actions">
                    <button type="button" on:click=move |_| on_close.run(())>"取消"</button>
                    <button type="submit" class="btn-primary" disabled=move || ctx.busy.get()>"建立"</button>
                </div>
            </form>
        </Modal>
    }
}
