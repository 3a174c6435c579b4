//! Change Password Modal
//!
//! Voluntary from the sidebar, or forced after sign-in when the account is
//! flagged. The forced variant has no close button.

use leptos::prelude::*;

use crate::components::Modal;
use crate::context::AppContext;
use crate::models::validate_new_password;

#[component]
pub fn ChangePasswordModal(
    forced: bool,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (error, set_error) = signal::<Option<&'static str>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let new_password = password.get();
        if let Err(msg) = validate_new_password(&new_password, &confirm.get()) {
            set_error.set(Some(msg));
            return;
        }
        set_error.set(None);
        ctx.change_password(new_password, on_close);
    };

    let title = if forced { "首次登入，請設定新密碼" } else { "修改密碼" };

    view! {
        <Modal title=title on_close=(!forced).then_some(on_close)>
            <form class="modal-form" on:submit=on_submit>
                <label>"新密碼"</label>
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <label>"確認新密碼"</label>
                <input
                    type="password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <div class="modal-actions">
                    <Show when=move || !forced>
                        <button type="button" on:click=move |_| on_close.run(())>"取消"</button>
                    </Show>
                    <button type="submit" class="btn-primary" disabled=move || ctx.busy.get()>"確認修改"</button>
                </div>
            </form>
        </Modal>
    }
}
