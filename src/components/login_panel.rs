//! Login Panel Component
//!
//! Sign-in, account request and forgot-password forms.

use leptos::prelude::*;

use crate::commands::Registration;
use crate::context::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
    Forgot,
}

#[component]
pub fn LoginPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (mode, set_mode) = signal(Mode::Login);

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"停車場契約管理系統"</h1>
                {move || match mode.get() {
                    Mode::Login => view! { <LoginForm set_mode=set_mode /> }.into_any(),
                    Mode::Register => view! { <RegisterForm set_mode=set_mode /> }.into_any(),
                    Mode::Forgot => view! { <ForgotForm set_mode=set_mode /> }.into_any(),
                }}
                <Show when=move || ctx.busy.get()>
                    <p class="hint">"處理中..."</p>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn LoginForm(set_mode: WriteSignal<Mode>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.login(email.get(), password.get());
    };

    view! {
        <form class="login-form" on:submit=on_submit>
            <label>"Email"</label>
            <input
                type="email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <label>"密碼"</label>
            <input
                type="password"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" class="btn-primary" disabled=move || ctx.busy.get()>"登入"</button>
            <div class="login-links">
                <button type="button" class="link-btn" on:click=move |_| set_mode.set(Mode::Register)>"申請帳號"</button>
                <button type="button" class="link-btn" on:click=move |_| set_mode.set(Mode::Forgot)>"忘記密碼"</button>
            </div>
        </form>
    }
}

#[component]
fn RegisterForm(set_mode: WriteSignal<Mode>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (organization, set_organization) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let registration = Registration {
            name: name.get(),
            email: email.get(),
            organization: organization.get(),
        };
        ctx.register(registration, Callback::new(move |_| set_mode.set(Mode::Login)));
    };

    view! {
        <form class="login-form" on:submit=on_submit>
            <label>"姓名"</label>
            <input type="text" prop:value=move || name.get() on:input=move |ev| set_name.set(event_target_value(&ev)) />
            <label>"Email"</label>
            <input type="email" prop:value=move || email.get() on:input=move |ev| set_email.set(event_target_value(&ev)) />
            <label>"單位"</label>
            <input
                type="text"
                prop:value=move || organization.get()
                on:input=move |ev| set_organization.set(event_target_value(&ev))
            />
            <button type="submit" class="btn-primary" disabled=move || ctx.busy.get()>"送出申請"</button>
            <button type="button" class="link-btn" on:click=move |_| set_mode.set(Mode::Login)>"返回登入"</button>
        </form>
    }
}

#[component]
fn ForgotForm(set_mode: WriteSignal<Mode>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (email, set_email) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.request_reset(email.get(), Callback::new(move |_| set_mode.set(Mode::Login)));
    };

    view! {
        <form class="login-form" on:submit=on_submit>
            <p class="hint">"輸入註冊的 Email，管理員將協助重設密碼。"</p>
            <label>"Email"</label>
            <input type="email" prop:value=move || email.get() on:input=move |ev| set_email.set(event_target_value(&ev)) />
            <button type="submit" class="btn-primary" disabled=move || ctx.busy.get()>"送出"</button>
            <button type="button" class="link-btn" on:click=move |_| set_mode.set(Mode::Login)>"返回登入"</button>
        </form>
    }
}
