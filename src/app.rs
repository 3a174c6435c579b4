//! Parking Contract Dashboard App
//!
//! Root component: login screen or the sidebar layout with the selected tab.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands::ScriptClient;
use crate::components::{
    AdminPanel, CalendarView, ChangePasswordModal, Dashboard, LoginPanel, NoticeBanner, Sidebar, Tab, TaskList,
};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::ConfigError;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App(config: Result<AppConfig, ConfigError>) -> impl IntoView {
    match config {
        Ok(config) => view! { <Shell config=config /> }.into_any(),
        Err(err) => view! {
            <div class="config-error">
                <h1>"系統設定錯誤"</h1>
                <p>{err.to_string()}</p>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn Shell(config: AppConfig) -> impl IntoView {
    // Store + single-writer context for every view below
    let store = Store::new(AppState::default());
    provide_context(store);
    let ctx = AppContext::new(
        store,
        ScriptClient::from_config(&config),
        signal(None),
        signal(false),
        signal(false),
    );
    provide_context(ctx);

    let (current_tab, set_current_tab) = signal(Tab::Dashboard);
    let (changing_password, set_changing_password) = signal(false);

    let signed_in = Memo::new(move |_| store.session().with(Option::is_some));
    let must_change_password = Memo::new(move |_| {
        store.session().with(|s| s.as_ref().is_some_and(|u| u.force_change_password))
    });

    // Back to the dashboard when the current tab is no longer permitted
    Effect::new(move |_| {
        if let Some(role) = ctx.role() {
            if !current_tab.get().visible_to(role) {
                set_current_tab.set(Tab::Dashboard);
            }
        }
    });

    let layout = move || {
        view! {
            <div class="app-layout">
                <Sidebar
                    current_tab=current_tab
                    set_current_tab=set_current_tab
                    on_change_password=Callback::new(move |_| set_changing_password.set(true))
                />
                <main class="main-content">
                    <NoticeBanner />
                    {move || match current_tab.get() {
                        Tab::Dashboard => view! { <Dashboard /> }.into_any(),
                        Tab::Progress => view! { <TaskList /> }.into_any(),
                        Tab::Calendar => view! { <CalendarView /> }.into_any(),
                        Tab::Admin => view! { <AdminPanel /> }.into_any(),
                    }}
                </main>
                <Show when=move || must_change_password.get()>
                    <ChangePasswordModal forced=true on_close=Callback::new(|_| ()) />
                </Show>
                <Show when=move || changing_password.get() && !must_change_password.get()>
                    <ChangePasswordModal
                        forced=false
                        on_close=Callback::new(move |_| set_changing_password.set(false))
                    />
                </Show>
            </div>
        }
    };

    move || {
        if signed_in.get() {
            layout().into_any()
        } else {
            view! {
                <NoticeBanner />
                <LoginPanel />
            }
            .into_any()
        }
    }
}
