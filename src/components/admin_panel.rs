//! Admin Panel Component
//!
//! Tasks, account approval and management, and the audit log.

use leptos::prelude::*;

use crate::components::{DeleteConfirmButton, TaskList};
use crate::context::AppContext;
use crate::filter::{active_users, pending_users, search_logs};
use crate::models::{Role, User, UserUpdates, ASSIGNABLE_ROLES};
use crate::station::{StationScope, STATIONS};
use crate::store::AppStateStoreFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Tasks,
    Users,
    Logs,
}

#[component]
pub fn AdminPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (tab, set_tab) = signal(AdminTab::Users);

    let tab_btn = move |target: AdminTab, label: &'static str| {
        view! {
            <button
                class=move || if tab.get() == target { "tab-btn active" } else { "tab-btn" }
                on:click=move |_| set_tab.set(target)
            >
                {label}
            </button>
        }
    };

    move || {
        if !ctx.role().is_some_and(Role::can_administer) {
            return view! { <p class="hint">"您沒有管理權限"</p> }.into_any();
        }
        view! {
            <section class="admin-panel">
                <div class="tab-bar">
                    {tab_btn(AdminTab::Tasks, "工項管理")}
                    {tab_btn(AdminTab::Users, "帳號管理")}
                    {tab_btn(AdminTab::Logs, "操作紀錄")}
                </div>
                {move || match tab.get() {
                    AdminTab::Tasks => view! { <TaskList /> }.into_any(),
                    AdminTab::Users => view! { <UsersTab /> }.into_any(),
                    AdminTab::Logs => view! { <LogsTab /> }.into_any(),
                }}
            </section>
        }
        .into_any()
    }
}

// ========================
// Shared pickers
// ========================

/// Station scope `<select>`; value is the scope's wire form
fn scope_options(current: StationScope) -> impl IntoView {
    let all = StationScope::All;
    view! {
        <option value=all.to_wire() selected={current == all}>{all.label()}</option>
        {STATIONS.into_iter().map(|s| {
            let scope = StationScope::Station(s);
            view! { <option value=scope.to_wire() selected={current == scope}>{s.name()}</option> }
        }).collect_view()}
    }
}

fn role_options(current: Role) -> impl IntoView {
    ASSIGNABLE_ROLES
        .into_iter()
        .map(|role| view! { <option value=role.as_wire() selected={current == role}>{role.as_wire()}</option> })
        .collect_view()
}

// ========================
// Users
// ========================

#[component]
fn UsersTab() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (search, set_search) = signal(String::new());

    let pending = move || ctx.store.users().with(|users| pending_users(users));
    let active = move || ctx.store.users().with(|users| active_users(users, &search.get()));

    view! {
        <div class="users-tab">
            <div class="toolbar">
                <button on:click=move |_| ctx.refresh_users()>"重新整理"</button>
            </div>
            <h3>"待審核申請"</h3>
            <Show
                when=move || !pending().is_empty()
                fallback=|| view! { <p class="hint">"沒有待審核的申請"</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr><th>"姓名"</th><th>"Email"</th><th>"單位"</th><th>"角色"</th><th>"場站"</th><th></th></tr>
                    </thead>
                    <tbody>
                        <For each=pending key=|user| user.email.clone() children=|user| view! { <PendingRow user=user /> } />
                    </tbody>
                </table>
            </Show>

            <h3>"使用者列表"</h3>
            <input
                type="search"
                placeholder="搜尋姓名或 Email"
                prop:value=move || search.get()
                on:input=move |ev| set_search.set(event_target_value(&ev))
            />
            <table class="data-table">
                <thead>
                    <tr><th>"姓名"</th><th>"Email"</th><th>"角色"</th><th>"場站"</th><th>"狀態"</th><th></th></tr>
                </thead>
                <tbody>
                    <For
                        each=active
                        key=|user| (user.email.clone(), user.role, user.assigned_station, user.is_active)
                        children=|user| view! { <UserRow user=user /> }
                    />
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn PendingRow(user: User) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (role, set_role) = signal(Role::User);
    let (scope, set_scope) = signal(StationScope::Station(STATIONS[0]));
    let approve_email = user.email.clone();
    let reject_email = user.email.clone();

    view! {
        <tr>
            <td>{user.name.clone()}</td>
            <td>{user.email.clone()}</td>
            <td>{user.organization.clone().unwrap_or_default()}</td>
            <td>
                <select on:change=move |ev| {
                    if let Some(r) = Role::parse(&event_target_value(&ev)) {
                        set_role.set(r);
                    }
                }>
                    {role_options(Role::User)}
                </select>
            </td>
            <td>
                <select on:change=move |ev| set_scope.set(StationScope::parse(&event_target_value(&ev)))>
                    {scope_options(StationScope::Station(STATIONS[0]))}
                </select>
            </td>
            <td class="row-actions">
                <button class="btn-primary small" on:click=move |_| ctx.approve_user(approve_email.clone(), role.get(), scope.get())>
                    "核准"
                </button>
                <DeleteConfirmButton
                    button_class="btn-danger small"
                    label="拒絕"
                    confirm_text="確定拒絕?"
                    on_confirm=Callback::new(move |_| ctx.delete_user(reject_email.clone()))
                />
            </td>
        </tr>
    }
}

#[component]
fn UserRow(user: User) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let email = user.email.clone();
    let is_active = user.is_active;

    let update = {
        let email = email.clone();
        move |updates: UserUpdates| ctx.update_user(email.clone(), updates)
    };
    let update_role = update.clone();
    let update_scope = update.clone();
    let update_active = update;
    let delete_email = email.clone();

    view! {
        <tr class={if is_active { "" } else { "inactive" }}>
            <td>{user.name.clone()}</td>
            <td>{email.clone()}</td>
            <td>
                <select on:change=move |ev| {
                    if let Some(role) = Role::parse(&event_target_value(&ev)) {
                        update_role(UserUpdates { role: Some(role), ..Default::default() });
                    }
                }>
                    {role_options(user.role)}
                </select>
            </td>
            <td>
                <select on:change=move |ev| {
                    let scope = StationScope::parse(&event_target_value(&ev));
                    update_scope(UserUpdates { assigned_station: Some(scope), ..Default::default() });
                }>
                    {scope_options(user.assigned_station)}
                </select>
            </td>
            <td>
                <button
                    class="small"
                    on:click=move |_| update_active(UserUpdates { is_active: Some(!is_active), ..Default::default() })
                >
                    {if is_active { "停用" } else { "啟用" }}
                </button>
            </td>
            <td>
                <DeleteConfirmButton
                    button_class="btn-danger small"
                    label="刪除"
                    on_confirm=Callback::new(move |_| ctx.delete_user(delete_email.clone()))
                />
            </td>
        </tr>
    }
}

// ========================
// Logs
// ========================

#[component]
fn LogsTab() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (search, set_search) = signal(String::new());
    let (diagnostics, set_diagnostics) = signal(Vec::<String>::new());

    let entries = move || ctx.store.logs().with(|logs| search_logs(logs, &search.get()));

    view! {
        <div class="logs-tab">
            <input
                type="search"
                placeholder="搜尋 Email、動作或內容"
                prop:value=move || search.get()
                on:input=move |ev| set_search.set(event_target_value(&ev))
            />
            <table class="data-table">
                <thead>
                    <tr><th>"時間"</th><th>"使用者"</th><th>"動作"</th><th>"內容"</th></tr>
                </thead>
                <tbody>
                    <For
                        each=entries
                        key=|entry| entry.id.clone()
                        children=|entry| view! {
                            <tr>
                                <td class="mono">{entry.timestamp.clone()}</td>
                                <td>{entry.user_email.clone()}</td>
                                <td>{entry.action.label()}</td>
                                <td>{entry.details.clone()}</td>
                            </tr>
                        }
                    />
                </tbody>
            </table>

            <div class="diagnostics">
                <button class="small" on:click=move |_| set_diagnostics.set(rolling_logger::recent_lines())>
                    "載入系統診斷紀錄"
                </button>
                <button
                    class="small"
                    on:click=move |_| {
                        rolling_logger::clear();
                        set_diagnostics.set(Vec::new());
                    }
                >
                    "清除"
                </button>
                <pre>{move || diagnostics.get().join("\n")}</pre>
            </div>
        </div>
    }
}
