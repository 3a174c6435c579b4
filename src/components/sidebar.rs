//! Sidebar Component
//!
//! Tab navigation, gated by role, plus session controls.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::Role;

/// Main view tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Dashboard,
    Progress,
    Calendar,
    Admin,
}

pub const TABS: [Tab; 4] = [Tab::Dashboard, Tab::Progress, Tab::Calendar, Tab::Admin];

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "儀表板",
            Tab::Progress => "進度回報",
            Tab::Calendar => "行事曆",
            Tab::Admin => "系統管理",
        }
    }

    pub fn visible_to(self, role: Role) -> bool {
        match self {
            Tab::Dashboard | Tab::Progress | Tab::Calendar => role.can_sign_in(),
            Tab::Admin => role.can_administer(),
        }
    }
}

#[component]
pub fn Sidebar(
    current_tab: ReadSignal<Tab>,
    set_current_tab: WriteSignal<Tab>,
    #[prop(into)] on_change_password: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let tabs = move || {
        let role = ctx.role();
        TABS.into_iter()
            .filter(|tab| role.is_some_and(|r| tab.visible_to(r)))
            .collect::<Vec<_>>()
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-brand">"停車場契約管理"</div>
            <nav class="sidebar-nav">
                <For
                    each=tabs
                    key=|tab| *tab
                    children=move |tab| {
                        let tab_class = move || {
                            if current_tab.get() == tab { "nav-btn active" } else { "nav-btn" }
                        };
                        view! {
                            <button class=tab_class on:click=move |_| set_current_tab.set(tab)>
                                {tab.label()}
                            </button>
                        }
                    }
                />
            </nav>
            {move || ctx.session().map(|user| view! {
                <div class="sidebar-user">
                    <div class="user-name">{user.name.clone()}</div>
                    <div class="user-meta">{user.role.as_wire()} " · " {user.assigned_station.label()}</div>
                    <button class="link-btn" on:click=move |_| on_change_password.run(())>"修改密碼"</button>
                    <button class="link-btn" on:click=move |_| ctx.logout()>"登出"</button>
                </div>
            })}
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_admin_tab_gated() {
        assert!(Tab::Admin.visible_to(Role::Admin));
        assert!(!Tab::Admin.visible_to(Role::Manager));
        assert!(Tab::Calendar.visible_to(Role::User));
        assert!(TABS.iter().all(|t| !t.visible_to(Role::Pending)));
    }

    #[test]
    fn test_tabs_key_distinctly() {
        let keys: HashSet<Tab> = TABS.into_iter().collect();
        assert_eq!(keys.len(), TABS.len());
    }
}
