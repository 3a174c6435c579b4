//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Components read
//! through the store; only `AppContext` intents write.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{AuditLogEntry, Task, User, UserUpdates};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in account (None = login screen)
    pub session: Option<User>,
    /// Tasks fetched for the session's station scope
    pub tasks: Vec<Task>,
    /// All accounts (admin only, also used for duplicate checks at registration)
    pub users: Vec<User>,
    /// Audit entries recorded in this session, oldest first
    pub logs: Vec<AuditLogEntry>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Pure patch helpers
// ========================

/// Apply a partial update to the user with `email`. Returns false when absent.
pub fn patch_user(users: &mut [User], email: &str, updates: &UserUpdates) -> bool {
    match users.iter_mut().find(|u| u.has_email(email)) {
        Some(user) => {
            updates.apply_to(user);
            true
        }
        None => false,
    }
}

pub fn remove_user(users: &mut Vec<User>, email: &str) {
    users.retain(|u| !u.has_email(email));
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_session(store: &AppStore, user: Option<User>) {
    store.session().set(user);
}

pub fn store_set_tasks(store: &AppStore, tasks: Vec<Task>) {
    store.tasks().set(tasks);
}

pub fn store_set_users(store: &AppStore, users: Vec<User>) {
    store.users().set(users);
}

/// Patch a user in place; the session copy follows if it is the same account
pub fn store_update_user(store: &AppStore, email: &str, updates: &UserUpdates) {
    patch_user(&mut store.users().write(), email, updates);
    if store.session().with_untracked(|s| s.as_ref().is_some_and(|u| u.has_email(email))) {
        store.session().update(|s| {
            if let Some(user) = s {
                updates.apply_to(user);
            }
        });
    }
}

pub fn store_remove_user(store: &AppStore, email: &str) {
    remove_user(&mut store.users().write(), email);
}

pub fn store_append_log(store: &AppStore, entry: AuditLogEntry) {
    store.logs().write().push(entry);
}

/// Logout: drop the session and every fetched collection
pub fn store_clear(store: &AppStore) {
    store.session().set(None);
    store.tasks().write().clear();
    store.users().write().clear();
    store.logs().write().clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::station::{StationCode, StationScope};

    fn make_user(email: &str, role: Role) -> User {
        User {
            name: email.to_string(),
            email: email.to_string(),
            organization: None,
            role,
            assigned_station: StationScope::Unassigned,
            is_active: false,
            force_change_password: false,
        }
    }

    #[test]
    fn test_patch_user_matches_email_case_insensitively() {
        let mut users = vec![make_user("a@x.tw", Role::Pending), make_user("b@x.tw", Role::Pending)];
        let updates = UserUpdates {
            role: Some(Role::User),
            assigned_station: Some(StationScope::Station(StationCode::Cheng)),
            is_active: Some(true),
        };
        assert!(patch_user(&mut users, "B@X.TW", &updates));
        assert_eq!(users[1].role, Role::User);
        assert!(users[1].is_active);
        assert_eq!(users[0].role, Role::Pending);
        assert!(!patch_user(&mut users, "c@x.tw", &updates));
    }

    #[test]
    fn test_remove_user() {
        let mut users = vec![make_user("a@x.tw", Role::User), make_user("b@x.tw", Role::User)];
        remove_user(&mut users, "A@x.tw");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "b@x.tw");
    }
}
