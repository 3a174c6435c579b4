//! List Filters
//!
//! Access scoping and UI filters for the task, user and audit-log tables.

use crate::models::{AuditLogEntry, Role, Task, TaskStatus, User};
use crate::station::{StationCode, StationScope};

/// UI filter controls of the task table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub station: Option<StationCode>,
    pub status: Option<TaskStatus>,
    pub search: String,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let station_ok = self.station.map_or(true, |s| task.station_code == s);
        let status_ok = self.status.as_ref().map_or(true, |s| &task.status == s);
        station_ok && status_ok && matches_search(task, &self.search)
    }
}

fn matches_search(task: &Task, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || task.item_name.to_lowercase().contains(&term)
        || task.uid.to_lowercase().contains(&term)
}

/// Tasks the viewer may see after applying the filter controls.
///
/// The scope check runs first and does not depend on the controls, so a
/// station-bound user never sees another station whatever `filter` says.
pub fn visible_tasks(tasks: &[Task], scope: StationScope, filter: &TaskFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| scope.permits(task.station_code))
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

/// Accounts waiting for approval
pub fn pending_users(users: &[User]) -> Vec<User> {
    users.iter().filter(|u| u.role == Role::Pending).cloned().collect()
}

/// Approved accounts matching the admin search box
pub fn active_users(users: &[User], search: &str) -> Vec<User> {
    let term = search.trim().to_lowercase();
    users
        .iter()
        .filter(|u| u.role != Role::Pending)
        .filter(|u| {
            term.is_empty()
                || u.name.to_lowercase().contains(&term)
                || u.email.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Audit entries matching the log search box, newest first
pub fn search_logs(logs: &[AuditLogEntry], search: &str) -> Vec<AuditLogEntry> {
    let term = search.trim().to_lowercase();
    let mut found: Vec<AuditLogEntry> = logs
        .iter()
        .filter(|l| {
            term.is_empty()
                || l.user_email.to_lowercase().contains(&term)
                || l.details.to_lowercase().contains(&term)
                || l.action.label().contains(&term)
        })
        .cloned()
        .collect();
    found.reverse();
    found
}

/// Audit entries about one task, oldest first
pub fn task_history(logs: &[AuditLogEntry], task_uid: &str) -> Vec<AuditLogEntry> {
    logs.iter()
        .filter(|l| l.task_uid.as_deref() == Some(task_uid))
        .cloned()
        .collect()
}
