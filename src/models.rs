//! Frontend Models
//!
//! Client-side copies of the entities owned by the remote script service.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::station::{StationCode, StationScope};

// ========================
// Task
// ========================

/// Task lifecycle status. Wire labels are the backend's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
    /// Anything the backend sends that we do not recognise
    Other(String),
}

/// Statuses offered by pickers, in display order
pub const TASK_STATUSES: [TaskStatus; 4] = [
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::Completed,
    TaskStatus::Overdue,
];

/// Picker options for a task currently in `current`. A status outside the
/// fixed set is kept as its own option so it stays selected.
pub fn status_choices(current: &TaskStatus) -> Vec<TaskStatus> {
    let mut choices = TASK_STATUSES.to_vec();
    if !choices.contains(current) {
        choices.push(current.clone());
    }
    choices
}

impl TaskStatus {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value {
            "待處理" => TaskStatus::Pending,
            "執行中" => TaskStatus::InProgress,
            "已完成" => TaskStatus::Completed,
            "逾期" => TaskStatus::Overdue,
            other => match other.to_ascii_lowercase().replace('_', "-").as_str() {
                "pending" => TaskStatus::Pending,
                "in-progress" => TaskStatus::InProgress,
                "completed" => TaskStatus::Completed,
                "overdue" => TaskStatus::Overdue,
                _ => TaskStatus::Other(other.to_string()),
            },
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            TaskStatus::Pending => "待處理",
            TaskStatus::InProgress => "執行中",
            TaskStatus::Completed => "已完成",
            TaskStatus::Overdue => "逾期",
            TaskStatus::Other(raw) => raw,
        }
    }

    /// Calendar priority: lower sorts first
    pub fn rank(&self) -> u8 {
        match self {
            TaskStatus::Overdue => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Pending => 3,
            TaskStatus::Completed => 4,
            TaskStatus::Other(_) => 99,
        }
    }

    /// CSS modifier for badges and dots
    pub fn css_class(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "status-pending",
            TaskStatus::InProgress => "status-in-progress",
            TaskStatus::Completed => "status-completed",
            TaskStatus::Overdue => "status-overdue",
            TaskStatus::Other(_) => "status-other",
        }
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        TaskStatus::parse(&value)
    }
}

impl From<TaskStatus> for String {
    fn from(value: TaskStatus) -> Self {
        value.as_wire().to_string()
    }
}

/// Task data structure (one row of the task sheet)
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub uid: String,
    pub station_code: StationCode,
    pub station_name: String,
    pub item_code: String,
    pub item_name: String,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub executor_email: String,
    /// Raw timestamp as sent by the backend
    pub last_updated: String,
    pub attachment_url: Option<String>,
}

impl Task {
    /// Station name is always taken from the code so the two cannot disagree.
    pub fn new(uid: impl Into<String>, station_code: StationCode, item_name: impl Into<String>, deadline: NaiveDate, status: TaskStatus) -> Self {
        Self {
            uid: uid.into(),
            station_code,
            station_name: station_code.name().to_string(),
            item_code: String::new(),
            item_name: item_name.into(),
            deadline,
            status,
            executor_email: String::new(),
            last_updated: String::new(),
            attachment_url: None,
        }
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.last_updated)
    }

    /// Past its deadline and not yet completed
    pub fn is_late(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Completed && self.deadline < today
    }
}

/// Parse a deadline cell. Only the calendar date counts; any time-of-day
/// part is dropped without timezone conversion.
pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local().date());
    }
    // "2024-12-03T10:00:00" or "2024-12-03 10:00:00" without offset
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Lenient timestamp parser for `lastUpdated`
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    parse_deadline(raw).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|n| n.and_utc())
}

// ========================
// User
// ========================

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Manager,
    User,
    Pending,
}

/// Roles an administrator may grant, in picker order
pub const ASSIGNABLE_ROLES: [Role; 3] = [Role::Manager, Role::User, Role::Admin];

impl Role {
    /// Unknown values fall back to `Pending`, which grants nothing.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value {
            "管理員" => Some(Role::Admin),
            "經理" => Some(Role::Manager),
            "一般人員" => Some(Role::User),
            "待審核" => Some(Role::Pending),
            other => match other.to_ascii_lowercase().as_str() {
                "admin" => Some(Role::Admin),
                "manager" => Some(Role::Manager),
                "user" => Some(Role::User),
                "pending" => Some(Role::Pending),
                _ => None,
            },
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Role::Admin => "管理員",
            Role::Manager => "經理",
            Role::User => "一般人員",
            Role::Pending => "待審核",
        }
    }

    pub fn can_create_tasks(self) -> bool {
        match self {
            Role::Admin | Role::Manager => true,
            Role::User | Role::Pending => false,
        }
    }

    pub fn can_administer(self) -> bool {
        match self {
            Role::Admin => true,
            Role::Manager | Role::User | Role::Pending => false,
        }
    }

    pub fn can_sign_in(self) -> bool {
        match self {
            Role::Admin | Role::Manager | Role::User => true,
            Role::Pending => false,
        }
    }
}

/// User data structure. The password hash is never held client-side.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub organization: Option<String>,
    pub role: Role,
    pub assigned_station: StationScope,
    pub is_active: bool,
    pub force_change_password: bool,
}

impl User {
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    /// Reason an authenticated account is still refused a session
    pub fn sign_in_refusal(&self) -> Option<&'static str> {
        if !self.role.can_sign_in() {
            return Some("您的帳號尚待管理員審核");
        }
        if !self.is_active {
            return Some("此帳號已停用，請聯絡管理員");
        }
        None
    }
}

/// New password: at least 4 characters, confirmation must match
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password.chars().count() < 4 {
        return Err("密碼長度至少需 4 個字元");
    }
    if password != confirm {
        return Err("兩次輸入的密碼不一致");
    }
    Ok(())
}

/// Partial update sent with `updateUser`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdates {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "ser_role")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "ser_scope")]
    pub assigned_station: Option<StationScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

fn ser_role<S: serde::Serializer>(role: &Option<Role>, s: S) -> Result<S::Ok, S::Error> {
    match role {
        Some(role) => s.serialize_str(role.as_wire()),
        None => s.serialize_none(),
    }
}

fn ser_scope<S: serde::Serializer>(scope: &Option<StationScope>, s: S) -> Result<S::Ok, S::Error> {
    match scope {
        Some(scope) => s.serialize_str(scope.to_wire()),
        None => s.serialize_none(),
    }
}

impl UserUpdates {
    pub fn apply_to(&self, user: &mut User) {
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(scope) = self.assigned_station {
            user.assigned_station = scope;
        }
        if let Some(active) = self.is_active {
            user.is_active = active;
        }
    }
}

// ========================
// Audit Log
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogAction {
    #[serde(rename = "登入")]
    Login,
    #[serde(rename = "註冊申請")]
    Register,
    #[serde(rename = "核准用戶")]
    ApproveUser,
    #[serde(rename = "新增工項")]
    CreateTask,
    #[serde(rename = "變更狀態")]
    UpdateStatus,
    #[serde(rename = "刪除項目")]
    Delete,
    #[serde(rename = "上傳檔案")]
    UploadFile,
    #[serde(rename = "重設密碼請求")]
    ResetPasswordRequest,
    #[serde(rename = "修改密碼")]
    ChangePassword,
}

impl LogAction {
    pub fn label(self) -> &'static str {
        match self {
            LogAction::Login => "登入",
            LogAction::Register => "註冊申請",
            LogAction::ApproveUser => "核准用戶",
            LogAction::CreateTask => "新增工項",
            LogAction::UpdateStatus => "變更狀態",
            LogAction::Delete => "刪除項目",
            LogAction::UploadFile => "上傳檔案",
            LogAction::ResetPasswordRequest => "重設密碼請求",
            LogAction::ChangePassword => "修改密碼",
        }
    }
}

/// Append-only audit record (the `logData` payload of `writeLog`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub timestamp: String,
    pub user_email: String,
    pub action: LogAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_uid: Option<String>,
    pub details: String,
}

impl AuditLogEntry {
    pub fn new(user_email: &str, action: LogAction, details: impl Into<String>, task_uid: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            user_email: user_email.to_string(),
            action,
            task_uid,
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(TaskStatus::parse("逾期"), TaskStatus::Overdue);
        assert_eq!(TaskStatus::parse("in_progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::parse("暫停"), TaskStatus::Other("暫停".to_string()));
        assert_eq!(TaskStatus::Other("暫停".to_string()).as_wire(), "暫停");
    }

    #[test]
    fn test_status_choices_keep_unknown_current() {
        assert_eq!(status_choices(&TaskStatus::InProgress), TASK_STATUSES.to_vec());

        let paused = TaskStatus::Other("暫停".to_string());
        let choices = status_choices(&paused);
        assert_eq!(choices.len(), TASK_STATUSES.len() + 1);
        assert_eq!(choices.last(), Some(&paused));
        assert_eq!(choices.iter().filter(|s| **s == paused).count(), 1);
    }

    #[test]
    fn test_deadline_ignores_time_of_day() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 3).unwrap();
        assert_eq!(parse_deadline("2024-12-03"), Some(expected));
        assert_eq!(parse_deadline("2024/12/03"), Some(expected));
        assert_eq!(parse_deadline("2024-12-03T23:59:00"), Some(expected));
        assert_eq!(parse_deadline("2024-12-03T23:59:00+08:00"), Some(expected));
        assert_eq!(parse_deadline("2024-12-03T00:00:01.000Z"), Some(expected));
        assert_eq!(parse_deadline(""), None);
        assert_eq!(parse_deadline("soon"), None);
    }

    #[test]
    fn test_task_new_derives_station_name() {
        let task = Task::new("T-1", StationCode::Xinyi, "消防檢查", NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), TaskStatus::Pending);
        assert_eq!(task.station_name, "信義國小地下停車場");
    }

    #[test]
    fn test_role_gates() {
        assert_eq!(Role::parse("經理"), Some(Role::Manager));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
        assert!(Role::Manager.can_create_tasks());
        assert!(!Role::Manager.can_administer());
        assert!(!Role::Pending.can_sign_in());
    }

    fn make_user(role: Role, is_active: bool) -> User {
        User {
            name: "A".to_string(),
            email: "A@x.tw".to_string(),
            organization: None,
            role,
            assigned_station: StationScope::All,
            is_active,
            force_change_password: false,
        }
    }

    #[test]
    fn test_sign_in_refusal() {
        assert_eq!(make_user(Role::User, true).sign_in_refusal(), None);
        assert!(make_user(Role::Pending, true).sign_in_refusal().is_some());
        assert!(make_user(Role::Admin, false).sign_in_refusal().is_some());
        assert!(make_user(Role::User, true).has_email(" a@X.tw"));
    }

    #[test]
    fn test_validate_new_password() {
        assert_eq!(validate_new_password("abcd", "abcd"), Ok(()));
        assert!(validate_new_password("abc", "abc").is_err());
        assert_eq!(validate_new_password("abcd", "abce"), Err("兩次輸入的密碼不一致"));
        assert_eq!(validate_new_password("密碼四字", "密碼四字"), Ok(()));
    }

    #[test]
    fn test_user_updates_serialize_partial() {
        let updates = UserUpdates {
            role: Some(Role::Manager),
            assigned_station: Some(StationScope::Station(StationCode::Cheng)),
            is_active: Some(true),
        };
        let json = serde_json::to_value(&updates).unwrap();
        assert_eq!(json, serde_json::json!({"role": "經理", "assignedStation": "CHENG", "isActive": true}));

        let only_active = UserUpdates { is_active: Some(false), ..Default::default() };
        assert_eq!(serde_json::to_value(&only_active).unwrap(), serde_json::json!({"isActive": false}));
    }

    #[test]
    fn test_log_entry_wire_shape() {
        let entry = AuditLogEntry::new("a@b.tw", LogAction::UpdateStatus, "T-1 → 已完成", Some("T-1".to_string()));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["action"], "變更狀態");
        assert_eq!(json["userEmail"], "a@b.tw");
        assert_eq!(json["taskUid"], "T-1");
    }
}
