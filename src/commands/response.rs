//! Response Validation
//!
//! Converts loosely-typed script responses into typed results. Individual
//! malformed records are skipped with a warning; a malformed envelope is an
//! error.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::models::{parse_deadline, Role, Task, TaskStatus, User};
use crate::station::{StationCode, StationScope};

/// Number of positional columns in a task row
pub const TASK_ROW_COLUMNS: usize = 9;

fn parse_json(body: &str) -> Result<Value, ApiError> {
    Ok(serde_json::from_str(body.trim())?)
}

/// Accepts `true`, `"TRUE"`, `1`, ...
pub(crate) fn lenient_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_uppercase().as_str() {
            "TRUE" | "YES" | "1" => Some(true),
            "FALSE" | "NO" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn message(obj: &Map<String, Value>) -> Option<String> {
    obj.get("msg")
        .or_else(|| obj.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `Some(flag)` when the body is an object carrying a readable `success`
fn success_flag(obj: &Map<String, Value>) -> Option<bool> {
    obj.get("success").and_then(lenient_bool)
}

/// Strict acknowledgement: `{success: true}` required.
pub fn parse_ack(body: &str, fallback: &str) -> Result<(), ApiError> {
    let value = parse_json(body)?;
    let obj = value
        .as_object()
        .ok_or_else(|| ApiError::Malformed("expected an object".to_string()))?;
    match success_flag(obj) {
        Some(true) => Ok(()),
        Some(false) => Err(ApiError::rejected_or(message(obj), fallback)),
        None => Err(ApiError::Malformed("missing success flag".to_string())),
    }
}

/// Tolerant acknowledgement: anything but an explicit `success: false` is
/// taken as success (empty and non-JSON bodies included).
pub fn parse_lenient_ack(body: &str, fallback: &str) -> Result<(), ApiError> {
    let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body.trim()) else {
        return Ok(());
    };
    match success_flag(&obj) {
        Some(false) => Err(ApiError::rejected_or(message(&obj), fallback)),
        _ => Ok(()),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    organization: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default, alias = "station")]
    assigned_station: Option<String>,
    #[serde(default)]
    is_active: Option<Value>,
    #[serde(default)]
    force_change_password: Option<Value>,
}

/// Validate one user record. The password field, if sent, is dropped.
pub fn user_from_value(value: &Value) -> Result<User, String> {
    let raw: RawUser = serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
    let email = raw
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or("missing email")?;

    let role = match raw.role.as_deref().map(Role::parse) {
        Some(Some(role)) => role,
        other => {
            log::warn!("[API] user {} has unrecognised role {:?}, treating as pending", email, other);
            Role::Pending
        }
    };

    Ok(User {
        name: raw.name.unwrap_or_default().trim().to_string(),
        organization: raw.organization.map(|o| o.trim().to_string()).filter(|o| !o.is_empty()),
        role,
        assigned_station: raw.assigned_station.as_deref().map_or(StationScope::Unassigned, StationScope::parse),
        is_active: raw.is_active.as_ref().and_then(lenient_bool).unwrap_or(true),
        force_change_password: raw.force_change_password.as_ref().and_then(lenient_bool).unwrap_or(false),
        email,
    })
}

fn users_from_array(records: &[Value]) -> Vec<User> {
    records
        .iter()
        .filter_map(|record| match user_from_value(record) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("[API] skipping user record: {}", e);
                None
            }
        })
        .collect()
}

/// `getUsers`: a bare array, or `{success, users}`
pub fn parse_users(body: &str) -> Result<Vec<User>, ApiError> {
    match parse_json(body)? {
        Value::Array(records) => Ok(users_from_array(&records)),
        Value::Object(obj) => {
            if success_flag(&obj) == Some(false) {
                return Err(ApiError::rejected_or(message(&obj), "讀取使用者清單失敗"));
            }
            match obj.get("users") {
                Some(Value::Array(records)) => Ok(users_from_array(records)),
                _ => Err(ApiError::Malformed("expected a user array".to_string())),
            }
        }
        _ => Err(ApiError::Malformed("expected a user array".to_string())),
    }
}

/// Map one positional task row:
/// id, station name, item code, item name, deadline, status, executor,
/// last updated, attachment URL.
pub fn task_from_row(row: &[Value]) -> Result<Task, String> {
    if row.len() < TASK_ROW_COLUMNS - 1 {
        return Err(format!("row has {} columns", row.len()));
    }
    let uid = cell_text(&row[0]);
    if uid.is_empty() {
        return Err("empty task id".to_string());
    }
    let station_name = cell_text(&row[1]);
    let station = StationCode::from_name(&station_name)
        .or_else(|| StationCode::from_code(&station_name))
        .ok_or_else(|| format!("task {} has unknown station {:?}", uid, station_name))?;
    let deadline_raw = cell_text(&row[4]);
    let deadline = parse_deadline(&deadline_raw)
        .ok_or_else(|| format!("task {} has unreadable deadline {:?}", uid, deadline_raw))?;

    let mut task = Task::new(uid, station, cell_text(&row[3]), deadline, TaskStatus::parse(&cell_text(&row[5])));
    task.item_code = cell_text(&row[2]);
    task.executor_email = cell_text(&row[6]);
    task.last_updated = cell_text(&row[7]);
    task.attachment_url = row.get(8).map(cell_text).filter(|url| !url.is_empty());
    Ok(task)
}

/// `getTasks`: `{success, tasks: [row]}`
pub fn parse_tasks(body: &str) -> Result<Vec<Task>, ApiError> {
    let value = parse_json(body)?;
    let obj = value
        .as_object()
        .ok_or_else(|| ApiError::Malformed("expected an object".to_string()))?;
    if success_flag(obj) != Some(true) {
        return Err(ApiError::rejected_or(message(obj), "讀取任務失敗"));
    }
    let rows = obj
        .get("tasks")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::Malformed("missing task rows".to_string()))?;

    Ok(rows
        .iter()
        .filter_map(|row| {
            let result = match row.as_array() {
                Some(cells) => task_from_row(cells),
                None => Err("row is not an array".to_string()),
            };
            result.map_err(|e| log::warn!("[API] skipping task row: {}", e)).ok()
        })
        .collect())
}

/// `checkUserAuth`: `{success, user, msg?}`
pub fn parse_auth(body: &str) -> Result<User, ApiError> {
    let value = parse_json(body)?;
    let obj = value
        .as_object()
        .ok_or_else(|| ApiError::Malformed("expected an object".to_string()))?;
    match success_flag(obj) {
        Some(true) => {
            let user = obj
                .get("user")
                .ok_or_else(|| ApiError::Malformed("missing user".to_string()))?;
            user_from_value(user).map_err(ApiError::Malformed)
        }
        _ => Err(ApiError::rejected_or(message(obj), "登入失敗，請檢查帳號密碼。")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_task_row_mapping() {
        let row = json!(["BF-2025-01", "百福立體停車場", "A01", "消防設備檢查", "2025-03-31", "執行中", "mgr@x.tw", "2025-03-01T02:00:00.000Z", "https://drive/x"]);
        let task = task_from_row(row.as_array().unwrap()).unwrap();
        assert_eq!(task.uid, "BF-2025-01");
        assert_eq!(task.station_code, StationCode::Baifu);
        assert_eq!(task.station_name, "百福立體停車場");
        assert_eq!(task.item_code, "A01");
        assert_eq!(task.item_name, "消防設備檢查");
        assert_eq!(task.deadline, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.executor_email, "mgr@x.tw");
        assert_eq!(task.attachment_url.as_deref(), Some("https://drive/x"));
    }

    #[test]
    fn test_task_row_without_attachment() {
        let row = json!(["T1", "成功立體停車場", 12, "巡檢", "2025/04/01", "待處理", "", "", null]);
        let task = task_from_row(row.as_array().unwrap()).unwrap();
        assert_eq!(task.item_code, "12");
        assert_eq!(task.attachment_url, None);
        let short = json!(["T2", "成功立體停車場", "", "巡檢", "2025-04-01", "待處理", "", ""]);
        assert!(task_from_row(short.as_array().unwrap()).unwrap().attachment_url.is_none());
    }

    #[test]
    fn test_task_rows_skip_bad_entries() {
        let body = json!({
            "success": true,
            "tasks": [
                ["T1", "信義國小地下停車場", "", "巡檢", "2025-04-01", "逾期", "", "", ""],
                ["T2", "Nowhere", "", "巡檢", "2025-04-01", "逾期", "", "", ""],
                ["T3", "信義國小地下停車場", "", "巡檢", "someday", "逾期", "", "", ""],
                "not a row",
                ["T4"]
            ]
        });
        let tasks = parse_tasks(&body.to_string()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].uid, "T1");
    }

    #[test]
    fn test_tasks_rejected() {
        let err = parse_tasks(r#"{"success": false, "msg": "權限不足"}"#).unwrap_err();
        assert_eq!(err, ApiError::Rejected("權限不足".to_string()));
        assert!(matches!(parse_tasks("<html>"), Err(ApiError::Malformed(_))));
        assert!(matches!(parse_tasks(r#"{"success": true}"#), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn test_user_record_is_lenient() {
        let value = json!({
            "name": "陳經理",
            "email": " Chen@X.tw ",
            "password": "hash-should-be-dropped",
            "role": "經理",
            "station": "成功立體停車場",
            "isActive": "TRUE",
            "forceChangePassword": "true"
        });
        let user = user_from_value(&value).unwrap();
        assert_eq!(user.email, "Chen@X.tw");
        assert_eq!(user.role, Role::Manager);
        assert_eq!(user.assigned_station, StationScope::Station(StationCode::Cheng));
        assert!(user.is_active);
        assert!(user.force_change_password);
    }

    #[test]
    fn test_user_unknown_role_is_pending() {
        let user = user_from_value(&json!({"email": "x@x.tw", "role": "root", "assignedStation": "ALL"})).unwrap();
        assert_eq!(user.role, Role::Pending);
        assert_eq!(user.assigned_station, StationScope::All);
        assert!(user_from_value(&json!({"name": "no email"})).is_err());
    }

    #[test]
    fn test_users_shapes() {
        let arr = json!([{"email": "a@x.tw", "role": "管理員"}, {"name": "broken"}]);
        assert_eq!(parse_users(&arr.to_string()).unwrap().len(), 1);
        let wrapped = json!({"success": true, "users": [{"email": "a@x.tw"}]});
        assert_eq!(parse_users(&wrapped.to_string()).unwrap().len(), 1);
        assert!(parse_users("42").is_err());
    }

    #[test]
    fn test_acks() {
        assert_eq!(parse_ack(r#"{"success": true}"#, "f"), Ok(()));
        assert_eq!(parse_ack(r#"{"success": false, "msg": "X"}"#, "f"), Err(ApiError::Rejected("X".to_string())));
        assert_eq!(parse_ack(r#"{"success": false}"#, "f"), Err(ApiError::Rejected("f".to_string())));
        assert!(matches!(parse_ack("ok", "f"), Err(ApiError::Malformed(_))));

        assert_eq!(parse_lenient_ack("", "f"), Ok(()));
        assert_eq!(parse_lenient_ack("<opaque>", "f"), Ok(()));
        assert_eq!(parse_lenient_ack("[1,2]", "f"), Ok(()));
        assert_eq!(parse_lenient_ack(r#"{"success": "FALSE", "message": "no"}"#, "f"), Err(ApiError::Rejected("no".to_string())));
    }

    #[test]
    fn test_auth() {
        let ok = json!({"success": true, "user": {"email": "a@x.tw", "role": "一般人員", "assignedStation": "SHELIAO"}});
        let user = parse_auth(&ok.to_string()).unwrap();
        assert_eq!(user.assigned_station, StationScope::Station(StationCode::Sheliao));
        let denied = parse_auth(r#"{"success": false, "msg": "密碼錯誤"}"#).unwrap_err();
        assert_eq!(denied.to_string(), "密碼錯誤");
    }
}
