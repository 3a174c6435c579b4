//! Task Commands
//!
//! Fetch, create and status updates for contract tasks.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use super::response::{parse_ack, parse_lenient_ack, parse_tasks};
use super::Transport;
use crate::error::ApiError;
use crate::models::{Task, TaskStatus};
use crate::station::{StationCode, StationScope, STATIONS};

/// Form fields of `createNewTask`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub item_name: String,
    pub deadline: NaiveDate,
    pub station_codes: Vec<StationCode>,
    pub is_common: bool,
}

impl NewTask {
    /// A common task goes to every station; otherwise at least one must be picked.
    pub fn build(item_name: &str, deadline: Option<NaiveDate>, stations: &[StationCode], is_common: bool) -> Result<Self, &'static str> {
        let item_name = item_name.trim();
        if item_name.is_empty() {
            return Err("請輸入工項名稱");
        }
        let deadline = deadline.ok_or("請選擇截止日期")?;
        let station_codes: Vec<StationCode> = if is_common {
            STATIONS.to_vec()
        } else {
            // keep table order, drop duplicates
            STATIONS.into_iter().filter(|s| stations.contains(s)).collect()
        };
        if station_codes.is_empty() {
            return Err("請至少選擇一個場站");
        }
        Ok(Self {
            item_name: item_name.to_string(),
            deadline,
            station_codes,
            is_common,
        })
    }
}

/// Fetch the tasks visible to `scope`. An unassigned scope fetches nothing.
pub async fn fetch_tasks(transport: &impl Transport, scope: StationScope) -> Result<Vec<Task>, ApiError> {
    let Some(station) = scope.fetch_param() else {
        return Ok(Vec::new());
    };
    let reply = transport.get(&[("action", "getTasks"), ("station", station)]).await?;
    parse_tasks(&reply)
}

pub async fn create_task(transport: &impl Transport, task: &NewTask) -> Result<(), ApiError> {
    let mut body = serde_json::to_value(task)?;
    body["action"] = json!("createNewTask");
    let reply = transport.post(&body).await?;
    parse_ack(&reply, "新增工項失敗")
}

pub async fn update_task_status(transport: &impl Transport, task_id: &str, status: &TaskStatus, attachment_url: &str) -> Result<(), ApiError> {
    let body = json!({
        "action": "updateTaskStatus",
        "taskId": task_id,
        "newStatus": status.as_wire(),
        "attachmentUrl": attachment_url.trim(),
    });
    let reply = transport.post(&body).await?;
    parse_lenient_ack(&reply, "更新進度失敗")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::{MockTransport, Sent};
    use futures::executor::block_on;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fetch_tasks_uses_station_name() {
        let mock = MockTransport::replying(vec![Ok(r#"{"success": true, "tasks": []}"#)]);
        let tasks = block_on(fetch_tasks(&mock, StationScope::Station(StationCode::Xinyi))).unwrap();
        assert!(tasks.is_empty());
        assert_eq!(
            mock.sent(),
            vec![Sent::Get(vec![
                ("action".to_string(), "getTasks".to_string()),
                ("station".to_string(), "信義國小地下停車場".to_string()),
            ])]
        );
    }

    #[test]
    fn test_fetch_tasks_all_and_unassigned() {
        let mock = MockTransport::replying(vec![Ok(r#"{"success": true, "tasks": []}"#)]);
        block_on(fetch_tasks(&mock, StationScope::All)).unwrap();
        block_on(fetch_tasks(&mock, StationScope::Unassigned)).unwrap();
        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        assert!(matches!(&sent[0], Sent::Get(q) if q[1].1 == "全部"));
    }

    #[test]
    fn test_update_status_rejection_keeps_backend_message() {
        let mock = MockTransport::replying(vec![Ok(r#"{"success": false, "msg": "X"}"#)]);
        let err = block_on(update_task_status(&mock, "T-1", &TaskStatus::Completed, "https://drive/x")).unwrap_err();
        assert_eq!(err, ApiError::Rejected("X".to_string()));
        assert_eq!(err.to_string(), "X");
        assert_eq!(
            mock.sent(),
            vec![Sent::Post(json!({"action": "updateTaskStatus", "taskId": "T-1", "newStatus": "已完成", "attachmentUrl": "https://drive/x"}))]
        );
    }

    #[test]
    fn test_create_task_body() {
        let task = NewTask::build(" 年度會議 ", Some(ymd(2025, 6, 30)), &[StationCode::Sheliao, StationCode::Baifu], false).unwrap();
        let mock = MockTransport::replying(vec![Ok(r#"{"success": true}"#)]);
        block_on(create_task(&mock, &task)).unwrap();
        assert_eq!(
            mock.sent(),
            vec![Sent::Post(json!({
                "action": "createNewTask",
                "itemName": "年度會議",
                "deadline": "2025-06-30",
                "stationCodes": ["BAIFU", "SHELIAO"],
                "isCommon": false
            }))]
        );
    }

    #[test]
    fn test_new_task_validation() {
        let d = Some(ymd(2025, 6, 30));
        assert_eq!(NewTask::build("", d, &[StationCode::Baifu], false), Err("請輸入工項名稱"));
        assert_eq!(NewTask::build("x", None, &[StationCode::Baifu], false), Err("請選擇截止日期"));
        assert_eq!(NewTask::build("x", d, &[], false), Err("請至少選擇一個場站"));
        assert_eq!(NewTask::build("x", d, &[], true).unwrap().station_codes.len(), 4);
    }
}
