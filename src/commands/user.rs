//! User Commands

use serde_json::json;

use super::response::{parse_lenient_ack, parse_users};
use super::Transport;
use crate::error::ApiError;
use crate::models::{User, UserUpdates};

pub async fn fetch_users(transport: &impl Transport) -> Result<Vec<User>, ApiError> {
    let reply = transport.get(&[("action", "getUsers")]).await?;
    parse_users(&reply)
}

pub async fn update_user(transport: &impl Transport, email: &str, updates: &UserUpdates) -> Result<(), ApiError> {
    let body = json!({ "action": "updateUser", "email": email, "updates": updates });
    let reply = transport.post(&body).await?;
    parse_lenient_ack(&reply, "更新使用者失敗")
}

pub async fn delete_user(transport: &impl Transport, email: &str) -> Result<(), ApiError> {
    let body = json!({ "action": "deleteUser", "email": email });
    let reply = transport.post(&body).await?;
    parse_lenient_ack(&reply, "刪除使用者失敗")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::{MockTransport, Sent};
    use crate::models::Role;
    use crate::station::{StationCode, StationScope};
    use futures::executor::block_on;

    #[test]
    fn test_fetch_users() {
        let mock = MockTransport::replying(vec![Ok(r#"[{"name": "A", "email": "a@x.tw", "role": "待審核", "isActive": false}]"#)]);
        let users = block_on(fetch_users(&mock)).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Pending);
        assert!(!users[0].is_active);
        assert_eq!(mock.sent(), vec![Sent::Get(vec![("action".to_string(), "getUsers".to_string())])]);
    }

    #[test]
    fn test_approve_payload() {
        let mock = MockTransport::replying(vec![Ok(r#"{"success": true}"#)]);
        let updates = UserUpdates {
            role: Some(Role::User),
            assigned_station: Some(StationScope::Station(StationCode::Baifu)),
            is_active: Some(true),
        };
        block_on(update_user(&mock, "a@x.tw", &updates)).unwrap();
        assert_eq!(
            mock.sent(),
            vec![Sent::Post(json!({
                "action": "updateUser",
                "email": "a@x.tw",
                "updates": {"role": "一般人員", "assignedStation": "BAIFU", "isActive": true}
            }))]
        );
    }

    #[test]
    fn test_delete_rejected() {
        let mock = MockTransport::replying(vec![Ok(r#"{"success": false}"#)]);
        let err = block_on(delete_user(&mock, "a@x.tw")).unwrap_err();
        assert_eq!(err.to_string(), "刪除使用者失敗");
    }
}
