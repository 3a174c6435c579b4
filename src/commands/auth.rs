//! Account Commands
//!
//! Sign-in, self-registration and password flows.

use serde::Serialize;
use serde_json::json;

use super::response::{parse_ack, parse_auth, parse_lenient_ack};
use super::Transport;
use crate::error::ApiError;
use crate::models::User;

/// Self-registration form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub organization: String,
}

/// Normalised e-mail used as the account key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn authenticate(transport: &impl Transport, email: &str, password: &str) -> Result<User, ApiError> {
    let body = json!({
        "action": "checkUserAuth",
        "userEmail": normalize_email(email),
        "password": password,
    });
    let reply = transport.post(&body).await?;
    parse_auth(&reply)
}

pub async fn register_user(transport: &impl Transport, registration: &Registration) -> Result<(), ApiError> {
    let body = json!({ "action": "registerUser", "user": registration });
    let reply = transport.post(&body).await?;
    parse_lenient_ack(&reply, "申請送出失敗")
}

pub async fn request_password_reset(transport: &impl Transport, email: &str) -> Result<(), ApiError> {
    let body = json!({ "action": "resetPasswordRequest", "email": normalize_email(email) });
    let reply = transport.post(&body).await?;
    parse_lenient_ack(&reply, "重設密碼請求失敗")
}

pub async fn change_password(transport: &impl Transport, email: &str, new_password: &str) -> Result<(), ApiError> {
    let body = json!({ "action": "changePassword", "email": email, "newPassword": new_password });
    let reply = transport.post(&body).await?;
    parse_ack(&reply, "密碼修改失敗，請稍後再試")
}
