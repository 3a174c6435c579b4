//! Audit Log Command

use serde_json::json;

use super::Transport;
use crate::error::ApiError;
use crate::models::AuditLogEntry;

/// Best-effort log write. The reply body is not inspected; only transport
/// failures are reported.
pub async fn write_log(transport: &impl Transport, entry: &AuditLogEntry) -> Result<(), ApiError> {
    let body = json!({ "action": "writeLog", "logData": entry });
    transport.post(&body).await.map(|_| ())
}
