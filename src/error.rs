//! Error Types

use thiserror::Error;

/// Failure of a call to the script endpoint
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Network failure or non-2xx HTTP status
    #[error("連線失敗：{0}")]
    Transport(String),
    /// The backend answered `success: false`; the text is shown as-is
    #[error("{0}")]
    Rejected(String),
    /// The response did not have the expected shape
    #[error("回應格式錯誤：{0}")]
    Malformed(String),
}

impl ApiError {
    pub fn rejected_or(msg: Option<String>, fallback: &str) -> Self {
        match msg {
            Some(m) if !m.trim().is_empty() => ApiError::Rejected(m),
            _ => ApiError::Rejected(fallback.to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

/// Start-up configuration problem
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("未設定後端服務網址 (PCM_SCRIPT_URL)")]
    MissingScriptUrl,
    #[error("後端服務網址無效：{0}")]
    InvalidScriptUrl(String),
    #[error("app-config 設定區塊無法解析：{0}")]
    InvalidJson(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_backend_message() {
        assert_eq!(ApiError::Rejected("X".to_string()).to_string(), "X");
        assert_eq!(ApiError::rejected_or(None, "失敗").to_string(), "失敗");
        assert_eq!(ApiError::rejected_or(Some("  ".into()), "失敗").to_string(), "失敗");
    }
}
