//! Script Endpoint Commands
//!
//! Frontend bindings to the remote script service, organized by domain.
//! Every action is one request to the single configured URL, discriminated
//! by its `action` field.

mod response;
mod auth;
mod task;
mod user;
mod audit;

use serde_json::Value;

use crate::config::AppConfig;
use crate::error::ApiError;

// Re-export all public items
pub use auth::*;
pub use task::*;
pub use user::*;
pub use audit::*;

/// Raw request/response access to the script endpoint
pub trait Transport {
    /// `GET ?<query>`, returning the body text
    async fn get(&self, query: &[(&str, &str)]) -> Result<String, ApiError>;
    /// `POST` with a JSON body, returning the body text
    async fn post(&self, body: &Value) -> Result<String, ApiError>;
}

/// HTTP transport over `reqwest` (browser fetch under wasm32)
#[derive(Clone)]
pub struct ScriptClient {
    endpoint: String,
    http: reqwest::Client,
}

impl ScriptClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.script_url.clone())
    }
}

impl Transport for ScriptClient {
    async fn get(&self, query: &[(&str, &str)]) -> Result<String, ApiError> {
        log::debug!("[API] GET {:?}", query);
        let response = self
            .http
            .get(&self.endpoint)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    async fn post(&self, body: &Value) -> Result<String, ApiError> {
        log::debug!("[API] POST action={}", body["action"]);
        // text/plain keeps this a simple CORS request (no preflight)
        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body.to_string())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use serde_json::Value;

    use super::Transport;
    use crate::error::ApiError;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Sent {
        Get(Vec<(String, String)>),
        Post(Value),
    }

    /// In-memory transport replaying canned bodies in order
    #[derive(Default)]
    pub struct MockTransport {
        replies: RefCell<VecDeque<Result<String, ApiError>>>,
        pub sent: RefCell<Vec<Sent>>,
    }

    impl MockTransport {
        pub fn replying(replies: Vec<Result<&str, ApiError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into_iter().map(|r| r.map(str::to_string)).collect()),
                sent: RefCell::new(Vec::new()),
            }
        }

        pub fn sent(&self) -> Vec<Sent> {
            self.sent.borrow().clone()
        }

        fn next_reply(&self) -> Result<String, ApiError> {
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no reply queued".to_string())))
        }
    }

    impl Transport for MockTransport {
        async fn get(&self, query: &[(&str, &str)]) -> Result<String, ApiError> {
            let query = query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
            self.sent.borrow_mut().push(Sent::Get(query));
            self.next_reply()
        }

        async fn post(&self, body: &Value) -> Result<String, ApiError> {
            self.sent.borrow_mut().push(Sent::Post(body.clone()));
            self.next_reply()
        }
    }
}
