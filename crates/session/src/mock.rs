//! In-memory session server for testing

use crate::{Session, SessionApi, ToastVariant};
use async_trait::async_trait;
use docsync_core::error::{Error, Result};
use std::time::Duration;
use tokio::sync::Mutex;

/// A call received by [`RecordingSessionApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    ListSessions,
    CreateSession { title: String },
    PromptSession { session_id: String, text: String },
    ShowToast { message: String, variant: ToastVariant },
}

#[derive(Default)]
struct Failures {
    list: bool,
    create: bool,
    create_returns_none: bool,
    prompt: bool,
    toast: bool,
}

#[derive(Default)]
struct State {
    sessions: Vec<Session>,
    calls: Vec<SessionCall>,
    next_id: usize,
}

/// Session server stand-in that records every call
///
/// Created sessions are kept, so a later lookup by title finds them.
#[derive(Default)]
pub struct RecordingSessionApi {
    state: Mutex<State>,
    failures: Failures,
    prompt_delay: Option<Duration>,
}

impl RecordingSessionApi {
    /// Create an empty server with no sessions
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing session
    pub fn with_session(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.state.get_mut().sessions.push(Session {
            id: id.into(),
            title: title.into(),
        });
        self
    }

    /// Make `list_sessions` fail
    pub fn failing_list(mut self) -> Self {
        self.failures.list = true;
        self
    }

    /// Make `create_session` fail
    pub fn failing_create(mut self) -> Self {
        self.failures.create = true;
        self
    }

    /// Make `create_session` succeed without returning a session
    pub fn create_returns_none(mut self) -> Self {
        self.failures.create_returns_none = true;
        self
    }

    /// Make `prompt_session` fail
    pub fn failing_prompt(mut self) -> Self {
        self.failures.prompt = true;
        self
    }

    /// Make `show_toast` fail
    pub fn failing_toast(mut self) -> Self {
        self.failures.toast = true;
        self
    }

    /// Hold every prompt for `delay` before answering
    pub fn with_prompt_delay(mut self, delay: Duration) -> Self {
        self.prompt_delay = Some(delay);
        self
    }

    /// Every call received so far, in order
    pub async fn calls(&self) -> Vec<SessionCall> {
        self.state.lock().await.calls.clone()
    }

    /// Only the prompt calls, as `(session_id, text)` pairs
    pub async fn prompts(&self) -> Vec<(String, String)> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter_map(|call| match call {
                SessionCall::PromptSession { session_id, text } => {
                    Some((session_id.clone(), text.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Number of `create_session` calls received
    pub async fn create_count(&self) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| matches!(call, SessionCall::CreateSession { .. }))
            .count()
    }

    /// Sessions currently known to the server
    pub async fn sessions(&self) -> Vec<Session> {
        self.state.lock().await.sessions.clone()
    }

    async fn record(&self, call: SessionCall) {
        self.state.lock().await.calls.push(call);
    }
}

#[async_trait]
impl SessionApi for RecordingSessionApi {
    async fn list_sessions(&self) -> Result<Vec<Session>> {
        self.record(SessionCall::ListSessions).await;
        if self.failures.list {
            return Err(Error::session("GET /session returned error 500: mock failure"));
        }
        Ok(self.state.lock().await.sessions.clone())
    }

    async fn create_session(&self, title: &str) -> Result<Option<Session>> {
        self.record(SessionCall::CreateSession {
            title: title.to_string(),
        })
        .await;
        if self.failures.create {
            return Err(Error::session("POST /session returned error 500: mock failure"));
        }
        if self.failures.create_returns_none {
            return Ok(None);
        }

        let mut state = self.state.lock().await;
        state.next_id += 1;
        let session = Session {
            id: format!("ses_{}", state.next_id),
            title: title.to_string(),
        };
        state.sessions.push(session.clone());
        Ok(Some(session))
    }

    async fn prompt_session(&self, session_id: &str, text: &str) -> Result<()> {
        if let Some(delay) = self.prompt_delay {
            tokio::time::sleep(delay).await;
        }
        self.record(SessionCall::PromptSession {
            session_id: session_id.to_string(),
            text: text.to_string(),
        })
        .await;
        if self.failures.prompt {
            return Err(Error::session(
                "POST /session/{id}/message returned error 500: mock failure",
            ));
        }
        Ok(())
    }

    async fn show_toast(&self, message: &str, variant: ToastVariant) -> Result<()> {
        self.record(SessionCall::ShowToast {
            message: message.to_string(),
            variant,
        })
        .await;
        if self.failures.toast {
            return Err(Error::session("POST /tui/show-toast returned error 500: mock failure"));
        }
        Ok(())
    }
}
