//! Client for the session server that performs documentation rewrites
//!
//! The server is an opaque collaborator: docsync lists sessions, creates one
//! per calendar day, submits a prompt to it and shows toast notifications.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use async_trait::async_trait;
use docsync_core::config::SessionConfig;
use docsync_core::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

pub mod error;
mod http;
mod mock;

pub use error::SessionError;
pub use http::HttpSessionClient;
pub use mock::{RecordingSessionApi, SessionCall};

/// A title-identified unit of conversational state on the session server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Server-assigned identifier
    pub id: String,
    /// Human-readable title used for lookup
    #[serde(default)]
    pub title: String,
}

/// Visual style of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for ToastVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Trait for session server clients
///
/// Calls are issued one at a time by a flush cycle; implementations never
/// retry.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// List every session known to the server
    async fn list_sessions(&self) -> Result<Vec<Session>>;

    /// Create a session with the given title
    ///
    /// Returns `Ok(None)` when the server accepted the request but returned no session.
    async fn create_session(&self, title: &str) -> Result<Option<Session>>;

    /// Submit a text prompt to a session
    async fn prompt_session(&self, session_id: &str, text: &str) -> Result<()>;

    /// Show a toast notification in the host UI
    ///
    /// Prefer [`notify_best_effort`], which never propagates failures.
    async fn show_toast(&self, message: &str, variant: ToastVariant) -> Result<()>;
}

/// Show a toast, discarding any failure
///
/// Toasts are cosmetic; a failed toast is logged and otherwise ignored.
pub async fn notify_best_effort(api: &dyn SessionApi, message: &str, variant: ToastVariant) {
    if let Err(e) = api.show_toast(message, variant).await {
        warn!("Failed to show toast: {e}");
    }
}

/// Create a session client from configuration
pub fn create_session_client(config: &SessionConfig) -> Result<Arc<dyn SessionApi>> {
    info!("Creating session client for {}", config.base_url);
    let client = HttpSessionClient::new(config)?;
    Ok(Arc::new(client))
}
