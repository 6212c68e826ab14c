//! HTTP session server client

use crate::error::SessionError;
use crate::{Session, SessionApi, ToastVariant};
use async_trait::async_trait;
use docsync_core::config::SessionConfig;
use docsync_core::error::Result;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Request payload for session creation
#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    title: &'a str,
}

/// Request payload for prompting a session
#[derive(Debug, Serialize)]
struct PromptRequest<'a> {
    parts: Vec<PromptPart<'a>>,
}

/// One part of a prompt
#[derive(Debug, Serialize)]
struct PromptPart<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Request payload for toast notifications
#[derive(Debug, Serialize)]
struct ToastRequest<'a> {
    message: &'a str,
    variant: ToastVariant,
}

/// Session server client over HTTP/JSON
///
/// Only a connect timeout is set. A request that hangs stalls the flush
/// cycle that issued it and nothing else.
pub struct HttpSessionClient {
    client: Client,
    base_url: String,
    directory: Option<String>,
}

impl HttpSessionClient {
    /// Create a new client from configuration
    pub fn new(config: &SessionConfig) -> Result<Self> {
        info!("Initializing session client");
        info!("  Base URL: {}", config.base_url);
        if let Some(directory) = &config.directory {
            info!("  Directory: {directory}");
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| SessionError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            directory: config.directory.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the optional directory scope
    fn scoped(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.directory {
            Some(directory) => request.query(&[("directory", directory.as_str())]),
            None => request,
        }
    }

    /// Send a request and reject non-success statuses
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response> {
        debug!("Sending {endpoint}");
        let response = self
            .scoped(request)
            .send()
            .await
            .map_err(|e| SessionError::from_reqwest(endpoint, &e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(SessionError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            SessionError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl SessionApi for HttpSessionClient {
    async fn list_sessions(&self) -> Result<Vec<Session>> {
        const ENDPOINT: &str = "GET /session";
        let response = self
            .send(ENDPOINT, self.client.get(self.url("/session")))
            .await?;
        let sessions: Option<Vec<Session>> = Self::decode(ENDPOINT, response).await?;
        Ok(sessions.unwrap_or_default())
    }

    async fn create_session(&self, title: &str) -> Result<Option<Session>> {
        const ENDPOINT: &str = "POST /session";
        let request = self
            .client
            .post(self.url("/session"))
            .json(&CreateSessionRequest { title });
        let response = self.send(ENDPOINT, request).await?;
        Self::decode(ENDPOINT, response).await
    }

    async fn prompt_session(&self, session_id: &str, text: &str) -> Result<()> {
        const ENDPOINT: &str = "POST /session/{id}/message";
        let request = self
            .client
            .post(self.url(&format!("/session/{session_id}/message")))
            .json(&PromptRequest {
                parts: vec![PromptPart { kind: "text", text }],
            });
        self.send(ENDPOINT, request).await?;
        Ok(())
    }

    async fn show_toast(&self, message: &str, variant: ToastVariant) -> Result<()> {
        const ENDPOINT: &str = "POST /tui/show-toast";
        let request = self
            .client
            .post(self.url("/tui/show-toast"))
            .json(&ToastRequest { message, variant });
        self.send(ENDPOINT, request).await?;
        Ok(())
    }
}
