//! Tests for the HTTP session client against an in-process server

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use docsync_core::config::SessionConfig;
use docsync_session::{HttpSessionClient, SessionApi, ToastVariant};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct ServerState {
    requests: Arc<Mutex<Vec<(String, Value, Option<String>)>>>,
}

impl ServerState {
    async fn record(&self, route: &str, body: Value, query: &HashMap<String, String>) {
        self.requests.lock().await.push((
            route.to_string(),
            body,
            query.get("directory").cloned(),
        ));
    }
}

async fn list_sessions(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record("list", Value::Null, &query).await;
    Json(json!([
        {"id": "ses_a", "title": "2026-10-13 Docs Update Plugin", "version": "0.1"},
        {"id": "ses_b", "title": "2026-10-14 Docs Update Plugin"}
    ]))
}

async fn create_session(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let title = body["title"].clone();
    state.record("create", body, &query).await;
    Json(json!({"id": "ses_new", "title": title}))
}

async fn prompt_session(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.record(&format!("prompt:{id}"), body, &query).await;
    Json(json!({"info": {}, "parts": []}))
}

async fn show_toast(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.record("toast", body, &query).await;
    Json(json!(true))
}

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_session_server() -> (String, ServerState) {
    let state = ServerState::default();
    let router = Router::new()
        .route("/session", get(list_sessions).post(create_session))
        .route("/session/{id}/message", post(prompt_session))
        .route("/tui/show-toast", post(show_toast))
        .with_state(state.clone());
    (spawn_server(router).await, state)
}

fn client_for(base_url: String, directory: Option<&str>) -> HttpSessionClient {
    let config = SessionConfig {
        base_url,
        directory: directory.map(str::to_string),
        ..SessionConfig::default()
    };
    HttpSessionClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_list_sessions() {
    let (base_url, _state) = spawn_session_server().await;
    let client = client_for(base_url, None);

    let sessions = client.list_sessions().await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[1].id, "ses_b");
    assert_eq!(sessions[1].title, "2026-10-14 Docs Update Plugin");
}

#[tokio::test]
async fn test_create_session_sends_title() {
    let (base_url, state) = spawn_session_server().await;
    let client = client_for(base_url, None);

    let session = client
        .create_session("2026-10-14 Docs Update Plugin")
        .await
        .unwrap()
        .expect("server returned a session");
    assert_eq!(session.id, "ses_new");

    let requests = state.requests.lock().await.clone();
    assert_eq!(
        requests,
        vec![(
            "create".to_string(),
            json!({"title": "2026-10-14 Docs Update Plugin"}),
            None
        )]
    );
}

#[tokio::test]
async fn test_prompt_and_toast_payloads_with_directory() {
    let (base_url, state) = spawn_session_server().await;
    let client = client_for(base_url, Some("/work/project"));

    client
        .show_toast("Updating Docs", ToastVariant::Info)
        .await
        .unwrap();
    client.prompt_session("ses_b", "- /work/project/docs/a.md").await.unwrap();

    let requests = state.requests.lock().await.clone();
    assert_eq!(
        requests,
        vec![
            (
                "toast".to_string(),
                json!({"message": "Updating Docs", "variant": "info"}),
                Some("/work/project".to_string())
            ),
            (
                "prompt:ses_b".to_string(),
                json!({"parts": [{"type": "text", "text": "- /work/project/docs/a.md"}]}),
                Some("/work/project".to_string())
            ),
        ]
    );
}

#[tokio::test]
async fn test_create_session_null_body_is_none() {
    let router = Router::new().route("/session", post(|| async { Json(Value::Null) }));
    let client = client_for(spawn_server(router).await, None);

    assert!(client.create_session("title").await.unwrap().is_none());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let router = Router::new().route(
        "/session",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database locked") }),
    );
    let client = client_for(spawn_server(router).await, None);

    let err = client.list_sessions().await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("GET /session returned error 500"), "{message}");
    assert!(message.contains("database locked"), "{message}");
}

#[tokio::test]
async fn test_connection_failure_is_reported() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{addr}"), None);
    let err = client.show_toast("x", ToastVariant::Info).await.unwrap_err();
    assert!(err.to_string().contains("POST /tui/show-toast"));
}
