use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub read: bool,
}

#[derive(Deserialize)]
pub struct CreateMessage {
    pub text: String,
    #[serde(default)]
    pub read: bool,
}

#[derive(Deserialize)]
pub struct ReplaceMessage {
    pub text: String,
    pub read: bool,
}

#[derive(Deserialize)]
pub struct PatchMessage {
    pub text: Option<String>,
    pub read: Option<bool>,
}

/// What `/echo` reports back about the request it received.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Message>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/messages", get(list_messages).post(create_message))
        .route(
            "/messages/{id}",
            get(get_message)
                .put(replace_message)
                .patch(patch_message)
                .delete(delete_message),
        )
        .route("/echo", any(echo))
        .route("/status/{code}", get(status))
        .route("/malformed", get(malformed))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "not found"}))).into_response()
}

async fn list_messages(State(db): State<Db>) -> Json<Vec<Message>> {
    let messages = db.read().await;
    Json(messages.values().cloned().collect())
}

async fn create_message(
    State(db): State<Db>,
    Json(input): Json<CreateMessage>,
) -> (StatusCode, Json<Message>) {
    let message = Message {
        id: Uuid::new_v4(),
        text: input.text,
        read: input.read,
    };
    db.write().await.insert(message.id, message.clone());
    tracing::debug!(id = %message.id, "message created");
    (StatusCode::CREATED, Json(message))
}

async fn get_message(State(db): State<Db>, Path(id): Path<Uuid>) -> Response {
    let messages = db.read().await;
    match messages.get(&id) {
        Some(message) => Json(message.clone()).into_response(),
        None => not_found(),
    }
}

async fn replace_message(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<ReplaceMessage>,
) -> Response {
    let mut messages = db.write().await;
    let Some(message) = messages.get_mut(&id) else {
        return not_found();
    };
    message.text = input.text;
    message.read = input.read;
    Json(message.clone()).into_response()
}

async fn patch_message(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<PatchMessage>,
) -> Response {
    let mut messages = db.write().await;
    let Some(message) = messages.get_mut(&id) else {
        return not_found();
    };
    if let Some(text) = input.text {
        message.text = text;
    }
    if let Some(read) = input.read {
        message.read = read;
    }
    Json(message.clone()).into_response()
}

async fn delete_message(State(db): State<Db>, Path(id): Path<Uuid>) -> Response {
    let mut messages = db.write().await;
    match messages.remove(&id) {
        Some(message) => Json(message).into_response(),
        None => not_found(),
    }
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    Json(Echo {
        method: method.as_str().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn status(Path(code): Path<u16>) -> Response {
    let Ok(status) = StatusCode::from_u16(code) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": format!("invalid status code {code}")})),
        )
            .into_response();
    };
    let reason = status.canonical_reason().unwrap_or("unknown status");
    (status, Json(json!({"message": reason}))).into_response()
}

async fn malformed() -> (StatusCode, &'static str) {
    (StatusCode::OK, "{\"message\": truncated")
}
