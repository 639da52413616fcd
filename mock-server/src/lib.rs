//! In-memory stand-in for the todo backend.
//!
//! Speaks the same JSON API as the real service: todos carry a
//! `{"$oid": "<24 hex chars>"}` id, statuses are `DONE` / `NOT_DONE`, and
//! mutations answer with an empty 200. The list keeps creation order.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Done,
    NotDone,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectId {
    #[serde(rename = "$oid")]
    pub oid: String,
}

impl ObjectId {
    fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self {
            oid: hex[..24].to_string(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.len() == 24 && s.bytes().all(|b| b.is_ascii_hexdigit());
        valid.then(|| Self {
            oid: s.to_ascii_lowercase(),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub text: String,
    pub status: Status,
}

#[derive(Deserialize)]
pub struct UpdateText {
    pub text: String,
}

#[derive(Deserialize)]
pub struct UpdateStatus {
    pub status: Status,
}

pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_text).delete(delete_todo),
        )
        .route("/api/todos/{id}/status", get(get_todo).put(update_status))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn parse_id(raw: &str) -> Result<ObjectId, StatusCode> {
    ObjectId::parse(raw).ok_or(StatusCode::BAD_REQUEST)
}

fn position(todos: &[Todo], id: &ObjectId) -> Result<usize, StatusCode> {
    todos
        .iter()
        .position(|t| t.id.as_ref() == Some(id))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.clone())
}

async fn create_todo(State(db): State<Db>, Json(mut todo): Json<Todo>) -> Json<Todo> {
    todo.id = Some(ObjectId::generate());
    tracing::info!(id = ?todo.id, "new todo");
    db.write().await.push(todo.clone());
    Json(todo)
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, StatusCode> {
    let id = parse_id(&id)?;
    let todos = db.read().await;
    let idx = position(&todos, &id)?;
    Ok(Json(todos[idx].clone()))
}

async fn update_text(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateText>,
) -> Result<StatusCode, StatusCode> {
    let id = parse_id(&id)?;
    let mut todos = db.write().await;
    let idx = position(&todos, &id)?;
    todos[idx].text = input.text;
    Ok(StatusCode::OK)
}

async fn update_status(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateStatus>,
) -> Result<StatusCode, StatusCode> {
    let id = parse_id(&id)?;
    let mut todos = db.write().await;
    let idx = position(&todos, &id)?;
    todos[idx].status = input.status;
    Ok(StatusCode::OK)
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id = parse_id(&id)?;
    let mut todos = db.write().await;
    let idx = position(&todos, &id)?;
    todos.remove(idx);
    tracing::info!(id = %id.oid, "removed todo");
    Ok(StatusCode::OK)
}
