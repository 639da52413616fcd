//! Observable UI state plus the intents that drive it.
//!
//! # Design
//! The store owns three independent `watch` cells. Only `reload_todos`
//! writes the list, and always by whole-value replacement; mutating intents
//! go straight to the backend and leave the list untouched until the caller
//! reloads. Failures are logged by the api layer and then swallowed here:
//! a failed reload yields an empty list, a failed mutation is a no-op.

use tokio::sync::watch;

use crate::api::Api;
use crate::transport::Transport;
use crate::types::{Status, Todo, TodoId};

pub struct Store<T> {
    api: Api<T>,
    todos: watch::Sender<Vec<Todo>>,
    editing_todo: watch::Sender<Option<Todo>>,
    filter: watch::Sender<Option<Status>>,
}

impl<T: Transport> Store<T> {
    pub fn new(api: Api<T>) -> Self {
        Self {
            api,
            todos: watch::channel(Vec::new()).0,
            editing_todo: watch::channel(None).0,
            filter: watch::channel(None).0,
        }
    }

    pub fn api(&self) -> &Api<T> {
        &self.api
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.todos.borrow().clone()
    }

    pub fn subscribe_todos(&self) -> watch::Receiver<Vec<Todo>> {
        self.todos.subscribe()
    }

    pub fn editing_todo(&self) -> Option<Todo> {
        self.editing_todo.borrow().clone()
    }

    pub fn set_editing_todo(&self, todo: Option<Todo>) {
        self.editing_todo.send_replace(todo);
    }

    pub fn subscribe_editing_todo(&self) -> watch::Receiver<Option<Todo>> {
        self.editing_todo.subscribe()
    }

    /// The store never applies the filter itself; views read it and decide
    /// what to show.
    pub fn filter(&self) -> Option<Status> {
        *self.filter.borrow()
    }

    pub fn set_filter(&self, filter: Option<Status>) {
        self.filter.send_replace(filter);
    }

    pub fn subscribe_filter(&self) -> watch::Receiver<Option<Status>> {
        self.filter.subscribe()
    }

    /// Replace the list with whatever the backend returns. A failed fetch
    /// is indistinguishable from an empty backend.
    pub async fn reload_todos(&self) {
        let todos = self.api.find().await.unwrap_or_default();
        self.todos.send_replace(todos);
    }

    /// Does not touch the list; call `reload_todos` to see the new item.
    pub async fn create_new(&self, text: Option<&str>) {
        let todo = Todo::new(text.unwrap_or_default(), Status::NotDone);
        let _ = self.api.create(&todo).await;
    }

    pub async fn update_status(&self, id: &TodoId, status: Status) {
        let _ = self.api.update_status(id, status).await;
    }

    pub async fn update_text(&self, id: &TodoId, text: Option<&str>) {
        let _ = self.api.update_text(id, text.unwrap_or_default()).await;
    }

    pub async fn remove_todo(&self, id: &TodoId) {
        let _ = self.api.remove(id).await;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::config::Settings;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replays canned results and records every request it sees.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn reply(&self, status: u16, body: &str) {
            self.replies.lock().unwrap().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
        }

        fn fail(&self) {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(ApiError::Transport("connection refused".to_string())));
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_string())))
        }
    }

    fn store() -> (Store<Arc<ScriptedTransport>>, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::default());
        let settings = Settings::with_base_url("http://backend.test/");
        let api = Api::new(&settings, Arc::clone(&transport));
        (Store::new(api), transport)
    }

    const MILK: &str = r#"[{"_id":{"$oid":"1"},"text":"milk","status":"NOT_DONE"}]"#;

    fn body_json(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn starts_empty() {
        let (store, transport) = store();
        assert!(store.todos().is_empty());
        assert!(store.editing_todo().is_none());
        assert!(store.filter().is_none());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn reload_replaces_list_with_backend_response() {
        let (store, transport) = store();
        transport.reply(200, MILK);

        store.reload_todos().await;

        let todos = store.todos();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, Some(TodoId::from("1")));
        assert_eq!(todos[0].text, "milk");
        assert_eq!(todos[0].status, Status::NotDone);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "http://backend.test/api/todos");
    }

    #[tokio::test]
    async fn reload_preserves_backend_order() {
        let (store, transport) = store();
        transport.reply(
            200,
            r#"[{"_id":{"$oid":"b"},"text":"second","status":"DONE"},
                {"_id":{"$oid":"a"},"text":"first","status":"NOT_DONE"}]"#,
        );

        store.reload_todos().await;

        let texts: Vec<String> = store.todos().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, ["second", "first"]);
    }

    #[tokio::test]
    async fn reload_failures_clear_the_list() {
        let (store, transport) = store();
        transport.reply(200, MILK);
        store.reload_todos().await;
        assert_eq!(store.todos().len(), 1);

        transport.reply(500, "internal error");
        store.reload_todos().await;
        assert!(store.todos().is_empty());

        transport.reply(200, MILK);
        store.reload_todos().await;
        transport.reply(200, "{not json");
        store.reload_todos().await;
        assert!(store.todos().is_empty());

        transport.reply(200, MILK);
        store.reload_todos().await;
        transport.fail();
        store.reload_todos().await;
        assert!(store.todos().is_empty());
    }

    #[tokio::test]
    async fn reload_notifies_subscribers() {
        let (store, transport) = store();
        let mut rx = store.subscribe_todos();
        transport.reply(200, MILK);

        store.reload_todos().await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[tokio::test]
    async fn create_new_defaults_text_and_leaves_list_alone() {
        let (store, transport) = store();
        transport.reply(200, r#"{"_id":{"$oid":"7"},"text":"","status":"NOT_DONE"}"#);
        let rx = store.subscribe_todos();

        store.create_new(None).await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "http://backend.test/api/todos");
        assert_eq!(
            body_json(&requests[0]),
            serde_json::json!({"text": "", "status": "NOT_DONE"})
        );
        assert!(store.todos().is_empty());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn create_new_sends_given_text() {
        let (store, transport) = store();
        transport.reply(500, "");

        store.create_new(Some("milk")).await;

        assert_eq!(body_json(&transport.requests()[0])["text"], "milk");
    }

    #[tokio::test]
    async fn update_status_hits_status_endpoint() {
        let (store, transport) = store();
        transport.reply(200, "");

        store.update_status(&TodoId::from("1"), Status::Done).await;

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[0].url, "http://backend.test/api/todos/1/status");
        assert_eq!(body_json(&requests[0]), serde_json::json!({"status": "DONE"}));
    }

    #[tokio::test]
    async fn update_text_never_sends_null() {
        let (store, transport) = store();
        transport.reply(200, "");

        store.update_text(&TodoId::from("1"), None).await;

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://backend.test/api/todos/1");
        assert_eq!(body_json(&requests[0]), serde_json::json!({"text": ""}));
    }

    #[tokio::test]
    async fn remove_todo_sends_delete() {
        let (store, transport) = store();
        transport.reply(200, "");

        store.remove_todo(&TodoId::from("1")).await;

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[0].url, "http://backend.test/api/todos/1");
    }

    #[tokio::test]
    async fn failed_mutations_change_no_cell() {
        let (store, transport) = store();
        transport.reply(200, MILK);
        store.reload_todos().await;
        store.set_filter(Some(Status::Done));
        let editing = store.todos().first().cloned();
        store.set_editing_todo(editing.clone());
        let before = store.todos();
        let id = TodoId::from("1");

        transport.reply(500, "");
        store.update_status(&id, Status::Done).await;
        transport.reply(404, "");
        store.update_text(&id, Some("eggs")).await;
        transport.fail();
        store.remove_todo(&id).await;

        assert_eq!(store.todos(), before);
        assert_eq!(store.editing_todo(), editing);
        assert_eq!(store.filter(), Some(Status::Done));
    }

    #[tokio::test]
    async fn ui_cells_are_set_directly() {
        let (store, _transport) = store();
        let mut filter_rx = store.subscribe_filter();
        let mut editing_rx = store.subscribe_editing_todo();

        store.set_filter(Some(Status::NotDone));
        store.set_editing_todo(Some(Todo::new("draft", Status::NotDone)));

        assert!(filter_rx.has_changed().unwrap());
        assert_eq!(*filter_rx.borrow_and_update(), Some(Status::NotDone));
        assert!(editing_rx.has_changed().unwrap());
        assert_eq!(
            editing_rx.borrow_and_update().as_ref().map(|t| t.text.as_str()),
            Some("draft")
        );

        store.set_filter(None);
        store.set_editing_todo(None);
        assert!(store.filter().is_none());
        assert!(store.editing_todo().is_none());
    }
}
