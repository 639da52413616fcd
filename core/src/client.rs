//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any 2xx status counts as success; bodies of mutation responses are
//! ignored.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Status, Todo, TodoId, UpdateStatus, UpdateText};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn item_url(&self, id: &TodoId) -> String {
        format!("{}/api/todos/{}", self.base_url, id.as_str())
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_todo(&self, id: &TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The id of `todo` is never sent; the backend assigns one.
    pub fn build_create_todo(&self, todo: &Todo) -> Result<HttpRequest, ApiError> {
        let unsaved = Todo {
            id: None,
            ..todo.clone()
        };
        json_request(HttpMethod::Post, self.collection_url(), &unsaved)
    }

    pub fn build_update_status(
        &self,
        id: &TodoId,
        status: Status,
    ) -> Result<HttpRequest, ApiError> {
        let url = format!("{}/status", self.item_url(id));
        json_request(HttpMethod::Put, url, &UpdateStatus { status })
    }

    pub fn build_update_text(&self, id: &TodoId, text: &str) -> Result<HttpRequest, ApiError> {
        let body = UpdateText {
            text: text.to_string(),
        };
        json_request(HttpMethod::Put, self.item_url(id), &body)
    }

    pub fn build_delete_todo(&self, id: &TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_update_status(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_update_text(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_request<B: Serialize>(
    method: HttpMethod,
    url: String,
    body: &B,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
