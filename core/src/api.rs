//! Data-access layer: one logical operation, one HTTP round-trip.
//!
//! `Api` pairs the sans-IO `TodoClient` with a `Transport`. Every operation
//! returns an explicit `Result`; failures are also logged here so callers
//! that choose to discard them still leave a trace.

use std::fmt::Display;

use crate::client::TodoClient;
use crate::config::Settings;
use crate::error::ApiError;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Status, Todo, TodoId};

#[derive(Debug, Clone)]
pub struct Api<T> {
    client: TodoClient,
    transport: T,
}

impl Api<ReqwestTransport> {
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings, ReqwestTransport::default())
    }
}

impl<T: Transport> Api<T> {
    pub fn new(settings: &Settings, transport: T) -> Self {
        Self {
            client: TodoClient::new(&settings.api_base_url),
            transport,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub async fn find(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.transport.execute(self.client.build_list_todos()).await;
        let result = response.and_then(|r| self.client.parse_list_todos(r));
        logged("find", result)
    }

    pub async fn get(&self, id: &TodoId) -> Result<Todo, ApiError> {
        let response = self.transport.execute(self.client.build_get_todo(id)).await;
        let result = response.and_then(|r| self.client.parse_get_todo(r));
        logged("get", result)
    }

    pub async fn create(&self, todo: &Todo) -> Result<Todo, ApiError> {
        let result = async {
            let request = self.client.build_create_todo(todo)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_create_todo(response)
        }
        .await;
        logged("create", result)
    }

    pub async fn update_status(&self, id: &TodoId, status: Status) -> Result<(), ApiError> {
        let result = async {
            let request = self.client.build_update_status(id, status)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_update_status(response)
        }
        .await;
        logged("update_status", result)
    }

    pub async fn update_text(&self, id: &TodoId, text: &str) -> Result<(), ApiError> {
        let result = async {
            let request = self.client.build_update_text(id, text)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_update_text(response)
        }
        .await;
        logged("update_text", result)
    }

    pub async fn remove(&self, id: &TodoId) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_todo(id)).await;
        let result = response.and_then(|r| self.client.parse_delete_todo(r));
        logged("remove", result)
    }
}

fn logged<V, E: Display>(op: &'static str, result: Result<V, E>) -> Result<V, E> {
    match &result {
        Ok(_) => tracing::debug!(op, "todo api call succeeded"),
        Err(e) => tracing::warn!(op, error = %e, "todo api call failed"),
    }
    result
}
