//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined
//! independently from the mock-server crate; integration tests catch any
//! schema drift between the two. The `_id` field follows the document
//! database convention (`{"$oid": "..."}`) and is kept opaque.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Completion state of a todo. Serialized as `"DONE"` / `"NOT_DONE"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Done,
    NotDone,
}

impl Status {
    pub fn toggled(self) -> Self {
        match self {
            Status::Done => Status::NotDone,
            Status::NotDone => Status::Done,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Done => "DONE",
            Status::NotDone => "NOT_DONE",
        };
        f.write_str(s)
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DONE" | "done" => Ok(Status::Done),
            "NOT_DONE" | "not-done" => Ok(Status::NotDone),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Backend-assigned identifier, carried on the wire as `{"$oid": "..."}`.
///
/// The token is never parsed or generated locally; it is only echoed back
/// to the backend in item paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TodoId {
    #[serde(rename = "$oid")]
    oid: String,
}

impl TodoId {
    pub fn as_str(&self) -> &str {
        &self.oid
    }
}

impl From<String> for TodoId {
    fn from(oid: String) -> Self {
        Self { oid }
    }
}

impl From<&str> for TodoId {
    fn from(oid: &str) -> Self {
        Self { oid: oid.to_string() }
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.oid)
    }
}

/// A single todo item. `id` is `None` until the backend has stored it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    pub text: String,
    pub status: Status,
}

impl Todo {
    /// An unsaved todo, ready to be sent to the create endpoint.
    pub fn new(text: impl Into<String>, status: Status) -> Self {
        Self {
            id: None,
            text: text.into(),
            status,
        }
    }
}

/// Request payload for `PUT api/todos/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateText {
    pub text: String,
}

/// Request payload for `PUT api/todos/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateStatus {
    pub status: Status,
}
