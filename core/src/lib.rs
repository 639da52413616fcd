//! Client core for the todo service.
//!
//! # Overview
//! Two layers, composed top-down:
//! - `Api` is the data-access layer. Each method maps one logical
//!   operation (list, get, create, set-status, set-text, delete) to a single
//!   HTTP round-trip and returns an explicit `Result`.
//! - `Store` owns the observable state a view renders from (the todo list,
//!   the todo being edited, the status filter) and exposes intent methods
//!   that call `Api` and swallow its failures.
//!
//! # Design
//! - `TodoClient` is sans-IO: it builds `HttpRequest` values and parses
//!   `HttpResponse` values. A `Transport` executes them, so request shaping
//!   is testable without a server.
//! - The base URL comes from `Settings`, loaded once and injected; there is
//!   no global configuration.
//! - The list is only ever replaced wholesale by `Store::reload_todos`.
//!   Mutations do not refresh it; callers reload when they want to observe
//!   the effect.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use api::Api;
pub use client::TodoClient;
pub use config::Settings;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::Store;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Status, Todo, TodoId, UpdateStatus, UpdateText};
