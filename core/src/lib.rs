//! Synchronous client core for the todo REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the five
//! `/api/todos` operations without touching the network. The caller performs
//! the HTTP round-trip with whatever transport it already has.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Todo, TodoInput};
