//! Request builder and response parser for `/api/todos`.
//!
//! # Design
//! `TodoClient` holds only the collection URL. Each operation is split into
//! `build_*` (produces an `HttpRequest`) and `parse_*` (consumes an
//! `HttpResponse`), so the caller decides how the bytes travel.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ErrorBody, Todo, TodoInput};

const COLLECTION_PATH: &str = "/api/todos";

#[derive(Debug, Clone)]
pub struct TodoClient {
    collection_url: String,
}

impl TodoClient {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Self {
        Self {
            collection_url: format!("{}{COLLECTION_PATH}", base_url.trim_end_matches('/')),
        }
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{id}", self.collection_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Get, self.collection_url.clone())
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_todo(&self, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Post,
            self.collection_url.clone(),
            encode(input)?,
        ))
    }

    pub fn build_update_todo(&self, id: i64, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(HttpMethod::Put, self.item_url(id), encode(input)?))
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        decode(expect_status(response, 200)?)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(expect_status(response, 200)?)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(expect_status(response, 201)?)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(expect_status(response, 200)?)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_status(response, 204).map(drop)
    }
}

fn encode(input: &TodoInput) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pass the response through on `expected`, otherwise classify the failure.
/// The message comes from the server's `{"error": ...}` body when it has one.
fn expect_status(response: HttpResponse, expected: u16) -> Result<HttpResponse, ApiError> {
    if response.status == expected {
        return Ok(response);
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|body| body.error)
        .unwrap_or(response.body);
    Err(match response.status {
        400 => ApiError::BadRequest { message },
        404 => ApiError::NotFound { message },
        status => ApiError::Server { status, message },
    })
}
