//! Errors returned by `TodoClient` build and parse methods.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 404: no todo with the requested id.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// 400: the server could not interpret the request.
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// Any other status the operation did not expect.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("deserialization failed: {0}")]
    Decode(String),

    #[error("serialization failed: {0}")]
    Encode(String),
}
