//! REST backend for a todo list, persisted in a single SQLite table.
//!
//! # Overview
//! Four layers, each handed to the next by explicit constructor wiring:
//! `TodoRepository` (SQL) → `TodoService` (existence checks) → router
//! (`/api/todos` handlers, CORS, JSON errors) → `run` (listener).

pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod repository;
mod routes;
pub mod service;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use config::Config;
pub use error::{ApiError, ErrorBody, StartupError, TodoError};
pub use model::{Todo, TodoInput};
pub use repository::TodoRepository;
pub use service::TodoService;

/// Build the router. CORS applies to the todo routes only.
pub fn app(service: TodoService, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/todos",
            get(routes::list_todos).post(routes::create_todo),
        )
        .route(
            "/api/todos/{id}",
            get(routes::get_todo)
                .put(routes::update_todo)
                .delete(routes::delete_todo),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn run(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, router).await
}
