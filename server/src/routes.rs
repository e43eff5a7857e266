//! Handlers for `/api/todos`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::error::ApiError;
use crate::model::{Todo, TodoInput};
use crate::service::TodoService;

type ApiResult<T> = Result<T, ApiError>;

// Extractor rejections are taken as values: a malformed id or body is always
// a 400 with a JSON error body.

pub(crate) async fn list_todos(State(service): State<TodoService>) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(service.list().await?))
}

pub(crate) async fn get_todo(
    State(service): State<TodoService>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Todo>> {
    let Path(id) = id?;
    Ok(Json(service.get(id).await?))
}

pub(crate) async fn create_todo(
    State(service): State<TodoService>,
    input: Result<Json<TodoInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let Json(input) = input?;
    let todo = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub(crate) async fn update_todo(
    State(service): State<TodoService>,
    id: Result<Path<i64>, PathRejection>,
    input: Result<Json<TodoInput>, JsonRejection>,
) -> ApiResult<Json<Todo>> {
    let Path(id) = id?;
    let Json(input) = input?;
    Ok(Json(service.update(id, input).await?))
}

pub(crate) async fn delete_todo(
    State(service): State<TodoService>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
