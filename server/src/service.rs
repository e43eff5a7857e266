//! Existence-checked operations on todos.
//!
//! Update and delete load the row first so that an unknown id is reported
//! as `TodoError::NotFound` instead of silently succeeding. The load and the
//! write are separate statements; concurrent writers to the same row resolve
//! as last-writer-wins.

use tracing::{debug, info};

use crate::error::TodoError;
use crate::model::{Todo, TodoInput};
use crate::repository::TodoRepository;

/// Business layer shared by all handlers. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct TodoService {
    repo: TodoRepository,
}

impl TodoService {
    pub fn new(repo: TodoRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let todos = self.repo.find_all_ordered_by_created_at_desc().await?;
        debug!(count = todos.len(), "listed todos");
        Ok(todos)
    }

    pub async fn get(&self, id: i64) -> Result<Todo, TodoError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound { id })
    }

    /// `completed` defaults to `false` when the input leaves it out.
    pub async fn create(&self, input: TodoInput) -> Result<Todo, TodoError> {
        let todo = self
            .repo
            .insert(
                &input.title,
                input.description.as_deref(),
                input.completed.unwrap_or(false),
            )
            .await?;
        info!(id = todo.id, "created todo");
        Ok(todo)
    }

    /// Replace `title` and `description`; `completed` is replaced only when
    /// the input carries a value.
    pub async fn update(&self, id: i64, input: TodoInput) -> Result<Todo, TodoError> {
        let mut todo = self.get(id).await?;
        todo.title = input.title;
        todo.description = input.description;
        if let Some(completed) = input.completed {
            todo.completed = completed;
        }
        let updated = self
            .repo
            .update(&todo)
            .await?
            .ok_or(TodoError::NotFound { id })?;
        info!(id, "updated todo");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), TodoError> {
        self.get(id).await?;
        if !self.repo.delete_by_id(id).await? {
            // Removed by someone else between the load and the delete.
            return Err(TodoError::NotFound { id });
        }
        info!(id, "deleted todo");
        Ok(())
    }

    pub async fn list_by_completed(&self, completed: bool) -> Result<Vec<Todo>, TodoError> {
        Ok(self.repo.find_by_completed(completed).await?)
    }
}
