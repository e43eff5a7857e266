//! SQL access to the `todos` table.
//!
//! # Design
//! Every method returns `sqlx::Error` for storage failures and encodes the
//! "row is missing" outcome in the success type (`Option` or `bool`), so the
//! service can tell the two apart without inspecting driver errors.
//! Timestamps are assigned here; callers never supply them.

use chrono::{Local, NaiveDateTime, SubsecRound};
use sqlx::SqlitePool;

use crate::model::Todo;

const COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// Handle to the `todos` table. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct TodoRepository {
    pool: SqlitePool,
}

impl TodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new row and return it with `id` and both timestamps filled.
    pub async fn insert(
        &self,
        title: &str,
        description: Option<&str>,
        completed: bool,
    ) -> Result<Todo, sqlx::Error> {
        let now = now();
        sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (title, description, completed, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(title)
        .bind(description)
        .bind(completed)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(&format!("SELECT {COLUMNS} FROM todos WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Newest first; rows created within the same clock tick fall back to
    /// descending id.
    pub async fn find_all_ordered_by_created_at_desc(&self) -> Result<Vec<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(&format!(
            "SELECT {COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_completed(&self, completed: bool) -> Result<Vec<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(&format!(
            "SELECT {COLUMNS} FROM todos WHERE completed = ? ORDER BY id"
        ))
        .bind(completed)
        .fetch_all(&self.pool)
        .await
    }

    /// Write back the mutable fields of `todo` and refresh `updated_at`.
    ///
    /// Returns `None` when the row was deleted after `todo` was loaded.
    pub async fn update(&self, todo: &Todo) -> Result<Option<Todo>, sqlx::Error> {
        // Never let a clock step push updated_at below created_at.
        let updated_at = now().max(todo.created_at);
        sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos SET title = ?, description = ?, completed = ?, updated_at = ? \
             WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(updated_at)
        .bind(todo.id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns whether a row was actually removed.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    async fn repository() -> TodoRepository {
        TodoRepository::new(connect_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn insert_assigns_id_and_equal_timestamps() {
        let repo = repository().await;
        let todo = repo.insert("learn", Some("sqlx"), false).await.unwrap();
        assert_eq!(todo.id, 1);
        assert_eq!(todo.title, "learn");
        assert_eq!(todo.description.as_deref(), Some("sqlx"));
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[tokio::test]
    async fn find_by_id_returns_inserted_row() {
        let repo = repository().await;
        let inserted = repo.insert("a", None, true).await.unwrap();
        let found = repo.find_by_id(inserted.id).await.unwrap();
        assert_eq!(found, Some(inserted));
    }

    #[tokio::test]
    async fn find_by_id_missing_is_none() {
        let repo = repository().await;
        assert_eq!(repo.find_by_id(9999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = repository().await;
        for title in ["A", "B", "C"] {
            repo.insert(title, None, false).await.unwrap();
        }
        let titles: Vec<String> = repo
            .find_all_ordered_by_created_at_desc()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn list_breaks_timestamp_ties_by_id() {
        let repo = repository().await;
        let stamp = now();
        for title in ["first", "second"] {
            sqlx::query(
                "INSERT INTO todos (title, completed, created_at, updated_at) VALUES (?, 0, ?, ?)",
            )
            .bind(title)
            .bind(stamp)
            .bind(stamp)
            .execute(&repo.pool)
            .await
            .unwrap();
        }
        let todos = repo.find_all_ordered_by_created_at_desc().await.unwrap();
        assert_eq!(todos[0].title, "second");
        assert_eq!(todos[1].title, "first");
    }

    #[tokio::test]
    async fn find_by_completed_filters_rows() {
        let repo = repository().await;
        repo.insert("open", None, false).await.unwrap();
        repo.insert("done", None, true).await.unwrap();
        repo.insert("also open", None, false).await.unwrap();

        let done = repo.find_by_completed(true).await.unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].title, "done");

        let open = repo.find_by_completed(false).await.unwrap();
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|t| !t.completed));
    }

    #[tokio::test]
    async fn update_keeps_created_at_and_refreshes_updated_at() {
        let repo = repository().await;
        let mut todo = repo.insert("before", None, false).await.unwrap();
        todo.title = "after".to_string();
        todo.description = Some("now described".to_string());
        todo.completed = true;

        let updated = repo.update(&todo).await.unwrap().unwrap();
        assert_eq!(updated.id, todo.id);
        assert_eq!(updated.title, "after");
        assert_eq!(updated.description.as_deref(), Some("now described"));
        assert!(updated.completed);
        assert_eq!(updated.created_at, todo.created_at);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn update_never_moves_updated_at_before_created_at() {
        let repo = repository().await;
        let mut todo = repo.insert("future", None, false).await.unwrap();
        let future = todo.created_at + chrono::Duration::days(1);
        sqlx::query("UPDATE todos SET created_at = ?, updated_at = ? WHERE id = ?")
            .bind(future)
            .bind(future)
            .bind(todo.id)
            .execute(&repo.pool)
            .await
            .unwrap();
        todo.created_at = future;

        let updated = repo.update(&todo).await.unwrap().unwrap();
        assert_eq!(updated.updated_at, future);
    }

    #[tokio::test]
    async fn update_advances_updated_at_past_previous_value() {
        let repo = repository().await;
        let mut todo = repo.insert("stale", None, false).await.unwrap();
        let past = todo.created_at - chrono::Duration::hours(1);
        sqlx::query("UPDATE todos SET created_at = ?, updated_at = ? WHERE id = ?")
            .bind(past)
            .bind(past)
            .bind(todo.id)
            .execute(&repo.pool)
            .await
            .unwrap();
        todo.created_at = past;
        todo.updated_at = past;

        let updated = repo.update(&todo).await.unwrap().unwrap();
        assert!(updated.updated_at > past);
        assert_eq!(updated.created_at, past);
    }

    #[tokio::test]
    async fn update_of_deleted_row_is_none() {
        let repo = repository().await;
        let todo = repo.insert("gone", None, false).await.unwrap();
        assert!(repo.delete_by_id(todo.id).await.unwrap());
        assert_eq!(repo.update(&todo).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repo = repository().await;
        let todo = repo.insert("x", None, false).await.unwrap();
        assert!(repo.delete_by_id(todo.id).await.unwrap());
        assert!(!repo.delete_by_id(todo.id).await.unwrap());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = repository().await;
        let first = repo.insert("one", None, false).await.unwrap();
        repo.delete_by_id(first.id).await.unwrap();
        let second = repo.insert("two", None, false).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn long_titles_are_stored_in_full() {
        let repo = repository().await;
        let title = "x".repeat(10_000);
        let todo = repo.insert(&title, None, false).await.unwrap();
        let found = repo.find_by_id(todo.id).await.unwrap().unwrap();
        assert_eq!(found.title.len(), 10_000);
    }
}
