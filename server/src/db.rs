//! Connection pool construction and schema migrations.

use std::str::FromStr;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

use crate::config::DatasourceConfig;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a pool against the configured datasource.
///
/// File databases are created on first use. In-memory databases are pinned
/// to a single connection that never expires, otherwise every new connection
/// would see an empty schema.
pub async fn connect(config: &DatasourceConfig) -> Result<SqlitePool, sqlx::Error> {
    if config.username.is_some() || config.password.is_some() {
        warn!("datasource credentials are set but SQLite does not authenticate; ignoring them");
    }

    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
    let pool_options = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
    };

    let pool = pool_options.connect_with(options).await?;
    info!(url = %config.url, "datasource connected");
    Ok(pool)
}

/// Apply any pending migrations from `migrations/`.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("schema migrations applied");
    Ok(())
}

/// Fresh in-memory database with the schema applied.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = connect(&DatasourceConfig::in_memory()).await?;
    migrate(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_pool_has_todos_table() {
        let pool = connect_in_memory().await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();
    }
}
