//! Command-line and environment configuration.
//!
//! Every knob is a long flag spelled as its dotted key (`--server.port 9090`)
//! with an upper-snake-case environment fallback (`SERVER_PORT=9090`).

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::header::{HeaderValue, InvalidHeaderValue};
use clap::{Args, Parser};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Top-level configuration for the `todo-server` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "REST backend for a todo list")]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,
    #[command(flatten)]
    pub datasource: DatasourceConfig,
    #[command(flatten)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[arg(long = "server.address", env = "SERVER_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub address: IpAddr,
    /// HTTP bind port.
    #[arg(long = "server.port", env = "SERVER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

#[derive(Clone, Args)]
pub struct DatasourceConfig {
    /// SQLite connection URL, e.g. `sqlite://todos.db` or `sqlite::memory:`.
    #[arg(long = "datasource.url", env = "DATASOURCE_URL", default_value = "sqlite://todos.db")]
    pub url: String,
    #[arg(long = "datasource.username", env = "DATASOURCE_USERNAME")]
    pub username: Option<String>,
    #[arg(long = "datasource.password", env = "DATASOURCE_PASSWORD")]
    pub password: Option<String>,
    /// Upper bound on pooled connections.
    #[arg(long = "datasource.maxConnections", env = "DATASOURCE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

impl DatasourceConfig {
    /// A private database that lives as long as the pool built from it.
    pub fn in_memory() -> Self {
        Self {
            url: IN_MEMORY_URL.to_string(),
            username: None,
            password: None,
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl fmt::Debug for DatasourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasourceConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Debug, Clone, Args)]
pub struct CorsConfig {
    /// Origin allowed to call the `/api/todos` routes from a browser.
    #[arg(
        long = "cors.allowedOrigin",
        env = "CORS_ALLOWED_ORIGIN",
        default_value = DEFAULT_ALLOWED_ORIGIN,
        value_parser = parse_origin
    )]
    pub allowed_origin: HeaderValue,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
        }
    }
}

fn parse_origin(raw: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(raw)
}
