use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, warn};
use tracing_subscriber::{fmt, EnvFilter};

use todo_server::{app, db, run, Config, StartupError, TodoRepository, TodoService};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    match serve(config).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server stopped");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn serve(config: Config) -> Result<(), StartupError> {
    let pool = db::connect(&config.datasource).await?;
    db::migrate(&pool).await?;

    let service = TodoService::new(TodoRepository::new(pool));
    let router = app(service, config.cors.allowed_origin);

    let listener = TcpListener::bind(config.server.bind_addr()).await?;
    run(listener, router).await?;
    Ok(())
}
