//! Task manager HTTP server.
//!
//! Configuration is read from the environment (and a `.env` file when
//! present); see [`task_manager::config`] for the recognised variables.
//! `RUST_LOG` controls log verbosity.

use std::sync::Arc;

use mockable::DefaultClock;
use task_manager::{
    config::{AppConfig, StorageMode},
    server,
    task::{
        adapters::{
            http,
            memory::InMemoryTaskRepository,
            postgres::{PostgresTaskRepository, build_pool},
        },
        services::TaskService,
    },
    telemetry,
};
use tokio::net::TcpListener;
use tracing::info;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        return Err(err.into());
    }

    let config = AppConfig::from_env()?;
    telemetry::init_tracing(config.log_format)?;

    let router = match config.storage_mode {
        StorageMode::InMemory => {
            info!("using in-memory task storage");
            let service = TaskService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(DefaultClock),
            );
            http::router(Arc::new(service))
        }
        StorageMode::Postgres => {
            let database_url = config
                .database_url
                .clone()
                .ok_or(task_manager::config::ConfigurationError::MissingDatabaseUrl)?;
            let pool_size = config.pool_max_size;
            info!(pool_size, "using PostgreSQL task storage");
            let pool =
                tokio::task::spawn_blocking(move || build_pool(&database_url, pool_size)).await??;
            let repository = PostgresTaskRepository::new(pool);
            repository.migrate().await?;
            let service = TaskService::new(Arc::new(repository), Arc::new(DefaultClock));
            http::router(Arc::new(service))
        }
    };

    let listener = TcpListener::bind(config.socket_addr()).await?;
    server::serve(listener, router).await?;
    Ok(())
}
