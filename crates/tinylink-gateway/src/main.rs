use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tinylink_core::{Repository, Shortener};
use tinylink_gateway::cli::{Cli, StorageBackendArg};
use tinylink_gateway::{App, AppState};
use tinylink_generator::RandomGenerator;
use tinylink_shortener::{AllocationPolicy, ShortenerService};
use tinylink_storage::{InMemoryRepository, PostgresConfig, PostgresRepository};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tinylink_telemetry::init(cli.log_format)?;

    let generator =
        RandomGenerator::new(cli.code_length).context("invalid short code length")?;
    let policy = AllocationPolicy::builder()
        .max_attempts(cli.max_attempts)
        .build();

    let shortener: Arc<dyn Shortener> = match cli.storage {
        StorageBackendArg::InMemory => build_shortener(InMemoryRepository::new(), generator, policy),
        StorageBackendArg::Postgres => {
            let database_url = cli
                .database_url
                .clone()
                .context("database url is required when storage backend is postgres")?;
            let config = PostgresConfig::builder()
                .database_url(database_url)
                .max_connections(cli.max_connections)
                .build();
            let repository = PostgresRepository::connect(&config)
                .await
                .context("failed to connect to postgres")?;
            repository
                .migrate()
                .await
                .context("failed to prepare database schema")?;
            build_shortener(repository, generator, policy)
        }
    };

    let listener = tokio::net::TcpListener::bind(cli.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen_addr))?;

    info!(
        listen_addr = %listener.local_addr()?,
        base_url = %cli.base_url,
        storage_backend = %cli.storage,
        code_length = cli.code_length,
        max_attempts = policy.max_attempts,
        "starting gateway server"
    );

    let app = App::router(AppState::new(shortener, cli.base_url));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("gateway server stopped");
    Ok(())
}

fn build_shortener<R: Repository>(
    repository: R,
    generator: RandomGenerator,
    policy: AllocationPolicy,
) -> Arc<dyn Shortener> {
    Arc::new(ShortenerService::with_policy(repository, generator, policy))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
