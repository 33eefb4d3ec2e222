//! Service entry point: configuration, database, adapter wiring, HTTP server.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planforge::adapters::ai::HttpProviderFactory;
use planforge::adapters::document::MarkdownExporter;
use planforge::adapters::http::{api_router, AppState};
use planforge::adapters::postgres::{PostgresGenerationStore, PostgresSettingsStore};
use planforge::adapters::template::FileTemplateSource;
use planforge::adapters::tracker::HttpTrackerFactory;
use planforge::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("running database migrations");
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState::new(
        Arc::new(PostgresSettingsStore::new(pool.clone())),
        Arc::new(PostgresGenerationStore::new(pool)),
        Arc::new(FileTemplateSource::new()),
        Arc::new(MarkdownExporter::new()),
        Arc::new(HttpProviderFactory::new()),
        Arc::new(HttpTrackerFactory::new()),
    );

    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
