//! # Taskmate API Server
//!
//! HTTP surface for the Taskmate task tracker: registration, login,
//! per-user dashboards, task CRUD with creator-or-admin authorization,
//! and the admin all-tasks view.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=<at least 32 chars> cargo run -p taskmate-api
//! ```

use taskmate_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskmate_core::db::migrations::run_migrations;
use taskmate_core::db::pool::{create_pool, DatabaseConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskmate_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskmate API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
