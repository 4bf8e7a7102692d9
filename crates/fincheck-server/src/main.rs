mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState, HttpSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = fincheck_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    let pool_config = fincheck_db::PoolConfig::from_app_config(&config);
    let pool = fincheck_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = fincheck_db::run_migrations(&pool).await?;
    tracing::info!(applied, "database ready");

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let analyzer = fincheck_analyzer::GeminiClient::with_base_url(
        &config.gemini_api_key,
        &config.gemini_model,
        &config.gemini_base_url,
    )?;

    let state = AppState {
        pool,
        analyzer,
        upload_dir: Arc::new(config.upload_dir.clone()),
    };
    let settings = HttpSettings {
        static_dir: config.static_dir.clone(),
        max_upload_bytes: config.max_upload_bytes,
    };
    let app = build_app(state, &settings);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
