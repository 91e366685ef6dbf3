mod app;
mod auth;
mod challenges;
mod config;
mod docs;
mod error;
mod extract;
#[cfg(test)]
mod memory;
mod state;
mod users;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "ctfv_backend=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    if config.auth.secret.is_none() {
        tracing::warn!("AUTH_SECRET is not set; register and login will fail");
    }
    let (app_state, db) = AppState::init(config).await?;
    let config = app_state.config.clone();

    sqlx::migrate!("./migrations").run(&db).await?;

    let app = app::build_app(app_state);
    app::serve(app, &config.host, config.port).await
}
