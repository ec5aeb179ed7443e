use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signoutsync_backend::{app, config::Config, services::spawn_session_sweeper, state::AppState};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(2).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signoutsync_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        session_timeout_minutes = config.session_timeout.num_minutes(),
        session_sweep_interval_secs = config.session_sweep_interval_secs,
        seed_username = %config.seed_username,
        seed_password = %config.seed_password.as_deref().map(mask_secret).unwrap_or_default(),
        cookie_secure = config.cookie_secure,
        time_zone = %config.time_zone,
        "Loaded configuration from environment/.env"
    );

    let state = AppState::from_config(config.clone()).await;

    if config.session_sweep_interval_secs > 0 {
        spawn_session_sweeper(
            state.sessions.clone(),
            Duration::from_secs(config.session_sweep_interval_secs),
        );
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
