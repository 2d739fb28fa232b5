use habit_view::{AppState, Config, HabitClient, load_preferences, router};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let prefs = load_preferences(&config.data_path).await;
    let client = HabitClient::new(&config.api_url, config.api_token.clone())?;
    if !client.is_authenticated() {
        info!("no HABIT_API_TOKEN set, habit list will be empty");
    }
    let state = AppState::new(client, config.theme, config.data_path.clone(), prefs);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(api = %config.api_url, "listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
