use std::process::ExitCode;

use sign_server::config::SignConfig;
use sign_server::dataset::SharedDataset;
use sign_server::display::SignSessions;
use sign_server::predict::EngineConfig;
use sign_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sign_server=info,tower_http=info")),
        )
        .init();

    let config = match SignConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Load the dataset (fail fast if unreadable)
    let files = config.dataset_files();
    info!(
        stations = %files.stations.display(),
        departures = %files.departures.display(),
        "loading dataset"
    );
    let dataset = match SharedDataset::open(files).await {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("failed to load dataset: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Optionally re-read the files in the background
    if let Some(period) = config.reload_interval {
        let dataset = dataset.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match dataset.reload().await {
                    Ok(count) => info!(stations = count, "reloaded dataset"),
                    Err(e) => error!("dataset reload failed, keeping previous data: {e}"),
                }
            }
        });
    }

    let engine = EngineConfig::default().with_capacity(config.capacity);
    let sessions = SignSessions::new(config.max_displays, config.display_idle);
    let state =
        AppState::new(dataset, engine, sessions).with_refresh_secs(config.refresh_secs);
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("sign server listening on http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
