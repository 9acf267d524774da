use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fibertrack_app::analytics::{CHART_PROJECT_STATUS, CHART_TASK_PROGRESS};
use fibertrack_app::config::{AppConfig, LogFormat};
use fibertrack_app::handlers::analytics;
use fibertrack_app::state::AppState;
use fibertrack_events::EventJournal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = AppConfig::from_env()?;

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fibertrack_app=debug,fibertrack_db=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
    tracing::info!(
        data_dir = ?config.data_dir,
        scheme = ?config.credential_scheme,
        seed = config.seed_demo_data,
        "Loaded configuration"
    );

    // --- State ---
    let state = AppState::bootstrap(config).await?;

    // Record change events emitted by the refresh below.
    let journal = EventJournal::new(256);
    let journal_handle = tokio::spawn(journal.clone().run(state.event_bus.subscribe()));

    // --- Dashboard refresh ---
    analytics::update_metrics(&state).await;
    for chart_id in [CHART_PROJECT_STATUS, CHART_TASK_PROGRESS] {
        if let Err(e) = analytics::update_chart_data(&state, chart_id).await {
            tracing::error!(code = e.code(), error = %e, chart_id, "Chart refresh failed");
        }
    }

    let snapshot = analytics::snapshot(&state).await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    // Dropping the last state handle closes the bus and ends the journal.
    drop(state);
    journal_handle.await?;
    tracing::info!(events = journal.len(), "Shutdown complete");
    Ok(())
}
