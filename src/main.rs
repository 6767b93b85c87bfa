// ABOUTME: Demo driver wiring the log-pane view-model to a tracing-backed sink

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use logpane::app::LogPaneViewModel;
use logpane::config::Config;
use logpane::logging::TracingSink;

#[derive(Debug, Parser)]
#[command(name = "logpane", about = "Observable log-pane view-model demo")]
struct Cli {
    /// Path to a TOML config file; defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the notification hide interval in seconds
    #[arg(long)]
    hide_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let hide_delay = cli
        .hide_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.hide_delay());

    let view_model = LogPaneViewModel::with_hide_delay(Arc::new(TracingSink), hide_delay);
    view_model.subscribe(|property| info!(property = %property, "property changed"));

    view_model.update_log_details("session started");
    view_model.update_log_details("settings saved to disk");
    view_model.show_notification("Settings saved");

    info!(
        visible = view_model.notification_visible(),
        message = %view_model.notification_message(),
        "notification shown"
    );

    tokio::time::sleep(hide_delay + Duration::from_millis(100)).await;

    info!(
        visible = view_model.notification_visible(),
        "notification auto-hidden"
    );
    info!(log = %view_model.log_details(), "accumulated log");

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::prelude::*;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logpane=info".into()),
        )
        .init();
}
