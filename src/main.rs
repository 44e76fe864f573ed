//! SPML Desk server
//!
//! Usage:
//!   spml_desk [--env dev] [--port 3000]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::RwLock;

use spml_desk::config::AppConfig;
use spml_desk::gateway::{self, state::AppState, views::Views};
use spml_desk::{FlightTable, OrderService, OrderStore, ReferenceWatcher, RouteRules, webhook};

/// Get environment name from command line (--env / -e), default "dev"
fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = spml_desk::logging::init_logging(&app_config);

    tracing::info!("Starting SPML desk in {} mode", env);

    // Reference table: a missing or broken export leaves the table empty,
    // and every submission is rejected until the file is fixed.
    let reference = &app_config.reference;
    let table = FlightTable::load_or_empty(Path::new(&reference.path), &reference.columns);
    let flights = Arc::new(RwLock::new(table));

    if reference.reload_interval_secs > 0 {
        let watcher =
            ReferenceWatcher::new(&reference.path, reference.columns.clone(), flights.clone());
        tokio::spawn(watcher.run(Duration::from_secs(reference.reload_interval_secs)));
        tracing::info!(
            "[REFERENCE] Watching {} every {}s",
            reference.path,
            reference.reload_interval_secs
        );
    }

    let store = OrderStore::open(&app_config.orders.path, app_config.orders.sync_on_write)
        .with_context(|| format!("failed to open order record {}", app_config.orders.path))?;

    let forwarder = webhook::from_config(&app_config.webhook)
        .context("failed to build webhook client")?;

    let service = OrderService::new(
        flights,
        Arc::new(store),
        Arc::from(forwarder),
        RouteRules::from_config(&app_config.rules),
    );

    let views = match &app_config.gateway.template_dir {
        Some(dir) => Views::from_dir(dir)
            .with_context(|| format!("failed to load templates from {}", dir))?,
        None => Views::embedded().context("failed to compile embedded templates")?,
    };

    let state = Arc::new(AppState::new(Arc::new(service), Arc::new(views)));

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    gateway::run_server(&app_config.gateway.host, port, state).await
}
