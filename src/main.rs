//! Kit Panel - admin controller for employee kit distribution
//!
//! Drives the dashboard, stock and employee views of the kit-distribution
//! admin panel against its REST backend. The bundled host is a line shell:
//! commands come in on stdin and the rendered document goes to stdout.

mod api;
mod app;
mod components;
mod config;
mod dashboard;
mod dom;
mod employees;
mod events;
mod kit;
mod shell;
mod stock;

#[cfg(test)]
mod tests;

use anyhow::Context;
use api::KitClient;
use app::KitPanel;
use config::PanelConfig;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = PanelConfig::from_env().context("invalid configuration")?;
    let client = KitClient::new(&config).context("failed to build HTTP client")?;
    tracing::info!(api = %config.api_url, "backend configured");

    let panel = KitPanel::new(Arc::new(client), config);
    shell::run(panel).await
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kit_panel=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
