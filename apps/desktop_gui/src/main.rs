mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, DEFAULT_POINT_COUNT};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{LabApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Request generated point clouds and browse the backend log store")]
struct Args {
    /// Backend base URL; overrides lab.toml and LAB_API_URL.
    #[arg(long)]
    api_url: Option<String>,
    /// Initial value of the point count field.
    #[arg(long, default_value = DEFAULT_POINT_COUNT)]
    count: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(api_url) = args.api_url.as_deref() {
        settings = settings
            .with_api_url(api_url)
            .context("invalid --api-url")?;
    }
    tracing::info!(api_url = %settings.api_url, "starting desktop gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let startup = StartupConfig {
        api_url: settings.api_url.clone(),
        initial_count: args.count,
    };
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Point Cloud Lab")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Point Cloud Lab",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(LabApp::new(cmd_tx, ui_rx, startup)))
        }),
    )
    .map_err(|err| anyhow!("desktop gui exited with error: {err}"))
}
