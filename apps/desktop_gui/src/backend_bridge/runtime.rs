//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ClientSettings, HttpLabApi, LabApi};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorCategory::Unknown,
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let api: Arc<dyn LabApi> = match HttpLabApi::new(&settings) {
            Ok(api) => Arc::new(api),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                    UiErrorContext::BackendStartup,
                    &err,
                )));
                tracing::error!("failed to build http client: {err}");
                return;
            }
        };

        tracing::info!(api_url = %settings.api_url, "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Backend worker ready ({})",
            settings.api_url
        )));

        // Commands run as independent tasks so a slow request never blocks a
        // newer one; the controllers drop whichever completion is stale.
        while let Ok(cmd) = cmd_rx.recv() {
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                handle_command(api.as_ref(), cmd, &ui_tx).await;
            });
        }
        tracing::info!("ui command queue closed; backend worker exiting");
    });
}

async fn handle_command(api: &dyn LabApi, cmd: BackendCommand, ui_tx: &Sender<UiEvent>) {
    let event = match cmd {
        BackendCommand::GeneratePoints { ticket } => {
            tracing::info!(
                seq = ticket.seq().0,
                count = %ticket.query().count,
                "backend: generate_points"
            );
            let result = api.generate_points(ticket.query()).await;
            UiEvent::PointsGenerated { ticket, result }
        }
        BackendCommand::LoadLogs { ticket } => {
            tracing::info!(
                seq = ticket.seq().0,
                start = ticket.start(),
                "backend: load_logs"
            );
            let result = api.fetch_logs(ticket.query()).await;
            UiEvent::LogsLoaded { ticket, result }
        }
    };

    if ui_tx.try_send(event).is_err() {
        tracing::warn!("ui event queue unavailable; dropping backend completion");
    }
}
