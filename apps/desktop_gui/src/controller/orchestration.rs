//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. A command that cannot be queued is
/// dropped together with its ticket, which releases the busy flag it held.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{Completion, GenerationController, LogPaginator};
    use crossbeam_channel::bounded;
    use shared::{
        domain::Point3D,
        protocol::{HelloResponse, LogsResponse, Pagination},
    };

    #[test]
    fn queued_command_keeps_ticket_alive() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut logs = LogPaginator::new();
        let mut status = String::new();

        let queued = dispatch_backend_command(
            &cmd_tx,
            BackendCommand::LoadLogs {
                ticket: logs.begin_load(0),
            },
            &mut status,
        );

        assert!(queued);
        assert!(logs.is_loading());
        drop(cmd_rx.try_recv().expect("queued command"));
        assert!(!logs.is_loading());
    }

    #[test]
    fn full_queue_drops_ticket_and_reports() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut logs = LogPaginator::new();
        let mut status = String::new();

        let first = logs.begin_load(0);
        assert!(dispatch_backend_command(
            &cmd_tx,
            BackendCommand::LoadLogs { ticket: first },
            &mut status
        ));
        let second = logs.begin_next();
        let queued = dispatch_backend_command(
            &cmd_tx,
            BackendCommand::LoadLogs { ticket: second },
            &mut status,
        );

        assert!(!queued);
        assert!(status.contains("queue is full"));
        assert!(logs.is_loading());
    }

    #[test]
    fn unsent_ticket_does_not_supersede_queued_one() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut logs = LogPaginator::new();
        let mut status = String::new();

        assert!(dispatch_backend_command(
            &cmd_tx,
            BackendCommand::LoadLogs {
                ticket: logs.begin_load(0),
            },
            &mut status
        ));
        let second = logs.begin_next();
        let seq = second.seq();
        assert!(!dispatch_backend_command(
            &cmd_tx,
            BackendCommand::LoadLogs { ticket: second },
            &mut status,
        ));
        logs.abandon(seq);

        let Ok(BackendCommand::LoadLogs { ticket }) = cmd_rx.try_recv() else {
            panic!("expected queued log load");
        };
        let completion = logs
            .finish(ticket, Ok(page_of(0, 10, 30)))
            .expect("finish");

        assert_eq!(completion, Completion::Applied);
        assert_eq!(logs.records().len(), 10);
        assert_eq!(logs.total(), Some(30));
        assert!(!logs.is_loading());
    }

    #[test]
    fn unsent_generation_does_not_supersede_queued_one() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut generation = GenerationController::new("3");
        let mut status = String::new();

        assert!(dispatch_backend_command(
            &cmd_tx,
            BackendCommand::GeneratePoints {
                ticket: generation.begin(),
            },
            &mut status
        ));
        let second = generation.begin();
        let seq = second.seq();
        assert!(!dispatch_backend_command(
            &cmd_tx,
            BackendCommand::GeneratePoints { ticket: second },
            &mut status,
        ));
        generation.abandon(seq);

        let Ok(BackendCommand::GeneratePoints { ticket }) = cmd_rx.try_recv() else {
            panic!("expected queued generation");
        };
        let response = HelloResponse {
            points: vec![Point3D::new(1.0, 2.0, 3.0); 3],
            ..HelloResponse::default()
        };
        let completion = generation.finish(ticket, Ok(response)).expect("finish");

        assert_eq!(completion, Completion::Applied);
        assert_eq!(generation.points().len(), 3);
    }

    fn page_of(start: u64, count: u64, total: u64) -> LogsResponse {
        LogsResponse {
            data: (start..start + count)
                .map(|i| {
                    serde_json::from_value(serde_json::json!({"_id": format!("log-{i}")}))
                        .expect("record")
                })
                .collect(),
            pagination: Pagination::with_total(total),
        }
    }

    #[test]
    fn disconnected_worker_is_reported() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let mut logs = LogPaginator::new();
        let mut status = String::new();

        let queued = dispatch_backend_command(
            &cmd_tx,
            BackendCommand::LoadLogs {
                ticket: logs.begin_refresh(),
            },
            &mut status,
        );

        assert!(!queued);
        assert!(status.contains("disconnected"));
        assert!(!logs.is_loading());
    }
}
