//! Backend commands queued from UI to backend worker.

use client_core::{GenerationTicket, PageTicket};

/// Each command owns the ticket issued by the UI-side controller; the ticket
/// travels back inside the matching [`crate::controller::events::UiEvent`].
#[derive(Debug)]
pub enum BackendCommand {
    GeneratePoints { ticket: GenerationTicket },
    LoadLogs { ticket: PageTicket },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::GeneratePoints { .. } => "generate_points",
            BackendCommand::LoadLogs { .. } => "load_logs",
        }
    }
}
