//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{ClientError, GenerationTicket, PageTicket};
use shared::{
    error::ErrorKind,
    protocol::{HelloResponse, LogsResponse},
};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    PointsGenerated {
        ticket: GenerationTicket,
        result: Result<HelloResponse, ClientError>,
    },
    LogsLoaded {
        ticket: PageTicket,
        result: Result<LogsResponse, ClientError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    GeneratePoints,
    LoadLogs,
}

impl UiErrorContext {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "Backend startup",
            UiErrorContext::GeneratePoints => "Point generation",
            UiErrorContext::LoadLogs => "Log loading",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err.kind() {
            ErrorKind::NetworkFailure => UiErrorCategory::Transport,
            ErrorKind::MalformedResponse => UiErrorCategory::Validation,
        };
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn summary(&self) -> String {
        format!("{} failed: {}", self.context.label(), self.message)
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
