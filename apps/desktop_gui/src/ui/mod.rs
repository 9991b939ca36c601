//! UI layer for desktop GUI: app shell, log panel, and point viewport.

pub mod app;
pub mod log_panel;
pub mod viewport;

pub use app::{LabApp, StartupConfig};
