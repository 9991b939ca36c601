//! Client side of the point cloud lab: HTTP access to the backend plus the
//! two owned-state components the UI drives.

pub mod api;
pub mod config;
pub mod error;
pub mod generation;
pub mod pagination;
pub mod sequence;

pub use api::{HttpLabApi, LabApi};
pub use config::{load_settings, ClientSettings};
pub use error::{ClientError, SettingsError};
pub use generation::{GenerationController, GenerationTicket, DEFAULT_POINT_COUNT};
pub use pagination::{LogPaginator, PageTicket, PAGE_LIMIT};
pub use sequence::{Completion, RequestSeq};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
