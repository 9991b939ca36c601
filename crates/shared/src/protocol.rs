use serde::{Deserialize, Serialize};

use crate::domain::{LogRecord, Point3D};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HelloQuery {
    /// Sent exactly as typed; the backend owns validation.
    pub count: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogsQuery {
    pub start: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelloResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_record_id: Option<String>,
    #[serde(default)]
    pub points: Vec<Point3D>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Size of the whole collection. Older backends leave it out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_returned: Option<u64>,
}

impl Pagination {
    pub fn with_total(total: u64) -> Self {
        Self {
            total: Some(total),
            start: None,
            limit: None,
            count_returned: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub data: Vec<LogRecord>,
    pub pagination: Pagination,
}

/// Body the backend sends alongside a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
