use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use serde_json::{json, Value};
use shared::{
    domain::{LogRecord, Point3D},
    error::ApiRejection,
    protocol::{HelloQuery, HelloResponse, LogsQuery, LogsResponse, Pagination},
};

use crate::{api::LabApi, error::ClientError};

pub(crate) fn rejected(message: &str) -> ClientError {
    ClientError::Rejected {
        endpoint: "/test",
        source: ApiRejection::new(503, message),
    }
}

pub(crate) fn malformed() -> ClientError {
    let source = serde_json::from_str::<Value>("<html>").expect_err("not json");
    ClientError::Malformed {
        endpoint: "/test",
        source,
    }
}

pub(crate) fn points(n: usize) -> Vec<Point3D> {
    (0..n)
        .map(|i| Point3D::new(i as f64, i as f64 * 0.5, -(i as f64)))
        .collect()
}

pub(crate) fn logs_response(start: u64, count: u64, total: u64) -> LogsResponse {
    LogsResponse {
        data: (start..start + count)
            .map(|i| {
                serde_json::from_value::<LogRecord>(
                    json!({"_id": format!("log-{i}"), "event": "hello_request", "points_count": i}),
                )
                .expect("record")
            })
            .collect(),
        pagination: Pagination::with_total(total),
    }
}

/// In-memory backend: hello answers are queued (or derived from the count),
/// log pages are cut from a collection of `total` synthetic records.
pub(crate) struct ScriptedLabApi {
    hello: Mutex<VecDeque<Result<HelloResponse, ClientError>>>,
    log_total: Mutex<u64>,
    fail_logs: AtomicBool,
    pub hello_calls: Mutex<Vec<HelloQuery>>,
    pub log_calls: Mutex<Vec<LogsQuery>>,
}

impl ScriptedLabApi {
    pub fn with_log_total(total: u64) -> Self {
        Self {
            hello: Mutex::new(VecDeque::new()),
            log_total: Mutex::new(total),
            fail_logs: AtomicBool::new(false),
            hello_calls: Mutex::new(Vec::new()),
            log_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_hello(&self, result: Result<HelloResponse, ClientError>) {
        self.hello.lock().expect("hello queue").push_back(result);
    }

    pub fn set_log_total(&self, total: u64) {
        *self.log_total.lock().expect("log total") = total;
    }

    pub fn fail_logs(&self, fail: bool) {
        self.fail_logs.store(fail, Ordering::SeqCst);
    }

    pub fn log_starts(&self) -> Vec<u64> {
        self.log_calls
            .lock()
            .expect("log calls")
            .iter()
            .map(|q| q.start)
            .collect()
    }
}

#[async_trait]
impl LabApi for ScriptedLabApi {
    async fn generate_points(&self, query: &HelloQuery) -> Result<HelloResponse, ClientError> {
        self.hello_calls
            .lock()
            .expect("hello calls")
            .push(query.clone());
        if let Some(scripted) = self.hello.lock().expect("hello queue").pop_front() {
            return scripted;
        }
        match query.count.parse::<usize>() {
            Ok(n) => Ok(HelloResponse {
                points: points(n),
                ..HelloResponse::default()
            }),
            Err(_) => Err(rejected("count must be an integer")),
        }
    }

    async fn fetch_logs(&self, query: LogsQuery) -> Result<LogsResponse, ClientError> {
        self.log_calls.lock().expect("log calls").push(query);
        if self.fail_logs.load(Ordering::SeqCst) {
            return Err(rejected("MongoDB is not connected"));
        }
        let total = *self.log_total.lock().expect("log total");
        let start = query.start.min(total);
        let end = query.start.saturating_add(query.limit).min(total);
        Ok(logs_response(start, end - start, total))
    }
}
