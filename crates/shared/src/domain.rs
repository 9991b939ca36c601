use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const HELLO_REQUEST_EVENT: &str = "hello_request";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Ordered points from one generation call. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSet(Vec<Point3D>);

impl PointSet {
    pub fn new(points: Vec<Point3D>) -> Self {
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3D> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Point3D] {
        &self.0
    }
}

impl From<Vec<Point3D>> for PointSet {
    fn from(points: Vec<Point3D>) -> Self {
        Self(points)
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3D;
    type IntoIter = std::slice::Iter<'a, Point3D>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One remote log entry. The store is schemaless, so the record is kept as
/// the raw JSON object it arrived as.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogRecord(Map<String, Value>);

impl LogRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("_id").and_then(Value::as_str)
    }

    pub fn event(&self) -> Option<&str> {
        self.0.get("event").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The shape shown in the log panel: `hello_request` entries collapse to
    /// their event tag and point count, everything else is shown verbatim.
    pub fn display_value(&self) -> Value {
        if self.event() == Some(HELLO_REQUEST_EVENT) {
            let count = self.0.get("points_count").cloned().unwrap_or(Value::Null);
            let mut projected = Map::new();
            projected.insert("event".into(), Value::from(HELLO_REQUEST_EVENT));
            projected.insert("count".into(), count);
            Value::Object(projected)
        } else {
            Value::Object(self.0.clone())
        }
    }

    pub fn display_text(&self) -> String {
        serde_json::to_string_pretty(&self.display_value()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogPage {
    pub records: Vec<LogRecord>,
    pub offset: u64,
    /// `None` when the backend did not report a collection size.
    pub total: Option<u64>,
}

impl LogPage {
    /// End of the window actually received, `offset + records.len()`.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.records.len() as u64)
    }
}
