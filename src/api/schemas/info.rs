use crate::services::system_service::MemorySnapshot;
use serde::Serialize;
use time::OffsetDateTime;

pub const ROOT_MESSAGE: &str = "dummy test app";
pub const APP_NAME: &str = "navoy-demo-app";
pub const APP_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootResponse {
    pub message: &'static str,
    pub hostname: String,
    pub platform: &'static str,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub timestamp: OffsetDateTime,
    pub environment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub app: &'static str,
    pub version: &'static str,
    /// Seconds since the process started.
    pub uptime: f64,
    pub memory: MemoryUsage,
}

/// Process memory in bytes.
///
/// There is no managed heap to report on, so the heap figures are taken from the
/// OS view of the process: `heapTotal` is the mapped virtual size and `heapUsed`
/// the resident set.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub rss: u64,
    pub heap_total: u64,
    pub heap_used: u64,
    pub external: u64,
}

impl From<MemorySnapshot> for MemoryUsage {
    fn from(snapshot: MemorySnapshot) -> Self {
        Self {
            rss: snapshot.resident_bytes,
            heap_total: snapshot.virtual_bytes,
            heap_used: snapshot.resident_bytes,
            external: 0,
        }
    }
}
