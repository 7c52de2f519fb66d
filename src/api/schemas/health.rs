use serde::Serialize;
use time::OffsetDateTime;

pub const HEALTHY: &str = "healthy";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub timestamp: OffsetDateTime,
}

impl HealthResponse {
    #[must_use]
    pub const fn healthy(timestamp: OffsetDateTime) -> Self {
        Self { status: HEALTHY, timestamp }
    }
}
