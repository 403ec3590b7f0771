//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::StartStatus;

/// Response body for the countdown control endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    fn status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            seconds: None,
            message: None,
        }
    }

    pub fn started(status: StartStatus) -> Self {
        Self::status(status.as_str())
    }

    pub fn stopped() -> Self {
        Self::status("stopped")
    }

    pub fn reset() -> Self {
        Self::status("reset")
    }

    pub fn time_set(seconds: u64) -> Self {
        Self {
            seconds: Some(seconds),
            ..Self::status("time set")
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            message: Some(message),
            ..Self::status("error")
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_are_omitted() {
        let body = serde_json::to_value(ApiResponse::stopped()).unwrap();
        assert_eq!(body, json!({ "status": "stopped" }));

        let body = serde_json::to_value(ApiResponse::time_set(30)).unwrap();
        assert_eq!(body, json!({ "status": "time set", "seconds": 30 }));

        let body =
            serde_json::to_value(ApiResponse::started(StartStatus::AlreadyRunning)).unwrap();
        assert_eq!(body, json!({ "status": "already running" }));
    }
}
