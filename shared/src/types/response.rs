//! API response bodies that are not tied to a single route

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Database state, when the service has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Healthy response for the named service
    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self::with_status("healthy", service, version)
    }

    pub fn unhealthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self::with_status("unhealthy", service, version)
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }

    fn with_status(status: &str, service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            service: service.into(),
            version: version.into(),
            database: None,
            timestamp: Utc::now(),
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_database_field() {
        let plain = serde_json::to_value(HealthResponse::healthy("api", "1.0.0")).unwrap();
        assert_eq!(plain["status"], "healthy");
        assert!(plain.get("database").is_none());

        let down = HealthResponse::unhealthy("api", "1.0.0").with_database("unreachable");
        assert!(!down.is_healthy());
        let body = serde_json::to_value(down).unwrap();
        assert_eq!(body["database"], "unreachable");
    }
}
