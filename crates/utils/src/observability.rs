//! Health-check types shared by `/health`, `/ready`, and `/live`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<ComponentCheck>>,
}

/// Health status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Component health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthCheck {
    /// Create a healthy health check
    pub fn healthy(version: String) -> Self {
        Self {
            status: HealthStatus::Healthy,
            version,
            timestamp: Utc::now(),
            checks: None,
        }
    }

    /// Create an unhealthy check carrying a single component's failure reason
    pub fn unhealthy(version: String, component: &str, message: String) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            version,
            timestamp: Utc::now(),
            checks: Some(vec![ComponentCheck {
                name: component.to_string(),
                status: HealthStatus::Unhealthy,
                message: Some(message),
            }]),
        }
    }
}
