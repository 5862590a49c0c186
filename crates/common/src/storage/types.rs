//! Storage reporting types

/// Pool health as observed by a probe checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub healthy: bool,

    /// Connections currently open (checked out plus idle)
    pub open_connections: usize,

    pub idle_connections: usize,

    pub max_connections: usize,

    /// Failure description when unhealthy
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn healthy(open: usize, idle: usize, max: usize) -> Self {
        Self {
            healthy: true,
            open_connections: open,
            idle_connections: idle,
            max_connections: max,
            message: None,
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            open_connections: 0,
            idle_connections: 0,
            max_connections: 0,
            message: Some(message.into()),
        }
    }
}

/// Connection pool metrics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolMetrics {
    pub connections_acquired: u64,
    pub connections_timeout: u64,
    pub connections_error: u64,

    /// Average connection acquisition time (milliseconds)
    pub avg_acquisition_time_ms: u64,

    pub queries_executed: u64,
    pub queries_failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_healthy() {
        let status = HealthStatus::healthy(3, 2, 8);

        assert!(status.healthy);
        assert_eq!(status.open_connections, 3);
        assert_eq!(status.idle_connections, 2);
        assert_eq!(status.max_connections, 8);
        assert!(status.message.is_none());
    }

    #[test]
    fn test_health_status_unhealthy() {
        let status = HealthStatus::unhealthy("timed out waiting for connection");

        assert!(!status.healthy);
        assert_eq!(status.open_connections, 0);
        assert_eq!(status.message.as_deref(), Some("timed out waiting for connection"));
    }
}
