//! Planner configuration.

use chrono::Duration;

/// Configuration parameters for route planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Minimum time required to change services (minutes).
    /// A service departing within this buffer of the previous arrival
    /// is treated as departing the following day.
    pub min_connection_mins: i64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(min_connection_mins: i64) -> Self {
        Self {
            min_connection_mins,
        }
    }

    /// Returns the minimum connection time as a Duration.
    pub fn min_connection(&self) -> Duration {
        Duration::minutes(self.min_connection_mins)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_connection_mins: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.min_connection_mins, 5);
        assert_eq!(config.min_connection(), Duration::minutes(5));
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(10);
        assert_eq!(config.min_connection(), Duration::minutes(10));
    }
}
