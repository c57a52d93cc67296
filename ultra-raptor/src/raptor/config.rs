//! Planner configuration.

/// Default cap on the number of rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 50;

/// Configuration parameters for the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaptorConfig {
    /// Maximum number of rounds, i.e. vehicles boarded.
    /// The search stops early once a round improves nothing.
    pub max_rounds: usize,
}

impl RaptorConfig {
    /// Create a new configuration with the given round cap.
    pub fn new(max_rounds: usize) -> Self {
        Self { max_rounds }
    }

    /// Returns the maximum number of vehicle changes the cap allows.
    pub fn max_transfers(&self) -> usize {
        self.max_rounds.saturating_sub(1)
    }
}

impl Default for RaptorConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RaptorConfig::default();
        assert_eq!(config.max_rounds, 50);
        assert_eq!(config.max_transfers(), 49);
    }

    #[test]
    fn custom_config() {
        let config = RaptorConfig::new(3);
        assert_eq!(config.max_rounds, 3);
        assert_eq!(config.max_transfers(), 2);
    }

    #[test]
    fn zero_rounds_allows_no_transfers() {
        assert_eq!(RaptorConfig::new(0).max_transfers(), 0);
    }
}
