//! Search configuration parameters.

use crate::error::{Error, Result};
use std::time::Duration;

/// Configuration for Monte Carlo tree search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Weight of the exploration term in UCB1.
    /// Higher values spread visits more evenly, lower values favor the best-looking child.
    pub exploration_constant: f64,

    /// Number of simulations used when the caller does not pass an explicit count.
    pub num_simulations: u32,

    /// Optional wall-clock budget. Checked between simulations; at least one simulation
    /// always runs.
    pub time_limit: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            num_simulations: 100,
            time_limit: None,
        }
    }
}

impl MctsConfig {
    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the default number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set a wall-clock limit per search.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(Error::invalid_configuration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if self.num_simulations == 0 {
            return Err(Error::invalid_configuration(
                "number of simulations must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 100);
        assert!((config.exploration_constant - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(config.time_limit, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_simulations(500)
            .with_exploration_constant(0.5)
            .with_time_limit(Duration::from_millis(20));

        assert_eq!(config.num_simulations, 500);
        assert!((config.exploration_constant - 0.5).abs() < 1e-12);
        assert_eq!(config.time_limit, Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let negative = MctsConfig::default().with_exploration_constant(-1.0);
        let nan = MctsConfig::default().with_exploration_constant(f64::NAN);
        let no_simulations = MctsConfig::default().with_simulations(0);

        assert!(matches!(negative.validate(), Err(Error::InvalidConfiguration { .. })));
        assert!(matches!(nan.validate(), Err(Error::InvalidConfiguration { .. })));
        assert!(matches!(no_simulations.validate(), Err(Error::InvalidConfiguration { .. })));
    }
}
