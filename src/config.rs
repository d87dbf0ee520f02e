//! Configuration types for agent creation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, q_learning::RewardScheme, tictactoe::StateEncoding};

/// Hyper-parameters of a Q-learning agent.
///
/// Every field has a default, so a JSON file only needs the values it
/// changes.
///
/// # Examples
///
/// ```
/// use qttt::{AgentConfig, tictactoe::StateEncoding};
///
/// let config = AgentConfig::default()
///     .with_epsilon(0.1)
///     .with_encoding(StateEncoding::Relative)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Multiplicative ε decay applied after each training episode
    pub epsilon_decay: f64,
    /// Floor for the decayed ε
    pub min_epsilon: f64,
    /// Initial value of every Q-table entry
    pub q_init: f64,
    /// How boards map to state indices
    pub encoding: StateEncoding,
    /// Rewards seen by the mark that just moved
    pub rewards: RewardScheme,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            discount_factor: 0.9,
            epsilon: 0.2,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
            q_init: 0.0,
            encoding: StateEncoding::default(),
            rewards: RewardScheme::default(),
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AgentConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the discount factor.
    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Set the exploration rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the per-episode ε decay and its floor.
    pub fn with_epsilon_decay(mut self, epsilon_decay: f64, min_epsilon: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self.min_epsilon = min_epsilon;
        self
    }

    /// Set the state encoding strategy.
    pub fn with_encoding(mut self, encoding: StateEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the reward scheme.
    pub fn with_rewards(mut self, rewards: RewardScheme) -> Self {
        self.rewards = rewards;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, value: f64| -> Result<()> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(Error::InvalidConfiguration {
                    message: format!("{name} must be in [0, 1], got {value}"),
                })
            }
        };

        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "learning_rate must be in (0, 1], got {}",
                    self.learning_rate
                ),
            });
        }
        unit("discount_factor", self.discount_factor)?;
        unit("epsilon", self.epsilon)?;
        unit("epsilon_decay", self.epsilon_decay)?;
        unit("min_epsilon", self.min_epsilon)?;
        if self.min_epsilon > self.epsilon {
            return Err(Error::InvalidConfiguration {
                message: "min_epsilon must be <= epsilon".to_string(),
            });
        }

        let rewards = &self.rewards;
        for (name, value) in [
            ("q_init", self.q_init),
            ("rewards.win", rewards.win),
            ("rewards.loss", rewards.loss),
            ("rewards.draw", rewards.draw),
            ("rewards.neutral", rewards.neutral),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be finite"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = AgentConfig::default();
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.discount_factor, 0.9);
        assert_eq!(config.epsilon, 0.2);
        assert_eq!(config.encoding, StateEncoding::Absolute);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(AgentConfig::default().with_learning_rate(0.0).validate().is_err());
        assert!(AgentConfig::default().with_discount_factor(1.5).validate().is_err());
        assert!(AgentConfig::default().with_epsilon(-0.1).validate().is_err());
        assert!(
            AgentConfig::default()
                .with_epsilon(0.1)
                .with_epsilon_decay(0.99, 0.2)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn loads_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"epsilon": 0.05, "encoding": "relative", "rewards": {{"draw": 0.0}}}}"#)
            .unwrap();

        let config = AgentConfig::load(file.path()).unwrap();
        assert_eq!(config.epsilon, 0.05);
        assert_eq!(config.encoding, StateEncoding::Relative);
        assert_eq!(config.rewards.draw, 0.0);
        assert_eq!(config.rewards.win, 1.0);
        assert_eq!(config.learning_rate, 0.5);
    }

    #[test]
    fn missing_file_is_resource_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = AgentConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable { .. }));
    }
}
