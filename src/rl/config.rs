//! Q-learning hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the tabular Q-learning algorithm
///
/// This struct contains all hyperparameters used during training and path
/// extraction. Default values reproduce the reference warehouse training
/// run.
///
/// # Example
///
/// ```rust
/// use warehouse_rl::rl::QLearningConfig;
///
/// // Use default hyperparameters
/// let config = QLearningConfig::default();
///
/// // Or customize specific parameters
/// let config = QLearningConfig {
///     episodes: 500,
///     seed: Some(42),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Probability of exploiting (taking the greedy action) at each step
    ///
    /// Note the inversion relative to the textbook epsilon-greedy
    /// convention: a uniform draw BELOW epsilon picks the greedy action,
    /// anything else picks a uniformly random one. 0.9 therefore means
    /// mostly greedy with 10% exploration.
    ///
    /// Default: 0.9
    pub epsilon: f64,

    /// Discount factor for future rewards (gamma)
    ///
    /// Determines how much future rewards are valued relative to immediate
    /// rewards. Values closer to 1.0 make the agent more far-sighted.
    ///
    /// Default: 0.9
    pub discount: f64,

    /// Learning rate for the temporal-difference update (alpha)
    ///
    /// Fraction of the TD error applied to the stored value on each update.
    ///
    /// Default: 0.9
    pub learning_rate: f64,

    /// Number of training episodes
    ///
    /// Default: 1000
    pub episodes: usize,

    /// Hard cap on steps within a single training episode
    ///
    /// An untrained policy can bounce around open aisles for a long time;
    /// the cap bounds every episode.
    ///
    /// Default: 10000
    pub max_steps_per_episode: usize,

    /// Hard cap on the number of cells in an extracted greedy path
    ///
    /// A table whose greedy walk cycles would otherwise never terminate.
    ///
    /// Default: 100
    pub max_path_length: usize,

    /// Seed for the training RNG
    ///
    /// The same seed reproduces the same episode starts, action draws and
    /// final table. `None` seeds from entropy.
    ///
    /// Default: None
    pub seed: Option<u64>,
}

impl QLearningConfig {
    /// Create a new configuration with default hyperparameters
    ///
    /// # Example
    ///
    /// ```rust
    /// use warehouse_rl::rl::QLearningConfig;
    ///
    /// let config = QLearningConfig::new();
    /// assert_eq!(config.epsilon, 0.9);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    ///
    /// Checks that all hyperparameters are in valid ranges.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    ///
    /// # Example
    ///
    /// ```rust
    /// use warehouse_rl::rl::QLearningConfig;
    ///
    /// let mut config = QLearningConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.epsilon = 1.5;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            ));
        }

        if !(0.0..=1.0).contains(&self.discount) {
            return Err(format!(
                "discount must be in [0, 1], got {}",
                self.discount
            ));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            ));
        }

        if self.episodes == 0 {
            return Err("episodes must be at least 1".to_string());
        }

        if self.max_steps_per_episode == 0 {
            return Err("max_steps_per_episode must be at least 1".to_string());
        }

        if self.max_path_length == 0 {
            return Err("max_path_length must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.9,
            discount: 0.9,
            learning_rate: 0.9,
            episodes: 1000,
            max_steps_per_episode: 10_000,
            max_path_length: 100,
            seed: None,
        }
    }
}
