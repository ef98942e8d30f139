//! Training statistics tracking for Q-learning
//!
//! This module provides utilities for tracking and monitoring training
//! progress, including episode rewards, lengths and goal completions.

use std::collections::VecDeque;

/// Training statistics tracker with rolling averages
///
/// Tracks episode-level metrics (rewards, lengths, goal completions) in
/// rolling windows for smoothed progress reporting, alongside cumulative
/// totals for the end-of-run summary.
///
/// # Example
///
/// ```rust
/// use warehouse_rl::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
///
/// // Record an episode
/// stats.record_episode(-12.0, 14, true);
///
/// // Get statistics
/// println!("Mean reward: {}", stats.mean_episode_reward());
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f64>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Whether each episode ended on the goal (rolling window)
    episode_goals: VecDeque<bool>,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Sum of all episode rewards ever recorded
    total_reward: f64,

    /// Reward of the most recent episode
    last_reward: f64,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a new training statistics tracker
    ///
    /// # Arguments
    ///
    /// * `window_size` - Number of recent episodes to keep for rolling
    ///   averages
    ///
    /// # Example
    ///
    /// ```rust
    /// use warehouse_rl::metrics::TrainingStats;
    ///
    /// // Track last 100 episodes
    /// let stats = TrainingStats::new(100);
    /// ```
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_goals: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            total_reward: 0.0,
            last_reward: 0.0,
            window_size,
        }
    }

    /// Record the completion of an episode
    ///
    /// # Arguments
    ///
    /// * `reward` - Total reward accumulated during the episode
    /// * `length` - Number of steps taken in the episode
    /// * `reached_goal` - Whether the episode ended on the goal cell
    ///
    /// # Example
    ///
    /// ```rust
    /// use warehouse_rl::metrics::TrainingStats;
    ///
    /// let mut stats = TrainingStats::new(100);
    /// stats.record_episode(-12.0, 14, true);
    ///
    /// assert_eq!(stats.total_episodes(), 1);
    /// assert_eq!(stats.total_steps(), 14);
    /// ```
    pub fn record_episode(&mut self, reward: f64, length: usize, reached_goal: bool) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_goals, reached_goal, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        self.total_reward += reward;
        self.last_reward = reward;
    }

    /// Get the mean episode reward over the rolling window
    ///
    /// # Returns
    ///
    /// The average reward, or 0.0 if no episodes have been recorded
    pub fn mean_episode_reward(&self) -> f64 {
        self.mean(&self.episode_rewards)
    }

    /// Get the mean episode length over the rolling window
    ///
    /// # Returns
    ///
    /// The average episode length in steps
    pub fn mean_episode_length(&self) -> f64 {
        let sum: usize = self.episode_lengths.iter().sum();
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            sum as f64 / self.episode_lengths.len() as f64
        }
    }

    /// Get the fraction of episodes in the rolling window that ended on the
    /// goal
    ///
    /// # Returns
    ///
    /// A value in [0, 1], or 0.0 if no episodes have been recorded
    pub fn goal_rate(&self) -> f64 {
        if self.episode_goals.is_empty() {
            0.0
        } else {
            let reached = self.episode_goals.iter().filter(|&&g| g).count();
            reached as f64 / self.episode_goals.len() as f64
        }
    }

    /// Get the mean reward over every episode ever recorded
    ///
    /// Unlike [`mean_episode_reward`](Self::mean_episode_reward) this is not
    /// windowed.
    pub fn overall_mean_reward(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.total_reward / self.total_episodes as f64
        }
    }

    /// Get the reward of the most recent episode
    pub fn last_episode_reward(&self) -> f64 {
        self.last_reward
    }

    /// Get the total number of episodes completed
    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    /// Get the total number of environment steps taken
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Get the window size for rolling averages
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Format a summary of the current statistics
    ///
    /// # Returns
    ///
    /// A formatted string with key metrics
    ///
    /// # Example
    ///
    /// ```rust
    /// use warehouse_rl::metrics::TrainingStats;
    ///
    /// let mut stats = TrainingStats::new(100);
    /// stats.record_episode(-12.0, 14, true);
    ///
    /// println!("{}", stats.format_summary());
    /// // Output: Episodes: 1 | Steps: 14 | Reward: -12.00 | Goal: 100.0% | Len: 14.0
    /// ```
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Goal: {:.1}% | Len: {:.1}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.goal_rate() * 100.0,
            self.mean_episode_length(),
        )
    }

    /// Helper function to compute mean of a VecDeque<f64>
    fn mean(&self, deque: &VecDeque<f64>) -> f64 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<f64>() / deque.len() as f64
        }
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
