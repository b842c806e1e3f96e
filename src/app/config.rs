//! Configuration types for brains and learning players.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, tictactoe::Player};

/// Default location of the value table, used for both input and output
pub const DEFAULT_TRAINING_FILE: &str = "trainingdata.json";

/// Reward paid to one side for each game outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    pub win: f64,
    pub loss: f64,
    pub draw: f64,
}

impl Rewards {
    pub fn new(win: f64, loss: f64, draw: f64) -> Self {
        Self { win, loss, draw }
    }

    fn validate(&self, side: Player) -> Result<()> {
        for (outcome, value) in [("win", self.win), ("loss", self.loss), ("draw", self.draw)] {
            if !value.is_finite() {
                return Err(Error::InvalidConfiguration {
                    message: format!("{side} {outcome} reward must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Rewards for both sides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardSchedule {
    pub o: Rewards,
    pub x: Rewards,
}

impl RewardSchedule {
    pub fn for_player(&self, player: Player) -> Rewards {
        match player {
            Player::O => self.o,
            Player::X => self.x,
        }
    }
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            o: Rewards::new(1.0, 0.0, 0.1),
            x: Rewards::new(1.0, 0.0, 0.5),
        }
    }
}

/// Parameters of learning players.
///
/// # Examples
///
/// ```
/// use oxlearn::app::{LearningConfig, Rewards};
///
/// let config = LearningConfig::default()
///     .with_exploration_rate(0.1)
///     .with_o_rewards(Rewards::new(1.0, -1.0, 0.0));
/// config.validate()?;
/// # Ok::<(), oxlearn::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Probability of playing a uniformly random legal move
    pub exploration_rate: f64,
    /// Step size of each value update
    pub learn_rate: f64,
    /// Discount applied to the target of each update
    pub decay_rate: f64,
    pub rewards: RewardSchedule,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            exploration_rate: 0.3,
            learn_rate: 0.2,
            decay_rate: 0.9,
            rewards: RewardSchedule::default(),
        }
    }
}

impl LearningConfig {
    pub fn with_exploration_rate(mut self, rate: f64) -> Self {
        self.exploration_rate = rate;
        self
    }

    pub fn with_learn_rate(mut self, rate: f64) -> Self {
        self.learn_rate = rate;
        self
    }

    pub fn with_decay_rate(mut self, rate: f64) -> Self {
        self.decay_rate = rate;
        self
    }

    pub fn with_o_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards.o = rewards;
        self
    }

    pub fn with_x_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards.x = rewards;
        self
    }

    /// Check that every rate lies in `[0, 1]` and every reward is finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("exploration rate", self.exploration_rate),
            ("learn rate", self.learn_rate),
            ("decay rate", self.decay_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {rate}"),
                });
            }
        }
        self.rewards.o.validate(Player::O)?;
        self.rewards.x.validate(Player::X)
    }
}

/// Where a brain reads its value table from and saves it to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl BrainConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TRAINING_FILE, DEFAULT_TRAINING_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = LearningConfig::default();
        assert_eq!(config.exploration_rate, 0.3);
        assert_eq!(config.learn_rate, 0.2);
        assert_eq!(config.decay_rate, 0.9);
        assert_eq!(config.rewards.for_player(Player::O), Rewards::new(1.0, 0.0, 0.1));
        assert_eq!(config.rewards.for_player(Player::X), Rewards::new(1.0, 0.0, 0.5));
        assert!(config.validate().is_ok());

        let paths = BrainConfig::default();
        assert_eq!(paths.input, PathBuf::from("trainingdata.json"));
        assert_eq!(paths.output, paths.input);
    }

    #[test]
    fn rates_outside_unit_interval_are_rejected() {
        for config in [
            LearningConfig::default().with_exploration_rate(1.5),
            LearningConfig::default().with_learn_rate(-0.1),
            LearningConfig::default().with_decay_rate(f64::NAN),
        ] {
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn boundary_rates_are_accepted() {
        let config = LearningConfig::default()
            .with_exploration_rate(0.0)
            .with_learn_rate(1.0)
            .with_decay_rate(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_finite_rewards_are_rejected() {
        let config =
            LearningConfig::default().with_x_rewards(Rewards::new(f64::INFINITY, 0.0, 0.5));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("X win reward"));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = LearningConfig::default().with_learn_rate(0.05);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: LearningConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
