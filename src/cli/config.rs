//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    agents::AgentKind,
    app::{BrainConfig, DEFAULT_TRAINING_FILE, LearningConfig, RewardSchedule, Rewards},
};

/// Minimum level written to the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "oxlearn")]
#[command(
    version,
    about = "Simple machine learning tic tac toe program",
    allow_negative_numbers = true
)]
pub struct Args {
    /// Training mode: two learning players play this many games against
    /// each other, overriding --player-o and --player-x
    #[arg(long, value_name = "GAMES")]
    pub training: Option<usize>,

    /// Player O, who always goes first
    #[arg(long, value_enum, default_value_t = AgentKind::Human)]
    pub player_o: AgentKind,

    /// Player X, who always goes second
    #[arg(long, value_enum, default_value_t = AgentKind::Trained)]
    pub player_x: AgentKind,

    /// Seed for random number generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Append the log to this file instead of stderr
    #[arg(long, alias = "logfile")]
    pub log_file: Option<PathBuf>,

    /// Minimum level to log (RUST_LOG overrides)
    #[arg(
        long,
        alias = "loglevel",
        value_enum,
        ignore_case = true,
        default_value_t = LogLevel::Warn
    )]
    pub log_level: LogLevel,

    /// Value table to start from
    #[arg(long, default_value = DEFAULT_TRAINING_FILE)]
    pub training_input: PathBuf,

    /// Where to save the value table
    #[arg(long, default_value = DEFAULT_TRAINING_FILE)]
    pub training_output: PathBuf,

    /// How often a learning player tries a random move (0-1)
    #[arg(long, default_value_t = 0.3)]
    pub exploration_rate: f64,

    /// Weight given to each update at learn time (0-1)
    #[arg(long, alias = "learn_rate", default_value_t = 0.2)]
    pub learn_rate: f64,

    /// How much moves further back in a game count when learning (0-1)
    #[arg(long, alias = "decay_rate", default_value_t = 0.9)]
    pub decay_rate: f64,

    /// Reward for player O on a win
    #[arg(long, default_value_t = 1.0)]
    pub o_reward_win: f64,

    /// Reward for player O on a loss
    #[arg(long, default_value_t = 0.0)]
    pub o_reward_loss: f64,

    /// Reward for player O on a draw
    #[arg(long, default_value_t = 0.1)]
    pub o_reward_draw: f64,

    /// Reward for player X on a win
    #[arg(long, default_value_t = 1.0)]
    pub x_reward_win: f64,

    /// Reward for player X on a loss
    #[arg(long, default_value_t = 0.0)]
    pub x_reward_loss: f64,

    /// Reward for player X on a draw
    #[arg(long, default_value_t = 0.5)]
    pub x_reward_draw: f64,
}

impl Args {
    pub fn learning_config(&self) -> LearningConfig {
        LearningConfig {
            exploration_rate: self.exploration_rate,
            learn_rate: self.learn_rate,
            decay_rate: self.decay_rate,
            rewards: RewardSchedule {
                o: Rewards::new(self.o_reward_win, self.o_reward_loss, self.o_reward_draw),
                x: Rewards::new(self.x_reward_win, self.x_reward_loss, self.x_reward_draw),
            },
        }
    }

    pub fn brain_config(&self) -> BrainConfig {
        BrainConfig::new(&self.training_input, &self.training_output)
    }

    /// Whether the session ends by saving the brain
    pub fn saves_brain(&self) -> bool {
        self.training.is_some() || self.player_o.learns() || self.player_x.learns()
    }
}
