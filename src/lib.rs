//! Turn-based combat simulation for clone squads: PvE fights against a single mob and
//! ranked PvP brackets between squads, with Monte Carlo win-rate and reward estimates.

pub mod cli;
pub mod combat;
pub mod data;
pub mod error;
pub mod format;
pub mod parallel;

pub use error::{ConfigError, LoadError};
pub use format::format_number;
