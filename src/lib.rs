pub mod args;
pub mod capture;
pub mod config;
#[cfg(windows)]
pub mod desktop;
pub mod error;
pub mod game_automation;
pub mod geometry;
pub mod input;
pub mod template_matching;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{BotError, BotResult};
