use crate::config::BotConfig;
use crate::game_automation::DancePlan;
use clap::Parser;
use std::path::PathBuf;

/// Dances the pet through the Wizard101 pet dance minigame.
///
/// Press `[` at any time to stop.
#[derive(Parser, Debug)]
#[command(
    name = "pet-dance-run",
    version = env!("DANCE_VERSION_DISPLAY"),
    long_version = concat!(env!("DANCE_VERSION_DISPLAY"), " (built ", env!("DANCE_BUILD_YEAR"), ")")
)]
pub struct Args {
    /// Number of rounds to play
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=99))]
    pub number: u32,

    /// Replayed prompts per round before bowing out
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(2..=5))]
    pub truncate: u8,

    /// Snack slot (1-5) to feed after each round; without it the pet goes unfed
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub snack: Option<u8>,

    /// Directory holding the template images
    #[arg(long, default_value = crate::config::DEFAULT_RESOURCES_DIR)]
    pub resources: PathBuf,

    /// Title of the game window
    #[arg(long, default_value = crate::config::DEFAULT_WINDOW_TITLE)]
    pub window: String,

    /// Enable debug output for automation
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    pub fn plan(&self) -> DancePlan {
        DancePlan {
            rounds: self.number,
            truncate: self.truncate as usize,
            snack: self.snack,
        }
    }

    /// Default config with the command line overrides applied
    pub fn config(&self) -> BotConfig {
        BotConfig {
            resources_dir: self.resources.clone(),
            window_title: self.window.clone(),
            ..BotConfig::default()
        }
    }
}
