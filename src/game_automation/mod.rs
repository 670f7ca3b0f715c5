// Game automation module
// Plays the pet dance minigame: watch for the arrow prompt, replay it,
// then click through the end-of-round menus.

pub mod fsm;
pub mod resources;
pub mod session;
pub mod types;
pub mod wait;


// Re-export the main types and functions for easy access
pub use fsm::DanceAutomation;
pub use resources::{RESOURCE_FILES, load_dance_templates};
pub use session::DanceSession;
pub use types::{Arrow, DanceOutcome, DancePlan, GameState, RoundEnd};
pub use wait::MatchWatcher;
