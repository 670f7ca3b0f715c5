//! Configuration for the dance bot: thresholds, resource locations and timings

use crate::geometry::{Point, RelativeArea};
use std::path::PathBuf;
use std::time::Duration;

/// Title of the game client window
pub const DEFAULT_WINDOW_TITLE: &str = "Wizard101";
/// Directory holding the template PNGs
pub const DEFAULT_RESOURCES_DIR: &str = "resources";

/// Client-local positions of the five snack slots on the feed screen
pub const SNACK_OFFSETS: [Point; 5] = [
    Point::new(219, 430),
    Point::new(309, 430),
    Point::new(399, 430),
    Point::new(492, 430),
    Point::new(584, 430),
];

/// Where the arrow prompt is drawn: the middle band of the client, top 70%
pub const PROMPT_AREA: RelativeArea = RelativeArea::new(0.15, 0.0, 0.7, 0.7);

/// Every delay and timeout the driver uses.
#[derive(Debug, Clone)]
pub struct Timings {
    /// Sleep between polls of a wait
    pub poll_interval: Duration,
    /// Gap between press and release of a mouse click
    pub press_interval: Duration,
    /// Pause after moving the cursor onto a matched button
    pub click_delay: Duration,
    /// Pause after moving the cursor onto a snack slot
    pub snack_click_delay: Duration,
    /// Pause after each replayed key
    pub tap_interval: Duration,
    /// Period of the background key spam
    pub hold_interval: Duration,
    /// Pause after each captured arrow so it is not counted twice
    pub arrow_cooldown: Duration,
    /// Wait for the prompt animation to finish before replaying
    pub replay_settle: Duration,
    /// Wait for the replay animation to finish after replaying
    pub post_replay_settle: Duration,
    /// Timeout for menu buttons during navigation and round end
    pub menu_timeout: Option<Duration>,
    /// Timeout for the post-game `next`/`ecks` wait
    pub round_end_timeout: Option<Duration>,
    /// How long to look for a level-up popup after feeding
    pub level_up_probe: Duration,
    /// Timeout for the next arrow of a prompt
    pub prompt_timeout: Option<Duration>,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            press_interval: Duration::from_millis(100),
            click_delay: Duration::from_millis(300),
            snack_click_delay: Duration::from_millis(100),
            tap_interval: Duration::from_millis(50),
            hold_interval: Duration::from_millis(100),
            arrow_cooldown: Duration::from_millis(500),
            replay_settle: Duration::from_millis(500),
            post_replay_settle: Duration::from_secs(1),
            menu_timeout: Some(Duration::from_secs(15)),
            round_end_timeout: Some(Duration::from_secs(30)),
            level_up_probe: Duration::from_secs(1),
            prompt_timeout: Some(Duration::from_secs(30)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Confidence a match needs to count (0.0 to 1.0)
    pub confidence_threshold: f32,
    /// Upper bound on concurrent template matches per frame
    pub matcher_workers: usize,
    /// Length of the first prompt of a round
    pub initial_sequence_len: usize,
    /// Part of the client searched for arrows; `None` searches the whole frame
    pub prompt_area: Option<RelativeArea>,
    pub resources_dir: PathBuf,
    pub window_title: String,
    pub snack_offsets: Vec<Point>,
    pub timings: Timings,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.8,
            matcher_workers: 2,
            initial_sequence_len: 3,
            prompt_area: Some(PROMPT_AREA),
            resources_dir: PathBuf::from(DEFAULT_RESOURCES_DIR),
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            snack_offsets: SNACK_OFFSETS.to_vec(),
            timings: Timings::default(),
        }
    }
}

impl BotConfig {
    /// Client-local offset of a 1-indexed snack slot
    pub fn snack_offset(&self, slot: u8) -> Option<Point> {
        (slot as usize)
            .checked_sub(1)
            .and_then(|idx| self.snack_offsets.get(idx))
            .copied()
    }
}
