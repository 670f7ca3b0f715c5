// Types and enums for the dance game automation
use crate::input::Key;

/// One of the four prompt arrows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    /// Match order for prompt detection
    pub const ALL: [Arrow; 4] = [Arrow::Up, Arrow::Down, Arrow::Left, Arrow::Right];

    /// Template name of this arrow
    pub fn name(self) -> &'static str {
        match self {
            Arrow::Up => "up",
            Arrow::Down => "down",
            Arrow::Left => "left",
            Arrow::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn key(self) -> Key {
        match self {
            Arrow::Up => Key::ArrowUp,
            Arrow::Down => Key::ArrowDown,
            Arrow::Left => Key::ArrowLeft,
            Arrow::Right => Key::ArrowRight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Navigating,
    CapturingPrompt,
    Replaying,
    RoundEnding,
    Finished,
}

/// How a round is closed out once the last prompt has been replayed.
///
/// The two menu flows differ after the results screen, so they stay separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// Feed the snack in this 1-indexed slot, then play again
    FeedSnack { slot: u8 },
    /// Finish without feeding and reopen the game from its menu
    SkipSnack,
}

impl RoundEnd {
    pub fn from_snack(slot: Option<u8>) -> Self {
        match slot {
            Some(slot) => RoundEnd::FeedSnack { slot },
            None => RoundEnd::SkipSnack,
        }
    }
}

/// What the user asked for on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DancePlan {
    /// Rounds to play before exiting (1..=99)
    pub rounds: u32,
    /// Prompts per round before it is cut short (2..=5)
    pub truncate: usize,
    pub snack: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanceOutcome {
    pub rounds_played: u32,
    pub replays: u32,
}
