// Input module - synthetic mouse and keyboard events
// The driver owns the timing between events; backends only emit them.

pub mod driver;

use crate::error::BotResult;
use crate::geometry::Point;

pub use driver::{HoldHandle, InputDriver};

/// Keys the bot ever presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// OS-level event injection (desktop) or recording (tests)
pub trait InputBackend: Send + 'static {
    /// Move the pointer to an absolute screen position
    fn move_to(&mut self, point: Point) -> BotResult<()>;
    /// Press or release the left mouse button
    fn mouse_button(&mut self, state: KeyState) -> BotResult<()>;
    fn key(&mut self, key: Key, state: KeyState) -> BotResult<()>;
}
