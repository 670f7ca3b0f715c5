use crate::error::{BotError, BotResult};
use crate::geometry::Point;
use crate::input::{InputBackend, Key, KeyState};
use enigo::{Button, Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};

/// OS input through enigo
pub struct EnigoInput {
    enigo: Enigo,
}

fn input_failed(e: impl std::fmt::Display) -> BotError {
    BotError::InputFailed {
        description: e.to_string(),
    }
}

fn direction(state: KeyState) -> Direction {
    match state {
        KeyState::Pressed => Direction::Press,
        KeyState::Released => Direction::Release,
    }
}

impl EnigoInput {
    pub fn new() -> BotResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(input_failed)?;
        Ok(Self { enigo })
    }
}

impl InputBackend for EnigoInput {
    fn move_to(&mut self, point: Point) -> BotResult<()> {
        self.enigo
            .move_mouse(point.x, point.y, Coordinate::Abs)
            .map_err(input_failed)
    }

    fn mouse_button(&mut self, state: KeyState) -> BotResult<()> {
        self.enigo
            .button(Button::Left, direction(state))
            .map_err(input_failed)
    }

    fn key(&mut self, key: Key, state: KeyState) -> BotResult<()> {
        let key = match key {
            Key::ArrowUp => enigo::Key::UpArrow,
            Key::ArrowDown => enigo::Key::DownArrow,
            Key::ArrowLeft => enigo::Key::LeftArrow,
            Key::ArrowRight => enigo::Key::RightArrow,
            Key::Char(c) => enigo::Key::Unicode(c),
        };
        self.enigo.key(key, direction(state)).map_err(input_failed)
    }
}
