// In-memory screen and input backends for driving the bot without a display
use crate::capture::ScreenSource;
use crate::error::{BotError, BotResult};
use crate::geometry::{Point, Region};
use crate::input::{InputBackend, Key, KeyState};
use image::GrayImage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Plays back queued frames, then repeats `fallback` forever
#[derive(Clone)]
pub struct ScriptedScreen {
    inner: Arc<Mutex<ScreenScript>>,
}

struct ScreenScript {
    frames: VecDeque<GrayImage>,
    fallback: GrayImage,
    captures: usize,
}

impl ScriptedScreen {
    pub fn new(fallback: GrayImage) -> Self {
        Self::with_frames(Vec::new(), fallback)
    }

    pub fn with_frames(frames: Vec<GrayImage>, fallback: GrayImage) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ScreenScript {
                frames: frames.into(),
                fallback,
                captures: 0,
            })),
        }
    }

    pub fn captures(&self) -> usize {
        self.inner.lock().unwrap().captures
    }

    pub fn remaining(&self) -> usize {
        self.inner.lock().unwrap().frames.len()
    }
}

impl ScreenSource for ScriptedScreen {
    fn capture(&self, _region: &Region) -> BotResult<GrayImage> {
        let mut script = self.inner.lock().unwrap();
        script.captures += 1;
        let frame = match script.frames.pop_front() {
            Some(frame) => frame,
            None => script.fallback.clone(),
        };
        Ok(frame)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Move(Point),
    Mouse(KeyState),
    Key(Key, KeyState),
}

/// Records every event; can be told to fail moves or key presses
#[derive(Clone, Default)]
pub struct RecordingInput {
    inner: Arc<Mutex<Recording>>,
}

#[derive(Default)]
struct Recording {
    events: Vec<InputEvent>,
    fail_moves: bool,
    fail_keys: bool,
}

impl RecordingInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_moves(&self) {
        self.inner.lock().unwrap().fail_moves = true;
    }

    pub fn fail_keys(&self) {
        self.inner.lock().unwrap().fail_keys = true;
    }

    pub fn events(&self) -> Vec<InputEvent> {
        self.inner.lock().unwrap().events.clone()
    }

    /// Pointer destinations, in order
    pub fn moves(&self) -> Vec<Point> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                InputEvent::Move(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Keys that were pressed, in order
    pub fn taps(&self) -> Vec<Key> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                InputEvent::Key(k, KeyState::Pressed) => Some(k),
                _ => None,
            })
            .collect()
    }

    pub fn clicks(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == InputEvent::Mouse(KeyState::Released))
            .count()
    }
}

impl InputBackend for RecordingInput {
    fn move_to(&mut self, point: Point) -> BotResult<()> {
        let mut rec = self.inner.lock().unwrap();
        if rec.fail_moves {
            return Err(BotError::InputFailed {
                description: "pointer unavailable".to_string(),
            });
        }
        rec.events.push(InputEvent::Move(point));
        Ok(())
    }

    fn mouse_button(&mut self, state: KeyState) -> BotResult<()> {
        self.inner.lock().unwrap().events.push(InputEvent::Mouse(state));
        Ok(())
    }

    fn key(&mut self, key: Key, state: KeyState) -> BotResult<()> {
        let mut rec = self.inner.lock().unwrap();
        if rec.fail_keys {
            return Err(BotError::InputFailed {
                description: "keyboard unavailable".to_string(),
            });
        }
        rec.events.push(InputEvent::Key(key, state));
        Ok(())
    }
}
