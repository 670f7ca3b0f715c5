use super::{InputBackend, Key, KeyState};
use crate::error::{BotError, BotResult};
use crate::geometry::Point;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Clicks, taps and background key spam over a shared input backend.
pub struct InputDriver<B> {
    backend: Arc<Mutex<B>>,
    press_interval: Duration,
    hold_interval: Duration,
}

impl<B: InputBackend> InputDriver<B> {
    /// `press_interval` separates mouse press from release; `hold_interval`
    /// is the period of a held key's repeats.
    pub fn new(backend: B, press_interval: Duration, hold_interval: Duration) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
            press_interval,
            hold_interval,
        }
    }

    pub async fn move_to(&self, point: Point) -> BotResult<()> {
        self.backend.lock().await.move_to(point)
    }

    /// Move to `point`, wait `delay`, then press and release the left button
    pub async fn click(&self, point: Point, delay: Duration) -> BotResult<()> {
        log::debug!("🖱️ Click at ({}, {})", point.x, point.y);
        self.move_to(point).await?;
        sleep(delay).await;
        self.backend.lock().await.mouse_button(KeyState::Pressed)?;
        sleep(self.press_interval).await;
        self.backend.lock().await.mouse_button(KeyState::Released)
    }

    /// Press and release each key in order, waiting `delay` after each
    pub async fn tap(&self, keys: &[Key], delay: Duration) -> BotResult<()> {
        for &key in keys {
            {
                let mut backend = self.backend.lock().await;
                backend.key(key, KeyState::Pressed)?;
                backend.key(key, KeyState::Released)?;
            }
            sleep(delay).await;
        }
        Ok(())
    }

    /// Start tapping `key` in the background until the returned handle is stopped or dropped.
    pub fn hold(&self, key: Key) -> HoldHandle {
        let backend = Arc::clone(&self.backend);
        let interval = self.hold_interval;
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut taps = 0u64;
            loop {
                {
                    let mut backend = backend.lock().await;
                    backend.key(key, KeyState::Pressed)?;
                    backend.key(key, KeyState::Released)?;
                }
                taps += 1;

                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = sleep(interval) => {}
                }
            }
            log::debug!("⌨️ Released {:?} after {} taps", key, taps);
            Ok::<_, BotError>(taps)
        });

        log::debug!("⌨️ Holding {:?}", key);
        HoldHandle {
            stop: Some(stop_tx),
            task,
        }
    }
}

/// Cancellation handle for a background key hold
pub struct HoldHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<BotResult<u64>>,
}

impl HoldHandle {
    /// Signal the hold task to stop and wait for it, returning how many taps it sent
    pub async fn stop(mut self) -> BotResult<u64> {
        if let Some(stop) = self.stop.take() {
            // The task may already have exited on a backend error
            let _ = stop.send(());
        }
        self.task.await?
    }
}
