// Wait-for-match loop: poll capture + matching until a template shows up
use crate::capture::{ScreenCapturer, ScreenSource};
use crate::error::{BotError, BotResult};
use crate::geometry::Region;
use crate::template_matching::{Match, Template, match_all};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Polls the screen for templates on a fixed interval
pub struct MatchWatcher<S> {
    capturer: ScreenCapturer<S>,
    threshold: f32,
    poll_interval: Duration,
    workers: usize,
}

impl<S: ScreenSource> MatchWatcher<S> {
    pub fn new(capturer: ScreenCapturer<S>, threshold: f32, poll_interval: Duration, workers: usize) -> Self {
        Self {
            capturer,
            threshold,
            poll_interval,
            workers,
        }
    }

    pub fn region(&self) -> Region {
        self.capturer.region()
    }

    pub fn frames_captured(&self) -> u64 {
        self.capturer.frame_count()
    }

    /// One tick: capture a frame and return the first template (input order) at or above the threshold
    pub async fn poll_once(&mut self, templates: &[Template]) -> BotResult<Option<Match>> {
        let frame = Arc::new(self.capturer.screenshot()?);
        let matches = match_all(frame, templates, self.workers).await?;

        for m in &matches {
            log::trace!("  {}", m);
        }
        Ok(matches.into_iter().find(|m| m.is_confident(self.threshold)))
    }

    /// Block until one of `templates` is on screen.
    ///
    /// `on_waiting` runs after every miss with the number of misses so far,
    /// `on_match` once with the winning match. `None` for `timeout` polls forever.
    /// The timeout is only checked between polls.
    pub async fn wait_with<W, M>(
        &mut self,
        templates: &[Template],
        timeout: Option<Duration>,
        mut on_waiting: W,
        on_match: M,
    ) -> BotResult<Match>
    where
        W: FnMut(u32),
        M: FnOnce(&Match),
    {
        let started = Instant::now();
        let mut misses = 0u32;

        loop {
            if let Some(found) = self.poll_once(templates).await? {
                log::debug!("🎯 {} after {} misses", found, misses);
                on_match(&found);
                return Ok(found);
            }

            misses += 1;
            on_waiting(misses);

            if let Some(limit) = timeout
                && started.elapsed() >= limit
            {
                return Err(BotError::Timeout {
                    duration: limit,
                    templates: templates.iter().map(|t| t.name().to_string()).collect(),
                });
            }

            sleep(self.poll_interval).await;
        }
    }

    pub async fn wait(&mut self, templates: &[Template], timeout: Option<Duration>) -> BotResult<Match> {
        self.wait_with(templates, timeout, |_| {}, |_| {}).await
    }

    /// Like `wait`, but running out of time is an expected outcome
    pub async fn probe(&mut self, templates: &[Template], timeout: Duration) -> BotResult<Option<Match>> {
        match self.wait(templates, Some(timeout)).await {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.is_timeout() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
