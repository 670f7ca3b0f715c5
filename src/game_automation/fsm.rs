// Finite state machine that plays the pet dance game
use super::resources::{DANCE_GAME, ECKS, FEED_PET, FINISH, NEXT, PLAY, PLAY_AGAIN, WIZARD_CITY, arrow_names};
use super::session::DanceSession;
use super::types::{Arrow, DanceOutcome, DancePlan, GameState, RoundEnd};
use super::wait::MatchWatcher;
use crate::capture::{ScreenCapturer, ScreenSource};
use crate::config::BotConfig;
use crate::error::{BotError, BotResult};
use crate::geometry::Point;
use crate::input::{InputBackend, InputDriver, Key};
use crate::template_matching::{Match, Template, TemplateLibrary};
use std::time::Duration;
use tokio::time::sleep;

pub struct DanceAutomation<S, B> {
    state: GameState,
    watcher: MatchWatcher<S>,
    input: InputDriver<B>,
    library: TemplateLibrary,
    arrows: Vec<Template>,
    config: BotConfig,
    session: DanceSession,
    round_end: RoundEnd,
}

impl<S: ScreenSource, B: InputBackend> DanceAutomation<S, B> {
    pub fn new(
        capturer: ScreenCapturer<S>,
        input: B,
        library: TemplateLibrary,
        config: BotConfig,
        plan: DancePlan,
    ) -> BotResult<Self> {
        let round_end = RoundEnd::from_snack(plan.snack);
        if let RoundEnd::FeedSnack { slot } = round_end
            && config.snack_offset(slot).is_none()
        {
            return Err(BotError::SnackSlotOutOfRange {
                slot,
                available: config.snack_offsets.len(),
            });
        }

        // Every template the script touches must be loaded before the first round
        let arrows = library
            .select(&arrow_names())?
            .into_iter()
            .map(|arrow| arrow.with_search_area(config.prompt_area))
            .collect();
        library.select(&[WIZARD_CITY, PLAY, NEXT, ECKS, FEED_PET, PLAY_AGAIN, FINISH, DANCE_GAME])?;

        let timings = &config.timings;
        let watcher = MatchWatcher::new(
            capturer,
            config.confidence_threshold,
            timings.poll_interval,
            config.matcher_workers,
        );
        let input = InputDriver::new(input, timings.press_interval, timings.hold_interval);
        let session = DanceSession::new(config.initial_sequence_len, plan.truncate, plan.rounds);

        Ok(Self {
            state: GameState::Idle,
            watcher,
            input,
            library,
            arrows,
            config,
            session,
            round_end,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    fn change_state(&mut self, new_state: GameState) {
        if self.state != new_state {
            log::debug!("🎮 Dance state: {:?} -> {:?}", self.state, new_state);
            self.state = new_state;
        }
    }

    /// Play until the requested number of rounds is done or something fails
    pub async fn run(&mut self) -> BotResult<DanceOutcome> {
        log::info!(
            "🎮 Dancing {} round(s), round end: {:?}",
            self.session.rounds_target(),
            self.round_end
        );

        loop {
            if self.session.needs_navigation() {
                self.navigate().await?;
            }

            self.change_state(GameState::CapturingPrompt);
            let arrow = self.capture_arrow().await?;
            if self.session.record(arrow) {
                self.replay().await?;
            }

            if self.session.round_over() {
                self.end_round().await?;
                let done = self.session.finish_round();
                log::info!(
                    "🏁 Round {} of {} complete ({} frames captured so far)",
                    self.session.rounds_played(),
                    self.session.rounds_target(),
                    self.watcher.frames_captured()
                );
                if done {
                    self.change_state(GameState::Finished);
                    return Ok(DanceOutcome {
                        rounds_played: self.session.rounds_played(),
                        replays: self.session.replays(),
                    });
                }
            }

            sleep(self.config.timings.arrow_cooldown).await;
        }
    }

    /// Click through the menus into the minigame
    async fn navigate(&mut self) -> BotResult<()> {
        self.change_state(GameState::Navigating);
        let timeout = self.config.timings.menu_timeout;
        self.wait_and_click(&[WIZARD_CITY], timeout).await?;
        self.wait_and_click(&[PLAY], timeout).await?;

        // Keep the pointer from covering the prompt
        self.input.move_to(self.watcher.region().origin()).await?;
        self.session.mark_navigated();
        Ok(())
    }

    async fn capture_arrow(&mut self) -> BotResult<Arrow> {
        let timeout = self.config.timings.prompt_timeout;
        let found = self.watcher.wait(&self.arrows, timeout).await?;
        let arrow = Arrow::from_name(&found.name).ok_or_else(|| BotError::UnknownTemplate {
            name: found.name.clone(),
        })?;
        log::debug!(
            "⬆️ Arrow {} ({}/{})",
            arrow.name(),
            self.session.pending().len() + 1,
            self.session.target_len()
        );
        Ok(arrow)
    }

    async fn replay(&mut self) -> BotResult<()> {
        self.change_state(GameState::Replaying);
        let timings = &self.config.timings;
        let keys: Vec<Key> = self.session.pending().iter().map(|a| a.key()).collect();
        log::info!(
            "💃 Replaying {:?}",
            self.session.pending().iter().map(|a| a.name()).collect::<Vec<_>>()
        );

        sleep(timings.replay_settle).await;
        self.input.tap(&keys, timings.tap_interval).await?;
        sleep(timings.post_replay_settle).await;
        self.session.complete_replay();
        Ok(())
    }

    /// Skip the results animation, close any level-up popup, then run the chosen round end
    async fn end_round(&mut self) -> BotResult<()> {
        self.change_state(GameState::RoundEnding);
        let timings = self.config.timings.clone();

        let hold = self.input.hold(Key::ArrowUp);
        let first = self.wait_and_click(&[NEXT, ECKS], timings.round_end_timeout).await;
        let stopped = hold.stop().await;
        let first = first?;
        stopped?;

        let levelled_up = first.name == ECKS;
        if levelled_up {
            log::info!("⭐ Pet levelled up");
            self.wait_and_click(&[NEXT], timings.menu_timeout).await?;
        }

        match self.round_end {
            RoundEnd::FeedSnack { slot } => {
                self.feed_snack(slot, levelled_up).await?;
            }
            RoundEnd::SkipSnack => {
                self.wait_and_click(&[FINISH], timings.menu_timeout).await?;
                self.wait_for(&[DANCE_GAME], timings.menu_timeout).await?;
                self.input.tap(&[Key::Char('x')], Duration::ZERO).await?;
            }
        }
        Ok(())
    }

    async fn feed_snack(&mut self, slot: u8, levelled_up: bool) -> BotResult<()> {
        let timings = self.config.timings.clone();
        let offset = self
            .config
            .snack_offset(slot)
            .ok_or(BotError::SnackSlotOutOfRange {
                slot,
                available: self.config.snack_offsets.len(),
            })?;

        log::info!("🍪 Feeding snack #{}", slot);
        let target = self.watcher.region().to_screen(offset);
        self.input.click(target, timings.snack_click_delay).await?;
        self.wait_and_click(&[FEED_PET], timings.menu_timeout).await?;

        // Feeding can level the pet up too
        if !levelled_up {
            let ecks = self.library.select(&[ECKS])?;
            if let Some(found) = self.watcher.probe(&ecks, timings.level_up_probe).await? {
                log::info!("⭐ Pet levelled up after feeding");
                self.click_match(&found).await?;
            }
        }

        self.wait_and_click(&[PLAY_AGAIN], timings.menu_timeout).await?;
        Ok(())
    }

    async fn wait_for(&mut self, names: &[&str], timeout: Option<Duration>) -> BotResult<Match> {
        let templates = self.library.select(names)?;
        self.watcher.wait(&templates, timeout).await
    }

    async fn wait_and_click(&mut self, names: &[&str], timeout: Option<Duration>) -> BotResult<Match> {
        let found = self.wait_for(names, timeout).await?;
        self.click_match(&found).await?;
        Ok(found)
    }

    async fn click_match(&self, found: &Match) -> BotResult<()> {
        let target: Point = self.watcher.region().to_screen(found.center);
        log::debug!("👆 Clicking {}", found);
        self.input.click(target, self.config.timings.click_delay).await
    }
}
