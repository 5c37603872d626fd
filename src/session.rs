//! Game loop driver
//!
//! Platform-independent half of the frame loop: fixed-step accumulation,
//! held keys, event handling, advisory bookkeeping, display settings and best
//! score. The host (browser or native) feeds it frame deltas and key events,
//! draws the frame it returns, fulfils advisory tickets and persists settings
//! changes.

use crate::advice::{AdviceBoard, AdviceError, AdviceTicket};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::platform::{HeldKeys, Key};
use crate::renderer::{Frame, project};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Viewport, tick};
use crate::ui::Hud;

/// Seed for the run after `seed` (PCG-style LCG step)
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

/// One play session: a sequence of runs sharing a best score
pub struct Session {
    state: GameState,
    keys: HeldKeys,
    accumulator: f32,
    running: bool,
    advice: AdviceBoard,
    pending_advice: Vec<AdviceTicket>,
    best_score: u64,
    settings: Settings,
    settings_changed: bool,
}

impl Session {
    /// New session on the title screen with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        log::info!(
            "Session created (seed {}, {} quality)",
            seed,
            settings.quality.as_str()
        );
        Self {
            state: GameState::new(seed),
            keys: HeldKeys::default(),
            accumulator: 0.0,
            running: true,
            advice: AdviceBoard::new(),
            pending_advice: Vec::new(),
            best_score: 0,
            settings,
            settings_changed: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn advice_text(&self) -> &str {
        self.advice.text()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// True once after a key changed the settings; the host saves them then
    pub fn take_settings_changed(&mut self) -> bool {
        std::mem::take(&mut self.settings_changed)
    }

    /// Key pressed. Restart and the settings keys act once per physical press.
    pub fn key_down(&mut self, key: Key) {
        if !self.running {
            return;
        }
        if !self.keys.press(key) {
            return;
        }
        match key {
            Key::Restart => match self.state.phase {
                GamePhase::NotStarted => self.state.start(),
                GamePhase::GameOver => self.restart(next_seed(self.state.seed)),
                GamePhase::Playing | GamePhase::LevelTransition { .. } => {}
            },
            Key::ToggleGrid => {
                self.settings.elevation_grid = !self.settings.elevation_grid;
                self.settings_changed = true;
                log::info!("Elevation grid: {}", self.settings.elevation_grid);
            }
            Key::CycleQuality => {
                self.settings.quality = self.settings.quality.next();
                self.settings_changed = true;
                log::info!("Quality: {}", self.settings.quality.as_str());
            }
            Key::Up | Key::Down | Key::Left | Key::Right | Key::Smoke => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    /// Replace the run with a fresh, started level 1. Pending level
    /// transitions, cooldowns and advisory requests die with the old state.
    pub fn restart(&mut self, seed: u64) {
        self.state = GameState::new(seed);
        self.state.start();
        self.accumulator = 0.0;
        self.running = true;
        self.advice.invalidate();
        self.pending_advice.clear();
        log::info!("Restarted with seed {}", seed);
    }

    /// Halt the loop: keys released, in-flight advice discarded
    pub fn stop(&mut self) {
        self.running = false;
        self.keys.release_all();
        self.accumulator = 0.0;
        self.advice.invalidate();
        self.pending_advice.clear();
        log::info!("Session stopped");
    }

    /// Continue after `stop` with the same state
    pub fn resume(&mut self) {
        if !self.running {
            self.running = true;
            log::info!("Session resumed");
        }
    }

    /// Advance by a frame delta in seconds. Returns the number of ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.keys.tick_input();
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.handle_events();
        }
        substeps
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            log::debug!("{:?}", event);
            match event {
                GameEvent::LevelStarted { level, .. } if level >= 2 => {
                    let ticket = self.advice.request(level);
                    self.pending_advice.push(ticket);
                }
                GameEvent::LevelCleared { level } => {
                    log::info!("Level {} cleared, score {}", level, self.state.player.score);
                }
                GameEvent::GameOver { .. } => {
                    if self.state.player.score > self.best_score {
                        self.best_score = self.state.player.score;
                        log::info!("New best score: {}", self.best_score);
                    }
                }
                _ => {}
            }
        }
    }

    /// Advisory requests the host should fulfil
    pub fn take_advice_requests(&mut self) -> Vec<AdviceTicket> {
        std::mem::take(&mut self.pending_advice)
    }

    /// Hand back a fulfilled (or failed) request. Returns true if the text changed.
    pub fn deliver_advice(
        &mut self,
        ticket: AdviceTicket,
        result: Result<String, AdviceError>,
    ) -> bool {
        self.advice.deliver(ticket, result)
    }

    pub fn frame(&self, viewport: Viewport) -> Frame {
        project(&self.state, viewport, &self.settings)
    }

    pub fn hud(&self) -> Hud {
        Hud::snapshot(&self.state, self.advice.text(), self.best_score)
    }
}
