//! Game session controller
//!
//! `Session` is the single owner of everything mutable: the rules state, the
//! death explosion, the best scores, the settings and both drivers. The UI
//! layer feeds it commands and clock timestamps, then reads observations and
//! drains events.

use crate::highscores::HighScores;
use crate::platform::Command;
use crate::settings::Settings;
use crate::sim::{
    Direction, Explosion, Flow, FrameStatus, GameEvent, GameLoop, GamePhase, GameState, Mode,
    Particle, Scheduler, TickOutcome, tick,
};

/// Rules state plus everything a death sets in motion
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub explosion: Explosion,
    pub best: HighScores,
    /// Explosion finished; the game-over overlay may show
    pub game_over_ready: bool,
}

impl Game {
    pub fn new(state: GameState, best: HighScores) -> Self {
        let bounds = crate::canvas_size(state.grid.cols, state.grid.rows);
        Self {
            state,
            explosion: Explosion::new(bounds),
            best,
            game_over_ready: false,
        }
    }

    /// Side effects of the running -> dead transition
    fn on_death(&mut self) -> Flow {
        let mode = self.state.mode;
        let score = self.state.score;
        if self.best.record(mode, score) {
            log::info!("New {} best: {}", mode.as_str(), score);
            self.state.events.push(GameEvent::NewBest { mode, score });
            self.best.save();
        }

        let count = self
            .explosion
            .ignite(self.state.snake.iter(), &mut self.state.rng);
        if count == 0 {
            self.finish_explosion();
            return Flow::Stop;
        }
        Flow::Handoff
    }

    fn finish_explosion(&mut self) {
        self.game_over_ready = true;
        self.state.events.push(GameEvent::GameOverReady);
    }

    /// Drop the explosion and any game-over overlay
    fn clear_effects(&mut self) {
        self.explosion.clear();
        self.game_over_ready = false;
    }
}

impl GameLoop for Game {
    fn tick(&mut self) -> Flow {
        match tick(&mut self.state) {
            TickOutcome::Moved | TickOutcome::Ate(_) => Flow::Continue,
            TickOutcome::Died(_) => self.on_death(),
            // The driver keeps its rhythm across a pause
            TickOutcome::Skipped if self.state.phase == GamePhase::Paused => Flow::Continue,
            TickOutcome::Skipped => Flow::Stop,
        }
    }

    fn advance_frame(&mut self) -> Flow {
        match self.explosion.advance_frame() {
            FrameStatus::Burning(live) => {
                self.state.events.push(GameEvent::ExplosionFrame { live });
                Flow::Continue
            }
            FrameStatus::Spent => {
                self.state.events.push(GameEvent::ExplosionFrame { live: 0 });
                self.finish_explosion();
                Flow::Stop
            }
            FrameStatus::Idle => Flow::Stop,
        }
    }
}

/// One player's game in one mode, with its drivers
#[derive(Debug, Clone)]
pub struct Session {
    game: Game,
    scheduler: Scheduler,
    settings: Settings,
    /// Clock time of the last pump
    last_pump: Option<f64>,
    /// Time spent running (not idle, paused or dead)
    play_time_ms: f64,
}

impl Session {
    pub fn new(mode: Mode, seed: u64, settings: Settings, best: HighScores) -> Self {
        log::info!("New {} session with seed {}", mode.as_str(), seed);
        Self {
            game: Game::new(GameState::new(mode, seed), best),
            scheduler: Scheduler::default(),
            settings,
            last_pump: None,
            play_time_ms: 0.0,
        }
    }

    // === Commands ===

    /// Apply a player command at clock time `now`
    pub fn command(&mut self, cmd: Command, now: f64) {
        match cmd {
            Command::Start => {
                self.start(now);
            }
            Command::TogglePause => {
                self.toggle_pause(now);
            }
            Command::Steer(dir) => {
                self.steer(dir, now);
            }
            Command::Restart => self.restart(),
            Command::ToggleMute => {
                self.toggle_mute();
            }
        }
    }

    /// Any key or tap. While dead this restarts and starts right away;
    /// otherwise the mapped command (if any) is applied. Muting works in
    /// every phase.
    pub fn press(&mut self, cmd: Option<Command>, now: f64) {
        if cmd == Some(Command::ToggleMute) {
            self.toggle_mute();
            return;
        }
        if self.phase() == GamePhase::Dead {
            self.restart();
            self.start(now);
            return;
        }
        if let Some(cmd) = cmd {
            self.command(cmd, now);
        }
    }

    /// idle -> running, starting the tick driver
    pub fn start(&mut self, now: f64) -> bool {
        if !self.game.state.start() {
            return false;
        }
        self.last_pump = Some(now);
        self.scheduler.frames.cancel();
        self.game.clear_effects();
        self.scheduler.ticks.start(now, self.settings.tick_ms);
        log::info!("Game started ({} ms ticks)", self.settings.tick_ms);
        true
    }

    /// running <-> paused. Play time is settled up to `now` either way, so
    /// the pause never counts.
    pub fn toggle_pause(&mut self, now: f64) -> bool {
        self.settle_play_time(now);
        let toggled = self.game.state.toggle_pause();
        if toggled {
            log::info!(
                "{}",
                if self.phase() == GamePhase::Paused {
                    "Paused"
                } else {
                    "Resumed"
                }
            );
        }
        toggled
    }

    /// Queue a turn. A turn while idle also starts the game.
    pub fn steer(&mut self, dir: Direction, now: f64) -> bool {
        if self.phase() == GamePhase::Idle {
            self.start(now);
        }
        self.game.state.steer(dir)
    }

    /// Cancel both drivers, drop particles and reset the board to idle
    pub fn restart(&mut self) {
        self.scheduler.cancel_all();
        self.game.clear_effects();
        self.game.state.restart();
        self.play_time_ms = 0.0;
    }

    /// Replace the game with a fresh one in `mode`. Undrained events carry
    /// over, followed by `Restarted`.
    pub fn change_mode(&mut self, mode: Mode, seed: u64) {
        self.scheduler.cancel_all();
        self.game.clear_effects();
        let pending = std::mem::take(&mut self.game.state.events);
        self.game.state = GameState::with_grid(mode, self.game.state.grid, seed);
        self.game.state.events = pending;
        self.game.state.events.push(GameEvent::Restarted);
        self.play_time_ms = 0.0;
        self.settings.last_mode = Some(mode);
        log::info!("Switched to {} mode", mode.as_str());
    }

    /// Change the tick interval; a live tick driver restarts on the new rhythm
    pub fn set_tick_ms(&mut self, ms: u32, now: f64) -> bool {
        if !self.settings.set_tick_ms(ms) {
            return false;
        }
        if self.scheduler.ticks.is_active() {
            self.scheduler.ticks.start(now, ms);
            log::info!("Tick interval now {} ms", ms);
        }
        true
    }

    /// Flip mute; returns the new muted flag
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.settings.toggle_mute();
        log::info!("Sound {}", if muted { "muted" } else { "on" });
        muted
    }

    // === Clock ===

    /// Run every tick and frame due at clock time `now`
    pub fn pump(&mut self, now: f64) -> u32 {
        self.settle_play_time(now);
        self.scheduler.pump(&mut self.game, now)
    }

    /// Count running time since the last clock reading, then re-base on `now`
    fn settle_play_time(&mut self, now: f64) {
        if let Some(last) = self.last_pump {
            if self.phase() == GamePhase::Running {
                self.play_time_ms += (now - last).max(0.0);
            }
        }
        self.last_pump = Some(now);
    }

    // === Observations ===

    pub fn state(&self) -> &GameState {
        &self.game.state
    }

    pub fn phase(&self) -> GamePhase {
        self.game.state.phase
    }

    pub fn mode(&self) -> Mode {
        self.game.state.mode
    }

    pub fn score(&self) -> u64 {
        self.game.state.score
    }

    pub fn best(&self) -> u64 {
        self.game.best.best(self.mode())
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.game.best
    }

    pub fn particles(&self) -> &[Particle] {
        self.game.explosion.particles()
    }

    pub fn game_over_ready(&self) -> bool {
        self.game.game_over_ready
    }

    pub fn play_time_ms(&self) -> f64 {
        self.play_time_ms
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.ticks.is_active()
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.frames.is_active()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.state.drain_events()
    }
}
