//! Tick and frame drivers
//!
//! The game never owns a real timer. An outside clock (the animation frame
//! timestamp in the browser, a plain counter in tests) calls
//! [`Scheduler::pump`] and the drivers decide how many ticks and frames are
//! due.

use crate::consts::MAX_CATCHUP_TICKS;

/// What a driven step wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep this driver running
    Continue,
    /// Stop this driver
    Stop,
    /// Stop the tick driver and start the frame driver
    Handoff,
}

/// Something with a movement tick and an animation frame
pub trait GameLoop {
    /// One fixed-interval movement step
    fn tick(&mut self) -> Flow;
    /// One display frame of animation
    fn advance_frame(&mut self) -> Flow;
}

/// Fires every `interval_ms` of clock time while started
#[derive(Debug, Clone, Default)]
pub struct IntervalDriver {
    interval_ms: f64,
    next_due: Option<f64>,
}

impl IntervalDriver {
    /// (Re)start with a fresh schedule; the first fire is one interval from `now`
    pub fn start(&mut self, now: f64, interval_ms: u32) {
        self.interval_ms = f64::from(interval_ms.max(1));
        self.next_due = Some(now + self.interval_ms);
    }

    /// Stop firing. Safe to call when already stopped.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of intervals that elapsed up to `now`, capped at
    /// `MAX_CATCHUP_TICKS`. A capped backlog is dropped and the schedule
    /// re-based on `now`.
    pub fn due(&mut self, now: f64) -> u32 {
        let Some(mut next) = self.next_due else {
            return 0;
        };

        let mut count = 0;
        while next <= now && count < MAX_CATCHUP_TICKS {
            next += self.interval_ms;
            count += 1;
        }
        if next <= now {
            log::debug!("Tick driver fell behind, skipping backlog");
            next = now + self.interval_ms;
        }

        self.next_due = Some(next);
        count
    }
}

/// Fires once per pump while started
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    active: bool,
}

impl FrameDriver {
    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// The two drivers a game needs
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pub ticks: IntervalDriver,
    pub frames: FrameDriver,
}

impl Scheduler {
    /// Cancel both drivers
    pub fn cancel_all(&mut self) {
        self.ticks.cancel();
        self.frames.cancel();
    }

    /// Run everything due at `now`. Returns the number of ticks executed.
    pub fn pump<G: GameLoop>(&mut self, game: &mut G, now: f64) -> u32 {
        let mut ran = 0;
        for _ in 0..self.ticks.due(now) {
            ran += 1;
            match game.tick() {
                Flow::Continue => {}
                Flow::Stop => {
                    self.ticks.cancel();
                    break;
                }
                Flow::Handoff => {
                    self.ticks.cancel();
                    self.frames.start();
                    break;
                }
            }
        }

        if self.frames.is_active() {
            match game.advance_frame() {
                Flow::Continue => {}
                Flow::Stop | Flow::Handoff => self.frames.cancel(),
            }
        }

        ran
    }
}
