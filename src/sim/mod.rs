//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Ticks and frames are driven from outside, never by real timers
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod explosion;
pub mod schedule;
pub mod state;
pub mod tick;

pub use explosion::{Explosion, FrameStatus, Particle, Tint};
pub use schedule::{Flow, FrameDriver, GameLoop, IntervalDriver, Scheduler};
pub use state::{
    Cell, DeathCause, Direction, Food, FoodKind, GameEvent, GamePhase, GameState, Grid, Mode,
    START_SNAKE,
};
pub use tick::{TickOutcome, tick};
