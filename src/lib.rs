//! Snake Arcade - grid Snake for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement rules, food, death explosion, drivers)
//! - `session`: Single controller owning game state, drivers and best scores
//! - `platform`: Browser/native platform abstraction (input mapping, storage)
//! - `renderer`: Canvas 2D drawing (wasm only)
//! - `audio`: Web Audio sound effects (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use session::Session;
pub use settings::{Settings, SpeedPreset};

/// Game configuration constants
pub mod consts {
    /// Grid columns (480 px canvas / 24 px cells)
    pub const COLS: i32 = 20;
    /// Grid rows
    pub const ROWS: i32 = 20;
    /// Cell edge in canvas pixels
    pub const CELL: f32 = 24.0;

    /// Chance that a freshly spawned food is gold (modern mode only)
    pub const GOLD_CHANCE: f64 = 0.12;
    /// Score for normal / gold food
    pub const NORMAL_FOOD_SCORE: u64 = 1;
    pub const GOLD_FOOD_SCORE: u64 = 3;
    /// Random probes before falling back to the free-cell list
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

    /// Eat flash length in ticks
    pub const EAT_FLASH_TICKS: u8 = 3;

    /// Explosion shape
    pub const PARTICLES_PER_SEGMENT: usize = 6;
    pub const MAX_EXPLODING_SEGMENTS: usize = 60;

    /// Explosion physics (per frame)
    pub const PARTICLE_GRAVITY: f32 = 0.18;
    pub const PARTICLE_FRICTION: f32 = 0.98;
    pub const WALL_BOUNCE: f32 = -0.6;
    pub const FLOOR_BOUNCE: f32 = -0.4;

    /// Default tick interval in milliseconds
    pub const DEFAULT_TICK_MS: u32 = 110;
    /// Maximum catch-up ticks per pump to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 8;
}

/// Canvas size in pixels for a grid of `cols` x `rows` cells
#[inline]
pub fn canvas_size(cols: i32, rows: i32) -> glam::Vec2 {
    glam::Vec2::new(cols as f32 * consts::CELL, rows as f32 * consts::CELL)
}

/// Format play time as `mm:ss`
pub fn format_time(ms: f64) -> String {
    let total_secs = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(999.0), "00:00");
        assert_eq!(format_time(61_500.0), "01:01");
        assert_eq!(format_time(3_600_000.0), "60:00");
    }

    #[test]
    fn test_canvas_size() {
        let size = canvas_size(consts::COLS, consts::ROWS);
        assert_eq!(size, glam::Vec2::new(480.0, 480.0));
    }
}
