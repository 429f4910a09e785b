//! Keyboard and touch mapping
//!
//! Turns raw key names and pointer positions into game commands. Kept free of
//! `web_sys` types so the mapping runs in native tests.

use crate::sim::Direction;

/// A request from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    Steer(Direction),
    Restart,
    ToggleMute,
}

/// Minimum swipe travel in CSS pixels on the dominant axis
pub const SWIPE_THRESHOLD: f32 = 22.0;

/// Map a `KeyboardEvent.key` / `KeyboardEvent.code` pair to a command
pub fn key_to_command(key: &str, code: &str) -> Option<Command> {
    if code == "Space" {
        return Some(Command::TogglePause);
    }
    if key.eq_ignore_ascii_case("m") {
        return Some(Command::ToggleMute);
    }
    key_to_direction(key).map(Command::Steer)
}

/// Arrow keys and WASD, either case
pub fn key_to_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Tracks one pointer gesture on the canvas
#[derive(Debug, Clone, Default)]
pub struct Swipe {
    start: Option<(f32, f32)>,
}

impl Swipe {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Finish the gesture. Short moves are taps and yield `None`.
    pub fn end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (sx, sy) = self.start.take()?;
        let (dx, dy) = (x - sx, y - sy);
        let (ax, ay) = (dx.abs(), dy.abs());

        if ax < SWIPE_THRESHOLD && ay < SWIPE_THRESHOLD {
            return None;
        }
        if ax > ay {
            Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            key_to_command("ArrowUp", "ArrowUp"),
            Some(Command::Steer(Direction::Up))
        );
        assert_eq!(key_to_command("D", "KeyD"), Some(Command::Steer(Direction::Right)));
        assert_eq!(key_to_command("a", "KeyA"), Some(Command::Steer(Direction::Left)));
        assert_eq!(key_to_command(" ", "Space"), Some(Command::TogglePause));
        assert_eq!(key_to_command("M", "KeyM"), Some(Command::ToggleMute));
        assert_eq!(key_to_command("q", "KeyQ"), None);
    }

    #[test]
    fn test_swipe_dominant_axis() {
        let mut swipe = Swipe::default();
        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(160.0, 120.0), Some(Direction::Right));

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(90.0, 30.0), Some(Direction::Up));

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(100.0, 140.0), Some(Direction::Down));

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(40.0, 100.0), Some(Direction::Left));
    }

    #[test]
    fn test_short_gesture_is_tap() {
        let mut swipe = Swipe::default();
        swipe.begin(10.0, 10.0);
        assert_eq!(swipe.end(25.0, 30.0), None);
        assert!(!swipe.is_tracking());
        // End without begin
        assert_eq!(swipe.end(200.0, 10.0), None);
    }
}
