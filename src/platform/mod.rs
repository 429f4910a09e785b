//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys and swipes mapped to game commands)
//! - Storage (LocalStorage on web, nothing on native)

pub mod input;
pub mod storage;

pub use input::{Command, Swipe, key_to_command};
