//! Canvas rendering module
//!
//! Plain Canvas 2D: filled cells for the board, filled squares for particles.

pub mod canvas;

pub use canvas::CanvasRenderer;
