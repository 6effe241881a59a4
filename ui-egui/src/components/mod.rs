//! Modular UI components organized by feature

pub mod board;

// Re-export commonly used components
pub use board::{BoardSurface, OverlayRenderer, OverlayToggles};
