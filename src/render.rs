//! Render port
//!
//! Output-only: the driver hands the current state over once per step and
//! never reads anything back. A host paints the background, the ball, the
//! paddle, every active brick with its color, and the score/level/lives HUD
//! from what it is given.

use crate::sim::GameState;

pub trait RenderSink {
    fn present(&mut self, state: &GameState);
}

/// Renderer that draws nothing. Keeps the game loop running headless or when
/// no display could be initialized.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn present(&mut self, _state: &GameState) {}
}
