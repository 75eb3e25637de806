//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed cadence only, gated by [`clock::FrameClock`]
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod geom;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{BrickImpact, collide_bricks, collide_paddle, collide_walls};
pub use geom::Rect;
pub use state::{Ball, Brick, BrickColor, BrickField, Field, GamePhase, GameState, Paddle};
pub use tick::{GameEvent, StepInput, StepOutcome, step};
