//! Fixed-cadence simulation step
//!
//! One call advances a running session by a single step: integrate movement,
//! resolve collisions, then evaluate the level/lives state machine. The
//! evaluation order is part of the contract and must not be reshuffled.

use super::collision::{collide_bricks, collide_paddle, collide_walls};
use super::state::{GamePhase, GameState};

/// Input snapshot consumed by a single step. The hold flags and the pointer
/// are written asynchronously by the host's handlers and read once here.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    pub left: bool,
    pub right: bool,
    /// Absolute x of a pointer/touch event received since the last step
    pub pointer_x: Option<f32>,
}

/// Fire-and-forget signals for the audio/event sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PaddleHit,
    BrickHit {
        points: u32,
    },
    BallLost,
    /// Field cleared; `level` is the incoming level
    LevelCompleted {
        level: u32,
    },
    GameOver {
        score: u32,
    },
}

/// What the step means for scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Keep stepping on the next frame
    Continue,
    /// Field cleared; suspend stepping until the delayed resume
    LevelCompleted,
    /// Session over; stop scheduling
    GameOver,
}

/// Advance the session by one step.
///
/// Order: movement and paddle input, wall and paddle collisions, brick
/// collisions, then the level-complete check and only after it the
/// ball-lost/game-over check. The two checks are mutually exclusive within a
/// step; a cleared field wins.
pub fn step(state: &mut GameState, input: &StepInput, events: &mut Vec<GameEvent>) -> StepOutcome {
    debug_assert_eq!(state.phase, GamePhase::Running);

    integrate(state, input);
    collide_walls(&mut state.ball, &state.field);
    if collide_paddle(&mut state.ball, &state.paddle, &state.field) {
        events.push(GameEvent::PaddleHit);
    }
    let impact = collide_bricks(&mut state.ball, &mut state.bricks);
    if impact.any() {
        state.score += impact.points;
        events.push(GameEvent::BrickHit {
            points: impact.points,
        });
    }

    if state.bricks.all_cleared() {
        state.advance_level();
        events.push(GameEvent::LevelCompleted { level: state.level });
        return StepOutcome::LevelCompleted;
    }

    if state.ball.pos.y > state.field.height {
        events.push(GameEvent::BallLost);
        state.lose_life();
        if state.phase == GamePhase::GameOver {
            events.push(GameEvent::GameOver { score: state.score });
            return StepOutcome::GameOver;
        }
    }

    StepOutcome::Continue
}

/// Move the ball and apply paddle input. A pointer position places the
/// paddle absolutely (center mapped onto the pointer); held keys then slide
/// it by its step distance. All paddle movement is clamped to the field.
fn integrate(state: &mut GameState, input: &StepInput) {
    state.ball.pos += state.ball.vel;
    if let Some(x) = input.pointer_x {
        state.paddle.center_on(x, &state.field);
    }
    if input.right {
        state.paddle.slide(state.paddle.step, &state.field);
    }
    if input.left {
        state.paddle.slide(-state.paddle.step, &state.field);
    }
}
