//! Collision detection and response
//!
//! Pure functions over the entity state: walls, paddle and bricks. Each one
//! updates the ball's velocity and, where a surface was struck, clamps the
//! position back to tangency; all further side effects (score, events,
//! sounds) belong to the caller.

use super::geom::Rect;
use super::state::{Ball, BrickField, Field, Paddle};
use crate::consts::{DEFLECT_BIAS, DEFLECT_SCALE};

/// Walls reflect the velocity component normal to them and clamp the ball
/// back onto the boundary. The bottom edge is open: falling past it is the
/// ball-lost condition, which the state machine owns, not the kernel.
pub fn collide_walls(ball: &mut Ball, field: &Field) {
    let d = ball.diameter();
    if ball.pos.x < 0.0 {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = 0.0;
    }
    if ball.pos.x + d > field.width {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = field.width - d;
    }
    if ball.pos.y < 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = 0.0;
    }
}

/// Paddle contact: vertical bounce plus the stylized horizontal deflection.
///
/// The deflection is deliberately not a physical reflection. Striking left
/// of center biases the rebound left, right of center biases it right, and
/// the constant offset keeps a dead-center strike from going straight up.
/// Returns true on contact.
pub fn collide_paddle(ball: &mut Ball, paddle: &Paddle, field: &Field) -> bool {
    if !ball.bounds().intersects(&paddle.rect(field)) {
        return false;
    }
    ball.vel.y = -ball.vel.y;
    ball.pos.y = field.height - paddle.height - ball.diameter();
    ball.vel.x += ((ball.pos.x - paddle.x) / paddle.width) * DEFLECT_SCALE - DEFLECT_BIAS;
    true
}

/// Aggregate outcome of one brick-collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrickImpact {
    /// Points awarded this step
    pub points: u32,
    /// Bricks that registered a hit
    pub hits: u32,
    /// Bricks knocked out (hits_left reached 0)
    pub destroyed: u32,
}

impl BrickImpact {
    pub fn any(&self) -> bool {
        self.hits > 0
    }
}

/// Test the ball against every active brick, in field order. All overlapped
/// bricks take a hit and score, but only the first one deflects the ball, so
/// a step that clips two adjacent bricks cannot bounce twice.
pub fn collide_bricks(ball: &mut Ball, bricks: &mut BrickField) -> BrickImpact {
    let mut impact = BrickImpact::default();
    let bounds = ball.bounds();
    let mut deflected = false;
    for brick in bricks.iter_mut() {
        if !brick.is_active() || !bounds.intersects(&brick.rect()) {
            continue;
        }
        if !deflected {
            deflected = true;
            deflect_off_brick(ball, brick.rect());
        }
        brick.hit();
        impact.points += brick.points;
        impact.hits += 1;
        if !brick.is_active() {
            impact.destroyed += 1;
        }
    }
    impact
}

/// Direction resolution for a brick hit: if the ball's horizontal extent,
/// rolled back by this step's horizontal displacement, was entirely outside
/// the brick's left or right edge, the hit came from the side (flip dx);
/// otherwise from above or below (flip dy). Back-computing the previous
/// position instead of sweeping the full trajectory can misclassify exact
/// corner hits; that trade-off is intentional.
fn deflect_off_brick(ball: &mut Ball, brick: Rect) {
    let from_left = ball.pos.x + ball.diameter() - ball.vel.x <= brick.x;
    let from_right = ball.pos.x - ball.vel.x >= brick.right();
    if from_left || from_right {
        ball.vel.x = -ball.vel.x;
    } else {
        ball.vel.y = -ball.vel.y;
    }
}
