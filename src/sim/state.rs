//! Game state and core entity types
//!
//! Every entity is owned by [`GameState`] for the duration of a session and
//! recreated wholesale on start, level transition and life loss. Positions
//! follow the sprite-draw convention: an entity's stored coordinates are the
//! top-left corner of its bounding box.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geom::Rect;
use crate::consts::*;

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No session running; waiting for a start signal
    Idle,
    /// Active gameplay
    Running,
    /// Field cleared; stepping is suspended until the delayed resume fires
    LevelTransition,
    /// Session ended
    GameOver,
}

/// The rectangular play area
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// The ball. `pos` is the top-left corner of its bounding square; velocity is
/// the displacement applied per simulation step.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball centered above the paddle, launched upward with a random
    /// horizontal component scaled by the current game speed.
    pub fn launch(field: &Field, speed: u32, rng: &mut Pcg32) -> Self {
        let speed = speed as f32;
        Self {
            pos: Vec2::new(
                (field.width - 2.0 * BALL_RADIUS) / 2.0,
                field.height - PADDLE_HEIGHT - 2.0 * BALL_RADIUS,
            ),
            vel: Vec2::new(speed * rng.random_range(-1.0..1.0), -speed),
            radius: BALL_RADIUS,
        }
    }

    #[inline]
    pub fn diameter(&self) -> f32 {
        2.0 * self.radius
    }

    /// Bounding square used for every overlap test
    pub fn bounds(&self) -> Rect {
        Rect::from_pos(self.pos, self.diameter(), self.diameter())
    }
}

/// The player's paddle, pinned to the bottom of the field. Its y position is
/// derived from the field on use, never stored.
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Left edge, kept within [0, field.width - width]
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal distance covered per step while a key is held
    pub step: f32,
}

impl Paddle {
    /// Paddle centered at the bottom, step speed derived from game speed
    pub fn centered(field: &Field, speed: u32) -> Self {
        Self {
            x: (field.width - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            step: (speed + PADDLE_STEP_BONUS) as f32,
        }
    }

    /// Top edge, computed from the field
    #[inline]
    pub fn y(&self, field: &Field) -> f32 {
        field.height - self.height
    }

    pub fn rect(&self, field: &Field) -> Rect {
        Rect::new(self.x, self.y(field), self.width, self.height)
    }

    /// Move horizontally by `dx`, staying inside the field
    pub fn slide(&mut self, dx: f32, field: &Field) {
        self.x = (self.x + dx).clamp(0.0, field.width - self.width);
    }

    /// Center the paddle on an absolute x position, staying inside the field
    pub fn center_on(&mut self, x: f32, field: &Field) {
        self.x = (x - self.width / 2.0).clamp(0.0, field.width - self.width);
    }
}

/// Brick color tag, consumed by the render sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickColor {
    Red,
    Orange,
    Yellow,
    Blue,
    Green,
    /// A two-hit brick that has taken its first hit
    Damaged,
}

/// Row colors, top to bottom
pub const ROW_COLORS: [BrickColor; BRICK_ROWS] = [
    BrickColor::Red,
    BrickColor::Orange,
    BrickColor::Yellow,
    BrickColor::Blue,
    BrickColor::Green,
];

/// A single brick. Knocked-out bricks keep their slot in the field;
/// `hits_left == 0` means inactive.
#[derive(Debug, Clone)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: BrickColor,
    pub points: u32,
    pub hits_left: u8,
}

impl Brick {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.hits_left > 0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Register one hit: a two-hit brick is damaged and recolored, a one-hit
    /// brick is knocked out. Inactive bricks are untouched.
    pub fn hit(&mut self) {
        match self.hits_left {
            0 => {}
            2 => {
                self.hits_left = 1;
                self.color = BrickColor::Damaged;
            }
            _ => self.hits_left = 0,
        }
    }
}

/// The row-major grid of bricks. Exactly rows x cols entries exist for the
/// whole level; knocking a brick out never removes its entry.
#[derive(Debug, Clone)]
pub struct BrickField {
    bricks: Vec<Brick>,
}

impl BrickField {
    /// Build the full grid for a fresh level. The top row takes two hits and
    /// scores highest; each row below is worth less.
    pub fn new(field: &Field) -> Self {
        let width = field.width / BRICK_COLS as f32;
        let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                bricks.push(Brick {
                    x: col as f32 * width,
                    y: row as f32 * BRICK_HEIGHT + BRICK_TOP_MARGIN,
                    width,
                    height: BRICK_HEIGHT,
                    color: ROW_COLORS[row],
                    points: (BRICK_ROWS as u32 - row as u32) * 2,
                    hits_left: if row == 0 { 2 } else { 1 },
                });
            }
        }
        Self { bricks }
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Brick> {
        self.bricks.iter_mut()
    }

    /// Active bricks only, in field order
    pub fn active(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_active())
    }

    /// True once every brick has been knocked out
    pub fn all_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_active())
    }
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Field,
    pub phase: GamePhase,
    /// Base speed unit shared by ball and paddle; grows each level
    pub speed: u32,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickField,
    seed: u64,
    rng: Pcg32,
}

impl GameState {
    /// Idle state: entities exist for rendering an attract screen, but
    /// nothing moves until [`GameState::start`].
    pub fn new(field: Field, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let speed = BASE_SPEED;
        Self {
            field,
            phase: GamePhase::Idle,
            speed,
            score: 0,
            level: 1,
            lives: START_LIVES,
            ball: Ball::launch(&field, speed, &mut rng),
            paddle: Paddle::centered(&field, speed),
            bricks: BrickField::new(&field),
            seed,
            rng,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Begin (or restart) a session with fresh counters and entities
    pub fn start(&mut self) {
        self.speed = BASE_SPEED;
        self.score = 0;
        self.level = 1;
        self.lives = START_LIVES;
        self.reset_ball();
        self.reset_paddle();
        self.bricks = BrickField::new(&self.field);
        self.phase = GamePhase::Running;
    }

    /// Recreate the ball above the paddle at the current speed
    pub fn reset_ball(&mut self) {
        self.ball = Ball::launch(&self.field, self.speed, &mut self.rng);
    }

    /// Recreate the paddle centered at the current speed
    pub fn reset_paddle(&mut self) {
        self.paddle = Paddle::centered(&self.field, self.speed);
    }

    /// Field cleared: bump level and speed, recreate every entity and park
    /// the session in the transition pause.
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.speed += 1;
        self.reset_ball();
        self.reset_paddle();
        self.bricks = BrickField::new(&self.field);
        self.phase = GamePhase::LevelTransition;
    }

    /// Life lost: the ball and paddle come back, the brick field persists.
    /// Losing the last life ends the session.
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
        } else {
            self.reset_ball();
            self.reset_paddle();
        }
    }
}
