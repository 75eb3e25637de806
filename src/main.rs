//! Breakwall entry point
//!
//! Runs a headless demo session: an autopilot paddle chases the ball while
//! the driver is pumped at display cadence on a synthetic clock. Wire up a
//! real frontend by implementing the render and audio ports.

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use breakwall::audio::{AudioSink, SoundCue};
use breakwall::game::{Game, Wake};
use breakwall::input::Key;
use breakwall::render::RenderSink;
use breakwall::sim::{GamePhase, GameState};

/// Synthetic display cadence (ms per frame)
const FRAME_MS: f64 = 16.7;
/// Demo cutoff so a flawless autopilot run still terminates
const MAX_FRAMES: u64 = 200_000;

/// Renderer that reports the HUD line whenever it changes
#[derive(Default)]
struct HudRenderer {
    last: Option<(u32, u32, u32)>,
}

impl RenderSink for HudRenderer {
    fn present(&mut self, state: &GameState) {
        let hud = (state.score, state.level, state.lives);
        if self.last != Some(hud) {
            self.last = Some(hud);
            log::info!("score {:>5}  level {}  lives {}", hud.0, hud.1, hud.2);
        }
    }
}

/// Audio sink that logs cues instead of playing them
#[derive(Default)]
struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("cue: {cue:?}");
    }

    fn music(&mut self, playing: bool) {
        log::debug!("music: {}", if playing { "on" } else { "off" });
    }

    fn set_volume(&mut self, volume: f32) {
        log::debug!("volume: {volume:.1}");
    }
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut game = Game::new(HudRenderer::default(), LogAudio, seed);

    let mut now = 0.0;
    let mut wake = game.key_down(Key::Start, now).unwrap_or(Wake::Idle);
    let mut frames = 0u64;

    while frames < MAX_FRAMES {
        frames += 1;
        now += FRAME_MS;
        wake = match wake {
            Wake::Frame => {
                steer(&mut game, now);
                game.frame(now)
            }
            Wake::Resume { delay_ms } => {
                now += delay_ms as f64;
                game.resume(now)
            }
            Wake::Idle => break,
        };
    }

    let state = game.state();
    println!(
        "final: score {}  level {}  lives {}",
        state.score, state.level, state.lives
    );

    if state.phase == GamePhase::GameOver && game.score_qualifies() {
        if let Some(name) = prompt_name() {
            if let Some(rank) = game.submit_high_score(&name) {
                println!("high score! rank {rank}");
            }
        }
    }

    if !game.highscores().is_empty() {
        println!("--- top scores ---");
        for (i, entry) in game.highscores().entries().iter().enumerate() {
            println!("{:>2}. {:<12} {:>6}", i + 1, entry.name, entry.score);
        }
    }
}

/// Autopilot: hold left/right so the paddle chases the ball. The paddle's
/// bounded step speed means a fast, sharply deflected ball eventually gets
/// away, so the demo reaches game over on its own.
fn steer<R: RenderSink, A: AudioSink>(game: &mut Game<R, A>, now: f64) {
    let state = game.state();
    let ball_center = state.ball.pos.x + state.ball.radius;
    let paddle_center = state.paddle.x + state.paddle.width / 2.0;
    let diff = ball_center - paddle_center;
    let step = state.paddle.step;

    game.key_up(Key::Left);
    game.key_up(Key::Right);
    if diff > step {
        let _ = game.key_down(Key::Right, now);
    } else if diff < -step {
        let _ = game.key_down(Key::Left, now);
    }
}

/// Ask for a name on stdin; empty input or EOF declines the entry
fn prompt_name() -> Option<String> {
    print!("You got a high score! Enter name: ");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok()?;
    let name = line.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
