//! Session driver
//!
//! Owns the game state, the fixed-step clock, the input surface and the
//! output ports, and turns step outcomes into scheduling directives. The
//! host runs the actual callbacks (display refresh, one-shot timers); the
//! driver guarantees that at most one wake is outstanding at any time, so a
//! pending frame and a pending delayed resume can never both fire into the
//! same session.

use crate::audio::{self, AudioSink, SoundCue};
use crate::consts::LEVEL_PAUSE_MS;
use crate::highscores::HighScores;
use crate::input::{InputState, Key};
use crate::render::RenderSink;
use crate::settings::Settings;
use crate::sim::{Field, FrameClock, GameEvent, GamePhase, GameState, StepOutcome, step};

/// What the host should schedule after a driver call. Issuing a new wake
/// replaces (cancels) the previous one; a callback whose wake was replaced
/// is stale and gets ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// Call [`Game::frame`] on the next display refresh
    Frame,
    /// Call [`Game::resume`] once, after the delay
    Resume { delay_ms: u64 },
    /// Nothing pending
    Idle,
}

pub struct Game<R: RenderSink, A: AudioSink> {
    state: GameState,
    clock: FrameClock,
    input: InputState,
    renderer: R,
    audio: A,
    highscores: HighScores,
    settings: Settings,
    pending: Wake,
    events: Vec<GameEvent>,
}

impl<R: RenderSink, A: AudioSink> Game<R, A> {
    /// Driver loading settings and scores from their default locations
    pub fn new(renderer: R, audio: A, seed: u64) -> Self {
        Self::with_collaborators(renderer, audio, Settings::load(), HighScores::load(), seed)
    }

    /// Driver with explicit collaborators (no disk access)
    pub fn with_collaborators(
        renderer: R,
        mut audio: A,
        settings: Settings,
        highscores: HighScores,
        seed: u64,
    ) -> Self {
        audio.set_volume(settings.volume);
        Self {
            state: GameState::new(Field::default(), seed),
            clock: FrameClock::new(0.0),
            input: InputState::default(),
            renderer,
            audio,
            highscores,
            settings,
            pending: Wake::Idle,
            events: Vec::new(),
        }
    }

    /// Begin or restart a session. Whatever wake was pending is replaced, so
    /// a stale frame callback or level-transition timer can no longer fire
    /// into the new session.
    pub fn start(&mut self, now: f64) -> Wake {
        self.state.start();
        self.clock.reset(now);
        self.input = InputState::default();
        self.audio.play(SoundCue::GameStart);
        if self.settings.music {
            self.audio.music(true);
        }
        log::info!("Session started (seed {})", self.state.seed());
        self.pending = Wake::Frame;
        self.pending
    }

    /// Per-display-refresh callback. Renders and steps at most once per
    /// fixed interval and returns the next wake. Callbacks that outlived a
    /// start/stop are ignored.
    pub fn frame(&mut self, now: f64) -> Wake {
        if self.pending != Wake::Frame {
            return Wake::Idle;
        }
        if !self.clock.should_step(now) {
            return Wake::Frame;
        }

        self.renderer.present(&self.state);
        let input = self.input.take_step();
        self.events.clear();
        let outcome = step(&mut self.state, &input, &mut self.events);
        self.dispatch_events();

        self.pending = match outcome {
            StepOutcome::Continue => Wake::Frame,
            StepOutcome::LevelCompleted => Wake::Resume {
                delay_ms: LEVEL_PAUSE_MS,
            },
            StepOutcome::GameOver => Wake::Idle,
        };
        self.pending
    }

    /// Delayed level-transition resume. Ignored unless it is the pending
    /// wake (a restart in the meantime cancels it).
    pub fn resume(&mut self, now: f64) -> Wake {
        if !matches!(self.pending, Wake::Resume { .. }) {
            return Wake::Idle;
        }
        debug_assert_eq!(self.state.phase, GamePhase::LevelTransition);
        self.state.phase = GamePhase::Running;
        self.clock.reset(now);
        if self.settings.music {
            self.audio.music(true);
        }
        self.pending = Wake::Frame;
        self.pending
    }

    /// Stop the session outright, cancelling whatever wake was pending
    pub fn stop(&mut self) {
        self.pending = Wake::Idle;
        self.audio.music(false);
        self.state.phase = GamePhase::Idle;
    }

    /// Key press. Returns a wake when the press (re)started the session.
    pub fn key_down(&mut self, key: Key, now: f64) -> Option<Wake> {
        match key {
            Key::Start => match self.state.phase {
                GamePhase::Idle | GamePhase::GameOver => Some(self.start(now)),
                GamePhase::Running | GamePhase::LevelTransition => None,
            },
            Key::MuteMusic => {
                // Only meaningful while a session is on
                if matches!(
                    self.state.phase,
                    GamePhase::Running | GamePhase::LevelTransition
                ) {
                    self.settings.music = !self.settings.music;
                    self.audio.music(self.settings.music);
                    self.settings.save();
                }
                None
            }
            Key::VolumeUp => {
                self.set_volume(audio::volume_up(self.settings.volume));
                None
            }
            Key::VolumeDown => {
                self.set_volume(audio::volume_down(self.settings.volume));
                None
            }
            Key::Left | Key::Right => {
                self.input.key_down(key);
                None
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Pointer or touch x position, in field coordinates
    pub fn pointer_moved(&mut self, x: f32) {
        self.input.pointer_moved(x, self.state.field.width);
    }

    /// True when the finished session's score belongs on the leaderboard;
    /// the host should prompt for a name and call [`Game::submit_high_score`]
    pub fn score_qualifies(&self) -> bool {
        self.state.phase == GamePhase::GameOver && self.highscores.qualifies(self.state.score)
    }

    /// Record the finished session's score under `name`. A declined prompt
    /// simply means never calling this; the table stays as it was.
    pub fn submit_high_score(&mut self, name: &str) -> Option<usize> {
        if self.state.phase != GamePhase::GameOver {
            return None;
        }
        self.highscores.submit(name, self.state.score)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pending(&self) -> Wake {
        self.pending
    }

    fn set_volume(&mut self, volume: f32) {
        self.settings.volume = volume;
        self.audio.set_volume(volume);
        self.settings.save();
    }

    /// Forward this step's events to the audio sink
    fn dispatch_events(&mut self) {
        for event in &self.events {
            match *event {
                GameEvent::PaddleHit => self.audio.play(SoundCue::PaddleHit),
                GameEvent::BrickHit { .. } => self.audio.play(SoundCue::BrickHit),
                GameEvent::BallLost => self.audio.play(SoundCue::BallLost),
                GameEvent::LevelCompleted { level } => {
                    log::info!("Level {level} incoming");
                    self.audio.music(false);
                    self.audio.play(SoundCue::LevelCompleted);
                }
                GameEvent::GameOver { score } => {
                    log::info!("Game over, final score {score}");
                    self.audio.music(false);
                    self.audio.play(SoundCue::GameOver);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;
    use glam::Vec2;

    /// Audio sink that records everything it is told
    #[derive(Default)]
    struct RecordingAudio {
        cues: Vec<SoundCue>,
        music: Vec<bool>,
        volumes: Vec<f32>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }
        fn music(&mut self, playing: bool) {
            self.music.push(playing);
        }
        fn set_volume(&mut self, volume: f32) {
            self.volumes.push(volume);
        }
    }

    fn test_game() -> Game<NullRenderer, RecordingAudio> {
        Game::with_collaborators(
            NullRenderer,
            RecordingAudio::default(),
            Settings::default(),
            HighScores::new(),
            12345,
        )
    }

    fn park_ball(game: &mut Game<NullRenderer, RecordingAudio>, x: f32, y: f32) {
        game.state.ball.pos = Vec2::new(x, y);
        game.state.ball.vel = Vec2::ZERO;
    }

    #[test]
    fn test_start_schedules_a_frame_and_cues_audio() {
        let mut game = test_game();
        assert_eq!(game.start(0.0), Wake::Frame);
        assert_eq!(game.state().phase, GamePhase::Running);
        assert!(game.audio.cues.contains(&SoundCue::GameStart));
        assert_eq!(game.audio.music.last(), Some(&true));
    }

    #[test]
    fn test_frame_gates_on_the_fixed_interval() {
        let mut game = test_game();
        game.start(0.0);
        park_ball(&mut game, 400.0, 300.0);
        game.state.ball.vel = Vec2::new(1.0, 1.0);

        // Too early: no step taken
        assert_eq!(game.frame(10.0), Wake::Frame);
        assert_eq!(game.state().ball.pos, Vec2::new(400.0, 300.0));

        // Past the threshold: exactly one step
        assert_eq!(game.frame(20.0), Wake::Frame);
        assert_eq!(game.state().ball.pos, Vec2::new(401.0, 301.0));
    }

    #[test]
    fn test_level_clear_schedules_the_delayed_resume() {
        let mut game = test_game();
        game.start(0.0);
        for brick in game.state.bricks.iter_mut() {
            brick.hits_left = 0;
        }
        let rect = {
            let brick = game.state.bricks.iter_mut().next().unwrap();
            brick.hits_left = 1;
            brick.rect()
        };
        park_ball(&mut game, rect.x + 10.0, rect.y + 5.0);

        let wake = game.frame(20.0);
        assert_eq!(
            wake,
            Wake::Resume {
                delay_ms: crate::consts::LEVEL_PAUSE_MS
            }
        );
        assert_eq!(game.state().phase, GamePhase::LevelTransition);
        // Music paused for the transition
        assert_eq!(game.audio.music.last(), Some(&false));

        // A stale frame callback during the pause is ignored
        assert_eq!(game.frame(40.0), Wake::Idle);
        assert_eq!(game.state().phase, GamePhase::LevelTransition);

        // The resume puts the session back on the frame cadence
        assert_eq!(game.resume(3020.0), Wake::Frame);
        assert_eq!(game.state().phase, GamePhase::Running);
        assert_eq!(game.audio.music.last(), Some(&true));
    }

    #[test]
    fn test_restart_cancels_a_pending_resume() {
        let mut game = test_game();
        game.start(0.0);
        for brick in game.state.bricks.iter_mut() {
            brick.hits_left = 0;
        }
        let rect = {
            let brick = game.state.bricks.iter_mut().next().unwrap();
            brick.hits_left = 1;
            brick.rect()
        };
        park_ball(&mut game, rect.x + 10.0, rect.y + 5.0);
        assert!(matches!(game.frame(20.0), Wake::Resume { .. }));

        // stop() replaces the pending wake; the old timer must not fire
        game.stop();
        assert_eq!(game.resume(3020.0), Wake::Idle);
        assert_eq!(game.state().phase, GamePhase::Idle);

        // Same for a restart racing the timer
        game.start(5000.0);
        assert_eq!(game.resume(5010.0), Wake::Idle);
        assert_eq!(game.state().phase, GamePhase::Running);
        assert_eq!(game.state().level, 1);
    }

    #[test]
    fn test_game_over_stops_scheduling() {
        let mut game = test_game();
        game.start(0.0);
        game.state.lives = 1;
        game.state.score = 42;
        let park_y = game.state.field.height + 1.0;
        park_ball(&mut game, 400.0, park_y);

        assert_eq!(game.frame(20.0), Wake::Idle);
        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert!(game.audio.cues.contains(&SoundCue::GameOver));
        assert_eq!(game.audio.music.last(), Some(&false));

        // No further steps: stale frames are no-ops and the score is frozen
        assert_eq!(game.frame(40.0), Wake::Idle);
        assert_eq!(game.frame(60.0), Wake::Idle);
        assert_eq!(game.state().score, 42);
    }

    #[test]
    fn test_start_key_restarts_only_outside_a_session() {
        let mut game = test_game();
        assert_eq!(game.key_down(Key::Start, 0.0), Some(Wake::Frame));
        assert_eq!(game.key_down(Key::Start, 10.0), None);

        game.state.lives = 1;
        game.state.score = 9;
        let park_y = game.state.field.height + 1.0;
        park_ball(&mut game, 400.0, park_y);
        game.frame(20.0);
        assert_eq!(game.state().phase, GamePhase::GameOver);

        assert_eq!(game.key_down(Key::Start, 100.0), Some(Wake::Frame));
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().lives, crate::consts::START_LIVES);
    }

    #[test]
    fn test_volume_keys_step_and_clamp() {
        let mut game = test_game();
        for _ in 0..10 {
            game.key_down(Key::VolumeUp, 0.0);
        }
        assert_eq!(game.settings().volume, 1.0);
        assert_eq!(game.audio.volumes.last(), Some(&1.0));

        for _ in 0..20 {
            game.key_down(Key::VolumeDown, 0.0);
        }
        assert_eq!(game.settings().volume, 0.0);
        assert_eq!(game.audio.volumes.last(), Some(&0.0));
    }

    #[test]
    fn test_mute_only_works_during_a_session() {
        let mut game = test_game();
        game.key_down(Key::MuteMusic, 0.0);
        assert!(game.settings().music);

        game.start(0.0);
        game.key_down(Key::MuteMusic, 1.0);
        assert!(!game.settings().music);
        assert_eq!(game.audio.music.last(), Some(&false));
    }

    #[test]
    fn test_out_of_field_pointer_never_moves_the_paddle() {
        let mut game = test_game();
        game.start(0.0);
        park_ball(&mut game, 400.0, 300.0);
        let x0 = game.state().paddle.x;

        game.pointer_moved(900.0);
        game.pointer_moved(-3.0);
        game.frame(20.0);
        assert_eq!(game.state().paddle.x, x0);
    }

    #[test]
    fn test_high_score_submission_after_game_over() {
        let mut game = test_game();
        game.start(0.0);
        // Not over yet: nothing to submit
        assert_eq!(game.submit_high_score("ada"), None);

        game.state.lives = 1;
        game.state.score = 77;
        let park_y = game.state.field.height + 1.0;
        park_ball(&mut game, 400.0, park_y);
        game.frame(20.0);

        assert!(game.score_qualifies());
        assert_eq!(game.submit_high_score("ada"), Some(1));
        assert_eq!(game.highscores().top_score(), Some(77));
    }
}
