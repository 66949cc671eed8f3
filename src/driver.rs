//! Game loop driver: owns the session and runs one tick per display frame.
//!
//! The host calls `tick` once per frame and keeps scheduling frames only
//! while it answers `Schedule::Continue`.  A game over flips the state to
//! `Ended`; the tick in flight still renders, and every later tick is a
//! no-op until `start` is called again.

use rand::Rng;

use crate::compute::{init_state, new_session, step, StepEvent};
use crate::entities::{GameState, GameStatus};
use crate::input::Intents;
use crate::render::render;
use crate::surface::Surface;

/// Receives the notifications the simulation emits.
pub trait Presenter {
    fn on_score_changed(&mut self, score: u32);
    fn on_game_over(&mut self, final_score: u32);
}

/// What the host should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    Continue,
    Stop,
}

pub struct GameLoop<P: Presenter, R: Rng> {
    state: GameState,
    presenter: P,
    rng: R,
}

impl<P: Presenter, R: Rng> GameLoop<P, R> {
    /// Idle loop with the star field already seeded from `rng`.
    pub fn new(presenter: P, mut rng: R) -> Self {
        let state = init_state(&mut rng);
        Self {
            state,
            presenter,
            rng,
        }
    }

    /// Begin (or restart) a session.  Stars carry over.
    pub fn start(&mut self) {
        log::info!(
            "starting session (previous status {:?}, score {})",
            self.state.status,
            self.state.score
        );
        new_session(&mut self.state);
        self.presenter.on_score_changed(0);
    }

    /// Simulate, then render into `surface`.
    pub fn tick(&mut self, intents: &Intents, surface: &mut Surface) -> Schedule {
        if !self.state.is_running() {
            return Schedule::Stop;
        }

        for event in step(&mut self.state, intents, &mut self.rng) {
            match event {
                StepEvent::ScoreChanged(score) => self.presenter.on_score_changed(score),
                StepEvent::GameOver(score) => self.presenter.on_game_over(score),
            }
        }

        render(&self.state, surface);

        if self.state.is_running() {
            Schedule::Continue
        } else {
            Schedule::Stop
        }
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that need to stage a scene.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}
