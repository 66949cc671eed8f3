use pixel_shooter::entities::*;
use pixel_shooter::surface::Surface;
use pixel_shooter::{GameLoop, Intents, Presenter, Schedule};

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Default)]
struct Recorder {
    scores: Vec<u32>,
    game_overs: Vec<u32>,
}

impl Presenter for Recorder {
    fn on_score_changed(&mut self, score: u32) {
        self.scores.push(score);
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.game_overs.push(final_score);
    }
}

fn make_loop() -> GameLoop<Recorder, StdRng> {
    GameLoop::new(Recorder::default(), StdRng::seed_from_u64(7))
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy { x, y, w: ENEMY_W, h: ENEMY_H, speed: 0.5 }
}

// ── Idle ──────────────────────────────────────────────────────────────────────

#[test]
fn new_loop_is_idle_and_does_not_tick() {
    let mut game = make_loop();
    let mut surface = Surface::new();
    assert_eq!(game.status(), GameStatus::Idle);
    assert_eq!(game.tick(&Intents::default(), &mut surface), Schedule::Stop);
    assert_eq!(game.state().frame, 0);
    // Nothing was painted either.
    assert_eq!(surface, Surface::new());
}

// ── Running ───────────────────────────────────────────────────────────────────

#[test]
fn start_runs_and_reports_a_zero_score() {
    let mut game = make_loop();
    game.start();
    assert!(game.is_running());
    assert_eq!(game.presenter().scores, vec![0]);

    let mut surface = Surface::new();
    assert_eq!(game.tick(&Intents::default(), &mut surface), Schedule::Continue);
    assert_eq!(game.state().frame, 1);
    assert_ne!(surface, Surface::new());
}

#[test]
fn kills_are_forwarded_to_the_presenter() {
    let mut game = make_loop();
    game.start();
    game.state_mut().enemies.push(enemy_at(40.0, 100.0));
    game.state_mut().bullets.push(Bullet { x: 43.0, y: 103.0, w: BULLET_W, h: BULLET_H });

    let mut surface = Surface::new();
    game.tick(&Intents::default(), &mut surface);
    assert_eq!(game.presenter().scores, vec![0, 10]);
    assert!(game.presenter().game_overs.is_empty());
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn collision_stops_scheduling() {
    let mut game = make_loop();
    game.start();
    let (px, py) = (game.state().player.x, game.state().player.y);
    game.state_mut().enemies.push(enemy_at(px, py));

    let mut surface = Surface::new();
    assert_eq!(game.tick(&Intents::default(), &mut surface), Schedule::Stop);
    assert!(!game.is_running());
    assert_eq!(game.status(), GameStatus::Ended);
    assert_eq!(game.presenter().game_overs, vec![0]);

    // The host keeps calling: nothing moves and nothing is reported twice.
    let frame = game.state().frame;
    assert_eq!(game.tick(&Intents::default(), &mut surface), Schedule::Stop);
    assert_eq!(game.state().frame, frame);
    assert_eq!(game.presenter().game_overs, vec![0]);
}

#[test]
fn restart_after_game_over_keeps_the_stars() {
    let mut game = make_loop();
    game.start();
    let mut surface = Surface::new();
    for _ in 0..30 {
        game.tick(&Intents::default(), &mut surface);
    }
    let (px, py) = (game.state().player.x, game.state().player.y);
    game.state_mut().enemies.push(enemy_at(px, py));
    game.tick(&Intents::default(), &mut surface);
    assert_eq!(game.status(), GameStatus::Ended);

    let stars = game.state().stars.clone();
    game.start();
    assert!(game.is_running());
    assert_eq!(game.state().score, 0);
    assert_eq!(game.state().frame, 0);
    assert!(game.state().bullets.is_empty());
    assert!(game.state().enemies.is_empty());
    assert_eq!(game.state().player, Player::spawn());
    assert_eq!(game.state().stars, stars);
}

#[test]
fn cloned_state_is_independent() {
    let mut game = make_loop();
    game.start();
    let snapshot = game.state().clone();
    game.state_mut().score = 990;
    game.state_mut().enemies.push(enemy_at(5.0, 5.0));
    assert_eq!(snapshot.score, 0);
    assert!(snapshot.enemies.is_empty());
}
