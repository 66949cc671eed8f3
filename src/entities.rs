//! Entity records for the playfield, plus the gameplay constants they use.

use crate::surface::Rgb;

// ── Playfield & tuning ───────────────────────────────────────────────────────

pub const PLAYFIELD_WIDTH: f32 = 160.0;
pub const PLAYFIELD_HEIGHT: f32 = 240.0;

pub const PLAYER_W: f32 = 8.0;
pub const PLAYER_H: f32 = 8.0;
/// Horizontal distance covered per frame while a direction is held.
pub const PLAYER_SPEED: f32 = 1.5;

pub const BULLET_W: f32 = 1.0;
pub const BULLET_H: f32 = 3.0;
pub const BULLET_SPEED: f32 = 3.0;
/// Frames between two automatic shots.
pub const FIRE_INTERVAL: u32 = 15;

pub const ENEMY_W: f32 = 8.0;
pub const ENEMY_H: f32 = 6.0;
/// Enemies enter from just above the top edge.
pub const ENEMY_SPAWN_Y: f32 = -8.0;
pub const ENEMY_BASE_SPEED: f32 = 0.5;
pub const SPAWN_INTERVAL_MAX: u32 = 60;
pub const SPAWN_INTERVAL_MIN: u32 = 20;
pub const KILL_REWARD: u32 = 10;

pub const BURST_SIZE: usize = 8;
pub const PARTICLE_LIFE: i32 = 20;
pub const EXPLOSION_COLOR: Rgb = Rgb::new(0xff, 0x4d, 0x4d);

pub const STAR_COUNT: usize = 30;

// ── Status ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// No session has been started yet.
    Idle,
    Running,
    /// The player was hit; `start()` is the only way back.
    Ended,
}

// ── Timers ───────────────────────────────────────────────────────────────────

/// Frame counter that reports when `period` frames have elapsed since the
/// last trigger.  The period is passed on every tick so it may shrink
/// between triggers (the spawn interval does).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    elapsed: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self { elapsed: 0 }
    }

    /// Advance one frame; returns `true` and resets when the period is reached.
    pub fn tick(&mut self, period: u32) -> bool {
        self.elapsed += 1;
        if self.elapsed >= period.max(1) {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }
}

// ── Entities ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub hp: u32,
}

impl Player {
    /// Centred on the bottom of the playfield.
    pub fn spawn() -> Self {
        Self {
            x: PLAYFIELD_WIDTH / 2.0 - PLAYER_W / 2.0,
            y: PLAYFIELD_HEIGHT - 20.0,
            w: PLAYER_W,
            h: PLAYER_H,
            hp: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Downward pixels per frame, fixed when the enemy spawns.
    pub speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining frames.
    pub life: i32,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The whole session.  Owned by the loop driver, mutated by
/// `compute::step` and only read by `render::render`.
#[derive(Clone, Debug)]
pub struct GameState {
    pub status: GameStatus,
    pub score: u32,
    pub frame: u64,
    pub fire_timer: Timer,
    pub spawn_timer: Timer,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    /// Background decoration; survives session restarts.
    pub stars: Vec<Star>,
}

impl GameState {
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_every_period() {
        let mut t = Timer::new();
        let fired: Vec<u32> = (1..=45).filter(|_| t.tick(15)).collect();
        assert_eq!(fired.len(), 3);
        assert_eq!(t.elapsed(), 0);
    }

    #[test]
    fn timer_honours_a_shrinking_period() {
        let mut t = Timer::new();
        for _ in 0..30 {
            assert!(!t.tick(60));
        }
        // Period dropped below what has already elapsed: fire right away.
        assert!(t.tick(20));
        assert_eq!(t.elapsed(), 0);
    }

    #[test]
    fn player_spawns_centred() {
        let p = Player::spawn();
        assert_eq!(p.x, 76.0);
        assert_eq!(p.y, 220.0);
        assert_eq!(p.hp, 1);
    }
}
