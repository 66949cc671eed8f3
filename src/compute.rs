//! Simulation step and session setup.
//!
//! `step` advances a `GameState` by exactly one frame.  Randomness only
//! comes through the injected RNG so callers control determinism (tests
//! use a seeded `StdRng`).  Entities are never removed while a collection
//! is being scanned: scans mark dead indices, and each collection is
//! compacted once afterwards.

use rand::Rng;

use crate::entities::*;
use crate::input::Intents;
use crate::surface::Rgb;

/// Notifications produced by a step, forwarded to the presenter by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    ScoreChanged(u32),
    GameOver(u32),
}

// ── Difficulty ───────────────────────────────────────────────────────────────

/// Frames between enemy spawns; shrinks by one every 100 points, floored.
pub fn spawn_interval(score: u32) -> u32 {
    SPAWN_INTERVAL_MAX
        .saturating_sub(score / 100)
        .max(SPAWN_INTERVAL_MIN)
}

pub fn enemy_speed(score: u32) -> f32 {
    ENEMY_BASE_SPEED + score as f32 / 1000.0
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Strict axis-aligned overlap; touching edges do not count.
#[allow(clippy::too_many_arguments)]
pub fn overlaps(ax: f32, ay: f32, aw: f32, ah: f32, bx: f32, by: f32, bw: f32, bh: f32) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

fn bullet_hits(b: &Bullet, e: &Enemy) -> bool {
    overlaps(b.x, b.y, b.w, b.h, e.x, e.y, e.w, e.h)
}

fn enemy_hits_player(e: &Enemy, p: &Player) -> bool {
    overlaps(p.x, p.y, p.w, p.h, e.x, e.y, e.w, e.h)
}

/// Compact `items`, keeping only entries whose flag in `dead` is false.
fn sweep<T>(items: &mut Vec<T>, dead: &[bool]) {
    debug_assert_eq!(items.len(), dead.len());
    let mut flags = dead.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Scatter the background stars over the whole playfield.
pub fn init_stars(rng: &mut impl Rng) -> Vec<Star> {
    (0..STAR_COUNT)
        .map(|_| Star {
            x: rng.gen_range(0.0..PLAYFIELD_WIDTH),
            y: rng.gen_range(0.0..PLAYFIELD_HEIGHT),
            speed: 0.5 + rng.gen::<f32>(),
        })
        .collect()
}

/// A fresh, idle state with its star field already in place.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    GameState {
        status: GameStatus::Idle,
        score: 0,
        frame: 0,
        fire_timer: Timer::new(),
        spawn_timer: Timer::new(),
        player: Player::spawn(),
        bullets: Vec::new(),
        enemies: Vec::new(),
        particles: Vec::new(),
        stars: init_stars(rng),
    }
}

/// Reset everything but the stars and mark the session as running.
pub fn new_session(state: &mut GameState) {
    state.status = GameStatus::Running;
    state.score = 0;
    state.frame = 0;
    state.fire_timer = Timer::new();
    state.spawn_timer = Timer::new();
    state.player = Player::spawn();
    state.bullets.clear();
    state.enemies.clear();
    state.particles.clear();
}

/// Push a burst of particles centred on `(x, y)`.
pub fn explode(particles: &mut Vec<Particle>, x: f32, y: f32, color: Rgb, rng: &mut impl Rng) {
    for _ in 0..BURST_SIZE {
        particles.push(Particle {
            x,
            y,
            vx: (rng.gen::<f32>() - 0.5) * 2.0,
            vy: (rng.gen::<f32>() - 0.5) * 2.0,
            life: PARTICLE_LIFE,
            color,
        });
    }
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Entities created during the step start moving on the next one, so a
/// fresh bullet sits at the muzzle and a fresh burst sits on the wreck when
/// the frame is drawn.  The session ends at the first enemy that touches
/// the player: the final score is reported right there, and enemies later
/// in the scan can no longer be shot.  The remaining sub-steps still run.
pub fn step(state: &mut GameState, intents: &Intents, rng: &mut impl Rng) -> Vec<StepEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    // ── 1. Frame counter ─────────────────────────────────────────────────────
    state.frame += 1;

    // ── 2. Player motion ─────────────────────────────────────────────────────
    move_player(&mut state.player, intents);

    // ── 3. Auto-fire ─────────────────────────────────────────────────────────
    let settled_bullets = state.bullets.len();
    if state.fire_timer.tick(FIRE_INTERVAL) {
        state.bullets.push(Bullet {
            x: state.player.x + 3.0,
            y: state.player.y,
            w: BULLET_W,
            h: BULLET_H,
        });
    }

    // ── 4. Bullets ───────────────────────────────────────────────────────────
    for b in &mut state.bullets[..settled_bullets] {
        b.y -= BULLET_SPEED;
    }
    state.bullets.retain(|b| b.y >= 0.0);

    // ── 5. Enemy spawn ───────────────────────────────────────────────────────
    let settled_enemies = state.enemies.len();
    let interval = spawn_interval(state.score);
    if state.spawn_timer.tick(interval) {
        let x = rng.gen_range(0.0..PLAYFIELD_WIDTH - ENEMY_W);
        let speed = enemy_speed(state.score);
        log::debug!(
            "frame {}: spawn enemy at x={:.1} speed={:.3} (interval {})",
            state.frame,
            x,
            speed,
            interval
        );
        state.enemies.push(Enemy {
            x,
            y: ENEMY_SPAWN_Y,
            w: ENEMY_W,
            h: ENEMY_H,
            speed,
        });
    }

    // ── 6. Enemies: move, collide, expire ────────────────────────────────────
    let settled_particles = state.particles.len();
    let mut dead_enemies = vec![false; state.enemies.len()];
    let mut spent_bullets = vec![false; state.bullets.len()];
    let mut ended = false;

    for (ei, enemy) in state.enemies.iter_mut().enumerate() {
        if ei < settled_enemies {
            enemy.y += enemy.speed;
        }
        let enemy = &*enemy;

        // First live bullet in list order wins; at most one per enemy.
        let hit = if ended {
            None
        } else {
            state
                .bullets
                .iter()
                .enumerate()
                .find(|(bi, b)| !spent_bullets[*bi] && bullet_hits(b, enemy))
                .map(|(bi, _)| bi)
        };
        if let Some(bi) = hit {
            spent_bullets[bi] = true;
            dead_enemies[ei] = true;
            explode(
                &mut state.particles,
                enemy.x + ENEMY_W / 2.0,
                enemy.y + ENEMY_H / 2.0,
                EXPLOSION_COLOR,
                rng,
            );
            let before = spawn_interval(state.score);
            state.score += KILL_REWARD;
            log::debug!("frame {}: enemy destroyed, score {}", state.frame, state.score);
            let after = spawn_interval(state.score);
            if after != before {
                log::debug!("spawn interval {} -> {}", before, after);
            }
            events.push(StepEvent::ScoreChanged(state.score));
        }

        // Checked even for an enemy shot this frame.
        if !ended && enemy_hits_player(enemy, &state.player) {
            ended = true;
            state.player.hp = state.player.hp.saturating_sub(1);
            state.status = GameStatus::Ended;
            log::info!(
                "game over at frame {} with score {}",
                state.frame,
                state.score
            );
            events.push(StepEvent::GameOver(state.score));
        }

        if enemy.y > PLAYFIELD_HEIGHT {
            dead_enemies[ei] = true;
        }
    }

    sweep(&mut state.enemies, &dead_enemies);
    sweep(&mut state.bullets, &spent_bullets);

    // ── 7. Particles ─────────────────────────────────────────────────────────
    for p in &mut state.particles[..settled_particles] {
        p.x += p.vx;
        p.y += p.vy;
        p.life -= 1;
    }
    state.particles.retain(|p| p.life > 0);

    // ── 8. Stars ─────────────────────────────────────────────────────────────
    for s in &mut state.stars {
        s.y += s.speed;
        if s.y > PLAYFIELD_HEIGHT {
            s.y = 0.0;
            s.x = rng.gen_range(0.0..PLAYFIELD_WIDTH);
        }
    }

    debug_assert!(positions_finite(state), "non-finite entity position");
    events
}

/// Horizontal movement from the held intents, or the pointer when present.
fn move_player(player: &mut Player, intents: &Intents) {
    if let Some(px) = intents.pointer_x {
        player.x = px - player.w / 2.0;
    } else {
        if intents.move_left {
            player.x -= PLAYER_SPEED;
        }
        if intents.move_right {
            player.x += PLAYER_SPEED;
        }
    }
    let max_x = PLAYFIELD_WIDTH - player.w;
    player.x = if player.x.is_nan() { 0.0 } else { player.x.clamp(0.0, max_x) };
}

fn positions_finite(state: &GameState) -> bool {
    state.player.x.is_finite()
        && state.player.y.is_finite()
        && state.bullets.iter().all(|b| b.x.is_finite() && b.y.is_finite())
        && state.enemies.iter().all(|e| e.x.is_finite() && e.y.is_finite())
        && state.particles.iter().all(|p| p.x.is_finite() && p.y.is_finite())
        && state.stars.iter().all(|s| s.x.is_finite() && s.y.is_finite())
}
