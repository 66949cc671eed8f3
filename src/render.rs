//! Render step: paints a `GameState` into a `Surface`.
//!
//! Pure read of the state.  Draw order is the z-order: stars at the back,
//! particles on top.

use crate::entities::GameState;
use crate::sprites::{blit, sprite, SpriteId, ENEMY_COLORS, PLAYER_COLORS};
use crate::surface::{Rgb, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_BACKGROUND: Rgb = Rgb::new(0x20, 0x20, 0x28);
pub const C_STAR: Rgb = Rgb::new(0x55, 0x55, 0x55);
pub const C_BULLET: Rgb = Rgb::new(0xf1, 0xc4, 0x0f);

/// Particles are drawn as small squares of this side.
const PARTICLE_SIZE: u32 = 2;

/// Render one complete frame.
pub fn render(state: &GameState, surface: &mut Surface) {
    surface.clear(C_BACKGROUND);

    for star in &state.stars {
        surface.fill_rect(star.x, star.y, 1, 1, C_STAR);
    }

    let player_sprite = sprite(SpriteId::Player);
    let enemy_sprite = sprite(SpriteId::Enemy);

    blit(surface, player_sprite, state.player.x, state.player.y, &PLAYER_COLORS);

    for e in &state.enemies {
        blit(surface, enemy_sprite, e.x, e.y, &ENEMY_COLORS);
    }

    for b in &state.bullets {
        surface.fill_rect(b.x, b.y, b.w as u32, b.h as u32, C_BULLET);
    }

    for p in &state.particles {
        surface.fill_rect(p.x, p.y, PARTICLE_SIZE, PARTICLE_SIZE, p.color);
    }
}
