//! Indexed bitmaps and the colour maps used to paint them.
//!
//! A cell value of 0 is transparent; any other value is a logical colour
//! slot looked up in the caller's `ColorMap`, so one bitmap can be recoloured
//! per entity kind.

use crate::surface::{Rgb, Surface};

pub type Sprite = &'static [&'static [u8]];

// ── Bitmaps ───────────────────────────────────────────────────────────────────

/// 1 = outline, 2 = hull, 3 = engine flame.
pub const PLAYER: Sprite = &[
    &[0, 0, 0, 1, 1, 0, 0, 0],
    &[0, 0, 1, 2, 2, 1, 0, 0],
    &[0, 0, 1, 2, 2, 1, 0, 0],
    &[0, 1, 1, 2, 2, 1, 1, 0],
    &[1, 2, 2, 2, 2, 2, 2, 1],
    &[1, 0, 1, 2, 2, 1, 0, 1],
    &[1, 0, 1, 0, 0, 1, 0, 1],
    &[0, 0, 3, 0, 0, 3, 0, 0],
];

pub const ENEMY: Sprite = &[
    &[1, 0, 1, 1, 1, 1, 0, 1],
    &[0, 1, 1, 2, 2, 1, 1, 0],
    &[1, 1, 2, 0, 0, 2, 1, 1],
    &[1, 1, 2, 2, 2, 2, 1, 1],
    &[0, 1, 0, 1, 1, 0, 1, 0],
    &[0, 1, 0, 0, 0, 0, 1, 0],
];

pub const BULLET: Sprite = &[&[1], &[2], &[1]];

pub const EXPLOSION: Sprite = &[
    &[1, 0, 0, 1],
    &[0, 2, 2, 0],
    &[0, 2, 2, 0],
    &[1, 0, 0, 1],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteId {
    Player,
    Enemy,
    Bullet,
    Explosion,
}

pub fn sprite(id: SpriteId) -> Sprite {
    match id {
        SpriteId::Player => PLAYER,
        SpriteId::Enemy => ENEMY,
        SpriteId::Bullet => BULLET,
        SpriteId::Explosion => EXPLOSION,
    }
}

/// Width and height of a bitmap in logical pixels.
pub fn dimensions(sprite: Sprite) -> (usize, usize) {
    (sprite.first().map_or(0, |row| row.len()), sprite.len())
}

// ── Colour maps ───────────────────────────────────────────────────────────────

/// Slot → colour.  Index 0 is never consulted (transparent).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorMap(pub &'static [Option<Rgb>]);

impl ColorMap {
    /// Unknown or unmapped slots fall back to white.
    pub fn lookup(&self, slot: u8) -> Rgb {
        self.0
            .get(slot as usize)
            .copied()
            .flatten()
            .unwrap_or(Rgb::WHITE)
    }
}

/// Shared base palette: white, blue, red, yellow.
pub const PALETTE: ColorMap = ColorMap(&[
    None,
    Some(Rgb::new(0xff, 0xff, 0xff)),
    Some(Rgb::new(0x3b, 0x8d, 0xbc)),
    Some(Rgb::new(0xff, 0x6b, 0x6b)),
    Some(Rgb::new(0xfe, 0xca, 0x57)),
]);

pub const PLAYER_COLORS: ColorMap = ColorMap(&[
    None,
    Some(Rgb::new(0xec, 0xf0, 0xf1)),
    Some(Rgb::new(0x34, 0x98, 0xdb)),
    Some(Rgb::new(0xe6, 0x7e, 0x22)),
]);

pub const ENEMY_COLORS: ColorMap = ColorMap(&[
    None,
    Some(Rgb::new(0xec, 0xf0, 0xf1)),
    Some(Rgb::new(0xc0, 0x39, 0x2b)),
]);

// ── Blit ──────────────────────────────────────────────────────────────────────

/// Paint every non-zero cell of `sprite` as a 1×1 pixel with its top-left
/// corner at the floor of `(x, y)`.
pub fn blit(surface: &mut Surface, sprite: Sprite, x: f32, y: f32, colors: &ColorMap) {
    let (x0, y0) = (x.floor() as i32, y.floor() as i32);
    for (r, row) in sprite.iter().enumerate() {
        for (c, &slot) in row.iter().enumerate() {
            if slot != 0 {
                surface.set(x0 + c as i32, y0 + r as i32, colors.lookup(slot));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_sizes_match_entity_boxes() {
        assert_eq!(dimensions(sprite(SpriteId::Player)), (8, 8));
        assert_eq!(dimensions(sprite(SpriteId::Enemy)), (8, 6));
        assert_eq!(dimensions(sprite(SpriteId::Bullet)), (1, 3));
    }

    #[test]
    fn missing_slot_falls_back_to_white() {
        assert_eq!(ENEMY_COLORS.lookup(3), Rgb::WHITE);
        assert_eq!(ENEMY_COLORS.lookup(200), Rgb::WHITE);
        assert_eq!(PALETTE.lookup(4), Rgb::new(0xfe, 0xca, 0x57));
    }

    #[test]
    fn blit_skips_transparent_cells() {
        let mut s = Surface::new();
        blit(&mut s, EXPLOSION, 10.0, 10.0, &PALETTE);
        assert_eq!(s.get(10, 10), Some(Rgb::WHITE));
        assert_eq!(s.get(11, 10), Some(Rgb::default()));
        assert_eq!(s.get(11, 11), Some(Rgb::new(0x3b, 0x8d, 0xbc)));
    }

    #[test]
    fn blit_clips_at_the_edges() {
        let mut s = Surface::new();
        blit(&mut s, PLAYER, -4.0, -4.0, &PLAYER_COLORS);
        // Row 4 of the bitmap lands on y = 0; its col 4 lands on x = 0.
        assert_eq!(s.get(0, 0), Some(PLAYER_COLORS.lookup(PLAYER[4][4])));
    }
}
