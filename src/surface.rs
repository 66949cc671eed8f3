//! Fixed-size logical pixel grid every frame is painted into.

use crate::entities::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

pub const SURFACE_W: usize = PLAYFIELD_WIDTH as usize;
pub const SURFACE_H: usize = PLAYFIELD_HEIGHT as usize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    pixels: Vec<Rgb>,
}

impl Surface {
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb::default(); SURFACE_W * SURFACE_H],
        }
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < SURFACE_W && y < SURFACE_H).then(|| self.pixels[y * SURFACE_W + x])
    }

    /// Off-surface writes are clipped.
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= SURFACE_W || y as usize >= SURFACE_H {
            return;
        }
        self.pixels[y as usize * SURFACE_W + x as usize] = color;
    }

    /// Fill a `w`×`h` block whose top-left corner is the floor of `(x, y)`.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: u32, h: u32, color: Rgb) {
        let (x0, y0) = (x.floor() as i32, y.floor() as i32);
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.set(x0 + dx, y0 + dy, color);
            }
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(SURFACE_W)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Surface({}x{})", SURFACE_W, SURFACE_H)
    }
}
