//! Pixel Shooter, a 160x240 vertical arcade shooter.
//!
//! - `entities`: entity records, constants and the session state
//! - `sprites`: indexed bitmaps, colour maps and `blit`
//! - `surface`: the logical pixel grid frames are painted into
//! - `compute`: the per-frame simulation step
//! - `render`: state → pixels
//! - `input`: intent snapshots built from key/pointer events
//! - `driver`: the game loop and presenter boundary
//! - `config`: command-line settings for the terminal host

pub mod compute;
pub mod config;
pub mod driver;
pub mod entities;
pub mod input;
pub mod render;
pub mod sprites;
pub mod surface;

pub use driver::{GameLoop, Presenter, Schedule};
pub use input::Intents;
