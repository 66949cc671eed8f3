//! Terminal front end: drawing the surface, the HUD and the overlays.
//!
//! The logical surface is drawn with `▀` cells: the foreground colour is the
//! upper pixel, the background colour the lower one, so one terminal row
//! covers two pixel rows.  Large surfaces are shrunk by an integer factor
//! (`Layout::shrink` logical pixels per column).

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use pixel_shooter::entities::GameStatus;
use pixel_shooter::surface::{Rgb, Surface, SURFACE_H, SURFACE_W};
use pixel_shooter::Presenter;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;
const C_GAME_OVER: Color = Color::Red;

const MAX_SHRINK: u16 = 8;

fn term_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

// ── Presenter ─────────────────────────────────────────────────────────────────

/// Keeps the text the HUD and overlays show; fed by the game loop.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    score: u32,
    final_score: Option<u32>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_text(&self) -> String {
        format!("{:04}", self.score)
    }
}

impl Presenter for TerminalPresenter {
    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
        if score == 0 {
            self.final_score = None;
        }
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.final_score = Some(final_score);
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Where the playfield sits in the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub shrink: u16,
    pub origin_x: u16,
    pub origin_y: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Layout {
    /// Smallest shrink factor whose playfield (plus HUD and hint rows) fits,
    /// unless `forced` pins it.
    pub fn fit(term_w: u16, term_h: u16, forced: Option<u16>) -> Self {
        let fits = |k: u16| {
            let (cols, rows) = Self::extent(k);
            cols <= term_w && rows + 2 <= term_h
        };
        let shrink = forced
            .unwrap_or_else(|| (1..=MAX_SHRINK).find(|&k| fits(k)).unwrap_or(MAX_SHRINK))
            .max(1);
        let (cols, rows) = Self::extent(shrink);
        Self {
            shrink,
            origin_x: term_w.saturating_sub(cols) / 2,
            origin_y: 1,
            cols,
            rows,
        }
    }

    fn extent(k: u16) -> (u16, u16) {
        let k = k as usize;
        (
            SURFACE_W.div_ceil(k) as u16,
            SURFACE_H.div_ceil(2 * k) as u16,
        )
    }

    /// Terminal column → logical x (centre of the covered pixels).
    pub fn logical_x(&self, column: u16) -> f32 {
        let local = column.saturating_sub(self.origin_x).min(self.cols.saturating_sub(1));
        local as f32 * self.shrink as f32 + self.shrink as f32 / 2.0
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame: HUD, playfield and any overlay.
pub fn draw<W: Write>(
    out: &mut W,
    surface: &Surface,
    presenter: &TerminalPresenter,
    status: GameStatus,
    layout: &Layout,
) -> std::io::Result<()> {
    draw_hud(out, presenter, layout)?;
    draw_surface(out, surface, layout)?;

    match status {
        GameStatus::Idle => draw_start_screen(out, layout)?,
        GameStatus::Ended => draw_game_over(out, presenter, layout)?,
        GameStatus::Running => {}
    }

    draw_controls_hint(out, layout)?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_surface<W: Write>(out: &mut W, surface: &Surface, layout: &Layout) -> std::io::Result<()> {
    let k = layout.shrink as usize;
    let rows: Vec<&[Rgb]> = surface.rows().collect();
    let mut last: Option<(Rgb, Rgb)> = None;

    for row in 0..layout.rows as usize {
        out.queue(cursor::MoveTo(layout.origin_x, layout.origin_y + row as u16))?;
        let upper = rows[(row * 2 * k).min(SURFACE_H - 1)];
        let lower = rows[(row * 2 * k + k).min(SURFACE_H - 1)];
        for col in 0..layout.cols as usize {
            let x = (col * k).min(SURFACE_W - 1);
            let pair = (upper[x], lower[x]);
            if last != Some(pair) {
                out.queue(style::SetForegroundColor(term_color(pair.0)))?;
                out.queue(style::SetBackgroundColor(term_color(pair.1)))?;
                last = Some(pair);
            }
            out.queue(Print('▀'))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    presenter: &TerminalPresenter,
    layout: &Layout,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(cursor::MoveTo(layout.origin_x, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("SCORE {}", presenter.score_text())))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(layout.origin_x, layout.origin_y + layout.rows))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D / mouse : Move   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    layout: &Layout,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let cx = layout.origin_x + layout.cols / 2;
    let top = (layout.origin_y + layout.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, top + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(style::SetBackgroundColor(Color::Black))?;
        out.queue(Print(msg))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_start_screen<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    draw_centered(
        out,
        layout,
        &[
            ("★ PIXEL SHOOTER ★".to_string(), C_TITLE),
            (String::new(), C_HINT),
            ("SPACE / ENTER : Start".to_string(), Color::White),
        ],
    )
}

fn draw_game_over<W: Write>(
    out: &mut W,
    presenter: &TerminalPresenter,
    layout: &Layout,
) -> std::io::Result<()> {
    let final_score = presenter.final_score.unwrap_or(presenter.score);
    draw_centered(
        out,
        layout,
        &[
            ("╔══════════════╗".to_string(), C_GAME_OVER),
            ("║  GAME  OVER  ║".to_string(), C_GAME_OVER),
            ("╚══════════════╝".to_string(), C_GAME_OVER),
            (format!("Final Score: {}", final_score), C_HUD_SCORE),
            ("SPACE - Play Again  Q - Quit".to_string(), Color::White),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_picks_the_smallest_shrink_that_fits() {
        assert_eq!(Layout::fit(200, 130, None).shrink, 1);
        assert_eq!(Layout::fit(100, 70, None).shrink, 2);
        assert_eq!(Layout::fit(80, 24, None).shrink, 6);
    }

    #[test]
    fn column_maps_back_to_logical_x() {
        let layout = Layout::fit(80, 64, Some(2));
        assert_eq!(layout.cols, 80);
        assert_eq!(layout.logical_x(0), 1.0);
        assert_eq!(layout.logical_x(79), 159.0);
    }

    #[test]
    fn score_is_zero_padded() {
        let mut p = TerminalPresenter::new();
        p.on_score_changed(30);
        assert_eq!(p.score_text(), "0030");
        p.on_game_over(30);
        assert_eq!(p.final_score, Some(30));
        p.on_score_changed(0);
        assert_eq!(p.final_score, None);
    }
}
