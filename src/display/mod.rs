/// Terminal renderer.
///
/// The core hands over the visible actors with their positions and
/// frames; this module composites them onto a cell canvas, folds two
/// arena rows into each terminal row with half-block glyphs, clips to the
/// terminal, and writes the result.  No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::compute::render_list;
use crate::entities::{GameState, InvaderKind, RenderItem, Tint};
use crate::sprite::Cell;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_DEFENDER: Color = Color::Green;
const C_SQUID: Color = Color::Magenta;
const C_CRAB: Color = Color::Cyan;
const C_OCTOPUS: Color = Color::Yellow;
const C_SAUCER: Color = Color::Red;
const C_SHOT: Color = Color::White;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_DECORATION: Color = Color::DarkBlue;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

const HINT: &str = "← → / A D : Move   SPACE : Fire   Q : Quit";

fn colour(tint: Tint) -> Color {
    match tint {
        Tint::Defender => C_DEFENDER,
        Tint::Invader(InvaderKind::Squid) => C_SQUID,
        Tint::Invader(InvaderKind::Crab) => C_CRAB,
        Tint::Invader(InvaderKind::Octopus) => C_OCTOPUS,
        Tint::Saucer => C_SAUCER,
        Tint::Shot => C_SHOT,
        Tint::Explosion => C_EXPLOSION,
        Tint::Decoration => C_DECORATION,
        Tint::Text => C_TEXT,
    }
}

// ── Composition ───────────────────────────────────────────────────────────────

/// A terminal-sized grid of glyphs; `None` is an untouched cell.
pub type Screen = Vec<Vec<Option<(char, Tint)>>>;

/// Composite `items` onto `cols × rows` terminal cells.  Each terminal row
/// covers two arena rows; text cells win over filled cells.
pub fn compose(items: &[RenderItem<'_>], cols: u16, rows: u16) -> Screen {
    let (cols, rows) = (usize::from(cols), usize::from(rows));
    let mut canvas: Vec<Option<(Cell, Tint)>> = vec![None; cols * rows * 2];

    for item in items {
        for (dx, dy, cell) in item.frame.filled_cells() {
            let (Ok(x), Ok(y)) = (
                usize::try_from(i64::from(item.x) + i64::from(dx)),
                usize::try_from(i64::from(item.y) + i64::from(dy)),
            ) else {
                continue;
            };
            if x >= cols || y >= rows * 2 {
                continue;
            }
            canvas[y * cols + x] = Some((cell, item.tint));
        }
    }

    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    let top = canvas[row * 2 * cols + col];
                    let bottom = canvas[(row * 2 + 1) * cols + col];
                    fold(top, bottom)
                })
                .collect()
        })
        .collect()
}

fn fold(top: Option<(Cell, Tint)>, bottom: Option<(Cell, Tint)>) -> Option<(char, Tint)> {
    match (top, bottom) {
        (Some((Cell::Char(c), tint)), _) | (_, Some((Cell::Char(c), tint))) => Some((c, tint)),
        (Some((_, tint)), Some(_)) => Some(('█', tint)),
        (Some((_, tint)), None) => Some(('▀', tint)),
        (None, Some((_, tint))) => Some(('▄', tint)),
        (None, None) => None,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    // Last terminal row is reserved for the controls hint.
    let rows = state.height.saturating_sub(1);
    let screen = compose(&render_list(state), state.width, rows);
    for (y, line) in screen.iter().enumerate() {
        for (x, glyph) in line.iter().enumerate() {
            let Some((c, tint)) = glyph else {
                continue;
            };
            out.queue(cursor::MoveTo(x as u16, y as u16))?;
            out.queue(style::SetForegroundColor(colour(*tint)))?;
            out.queue(Print(c))?;
        }
    }

    draw_controls_hint(out, state)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, state.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, state.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(HINT))?;
    Ok(())
}

// ── Terminal teardown ─────────────────────────────────────────────────────────

/// Show the cursor and leave the alternate screen.
pub fn restore<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    out.flush()
}

/// Puts the terminal back when dropped, including while unwinding from a
/// panic.  Create it right after raw mode is enabled.
pub struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    pub fn new(out: W) -> Self {
        TerminalGuard { out }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = restore(&mut self.out);
        let _ = terminal::disable_raw_mode();
    }
}
