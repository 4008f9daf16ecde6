use std::io::Write;
use std::sync::{Arc, Mutex};

use terminal_invaders::compute::new_game;
use terminal_invaders::display::{compose, render, restore, TerminalGuard};
use terminal_invaders::entities::{RenderItem, Tint};
use terminal_invaders::sprite::Frame;

fn item(x: i32, y: i32, frame: &Frame) -> RenderItem<'_> {
    RenderItem {
        x,
        y,
        frame,
        tint: Tint::Shot,
    }
}

#[test]
fn two_arena_rows_fold_into_one() {
    let full = Frame::from_rows(&["X", "X"]);
    let top = Frame::from_rows(&["X", " "]);
    let bottom = Frame::from_rows(&[" ", "X"]);
    let items = [item(0, 0, &full), item(1, 0, &top), item(2, 0, &bottom)];

    let screen = compose(&items, 4, 2);
    assert_eq!(screen.len(), 2);
    assert_eq!(screen[0][0], Some(('█', Tint::Shot)));
    assert_eq!(screen[0][1], Some(('▀', Tint::Shot)));
    assert_eq!(screen[0][2], Some(('▄', Tint::Shot)));
    assert_eq!(screen[0][3], None);
    assert!(screen[1].iter().all(Option::is_none));
}

#[test]
fn odd_rows_land_in_the_lower_half() {
    let dot = Frame::from_rows(&["X"]);
    let screen = compose(&[item(0, 3, &dot)], 1, 3);
    assert_eq!(screen[1][0], Some(('▄', Tint::Shot)));
}

#[test]
fn text_wins_over_blocks() {
    let block = Frame::from_rows(&["X", "X"]);
    let text = Frame::text("A");
    let screen = compose(&[item(0, 0, &block), item(0, 1, &text)], 1, 1);
    assert_eq!(screen[0][0], Some(('A', Tint::Shot)));
}

#[test]
fn off_screen_cells_are_clipped() {
    let wide = Frame::from_rows(&["XXXX"]);
    let items = [item(-2, 0, &wide), item(0, 10, &wide)];
    let screen = compose(&items, 3, 2);
    assert_eq!(screen[0][0], Some(('▀', Tint::Shot)));
    assert_eq!(screen[0][1], Some(('▀', Tint::Shot)));
    assert_eq!(screen[0][2], None);
}

#[test]
fn zero_sized_terminal_composes_nothing() {
    let dot = Frame::from_rows(&["X"]);
    assert!(compose(&[item(0, 0, &dot)], 0, 0).is_empty());
}

#[test]
fn render_writes_a_frame() {
    let state = new_game(120, 45);
    let mut out: Vec<u8> = Vec::new();
    render(&mut out, &state).expect("writing to a Vec cannot fail");
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("Fire"));
    assert!(text.contains('█') || text.contains('▀') || text.contains('▄'));
}

#[test]
fn widest_terminal_composes() {
    let dot = Frame::from_rows(&["X"]);
    let edge = i32::from(u16::MAX) - 1;
    let screen = compose(&[item(edge, 1, &dot), item(edge + 1, 0, &dot)], u16::MAX, 1);
    assert_eq!(screen[0].len(), usize::from(u16::MAX));
    assert_eq!(screen[0][usize::from(u16::MAX) - 1], Some(('▄', Tint::Shot)));
}

// ── Teardown ──────────────────────────────────────────────────────────────────

const SHOW_CURSOR: &str = "\x1b[?25h";
const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("buffer lock")).into_owned()
    }
}

#[test]
fn restore_shows_cursor_and_leaves_alt_screen() {
    let mut out: Vec<u8> = Vec::new();
    restore(&mut out).expect("writing to a Vec cannot fail");
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains(SHOW_CURSOR));
    assert!(text.contains(LEAVE_ALT_SCREEN));
}

#[test]
fn guard_restores_when_a_tick_panics() {
    let buf = SharedBuf::default();
    let inner = buf.clone();
    let result = std::panic::catch_unwind(move || {
        let _guard = TerminalGuard::new(inner);
        panic!("tick blew up");
    });
    assert!(result.is_err());
    let text = buf.text();
    assert!(text.contains(SHOW_CURSOR));
    assert!(text.contains(LEAVE_ALT_SCREEN));
}

#[test]
fn guard_restores_on_normal_exit() {
    let buf = SharedBuf::default();
    {
        let _guard = TerminalGuard::new(buf.clone());
        assert!(buf.text().is_empty());
    }
    assert!(buf.text().contains(LEAVE_ALT_SCREEN));
}
