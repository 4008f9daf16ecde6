/// Input boundary: terminal events in, core commands out.

use std::sync::mpsc::{Receiver, SyncSender, TrySendError};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Command;

/// Map one terminal event to a command.  Anything unrecognised, and key
/// releases, map to `None` and are ignored.
pub fn command_for(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) => key_command(key),
        Event::Resize(width, height) => Some(Command::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

fn key_command(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Char(' ') => Some(Command::Fire),
        KeyCode::Enter => Some(Command::AdvanceFromTitle),
        _ => None,
    }
}

// ── Event pump ───────────────────────────────────────────────────────────────

/// Outcome of offering one event to the tick loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offer {
    Queued,
    /// The slot was already taken; the event is gone.
    Dropped,
    /// The tick loop has hung up.
    Closed,
}

/// Hand an event to the tick loop without blocking.  The channel is meant
/// to be a `sync_channel(1)`, so at most one event waits per tick.
pub fn offer(tx: &SyncSender<Event>, event: Event) -> Offer {
    match tx.try_send(event) {
        Ok(()) => Offer::Queued,
        Err(TrySendError::Full(_)) => Offer::Dropped,
        Err(TrySendError::Disconnected(_)) => Offer::Closed,
    }
}

/// Take at most one pending event and map it.  `None` covers both an
/// empty slot and an unbound event.
pub fn next_command(rx: &Receiver<Event>) -> Option<Command> {
    rx.try_recv().ok().as_ref().and_then(command_for)
}
