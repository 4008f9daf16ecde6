/// Actor and session data types.  Behaviour lives in `actors` and `compute`.

use crate::registry::ActorRegistry;
use crate::sprite::{Corner, Frame, Sprite};
use crate::tuning;

/// Stable handle into the `ActorRegistry`.  Ids are never reused within a
/// session, so a stale id simply stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenState {
    Title,
    Play,
    GameOver,
}

/// The closed command set accepted by the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
    AdvanceFromTitle,
    Quit,
    Resize { width: u16, height: u16 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvaderKind {
    /// Type 0, top row.
    Squid,
    /// Type 1, middle rows.
    Crab,
    /// Type 2, bottom rows.
    Octopus,
}

impl InvaderKind {
    pub fn points(self) -> u32 {
        match self {
            InvaderKind::Squid => 30,
            InvaderKind::Crab => 20,
            InvaderKind::Octopus => 10,
        }
    }
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// A shot.  Negative `vy` travels up (player), positive travels down (enemy).
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub vy: i32,
    pub dead: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Invader {
    /// Firing lane, 0..WAVE_COLUMNS.
    pub col: usize,
    pub kind: InvaderKind,
    pub timer: u32,
    pub timeout: u32,
    pub exploding: bool,
    pub dead: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Saucer {
    /// +1 moving right, -1 moving left.
    pub direction: i32,
    pub timer: u32,
    pub timeout: u32,
    pub exploding: bool,
    pub dead: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Defender {
    pub vx: f64,
    pub ax: f64,
    pub timer: u32,
    pub timeout: u32,
    /// Explosion steps taken so far.
    pub counter: u32,
    pub exploding: bool,
    pub dead: bool,
}

/// Cosmetic actors: title art, corner markers, text and the score board.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoration {
    /// Eases down towards `target_y`.
    Logo { target_y: i32 },
    /// Oscillates along its corner's diagonal around `(dx, dy)`.
    Arrow {
        corner: Corner,
        dx: f64,
        dy: f64,
        angle: f64,
    },
    /// Re-renders the session score every update.
    ScoreBoard,
    Static,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActorKind {
    Projectile(Projectile),
    Invader(Invader),
    Saucer(Saucer),
    Defender(Defender),
    Decoration(Decoration),
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub sprite: Sprite,
    pub kind: ActorKind,
}

/// Colour class handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Defender,
    Invader(InvaderKind),
    Saucer,
    Shot,
    Explosion,
    Decoration,
    Text,
}

/// One visible actor as the renderer sees it.
#[derive(Clone, Copy, Debug)]
pub struct RenderItem<'a> {
    pub x: i32,
    pub y: i32,
    pub frame: &'a Frame,
    pub tint: Tint,
}

// ── Formation-level state ─────────────────────────────────────────────────────

/// Picks which invader fires next and counts down to the shot.
#[derive(Clone, Debug, PartialEq)]
pub struct FireSelector {
    pub target: Option<ActorId>,
    pub timer: u32,
    pub timeout: u32,
    /// Set when the countdown expired; consumed by the formation update.
    pub fired: bool,
}

impl FireSelector {
    pub fn new(target: Option<ActorId>) -> Self {
        FireSelector {
            target,
            timer: 0,
            timeout: tuning::FIRE_TIMEOUT,
            fired: false,
        }
    }
}

/// The whole session: actor store, wave, player, lives, score and screen.
#[derive(Clone, Debug)]
pub struct GameState {
    pub actors: ActorRegistry,
    /// Live invaders in wave-build order.
    pub invaders: Vec<ActorId>,
    /// Horizontal step applied to the whole wave.
    pub direction: i32,
    pub fire: Option<FireSelector>,
    pub player: Option<ActorId>,
    /// Stand-by defenders; the last one is promoted first.
    pub lives: Vec<ActorId>,
    pub score: u32,
    pub screen: ScreenState,
    pub saucer_timer: u32,
    pub saucer: Option<ActorId>,
    /// Last terminal size reported through `Command::Resize`.
    pub width: u16,
    pub height: u16,
    pub frame: u64,
}
