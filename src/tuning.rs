// Gameplay tuning.  Coordinates are arena cells; times are ticks.

use crate::entities::InvaderKind;

// ── Arena ────────────────────────────────────────────────────────────────────

pub const ARENA_WIDTH: u16 = 108;
pub const ARENA_HEIGHT: u16 = 82;
/// Shots die above this row...
pub const SHOT_CEILING: i32 = 0;
/// ...and below this one.
pub const SHOT_FLOOR: i32 = 80;

// ── Wave ─────────────────────────────────────────────────────────────────────

pub const WAVE_COLUMNS: usize = 9;
/// Row kind, row y and the x of column 0, front rows last.
pub const WAVE_ROWS: [(InvaderKind, i32, i32); 5] = [
    (InvaderKind::Squid, 7, 10),
    (InvaderKind::Crab, 13, 9),
    (InvaderKind::Crab, 19, 9),
    (InvaderKind::Octopus, 25, 9),
    (InvaderKind::Octopus, 31, 9),
];
pub const COLUMN_SPACING: i32 = 10;
pub const WAVE_DIRECTION: i32 = 2;
pub const WAVE_RIGHT_MARGIN: i32 = 98;
pub const WAVE_LEFT_MARGIN: i32 = 3;
pub const WAVE_DROP: i32 = 3;
/// Rows between an invader and the defender below which the wave has landed.
pub const LETHAL_GAP: i32 = 5;
pub const INVADER_TIMEOUT: u32 = 6;
/// Remaining-invader counts at which the whole wave speeds up one notch.
pub const SPEED_UP_CHECKPOINTS: [usize; 6] = [36, 27, 18, 9, 3, 2];

pub const FIRE_TIMEOUT: u32 = 5;

// ── Defender ─────────────────────────────────────────────────────────────────

pub const DEFENDER_START_X: i32 = 34;
pub const DEFENDER_Y: i32 = 70;
pub const DEFENDER_MIN_X: i32 = 2;
pub const DEFENDER_MAX_X: i32 = 100;
pub const DEFENDER_IMPULSE: f64 = 3.0;
pub const DEFENDER_DAMPING: f64 = 0.85;
pub const DEFENDER_TIMEOUT: u32 = 2;
/// The wreck is gone once its explosion has stepped more than this many times.
pub const DEFENDER_EXPLOSION_STEPS: u32 = 4;
pub const RESERVE_COUNT: usize = 2;
pub const RESERVE_Y: i32 = 75;
pub const RESERVE_X: i32 = 2;
pub const RESERVE_SPACING: i32 = 8;

// ── Shots ────────────────────────────────────────────────────────────────────

pub const SHOT_SPEED: i32 = 2;
pub const SHOT_X_OFFSET: i32 = 3;

// ── Saucer ───────────────────────────────────────────────────────────────────

pub const SAUCER_Y: i32 = 4;
pub const TITLE_SAUCER_Y: i32 = 34;
pub const SAUCER_TIMEOUT: u32 = 3;
pub const SAUCER_LEFT_START: i32 = -4;
pub const SAUCER_RIGHT_EDGE: i32 = 100;
pub const SAUCER_INTERVAL_TITLE: u32 = 150;
pub const SAUCER_INTERVAL_PLAY: u32 = 500;
pub const SAUCER_BONUS: [u32; 6] = [50, 100, 150, 200, 250, 300];

// ── HUD & title ──────────────────────────────────────────────────────────────

pub const SCORE_X: i32 = 20;
pub const SCORE_Y: i32 = 1;
pub const LOGO_X: i32 = 32;
pub const LOGO_START_Y: i32 = -10;
pub const LOGO_TARGET_Y: i32 = 12;
pub const LOGO_EASING: f64 = 0.3;
pub const ARROW_PHASE_STEP: f64 = 0.25;
pub const ARROW_SWAY: f64 = 0.2;
pub const TITLE_HINT_POS: (i32, i32) = (22, 24);
pub const TITLE_PROMPT_POS: (i32, i32) = (36, 28);
pub const GAME_OVER_POS: (i32, i32) = (46, 40);
pub const QUIT_HINT_POS: (i32, i32) = (44, 43);
