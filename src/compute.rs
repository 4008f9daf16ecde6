/// Formation logic: the session state machine and the wave AI.
///
/// One `tick` is a single cooperative step: formation update (wave
/// direction, fire selection, saucer schedule), then every actor's own
/// update, then the cull pass and the formation's reactions to it.  All
/// randomness comes through the injected `rng` so callers control
/// determinism (tests use a seeded RNG).

use rand::Rng;

use crate::actors::Culled;
use crate::entities::{
    Actor, ActorId, ActorKind, Command, Decoration, FireSelector, GameState, RenderItem,
    ScreenState,
};
use crate::error::SimError;
use crate::registry::ActorRegistry;
use crate::sprite::{self, Corner};
use crate::tuning::*;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh session sitting on the title screen.
pub fn new_game(width: u16, height: u16) -> GameState {
    let mut state = GameState {
        actors: ActorRegistry::new(),
        invaders: Vec::new(),
        direction: WAVE_DIRECTION,
        fire: None,
        player: None,
        lives: Vec::new(),
        score: 0,
        screen: ScreenState::Title,
        saucer_timer: 0,
        saucer: None,
        width,
        height,
        frame: 0,
    };
    show_title(&mut state);
    state
}

fn show_title(state: &mut GameState) {
    let right = ARENA_WIDTH as i32 - 9;
    let bottom = ARENA_HEIGHT as i32 - 6;
    for corner in Corner::ALL {
        let ((ex, ey), (ax, ay)) = match corner {
            Corner::UpperLeft => ((1, 1), (4, 3)),
            Corner::UpperRight => ((right, 1), (right - 3, 3)),
            Corner::LowerLeft => ((1, bottom), (4, bottom - 2)),
            Corner::LowerRight => ((right, bottom), (right - 3, bottom - 2)),
        };
        state.actors.spawn(Actor::decoration(
            Decoration::Static,
            ex,
            ey,
            sprite::corner_frames(corner),
        ));
        state.actors.spawn(Actor::decoration(
            Decoration::Arrow {
                corner,
                dx: f64::from(ax),
                dy: f64::from(ay),
                angle: 0.0,
            },
            ax,
            ay,
            sprite::arrow_frames(corner),
        ));
    }
    state.actors.spawn(Actor::decoration(
        Decoration::Logo {
            target_y: LOGO_TARGET_Y,
        },
        LOGO_X,
        LOGO_START_Y,
        sprite::logo_frames(),
    ));
    let (x, y) = TITLE_HINT_POS;
    state.actors.spawn(Actor::text(
        x,
        y,
        "ADJUST YOUR TERMINAL TO SEE ALL FOUR CORNERS OF THE ARENA",
    ));
    let (x, y) = TITLE_PROMPT_POS;
    state.actors.spawn(Actor::text(x, y, "PRESS ENTER OR SPACE TO PLAY"));
}

/// Title → Play: clear the title actors, place the defender, its reserves
/// and the score board.  The wave itself is built by the next tick.
pub fn start_game(state: &mut GameState) {
    state.actors.clear();
    state.invaders.clear();
    state.fire = None;
    state.saucer = None;
    state.saucer_timer = 0;
    state.lives.clear();
    state.score = 0;
    state.direction = WAVE_DIRECTION;

    state.player = Some(
        state
            .actors
            .spawn(Actor::defender(DEFENDER_START_X, DEFENDER_Y)),
    );
    state.actors.spawn(Actor::decoration(
        Decoration::ScoreBoard,
        SCORE_X,
        SCORE_Y,
        sprite::text_frames(&format!("score {:06}", 0)),
    ));
    for i in 0..RESERVE_COUNT {
        let x = RESERVE_X + i as i32 * RESERVE_SPACING;
        let id = state.actors.spawn(Actor::defender(x, RESERVE_Y));
        state.lives.push(id);
    }
    state.screen = ScreenState::Play;
    log::info!("session started with {} reserves", state.lives.len());
}

/// Build the 9 × 5 wave: one squid row, two crab rows, two octopus rows.
pub fn create_wave(state: &mut GameState) {
    state.direction = WAVE_DIRECTION;
    state.invaders.clear();

    for (kind, y, x0) in WAVE_ROWS {
        for col in 0..WAVE_COLUMNS {
            let x = x0 + col as i32 * COLUMN_SPACING;
            let id = state.actors.spawn(Actor::invader(kind, col, x, y));
            state.invaders.push(id);
        }
    }
    state.fire = Some(FireSelector::new(state.invaders.last().copied()));
    log::info!("wave of {} invaders built", state.invaders.len());
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Apply one input command.  `Quit` is the caller's business.
pub fn apply_command(state: &mut GameState, command: Command) {
    if let Command::Resize { width, height } = command {
        state.width = width;
        state.height = height;
        return;
    }
    match state.screen {
        ScreenState::Title => {
            if command != Command::Quit {
                start_game(state);
            }
        }
        ScreenState::Play => match command {
            Command::MoveLeft => steer_player(state, -DEFENDER_IMPULSE),
            Command::MoveRight => steer_player(state, DEFENDER_IMPULSE),
            Command::Fire => player_fire(state),
            _ => {}
        },
        ScreenState::GameOver => {}
    }
}

fn steer_player(state: &mut GameState, impulse: f64) {
    if let Some(player) = state.player.and_then(|id| state.actors.get_mut(id)) {
        player.steer(impulse);
    }
}

/// Spawn an upward shot from the defender; a no-op while it is exploding.
pub fn player_fire(state: &mut GameState) {
    let shot = state
        .player
        .and_then(|id| state.actors.get(id))
        .and_then(Actor::fire);
    if let Some(shot) = shot {
        state.actors.spawn(shot);
    }
}

// ── Per-tick step ────────────────────────────────────────────────────────────

/// Advance the simulation by one tick.
pub fn tick(state: &mut GameState, rng: &mut impl Rng) -> Result<(), SimError> {
    state.frame += 1;

    if state.screen == ScreenState::Play && state.invaders.is_empty() {
        create_wave(state);
    }
    update_formation(state, rng)?;
    update_actors(state, rng);
    cull(state, rng)
}

/// Wave direction, fire selection and the saucer schedule.
pub fn update_formation(state: &mut GameState, rng: &mut impl Rng) -> Result<(), SimError> {
    if state.screen != ScreenState::Title {
        check_direction(state);
    }
    if state.screen == ScreenState::Play {
        update_fire_selector(state)?;
        if state.fire.as_ref().is_some_and(|f| f.fired) {
            select_fire_target(state, rng);
        }
    }

    let interval = match state.screen {
        ScreenState::Title => SAUCER_INTERVAL_TITLE,
        _ => SAUCER_INTERVAL_PLAY,
    };
    state.saucer_timer += 1;
    if state.saucer_timer > interval {
        state.saucer_timer = 0;
        if state.saucer.is_none() {
            spawn_saucer(state, rng);
        }
    }
    Ok(())
}

/// Run every actor's own update, in spawn order.
pub fn update_actors(state: &mut GameState, rng: &mut impl Rng) {
    for id in state.actors.ids() {
        // Taken out while it updates so it can see the rest of the state.
        let Some(mut actor) = state.actors.remove(id) else {
            continue;
        };
        actor.update(state, rng);
        state.actors.restore(id, actor);
    }
}

/// Bounce the wave off the margins.  The first invader (in wave order)
/// past the margin fixes one correction that moves the whole wave; the
/// wave then drops a row unless the game is already over.
pub fn check_direction(state: &mut GameState) {
    let delta = state.invaders.iter().find_map(|id| {
        let x = state.actors.get(*id)?.sprite.x;
        if x > WAVE_RIGHT_MARGIN && state.direction > 0 {
            Some(WAVE_RIGHT_MARGIN - x)
        } else if x < WAVE_LEFT_MARGIN && state.direction < 0 {
            Some(WAVE_LEFT_MARGIN - x)
        } else {
            None
        }
    });
    let Some(delta) = delta else {
        return;
    };

    let drop = state.screen != ScreenState::GameOver;
    let player_y = state
        .player
        .and_then(|id| state.actors.get(id))
        .map(|p| p.sprite.y);
    let mut landed = false;
    for id in &state.invaders {
        let Some(invader) = state.actors.get_mut(*id) else {
            continue;
        };
        invader.sprite.x += delta;
        if drop {
            invader.sprite.y += WAVE_DROP;
            if player_y.is_some_and(|py| py - invader.sprite.y < LETHAL_GAP) {
                landed = true;
            }
        }
    }
    state.direction = -state.direction;

    if landed {
        log::info!("wave reached the defender");
        let defenders: Vec<ActorId> = state.player.iter().chain(&state.lives).copied().collect();
        for id in defenders {
            if let Some(defender) = state.actors.get_mut(id) {
                defender.explode();
            }
        }
        enter_game_over(state);
    }
}

fn update_fire_selector(state: &mut GameState) -> Result<(), SimError> {
    let Some(fire) = state.fire.as_mut() else {
        return Ok(());
    };
    if let Some(target) = fire.target {
        if !state.invaders.contains(&target) {
            return Err(SimError::StaleFireTarget { target });
        }
    }
    fire.timer += 1;
    if fire.timer <= fire.timeout {
        return Ok(());
    }
    fire.timer = 0;
    fire.fired = true;

    let Some(target) = fire.target else {
        return Ok(());
    };
    let shooter = state
        .actors
        .get(target)
        .ok_or(SimError::StaleFireTarget { target })?;
    if !matches!(shooter.kind, ActorKind::Invader(_)) {
        return Err(SimError::FireTargetNotInvader { target });
    }
    // An invader hit after it was picked has nothing left to shoot with.
    if let Some(shot) = shooter.fire() {
        state.actors.spawn(shot);
    }
    Ok(())
}

/// Choose the next shooter: a random occupied column, then the last live
/// invader of that column in wave order (the front-most one).  With no
/// eligible invader the selector idles until the next expiry.
pub fn select_fire_target(state: &mut GameState, rng: &mut impl Rng) {
    let eligible = |id: &ActorId| {
        state.actors.get(*id).and_then(|a| match &a.kind {
            ActorKind::Invader(i) if !i.exploding && !i.dead => Some(i.col),
            _ => None,
        })
    };

    let mut columns: Vec<usize> = state.invaders.iter().filter_map(eligible).collect();
    columns.sort_unstable();
    columns.dedup();

    let target = if columns.is_empty() {
        None
    } else {
        let col = columns[rng.gen_range(0..columns.len())];
        state
            .invaders
            .iter()
            .rev()
            .find(|id| eligible(*id) == Some(col))
            .copied()
    };

    let fire = state.fire.get_or_insert_with(|| FireSelector::new(None));
    fire.target = target;
    fire.timer = 0;
    fire.timeout = FIRE_TIMEOUT;
    fire.fired = false;
}

fn spawn_saucer(state: &mut GameState, rng: &mut impl Rng) {
    let direction = if rng.gen_bool(0.5) { 1 } else { -1 };
    let x = if direction > 0 {
        SAUCER_LEFT_START
    } else {
        SAUCER_RIGHT_EDGE
    };
    let y = if state.screen == ScreenState::Title {
        TITLE_SAUCER_Y
    } else {
        SAUCER_Y
    };
    state.saucer = Some(state.actors.spawn(Actor::saucer(direction, x, y)));
    log::debug!("saucer launched at x={x} heading {direction}");
}

fn enter_game_over(state: &mut GameState) {
    if state.screen == ScreenState::GameOver {
        return;
    }
    state.screen = ScreenState::GameOver;
    let (x, y) = GAME_OVER_POS;
    state.actors.spawn(Actor::text(x, y, "GAME OVER"));
    let (x, y) = QUIT_HINT_POS;
    state.actors.spawn(Actor::text(x, y, "PRESS Q TO QUIT"));
    log::info!("game over with score {}", state.score);
}

// ── Cull pass ────────────────────────────────────────────────────────────────

/// Remove dead actors and let the formation react to each removal.
pub fn cull(state: &mut GameState, rng: &mut impl Rng) -> Result<(), SimError> {
    for id in state.actors.ids() {
        if !state.actors.get(id).is_some_and(Actor::is_dead) {
            continue;
        }
        let Some(actor) = state.actors.remove(id) else {
            continue;
        };
        match actor.on_culled() {
            Culled::Shot | Culled::Decoration => {}
            Culled::Invader => invader_culled(state, id, rng)?,
            Culled::Saucer => {
                if state.saucer == Some(id) {
                    state.saucer = None;
                }
            }
            Culled::Defender => defender_culled(state, id),
        }
    }
    Ok(())
}

fn invader_culled(state: &mut GameState, id: ActorId, rng: &mut impl Rng) -> Result<(), SimError> {
    let idx = state
        .invaders
        .iter()
        .position(|i| *i == id)
        .ok_or(SimError::UntrackedInvader { id })?;
    state.invaders.remove(idx);

    let remaining = state.invaders.len();
    if SPEED_UP_CHECKPOINTS.contains(&remaining) {
        for id in &state.invaders {
            if let Some(ActorKind::Invader(i)) = state.actors.get_mut(*id).map(|a| &mut a.kind) {
                i.timeout = i.timeout.saturating_sub(1);
            }
        }
        log::debug!("wave sped up at {remaining} invaders");
    }

    if state.fire.as_ref().is_some_and(|f| f.target == Some(id)) {
        select_fire_target(state, rng);
    }
    Ok(())
}

fn defender_culled(state: &mut GameState, id: ActorId) {
    if let Some(idx) = state.lives.iter().position(|l| *l == id) {
        state.lives.remove(idx);
        return;
    }
    if state.player != Some(id) {
        return;
    }
    state.player = None;
    if state.screen != ScreenState::Play {
        return;
    }
    match state.lives.pop() {
        Some(next) => {
            if let Some(defender) = state.actors.get_mut(next) {
                defender.sprite.y = DEFENDER_Y;
            }
            state.player = Some(next);
            log::info!("life lost, {} in reserve", state.lives.len());
        }
        None => enter_game_over(state),
    }
}

// ── Renderer boundary ────────────────────────────────────────────────────────

/// Visible actors for this frame; clipping is left to the renderer.
pub fn render_list(state: &GameState) -> Vec<RenderItem<'_>> {
    state.actors.render()
}
