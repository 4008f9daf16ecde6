/// Per-actor behaviour.
///
/// Every actor kind answers the same three questions: how it advances one
/// tick (`update`), whether it is finished (`is_dead`), and what the
/// formation must do once it is culled (`on_culled`).  Updates receive the
/// whole `GameState` with the actor itself taken out of the registry, so a
/// projectile can resolve hits against everything else without aliasing.

use rand::Rng;

use crate::entities::{
    Actor, ActorKind, Decoration, Defender, GameState, Invader, InvaderKind, Projectile, Saucer,
    ScreenState, Tint,
};
use crate::sprite::{self, Corner, Frame, Sprite};
use crate::tuning::*;

/// What the formation reacts to when an actor leaves the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Culled {
    Shot,
    Invader,
    Saucer,
    Defender,
    Decoration,
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl Actor {
    pub fn invader(kind: InvaderKind, col: usize, x: i32, y: i32) -> Self {
        Actor {
            sprite: Sprite::new(x, y, sprite::invader_frames(kind)),
            kind: ActorKind::Invader(Invader {
                col,
                kind,
                timer: 0,
                timeout: INVADER_TIMEOUT,
                exploding: false,
                dead: false,
            }),
        }
    }

    pub fn defender(x: i32, y: i32) -> Self {
        Actor {
            sprite: Sprite::new(x, y, sprite::defender_frames()),
            kind: ActorKind::Defender(Defender {
                vx: 0.0,
                ax: 0.0,
                timer: 0,
                timeout: DEFENDER_TIMEOUT,
                counter: 0,
                exploding: false,
                dead: false,
            }),
        }
    }

    pub fn saucer(direction: i32, x: i32, y: i32) -> Self {
        Actor {
            sprite: Sprite::new(x, y, sprite::saucer_frames()),
            kind: ActorKind::Saucer(Saucer {
                direction,
                timer: 0,
                timeout: SAUCER_TIMEOUT,
                exploding: false,
                dead: false,
            }),
        }
    }

    pub fn projectile(x: i32, y: i32, vy: i32, frames: Vec<Frame>) -> Self {
        Actor {
            sprite: Sprite::new(x, y, frames),
            kind: ActorKind::Projectile(Projectile { vy, dead: false }),
        }
    }

    pub fn player_shot(x: i32, y: i32) -> Self {
        Self::projectile(x, y, -SHOT_SPEED, sprite::player_shot_frames())
    }

    pub fn enemy_shot(x: i32, y: i32) -> Self {
        Self::projectile(x, y, SHOT_SPEED, sprite::enemy_shot_frames())
    }

    pub fn decoration(decoration: Decoration, x: i32, y: i32, frames: Vec<Frame>) -> Self {
        Actor {
            sprite: Sprite::new(x, y, frames),
            kind: ActorKind::Decoration(decoration),
        }
    }

    pub fn text(x: i32, y: i32, line: &str) -> Self {
        Self::decoration(Decoration::Static, x, y, sprite::text_frames(line))
    }
}

// ── Capability interface ─────────────────────────────────────────────────────

impl Actor {
    pub fn update<R: Rng>(&mut self, state: &mut GameState, rng: &mut R) {
        let sprite = &mut self.sprite;
        match &mut self.kind {
            ActorKind::Projectile(shot) => update_projectile(sprite, shot, state, rng),
            ActorKind::Invader(invader) => update_invader(sprite, invader, state),
            ActorKind::Saucer(saucer) => update_saucer(sprite, saucer),
            ActorKind::Defender(defender) => update_defender(sprite, defender),
            ActorKind::Decoration(decoration) => update_decoration(sprite, decoration, state),
        }
    }

    pub fn is_dead(&self) -> bool {
        match &self.kind {
            ActorKind::Projectile(p) => p.dead,
            ActorKind::Invader(i) => i.dead,
            ActorKind::Saucer(s) => s.dead,
            ActorKind::Defender(d) => d.dead,
            ActorKind::Decoration(_) => false,
        }
    }

    pub fn on_culled(&self) -> Culled {
        match &self.kind {
            ActorKind::Projectile(_) => Culled::Shot,
            ActorKind::Invader(_) => Culled::Invader,
            ActorKind::Saucer(_) => Culled::Saucer,
            ActorKind::Defender(_) => Culled::Defender,
            ActorKind::Decoration(_) => Culled::Decoration,
        }
    }

    pub fn is_exploding(&self) -> bool {
        match &self.kind {
            ActorKind::Invader(i) => i.exploding,
            ActorKind::Saucer(s) => s.exploding,
            ActorKind::Defender(d) => d.exploding,
            _ => false,
        }
    }

    /// Switch to the explosion animation.  Returns `false` if the actor
    /// cannot explode or already is.
    pub fn explode(&mut self) -> bool {
        let frames = match &mut self.kind {
            ActorKind::Invader(i) if !i.exploding && !i.dead => {
                i.exploding = true;
                sprite::explosion_frames()
            }
            ActorKind::Saucer(s) if !s.exploding && !s.dead => {
                s.exploding = true;
                sprite::explosion_frames()
            }
            ActorKind::Defender(d) if !d.exploding && !d.dead => {
                d.exploding = true;
                d.timer = 0;
                sprite::defender_wreck_frames()
            }
            _ => return false,
        };
        self.sprite.set_frames(frames);
        true
    }

    /// Spawn this actor's shot, if it is able to shoot right now.
    pub fn fire(&self) -> Option<Actor> {
        let s = &self.sprite;
        match &self.kind {
            ActorKind::Invader(i) if !i.exploding && !i.dead => Some(Actor::enemy_shot(
                s.x + SHOT_X_OFFSET,
                s.y + s.height(),
            )),
            ActorKind::Defender(d) if !d.exploding && !d.dead => {
                Some(Actor::player_shot(s.x + SHOT_X_OFFSET, s.y))
            }
            _ => None,
        }
    }

    /// Directional snap: set a one-shot impulse and drop residual velocity.
    pub fn steer(&mut self, impulse: f64) {
        if let ActorKind::Defender(d) = &mut self.kind {
            if d.exploding || d.dead {
                return;
            }
            d.ax = impulse;
            d.vx = 0.0;
        }
    }

    pub fn tint(&self) -> Tint {
        match &self.kind {
            _ if self.is_exploding() => Tint::Explosion,
            ActorKind::Projectile(_) => Tint::Shot,
            ActorKind::Invader(i) => Tint::Invader(i.kind),
            ActorKind::Saucer(_) => Tint::Saucer,
            ActorKind::Defender(_) => Tint::Defender,
            ActorKind::Decoration(Decoration::ScoreBoard) => Tint::Text,
            ActorKind::Decoration(_) => Tint::Decoration,
        }
    }
}

// ── Updates ──────────────────────────────────────────────────────────────────

fn update_projectile<R: Rng>(
    sprite: &mut Sprite,
    shot: &mut Projectile,
    state: &mut GameState,
    rng: &mut R,
) {
    if shot.dead {
        return;
    }
    sprite.y += shot.vy;
    if sprite.y < SHOT_CEILING || sprite.y > SHOT_FLOOR {
        shot.dead = true;
        return;
    }
    sprite.advance_frame();
    let (x, y) = (sprite.x, sprite.y);

    if let Some(player) = state.player.and_then(|id| state.actors.get_mut(id)) {
        if !player.is_exploding() && player.sprite.hit_at_point(x, y + 1) && player.explode() {
            log::debug!("defender hit at ({x}, {})", y + 1);
            shot.dead = true;
        }
    }

    // No early exit: one shot may take out every invader under the point.
    for id in &state.invaders {
        let Some(target) = state.actors.get_mut(*id) else {
            continue;
        };
        let points = match &target.kind {
            ActorKind::Invader(i) if !i.exploding && !i.dead => i.kind.points(),
            _ => continue,
        };
        if target.sprite.hit_at_point(x, y) && target.explode() {
            state.score = state.score.saturating_add(points);
            shot.dead = true;
        }
    }

    if let Some(saucer) = state.saucer.and_then(|id| state.actors.get_mut(id)) {
        if !saucer.is_exploding() && saucer.sprite.hit_at_point(x, y + 1) && saucer.explode() {
            let bonus = SAUCER_BONUS[rng.gen_range(0..SAUCER_BONUS.len())];
            log::info!("saucer destroyed for {bonus}");
            state.score = state.score.saturating_add(bonus);
            shot.dead = true;
        }
    }
}

fn update_invader(sprite: &mut Sprite, invader: &mut Invader, state: &GameState) {
    if invader.dead {
        return;
    }
    // The wave is frozen once the game is over; explosions still finish.
    if state.screen == ScreenState::GameOver && !invader.exploding {
        return;
    }
    invader.timer += 1;
    if invader.timer > invader.timeout {
        invader.timer = 0;
        sprite.x += state.direction;
        if sprite.advance_frame() && invader.exploding {
            invader.dead = true;
        }
    }
}

fn update_saucer(sprite: &mut Sprite, saucer: &mut Saucer) {
    if saucer.dead {
        return;
    }
    if saucer.direction > 0 {
        sprite.x += 1;
        if sprite.x > SAUCER_RIGHT_EDGE {
            saucer.dead = true;
        }
    } else {
        sprite.x -= 1;
        if sprite.x + sprite.width() < 0 {
            saucer.dead = true;
        }
    }
    saucer.timer += 1;
    if saucer.timer > saucer.timeout {
        saucer.timer = 0;
        if sprite.advance_frame() && saucer.exploding {
            saucer.dead = true;
        }
    }
}

fn update_defender(sprite: &mut Sprite, defender: &mut Defender) {
    if defender.dead {
        return;
    }
    defender.vx += defender.ax;
    defender.ax = 0.0;
    defender.vx *= DEFENDER_DAMPING;
    sprite.x += defender.vx.round() as i32;

    if sprite.x < DEFENDER_MIN_X || sprite.x > DEFENDER_MAX_X {
        sprite.x = sprite.x.clamp(DEFENDER_MIN_X, DEFENDER_MAX_X);
        defender.vx = 0.0;
        defender.ax = 0.0;
    }

    if defender.exploding {
        defender.timer += 1;
        if defender.timer > defender.timeout {
            defender.timer = 0;
            sprite.advance_frame();
            defender.counter += 1;
            if defender.counter > DEFENDER_EXPLOSION_STEPS {
                defender.dead = true;
            }
        }
    }
}

fn update_decoration(sprite: &mut Sprite, decoration: &mut Decoration, state: &GameState) {
    match decoration {
        Decoration::Logo { target_y } => {
            let vy = f64::from(*target_y - sprite.y) * LOGO_EASING;
            sprite.y += vy.round() as i32;
        }
        Decoration::Arrow {
            corner,
            dx,
            dy,
            angle,
        } => {
            *angle += ARROW_PHASE_STEP;
            let d = angle.sin() * ARROW_SWAY;
            let (sx, sy) = match corner {
                Corner::UpperLeft => (1.0, 1.0),
                Corner::UpperRight => (-1.0, 1.0),
                Corner::LowerLeft => (1.0, -1.0),
                Corner::LowerRight => (-1.0, -1.0),
            };
            *dx += sx * d;
            *dy += sy * d;
            sprite.x = dx.round() as i32;
            sprite.y = dy.round() as i32;
        }
        Decoration::ScoreBoard => {
            sprite.set_frames(sprite::text_frames(&format!("score {:06}", state.score)));
        }
        Decoration::Static => {}
    }
}
