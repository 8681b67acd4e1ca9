//! The game session: the state machine that owns every entity and advances
//! the simulation one fixed tick at a time.
//!
//! All randomness comes through an injected RNG and all time through `now`
//! (milliseconds), so a session can be driven headlessly with a seeded RNG
//! and hand-picked timestamps. Sound comes back out as [`Cue`] values for
//! the caller to forward to whatever audio sink exists.

use rand::Rng;

use crate::audio::Cue;
use crate::entities::{
    Barricade, Direction, Missile, MissileKind, Player, SpecialAlien, ALIEN_POINTS,
    BARRICADE_AREA_Y, BARRICADE_COUNT, SPECIAL_ALIEN_POINT_MULTIPLIER,
};
use crate::formation::{FireBounds, Formation, FormationStep};
use crate::input::InputState;
use crate::scene::{Hud, Overlay, Scene, Sprite, SpriteKind};

/// Bounds for the random delay before a special alien appears, in ms,
/// counted from level start or the previous one's despawn.
pub const SPECIAL_DELAY_MIN: u64 = 10_000;
pub const SPECIAL_DELAY_MAX: u64 = 20_000;

/// The ufo drone is re-cued every this many ticks while the special alien
/// is on screen.
const SPECIAL_SOUND_INTERVAL: u32 = 140;

/// Game phases. Only `Playing` runs the simulation; every other state
/// freezes the entities and shows an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    WelcomeScreen,
    NewGame,
    Playing,
    LevelClear,
    Paused,
    GameOver,
}

pub struct Session {
    pub state: State,
    pub score: u32,
    /// 1-based once a game starts; 0 only before the first game.
    pub level: u32,
    pub player: Player,
    pub formation: Formation,
    pub barricades: Vec<Barricade>,
    pub missiles: Vec<Missile>,
    pub special: Option<SpecialAlien>,
    fire_bounds: FireBounds,
    special_timer: u64,
    special_delay: u64,
    special_sound_count: u32,
    move_cue: Cue,
    cues: Vec<Cue>,
}

impl Session {
    pub fn new(now: u64, rng: &mut impl Rng) -> Self {
        let fire_bounds = FireBounds::starting();
        let mut session = Session {
            state: State::WelcomeScreen,
            score: 0,
            level: 0,
            player: Player::new(),
            formation: Formation::new(0, now, &fire_bounds, rng),
            barricades: Self::build_barricades(),
            missiles: Vec::new(),
            special: None,
            fire_bounds,
            special_timer: now,
            special_delay: 0,
            special_sound_count: 0,
            move_cue: Cue::Move1,
            cues: Vec::new(),
        };
        session.arm_special(now, rng);
        session
    }

    fn build_barricades() -> Vec<Barricade> {
        (0..BARRICADE_COUNT)
            .map(|i| Barricade::new(30 + i as i32 * 125, BARRICADE_AREA_Y))
            .collect()
    }

    // ── State transitions ─────────────────────────────────────────────────────

    /// Handle the edge-triggered part of an input snapshot. Held keys are
    /// consumed by [`Session::tick`].
    pub fn apply_input(&mut self, input: &InputState, now: u64, rng: &mut impl Rng) {
        if input.restart_requested {
            self.new_game(now, rng);
        }
        if input.pause_toggled {
            match self.state {
                State::Playing => self.state = State::Paused,
                State::Paused => self.enter_playing(now, rng),
                _ => {}
            }
        }
        if input.confirm_pressed {
            self.on_confirm(now, rng);
        }
    }

    fn on_confirm(&mut self, now: u64, rng: &mut impl Rng) {
        match self.state {
            // Firing is level-held and handled in the tick.
            State::Playing | State::Paused => {}
            State::LevelClear => self.next_level(now, rng),
            State::NewGame => self.enter_playing(now, rng),
            State::WelcomeScreen | State::GameOver => self.new_game(now, rng),
        }
    }

    /// Full reset: lives, score, level and fire-delay bounds, then level 1.
    pub fn new_game(&mut self, now: u64, rng: &mut impl Rng) {
        self.player.reset();
        self.score = 0;
        self.level = 0;
        self.fire_bounds = FireBounds::starting();
        self.next_level(now, rng);
        if self.state != State::Playing {
            self.state = State::NewGame;
        }
    }

    /// Advance to the next level: fresh barricades and formation, tighter
    /// fire delays. Completing a level (arriving here from `LevelClear`)
    /// earns one bonus life and drops straight back into play.
    pub fn next_level(&mut self, now: u64, rng: &mut impl Rng) {
        self.level += 1;
        self.fire_bounds.tighten();
        self.missiles.clear();
        self.barricades = Self::build_barricades();
        self.formation = Formation::new(self.level, now, &self.fire_bounds, rng);
        if self.state == State::LevelClear {
            self.player.gain_life();
            self.enter_playing(now, rng);
        }
    }

    /// Every route into `Playing` comes through here: fire timers are
    /// re-randomized and the special-alien timer is armed if idle.
    fn enter_playing(&mut self, now: u64, rng: &mut impl Rng) {
        if self.special.is_none() {
            self.arm_special(now, rng);
        }
        self.formation
            .randomize_fire_timers(now, &self.fire_bounds, rng);
        self.state = State::Playing;
    }

    fn arm_special(&mut self, now: u64, rng: &mut impl Rng) {
        self.special = None;
        self.special_delay = rng.gen_range(SPECIAL_DELAY_MIN..=SPECIAL_DELAY_MAX);
        self.special_timer = now;
    }

    // ── Simulation tick ───────────────────────────────────────────────────────

    /// One fixed simulation step. Outside `Playing` this is a no-op; inside
    /// it runs movement, firing, collisions and scoring, and may transition
    /// to `LevelClear` or `GameOver`. Returns the sound cues emitted.
    pub fn tick(&mut self, input: &InputState, now: u64, rng: &mut impl Rng) -> Vec<Cue> {
        if self.state == State::Playing {
            self.step_formation(now);
            self.step_special(now, rng);
            let shots = self.formation.fire(now, &self.fire_bounds, rng);
            self.missiles.extend(shots);
            for missile in &mut self.missiles {
                missile.advance();
            }
            self.discard_offscreen(now, rng);
            self.process_collisions(now, rng);
            self.process_held_keys(input);
            if self.state == State::Playing
                && self.formation.survivors() == 0
                && self.special.is_none()
            {
                self.state = State::LevelClear;
            }
        }
        std::mem::take(&mut self.cues)
    }

    fn step_formation(&mut self, now: u64) {
        let step = self.formation.tick_movement(now);
        if step == FormationStep::Idle {
            return;
        }
        if step == FormationStep::ReachedBarricades {
            self.state = State::GameOver;
        }
        if self.formation.survivors() > 0 {
            self.cues.push(self.move_cue);
            self.move_cue = self.move_cue.next_move();
        }
    }

    fn step_special(&mut self, now: u64, rng: &mut impl Rng) {
        if self.special.is_none()
            && now.saturating_sub(self.special_timer) > self.special_delay
        {
            let direction = if rng.gen_bool(0.5) {
                Direction::Right
            } else {
                Direction::Left
            };
            self.special = Some(SpecialAlien::spawn(direction));
        }
        if let Some(special) = &mut self.special {
            special.advance();
            if self.special_sound_count == 0 {
                self.cues.push(Cue::UfoLow);
            }
            self.special_sound_count = (self.special_sound_count + 1) % SPECIAL_SOUND_INTERVAL;
        }
    }

    fn discard_offscreen(&mut self, now: u64, rng: &mut impl Rng) {
        self.missiles.retain(|missile| missile.on_screen());
        let special_left = self
            .special
            .as_ref()
            .is_some_and(|special| !special.on_screen());
        if special_left {
            self.arm_special(now, rng);
        }
    }

    /// Match every live missile against the world in fixed precedence:
    /// player, then barricades, then (player missiles only) aliens, then
    /// the special alien. The first match consumes the missile; a missile
    /// matching nothing survives to the next tick.
    fn process_collisions(&mut self, now: u64, rng: &mut impl Rng) {
        let mut index = 0;
        while index < self.missiles.len() {
            let missile = self.missiles[index];

            if missile.rect.intersects(&self.player.rect) {
                self.missiles.remove(index);
                self.cues.push(Cue::Boom);
                self.player.die();
                if !self.player.is_alive() {
                    self.state = State::GameOver;
                }
                continue;
            }

            if self.degrade_barricade(&missile) {
                self.missiles.remove(index);
                continue;
            }

            if missile.kind == MissileKind::Player
                && self.formation.kill_intersecting(&missile.rect)
            {
                self.score += ALIEN_POINTS;
                self.cues.push(Cue::Kill);
                self.missiles.remove(index);
                continue;
            }

            let special_hit = self
                .special
                .as_ref()
                .is_some_and(|special| special.rect.intersects(&missile.rect));
            if special_hit {
                self.score += self.special_alien_points();
                self.cues.push(Cue::Kill);
                self.missiles.remove(index);
                self.arm_special(now, rng);
                continue;
            }

            index += 1;
        }
    }

    /// Degrade the first solid barricade part the missile overlaps: alien
    /// missiles chew the top down, player missiles the bottom up.
    fn degrade_barricade(&mut self, missile: &Missile) -> bool {
        for barricade in &mut self.barricades {
            for part in &mut barricade.parts {
                if part.collides(&missile.rect) {
                    match missile.kind {
                        MissileKind::Alien => part.degrade_above(),
                        MissileKind::Player => part.degrade_below(),
                    }
                    return true;
                }
            }
        }
        false
    }

    /// The special alien is worth more the emptier the formation is.
    fn special_alien_points(&self) -> u32 {
        (self.formation.total_slots() - self.formation.survivors()) as u32
            * SPECIAL_ALIEN_POINT_MULTIPLIER
    }

    fn process_held_keys(&mut self, input: &InputState) {
        if self.state != State::Playing {
            return;
        }
        // Right wins when both directions are held.
        if input.move_right {
            self.player.move_right();
        } else if input.move_left {
            self.player.move_left();
        }
        if input.fire && self.player_missile_count() == 0 {
            self.missiles.push(self.player.fire());
            self.cues.push(Cue::Laser);
        }
    }

    /// Only one player missile may be in flight at a time.
    fn player_missile_count(&self) -> usize {
        self.missiles
            .iter()
            .filter(|missile| missile.kind == MissileKind::Player)
            .count()
    }

    // ── Rendering snapshot ────────────────────────────────────────────────────

    /// Build this frame's draw list. The welcome screen shows no entities;
    /// every other state draws the frozen world under its overlay.
    pub fn scene(&self) -> Scene {
        let mut sprites = Vec::new();
        if self.state != State::WelcomeScreen {
            let frame = self.formation.anim_frame;
            for alien in self.formation.iter() {
                sprites.push(Sprite {
                    kind: SpriteKind::Alien { frame },
                    rect: alien.rect,
                });
            }
            for missile in &self.missiles {
                let kind = match missile.kind {
                    MissileKind::Player => SpriteKind::PlayerMissile,
                    MissileKind::Alien => SpriteKind::AlienMissile,
                };
                sprites.push(Sprite { kind, rect: missile.rect });
            }
            for barricade in &self.barricades {
                for part in &barricade.parts {
                    if part.is_solid() {
                        sprites.push(Sprite {
                            kind: SpriteKind::BarricadePart { health: part.health },
                            rect: part.rect,
                        });
                    }
                }
            }
            if self.player.is_alive() {
                sprites.push(Sprite {
                    kind: SpriteKind::Player,
                    rect: self.player.rect,
                });
            }
            if let Some(special) = &self.special {
                sprites.push(Sprite {
                    kind: SpriteKind::SpecialAlien,
                    rect: special.rect,
                });
            }
        }

        let overlay = match self.state {
            State::Playing => Overlay::None,
            State::WelcomeScreen => Overlay::Welcome,
            State::NewGame => Overlay::NewGame,
            State::LevelClear => Overlay::LevelClear,
            State::Paused => Overlay::Paused,
            State::GameOver => Overlay::GameOver,
        };

        Scene {
            sprites,
            overlay,
            hud: Hud {
                score: self.score,
                level: self.level,
                lives: self.player.lives,
                aliens: self.formation.survivors() + usize::from(self.special.is_some()),
                fps: 0.0,
                ups: 0.0,
            },
            hiscores: Vec::new(),
            notice: None,
        }
    }
}
