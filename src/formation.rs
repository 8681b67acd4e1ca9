//! The alien formation: a fixed grid of slots whose occupants move, animate
//! and turn in lockstep.
//!
//! Shared direction and the animation frame are formation state rather than
//! per-alien state, and all timing comes in through `now` parameters
//! (milliseconds), so the controller can be stepped deterministically in
//! tests.

use rand::Rng;

use crate::entities::{Alien, Direction, Missile, ALIEN_COLS, ALIEN_ROWS};

/// Milliseconds between lockstep moves at the start of a level.
pub const START_MOVEMENT_DELAY: f64 = 500.0;
/// Starting bounds for the random per-column fire interval, in milliseconds.
pub const START_FIRE_DELAY_MIN: f64 = 200.0;
pub const START_FIRE_DELAY_MAX: f64 = 5000.0;

// ── Fire-interval bounds ──────────────────────────────────────────────────────

/// Bounds for the uniformly drawn per-column fire interval. The maximum
/// tightens by 5% at every new level; the minimum currently never changes.
#[derive(Clone, Copy, Debug)]
pub struct FireBounds {
    pub min: f64,
    pub max: f64,
}

impl FireBounds {
    pub fn starting() -> Self {
        FireBounds {
            min: START_FIRE_DELAY_MIN,
            max: START_FIRE_DELAY_MAX,
        }
    }

    pub fn tighten(&mut self) {
        self.max *= 0.95;
    }
}

// ── Formation ─────────────────────────────────────────────────────────────────

/// Outcome of one movement check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormationStep {
    /// The movement delay has not elapsed yet.
    Idle,
    /// All survivors stepped horizontally.
    Advanced,
    /// All survivors descended and the shared direction reversed.
    Turned,
    /// The descent put a survivor into the barricade band: game over.
    ReachedBarricades,
}

pub struct Formation {
    /// Row-major `ALIEN_ROWS x ALIEN_COLS` grid. A destroyed alien leaves
    /// its slot empty for the rest of the level.
    slots: Vec<Option<Alien>>,
    pub direction: Direction,
    /// Which of the two sprite frames survivors currently show.
    pub anim_frame: u8,
    /// Current delay between lockstep moves, in ms. Shrinks with each kill.
    movement_delay: f64,
    /// Per-kill multiplier on the movement delay, fixed per level.
    move_multiplier: f64,
    last_move: u64,
    /// Per column: when that column last fired (ms).
    fire_timer: Vec<u64>,
    /// Per column: how long after `fire_timer` the next shot is due (ms).
    fire_deadline: Vec<f64>,
}

impl Formation {
    const ORIGIN_X: i32 = 30;
    const ORIGIN_Y: i32 = 30;
    const PITCH_X: i32 = 50;
    const PITCH_Y: i32 = 40;

    /// Build the full grid for a level, with fresh movement and fire timers.
    pub fn new(level: u32, now: u64, bounds: &FireBounds, rng: &mut impl Rng) -> Self {
        let mut slots = Vec::with_capacity(ALIEN_ROWS * ALIEN_COLS);
        for row in 0..ALIEN_ROWS {
            for col in 0..ALIEN_COLS {
                slots.push(Some(Alien::new(
                    Self::ORIGIN_X + col as i32 * Self::PITCH_X,
                    Self::ORIGIN_Y + row as i32 * Self::PITCH_Y,
                )));
            }
        }
        let mut formation = Formation {
            slots,
            direction: Direction::Right,
            anim_frame: 0,
            movement_delay: START_MOVEMENT_DELAY,
            move_multiplier: 1.0 - level as f64 / 400.0,
            last_move: now,
            fire_timer: vec![now; ALIEN_COLS],
            fire_deadline: vec![0.0; ALIEN_COLS],
        };
        formation.randomize_fire_timers(now, bounds, rng);
        formation
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn survivors(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alien> {
        self.slots.iter().flatten()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Alien> {
        self.slots[row * ALIEN_COLS + col].as_ref()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Alien> {
        self.slots[row * ALIEN_COLS + col].as_mut()
    }

    /// Empty a slot without the kill side effects (no speed-up).
    pub fn clear(&mut self, row: usize, col: usize) {
        self.slots[row * ALIEN_COLS + col] = None;
    }

    /// Current delay between lockstep moves, in ms.
    pub fn movement_delay(&self) -> f64 {
        self.movement_delay
    }

    /// Topmost survivor of a column, the one that decides turning.
    fn topmost(&self, col: usize) -> Option<&Alien> {
        (0..ALIEN_ROWS).find_map(|row| self.get(row, col))
    }

    /// Bottommost survivor of a column, the one that fires.
    fn bottommost(&self, col: usize) -> Option<&Alien> {
        (0..ALIEN_ROWS).rev().find_map(|row| self.get(row, col))
    }

    /// Scan columns left to right; the formation turns as soon as any
    /// column's topmost survivor faces the wrong wall. The scan stops at the
    /// first such column — one column is enough to turn the whole formation.
    pub fn due_to_turn(&self) -> bool {
        (0..ALIEN_COLS).any(|col| {
            self.topmost(col)
                .map(|alien| alien.facing_wrong_direction(self.direction))
                .unwrap_or(false)
        })
    }

    /// True once the lowest surviving row has descended into the barricade
    /// band. All survivors of a row share a y-coordinate, so one is enough.
    pub fn in_barricade_band(&self) -> bool {
        for row in (0..ALIEN_ROWS).rev() {
            for col in 0..ALIEN_COLS {
                if let Some(alien) = self.get(row, col) {
                    return alien.in_barricade_area();
                }
            }
        }
        false
    }

    // ── Movement ──────────────────────────────────────────────────────────────

    /// Advance the formation if its movement delay has elapsed. Toggles the
    /// animation frame on every actual move.
    pub fn tick_movement(&mut self, now: u64) -> FormationStep {
        if now.saturating_sub(self.last_move) as f64 <= self.movement_delay {
            return FormationStep::Idle;
        }
        self.anim_frame ^= 1;
        let step = if self.due_to_turn() {
            for alien in self.slots.iter_mut().flatten() {
                alien.descend();
            }
            if self.in_barricade_band() {
                FormationStep::ReachedBarricades
            } else {
                self.direction = self.direction.flipped();
                FormationStep::Turned
            }
        } else {
            let direction = self.direction;
            for alien in self.slots.iter_mut().flatten() {
                alien.step(direction);
            }
            FormationStep::Advanced
        };
        self.last_move = now;
        step
    }

    // ── Firing ────────────────────────────────────────────────────────────────

    /// Restart every column's fire timer with a freshly drawn interval.
    /// Called whenever the session (re-)enters play.
    pub fn randomize_fire_timers(&mut self, now: u64, bounds: &FireBounds, rng: &mut impl Rng) {
        for col in 0..ALIEN_COLS {
            self.fire_timer[col] = now;
            self.fire_deadline[col] = rng.gen_range(bounds.min..bounds.max);
        }
    }

    /// Collect the missiles fired this tick: each column whose deadline has
    /// passed fires from its bottommost survivor and redraws its interval.
    /// Empty columns still reset their timer but never fire.
    pub fn fire(&mut self, now: u64, bounds: &FireBounds, rng: &mut impl Rng) -> Vec<Missile> {
        let mut missiles = Vec::new();
        for col in 0..ALIEN_COLS {
            if now.saturating_sub(self.fire_timer[col]) as f64 <= self.fire_deadline[col] {
                continue;
            }
            if let Some(alien) = self.bottommost(col) {
                missiles.push(alien.fire());
            }
            self.fire_timer[col] = now;
            self.fire_deadline[col] = rng.gen_range(bounds.min..bounds.max);
        }
        missiles
    }

    // ── Kills ─────────────────────────────────────────────────────────────────

    /// Empty the first slot whose occupant intersects `rect`. Returns true
    /// if an alien was destroyed. Each kill speeds the survivors up by
    /// multiplying the movement delay.
    pub fn kill_intersecting(&mut self, rect: &crate::geometry::Rect) -> bool {
        for slot in self.slots.iter_mut() {
            if let Some(alien) = slot {
                if alien.rect.intersects(rect) {
                    *slot = None;
                    self.movement_delay *= self.move_multiplier;
                    return true;
                }
            }
        }
        false
    }
}
