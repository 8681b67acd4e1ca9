//! Entity data for everything visible on the playfield.
//!
//! These are plain tagged data plus the couple of motions that only touch
//! their own rectangle. Formation-wide behaviour (shared direction,
//! animation, timers) lives in `formation`; the tick pipeline in `session`.

use crate::geometry::Rect;

// ── Playfield layout ──────────────────────────────────────────────────────────

/// Logical playfield width. The renderer scales this into terminal cells.
pub const PANEL_WIDTH: i32 = 500;
/// Logical playfield height.
pub const PANEL_HEIGHT: i32 = 400;

/// The whole playfield; an entity no longer intersecting it is off screen.
pub const SCREEN: Rect = Rect { x: 0, y: 0, width: PANEL_WIDTH, height: PANEL_HEIGHT };

/// Top of the barricade band. A formation descending into it ends the game.
pub const BARRICADE_AREA_Y: i32 = 310;
pub const BARRICADE_COUNT: usize = 4;

pub const ALIEN_ROWS: usize = 4;
pub const ALIEN_COLS: usize = 7;

/// Points per regular alien destroyed.
pub const ALIEN_POINTS: u32 = 10;
/// The special alien is worth this many points per alien already killed.
pub const SPECIAL_ALIEN_POINT_MULTIPLIER: u32 = 10;

pub const DEFAULT_LIVES: u32 = 5;

// ── Direction ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step along x: -1 for left, +1 for right.
    pub fn step(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

// ── Missiles ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissileKind {
    Player,
    Alien,
}

/// A live missile. Travel direction is fixed by kind: player missiles go up,
/// alien missiles down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Missile {
    pub rect: Rect,
    pub kind: MissileKind,
}

impl Missile {
    pub const WIDTH: i32 = 2;
    pub const HEIGHT: i32 = 4;
    pub const MOVE_DISTANCE: i32 = 5;

    pub fn player(x: i32, y: i32) -> Self {
        Missile {
            rect: Rect::new(x, y, Self::WIDTH, Self::HEIGHT),
            kind: MissileKind::Player,
        }
    }

    pub fn alien(x: i32, y: i32) -> Self {
        Missile {
            rect: Rect::new(x, y, Self::WIDTH, Self::HEIGHT),
            kind: MissileKind::Alien,
        }
    }

    pub fn advance(&mut self) {
        self.rect.y += match self.kind {
            MissileKind::Player => -Self::MOVE_DISTANCE,
            MissileKind::Alien => Self::MOVE_DISTANCE,
        };
    }

    pub fn on_screen(&self) -> bool {
        self.rect.intersects(&SCREEN)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub lives: u32,
}

impl Player {
    pub const WIDTH: i32 = 29;
    pub const HEIGHT: i32 = 25;
    pub const MOVE_DISTANCE: i32 = 2;

    /// A new player cannon, centered at the bottom of the playfield.
    pub fn new() -> Self {
        Player {
            rect: Rect::new(
                (PANEL_WIDTH - Self::WIDTH) / 2,
                PANEL_HEIGHT - Self::HEIGHT,
                Self::WIDTH,
                Self::HEIGHT,
            ),
            lives: DEFAULT_LIVES,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn die(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn gain_life(&mut self) {
        self.lives += 1;
    }

    pub fn reset(&mut self) {
        self.lives = DEFAULT_LIVES;
    }

    pub fn move_left(&mut self) {
        self.rect.x = (self.rect.x - Self::MOVE_DISTANCE).max(0);
    }

    pub fn move_right(&mut self) {
        self.rect.x = (self.rect.x + Self::MOVE_DISTANCE).min(PANEL_WIDTH - Self::WIDTH);
    }

    /// Fire a missile straight up from the cannon's nose.
    pub fn fire(&self) -> Missile {
        Missile::player(
            self.rect.x + self.rect.width / 2 - Missile::WIDTH / 2,
            self.rect.y - 1,
        )
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

/// One alien in the formation grid. Shared direction and animation frame are
/// deliberately NOT stored here — all aliens move and animate in lockstep,
/// so that state belongs to the formation.
#[derive(Clone, Debug)]
pub struct Alien {
    pub rect: Rect,
}

impl Alien {
    pub const WIDTH: i32 = 34;
    pub const HEIGHT: i32 = 24;
    pub const MOVE_DISTANCE: i32 = 10;

    pub fn new(x: i32, y: i32) -> Self {
        Alien {
            rect: Rect::new(x, y, Self::WIDTH, Self::HEIGHT),
        }
    }

    /// True if this alien is within one move of the wall it is heading for,
    /// i.e. the formation is due to turn.
    pub fn facing_wrong_direction(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.rect.x < Self::MOVE_DISTANCE,
            Direction::Right => self.rect.x > PANEL_WIDTH - Self::WIDTH - Self::MOVE_DISTANCE,
        }
    }

    /// True once the alien's bottom edge has reached the barricade band.
    pub fn in_barricade_area(&self) -> bool {
        BARRICADE_AREA_Y <= self.rect.bottom()
    }

    pub fn step(&mut self, direction: Direction) {
        self.rect.x += direction.step() * Self::MOVE_DISTANCE;
    }

    pub fn descend(&mut self) {
        self.rect.y += Self::MOVE_DISTANCE;
    }

    /// Fire a missile straight down from the alien's underside.
    pub fn fire(&self) -> Missile {
        Missile::alien(self.rect.x + self.rect.width / 2, self.rect.bottom())
    }
}

// ── Special alien ─────────────────────────────────────────────────────────────

/// The occasional bonus target crossing the top of the screen. It enters
/// flush against the edge opposite its travel direction and is removed when
/// it leaves the far side or is shot.
#[derive(Clone, Debug)]
pub struct SpecialAlien {
    pub rect: Rect,
    pub direction: Direction,
}

impl SpecialAlien {
    pub const WIDTH: i32 = 63;
    pub const HEIGHT: i32 = 25;
    pub const MOVE_DISTANCE: i32 = 1;
    const SPAWN_Y: i32 = 2;

    pub fn spawn(direction: Direction) -> Self {
        let x = match direction {
            Direction::Right => 1 - Self::WIDTH,
            Direction::Left => PANEL_WIDTH - 1,
        };
        SpecialAlien {
            rect: Rect::new(x, Self::SPAWN_Y, Self::WIDTH, Self::HEIGHT),
            direction,
        }
    }

    pub fn advance(&mut self) {
        self.rect.x += self.direction.step() * Self::MOVE_DISTANCE;
    }

    pub fn on_screen(&self) -> bool {
        self.rect.intersects(&SCREEN)
    }
}

// ── Barricades ────────────────────────────────────────────────────────────────

/// A degradable chunk of barricade. Each hit costs one health point and
/// shaves a quarter of the original height off the side that was struck;
/// at zero health the part neither collides nor draws.
#[derive(Clone, Debug)]
pub struct BarricadePart {
    pub rect: Rect,
    pub health: i32,
}

impl BarricadePart {
    pub const WIDTH: i32 = 12;
    pub const HEIGHT: i32 = 12;
    pub const MAX_HEALTH: i32 = 4;
    const DEGRADE_STEP: i32 = Self::HEIGHT / Self::MAX_HEALTH;

    pub fn new(x: i32, y: i32) -> Self {
        BarricadePart {
            rect: Rect::new(x, y, Self::WIDTH, Self::HEIGHT),
            health: Self::MAX_HEALTH,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.health > 0
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        self.is_solid() && self.rect.intersects(rect)
    }

    /// Struck from above (alien missile): the top edge moves down.
    pub fn degrade_above(&mut self) {
        self.rect.y += Self::DEGRADE_STEP;
        self.degrade();
    }

    /// Struck from below (player missile): the bottom edge moves up.
    pub fn degrade_below(&mut self) {
        self.degrade();
    }

    fn degrade(&mut self) {
        self.health -= 1;
        self.rect.height -= Self::DEGRADE_STEP;
    }
}

/// One barricade: 10 parts in a 4 + 4 + 2 pattern,
///
/// ```text
/// XXXX
/// XXXX
/// X  X
/// ```
///
/// the bottom row keeping only its outer parts so the player can shelter
/// in the gap.
#[derive(Clone, Debug)]
pub struct Barricade {
    pub parts: Vec<BarricadePart>,
}

impl Barricade {
    pub fn new(x: i32, y: i32) -> Self {
        let mut parts = Vec::with_capacity(10);
        for row in 0..2 {
            for col in 0..4 {
                parts.push(BarricadePart::new(
                    x + col * BarricadePart::WIDTH,
                    y + row * BarricadePart::HEIGHT,
                ));
            }
        }
        let bottom = y + 2 * BarricadePart::HEIGHT;
        parts.push(BarricadePart::new(x, bottom));
        parts.push(BarricadePart::new(x + 3 * BarricadePart::WIDTH, bottom));
        Barricade { parts }
    }
}
