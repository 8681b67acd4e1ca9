use rage_invaders::entities::*;
use rage_invaders::geometry::Rect;

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_starts_centered_with_default_lives() {
    let p = Player::new();
    assert_eq!(p.rect.x, (PANEL_WIDTH - Player::WIDTH) / 2);
    assert_eq!(p.rect.y, PANEL_HEIGHT - Player::HEIGHT);
    assert_eq!(p.lives, DEFAULT_LIVES);
    assert!(p.is_alive());
}

#[test]
fn player_move_clamps_at_left_wall() {
    let mut p = Player::new();
    p.rect.x = 1;
    p.move_left();
    assert_eq!(p.rect.x, 0);
    p.move_left();
    assert_eq!(p.rect.x, 0);
}

#[test]
fn player_move_clamps_at_right_wall() {
    let mut p = Player::new();
    p.rect.x = PANEL_WIDTH - Player::WIDTH - 1;
    p.move_right();
    assert_eq!(p.rect.x, PANEL_WIDTH - Player::WIDTH);
    p.move_right();
    assert_eq!(p.rect.x, PANEL_WIDTH - Player::WIDTH);
}

#[test]
fn player_lives_saturate_at_zero() {
    let mut p = Player::new();
    for _ in 0..DEFAULT_LIVES + 3 {
        p.die();
    }
    assert_eq!(p.lives, 0);
    assert!(!p.is_alive());
}

#[test]
fn player_fires_from_nose() {
    let p = Player::new();
    let m = p.fire();
    assert_eq!(m.kind, MissileKind::Player);
    assert_eq!(m.rect.x, p.rect.x + Player::WIDTH / 2 - Missile::WIDTH / 2);
    assert_eq!(m.rect.y, p.rect.y - 1);
}

// ── Missiles ──────────────────────────────────────────────────────────────────

#[test]
fn player_missile_travels_up() {
    let mut m = Missile::player(100, 200);
    m.advance();
    assert_eq!(m.rect.y, 200 - Missile::MOVE_DISTANCE);
}

#[test]
fn alien_missile_travels_down() {
    let mut m = Missile::alien(100, 200);
    m.advance();
    assert_eq!(m.rect.y, 200 + Missile::MOVE_DISTANCE);
}

#[test]
fn missile_off_screen_detection() {
    let above = Missile::player(100, -Missile::HEIGHT);
    assert!(!above.on_screen());
    let below = Missile::alien(100, PANEL_HEIGHT);
    assert!(!below.on_screen());
    let inside = Missile::player(100, 200);
    assert!(inside.on_screen());
}

// ── Special alien ─────────────────────────────────────────────────────────────

#[test]
fn special_alien_spawns_opposite_its_travel_direction() {
    let rightward = SpecialAlien::spawn(Direction::Right);
    assert_eq!(rightward.rect.x, 1 - SpecialAlien::WIDTH);
    assert!(rightward.on_screen()); // one pixel already peeking in

    let leftward = SpecialAlien::spawn(Direction::Left);
    assert_eq!(leftward.rect.x, PANEL_WIDTH - 1);
    assert!(leftward.on_screen());
}

#[test]
fn special_alien_exits_the_far_side() {
    let mut sp = SpecialAlien::spawn(Direction::Left);
    // crossing the whole screen plus its own width puts it fully out
    for _ in 0..(PANEL_WIDTH + SpecialAlien::WIDTH) {
        sp.advance();
    }
    assert!(!sp.on_screen());
}

// ── Barricades ────────────────────────────────────────────────────────────────

#[test]
fn barricade_has_ten_parts_in_a_4_4_2_pattern() {
    let b = Barricade::new(100, 300);
    assert_eq!(b.parts.len(), 10);

    // two full rows of four
    for row in 0..2 {
        for col in 0..4 {
            let part = &b.parts[row * 4 + col];
            assert_eq!(part.rect.x, 100 + col as i32 * BarricadePart::WIDTH);
            assert_eq!(part.rect.y, 300 + row as i32 * BarricadePart::HEIGHT);
        }
    }
    // bottom row keeps only the outer parts
    let bottom_y = 300 + 2 * BarricadePart::HEIGHT;
    assert_eq!(b.parts[8].rect.x, 100);
    assert_eq!(b.parts[8].rect.y, bottom_y);
    assert_eq!(b.parts[9].rect.x, 100 + 3 * BarricadePart::WIDTH);
    assert_eq!(b.parts[9].rect.y, bottom_y);
}

#[test]
fn part_degraded_from_above_shrinks_top_down() {
    let mut part = BarricadePart::new(50, 300);
    part.degrade_above();
    assert_eq!(part.health, 3);
    assert_eq!(part.rect.y, 303); // top edge moved down
    assert_eq!(part.rect.height, 9);
    assert_eq!(part.rect.bottom(), 312); // bottom edge unchanged
}

#[test]
fn part_degraded_from_below_shrinks_in_place() {
    let mut part = BarricadePart::new(50, 300);
    part.degrade_below();
    assert_eq!(part.health, 3);
    assert_eq!(part.rect.y, 300); // top edge unchanged
    assert_eq!(part.rect.height, 9);
    assert_eq!(part.rect.bottom(), 309); // bottom edge moved up
}

#[test]
fn part_is_gone_after_four_hits_any_mix() {
    let mut part = BarricadePart::new(50, 300);
    let missile = Missile::alien(55, 300);
    assert!(part.collides(&missile.rect));

    part.degrade_above();
    part.degrade_below();
    part.degrade_above();
    part.degrade_below();

    assert_eq!(part.health, 0);
    assert_eq!(part.rect.height, 0);
    assert!(!part.is_solid());
    // zero-height geometry: no missile can hit it anywhere
    assert!(!part.collides(&missile.rect));
    assert!(!part.collides(&Rect::new(0, 0, PANEL_WIDTH, PANEL_HEIGHT)));
}

// ── Aliens ────────────────────────────────────────────────────────────────────

#[test]
fn alien_wrong_direction_near_left_wall() {
    let alien = Alien::new(Alien::MOVE_DISTANCE - 1, 30);
    assert!(alien.facing_wrong_direction(Direction::Left));
    assert!(!alien.facing_wrong_direction(Direction::Right));
}

#[test]
fn alien_wrong_direction_near_right_wall() {
    let x = PANEL_WIDTH - Alien::WIDTH - Alien::MOVE_DISTANCE + 1;
    let alien = Alien::new(x, 30);
    assert!(alien.facing_wrong_direction(Direction::Right));
    assert!(!alien.facing_wrong_direction(Direction::Left));
}

#[test]
fn alien_barricade_area_uses_bottom_edge() {
    let above = Alien::new(100, BARRICADE_AREA_Y - Alien::HEIGHT - 1);
    assert!(!above.in_barricade_area());
    let touching = Alien::new(100, BARRICADE_AREA_Y - Alien::HEIGHT);
    assert!(touching.in_barricade_area());
}

#[test]
fn alien_fires_from_underside_center() {
    let alien = Alien::new(100, 60);
    let m = alien.fire();
    assert_eq!(m.kind, MissileKind::Alien);
    assert_eq!(m.rect.x, 100 + Alien::WIDTH / 2);
    assert_eq!(m.rect.y, 60 + Alien::HEIGHT);
}

// ── Clone semantics ───────────────────────────────────────────────────────────

#[test]
fn entity_clones_are_independent() {
    let original = Player::new();
    let mut cloned = original.clone();
    cloned.rect.x = 99;
    cloned.die();
    assert_eq!(original.rect.x, (PANEL_WIDTH - Player::WIDTH) / 2);
    assert_eq!(original.lives, DEFAULT_LIVES);
}
