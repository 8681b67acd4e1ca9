use rage_invaders::audio::Cue;
use rage_invaders::entities::{
    Alien, Missile, MissileKind, SpecialAlien, ALIEN_COLS, ALIEN_ROWS, DEFAULT_LIVES,
    PANEL_WIDTH,
};
use rage_invaders::input::InputState;
use rage_invaders::session::{Session, State};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> InputState {
    InputState::default()
}

fn confirm() -> InputState {
    InputState {
        confirm_pressed: true,
        ..InputState::default()
    }
}

fn pause() -> InputState {
    InputState {
        pause_toggled: true,
        ..InputState::default()
    }
}

/// A session confirmed all the way into `Playing` at t=0.
fn playing_session(rng: &mut StdRng) -> Session {
    let mut session = Session::new(0, rng);
    session.apply_input(&confirm(), 0, rng); // WelcomeScreen → NewGame
    session.apply_input(&confirm(), 0, rng); // NewGame → Playing
    session
}

// ── State machine ─────────────────────────────────────────────────────────────

#[test]
fn session_starts_on_the_welcome_screen() {
    let mut rng = seeded_rng();
    let session = Session::new(0, &mut rng);
    assert_eq!(session.state, State::WelcomeScreen);
    assert_eq!(session.score, 0);
    assert_eq!(session.level, 0);
}

#[test]
fn confirm_walks_welcome_newgame_playing() {
    let mut rng = seeded_rng();
    let mut session = Session::new(0, &mut rng);

    session.apply_input(&confirm(), 0, &mut rng);
    assert_eq!(session.state, State::NewGame);
    assert_eq!(session.level, 1);
    assert_eq!(session.player.lives, DEFAULT_LIVES);
    assert_eq!(session.formation.survivors(), ALIEN_ROWS * ALIEN_COLS);

    session.apply_input(&confirm(), 0, &mut rng);
    assert_eq!(session.state, State::Playing);
}

#[test]
fn pause_toggles_and_freezes_the_simulation() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);

    session.apply_input(&pause(), 0, &mut rng);
    assert_eq!(session.state, State::Paused);

    // a tick while paused must not move anything
    let xs_before: Vec<i32> = session.formation.iter().map(|a| a.rect.x).collect();
    let cues = session.tick(&idle(), 10_000, &mut rng);
    assert!(cues.is_empty());
    let xs_after: Vec<i32> = session.formation.iter().map(|a| a.rect.x).collect();
    assert_eq!(xs_before, xs_after);

    session.apply_input(&pause(), 10_000, &mut rng);
    assert_eq!(session.state, State::Playing);
}

#[test]
fn restart_resets_score_and_level_from_any_state() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    session.score = 1234;
    session.player.lives = 1;

    let restart = InputState {
        restart_requested: true,
        ..InputState::default()
    };
    session.apply_input(&restart, 0, &mut rng);
    // restart mid-game stays in play, everything else is reset
    assert_eq!(session.state, State::Playing);
    assert_eq!(session.score, 0);
    assert_eq!(session.level, 1);
    assert_eq!(session.player.lives, DEFAULT_LIVES);
}

// ── Player movement & firing ──────────────────────────────────────────────────

#[test]
fn right_wins_when_both_directions_are_held() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    let x = session.player.rect.x;
    let both = InputState {
        move_left: true,
        move_right: true,
        ..InputState::default()
    };
    session.tick(&both, 1, &mut rng);
    assert_eq!(session.player.rect.x, x + 2);
}

#[test]
fn only_one_player_missile_in_flight() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    let fire = InputState {
        fire: true,
        ..InputState::default()
    };
    let cues = session.tick(&fire, 1, &mut rng);
    assert!(cues.contains(&Cue::Laser));
    assert_eq!(
        session
            .missiles
            .iter()
            .filter(|m| m.kind == MissileKind::Player)
            .count(),
        1
    );

    // holding fire does not stack a second missile
    let cues = session.tick(&fire, 2, &mut rng);
    assert!(!cues.contains(&Cue::Laser));
    assert_eq!(
        session
            .missiles
            .iter()
            .filter(|m| m.kind == MissileKind::Player)
            .count(),
        1
    );
}

// ── Collision precedence ──────────────────────────────────────────────────────

#[test]
fn player_hit_costs_a_life_and_cues_boom() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    let p = session.player.rect;
    // one tick of travel away from the player
    session.missiles.push(Missile::alien(
        p.x + 5,
        p.y - Missile::MOVE_DISTANCE + 1,
    ));
    let cues = session.tick(&idle(), 1, &mut rng);
    assert!(cues.contains(&Cue::Boom));
    assert_eq!(session.player.lives, DEFAULT_LIVES - 1);
    assert!(session.missiles.is_empty());
    assert_eq!(session.state, State::Playing);
}

#[test]
fn last_life_lost_transitions_to_game_over_in_the_same_tick() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    session.player.lives = 1;
    let p = session.player.rect;
    session.missiles.push(Missile::alien(
        p.x + 5,
        p.y - Missile::MOVE_DISTANCE + 1,
    ));
    session.tick(&idle(), 1, &mut rng);
    assert_eq!(session.player.lives, 0);
    assert_eq!(session.state, State::GameOver);
}

#[test]
fn barricade_shields_take_the_hit_before_aliens() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    // an alien parked directly behind a barricade part: the part must eat
    // the missile and the alien survive
    let part_rect = session.barricades[0].parts[8].rect;
    session.formation.get_mut(0, 0).unwrap().rect.x = part_rect.x;
    session.formation.get_mut(0, 0).unwrap().rect.y = part_rect.y;
    let survivors = session.formation.survivors();

    session.missiles.push(Missile::player(
        part_rect.x + 2,
        part_rect.y + 2 + Missile::MOVE_DISTANCE,
    ));
    session.tick(&idle(), 1, &mut rng);

    assert_eq!(session.formation.survivors(), survivors);
    assert_eq!(
        session.barricades[0].parts[8].health,
        rage_invaders::entities::BarricadePart::MAX_HEALTH - 1
    );
    // player missile degrades from below: top edge unchanged
    assert_eq!(session.barricades[0].parts[8].rect.y, part_rect.y);
    assert!(session.missiles.is_empty());
}

#[test]
fn alien_missile_degrades_barricade_from_above() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    let part_rect = session.barricades[1].parts[0].rect;
    session.missiles.push(Missile::alien(
        part_rect.x + 2,
        part_rect.y + 1 - Missile::MOVE_DISTANCE,
    ));
    session.tick(&idle(), 1, &mut rng);
    let part = &session.barricades[1].parts[0];
    assert_eq!(part.health, rage_invaders::entities::BarricadePart::MAX_HEALTH - 1);
    assert_eq!(part.rect.y, part_rect.y + 3); // top edge moved down
}

#[test]
fn killing_an_alien_scores_and_speeds_up_survivors() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    let delay_before = session.formation.movement_delay();
    let target = session.formation.get(2, 3).unwrap().rect;
    session.missiles.push(Missile::player(
        target.x + 5,
        target.y + 5 + Missile::MOVE_DISTANCE,
    ));
    let cues = session.tick(&idle(), 1, &mut rng);
    assert!(cues.contains(&Cue::Kill));
    assert_eq!(session.score, 10);
    assert_eq!(session.formation.survivors(), 27);
    assert!(session.formation.movement_delay() < delay_before);
    assert!(session.missiles.is_empty());
}

// ── Level clear ───────────────────────────────────────────────────────────────

#[test]
fn clearing_all_28_aliens_scores_280_and_pauses_the_level() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    assert_eq!(session.formation.survivors(), 28);

    // shoot the formation empty, one alien per tick, with time standing
    // still so nothing moves or returns fire
    while session.formation.survivors() > 0 {
        let target = session.formation.iter().next().unwrap().rect;
        session.missiles.push(Missile::player(
            target.x + 5,
            target.y + 5 + Missile::MOVE_DISTANCE,
        ));
        session.tick(&idle(), 0, &mut rng);
    }

    assert_eq!(session.score, 280);
    assert_eq!(session.state, State::LevelClear);
}

#[test]
fn confirming_level_clear_grants_a_life_and_reseeds_the_next_level() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    while session.formation.survivors() > 0 {
        let target = session.formation.iter().next().unwrap().rect;
        session.missiles.push(Missile::player(
            target.x + 5,
            target.y + 5 + Missile::MOVE_DISTANCE,
        ));
        session.tick(&idle(), 0, &mut rng);
    }
    assert_eq!(session.state, State::LevelClear);

    session.apply_input(&confirm(), 0, &mut rng);
    assert_eq!(session.state, State::Playing);
    assert_eq!(session.level, 2);
    assert_eq!(session.player.lives, DEFAULT_LIVES + 1);
    assert_eq!(session.formation.survivors(), 28);
    assert!(session.missiles.is_empty());
}

// ── Special alien ─────────────────────────────────────────────────────────────

#[test]
fn special_alien_appears_after_its_random_delay() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    // the spawn delay is drawn from [10s, 20s]; before 10s nothing appears
    session.tick(&idle(), 9_000, &mut rng);
    assert!(session.special.is_none());
    // by 21s it must be on screen
    session.tick(&idle(), 21_000, &mut rng);
    assert!(session.special.is_some());
}

#[test]
fn special_alien_reward_scales_with_kills() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    // 20 of 28 destroyed: rows 0-1 entirely plus row 2 columns 0-5
    for col in 0..ALIEN_COLS {
        session.formation.clear(0, col);
        session.formation.clear(1, col);
    }
    for col in 0..6 {
        session.formation.clear(2, col);
    }
    assert_eq!(session.formation.survivors(), 8);

    session.tick(&idle(), 25_000, &mut rng);
    let special = session.special.clone().expect("special alien due by 25s");

    // aim a player missile at where the special alien will be next tick
    let next_x = special.rect.x + special.direction.step() * SpecialAlien::MOVE_DISTANCE;
    let missile_x = next_x.clamp(0, PANEL_WIDTH - Missile::WIDTH);
    let score_before = session.score;
    session.missiles.push(Missile::player(
        missile_x,
        special.rect.y + 5 + Missile::MOVE_DISTANCE,
    ));
    session.tick(&idle(), 25_001, &mut rng);

    assert_eq!(session.score - score_before, (28 - 8) * 10);
    assert!(session.special.is_none());
}

#[test]
fn level_does_not_clear_while_the_special_alien_lives() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    // force a special on screen, then empty the formation
    session.tick(&idle(), 21_000, &mut rng);
    assert!(session.special.is_some());
    for row in 0..ALIEN_ROWS {
        for col in 0..ALIEN_COLS {
            session.formation.clear(row, col);
        }
    }
    session.tick(&idle(), 21_001, &mut rng);
    assert_eq!(session.state, State::Playing);
}

// ── Formation reaching the barricades ─────────────────────────────────────────

#[test]
fn formation_descending_into_the_barricade_band_is_game_over() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    session.formation.direction = rage_invaders::entities::Direction::Left;
    session.formation.get_mut(0, 0).unwrap().rect.x = Alien::MOVE_DISTANCE - 1;
    for col in 0..ALIEN_COLS {
        if let Some(alien) = session.formation.get_mut(ALIEN_ROWS - 1, col) {
            alien.rect.y =
                rage_invaders::entities::BARRICADE_AREA_Y - Alien::HEIGHT - Alien::MOVE_DISTANCE;
        }
    }
    session.tick(&idle(), 501, &mut rng);
    assert_eq!(session.state, State::GameOver);
}

// ── Cues ──────────────────────────────────────────────────────────────────────

#[test]
fn move_cues_cycle_round_robin() {
    let mut rng = seeded_rng();
    let mut session = playing_session(&mut rng);
    let mut moves = Vec::new();
    let mut now = 0;
    while moves.len() < 5 {
        now += 501;
        let cues = session.tick(&idle(), now, &mut rng);
        moves.extend(cues.into_iter().filter(|cue| {
            matches!(cue, Cue::Move1 | Cue::Move2 | Cue::Move3 | Cue::Move4)
        }));
    }
    assert_eq!(
        &moves[..5],
        &[Cue::Move1, Cue::Move2, Cue::Move3, Cue::Move4, Cue::Move1]
    );
}
