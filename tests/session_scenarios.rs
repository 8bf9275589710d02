use gem_hopper::consts::*;
use gem_hopper::sim::prize::all_collected;
use gem_hopper::sim::tick::{resolve_collisions, tick_timer, update_entities};
use gem_hopper::sim::{
    Enemy, GameEvent, GameState, GameStatus, InputAction, Key, Player, Rules, TickInput,
    handle_input, tick,
};

const DT: f32 = 1.0 / 60.0;

fn walk_to_water(state: &mut GameState) {
    for _ in 0..BOARD_ROWS {
        state.player.handle_input(Key::Up, false);
    }
    assert!(state.player.at_goal());
}

#[test]
fn lives_run_out_on_the_last_collision() {
    let rules = Rules::default();
    let mut state = GameState::new(2024, rules);
    state.drain_events();

    let mut resets = 0;
    for n in 1..=rules.starting_lives {
        assert_eq!(state.status, GameStatus::Playing);
        let pos = state.player.entity.pos;
        state.enemies[0].entity.set_location(pos.x, pos.y);

        resolve_collisions(&mut state);

        resets += state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelReset { .. }))
            .count();
        assert_eq!(state.lives, rules.starting_lives - n);
    }

    assert_eq!(state.status, GameStatus::Lost);
    assert!(state.frozen);
    assert_eq!(resets as u32, rules.starting_lives - 1);
}

#[test]
fn level_two_completion_arms_countdown() {
    let mut state = GameState::new(77, Rules::default());
    state.level = 2;
    state.reset_level();
    assert_eq!(state.enemies.len(), 2);
    assert_eq!(state.prizes.len(), 2);

    for prize in &mut state.prizes {
        prize.is_visible = false;
    }
    state.enemies.clear();
    walk_to_water(&mut state);
    update_entities(&mut state, DT);

    assert!(state.frozen);
    assert_eq!(state.countdown, LEVEL_COUNTDOWN);
    assert!(state.events.contains(&GameEvent::LevelComplete));
}

#[test]
fn level_zero_needs_no_prizes() {
    let mut state = GameState::new(5, Rules::default());
    assert!(all_collected(&state.prizes));
    state.enemies.clear();
    walk_to_water(&mut state);
    update_entities(&mut state, DT);
    assert!(state.frozen);

    for _ in 0..LEVEL_COUNTDOWN {
        tick_timer(&mut state);
    }
    assert_eq!(state.level, 1);
    assert!(!state.frozen);
    assert_eq!(state.countdown, 0);
    assert_eq!(state.player.y(), Player::MAX_Y);
}

#[test]
fn frozen_player_cannot_move() {
    let mut state = GameState::new(5, Rules::default());
    state.frozen = true;
    let before = state.player.entity.pos;
    assert_eq!(handle_input(&mut state, Key::Up), InputAction::Frozen);
    assert_eq!(state.player.entity.pos, before);
}

#[test]
fn character_cycle_returns_to_first() {
    let mut state = GameState::new(5, Rules::default());
    for _ in 0..CHARACTER_SPRITES.len() {
        handle_input(&mut state, Key::C);
    }
    assert_eq!(state.character, 0);
    assert_eq!(state.player.entity.sprite, CHARACTER_SPRITES[0]);
}

#[test]
fn enemy_wraps_onto_a_valid_row() {
    let mut state = GameState::new(31, Rules::default());
    let y = Enemy::row_y(2);
    state.enemies = vec![Enemy::new("enemy0", 4, 2, 200.0)];
    state.enemies[0].entity.set_location(403.0, y);

    update_entities(&mut state, 0.1);

    let rows: Vec<f32> = (ENEMY_ROW_MIN..=ENEMY_ROW_MAX).map(Enemy::row_y).collect();
    assert_eq!(state.enemies[0].x(), 0.0);
    assert!(rows.contains(&state.enemies[0].y()));
}

#[test]
fn full_game_can_be_won() {
    let mut state = GameState::new(8, Rules::default());

    while state.status == GameStatus::Playing {
        let level = state.level;
        for prize in &mut state.prizes {
            prize.is_visible = false;
        }
        state.enemies.clear();
        walk_to_water(&mut state);

        // The timer ticks once per second of frames
        for _ in 0..((LEVEL_COUNTDOWN + 1) * 60) {
            tick(&mut state, &TickInput::default(), DT);
            if state.level != level {
                break;
            }
        }
        assert_eq!(state.level, level + 1);
    }

    assert_eq!(state.status, GameStatus::Won);
    assert_eq!(state.level, FINAL_LEVEL);
    assert!(state.frozen);
}
