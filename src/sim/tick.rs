//! Per-frame simulation step
//!
//! Each frame: apply queued key presses, run the coarse one-second timer,
//! move enemies and check the player's goal, then resolve collisions.

use super::enemy::update_enemies;
use super::entity::Actor;
use super::player::{InputAction, Key, next_character};
use super::prize;
use super::state::{GameEvent, GameState, GameStatus};

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key-up events in arrival order
    pub keys: Vec<Key>,
    /// User asked for a fresh game
    pub restart: bool,
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        state.restart();
    }
    for &key in &input.keys {
        handle_input(state, key);
    }

    state.frame += 1;

    update_timer(state, dt);
    update_entities(state, dt);
    resolve_collisions(state);
}

/// Route one key press through the player and apply what it asks for
pub fn handle_input(state: &mut GameState, key: Key) -> InputAction {
    let action = state.player.handle_input(key, state.frozen);
    match action {
        InputAction::Moved => state.emit(GameEvent::Hop),
        InputAction::ToggleAudio => {
            state.audio_on = !state.audio_on;
            log::info!("Audio {}", if state.audio_on { "on" } else { "off" });
            state.emit(if state.audio_on {
                GameEvent::MusicStarted
            } else {
                GameEvent::MusicPaused
            });
        }
        InputAction::ToggleDebug => {
            state.debug_overlay = !state.debug_overlay;
            state.emit(GameEvent::DebugOverlay {
                enabled: state.debug_overlay,
            });
        }
        InputAction::SwitchCharacter => {
            state.character = next_character(state.character);
            state.player.set_character(state.character);
            state.emit(GameEvent::CharacterChanged {
                character: state.character,
            });
        }
        InputAction::Blocked | InputAction::Frozen | InputAction::Ignored => {}
    }
    action
}

/// Count the coarse timer down by `dt`; fire a tick each time it lapses
pub fn update_timer(state: &mut GameState, dt: f32) {
    state.timer -= dt;
    if state.timer <= 0.0 {
        tick_timer(state);
        state.timer = state.rules.timer_interval;
    }
}

/// One coarse timer tick: run down a pending level transition
pub fn tick_timer(state: &mut GameState) {
    log::debug!(
        "timer tick. countdown = {} - frozen = {}",
        state.countdown,
        state.frozen
    );
    if state.countdown == 0 {
        return;
    }

    state.countdown -= 1;
    if state.countdown > 0 {
        return;
    }

    if state.audio_on {
        state.emit(GameEvent::MusicStarted);
    }

    // Level 0 has no prizes to check
    if state.level == 0 || prize::visible_count(&state.prizes) == 0 {
        state.level += 1;
        log::info!("Advancing to level {}", state.level);
    }

    if state.level >= state.rules.final_level {
        log::info!("Final level reached - game won with score {}", state.score);
        state.frozen = true;
        state.status = GameStatus::Won;
        state.emit(GameEvent::Won);
    }

    if state.status == GameStatus::Playing {
        state.reset_level();
    }
}

/// Move enemies and let the player report reaching the goal
pub fn update_entities(state: &mut GameState, dt: f32) {
    if !state.frozen && !state.debug_overlay {
        let speed_range = state.rules.speed_range();
        update_enemies(&mut state.enemies, dt, &mut state.rng, speed_range);
    }

    if state.status == GameStatus::Playing && state.player.update(&state.prizes, state.frozen) {
        state.complete_level();
    }
}

/// Apply enemy hits and prize pickups against the player
pub fn resolve_collisions(state: &mut GameState) {
    if state.status != GameStatus::Playing {
        return;
    }

    let hit = state
        .enemies
        .iter()
        .any(|enemy| enemy.has_collided_with(&state.player));
    if hit {
        state.lives = state.lives.saturating_sub(1);
        state.emit(GameEvent::Collision {
            lives_left: state.lives,
        });

        if state.lives > 0 {
            log::info!("Caught! {} lives left", state.lives);
            state.reset_level();
        } else {
            log::info!("Out of lives - game lost with score {}", state.score);
            state.frozen = true;
            state.status = GameStatus::Lost;
            state.emit(GameEvent::MusicPaused);
            state.emit(GameEvent::Lost);
        }
        // The board was rebuilt or the game ended; nothing else to resolve
        return;
    }

    let player = &state.player.entity;
    let mut collected = Vec::new();
    for prize in state.prizes.iter_mut().filter(|p| p.is_visible) {
        if prize.entity.has_collided_with(player) {
            collected.push(prize.collect());
        }
    }
    for value in collected {
        state.score += value;
        log::debug!("Prize worth {value} collected, score {}", state.score);
        state.emit(GameEvent::PrizeCollected { value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Rules;

    const DT: f32 = 1.0 / 60.0;

    fn put_enemy_on_player(state: &mut GameState) {
        let pos = state.player.entity.pos;
        state.enemies[0].entity.set_location(pos.x, pos.y);
    }

    #[test]
    fn test_keys_applied_before_update() {
        let mut state = GameState::new(12345, Rules::default());
        state.enemies.clear();
        state.drain_events();
        let start_y = state.player.y();

        let input = TickInput {
            keys: vec![Key::Up, Key::Up],
            ..Default::default()
        };
        tick(&mut state, &input, DT);

        assert_eq!(state.player.y(), start_y - 2.0 * TILE_HEIGHT);
        let hops = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Hop)
            .count();
        assert_eq!(hops, 2);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_timer_fires_once_per_interval() {
        let mut state = GameState::new(1, Rules::default());
        state.countdown = 3;
        state.frozen = true;

        // First frame fires immediately (timer starts at zero)
        update_timer(&mut state, 0.5);
        assert_eq!(state.countdown, 2);
        assert_eq!(state.timer, TIMER_INTERVAL);

        update_timer(&mut state, 0.5);
        assert_eq!(state.countdown, 2);
        update_timer(&mut state, 0.5);
        assert_eq!(state.countdown, 1);
    }

    #[test]
    fn test_countdown_advances_level_zero() {
        let mut state = GameState::new(7, Rules::default());
        state.frozen = true;
        state.countdown = 1;
        tick_timer(&mut state);

        assert_eq!(state.level, 1);
        assert!(!state.frozen);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.prizes.len(), 1);
    }

    #[test]
    fn test_countdown_to_final_level_wins() {
        let mut state = GameState::new(7, Rules::default());
        state.level = FINAL_LEVEL - 1;
        state.reset_level();
        for prize in &mut state.prizes {
            prize.collect();
        }
        state.frozen = true;
        state.countdown = 1;
        tick_timer(&mut state);

        assert_eq!(state.level, FINAL_LEVEL);
        assert_eq!(state.status, GameStatus::Won);
        assert!(state.frozen);
        assert!(state.events.contains(&GameEvent::Won));
    }

    #[test]
    fn test_countdown_with_visible_prize_repeats_level() {
        let mut state = GameState::new(7, Rules::default());
        state.level = 2;
        state.reset_level();
        state.prizes[0].collect();
        assert_eq!(prize::visible_count(&state.prizes), 1);
        state.frozen = true;
        state.countdown = 1;
        state.drain_events();

        tick_timer(&mut state);

        assert_eq!(state.level, 2);
        assert_eq!(state.status, GameStatus::Playing);
        assert!(!state.frozen);
        assert!(state.events.contains(&GameEvent::LevelReset { level: 2 }));
        assert!(state.prizes.iter().all(|p| p.is_visible));
    }

    #[test]
    fn test_music_resumes_only_when_audio_on() {
        let mut state = GameState::new(7, Rules::default());
        state.audio_on = false;
        state.countdown = 1;
        state.drain_events();
        tick_timer(&mut state);
        assert!(!state.events.contains(&GameEvent::MusicStarted));
    }

    #[test]
    fn test_enemies_halt_while_frozen_or_debug() {
        let mut state = GameState::new(3, Rules::default());
        let x = state.enemies[0].x();

        state.debug_overlay = true;
        update_entities(&mut state, 0.01);
        assert_eq!(state.enemies[0].x(), x);

        state.debug_overlay = false;
        state.frozen = true;
        update_entities(&mut state, 0.01);
        assert_eq!(state.enemies[0].x(), x);

        state.frozen = false;
        update_entities(&mut state, 0.01);
        assert_ne!(state.enemies[0].x(), x);
    }

    #[test]
    fn test_collision_costs_life_and_resets() {
        let mut state = GameState::new(11, Rules::default());
        state.level = 2;
        state.reset_level();
        state.drain_events();
        put_enemy_on_player(&mut state);

        resolve_collisions(&mut state);

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.level, 2);
        let events = state.drain_events();
        assert_eq!(
            events[0],
            GameEvent::Collision {
                lives_left: STARTING_LIVES - 1
            }
        );
        assert!(events.contains(&GameEvent::LevelReset { level: 2 }));
    }

    #[test]
    fn test_last_life_loses() {
        let mut state = GameState::new(11, Rules::default());
        state.lives = 1;
        put_enemy_on_player(&mut state);

        resolve_collisions(&mut state);

        assert_eq!(state.lives, 0);
        assert_eq!(state.status, GameStatus::Lost);
        assert!(state.frozen);

        // No further life loss once the game is over
        resolve_collisions(&mut state);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_prize_pickup() {
        let mut state = GameState::new(11, Rules::default());
        state.level = 2;
        state.reset_level();
        state.enemies.clear();
        let pos = state.player.entity.pos;
        state.prizes[1].entity.set_location(pos.x, pos.y);

        resolve_collisions(&mut state);

        assert_eq!(state.score, 200);
        assert!(!state.prizes[1].is_visible);

        // Collected prizes never score twice
        resolve_collisions(&mut state);
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_switch_character_updates_sprite() {
        let mut state = GameState::new(1, Rules::default());
        assert_eq!(handle_input(&mut state, Key::C), InputAction::SwitchCharacter);
        assert_eq!(state.character, 1);
        assert_eq!(state.player.entity.sprite, CHARACTER_SPRITES[1]);

        // Survives a level reset
        state.reset_level();
        assert_eq!(state.player.entity.sprite, CHARACTER_SPRITES[1]);
    }

    #[test]
    fn test_toggles() {
        let mut state = GameState::new(1, Rules::default());
        state.drain_events();

        handle_input(&mut state, Key::A);
        assert!(!state.audio_on);
        handle_input(&mut state, Key::B);
        assert!(state.debug_overlay);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::MusicPaused,
                GameEvent::DebugOverlay { enabled: true }
            ]
        );
    }

    #[test]
    fn test_restart_input() {
        let mut state = GameState::new(1, Rules::default());
        state.status = GameStatus::Lost;
        state.lives = 0;
        state.frozen = true;

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Rules::default());
        let mut state2 = GameState::new(99999, Rules::default());

        let inputs = [
            TickInput {
                keys: vec![Key::Up],
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                keys: vec![Key::Left, Key::Up],
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, DT);
                tick(&mut state2, input, DT);
            }
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.player, state2.player);
    }
}
