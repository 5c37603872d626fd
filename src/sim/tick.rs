//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Every step reads
//! the state committed by the step before it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{circles_overlap, gated_move, within_radius};
use super::state::{GameEvent, GameOverCause, GamePhase, GameState, ItemKind, SmokeCloud};
use crate::consts::*;
use crate::dir_to_angle;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Deploy smoke screen
    pub smoke: bool,
}

/// The four driving directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in screen space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Facing angle for this direction
    pub fn angle(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Direction::Up => -FRAC_PI_2,
            Direction::Down => FRAC_PI_2,
            Direction::Left => PI,
            Direction::Right => 0.0,
        }
    }
}

impl TickInput {
    /// One direction per tick: up > down > left > right
    pub fn direction(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    match state.phase {
        GamePhase::NotStarted | GamePhase::GameOver => return,
        GamePhase::LevelTransition { ticks_remaining } => {
            // Frozen: only the countdown runs
            if ticks_remaining <= 1 {
                state.advance_level();
            } else {
                state.phase = GamePhase::LevelTransition {
                    ticks_remaining: ticks_remaining - 1,
                };
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    drive_player(state, input);

    if burn_fuel(state) {
        return;
    }

    deploy_smoke(state, input);
    collect_objects(state);

    if check_level_clear(state) {
        return;
    }

    decay_smokes(state);
    update_enemies(state);
}

/// Steer, scale by terrain, then move unless the destination is a wall
fn drive_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;

    let dir = match input.direction() {
        Some(dir) => {
            player.body.angle = dir.angle();
            dir.unit()
        }
        None => Vec2::ZERO,
    };

    let terrain = state.map.tile_at(player.body.pos);
    let speed = player.speed * terrain.speed_factor();
    player.body.vel = dir * speed;

    player.body.pos = gated_move(&state.map, player.body.pos, player.body.vel)
        .resolve(player.body.pos);
}

/// Constant drain; returns true if the tank ran dry (run over)
fn burn_fuel(state: &mut GameState) -> bool {
    state.player.fuel = state.player.fuel.drain(FUEL_CONSUMPTION_RATE);
    if state.player.fuel.is_empty() {
        state.game_over(GameOverCause::FuelExhausted);
        return true;
    }
    false
}

/// Drop a smoke cloud at the player's position (debounced, costs fuel)
fn deploy_smoke(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    player.smoke_cooldown = player.smoke_cooldown.saturating_sub(1);

    if input.smoke && player.fuel > SMOKE_COST && player.smoke_cooldown == 0 {
        state.smokes.push(SmokeCloud {
            pos: player.body.pos,
            lifetime: SMOKE_LIFETIME_TICKS,
        });
        player.fuel = player.fuel.drain(SMOKE_COST);
        player.smoke_cooldown = SMOKE_COOLDOWN_TICKS;
        state.events.push(GameEvent::SmokeDeployed);
        log::debug!("Smoke deployed at {:?}", player.body.pos);
    }
}

/// Pick up everything within reach
fn collect_objects(state: &mut GameState) {
    let player_pos = state.player.body.pos;
    let reach = state.player.body.radius;

    let mut collected = Vec::new();
    state.objects.retain(|obj| {
        if circles_overlap(player_pos, reach, obj.pos, PICKUP_RADIUS) {
            collected.push((obj.kind, obj.id.clone()));
            false
        } else {
            true
        }
    });

    let player = &mut state.player;
    for (kind, id) in collected {
        match kind {
            ItemKind::Fuel => {
                player.fuel = player.fuel.refill(FUEL_PICKUP_AMOUNT, player.max_fuel);
                player.score += FUEL_PICKUP_SCORE;
                player.items.push(kind);
                state.events.push(GameEvent::FuelCollected);
            }
            ItemKind::Flag => {
                state.level.flags_collected += 1;
                player.score += FLAG_SCORE;
                log::debug!(
                    "Flag {} collected ({}/{})",
                    id,
                    state.level.flags_collected,
                    state.level.flags_total
                );
                state.events.push(GameEvent::FlagCollected { id });
            }
            ItemKind::Smoke => {
                // Points only; no smoke charge is granted
                player.score += SMOKE_PICKUP_SCORE;
                player.items.push(kind);
                state.events.push(GameEvent::SmokePickupCollected);
            }
        }
    }
}

/// Enter the level transition once every flag is in; returns true if entered
fn check_level_clear(state: &mut GameState) -> bool {
    if state.level.flags_collected < state.level.flags_total {
        return false;
    }
    state.phase = GamePhase::LevelTransition {
        ticks_remaining: LEVEL_TRANSITION_TICKS,
    };
    state.events.push(GameEvent::LevelCleared {
        level: state.level.level,
    });
    log::info!(
        "Level {} clear! Score {}",
        state.level.level,
        state.player.score
    );
    true
}

/// Age smoke clouds; a cloud is gone the tick its lifetime hits zero
fn decay_smokes(state: &mut GameState) {
    for smoke in &mut state.smokes {
        smoke.lifetime = smoke.lifetime.saturating_sub(1);
    }
    state.smokes.retain(|s| s.lifetime > 0);
}

/// Pursue, get stunned by smoke, catch the player. Every enemy is processed
/// even after a catch; the run ends once the pass is done.
fn update_enemies(state: &mut GameState) {
    let target = state.player.body.pos;
    let player_radius = state.player.body.radius;
    let mut caught = false;

    for (index, enemy) in state.enemies.iter_mut().enumerate() {
        if enemy.stun_ticks > 0 {
            enemy.stun_ticks -= 1;
            continue;
        }

        // Straight-line pursuit, walls ignored
        let to_player = target - enemy.body.pos;
        let terrain = state.map.tile_at(enemy.body.pos);
        let speed = enemy.speed * terrain.speed_factor();
        enemy.body.vel = to_player.normalize_or_zero() * speed;
        enemy.body.pos += enemy.body.vel;
        if to_player != Vec2::ZERO {
            enemy.body.angle = dir_to_angle(to_player);
        }

        let in_smoke = state
            .smokes
            .iter()
            .any(|s| within_radius(enemy.body.pos, s.pos, SMOKE_STUN_RADIUS));
        if in_smoke {
            enemy.stun_ticks = STUN_DURATION_TICKS;
            state.events.push(GameEvent::EnemyStunned { enemy: index });
        }

        if circles_overlap(enemy.body.pos, enemy.body.radius, target, player_radius) {
            caught = true;
        }
    }

    if caught {
        state.game_over(GameOverCause::Caught);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::map::{MapTile, TileKind, TileMap, tile_center};
    use crate::sim::state::{Collectible, Enemy, Fuel};
    use proptest::prelude::*;

    /// Same layout as `map` with every tile at `elevation`
    fn level_terrain(map: &TileMap, elevation: f32) -> TileMap {
        let tiles = map
            .iter()
            .map(|(_, _, t)| MapTile {
                elevation,
                kind: t.kind,
            })
            .collect();
        TileMap::from_tiles(map.width(), map.height(), tiles)
    }

    /// Started level-1 state on flat terrain (speed factor 1.0) with nothing else around
    fn flat_state() -> GameState {
        let mut state = GameState::new(12345);
        state.map = level_terrain(&state.map, 0.5);
        state.enemies.clear();
        state.objects.clear();
        state.start();
        state.events.clear();
        state
    }

    fn flag_at(pos: Vec2, n: usize) -> Collectible {
        Collectible {
            id: format!("flag-{n}"),
            pos,
            kind: ItemKind::Flag,
        }
    }

    fn held(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_not_started_is_frozen() {
        let mut state = GameState::new(1);
        let fuel = state.player.fuel;
        tick(&mut state, &held(|i| i.right = true));
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.fuel, fuel);
    }

    #[test]
    fn test_direction_priority() {
        let all = held(|i| {
            i.up = true;
            i.down = true;
            i.left = true;
            i.right = true;
        });
        assert_eq!(all.direction(), Some(Direction::Up));
        let down_left = held(|i| {
            i.down = true;
            i.left = true;
        });
        assert_eq!(down_left.direction(), Some(Direction::Down));
        let left_right = held(|i| {
            i.left = true;
            i.right = true;
        });
        assert_eq!(left_right.direction(), Some(Direction::Left));
        assert_eq!(TickInput::default().direction(), None);
    }

    #[test]
    fn test_player_moves_and_faces() {
        let mut state = flat_state();
        let start = state.player.body.pos;

        tick(&mut state, &held(|i| i.down = true));
        assert_eq!(state.player.body.pos, start + Vec2::new(0.0, 4.0));
        assert!((state.player.body.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        // No diagonal: up wins over right
        tick(
            &mut state,
            &held(|i| {
                i.up = true;
                i.right = true;
            }),
        );
        assert_eq!(state.player.body.pos, start);
        assert!((state.player.body.angle + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_terrain_scales_speed() {
        let mut state = flat_state();
        state.map = level_terrain(&state.map, 0.0);
        let start = state.player.body.pos;

        tick(&mut state, &held(|i| i.right = true));
        assert_eq!(state.player.body.pos, start + Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_wall_blocks_move() {
        let mut state = flat_state();
        // Tile (1,2) is road, left neighbour (0,2) is the border
        let start = Vec2::new(66.0, 160.0);
        state.player.body.pos = start;

        tick(&mut state, &held(|i| i.left = true));
        assert_eq!(state.player.body.pos, start);
        // Facing still follows input
        assert!((state.player.body.angle - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_fuel_exhaustion_at_exact_tick() {
        let mut state = flat_state();
        state.player.fuel = Fuel::from_units(12);

        for _ in 0..239 {
            tick(&mut state, &TickInput::default());
            assert!(!state.is_game_over());
        }
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());
        assert_eq!(state.time_ticks, 240);
        assert!(state.events.contains(&GameEvent::GameOver {
            cause: GameOverCause::FuelExhausted
        }));

        // Terminal: further ticks do nothing
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 240);
    }

    #[test]
    fn test_fuel_exhaustion_checked_before_contact() {
        let mut state = flat_state();
        state.player.fuel = FUEL_CONSUMPTION_RATE;
        let pos = state.player.body.pos;
        state.enemies.push(Enemy::new(pos + Vec2::new(10.0, 0.0), 3.7));

        tick(&mut state, &TickInput::default());
        assert_eq!(
            state.events,
            vec![GameEvent::GameOver {
                cause: GameOverCause::FuelExhausted
            }]
        );
    }

    #[test]
    fn test_smoke_deploy_costs_fuel_and_debounces() {
        let mut state = flat_state();
        let smoke = held(|i| i.smoke = true);

        tick(&mut state, &smoke);
        assert_eq!(state.smokes.len(), 1);
        // 100 - 0.05 drain - 10 cost
        assert_eq!(state.player.fuel, Fuel::from_hundredths(8995));
        assert_eq!(state.smokes[0].pos, state.player.body.pos);

        // Held key: no new cloud until the cooldown runs out
        for _ in 0..(SMOKE_COOLDOWN_TICKS - 1) {
            tick(&mut state, &smoke);
            assert_eq!(state.smokes.len(), 1);
        }
        tick(&mut state, &smoke);
        assert_eq!(state.smokes.len(), 2);
    }

    #[test]
    fn test_smoke_needs_more_than_cost() {
        let mut state = flat_state();
        // After this tick's drain the tank holds exactly the smoke cost
        state.player.fuel = SMOKE_COST.refill(FUEL_CONSUMPTION_RATE, MAX_FUEL);
        tick(&mut state, &held(|i| i.smoke = true));
        assert!(state.smokes.is_empty());
        assert_eq!(state.player.fuel, SMOKE_COST);
    }

    #[test]
    fn test_smoke_lifetime_decays_to_removal() {
        let mut state = flat_state();
        state.smokes.push(SmokeCloud {
            pos: Vec2::new(600.0, 600.0),
            lifetime: 3,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.smokes[0].lifetime, 2);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.smokes[0].lifetime, 1);
        tick(&mut state, &TickInput::default());
        assert!(state.smokes.is_empty());
    }

    #[test]
    fn test_collect_fuel_flag_and_smoke() {
        let mut state = flat_state();
        let pos = state.player.body.pos;
        state.player.fuel = Fuel::from_units(50);
        state.objects = vec![
            Collectible {
                id: "item-0".into(),
                pos: pos + Vec2::new(30.0, 0.0),
                kind: ItemKind::Fuel,
            },
            Collectible {
                id: "item-1".into(),
                pos: pos + Vec2::new(0.0, 20.0),
                kind: ItemKind::Smoke,
            },
            flag_at(pos + Vec2::new(-34.0, 0.0), 0),
            flag_at(pos + Vec2::new(300.0, 0.0), 1),
        ];
        state.level.flags_total = 2;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].id, "flag-1");
        assert_eq!(state.level.flags_collected, 1);
        assert_eq!(state.player.score, 50 + 100 + 500);
        // 50 - 0.05 + 25
        assert_eq!(state.player.fuel, Fuel::from_hundredths(7495));
        assert_eq!(state.player.items, vec![ItemKind::Fuel, ItemKind::Smoke]);
        assert!(state.is_playing());
    }

    #[test]
    fn test_pickup_radius_edge() {
        let mut state = flat_state();
        let pos = state.player.body.pos;
        // 20 + 15 = 35: exactly at the edge is not a pickup
        state.objects = vec![flag_at(pos + Vec2::new(35.0, 0.0), 0)];
        state.level.flags_total = 1;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_fuel_pickup_capped() {
        let mut state = flat_state();
        let pos = state.player.body.pos;
        state.player.fuel = Fuel::from_units(90);
        state.objects = vec![Collectible {
            id: "item-0".into(),
            pos,
            kind: ItemKind::Fuel,
        }];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.fuel, MAX_FUEL);
    }

    #[test]
    fn test_level_clear_scenario() {
        let mut state = flat_state();
        assert_eq!(state.level.flags_total, 7);
        let pos = state.player.body.pos;
        state.objects = (0..7).map(|n| flag_at(pos, n)).collect();
        state.player.fuel = Fuel::from_units(50);

        tick(&mut state, &TickInput::default());
        assert!(state.is_level_transition());
        assert_eq!(state.level.flags_collected, 7);
        let fuel_at_clear = state.player.fuel;
        assert_eq!(fuel_at_clear, Fuel::from_hundredths(4995));

        // Frozen for the whole countdown
        for _ in 0..(LEVEL_TRANSITION_TICKS - 1) {
            tick(&mut state, &held(|i| i.right = true));
            assert!(state.is_level_transition());
            assert_eq!(state.player.fuel, fuel_at_clear);
            assert_eq!(state.level.level, 1);
        }

        tick(&mut state, &TickInput::default());
        assert!(state.is_playing());
        assert_eq!(state.level.level, 2);
        assert_eq!(state.level.flags_total, 9);
        assert_eq!(state.level.flags_collected, 0);
        assert_eq!(
            state.player.fuel,
            fuel_at_clear.refill(LEVEL_FUEL_BONUS, MAX_FUEL)
        );
        assert_eq!(state.player.score, 7 * FLAG_SCORE);
        assert!(state.events.contains(&GameEvent::LevelStarted {
            level: 2,
            flags_total: 9
        }));
    }

    #[test]
    fn test_level_clear_fuel_bonus_capped() {
        let mut state = flat_state();
        let pos = state.player.body.pos;
        state.objects = (0..7).map(|n| flag_at(pos, n)).collect();

        tick(&mut state, &TickInput::default());
        for _ in 0..LEVEL_TRANSITION_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.level.level, 2);
        assert_eq!(state.player.fuel, MAX_FUEL);
    }

    #[test]
    fn test_level_clear_triggers_once() {
        let mut state = flat_state();
        let pos = state.player.body.pos;
        state.objects = (0..7).map(|n| flag_at(pos, n)).collect();

        tick(&mut state, &TickInput::default());
        let cleared = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelCleared { .. }))
            .count();
        assert_eq!(cleared, 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(
            state.phase,
            GamePhase::LevelTransition {
                ticks_remaining: LEVEL_TRANSITION_TICKS - 1
            }
        );
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_enemy_pursues_player() {
        let mut state = flat_state();
        let pos = state.player.body.pos;
        state.enemies.push(Enemy::new(pos + Vec2::new(500.0, 0.0), 3.0));

        tick(&mut state, &TickInput::default());
        let enemy = &state.enemies[0];
        assert!((enemy.body.pos.x - (pos.x + 497.0)).abs() < 1e-3);
        assert!((enemy.body.angle - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_enemy_ignores_walls() {
        let mut state = flat_state();
        state.player.body.pos = tile_center(2, 2);
        // Enemy sitting on a border wall tile moves anyway
        let start = Vec2::new(32.0, 160.0);
        assert_eq!(state.map.tile_at(start).kind, TileKind::Wall);
        state.enemies.push(Enemy::new(start, 3.0));
        tick(&mut state, &TickInput::default());
        assert!(state.enemies[0].body.pos.x > start.x);
    }

    #[test]
    fn test_smoke_stun_radius() {
        let mut state = flat_state();
        let cloud = Vec2::new(1000.0, 1000.0);
        state.smokes.push(SmokeCloud {
            pos: cloud,
            lifetime: SMOKE_LIFETIME_TICKS,
        });
        state.enemies.push(Enemy::new(cloud + Vec2::new(35.0, 0.0), 0.0));
        state.enemies.push(Enemy::new(cloud + Vec2::new(0.0, 45.0), 0.0));

        tick(&mut state, &TickInput::default());
        assert!(state.enemies[0].is_stunned());
        assert_eq!(state.enemies[0].stun_ticks, STUN_DURATION_TICKS);
        assert!(!state.enemies[1].is_stunned());
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyStunned { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_stun_freezes_for_exact_duration() {
        let mut state = flat_state();
        let cloud = Vec2::new(1000.0, 1000.0);
        state.smokes.push(SmokeCloud {
            pos: cloud,
            lifetime: 1000,
        });
        state.enemies.push(Enemy::new(cloud, 2.0));
        state.player.fuel = MAX_FUEL;

        tick(&mut state, &TickInput::default());
        let frozen_at = state.enemies[0].body.pos;
        assert_eq!(state.enemies[0].stun_ticks, STUN_DURATION_TICKS);

        for remaining in (0..STUN_DURATION_TICKS).rev() {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.enemies[0].stun_ticks, remaining);
            assert_eq!(state.enemies[0].body.pos, frozen_at);
        }

        // Free again: moves, then lands back in the still-live cloud
        tick(&mut state, &TickInput::default());
        assert_ne!(state.enemies[0].body.pos, frozen_at);
        assert_eq!(state.enemies[0].stun_ticks, STUN_DURATION_TICKS);
    }

    #[test]
    fn test_overlapping_clouds_do_not_stack() {
        let mut state = flat_state();
        let cloud = Vec2::new(1000.0, 1000.0);
        for _ in 0..3 {
            state.smokes.push(SmokeCloud {
                pos: cloud,
                lifetime: 50,
            });
        }
        state.enemies.push(Enemy::new(cloud, 0.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies[0].stun_ticks, STUN_DURATION_TICKS);
    }

    #[test]
    fn test_enemy_catches_player_after_moving() {
        let mut state = flat_state();
        let pos = state.player.body.pos;
        // 42 apart: not touching before the move, 38 apart after
        state.enemies.push(Enemy::new(pos + Vec2::new(42.0, 0.0), 4.0));

        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());
        assert!(state.events.contains(&GameEvent::GameOver {
            cause: GameOverCause::Caught
        }));
    }

    #[test]
    fn test_enemies_after_a_catch_still_update() {
        let mut state = flat_state();
        let pos = state.player.body.pos;
        state.enemies.push(Enemy::new(pos + Vec2::new(30.0, 0.0), 4.0));
        state.enemies.push(Enemy::new(pos - Vec2::new(30.0, 0.0), 4.0));
        let mut stunned = Enemy::new(pos + Vec2::new(0.0, 400.0), 4.0);
        stunned.stun_ticks = 5;
        state.enemies.push(stunned);
        let far = pos + Vec2::new(500.0, 0.0);
        state.enemies.push(Enemy::new(far, 4.0));

        tick(&mut state, &TickInput::default());

        assert!(state.is_game_over());
        assert_eq!(state.enemies[2].stun_ticks, 4);
        assert!(state.enemies[3].body.pos.x < far.x);
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_stunned_enemy_cannot_catch() {
        let mut state = flat_state();
        let pos = state.player.body.pos;
        let mut enemy = Enemy::new(pos + Vec2::new(10.0, 0.0), 4.0);
        enemy.stun_ticks = 5;
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default());
        assert!(state.is_playing());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.start();
        state2.start();

        let inputs = [
            held(|i| i.right = true),
            held(|i| i.down = true),
            held(|i| i.smoke = true),
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player.body.pos, state2.player.body.pos);
        assert_eq!(state1.player.fuel, state2.player.fuel);
        assert_eq!(state1.objects, state2.objects);
        assert_eq!(state1.smokes, state2.smokes);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(up, down, left, right, smoke)| TickInput {
                up,
                down,
                left,
                right,
                smoke,
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_tick_invariants(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..400),
        ) {
            let mut state = GameState::new(seed);
            state.start();

            for input in &inputs {
                let fuel_before = state.player.fuel;
                let smokes_before: Vec<u32> = state.smokes.iter().map(|s| s.lifetime).collect();
                let was_playing = state.is_playing();

                tick(&mut state, input);

                prop_assert!(state.player.fuel <= state.player.max_fuel);
                prop_assert!(state.level.flags_collected <= state.level.flags_total);

                let refuelled = state.events.iter().any(|e| matches!(
                    e,
                    GameEvent::FuelCollected | GameEvent::LevelStarted { .. }
                ));
                if !refuelled {
                    prop_assert!(state.player.fuel <= fuel_before);
                }

                // Surviving pre-existing clouds aged by exactly one tick
                if was_playing && state.is_playing() {
                    let deployed = state.events.contains(&GameEvent::SmokeDeployed);
                    let expected: Vec<u32> = smokes_before
                        .iter()
                        .filter(|&&l| l > 1)
                        .map(|l| l - 1)
                        .collect();
                    let actual: Vec<u32> = state
                        .smokes
                        .iter()
                        .take(expected.len())
                        .map(|s| s.lifetime)
                        .collect();
                    prop_assert_eq!(actual, expected);
                    prop_assert_eq!(
                        state.smokes.len(),
                        smokes_before.iter().filter(|&&l| l > 1).count() + deployed as usize
                    );
                }
                prop_assert!(state.smokes.iter().all(|s| s.lifetime > 0));
            }
        }
    }
}
