//! Collision detection and response
//!
//! Three passes per tick, always in this order: hazard/hazard, player/hazard,
//! player/power-up. Passes that destroy entities collect them first and
//! compact the collection once the pass is done, so no entity is skipped.

use super::effects;
use super::geometry::overlaps;
use super::state::{GameEvent, Hazard, PowerUpKind, SimulationState};

/// Swap velocities of every overlapping hazard pair
///
/// Pairs are visited in ascending (i, j) order. Returns the number of swaps.
pub fn resolve_hazard_pairs(hazards: &mut [Hazard]) -> usize {
    let mut swaps = 0;
    for j in 1..hazards.len() {
        for i in 0..j {
            if overlaps(&hazards[i], &hazards[j]) {
                let (head, tail) = hazards.split_at_mut(j);
                std::mem::swap(&mut head[i].vel, &mut tail[0].vel);
                swaps += 1;
            }
        }
    }
    swaps
}

/// Destroy every hazard touching the player, costing a life unless shielded
///
/// Stops at the hit that ends the game; hazards after it are left untouched.
pub fn resolve_player_hazards(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let shielded = state.effect.is_shielded();
    let mut destroyed: Vec<u32> = Vec::new();

    for i in 0..state.hazards.len() {
        let id = state.hazards[i].id;
        if !overlaps(&state.player, &state.hazards[i]) {
            continue;
        }
        destroyed.push(id);

        if shielded {
            events.push(GameEvent::ShieldBlocked);
            continue;
        }

        let fatal = state.lose_life();
        log::debug!("Hit by hazard {} ({} lives left)", id, state.lives);
        events.push(GameEvent::Hit { lives: state.lives });
        if fatal {
            log::info!("Game over at score {}", state.score);
            events.push(GameEvent::GameOver { score: state.score });
            break;
        }
    }

    if !destroyed.is_empty() {
        state.hazards.retain(|h| !destroyed.contains(&h.id));
    }
}

/// Collect every power-up touching the player
pub fn resolve_power_ups(
    state: &mut SimulationState,
    now_ms: f64,
    shield_duration_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    if state.is_over() {
        return;
    }

    let mut collected: Vec<u32> = Vec::new();
    for i in 0..state.power_ups.len() {
        let (id, kind) = {
            let power_up = &state.power_ups[i];
            if !overlaps(&state.player, power_up) {
                continue;
            }
            (power_up.id, power_up.kind)
        };
        collected.push(id);

        match kind {
            PowerUpKind::Heal => {
                if state.gain_life() {
                    log::debug!("Healed to {} lives", state.lives);
                    events.push(GameEvent::Healed { lives: state.lives });
                } else {
                    events.push(GameEvent::HealWasted);
                }
            }
            PowerUpKind::Shield => {
                let expires_at_ms = effects::grant_shield(&mut state.effect, now_ms, shield_duration_ms);
                log::debug!("Shield up until {:.0} ms", expires_at_ms);
                events.push(GameEvent::ShieldGranted { expires_at_ms });
            }
        }
    }

    if !collected.is_empty() {
        state.power_ups.retain(|p| !collected.contains(&p.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::effects::ActiveEffect;
    use crate::sim::geometry::Arena;
    use crate::sim::state::PowerUp;
    use glam::Vec2;

    fn hazard(id: u32, pos: Vec2, vel: Vec2) -> Hazard {
        Hazard {
            id,
            pos,
            vel,
            radius: 10.0,
        }
    }

    fn empty_state() -> SimulationState {
        let config = SimConfig {
            initial_hazards: 0,
            ..Default::default()
        };
        SimulationState::new(&config, Arena::new(800.0, 600.0), 1)
    }

    #[test]
    fn test_hazard_pair_swaps_exactly() {
        let mut hazards = vec![
            hazard(1, Vec2::new(100.0, 100.0), Vec2::new(1.0, -0.5)),
            hazard(2, Vec2::new(115.0, 100.0), Vec2::new(-1.5, 2.0)),
            hazard(3, Vec2::new(500.0, 500.0), Vec2::new(0.25, 0.25)),
        ];
        let energy_before: f32 = hazards.iter().map(|h| h.vel.length_squared()).sum();

        assert_eq!(resolve_hazard_pairs(&mut hazards), 1);
        assert_eq!(hazards[0].vel, Vec2::new(-1.5, 2.0));
        assert_eq!(hazards[1].vel, Vec2::new(1.0, -0.5));
        assert_eq!(hazards[2].vel, Vec2::new(0.25, 0.25));

        let energy_after: f32 = hazards.iter().map(|h| h.vel.length_squared()).sum();
        assert_eq!(energy_before, energy_after);
    }

    #[test]
    fn test_hazard_chain_resolves_in_index_order() {
        // 0-1 and 1-2 overlap, 0-2 do not
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(2.0, 0.0);
        let c = Vec2::new(3.0, 0.0);
        let mut hazards = vec![
            hazard(1, Vec2::new(100.0, 100.0), a),
            hazard(2, Vec2::new(115.0, 100.0), b),
            hazard(3, Vec2::new(130.0, 100.0), c),
        ];
        assert_eq!(resolve_hazard_pairs(&mut hazards), 2);
        // (0,1) swaps first, then (1,2)
        assert_eq!(hazards[0].vel, b);
        assert_eq!(hazards[1].vel, c);
        assert_eq!(hazards[2].vel, a);
    }

    #[test]
    fn test_single_and_empty_no_swaps() {
        assert_eq!(resolve_hazard_pairs(&mut []), 0);
        let mut one = vec![hazard(1, Vec2::ZERO, Vec2::ONE)];
        assert_eq!(resolve_hazard_pairs(&mut one), 0);
    }

    #[test]
    fn test_adjacent_hits_both_removed() {
        let mut state = empty_state();
        let p = state.player.pos;
        state.hazards = vec![
            hazard(1, p, Vec2::ONE),
            hazard(2, p + Vec2::new(5.0, 0.0), Vec2::ONE),
            hazard(3, p + Vec2::new(300.0, 0.0), Vec2::ONE),
        ];
        let mut events = Vec::new();
        resolve_player_hazards(&mut state, &mut events);

        assert_eq!(state.lives, 1);
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.hazards[0].id, 3);
        assert_eq!(
            events,
            vec![GameEvent::Hit { lives: 2 }, GameEvent::Hit { lives: 1 }]
        );
    }

    #[test]
    fn test_fatal_hit_stops_pass() {
        let mut state = empty_state();
        state.lives = 1;
        let p = state.player.pos;
        state.hazards = vec![hazard(1, p, Vec2::ONE), hazard(2, p, Vec2::ONE)];
        let mut events = Vec::new();
        resolve_player_hazards(&mut state, &mut events);

        assert!(state.is_over());
        assert_eq!(state.lives, 0);
        // Only the fatal hazard is consumed
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.hazards[0].id, 2);
        assert_eq!(
            events,
            vec![GameEvent::Hit { lives: 0 }, GameEvent::GameOver { score: 0 }]
        );
    }

    #[test]
    fn test_shield_absorbs_but_destroys() {
        let mut state = empty_state();
        state.effect = ActiveEffect::Shield { expires_at_ms: 1e9 };
        assert!(state.effect.is_shielded());
        let p = state.player.pos;
        state.hazards = vec![hazard(1, p, Vec2::ONE)];
        let mut events = Vec::new();
        resolve_player_hazards(&mut state, &mut events);

        assert_eq!(state.lives, 3);
        assert!(state.hazards.is_empty());
        assert_eq!(events, vec![GameEvent::ShieldBlocked]);
    }

    #[test]
    fn test_heal_at_cap_consumed() {
        let mut state = empty_state();
        state.lives = 5;
        let p = state.player.pos;
        state.power_ups = vec![PowerUp {
            id: 9,
            kind: PowerUpKind::Heal,
            pos: p,
            radius: 10.0,
        }];
        let mut events = Vec::new();
        resolve_power_ups(&mut state, 0.0, 5000.0, &mut events);

        assert_eq!(state.lives, 5);
        assert!(state.power_ups.is_empty());
        assert_eq!(events, vec![GameEvent::HealWasted]);
    }

    #[test]
    fn test_heal_and_shield_pickups() {
        let mut state = empty_state();
        let p = state.player.pos;
        state.power_ups = vec![
            PowerUp {
                id: 1,
                kind: PowerUpKind::Heal,
                pos: p,
                radius: 10.0,
            },
            PowerUp {
                id: 2,
                kind: PowerUpKind::Shield,
                pos: p + Vec2::new(3.0, 3.0),
                radius: 10.0,
            },
            PowerUp {
                id: 3,
                kind: PowerUpKind::Heal,
                pos: p + Vec2::new(200.0, 0.0),
                radius: 10.0,
            },
        ];
        let mut events = Vec::new();
        resolve_power_ups(&mut state, 100.0, 5000.0, &mut events);

        assert_eq!(state.lives, 4);
        assert_eq!(state.effect, ActiveEffect::Shield { expires_at_ms: 5100.0 });
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].id, 3);
        assert_eq!(
            events,
            vec![
                GameEvent::Healed { lives: 4 },
                GameEvent::ShieldGranted { expires_at_ms: 5100.0 }
            ]
        );
    }

    #[test]
    fn test_no_pickups_after_game_over() {
        let mut state = empty_state();
        state.lives = 0;
        state.phase = crate::sim::state::GamePhase::GameOver;
        let p = state.player.pos;
        state.power_ups = vec![PowerUp {
            id: 1,
            kind: PowerUpKind::Heal,
            pos: p,
            radius: 10.0,
        }];
        let mut events = Vec::new();
        resolve_power_ups(&mut state, 0.0, 5000.0, &mut events);
        assert_eq!(state.lives, 0);
        assert_eq!(state.power_ups.len(), 1);
        assert!(events.is_empty());
    }
}
