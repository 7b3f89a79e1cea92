/// Combat arithmetic and turn bookkeeping — damage rolls, the defend
/// reduction, action gating, and terminal outcomes.

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::config::DuelConfig;
use crate::schema::beat::Ending;
use crate::schema::character::{Cast, Role};
use crate::schema::event::{SignalId, TurnSide};

/// Per-bout turn bookkeeping. Reset wholesale on restart.
#[derive(Debug, Clone)]
pub struct TurnState {
    pub side: TurnSide,
    /// Total half-turns taken by either side since combat began.
    pub count: u32,
    /// Set by the defend action; cleared when the player next acts or when
    /// their turn comes round again. At most one incoming strike is reduced.
    pub player_defending: bool,
    /// While set, combat actions are ignored. Locked from the moment an
    /// action is accepted until the player's next turn opens.
    pub input_locked: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            side: TurnSide::Player,
            count: 0,
            player_defending: false,
            input_locked: true,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// An attack in flight. The two stages are the engine's suspension points:
/// `Swing` waits for the animation completion, `Report` waits for the
/// player to acknowledge the strike message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Swing { attacker: Role, defender: Role, signal: SignalId },
    Report { attacker: Role, defender: Role, damage: u32 },
}

/// Which combat actions the menu should offer right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionAvailability {
    pub attack: bool,
    pub defend: bool,
    pub speak: bool,
    pub decisive: bool,
}

impl ActionAvailability {
    /// Enablement at the top of a player turn. Speak stays dark until the
    /// bout has warmed up; the decisive strike is always offered (taking it
    /// is the trap).
    pub fn for_turn(turn_count: u32, config: &DuelConfig) -> Self {
        Self {
            attack: true,
            defend: true,
            speak: turn_count >= config.speak_unlock_turn,
            decisive: true,
        }
    }

    pub fn locked() -> Self {
        Self { attack: false, defend: false, speak: false, decisive: false }
    }
}

/// Roll base damage for one strike. The enemy's blade is sharper by a flat
/// bonus.
pub fn roll_damage(rng: &mut StdRng, config: &DuelConfig, attacker_is_player: bool) -> u32 {
    let mut damage = rng.gen_range(config.damage_min..=config.damage_max);
    if !attacker_is_player {
        damage += config.enemy_damage_bonus;
    }
    damage
}

/// Apply the guard reduction to an incoming strike.
pub fn reduce_for_defense(damage: u32, config: &DuelConfig) -> u32 {
    damage / config.defend_divisor
}

/// Check the duel's terminal conditions after an exchange. The player's
/// death is checked first, so a simultaneous wipe reads as a loss.
pub fn terminal_outcome(cast: &Cast) -> Option<Ending> {
    if cast.get(Role::Player).current_health == 0 {
        Some(Ending::Death)
    } else if cast.get(Role::Opponent).current_health == 0 {
        Some(Ending::Canonical)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn fresh_turn_state() {
        let turn = TurnState::new();
        assert_eq!(turn.side, TurnSide::Player);
        assert_eq!(turn.count, 0);
        assert!(!turn.player_defending);
        assert!(turn.input_locked);
    }

    #[test]
    fn player_damage_stays_in_configured_bounds() {
        let config = DuelConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let damage = roll_damage(&mut rng, &config, true);
            assert!((config.damage_min..=config.damage_max).contains(&damage));
        }
    }

    #[test]
    fn enemy_damage_carries_the_bonus() {
        let config = DuelConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let lo = config.damage_min + config.enemy_damage_bonus;
        let hi = config.damage_max + config.enemy_damage_bonus;
        for _ in 0..500 {
            let damage = roll_damage(&mut rng, &config, false);
            assert!((lo..=hi).contains(&damage));
        }
    }

    #[test]
    fn damage_rolls_are_seed_deterministic() {
        let config = DuelConfig::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(roll_damage(&mut a, &config, true), roll_damage(&mut b, &config, true));
        }
    }

    #[test]
    fn defense_reduction_rounds_down() {
        let config = DuelConfig::default();
        assert_eq!(reduce_for_defense(5, &config), 1);
        assert_eq!(reduce_for_defense(9, &config), 1);
        assert_eq!(reduce_for_defense(10, &config), 2);
        assert_eq!(reduce_for_defense(14, &config), 2);
        assert_eq!(reduce_for_defense(15, &config), 3);
        assert_eq!(reduce_for_defense(4, &config), 0);
    }

    #[test]
    fn speak_unlocks_with_the_turn_count() {
        let config = DuelConfig::default();
        assert!(!ActionAvailability::for_turn(0, &config).speak);
        assert!(!ActionAvailability::for_turn(2, &config).speak);
        assert!(ActionAvailability::for_turn(3, &config).speak);
        assert!(ActionAvailability::for_turn(10, &config).speak);
    }

    #[test]
    fn attack_defend_decisive_always_offered_on_a_live_turn() {
        let config = DuelConfig::default();
        let avail = ActionAvailability::for_turn(0, &config);
        assert!(avail.attack);
        assert!(avail.defend);
        assert!(avail.decisive);
        assert_eq!(ActionAvailability::locked(), ActionAvailability {
            attack: false,
            defend: false,
            speak: false,
            decisive: false,
        });
    }

    #[test]
    fn no_terminal_outcome_while_both_duelists_stand() {
        let cast = Cast::new(100, 80, 60, 50);
        assert_eq!(terminal_outcome(&cast), None);
    }

    #[test]
    fn opponent_at_zero_reads_canonical() {
        let mut cast = Cast::new(100, 80, 60, 50);
        cast.get_mut(Role::Opponent).take_damage(80);
        assert_eq!(terminal_outcome(&cast), Some(Ending::Canonical));
    }

    #[test]
    fn player_death_wins_the_tie() {
        let mut cast = Cast::new(100, 80, 60, 50);
        cast.get_mut(Role::Player).take_damage(100);
        cast.get_mut(Role::Opponent).take_damage(80);
        assert_eq!(terminal_outcome(&cast), Some(Ending::Death));
    }

    #[test]
    fn royal_deaths_do_not_end_combat() {
        let mut cast = Cast::new(100, 80, 60, 50);
        cast.get_mut(Role::Queen).die();
        cast.get_mut(Role::King).die();
        assert_eq!(terminal_outcome(&cast), None);
    }
}
