use serde::{Deserialize, Serialize};

/// The four fixed members of the duel scene.
///
/// Roles are stable handles into the [`Cast`]; the engine and its scripts
/// address characters by role, never by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Player,
    Opponent,
    King,
    Queen,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Player, Role::Opponent, Role::King, Role::Queen];

    /// The character's display name: "Hamlet", "Laertes", "Claudius", "Gertrude".
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Player => "Hamlet",
            Self::Opponent => "Laertes",
            Self::King => "Claudius",
            Self::Queen => "Gertrude",
        }
    }
}

/// A mutable combatant or bystander in the scene.
///
/// Health is clamped to `0..=max_health` by construction: damage saturates at
/// zero and healing saturates at the maximum. `is_dead` latches once set and
/// is never cleared for the lifetime of the session, whether death came from
/// damage or from a scripted beat.
#[derive(Debug, Clone, Serialize)]
pub struct Character {
    pub name: &'static str,
    pub max_health: u32,
    pub current_health: u32,
    pub is_player: bool,
    pub is_dead: bool,
    /// Set by [`Character::poison`], read by nothing in the current
    /// resolution logic. Kept as scene content the scripts may grow into.
    pub is_poisoned: bool,
}

impl Character {
    pub fn new(name: &'static str, max_health: u32, is_player: bool) -> Self {
        Self {
            name,
            max_health,
            current_health: max_health,
            is_player,
            is_dead: false,
            is_poisoned: false,
        }
    }

    /// Apply damage, clamping health at zero and latching death.
    pub fn take_damage(&mut self, amount: u32) {
        self.current_health = self.current_health.saturating_sub(amount);
        if self.current_health == 0 {
            self.is_dead = true;
        }
    }

    /// Restore health, clamped to the maximum. Does not clear `is_dead`.
    pub fn heal(&mut self, amount: u32) {
        self.current_health = (self.current_health + amount).min(self.max_health);
    }

    pub fn poison(&mut self) {
        self.is_poisoned = true;
    }

    /// Scripted death: latches `is_dead` without touching health. The royal
    /// deaths in the ending scripts take this path.
    pub fn die(&mut self) {
        self.is_dead = true;
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }
}

/// The owned set of all four characters, indexed by [`Role`].
///
/// Created once per session and never destroyed; a restart replaces the
/// whole cast.
#[derive(Debug, Clone, Serialize)]
pub struct Cast {
    player: Character,
    opponent: Character,
    king: Character,
    queen: Character,
}

impl Cast {
    pub fn new(player_health: u32, opponent_health: u32, king_health: u32, queen_health: u32) -> Self {
        Self {
            player: Character::new(Role::Player.display_name(), player_health, true),
            opponent: Character::new(Role::Opponent.display_name(), opponent_health, false),
            king: Character::new(Role::King.display_name(), king_health, false),
            queen: Character::new(Role::Queen.display_name(), queen_health, false),
        }
    }

    pub fn get(&self, role: Role) -> &Character {
        match role {
            Role::Player => &self.player,
            Role::Opponent => &self.opponent,
            Role::King => &self.king,
            Role::Queen => &self.queen,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut Character {
        match role {
            Role::Player => &mut self.player,
            Role::Opponent => &mut self.opponent,
            Role::King => &mut self.king,
            Role::Queen => &mut self.queen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cast() -> Cast {
        Cast::new(100, 80, 60, 50)
    }

    #[test]
    fn role_display_names() {
        assert_eq!(Role::Player.display_name(), "Hamlet");
        assert_eq!(Role::Opponent.display_name(), "Laertes");
        assert_eq!(Role::King.display_name(), "Claudius");
        assert_eq!(Role::Queen.display_name(), "Gertrude");
    }

    #[test]
    fn cast_starts_at_full_health() {
        let cast = make_cast();
        for role in Role::ALL {
            let c = cast.get(role);
            assert_eq!(c.current_health, c.max_health);
            assert!(c.is_alive());
            assert!(!c.is_poisoned);
        }
        assert!(cast.get(Role::Player).is_player);
        assert!(!cast.get(Role::Opponent).is_player);
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut c = Character::new("Laertes", 80, false);
        c.take_damage(79);
        assert_eq!(c.current_health, 1);
        assert!(c.is_alive());
        c.take_damage(50);
        assert_eq!(c.current_health, 0);
        assert!(c.is_dead);
    }

    #[test]
    fn exact_kill_latches_death() {
        let mut c = Character::new("Hamlet", 10, true);
        c.take_damage(10);
        assert_eq!(c.current_health, 0);
        assert!(c.is_dead);
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut c = Character::new("Hamlet", 100, true);
        c.take_damage(30);
        c.heal(10);
        assert_eq!(c.current_health, 80);
        c.heal(1000);
        assert_eq!(c.current_health, 100);
    }

    #[test]
    fn death_is_monotonic() {
        let mut c = Character::new("Gertrude", 50, false);
        c.die();
        assert!(c.is_dead);
        assert_eq!(c.current_health, 50, "scripted death leaves health untouched");
        c.heal(100);
        assert!(c.is_dead, "healing never resurrects");
    }

    #[test]
    fn poison_latches() {
        let mut c = Character::new("Gertrude", 50, false);
        assert!(!c.is_poisoned);
        c.poison();
        assert!(c.is_poisoned);
    }

    #[test]
    fn cast_get_mut_targets_the_right_character() {
        let mut cast = make_cast();
        cast.get_mut(Role::Queen).die();
        assert!(cast.get(Role::Queen).is_dead);
        assert!(cast.get(Role::King).is_alive());
    }
}
