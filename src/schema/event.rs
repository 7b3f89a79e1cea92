use serde::{Deserialize, Serialize};

use crate::schema::beat::Ending;
use crate::schema::character::Role;

/// Top-level scene state. Transitions are strictly forward except for the
/// restart edge from `End` back to `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Title screen; nothing but `Start` is meaningful here.
    Start,
    /// The scripted introduction is playing.
    Dialogue,
    /// The duel proper: turns alternate until a terminal condition.
    Combat,
    /// An ending script is playing or has finished.
    End,
}

impl Phase {
    /// Short lowercase tag for logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Dialogue => "dialogue",
            Self::Combat => "combat",
            Self::End => "end",
        }
    }
}

/// Whose turn it is during [`Phase::Combat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnSide {
    Player,
    Enemy,
}

impl TurnSide {
    pub fn other(&self) -> TurnSide {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// The player's combat menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    Attack,
    Defend,
    Speak,
    /// The "decisive strike" that Hamlet never takes: plays a hesitation
    /// soliloquy and leaves the turn with the player.
    DecisiveStrike,
}

/// Identifies one issued animation request. The engine resolves each id at
/// most once; completions for unknown or already-resolved ids are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalId(pub u64);

/// Identifies one scheduled delay. Same single-fire discipline as
/// [`SignalId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

/// Everything the outside world can feed the engine.
///
/// The engine is a pure reducer over these: a driver (native shell, browser
/// shell, test harness) translates clicks, animation callbacks and elapsed
/// timers into `Input` values and applies the returned [`Output`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Input {
    /// The start button on the title screen.
    Start,
    /// A combat menu action.
    Action { action: PlayerAction },
    /// The dialogue "next" control: advances the queue, or acknowledges a
    /// pending strike report.
    Continue,
    /// Selection of a presented choice by position.
    Choose { index: usize },
    /// An attack animation issued with this signal has finished.
    AnimationDone { signal: SignalId },
    /// A scheduled delay issued with this timer has elapsed.
    TimerFired { timer: TimerId },
}

/// Everything the engine asks the outside world to do.
///
/// Outputs are presentation commands and scheduling requests; they carry no
/// game logic. A driver that applies them in order and feeds back the
/// requested completions reproduces the scene exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    PhaseChanged { phase: Phase },
    /// Play a lunge from attacker toward defender, then report back with
    /// `AnimationDone { signal }`.
    PlayAttack { attacker: Role, defender: Role, signal: SignalId },
    PlayDefend { actor: Role },
    ClearDefend { actor: Role },
    PlayDrink { actor: Role },
    ClearDrink { actor: Role },
    /// A scripted beat: attributed speech when `speaker` is set, narration
    /// otherwise.
    ShowLine { speaker: Option<&'static str>, text: &'static str },
    /// A system message (strike reports, guard notices).
    ShowMessage { text: String },
    /// Present options; answer with `Choose { index }`.
    ShowChoice { options: Vec<&'static str> },
    /// Hide the dialogue box.
    DialogueDismissed,
    MenuShown,
    MenuHidden,
    /// Current enablement of the four combat actions.
    ActionsEnabled { attack: bool, defend: bool, speak: bool, decisive: bool },
    /// Deferred refresh of one health bar, emitted when a strike report is
    /// acknowledged.
    HealthChanged { role: Role, current: u32, max: u32 },
    /// Fires exactly once per character per session, at the moment the
    /// death latch is set.
    CharacterDied { role: Role },
    /// Request a delayed `TimerFired { timer }` callback for the enemy's
    /// swing.
    ScheduleEnemyTurn { delay_ms: u64, timer: TimerId },
    EndingStarted { ending: Ending },
}

/// A point-in-time summary of engine state for drivers that render from
/// state rather than from the output stream.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub turn_side: TurnSide,
    pub turn_count: u32,
    pub player_defending: bool,
    pub input_locked: bool,
    pub warned_queen: bool,
    pub characters: Vec<CharacterSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterSnapshot {
    pub role: Role,
    pub name: &'static str,
    pub current_health: u32,
    pub max_health: u32,
    pub is_dead: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_tags() {
        assert_eq!(Phase::Start.tag(), "start");
        assert_eq!(Phase::Combat.tag(), "combat");
    }

    #[test]
    fn turn_side_alternates() {
        assert_eq!(TurnSide::Player.other(), TurnSide::Enemy);
        assert_eq!(TurnSide::Enemy.other(), TurnSide::Player);
    }

    #[test]
    fn inputs_round_trip_through_json() {
        let inputs = [
            Input::Start,
            Input::Action { action: PlayerAction::DecisiveStrike },
            Input::Continue,
            Input::Choose { index: 1 },
            Input::AnimationDone { signal: SignalId(7) },
            Input::TimerFired { timer: TimerId(3) },
        ];
        for input in inputs {
            let json = serde_json::to_string(&input).unwrap();
            let back: Input = serde_json::from_str(&json).unwrap();
            assert_eq!(back, input);
        }
    }

    #[test]
    fn input_wire_shape_is_stable() {
        let json = serde_json::to_value(Input::Action { action: PlayerAction::Attack }).unwrap();
        assert_eq!(json["kind"], "action");
        assert_eq!(json["action"], "attack");

        let json = serde_json::to_value(Input::AnimationDone { signal: SignalId(2) }).unwrap();
        assert_eq!(json["kind"], "animation_done");
        assert_eq!(json["signal"], 2);
    }

    #[test]
    fn output_wire_shape_is_stable() {
        let out = Output::PlayAttack {
            attacker: Role::Player,
            defender: Role::Opponent,
            signal: SignalId(0),
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["kind"], "play_attack");
        assert_eq!(json["attacker"], "player");
        assert_eq!(json["defender"], "opponent");
        assert_eq!(json["signal"], 0);

        let out = Output::ShowLine { speaker: Some("Hamlet"), text: "Come on, sir." };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["kind"], "show_line");
        assert_eq!(json["speaker"], "Hamlet");
        assert_eq!(json["text"], "Come on, sir.");
    }
}
