use serde::{Deserialize, Serialize};

use crate::schema::character::Role;

/// One entry in the dialogue queue: a line of speech or a piece of
/// narration, plus the state changes that fire when it is shown.
///
/// Beats are plain data. The scripted sequences in [`crate::script`] are
/// static tables of them, and the engine applies each beat's effects at the
/// moment the beat is surfaced, before the presentation sees the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Beat {
    /// `None` renders as narration rather than attributed speech.
    pub speaker: Option<&'static str>,
    pub text: &'static str,
    pub effects: &'static [BeatEffect],
}

impl Beat {
    pub const fn line(speaker: &'static str, text: &'static str) -> Self {
        Self { speaker: Some(speaker), text, effects: &[] }
    }

    pub const fn line_with(
        speaker: &'static str,
        text: &'static str,
        effects: &'static [BeatEffect],
    ) -> Self {
        Self { speaker: Some(speaker), text, effects }
    }

    pub const fn narration(text: &'static str) -> Self {
        Self { speaker: None, text, effects: &[] }
    }

    pub const fn narration_with(text: &'static str, effects: &'static [BeatEffect]) -> Self {
        Self { speaker: None, text, effects }
    }
}

/// A state change attached to a beat, applied when the beat is shown.
///
/// These replace the free-form callbacks an interactive script might embed:
/// every side effect a beat can have is enumerated here, so the dialogue
/// tables stay inert data and the engine stays the only place that mutates
/// game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BeatEffect {
    /// Latch the character's death without touching health.
    MarkDead { role: Role },
    /// Start the character's drinking pose.
    BeginDrink { role: Role },
    /// End the character's drinking pose.
    EndDrink { role: Role },
    /// Hand the turn to the other side once the beat is shown.
    AdvanceTurn,
}

/// One option in a presented choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub action: ChoiceAction,
}

/// What selecting a choice does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceAction {
    /// Warn Gertrude about the poisoned cup. Latches for the session and
    /// suppresses the queen's death scene.
    WarnQueen,
    /// Taunt Laertes instead; passes the turn via the taunt line's effect.
    TauntLaertes,
    /// Begin a fresh session from the title state.
    Restart,
}

/// The four ways the duel can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// Laertes' health reaches zero: the full Act V bloodbath plays out.
    Canonical,
    /// The player's health reaches zero.
    Death,
    /// The turn limit runs out: the poison finishes Hamlet, who strikes the
    /// King with his last breath.
    DelayedStrike,
    /// Reserved for a mercy path where the killing blow is refused.
    SpareLaertes,
}

/// Mid-combat scripted interruptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneEvent {
    /// The player chose to warn the Queen; she sets the cup down.
    WarnQueen,
    /// The Queen drinks unwarned on the scheduled turn and dies.
    QueenDrinksNatural,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_speaker_and_effects() {
        let spoken = Beat::line("Hamlet", "Come on, sir.");
        assert_eq!(spoken.speaker, Some("Hamlet"));
        assert!(spoken.effects.is_empty());

        let narrated = Beat::narration_with("The rest is silence.", &[BeatEffect::AdvanceTurn]);
        assert_eq!(narrated.speaker, None);
        assert_eq!(narrated.effects, &[BeatEffect::AdvanceTurn]);
    }

    #[test]
    fn effects_serialize_with_kind_tags() {
        let json = serde_json::to_value(BeatEffect::MarkDead { role: Role::Queen }).unwrap();
        assert_eq!(json["kind"], "mark_dead");
        assert_eq!(json["role"], "queen");

        let json = serde_json::to_value(BeatEffect::AdvanceTurn).unwrap();
        assert_eq!(json["kind"], "advance_turn");
    }
}
