//! The static script of the scene: every line of dialogue, narration and
//! choice text, with the state changes each beat carries.
//!
//! Tables here are inert data. The engine copies a sequence into the
//! dialogue queue and applies each beat's effects as it surfaces; nothing
//! in this module mutates state.

use crate::schema::beat::{Beat, BeatEffect, Choice, ChoiceAction, Ending, SceneEvent};
use crate::schema::character::Role;

/// The courtly exchange before the foils are taken up.
pub static INTRO: &[Beat] = &[
    Beat::line("Osric", "The King and Queen and all are coming down."),
    Beat::line("King Claudius", "Come, Hamlet, come, and take this hand from me."),
    Beat::line(
        "Laertes",
        "I am satisfied in nature, whose motive, in this case, should stir me most to my revenge.",
    ),
    Beat::line("Hamlet", "I embrace it freely; and will this brother's wager frankly play."),
    Beat::line("King Claudius", "Give them the foils, young Osric."),
];

/// Mid-bout flavor lines; one is drawn at random when the player speaks
/// without anything scripted to say.
pub static FLAVOR_LINES: &[Beat] = &[
    Beat::line("Hamlet", "Come on, sir."),
    Beat::line("Laertes", "Come, my lord."),
    Beat::line("Hamlet", "One."),
    Beat::line("Laertes", "No."),
    Beat::line("Hamlet", "Judgment."),
    Beat::line("Osric", "A hit, a very palpable hit."),
    Beat::line("Hamlet", "Another hit; what say you?"),
    Beat::line("Laertes", "A touch, a touch, I do confess."),
];

/// Soliloquy fragments for the decisive strike the player cannot bring
/// himself to make. Each pair is shown in order; the turn is not consumed.
pub static HESITATION_SEQUENCES: &[[Beat; 2]] = &[
    [
        Beat::narration("(Hesitation) \"Now might I do it pat, now he is praying...\""),
        Beat::narration(
            "(Hesitation) \"And now I'll do't. And so he goes to heaven; And so am I revenged.\"",
        ),
    ],
    [
        Beat::narration(
            "(Hesitation) \"A villain kills my father; and for that, I, his sole son, do this same villain send to heaven.\"",
        ),
        Beat::narration("(Hesitation) \"O, this is hire and salary, not revenge.\""),
    ],
    [
        Beat::narration("(Hesitation) \"The spirit that I have seen may be the devil...\""),
        Beat::narration(
            "(Hesitation) \"And the devil hath power to assume a pleasing shape.\"",
        ),
    ],
    [
        Beat::narration("(Hesitation) \"Thus conscience does make cowards of us all...\""),
        Beat::narration(
            "(Hesitation) \"And thus the native hue of resolution Is sicklied o'er with the pale cast of thought.\"",
        ),
    ],
];

/// Spoken when the Queen is already warned or dead and there is nothing
/// left to say but needling. Passes the turn.
pub static TAUNT_WANTON: Beat = Beat::line_with(
    "Hamlet",
    "I am afeard you make a wanton of me.",
    &[BeatEffect::AdvanceTurn],
);

/// The taunt branch of the warn-or-taunt choice. Passes the turn.
pub static TAUNT_DALLY: Beat = Beat::line_with(
    "Hamlet",
    "Come, for the third, Laertes: you but dally.",
    &[BeatEffect::AdvanceTurn],
);

static CANONICAL_ENDING: &[Beat] = &[
    Beat::narration_with(
        "Laertes falls, wounded by your hand.",
        &[BeatEffect::MarkDead { role: Role::Opponent }],
    ),
    Beat::line("Laertes", "I am justly killed with mine own treachery..."),
    Beat::line("Hamlet", "The point!--envenom'd too! Then, venom, to thy work."),
    Beat::narration_with("Hamlet wounds the King.", &[BeatEffect::MarkDead { role: Role::King }]),
    Beat::line(
        "Hamlet",
        "Here, thou incestuous, murderous, damned Dane, Drink off this potion. Is thy union here? Follow my mother.",
    ),
    Beat::line("Laertes", "Exchange forgiveness with me, noble Hamlet..."),
    Beat::line_with(
        "Hamlet",
        "Heaven make thee free of it! I follow thee.",
        &[BeatEffect::MarkDead { role: Role::Player }],
    ),
    Beat::narration("The rest is silence."),
];

static DEATH_ENDING: &[Beat] = &[
    Beat::narration("The rest is silence."),
    Beat::narration("GAME OVER"),
];

static DELAYED_ENDING: &[Beat] = &[
    Beat::narration("You wait too long. Your hesitation consumes you."),
    Beat::line_with(
        "Hamlet",
        "O, I die, Horatio; The potent poison quite o'er-crows my spirit.",
        &[BeatEffect::MarkDead { role: Role::Player }],
    ),
    Beat::narration_with(
        "In your last breath, you finally strike at the King.",
        &[BeatEffect::MarkDead { role: Role::King }],
    ),
    Beat::line(
        "Hamlet",
        "Here, thou incestuous, murderous, damned Dane, Drink off this potion. Is thy union here? Follow my mother.",
    ),
    Beat::narration("The rest is silence."),
];

static REDEMPTION_ENDING: &[Beat] = &[
    Beat::narration("You lower your sword, refusing to strike the killing blow."),
    Beat::line("Laertes", "Why do you not strike? I... I cannot do it against my conscience."),
    Beat::line(
        "Laertes",
        "My lord, I will hit you now... And yet 'tis almost 'against my conscience.",
    ),
    Beat::narration("Laertes drops his sword. The plot is revealed early."),
    Beat::narration("ENDING 3: FORGIVENESS"),
];

/// The Queen's farewell when the warning comes too late to save her.
/// Not reachable from the current ending selector; kept with the rest of
/// the scene for a mercy path that warns after she has drunk.
pub static MOTHERS_SACRIFICE: &[Beat] = &[
    Beat::line("Hamlet", "Mother, do not drink!"),
    Beat::line("Queen Gertrude", "I will, my lord; I pray you, pardon me."),
    Beat::narration("She drinks. It is too late to save her, but she knows."),
    Beat::line("Queen Gertrude", "Come, let me wipe thy face."),
    Beat::narration("ENDING 2: A MOTHER'S SACRIFICE"),
];

static WARN_QUEEN_EVENT: &[Beat] = &[
    Beat::line("Hamlet", "Mother, do not drink!"),
    Beat::narration("Gertrude lowers the cup. She waits, watching the duel with concern."),
    Beat::narration_with(
        "Laertes prepares to strike while you are distracted...",
        &[BeatEffect::AdvanceTurn],
    ),
];

static QUEEN_DRINKS_EVENT: &[Beat] = &[
    Beat::line("Queen Gertrude", "The Queen carouses to thy fortune, Hamlet."),
    Beat::narration_with(
        "She lifts the cup to her lips...",
        &[BeatEffect::BeginDrink { role: Role::Queen }],
    ),
    Beat::line("King Claudius", "Gertrude, do not drink!"),
    Beat::line("Queen Gertrude", "I will, my lord; I pray you, pardon me."),
    Beat::line("Queen Gertrude", "The drink, the drink! I am poison'd."),
    Beat::narration_with(
        "She drinks. The poison works instantly.",
        &[
            BeatEffect::MarkDead { role: Role::Queen },
            BeatEffect::EndDrink { role: Role::Queen },
        ],
    ),
    Beat::narration("Queen Gertrude has died."),
    Beat::narration_with(
        "Laertes prepares to strike while you are distracted...",
        &[BeatEffect::AdvanceTurn],
    ),
];

/// The scripted sequence for an ending.
pub fn ending_script(ending: Ending) -> &'static [Beat] {
    match ending {
        Ending::Canonical => CANONICAL_ENDING,
        Ending::Death => DEATH_ENDING,
        Ending::DelayedStrike => DELAYED_ENDING,
        Ending::SpareLaertes => REDEMPTION_ENDING,
    }
}

/// The scripted sequence for a mid-combat event.
pub fn event_script(event: SceneEvent) -> &'static [Beat] {
    match event {
        SceneEvent::WarnQueen => WARN_QUEEN_EVENT,
        SceneEvent::QueenDrinksNatural => QUEEN_DRINKS_EVENT,
    }
}

/// The options offered when the player speaks while the Queen still holds
/// the cup.
pub fn warn_or_taunt_choices() -> Vec<Choice> {
    vec![
        Choice { label: "Warn Mother about the cup", action: ChoiceAction::WarnQueen },
        Choice { label: "Taunt Laertes", action: ChoiceAction::TauntLaertes },
    ]
}

/// The single option offered once an ending script has played out.
pub fn restart_choices() -> Vec<Choice> {
    vec![Choice { label: "Play Again", action: ChoiceAction::Restart }]
}
