/// Duel example — a scripted pass through the final scene.
///
/// A mini playthrough: the court assembles, foils cross, Hamlet stalls,
/// warns his mother, and the bout runs to whichever ending the rolls allow.
/// Animations and delays are completed immediately.
///
/// Run with: cargo run --example duel

use elsinore::core::engine::DuelEngine;
use elsinore::schema::beat::Ending;
use elsinore::schema::event::{Input, Output, Phase, PlayerAction};
use std::collections::VecDeque;

fn main() {
    // Engine internals go to stderr when RUST_LOG asks for them; the
    // playthrough itself stays on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let engine = DuelEngine::builder()
        .seed(2026)
        .build()
        .expect("Failed to build engine");
    let mut shell = Shell { engine, ending: None };

    println!("========================================");
    println!("   THE DUEL AT ELSINORE");
    println!("   Hamlet, Act V, Scene II");
    println!("========================================");
    println!();

    // --- The court assembles ---
    scene("The court assembles");
    shell.send(Input::Start);
    for _ in 0..5 {
        shell.advance();
    }

    // --- First exchange ---
    scene("First exchange");
    shell.exchange();

    // --- Hamlet cannot bring himself to end it ---
    scene("Hamlet stalls");
    shell.send(Input::Action { action: PlayerAction::DecisiveStrike });
    shell.advance();
    shell.advance();

    // --- Second exchange ---
    scene("Second exchange");
    shell.exchange();

    // --- A word with the Queen ---
    scene("A word with the Queen");
    shell.send(Input::Action { action: PlayerAction::Speak });
    shell.send(Input::Choose { index: 0 });
    shell.advance();
    shell.advance();
    shell.advance();

    // --- Steel until a body falls ---
    scene("Steel until a body falls");
    while shell.engine.phase() == Phase::Combat {
        shell.send(Input::Action { action: PlayerAction::Attack });
        shell.advance();
        if shell.engine.phase() != Phase::Combat {
            break;
        }
        shell.advance();
    }

    // --- The ending plays out ---
    scene("The ending plays out");
    let mut guard = 0;
    while shell.engine.pending_choice().is_none() && guard < 16 {
        shell.advance();
        guard += 1;
    }

    // --- Once more ---
    scene("Once more");
    shell.send(Input::Choose { index: 0 });
    println!("(back at the title screen; the scene replays forever)");
    println!();

    println!("========================================");
    match shell.ending {
        Some(ending) => println!("   FIN — {:?}", ending),
        None => println!("   FIN"),
    }
    println!("========================================");
}

fn scene(title: &str) {
    println!("--- {} ---", title);
}

struct Shell {
    engine: DuelEngine,
    ending: Option<Ending>,
}

impl Shell {
    /// Feed one input, answering animation signals and enemy-turn timers
    /// immediately, and print what a player would see.
    fn send(&mut self, input: Input) {
        let mut pending = VecDeque::new();
        pending.push_back(input);
        while let Some(next) = pending.pop_front() {
            for out in self.engine.handle(next) {
                self.render(&out);
                match out {
                    Output::PlayAttack { signal, .. } => {
                        pending.push_back(Input::AnimationDone { signal });
                    }
                    Output::ScheduleEnemyTurn { timer, .. } => {
                        pending.push_back(Input::TimerFired { timer });
                    }
                    _ => {}
                }
            }
        }
    }

    fn advance(&mut self) {
        self.send(Input::Continue);
    }

    /// One full round: the player's swing, its acknowledgement, and the
    /// enemy's answer.
    fn exchange(&mut self) {
        self.send(Input::Action { action: PlayerAction::Attack });
        self.advance();
        if self.engine.phase() == Phase::Combat {
            self.advance();
        }
    }

    fn render(&mut self, out: &Output) {
        match out {
            Output::ShowLine { speaker: Some(speaker), text } => println!("{}: {}", speaker, text),
            Output::ShowLine { speaker: None, text } => println!("  {}", text),
            Output::ShowMessage { text } => println!("  * {}", text),
            Output::ShowChoice { options } => {
                for (idx, label) in options.iter().enumerate() {
                    println!("  [{}] {}", idx, label);
                }
            }
            Output::CharacterDied { role } => println!("  ({} has died)", role.display_name()),
            Output::EndingStarted { ending } => {
                self.ending = Some(*ending);
                println!();
            }
            _ => {}
        }
    }
}
