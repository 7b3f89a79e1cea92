/// Transcript — interactive shell for driving the duel engine by hand.
///
/// Animations and enemy-turn delays are completed immediately, so a session
/// here is the same input stream a browser driver would produce, minus the
/// waiting.
///
/// Usage: transcript [--config <path>] [--seed <n>] [--verbose]
///
/// Commands:
///   start            — begin the duel from the title screen
///   attack | a       — lunge at Laertes
///   defend | d       — raise your guard for the coming exchange
///   speak            — talk instead of fighting
///   strike           — attempt the decisive strike
///   next | n         — advance the dialogue (or acknowledge a hit)
///   choose <i>       — answer a presented choice by index
///   state            — print the scene snapshot
///   seed <n>         — rebuild the engine with a new seed
///   help             — list commands
///   quit             — exit

use elsinore::core::config::DuelConfig;
use elsinore::core::engine::DuelEngine;
use elsinore::schema::event::{Input, Output, PlayerAction};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h") {
        print_usage();
        return;
    }

    let mut config_path = None;
    let mut seed: u64 = 42;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(ref path) => match DuelConfig::load_from_ron(Path::new(path)) {
            Ok(c) => {
                println!("Loaded config: {}", path);
                c
            }
            Err(e) => {
                eprintln!("ERROR loading config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => DuelConfig::default(),
    };

    let mut current_seed = seed;
    let mut engine = build_engine(current_seed, config.clone());

    println!("Seed: {}", current_seed);
    println!("Type 'help' for commands, 'start' to begin.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("duel> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "start" => {
                drive(&mut engine, Input::Start, verbose);
            }
            "attack" | "a" => {
                drive(&mut engine, Input::Action { action: PlayerAction::Attack }, verbose);
            }
            "defend" | "d" => {
                drive(&mut engine, Input::Action { action: PlayerAction::Defend }, verbose);
            }
            "speak" => {
                drive(&mut engine, Input::Action { action: PlayerAction::Speak }, verbose);
            }
            "strike" => {
                drive(
                    &mut engine,
                    Input::Action { action: PlayerAction::DecisiveStrike },
                    verbose,
                );
            }
            "next" | "n" | "c" => {
                drive(&mut engine, Input::Continue, verbose);
            }
            "choose" => {
                if parts.len() < 2 {
                    match engine.pending_choice() {
                        Some(options) => {
                            println!("Usage: choose <i>");
                            for (idx, choice) in options.iter().enumerate() {
                                println!("  [{}] {}", idx, choice.label);
                            }
                        }
                        None => println!("Nothing to choose right now."),
                    }
                    continue;
                }
                match parts[1].parse::<usize>() {
                    Ok(index) => drive(&mut engine, Input::Choose { index }, verbose),
                    Err(_) => println!("Invalid index: {}", parts[1]),
                }
            }
            "state" => {
                print_state(&engine);
            }
            "seed" => {
                if parts.len() < 2 {
                    println!("Current seed: {}", current_seed);
                    continue;
                }
                match parts[1].parse::<u64>() {
                    Ok(s) => {
                        current_seed = s;
                        engine = build_engine(current_seed, config.clone());
                        println!("Seed set to {}. Fresh session; type 'start'.", current_seed);
                    }
                    Err(_) => {
                        println!("Invalid seed: {}", parts[1]);
                    }
                }
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn build_engine(seed: u64, config: DuelConfig) -> DuelEngine {
    DuelEngine::builder().seed(seed).config(config).build().unwrap()
}

/// Feed one input, answering every animation signal and enemy-turn timer
/// immediately, until the engine has nothing more to say.
fn drive(engine: &mut DuelEngine, input: Input, verbose: bool) {
    let mut pending = VecDeque::new();
    pending.push_back(input);

    let mut produced = false;
    while let Some(next) = pending.pop_front() {
        let outputs = engine.handle(next);
        for out in &outputs {
            produced = true;
            if verbose {
                println!("[out] {:?}", out);
            }
            render(out);
            match out {
                Output::PlayAttack { signal, .. } => {
                    pending.push_back(Input::AnimationDone { signal: *signal });
                }
                Output::ScheduleEnemyTurn { timer, .. } => {
                    pending.push_back(Input::TimerFired { timer: *timer });
                }
                _ => {}
            }
        }
    }

    if !produced {
        println!("(nothing happens)");
    }
}

fn render(out: &Output) {
    match out {
        Output::ShowLine { speaker: Some(speaker), text } => {
            println!("{}: {}", speaker, text);
        }
        Output::ShowLine { speaker: None, text } => {
            println!("  {}", text);
        }
        Output::ShowMessage { text } => {
            println!("  * {}", text);
        }
        Output::ShowChoice { options } => {
            println!("  Choose:");
            for (idx, label) in options.iter().enumerate() {
                println!("    [{}] {}", idx, label);
            }
        }
        Output::PhaseChanged { phase } => {
            println!("  -- {} --", phase.tag());
        }
        Output::HealthChanged { role, current, max } => {
            println!("  [{} {}/{}]", role.display_name(), current, max);
        }
        Output::CharacterDied { role } => {
            println!("  ({} has died)", role.display_name());
        }
        Output::EndingStarted { ending } => {
            println!("  -- ending: {:?} --", ending);
        }
        Output::ActionsEnabled { attack, defend, speak, decisive } => {
            if *attack || *defend || *speak || *decisive {
                let mut actions = Vec::new();
                if *attack {
                    actions.push("attack");
                }
                if *defend {
                    actions.push("defend");
                }
                if *speak {
                    actions.push("speak");
                }
                if *decisive {
                    actions.push("strike");
                }
                println!("  (your move: {})", actions.join(" | "));
            }
        }
        // Animation and chrome commands have no terminal rendering.
        Output::PlayAttack { .. }
        | Output::PlayDefend { .. }
        | Output::ClearDefend { .. }
        | Output::PlayDrink { .. }
        | Output::ClearDrink { .. }
        | Output::DialogueDismissed
        | Output::MenuShown
        | Output::MenuHidden
        | Output::ScheduleEnemyTurn { .. } => {}
    }
}

fn print_state(engine: &DuelEngine) {
    let snap = engine.snapshot();
    println!("phase: {}", snap.phase.tag());
    println!(
        "turn: {} ({:?}){}{}",
        snap.turn_count,
        snap.turn_side,
        if snap.input_locked { ", input locked" } else { "" },
        if snap.player_defending { ", defending" } else { "" },
    );
    println!("warned queen: {}", snap.warned_queen);
    for c in &snap.characters {
        let status = if c.is_dead { " (dead)" } else { "" };
        println!("  {:<10} {:>3}/{:<3}{}", c.name, c.current_health, c.max_health, status);
    }
    if let Some(options) = engine.pending_choice() {
        println!("pending choice:");
        for (idx, choice) in options.iter().enumerate() {
            println!("  [{}] {}", idx, choice.label);
        }
    }
}

fn print_usage() {
    println!("Transcript — interactive shell for driving the duel engine by hand.");
    println!();
    println!("Usage: transcript [--config <path>] [--seed <n>] [--verbose]");
    println!();
    println!("  --config <path>  Path to a RON tuning file");
    println!("  --seed <n>       RNG seed (default: 42)");
    println!("  --verbose        Print every raw engine output");
}

fn print_help() {
    println!("Commands:");
    println!("  start            Begin the duel from the title screen");
    println!("  attack | a       Lunge at Laertes");
    println!("  defend | d       Raise your guard for the coming exchange");
    println!("  speak            Talk instead of fighting");
    println!("  strike           Attempt the decisive strike");
    println!("  next | n         Advance the dialogue (or acknowledge a hit)");
    println!("  choose <i>       Answer a presented choice by index");
    println!("  state            Print the scene snapshot");
    println!("  seed <n>         Rebuild the engine with a new seed");
    println!("  help             Show this help");
    println!("  quit             Exit");
}
