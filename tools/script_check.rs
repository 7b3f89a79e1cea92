/// Script check — structural validation of the scene's dialogue tables.
///
/// Usage: script_check [--verbose]

use elsinore::schema::beat::{Beat, BeatEffect, Ending, SceneEvent};
use elsinore::schema::character::Role;
use elsinore::script;
use std::collections::{HashMap, HashSet};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut verbose = false;
    for arg in &args[1..] {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                println!("Usage: script_check [--verbose]");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    let tables = all_tables();
    let beat_total: usize = tables.iter().map(|(_, beats)| beats.len()).sum();
    println!("Checked {} tables, {} beats", tables.len(), beat_total);

    if verbose {
        for (name, beats) in &tables {
            let speakers: HashSet<&str> = beats.iter().filter_map(|b| b.speaker).collect();
            let effects: usize = beats.iter().map(|b| b.effects.len()).sum();
            println!(
                "  {}: {} beats, {} effects, speakers {:?}",
                name,
                beats.len(),
                effects,
                speakers
            );
        }
    }

    let (mut errors, mut warnings) = check_tables(&tables);
    check_choices(&mut errors, &mut warnings);

    println!("\n=== Script Check Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!("\nSummary: {} errors, {} warnings", errors.len(), warnings.len());

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

/// Every table the engine can play, under a stable name for reporting.
fn all_tables() -> Vec<(String, Vec<Beat>)> {
    let mut tables: Vec<(String, Vec<Beat>)> = vec![
        ("intro".into(), script::INTRO.to_vec()),
        ("flavor_lines".into(), script::FLAVOR_LINES.to_vec()),
        ("taunt:wanton".into(), vec![script::TAUNT_WANTON]),
        ("taunt:dally".into(), vec![script::TAUNT_DALLY]),
        ("ending:canonical".into(), script::ending_script(Ending::Canonical).to_vec()),
        ("ending:death".into(), script::ending_script(Ending::Death).to_vec()),
        (
            "ending:delayed_strike".into(),
            script::ending_script(Ending::DelayedStrike).to_vec(),
        ),
        (
            "ending:spare_laertes".into(),
            script::ending_script(Ending::SpareLaertes).to_vec(),
        ),
        ("event:warn_queen".into(), script::event_script(SceneEvent::WarnQueen).to_vec()),
        (
            "event:queen_drinks".into(),
            script::event_script(SceneEvent::QueenDrinksNatural).to_vec(),
        ),
        ("mothers_sacrifice".into(), script::MOTHERS_SACRIFICE.to_vec()),
    ];
    for (idx, pair) in script::HESITATION_SEQUENCES.iter().enumerate() {
        tables.push((format!("hesitation[{}]", idx), pair.to_vec()));
    }
    tables
}

fn check_tables(tables: &[(String, Vec<Beat>)]) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Everyone who may be attributed a line.
    let cast = ["Hamlet", "Laertes", "King Claudius", "Queen Gertrude", "Osric"];

    for (name, beats) in tables {
        if beats.is_empty() {
            errors.push(format!("Table '{}' is empty", name));
            continue;
        }

        let mut deaths: HashSet<Role> = HashSet::new();
        let mut drink_depth: HashMap<Role, i32> = HashMap::new();

        for (idx, beat) in beats.iter().enumerate() {
            if beat.text.trim().is_empty() {
                errors.push(format!("Table '{}' beat {} has blank text", name, idx));
            } else if beat.text != beat.text.trim() {
                errors.push(format!(
                    "Table '{}' beat {} has leading or trailing whitespace",
                    name, idx
                ));
            }

            if let Some(speaker) = beat.speaker {
                if !cast.contains(&speaker) {
                    errors.push(format!(
                        "Table '{}' beat {} attributes a line to unknown speaker '{}'",
                        name, idx, speaker
                    ));
                }
            }

            for effect in beat.effects {
                match *effect {
                    BeatEffect::MarkDead { role } => {
                        if !deaths.insert(role) {
                            errors.push(format!(
                                "Table '{}' kills {:?} more than once",
                                name, role
                            ));
                        }
                    }
                    BeatEffect::BeginDrink { role } => {
                        let depth = drink_depth.entry(role).or_insert(0);
                        *depth += 1;
                        if *depth > 1 {
                            errors.push(format!(
                                "Table '{}' starts a drink animation for {:?} twice",
                                name, role
                            ));
                        }
                    }
                    BeatEffect::EndDrink { role } => {
                        let depth = drink_depth.entry(role).or_insert(0);
                        *depth -= 1;
                        if *depth < 0 {
                            errors.push(format!(
                                "Table '{}' ends a drink animation for {:?} that never began",
                                name, role
                            ));
                        }
                    }
                    BeatEffect::AdvanceTurn => {
                        if idx + 1 != beats.len() {
                            warnings.push(format!(
                                "Table '{}' hands the turn over at beat {} with beats still queued",
                                name, idx
                            ));
                        }
                    }
                }
            }
        }

        for (role, depth) in &drink_depth {
            if *depth > 0 {
                errors.push(format!(
                    "Table '{}' leaves a drink animation running for {:?}",
                    name, role
                ));
            }
        }

        // Ending tables close on narration, not mid-speech.
        if name.starts_with("ending:") {
            if let Some(last) = beats.last() {
                if let Some(speaker) = last.speaker {
                    warnings.push(format!(
                        "Table '{}' closes on a spoken line from '{}'",
                        name, speaker
                    ));
                }
            }
        }
    }

    // Variety checks on the random draw pools.
    if script::FLAVOR_LINES.len() < 3 {
        warnings.push(format!(
            "Only {} flavor lines (minimum 3 recommended)",
            script::FLAVOR_LINES.len()
        ));
    }
    let mut seen_texts: HashSet<&str> = HashSet::new();
    for beat in script::FLAVOR_LINES {
        if !seen_texts.insert(beat.text) {
            warnings.push(format!("Duplicate flavor line: '{}'", beat.text));
        }
    }

    (errors, warnings)
}

fn check_choices(errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    for (name, options) in [
        ("warn_or_taunt", script::warn_or_taunt_choices()),
        ("restart", script::restart_choices()),
    ] {
        if options.is_empty() {
            errors.push(format!("Choice set '{}' is empty", name));
            continue;
        }
        let mut labels: HashSet<&str> = HashSet::new();
        for choice in &options {
            if choice.label.trim().is_empty() {
                errors.push(format!("Choice set '{}' has a blank label", name));
            }
            if !labels.insert(choice.label) {
                errors.push(format!(
                    "Choice set '{}' repeats the label '{}'",
                    name, choice.label
                ));
            }
        }
        if options.len() > 4 {
            warnings.push(format!(
                "Choice set '{}' offers {} options (4 fit the dialogue box)",
                name,
                options.len()
            ));
        }
    }
}
