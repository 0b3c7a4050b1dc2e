// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use code2score::analysis::Composition;
use code2score::export::{playback, MidiEncoder, NotationView, DEFAULT_OUTPUT_FILENAME};
use code2score::watch::{ScoreEvent, ScoreWatcher};

fn print_usage() {
    println!("code2score - Turn source code into music");
    println!();
    println!("Usage: code2score [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --export <FILE> [BPM]   Derive a composition and write {}", DEFAULT_OUTPUT_FILENAME);
    println!("  --dump <FILE>           Print the derived composition as YAML");
    println!("  --notation <FILE>       Print pitch spellings and durations");
    println!("  --play <FILE> [BPM]     Print the playback schedule");
    println!("  --watch <FILE> [BPM]    Re-export the MIDI file on every change");
    println!("  --help                  Show this help message");
}

fn load_composition(path: &str) -> Result<Composition> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path))?;
    let filename = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path);
    Ok(Composition::build(&text, filename))
}

fn export_midi(path: &str, tempo: f64) -> Result<()> {
    let composition = load_composition(path)?;
    info!(
        notes = composition.len(),
        key = %composition.key_signature,
        time_signature = %composition.time_signature,
        "composition derived"
    );

    let encoder = MidiEncoder::new(tempo);
    encoder
        .export(&composition, DEFAULT_OUTPUT_FILENAME)
        .with_context(|| format!("Failed to write {}", DEFAULT_OUTPUT_FILENAME))?;

    println!(
        "Wrote {} ({} notes, key {}, {} BPM)",
        DEFAULT_OUTPUT_FILENAME,
        composition.len(),
        composition.key_signature,
        encoder.tempo()
    );
    Ok(())
}

fn dump_composition(path: &str) -> Result<()> {
    let composition = load_composition(path)?;
    print!("{}", composition.to_yaml()?);
    Ok(())
}

fn print_notation(path: &str) -> Result<()> {
    let composition = load_composition(path)?;
    let view = NotationView::from_composition(&composition);

    println!("Key: {}  Time: {}", view.key_signature, view.time_signature);
    for note in &view.notes {
        println!("{:<4} {}", note.pitch, note.duration.token());
    }
    Ok(())
}

fn print_schedule(path: &str, tempo: f64) -> Result<()> {
    let composition = load_composition(path)?;
    for event in playback::schedule(&composition, tempo) {
        println!(
            "{:>8.2}s  {:<4} {:>5.2}s  vel {:.2}  {}",
            event.start_seconds,
            event.pitch,
            event.duration_seconds,
            event.velocity,
            event.instrument
        );
    }
    Ok(())
}

fn watch_and_export(path: &str, tempo: f64) -> Result<()> {
    // Export once up front so the output exists before the first edit
    export_midi(path, tempo)?;

    let watcher = ScoreWatcher::new(path, None)?;
    let encoder = MidiEncoder::new(tempo);
    println!("Watching {} (press Ctrl+C to stop)...", path);

    while let Some(event) = watcher.recv() {
        match event {
            ScoreEvent::Rebuilt(composition) => {
                encoder
                    .export(&composition, DEFAULT_OUTPUT_FILENAME)
                    .with_context(|| format!("Failed to write {}", DEFAULT_OUTPUT_FILENAME))?;
                println!(
                    "Re-exported {} ({} notes)",
                    DEFAULT_OUTPUT_FILENAME,
                    composition.len()
                );
            }
            ScoreEvent::Error(message) => {
                warn!(%message, "rebuild failed");
            }
            ScoreEvent::FileDeleted(deleted) => {
                warn!(path = ?deleted, "watched file deleted");
            }
        }
    }
    Ok(())
}

fn parse_tempo(args: &[String], index: usize) -> f64 {
    args.get(index)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(120.0)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("code2score - Turn source code into music");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--export" => {
            if args.len() < 3 {
                eprintln!("Error: --export requires a source file");
                std::process::exit(1);
            }
            export_midi(&args[2], parse_tempo(&args, 3))?;
        }
        "--dump" => {
            if args.len() < 3 {
                eprintln!("Error: --dump requires a source file");
                std::process::exit(1);
            }
            dump_composition(&args[2])?;
        }
        "--notation" => {
            if args.len() < 3 {
                eprintln!("Error: --notation requires a source file");
                std::process::exit(1);
            }
            print_notation(&args[2])?;
        }
        "--play" => {
            if args.len() < 3 {
                eprintln!("Error: --play requires a source file");
                std::process::exit(1);
            }
            print_schedule(&args[2], parse_tempo(&args, 3))?;
        }
        "--watch" => {
            if args.len() < 3 {
                eprintln!("Error: --watch requires a source file");
                std::process::exit(1);
            }
            watch_and_export(&args[2], parse_tempo(&args, 3))?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
