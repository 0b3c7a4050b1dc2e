// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for code2score
//!
//! These tests drive the whole pipeline through the public API: document
//! text in, composition out, MIDI bytes out.

use std::fs;

use code2score::analysis::{Composition, Instrument, NoteDuration, TimeSignature};
use code2score::export::{midi, playback, MidiEncoder, NotationView};
use code2score::music::{Pitch, PitchClass, Scale};

const SAMPLE_JS: &str = "\
function greet(name) {
  const message = hello(name);
  return message;
}
";

/// Build then encode is byte-identical across runs
#[test]
fn test_pipeline_determinism() {
    let encoder = MidiEncoder::new(120.0);

    let first = encoder.encode(&Composition::build(SAMPLE_JS, "example.js"));
    let second = encoder.encode(&Composition::build(SAMPLE_JS, "example.js"));

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

/// Snapping any pitch class into any supported key lands in that key
#[test]
fn test_scale_closure_over_supported_keys() {
    let labels = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B", "Am", "Em", "Bm", "Dm",
        "Gm", "Cm", "Fm", "F#m", "Bbm",
    ];

    for label in labels {
        let scale = Scale::resolve(label).value();
        for &class in PitchClass::ALL.iter() {
            let snapped = Pitch::new(class, 4).snap_to(&scale);
            assert!(
                scale.contains(snapped.class),
                "{} snapped out of key {}",
                class,
                label
            );
        }
    }
}

/// Snapping never changes the octave component
#[test]
fn test_octave_preservation() {
    let scale = Scale::resolve("F#m").value();
    for octave in -1..=9 {
        for &class in PitchClass::ALL.iter() {
            assert_eq!(Pitch::new(class, octave).snap_to(&scale).octave, octave);
        }
    }
}

/// A document of only whitespace lines yields zero notes
#[test]
fn test_blank_line_exclusion() {
    let composition = Composition::build("   \n\t\t\n \n\n", "example.js");
    assert!(composition.is_empty());
}

/// Encoded output is a structurally valid single-track MIDI file
#[test]
fn test_midi_structural_validity() {
    let composition = Composition::build(SAMPLE_JS, "example.js");
    let bytes = MidiEncoder::new(120.0).encode(&composition);

    // Header chunk magic
    assert_eq!(&bytes[0..4], [0x4D, 0x54, 0x68, 0x64]);

    // Exactly one track chunk
    let track_magic = [0x4D, 0x54, 0x72, 0x6B];
    let track_offsets: Vec<usize> = bytes
        .windows(4)
        .enumerate()
        .filter(|(_, window)| *window == track_magic)
        .map(|(offset, _)| offset)
        .collect();
    assert_eq!(track_offsets, vec![14]);

    // Declared track length equals the bytes that follow it
    let declared =
        u32::from_be_bytes([bytes[18], bytes[19], bytes[20], bytes[21]]) as usize;
    assert_eq!(declared, bytes.len() - 22);
}

/// MIDI variable-length quantities survive an encode/decode round trip
#[test]
fn test_variable_length_quantity_round_trip() {
    for value in [0u32, 127, 128, 16383, 16384] {
        let mut buffer = Vec::new();
        midi::write_variable_length(&mut buffer, value);
        let (decoded, consumed) = midi::read_variable_length(&buffer).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(consumed, buffer.len());
    }
}

/// Scenario: a plain function declaration in a .js file
#[test]
fn test_scenario_simple_line() {
    let composition = Composition::build("function hello() {", "example.js");
    assert_eq!(composition.key_signature, "C");
    assert_eq!(composition.len(), 1);

    let note = &composition.notes[0];
    assert_eq!(note.instrument, Instrument::Piano);
    // "{" is not a duration trigger, so the default quarter applies
    assert_eq!(note.duration, NoteDuration::Quarter);
    assert_eq!(note.velocity, 0.25);
}

/// Scenario: an indented closing brace
#[test]
fn test_scenario_closing_brace() {
    for filename in ["a.js", "b.py", "c.go", "d.xyz"] {
        let composition = Composition::build("  }", filename);
        let note = &composition.notes[0];
        assert_eq!(note.duration, NoteDuration::Half);
        assert!((note.velocity - 0.35).abs() < 1e-9);
    }
}

/// Scenario: unknown extensions resolve to the default key
#[test]
fn test_scenario_unknown_extension() {
    let composition = Composition::build("whatever\n", "example.xyz");
    assert_eq!(composition.key_signature, "C");
}

/// Scenario: the empty document encodes to the minimal 33-byte file
#[test]
fn test_scenario_empty_document() {
    let composition = Composition::build("", "example.js");
    assert!(composition.is_empty());

    let bytes = MidiEncoder::new(120.0).encode(&composition);
    assert_eq!(bytes.len(), 33);
}

/// The three output projections agree on note count and order
#[test]
fn test_projections_are_consistent() {
    let composition = Composition::build(SAMPLE_JS, "example.js");
    let view = NotationView::from_composition(&composition);
    let events = playback::schedule(&composition, 120.0);

    assert_eq!(view.notes.len(), composition.len());
    assert_eq!(events.len(), composition.len());
    for (i, note) in composition.notes.iter().enumerate() {
        assert_eq!(view.notes[i].pitch, note.pitch.to_string());
        assert_eq!(events[i].pitch, note.pitch.to_string());
    }

    // Playback offsets are strictly increasing with the fixed gap
    for pair in events.windows(2) {
        let expected = pair[0].start_seconds + pair[0].duration_seconds + 0.1;
        assert!((pair[1].start_seconds - expected).abs() < 1e-9);
    }
}

/// Exporting writes the encoded bytes to disk unchanged
#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("composition.mid");

    let composition = Composition::build(SAMPLE_JS, "example.js");
    let encoder = MidiEncoder::new(120.0);
    encoder.export(&composition, &out_path).unwrap();

    let written = fs::read(&out_path).unwrap();
    assert_eq!(written, encoder.encode(&composition));
}

/// Changing only the simulated extension changes key, not note count
#[test]
fn test_extension_controls_key_only() {
    let js = Composition::build(SAMPLE_JS, "example.js");
    let rs = Composition::build(SAMPLE_JS, "example.rs");

    assert_eq!(js.len(), rs.len());
    assert_eq!(js.key_signature, "C");
    assert_eq!(rs.key_signature, "D");

    let d_major = Scale::resolve("D").value();
    for note in &rs.notes {
        assert!(d_major.contains(note.pitch.class));
    }
}

/// Time signature follows the average line length thresholds
#[test]
fn test_time_signature_derivation() {
    let terse = "a;\nb;\n";
    assert_eq!(
        Composition::build(terse, "a.js").time_signature,
        TimeSignature::THREE_FOUR
    );

    let medium = format!("{}\n", "x".repeat(40));
    assert_eq!(
        Composition::build(&medium, "a.js").time_signature,
        TimeSignature::FOUR_FOUR
    );

    let sprawling = format!("{}\n", "x".repeat(90));
    assert_eq!(
        Composition::build(&sprawling, "a.js").time_signature,
        TimeSignature::SIX_EIGHT
    );
}
