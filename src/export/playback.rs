// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback-facing projection of a composition.
//!
//! The audio collaborator receives ordered (pitch, start, duration,
//! velocity, instrument) tuples; start offsets accumulate each previous
//! note's duration plus a fixed inter-note gap.

use serde::{Deserialize, Serialize};

use crate::analysis::{Composition, Instrument};

/// Fixed silence inserted between consecutive notes, in seconds
pub const NOTE_GAP_SECONDS: f64 = 0.1;

/// One schedulable playback event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackEvent {
    /// Pitch spelling, e.g. "F#4"
    pub pitch: String,
    /// Offset from playback start, in seconds
    pub start_seconds: f64,
    /// Sounding length, in seconds
    pub duration_seconds: f64,
    /// Normalized loudness in [0.0, 1.0]
    pub velocity: f64,
    /// Instrument voice
    pub instrument: Instrument,
}

/// Build the playback schedule for a composition at the given tempo.
///
/// The first note starts at zero; each following note starts after the
/// previous note's duration plus [`NOTE_GAP_SECONDS`].
pub fn schedule(composition: &Composition, tempo_bpm: f64) -> Vec<PlaybackEvent> {
    let mut events = Vec::with_capacity(composition.len());
    let mut cursor = 0.0f64;

    for note in &composition.notes {
        let duration_seconds = note.duration.seconds(tempo_bpm);
        events.push(PlaybackEvent {
            pitch: note.pitch.to_string(),
            start_seconds: cursor,
            duration_seconds,
            velocity: note.velocity,
            instrument: note.instrument,
        });
        cursor += duration_seconds + NOTE_GAP_SECONDS;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Composition;

    #[test]
    fn test_empty_schedule() {
        let composition = Composition::build("", "a.js");
        assert!(schedule(&composition, 120.0).is_empty());
    }

    #[test]
    fn test_offsets_accumulate_with_gap() {
        // Three quarter notes at 120 BPM: 0.5s each plus 0.1s gaps
        let composition = Composition::build("a;\nb;\nc;\n", "a.js");
        let events = schedule(&composition, 120.0);

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].start_seconds, 0.0);
        assert!((events[1].start_seconds - 0.6).abs() < 1e-9);
        assert!((events[2].start_seconds - 1.2).abs() < 1e-9);
        for event in &events {
            assert_eq!(event.duration_seconds, 0.5);
        }
    }

    #[test]
    fn test_half_note_pushes_next_start() {
        // "}" makes the first line a half note (1.0s at 120 BPM)
        let composition = Composition::build("x }\ny;\n", "a.js");
        let events = schedule(&composition, 120.0);

        assert_eq!(events[0].duration_seconds, 1.0);
        assert!((events[1].start_seconds - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_events_carry_velocity_and_instrument() {
        let composition = Composition::build("  return x;\n", "a.js");
        let events = schedule(&composition, 120.0);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].instrument, Instrument::Horn);
        assert!((events[0].velocity - 0.35).abs() < 1e-9);
    }
}
