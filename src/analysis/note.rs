// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The note data model derived from source lines.
//!
//! A [`Note`] captures everything the renderers and the MIDI encoder need:
//! the absolute pitch, symbolic duration, dynamics, instrument, and the
//! source line it came from for debug display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::music::Pitch;

/// Symbolic note duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteDuration {
    Whole,
    Half,
    Quarter,
    Eighth,
}

impl NoteDuration {
    /// Symbolic token ("1n", "2n", "4n", "8n")
    pub fn token(self) -> &'static str {
        match self {
            NoteDuration::Whole => "1n",
            NoteDuration::Half => "2n",
            NoteDuration::Quarter => "4n",
            NoteDuration::Eighth => "8n",
        }
    }

    /// Length in quarter-note beats
    pub fn beats(self) -> f64 {
        match self {
            NoteDuration::Whole => 4.0,
            NoteDuration::Half => 2.0,
            NoteDuration::Quarter => 1.0,
            NoteDuration::Eighth => 0.5,
        }
    }

    /// Length in seconds at the given tempo
    pub fn seconds(self, tempo_bpm: f64) -> f64 {
        self.beats() * 60.0 / tempo_bpm
    }
}

impl fmt::Display for NoteDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Instrument voices assignable to a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    Piano,
    Strings,
    Synth,
    Pluck,
    Metal,
    Marimba,
    Organ,
    Horn,
    Bell,
    Glockenspiel,
    Harp,
    Woodwind,
}

impl Instrument {
    /// Stable lowercase tag used by the playback collaborator
    pub fn tag(self) -> &'static str {
        match self {
            Instrument::Piano => "piano",
            Instrument::Strings => "strings",
            Instrument::Synth => "synth",
            Instrument::Pluck => "pluck",
            Instrument::Metal => "metal",
            Instrument::Marimba => "marimba",
            Instrument::Organ => "organ",
            Instrument::Horn => "horn",
            Instrument::Bell => "bell",
            Instrument::Glockenspiel => "glockenspiel",
            Instrument::Harp => "harp",
            Instrument::Woodwind => "woodwind",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Time signature shared by every note of one composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    /// Beats per bar (numerator)
    pub beats_per_bar: u8,
    /// Beat unit (denominator)
    pub beat_unit: u8,
}

impl TimeSignature {
    pub const THREE_FOUR: TimeSignature = TimeSignature { beats_per_bar: 3, beat_unit: 4 };
    pub const FOUR_FOUR: TimeSignature = TimeSignature { beats_per_bar: 4, beat_unit: 4 };
    pub const SIX_EIGHT: TimeSignature = TimeSignature { beats_per_bar: 6, beat_unit: 8 };
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature::FOUR_FOUR
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats_per_bar, self.beat_unit)
    }
}

/// One note derived from one non-blank source line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// 1-based line number in the source document
    pub line_index: usize,
    /// Original line content, untrimmed, for debug display
    pub text: String,
    /// Character count of the line
    pub length: usize,
    /// Last non-whitespace character of the line, if any
    pub last_char: Option<char>,
    /// Absolute pitch, already scale-constrained
    pub pitch: Pitch,
    /// Symbolic duration
    pub duration: NoteDuration,
    /// Normalized loudness in [0.0, 1.0]
    pub velocity: f64,
    /// Instrument voice
    pub instrument: Instrument,
    /// Composition-wide time signature, stamped per note for convenience
    pub time_signature: TimeSignature,
    /// Composition-wide key label, stamped per note for convenience
    pub key_signature: String,
}
