// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes and diatonic scale resolution.
//!
//! Maps key labels like "C", "F#", or "Am" to their seven diatonic pitch
//! classes. Unknown labels fall back to the natural white-key pitch classes
//! of C major; the fallback is reported, never raised.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Lookup;

/// Note names (pitch classes), sharp-spelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Get the chroma (0-11) for this pitch class
    pub fn chroma(self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::Cs => 1,
            PitchClass::D => 2,
            PitchClass::Ds => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::Fs => 6,
            PitchClass::G => 7,
            PitchClass::Gs => 8,
            PitchClass::A => 9,
            PitchClass::As => 10,
            PitchClass::B => 11,
        }
    }

    /// Get the pitch class for a chroma, wrapping modulo 12
    pub fn from_chroma(chroma: u8) -> Self {
        PitchClass::ALL[(chroma % 12) as usize]
    }

    /// Parse a pitch class from a label (e.g., "C", "C#", "Db").
    ///
    /// Flat spellings normalize to their enharmonic sharp spelling so the
    /// whole pipeline speaks a single sharp-based vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        match s.as_str() {
            "C" => Some(PitchClass::C),
            "C#" | "DB" => Some(PitchClass::Cs),
            "D" => Some(PitchClass::D),
            "D#" | "EB" => Some(PitchClass::Ds),
            "E" => Some(PitchClass::E),
            "F" => Some(PitchClass::F),
            "F#" | "GB" => Some(PitchClass::Fs),
            "G" => Some(PitchClass::G),
            "G#" | "AB" => Some(PitchClass::Gs),
            "A" => Some(PitchClass::A),
            "A#" | "BB" => Some(PitchClass::As),
            "B" => Some(PitchClass::B),
            _ => None,
        }
    }

    /// Transpose by semitones, wrapping around the octave
    pub fn transpose(self, semitones: i8) -> Self {
        let chroma = (self.chroma() as i8 + semitones).rem_euclid(12) as u8;
        PitchClass::from_chroma(chroma)
    }

    /// Chromatic distance (0-6) to another pitch class: the minimum of the
    /// clockwise and counter-clockwise steps around the 12-tone circle
    pub fn distance(self, other: PitchClass) -> u8 {
        let up = (other.chroma() as i8 - self.chroma() as i8).rem_euclid(12) as u8;
        up.min(12 - up)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        };
        write!(f, "{}", name)
    }
}

/// Scale mode: diatonic major or natural minor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Major,
    NaturalMinor,
}

impl Mode {
    /// Semitone intervals from the tonic.
    ///
    /// Major is W-W-H-W-W-W-H, natural minor is W-H-W-W-H-W-W.
    pub fn intervals(self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::NaturalMinor => [0, 2, 3, 5, 7, 8, 10],
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::NaturalMinor => "minor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lowercase tonic labels conventionally read as minor keys ("a" = A minor)
const MINOR_LABELS: [&str; 12] = [
    "a", "a#", "b", "c", "c#", "d", "d#", "e", "f", "f#", "g", "g#",
];

/// A diatonic scale: tonic, mode, and the seven member pitch classes in
/// ascending order from the tonic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    tonic: PitchClass,
    mode: Mode,
    notes: [PitchClass; 7],
}

impl Scale {
    /// Build a scale from tonic and mode
    pub fn new(tonic: PitchClass, mode: Mode) -> Self {
        let intervals = mode.intervals();
        let mut notes = [tonic; 7];
        for (slot, &interval) in notes.iter_mut().zip(intervals.iter()) {
            *slot = tonic.transpose(interval as i8);
        }
        Self { tonic, mode, notes }
    }

    /// Resolve a key label (e.g. "C", "F#", "Am", "e") to its scale.
    ///
    /// A label is minor if it ends in lowercase "m" or is one of the
    /// conventional lowercase minor labels; anything else is major. An
    /// unparseable label falls back to C major, the seven natural
    /// white-key pitch classes.
    pub fn resolve(label: &str) -> Lookup<Scale> {
        let trimmed = label.trim();
        let (root, mode) = if let Some(stripped) = trimmed.strip_suffix('m') {
            (stripped, Mode::NaturalMinor)
        } else if MINOR_LABELS.contains(&trimmed) {
            (trimmed, Mode::NaturalMinor)
        } else {
            (trimmed, Mode::Major)
        };

        match PitchClass::parse(root) {
            Some(tonic) => Lookup::Found(Scale::new(tonic, mode)),
            None => Lookup::Fallback(Scale::new(PitchClass::C, Mode::Major)),
        }
    }

    /// Get the tonic
    pub fn tonic(&self) -> PitchClass {
        self.tonic
    }

    /// Get the mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The seven member pitch classes, ascending from the tonic
    pub fn notes(&self) -> &[PitchClass; 7] {
        &self.notes
    }

    /// Check membership
    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.notes.contains(&pitch_class)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}
