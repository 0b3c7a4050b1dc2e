// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Absolute pitches and scale-constrained snapping.
//!
//! A [`Pitch`] pairs a pitch class with an octave. Snapping replaces the
//! pitch class with the nearest scale member by chromatic distance and
//! never touches the octave.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::scale::{PitchClass, Scale};
use super::Lookup;

/// An absolute pitch: pitch class plus octave (MIDI convention, C4 = 60)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pitch {
    /// Pitch class, sharp-spelled
    pub class: PitchClass,
    /// Octave number; octave 4 contains middle C
    pub octave: i8,
}

impl Pitch {
    /// Create a pitch from its parts
    pub fn new(class: PitchClass, octave: i8) -> Self {
        Self { class, octave }
    }

    /// Middle C, the substitute for every malformed or out-of-range input
    pub fn middle_c() -> Self {
        Self::new(PitchClass::C, 4)
    }

    /// Convert a MIDI note number to a pitch.
    ///
    /// Numbers outside [0, 127] fall back to middle C.
    pub fn from_midi(midi: i32) -> Lookup<Pitch> {
        if !(0..=127).contains(&midi) {
            return Lookup::Fallback(Pitch::middle_c());
        }
        let class = PitchClass::from_chroma((midi % 12) as u8);
        let octave = (midi / 12 - 1) as i8;
        Lookup::Found(Pitch::new(class, octave))
    }

    /// Parse a pitch spelling like "F#4" or "A#-1".
    ///
    /// Malformed spellings fall back to middle C.
    pub fn parse(s: &str) -> Lookup<Pitch> {
        let s = s.trim();
        let split = s
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i);

        let parsed = split.and_then(|at| {
            let class = PitchClass::parse(&s[..at])?;
            let octave: i8 = s[at..].parse().ok()?;
            Some(Pitch::new(class, octave))
        });

        match parsed {
            Some(pitch) => Lookup::Found(pitch),
            None => Lookup::Fallback(Pitch::middle_c()),
        }
    }

    /// The MIDI note number for this pitch
    pub fn to_midi(self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.class.chroma() as i32
    }

    /// Snap the pitch class to the nearest member of `scale`.
    ///
    /// Nearest means minimum chromatic distance on the 12-tone circle; ties
    /// go to the first member in the scale's ascending order, so the result
    /// is stable. The octave is always preserved.
    pub fn snap_to(self, scale: &Scale) -> Pitch {
        let mut best = scale.notes()[0];
        let mut best_distance = self.class.distance(best);

        for &member in scale.notes().iter().skip(1) {
            let distance = self.class.distance(member);
            if distance < best_distance {
                best = member;
                best_distance = distance;
            }
        }

        Pitch::new(best, self.octave)
    }
}

impl Default for Pitch {
    fn default() -> Self {
        Pitch::middle_c()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}
