// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Notation-facing projection of a composition.
//!
//! The staff renderer only needs a pitch spelling and a duration category
//! per note plus the global time and key signature; this module produces
//! exactly that and nothing else.

use serde::{Deserialize, Serialize};

use crate::analysis::{Composition, NoteDuration, TimeSignature};

/// One renderable note: spelling like "F#4" plus a duration category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotationNote {
    /// Pitch spelling: letter, optional sharp, octave digit
    pub pitch: String,
    /// Duration category
    pub duration: NoteDuration,
}

/// Everything a staff renderer needs for one composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotationView {
    /// Notes in playback order
    pub notes: Vec<NotationNote>,
    /// Global time signature
    pub time_signature: TimeSignature,
    /// Global key label
    pub key_signature: String,
}

impl NotationView {
    /// Project a composition into its notation view
    pub fn from_composition(composition: &Composition) -> Self {
        let notes = composition
            .notes
            .iter()
            .map(|note| NotationNote {
                pitch: note.pitch.to_string(),
                duration: note.duration,
            })
            .collect();

        Self {
            notes,
            time_signature: composition.time_signature,
            key_signature: composition.key_signature.clone(),
        }
    }
}
