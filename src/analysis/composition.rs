// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Whole-document analysis: fold the line analyzer over a source document.
//!
//! A composition is always rebuilt from scratch from the complete current
//! text; there is no incremental update, so it can never go stale.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::music::{Lookup, Scale};

use super::line::{analyze_line, LineContext};
use super::note::{Note, TimeSignature};

/// Key signature substituted for unknown file extensions
pub const DEFAULT_KEY: &str = "C";

/// Average line length below which a document reads as 3/4
const WALTZ_THRESHOLD: f64 = 20.0;
/// Average line length above which a document reads as 6/8
const COMPOUND_THRESHOLD: f64 = 60.0;

/// An ordered sequence of notes derived from one document.
///
/// Note order equals source line order and determines playback and
/// encoding order. An empty document yields an empty composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// Derived notes, one per non-blank source line
    pub notes: Vec<Note>,
    /// Time signature derived from the average line length
    pub time_signature: TimeSignature,
    /// Key label derived from the filename extension
    pub key_signature: String,
}

impl Composition {
    /// Build a composition from a full document text and its filename.
    ///
    /// The filename is used only for its extension, which selects the key
    /// signature. Blank lines are dropped; remaining lines are analyzed in
    /// order.
    pub fn build(text: &str, filename: &str) -> Composition {
        let key = key_for_filename(filename);
        let key_signature = key.value().to_string();
        let scale = Scale::resolve(&key_signature).value();

        let kept: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| (idx + 1, line))
            .collect();

        if kept.is_empty() {
            debug!(filename, key = %key_signature, "document has no content lines");
            return Composition {
                notes: Vec::new(),
                time_signature: TimeSignature::default(),
                key_signature,
            };
        }

        let total_chars: usize = kept.iter().map(|(_, line)| line.chars().count()).sum();
        let avg_line_length = total_chars as f64 / kept.len() as f64;
        let time_signature = time_signature_for(avg_line_length);

        let ctx = LineContext {
            scale: &scale,
            key_signature: &key_signature,
            time_signature,
        };

        let notes = kept
            .iter()
            .map(|&(line_index, line)| analyze_line(line, line_index, &ctx))
            .collect::<Vec<_>>();

        debug!(
            filename,
            key = %key_signature,
            time_signature = %time_signature,
            note_count = notes.len(),
            "composition rebuilt"
        );

        Composition {
            notes,
            time_signature,
            key_signature,
        }
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True when the source document had no non-blank lines
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Serialize to YAML for inspection
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize composition to YAML")
    }
}

/// Derive the time signature from the average kept-line length
fn time_signature_for(avg_line_length: f64) -> TimeSignature {
    if avg_line_length < WALTZ_THRESHOLD {
        TimeSignature::THREE_FOUR
    } else if avg_line_length > COMPOUND_THRESHOLD {
        TimeSignature::SIX_EIGHT
    } else {
        TimeSignature::FOUR_FOUR
    }
}

/// Look up the key signature for a filename by its extension
pub fn key_for_filename(filename: &str) -> Lookup<&'static str> {
    match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some(ext) => key_for_extension(&ext.to_lowercase()),
        None => Lookup::Fallback(DEFAULT_KEY),
    }
}

/// Look up the key signature for a lowercase file extension.
///
/// The table is a fixed part of the observable contract; unknown
/// extensions fall back to C major.
pub fn key_for_extension(ext: &str) -> Lookup<&'static str> {
    let key = match ext {
        "js" => "C",
        "jsx" => "C",
        "ts" => "Am",
        "tsx" => "Am",
        "py" => "G",
        "rb" => "E",
        "go" => "Em",
        "rs" => "D",
        "c" => "F",
        "h" => "F",
        "cpp" => "Dm",
        "java" => "A#",
        "cs" => "Bm",
        "php" => "Gm",
        "swift" => "E",
        "kt" => "B",
        "lua" => "Dm",
        "sh" => "G",
        "html" => "F",
        "css" => "Am",
        _ => return Lookup::Fallback(DEFAULT_KEY),
    };
    Lookup::Found(key)
}
