// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Per-line analysis: one source line in, one note out.
//!
//! Every derived parameter is a pure function of the line text.
//! Indentation drives dynamics and register, line length drives the pitch
//! offset, the trailing character drives duration, and the leading keyword
//! picks the instrument.

use crate::music::{Lookup, Pitch, Scale};

use super::note::{Instrument, Note, NoteDuration, TimeSignature};

/// Velocity for a line at indent level zero
pub const VELOCITY_FLOOR: f64 = 0.25;
/// Velocity added per leading whitespace character
pub const VELOCITY_STEP: f64 = 0.05;
/// Leading whitespace characters per octave of upward shift
pub const INDENT_PER_OCTAVE: usize = 4;
/// MIDI number of the unshifted base pitch (middle C)
pub const BASE_MIDI: i32 = 60;
/// Line characters per semitone of pitch offset
pub const CHARS_PER_SEMITONE: usize = 5;
/// Pitch offset cap, one octave
pub const MAX_PITCH_OFFSET: i32 = 12;

/// Composition-wide context shared by every line of one document
#[derive(Debug, Clone)]
pub struct LineContext<'a> {
    /// Scale resolved from the document's key signature
    pub scale: &'a Scale,
    /// Key label stamped onto each note
    pub key_signature: &'a str,
    /// Time signature stamped onto each note
    pub time_signature: TimeSignature,
}

/// Analyze one non-blank source line into a note.
///
/// `line_index` is the 1-based line number in the source document. The
/// caller is expected to have dropped blank lines already; a blank line
/// passed here still produces a (default-shaped) note.
pub fn analyze_line(text: &str, line_index: usize, ctx: &LineContext<'_>) -> Note {
    let length = text.chars().count();
    let indent = indent_level(text);

    let octave_shift = (indent / INDENT_PER_OCTAVE) as i32;
    let velocity = (VELOCITY_FLOOR + indent as f64 * VELOCITY_STEP).min(1.0);

    let pitch_offset = ((length / CHARS_PER_SEMITONE) as i32).min(MAX_PITCH_OFFSET);
    let midi = BASE_MIDI + octave_shift * 12 + pitch_offset;
    let pitch = Pitch::from_midi(midi).value().snap_to(ctx.scale);

    let last_char = text.trim_end().chars().last();

    Note {
        line_index,
        text: text.to_string(),
        length,
        last_char,
        pitch,
        duration: duration_for(last_char),
        velocity,
        instrument: instrument_for_line(text).value(),
        time_signature: ctx.time_signature,
        key_signature: ctx.key_signature.to_string(),
    }
}

/// Count leading whitespace characters
pub fn indent_level(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

/// Map the trailing character of a line to a duration.
///
/// `}` closes a block and gets a half note, `;` a quarter, `:` an eighth;
/// everything else defaults to a quarter.
pub fn duration_for(last_char: Option<char>) -> NoteDuration {
    match last_char {
        Some('}') => NoteDuration::Half,
        Some(';') => NoteDuration::Quarter,
        Some(':') => NoteDuration::Eighth,
        _ => NoteDuration::Quarter,
    }
}

/// Look up the instrument for a line from its first word
pub fn instrument_for_line(text: &str) -> Lookup<Instrument> {
    match text.split_whitespace().next() {
        Some(word) => instrument_for_keyword(word),
        None => Lookup::Fallback(Instrument::Piano),
    }
}

/// Look up the instrument for a leading keyword.
///
/// At most one trailing `(`, `{`, `;`, `:` or `,` is stripped before the
/// lookup, so `function(` matches `function`. Unknown keywords fall back
/// to piano.
pub fn instrument_for_keyword(word: &str) -> Lookup<Instrument> {
    let word = word
        .strip_suffix(['(', '{', ';', ':', ','])
        .unwrap_or(word);

    let instrument = match word {
        "function" => Instrument::Piano,
        "fn" => Instrument::Piano,
        "class" => Instrument::Strings,
        "pub" => Instrument::Strings,
        "const" => Instrument::Synth,
        "if" => Instrument::Synth,
        "let" => Instrument::Pluck,
        "fmt" => Instrument::Pluck,
        "var" => Instrument::Metal,
        "struct" => Instrument::Metal,
        "for" => Instrument::Marimba,
        "while" => Instrument::Organ,
        "return" => Instrument::Horn,
        "import" => Instrument::Bell,
        "use" => Instrument::Bell,
        "export" => Instrument::Glockenspiel,
        "def" => Instrument::Harp,
        "echo" => Instrument::Woodwind,
        _ => return Lookup::Fallback(Instrument::Piano),
    };

    Lookup::Found(instrument)
}
