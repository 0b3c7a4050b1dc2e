// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Output projections of a composition.
//!
//! Three collaborators consume a composition: a staff renderer (notation
//! view), an audio player (playback schedule), and persistent storage
//! (Standard MIDI file bytes).

pub mod midi;
pub mod notation;
pub mod playback;

pub use midi::{MidiEncoder, DEFAULT_OUTPUT_FILENAME, TICKS_PER_QUARTER};
pub use notation::{NotationNote, NotationView};
pub use playback::{schedule, PlaybackEvent, NOTE_GAP_SECONDS};
