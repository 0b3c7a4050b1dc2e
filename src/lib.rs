// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! code2score derives musical parameters from source-code text.
//!
//! The pipeline is a one-way data flow: document text goes through the
//! composition builder (line analyzer, pitch mapper, scale resolver) to an
//! ordered note sequence, which the export module serializes as a Standard
//! MIDI File or projects into notation and playback views. Every stage is
//! a pure, deterministic function of its inputs; lookup failures degrade
//! to defaults instead of erroring.

pub mod analysis;
pub mod export;
pub mod music;
pub mod watch;

pub use analysis::Composition;
pub use export::MidiEncoder;
