//! Grammar definitions shipped with the generator.

pub mod cue;
