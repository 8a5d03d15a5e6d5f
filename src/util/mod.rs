//! File-processing collaborators around the substitution engine.

pub mod atomic;
pub mod diff;
pub mod glob;
