//! Integration test crate for LutPlay.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple lutplay crates to verify they work together.

#[cfg(test)]
mod grading;

#[cfg(test)]
mod playback;
