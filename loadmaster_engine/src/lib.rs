#![forbid(unsafe_code)]

//! Loadmaster Engine
//!
//! Deterministic weight & balance kernel for a single certified aircraft.
//! Pure computation: no I/O, no clocks, no hidden state between calls.

/// Engine version. Bumped whenever a recomputation could change for
/// identical inputs.
pub const ENGINE_VERSION: u32 = 1;

pub mod arithmetic;
pub mod domain;
pub mod profile;
pub mod events;
pub mod loading;
pub mod accumulator;
pub mod cg;
pub mod envelope;
pub mod invariants;
pub mod result;
pub mod hashing;
pub mod engine;
