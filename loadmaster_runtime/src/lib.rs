#![forbid(unsafe_code)]

//! Loadmaster Runtime
//!
//! Wraps the weight & balance engine with edit sessions, replay,
//! drift detection, the load sheet and the envelope plot model.
//!
//! No weight & balance arithmetic lives here. Every figure comes from
//! an explicit engine recompute.

pub mod drift;
pub mod load_sheet;
pub mod plot;
pub mod replay;
pub mod session;
