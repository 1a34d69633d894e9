//! Rental area recommendations driven by a salary or a direct rent budget.
//!
//! The crate computes a recommended rent band, matches it against the bundled
//! prefecture catalog, and optionally layers LLM commentary on top of the
//! deterministic results.

pub mod advice;
pub mod config;
pub mod error;
pub mod recommendation;
pub mod telemetry;
