//! Workforce shift-assignment engine.
//!
//! This crate takes a roster of employees, a fixed set of shifts for a
//! planning horizon, and per-shift availability preferences, and produces an
//! assignment of employees to shifts that satisfies the mandatory staffing
//! rules while maximizing preference satisfaction. Solving is delegated to an
//! out-of-process CP-SAT optimizer when one is available, with an in-process
//! randomized fallback otherwise; every solver result is independently
//! re-validated before it is returned.

#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod postprocess;
pub mod solver;
