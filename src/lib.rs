//! # collatz_engine — Core Library
//!
//! High-throughput verification that arbitrarily large integers reach 1
//! under the Collatz map (n -> n/2 for even n, n -> 3n+1 for odd n).
//!
//! ## Module Organization
//!
//! - [`error`] — the crate's error type and result alias
//! - [`bignum`] — small helpers over [`rug::Integer`] the engines share
//! - [`power_of_three`] — precomputed powers of 3, small-word and bignum
//! - [`impact_table`] — the 8-bit batched multistep lookup table
//! - [`accumulator`] — the chained-accumulator structure behind the fast engine
//! - [`engine`] — the [`engine::CollatzEngine`] trait all three checkers implement
//! - [`naive`] — single-step reference engine
//! - [`slow`] — one-big-multiply-per-iteration engine
//! - [`fast`] — chained-accumulator engine with deferred power-of-three multiplies
//! - [`duration`] — human-readable elapsed-time formatting
//! - [`amount`] — SI/binary step-count formatting
//!
//! ## Design Philosophy
//!
//! All three engines implement the same trajectory semantics and are
//! cross-checked against each other: `naive` is the correctness oracle,
//! `slow` and `fast` trade implementation complexity for throughput on
//! large starting values.

pub mod accumulator;
pub mod amount;
pub mod bignum;
pub mod duration;
pub mod engine;
pub mod error;
pub mod fast;
pub mod impact_table;
pub mod naive;
pub mod power_of_three;
pub mod slow;

pub use engine::CollatzEngine;
pub use error::{CollatzError, Result};
pub use fast::FastEngine;
pub use naive::NaiveEngine;
pub use slow::SlowEngine;
