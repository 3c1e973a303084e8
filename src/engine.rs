//! The contract shared by all three Collatz checkers.
//!
//! Modeled on the corpus's small shared-behavior traits for interchangeable
//! algorithm variants (`CoordinationClient` in `lib.rs`, the `test_prime`
//! dispatch across Proth/LLR/Miller–Rabin in `kbn.rs`): one trait, several
//! concrete engines, a single call site that doesn't care which is plugged
//! in.

use rug::Integer;

/// A Collatz checker that can be seeded with a starting value, driven to
/// completion, and queried for its step counts.
pub trait CollatzEngine {
    /// Mutable access to the slot the caller should write the starting
    /// value into before calling [`CollatzEngine::start_value_modified`].
    fn start_value_ref(&mut self) -> &mut Integer;

    /// Call after writing directly into `start_value_ref()`'s target, so the
    /// engine can refresh any derived bookkeeping (the fast engine's
    /// available-limb count, in particular).
    fn start_value_modified(&mut self);

    /// Runs the engine until the value reaches 1.
    fn complete_check(&mut self) -> crate::error::Result<()>;

    fn step_count_evn(&self) -> u64;
    fn step_count_odd(&self) -> u64;

    fn step_count(&self) -> u64 {
        self.step_count_evn() + self.step_count_odd()
    }

    fn iter_count(&self) -> u64;

    /// Short tag identifying the engine ("naive", "slow", "fast").
    fn type_abbrev(&self) -> &'static str;
}
