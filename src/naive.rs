//! The reference engine: single-step Collatz iteration directly on a bignum.
//!
//! No batching, no deferred multiplies — every odd step is one bignum
//! multiply-by-3-and-increment, and every even run is one trailing-zero scan
//! plus one shift. This is the correctness oracle the slow and fast engines
//! are cross-checked against.

use crate::bignum;
use crate::engine::CollatzEngine;
use crate::error::Result;
use rug::Integer;

#[derive(Debug)]
pub struct NaiveEngine {
    pub value: Integer,
    pub step_count_evn: u64,
    pub step_count_odd: u64,
    pub iter_count: u64,
}

impl Default for NaiveEngine {
    fn default() -> Self {
        NaiveEngine {
            value: Integer::from(1),
            step_count_evn: 0,
            step_count_odd: 0,
            iter_count: 0,
        }
    }
}

impl NaiveEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_finished(&self) -> bool {
        self.value != 1
    }

    /// One trajectory step: a single tripling for an odd value, or a whole
    /// run of halvings at once for an even one (the number of trailing zero
    /// bits is taken in one shift rather than one bit at a time, which is
    /// still the "naive" engine — no table, no deferred exponent — just a
    /// minor constant-factor speedup that costs nothing in clarity).
    fn iterate(&mut self) {
        if bignum::low_limb(&self.value) & 1 == 1 {
            bignum::mul_small(&mut self.value, 3);
            self.value += 1u32;
            self.step_count_odd += 1;
        } else {
            let shift = bignum::trailing_zeros(&self.value);
            bignum::shift_right(&mut self.value, shift);
            self.step_count_evn += shift;
        }

        self.iter_count += 1;
    }
}

impl CollatzEngine for NaiveEngine {
    fn start_value_ref(&mut self) -> &mut Integer {
        &mut self.value
    }

    fn start_value_modified(&mut self) {}

    fn complete_check(&mut self) -> Result<()> {
        while self.not_finished() {
            self.iterate();
        }
        Ok(())
    }

    fn step_count_evn(&self) -> u64 {
        self.step_count_evn
    }

    fn step_count_odd(&self) -> u64 {
        self.step_count_odd
    }

    fn iter_count(&self) -> u64 {
        self.iter_count
    }

    fn type_abbrev(&self) -> &'static str {
        "naive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// n=3 is the smallest case the original test battery documents:
    /// 3 -> 10 -> 5 -> 16 -> 8 -> 4 -> 2 -> 1, five halvings and two
    /// triplings.
    #[test]
    fn three_takes_five_even_and_two_odd_steps() {
        let mut engine = NaiveEngine::new();
        *engine.start_value_ref() = Integer::from(3);
        engine.start_value_modified();
        engine.complete_check().unwrap();

        assert_eq!(engine.step_count_evn, 5);
        assert_eq!(engine.step_count_odd, 2);
    }

    #[test]
    fn one_needs_no_steps() {
        let mut engine = NaiveEngine::new();
        engine.complete_check().unwrap();
        assert_eq!(engine.step_count(), 0);
        assert_eq!(engine.iter_count, 0);
    }

    #[test]
    fn a_power_of_two_is_pure_halving() {
        let mut engine = NaiveEngine::new();
        *engine.start_value_ref() = Integer::from(1024);
        engine.start_value_modified();
        engine.complete_check().unwrap();

        assert_eq!(engine.step_count_evn, 10);
        assert_eq!(engine.step_count_odd, 0);
        assert_eq!(engine.iter_count, 1);
    }
}
