//! The chained accumulator: the data structure that lets the fast engine
//! defer big multiplications by keeping most of a Collatz trajectory's state
//! as small machine words for as long as possible.
//!
//! Three layers, mirroring the original's `arith_buffer` / `accumulator` /
//! `accu_chain` classes:
//!
//! - [`ArithBuffer`] — a bignum value plus a declared "available" limb count
//!   (`available >= size(value)`, since leading zero limbs can be available
//!   without being materialized).
//! - [`Accumulator`] — a buffer with a pending exponent of 3, logically
//!   representing `buf.value * 3^exp_of_3` while postponing the multiply.
//! - [`AccuChain`] — an ordered stack of accumulators with the push/pull
//!   protocol that keeps the chain's low end cheap to pop from.

use crate::bignum;
use crate::error::{CollatzError, Result};
use crate::power_of_three;
use rug::Integer;

/// `log2(3)`, used to convert a value-size trigger into an exponent-of-3
/// trigger.
const LOG_BASE2_OF_3: f64 = 1.584_962_500_721_156_2;

/// A bignum value together with a declared count of limbs "available" to
/// pop from it (`available >= size(value)`).
#[derive(Debug, Clone)]
pub struct ArithBuffer {
    pub value: Integer,
    pub available: u64,
}

impl Default for ArithBuffer {
    fn default() -> Self {
        ArithBuffer {
            value: Integer::from(0),
            available: 0,
        }
    }
}

impl ArithBuffer {
    pub fn reset(&mut self) {
        self.value = Integer::from(0);
        self.available = 0;
    }

    /// O(1) ownership swap, matching `mpz_swap`/`std::swap` in the original.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.value, &mut other.value);
        std::mem::swap(&mut self.available, &mut other.available);
    }

    pub fn adjust_available_to_value(&mut self) {
        self.available = bignum::limb_count(&self.value);
    }

    pub fn is_empty(&self) -> bool {
        self.available == 0 && self.value == 0
    }

    pub fn ensure_available(&self, expected_available: u64) -> Result<()> {
        if self.available < expected_available {
            return Err(CollatzError::InvariantViolation {
                detail: format!(
                    "not enough data available (available={}, expected_available={})",
                    self.available, expected_available
                ),
            });
        }
        Ok(())
    }

    /// Pops the low `size` limbs off the back, returning them as a bignum.
    pub fn pop_back(&mut self, size: u64) -> Result<Integer> {
        self.ensure_available(size)?;

        let mut result = self.value.clone();
        bignum::keep_low_limbs(&mut result, size);
        bignum::shift_right(&mut self.value, size * u64::from(bignum::LIMB_BITSIZE));
        self.available -= size;

        Ok(result)
    }

    /// Pops exactly one limb off the back, returning it as a machine word.
    pub fn pop_back_limb(&mut self) -> Result<u64> {
        self.ensure_available(1)?;

        let result = bignum::low_limb(&self.value);
        bignum::shift_right(&mut self.value, u64::from(bignum::LIMB_BITSIZE));
        self.available -= 1;

        Ok(result)
    }

    /// Appends a bignum to the back (low end), without shifting `value`.
    pub fn push_back(&mut self, pushed_value: &Integer, pushed_available: u64) {
        bignum::shift_left(&mut self.value, pushed_available * u64::from(bignum::LIMB_BITSIZE));
        bignum::add(&mut self.value, pushed_value);
        self.available += pushed_available;
    }

    /// Appends a 128-bit chunk to the back, without shifting `value`.
    pub fn push_back_double_limb(&mut self, pushed_value: u128, pushed_available: u64) {
        bignum::shift_left(&mut self.value, pushed_available * u64::from(bignum::LIMB_BITSIZE));
        bignum::add_double_limb(&mut self.value, pushed_value);
        self.available += pushed_available;
    }

    /// Inserts a bignum aligned with the current top (front) of `value`,
    /// below whatever is already accounted for by `available`.
    pub fn push_front(&mut self, pushed_value: &Integer, pushed_available: u64) {
        let mut shifted = pushed_value.clone();
        bignum::shift_left(&mut shifted, self.available * u64::from(bignum::LIMB_BITSIZE));
        bignum::add(&mut self.value, &shifted);
        self.available += pushed_available;
    }
}

/// A buffer plus a pending exponent of 3: logically `buf.value * 3^exp_of_3`.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    pub buf: ArithBuffer,
    pub exp_of_3: u64,
}

impl Accumulator {
    pub fn reset(&mut self) {
        self.exp_of_3 = 0;
        self.buf.reset();
    }

    pub fn adjust_available_to_value(&mut self) {
        self.buf.adjust_available_to_value();
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        std::mem::swap(&mut self.exp_of_3, &mut other.exp_of_3);
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn ensure_available(&self, expected_available: u64) -> Result<()> {
        self.buf.ensure_available(expected_available)
    }

    pub fn pop_back(&mut self, size: u64) -> Result<Integer> {
        self.buf.pop_back(size)
    }

    pub fn pop_back_limb(&mut self) -> Result<u64> {
        self.buf.pop_back_limb()
    }

    /// Appends `pushed_value` (a bignum), first catching this accumulator's
    /// value up to the new deferred exponent of 3.
    pub fn push_back(
        &mut self,
        pushed_value: &Integer,
        pushed_exp_of_3: u64,
        pushed_available: u64,
    ) -> Result<()> {
        power_of_three::mul_pow3(&mut self.buf.value, pushed_exp_of_3)?;
        self.buf.push_back(pushed_value, pushed_available);
        self.exp_of_3 += pushed_exp_of_3;
        Ok(())
    }

    /// Appends a 128-bit chunk, same deferred-exponent catch-up as
    /// [`Accumulator::push_back`].
    pub fn push_back_double_limb(
        &mut self,
        pushed_value: u128,
        pushed_exp_of_3: u64,
        pushed_available: u64,
    ) -> Result<()> {
        power_of_three::mul_pow3(&mut self.buf.value, pushed_exp_of_3)?;
        self.buf.push_back_double_limb(pushed_value, pushed_available);
        self.exp_of_3 += pushed_exp_of_3;
        Ok(())
    }

    /// Moves this accumulator's entire content onto `parent`'s back,
    /// leaving `self` empty. The one multiply that actually realizes the
    /// deferred `3^exp_of_3` happens inside `parent`'s `push_back`.
    pub fn push_to_parent(&mut self, parent: &mut Accumulator) -> Result<()> {
        let value = std::mem::replace(&mut self.buf.value, Integer::from(0));
        let available = self.buf.available;
        let exp_of_3 = self.exp_of_3;

        parent.push_back(&value, exp_of_3, available)?;

        self.exp_of_3 = 0;
        self.buf.available = 0;
        Ok(())
    }

    /// Pulls up to `pull_size` limbs from `parent`'s back into this
    /// accumulator's front, applying this accumulator's own pending
    /// exponent of 3 to the pulled chunk so it lines up with `self`'s scale.
    pub fn pull_from_parent(&mut self, parent: &mut Accumulator, pull_size: u64) -> Result<()> {
        let actual_pull_size = pull_size.min(parent.buf.available);

        let mut pulled_value = parent.pop_back(actual_pull_size)?;
        power_of_three::mul_pow3(&mut pulled_value, self.exp_of_3)?;

        self.buf.push_front(&pulled_value, pull_size);
        Ok(())
    }
}

/// Per-level parameters of the chain, deterministic in the level index.
pub fn pull_size(idx: usize) -> u64 {
    1u64 << (idx + 1)
}

pub fn push_trigger_value_size(idx: usize) -> u64 {
    pull_size(idx) * 7 / 5
}

pub fn push_trigger_exp_of_3(idx: usize) -> u64 {
    let bits = push_trigger_value_size(idx) as f64 * f64::from(bignum::LIMB_BITSIZE);
    (bits / LOG_BASE2_OF_3).ceil() as u64
}

/// An ordered stack of accumulators, always containing at least one element.
/// Semantic value: `sum_i( A_i.value * 3^A_i.e * 2^(L * sum_{j<i} A_j.available) )`.
#[derive(Debug)]
pub struct AccuChain {
    pub levels: Vec<Accumulator>,
}

impl Default for AccuChain {
    fn default() -> Self {
        AccuChain {
            levels: vec![Accumulator::default()],
        }
    }
}

impl AccuChain {
    pub fn reset(&mut self) {
        self.levels.truncate(1);
        self.levels[0].reset();
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(Accumulator::is_empty)
    }

    fn ensure_available(&self, expected_available: u64) -> Result<()> {
        if expected_available == 0 {
            return Ok(());
        }
        if self.levels[0].buf.available < expected_available {
            return Err(CollatzError::InvariantViolation {
                detail: format!(
                    "not enough data available in levels[0] (available={}, expected_available={})",
                    self.levels[0].buf.available, expected_available
                ),
            });
        }
        Ok(())
    }

    pub fn pop_back(&mut self) -> Result<u64> {
        self.ensure_available(1)?;
        self.levels[0].pop_back_limb()
    }

    fn is_push_trigger_value_size_reached(&self, idx: usize) -> bool {
        bignum::limb_count(&self.levels[idx].buf.value) > push_trigger_value_size(idx)
    }

    fn is_push_trigger_exp_of_3_reached(&self, idx: usize) -> bool {
        self.levels[idx].exp_of_3 > push_trigger_exp_of_3(idx)
    }

    fn is_push_trigger_reached(&self, idx: usize) -> bool {
        self.is_push_trigger_value_size_reached(idx) || self.is_push_trigger_exp_of_3_reached(idx)
    }

    /// Inserts a new, empty accumulator into the second-last position.
    fn add_accumulator(&mut self) {
        self.levels.push(Accumulator::default());
        let last = self.levels.len() - 1;
        self.levels.swap(last - 1, last);
    }

    /// Appends `pushed_value` (a freshly-stepped 128-bit chunk) to the back
    /// of the chain, aligned with the lowest accumulator, then walks the
    /// push triggers upward as far as they fire.
    pub fn push_back(&mut self, pushed_value: u128, pushed_exp_of_3: u64) -> Result<()> {
        if self.levels.len() == 1 {
            if !self.is_push_trigger_value_size_reached(0) {
                self.levels[0].push_back_double_limb(pushed_value, pushed_exp_of_3, 0)?;
                self.levels[0].adjust_available_to_value();
                return Ok(());
            }

            self.add_accumulator();
        }

        self.levels[0].push_back_double_limb(pushed_value, pushed_exp_of_3, 0)?;

        let mut i = 0;
        loop {
            if !self.is_push_trigger_reached(i) {
                return Ok(());
            }

            if i == self.levels.len() - 2 {
                self.add_accumulator();
            }

            let (lower, upper) = self.levels.split_at_mut(i + 1);
            lower[i].push_to_parent(&mut upper[0])?;

            i += 1;
        }
    }

    /// Pulls `[i_start+1] -> [i_start] -> ... -> [0]`, then trims any empty
    /// top levels left behind.
    fn chained_pull(&mut self, i_start: usize) -> Result<()> {
        for i in (0..=i_start).rev() {
            let pull = pull_size(i);
            let (lower, upper) = self.levels.split_at_mut(i + 1);
            lower[i].pull_from_parent(&mut upper[0], pull)?;
        }

        if i_start == self.levels.len() - 2 {
            while self.levels.len() > 1 && self.levels.last().is_some_and(Accumulator::is_empty) {
                self.levels.pop();
                let last = self.levels.len() - 1;
                self.levels[last].adjust_available_to_value();
            }
        }

        Ok(())
    }

    /// Ensures the bottom accumulator has at least one limb available to
    /// pop, pulling down from higher levels as needed. Returns `false` once
    /// the whole chain is empty (the check is complete).
    pub fn prepare_pop_back(&mut self) -> Result<bool> {
        if self.levels.is_empty() {
            return Err(CollatzError::InvariantViolation {
                detail: "accu chain may not be empty".to_string(),
            });
        }

        if self.levels[0].buf.available >= 1 {
            return Ok(true);
        }

        if self.levels.len() == 1 {
            return Ok(!self.levels[0].is_empty());
        }

        for i in 0..self.levels.len().saturating_sub(2) {
            if self.levels[i + 1].buf.available >= pull_size(i) {
                self.chained_pull(i)?;
                return Ok(true);
            }
        }

        if self.levels.last().unwrap().buf.available == 0 {
            return Err(CollatzError::InvariantViolation {
                detail: "accu chain may not be in this state here".to_string(),
            });
        }

        self.chained_pull(self.levels.len() - 2)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_and_trigger_sizes_match_the_documented_formulas() {
        assert_eq!(pull_size(0), 2);
        assert_eq!(pull_size(1), 4);
        assert_eq!(push_trigger_value_size(0), 2);
        assert_eq!(push_trigger_value_size(1), 5);
    }

    #[test]
    fn fresh_chain_has_one_empty_level() {
        let chain = AccuChain::default();
        assert_eq!(chain.levels.len(), 1);
        assert!(chain.is_empty());
    }

    #[test]
    fn push_then_pop_round_trips_a_small_value() {
        let mut chain = AccuChain::default();
        chain.push_back(42, 0).unwrap();
        assert!(chain.prepare_pop_back().unwrap());
        let limb = chain.pop_back().unwrap();
        assert_eq!(limb, 42);
    }

    #[test]
    fn push_to_parent_catches_up_the_deferred_exponent() {
        let mut parent = Accumulator::default();
        parent.buf.value = Integer::from(5);
        parent.buf.available = 1;

        let mut child = Accumulator::default();
        child.buf.value = Integer::from(2);
        child.buf.available = 1;
        child.exp_of_3 = 3;

        child.push_to_parent(&mut parent).unwrap();

        assert!(child.is_empty());
        assert_eq!(parent.exp_of_3, 3);
        // parent.value was 5, shifted left by 1 limb and added to 2, then
        // the *whole* parent catches up by 3^3 only at the next push — here
        // push_back multiplies parent.buf.value by 3^pushed_exp_of_3 BEFORE
        // appending, so parent ends up holding (5 * 27) shifted + 2.
        let mut expected = Integer::from(5);
        expected *= 27;
        expected <<= 64u32;
        expected += 2;
        assert_eq!(parent.buf.value, expected);
    }

    #[test]
    fn arith_buffer_swap_exchanges_contents() {
        let mut a = ArithBuffer {
            value: Integer::from(1),
            available: 1,
        };
        let mut b = ArithBuffer {
            value: Integer::from(2),
            available: 2,
        };
        a.swap(&mut b);
        assert_eq!(a.value, Integer::from(2));
        assert_eq!(b.value, Integer::from(1));
    }
}
