//! The slow engine: one bignum multiply per iteration instead of one per
//! odd step.
//!
//! Each iteration peels the low 64-bit limb off the bignum residue, splits
//! it into two 32-bit halves, runs each half through the 8-bit impact table
//! (4 batched lookups per half), recombines the two halves into a 128-bit
//! carry, and folds the combined odd-step count into a single multiply of
//! the remaining bignum by `3^(combined exponent)`. Once the bignum residue
//! is exhausted (fewer than 64 bits remain), the last stretch is walked one
//! accelerated step at a time so the engine can detect termination at 1.

use crate::bignum;
use crate::engine::CollatzEngine;
use crate::error::Result;
use crate::impact_table;
use crate::power_of_three;
use rug::Integer;

const LIMB_BITSIZE_HALF: u32 = bignum::LIMB_BITSIZE / 2;
const LIMB_LO_MASK_HALF: u64 = (1u64 << LIMB_BITSIZE_HALF) - 1;

#[derive(Debug)]
pub struct SlowEngine {
    pub value: Integer,
    pub step_count_evn: u64,
    pub step_count_odd: u64,
    pub iter_count: u64,
}

impl Default for SlowEngine {
    fn default() -> Self {
        SlowEngine {
            value: Integer::from(1),
            step_count_evn: 0,
            step_count_odd: 0,
            iter_count: 0,
        }
    }
}

impl SlowEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_finished(&self) -> bool {
        self.value != 1
    }

    fn iterate(&mut self) -> Result<()> {
        let lo = bignum::low_limb(&self.value);
        bignum::shift_right(&mut self.value, u64::from(bignum::LIMB_BITSIZE));

        let hi: u128;

        if self.value > 0 {
            let mut acc: u128 = u128::from(lo >> LIMB_BITSIZE_HALF);
            let mut exponent_cum = 0u64;

            let mut low_half = lo & LIMB_LO_MASK_HALF;
            let (evn, exponent) =
                impact_table::combined_impact_exactly_u64(&mut low_half, LIMB_BITSIZE_HALF);
            self.step_count_evn += evn;
            exponent_cum += exponent;

            acc *= u128::from(power_of_three::small(exponent)?);
            acc += u128::from(low_half);

            let mut low_half = (acc & u128::from(LIMB_LO_MASK_HALF)) as u64;
            acc >>= LIMB_BITSIZE_HALF;

            let (evn, exponent) =
                impact_table::combined_impact_exactly_u64(&mut low_half, LIMB_BITSIZE_HALF);
            self.step_count_evn += evn;
            exponent_cum += exponent;

            acc *= u128::from(power_of_three::small(exponent)?);
            acc += u128::from(low_half);

            self.step_count_odd += exponent_cum;

            power_of_three::mul_pow3(&mut self.value, exponent_cum)?;

            hi = acc;
        } else {
            let mut residual = u128::from(lo);
            let (evn, odd) =
                impact_table::simple_at_most_u128(&mut residual, bignum::LIMB_BITSIZE);
            self.step_count_evn += evn;
            self.step_count_odd += odd;

            hi = residual;
        }

        bignum::add_double_limb(&mut self.value, hi);
        self.iter_count += 1;

        Ok(())
    }
}

impl CollatzEngine for SlowEngine {
    fn start_value_ref(&mut self) -> &mut Integer {
        &mut self.value
    }

    fn start_value_modified(&mut self) {}

    fn complete_check(&mut self) -> Result<()> {
        while self.not_finished() {
            self.iterate()?;
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
        "slow"
    }
}
