//! The fast engine: the chained accumulator's stepping logic.
//!
//! Each iteration pops one limb off the bottom of the chain, runs it through
//! the impact table (or, once the chain is down to its last limb, the
//! granular "at most" stepper so termination at 1 can be detected), and
//! pushes the stepped 128-bit result back onto the chain — which may ripple
//! one or more accumulators up to their parents if a push trigger fires.

use crate::accumulator::AccuChain;
use crate::engine::CollatzEngine;
use crate::error::Result;
use crate::impact_table;
use rug::Integer;

#[derive(Debug, Default)]
pub struct FastEngine {
    pub chain: AccuChain,
    pub step_count_evn: u64,
    pub step_count_odd: u64,
    pub iter_count: u64,
}

impl FastEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn iterate(&mut self) -> Result<()> {
        let mut sub_accu = u128::from(self.chain.pop_back()?);

        if !self.chain.is_empty() {
            let (evn, odd) =
                impact_table::combined_impact_exactly_u128(&mut sub_accu, crate::bignum::LIMB_BITSIZE);
            self.step_count_evn += evn;
            self.step_count_odd += odd;

            self.chain.push_back(sub_accu, odd)?;
        } else {
            let (evn, odd) =
                impact_table::simple_at_most_u128(&mut sub_accu, crate::bignum::LIMB_BITSIZE);
            self.step_count_evn += evn;
            self.step_count_odd += odd;

            if sub_accu == 1 {
                self.iter_count += 1;
                return Ok(());
            }

            self.chain.push_back(sub_accu, odd)?;
        }

        self.iter_count += 1;
        Ok(())
    }
}

impl CollatzEngine for FastEngine {
    fn start_value_ref(&mut self) -> &mut Integer {
        &mut self.chain.levels[0].buf.value
    }

    fn start_value_modified(&mut self) {
        self.chain.levels[0].adjust_available_to_value();
    }

    fn complete_check(&mut self) -> Result<()> {
        while self.chain.prepare_pop_back()? {
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
        "fast"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_matches_the_naive_engine() {
        let mut engine = FastEngine::new();
        *engine.start_value_ref() = Integer::from(3);
        engine.start_value_modified();
        engine.complete_check().unwrap();

        assert_eq!(engine.step_count_evn, 5);
        assert_eq!(engine.step_count_odd, 2);
    }

    #[test]
    fn one_needs_no_steps() {
        let mut engine = FastEngine::new();
        engine.complete_check().unwrap();
        assert_eq!(engine.step_count(), 0);
    }

    #[test]
    fn a_multi_limb_start_matches_naive_and_slow() {
        let start = Integer::from(420_800_692_135_919_616u64);

        let mut naive = crate::naive::NaiveEngine::new();
        *naive.start_value_ref() = start.clone();
        naive.start_value_modified();
        naive.complete_check().unwrap();

        let mut fast = FastEngine::new();
        *fast.start_value_ref() = start;
        fast.start_value_modified();
        fast.complete_check().unwrap();

        assert_eq!(fast.step_count_evn, naive.step_count_evn);
        assert_eq!(fast.step_count_odd, naive.step_count_odd);
    }
}
