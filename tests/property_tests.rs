//! Property-based tests for the Collatz engines' mathematical invariants.
//!
//! These tests use the `proptest` framework to verify invariants across
//! thousands of randomly generated inputs, rather than the small fixed
//! battery of concrete cases covered by each module's unit tests.
//!
//! # How to run
//!
//! ```bash
//! cargo test --test property_tests
//! PROPTEST_CASES=10000 cargo test --test property_tests
//! ```
//!
//! Each property is named `prop_<subject>_<invariant>`.

use collatz_engine::accumulator::AccuChain;
use collatz_engine::impact_table::{self, MultistepImpact};
use collatz_engine::{CollatzEngine, FastEngine, NaiveEngine};
use proptest::prelude::*;
use rug::ops::Pow;
use rug::Integer;

proptest! {
    /// naive and fast must agree on every starting value in [1, 2^32).
    #[test]
    fn prop_naive_and_fast_agree(n in 1u64..(1u64 << 32)) {
        let mut naive = NaiveEngine::new();
        *naive.start_value_ref() = Integer::from(n);
        naive.start_value_modified();
        naive.complete_check().unwrap();

        let mut fast = FastEngine::new();
        *fast.start_value_ref() = Integer::from(n);
        fast.start_value_modified();
        fast.complete_check().unwrap();

        prop_assert_eq!(naive.step_count_evn(), fast.step_count_evn());
        prop_assert_eq!(naive.step_count_odd(), fast.step_count_odd());
    }

    /// Pushing a random 128-bit chunk onto a chain and then popping every
    /// limb back off (bottom to top) must reconstruct the original value —
    /// the deferred power-of-three exponents must net out to exactly what
    /// was pushed in, regardless of how many levels the push triggered.
    #[test]
    fn prop_chain_push_then_pop_round_trips(value in any::<u128>(), exp_of_3 in 0u64..40) {
        let mut chain = AccuChain::default();
        chain.push_back(value, exp_of_3).unwrap();

        let mut total = Integer::from(0);
        let mut bit_offset = 0u32;
        while chain.prepare_pop_back().unwrap() {
            let limb = chain.pop_back().unwrap();
            total += Integer::from(limb) << bit_offset;
            bit_offset += 64;
        }

        let expected = Integer::from(value) * Integer::from(3).pow(exp_of_3 as u32);
        prop_assert_eq!(total, expected);
    }

    /// For random 8-bit suffixes, the precomputed impact table must agree
    /// with a live simulation of 8 accelerated Collatz steps.
    #[test]
    fn prop_impact_table_matches_live_simulation(p in 0u64..256) {
        let MultistepImpact { carry, power, expnt } = impact_table::combined_impact_table()[p as usize];

        let mut y = p;
        let mut odd_ct = 0u8;
        for _ in 0..impact_table::STEP_COUNT {
            if y & 1 == 1 {
                y = (3 * y + 1) / 2;
                odd_ct += 1;
            } else {
                y /= 2;
            }
        }

        prop_assert_eq!(u64::from(carry), y);
        prop_assert_eq!(expnt, odd_ct);
        prop_assert_eq!(u64::from(power), 3u64.pow(u32::from(odd_ct)));
    }
}
