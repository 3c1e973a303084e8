//! Caches of 3ᵏ, the recurring multiplier of every odd Collatz step.
//!
//! Two tiers, mirroring the original's `power_of_3_int`/`power_of_3_big`
//! split: a machine-word table sized to the largest exponent that still fits
//! a `u64`, and a bignum table precomputed up to `2^17`. Exponents beyond the
//! bignum table's reach fall back to [`pow3`], computed on demand via GMP's
//! binary exponentiation (`rug`'s `Pow` impl for `Integer`).
//!
//! Both tables are built exactly once behind a [`std::sync::OnceLock`],
//! the corpus's idiom for one-time process-wide initialization (see
//! `prst.rs`'s `PRST_BINARY`/`get_binary` and `pfgw.rs`'s
//! `PFGW_BINARY`/`get_binary`: a `static ... OnceLock` paired with a private
//! accessor function that calls `get_or_init`).

use crate::error::{CollatzError, Result};
use rug::ops::Pow;
use rug::Integer;
use std::sync::OnceLock;

/// `3^k` for every `k` that fits in a `u64`. Index `i` holds `3^i`.
static P3_SMALL: OnceLock<Vec<u64>> = OnceLock::new();

/// `3^k` for `0 <= k < P3_BIG_SIZE`, precomputed.
static P3_BIG: OnceLock<Vec<Integer>> = OnceLock::new();

/// Number of precomputed entries in the big table: `2^17 + 1`.
pub const P3_BIG_SIZE: usize = (1 << 17) + 1;

fn p3_small() -> &'static Vec<u64> {
    P3_SMALL.get_or_init(build_small_table)
}

fn p3_big() -> &'static Vec<Integer> {
    P3_BIG.get_or_init(build_big_table)
}

fn build_small_table() -> Vec<u64> {
    let limit = u64::MAX / 3;
    let mut pow: u64 = 1;
    let mut max_exponent = 0usize;

    while pow <= limit {
        pow *= 3;
        max_exponent += 1;
    }

    let mut table = Vec::with_capacity(max_exponent + 1);
    table.push(1u64);
    for i in 1..=max_exponent {
        table.push(table[i - 1] * 3);
    }
    table
}

fn build_big_table() -> Vec<Integer> {
    let mut table = Vec::with_capacity(P3_BIG_SIZE);
    table.push(Integer::from(1));
    for i in 1..P3_BIG_SIZE {
        table.push(Integer::from(&table[i - 1] * 3u32));
    }
    table
}

/// Largest exponent `k` for which `3^k` fits in a `u64`, i.e. the highest
/// valid index into the small table. Mirrors `power_of_3_int::max_exponent`.
pub fn k_max() -> u64 {
    (p3_small().len() - 1) as u64
}

/// `3^k` for a `u64` exponent `k` small enough to fit a machine word. Fails
/// with [`CollatzError::Overflow`] if `exponent` exceeds [`k_max`], mirroring
/// `power_of_3_int::calculate<INT_TYPE>`'s
/// `if (exponent > max_exponent<INT_TYPE>()) throw`.
#[inline]
pub fn small(exponent: u64) -> Result<u64> {
    p3_small()
        .get(exponent as usize)
        .copied()
        .ok_or(CollatzError::Overflow {
            exponent,
            limit: k_max(),
        })
}

/// Computes `3^exponent` as a bignum on the fly, for exponents beyond
/// [`P3_BIG_SIZE`]. Fails with [`CollatzError::Overflow`] if `exponent`
/// cannot even be represented as the `u32` GMP's `mpz_pow_ui` expects.
pub fn pow3(exponent: u64) -> Result<Integer> {
    let exponent_u32 = u32::try_from(exponent).map_err(|_| CollatzError::Overflow {
        exponent,
        limit: u32::MAX as u64,
    })?;
    Ok(Integer::from(3u32).pow(exponent_u32))
}

/// `z *= 3^exponent`, preferring the precomputed bignum table and falling
/// back to [`pow3`] for larger exponents — the same branch the original
/// takes at every `accumulator::push_back`/`pull_from_parent` and the slow
/// engine's per-iteration recombination.
pub fn mul_pow3(z: &mut Integer, exponent: u64) -> Result<()> {
    if (exponent as usize) < P3_BIG_SIZE {
        *z *= &p3_big()[exponent as usize];
    } else {
        *z *= pow3(exponent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_table_matches_direct_powers() {
        assert_eq!(small(0).unwrap(), 1);
        assert_eq!(small(1).unwrap(), 3);
        assert_eq!(small(4).unwrap(), 81);
        assert_eq!(small(32).unwrap(), 3u64.pow(32));
    }

    #[test]
    fn small_beyond_k_max_reports_overflow() {
        let err = small(k_max() + 1).unwrap_err();
        assert_eq!(
            err,
            CollatzError::Overflow {
                exponent: k_max() + 1,
                limit: k_max(),
            }
        );
    }

    #[test]
    fn big_table_matches_small_table_in_overlap() {
        for k in 0..20u64 {
            assert_eq!(p3_big()[k as usize], Integer::from(small(k).unwrap()));
        }
    }

    #[test]
    fn mul_pow3_matches_pow3_beyond_the_table() {
        let exponent = P3_BIG_SIZE as u64 + 5;
        let mut a = Integer::from(7);
        mul_pow3(&mut a, exponent).unwrap();

        let mut b = Integer::from(7);
        b *= pow3(exponent).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn pow3_overflow_reports_the_limit() {
        let err = pow3(u64::from(u32::MAX) + 1).unwrap_err();
        assert!(matches!(err, CollatzError::Overflow { .. }));
    }
}
