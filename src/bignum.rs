//! Thin semantic layer over [`rug::Integer`].
//!
//! The engines below never touch `rug`'s GMP-backed methods directly outside
//! this module; everything they need — bit length, limb count, trailing
//! zeros, low-limb extraction, shifting, small multiplies, additions — is
//! named here the way the rest of the corpus wraps bignum primitives behind
//! small free functions (`estimate_digits`, `exact_digits`, `checked_u32`).

use rug::Integer;

/// Limb width used throughout the chained accumulator, matching the GMP
/// limb size on every platform this crate targets (64-bit).
pub const LIMB_BITSIZE: u32 = 64;

/// Converts a `u64` bit/limb count to `u32`, panicking with a clear message
/// on overflow. Mirrors `checked_u32` from the prime-search corpus: an
/// overflow here means a candidate size this crate never expects to see.
#[inline]
pub fn checked_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or_else(|_| {
        panic!("value {n} exceeds u32::MAX ({}); cannot index/shift by it", u32::MAX)
    })
}

/// Bit length of `z`, i.e. `bitlen` in the original source's `mpz_utils.h`.
/// Zero for a zero value.
#[inline]
pub fn bit_length(z: &Integer) -> u64 {
    z.significant_bits() as u64
}

/// Number of non-zero 64-bit limbs backing `z`'s magnitude.
#[inline]
pub fn limb_count(z: &Integer) -> u64 {
    if *z == 0 {
        0
    } else {
        (bit_length(z) + u64::from(LIMB_BITSIZE) - 1) / u64::from(LIMB_BITSIZE)
    }
}

/// Index of the lowest set bit, i.e. `mpz_scan1(z, 0)`. `z` must be nonzero;
/// every call site in this crate only reaches here on values known to be
/// even and positive.
#[inline]
pub fn trailing_zeros(z: &Integer) -> u64 {
    z.find_one(0)
        .expect("trailing_zeros called on a zero value") as u64
}

/// `z >>= k`, in place.
#[inline]
pub fn shift_right(z: &mut Integer, k: u64) {
    *z >>= checked_u32(k);
}

/// `z <<= k`, in place.
#[inline]
pub fn shift_left(z: &mut Integer, k: u64) {
    *z <<= checked_u32(k);
}

/// Low 64 bits of `z`, i.e. `z.get_ui()` in the GMP C++ wrapper: truncating,
/// not panicking, on values wider than one limb.
#[inline]
pub fn low_limb(z: &Integer) -> u64 {
    z.to_u64_wrapping()
}

/// `z *= small`, in place.
#[inline]
pub fn mul_small(z: &mut Integer, small: u64) {
    *z *= small;
}

/// `z += other`, in place.
#[inline]
pub fn add(z: &mut Integer, other: &Integer) {
    *z += other;
}

/// `z += w`, where `w` is a double-limb (128-bit) unsigned value — the
/// recombination step after a half-limb impact-table application produces a
/// carry that can span two limbs.
#[inline]
pub fn add_double_limb(z: &mut Integer, w: u128) {
    *z += Integer::from(w);
}

/// Keeps only the low `limbs * LIMB_BITSIZE` bits of `z`, in place — the
/// bignum equivalent of `mpz_tdiv_r_2exp` used by `arith_buffer::pop_back`.
#[inline]
pub fn keep_low_limbs(z: &mut Integer, limbs: u64) {
    z.keep_bits_mut(checked_u32(limbs * u64::from(LIMB_BITSIZE)));
}
