//! djb2 string hash and bucket-index reduction.
//!
//! Placement must be bit-for-bit reproducible across platforms, so the
//! accumulator is a fixed-width `u64` with explicit wraparound rather than
//! anything derived from `usize` or `std::hash`.

use core::num::NonZeroUsize;

/// Initial accumulator value for djb2.
pub const DJB2_SEED: u64 = 5381;

/// Full 64-bit djb2 digest of `key`.
///
/// Each byte is folded in as `acc = acc * 33 + byte`, computed as
/// `(acc << 5) + acc + byte` with wrapping arithmetic.
#[inline]
pub fn djb2(key: &[u8]) -> u64 {
    key.iter().fold(DJB2_SEED, |acc, &c| {
        (acc << 5).wrapping_add(acc).wrapping_add(u64::from(c))
    })
}

/// Bucket index of `key` in a table with `modulus` buckets, in `[0, modulus)`.
#[inline]
pub fn bucket_index(key: &[u8], modulus: NonZeroUsize) -> usize {
    // usize is at most 64 bits on supported targets, so the remainder fits.
    (djb2(key) % modulus.get() as u64) as usize
}
