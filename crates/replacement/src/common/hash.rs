//! Deterministic Hash Utilities.
//!
//! Two hashes are used by the predictive policies:
//! 1. **CRC mix:** 32 rounds of a reflected CRC-32 shift/xor step
//!    (polynomial `0xEDB8_8320`) applied to a full 64-bit input. Hawkeye uses it
//!    both for its PC predictor index and for sampled-history address tags.
//! 2. **Signature fold:** SHiP's xor-fold of the PC into a power-of-two table.
//!
//! Both are pure functions of their input. Collisions merge the statistics of
//! unrelated PCs or addresses; that is an accepted approximation.

/// Reflected CRC-32 polynomial.
pub const CRC_POLYNOMIAL: u64 = 0xEDB8_8320;

/// Number of shift/xor rounds applied by [`crc_mix`].
const CRC_ROUNDS: u32 = 32;

/// Mixes a 64-bit value with 32 reflected CRC rounds.
///
/// The input domain is the full `u64` range. The low 32 bits of the result are
/// well distributed; callers reduce the result with a modulo or a mask.
#[inline]
pub const fn crc_mix(value: u64) -> u64 {
    let mut result = value;
    let mut round = 0;
    while round < CRC_ROUNDS {
        result = if result & 1 == 1 {
            (result >> 1) ^ CRC_POLYNOMIAL
        } else {
            result >> 1
        };
        round += 1;
    }
    result
}

/// Maps `value` into `[0, table_size)` through [`crc_mix`].
///
/// `table_size` must be non-zero; configuration validation guarantees it.
#[inline]
pub const fn table_index(value: u64, table_size: usize) -> usize {
    (crc_mix(value) % table_size as u64) as usize
}

/// Folds a PC into a SHiP signature-table index.
///
/// `mask` is `table_size - 1` for a power-of-two table.
#[inline]
pub const fn fold_signature(pc: u64, mask: usize) -> usize {
    let mut hash = (pc ^ (pc >> 32)) as u32;
    hash ^= hash >> 16;
    hash ^= hash >> 8;
    (hash as usize) & mask
}
