//! Standalone K-RED scalar reduction for the fixed modulus q = 12289.
//!
//! This is not wired into the generic ring operators, which reduce via
//! Barrett/Montgomery for any admissible modulus. Callers that pin
//! their parameters to [`KRED_Q`] can use [`kred`]/[`kred_reduce`]
//! directly as a cheaper scalar reduction.

/// Modulus of the form k*2^m + 1 with k = 3, m = 12, for which the
/// K-RED reduction below applies.
pub const KRED_Q: u64 = 12289;

const KRED_K: i64 = 3;
const KRED_M: u32 = 12;

/// Returns k*c mod q as a value congruent to k*c, in a reduced range.
/// For |c| < 2^50 the output fits in i64 without overflow.
#[inline(always)]
pub fn kred(c: i64) -> i64 {
    KRED_K * (c & ((1 << KRED_M) - 1)) - (c >> KRED_M)
}

/// Returns kred(c) fully reduced to [0, q).
#[inline(always)]
pub fn kred_reduce(c: i64) -> u64 {
    let q = KRED_Q as i64;
    let mut r = kred(c) % q;
    r += (r >> 63) & q;
    r as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kred_congruence() {
        // kred(c) = 3*c mod q for any c
        let q = KRED_Q as i64;
        for c in [0i64, 1, -1, 4095, 4096, 12288, 12289, 1 << 40, -(1 << 40)] {
            let want = ((KRED_K as i128 * c as i128).rem_euclid(q as i128)) as i64;
            assert_eq!(kred(c).rem_euclid(q), want, "c = {}", c);
        }
    }

    #[test]
    fn test_kred_reduce_range() {
        for c in [-(1i64 << 49), -1, 0, 1, 1 << 49] {
            let r = kred_reduce(c);
            assert!(r < KRED_Q);
        }
    }
}
