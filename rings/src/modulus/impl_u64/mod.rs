pub mod barrett;
pub mod kred;
pub mod montgomery;
pub mod prime;

use crate::modulus::ReduceOnce;

/// Largest supported modulus bit-length: 4q must fit below 2^63 so the
/// lazy NTT ranges never overflow a u64.
pub const MAX_MODULUS_BITS: u32 = 61;

/// Full 64x64 -> 128 bit product, split into (lo, hi) words.
#[inline(always)]
pub(crate) fn widening_mul(a: u64, b: u64) -> (u64, u64) {
    let t: u128 = (a as u128) * (b as u128);
    (t as u64, (t >> 64) as u64)
}

impl ReduceOnce<u64> for u64 {
    #[inline(always)]
    fn reduce_once_constant_time_assign(&mut self, q: u64) {
        debug_assert!(q < 0x8000000000000000, "2q >= 2^64");
        *self -= (q.wrapping_sub(*self + 1) >> 63) * q;
    }

    #[inline(always)]
    fn reduce_once_constant_time(&self, q: u64) -> u64 {
        debug_assert!(q < 0x8000000000000000, "2q >= 2^64");
        self - (q.wrapping_sub(*self + 1) >> 63) * q
    }

    #[inline(always)]
    fn reduce_once_assign(&mut self, q: u64) {
        if *self >= q {
            *self -= q
        }
    }

    #[inline(always)]
    fn reduce_once(&self, q: u64) -> u64 {
        if *self >= q {
            *self - q
        } else {
            *self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_once() {
        let q: u64 = 0x1fffffffffe00001;
        for x in [0u64, 1, q - 1, q, q + 1, 2 * q - 1] {
            let r = x.reduce_once(q);
            assert!(r < q);
            assert_eq!(r % q, x % q);
            assert_eq!(r, x.reduce_once_constant_time(q));
        }
    }
}
