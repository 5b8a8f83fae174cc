use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::impl_u64::widening_mul;
use crate::modulus::ReduceOnce;
use crate::modulus::{BARRETT, BARRETTLAZY, FOURTIMES, NONE, ONCE, REDUCEMOD, TWICE};

use num_bigint::BigUint;
use num_traits::cast::ToPrimitive;

impl BarrettPrecomp<u64> {
    /// Computes floor(2^128/q) as two 64-bit words.
    pub fn new(q: u64) -> BarrettPrecomp<u64> {
        let big_r: BigUint = (BigUint::from(1usize) << ((u64::BITS << 1) as usize)) / BigUint::from(q);
        let lo: u64 = (&big_r & BigUint::from(u64::MAX)).to_u64().unwrap();
        let hi: u64 = (big_r >> u64::BITS).to_u64().unwrap();
        Self { q, lo, hi }
    }

    /// Applies a modular reduction on x based on REDUCE:
    /// - NONE: no modular reduction.
    /// - ONCE: subtracts q if x >= q.
    /// - TWICE: subtracts 2q if x >= 2q.
    /// - FOURTIMES: subtracts 4q if x >= 4q.
    /// - BARRETT: maps x to x mod q.
    /// - BARRETTLAZY: maps x to x mod q with output in [0, 2q-1].
    #[inline(always)]
    pub fn reduce_assign<const REDUCE: REDUCEMOD>(&self, x: &mut u64) {
        match REDUCE {
            NONE => {}
            ONCE => x.reduce_once_assign(self.q),
            TWICE => x.reduce_once_assign(self.q << 1),
            FOURTIMES => x.reduce_once_assign(self.q << 2),
            BARRETT => {
                self.reduce_lazy_assign(x);
                x.reduce_once_assign(self.q);
            }
            BARRETTLAZY => self.reduce_lazy_assign(x),
            _ => unreachable!("invalid REDUCE argument"),
        }
    }

    #[inline(always)]
    pub fn reduce<const REDUCE: REDUCEMOD>(&self, x: u64) -> u64 {
        let mut r: u64 = x;
        self.reduce_assign::<REDUCE>(&mut r);
        r
    }

    /// Assigns lhs mod q in range [0, 2q-1] to lhs (single-word input).
    #[inline(always)]
    pub fn reduce_lazy_assign(&self, lhs: &mut u64) {
        let (_, mhi) = widening_mul(*lhs, self.hi);
        *lhs = lhs.wrapping_sub(mhi.wrapping_mul(self.q));
    }

    /// Returns x * y mod q for two arbitrary operands in [0, q).
    /// Neither operand needs any precomputation; the 128-bit product is
    /// reduced against the two-word reciprocal.
    #[inline(always)]
    pub fn mul<const REDUCE: REDUCEMOD>(&self, x: u64, y: u64) -> u64 {
        let mut r: u64 = self.mul_lazy(x, y);
        self.reduce_assign::<REDUCE>(&mut r);
        r
    }

    /// Returns x * y mod q in range [0, 2q-1].
    #[inline(always)]
    pub fn mul_lazy(&self, x: u64, y: u64) -> u64 {
        let (tlo, thi) = widening_mul(x, y);
        // qhat = floor((thi*2^64 + tlo) * (hi*2^64 + lo) / 2^128)
        let (_, carry_lo) = widening_mul(tlo, self.lo);
        let (blo, bhi) = widening_mul(tlo, self.hi);
        let (clo, chi) = widening_mul(thi, self.lo);
        let (s, carry1) = blo.overflowing_add(clo);
        let (_, carry2) = s.overflowing_add(carry_lo);
        let qhat: u64 = thi
            .wrapping_mul(self.hi)
            .wrapping_add(bhi)
            .wrapping_add(chi)
            .wrapping_add(carry1 as u64)
            .wrapping_add(carry2 as u64);
        tlo.wrapping_sub(qhat.wrapping_mul(self.q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul() {
        let q: u64 = 0x1fffffffffe00001;
        let precomp = BarrettPrecomp::new(q);
        let x: u64 = 0x5f876e514845cc8b % q;
        let y: u64 = 0xad726f98f24a761a % q;
        assert_eq!(
            precomp.mul::<ONCE>(x, y),
            (x as u128 * y as u128 % q as u128) as u64
        );
    }

    #[test]
    fn test_mul_boundary() {
        // largest supported modulus: intermediate products must not overflow
        let q: u64 = 0x1fffffffffe00001;
        let precomp = BarrettPrecomp::new(q);
        let x: u64 = q - 1;
        assert_eq!(
            precomp.mul::<ONCE>(x, x),
            (x as u128 * x as u128 % q as u128) as u64
        );
        let lazy = precomp.mul_lazy(x, x);
        assert!(lazy < 2 * q);
        assert_eq!(lazy % q, (x as u128 * x as u128 % q as u128) as u64);
    }

    #[test]
    fn test_reduce() {
        let q: u64 = 12289;
        let precomp = BarrettPrecomp::new(q);
        for x in [0u64, 1, q - 1, q, q + 1, u64::MAX] {
            assert_eq!(precomp.reduce::<BARRETT>(x), x % q);
            let lazy = precomp.reduce::<BARRETTLAZY>(x);
            assert!(lazy < 2 * q);
            assert_eq!(lazy % q, x % q);
        }
    }
}
