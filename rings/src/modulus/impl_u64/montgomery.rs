use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::impl_u64::widening_mul;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::ReduceOnce;
use crate::modulus::{ONCE, REDUCEMOD};

/// Montgomery arithmetic over u64 values with a radix of 2^64.
impl MontgomeryPrecomp<u64> {
    /// Returns a new instance of MontgomeryPrecomp<u64>.
    /// Panics if gcd(q, 2^64) != 1.
    pub fn new(q: u64) -> MontgomeryPrecomp<u64> {
        assert!(q & 1 != 0, "invalid argument: gcd(q={}, radix=2^64) != 1", q);

        // Newton iteration for q^-1 mod 2^64: fixed 63 squarings, no
        // extended-Euclid branch, so the cost is data-independent.
        let mut q_inv: u64 = 1;
        let mut q_pow: u64 = q;
        for _i in 0..63 {
            q_inv = q_inv.wrapping_mul(q_pow);
            q_pow = q_pow.wrapping_mul(q_pow);
        }

        let mut precomp = Self {
            q,
            two_q: q << 1,
            four_q: q << 2,
            barrett: BarrettPrecomp::new(q),
            q_inv,
            one: 0,
            minus_one: 0,
        };

        precomp.one = precomp.prepare::<ONCE>(1);
        precomp.minus_one = q - precomp.one;

        precomp
    }

    /// Returns 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn one(&self) -> Montgomery<u64> {
        self.one
    }

    /// Returns (q-1) * 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn minus_one(&self) -> Montgomery<u64> {
        self.minus_one
    }

    #[inline(always)]
    pub fn reduce_assign<const REDUCE: REDUCEMOD>(&self, x: &mut u64) {
        self.barrett.reduce_assign::<REDUCE>(x);
    }

    /// Returns lhs * 2^64 mod q as a Montgomery<u64>.
    /// lhs must be < q.
    #[inline(always)]
    pub fn prepare<const REDUCE: REDUCEMOD>(&self, lhs: u64) -> Montgomery<u64> {
        let mut rhs: u64 = 0;
        self.prepare_assign::<REDUCE>(lhs, &mut rhs);
        rhs
    }

    /// Assigns lhs * 2^64 mod q to rhs.
    #[inline(always)]
    pub fn prepare_assign<const REDUCE: REDUCEMOD>(&self, lhs: u64, rhs: &mut Montgomery<u64>) {
        let (_, mhi) = widening_mul(lhs, *self.barrett.value_lo());
        *rhs = (lhs
            .wrapping_mul(*self.barrett.value_hi())
            .wrapping_add(mhi))
        .wrapping_mul(self.q)
        .wrapping_neg();
        self.reduce_assign::<REDUCE>(rhs);
    }

    /// Returns lhs * (2^64)^-1 mod q as a u64.
    #[inline(always)]
    pub fn unprepare<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>) -> u64 {
        let mut rhs = 0u64;
        self.unprepare_assign::<REDUCE>(lhs, &mut rhs);
        rhs
    }

    /// Assigns lhs * (2^64)^-1 mod q to rhs.
    #[inline(always)]
    pub fn unprepare_assign<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: &mut u64) {
        let (_, r) = widening_mul(self.q, lhs.wrapping_mul(self.q_inv));
        *rhs = self.q.wrapping_sub(r);
        self.reduce_assign::<REDUCE>(rhs);
    }

    /// Returns lhs * rhs * (2^64)^-1 mod q.
    /// At least one operand must be in Montgomery form; if both are, the
    /// result is in Montgomery form, else in standard form.
    /// REDUCE = NONE is the constant-time variant with output in [0, 2q-1].
    #[inline(always)]
    pub fn mul_external<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: u64) -> u64 {
        let mut r: u64 = rhs;
        self.mul_external_assign::<REDUCE>(lhs, &mut r);
        r
    }

    /// Assigns lhs * rhs * (2^64)^-1 mod q to rhs.
    #[inline(always)]
    pub fn mul_external_assign<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: &mut u64) {
        let (mlo, mhi) = widening_mul(lhs, *rhs);
        let (_, hhi) = widening_mul(self.q, mlo.wrapping_mul(self.q_inv));
        *rhs = mhi.wrapping_sub(hhi).wrapping_add(self.q);
        self.reduce_assign::<REDUCE>(rhs);
    }

    /// Returns lhs * rhs * (2^64)^-1 mod q, both operands in Montgomery form.
    #[inline(always)]
    pub fn mul_internal<const REDUCE: REDUCEMOD>(
        &self,
        lhs: Montgomery<u64>,
        rhs: Montgomery<u64>,
    ) -> Montgomery<u64> {
        self.mul_external::<REDUCE>(lhs, rhs)
    }

    /// Assigns lhs * rhs * (2^64)^-1 mod q to rhs, both in Montgomery form.
    #[inline(always)]
    pub fn mul_internal_assign<const REDUCE: REDUCEMOD>(
        &self,
        lhs: Montgomery<u64>,
        rhs: &mut Montgomery<u64>,
    ) {
        self.mul_external_assign::<REDUCE>(lhs, rhs);
    }

    /// Returns lhs + rhs mod q, both in Montgomery form and < q.
    #[inline(always)]
    pub fn add_internal(&self, lhs: Montgomery<u64>, rhs: Montgomery<u64>) -> Montgomery<u64> {
        (lhs + rhs).reduce_once(self.q)
    }

    /// Returns x * 2^k * (2^64)^-1 mod q.
    /// Montgomery reduction of the 128-bit value x << k; with x in
    /// Montgomery form the result is x * 2^k in standard form.
    /// k must be < 64.
    #[inline(always)]
    pub fn pow2<const REDUCE: REDUCEMOD>(&self, x: u64, k: u32) -> u64 {
        debug_assert!(k < 64, "invalid argument k: k = {} >= 64", k);
        let ahi: u64 = if k == 0 { 0 } else { x >> (64 - k) };
        let alo: u64 = x << k;
        let (_, h) = widening_mul(self.q, alo.wrapping_mul(self.q_inv));
        let mut r: u64 = ahi.wrapping_sub(h).wrapping_add(self.q);
        self.reduce_assign::<REDUCE>(&mut r);
        r
    }

    /// Returns (x^exponent) * 2^64 mod q for x in Montgomery form.
    pub fn pow(&self, x: Montgomery<u64>, exponent: u64) -> Montgomery<u64> {
        let mut y: Montgomery<u64> = self.one();
        let mut x_mut: Montgomery<u64> = x;
        let mut i: u64 = exponent;
        while i > 0 {
            if i & 1 == 1 {
                self.mul_internal_assign::<ONCE>(x_mut, &mut y);
            }
            self.mul_internal_assign::<ONCE>(x_mut, &mut x_mut);
            i >>= 1;
        }
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulus::NONE;

    #[test]
    fn test_mul_external() {
        let q: u64 = 0x1fffffffffe00001;
        let m_precomp = MontgomeryPrecomp::new(q);
        let x: u64 = 0x5f876e514845cc8b % q;
        let y: u64 = 0xad726f98f24a761a % q;
        let y_mont = m_precomp.prepare::<ONCE>(y);
        assert_eq!(
            m_precomp.mul_external::<ONCE>(y_mont, x),
            (x as u128 * y as u128 % q as u128) as u64
        );
    }

    #[test]
    fn test_mul_external_lazy_range() {
        let q: u64 = 0x1fffffffffe00001;
        let m_precomp = MontgomeryPrecomp::new(q);
        let x: u64 = q - 1;
        let y_mont = m_precomp.prepare::<ONCE>(q - 1);
        let r = m_precomp.mul_external::<NONE>(y_mont, x);
        assert!(r < 2 * q);
        assert_eq!(
            r % q,
            ((q - 1) as u128 * (q - 1) as u128 % q as u128) as u64
        );
    }

    #[test]
    fn test_prepare_unprepare_roundtrip() {
        let q: u64 = 12289;
        let m_precomp = MontgomeryPrecomp::new(q);
        for a in [0u64, 1, 2, 42, q - 2, q - 1] {
            let a_mont = m_precomp.prepare::<ONCE>(a);
            assert_eq!(m_precomp.unprepare::<ONCE>(a_mont), a);
        }
    }

    #[test]
    fn test_pow2() {
        let q: u64 = 12289;
        let m_precomp = MontgomeryPrecomp::new(q);
        for k in [0u32, 1, 5, 13] {
            let x: u64 = 1234;
            let x_mont = m_precomp.prepare::<ONCE>(x);
            assert_eq!(
                m_precomp.pow2::<ONCE>(x_mont, k),
                (((x as u128) << k) % q as u128) as u64
            );
        }
    }

    #[test]
    fn test_pow() {
        let q: u64 = 12289;
        let m_precomp = MontgomeryPrecomp::new(q);
        let x_mont = m_precomp.prepare::<ONCE>(3);
        // 3^12288 = 1 mod 12289 (Fermat)
        assert_eq!(
            m_precomp.unprepare::<ONCE>(m_precomp.pow(x_mont, q - 1)),
            1
        );
    }
}
