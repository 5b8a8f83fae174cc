use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::impl_u64::MAX_MODULUS_BITS;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::prime::Prime;
use crate::modulus::ONCE;
use primality_test::is_prime;
use prime_factorization::Factorization;

impl Prime<u64> {
    /// Returns a new instance of Prime<u64>.
    /// Panics if q is not an odd prime or if q has more than 61 bits.
    pub fn new(q: u64) -> Self {
        assert!(is_prime(q) && q > 2, "invalid modulus: q = {} is not an odd prime", q);
        assert!(
            q.next_power_of_two().ilog2() <= MAX_MODULUS_BITS,
            "invalid modulus: q = {} exceeds {} bits",
            q,
            MAX_MODULUS_BITS
        );

        let factors_with_mult = Factorization::run(q - 1).prime_factor_repr();
        let mut factors: Vec<u64> = Vec::with_capacity(factors_with_mult.len());
        for factor in factors_with_mult.iter() {
            factors.push(factor.0)
        }

        Self {
            q,
            two_q: q << 1,
            four_q: q << 2,
            mask: (1u64 << (64 - q.leading_zeros())) - 1,
            factors,
            montgomery: MontgomeryPrecomp::new(q),
            barrett: BarrettPrecomp::new(q),
        }
    }

    /// Returns x^exponent mod q.
    #[inline(always)]
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let x_mont: Montgomery<u64> = self.montgomery.prepare::<ONCE>(x);
        self.montgomery
            .unprepare::<ONCE>(self.montgomery.pow(x_mont, exponent))
    }

    /// Returns x^-1 mod q.
    /// User must ensure that x is not divisible by q.
    #[inline(always)]
    pub fn inv(&self, x: u64) -> u64 {
        self.pow(x, self.q - 2)
    }

    /// Returns the smallest generator of the multiplicative group mod q.
    pub fn primitive_root(&self) -> u64 {
        let mut candidate: u64 = 1u64;
        let mut not_found: bool = true;

        while not_found {
            candidate += 1;

            for &factor in &self.factors {
                if self.pow(candidate, (self.q - 1) / factor) == 1 {
                    not_found = true;
                    break;
                }
                not_found = false;
            }
        }

        candidate
    }

    /// Returns a primitive nth root of unity mod q.
    /// Panics if q != 1 mod nth_root.
    pub fn primitive_nth_root(&self, nth_root: u64) -> u64 {
        assert!(
            self.q & (nth_root - 1) == 1,
            "invalid modulus: q = {} mod {} = {} != 1",
            self.q,
            nth_root,
            self.q & (nth_root - 1)
        );

        let g: u64 = self.primitive_root();
        let psi: u64 = self.pow(g, (self.q - 1) / nth_root);

        assert!(
            self.pow(psi, nth_root) == 1,
            "invalid nth primitive root: psi^nth_root != 1 mod q"
        );
        assert!(
            self.pow(psi, nth_root >> 1) == self.q - 1,
            "invalid nth primitive root: psi^(nth_root/2) != -1 mod q"
        );

        psi
    }
}

/// Returns x^exponent mod q.
/// Internally instantiates a new MontgomeryPrecomp<u64>, to be used
/// when called only a few times and no Prime with q is at hand.
pub fn mod_exp(x: u64, exponent: u64, q: u64) -> u64 {
    let montgomery: MontgomeryPrecomp<u64> = MontgomeryPrecomp::<u64>::new(q);
    let x_mont: Montgomery<u64> = montgomery.prepare::<ONCE>(x);
    montgomery.unprepare::<ONCE>(montgomery.pow(x_mont, exponent))
}
