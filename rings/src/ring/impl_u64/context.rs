use crate::dft::ntt::Table;
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::impl_u64::MAX_MODULUS_BITS;
use crate::modulus::montgomery::MontgomeryPrecomp;
use crate::modulus::prime::Prime;
use crate::ring::{ContextError, Ring, RingContext, RingModulus, RingRNS};
use primality_test::is_prime;
use std::rc::Rc;

impl RingContext {
    /// Returns an unvalidated context for degree n over the given basis.
    /// Structural checks only: the degree must be a nonzero power of
    /// two, the basis nonempty and every modulus > 1 within the word
    /// size. Primality and NTT-compatibility are deferred to
    /// [`Self::validate`].
    pub fn new(n: usize, moduli: &[u64]) -> Result<RingContext, ContextError> {
        if n == 0 || n & (n - 1) != 0 {
            return Err(ContextError::InvalidDegree(n));
        }
        if moduli.is_empty() {
            return Err(ContextError::EmptyModulusList);
        }

        let mut ring_moduli: Vec<RingModulus<u64>> = Vec::with_capacity(moduli.len());
        for &q in moduli {
            if q < 2 {
                return Err(ContextError::NonNttCompatibleModulus(q));
            }
            if 64 - q.leading_zeros() > MAX_MODULUS_BITS {
                return Err(ContextError::OversizedModulus(q));
            }
            // Montgomery form needs gcd(q, 2^64) = 1.
            let montgomery: Option<MontgomeryPrecomp<u64>> =
                (q & 1 == 1).then(|| MontgomeryPrecomp::new(q));
            ring_moduli.push(RingModulus {
                q,
                mask: (1u64 << (64 - q.leading_zeros())) - 1,
                barrett: BarrettPrecomp::new(q),
                montgomery,
            });
        }

        Ok(RingContext {
            n,
            moduli: ring_moduli,
        })
    }

    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn num_moduli(&self) -> usize {
        self.moduli.len()
    }

    pub fn modulus_at(&self, i: usize) -> &RingModulus<u64> {
        &self.moduli[i]
    }

    /// Checks every modulus for primality and the congruence
    /// q = 1 mod 2n, then builds the NTT tables.
    /// On failure no table is built and self is left untouched, so the
    /// call can be retried with a different context.
    pub fn validate(&self) -> Result<RingRNS<u64>, ContextError> {
        let two_n: u64 = (self.n << 1) as u64;

        for modulus in self.moduli.iter() {
            if !is_prime(modulus.q) || modulus.q % two_n != 1 {
                return Err(ContextError::NonNttCompatibleModulus(modulus.q));
            }
        }

        Ok(RingRNS(
            self.moduli
                .iter()
                .map(|modulus| Rc::new(Ring::<u64>::new(self.n, modulus.q)))
                .collect(),
        ))
    }
}

impl Ring<u64> {
    /// Returns a validated ring of degree n mod q.
    /// Panics if q is not an NTT-friendly prime for degree n; use
    /// [`RingContext::validate`] for the recoverable path.
    pub fn new(n: usize, q: u64) -> Self {
        let prime: Prime<u64> = Prime::<u64>::new(q);
        Self {
            n,
            modulus: prime.clone(),
            dft: Box::new(Table::<u64>::new(prime, (2 * n) as u64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let context = RingContext::new(1024, &[12289]).unwrap();
        let ring = context.validate().unwrap();
        assert_eq!(ring.n(), 1024);
        assert_eq!(ring.num_moduli(), 1);
        assert_eq!(ring.at(0).modulus.q, 12289);
    }

    #[test]
    fn test_validate_idempotent() {
        let context = RingContext::new(16, &[97]).unwrap();
        assert!(context.validate().is_ok());
        assert!(context.validate().is_ok());
    }

    #[test]
    fn test_invalid_degree() {
        assert_eq!(
            RingContext::new(0, &[12289]).err(),
            Some(ContextError::InvalidDegree(0))
        );
        assert_eq!(
            RingContext::new(1000, &[12289]).err(),
            Some(ContextError::InvalidDegree(1000))
        );
    }

    #[test]
    fn test_empty_basis() {
        assert_eq!(
            RingContext::new(16, &[]).err(),
            Some(ContextError::EmptyModulusList)
        );
    }

    #[test]
    fn test_rejects_composite_modulus() {
        // 4369 = 17 * 257 passes the congruence 4369 = 1 mod 16 but is
        // not prime.
        let context = RingContext::new(8, &[4369]).unwrap();
        assert_eq!(
            context.validate().err(),
            Some(ContextError::NonNttCompatibleModulus(4369))
        );
    }

    #[test]
    fn test_rejects_non_congruent_prime() {
        // 7681 is prime but 7681 mod 2048 != 1.
        let context = RingContext::new(1024, &[7681]).unwrap();
        assert_eq!(
            context.validate().err(),
            Some(ContextError::NonNttCompatibleModulus(7681))
        );
        // The failed context is untouched and a corrected one succeeds.
        assert_eq!(context.modulus_at(0).q, 7681);
        assert!(RingContext::new(1024, &[12289]).unwrap().validate().is_ok());
    }

    #[test]
    fn test_oversized_modulus() {
        let q: u64 = 1 << 62;
        assert_eq!(
            RingContext::new(16, &[q]).err(),
            Some(ContextError::OversizedModulus(q))
        );
        assert_eq!(
            RingContext::new(16, &[u64::MAX]).err(),
            Some(ContextError::OversizedModulus(u64::MAX))
        );
    }

    #[test]
    fn test_even_modulus_has_no_montgomery_precomp() {
        let context = RingContext::new(16, &[1 << 20]).unwrap();
        assert!(context.modulus_at(0).montgomery.is_none());
        assert!(context.validate().is_err());
    }
}
