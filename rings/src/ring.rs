pub mod impl_u64;
pub mod serialization;

use crate::dft::DFT;
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::MontgomeryPrecomp;
use crate::modulus::prime::Prime;
use crate::modulus::WordOps;
use crate::poly::{Poly, PolyRNS};
use std::rc::Rc;
use thiserror::Error;

/// Errors surfaced when building or validating a ring context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("invalid ring degree {0}: must be a nonzero power of two")]
    InvalidDegree(usize),
    #[error("empty modulus list")]
    EmptyModulusList,
    #[error("modulus {0} is not NTT-compatible: not prime or not 1 mod 2n")]
    NonNttCompatibleModulus(u64),
    #[error("modulus {0} exceeds the supported word size")]
    OversizedModulus(u64),
}

/// Reduction constants for one modulus of an unvalidated context.
/// Montgomery constants exist only for odd moduli; Barrett constants
/// and the sampling mask are always present.
#[derive(Clone, Debug)]
pub struct RingModulus<O> {
    pub q: O,
    pub mask: O,
    pub barrett: BarrettPrecomp<O>,
    pub montgomery: Option<MontgomeryPrecomp<O>>,
}

/// Degree and basis request with structural constants derived, but no
/// NTT state: the moduli have not been checked for primality or
/// NTT-compatibility. Call [`RingContext::validate`] to obtain a
/// [`RingRNS`] on which transforms are available.
#[derive(Clone, Debug)]
pub struct RingContext {
    n: usize,
    moduli: Vec<RingModulus<u64>>,
}

/// Validated single-modulus ring of degree n with its NTT engine.
pub struct Ring<O> {
    pub n: usize,
    pub modulus: Prime<O>,
    pub dft: Box<dyn DFT<O>>,
}

impl<O> Ring<O> {
    pub fn log_n(&self) -> usize {
        self.n().log2()
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

impl Ring<u64> {
    pub fn new_poly(&self) -> Poly<u64> {
        Poly::<u64>::new(self.n())
    }
}

/// Validated RNS ring: one [`Ring`] per modulus of the basis, all of
/// the same degree. Obtained from [`RingContext::validate`].
pub struct RingRNS<O>(pub Vec<Rc<Ring<O>>>);

impl<O> RingRNS<O> {
    pub fn log_n(&self) -> usize {
        self.n().log2()
    }

    pub fn n(&self) -> usize {
        self.0[0].n()
    }

    pub fn num_moduli(&self) -> usize {
        self.0.len()
    }

    pub fn at(&self, i: usize) -> &Ring<O> {
        &self.0[i]
    }

    /// Returns the subring spanning the first num_moduli moduli.
    pub fn at_basis(&self, num_moduli: usize) -> RingRNS<O> {
        assert!(num_moduli <= self.0.len());
        RingRNS(self.0[..num_moduli].to_vec())
    }
}

impl RingRNS<u64> {
    pub fn new_polyrns(&self) -> PolyRNS<u64> {
        PolyRNS::<u64>::new(self.n(), self.num_moduli())
    }

    pub fn new_poly(&self) -> Poly<u64> {
        Poly::<u64>::new(self.n())
    }
}
