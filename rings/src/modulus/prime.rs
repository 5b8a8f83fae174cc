use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::MontgomeryPrecomp;

/// A validated NTT-friendly prime modulus with its reduction constants
/// and the distinct prime factors of q-1 (for primitive-root search).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prime<O> {
    pub q: O,
    pub two_q: O,
    pub four_q: O,
    pub mask: O,
    /// distinct prime factors of q-1
    pub factors: Vec<O>,
    pub montgomery: MontgomeryPrecomp<O>,
    pub barrett: BarrettPrecomp<O>,
}
