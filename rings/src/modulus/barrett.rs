/// Precomputed two-word reciprocal floor(2^128/q) enabling modular
/// reduction of values and 128-bit products without division.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarrettPrecomp<O> {
    pub(crate) q: O,
    pub(crate) lo: O,
    pub(crate) hi: O,
}

impl<O> BarrettPrecomp<O> {
    #[inline(always)]
    pub fn value_lo(&self) -> &O {
        &self.lo
    }

    #[inline(always)]
    pub fn value_hi(&self) -> &O {
        &self.hi
    }
}
