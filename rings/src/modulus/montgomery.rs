use crate::modulus::barrett::BarrettPrecomp;

/// Marker alias for values in Montgomery form (a * 2^64 mod q).
/// Kept as a plain alias: the form of a full polynomial is tracked by
/// its [`crate::poly::Form`] tag rather than at the scalar type level.
pub type Montgomery<O> = O;

/// Precomputed constants for Montgomery arithmetic mod q.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MontgomeryPrecomp<O> {
    pub(crate) q: O,
    pub(crate) two_q: O,
    pub(crate) four_q: O,
    pub(crate) barrett: BarrettPrecomp<O>,
    pub(crate) q_inv: O,
    pub(crate) one: Montgomery<O>,
    pub(crate) minus_one: Montgomery<O>,
}
