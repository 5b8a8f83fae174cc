pub mod ntt;

/// In-place negacyclic transform between coefficient and evaluation domains.
///
/// The lazy variants leave outputs in [0, 2q-1] and skip the final
/// reduction layer, for callers that chain further lazy operations.
pub trait DFT<O>: Send + Sync {
    fn forward_inplace(&self, x: &mut [O]);
    fn forward_inplace_lazy(&self, x: &mut [O]);
    fn backward_inplace(&self, x: &mut [O]);
    fn backward_inplace_lazy(&self, x: &mut [O]);
}
