use crate::modulus::REDUCEMOD;
use crate::poly::PolyRNS;
use crate::ring::RingRNS;
use itertools::izip;

/// RNS-level operators: each delegates to the per-modulus ring on the
/// matching residue polynomial.
impl RingRNS<u64> {
    #[inline(always)]
    fn debug_assert_shape(&self, a: &PolyRNS<u64>) {
        debug_assert!(
            a.num_moduli() == self.num_moduli(),
            "a.num_moduli()={} != num_moduli={}",
            a.num_moduli(),
            self.num_moduli()
        );
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
    }

    pub fn ntt_inplace<const LAZY: bool>(&self, a: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        izip!(self.0.iter(), a.0.iter_mut()).for_each(|(r, a)| r.ntt_inplace::<LAZY>(a));
    }

    pub fn intt_inplace<const LAZY: bool>(&self, a: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        izip!(self.0.iter(), a.0.iter_mut()).for_each(|(r, a)| r.intt_inplace::<LAZY>(a));
    }

    pub fn ntt<const LAZY: bool>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut()).for_each(|(r, a, b)| r.ntt::<LAZY>(a, b));
    }

    pub fn intt<const LAZY: bool>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut()).for_each(|(r, a, b)| r.intt::<LAZY>(a, b));
    }

    pub fn add<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        izip!(self.0.iter(), a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(r, a, b, c)| r.add::<REDUCE>(a, b, c));
    }

    pub fn add_inplace<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut())
            .for_each(|(r, a, b)| r.add_inplace::<REDUCE>(a, b));
    }

    pub fn sub<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        izip!(self.0.iter(), a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(r, a, b, c)| r.sub::<REDUCE>(a, b, c));
    }

    pub fn neg<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut()).for_each(|(r, a, b)| r.neg::<REDUCE>(a, b));
    }

    pub fn neg_inplace<const REDUCE: REDUCEMOD>(&self, a: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        izip!(self.0.iter(), a.0.iter_mut()).for_each(|(r, a)| r.neg_inplace::<REDUCE>(a));
    }

    pub fn add_scalar<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        scalar: u64,
        b: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut())
            .for_each(|(r, a, b)| r.add_scalar::<REDUCE>(a, scalar, b));
    }

    pub fn sub_scalar<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        scalar: u64,
        b: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut())
            .for_each(|(r, a, b)| r.sub_scalar::<REDUCE>(a, scalar, b));
    }

    pub fn mul_scalar<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        scalar: u64,
        b: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut())
            .for_each(|(r, a, b)| r.mul_scalar::<REDUCE>(a, scalar, b));
    }

    pub fn reduce(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut()).for_each(|(r, a, b)| r.reduce(a, b));
    }

    pub fn reduce_inplace(&self, a: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        izip!(self.0.iter(), a.0.iter_mut()).for_each(|(r, a)| r.reduce_inplace(a));
    }

    pub fn mod_scalar(&self, a: &PolyRNS<u64>, m: u64, b: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut()).for_each(|(r, a, b)| r.mod_scalar(a, m, b));
    }

    pub fn and_scalar(&self, a: &PolyRNS<u64>, mask: u64, b: &mut PolyRNS<u64>) {
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut())
            .for_each(|(r, a, b)| r.and_scalar(a, mask, b));
    }

    pub fn or_scalar(&self, a: &PolyRNS<u64>, mask: u64, b: &mut PolyRNS<u64>) {
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut())
            .for_each(|(r, a, b)| r.or_scalar(a, mask, b));
    }

    pub fn xor_scalar(&self, a: &PolyRNS<u64>, mask: u64, b: &mut PolyRNS<u64>) {
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut())
            .for_each(|(r, a, b)| r.xor_scalar(a, mask, b));
    }

    pub fn mform<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut())
            .for_each(|(r, a, b)| r.mform::<REDUCE>(a, b));
    }

    pub fn mform_inplace<const REDUCE: REDUCEMOD>(&self, a: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        izip!(self.0.iter(), a.0.iter_mut()).for_each(|(r, a)| r.mform_inplace::<REDUCE>(a));
    }

    pub fn inv_mform<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut())
            .for_each(|(r, a, b)| r.inv_mform::<REDUCE>(a, b));
    }

    pub fn inv_mform_inplace<const REDUCE: REDUCEMOD>(&self, a: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        izip!(self.0.iter(), a.0.iter_mut()).for_each(|(r, a)| r.inv_mform_inplace::<REDUCE>(a));
    }

    pub fn mul_by_pow2<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        k: u32,
        b: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut())
            .for_each(|(r, a, b)| r.mul_by_pow2::<REDUCE>(a, k, b));
    }

    pub fn mul_coeffs_barrett<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        izip!(self.0.iter(), a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(r, a, b, c)| r.mul_coeffs_barrett::<REDUCE>(a, b, c));
    }

    pub fn mul_coeffs_montgomery<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        izip!(self.0.iter(), a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(r, a, b, c)| r.mul_coeffs_montgomery::<REDUCE>(a, b, c));
    }

    pub fn mul_coeffs_montgomery_add<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        izip!(self.0.iter(), a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(r, a, b, c)| r.mul_coeffs_montgomery_add::<REDUCE>(a, b, c));
    }

    pub fn mul_coeffs_montgomery_sub<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        izip!(self.0.iter(), a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(r, a, b, c)| r.mul_coeffs_montgomery_sub::<REDUCE>(a, b, c));
    }

    /// c = a * b in the ring, transform-based, per modulus.
    pub fn mul_poly(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        izip!(self.0.iter(), a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(r, a, b, c)| r.mul_poly(a, b, c));
    }

    /// c = a * b with exactly one operand in Montgomery form.
    pub fn mul_poly_montgomery(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        izip!(self.0.iter(), a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(r, a, b, c)| r.mul_poly_montgomery(a, b, c));
    }

    /// Schoolbook negacyclic convolution per modulus, the correctness
    /// oracle for [`Self::mul_poly`].
    pub fn mul_poly_naive(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        izip!(self.0.iter(), a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(r, a, b, c)| r.mul_poly_naive(a, b, c));
    }

    pub fn mul_poly_naive_montgomery(
        &self,
        a: &PolyRNS<u64>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        izip!(self.0.iter(), a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(r, a, b, c)| r.mul_poly_naive_montgomery(a, b, c));
    }

    pub fn bit_reverse(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(self.0.iter(), a.0.iter(), b.0.iter_mut()).for_each(|(r, a, b)| r.bit_reverse(a, b));
    }

    pub fn bit_reverse_inplace(&self, a: &mut PolyRNS<u64>) {
        self.debug_assert_shape(a);
        izip!(self.0.iter(), a.0.iter_mut()).for_each(|(r, a)| r.bit_reverse_inplace(a));
    }
}
