use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::Montgomery;
use crate::modulus::ReduceOnce;
use crate::modulus::{BARRETT, ONCE, REDUCEMOD};
use crate::poly::{Domain, Form, Poly};
use crate::ring::Ring;
use crate::modulus::WordOps;
use itertools::izip;

impl Ring<u64> {
    #[inline(always)]
    fn debug_assert_shape(&self, a: &Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
    }

    #[inline(always)]
    fn debug_assert_compat(&self, a: &Poly<u64>, b: &Poly<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        debug_assert!(
            a.domain == b.domain && a.form == b.form,
            "operand tags differ: ({:?}, {:?}) vs ({:?}, {:?})",
            a.domain,
            a.form,
            b.domain,
            b.form
        );
    }
}

/// Transforms between the coefficient and evaluation domains.
impl Ring<u64> {
    pub fn ntt_inplace<const LAZY: bool>(&self, a: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        debug_assert!(a.domain == Domain::Coeff, "a is already in the NTT domain");
        match LAZY {
            true => self.dft.forward_inplace_lazy(&mut a.coeffs),
            false => self.dft.forward_inplace(&mut a.coeffs),
        }
        a.domain = Domain::Ntt;
    }

    pub fn intt_inplace<const LAZY: bool>(&self, a: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        debug_assert!(a.domain == Domain::Ntt, "a is not in the NTT domain");
        match LAZY {
            true => self.dft.backward_inplace_lazy(&mut a.coeffs),
            false => self.dft.backward_inplace(&mut a.coeffs),
        }
        a.domain = Domain::Coeff;
    }

    pub fn ntt<const LAZY: bool>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        b.copy_from(a);
        self.ntt_inplace::<LAZY>(b);
    }

    pub fn intt<const LAZY: bool>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        b.copy_from(a);
        self.intt_inplace::<LAZY>(b);
    }
}

/// Coefficient-wise additive operators.
/// The REDUCE parameter picks the output range: ONCE reduces into
/// [0, q) for inputs < q, NONE leaves the sum unreduced.
impl Ring<u64> {
    #[inline(always)]
    pub fn add<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        self.debug_assert_compat(a, b);
        self.debug_assert_shape(c);
        izip!(a.coeffs.iter(), b.coeffs.iter(), c.coeffs.iter_mut()).for_each(|(a, b, c)| {
            *c = a + b;
            self.modulus.barrett.reduce_assign::<REDUCE>(c);
        });
        c.domain = a.domain;
        c.form = a.form;
    }

    #[inline(always)]
    pub fn add_inplace<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        self.debug_assert_compat(a, b);
        izip!(a.coeffs.iter(), b.coeffs.iter_mut()).for_each(|(a, b)| {
            *b += a;
            self.modulus.barrett.reduce_assign::<REDUCE>(b);
        });
    }

    /// c = a - b. Inputs must be < q.
    #[inline(always)]
    pub fn sub<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        self.debug_assert_compat(a, b);
        self.debug_assert_shape(c);
        let q: u64 = self.modulus.q;
        izip!(a.coeffs.iter(), b.coeffs.iter(), c.coeffs.iter_mut()).for_each(|(a, b, c)| {
            *c = a + q - b;
            self.modulus.barrett.reduce_assign::<REDUCE>(c);
        });
        c.domain = a.domain;
        c.form = a.form;
    }

    /// b = a - b. Inputs must be < q.
    #[inline(always)]
    pub fn sub_inplace<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        self.debug_assert_compat(a, b);
        let q: u64 = self.modulus.q;
        izip!(a.coeffs.iter(), b.coeffs.iter_mut()).for_each(|(a, b)| {
            *b = a + q - *b;
            self.modulus.barrett.reduce_assign::<REDUCE>(b);
        });
    }

    /// b = -a. Input must be < q.
    #[inline(always)]
    pub fn neg<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        let q: u64 = self.modulus.q;
        izip!(a.coeffs.iter(), b.coeffs.iter_mut()).for_each(|(a, b)| {
            *b = q - a;
            self.modulus.barrett.reduce_assign::<REDUCE>(b);
        });
        b.domain = a.domain;
        b.form = a.form;
    }

    /// a = -a. Input must be < q.
    #[inline(always)]
    pub fn neg_inplace<const REDUCE: REDUCEMOD>(&self, a: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        let q: u64 = self.modulus.q;
        a.coeffs.iter_mut().for_each(|a| {
            *a = q - *a;
            self.modulus.barrett.reduce_assign::<REDUCE>(a);
        });
    }

    #[inline(always)]
    pub fn add_scalar<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, scalar: u64, b: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        let scalar_red: u64 = self.modulus.barrett.reduce::<BARRETT>(scalar);
        izip!(a.coeffs.iter(), b.coeffs.iter_mut()).for_each(|(a, b)| {
            *b = a + scalar_red;
            self.modulus.barrett.reduce_assign::<REDUCE>(b);
        });
        b.domain = a.domain;
        b.form = a.form;
    }

    #[inline(always)]
    pub fn sub_scalar<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, scalar: u64, b: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        let q: u64 = self.modulus.q;
        let scalar_red: u64 = self.modulus.barrett.reduce::<BARRETT>(scalar);
        izip!(a.coeffs.iter(), b.coeffs.iter_mut()).for_each(|(a, b)| {
            *b = a + q - scalar_red;
            self.modulus.barrett.reduce_assign::<REDUCE>(b);
        });
        b.domain = a.domain;
        b.form = a.form;
    }

    /// b = a * scalar. The scalar is Montgomery-encoded once, so the
    /// loop body is a single Montgomery multiply per coefficient.
    #[inline(always)]
    pub fn mul_scalar<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, scalar: u64, b: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        let scalar_mont: Montgomery<u64> = self
            .modulus
            .montgomery
            .prepare::<ONCE>(self.modulus.barrett.reduce::<BARRETT>(scalar));
        izip!(a.coeffs.iter(), b.coeffs.iter_mut()).for_each(|(a, b)| {
            *b = self.modulus.montgomery.mul_external::<REDUCE>(scalar_mont, *a);
        });
        b.domain = a.domain;
        b.form = a.form;
    }
}

/// Reduction and bitwise utility operators.
impl Ring<u64> {
    /// b = a mod q for arbitrary u64 coefficients.
    #[inline(always)]
    pub fn reduce(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        izip!(a.coeffs.iter(), b.coeffs.iter_mut())
            .for_each(|(a, b)| *b = self.modulus.barrett.reduce::<BARRETT>(*a));
        b.domain = a.domain;
        b.form = a.form;
    }

    #[inline(always)]
    pub fn reduce_inplace(&self, a: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        a.coeffs
            .iter_mut()
            .for_each(|a| self.modulus.barrett.reduce_assign::<BARRETT>(a));
    }

    /// b = a mod m for a small scalar m, unrelated to q.
    #[inline(always)]
    pub fn mod_scalar(&self, a: &Poly<u64>, m: u64, b: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        let barrett: BarrettPrecomp<u64> = BarrettPrecomp::new(m);
        izip!(a.coeffs.iter(), b.coeffs.iter_mut())
            .for_each(|(a, b)| *b = barrett.reduce::<BARRETT>(*a));
        b.domain = a.domain;
        b.form = a.form;
    }

    /// Bitwise masks, not modular.
    #[inline(always)]
    pub fn and_scalar(&self, a: &Poly<u64>, mask: u64, b: &mut Poly<u64>) {
        izip!(a.coeffs.iter(), b.coeffs.iter_mut()).for_each(|(a, b)| *b = a & mask);
        b.domain = a.domain;
        b.form = a.form;
    }

    #[inline(always)]
    pub fn or_scalar(&self, a: &Poly<u64>, mask: u64, b: &mut Poly<u64>) {
        izip!(a.coeffs.iter(), b.coeffs.iter_mut()).for_each(|(a, b)| *b = a | mask);
        b.domain = a.domain;
        b.form = a.form;
    }

    #[inline(always)]
    pub fn xor_scalar(&self, a: &Poly<u64>, mask: u64, b: &mut Poly<u64>) {
        izip!(a.coeffs.iter(), b.coeffs.iter_mut()).for_each(|(a, b)| *b = a ^ mask);
        b.domain = a.domain;
        b.form = a.form;
    }
}

/// Montgomery form conversion and pointwise multiplicative operators.
impl Ring<u64> {
    /// b = a * 2^64 mod q.
    #[inline(always)]
    pub fn mform<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        debug_assert!(a.form == Form::Standard, "a is already in Montgomery form");
        izip!(a.coeffs.iter(), b.coeffs.iter_mut())
            .for_each(|(a, b)| self.modulus.montgomery.prepare_assign::<REDUCE>(*a, b));
        b.domain = a.domain;
        b.form = Form::Montgomery;
    }

    #[inline(always)]
    pub fn mform_inplace<const REDUCE: REDUCEMOD>(&self, a: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        debug_assert!(a.form == Form::Standard, "a is already in Montgomery form");
        a.coeffs.iter_mut().for_each(|a| {
            let v: u64 = *a;
            self.modulus.montgomery.prepare_assign::<REDUCE>(v, a);
        });
        a.form = Form::Montgomery;
    }

    /// b = a * (2^64)^-1 mod q.
    #[inline(always)]
    pub fn inv_mform<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        debug_assert!(a.form == Form::Montgomery, "a is not in Montgomery form");
        izip!(a.coeffs.iter(), b.coeffs.iter_mut())
            .for_each(|(a, b)| self.modulus.montgomery.unprepare_assign::<REDUCE>(*a, b));
        b.domain = a.domain;
        b.form = Form::Standard;
    }

    #[inline(always)]
    pub fn inv_mform_inplace<const REDUCE: REDUCEMOD>(&self, a: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        debug_assert!(a.form == Form::Montgomery, "a is not in Montgomery form");
        a.coeffs.iter_mut().for_each(|a| {
            let v: u64 = *a;
            self.modulus.montgomery.unprepare_assign::<REDUCE>(v, a);
        });
        a.form = Form::Standard;
    }

    /// b = a * 2^k mod q via a Montgomery shift-and-reduce.
    #[inline(always)]
    pub fn mul_by_pow2<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, k: u32, b: &mut Poly<u64>) {
        self.mform::<ONCE>(a, b);
        b.coeffs
            .iter_mut()
            .for_each(|b| *b = self.modulus.montgomery.pow2::<REDUCE>(*b, k));
        b.form = Form::Standard;
    }

    /// c = a * b with a Barrett reduction of the full product.
    /// Both operands in standard form, < q.
    #[inline(always)]
    pub fn mul_coeffs_barrett<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        self.debug_assert_compat(a, b);
        self.debug_assert_shape(c);
        debug_assert!(a.form == Form::Standard);
        izip!(a.coeffs.iter(), b.coeffs.iter(), c.coeffs.iter_mut())
            .for_each(|(a, b, c)| *c = self.modulus.barrett.mul::<REDUCE>(*a, *b));
        c.domain = a.domain;
        c.form = Form::Standard;
    }

    /// c += a * b with a Barrett reduction of the product.
    #[inline(always)]
    pub fn mul_coeffs_barrett_add<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        self.debug_assert_compat(a, b);
        self.debug_assert_shape(c);
        debug_assert!(a.form == Form::Standard);
        izip!(a.coeffs.iter(), b.coeffs.iter(), c.coeffs.iter_mut()).for_each(|(a, b, c)| {
            *c += self.modulus.barrett.mul::<ONCE>(*a, *b);
            self.modulus.barrett.reduce_assign::<REDUCE>(c);
        });
    }

    /// c = a * b * (2^64)^-1 mod q.
    /// At least one operand must be in Montgomery form; the result is
    /// in Montgomery form only if both are.
    #[inline(always)]
    pub fn mul_coeffs_montgomery<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        debug_assert!(a.domain == b.domain);
        debug_assert!(
            a.form == Form::Montgomery || b.form == Form::Montgomery,
            "neither operand is in Montgomery form"
        );
        izip!(a.coeffs.iter(), b.coeffs.iter(), c.coeffs.iter_mut())
            .for_each(|(a, b, c)| *c = self.modulus.montgomery.mul_external::<REDUCE>(*a, *b));
        c.domain = a.domain;
        c.form = if a.form == Form::Montgomery && b.form == Form::Montgomery {
            Form::Montgomery
        } else {
            Form::Standard
        };
    }

    /// c += a * b * (2^64)^-1 mod q.
    #[inline(always)]
    pub fn mul_coeffs_montgomery_add<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        debug_assert!(a.form == Form::Montgomery || b.form == Form::Montgomery);
        izip!(a.coeffs.iter(), b.coeffs.iter(), c.coeffs.iter_mut()).for_each(|(a, b, c)| {
            *c += self.modulus.montgomery.mul_external::<ONCE>(*a, *b);
            self.modulus.barrett.reduce_assign::<REDUCE>(c);
        });
    }

    /// c -= a * b * (2^64)^-1 mod q. c must be < q.
    #[inline(always)]
    pub fn mul_coeffs_montgomery_sub<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        debug_assert!(a.form == Form::Montgomery || b.form == Form::Montgomery);
        let q: u64 = self.modulus.q;
        izip!(a.coeffs.iter(), b.coeffs.iter(), c.coeffs.iter_mut()).for_each(|(a, b, c)| {
            *c += q - self.modulus.montgomery.mul_external::<ONCE>(*a, *b);
            self.modulus.barrett.reduce_assign::<REDUCE>(c);
        });
    }

    /// b = a * v coefficient-wise for a vector v in Montgomery form.
    #[inline(always)]
    pub fn mul_by_vector_montgomery<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        vector: &[Montgomery<u64>],
        b: &mut Poly<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        debug_assert!(vector.len() == self.n());
        izip!(a.coeffs.iter(), vector.iter(), b.coeffs.iter_mut())
            .for_each(|(a, v, b)| *b = self.modulus.montgomery.mul_external::<REDUCE>(*v, *a));
        b.domain = a.domain;
        b.form = a.form;
    }

    /// b += a * v coefficient-wise for a vector v in Montgomery form.
    #[inline(always)]
    pub fn mul_by_vector_montgomery_add<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        vector: &[Montgomery<u64>],
        b: &mut Poly<u64>,
    ) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        debug_assert!(vector.len() == self.n());
        izip!(a.coeffs.iter(), vector.iter(), b.coeffs.iter_mut()).for_each(|(a, v, b)| {
            *b += self.modulus.montgomery.mul_external::<ONCE>(*v, *a);
            self.modulus.barrett.reduce_assign::<REDUCE>(b);
        });
    }
}

/// Negacyclic polynomial multiplication.
impl Ring<u64> {
    /// c = a * b in the ring via forward transforms, a pointwise
    /// Barrett multiply and a backward transform. Operands in
    /// (Coeff, Standard) with coefficients < q.
    pub fn mul_poly(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        let mut a_ntt: Poly<u64> = self.new_poly();
        let mut b_ntt: Poly<u64> = self.new_poly();
        self.ntt::<false>(a, &mut a_ntt);
        self.ntt::<false>(b, &mut b_ntt);
        self.mul_coeffs_barrett::<ONCE>(&a_ntt, &b_ntt, c);
        self.intt_inplace::<false>(c);
    }

    /// c = a * b via pointwise Montgomery multiplies. Exactly one of
    /// the operands must be in Montgomery form, so the result comes
    /// back in standard form.
    pub fn mul_poly_montgomery(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        let mut a_ntt: Poly<u64> = self.new_poly();
        let mut b_ntt: Poly<u64> = self.new_poly();
        self.ntt::<false>(a, &mut a_ntt);
        self.ntt::<false>(b, &mut b_ntt);
        self.mul_coeffs_montgomery::<ONCE>(&a_ntt, &b_ntt, c);
        self.intt_inplace::<false>(c);
    }

    /// c = a * b by schoolbook negacyclic convolution, O(n^2).
    /// Correctness oracle for [`Self::mul_poly`], never a hot path.
    pub fn mul_poly_naive(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        let mut a_mont: Poly<u64> = self.new_poly();
        self.mform::<ONCE>(a, &mut a_mont);
        self.naive_convolution(&a_mont, b, c);
    }

    /// Same as [`Self::mul_poly_naive`] with a already in Montgomery
    /// form, skipping the conversion pass.
    pub fn mul_poly_naive_montgomery(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.form == Form::Montgomery);
        self.naive_convolution(a, b, c);
    }

    fn naive_convolution(&self, a_mont: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        self.debug_assert_shape(a_mont);
        self.debug_assert_shape(b);
        self.debug_assert_shape(c);
        let n: usize = self.n();
        let q: u64 = self.modulus.q;
        c.coeffs.fill(0);
        for i in 0..n {
            let a_i: Montgomery<u64> = a_mont.coeffs[i];
            // wrapped terms pick up a sign flip: X^n = -1
            for j in 0..i {
                let m: u64 = self
                    .modulus
                    .montgomery
                    .mul_external::<ONCE>(a_i, b.coeffs[n - i + j]);
                c.coeffs[j] = (c.coeffs[j] + q - m).reduce_once(q);
            }
            for j in i..n {
                let m: u64 = self
                    .modulus
                    .montgomery
                    .mul_external::<ONCE>(a_i, b.coeffs[j - i]);
                c.coeffs[j] = (c.coeffs[j] + m).reduce_once(q);
            }
        }
        c.domain = Domain::Coeff;
        c.form = Form::Standard;
    }
}

/// Bit-reversal permutation.
impl Ring<u64> {
    /// b = a with coefficient indices bit-reversed.
    pub fn bit_reverse(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        self.debug_assert_shape(b);
        let log_n: u32 = self.log_n() as u32;
        for (i, &v) in a.coeffs.iter().enumerate() {
            b.coeffs[i.reverse_bits_msb(log_n)] = v;
        }
        b.domain = a.domain;
        b.form = a.form;
    }

    /// In-place bit-reversal: swaps pairs only when i < rev(i), so
    /// applying it twice restores the original order.
    pub fn bit_reverse_inplace(&self, a: &mut Poly<u64>) {
        self.debug_assert_shape(a);
        let log_n: u32 = self.log_n() as u32;
        for i in 0..a.n() {
            let j: usize = i.reverse_bits_msb(log_n);
            if i < j {
                a.coeffs.swap(i, j);
            }
        }
    }
}
