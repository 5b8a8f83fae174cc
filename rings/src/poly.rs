pub mod serialization;

use std::cmp::PartialEq;

/// Representation domain of a polynomial's coefficient slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Domain {
    /// Coefficients of powers of X.
    #[default]
    Coeff,
    /// Pointwise evaluations at the roots of X^n + 1 (bit-reversed order).
    Ntt,
}

/// Scalar encoding of a polynomial's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Form {
    #[default]
    Standard,
    /// Values scaled by 2^64 mod q.
    Montgomery,
}

/// Dense polynomial over a single modulus, tagged with its current
/// domain and scalar form so operators can check operand compatibility
/// in debug builds.
#[derive(Clone, Debug, Eq)]
pub struct Poly<O> {
    pub coeffs: Vec<O>,
    pub domain: Domain,
    pub form: Form,
}

impl<O> Poly<O>
where
    O: Default + Clone + Copy,
{
    /// Returns a zero polynomial of degree n in (Coeff, Standard).
    pub fn new(n: usize) -> Self {
        Self {
            coeffs: vec![O::default(); n],
            domain: Domain::Coeff,
            form: Form::Standard,
        }
    }

    #[inline(always)]
    pub fn n(&self) -> usize {
        self.coeffs.len()
    }

    #[inline(always)]
    pub fn log_n(&self) -> usize {
        (usize::BITS - (self.coeffs.len() - 1).leading_zeros()) as usize
    }

    pub fn set_all(&mut self, v: &O) {
        self.coeffs.fill(*v)
    }

    /// Resets to the zero polynomial in (Coeff, Standard).
    pub fn zero(&mut self) {
        self.set_all(&O::default());
        self.domain = Domain::Coeff;
        self.form = Form::Standard;
    }

    /// Copies coefficients and tags from other.
    pub fn copy_from(&mut self, other: &Poly<O>) {
        if std::ptr::eq(self, other) {
            return;
        }
        self.coeffs.resize(other.n(), O::default());
        self.coeffs.copy_from_slice(&other.coeffs);
        self.domain = other.domain;
        self.form = other.form;
    }
}

impl<O: PartialEq> PartialEq for Poly<O> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.domain == other.domain && self.form == other.form && self.coeffs == other.coeffs)
    }
}

/// Polynomial in residue-number-system representation: one [`Poly`]
/// per modulus of the basis, all of the same degree.
#[derive(Clone, Debug, Eq)]
pub struct PolyRNS<O>(pub Vec<Poly<O>>);

impl<O> PolyRNS<O>
where
    O: Default + Clone + Copy,
{
    /// Returns a zero polynomial of degree n over num_moduli residues.
    pub fn new(n: usize, num_moduli: usize) -> Self {
        assert!(num_moduli > 0, "invalid argument: num_moduli = 0");
        Self((0..num_moduli).map(|_| Poly::new(n)).collect())
    }

    #[inline(always)]
    pub fn n(&self) -> usize {
        self.0[0].n()
    }

    #[inline(always)]
    pub fn log_n(&self) -> usize {
        self.0[0].log_n()
    }

    #[inline(always)]
    pub fn num_moduli(&self) -> usize {
        self.0.len()
    }

    /// Domain tag, identical across residues.
    pub fn domain(&self) -> Domain {
        debug_assert!(self.0.iter().all(|p| p.domain == self.0[0].domain));
        self.0[0].domain
    }

    /// Form tag, identical across residues.
    pub fn form(&self) -> Form {
        debug_assert!(self.0.iter().all(|p| p.form == self.0[0].form));
        self.0[0].form
    }

    pub fn at(&self, i: usize) -> &Poly<O> {
        assert!(
            i < self.num_moduli(),
            "invalid argument i: i={} >= num_moduli={}",
            i,
            self.num_moduli()
        );
        &self.0[i]
    }

    pub fn at_mut(&mut self, i: usize) -> &mut Poly<O> {
        assert!(
            i < self.num_moduli(),
            "invalid argument i: i={} >= num_moduli={}",
            i,
            self.num_moduli()
        );
        &mut self.0[i]
    }

    pub fn set_all(&mut self, v: &O) {
        self.0.iter_mut().for_each(|p| p.set_all(v))
    }

    pub fn zero(&mut self) {
        self.0.iter_mut().for_each(|p| p.zero())
    }

    pub fn copy_from(&mut self, other: &PolyRNS<O>) {
        if std::ptr::eq(self, other) {
            return;
        }
        self.0.resize(other.num_moduli(), Poly::new(other.n()));
        (0..other.num_moduli()).for_each(|i| self.0[i].copy_from(other.at(i)))
    }
}

impl<O: PartialEq> PartialEq for PolyRNS<O> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || (self.0 == other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tags() {
        let p: Poly<u64> = Poly::new(16);
        assert_eq!(p.n(), 16);
        assert_eq!(p.log_n(), 4);
        assert_eq!(p.domain, Domain::Coeff);
        assert_eq!(p.form, Form::Standard);
    }

    #[test]
    fn test_copy_from_propagates_tags() {
        let mut a: Poly<u64> = Poly::new(8);
        a.domain = Domain::Ntt;
        a.form = Form::Montgomery;
        a.coeffs[3] = 42;
        let mut b: Poly<u64> = Poly::new(8);
        b.copy_from(&a);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rns_accessors() {
        let p: PolyRNS<u64> = PolyRNS::new(32, 3);
        assert_eq!(p.n(), 32);
        assert_eq!(p.num_moduli(), 3);
        assert_eq!(p.domain(), Domain::Coeff);
        assert_eq!(p.form(), Form::Standard);
    }
}
