use crate::modulus::WordOps;
use crate::poly::{Poly, PolyRNS};
use crate::ring::{Ring, RingRNS};
use rand_distr::{Distribution, Normal};
use sampling::source::Source;

impl Ring<u64> {
    /// Fills a with coefficients drawn uniformly from [0, q) by masked
    /// rejection sampling, so small moduli are not biased.
    pub fn fill_uniform(&self, source: &mut Source, a: &mut Poly<u64>) {
        let max: u64 = self.modulus.q;
        let mask: u64 = self.modulus.mask;
        a.coeffs
            .iter_mut()
            .for_each(|a| *a = source.next_u64n(max, mask));
    }

    /// Fills a with ternary coefficients {-1, 0, 1} mod q.
    pub fn fill_ternary(&self, source: &mut Source, a: &mut Poly<u64>) {
        let q: u64 = self.modulus.q;
        a.coeffs.iter_mut().for_each(|a| {
            *a = match source.next_u64n(3, 3u64.mask()) {
                0 => 0,
                1 => 1,
                _ => q - 1,
            }
        });
    }

    /// Fills a with discrete-gaussian coefficients of standard
    /// deviation sigma, resampling any draw whose magnitude exceeds
    /// bound. Negative draws map to [q-bound, q).
    pub fn fill_normal(&self, source: &mut Source, sigma: f64, bound: f64, a: &mut Poly<u64>) {
        let q: u64 = self.modulus.q;
        let normal: Normal<f64> = Normal::new(0.0, sigma).unwrap();
        a.coeffs.iter_mut().for_each(|a| {
            let mut v: f64 = normal.sample(&mut *source);
            while v.abs() > bound {
                v = normal.sample(&mut *source);
            }
            let v: i64 = v.round() as i64;
            *a = if v < 0 { q - v.unsigned_abs() } else { v as u64 };
        });
    }
}

impl Ring<u64> {
    pub fn new_uniform_poly(&self, source: &mut Source) -> Poly<u64> {
        let mut a: Poly<u64> = self.new_poly();
        self.fill_uniform(source, &mut a);
        a
    }
}

impl RingRNS<u64> {
    pub fn fill_uniform(&self, source: &mut Source, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, r)| r.fill_uniform(source, a.at_mut(i)));
    }

    pub fn fill_ternary(&self, source: &mut Source, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, r)| r.fill_ternary(source, a.at_mut(i)));
    }

    pub fn fill_normal(&self, source: &mut Source, sigma: f64, bound: f64, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, r)| r.fill_normal(source, sigma, bound, a.at_mut(i)));
    }

    pub fn new_uniform_polyrns(&self, source: &mut Source) -> PolyRNS<u64> {
        let mut a: PolyRNS<u64> = self.new_polyrns();
        self.fill_uniform(source, &mut a);
        a
    }
}
