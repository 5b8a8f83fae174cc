use crate::dft::DFT;
use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::ReduceOnce;
use crate::modulus::WordOps;
use crate::modulus::{BARRETT, NONE, ONCE};
use itertools::izip;

/// Negacyclic NTT tables for a fixed prime q and ring degree n.
///
/// Powers of the 2n-th primitive root psi are stored in Montgomery form
/// and in bit-reversed order, so both transforms walk them sequentially.
pub struct Table<O> {
    prime: Prime<O>,
    psi: O,
    psi_forward_rev: Vec<Montgomery<O>>,
    psi_backward_rev: Vec<Montgomery<O>>,
    n_inv: Montgomery<O>,
    n_inv_psi: Montgomery<O>,
    q: O,
    two_q: O,
    four_q: O,
}

impl Table<u64> {
    /// Returns NTT tables for the negacyclic ring of degree nth_root/2.
    /// Panics if nth_root is not a power of two or q != 1 mod nth_root.
    pub fn new(prime: Prime<u64>, nth_root: u64) -> Table<u64> {
        assert!(
            nth_root & (nth_root - 1) == 0,
            "invalid argument: nth_root = {} is not a power of two",
            nth_root
        );

        let psi: u64 = prime.primitive_nth_root(nth_root);

        let psi_mont: Montgomery<u64> = prime.montgomery.prepare::<ONCE>(psi);
        let psi_inv_mont: Montgomery<u64> = prime.montgomery.pow(psi_mont, prime.q - 2);

        let n: usize = (nth_root >> 1) as usize;
        let log_n: u32 = n.log2() as u32;

        let mut psi_forward_rev: Vec<Montgomery<u64>> = vec![0; n];
        let mut psi_backward_rev: Vec<Montgomery<u64>> = vec![0; n];

        psi_forward_rev[0] = prime.montgomery.one();
        psi_backward_rev[0] = prime.montgomery.one();

        let mut powers_forward: Montgomery<u64> = prime.montgomery.one();
        let mut powers_backward: Montgomery<u64> = prime.montgomery.one();

        for i in 1..n {
            let i_rev: usize = i.reverse_bits_msb(log_n);

            powers_forward = prime.montgomery.mul_internal::<ONCE>(psi_mont, powers_forward);
            powers_backward = prime
                .montgomery
                .mul_internal::<ONCE>(psi_inv_mont, powers_backward);

            psi_forward_rev[i_rev] = powers_forward;
            psi_backward_rev[i_rev] = powers_backward;
        }

        let n_inv: Montgomery<u64> = prime.montgomery.prepare::<ONCE>(prime.inv(n as u64));
        // degree 1 has no butterfly layer, so the folded constant is unused
        let n_inv_psi: Montgomery<u64> = if n > 1 {
            prime.montgomery.mul_internal::<ONCE>(n_inv, psi_backward_rev[1])
        } else {
            n_inv
        };

        let q: u64 = prime.q;

        Self {
            prime,
            psi,
            psi_forward_rev,
            psi_backward_rev,
            n_inv,
            n_inv_psi,
            q,
            two_q: q << 1,
            four_q: q << 2,
        }
    }

    #[inline(always)]
    pub fn q(&self) -> u64 {
        self.q
    }

    #[inline(always)]
    pub fn psi(&self) -> u64 {
        self.psi
    }

    /// Ring degree the tables were built for.
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.psi_forward_rev.len()
    }
}

impl DFT<u64> for Table<u64> {
    fn forward_inplace(&self, a: &mut [u64]) {
        self.forward_inplace::<false>(a)
    }

    fn forward_inplace_lazy(&self, a: &mut [u64]) {
        self.forward_inplace::<true>(a)
    }

    fn backward_inplace(&self, a: &mut [u64]) {
        self.backward_inplace::<false>(a)
    }

    fn backward_inplace_lazy(&self, a: &mut [u64]) {
        self.backward_inplace::<true>(a)
    }
}

impl Table<u64> {
    /// In-place forward NTT (Cooley-Tukey, decimation in time).
    /// Input coefficients must be < 4q; output is bit-reordered with
    /// values < q, or < 2q when LAZY.
    pub fn forward_inplace<const LAZY: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.n(),
            "invalid a.len() = {}: table was built for n = {}",
            n,
            self.n()
        );
        let log_n: u32 = n.log2() as u32;

        for layer in 0..log_n {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if layer == log_n - 1 {
                if LAZY {
                    izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                        let (a, b) = a.split_at_mut(size);
                        self.dit_inplace::<false>(&mut a[0], &mut b[0], *psi);
                        debug_assert!(a[0] < self.two_q && b[0] < self.two_q);
                    });
                } else {
                    izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                        let (a, b) = a.split_at_mut(size);
                        self.dit_inplace::<true>(&mut a[0], &mut b[0], *psi);
                        self.prime.barrett.reduce_assign::<BARRETT>(&mut a[0]);
                        self.prime.barrett.reduce_assign::<BARRETT>(&mut b[0]);
                        debug_assert!(a[0] < self.q && b[0] < self.q);
                    });
                }
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dit_inplace::<true>(a, b, *psi));
                });
            }
        }
    }

    #[inline(always)]
    fn dit_inplace<const LAZY: bool>(&self, a: &mut u64, b: &mut u64, psi: Montgomery<u64>) {
        debug_assert!(*a < self.four_q, "a:{} 4q:{}", a, self.four_q);
        debug_assert!(*b < self.four_q, "b:{} 4q:{}", b, self.four_q);
        a.reduce_once_assign(self.two_q);
        let bt: u64 = self.prime.montgomery.mul_external::<NONE>(psi, *b);
        *b = *a + self.two_q - bt;
        *a += bt;
        if !LAZY {
            a.reduce_once_assign(self.two_q);
            b.reduce_once_assign(self.two_q);
        }
    }

    /// In-place backward NTT (Gentleman-Sande, decimation in frequency),
    /// folding the n^-1 scaling into the last layer.
    /// Input values must be < 2q; output coefficients are < q, or < 2q
    /// when LAZY.
    pub fn backward_inplace<const LAZY: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.n(),
            "invalid a.len() = {}: table was built for n = {}",
            n,
            self.n()
        );
        let log_n: u32 = n.log2() as u32;

        for layer in (0..log_n).rev() {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if layer == 0 {
                izip!(a.chunks_exact_mut(t)).for_each(|a| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dif_last_inplace::<LAZY>(a, b));
                });
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dif_inplace(a, b, *psi));
                });
            }
        }
    }

    #[inline(always)]
    fn dif_inplace(&self, a: &mut u64, b: &mut u64, psi: Montgomery<u64>) {
        debug_assert!(*a < self.two_q, "a:{} 2q:{}", a, self.two_q);
        debug_assert!(*b < self.two_q, "b:{} 2q:{}", b, self.two_q);
        let d: u64 = self
            .prime
            .montgomery
            .mul_external::<NONE>(psi, *a + self.two_q - *b);
        *a += *b;
        a.reduce_once_assign(self.two_q);
        *b = d;
    }

    #[inline(always)]
    fn dif_last_inplace<const LAZY: bool>(&self, a: &mut u64, b: &mut u64) {
        debug_assert!(*a < self.two_q);
        debug_assert!(*b < self.two_q);
        if LAZY {
            let d: u64 = self
                .prime
                .montgomery
                .mul_external::<NONE>(self.n_inv_psi, *a + self.two_q - *b);
            *a = self.prime.montgomery.mul_external::<NONE>(self.n_inv, *a + *b);
            *b = d;
        } else {
            let d: u64 = self
                .prime
                .montgomery
                .mul_external::<ONCE>(self.n_inv_psi, *a + self.two_q - *b);
            *a = self.prime.montgomery.mul_external::<ONCE>(self.n_inv, *a + *b);
            *b = d;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_backward_identity() {
        let q: u64 = 0x800000000004001;
        let prime_instance: Prime<u64> = Prime::<u64>::new(q);
        let n: u64 = 32;
        let two_nth_root: u64 = n << 1;
        let table: Table<u64> = Table::<u64>::new(prime_instance, two_nth_root);
        let mut a: Vec<u64> = vec![0; n as usize];
        for (i, a_i) in a.iter_mut().enumerate() {
            *a_i = i as u64;
        }

        let b: Vec<u64> = a.clone();
        table.forward_inplace::<false>(&mut a);
        table.backward_inplace::<false>(&mut a);
        assert_eq!(a, b);
    }

    #[test]
    fn test_forward_negacyclic_convolution() {
        // (1 + X) * (1 + X) = 1 + 2X + X^2 via pointwise products
        let q: u64 = 12289;
        let n: usize = 8;
        let table: Table<u64> = Table::<u64>::new(Prime::<u64>::new(q), (n as u64) << 1);

        let mut a: Vec<u64> = vec![0; n];
        a[0] = 1;
        a[1] = 1;
        table.forward_inplace::<false>(&mut a);

        let mut c: Vec<u64> = a
            .iter()
            .map(|&v| (v as u128 * v as u128 % q as u128) as u64)
            .collect();
        table.backward_inplace::<false>(&mut c);

        let mut want: Vec<u64> = vec![0; n];
        want[0] = 1;
        want[1] = 2;
        want[2] = 1;
        assert_eq!(c, want);
    }

    #[test]
    fn test_lazy_output_range() {
        let q: u64 = 12289;
        let n: usize = 32;
        let table: Table<u64> = Table::<u64>::new(Prime::<u64>::new(q), (n as u64) << 1);
        let mut a: Vec<u64> = (0..n as u64).collect();
        table.forward_inplace::<true>(&mut a);
        assert!(a.iter().all(|&v| v < 2 * q));
        table.backward_inplace::<true>(&mut a);
        assert!(a.iter().all(|&v| v < 2 * q));
    }

    #[test]
    fn test_lazy_forward_strict_backward_roundtrip() {
        let q: u64 = 12289;
        let n: usize = 32;
        let table: Table<u64> = Table::<u64>::new(Prime::<u64>::new(q), (n as u64) << 1);
        let want: Vec<u64> = (0..n as u64).collect();
        let mut a: Vec<u64> = want.clone();
        table.forward_inplace::<true>(&mut a);
        table.backward_inplace::<false>(&mut a);
        assert_eq!(a, want);
    }
}
