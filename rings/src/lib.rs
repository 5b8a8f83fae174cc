//! RNS-accelerated modular arithmetic for polynomials in Z_Q[X]/(X^N+1),
//! where Q is a product of word-sized NTT-friendly primes: Montgomery and
//! Barrett scalar kernels, per-modulus NTT tables, coefficient-wise
//! operators, uniform/ternary/Gaussian sampling and binary serialization.

pub mod dft;
pub mod modulus;
pub mod poly;
pub mod ring;
