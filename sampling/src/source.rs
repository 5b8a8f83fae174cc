use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_core::{OsRng, RngCore, TryRngCore};
use thiserror::Error;

const MAXF64: f64 = 9007199254740992.0;

/// Raised when the OS entropy source cannot produce a seed.
/// Sampling never falls back to a weaker source; the caller decides
/// whether this is fatal for the application.
#[derive(Debug, Error)]
#[error("entropy source unavailable: {0}")]
pub struct EntropyError(#[from] rand_core::OsError);

/// Deterministic CSPRNG stream, seedable and branchable.
pub struct Source {
    source: ChaCha8Rng,
}

/// Draws a fresh 32-byte seed from the OS entropy source.
pub fn new_seed() -> Result<[u8; 32], EntropyError> {
    let mut seed = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    Ok(seed)
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Returns a new Source seeded from the OS entropy source.
    pub fn from_entropy() -> Result<Source, EntropyError> {
        Ok(Source::new(new_seed()?))
    }

    /// Derives a new seed from the current stream.
    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.source.fill_bytes(&mut seed);
        seed
    }

    /// Forks an independent Source off the current stream.
    pub fn branch(&mut self) -> Self {
        Source::new(self.new_seed())
    }

    /// Returns a uniform value in [0, max) by masked rejection.
    /// mask must be the smallest 2^k-1 >= max-1; the rejection rate is
    /// then below 1/2 per draw and the output is exactly uniform.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    #[inline(always)]
    pub fn next_f64(&mut self, min: f64, max: f64) -> f64 {
        min + ((self.next_u64() << 11 >> 11) as f64) / MAXF64 * (max - min)
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_u64n_range() {
        let mut source = Source::new([0u8; 32]);
        let max: u64 = 12289;
        let mask: u64 = 16383;
        for _ in 0..10000 {
            assert!(source.next_u64n(max, mask) < max);
        }
    }

    #[test]
    fn test_branch_deterministic() {
        let mut a = Source::new([1u8; 32]);
        let mut b = Source::new([1u8; 32]);
        let mut a2 = a.branch();
        let mut b2 = b.branch();
        assert_eq!(a2.next_u64(), b2.next_u64());
    }
}
