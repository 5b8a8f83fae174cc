use crate::poly::{Domain, Form, PolyRNS};
use crate::ring::ContextError;
use thiserror::Error;

/// Errors returned when encoding or decoding a [`PolyRNS`] or a
/// [`crate::ring::RingContext`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerializationError {
    #[error("buffer size mismatch: expected {expected} bytes, got {got}")]
    SizeMismatch { expected: usize, got: usize },
    #[error("serialized degree 2^{0} exceeds the supported range")]
    InvalidDegree(u8),
    #[error("basis has {0} moduli, maximum is 255")]
    TooManyModuli(usize),
    #[error("serialized basis is empty")]
    EmptyBasis,
    #[error(transparent)]
    InvalidContext(#[from] ContextError),
}

const HEADER_LEN: usize = 2;
const MAX_LOG_N: u8 = 26;

impl PolyRNS<u64> {
    /// Number of bytes [`Self::to_bytes`] produces.
    pub fn byte_len(&self) -> usize {
        HEADER_LEN + self.num_moduli() * self.n() * 8
    }

    /// Encodes self as [log2(n), num_moduli] followed by each residue
    /// polynomial's coefficients as big-endian u64 words.
    /// Self must be in the (Coeff, Standard) representation.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        debug_assert!(self.domain() == Domain::Coeff && self.form() == Form::Standard);

        if self.num_moduli() > 255 {
            return Err(SerializationError::TooManyModuli(self.num_moduli()));
        }

        let mut bytes: Vec<u8> = Vec::with_capacity(self.byte_len());
        bytes.push(self.log_n() as u8);
        bytes.push(self.num_moduli() as u8);
        for i in 0..self.num_moduli() {
            for coeff in self.at(i).coeffs.iter() {
                bytes.extend_from_slice(&coeff.to_be_bytes());
            }
        }
        Ok(bytes)
    }

    /// Decodes a [`PolyRNS`] from the layout produced by [`Self::to_bytes`].
    /// The whole buffer is validated against the header before any
    /// allocation, so no partially-decoded value can be observed.
    pub fn from_bytes(bytes: &[u8]) -> Result<PolyRNS<u64>, SerializationError> {
        if bytes.len() < HEADER_LEN {
            return Err(SerializationError::SizeMismatch {
                expected: HEADER_LEN,
                got: bytes.len(),
            });
        }

        let log_n: u8 = bytes[0];
        if log_n > MAX_LOG_N {
            return Err(SerializationError::InvalidDegree(log_n));
        }
        let num_moduli: usize = bytes[1] as usize;
        if num_moduli == 0 {
            return Err(SerializationError::EmptyBasis);
        }

        let n: usize = 1 << log_n;
        let expected: usize = HEADER_LEN + num_moduli * n * 8;
        if bytes.len() != expected {
            return Err(SerializationError::SizeMismatch {
                expected,
                got: bytes.len(),
            });
        }

        let mut poly: PolyRNS<u64> = PolyRNS::new(n, num_moduli);
        for (i, residue) in bytes[HEADER_LEN..].chunks_exact(n * 8).enumerate() {
            for (coeff, word) in poly.at_mut(i).coeffs.iter_mut().zip(residue.chunks_exact(8)) {
                *coeff = u64::from_be_bytes(word.try_into().unwrap());
            }
        }
        Ok(poly)
    }
}
