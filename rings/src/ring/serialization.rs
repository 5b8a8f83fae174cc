use crate::modulus::WordOps;
use crate::poly::serialization::SerializationError;
use crate::ring::RingContext;

const HEADER_LEN: usize = 2;
const MAX_LOG_N: u8 = 26;

impl RingContext {
    /// Number of bytes [`Self::to_bytes`] produces.
    pub fn byte_len(&self) -> usize {
        HEADER_LEN + self.num_moduli() * 8
    }

    /// Encodes the context parameters as [log2(n), num_moduli] followed
    /// by each modulus as a big-endian u64 word. Derived constants are
    /// not serialized; the decoder recomputes them.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        if self.num_moduli() > 255 {
            return Err(SerializationError::TooManyModuli(self.num_moduli()));
        }

        let mut bytes: Vec<u8> = Vec::with_capacity(self.byte_len());
        bytes.push(self.n().log2() as u8);
        bytes.push(self.num_moduli() as u8);
        for i in 0..self.num_moduli() {
            bytes.extend_from_slice(&self.modulus_at(i).q.to_be_bytes());
        }
        Ok(bytes)
    }

    /// Decodes a context from the layout produced by [`Self::to_bytes`],
    /// rebuilding all derived constants. The buffer is validated against
    /// the header before the context is constructed.
    pub fn from_bytes(bytes: &[u8]) -> Result<RingContext, SerializationError> {
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

        let expected: usize = HEADER_LEN + num_moduli * 8;
        if bytes.len() != expected {
            return Err(SerializationError::SizeMismatch {
                expected,
                got: bytes.len(),
            });
        }

        let moduli: Vec<u64> = bytes[HEADER_LEN..]
            .chunks_exact(8)
            .map(|word| u64::from_be_bytes(word.try_into().unwrap()))
            .collect();
        Ok(RingContext::new(1 << log_n, &moduli)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::ContextError;

    #[test]
    fn test_roundtrip() {
        let a: RingContext = RingContext::new(16, &[97, 193]).unwrap();
        let bytes: Vec<u8> = a.to_bytes().unwrap();
        assert_eq!(bytes.len(), a.byte_len());
        let b: RingContext = RingContext::from_bytes(&bytes).unwrap();
        assert_eq!(b.n(), a.n());
        assert_eq!(b.num_moduli(), a.num_moduli());
        for i in 0..a.num_moduli() {
            assert_eq!(b.modulus_at(i).q, a.modulus_at(i).q);
        }
        assert!(b.validate().is_ok());
    }

    #[test]
    fn test_size_mismatch() {
        let a: RingContext = RingContext::new(16, &[97]).unwrap();
        let mut bytes: Vec<u8> = a.to_bytes().unwrap();
        bytes.pop();
        assert_eq!(
            RingContext::from_bytes(&bytes).err(),
            Some(SerializationError::SizeMismatch {
                expected: 2 + 8,
                got: 2 + 8 - 1,
            })
        );
    }

    #[test]
    fn test_invalid_degree() {
        assert_eq!(
            RingContext::from_bytes(&[63, 1]).err(),
            Some(SerializationError::InvalidDegree(63))
        );
    }

    #[test]
    fn test_rejects_bad_modulus() {
        let mut bytes: Vec<u8> = vec![4, 1];
        bytes.extend_from_slice(&1u64.to_be_bytes());
        assert_eq!(
            RingContext::from_bytes(&bytes).err(),
            Some(SerializationError::InvalidContext(
                ContextError::NonNttCompatibleModulus(1)
            ))
        );
    }
}
