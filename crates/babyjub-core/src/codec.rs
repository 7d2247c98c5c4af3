//! Byte encoding helpers shared by the curve, signature and hash modules

use crate::errors::{CryptoError, Field, Operation, Result};
use crate::field::Fr;
use num_bigint::BigUint;

/// Bytes per sponge chunk: 31 bytes always fit strictly below Q₁.
pub const SPONGE_CHUNK_SIZE: usize = 31;

/// Reverse byte order (big-endian <-> little-endian)
pub fn swap_endianness(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().rev().copied().collect()
}

/// Encode an integer as exactly `N` little-endian bytes.
/// Fails with a length error if the integer does not fit.
pub fn biguint_to_le_bytes<const N: usize>(value: &BigUint) -> Result<[u8; N]> {
    let bytes = value.to_bytes_le();
    // to_bytes_le() yields [0] for zero
    let len = if value.bits() == 0 { 0 } else { bytes.len() };
    if len > N {
        return Err(CryptoError::InvalidLength {
            expected: N,
            actual: len,
        });
    }
    let mut out = [0u8; N];
    out[..len].copy_from_slice(&bytes[..len]);
    Ok(out)
}

pub fn le_bytes_to_biguint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// Encode an integer below Q₁ as 32 little-endian bytes
pub fn field_to_le_bytes(value: &BigUint, op: Operation) -> Result<[u8; 32]> {
    if value >= crate::constants::q1() {
        return Err(CryptoError::Range {
            field: Field::Q1,
            op,
        });
    }
    biguint_to_le_bytes::<32>(value)
}

/// Split a message into 31-byte little-endian chunks, each one field element.
/// The final chunk is shorter when the length is not a multiple of 31.
pub fn le_chunks_to_fields(msg: &[u8]) -> Result<Vec<Fr>> {
    msg.chunks(SPONGE_CHUNK_SIZE).map(Fr::from_le_slice).collect()
}

/// Decode a hex string (optional `0x` prefix) into exactly `N` bytes.
pub fn decode_hex_fixed<const N: usize>(text: &str) -> Result<[u8; N]> {
    let stripped = text.strip_prefix("0x").unwrap_or(text);
    let bytes = hex::decode(stripped)?;
    if bytes.len() != N {
        return Err(CryptoError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Copy a slice into a fixed-size array, checking the length.
pub fn to_fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    <[u8; N]>::try_from(bytes).map_err(|_| CryptoError::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_endianness() {
        assert_eq!(swap_endianness(&[1, 2, 3]), vec![3, 2, 1]);
        assert!(swap_endianness(&[]).is_empty());
    }

    #[test]
    fn test_biguint_to_le_bytes() {
        let out = biguint_to_le_bytes::<4>(&BigUint::from(0x0102u32)).unwrap();
        assert_eq!(out, [0x02, 0x01, 0, 0]);
        assert_eq!(
            biguint_to_le_bytes::<4>(&BigUint::from(0u32)).unwrap(),
            [0u8; 4]
        );
        assert_eq!(
            biguint_to_le_bytes::<1>(&BigUint::from(0x0102u32)),
            Err(CryptoError::InvalidLength {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_field_to_le_bytes_range() {
        let q = crate::constants::q1();
        assert!(field_to_le_bytes(q, Operation::Signature).is_err());
        let bytes = field_to_le_bytes(&(q - 1u32), Operation::Signature).unwrap();
        assert_eq!(le_bytes_to_biguint(&bytes), q - 1u32);
    }

    #[test]
    fn test_le_chunks() {
        let msg = [1u8; 40];
        let chunks = le_chunks_to_fields(&msg).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1], Fr::from_le_slice(&[1u8; 9]).unwrap());
        assert!(le_chunks_to_fields(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_hex_fixed() {
        assert_eq!(decode_hex_fixed::<2>("0x0a0b").unwrap(), [0x0a, 0x0b]);
        assert_eq!(decode_hex_fixed::<2>("0a0b").unwrap(), [0x0a, 0x0b]);
        assert_eq!(
            decode_hex_fixed::<2>("0a"),
            Err(CryptoError::InvalidLength {
                expected: 2,
                actual: 1
            })
        );
        assert!(matches!(
            decode_hex_fixed::<1>("zz"),
            Err(CryptoError::MalformedHex(_))
        ));
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed::<2>(&[1, 2]).unwrap(), [1, 2]);
        assert!(to_fixed::<2>(&[1, 2, 3]).is_err());
    }
}
