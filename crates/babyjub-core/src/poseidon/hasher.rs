//! Byte sponge over the width-dependent permutation
//!
//! Messages are cut into 31-byte big-endian chunks. A frame of `frame_size`
//! chunks is hashed at once; the digest then occupies slot 0 of the next
//! frame, so every later frame absorbs `frame_size - 1` new chunks. The final
//! partial chunk is zero padded on the right.

use super::hash_fields_ex;
use crate::codec::SPONGE_CHUNK_SIZE;
use crate::errors::{CryptoError, Operation, Result};
use crate::field::Fr;
use num_bigint::BigUint;
use std::io;

pub const DEFAULT_FRAME_SIZE: usize = 16;

fn check_frame_size(frame_size: usize) -> Result<()> {
    if !(2..=super::MAX_INPUTS).contains(&frame_size) {
        return Err(CryptoError::Arity {
            op: Operation::PoseidonFrameSize,
            min: 2,
            max: super::MAX_INPUTS,
            actual: frame_size,
        });
    }
    Ok(())
}

fn sponge(msg: &[u8], frame_size: usize) -> Result<Fr> {
    check_frame_size(frame_size)?;
    if msg.is_empty() {
        return Err(CryptoError::EmptyInput {
            op: Operation::PoseidonBytes,
        });
    }

    let mut frame = vec![Fr::ZERO; frame_size];
    let mut digest = Fr::ZERO;
    let mut dirty = false;
    let mut k = 0;

    let mut chunks = msg.chunks_exact(SPONGE_CHUNK_SIZE);
    for chunk in chunks.by_ref() {
        frame[k] = Fr::from_be_slice(chunk)?;
        dirty = true;
        if k == frame_size - 1 {
            digest = hash_fields_ex(&frame, Fr::ZERO, 1)?[0];
            dirty = false;
            frame.fill(Fr::ZERO);
            frame[0] = digest;
            k = 1;
        } else {
            k += 1;
        }
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut padded = [0u8; SPONGE_CHUNK_SIZE];
        padded[..tail.len()].copy_from_slice(tail);
        frame[k] = Fr::from_be_slice(&padded)?;
        dirty = true;
    }

    if dirty {
        digest = hash_fields_ex(&frame, Fr::ZERO, 1)?[0];
    }
    Ok(digest)
}

/// Hash an arbitrary non-empty byte string with the given frame size (2..=16).
pub fn hash_bytes_x(msg: &[u8], frame_size: usize) -> Result<BigUint> {
    sponge(msg, frame_size).map(|d| d.to_biguint())
}

/// [`hash_bytes_x`] with a frame of 16 chunks.
pub fn hash_bytes(msg: &[u8]) -> Result<BigUint> {
    hash_bytes_x(msg, DEFAULT_FRAME_SIZE)
}

/// 32-byte big-endian digest of `msg` with the default frame size.
pub fn sum(msg: &[u8]) -> Result<[u8; 32]> {
    Ok(sponge(msg, DEFAULT_FRAME_SIZE)?.to_bytes_be())
}

/// Incremental byte hasher.
///
/// Input is buffered until [`finalize`](PoseidonHasher::finalize), which runs
/// the sponge over everything written since the last reset.
#[derive(Debug, Clone)]
pub struct PoseidonHasher {
    frame_size: usize,
    buf: Vec<u8>,
}

impl PoseidonHasher {
    pub fn new(frame_size: usize) -> Result<Self> {
        check_frame_size(frame_size)?;
        Ok(Self {
            frame_size,
            buf: Vec::new(),
        })
    }

    pub fn update(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Digest of the buffered input, big-endian. The buffer is kept.
    pub fn finalize(&self) -> Result<[u8; 32]> {
        Ok(sponge(&self.buf, self.frame_size)?.to_bytes_be())
    }

    pub fn reset(&mut self) {
        self.buf.clear();
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Digest length in bytes
    pub fn size(&self) -> usize {
        32
    }

    /// Sponge chunk length in bytes
    pub fn block_size(&self) -> usize {
        SPONGE_CHUNK_SIZE
    }
}

impl Default for PoseidonHasher {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            buf: Vec::new(),
        }
    }
}

impl io::Write for PoseidonHasher {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.update(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

    fn big(s: &str) -> BigUint {
        s.parse().unwrap()
    }

    #[test]
    fn test_hash_bytes_lorem() {
        assert_eq!(
            hash_bytes(LOREM).unwrap(),
            big("1445580476521057652055149555982034416468130755980688389650598067065303157299")
        );
        assert_eq!(
            hash_bytes_x(LOREM, 5).unwrap(),
            big("10861796838230146339580037836668242796885127893044221977940233049905645742340")
        );
    }

    #[test]
    fn test_hash_bytes_short() {
        assert_eq!(
            hash_bytes(b"abc").unwrap(),
            big("455780574318648527863663256724909024656761775419289715658012790702198762987")
        );
    }

    #[test]
    fn test_hash_bytes_exact_chunk() {
        let msg: Vec<u8> = (0u8..31).collect();
        assert_eq!(
            hash_bytes_x(&msg, 2).unwrap(),
            big("2907590887379792887444150440014208836722213470684851478247275984947559633721")
        );
    }

    #[test]
    fn test_hash_bytes_errors() {
        assert_eq!(
            hash_bytes(b""),
            Err(CryptoError::EmptyInput {
                op: Operation::PoseidonBytes
            })
        );
        assert!(matches!(
            hash_bytes_x(b"abc", 1),
            Err(CryptoError::Arity { actual: 1, .. })
        ));
        assert!(hash_bytes_x(b"abc", 17).is_err());
        assert!(PoseidonHasher::new(0).is_err());
    }

    #[test]
    fn test_hasher_incremental() {
        let mut hasher = PoseidonHasher::new(16).unwrap();
        hasher.update(&LOREM[..100]);
        hasher.write_all(&LOREM[100..]).unwrap();
        let digest = hasher.finalize().unwrap();

        assert_eq!(digest, sum(LOREM).unwrap());
        assert_eq!(
            BigUint::from_bytes_be(&digest),
            hash_bytes(LOREM).unwrap()
        );

        hasher.reset();
        hasher.update(b"abc");
        assert_eq!(
            BigUint::from_bytes_be(&hasher.finalize().unwrap()),
            hash_bytes(b"abc").unwrap()
        );
    }

    #[test]
    fn test_hasher_sizes() {
        let hasher = PoseidonHasher::default();
        assert_eq!(hasher.frame_size(), DEFAULT_FRAME_SIZE);
        assert_eq!(hasher.size(), 32);
        assert_eq!(hasher.block_size(), 31);
    }
}
