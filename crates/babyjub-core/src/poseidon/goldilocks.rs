//! Poseidon over the Goldilocks field Q₂
//!
//! Width 12 (8 rate words followed by 4 capacity words), x⁷ S-box, 8 full and
//! 22 partial rounds, with the plonky2 / `goldenposeidon` constant tables.
//! The output is the first four words of the permuted state.

use super::goldilocks_constants::{C, M};
use crate::errors::{CryptoError, Operation, Result};
use crate::goldilocks::Goldilocks;
use num_bigint::BigUint;
use std::io;

pub const WIDTH: usize = 12;
pub const RATE: usize = 8;
pub const CAPACITY: usize = 4;
pub const N_ROUNDS_F: usize = 8;
pub const N_ROUNDS_P: usize = 22;

/// Bytes per absorbed word in the byte hasher
pub const WORD_SIZE: usize = 8;
/// Digest length of the byte hasher
pub const DIGEST_SIZE: usize = CAPACITY * WORD_SIZE;
/// Input is zero padded to a multiple of this many bytes
pub const BLOCK_SIZE: usize = WIDTH * WORD_SIZE;

fn mix(state: &[Goldilocks; WIDTH]) -> [Goldilocks; WIDTH] {
    let mut out = [Goldilocks::ZERO; WIDTH];
    for (i, o) in out.iter_mut().enumerate() {
        for (j, s) in state.iter().enumerate() {
            *o += Goldilocks::from_u64_reduced(M[j][i]) * *s;
        }
    }
    out
}

pub fn permute(state: &mut [Goldilocks; WIDTH]) {
    let half = N_ROUNDS_F / 2;
    for (r, constants) in C.chunks_exact(WIDTH).enumerate() {
        for (x, c) in state.iter_mut().zip(constants) {
            *x += Goldilocks::from_u64_reduced(*c);
        }
        if r < half || r >= half + N_ROUNDS_P {
            for x in state.iter_mut() {
                *x = x.pow7();
            }
        } else {
            state[0] = state[0].pow7();
        }
        *state = mix(state);
    }
}

/// Permute `inputs ‖ capacity` and return the first four words.
pub fn hash_elements(
    inputs: &[Goldilocks; RATE],
    capacity: &[Goldilocks; CAPACITY],
) -> [Goldilocks; CAPACITY] {
    let mut state = [Goldilocks::ZERO; WIDTH];
    state[..RATE].copy_from_slice(inputs);
    state[RATE..].copy_from_slice(capacity);
    permute(&mut state);

    let mut out = [Goldilocks::ZERO; CAPACITY];
    out.copy_from_slice(&state[..CAPACITY]);
    out
}

fn to_elements<const N: usize>(words: &[u64; N], op: Operation) -> Result<[Goldilocks; N]> {
    let mut out = [Goldilocks::ZERO; N];
    for (o, w) in out.iter_mut().zip(words) {
        *o = Goldilocks::new(*w).map_err(|_| CryptoError::range_q2(op))?;
    }
    Ok(out)
}

/// Hash eight rate words with four capacity words. Every word must be below Q₂.
pub fn hash(inputs: &[u64; RATE], capacity: &[u64; CAPACITY]) -> Result<[u64; CAPACITY]> {
    let op = Operation::GoldilocksPoseidon;
    let out = hash_elements(&to_elements(inputs, op)?, &to_elements(capacity, op)?);
    Ok(out.map(|x| x.to_u64()))
}

fn biguints_to_words<const N: usize>(values: &[BigUint]) -> Result<[u64; N]> {
    if values.len() != N {
        return Err(CryptoError::Arity {
            op: Operation::GoldilocksPoseidon,
            min: N,
            max: N,
            actual: values.len(),
        });
    }
    let mut words = [0u64; N];
    for (w, v) in words.iter_mut().zip(values) {
        *w = Goldilocks::from_biguint(v)
            .map_err(|_| CryptoError::range_q2(Operation::GoldilocksPoseidon))?
            .to_u64();
    }
    Ok(words)
}

/// [`hash`] over integers, with the digest packed into a single integer
/// (word 0 most significant).
pub fn hash_biguint(inputs: &[BigUint], capacity: &[BigUint]) -> Result<BigUint> {
    let inputs = biguints_to_words::<RATE>(inputs)?;
    let capacity = biguints_to_words::<CAPACITY>(capacity)?;
    Ok(digest_to_biguint(&hash(&inputs, &capacity)?))
}

fn read_words<const N: usize>(bytes: &[u8]) -> Result<[u64; N]> {
    let mut words = [0u64; N];
    for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(WORD_SIZE)) {
        let mut buf = [0u8; WORD_SIZE];
        buf.copy_from_slice(chunk);
        *w = u64::from_be_bytes(buf);
    }
    to_elements(&words, Operation::GoldilocksBytes).map(|_| words)
}

/// Sponge over bytes, read as 8-byte big-endian words.
///
/// The message is zero padded to a multiple of [`BLOCK_SIZE`]. The first
/// block supplies all eight inputs and the four capacity words. After that
/// 64-byte blocks are absorbed, chaining the capacity, while at least
/// [`BLOCK_SIZE`] bytes remain; a shorter tail is not absorbed.
pub fn hash_bytes(msg: &[u8]) -> Result<[u64; CAPACITY]> {
    if msg.is_empty() {
        return Err(CryptoError::EmptyInput {
            op: Operation::GoldilocksBytes,
        });
    }

    let mut data = msg.to_vec();
    let extra = data.len() % BLOCK_SIZE;
    if extra > 0 {
        data.resize(data.len() + BLOCK_SIZE - extra, 0);
    }

    let rate_bytes = RATE * WORD_SIZE;
    let inputs = read_words::<RATE>(&data[..rate_bytes])?;
    let mut capacity = read_words::<CAPACITY>(&data[rate_bytes..BLOCK_SIZE])?;
    capacity = hash(&inputs, &capacity)?;

    let mut pos = BLOCK_SIZE;
    while data.len() - pos >= BLOCK_SIZE {
        let inputs = read_words::<RATE>(&data[pos..pos + rate_bytes])?;
        capacity = hash(&inputs, &capacity)?;
        pos += rate_bytes;
    }
    Ok(capacity)
}

/// [`hash_bytes`] as a 32-byte big-endian digest.
pub fn sum(msg: &[u8]) -> Result<[u8; DIGEST_SIZE]> {
    hash_bytes(msg).map(|d| digest_to_bytes(&d))
}

/// Big-endian words concatenated into 32 bytes.
pub fn digest_to_bytes(digest: &[u64; CAPACITY]) -> [u8; DIGEST_SIZE] {
    let mut out = [0u8; DIGEST_SIZE];
    for (chunk, word) in out.chunks_exact_mut(WORD_SIZE).zip(digest) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

pub fn digest_to_biguint(digest: &[u64; CAPACITY]) -> BigUint {
    BigUint::from_bytes_be(&digest_to_bytes(digest))
}

/// Incremental byte hasher for [`hash_bytes`].
///
/// Input is buffered; [`finalize`](GoldilocksHasher::finalize) hashes
/// everything written since the last reset.
#[derive(Debug, Clone, Default)]
pub struct GoldilocksHasher {
    buf: Vec<u8>,
}

impl GoldilocksHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Digest of the buffered input. The buffer is kept.
    pub fn finalize(&self) -> Result<[u8; DIGEST_SIZE]> {
        sum(&self.buf)
    }

    pub fn reset(&mut self) {
        self.buf.clear();
    }

    pub fn size(&self) -> usize {
        DIGEST_SIZE
    }

    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }
}

impl io::Write for GoldilocksHasher {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.update(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
