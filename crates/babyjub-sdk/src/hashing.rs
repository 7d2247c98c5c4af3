//! One entry point per input shape for every hash family

use crate::error::{Result, SdkError};
use crate::types::{HashKind, HashOutput};
use babyjub_core::poseidon::goldilocks::{self, GoldilocksHasher};
use babyjub_core::poseidon::{self, legacy, PoseidonHasher};
use babyjub_core::{mimc7, CryptoError, Goldilocks, Operation};
use num_bigint::BigUint;
use std::fs::File;
use std::io;
use std::path::Path;

/// Hash field elements. Goldilocks takes up to eight words, zero padded.
pub fn hash_elements(kind: HashKind, inputs: &[BigUint]) -> Result<HashOutput> {
    log::debug!("hashing {} elements with {}", inputs.len(), kind);
    let output = match kind {
        HashKind::Poseidon => HashOutput::Field(poseidon::hash(inputs)?),
        HashKind::Mimc7 => HashOutput::Field(mimc7::hash(inputs, None)?),
        HashKind::Legacy => HashOutput::Field(legacy::hash(inputs)?),
        HashKind::Goldilocks => HashOutput::Words(goldilocks_elements(inputs)?),
    };
    Ok(output)
}

fn goldilocks_elements(inputs: &[BigUint]) -> Result<[u64; 4]> {
    if inputs.is_empty() || inputs.len() > goldilocks::RATE {
        return Err(CryptoError::Arity {
            op: Operation::GoldilocksPoseidon,
            min: 1,
            max: goldilocks::RATE,
            actual: inputs.len(),
        }
        .into());
    }
    let mut words = [0u64; goldilocks::RATE];
    for (w, v) in words.iter_mut().zip(inputs) {
        *w = Goldilocks::from_biguint(v)?.to_u64();
    }
    Ok(goldilocks::hash(&words, &[0; goldilocks::CAPACITY])?)
}

/// Hash a byte string with the family's byte sponge.
pub fn hash_bytes(kind: HashKind, msg: &[u8]) -> Result<HashOutput> {
    log::debug!("hashing {} bytes with {}", msg.len(), kind);
    let output = match kind {
        HashKind::Poseidon => HashOutput::Field(poseidon::hash_bytes(msg)?),
        HashKind::Mimc7 => HashOutput::Field(mimc7::hash_bytes(msg)?),
        HashKind::Legacy => HashOutput::Field(legacy::hash_bytes(msg)?),
        HashKind::Goldilocks => HashOutput::Words(goldilocks::hash_bytes(msg)?),
    };
    Ok(output)
}

/// Hash a file's contents. Poseidon and Goldilocks stream through their
/// incremental hashers.
pub fn hash_file(kind: HashKind, path: &Path) -> Result<HashOutput> {
    let read_err = |source| SdkError::ReadFile {
        path: path.to_path_buf(),
        source,
    };

    match kind {
        HashKind::Poseidon => {
            let mut file = File::open(path).map_err(read_err)?;
            let mut hasher = PoseidonHasher::default();
            let n = io::copy(&mut file, &mut hasher).map_err(read_err)?;
            log::debug!("streamed {} bytes from {:?}", n, path);
            let digest = hasher.finalize()?;
            Ok(HashOutput::Field(BigUint::from_bytes_be(&digest)))
        }
        HashKind::Goldilocks => {
            let mut file = File::open(path).map_err(read_err)?;
            let mut hasher = GoldilocksHasher::new();
            let n = io::copy(&mut file, &mut hasher).map_err(read_err)?;
            log::debug!("streamed {} bytes from {:?}", n, path);
            Ok(HashOutput::Words(digest_words(&hasher.finalize()?)))
        }
        HashKind::Mimc7 | HashKind::Legacy => {
            let data = std::fs::read(path).map_err(read_err)?;
            hash_bytes(kind, &data)
        }
    }
}

fn digest_words(digest: &[u8; goldilocks::DIGEST_SIZE]) -> [u64; goldilocks::CAPACITY] {
    let mut words = [0u64; goldilocks::CAPACITY];
    for (w, chunk) in words.iter_mut().zip(digest.chunks_exact(goldilocks::WORD_SIZE)) {
        let mut buf = [0u8; goldilocks::WORD_SIZE];
        buf.copy_from_slice(chunk);
        *w = u64::from_be_bytes(buf);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|v| BigUint::from(*v)).collect()
    }

    #[test]
    fn test_hash_elements_poseidon() {
        let out = hash_elements(HashKind::Poseidon, &ints(&[1, 2])).unwrap();
        assert_eq!(
            out.to_string(),
            "7853200120776062878684798364095072458815029376092732009249414926327459813530"
        );
    }

    #[test]
    fn test_hash_elements_goldilocks_pads() {
        let full = ints(&[
            923978,
            235763497586,
            9827635653498,
            112870,
            289273673480943876,
            230295874986745876,
            6254867324987,
            2087,
        ]);
        assert_eq!(
            hash_elements(HashKind::Goldilocks, &full).unwrap(),
            HashOutput::Words([
                1892171027578617759,
                984732815927439256,
                7866041765487844082,
                8161503938059336191
            ])
        );

        let short = hash_elements(HashKind::Goldilocks, &ints(&[1, 2])).unwrap();
        let padded = goldilocks::hash(&[1, 2, 0, 0, 0, 0, 0, 0], &[0; 4]).unwrap();
        assert_eq!(short, HashOutput::Words(padded));

        assert!(hash_elements(HashKind::Goldilocks, &ints(&[0; 9])).is_err());
        assert!(hash_elements(HashKind::Goldilocks, &[]).is_err());
    }

    #[test]
    fn test_hash_bytes_dispatch() {
        let p = hash_bytes(HashKind::Poseidon, b"abc").unwrap();
        assert_eq!(
            p.to_string(),
            "455780574318648527863663256724909024656761775419289715658012790702198762987"
        );
        assert!(matches!(
            hash_bytes(HashKind::Goldilocks, b"abc").unwrap(),
            HashOutput::Words(_)
        ));
        assert!(hash_bytes(HashKind::Mimc7, b"").is_err());
    }

    #[test]
    fn test_hash_file_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msg.bin");
        let data: Vec<u8> = (0..200u8).collect();
        std::fs::write(&path, &data).unwrap();

        for kind in [
            HashKind::Poseidon,
            HashKind::Legacy,
            HashKind::Mimc7,
            HashKind::Goldilocks,
        ] {
            assert_eq!(
                hash_file(kind, &path).unwrap(),
                hash_bytes(kind, &data).unwrap(),
                "{}",
                kind
            );
        }
        assert!(matches!(
            hash_file(HashKind::Poseidon, &dir.path().join("missing")),
            Err(SdkError::ReadFile { .. })
        ));
    }
}
