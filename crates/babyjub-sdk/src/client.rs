//! Signing and verification on top of the core primitives

use crate::error::{Result, SdkError};
use crate::keystore;
use crate::types::{SignedMessage, SignerConfig};
use babyjub_core::{ChallengeHash, PrivateKey, PublicKey, PublicKeyComp, SignatureComp};
use num_bigint::BigUint;
use std::path::Path;

/// Signer holding a private key
///
/// # Example
///
/// ```
/// use babyjub_core::PrivateKey;
/// use babyjub_sdk::{verify_signed, BabyJubSigner, SignerConfig};
/// use num_bigint::BigUint;
///
/// let signer = BabyJubSigner::new(PrivateKey::random(), SignerConfig::new());
/// let signed = signer.sign(&BigUint::from(42u8)).unwrap();
/// verify_signed(&signed).unwrap();
/// ```
pub struct BabyJubSigner {
    key: PrivateKey,
    config: SignerConfig,
}

impl BabyJubSigner {
    pub fn new(key: PrivateKey, config: SignerConfig) -> Self {
        Self { key, config }
    }

    /// Load the private key from a hex key file
    pub fn from_key_file(path: &Path, config: SignerConfig) -> Result<Self> {
        let key = keystore::read_key_file(path)?;
        log::debug!("loaded key from {:?}", path);
        Ok(Self::new(key, config))
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    pub fn public_key(&self) -> Result<PublicKey> {
        Ok(self.key.public()?)
    }

    /// Sign a field element with the configured challenge hash
    pub fn sign(&self, msg: &BigUint) -> Result<SignedMessage> {
        let public_key = self.public_key()?.compress();
        let signature = self.key.sign(msg, self.config.hash)?.compress();
        log::debug!("signed message with {} challenge", self.config.hash);

        Ok(SignedMessage {
            public_key,
            message: msg.clone(),
            signature,
            hash: self.config.hash,
        })
    }
}

/// Verify a signature given in compressed form.
///
/// Malformed points propagate as errors; a well-formed signature that does
/// not match gives [`SdkError::VerificationFailed`].
pub fn verify(
    public_key: &PublicKeyComp,
    msg: &BigUint,
    signature: &SignatureComp,
    hash: ChallengeHash,
) -> Result<()> {
    let pk = public_key.decompress()?;
    let sig = signature.decompress()?;
    if pk.verify(msg, &sig, hash) {
        log::debug!("signature valid for {}", public_key);
        Ok(())
    } else {
        Err(SdkError::VerificationFailed)
    }
}

pub fn verify_signed(signed: &SignedMessage) -> Result<()> {
    verify(
        &signed.public_key,
        &signed.message,
        &signed.signature,
        signed.hash,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0001020304050607080900010203040506070809000102030405060708090001";

    fn signer(hash: ChallengeHash) -> BabyJubSigner {
        BabyJubSigner::new(
            PrivateKey::from_hex(SECRET).unwrap(),
            SignerConfig::new().with_hash(hash),
        )
    }

    #[test]
    fn test_sign_and_verify() {
        for hash in [ChallengeHash::Poseidon, ChallengeHash::Mimc7] {
            let signed = signer(hash).sign(&BigUint::from(1234u32)).unwrap();
            assert_eq!(signed.hash, hash);
            assert_eq!(
                signed.public_key.to_string(),
                "c433f7a696b7aa3a5224efb3993baf0ccd9e92eecee0c29a3f6c8208a9e81d9e"
            );
            verify_signed(&signed).unwrap();
        }
    }

    #[test]
    fn test_verify_wrong_hash_fails() {
        let signed = signer(ChallengeHash::Poseidon)
            .sign(&BigUint::from(5u8))
            .unwrap();
        let result = verify(
            &signed.public_key,
            &signed.message,
            &signed.signature,
            ChallengeHash::Mimc7,
        );
        assert!(matches!(result, Err(SdkError::VerificationFailed)));
    }

    #[test]
    fn test_verify_malformed_point_is_error() {
        let signed = signer(ChallengeHash::Poseidon)
            .sign(&BigUint::from(5u8))
            .unwrap();
        let mut bad = signed.public_key;
        bad.0 = [0xff; 32];
        let result = verify(&bad, &signed.message, &signed.signature, signed.hash);
        assert!(matches!(result, Err(SdkError::Crypto(_))));
    }

    #[test]
    fn test_from_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.key");
        keystore::write_key_file(&path, &PrivateKey::from_hex(SECRET).unwrap()).unwrap();

        let s = BabyJubSigner::from_key_file(&path, SignerConfig::new()).unwrap();
        assert_eq!(
            s.public_key().unwrap().to_string(),
            "c433f7a696b7aa3a5224efb3993baf0ccd9e92eecee0c29a3f6c8208a9e81d9e"
        );
        assert_eq!(s.config().hash, ChallengeHash::Poseidon);
    }
}
