//! EdDSA over BabyJubJub with a Poseidon or MiMC7 challenge hash
//!
//! Keys and nonces are derived with BLAKE-512. The challenge is
//! `H(R8.x, R8.y, A.x, A.y, msg)` and `S = r + 8·hm·s mod subgroup_order`.
//! Verification checks `S·B8 == R8 + 8·hm·A`.
//!
//! Scalar multiplication is double-and-add and not constant time; signing
//! leaks timing information about the secret scalar.

use crate::codec::{biguint_to_le_bytes, decode_hex_fixed, to_fixed};
use crate::constants::sub_order;
use crate::curve::Point;
use crate::errors::{CryptoError, Operation, Result};
use crate::field::Fr;
use crate::types::{
    CompressedPoint, CompressedSignature, COMPRESSED_POINT_SIZE, COMPRESSED_SIGNATURE_SIZE,
    PRIVATE_KEY_SIZE,
};
use crate::{mimc7, poseidon};
use blake_hash::{Blake512, Digest};
use core::fmt;
use core::str::FromStr;
use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;

/// BLAKE-512 (the SHA-3 finalist, not BLAKE2b)
pub fn blake512(data: &[u8]) -> [u8; 64] {
    let digest = Blake512::digest(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&digest);
    out
}

fn prune_buffer(buf: &mut [u8; 32]) {
    buf[0] &= 0xF8;
    buf[31] &= 0x7F;
    buf[31] |= 0x40;
}

/// Hash used for the signature challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChallengeHash {
    #[default]
    Poseidon,
    Mimc7,
}

impl ChallengeHash {
    fn challenge(self, r8: &Point, a: &Point, msg: Fr) -> Result<BigUint> {
        let inputs = [r8.x, r8.y, a.x, a.y, msg];
        let hm = match self {
            ChallengeHash::Poseidon => poseidon::hash_fields(&inputs)?,
            ChallengeHash::Mimc7 => mimc7::hash_fields(&inputs, None)?,
        };
        Ok(hm.to_biguint())
    }
}

impl fmt::Display for ChallengeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeHash::Poseidon => f.write_str("poseidon"),
            ChallengeHash::Mimc7 => f.write_str("mimc7"),
        }
    }
}

impl FromStr for ChallengeHash {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poseidon" => Ok(ChallengeHash::Poseidon),
            "mimc7" | "mimc" => Ok(ChallengeHash::Mimc7),
            other => Err(format!("unknown challenge hash '{}'", other)),
        }
    }
}

fn message_field(msg: &BigUint) -> Result<Fr> {
    Fr::from_biguint(msg).map_err(|_| CryptoError::range_q1(Operation::Signature))
}

/// 32-byte EdDSA secret
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; PRIVATE_KEY_SIZE]);

impl PrivateKey {
    pub const fn new(bytes: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Fresh key from the operating system RNG
    pub fn random() -> Self {
        let mut bytes = [0u8; PRIVATE_KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Parse 64 hex characters, `0x` prefix optional
    pub fn from_hex(text: &str) -> Result<Self> {
        decode_hex_fixed::<PRIVATE_KEY_SIZE>(text).map(Self)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.0
    }

    pub fn scalar(&self) -> PrivKeyScalar {
        PrivKeyScalar(sk_to_biguint(self))
    }

    pub fn public(&self) -> Result<PublicKey> {
        self.scalar().public()
    }

    pub fn sign(&self, msg: &BigUint, hash: ChallengeHash) -> Result<Signature> {
        let msg_fr = message_field(msg)?;
        let h = blake512(&self.0);

        let mut nonce_input = [0u8; 64];
        nonce_input[..32].copy_from_slice(&h[32..]);
        nonce_input[32..].copy_from_slice(&msg_fr.to_bytes_le());
        let r = BigUint::from_bytes_le(&blake512(&nonce_input)) % sub_order();

        let r8 = Point::b8().mul(&r)?;
        let scalar = self.scalar();
        let a = scalar.public()?;
        let hm = hash.challenge(&r8, a.point(), msg_fr)?;

        let s = (r + hm * (scalar.biguint() << 3u32)) % sub_order();
        Signature::new(r8, s)
    }

    pub fn sign_mimc7(&self, msg: &BigUint) -> Result<Signature> {
        self.sign(msg, ChallengeHash::Mimc7)
    }

    pub fn sign_poseidon(&self, msg: &BigUint) -> Result<Signature> {
        self.sign(msg, ChallengeHash::Poseidon)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl From<[u8; PRIVATE_KEY_SIZE]> for PrivateKey {
    fn from(bytes: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        to_fixed::<PRIVATE_KEY_SIZE>(bytes).map(Self)
    }
}

/// `LE(prune(BLAKE-512(sk)[0..32])) >> 3`
pub fn sk_to_biguint(key: &PrivateKey) -> BigUint {
    let h = blake512(&key.0);
    let mut buf = [0u8; 32];
    buf.copy_from_slice(&h[..32]);
    prune_buffer(&mut buf);
    BigUint::from_bytes_le(&buf) >> 3u32
}

/// Secret scalar derived from a private key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivKeyScalar(BigUint);

impl PrivKeyScalar {
    pub fn new(s: BigUint) -> Self {
        Self(s)
    }

    pub fn public(&self) -> Result<PublicKey> {
        Point::b8().mul(&self.0).map(PublicKey)
    }

    pub fn biguint(&self) -> &BigUint {
        &self.0
    }
}

/// Public key: a point of the prime-order subgroup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(Point);

impl PublicKey {
    pub const fn from_point(p: Point) -> Self {
        Self(p)
    }

    pub fn point(&self) -> &Point {
        &self.0
    }

    pub fn compress(&self) -> PublicKeyComp {
        PublicKeyComp(self.0.compress())
    }

    pub fn to_bytes(&self) -> CompressedPoint {
        self.0.compress()
    }

    /// False on any mismatch, including messages ≥ Q₁ and S ≥ the subgroup order.
    pub fn verify(&self, msg: &BigUint, sig: &Signature, hash: ChallengeHash) -> bool {
        self.check(msg, sig, hash).unwrap_or(false)
    }

    fn check(&self, msg: &BigUint, sig: &Signature, hash: ChallengeHash) -> Result<bool> {
        if sig.s >= *sub_order() {
            return Ok(false);
        }
        let msg_fr = message_field(msg)?;
        let hm = hash.challenge(&sig.r8, &self.0, msg_fr)?;

        let left = Point::b8().mul(&sig.s)?;
        let right = (sig.r8.projective() + self.0.mul(&(hm << 3u32))?.projective()).affine()?;
        Ok(left == right)
    }

    pub fn verify_mimc7(&self, msg: &BigUint, sig: &Signature) -> bool {
        self.verify(msg, sig, ChallengeHash::Mimc7)
    }

    pub fn verify_poseidon(&self, msg: &BigUint, sig: &Signature) -> bool {
        self.verify(msg, sig, ChallengeHash::Poseidon)
    }
}

impl From<Point> for PublicKey {
    fn from(p: Point) -> Self {
        Self(p)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        PublicKeyComp::try_from(bytes)?.decompress()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.compress(), f)
    }
}

impl FromStr for PublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<PublicKeyComp>()?.decompress()
    }
}

/// Compressed public key (32 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKeyComp(pub CompressedPoint);

impl PublicKeyComp {
    pub fn decompress(&self) -> Result<PublicKey> {
        Point::decompress(&self.0).map(PublicKey)
    }

    pub fn as_bytes(&self) -> &CompressedPoint {
        &self.0
    }
}

impl TryFrom<&[u8]> for PublicKeyComp {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        to_fixed::<COMPRESSED_POINT_SIZE>(bytes).map(Self)
    }
}

impl fmt::Display for PublicKeyComp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for PublicKeyComp {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        decode_hex_fixed::<COMPRESSED_POINT_SIZE>(s).map(Self)
    }
}

/// Uncompressed signature `(R8, S)`; S always fits in 32 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    r8: Point,
    s: BigUint,
}

impl Signature {
    pub fn new(r8: Point, s: BigUint) -> Result<Self> {
        biguint_to_le_bytes::<32>(&s)?;
        Ok(Self { r8, s })
    }

    pub fn r8(&self) -> &Point {
        &self.r8
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// `compress(R8) ‖ LE32(S)`
    pub fn compress(&self) -> SignatureComp {
        let mut buf = [0u8; COMPRESSED_SIGNATURE_SIZE];
        buf[..32].copy_from_slice(&self.r8.compress());
        let s = self.s.to_bytes_le();
        buf[32..32 + s.len()].copy_from_slice(&s);
        SignatureComp(buf)
    }

    pub fn decompress(buf: &CompressedSignature) -> Result<Self> {
        let r8_bytes = to_fixed::<COMPRESSED_POINT_SIZE>(&buf[..32])?;
        let r8 = Point::decompress(&r8_bytes)?;
        let s = BigUint::from_bytes_le(&buf[32..]);
        Ok(Self { r8, s })
    }

    pub fn to_bytes(&self) -> CompressedSignature {
        self.compress().0
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        SignatureComp::try_from(bytes)?.decompress()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.compress(), f)
    }
}

impl FromStr for Signature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<SignatureComp>()?.decompress()
    }
}

/// Compressed signature (64 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureComp(pub CompressedSignature);

impl SignatureComp {
    pub fn decompress(&self) -> Result<Signature> {
        Signature::decompress(&self.0)
    }

    pub fn as_bytes(&self) -> &CompressedSignature {
        &self.0
    }
}

impl TryFrom<&[u8]> for SignatureComp {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        to_fixed::<COMPRESSED_SIGNATURE_SIZE>(bytes).map(Self)
    }
}

impl fmt::Display for SignatureComp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for SignatureComp {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        decode_hex_fixed::<COMPRESSED_SIGNATURE_SIZE>(s).map(Self)
    }
}

/// Hex-string serde for the key and signature types
#[cfg(feature = "serde")]
mod hex_serde {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    macro_rules! hex_string_serde {
        ($($ty:ty),*) => {$(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
                    let text = String::deserialize(deserializer)?;
                    text.parse().map_err(de::Error::custom)
                }
            }
        )*};
    }

    hex_string_serde!(PublicKey, PublicKeyComp, Signature, SignatureComp);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SK: &str = "0001020304050607080900010203040506070809000102030405060708090001";

    fn big(s: &str) -> BigUint {
        s.parse().unwrap()
    }

    fn test_key() -> PrivateKey {
        PrivateKey::from_hex(SK).unwrap()
    }

    fn test_msg() -> BigUint {
        BigUint::from_bytes_le(&hex::decode("00010203040506070809").unwrap())
    }

    #[test]
    fn test_blake512_empty() {
        assert_eq!(
            hex::encode(blake512(b"")),
            "a8cfbbd73726062df0c6864dda65defe58ef0cc52a5625090fa17601e1eecd1b\
             628e94f396ae402a00acc9eab77b4d4c2e852aaaa25a636d80af3fc7913ef5b8"
        );
    }

    #[test]
    fn test_key_derivation() {
        let k = test_key();
        assert_eq!(
            *k.scalar().biguint(),
            big("6466070937662820620902051049739362987537906109895538826186780010858059362905")
        );

        let pk = k.public().unwrap();
        assert_eq!(
            pk.point().x.to_biguint(),
            big("13277427435165878497778222415993513565335242147425444199013288855685581939618")
        );
        assert_eq!(
            pk.point().y.to_biguint(),
            big("13622229784656158136036771217484571176836296686641868549125388198837476602820")
        );
        assert_eq!(
            pk.compress().to_string(),
            "c433f7a696b7aa3a5224efb3993baf0ccd9e92eecee0c29a3f6c8208a9e81d9e"
        );
        assert!(pk.point().in_sub_group());
    }

    #[test]
    fn test_sign_mimc7_vector() {
        let k = test_key();
        let msg = test_msg();
        let sig = k.sign_mimc7(&msg).unwrap();

        assert_eq!(
            sig.r8().x.to_biguint(),
            big("11384336176656855268977457483345535180380036354188103142384839473266348197733")
        );
        assert_eq!(
            sig.r8().y.to_biguint(),
            big("15383486972088797283337779941324724402501462225528836549661220478783371668959")
        );
        assert_eq!(
            *sig.s(),
            big("2523202440825208709475937830811065542425109372212752003460238913256192595070")
        );
        assert_eq!(
            sig.compress().to_string(),
            "dfedb4315d3f2eb4de2d3c510d7a987dcab67089c8ace06308827bf5bcbe02a2\
             7ed40dab29bf993c928e789d007387998901a24913d44fddb64b1f21fc149405"
        );

        let pk = k.public().unwrap();
        assert!(pk.verify_mimc7(&msg, &sig));
        assert!(!pk.verify_poseidon(&msg, &sig));

        let restored = sig.compress().decompress().unwrap();
        assert_eq!(restored, sig);
        assert!(pk.verify_mimc7(&msg, &restored));
    }

    #[test]
    fn test_sign_poseidon_vector() {
        let k = test_key();
        let msg = test_msg();
        let sig = k.sign_poseidon(&msg).unwrap();

        assert_eq!(
            *sig.s(),
            big("1672775540645840396591609181675628451599263765380031905495115170613215233181")
        );
        assert_eq!(
            sig.compress().to_string(),
            "dfedb4315d3f2eb4de2d3c510d7a987dcab67089c8ace06308827bf5bcbe02a2\
             9d043ece562a8f82bfc0adb640c0107a7d3a27c1c7c1a6179a0da73de5c1b203"
        );
        assert!(k.public().unwrap().verify_poseidon(&msg, &sig));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let k = test_key();
        let pk = k.public().unwrap();
        let msg = test_msg();
        let sig = k.sign_poseidon(&msg).unwrap();

        assert!(!pk.verify_poseidon(&(msg.clone() + 1u8), &sig));

        let bumped = Signature::new(*sig.r8(), sig.s() + 1u8).unwrap();
        assert!(!pk.verify_poseidon(&msg, &bumped));

        let other = PrivateKey::new([7u8; 32]).public().unwrap();
        assert!(!other.verify_poseidon(&msg, &sig));

        // S + l is the same scalar on B8 but is not canonical
        let shifted = Signature::new(*sig.r8(), sig.s() + sub_order()).unwrap();
        assert!(!pk.verify_poseidon(&msg, &shifted));

        // Out-of-range message never verifies
        assert!(!pk.verify_poseidon(crate::constants::q1(), &sig));
    }

    #[test]
    fn test_sign_rejects_out_of_range_message() {
        assert_eq!(
            test_key().sign_poseidon(crate::constants::q1()).unwrap_err(),
            CryptoError::range_q1(Operation::Signature)
        );
    }

    #[test]
    fn test_random_keys_sign_and_verify() {
        let k = PrivateKey::random();
        let pk = k.public().unwrap();
        let msg = BigUint::from(42u8);
        for hash in [ChallengeHash::Poseidon, ChallengeHash::Mimc7] {
            let sig = k.sign(&msg, hash).unwrap();
            assert!(pk.verify(&msg, &sig, hash));
        }
    }

    #[test]
    fn test_public_key_text_and_bytes() {
        let pk = test_key().public().unwrap();
        let text = pk.to_string();
        assert_eq!(text.parse::<PublicKey>().unwrap(), pk);
        assert_eq!(format!("0x{}", text).parse::<PublicKey>().unwrap(), pk);

        let bytes = pk.to_bytes();
        assert_eq!(PublicKey::try_from(&bytes[..]).unwrap(), pk);
        assert_eq!(
            PublicKey::try_from(&bytes[..31]).unwrap_err(),
            CryptoError::InvalidLength {
                expected: 32,
                actual: 31
            }
        );
        assert!("zz".parse::<PublicKeyComp>().is_err());
    }

    #[test]
    fn test_signature_bytes() {
        let sig = test_key().sign_mimc7(&test_msg()).unwrap();
        let bytes = sig.to_bytes();
        assert_eq!(Signature::try_from(&bytes[..]).unwrap(), sig);
        assert!(SignatureComp::try_from(&bytes[..63]).is_err());
        assert_eq!(sig.to_string().parse::<Signature>().unwrap(), sig);
    }

    #[test]
    fn test_signature_s_must_fit() {
        let too_big = BigUint::from(1u8) << 256u32;
        assert!(Signature::new(Point::b8(), too_big).is_err());
    }

    #[test]
    fn test_challenge_hash_parse() {
        assert_eq!("poseidon".parse::<ChallengeHash>(), Ok(ChallengeHash::Poseidon));
        assert_eq!("MiMC7".parse::<ChallengeHash>(), Ok(ChallengeHash::Mimc7));
        assert!("sha256".parse::<ChallengeHash>().is_err());
        assert_eq!(ChallengeHash::Mimc7.to_string(), "mimc7");
    }

    #[test]
    fn test_private_key_debug_hides_secret() {
        assert_eq!(format!("{:?}", test_key()), "PrivateKey(..)");
        assert_eq!(test_key().to_hex(), SK);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_hex_strings() {
        let k = test_key();
        let pk = k.public().unwrap();
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(
            json,
            "\"c433f7a696b7aa3a5224efb3993baf0ccd9e92eecee0c29a3f6c8208a9e81d9e\""
        );
        assert_eq!(serde_json::from_str::<PublicKey>(&json).unwrap(), pk);

        let sig = k.sign_poseidon(&test_msg()).unwrap();
        let json = serde_json::to_string(&sig.compress()).unwrap();
        assert_eq!(serde_json::from_str::<SignatureComp>(&json).unwrap(), sig.compress());
    }
}
