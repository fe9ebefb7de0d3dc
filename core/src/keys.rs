// Scorum Client
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! secp256k1 keys and recoverable signatures in their Graphene representations.
//!
//! * Public keys are written as the address prefix followed by the base58 encoding of the
//!   compressed point and the first four bytes of its RIPEMD-160 hash.
//! * Private keys are exchanged in wallet import format (WIF).
//! * Signatures are 65 bytes: a header byte `27 + 4 + recovery_id` followed by the compact `r`
//!   and `s` values.
use core::convert::TryFrom;
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};
use ripemd::Ripemd160;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, Secp256k1, SecretKey};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

use crate::bytes::FixedBytes;
use crate::error::Error;

/// Address prefix of public keys on the Scorum main chain.
pub const DEFAULT_ADDRESS_PREFIX: &str = "SCR";

/// A 65-byte recoverable signature.
pub type Signature = FixedBytes<65>;

/// First byte of a signature is this offset plus the recovery id. The extra four mark the key as
/// compressed.
const SIGNATURE_HEADER_OFFSET: u8 = 27 + 4;

const WIF_VERSION: u8 = 0x80;

fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// A compressed secp256k1 public key.
///
/// The all-zero "null key" is representable so that records carrying it can be encoded, but it
/// cannot be converted to an uncompressed point. Keys are ordered by their compressed bytes.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PublicKey([u8; 33]);

impl PublicKey {
    pub const NULL: PublicKey = PublicKey([0u8; 33]);

    /// Build a key from its compressed or uncompressed encoding.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() == 33 && bytes.iter().all(|b| *b == 0) {
            return Ok(PublicKey::NULL);
        }
        let key = secp256k1::PublicKey::from_slice(bytes)
            .map_err(|e| Error::malformed("public key", e))?;
        Ok(PublicKey(key.serialize()))
    }

    pub fn is_null(&self) -> bool {
        *self == PublicKey::NULL
    }

    pub fn compressed(&self) -> [u8; 33] {
        self.0
    }

    pub fn uncompressed(&self) -> Result<[u8; 65], Error> {
        Ok(self.to_secp()?.serialize_uncompressed())
    }

    fn to_secp(self) -> Result<secp256k1::PublicKey, Error> {
        secp256k1::PublicKey::from_slice(&self.0).map_err(|e| Error::malformed("public key", e))
    }

    fn checksum(bytes: &[u8]) -> [u8; 4] {
        let hash = Ripemd160::digest(bytes);
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Parse the textual form `prefix ++ base58(key ++ checksum)`.
    pub fn from_str_with_prefix(s: &str, prefix: &str) -> Result<Self, Error> {
        let encoded = s.strip_prefix(prefix).ok_or_else(|| {
            Error::malformed("public key", format!("`{}` does not start with {}", s, prefix))
        })?;
        let data = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| Error::malformed("public key", e))?;
        if data.len() != 37 {
            return Err(Error::malformed(
                "public key",
                format!("expected 37 bytes, got {}", data.len()),
            ));
        }
        let (key, checksum) = data.split_at(33);
        if Self::checksum(key) != checksum {
            return Err(Error::malformed("public key", "checksum mismatch"));
        }
        Self::from_slice(key)
    }

    /// The textual form of this key with the given address prefix.
    pub fn to_string_with_prefix(&self, prefix: &str) -> String {
        let mut data = self.0.to_vec();
        data.extend_from_slice(&Self::checksum(&self.0));
        format!("{}{}", prefix, bs58::encode(data).into_string())
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        PublicKey::from_slice(bytes)
    }
}

impl core::str::FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PublicKey::from_str_with_prefix(s, DEFAULT_ADDRESS_PREFIX)
    }
}

impl core::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_string_with_prefix(DEFAULT_ADDRESS_PREFIX))
    }
}

impl core::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl Encode for PublicKey {
    fn size_hint(&self) -> usize {
        33
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.write(&self.0);
    }
}

impl Decode for PublicKey {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        let bytes = <[u8; 33]>::decode(input)?;
        PublicKey::from_slice(&bytes).map_err(|_| CodecError::from("Invalid public key."))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The JSON form always uses [DEFAULT_ADDRESS_PREFIX]. Keys with another prefix are converted
/// with [PublicKey::from_str_with_prefix] before they are put into JSON.
impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// A secp256k1 secret key.
///
/// `Debug` shows the public key only.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    /// A fresh random key.
    pub fn generate() -> Self {
        loop {
            // Almost every 32 byte string is a valid scalar.
            if let Ok(key) = SecretKey::from_slice(&rand::random::<[u8; 32]>()) {
                return PrivateKey(key);
            }
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        SecretKey::from_slice(bytes)
            .map(PrivateKey)
            .map_err(|e| Error::malformed("private key", e))
    }

    /// Decode a key in wallet import format.
    pub fn from_wif(wif: &str) -> Result<Self, Error> {
        let data = bs58::decode(wif)
            .into_vec()
            .map_err(|e| Error::malformed("WIF", e))?;
        if data.len() != 37 {
            return Err(Error::malformed(
                "WIF",
                format!("expected 37 bytes, got {}", data.len()),
            ));
        }
        let (payload, checksum) = data.split_at(33);
        if payload[0] != WIF_VERSION {
            return Err(Error::malformed(
                "WIF",
                format!("unexpected version byte {:#04x}", payload[0]),
            ));
        }
        if double_sha256(payload)[..4] != *checksum {
            return Err(Error::malformed("WIF", "checksum mismatch"));
        }
        Self::from_bytes(&payload[1..])
    }

    pub fn to_wif(&self) -> String {
        let mut data = Vec::with_capacity(37);
        data.push(WIF_VERSION);
        data.extend_from_slice(&self.0.secret_bytes());
        let checksum = double_sha256(&data);
        data.extend_from_slice(&checksum[..4]);
        bs58::encode(data).into_string()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(secp256k1::PublicKey::from_secret_key(secp(), &self.0).serialize())
    }
}

impl core::str::FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrivateKey::from_wif(s)
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PrivateKey({})", self.public_key())
    }
}

/// Whether both `r` and `s` of a compact signature are canonical in the Graphene sense: neither
/// has its high bit set and neither has a redundant leading zero byte.
fn is_canonical(compact: &[u8; 64]) -> bool {
    let canonical = |half: &[u8]| half[0] & 0x80 == 0 && !(half[0] == 0 && half[1] & 0x80 == 0);
    canonical(&compact[..32]) && canonical(&compact[32..])
}

/// Sign a 32 byte digest.
///
/// The nonce is derived deterministically (RFC 6979). If the result is not canonical the
/// derivation is repeated with extra entropy from a counter until it is.
pub fn sign_digest(digest: &[u8; 32], key: &PrivateKey) -> Signature {
    let message = Message::from_digest(*digest);
    let mut attempt: u64 = 0;
    loop {
        let signature = if attempt == 0 {
            secp().sign_ecdsa_recoverable(&message, &key.0)
        } else {
            let mut nonce_data = [0u8; 32];
            nonce_data[..8].copy_from_slice(&attempt.to_le_bytes());
            secp().sign_ecdsa_recoverable_with_noncedata(&message, &key.0, &nonce_data)
        };
        let (recovery_id, compact) = signature.serialize_compact();
        if is_canonical(&compact) {
            let mut bytes = [0u8; 65];
            bytes[0] = SIGNATURE_HEADER_OFFSET + recovery_id.to_i32() as u8;
            bytes[1..].copy_from_slice(&compact);
            return FixedBytes(bytes);
        }
        attempt = attempt.wrapping_add(1);
        log::trace!("signature is not canonical, retrying with extra nonce data {}", attempt);
    }
}

/// Recover the public key that produced `signature` over `digest`.
pub fn recover_public_key(digest: &[u8; 32], signature: &Signature) -> Result<PublicKey, Error> {
    let bytes = signature.as_bytes();
    let recovery_id = bytes[0]
        .checked_sub(SIGNATURE_HEADER_OFFSET)
        .ok_or_else(|| Error::malformed("signature", "header byte below 31"))?;
    let recovery_id = RecoveryId::from_i32(i32::from(recovery_id))
        .map_err(|e| Error::malformed("signature", e))?;
    let signature = RecoverableSignature::from_compact(&bytes[1..], recovery_id)
        .map_err(|e| Error::malformed("signature", e))?;
    let key = secp()
        .recover_ecdsa(&Message::from_digest(*digest), &signature)
        .map_err(|e| Error::malformed("signature", e))?;
    Ok(PublicKey(key.serialize()))
}

#[cfg(test)]
mod test {
    use super::*;

    const WIF: &str = "5JCvGL2GVVpjDrKzbKWPHEvuwFs5HdEGwr4brp8RQiwrpEFcZNP";
    const PUBLIC_KEY: &str = "SCR5bgzuweaHx231escVuPVxgudSyUWdKAH7fKgxZfp3nKSirzFRa";

    #[test]
    fn wif_maps_to_known_public_key() {
        let key = PrivateKey::from_wif(WIF).unwrap();
        assert_eq!(key.public_key().to_string(), PUBLIC_KEY);
        assert_eq!(key.to_wif(), WIF);
    }

    #[test]
    fn wif_with_bad_checksum_is_rejected() {
        let mut tampered = WIF.to_string();
        tampered.pop();
        tampered.push('Q');
        assert!(PrivateKey::from_wif(&tampered).is_err());
        assert!(PrivateKey::from_wif("not base58 0OIl").is_err());
    }

    #[test]
    fn public_key_string_round_trip() {
        let key: PublicKey = PUBLIC_KEY.parse().unwrap();
        assert_eq!(key.to_string(), PUBLIC_KEY);
        assert_eq!(key.compressed()[0] & 0xfe, 0x02);
        assert_eq!(key.uncompressed().unwrap()[0], 0x04);

        let other_prefix = key.to_string_with_prefix("STM");
        assert!(other_prefix.starts_with("STM"));
        assert_eq!(PublicKey::from_str_with_prefix(&other_prefix, "STM").unwrap(), key);
        assert!(other_prefix.parse::<PublicKey>().is_err());
    }

    #[test]
    fn public_key_checksum_is_verified() {
        let mut tampered = PUBLIC_KEY.to_string();
        tampered.pop();
        tampered.push('b');
        assert!(tampered.parse::<PublicKey>().is_err());
    }

    #[test]
    fn json_uses_default_prefix() {
        let key: PublicKey = serde_json::from_str(&format!("\"{}\"", PUBLIC_KEY)).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), format!("\"{}\"", PUBLIC_KEY));

        let other_prefix = format!("\"{}\"", key.to_string_with_prefix("TST"));
        assert!(serde_json::from_str::<PublicKey>(&other_prefix).is_err());
    }

    #[test]
    fn null_key_is_representable() {
        let text = PublicKey::NULL.to_string();
        let parsed: PublicKey = text.parse().unwrap();
        assert!(parsed.is_null());
        assert_eq!(parsed.encode(), vec![0u8; 33]);
        assert!(parsed.uncompressed().is_err());
    }

    #[test]
    fn encode_is_compressed_point() {
        let key: PublicKey = PUBLIC_KEY.parse().unwrap();
        let encoded = key.encode();
        assert_eq!(encoded.len(), 33);
        assert_eq!(PublicKey::decode(&mut &encoded[..]).unwrap(), key);
    }

    #[test]
    fn signatures_are_canonical_and_recoverable() {
        let key = PrivateKey::generate();
        for round in 0u8..16 {
            let digest: [u8; 32] = Sha256::digest([round]).into();
            let signature = sign_digest(&digest, &key);
            let bytes = signature.as_bytes();
            assert!((31..=34).contains(&bytes[0]));
            let mut compact = [0u8; 64];
            compact.copy_from_slice(&bytes[1..]);
            assert!(is_canonical(&compact));
            assert_eq!(recover_public_key(&digest, &signature).unwrap(), key.public_key());
        }
    }

    #[test]
    fn signing_is_deterministic() {
        let key = PrivateKey::from_wif(WIF).unwrap();
        let digest = [7u8; 32];
        assert_eq!(sign_digest(&digest, &key), sign_digest(&digest, &key));
    }

    #[test]
    fn recover_rejects_bad_header() {
        let key = PrivateKey::generate();
        let digest = [1u8; 32];
        let mut signature = sign_digest(&digest, &key);
        signature.0[0] = 3;
        assert!(recover_public_key(&digest, &signature).is_err());
    }

    #[test]
    fn canonical_check() {
        let mut compact = [0x01u8; 64];
        assert!(is_canonical(&compact));
        compact[0] = 0x80;
        assert!(!is_canonical(&compact));
        compact[0] = 0x00;
        compact[1] = 0x01;
        assert!(!is_canonical(&compact));
        compact[1] = 0x80;
        assert!(is_canonical(&compact));
        compact[32] = 0xff;
        assert!(!is_canonical(&compact));
    }

    #[test]
    fn private_key_debug_hides_secret() {
        let key = PrivateKey::from_wif(WIF).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains(PUBLIC_KEY));
        assert!(!debug.contains(WIF));
    }
}
