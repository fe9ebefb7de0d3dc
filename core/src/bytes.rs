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

//! `FixedBytes` type, and its validation tests.
use core::convert::TryFrom;
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Exactly `N` raw bytes. Encoded without a length prefix, projected to JSON as lowercase hex.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedBytes<N> {
    pub const LENGTH: usize = N;

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Parse exactly `N` bytes from a hex string.
    pub fn from_hex(input: &str) -> Result<Self, Error> {
        let bytes = hex::decode(input).map_err(|e| Error::malformed("hex bytes", e))?;
        Self::try_from(bytes.as_slice())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        FixedBytes([0u8; N])
    }
}

impl<const N: usize> TryFrom<&[u8]> for FixedBytes<N> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; N]>::try_from(bytes).map(FixedBytes).map_err(|_| {
            Error::malformed(
                "fixed bytes",
                format!("expected {} bytes, got {}", N, bytes.len()),
            )
        })
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(bytes: [u8; N]) -> Self {
        FixedBytes(bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> core::fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FixedBytes({})", self.to_hex())
    }
}

impl<const N: usize> core::fmt::Display for FixedBytes<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<const N: usize> core::str::FromStr for FixedBytes<N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl<const N: usize> Encode for FixedBytes<N> {
    fn size_hint(&self) -> usize {
        N
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.write(&self.0);
    }
}

impl<const N: usize> Decode for FixedBytes<N> {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        let mut bytes = [0u8; N];
        input.read(&mut bytes)?;
        Ok(FixedBytes(bytes))
    }
}

impl<const N: usize> Serialize for FixedBytes<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedBytes<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_has_no_prefix() {
        let bytes = FixedBytes([1u8, 2, 3, 4]);
        assert_eq!(bytes.encode(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn hex_of_wrong_length_is_rejected() {
        assert!(FixedBytes::<4>::from_hex("010203").is_err());
        assert!(FixedBytes::<4>::from_hex("0102030405").is_err());
        assert!(FixedBytes::<4>::from_hex("zz020304").is_err());
        assert_eq!(
            FixedBytes::<4>::from_hex("0a0B0c0D").unwrap(),
            FixedBytes([0x0a, 0x0b, 0x0c, 0x0d])
        );
    }

    #[test]
    fn json_is_lowercase_hex() {
        let bytes = FixedBytes([0xabu8, 0xcd]);
        let json = serde_json::to_string(&bytes).unwrap();
        assert_eq!(json, "\"abcd\"");
        assert_eq!(serde_json::from_str::<FixedBytes<2>>(&json).unwrap(), bytes);
    }

    #[test]
    fn decode_after_encode_is_identity() {
        let bytes = FixedBytes(rand::random::<[u8; 32]>());
        let encoded = bytes.encode();
        let decoded = FixedBytes::<32>::decode(&mut &encoded[..]).unwrap();
        assert_eq!(bytes, decoded);
    }
}
