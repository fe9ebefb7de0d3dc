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

//! `Text` type, and its encoding tests.
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};
use serde::{Deserialize, Serialize};

use crate::varint::Varint;

/// A UTF-8 [String] encoded as `varint(byte_length) ++ bytes`.
///
/// The JSON projection is the raw string.
///
/// ```rust
/// # use scorum_core::Text;
/// # use parity_scale_codec::Encode;
/// assert_eq!(Text::from("alice").encode(), b"\x05alice".to_vec());
/// ```
#[derive(
    Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Text(String);

impl Text {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Text {
    fn from(string: String) -> Self {
        Text(string)
    }
}

impl From<&str> for Text {
    fn from(string: &str) -> Self {
        Text(string.to_string())
    }
}

impl From<Text> for String {
    fn from(text: Text) -> Self {
        text.0
    }
}

impl core::str::FromStr for Text {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Text::from(s))
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Encode for Text {
    fn size_hint(&self) -> usize {
        Varint::from(self.0.len()).size_hint() + self.0.len()
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        Varint::from(self.0.len()).encode_to(dest);
        dest.write(self.0.as_bytes());
    }
}

impl Decode for Text {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        let len = Varint::decode_len(input)?;
        let mut bytes = vec![0u8; len];
        input.read(&mut bytes)?;
        String::from_utf8(bytes)
            .map(Text)
            .map_err(|_| CodecError::from("Text is not valid UTF-8."))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_prefixes_byte_length() {
        assert_eq!(
            Text::from("initdelegate").encode(),
            hex::decode("0c696e697464656c6567617465").unwrap()
        );
        assert_eq!(Text::from("").encode(), vec![0x00]);
        // Length counts bytes, not characters.
        assert_eq!(Text::from("ô").encode(), vec![0x02, 0xc3, 0xb4]);
    }

    #[test]
    fn encode_then_decode() {
        let text = Text::from("ôítÏйгますいщαφδвы");

        let encoded = text.encode();

        let decoded = Text::decode(&mut &encoded[..]).unwrap();

        assert_eq!(text, decoded)
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let encoded = [0x02u8, 0xc3, 0x28];
        assert!(Text::decode(&mut &encoded[..]).is_err());
    }

    #[test]
    fn long_text_uses_multi_byte_prefix() {
        let text = Text::from("x".repeat(200));
        let encoded = text.encode();
        assert_eq!(&encoded[..2], &[0xc8, 0x01]);
        assert_eq!(encoded.len(), 202);
    }

    #[test]
    fn json_is_raw_string() {
        let json = serde_json::to_string(&Text::from("for food")).unwrap();
        assert_eq!(json, "\"for food\"");
    }
}
