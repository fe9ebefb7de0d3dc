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

//! `Varint` type, the LEB128 integer used for ordinals and container lengths.
use core::convert::TryFrom;
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};

/// Unsigned integer encoded as LEB128: seven bits per byte, least significant group first, with
/// the high bit set on every byte but the last.
///
/// ```rust
/// # use scorum_core::Varint;
/// # use parity_scale_codec::Encode;
/// assert_eq!(Varint(300).encode(), vec![0xac, 0x02]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Varint(pub u64);

impl Varint {
    /// A `u64` never needs more than ten groups of seven bits.
    const MAXIMUM_LENGTH: usize = 10;

    /// Decode a varint used as a length or count.
    ///
    /// Every encoded element takes at least one byte so the length is checked against the
    /// remaining input before anything is allocated.
    pub(crate) fn decode_len<I: Input>(input: &mut I) -> Result<usize, CodecError> {
        let value = Self::decode(input)?.0;
        let len = usize::try_from(value)
            .map_err(|_| CodecError::from("Length prefix does not fit usize."))?;
        match input.remaining_len()? {
            Some(remaining) if len > remaining => Err("Length prefix exceeds input.".into()),
            _ => Ok(len),
        }
    }
}

impl From<u32> for Varint {
    fn from(value: u32) -> Self {
        Varint(value.into())
    }
}

impl From<usize> for Varint {
    fn from(value: usize) -> Self {
        Varint(value as u64)
    }
}

impl Encode for Varint {
    fn size_hint(&self) -> usize {
        let bits = 64 - self.0.leading_zeros() as usize;
        core::cmp::max(1, (bits + 6) / 7)
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        let mut value = self.0;
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                dest.push_byte(byte);
                return;
            }
            dest.push_byte(byte | 0x80);
        }
    }
}

impl Decode for Varint {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        let mut value: u64 = 0;
        for index in 0..Self::MAXIMUM_LENGTH {
            let byte = input.read_byte()?;
            let group = u64::from(byte & 0x7f);
            let shift = 7 * index as u32;
            if shift == 63 && group > 1 {
                return Err("Varint overflows 64 bits.".into());
            }
            value |= group << shift;
            if byte & 0x80 == 0 {
                return Ok(Varint(value));
            }
        }
        Err("Varint is longer than 10 bytes.".into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_byte_values() {
        assert_eq!(Varint(0).encode(), vec![0x00]);
        assert_eq!(Varint(0x23).encode(), vec![0x23]);
        assert_eq!(Varint(127).encode(), vec![0x7f]);
    }

    #[test]
    fn multi_byte_values() {
        assert_eq!(Varint(128).encode(), vec![0x80, 0x01]);
        assert_eq!(Varint(86400).encode(), vec![0x80, 0xa3, 0x05]);
        assert_eq!(Varint(u64::MAX).encode().len(), 10);
    }

    #[test]
    fn size_hint_matches_encoding() {
        for value in [0, 1, 127, 128, 16_383, 16_384, u64::from(u32::MAX), u64::MAX] {
            let varint = Varint(value);
            assert_eq!(varint.size_hint(), varint.encode().len(), "value {}", value);
        }
    }

    #[test]
    fn decode_after_encode_is_identity() {
        for value in [0, 300, 86400, u64::from(u32::MAX), u64::MAX] {
            let encoded = Varint(value).encode();
            assert_eq!(Varint::decode(&mut &encoded[..]).unwrap(), Varint(value));
        }
    }

    #[test]
    fn decode_rejects_overlong_input() {
        let overlong = [0xffu8; 11];
        assert!(Varint::decode(&mut &overlong[..]).is_err());

        let mut overflow = vec![0xffu8; 9];
        overflow.push(0x02);
        assert!(Varint::decode(&mut &overflow[..]).is_err());
    }

    #[test]
    fn decode_rejects_truncated_input() {
        let truncated = [0x80u8];
        assert!(Varint::decode(&mut &truncated[..]).is_err());
    }
}
