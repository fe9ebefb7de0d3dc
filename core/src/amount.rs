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

//! Asset amounts such as `"10.000000000 SCR"`.
use core::cmp::Ordering;
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::variant::OrdinalTable;

ordinal_table! {
    /// Assets known to the chain.
    pub enum Asset: "asset" {
        /// The liquid token.
        Scr = "SCR",
        /// Scorum power, the vested token.
        Sp = "SP",
    }
}

impl Asset {
    /// Width of the zero padded symbol on the wire.
    const SYMBOL_WIDTH: usize = 7;

    /// Number of fractional decimal digits.
    pub fn precision(self) -> u8 {
        match self {
            Asset::Scr => 9,
            Asset::Sp => 9,
        }
    }

    pub fn symbol(self) -> &'static str {
        self.name()
    }

    /// Look up an asset by symbol, failing with [Error::UnknownAsset].
    pub fn from_symbol(symbol: &str) -> Result<Self, Error> {
        Asset::from_name(symbol).map_err(|_| Error::UnknownAsset(symbol.to_string()))
    }

    fn scale(self) -> i64 {
        10i64.pow(u32::from(self.precision()))
    }
}

/// A signed quantity of an [Asset] in its smallest unit.
///
/// Encoded as `i64_le(magnitude) ++ u8(precision) ++ symbol` where the symbol is padded with
/// zeros to seven bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Amount {
    magnitude: i64,
    asset: Asset,
}

impl Amount {
    pub fn from_units(magnitude: i64, asset: Asset) -> Self {
        Amount { magnitude, asset }
    }

    pub fn zero(asset: Asset) -> Self {
        Amount::from_units(0, asset)
    }

    pub fn magnitude(&self) -> i64 {
        self.magnitude
    }

    pub fn asset(&self) -> Asset {
        self.asset
    }

    /// `None` if the assets differ or the sum overflows.
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        if self.asset != other.asset {
            return None;
        }
        let magnitude = self.magnitude.checked_add(other.magnitude)?;
        Some(Amount::from_units(magnitude, self.asset))
    }

    /// `None` if the assets differ or the difference overflows.
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        if self.asset != other.asset {
            return None;
        }
        let magnitude = self.magnitude.checked_sub(other.magnitude)?;
        Some(Amount::from_units(magnitude, self.asset))
    }

    pub fn checked_mul(&self, factor: i64) -> Option<Amount> {
        let magnitude = self.magnitude.checked_mul(factor)?;
        Some(Amount::from_units(magnitude, self.asset))
    }

    /// Convert a decimal number of whole tokens into units of `asset`.
    ///
    /// Digits beyond the asset precision are rounded half away from zero.
    fn parse_decimal(decimal: &str, asset: Asset) -> Result<i64, Error> {
        let malformed = |reason: &str| Error::malformed("amount", format!("`{}`: {}", decimal, reason));

        let (negative, unsigned) = match decimal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, decimal),
        };
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(malformed("no digits"));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(malformed("not a decimal number"));
        }

        let precision = usize::from(asset.precision());
        let overflow = || malformed("out of range");

        let mut magnitude: i64 = 0;
        for digit in whole.bytes() {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(i64::from(digit - b'0')))
                .ok_or_else(overflow)?;
        }
        let kept = fraction.bytes().chain(core::iter::repeat(b'0')).take(precision);
        for digit in kept {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(i64::from(digit - b'0')))
                .ok_or_else(overflow)?;
        }
        if let Some(first_dropped) = fraction.as_bytes().get(precision) {
            if *first_dropped >= b'5' {
                magnitude = magnitude.checked_add(1).ok_or_else(overflow)?;
            }
        }

        Ok(if negative { -magnitude } else { magnitude })
    }
}

impl core::str::FromStr for Amount {
    type Err = Error;

    /// Parse `"<decimal> <SYMBOL>"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (decimal, symbol) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| Error::malformed("amount", format!("`{}` has no asset symbol", s)))?;
        let asset = Asset::from_symbol(symbol.trim())?;
        let magnitude = Amount::parse_decimal(decimal, asset)?;
        Ok(Amount::from_units(magnitude, asset))
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let scale = self.asset.scale().unsigned_abs();
        let absolute = self.magnitude.unsigned_abs();
        let sign = if self.magnitude < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            absolute / scale,
            absolute % scale,
            self.asset.symbol(),
            width = usize::from(self.asset.precision())
        )
    }
}

impl PartialOrd for Amount {
    /// Amounts of different assets are not comparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.asset == other.asset {
            Some(self.magnitude.cmp(&other.magnitude))
        } else {
            None
        }
    }
}

impl Encode for Amount {
    fn size_hint(&self) -> usize {
        8 + 1 + Asset::SYMBOL_WIDTH
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        self.magnitude.encode_to(dest);
        self.asset.precision().encode_to(dest);
        let mut symbol = [0u8; Asset::SYMBOL_WIDTH];
        let name = self.asset.symbol().as_bytes();
        symbol[..name.len()].copy_from_slice(name);
        dest.write(&symbol);
    }
}

impl Decode for Amount {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        let magnitude = i64::decode(input)?;
        let precision = u8::decode(input)?;
        let mut symbol = [0u8; Asset::SYMBOL_WIDTH];
        input.read(&mut symbol)?;
        let end = symbol.iter().position(|b| *b == 0).unwrap_or(symbol.len());
        if symbol[end..].iter().any(|b| *b != 0) {
            return Err("Asset symbol has bytes after its terminator.".into());
        }
        let name = core::str::from_utf8(&symbol[..end])
            .map_err(|_| CodecError::from("Asset symbol is not ASCII."))?;
        let asset =
            Asset::from_symbol(name).map_err(|_| CodecError::from("Unknown asset symbol."))?;
        if asset.precision() != precision {
            return Err("Asset precision does not match its symbol.".into());
        }
        Ok(Amount::from_units(magnitude, asset))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scr(text: &str) -> i64 {
        text.parse::<Amount>().unwrap().magnitude()
    }

    #[test]
    fn parse_scales_by_precision() {
        assert_eq!(scr("10.000000000 SCR"), 10_000_000_000);
        assert_eq!(scr("0.002003045 SCR"), 2_003_045);
        assert_eq!(scr("0.001 SCR"), 1_000_000);
        assert_eq!(scr("0 SCR"), 0);
        assert_eq!(scr("1.01 SCR"), 1_010_000_000);
        assert_eq!(scr("-1.5 SCR"), -1_500_000_000);
    }

    #[test]
    fn parse_rounds_extra_digits_half_away_from_zero() {
        assert_eq!(scr("0.0000000005 SCR"), 1);
        assert_eq!(scr("0.0000000004 SCR"), 0);
        assert_eq!(scr("-0.0000000005 SCR"), -1);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            "1.0 CUSTOM".parse::<Amount>(),
            Err(Error::UnknownAsset("CUSTOM".into()))
        );
        assert!("1.0".parse::<Amount>().is_err());
        assert!("1.0.0 SCR".parse::<Amount>().is_err());
        assert!("abc SCR".parse::<Amount>().is_err());
        assert!(". SCR".parse::<Amount>().is_err());
        assert!("99999999999 SCR".parse::<Amount>().is_err());
    }

    #[test]
    fn display_prints_full_precision() {
        let amount: Amount = "0.001 SCR".parse().unwrap();
        assert_eq!(amount.to_string(), "0.001000000 SCR");
        let negative = Amount::from_units(-1_500_000_000, Asset::Sp);
        assert_eq!(negative.to_string(), "-1.500000000 SP");
    }

    #[test]
    fn encode_pads_symbol() {
        let amount: Amount = "10.000000000 SCR".parse().unwrap();
        assert_eq!(
            amount.encode(),
            hex::decode("00e40b54020000000953435200000000").unwrap()
        );
        let power: Amount = "10.000000000 SP".parse().unwrap();
        assert_eq!(
            power.encode(),
            hex::decode("00e40b54020000000953500000000000").unwrap()
        );
    }

    #[test]
    fn decode_after_encode_is_identity() {
        let amount: Amount = "123.456789012 SP".parse().unwrap();
        let encoded = amount.encode();
        assert_eq!(Amount::decode(&mut &encoded[..]).unwrap(), amount);
    }

    #[test]
    fn decode_rejects_wrong_precision() {
        let encoded = hex::decode("00e40b54020000000353435200000000").unwrap();
        assert!(Amount::decode(&mut &encoded[..]).is_err());
    }

    #[test]
    fn decode_rejects_bytes_after_symbol_terminator() {
        let encoded = hex::decode("00e40b540200000009534352005800ff").unwrap();
        assert!(Amount::decode(&mut &encoded[..]).is_err());
    }

    #[test]
    fn arithmetic_requires_equal_assets() {
        let one: Amount = "1 SCR".parse().unwrap();
        let two: Amount = "2 SCR".parse().unwrap();
        let power: Amount = "1 SP".parse().unwrap();

        assert_eq!(one.checked_add(&one), Some(two));
        assert_eq!(two.checked_sub(&one), Some(one));
        assert_eq!(one.checked_mul(2), Some(two));
        assert_eq!(one.checked_add(&power), None);
        assert!(one < two);
        assert_eq!(one.partial_cmp(&power), None);
    }

    #[test]
    fn json_is_text_form() {
        let amount: Amount = serde_json::from_str("\"0.001 SCR\"").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"0.001000000 SCR\"");
    }
}
