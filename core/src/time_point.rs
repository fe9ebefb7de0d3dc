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

//! `PointInTime` type, a UTC instant with second precision.
use chrono::{NaiveDateTime, TimeZone, Utc};
use core::convert::TryFrom;
use parity_scale_codec::{Decode, Encode};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Seconds since the Unix epoch, encoded as `u32` little endian.
///
/// The text form is `YYYY-MM-DDTHH:MM:SS` in UTC without a zone suffix.
///
/// ```rust
/// # use scorum_core::PointInTime;
/// let time: PointInTime = "2018-08-03T10:12:43".parse().unwrap();
/// assert_eq!(time.seconds(), 0x5b64_2a9b);
/// assert_eq!(time.to_string(), "2018-08-03T10:12:43");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Encode, Decode)]
pub struct PointInTime(u32);

impl PointInTime {
    const FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S";

    pub fn from_seconds(seconds: u32) -> Self {
        PointInTime(seconds)
    }

    pub fn seconds(self) -> u32 {
        self.0
    }

    /// The instant `seconds` from now, used to build transaction expirations.
    pub fn from_now(seconds: i64) -> Result<Self, Error> {
        let now = Utc::now().timestamp();
        let target = now
            .checked_add(seconds)
            .ok_or_else(|| Error::malformed("point in time", "offset overflows"))?;
        Self::from_timestamp(target)
    }

    fn from_timestamp(timestamp: i64) -> Result<Self, Error> {
        u32::try_from(timestamp).map(PointInTime).map_err(|_| {
            Error::malformed(
                "point in time",
                format!("{} is outside the representable range", timestamp),
            )
        })
    }
}

impl core::str::FromStr for PointInTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let naive = NaiveDateTime::parse_from_str(s, Self::FORMAT)
            .map_err(|e| Error::malformed("point in time", format!("`{}`: {}", s, e)))?;
        Self::from_timestamp(Utc.from_utc_datetime(&naive).timestamp())
    }
}

impl core::fmt::Display for PointInTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match Utc.timestamp_opt(i64::from(self.0), 0).single() {
            Some(time) => write!(f, "{}", time.format(Self::FORMAT)),
            None => Err(core::fmt::Error),
        }
    }
}

impl Serialize for PointInTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PointInTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
