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

//! Provides [ChainId] and [ChainConfig].
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use scorum_core::keys::DEFAULT_ADDRESS_PREFIX;
use scorum_core::Error;

/// Identifier of the chain a transaction is signed for. It is prepended to the transaction
/// bytes when the signing digest is derived, so signatures for one chain are invalid on all
/// others.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChainId(Vec<u8>);

impl ChainId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl core::str::FromStr for ChainId {
    type Err = Error;

    /// Parse a hex encoded chain id.
    ///
    /// An empty string fails with [Error::MissingChainId].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::MissingChainId);
        }
        hex::decode(s)
            .map(ChainId)
            .map_err(|e| Error::malformed("chain id", e))
    }
}

impl core::fmt::Display for ChainId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Parameters of the chain the client works with.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
    /// Prefix of public key strings given and printed outside of transactions. Keys inside
    /// transaction JSON always use `SCR`.
    pub address_prefix: String,
}

impl ChainConfig {
    pub fn new(chain_id: ChainId) -> Self {
        ChainConfig {
            chain_id: Some(chain_id),
            ..ChainConfig::default()
        }
    }

    /// The configured chain id. Fails with [Error::MissingChainId] if there is none.
    pub fn chain_id(&self) -> Result<&ChainId, Error> {
        self.chain_id.as_ref().ok_or(Error::MissingChainId)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            chain_id: None,
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_chain_id_is_missing() {
        assert_eq!("".parse::<ChainId>(), Err(Error::MissingChainId));
        assert_eq!("  ".parse::<ChainId>(), Err(Error::MissingChainId));
    }

    #[test]
    fn chain_id_must_be_hex() {
        match "not hex".parse::<ChainId>() {
            Err(Error::MalformedInput { what, .. }) => assert_eq!(what, "chain id"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn chain_id_display_is_hex() {
        let hex = "95e4b20f5e669fab5fdaa2fc9f691192118f72900f9906f13b1883e2fb57aa43";
        let chain_id: ChainId = hex.parse().unwrap();
        assert_eq!(chain_id.as_bytes().len(), 32);
        assert_eq!(chain_id.to_string(), hex);
    }

    #[test]
    fn config_without_chain_id() {
        let config = ChainConfig::default();
        assert_eq!(config.chain_id(), Err(Error::MissingChainId));
        assert_eq!(config.address_prefix, "SCR");

        let config = ChainConfig::new("00ff".parse().unwrap());
        assert_eq!(config.chain_id().unwrap().as_bytes(), &[0x00, 0xff]);
    }
}
