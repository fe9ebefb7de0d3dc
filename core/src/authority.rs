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

//! `Authority`, the weighted threshold of accounts and keys that may act for an account.
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input};
use serde::{Deserialize, Deserializer, Serialize};

use crate::containers::Map;
use crate::keys::PublicKey;
use crate::AccountName;

/// Accounts and keys with their weights. An action is authorized once the weights of its
/// signers reach `weight_threshold`.
///
/// Both maps are kept sorted (accounts by name, keys by compressed bytes) so that equal
/// authorities always have equal encodings.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Serialize)]
pub struct Authority {
    weight_threshold: u32,
    account_auths: Map<AccountName, u16>,
    key_auths: Map<PublicKey, u16>,
}

impl Authority {
    pub fn new(
        weight_threshold: u32,
        account_auths: Vec<(AccountName, u16)>,
        key_auths: Vec<(PublicKey, u16)>,
    ) -> Self {
        let mut account_auths = account_auths;
        account_auths.sort_by(|a, b| a.0.cmp(&b.0));
        let mut key_auths = key_auths;
        key_auths.sort_by(|a, b| a.0.cmp(&b.0));
        Authority {
            weight_threshold,
            account_auths: account_auths.into(),
            key_auths: key_auths.into(),
        }
    }

    /// An authority satisfied by a signature of `key` alone.
    pub fn single_key(key: PublicKey) -> Self {
        Authority::new(1, Vec::new(), vec![(key, 1)])
    }

    pub fn weight_threshold(&self) -> u32 {
        self.weight_threshold
    }

    pub fn account_auths(&self) -> &Map<AccountName, u16> {
        &self.account_auths
    }

    pub fn key_auths(&self) -> &Map<PublicKey, u16> {
        &self.key_auths
    }
}

/// Wire and JSON shape of [Authority] before its maps are sorted.
#[derive(Decode, Deserialize)]
struct UnsortedAuthority {
    weight_threshold: u32,
    account_auths: Map<AccountName, u16>,
    key_auths: Map<PublicKey, u16>,
}

impl From<UnsortedAuthority> for Authority {
    fn from(unsorted: UnsortedAuthority) -> Self {
        Authority::new(
            unsorted.weight_threshold,
            unsorted.account_auths.into_vec(),
            unsorted.key_auths.into_vec(),
        )
    }
}

impl Decode for Authority {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        UnsortedAuthority::decode(input).map(Authority::from)
    }
}

impl<'de> Deserialize<'de> for Authority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        UnsortedAuthority::deserialize(deserializer).map(Authority::from)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::keys::PrivateKey;

    #[test]
    fn maps_are_sorted_regardless_of_insertion_order() {
        let first = PrivateKey::generate().public_key();
        let second = PrivateKey::generate().public_key();

        let a = Authority::new(
            2,
            vec![("bob".into(), 1), ("alice".into(), 1)],
            vec![(first, 1), (second, 1)],
        );
        let b = Authority::new(
            2,
            vec![("alice".into(), 1), ("bob".into(), 1)],
            vec![(second, 1), (first, 1)],
        );

        assert_eq!(a, b);
        assert_eq!(a.encode(), b.encode());
        let names: Vec<&str> = a.account_auths().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);

        let hexes: Vec<String> = a
            .key_auths()
            .iter()
            .map(|(k, _)| hex::encode(k.compressed()))
            .collect();
        let mut sorted = hexes.clone();
        sorted.sort();
        assert_eq!(hexes, sorted);
    }

    #[test]
    fn single_key_layout() {
        let key = PrivateKey::generate().public_key();
        let encoded = Authority::single_key(key).encode();
        let mut expected = vec![1, 0, 0, 0, 0, 1];
        expected.extend_from_slice(&key.compressed());
        expected.extend_from_slice(&[1, 0]);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn decode_sorts() {
        let alice: AccountName = "alice".into();
        let bob: AccountName = "bob".into();
        let mut encoded = 1u32.encode();
        encoded.extend(Map::from(vec![(bob.clone(), 1u16), (alice.clone(), 2u16)]).encode());
        encoded.extend(Map::<PublicKey, u16>::new().encode());

        let decoded = Authority::decode(&mut &encoded[..]).unwrap();
        assert_eq!(decoded, Authority::new(1, vec![(alice, 2), (bob, 1)], vec![]));
    }

    #[test]
    fn json_shape() {
        let authority = Authority::new(1, vec![("alice".into(), 1)], vec![]);
        let json = serde_json::to_value(&authority).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "weight_threshold": 1,
                "account_auths": [["alice", 1]],
                "key_auths": []
            })
        );
        assert_eq!(serde_json::from_value::<Authority>(json).unwrap(), authority);
    }
}
