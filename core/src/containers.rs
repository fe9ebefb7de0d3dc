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

//! Length prefixed containers: [Array], [Set] and [Map].
//!
//! All three encode as `varint(count)` followed by their elements in order. They differ in what
//! they guarantee about that order and about duplicates.
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};
use serde::{Deserialize, Deserializer, Serialize};

use crate::varint::Varint;

fn encode_elements<'a, E, T>(elements: impl ExactSizeIterator<Item = &'a E>, dest: &mut T)
where
    E: Encode + 'a,
    T: Output + ?Sized,
{
    Varint::from(elements.len()).encode_to(dest);
    for element in elements {
        element.encode_to(dest);
    }
}

fn decode_elements<E: Decode, I: Input>(input: &mut I) -> Result<Vec<E>, CodecError> {
    let len = Varint::decode_len(input)?;
    let mut elements = Vec::with_capacity(len);
    for _ in 0..len {
        elements.push(E::decode(input)?);
    }
    Ok(elements)
}

/// Ordered sequence of elements.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, derive_more::From)]
#[serde(transparent)]
pub struct Array<T>(Vec<T>);

impl<T> Array<T> {
    pub fn new() -> Self {
        Array(Vec::new())
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Array::new()
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: Encode> Encode for Array<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_elements(self.0.iter(), dest)
    }
}

impl<T: Decode> Decode for Array<T> {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        decode_elements(input).map(Array)
    }
}

/// Sequence of elements without duplicates.
///
/// Two elements are duplicates when their encodings are equal. Construction keeps the first
/// occurrence and the order of the remaining elements.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct Set<T>(Vec<T>);

impl<T: Encode> Set<T> {
    pub fn from_vec(elements: Vec<T>) -> Self {
        let mut seen: Vec<Vec<u8>> = Vec::with_capacity(elements.len());
        let mut unique = Vec::with_capacity(elements.len());
        for element in elements {
            let encoded = element.encode();
            if !seen.contains(&encoded) {
                seen.push(encoded);
                unique.push(element);
            }
        }
        Set(unique)
    }
}

impl<T> Set<T> {
    pub fn new() -> Self {
        Set(Vec::new())
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Set::new()
    }
}

impl<T: Encode> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Set::from_vec(iter.into_iter().collect())
    }
}

impl<T: Encode> Encode for Set<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_elements(self.0.iter(), dest)
    }
}

impl<T: Decode> Decode for Set<T> {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        decode_elements(input).map(Set)
    }
}

impl<'de, T: Encode + Deserialize<'de>> Deserialize<'de> for Set<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Set::from_vec)
    }
}

/// Key-value pairs kept in the order the caller provided them.
///
/// The JSON projection is a list of `[key, value]` pairs.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Map<K, V>(Vec<(K, V)>);

impl<K, V> Map<K, V> {
    pub fn new() -> Self {
        Map(Vec::new())
    }

    pub fn iter(&self) -> core::slice::Iter<'_, (K, V)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<(K, V)> {
        self.0
    }
}

impl<K: PartialEq, V> Map<K, V> {
    pub fn get(&self, key: &K) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl<K, V> Default for Map<K, V> {
    fn default() -> Self {
        Map::new()
    }
}

impl<K, V> From<Vec<(K, V)>> for Map<K, V> {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Map(pairs)
    }
}

impl<K, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Map(iter.into_iter().collect())
    }
}

impl<K: Encode, V: Encode> Encode for Map<K, V> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        Varint::from(self.0.len()).encode_to(dest);
        for (key, value) in &self.0 {
            key.encode_to(dest);
            value.encode_to(dest);
        }
    }
}

impl<K: Decode, V: Decode> Decode for Map<K, V> {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        decode_elements::<(K, V), I>(input).map(Map)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Text;

    #[test]
    fn array_keeps_order() {
        let array: Array<u16> = vec![3, 1, 2].into();
        assert_eq!(array.encode(), vec![0x03, 3, 0, 1, 0, 2, 0]);
        assert_eq!(Array::<u16>::new().encode(), vec![0x00]);
    }

    #[test]
    fn set_drops_duplicate_encodings() {
        let set = Set::from_vec(vec![5u8, 1, 5, 2, 1]);
        assert_eq!(set.into_vec(), vec![5, 1, 2]);
    }

    #[test]
    fn set_json_deduplicates() {
        let set: Set<u8> = serde_json::from_str("[1, 1, 2]").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(serde_json::to_string(&set).unwrap(), "[1,2]");
    }

    #[test]
    fn map_encodes_in_caller_order() {
        let map: Map<Text, u16> = vec![(Text::from("bob"), 2), (Text::from("alice"), 1)].into();
        assert_eq!(
            map.encode(),
            vec![0x02, 0x03, b'b', b'o', b'b', 2, 0, 0x05, b'a', b'l', b'i', b'c', b'e', 1, 0]
        );
        assert_eq!(map.get(&Text::from("alice")), Some(&1));
    }

    #[test]
    fn map_json_is_list_of_pairs() {
        let map: Map<Text, u16> = vec![(Text::from("alice"), 1)].into();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!([["alice", 1]]));
        assert_eq!(serde_json::from_value::<Map<Text, u16>>(json).unwrap(), map);
    }

    #[test]
    fn decode_after_encode_is_identity() {
        let array: Array<Text> = vec![Text::from("a"), Text::from("bc")].into();
        let encoded = array.encode();
        assert_eq!(Array::<Text>::decode(&mut &encoded[..]).unwrap(), array);
    }

    #[test]
    fn decode_rejects_count_beyond_input() {
        let encoded = [0x05u8, 0x01];
        assert!(Array::<u8>::decode(&mut &encoded[..]).is_err());
    }
}
