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

//! Provides [Transaction], [SignedTransaction] and [TransactionBuilder].
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use scorum_core::keys::{recover_public_key, sign_digest};
use scorum_core::{
    Array, Error, Extensions, Operation, PointInTime, PrivateKey, PublicKey, Signature,
};

use crate::chain::ChainId;

/// Reference to a recent block. A transaction is only valid on the fork that contains it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlockRef {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
}

impl BlockRef {
    /// Derive the reference from the hex id of a block.
    ///
    /// The block number is the low 16 bits of the big-endian first word of the id and the prefix
    /// is the little-endian second word.
    pub fn from_block_id(block_id: &str) -> Result<Self, Error> {
        let bytes = hex::decode(block_id).map_err(|e| Error::malformed("block id", e))?;
        if bytes.len() < 8 {
            return Err(Error::malformed("block id", "shorter than 8 bytes"));
        }
        let mut num = [0u8; 4];
        num.copy_from_slice(&bytes[0..4]);
        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(&bytes[4..8]);
        Ok(BlockRef {
            ref_block_num: (u32::from_be_bytes(num) & 0xffff) as u16,
            ref_block_prefix: u32::from_le_bytes(prefix),
        })
    }
}

/// The part of a transaction covered by its signatures.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Transaction {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub expiration: PointInTime,
    pub operations: Array<Operation>,
    #[serde(default)]
    pub extensions: Extensions,
}

impl Transaction {
    pub fn new<Op: Into<Operation>>(
        block_ref: BlockRef,
        expiration: PointInTime,
        operations: impl IntoIterator<Item = Op>,
    ) -> Self {
        Transaction {
            ref_block_num: block_ref.ref_block_num,
            ref_block_prefix: block_ref.ref_block_prefix,
            expiration,
            operations: operations.into_iter().map(Into::into).collect(),
            extensions: Extensions::new(),
        }
    }

    pub fn block_ref(&self) -> BlockRef {
        BlockRef {
            ref_block_num: self.ref_block_num,
            ref_block_prefix: self.ref_block_prefix,
        }
    }

    /// The digest signed by every signer: SHA-256 over the chain id followed by the encoding of
    /// the transaction.
    pub fn digest(&self, chain_id: &ChainId) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(chain_id.as_bytes());
        hasher.update(self.encode());
        let digest: [u8; 32] = hasher.finalize().into();
        log::trace!("digest {} for chain {}", hex::encode(digest), chain_id);
        digest
    }

    /// Hex of the first 20 bytes of the SHA-256 of the encoding. Does not depend on the chain.
    pub fn id(&self) -> String {
        let hash = Sha256::digest(self.encode());
        hex::encode(&hash[..20])
    }
}

/// A [Transaction] together with its signatures.
///
/// The wire encoding is the encoding of the transaction followed by the signature list. The JSON
/// projection is a single object with a `signatures` entry of hex strings.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    transaction: Transaction,
    #[serde(default)]
    signatures: Array<Signature>,
}

impl SignedTransaction {
    /// Create an unsigned transaction from anything convertible into [Operation].
    pub fn new<Op: Into<Operation>>(
        block_ref: BlockRef,
        expiration: PointInTime,
        operations: impl IntoIterator<Item = Op>,
    ) -> Self {
        Transaction::new(block_ref, expiration, operations).into()
    }

    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    /// Replace the signatures with externally produced ones given as hex.
    pub fn with_hex_signatures<S: AsRef<str>>(
        mut self,
        signatures: impl IntoIterator<Item = S>,
    ) -> Result<Self, Error> {
        self.signatures = signatures
            .into_iter()
            .map(|signature| Signature::from_hex(signature.as_ref()))
            .collect::<Result<Array<_>, _>>()?;
        Ok(self)
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn signatures(&self) -> &[Signature] {
        self.signatures.as_slice()
    }

    pub fn digest(&self, chain_id: &ChainId) -> [u8; 32] {
        self.transaction.digest(chain_id)
    }

    pub fn id(&self) -> String {
        self.transaction.id()
    }

    /// Sign the transaction with every key in `keys`, replacing any existing signatures.
    ///
    /// Keys listed more than once sign once, in the position of their first occurrence.
    pub fn sign(&mut self, keys: &[PrivateKey], chain_id: &ChainId) -> Result<(), Error> {
        if keys.is_empty() {
            return Err(Error::EmptyKeySet);
        }
        let mut unique: Vec<&PrivateKey> = Vec::with_capacity(keys.len());
        for key in keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }

        let digest = self.digest(chain_id);
        let id = self.id();
        self.signatures = unique
            .into_iter()
            .map(|key| {
                log::debug!("signing transaction {} with {}", id, key.public_key());
                sign_digest(&digest, key)
            })
            .collect();
        Ok(())
    }

    /// Check that every key in `required` signed the transaction for `chain_id`.
    ///
    /// Returns the keys recovered from all signatures, in signature order.
    pub fn verify(
        &self,
        required: &[PublicKey],
        chain_id: &ChainId,
    ) -> Result<Vec<PublicKey>, Error> {
        let digest = self.digest(chain_id);
        let recovered = self
            .signatures
            .iter()
            .map(|signature| recover_public_key(&digest, signature))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "recovered {} keys from transaction {}",
            recovered.len(),
            self.id()
        );

        for key in required {
            if !recovered.iter().any(|candidate| same_key(candidate, key)) {
                return Err(Error::VerificationFailed {
                    key: key.to_string(),
                    compressed: hex::encode(key.compressed()),
                });
            }
        }
        Ok(recovered)
    }
}

/// [PublicKey] normalizes uncompressed input to the compressed point, so comparing compressed
/// bytes also matches keys given in uncompressed form.
fn same_key(recovered: &PublicKey, required: &PublicKey) -> bool {
    recovered.compressed() == required.compressed()
}

impl From<Transaction> for SignedTransaction {
    fn from(transaction: Transaction) -> Self {
        SignedTransaction {
            transaction,
            signatures: Array::new(),
        }
    }
}

/// Incremental construction of a [SignedTransaction].
///
/// The block reference and the expiration are required; [TransactionBuilder::build] fails with
/// [Error::MissingField] when one of them was not set.
#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    block_ref: Option<BlockRef>,
    expiration: Option<PointInTime>,
    operations: Vec<Operation>,
    extensions: Extensions,
}

impl TransactionBuilder {
    pub fn block_ref(mut self, block_ref: BlockRef) -> Self {
        self.block_ref = Some(block_ref);
        self
    }

    pub fn expiration(mut self, expiration: PointInTime) -> Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn operation(mut self, operation: impl Into<Operation>) -> Self {
        self.operations.push(operation.into());
        self
    }

    pub fn extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn build(self) -> Result<SignedTransaction, Error> {
        let block_ref = self.block_ref.ok_or(Error::MissingField("ref_block_num"))?;
        let expiration = self.expiration.ok_or(Error::MissingField("expiration"))?;
        let mut transaction = Transaction::new(block_ref, expiration, self.operations);
        transaction.extensions = self.extensions;
        Ok(transaction.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use scorum_core::operation::Transfer;

    const CHAIN_ID: &str = "95e4b20f5e669fab5fdaa2fc9f691192118f72900f9906f13b1883e2fb57aa43";

    fn transfer_transaction() -> SignedTransaction {
        SignedTransaction::new(
            BlockRef {
                ref_block_num: 11105,
                ref_block_prefix: 4052692508,
            },
            "2018-01-29T08:37:12".parse().unwrap(),
            vec![Transfer {
                from: "alice".into(),
                to: "bob".into(),
                amount: "0.001 SCR".parse().unwrap(),
                memo: "for food".into(),
            }],
        )
    }

    #[test]
    fn unsigned_encoding() {
        let tx = transfer_transaction();
        assert_eq!(
            hex::encode(tx.transaction().encode()),
            "612b1c2e8ff138dd6e5a010205616c69636503626f6240420f000000000009534352000000\
             0008666f7220666f6f6400"
        );
        // empty signature list
        assert_eq!(tx.encode().last(), Some(&0u8));
        assert_eq!(tx.encode().len(), tx.transaction().encode().len() + 1);
    }

    #[test]
    fn digest_and_id() {
        let tx = transfer_transaction();
        let chain_id: ChainId = CHAIN_ID.parse().unwrap();
        assert_eq!(
            hex::encode(tx.digest(&chain_id)),
            "d7d9922b6e576d021fbaa4cd56bd3c34bce17d188716cb2337eacb590ddb4dad"
        );
        assert_eq!(tx.id(), "c0ff8cedb2aeed265c051025813f0f007ea3607e");
    }

    #[test]
    fn builder_requires_block_ref_and_expiration() {
        let expiration = PointInTime::from_seconds(1_517_215_032);
        assert_eq!(
            SignedTransaction::builder().expiration(expiration).build(),
            Err(Error::MissingField("ref_block_num"))
        );
        assert_eq!(
            SignedTransaction::builder()
                .block_ref(BlockRef::default())
                .build(),
            Err(Error::MissingField("expiration"))
        );

        let built = SignedTransaction::builder()
            .block_ref(transfer_transaction().transaction().block_ref())
            .expiration("2018-01-29T08:37:12".parse().unwrap())
            .operation(Transfer {
                from: "alice".into(),
                to: "bob".into(),
                amount: "0.001 SCR".parse().unwrap(),
                memo: "for food".into(),
            })
            .build()
            .unwrap();
        assert_eq!(built, transfer_transaction());
    }

    #[test]
    fn block_ref_from_block_id() {
        let block_ref =
            BlockRef::from_block_id("00002b611c2e8ff1aabbccddeeff00112233445566778899").unwrap();
        assert_eq!(block_ref.ref_block_num, 11105);
        assert_eq!(block_ref.ref_block_prefix, 4052692508);

        assert!(BlockRef::from_block_id("00002b61").is_err());
        assert!(BlockRef::from_block_id("zz").is_err());
    }

    #[test]
    fn empty_key_set() {
        let mut tx = transfer_transaction();
        let chain_id: ChainId = CHAIN_ID.parse().unwrap();
        assert_eq!(tx.sign(&[], &chain_id), Err(Error::EmptyKeySet));
        assert!(tx.signatures().is_empty());
    }

    #[test]
    fn duplicate_keys_sign_once() {
        let mut tx = transfer_transaction();
        let chain_id: ChainId = CHAIN_ID.parse().unwrap();
        let key = PrivateKey::generate();
        tx.sign(&[key.clone(), key.clone()], &chain_id).unwrap();
        assert_eq!(tx.signatures().len(), 1);
        assert_eq!(tx.verify(&[key.public_key()], &chain_id).unwrap().len(), 1);
    }

    #[test]
    fn hex_signatures() {
        let mut signed = transfer_transaction();
        let chain_id: ChainId = CHAIN_ID.parse().unwrap();
        let key = PrivateKey::generate();
        signed.sign(&[key.clone()], &chain_id).unwrap();
        let hexes: Vec<String> = signed.signatures().iter().map(|s| s.to_hex()).collect();

        let copied = transfer_transaction().with_hex_signatures(&hexes).unwrap();
        assert_eq!(copied, signed);
        assert!(transfer_transaction()
            .with_hex_signatures(vec!["abcd"])
            .is_err());
    }

    #[test]
    fn json_round_trip() {
        let mut tx = transfer_transaction();
        let chain_id: ChainId = CHAIN_ID.parse().unwrap();
        tx.sign(&[PrivateKey::generate()], &chain_id).unwrap();

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["ref_block_num"], 11105);
        assert_eq!(json["expiration"], "2018-01-29T08:37:12");
        assert_eq!(json["operations"][0][0], "transfer");
        assert_eq!(json["operations"][0][1]["amount"], "0.001000000 SCR");
        assert_eq!(json["extensions"], serde_json::json!([]));
        assert_eq!(json["signatures"][0].as_str().unwrap().len(), 130);

        let decoded: SignedTransaction = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn json_without_signatures_and_extensions() {
        let json = r#"{
            "ref_block_num": 11105,
            "ref_block_prefix": 4052692508,
            "expiration": "2018-01-29T08:37:12",
            "operations": [
                ["transfer", {"from": "alice", "to": "bob", "amount": "0.001 SCR", "memo": "for food"}]
            ]
        }"#;
        let mut tx: SignedTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx, transfer_transaction());

        let chain_id: ChainId = CHAIN_ID.parse().unwrap();
        let key = PrivateKey::generate();
        tx.sign(&[key.clone()], &chain_id).unwrap();
        assert_eq!(tx.verify(&[key.public_key()], &chain_id).unwrap().len(), 1);
    }

    #[test]
    fn verify_accepts_uncompressed_required_key() {
        let mut tx = transfer_transaction();
        let chain_id: ChainId = CHAIN_ID.parse().unwrap();
        let key = PrivateKey::generate();
        tx.sign(&[key.clone()], &chain_id).unwrap();

        let uncompressed = key.public_key().uncompressed().unwrap();
        let required = PublicKey::from_slice(&uncompressed).unwrap();
        assert!(tx.verify(&[required], &chain_id).is_ok());
    }

    #[test]
    fn wire_round_trip() {
        let mut tx = transfer_transaction();
        tx.sign(&[PrivateKey::generate()], &CHAIN_ID.parse().unwrap())
            .unwrap();
        let encoded = tx.encode();
        assert_eq!(SignedTransaction::decode(&mut &encoded[..]).unwrap(), tx);
    }
}
