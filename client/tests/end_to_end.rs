//! Assemble, sign and verify complete transactions.
//!
//! Tests assert on recovered keys rather than on signature bytes.

use parity_scale_codec::Encode;

use scorum_client::*;
use scorum_test_utils::*;

#[test]
fn alice_pays_bob() {
    let _ = env_logger::try_init();
    let chain_id = test_chain_id();
    let mut tx = alice_to_bob_transfer();

    tx.sign(&[alice()], &chain_id).unwrap();
    assert_eq!(tx.signatures().len(), 1);

    let required: PublicKey = ALICE_PUBLIC_KEY.parse().unwrap();
    let recovered = tx.verify(&[required], &chain_id).unwrap();
    assert_eq!(recovered.len(), 1);
    assert_eq!(recovered[0].to_string(), ALICE_PUBLIC_KEY);
}

#[test]
fn two_signers() {
    let _ = env_logger::try_init();
    let chain_id = test_chain_id();
    let first = random_private_key();
    let second = random_private_key();
    let mut tx = random_transaction(3);

    tx.sign(&[first.clone(), second.clone()], &chain_id).unwrap();

    let recovered = tx
        .verify(&[second.public_key(), first.public_key()], &chain_id)
        .unwrap();
    assert_eq!(recovered, vec![first.public_key(), second.public_key()]);
}

#[test]
fn missing_signer_fails_verification() {
    let chain_id = test_chain_id();
    let signer = random_private_key();
    let absent = random_private_key().public_key();
    let mut tx = alice_to_bob_transfer();
    tx.sign(&[signer.clone()], &chain_id).unwrap();

    let error = tx
        .verify(&[signer.public_key(), absent], &chain_id)
        .unwrap_err();
    assert_eq!(
        error,
        Error::VerificationFailed {
            key: absent.to_string(),
            compressed: hex::encode(absent.compressed()),
        }
    );
}

#[test]
fn signature_is_bound_to_chain() {
    let mut tx = alice_to_bob_transfer();
    tx.sign(&[alice()], &test_chain_id()).unwrap();

    let other_chain: ChainId = "00".repeat(32).parse().unwrap();
    let result = tx.verify(&[alice().public_key()], &other_chain);
    assert!(matches!(result, Err(Error::VerificationFailed { .. })));
}

#[test]
fn digest_excludes_signatures() {
    let chain_id = test_chain_id();
    let unsigned = alice_to_bob_transfer();
    let mut signed = unsigned.clone();
    signed.sign(&[alice(), random_private_key()], &chain_id).unwrap();

    assert_ne!(unsigned.encode(), signed.encode());
    assert_eq!(unsigned.digest(&chain_id), signed.digest(&chain_id));
    assert_eq!(unsigned.id(), signed.id());
}

#[test]
fn resigning_replaces_signatures() {
    let chain_id = test_chain_id();
    let mut tx = alice_to_bob_transfer();
    tx.sign(&[random_private_key(), random_private_key()], &chain_id)
        .unwrap();
    tx.sign(&[alice()], &chain_id).unwrap();

    let recovered = tx.verify(&[], &chain_id).unwrap();
    assert_eq!(recovered, vec![alice().public_key()]);
}

#[test]
fn id_does_not_depend_on_chain() {
    let tx = alice_to_bob_transfer();
    let other_chain: ChainId = "ff".repeat(32).parse().unwrap();
    assert_ne!(tx.digest(&test_chain_id()), tx.digest(&other_chain));
    assert_eq!(tx.id().len(), 40);
}

#[test]
fn empty_key_set() {
    let mut tx = random_transaction(1);
    assert_eq!(tx.sign(&[], &test_chain_id()), Err(Error::EmptyKeySet));
}

#[test]
fn signed_json_round_trip() {
    let chain_id = test_chain_id();
    let mut tx = random_transaction(2);
    tx.sign(&[random_private_key()], &chain_id).unwrap();

    let json = serde_json::to_string(&tx).unwrap();
    let decoded: SignedTransaction = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.verify(&[], &chain_id).unwrap().len(), 1);
}
