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

//! Define the commands supported by the CLI related to transactions.
//!
//! Every command reads a transaction in its JSON form from a file, or from stdin when the file is
//! `-`.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use parity_scale_codec::Encode as _;

use super::*;

/// Transaction related commands
#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    Encode(EncodeTx),
    Id(ShowId),
    Digest(ShowDigest),
    Sign(Sign),
    Verify(Verify),
}

impl CommandT for Command {
    fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Encode(cmd) => cmd.run(),
            Command::Id(cmd) => cmd.run(),
            Command::Digest(cmd) => cmd.run(),
            Command::Sign(cmd) => cmd.run(),
            Command::Verify(cmd) => cmd.run(),
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Print the hex wire encoding of a transaction, signatures included.
pub struct EncodeTx {
    #[structopt(value_name = "file")]
    file: PathBuf,
}

impl CommandT for EncodeTx {
    fn run(self) -> Result<(), CommandError> {
        let tx = read_transaction(&self.file)?;
        println!("{}", hex::encode(tx.encode()));
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Print the transaction id.
pub struct ShowId {
    #[structopt(value_name = "file")]
    file: PathBuf,
}

impl CommandT for ShowId {
    fn run(self) -> Result<(), CommandError> {
        let tx = read_transaction(&self.file)?;
        println!("{}", tx.id());
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Print the digest signers sign for the configured chain.
pub struct ShowDigest {
    #[structopt(value_name = "file")]
    file: PathBuf,

    #[structopt(flatten)]
    chain_options: ChainOptions,
}

impl CommandT for ShowDigest {
    fn run(self) -> Result<(), CommandError> {
        let config = self.chain_options.config();
        let tx = read_transaction(&self.file)?;
        println!("{}", hex::encode(tx.digest(config.chain_id()?)));
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Sign a transaction and print it with its new signatures.
///
/// Existing signatures are replaced.
pub struct Sign {
    #[structopt(value_name = "file")]
    file: PathBuf,

    #[structopt(flatten)]
    pub(crate) chain_options: ChainOptions,

    #[structopt(flatten)]
    pub(crate) sign_options: SignOptions,
}

impl CommandT for Sign {
    fn run(self) -> Result<(), CommandError> {
        let config = self.chain_options.config();
        let mut tx = read_transaction(&self.file)?;
        tx.sign(&self.sign_options.keys, config.chain_id()?)?;
        println!("{}", serde_json::to_string_pretty(&tx)?);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Check that a transaction is signed by the given keys and print all signing keys.
pub struct Verify {
    #[structopt(value_name = "file")]
    file: PathBuf,

    /// Public key that must have signed the transaction. May be repeated.
    #[structopt(long = "key", value_name = "public key")]
    keys: Vec<String>,

    #[structopt(flatten)]
    chain_options: ChainOptions,
}

impl CommandT for Verify {
    fn run(self) -> Result<(), CommandError> {
        let config = self.chain_options.config();
        let required = self
            .keys
            .iter()
            .map(|key| PublicKey::from_str_with_prefix(key, &config.address_prefix))
            .collect::<Result<Vec<_>, _>>()?;
        let tx = read_transaction(&self.file)?;
        let recovered = tx.verify(&required, config.chain_id()?)?;
        println!("✓ Signatures verified");
        for key in recovered {
            println!("{}", key.to_string_with_prefix(&config.address_prefix));
        }
        Ok(())
    }
}

fn read_transaction(path: &Path) -> Result<SignedTransaction, CommandError> {
    let read_error = |source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut json = String::new();
    if path == Path::new("-") {
        std::io::stdin()
            .read_to_string(&mut json)
            .map_err(read_error)?;
    } else {
        json = std::fs::read_to_string(path).map_err(read_error)?;
    }
    parse_transaction(&json)
}

fn parse_transaction(json: &str) -> Result<SignedTransaction, CommandError> {
    let tx: SignedTransaction = serde_json::from_str(json)?;
    log::debug!(
        "read transaction {} with {} operations",
        tx.id(),
        tx.transaction().operations.len()
    );
    Ok(tx)
}

#[cfg(test)]
mod test {
    use super::*;

    const TRANSFER_JSON: &str = r#"{
        "ref_block_num": 11105,
        "ref_block_prefix": 4052692508,
        "expiration": "2018-01-29T08:37:12",
        "operations": [
            ["transfer", {"from": "alice", "to": "bob", "amount": "0.001 SCR", "memo": "for food"}]
        ],
        "extensions": [],
        "signatures": []
    }"#;

    #[test]
    fn parse_transfer() {
        let tx = parse_transaction(TRANSFER_JSON).unwrap();
        assert_eq!(tx.id(), "c0ff8cedb2aeed265c051025813f0f007ea3607e");
        assert!(tx.signatures().is_empty());
    }

    #[test]
    fn reject_unknown_operation() {
        let json = TRANSFER_JSON.replace("\"transfer\"", "\"transfer_to_vesting\"");
        assert!(matches!(
            parse_transaction(&json),
            Err(CommandError::InvalidJson(_))
        ));
    }

    #[test]
    fn missing_file() {
        let result = read_transaction(Path::new("/nonexistent/tx.json"));
        assert!(matches!(result, Err(CommandError::Read { .. })));
    }
}
