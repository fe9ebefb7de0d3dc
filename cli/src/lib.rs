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

//! Define the command line parser and interface.

use std::path::PathBuf;

use scorum_client::*;
use structopt::StructOpt;
use thiserror::Error as ThisError;

pub mod logger;

mod command;
use command::{key, operation, tx};

/// The type that captures the command line.
#[derive(StructOpt, Clone, Debug)]
#[structopt(max_term_width = 80)]
pub struct CommandLine {
    #[structopt(subcommand)]
    pub command: Command,
}

impl CommandLine {
    pub fn run(self) -> Result<(), CommandError> {
        self.command.run()
    }
}

/// Chain-related command-line options
#[derive(StructOpt, Clone, Debug)]
pub struct ChainOptions {
    /// Hex encoded id of the chain transactions are signed for.
    #[structopt(long, env = "SCORUM_CHAIN_ID", value_name = "hex")]
    pub chain_id: Option<ChainId>,

    /// Prefix of public key strings given with --key and printed. Keys inside transaction JSON
    /// always use SCR.
    #[structopt(long, default_value = "SCR", value_name = "prefix")]
    pub address_prefix: String,
}

impl ChainOptions {
    pub fn config(&self) -> ChainConfig {
        ChainConfig {
            chain_id: self.chain_id.clone(),
            address_prefix: self.address_prefix.clone(),
        }
    }
}

/// Signing-related command-line options
#[derive(StructOpt, Clone, Debug)]
pub struct SignOptions {
    /// Private key in wallet import format. Repeat the option to sign with several keys.
    #[structopt(
        long = "wif",
        env = "SCORUM_WIF",
        value_name = "wif",
        use_delimiter = true,
        hide_env_values = true
    )]
    pub keys: Vec<PrivateKey>,
}

/// The supported [CommandLine] commands.
/// The commands are grouped by domain.
#[derive(StructOpt, Clone, Debug)]
pub enum Command {
    /// Generate and inspect keys
    Key(key::Command),
    /// Encode, hash, sign and verify transactions given as JSON
    Tx(tx::Command),
    /// Inspect the operation registry
    Operation(operation::Command),
}

impl CommandT for Command {
    fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Key(cmd) => cmd.run(),
            Command::Tx(cmd) => cmd.run(),
            Command::Operation(cmd) => cmd.run(),
        }
    }
}

/// The trait that every command must implement.
pub trait CommandT {
    fn run(self) -> Result<(), CommandError>;
}

/// Error returned by [CommandT::run].
///
/// Implements [From] for client errors and JSON errors.
#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error(transparent)]
    ClientError(#[from] Error),

    #[error("cannot read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid transaction JSON")]
    InvalidJson(#[from] serde_json::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_sign_command() {
        let cmd_line = CommandLine::from_iter_safe(vec![
            "scorum-cli",
            "tx",
            "sign",
            "tx.json",
            "--chain-id",
            "95e4b20f5e669fab5fdaa2fc9f691192118f72900f9906f13b1883e2fb57aa43",
            "--wif",
            "5JCvGL2GVVpjDrKzbKWPHEvuwFs5HdEGwr4brp8RQiwrpEFcZNP",
        ])
        .unwrap();
        match cmd_line.command {
            Command::Tx(tx::Command::Sign(sign)) => {
                assert_eq!(sign.sign_options.keys.len(), 1);
                assert!(sign.chain_options.config().chain_id().is_ok());
                assert_eq!(sign.chain_options.address_prefix, "SCR");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn reject_malformed_wif() {
        let result = CommandLine::from_iter_safe(vec!["scorum-cli", "key", "show", "not-a-wif"]);
        assert!(result.is_err());
    }
}
