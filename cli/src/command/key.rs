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

//! Define the commands supported by the CLI related to keys.

use super::*;

/// Key related commands
#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    Generate(Generate),
    Show(Show),
}

impl CommandT for Command {
    fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Generate(cmd) => cmd.run(),
            Command::Show(cmd) => cmd.run(),
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Generate a random private key and print it together with its public key.
pub struct Generate {
    #[structopt(flatten)]
    chain_options: ChainOptions,
}

impl CommandT for Generate {
    fn run(self) -> Result<(), CommandError> {
        let key = PrivateKey::generate();
        println!("WIF: {}", key.to_wif());
        println!(
            "public key: {}",
            key.public_key()
                .to_string_with_prefix(&self.chain_options.address_prefix)
        );
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Show the public key of a private key given in wallet import format.
pub struct Show {
    #[structopt(value_name = "wif")]
    key: PrivateKey,

    #[structopt(flatten)]
    chain_options: ChainOptions,
}

impl CommandT for Show {
    fn run(self) -> Result<(), CommandError> {
        let public_key = self.key.public_key();
        println!(
            "public key: {}",
            public_key.to_string_with_prefix(&self.chain_options.address_prefix)
        );
        println!("compressed: {}", hex::encode(public_key.compressed()));
        Ok(())
    }
}
