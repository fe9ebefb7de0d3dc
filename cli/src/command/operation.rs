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

//! Define the commands supported by the CLI related to the operation registry.

use super::*;

/// Operation registry commands
#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    List(List),
}

impl CommandT for Command {
    fn run(self) -> Result<(), CommandError> {
        match self {
            Command::List(cmd) => cmd.run(),
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
/// List the operations known to the client with their wire ordinals.
pub struct List {
    /// List the actions that can be proposed with `proposal_create` instead.
    #[structopt(long)]
    proposals: bool,
}

impl CommandT for List {
    fn run(self) -> Result<(), CommandError> {
        let lines = if self.proposals {
            proposal_lines()
        } else {
            operation_lines()
        };
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }
}

fn operation_lines() -> Vec<String> {
    OperationKind::ALL
        .iter()
        .map(|kind| {
            let suffix = if kind.is_virtual() { "  (virtual)" } else { "" };
            format!("{:>3}  {}{}", kind.ordinal(), kind.name(), suffix)
        })
        .collect()
}

fn proposal_lines() -> Vec<String> {
    ProposalOperationKind::ALL
        .iter()
        .map(|kind| format!("{:>3}  {}", kind.ordinal(), kind.name()))
        .collect()
}
