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

//! Assemble, hash, sign and verify Scorum transactions.
//!
//! A [SignedTransaction] is built from a [BlockRef], an expiration and a list of operations from
//! [scorum_core::operation]. Signing and verification are bound to a [ChainId]; the transaction id
//! is not.
//!
//! ```no_run
//! # use scorum_client::*;
//! # fn main() -> Result<(), Error> {
//! let chain_id: ChainId = "95e4b20f5e669fab5fdaa2fc9f691192118f72900f9906f13b1883e2fb57aa43".parse()?;
//! let key = PrivateKey::from_wif("5JCvGL2GVVpjDrKzbKWPHEvuwFs5HdEGwr4brp8RQiwrpEFcZNP")?;
//! let mut tx = SignedTransaction::new(
//!     BlockRef::from_block_id("00002b611c2e8ff1aabbccddeeff00112233445566778899")?,
//!     PointInTime::from_now(60)?,
//!     vec![operation::Transfer {
//!         from: "alice".into(),
//!         to: "bob".into(),
//!         amount: "0.001 SCR".parse()?,
//!         memo: "for food".into(),
//!     }],
//! );
//! tx.sign(&[key.clone()], &chain_id)?;
//! tx.verify(&[key.public_key()], &chain_id)?;
//! # Ok(())
//! # }
//! ```

mod chain;
mod transaction;

pub use scorum_core::*;

pub use crate::chain::{ChainConfig, ChainId};
pub use crate::transaction::{BlockRef, SignedTransaction, Transaction, TransactionBuilder};
