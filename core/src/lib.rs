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

//! Basic types used by the Scorum client.
//!
//! Every type in this crate has a canonical Graphene wire encoding, provided through
//! [parity_scale_codec::Encode] and [parity_scale_codec::Decode], and a canonical JSON projection,
//! provided through [serde]. Scalars whose Graphene encoding matches SCALE (`bool`, fixed-width
//! little-endian integers, fixed arrays and `Option`) are used as is. Everything with a length
//! prefix uses [Varint] instead of SCALE's compact integers.

#[macro_use]
pub mod variant;

pub mod amount;
pub mod authority;
pub mod betting;
pub mod bytes;
pub mod containers;
pub mod keys;
pub mod operation;
pub mod registry;
pub mod text;
pub mod time_point;
pub mod uuid128;
pub mod varint;

mod error;

pub use amount::{Amount, Asset};
pub use authority::Authority;
pub use betting::{Market, Odds, Sport, Wincase};
pub use bytes::FixedBytes;
pub use containers::{Array, Map, Set};
pub use error::Error;
pub use keys::{PrivateKey, PublicKey, Signature};
pub use operation::{BudgetType, Operation, ProposalOperation};
pub use registry::{OperationKind, ProposalOperationKind};
pub use text::Text;
pub use time_point::PointInTime;
pub use uuid128::Uuid;
pub use variant::{FutureExtension, OrdinalTable, Tagged};
pub use varint::Varint;

/// Name of an account on chain.
pub type AccountName = Text;

/// The `extensions` field carried by transactions. Always empty on the current chain.
pub type Extensions = Set<FutureExtension>;
