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

//! Operation payloads that can be submitted in a transaction.
//!
//! Each payload is a plain struct whose field order is its wire order. It is tied to its entry in
//! the operation registry through [Tagged]. [Operation] is the sum of all payloads and encodes as
//! `varint(ordinal) ++ payload`.
//!
//! ```rust
//! # use scorum_core::*;
//! # use scorum_core::operation::Transfer;
//! # use parity_scale_codec::Encode;
//! let op: Operation = Transfer {
//!     from: "alice".into(),
//!     to: "bob".into(),
//!     amount: "0.001 SCR".parse().unwrap(),
//!     memo: "for food".into(),
//! }
//! .into();
//! assert_eq!(op.name(), "transfer");
//! assert_eq!(op.encode()[0], 2);
//! ```
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::amount::Amount;
use crate::authority::Authority;
use crate::betting::{Market, Odds, Sport, Wincase};
use crate::containers::Array;
use crate::keys::PublicKey;
use crate::registry::{OperationKind, ProposalOperationKind};
use crate::text::Text;
use crate::time_point::PointInTime;
use crate::uuid128::Uuid;
use crate::variant::{OrdinalTable, Tagged};
use crate::varint::Varint;
use crate::AccountName;

ordinal_table! {
    /// Where the ads paid for by a budget are shown.
    pub enum BudgetType: "budget type" {
        Post = "post",
        Banner = "banner",
    }
}

/// Encoded as `u64` little endian.
impl Encode for BudgetType {
    fn size_hint(&self) -> usize {
        8
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        u64::from(self.ordinal()).encode_to(dest)
    }
}

impl Decode for BudgetType {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        BudgetType::from_ordinal(u64::decode(input)?).ok_or_else(|| "Unknown budget type.".into())
    }
}

impl Serialize for BudgetType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for BudgetType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        BudgetType::from_name(&name).map_err(de::Error::custom)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Vote {
    pub voter: AccountName,
    pub author: AccountName,
    pub permlink: Text,
    pub weight: i16,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Comment {
    pub parent_author: AccountName,
    pub parent_permlink: Text,
    pub author: AccountName,
    pub permlink: Text,
    pub title: Text,
    pub body: Text,
    pub json_metadata: Text,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Transfer {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: Amount,
    pub memo: Text,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct TransferToScorumpower {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: Amount,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct WithdrawScorumpower {
    pub account: AccountName,
    pub scorumpower: Amount,
}

/// Account creation paid for by the registration committee.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct AccountCreateByCommittee {
    pub creator: AccountName,
    pub new_account_name: AccountName,
    pub owner: Authority,
    pub active: Authority,
    pub posting: Authority,
    pub memo_key: PublicKey,
    pub json_metadata: Text,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct AccountCreate {
    pub fee: Amount,
    pub creator: AccountName,
    pub new_account_name: AccountName,
    pub owner: Authority,
    pub active: Authority,
    pub posting: Authority,
    pub memo_key: PublicKey,
    pub json_metadata: Text,
}

/// Authorities that are `None` are left unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub account: AccountName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Authority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<Authority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posting: Option<Authority>,
    pub memo_key: PublicKey,
    pub json_metadata: Text,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct WitnessProps {
    pub account_creation_fee: Amount,
    pub maximum_block_size: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct WitnessUpdate {
    pub owner: AccountName,
    pub url: Text,
    pub block_signing_key: PublicKey,
    pub props: WitnessProps,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct AccountWitnessVote {
    pub account: AccountName,
    pub witness: AccountName,
    pub approve: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct AccountWitnessProxy {
    pub account: AccountName,
    pub proxy: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DeleteComment {
    pub author: AccountName,
    pub permlink: Text,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DeclineVotingRights {
    pub account: AccountName,
    pub decline: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DelegateScorumpowerShares {
    pub delegator: AccountName,
    pub delegatee: AccountName,
    pub scorumpower: Amount,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct CreateBudget {
    #[serde(rename = "type")]
    pub budget_type: BudgetType,
    pub uuid: Uuid,
    pub owner: AccountName,
    pub json_metadata: Text,
    pub balance: Amount,
    pub start: PointInTime,
    pub deadline: PointInTime,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct CloseBudget {
    #[serde(rename = "type")]
    pub budget_type: BudgetType,
    pub uuid: Uuid,
    pub owner: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct ProposalVote {
    pub voting_account: AccountName,
    pub proposal_id: i64,
}

/// Proposes a committee action. It is applied once enough committee members vote for it
/// within `lifetime_sec`.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct ProposalCreate {
    pub creator: AccountName,
    pub lifetime_sec: u32,
    pub operation: ProposalOperation,
}

impl ProposalCreate {
    pub fn new(
        creator: impl Into<AccountName>,
        lifetime_sec: u32,
        operation: impl Into<ProposalOperation>,
    ) -> Self {
        ProposalCreate {
            creator: creator.into(),
            lifetime_sec,
            operation: operation.into(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct CloseBudgetByAdvertisingModerator {
    #[serde(rename = "type")]
    pub budget_type: BudgetType,
    pub uuid: Uuid,
    pub moderator: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct UpdateBudget {
    #[serde(rename = "type")]
    pub budget_type: BudgetType,
    pub uuid: Uuid,
    pub owner: AccountName,
    pub json_metadata: Text,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct CreateGame {
    pub uuid: Uuid,
    pub moderator: AccountName,
    pub name: Text,
    pub start_time: PointInTime,
    pub auto_resolve_delay_sec: u32,
    pub game: Sport,
    pub markets: Array<Market>,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct CancelGame {
    pub uuid: Uuid,
    pub moderator: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct UpdateGameMarkets {
    pub uuid: Uuid,
    pub moderator: AccountName,
    pub markets: Array<Market>,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct UpdateGameStartTime {
    pub uuid: Uuid,
    pub moderator: AccountName,
    pub start_time: PointInTime,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct PostGameResults {
    pub uuid: Uuid,
    pub moderator: AccountName,
    pub wincases: Array<Wincase>,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct PostBet {
    pub uuid: Uuid,
    pub better: AccountName,
    pub game_uuid: Uuid,
    pub wincase: Wincase,
    pub odds: Odds,
    pub stake: Amount,
    pub live: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct CancelPendingBets {
    pub bet_uuids: Array<Uuid>,
    pub better: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct RegistrationCommitteeAddMember {
    pub account: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct RegistrationCommitteeExcludeMember {
    pub account: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct RegistrationCommitteeChangeQuorum {
    pub quorum: u16,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DevelopmentCommitteeAddMember {
    pub account: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DevelopmentCommitteeExcludeMember {
    pub account: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DevelopmentCommitteeChangeQuorum {
    pub quorum: u16,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DevelopmentCommitteeWithdrawVesting {
    pub vesting_shares: Amount,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DevelopmentCommitteeTransfer {
    pub amount: Amount,
    pub to: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DevelopmentCommitteeEmpowerAdvertisingModerator {
    pub account: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DevelopmentCommitteeChangePostBudgetsAuctionProperties {
    pub auction_coefficients: Array<u16>,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DevelopmentCommitteeChangeBannerBudgetsAuctionProperties {
    pub auction_coefficients: Array<u16>,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DevelopmentCommitteeEmpowerBettingModerator {
    pub account: AccountName,
}

#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct DevelopmentCommitteeChangeBettingResolveDelay {
    pub delay_sec: u32,
}

/// Generate the sum type over payload structs whose names match entries of `$table`.
///
/// Registry entries without a payload struct (virtual operations and operations the client does
/// not model) are rejected when decoding and deserializing.
macro_rules! operations {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $table:ident {
            $($variant:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, PartialEq, derive_more::From)]
        pub enum $name {
            $($variant($variant)),*
        }

        $(
            impl Tagged for $variant {
                type Table = $table;

                const KIND: $table = $table::$variant;
            }
        )*

        impl $name {
            pub fn kind(&self) -> $table {
                match self {
                    $($name::$variant(_) => <$variant as Tagged>::KIND),*
                }
            }

            pub fn name(&self) -> &'static str {
                self.kind().name()
            }

            pub fn ordinal(&self) -> u32 {
                self.kind().ordinal()
            }
        }

        impl Encode for $name {
            fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
                Varint::from(self.ordinal()).encode_to(dest);
                match self {
                    $($name::$variant(payload) => payload.encode_to(dest)),*
                }
            }
        }

        impl Decode for $name {
            fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
                let ordinal = Varint::decode(input)?.0;
                let kind = $table::from_ordinal(ordinal)
                    .ok_or_else(|| CodecError::from(concat!("Unknown ", stringify!($table), " ordinal.")))?;
                match kind {
                    $($table::$variant => $variant::decode(input).map($name::$variant),)*
                    #[allow(unreachable_patterns)]
                    _ => Err(concat!(stringify!($table), " has no payload schema.").into()),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $($name::$variant(payload) => (self.name(), payload).serialize(serializer)),*
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let (name, payload): (String, serde_json::Value) =
                    Deserialize::deserialize(deserializer)?;
                let kind = $table::from_name(&name).map_err(de::Error::custom)?;
                match kind {
                    $(
                        $table::$variant => serde_json::from_value::<$variant>(payload)
                            .map($name::$variant)
                            .map_err(de::Error::custom),
                    )*
                    #[allow(unreachable_patterns)]
                    _ => Err(de::Error::custom(format!(
                        "operation `{}` has no payload schema",
                        name
                    ))),
                }
            }
        }
    };
}

operations! {
    /// An operation submitted in a transaction.
    pub enum Operation: OperationKind {
        Vote,
        Comment,
        Transfer,
        TransferToScorumpower,
        WithdrawScorumpower,
        AccountCreateByCommittee,
        AccountCreate,
        AccountUpdate,
        WitnessUpdate,
        AccountWitnessVote,
        AccountWitnessProxy,
        DeleteComment,
        DeclineVotingRights,
        DelegateScorumpowerShares,
        CreateBudget,
        CloseBudget,
        ProposalVote,
        ProposalCreate,
        CloseBudgetByAdvertisingModerator,
        UpdateBudget,
        CreateGame,
        CancelGame,
        UpdateGameMarkets,
        UpdateGameStartTime,
        PostGameResults,
        PostBet,
        CancelPendingBets,
    }
}

operations! {
    /// A committee action carried by [ProposalCreate].
    pub enum ProposalOperation: ProposalOperationKind {
        RegistrationCommitteeAddMember,
        RegistrationCommitteeExcludeMember,
        RegistrationCommitteeChangeQuorum,
        DevelopmentCommitteeAddMember,
        DevelopmentCommitteeExcludeMember,
        DevelopmentCommitteeChangeQuorum,
        DevelopmentCommitteeWithdrawVesting,
        DevelopmentCommitteeTransfer,
        DevelopmentCommitteeEmpowerAdvertisingModerator,
        DevelopmentCommitteeChangePostBudgetsAuctionProperties,
        DevelopmentCommitteeChangeBannerBudgetsAuctionProperties,
        DevelopmentCommitteeEmpowerBettingModerator,
        DevelopmentCommitteeChangeBettingResolveDelay,
    }
}
