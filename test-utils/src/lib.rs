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

//! Miscellaneous helpers used throughout client tests.

use rand::distributions::Alphanumeric;
use rand::Rng;

use scorum_client::*;

/// Chain id of the public Scorum test network.
pub const TEST_CHAIN_ID: &str = "95e4b20f5e669fab5fdaa2fc9f691192118f72900f9906f13b1883e2fb57aa43";

/// Private key of the `alice` fixture account.
pub const ALICE_WIF: &str = "5JCvGL2GVVpjDrKzbKWPHEvuwFs5HdEGwr4brp8RQiwrpEFcZNP";

/// Public key belonging to [ALICE_WIF].
pub const ALICE_PUBLIC_KEY: &str = "SCR5bgzuweaHx231escVuPVxgudSyUWdKAH7fKgxZfp3nKSirzFRa";

pub fn test_chain_id() -> ChainId {
    TEST_CHAIN_ID.parse().unwrap()
}

pub fn alice() -> PrivateKey {
    PrivateKey::from_wif(ALICE_WIF).unwrap()
}

/// The transfer of `0.001 SCR` from alice to bob used across the test suite.
pub fn alice_to_bob_transfer() -> SignedTransaction {
    SignedTransaction::new(
        BlockRef {
            ref_block_num: 11105,
            ref_block_prefix: 4052692508,
        },
        "2018-01-29T08:37:12".parse().unwrap(),
        vec![operation::Transfer {
            from: "alice".into(),
            to: "bob".into(),
            amount: "0.001 SCR".parse().unwrap(),
            memo: "for food".into(),
        }],
    )
}

pub fn random_private_key() -> PrivateKey {
    PrivateKey::generate()
}

pub fn random_account_name() -> AccountName {
    let size = rand::thread_rng().gen_range(3, 17);
    random_alnum_string(size).to_lowercase().into()
}

/// Create a [operation::Transfer] between random accounts with a random amount of SCR.
pub fn random_transfer() -> operation::Transfer {
    let units = rand::thread_rng().gen_range(1, 1_000_000_000_000);
    operation::Transfer {
        from: random_account_name(),
        to: random_account_name(),
        amount: Amount::from_units(units, Asset::Scr),
        memo: random_alnum_string(12).into(),
    }
}

/// Create an unsigned transaction with `count` random transfers, valid for another minute.
pub fn random_transaction(count: usize) -> SignedTransaction {
    let block_ref = BlockRef {
        ref_block_num: rand::thread_rng().gen(),
        ref_block_prefix: rand::thread_rng().gen(),
    };
    SignedTransaction::new(
        block_ref,
        PointInTime::from_now(60).unwrap(),
        (0..count).map(|_| random_transfer()),
    )
}

pub fn random_alnum_string(size: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .collect::<String>()
}
