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

//! The operation registry.
//!
//! The ordinal of an operation name is the discriminant written before its payload on the wire.
//! Entries may only ever be appended.
use crate::variant::OrdinalTable;

ordinal_table! {
    /// Every operation known to the chain, including virtual operations.
    pub enum OperationKind: "operation" {
        Vote = "vote",
        Comment = "comment",
        Transfer = "transfer",
        TransferToScorumpower = "transfer_to_scorumpower",
        WithdrawScorumpower = "withdraw_scorumpower",
        AccountCreateByCommittee = "account_create_by_committee",
        AccountCreate = "account_create",
        AccountCreateWithDelegation = "account_create_with_delegation",
        AccountUpdate = "account_update",
        WitnessUpdate = "witness_update",
        AccountWitnessVote = "account_witness_vote",
        AccountWitnessProxy = "account_witness_proxy",
        DeleteComment = "delete_comment",
        CommentOptions = "comment_options",
        SetWithdrawScorumpowerRouteToAccount = "set_withdraw_scorumpower_route_to_account",
        SetWithdrawScorumpowerRouteToDevPool = "set_withdraw_scorumpower_route_to_dev_pool",
        ProveAuthority = "prove_authority",
        RequestAccountRecovery = "request_account_recovery",
        RecoverAccount = "recover_account",
        ChangeRecoveryAccount = "change_recovery_account",
        EscrowApprove = "escrow_approve",
        EscrowDispute = "escrow_dispute",
        EscrowRelease = "escrow_release",
        EscrowTransfer = "escrow_transfer",
        DeclineVotingRights = "decline_voting_rights",
        DelegateScorumpowerShares = "delegate_scorumpower_shares",
        CreateBudget = "create_budget",
        CloseBudget = "close_budget",
        ProposalVote = "proposal_vote",
        ProposalCreate = "proposal_create",
        AtomicswapInitiate = "atomicswap_initiate",
        AtomicswapRedeem = "atomicswap_redeem",
        AtomicswapRefund = "atomicswap_refund",
        CloseBudgetByAdvertisingModerator = "close_budget_by_advertising_moderator",
        UpdateBudget = "update_budget",
        CreateGame = "create_game",
        CancelGame = "cancel_game",
        UpdateGameMarkets = "update_game_markets",
        UpdateGameStartTime = "update_game_start_time",
        PostGameResults = "post_game_results",
        PostBet = "post_bet",
        CancelPendingBets = "cancel_pending_bets",
        AuthorReward = "author_reward",
        CommentBenefactorReward = "comment_benefactor_reward",
        CommentPayoutUpdate = "comment_payout_update",
        CommentReward = "comment_reward",
        CurationReward = "curation_reward",
        Hardfork = "hardfork",
        ProducerReward = "producer_reward",
        ActiveSpHoldersReward = "active_sp_holders_reward",
        ReturnScorumpowerDelegation = "return_scorumpower_delegation",
        ShutdownWitness = "shutdown_witness",
        WitnessMissBlock = "witness_miss_block",
        ExpiredContractRefund = "expired_contract_refund",
        AccFinishedVestingWithdraw = "acc_finished_vesting_withdraw",
        DevpoolFinishedVestingWithdraw = "devpool_finished_vesting_withdraw",
        AccToAccVestingWithdraw = "acc_to_acc_vesting_withdraw",
        DevpoolToAccVestingWithdraw = "devpool_to_acc_vesting_withdraw",
        AccToDevpoolVestingWithdraw = "acc_to_devpool_vesting_withdraw",
        DevpoolToDevpoolVestingWithdraw = "devpool_to_devpool_vesting_withdraw",
        ProposalVirtual = "proposal_virtual",
        BudgetOutgo = "budget_outgo",
        BudgetOwnerIncome = "budget_owner_income",
        ActiveSpHoldersRewardLegacy = "active_sp_holders_reward_legacy",
        BudgetClosing = "budget_closing",
        BetsMatched = "bets_matched",
        GameStatusChanged = "game_status_changed",
        BetResolved = "bet_resolved",
        BetCancelled = "bet_cancelled",
    }
}

impl OperationKind {
    /// Virtual operations are produced by the chain itself and never submitted by clients.
    pub fn is_virtual(self) -> bool {
        self.ordinal() >= OperationKind::AuthorReward.ordinal()
    }
}

ordinal_table! {
    /// Actions a committee member may propose through `proposal_create`.
    pub enum ProposalOperationKind: "proposal operation" {
        RegistrationCommitteeAddMember = "registration_committee_add_member",
        RegistrationCommitteeExcludeMember = "registration_committee_exclude_member",
        RegistrationCommitteeChangeQuorum = "registration_committee_change_quorum",
        DevelopmentCommitteeAddMember = "development_committee_add_member",
        DevelopmentCommitteeExcludeMember = "development_committee_exclude_member",
        DevelopmentCommitteeChangeQuorum = "development_committee_change_quorum",
        DevelopmentCommitteeWithdrawVesting = "development_committee_withdraw_vesting",
        DevelopmentCommitteeTransfer = "development_committee_transfer",
        DevelopmentCommitteeEmpowerAdvertisingModerator =
            "development_committee_empower_advertising_moderator",
        DevelopmentCommitteeChangePostBudgetsAuctionProperties =
            "development_committee_change_post_budgets_auction_properties",
        DevelopmentCommitteeChangeBannerBudgetsAuctionProperties =
            "development_committee_change_banner_budgets_auction_properties",
        DevelopmentCommitteeEmpowerBettingModerator =
            "development_committee_empower_betting_moderator",
        DevelopmentCommitteeChangeBettingResolveDelay =
            "development_committee_change_betting_resolve_delay",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_ordinals() {
        assert_eq!(OperationKind::ALL.len(), 69);
        assert_eq!(OperationKind::Transfer.ordinal(), 2);
        assert_eq!(OperationKind::CreateBudget.ordinal(), 0x1a);
        assert_eq!(OperationKind::ProposalCreate.ordinal(), 0x1d);
        assert_eq!(OperationKind::CloseBudgetByAdvertisingModerator.ordinal(), 0x21);
        assert_eq!(OperationKind::CreateGame.ordinal(), 0x23);
        assert_eq!(OperationKind::CancelGame.ordinal(), 0x24);
        assert_eq!(OperationKind::BetsMatched.ordinal(), 65);
        assert_eq!(ProposalOperationKind::ALL.len(), 13);
        assert_eq!(
            ProposalOperationKind::DevelopmentCommitteeChangeBettingResolveDelay.ordinal(),
            0x0c
        );
    }

    #[test]
    fn names_are_unique() {
        for (index, kind) in OperationKind::ALL.iter().enumerate() {
            assert_eq!(OperationKind::from_name(kind.name()), Ok(*kind));
            assert_eq!(kind.ordinal() as usize, index);
        }
        for kind in ProposalOperationKind::ALL {
            assert_eq!(ProposalOperationKind::from_name(kind.name()), Ok(*kind));
        }
    }

    #[test]
    fn virtual_operations_start_at_author_reward() {
        assert!(!OperationKind::CancelPendingBets.is_virtual());
        assert!(OperationKind::AuthorReward.is_virtual());
        assert!(OperationKind::BetCancelled.is_virtual());
        let submittable = OperationKind::ALL.iter().filter(|k| !k.is_virtual()).count();
        assert_eq!(submittable, 42);
    }

    #[test]
    fn unknown_name_is_reported() {
        let error = OperationKind::from_name("transfer_to_vesting").unwrap_err();
        assert_eq!(
            error.to_string(),
            "no such operation variant `transfer_to_vesting`"
        );
    }
}
