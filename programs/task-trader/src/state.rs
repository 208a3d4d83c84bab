//! Account state structures for the Task Trader program

use anchor_lang::prelude::*;

/// Maximum number of mints that can be allowlisted for task funding
pub const MAX_SUPPORT_COINS: usize = 10;

/// Task lifecycle state
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, InitSpace, Debug)]
#[repr(u8)]
pub enum TaskState {
    #[default]
    Open = 0,
    Close = 1,
}

/// How a task's requester confirms finished work.
///
/// `SubmitThenVerify` requires the applicant to call `submit_acceptance`
/// before the requester may verify. `DirectVerify` lets the requester verify
/// approved (or even merely applied) applications without a submission.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, InitSpace, Debug)]
#[repr(u8)]
pub enum AcceptanceFlow {
    #[default]
    SubmitThenVerify = 0,
    DirectVerify = 1,
}

/// Application lifecycle state
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, InitSpace, Debug)]
#[repr(u8)]
pub enum ApplicationState {
    #[default]
    Applied = 0,
    Accepted = 1,
    Rejected = 2,
    WaitingForAcceptance = 3,
    RejectedByAcceptance = 4,
    AcceptedByAcceptance = 5,
    Withdrawed = 6,
}

/// Effect of a transition on the task's approved counter
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SlotChange {
    /// Takes one taker slot (`approved_num += 1`)
    Claim,
    /// Gives one taker slot back (`approved_num -= 1`)
    Release,
    Keep,
}

impl ApplicationState {
    /// Validates whether a state transition is allowed.
    ///
    /// Valid transitions:
    /// - Applied → Accepted (requester approves)
    /// - Applied → Rejected (requester rejects)
    /// - Applied → AcceptedByAcceptance (direct verification, claims a slot)
    /// - Accepted → WaitingForAcceptance (applicant submits)
    /// - Accepted → AcceptedByAcceptance (direct verification)
    /// - Accepted → Applied (direct verification rejects, releases the slot)
    /// - WaitingForAcceptance → AcceptedByAcceptance / RejectedByAcceptance
    /// - WaitingForAcceptance → Applied (direct verification rejects)
    /// - RejectedByAcceptance → WaitingForAcceptance (applicant resubmits)
    /// - AcceptedByAcceptance → Withdrawed (settlement)
    ///
    /// Rejected and Withdrawed are terminal.
    pub fn can_transition_to(&self, new_state: ApplicationState) -> bool {
        use ApplicationState::*;
        matches!(
            (self, new_state),
            (Applied, Accepted)
                | (Applied, Rejected)
                | (Applied, AcceptedByAcceptance)
                | (Accepted, WaitingForAcceptance)
                | (Accepted, AcceptedByAcceptance)
                | (Accepted, Applied)
                | (WaitingForAcceptance, AcceptedByAcceptance)
                | (WaitingForAcceptance, RejectedByAcceptance)
                | (WaitingForAcceptance, Applied)
                | (RejectedByAcceptance, WaitingForAcceptance)
                | (AcceptedByAcceptance, Withdrawed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationState::Rejected | ApplicationState::Withdrawed)
    }

    /// Whether the applicant may (re)submit work from this state.
    pub fn can_submit_acceptance(&self) -> bool {
        matches!(
            self,
            ApplicationState::Accepted | ApplicationState::RejectedByAcceptance
        )
    }

    /// Whether this state currently holds one of the task's taker slots.
    pub fn holds_slot(&self) -> bool {
        matches!(
            self,
            ApplicationState::Accepted
                | ApplicationState::WaitingForAcceptance
                | ApplicationState::RejectedByAcceptance
                | ApplicationState::AcceptedByAcceptance
                | ApplicationState::Withdrawed
        )
    }

    /// Outcome of the requester verifying an application in this state.
    ///
    /// Returns the next state together with its effect on the task's
    /// approved counter, or `None` when verification is not allowed.
    /// A `DirectVerify` rejection of an `Applied` application is a no-op.
    pub fn verify(
        &self,
        flow: AcceptanceFlow,
        is_accepted: bool,
    ) -> Option<(ApplicationState, SlotChange)> {
        use ApplicationState::*;
        match (flow, self, is_accepted) {
            (AcceptanceFlow::SubmitThenVerify, WaitingForAcceptance, true) => {
                Some((AcceptedByAcceptance, SlotChange::Keep))
            }
            (AcceptanceFlow::SubmitThenVerify, WaitingForAcceptance, false) => {
                Some((RejectedByAcceptance, SlotChange::Keep))
            }
            (AcceptanceFlow::DirectVerify, Applied, true) => {
                Some((AcceptedByAcceptance, SlotChange::Claim))
            }
            (AcceptanceFlow::DirectVerify, Applied, false) => Some((Applied, SlotChange::Keep)),
            (AcceptanceFlow::DirectVerify, Accepted | WaitingForAcceptance, true) => {
                Some((AcceptedByAcceptance, SlotChange::Keep))
            }
            (AcceptanceFlow::DirectVerify, Accepted | WaitingForAcceptance, false) => {
                Some((Applied, SlotChange::Release))
            }
            _ => None,
        }
    }
}

/// Protocol admin record
/// PDA seeds: ["admin"]
#[account]
#[derive(InitSpace)]
pub struct Admin {
    /// Identity allowed to perform privileged updates
    pub signer: Pubkey,
    /// Owner of the token accounts that receive fees
    pub fee_receiver: Pubkey,
    /// Fee numerator over `FEE_RATIO_DENOMINATOR`
    pub fee_ratio: u64,
    /// Flow snapshotted into newly created tasks
    pub acceptance_flow: AcceptanceFlow,
    /// Total tasks created
    pub total_tasks: u64,
    /// Total settled applications
    pub total_withdrawals: u64,
    /// Total token units paid out across all mints
    pub total_value_settled: u64,
    /// Bump seed
    pub bump: u8,
}

impl Admin {
    pub const SIZE: usize = 8 + // discriminator
        32 + // signer
        32 + // fee_receiver
        8 +  // fee_ratio
        1 +  // acceptance_flow
        8 +  // total_tasks
        8 +  // total_withdrawals
        8 +  // total_value_settled
        1; // bump
}

/// Allowlist of mints usable as task funding
/// PDA seeds: ["support_coin"]
#[account]
#[derive(InitSpace)]
pub struct SupportCoin {
    #[max_len(10)]
    pub coin_mints: Vec<Pubkey>,
    /// Bump seed
    pub bump: u8,
}

impl SupportCoin {
    pub const SIZE: usize = 8 + // discriminator
        4 + 32 * MAX_SUPPORT_COINS + // coin_mints
        1; // bump

    pub fn is_supported(&self, mint: &Pubkey) -> bool {
        self.coin_mints.iter().any(|m| m == mint)
    }
}

/// Task record
/// PDA seeds: ["task_info", task_id.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct TaskInfo {
    /// Caller-chosen identifier
    pub task_id: u64,
    /// Creator and funder of the task
    pub requester: Pubkey,
    /// Funding mint
    pub coin_mint: Pubkey,
    /// Total payout across all takers
    pub task_amount: u64,
    /// Maximum number of approved applications
    pub taker_num: u64,
    /// `task_amount / taker_num`, truncated
    pub amount_per_task: u64,
    /// Referral reward per completion
    pub rewards: u64,
    /// Declared expiry, not enforced
    pub expire_time: i64,
    /// Applications currently holding a taker slot
    pub approved_num: u64,
    /// Applications settled
    pub withdrawn_num: u64,
    /// Tokens moved into the pool for this task
    pub escrowed: u64,
    /// Tokens paid out of the pool for this task
    pub distributed: u64,
    pub state: TaskState,
    /// Flow in effect when the task was created
    pub acceptance_flow: AcceptanceFlow,
    pub created_at: i64,
    /// Bump seed
    pub bump: u8,
}

impl TaskInfo {
    pub const SIZE: usize = 8 + // discriminator
        8 +  // task_id
        32 + // requester
        32 + // coin_mint
        8 +  // task_amount
        8 +  // taker_num
        8 +  // amount_per_task
        8 +  // rewards
        8 +  // expire_time
        8 +  // approved_num
        8 +  // withdrawn_num
        8 +  // escrowed
        8 +  // distributed
        1 +  // state
        1 +  // acceptance_flow
        8 +  // created_at
        1; // bump

    pub fn is_open(&self) -> bool {
        self.state == TaskState::Open
    }

    pub fn has_open_slot(&self) -> bool {
        self.approved_num < self.taker_num
    }

    /// Escrow not yet paid out, `None` if the books are inconsistent.
    pub fn remaining_escrow(&self) -> Option<u64> {
        self.escrowed.checked_sub(self.distributed)
    }
}

/// Application of one applicant to one task
/// PDA seeds: ["task_application", task_info, applicant]
#[account]
#[derive(InitSpace)]
pub struct TaskApplication {
    pub task_id: u64,
    pub applicant: Pubkey,
    /// Referrer credited with the task's rewards on settlement
    pub inviter: Option<Pubkey>,
    pub apply_time: i64,
    pub state: ApplicationState,
    pub updated_at: i64,
    /// Bump seed
    pub bump: u8,
}

impl TaskApplication {
    pub const SIZE: usize = 8 + // discriminator
        8 +  // task_id
        32 + // applicant
        33 + // inviter (Option<Pubkey>: 1 byte discriminator + 32 bytes pubkey)
        8 +  // apply_time
        1 +  // state
        8 +  // updated_at
        1; // bump
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SIZE should equal INIT_SPACE (borsh serialized) + 8-byte discriminator.
    macro_rules! test_size_constant {
        ($struct:ty) => {
            assert_eq!(
                <$struct>::SIZE,
                <$struct as anchor_lang::Space>::INIT_SPACE + 8,
                concat!(stringify!($struct), "::SIZE mismatch with INIT_SPACE")
            );
        };
    }

    #[test]
    fn test_admin_size() {
        test_size_constant!(Admin);
    }

    #[test]
    fn test_support_coin_size() {
        test_size_constant!(SupportCoin);
    }

    #[test]
    fn test_task_info_size() {
        test_size_constant!(TaskInfo);
    }

    #[test]
    fn test_task_application_size() {
        test_size_constant!(TaskApplication);
    }

    const ALL_STATES: [ApplicationState; 7] = [
        ApplicationState::Applied,
        ApplicationState::Accepted,
        ApplicationState::Rejected,
        ApplicationState::WaitingForAcceptance,
        ApplicationState::RejectedByAcceptance,
        ApplicationState::AcceptedByAcceptance,
        ApplicationState::Withdrawed,
    ];

    #[test]
    fn test_terminal_states_have_no_transitions() {
        for from in ALL_STATES.iter().filter(|s| s.is_terminal()) {
            for to in ALL_STATES {
                assert!(!from.can_transition_to(to), "{:?} -> {:?}", from, to);
            }
        }
    }

    #[test]
    fn test_submit_then_verify_requires_submission() {
        let flow = AcceptanceFlow::SubmitThenVerify;
        assert_eq!(ApplicationState::Applied.verify(flow, true), None);
        assert_eq!(ApplicationState::Accepted.verify(flow, true), None);
        assert_eq!(
            ApplicationState::WaitingForAcceptance.verify(flow, true),
            Some((ApplicationState::AcceptedByAcceptance, SlotChange::Keep))
        );
        assert_eq!(
            ApplicationState::WaitingForAcceptance.verify(flow, false),
            Some((ApplicationState::RejectedByAcceptance, SlotChange::Keep))
        );
    }

    #[test]
    fn test_direct_verify_slot_accounting() {
        let flow = AcceptanceFlow::DirectVerify;
        assert_eq!(
            ApplicationState::Applied.verify(flow, true),
            Some((ApplicationState::AcceptedByAcceptance, SlotChange::Claim))
        );
        assert_eq!(
            ApplicationState::Applied.verify(flow, false),
            Some((ApplicationState::Applied, SlotChange::Keep))
        );
        assert_eq!(
            ApplicationState::Accepted.verify(flow, false),
            Some((ApplicationState::Applied, SlotChange::Release))
        );
        assert_eq!(
            ApplicationState::WaitingForAcceptance.verify(flow, true),
            Some((ApplicationState::AcceptedByAcceptance, SlotChange::Keep))
        );
    }

    #[test]
    fn test_verify_rejected_from_settled_states() {
        for flow in [AcceptanceFlow::SubmitThenVerify, AcceptanceFlow::DirectVerify] {
            for state in [
                ApplicationState::Rejected,
                ApplicationState::AcceptedByAcceptance,
                ApplicationState::Withdrawed,
            ] {
                assert_eq!(state.verify(flow, true), None);
                assert_eq!(state.verify(flow, false), None);
            }
        }
    }

    #[test]
    fn test_verify_outcomes_are_valid_transitions() {
        for flow in [AcceptanceFlow::SubmitThenVerify, AcceptanceFlow::DirectVerify] {
            for from in ALL_STATES {
                for accept in [true, false] {
                    if let Some((to, _)) = from.verify(flow, accept) {
                        assert!(to == from || from.can_transition_to(to));
                    }
                }
            }
        }
    }

    #[test]
    fn test_slot_changes_match_slot_holding() {
        for flow in [AcceptanceFlow::SubmitThenVerify, AcceptanceFlow::DirectVerify] {
            for from in ALL_STATES {
                for accept in [true, false] {
                    let Some((to, change)) = from.verify(flow, accept) else {
                        continue;
                    };
                    let expected = match (from.holds_slot(), to.holds_slot()) {
                        (false, true) => SlotChange::Claim,
                        (true, false) => SlotChange::Release,
                        _ => SlotChange::Keep,
                    };
                    assert_eq!(change, expected, "{:?} -> {:?}", from, to);
                }
            }
        }
    }

    #[test]
    fn test_resubmission_allowed_after_rejection() {
        assert!(ApplicationState::RejectedByAcceptance.can_submit_acceptance());
        assert!(ApplicationState::Accepted.can_submit_acceptance());
        assert!(!ApplicationState::Applied.can_submit_acceptance());
        assert!(!ApplicationState::WaitingForAcceptance.can_submit_acceptance());
    }

    #[test]
    fn test_remaining_escrow() {
        let task = TaskInfo {
            task_id: 1,
            requester: Pubkey::new_unique(),
            coin_mint: Pubkey::new_unique(),
            task_amount: 100,
            taker_num: 2,
            amount_per_task: 50,
            rewards: 5,
            expire_time: 0,
            approved_num: 0,
            withdrawn_num: 0,
            escrowed: 110,
            distributed: 55,
            state: TaskState::Open,
            acceptance_flow: AcceptanceFlow::SubmitThenVerify,
            created_at: 0,
            bump: 255,
        };
        assert_eq!(task.remaining_escrow(), Some(55));
        assert!(task.has_open_slot());
        assert!(task.is_open());
    }
}
