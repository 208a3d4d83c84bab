//! Protocol invariant checking for fuzz testing

use task_trader::instructions::settlement_helpers::{calculate_fee, Settlement};
use task_trader::state::ApplicationState;

/// Escrow invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscrowInvariantResult {
    Valid,
    DistributedExceedsEscrow { distributed: u64, escrowed: u64 },
    PoolConservationViolation { expected: u64, actual: u64 },
    MonotonicityViolation { old_distributed: u64, new_distributed: u64 },
}

/// Taker quota invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaInvariantResult {
    Valid,
    ApprovedExceedsTakers { approved: u64, taker_num: u64 },
    WithdrawnExceedsApproved { withdrawn: u64, approved: u64 },
    SlotCountMismatch { approved: u64, holding: u64 },
}

/// Application state machine invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationInvariantResult {
    Valid,
    InvalidStateTransition { from: u8, to: u8 },
    TerminalStateModified { state: u8 },
}

/// Settlement split invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementInvariantResult {
    Valid,
    ShareNotConserved { share: u64, paid: u64 },
    WrongFee { expected: u64, actual: u64 },
    WrongInviterAmount { rewards: u64, actual: u64 },
}

// ============================================================================
// Escrow Invariants
// ============================================================================

/// `distributed <= escrowed` must always hold for a task.
pub fn check_distribution_bounded(distributed: u64, escrowed: u64) -> EscrowInvariantResult {
    if distributed > escrowed {
        EscrowInvariantResult::DistributedExceedsEscrow {
            distributed,
            escrowed,
        }
    } else {
        EscrowInvariantResult::Valid
    }
}

/// The pool holds exactly what was escrowed minus what was paid out.
pub fn check_pool_conservation(
    escrowed: u64,
    distributed: u64,
    pool_balance: u64,
) -> EscrowInvariantResult {
    let expected = match escrowed.checked_sub(distributed) {
        Some(r) => r,
        None => {
            return EscrowInvariantResult::DistributedExceedsEscrow {
                distributed,
                escrowed,
            }
        }
    };
    if pool_balance != expected {
        EscrowInvariantResult::PoolConservationViolation {
            expected,
            actual: pool_balance,
        }
    } else {
        EscrowInvariantResult::Valid
    }
}

/// `distributed` only grows.
pub fn check_monotonic_distribution(
    old_distributed: u64,
    new_distributed: u64,
) -> EscrowInvariantResult {
    if new_distributed < old_distributed {
        EscrowInvariantResult::MonotonicityViolation {
            old_distributed,
            new_distributed,
        }
    } else {
        EscrowInvariantResult::Valid
    }
}

// ============================================================================
// Quota Invariants
// ============================================================================

pub fn check_approved_within_quota(approved: u64, taker_num: u64) -> QuotaInvariantResult {
    if approved > taker_num {
        QuotaInvariantResult::ApprovedExceedsTakers { approved, taker_num }
    } else {
        QuotaInvariantResult::Valid
    }
}

pub fn check_withdrawn_within_approved(withdrawn: u64, approved: u64) -> QuotaInvariantResult {
    if withdrawn > approved {
        QuotaInvariantResult::WithdrawnExceedsApproved {
            withdrawn,
            approved,
        }
    } else {
        QuotaInvariantResult::Valid
    }
}

/// `approved_num` equals the number of applications holding a slot.
pub fn check_slot_accounting(approved: u64, states: &[ApplicationState]) -> QuotaInvariantResult {
    let holding = states.iter().filter(|s| s.holds_slot()).count() as u64;
    if holding != approved {
        QuotaInvariantResult::SlotCountMismatch { approved, holding }
    } else {
        QuotaInvariantResult::Valid
    }
}

// ============================================================================
// Application State Machine Invariants
// ============================================================================

/// A change of state must be an allowed edge; staying put is always fine.
pub fn check_application_transition(
    from: ApplicationState,
    to: ApplicationState,
) -> ApplicationInvariantResult {
    if from == to {
        return ApplicationInvariantResult::Valid;
    }
    if from.is_terminal() {
        return ApplicationInvariantResult::TerminalStateModified { state: from as u8 };
    }
    if !from.can_transition_to(to) {
        return ApplicationInvariantResult::InvalidStateTransition {
            from: from as u8,
            to: to as u8,
        };
    }
    ApplicationInvariantResult::Valid
}

// ============================================================================
// Settlement Invariants
// ============================================================================

/// Applicant plus fee equals the share, the fee matches the ratio and the
/// inviter gets either nothing or the full reward.
pub fn check_settlement_split(
    amount_per_task: u64,
    fee_ratio: u64,
    rewards: u64,
    settlement: &Settlement,
) -> SettlementInvariantResult {
    let paid = settlement
        .applicant_amount
        .saturating_add(settlement.fee_amount);
    if paid != amount_per_task {
        return SettlementInvariantResult::ShareNotConserved {
            share: amount_per_task,
            paid,
        };
    }
    if let Some(expected) = calculate_fee(amount_per_task, fee_ratio) {
        if expected != settlement.fee_amount {
            return SettlementInvariantResult::WrongFee {
                expected,
                actual: settlement.fee_amount,
            };
        }
    }
    if settlement.inviter_amount != 0 && settlement.inviter_amount != rewards {
        return SettlementInvariantResult::WrongInviterAmount {
            rewards,
            actual: settlement.inviter_amount,
        };
    }
    SettlementInvariantResult::Valid
}
