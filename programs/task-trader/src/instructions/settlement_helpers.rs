//! Escrow and settlement arithmetic.
//!
//! Kept free of account types so the simulation crate can drive the same
//! math the handlers use.

use crate::instructions::constants::FEE_RATIO_DENOMINATOR;

/// Amounts moved out of the pool when one application is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settlement {
    pub applicant_amount: u64,
    pub fee_amount: u64,
    pub inviter_amount: u64,
}

impl Settlement {
    /// Sum of all transfers, `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.applicant_amount
            .checked_add(self.fee_amount)?
            .checked_add(self.inviter_amount)
    }
}

/// Tokens a requester must escrow: `(task_amount + rewards) * taker_num`.
pub fn calculate_escrow_amount(task_amount: u64, rewards: u64, taker_num: u64) -> Option<u64> {
    task_amount.checked_add(rewards)?.checked_mul(taker_num)
}

/// Per-taker share of the task amount. The remainder is never paid out.
pub fn calculate_amount_per_task(task_amount: u64, taker_num: u64) -> Option<u64> {
    task_amount.checked_div(taker_num)
}

/// Fee taken from one share: `amount_per_task * fee_ratio / 1000`, truncated.
pub fn calculate_fee(amount_per_task: u64, fee_ratio: u64) -> Option<u64> {
    amount_per_task
        .checked_mul(fee_ratio)?
        .checked_div(FEE_RATIO_DENOMINATOR)
}

/// Split one share between applicant, fee receiver and (optionally) inviter.
pub fn calculate_settlement(
    amount_per_task: u64,
    fee_ratio: u64,
    rewards: u64,
    pay_inviter: bool,
) -> Option<Settlement> {
    let fee_amount = calculate_fee(amount_per_task, fee_ratio)?;
    let applicant_amount = amount_per_task.checked_sub(fee_amount)?;
    Some(Settlement {
        applicant_amount,
        fee_amount,
        inviter_amount: if pay_inviter { rewards } else { 0 },
    })
}
