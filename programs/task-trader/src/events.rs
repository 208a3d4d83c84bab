//! Events emitted by the Task Trader program
//!
//! Indexers follow the task and application lifecycle from these logs.

use anchor_lang::prelude::*;

/// Emitted once when the admin record is created
#[event]
pub struct AdminInitialized {
    pub signer: Pubkey,
    pub fee_receiver: Pubkey,
    pub fee_ratio: u64,
    pub timestamp: i64,
}

/// Emitted when the admin signer rotates configuration
#[event]
pub struct AdminUpdated {
    pub old_signer: Pubkey,
    pub new_signer: Pubkey,
    pub fee_receiver: Pubkey,
    pub old_fee_ratio: u64,
    pub new_fee_ratio: u64,
    pub timestamp: i64,
}

/// Emitted when the default acceptance flow changes
#[event]
pub struct AcceptanceFlowUpdated {
    pub acceptance_flow: u8,
    pub updated_by: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the supported coin list is replaced
#[event]
pub struct SupportCoinUpdated {
    pub coin_mints: Vec<Pubkey>,
    pub updated_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct TaskCreated {
    pub task_id: u64,
    pub requester: Pubkey,
    pub coin_mint: Pubkey,
    pub task_amount: u64,
    pub taker_num: u64,
    pub amount_per_task: u64,
    pub rewards: u64,
    pub escrowed: u64,
    pub expire_time: i64,
    pub acceptance_flow: u8,
    pub timestamp: i64,
}

#[event]
pub struct TaskApplied {
    pub task_id: u64,
    pub applicant: Pubkey,
    pub inviter: Option<Pubkey>,
    pub timestamp: i64,
}

#[event]
pub struct ApplicationApproved {
    pub task_id: u64,
    pub applicant: Pubkey,
    pub approved_num: u64,
    pub taker_num: u64,
    pub timestamp: i64,
}

#[event]
pub struct ApplicationRejected {
    pub task_id: u64,
    pub applicant: Pubkey,
    pub timestamp: i64,
}

/// Emitted when an applicant submits work for verification
#[event]
pub struct AcceptanceSubmitted {
    pub task_id: u64,
    pub applicant: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the requester verifies an application
#[event]
pub struct ApplicationVerified {
    pub task_id: u64,
    pub applicant: Pubkey,
    pub is_accepted: bool,
    pub old_state: u8,
    pub new_state: u8,
    pub approved_num: u64,
    pub timestamp: i64,
}

/// Emitted when an accepted application is settled
#[event]
pub struct RewardWithdrawn {
    pub task_id: u64,
    pub applicant: Pubkey,
    pub applicant_amount: u64,
    pub fee_amount: u64,
    pub inviter: Option<Pubkey>,
    pub inviter_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct TaskStateChanged {
    pub task_id: u64,
    pub old_state: u8,
    pub new_state: u8,
    pub updated_by: Pubkey,
    pub timestamp: i64,
}
