#![allow(unexpected_cfgs)]
//! Task Trader
//!
//! Escrowed task marketplace. Requesters fund tasks with an allowlisted SPL
//! token, applicants apply and get approved up to the task's taker quota,
//! and accepted work is settled out of a shared pool with a protocol fee and
//! an optional referral reward for the applicant's inviter.

use anchor_lang::prelude::*;

declare_id!("DSyKrLRc83jxeEUiUJdsyePRcreQ2dkXj3vdpggH8wd1");

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::AcceptanceFlow;

#[program]
pub mod task_trader {
    use super::*;

    /// Create the admin record. Can only succeed once per deployment.
    ///
    /// # Arguments
    /// * `signer` - Identity allowed to perform privileged updates
    /// * `fee_receiver` - Owner of the token accounts credited with fees
    /// * `fee_ratio` - Fee numerator over 1000
    pub fn initialize(
        ctx: Context<Initialize>,
        signer: Pubkey,
        fee_receiver: Pubkey,
        fee_ratio: u64,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, signer, fee_receiver, fee_ratio)
    }

    /// Replace signer, fee receiver and fee ratio. Current signer only.
    pub fn update_admin(
        ctx: Context<UpdateAdmin>,
        signer: Pubkey,
        fee_receiver: Pubkey,
        fee_ratio: u64,
    ) -> Result<()> {
        instructions::update_admin::handler(ctx, signer, fee_receiver, fee_ratio)
    }

    /// Select whether tasks created from now on require an explicit
    /// `submit_acceptance` before verification. Admin signer only.
    pub fn update_acceptance_flow(
        ctx: Context<UpdateAcceptanceFlow>,
        acceptance_flow: AcceptanceFlow,
    ) -> Result<()> {
        instructions::update_acceptance_flow::handler(ctx, acceptance_flow)
    }

    /// Replace the list of mints usable as task funding. Admin signer only.
    pub fn update_task_support_coin(
        ctx: Context<UpdateTaskSupportCoin>,
        coin_mints: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::update_task_support_coin::handler(ctx, coin_mints)
    }

    /// Create a task and escrow `(task_amount + rewards) * taker_num` of
    /// `coin_mint` into the pool.
    ///
    /// # Arguments
    /// * `task_id` - Caller-chosen unique identifier
    /// * `task_amount` - Payout split across `taker_num` workers
    /// * `taker_num` - Maximum number of approved workers
    /// * `coin_mint` - Funding mint, must be allowlisted
    /// * `rewards` - Referral reward paid per completion to an inviter
    /// * `expire_time` - Unix timestamp, stored but not enforced
    pub fn create_task(
        ctx: Context<CreateTask>,
        task_id: u64,
        task_amount: u64,
        taker_num: u64,
        coin_mint: Pubkey,
        rewards: u64,
        expire_time: i64,
    ) -> Result<()> {
        instructions::create_task::handler(
            ctx,
            task_id,
            task_amount,
            taker_num,
            coin_mint,
            rewards,
            expire_time,
        )
    }

    /// Apply for an open task, optionally recording who referred the applicant.
    pub fn apply_task(ctx: Context<ApplyTask>, inviter: Option<Pubkey>) -> Result<()> {
        instructions::apply_task::handler(ctx, inviter)
    }

    /// Approve an application, taking one of the task's taker slots.
    pub fn approve_application(ctx: Context<ApproveApplication>) -> Result<()> {
        instructions::approve_application::handler(ctx)
    }

    /// Reject a pending application.
    pub fn reject_application(ctx: Context<RejectApplication>) -> Result<()> {
        instructions::reject_application::handler(ctx)
    }

    /// Applicant signals the work is done and ready for verification.
    pub fn submit_acceptance(ctx: Context<SubmitAcceptance>) -> Result<()> {
        instructions::submit_acceptance::handler(ctx)
    }

    /// Requester accepts or rejects the submitted work.
    pub fn verify_task_application(
        ctx: Context<VerifyTaskApplication>,
        is_accepted: bool,
    ) -> Result<()> {
        instructions::verify_task_application::handler(ctx, is_accepted)
    }

    /// Settle an accepted application: pay the applicant, the fee receiver
    /// and, when present, the inviter.
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    /// Reopen a task for applications. Admin signer or requester.
    pub fn open_task(ctx: Context<SetTaskState>) -> Result<()> {
        instructions::set_task_state::open_handler(ctx)
    }

    /// Close a task to new applications. Admin signer or requester.
    pub fn close_task(ctx: Context<SetTaskState>) -> Result<()> {
        instructions::set_task_state::close_handler(ctx)
    }
}
