//! Settle an accepted application out of the pool

use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::TaskTraderError;
use crate::events::RewardWithdrawn;
use crate::state::{Admin, ApplicationState, TaskApplication, TaskInfo};

use super::settlement_helpers::calculate_settlement;
use super::token_helpers::transfer_tokens_from_pool;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [b"admin"],
        bump = admin.bump
    )]
    pub admin: Box<Account<'info, Admin>>,

    #[account(
        mut,
        seeds = [b"task_info", task_info.task_id.to_le_bytes().as_ref()],
        bump = task_info.bump
    )]
    pub task_info: Box<Account<'info, TaskInfo>>,

    #[account(
        mut,
        seeds = [b"task_application", task_info.key().as_ref(), applicant.key().as_ref()],
        bump = task_application.bump,
        constraint = task_application.task_id == task_info.task_id @ TaskTraderError::InvalidTaskId,
        constraint = task_application.applicant == applicant.key() @ TaskTraderError::InvalidApplicant
    )]
    pub task_application: Box<Account<'info, TaskApplication>>,

    #[account(mut)]
    pub applicant: Signer<'info>,

    #[account(
        constraint = mint.key() == task_info.coin_mint @ TaskTraderError::InvalidMint
    )]
    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA used only as token authority
    #[account(
        seeds = [b"pool_authority"],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = pool_authority
    )]
    pub pool_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = applicant,
        associated_token::mint = mint,
        associated_token::authority = applicant
    )]
    pub applicant_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = fee_receiver_token_account.owner == admin.fee_receiver @ TaskTraderError::InvalidFeeReceiver,
        constraint = fee_receiver_token_account.mint == mint.key() @ TaskTraderError::InvalidMint
    )]
    pub fee_receiver_token_account: Box<Account<'info, TokenAccount>>,

    /// Inviter's token account, only used when the application recorded an inviter
    #[account(
        mut,
        constraint = inviter_token_account.mint == mint.key() @ TaskTraderError::InvalidMint
    )]
    pub inviter_token_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Withdraw>) -> Result<()> {
    let task_info = &ctx.accounts.task_info;
    let task_application = &ctx.accounts.task_application;
    msg!(
        "Withdrawing for {} on task {}",
        task_application.applicant,
        task_info.task_id
    );

    require!(
        task_application.state == ApplicationState::AcceptedByAcceptance,
        TaskTraderError::InvalidApplicationState
    );

    let inviter_account = match (
        task_application.inviter,
        ctx.accounts.inviter_token_account.as_ref(),
    ) {
        (Some(inviter), Some(account)) => {
            require!(account.owner == inviter, TaskTraderError::InvalidInviter);
            Some(account)
        }
        _ => None,
    };

    let settlement = calculate_settlement(
        task_info.amount_per_task,
        ctx.accounts.admin.fee_ratio,
        task_info.rewards,
        inviter_account.is_some(),
    )
    .ok_or(TaskTraderError::ArithmeticOverflow)?;
    let total = settlement
        .total()
        .ok_or(TaskTraderError::ArithmeticOverflow)?;
    let remaining = task_info
        .remaining_escrow()
        .ok_or(TaskTraderError::InsufficientEscrowBalance)?;
    require!(
        total <= remaining,
        TaskTraderError::InsufficientEscrowBalance
    );

    let pool_authority = ctx.accounts.pool_authority.to_account_info();
    let pool_authority_bump = ctx.bumps.pool_authority;

    transfer_tokens_from_pool(
        &ctx.accounts.pool_token_account,
        &ctx.accounts.applicant_token_account.to_account_info(),
        &pool_authority,
        pool_authority_bump,
        settlement.applicant_amount,
        &ctx.accounts.token_program,
    )?;
    transfer_tokens_from_pool(
        &ctx.accounts.pool_token_account,
        &ctx.accounts.fee_receiver_token_account.to_account_info(),
        &pool_authority,
        pool_authority_bump,
        settlement.fee_amount,
        &ctx.accounts.token_program,
    )?;
    if let Some(account) = inviter_account {
        transfer_tokens_from_pool(
            &ctx.accounts.pool_token_account,
            &account.to_account_info(),
            &pool_authority,
            pool_authority_bump,
            settlement.inviter_amount,
            &ctx.accounts.token_program,
        )?;
    }

    let inviter = inviter_account.and(task_application.inviter);
    let clock = Clock::get()?;

    let task_info = &mut ctx.accounts.task_info;
    task_info.distributed = task_info
        .distributed
        .checked_add(total)
        .ok_or(TaskTraderError::ArithmeticOverflow)?;
    task_info.withdrawn_num = task_info
        .withdrawn_num
        .checked_add(1)
        .ok_or(TaskTraderError::ArithmeticOverflow)?;
    let task_id = task_info.task_id;

    let task_application = &mut ctx.accounts.task_application;
    task_application.state = ApplicationState::Withdrawed;
    task_application.updated_at = clock.unix_timestamp;
    let applicant = task_application.applicant;

    let admin = &mut ctx.accounts.admin;
    admin.total_withdrawals = admin
        .total_withdrawals
        .checked_add(1)
        .ok_or(TaskTraderError::ArithmeticOverflow)?;
    admin.total_value_settled = admin
        .total_value_settled
        .checked_add(total)
        .ok_or(TaskTraderError::ArithmeticOverflow)?;

    emit!(RewardWithdrawn {
        task_id,
        applicant,
        applicant_amount: settlement.applicant_amount,
        fee_amount: settlement.fee_amount,
        inviter,
        inviter_amount: settlement.inviter_amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
