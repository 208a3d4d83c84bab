//! Create a task and escrow its funding into the pool

use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::TaskTraderError;
use crate::events::TaskCreated;
use crate::state::{Admin, SupportCoin, TaskInfo, TaskState};

use super::settlement_helpers::{calculate_amount_per_task, calculate_escrow_amount};
use super::token_helpers::transfer_tokens_to_pool;

#[derive(Accounts)]
#[instruction(task_id: u64)]
pub struct CreateTask<'info> {
    #[account(
        mut,
        seeds = [b"admin"],
        bump = admin.bump
    )]
    pub admin: Box<Account<'info, Admin>>,

    #[account(
        seeds = [b"support_coin"],
        bump = support_coin.bump
    )]
    pub support_coin: Box<Account<'info, SupportCoin>>,

    #[account(
        init,
        payer = requester,
        space = TaskInfo::SIZE,
        seeds = [b"task_info", task_id.to_le_bytes().as_ref()],
        bump
    )]
    pub task_info: Box<Account<'info, TaskInfo>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub requester: Signer<'info>,

    #[account(
        mut,
        constraint = requester_token_account.mint == mint.key() @ TaskTraderError::InvalidMint,
        constraint = requester_token_account.owner == requester.key() @ TaskTraderError::InvalidRequester
    )]
    pub requester_token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: PDA used only as token authority
    #[account(
        seeds = [b"pool_authority"],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = requester,
        associated_token::mint = mint,
        associated_token::authority = pool_authority
    )]
    pub pool_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[allow(clippy::too_many_arguments)]
pub fn handler(
    ctx: Context<CreateTask>,
    task_id: u64,
    task_amount: u64,
    taker_num: u64,
    coin_mint: Pubkey,
    rewards: u64,
    expire_time: i64,
) -> Result<()> {
    msg!("Creating task {}", task_id);

    require!(
        task_amount > 0 && taker_num > 0,
        TaskTraderError::InvalidAmount
    );
    require!(
        ctx.accounts.support_coin.is_supported(&coin_mint),
        TaskTraderError::UnsupportedCoin
    );
    require!(
        ctx.accounts.mint.key() == coin_mint,
        TaskTraderError::InvalidMint
    );

    let escrowed = calculate_escrow_amount(task_amount, rewards, taker_num)
        .ok_or(TaskTraderError::ArithmeticOverflow)?;
    let amount_per_task = calculate_amount_per_task(task_amount, taker_num)
        .ok_or(TaskTraderError::ArithmeticOverflow)?;

    // Insufficient requester balance surfaces as the token program's error.
    transfer_tokens_to_pool(
        &ctx.accounts.requester_token_account,
        &ctx.accounts.pool_token_account,
        &ctx.accounts.requester,
        escrowed,
        &ctx.accounts.token_program,
    )?;

    let clock = Clock::get()?;
    let acceptance_flow = ctx.accounts.admin.acceptance_flow;

    let task_info = &mut ctx.accounts.task_info;
    task_info.task_id = task_id;
    task_info.requester = ctx.accounts.requester.key();
    task_info.coin_mint = coin_mint;
    task_info.task_amount = task_amount;
    task_info.taker_num = taker_num;
    task_info.amount_per_task = amount_per_task;
    task_info.rewards = rewards;
    task_info.expire_time = expire_time;
    task_info.approved_num = 0;
    task_info.withdrawn_num = 0;
    task_info.escrowed = escrowed;
    task_info.distributed = 0;
    task_info.state = TaskState::Open;
    task_info.acceptance_flow = acceptance_flow;
    task_info.created_at = clock.unix_timestamp;
    task_info.bump = ctx.bumps.task_info;

    let admin = &mut ctx.accounts.admin;
    admin.total_tasks = admin
        .total_tasks
        .checked_add(1)
        .ok_or(TaskTraderError::ArithmeticOverflow)?;

    emit!(TaskCreated {
        task_id,
        requester: task_info.requester,
        coin_mint,
        task_amount,
        taker_num,
        amount_per_task,
        rewards,
        escrowed,
        expire_time,
        acceptance_flow: acceptance_flow as u8,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
