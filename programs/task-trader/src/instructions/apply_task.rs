//! Apply for an open task

use anchor_lang::prelude::*;

use crate::errors::TaskTraderError;
use crate::events::TaskApplied;
use crate::state::{ApplicationState, TaskApplication, TaskInfo};

#[derive(Accounts)]
pub struct ApplyTask<'info> {
    #[account(
        seeds = [b"task_info", task_info.task_id.to_le_bytes().as_ref()],
        bump = task_info.bump
    )]
    pub task_info: Account<'info, TaskInfo>,

    #[account(
        init,
        payer = applicant,
        space = TaskApplication::SIZE,
        seeds = [b"task_application", task_info.key().as_ref(), applicant.key().as_ref()],
        bump
    )]
    pub task_application: Account<'info, TaskApplication>,

    #[account(mut)]
    pub applicant: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ApplyTask>, inviter: Option<Pubkey>) -> Result<()> {
    let task_info = &ctx.accounts.task_info;
    let applicant = ctx.accounts.applicant.key();
    msg!("Applying to task {}", task_info.task_id);

    require!(task_info.is_open(), TaskTraderError::InvalidTaskState);
    require!(task_info.has_open_slot(), TaskTraderError::TakerNumExceeded);
    require!(
        inviter.map_or(true, |i| i != applicant),
        TaskTraderError::InvalidInviter
    );

    let clock = Clock::get()?;
    let task_application = &mut ctx.accounts.task_application;
    task_application.task_id = task_info.task_id;
    task_application.applicant = applicant;
    task_application.inviter = inviter;
    task_application.apply_time = clock.unix_timestamp;
    task_application.state = ApplicationState::Applied;
    task_application.updated_at = clock.unix_timestamp;
    task_application.bump = ctx.bumps.task_application;

    emit!(TaskApplied {
        task_id: task_info.task_id,
        applicant,
        inviter,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
