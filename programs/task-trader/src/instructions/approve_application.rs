//! Approve an application and take a taker slot

use anchor_lang::prelude::*;

use crate::errors::TaskTraderError;
use crate::events::ApplicationApproved;
use crate::state::{ApplicationState, TaskApplication, TaskInfo};

#[derive(Accounts)]
pub struct ApproveApplication<'info> {
    #[account(
        mut,
        seeds = [b"task_info", task_info.task_id.to_le_bytes().as_ref()],
        bump = task_info.bump,
        constraint = task_info.requester == requester.key() @ TaskTraderError::InvalidRequester
    )]
    pub task_info: Account<'info, TaskInfo>,

    #[account(
        mut,
        seeds = [b"task_application", task_info.key().as_ref(), task_application.applicant.as_ref()],
        bump = task_application.bump,
        constraint = task_application.task_id == task_info.task_id @ TaskTraderError::InvalidTaskId
    )]
    pub task_application: Account<'info, TaskApplication>,

    pub requester: Signer<'info>,
}

pub fn handler(ctx: Context<ApproveApplication>) -> Result<()> {
    let task_info = &mut ctx.accounts.task_info;
    let task_application = &mut ctx.accounts.task_application;
    msg!(
        "Approving {} for task {}",
        task_application.applicant,
        task_info.task_id
    );

    require!(
        task_application.state == ApplicationState::Applied,
        TaskTraderError::InvalidApplicationState
    );
    require!(task_info.has_open_slot(), TaskTraderError::TakerNumExceeded);

    task_info.approved_num = task_info
        .approved_num
        .checked_add(1)
        .ok_or(TaskTraderError::ArithmeticOverflow)?;

    let clock = Clock::get()?;
    task_application.state = ApplicationState::Accepted;
    task_application.updated_at = clock.unix_timestamp;

    emit!(ApplicationApproved {
        task_id: task_info.task_id,
        applicant: task_application.applicant,
        approved_num: task_info.approved_num,
        taker_num: task_info.taker_num,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
