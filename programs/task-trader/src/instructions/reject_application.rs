//! Reject a pending application

use anchor_lang::prelude::*;

use crate::errors::TaskTraderError;
use crate::events::ApplicationRejected;
use crate::state::{ApplicationState, TaskApplication, TaskInfo};

#[derive(Accounts)]
pub struct RejectApplication<'info> {
    #[account(
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

pub fn handler(ctx: Context<RejectApplication>) -> Result<()> {
    let task_application = &mut ctx.accounts.task_application;
    msg!("Rejecting {}", task_application.applicant);

    require!(
        task_application
            .state
            .can_transition_to(ApplicationState::Rejected),
        TaskTraderError::InvalidApplicationState
    );

    let clock = Clock::get()?;
    task_application.state = ApplicationState::Rejected;
    task_application.updated_at = clock.unix_timestamp;

    emit!(ApplicationRejected {
        task_id: task_application.task_id,
        applicant: task_application.applicant,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
