//! Applicant submits finished work for verification

use anchor_lang::prelude::*;

use crate::errors::TaskTraderError;
use crate::events::AcceptanceSubmitted;
use crate::state::{ApplicationState, TaskApplication, TaskInfo};

#[derive(Accounts)]
pub struct SubmitAcceptance<'info> {
    #[account(
        seeds = [b"task_info", task_info.task_id.to_le_bytes().as_ref()],
        bump = task_info.bump
    )]
    pub task_info: Account<'info, TaskInfo>,

    #[account(
        mut,
        seeds = [b"task_application", task_info.key().as_ref(), task_application.applicant.as_ref()],
        bump = task_application.bump,
        constraint = task_application.task_id == task_info.task_id @ TaskTraderError::InvalidTaskId,
        constraint = task_application.applicant == applicant.key() @ TaskTraderError::InvalidApplicant
    )]
    pub task_application: Account<'info, TaskApplication>,

    pub applicant: Signer<'info>,
}

pub fn handler(ctx: Context<SubmitAcceptance>) -> Result<()> {
    let task_application = &mut ctx.accounts.task_application;
    msg!("Submitting acceptance for task {}", task_application.task_id);

    require!(
        task_application.state.can_submit_acceptance(),
        TaskTraderError::InvalidApplicationState
    );

    let clock = Clock::get()?;
    task_application.state = ApplicationState::WaitingForAcceptance;
    task_application.updated_at = clock.unix_timestamp;

    emit!(AcceptanceSubmitted {
        task_id: task_application.task_id,
        applicant: task_application.applicant,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
