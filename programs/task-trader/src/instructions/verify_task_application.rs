//! Requester verifies an application's work

use anchor_lang::prelude::*;

use crate::errors::TaskTraderError;
use crate::events::ApplicationVerified;
use crate::state::{SlotChange, TaskApplication, TaskInfo};

#[derive(Accounts)]
pub struct VerifyTaskApplication<'info> {
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

pub fn handler(ctx: Context<VerifyTaskApplication>, is_accepted: bool) -> Result<()> {
    let task_info = &mut ctx.accounts.task_info;
    let task_application = &mut ctx.accounts.task_application;
    msg!(
        "Verifying {} for task {}: accepted={}",
        task_application.applicant,
        task_info.task_id,
        is_accepted
    );

    let old_state = task_application.state;
    let (new_state, slot_change) = old_state
        .verify(task_info.acceptance_flow, is_accepted)
        .ok_or(TaskTraderError::InvalidApplicationState)?;

    match slot_change {
        SlotChange::Claim => {
            require!(task_info.has_open_slot(), TaskTraderError::TakerNumExceeded);
            task_info.approved_num = task_info
                .approved_num
                .checked_add(1)
                .ok_or(TaskTraderError::ArithmeticOverflow)?;
        }
        SlotChange::Release => {
            task_info.approved_num = task_info
                .approved_num
                .checked_sub(1)
                .ok_or(TaskTraderError::ArithmeticOverflow)?;
        }
        SlotChange::Keep => {}
    }

    let clock = Clock::get()?;
    task_application.state = new_state;
    task_application.updated_at = clock.unix_timestamp;

    emit!(ApplicationVerified {
        task_id: task_info.task_id,
        applicant: task_application.applicant,
        is_accepted,
        old_state: old_state as u8,
        new_state: new_state as u8,
        approved_num: task_info.approved_num,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
