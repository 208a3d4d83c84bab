//! Open or close a task to new applications

use anchor_lang::prelude::*;

use crate::errors::TaskTraderError;
use crate::events::TaskStateChanged;
use crate::state::{Admin, TaskInfo, TaskState};

#[derive(Accounts)]
pub struct SetTaskState<'info> {
    #[account(
        seeds = [b"admin"],
        bump = admin.bump
    )]
    pub admin: Account<'info, Admin>,

    #[account(
        mut,
        seeds = [b"task_info", task_info.task_id.to_le_bytes().as_ref()],
        bump = task_info.bump,
        constraint = (authority.key() == admin.signer
            || authority.key() == task_info.requester) @ TaskTraderError::Unauthorized
    )]
    pub task_info: Account<'info, TaskInfo>,

    pub authority: Signer<'info>,
}

pub fn open_handler(ctx: Context<SetTaskState>) -> Result<()> {
    set_state(ctx, TaskState::Open)
}

pub fn close_handler(ctx: Context<SetTaskState>) -> Result<()> {
    set_state(ctx, TaskState::Close)
}

/// Idempotent: setting the current state again succeeds and still emits.
fn set_state(ctx: Context<SetTaskState>, new_state: TaskState) -> Result<()> {
    let task_info = &mut ctx.accounts.task_info;
    msg!("Setting task {} state to {:?}", task_info.task_id, new_state);

    let old_state = task_info.state;
    task_info.state = new_state;

    emit!(TaskStateChanged {
        task_id: task_info.task_id,
        old_state: old_state as u8,
        new_state: new_state as u8,
        updated_by: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
