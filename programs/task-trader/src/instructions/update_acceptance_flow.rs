//! Switch the acceptance flow used by newly created tasks

use anchor_lang::prelude::*;

use crate::errors::TaskTraderError;
use crate::events::AcceptanceFlowUpdated;
use crate::state::{AcceptanceFlow, Admin};

#[derive(Accounts)]
pub struct UpdateAcceptanceFlow<'info> {
    #[account(
        mut,
        seeds = [b"admin"],
        bump = admin.bump,
        constraint = admin.signer == authority.key() @ TaskTraderError::Unauthorized
    )]
    pub admin: Account<'info, Admin>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<UpdateAcceptanceFlow>, acceptance_flow: AcceptanceFlow) -> Result<()> {
    msg!("Updating acceptance flow");

    // Existing tasks keep the flow they were created with.
    ctx.accounts.admin.acceptance_flow = acceptance_flow;

    emit!(AcceptanceFlowUpdated {
        acceptance_flow: acceptance_flow as u8,
        updated_by: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
