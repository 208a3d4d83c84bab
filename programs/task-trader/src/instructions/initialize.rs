//! Create the singleton admin record

use anchor_lang::prelude::*;

use crate::events::AdminInitialized;
use crate::state::{AcceptanceFlow, Admin};
use crate::utils::validation::validate_fee_ratio;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = payer,
        space = Admin::SIZE,
        seeds = [b"admin"],
        bump
    )]
    pub admin: Account<'info, Admin>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    signer: Pubkey,
    fee_receiver: Pubkey,
    fee_ratio: u64,
) -> Result<()> {
    msg!("Initializing admin");
    validate_fee_ratio(fee_ratio)?;

    let admin = &mut ctx.accounts.admin;
    admin.signer = signer;
    admin.fee_receiver = fee_receiver;
    admin.fee_ratio = fee_ratio;
    admin.acceptance_flow = AcceptanceFlow::default();
    admin.total_tasks = 0;
    admin.total_withdrawals = 0;
    admin.total_value_settled = 0;
    admin.bump = ctx.bumps.admin;

    emit!(AdminInitialized {
        signer,
        fee_receiver,
        fee_ratio,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
