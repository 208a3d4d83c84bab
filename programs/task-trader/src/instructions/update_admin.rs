//! Rotate admin signer, fee receiver and fee ratio

use anchor_lang::prelude::*;

use crate::errors::TaskTraderError;
use crate::events::AdminUpdated;
use crate::state::Admin;
use crate::utils::validation::validate_fee_ratio;

#[derive(Accounts)]
pub struct UpdateAdmin<'info> {
    #[account(
        mut,
        seeds = [b"admin"],
        bump = admin.bump,
        constraint = admin.signer == authority.key() @ TaskTraderError::Unauthorized
    )]
    pub admin: Account<'info, Admin>,

    pub authority: Signer<'info>,
}

pub fn handler(
    ctx: Context<UpdateAdmin>,
    signer: Pubkey,
    fee_receiver: Pubkey,
    fee_ratio: u64,
) -> Result<()> {
    msg!("Updating admin");
    validate_fee_ratio(fee_ratio)?;

    let admin = &mut ctx.accounts.admin;
    let old_signer = admin.signer;
    let old_fee_ratio = admin.fee_ratio;
    admin.signer = signer;
    admin.fee_receiver = fee_receiver;
    admin.fee_ratio = fee_ratio;

    emit!(AdminUpdated {
        old_signer,
        new_signer: signer,
        fee_receiver,
        old_fee_ratio,
        new_fee_ratio: fee_ratio,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
