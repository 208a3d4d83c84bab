//! Rotate the minter configuration

use anchor_lang::prelude::*;

use crate::errors::SbtMinterError;
use crate::events::SbtAdminUpdated;
use crate::state::SbtAdmin;

#[derive(Accounts)]
pub struct UpdateSbtAdmin<'info> {
    #[account(
        mut,
        seeds = [b"admin"],
        bump = admin.bump,
        constraint = admin.authority == authority.key() @ SbtMinterError::Unauthorized
    )]
    pub admin: Account<'info, SbtAdmin>,

    pub authority: Signer<'info>,
}

pub fn handler(
    ctx: Context<UpdateSbtAdmin>,
    signer: Pubkey,
    fee_receiver: Pubkey,
    mint_fee: u64,
) -> Result<()> {
    msg!("Updating SBT admin");

    let admin = &mut ctx.accounts.admin;
    let old_signer = admin.signer;
    let old_mint_fee = admin.mint_fee;
    admin.signer = signer;
    admin.fee_receiver = fee_receiver;
    admin.mint_fee = mint_fee;

    emit!(SbtAdminUpdated {
        old_signer,
        new_signer: signer,
        fee_receiver,
        old_mint_fee,
        new_mint_fee: mint_fee,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
