//! Replace the allowlist of task funding mints

use anchor_lang::prelude::*;

use crate::errors::TaskTraderError;
use crate::events::SupportCoinUpdated;
use crate::state::{Admin, SupportCoin};
use crate::utils::validation::validate_support_coins;

#[derive(Accounts)]
pub struct UpdateTaskSupportCoin<'info> {
    #[account(
        seeds = [b"admin"],
        bump = admin.bump,
        constraint = admin.signer == authority.key() @ TaskTraderError::Unauthorized
    )]
    pub admin: Account<'info, Admin>,

    #[account(
        init_if_needed,
        payer = authority,
        space = SupportCoin::SIZE,
        seeds = [b"support_coin"],
        bump
    )]
    pub support_coin: Account<'info, SupportCoin>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<UpdateTaskSupportCoin>, coin_mints: Vec<Pubkey>) -> Result<()> {
    msg!("Updating support coins: {} entries", coin_mints.len());
    validate_support_coins(&coin_mints)?;

    let support_coin = &mut ctx.accounts.support_coin;
    support_coin.coin_mints = coin_mints.clone();
    support_coin.bump = ctx.bumps.support_coin;

    emit!(SupportCoinUpdated {
        coin_mints,
        updated_by: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
