//! Create the minter configuration and the SBT mint

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};

use crate::events::SbtMintCreated;
use crate::state::SbtAdmin;

#[derive(Accounts)]
pub struct CreateSbtTokenMint<'info> {
    #[account(
        init,
        payer = authority,
        space = SbtAdmin::SIZE,
        seeds = [b"admin"],
        bump
    )]
    pub admin: Account<'info, SbtAdmin>,

    #[account(
        init,
        payer = authority,
        seeds = [b"mint"],
        bump,
        mint::decimals = 0,
        mint::authority = mint.key(),
        mint::freeze_authority = mint.key(),
    )]
    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreateSbtTokenMint>,
    signer: Pubkey,
    fee_receiver: Pubkey,
    mint_fee: u64,
) -> Result<()> {
    msg!("Creating SBT mint");

    let admin = &mut ctx.accounts.admin;
    admin.authority = ctx.accounts.authority.key();
    admin.signer = signer;
    admin.fee_receiver = fee_receiver;
    admin.mint_fee = mint_fee;
    admin.total_minted = 0;
    admin.bump = ctx.bumps.admin;
    admin.mint_bump = ctx.bumps.mint;

    emit!(SbtMintCreated {
        mint: ctx.accounts.mint.key(),
        authority: ctx.accounts.authority.key(),
        signer,
        fee_receiver,
        mint_fee,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
