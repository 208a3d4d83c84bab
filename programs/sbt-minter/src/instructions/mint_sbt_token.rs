//! Mint a soulbound token against a signed profile

use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::SbtMinterError;
use crate::events::SbtMinted;
use crate::state::{SbtAdmin, SbtInfo};
use crate::utils::profile::SbtProfile;
use crate::utils::signature::verify_profile_signature;

use super::mint_helpers::{collect_mint_fee, mint_and_freeze};

#[derive(Accounts)]
pub struct MintSbtToken<'info> {
    #[account(
        mut,
        seeds = [b"admin"],
        bump = admin.bump
    )]
    pub admin: Box<Account<'info, SbtAdmin>>,

    #[account(
        mut,
        seeds = [b"mint"],
        bump = admin.mint_bump
    )]
    pub mint: Box<Account<'info, Mint>>,

    /// One record per owner; `init` makes a second mint fail.
    #[account(
        init,
        payer = owner,
        space = SbtInfo::SIZE,
        seeds = [b"sbt_info", owner.key().as_ref()],
        bump
    )]
    pub sbt_info: Box<Account<'info, SbtInfo>>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = mint,
        associated_token::authority = owner
    )]
    pub token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = fee_receiver.key() == admin.fee_receiver @ SbtMinterError::InvalidFeeReceiver
    )]
    pub fee_receiver: SystemAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[allow(clippy::too_many_arguments)]
pub fn paid_handler(
    ctx: Context<MintSbtToken>,
    name: String,
    photo: String,
    twitter_id: String,
    discord_id: String,
    telegram_id: String,
    score: u64,
    signature: [u8; 64],
    recovery_id: u8,
) -> Result<()> {
    msg!("Minting paid SBT");
    let profile = SbtProfile {
        name: &name,
        photo: &photo,
        twitter_id: &twitter_id,
        discord_id: &discord_id,
        telegram_id: &telegram_id,
        score,
    };
    mint_sbt(ctx, profile, &signature, recovery_id, true)
}

#[allow(clippy::too_many_arguments)]
pub fn free_handler(
    ctx: Context<MintSbtToken>,
    name: String,
    photo: String,
    twitter_id: String,
    discord_id: String,
    telegram_id: String,
    score: u64,
    signature: [u8; 64],
    recovery_id: u8,
) -> Result<()> {
    msg!("Minting free SBT");
    let profile = SbtProfile {
        name: &name,
        photo: &photo,
        twitter_id: &twitter_id,
        discord_id: &discord_id,
        telegram_id: &telegram_id,
        score,
    };
    mint_sbt(ctx, profile, &signature, recovery_id, false)
}

fn mint_sbt(
    ctx: Context<MintSbtToken>,
    profile: SbtProfile,
    signature: &[u8; 64],
    recovery_id: u8,
    charge_fee: bool,
) -> Result<()> {
    profile.validate_lengths()?;
    verify_profile_signature(&profile, signature, recovery_id, &ctx.accounts.admin.signer)?;

    let fee_paid = if charge_fee {
        ctx.accounts.admin.mint_fee
    } else {
        0
    };
    collect_mint_fee(
        &ctx.accounts.owner,
        &ctx.accounts.fee_receiver.to_account_info(),
        fee_paid,
        &ctx.accounts.system_program,
    )?;

    mint_and_freeze(
        &ctx.accounts.mint,
        &ctx.accounts.token_account,
        ctx.accounts.admin.mint_bump,
        &ctx.accounts.token_program,
    )?;

    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();

    let sbt_info = &mut ctx.accounts.sbt_info;
    sbt_info.owner = owner;
    sbt_info.name = profile.name.to_string();
    sbt_info.photo = profile.photo.to_string();
    sbt_info.twitter_id = profile.twitter_id.to_string();
    sbt_info.discord_id = profile.discord_id.to_string();
    sbt_info.telegram_id = profile.telegram_id.to_string();
    sbt_info.score = profile.score;
    sbt_info.minted_at = clock.unix_timestamp;
    sbt_info.updated_at = clock.unix_timestamp;
    sbt_info.bump = ctx.bumps.sbt_info;

    let admin = &mut ctx.accounts.admin;
    admin.total_minted = admin
        .total_minted
        .checked_add(1)
        .ok_or(SbtMinterError::ArithmeticOverflow)?;

    emit!(SbtMinted {
        owner,
        mint: ctx.accounts.mint.key(),
        score: profile.score,
        fee_paid,
        total_minted: admin.total_minted,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
