//! Replace an existing profile with a re-signed one

use anchor_lang::prelude::*;

use crate::events::SbtInfoUpdated;
use crate::state::{SbtAdmin, SbtInfo};
use crate::utils::profile::SbtProfile;
use crate::utils::signature::verify_profile_signature;

#[derive(Accounts)]
pub struct UpdateSbtInfo<'info> {
    #[account(
        seeds = [b"admin"],
        bump = admin.bump
    )]
    pub admin: Account<'info, SbtAdmin>,

    #[account(
        mut,
        seeds = [b"sbt_info", owner.key().as_ref()],
        bump = sbt_info.bump,
        has_one = owner
    )]
    pub sbt_info: Account<'info, SbtInfo>,

    pub owner: Signer<'info>,
}

#[allow(clippy::too_many_arguments)]
pub fn handler(
    ctx: Context<UpdateSbtInfo>,
    name: String,
    photo: String,
    twitter_id: String,
    discord_id: String,
    telegram_id: String,
    score: u64,
    signature: [u8; 64],
    recovery_id: u8,
) -> Result<()> {
    msg!("Updating SBT info");
    let profile = SbtProfile {
        name: &name,
        photo: &photo,
        twitter_id: &twitter_id,
        discord_id: &discord_id,
        telegram_id: &telegram_id,
        score,
    };
    profile.validate_lengths()?;
    verify_profile_signature(&profile, &signature, recovery_id, &ctx.accounts.admin.signer)?;

    let sbt_info = &mut ctx.accounts.sbt_info;
    let old_score = sbt_info.score;
    sbt_info.name = name;
    sbt_info.photo = photo;
    sbt_info.twitter_id = twitter_id;
    sbt_info.discord_id = discord_id;
    sbt_info.telegram_id = telegram_id;
    sbt_info.score = score;
    sbt_info.updated_at = Clock::get()?.unix_timestamp;

    emit!(SbtInfoUpdated {
        owner: sbt_info.owner,
        old_score,
        new_score: score,
        timestamp: sbt_info.updated_at,
    });

    Ok(())
}
