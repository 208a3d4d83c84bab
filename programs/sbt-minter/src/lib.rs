#![allow(unexpected_cfgs)]
//! SBT Minter
//!
//! One soulbound profile token per wallet. A mint is only accepted when the
//! submitted profile carries a recoverable secp256k1 signature from the
//! off-chain signer registered at mint creation. Minted token accounts are
//! frozen immediately so the token cannot move.

use anchor_lang::prelude::*;

declare_id!("GwvQ53QTu1xz3XXYfG5m5jEqwhMBvVBudPS8TUuFYnhT");

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

#[program]
pub mod sbt_minter {
    use super::*;

    /// Create the admin record and the SBT mint. Can only succeed once.
    ///
    /// # Arguments
    /// * `signer` - keccak256 address of the trusted secp256k1 key
    /// * `fee_receiver` - Wallet credited with paid mint fees
    /// * `mint_fee` - Lamports charged by `mint_sbt_token_paid`
    pub fn create_sbt_token_mint(
        ctx: Context<CreateSbtTokenMint>,
        signer: Pubkey,
        fee_receiver: Pubkey,
        mint_fee: u64,
    ) -> Result<()> {
        instructions::create_sbt_token_mint::handler(ctx, signer, fee_receiver, mint_fee)
    }

    /// Mint the caller's SBT after charging the configured fee.
    #[allow(clippy::too_many_arguments)]
    pub fn mint_sbt_token_paid(
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
        instructions::mint_sbt_token::paid_handler(
            ctx,
            name,
            photo,
            twitter_id,
            discord_id,
            telegram_id,
            score,
            signature,
            recovery_id,
        )
    }

    /// Mint the caller's SBT without a fee.
    #[allow(clippy::too_many_arguments)]
    pub fn mint_sbt_token_free(
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
        instructions::mint_sbt_token::free_handler(
            ctx,
            name,
            photo,
            twitter_id,
            discord_id,
            telegram_id,
            score,
            signature,
            recovery_id,
        )
    }

    /// Replace the caller's profile with a freshly signed one.
    #[allow(clippy::too_many_arguments)]
    pub fn update_sbt_info(
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
        instructions::update_sbt_info::handler(
            ctx,
            name,
            photo,
            twitter_id,
            discord_id,
            telegram_id,
            score,
            signature,
            recovery_id,
        )
    }

    /// Rotate signer, fee receiver and mint fee. Creator only.
    pub fn update_sbt_admin(
        ctx: Context<UpdateSbtAdmin>,
        signer: Pubkey,
        fee_receiver: Pubkey,
        mint_fee: u64,
    ) -> Result<()> {
        instructions::update_sbt_admin::handler(ctx, signer, fee_receiver, mint_fee)
    }
}
