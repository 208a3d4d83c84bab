//! Account state structures for the SBT Minter program

use anchor_lang::prelude::*;

use crate::instructions::constants::{
    MAX_DISCORD_ID_LEN, MAX_NAME_LEN, MAX_PHOTO_LEN, MAX_TELEGRAM_ID_LEN, MAX_TWITTER_ID_LEN,
};

/// Minter configuration
/// PDA seeds: ["admin"]
#[account]
#[derive(InitSpace)]
pub struct SbtAdmin {
    /// Creator, allowed to rotate configuration
    pub authority: Pubkey,
    /// keccak256 of the trusted signer's uncompressed public key
    pub signer: Pubkey,
    /// Wallet credited with paid mint fees
    pub fee_receiver: Pubkey,
    /// Lamports charged per paid mint
    pub mint_fee: u64,
    pub total_minted: u64,
    /// Bump seed
    pub bump: u8,
    /// Bump of the mint PDA, used to sign mint and freeze CPIs
    pub mint_bump: u8,
}

impl SbtAdmin {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // signer
        32 + // fee_receiver
        8 +  // mint_fee
        8 +  // total_minted
        1 +  // bump
        1; // mint_bump
}

/// Signed profile of one SBT holder
/// PDA seeds: ["sbt_info", owner]
#[account]
#[derive(InitSpace)]
pub struct SbtInfo {
    pub owner: Pubkey,
    #[max_len(50)]
    pub name: String,
    #[max_len(200)]
    pub photo: String,
    #[max_len(50)]
    pub twitter_id: String,
    #[max_len(50)]
    pub discord_id: String,
    #[max_len(50)]
    pub telegram_id: String,
    pub score: u64,
    pub minted_at: i64,
    pub updated_at: i64,
    /// Bump seed
    pub bump: u8,
}

impl SbtInfo {
    pub const SIZE: usize = 8 + // discriminator
        32 + // owner
        4 + MAX_NAME_LEN + // name
        4 + MAX_PHOTO_LEN + // photo
        4 + MAX_TWITTER_ID_LEN + // twitter_id
        4 + MAX_DISCORD_ID_LEN + // discord_id
        4 + MAX_TELEGRAM_ID_LEN + // telegram_id
        8 +  // score
        8 +  // minted_at
        8 +  // updated_at
        1; // bump
}
