//! Events emitted by the SBT Minter program

use anchor_lang::prelude::*;

/// Emitted once when the admin record and mint are created
#[event]
pub struct SbtMintCreated {
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub signer: Pubkey,
    pub fee_receiver: Pubkey,
    pub mint_fee: u64,
    pub timestamp: i64,
}

#[event]
pub struct SbtMinted {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub score: u64,
    /// Lamports paid to the fee receiver, zero for free mints
    pub fee_paid: u64,
    pub total_minted: u64,
    pub timestamp: i64,
}

#[event]
pub struct SbtInfoUpdated {
    pub owner: Pubkey,
    pub old_score: u64,
    pub new_score: u64,
    pub timestamp: i64,
}

#[event]
pub struct SbtAdminUpdated {
    pub old_signer: Pubkey,
    pub new_signer: Pubkey,
    pub fee_receiver: Pubkey,
    pub old_mint_fee: u64,
    pub new_mint_fee: u64,
    pub timestamp: i64,
}
