//! SPL token transfer helpers for pool deposits and payouts.
//!
//! The pool authority PDA owns one associated token account per supported
//! mint and signs every payout.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::instructions::constants::POOL_AUTHORITY_SEED;

/// Move tokens from a user-owned account into the pool. The user signs.
pub fn transfer_tokens_to_pool<'info>(
    from: &Account<'info, TokenAccount>,
    pool_token_account: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
    token_program: &Program<'info, Token>,
) -> Result<()> {
    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to: pool_token_account.to_account_info(),
                authority: authority.to_account_info(),
            },
        ),
        amount,
    )
}

/// Transfer tokens out of the pool using a PDA-signed CPI.
///
/// Zero amounts are skipped so optional legs of a settlement cost nothing.
///
/// # Arguments
/// * `pool_token_account` - Pool's token account for the task mint (source)
/// * `recipient` - Destination token account
/// * `pool_authority` - The pool authority PDA
/// * `pool_authority_bump` - Bump of `["pool_authority"]`
/// * `amount` - Number of tokens to transfer
/// * `token_program` - SPL Token program
pub fn transfer_tokens_from_pool<'info>(
    pool_token_account: &Account<'info, TokenAccount>,
    recipient: &AccountInfo<'info>,
    pool_authority: &AccountInfo<'info>,
    pool_authority_bump: u8,
    amount: u64,
    token_program: &Program<'info, Token>,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let bump = [pool_authority_bump];
    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, &bump];
    let signer_seeds: &[&[&[u8]]] = &[seeds];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: pool_token_account.to_account_info(),
                to: recipient.clone(),
                authority: pool_authority.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}
