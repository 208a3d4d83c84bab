//! Mint, freeze and fee CPIs.
//!
//! The mint PDA is its own mint and freeze authority, so every token CPI is
//! signed with `["mint", mint_bump]`.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::token::{self, FreezeAccount, Mint, MintTo, Token, TokenAccount};

use crate::instructions::constants::{MINT_SEED, SBT_AMOUNT};

/// Mint one SBT into `token_account` and freeze it.
pub fn mint_and_freeze<'info>(
    mint: &Account<'info, Mint>,
    token_account: &Account<'info, TokenAccount>,
    mint_bump: u8,
    token_program: &Program<'info, Token>,
) -> Result<()> {
    let bump = [mint_bump];
    let seeds: &[&[u8]] = &[MINT_SEED, &bump];
    let signer_seeds: &[&[&[u8]]] = &[seeds];

    token::mint_to(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            MintTo {
                mint: mint.to_account_info(),
                to: token_account.to_account_info(),
                authority: mint.to_account_info(),
            },
            signer_seeds,
        ),
        SBT_AMOUNT,
    )?;

    token::freeze_account(CpiContext::new_with_signer(
        token_program.to_account_info(),
        FreezeAccount {
            account: token_account.to_account_info(),
            mint: mint.to_account_info(),
            authority: mint.to_account_info(),
        },
        signer_seeds,
    ))
}

/// Pay the mint fee in lamports. Zero fees are skipped.
pub fn collect_mint_fee<'info>(
    payer: &Signer<'info>,
    fee_receiver: &AccountInfo<'info>,
    amount: u64,
    system_program: &Program<'info, System>,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    system_program::transfer(
        CpiContext::new(
            system_program.to_account_info(),
            Transfer {
                from: payer.to_account_info(),
                to: fee_receiver.clone(),
            },
        ),
        amount,
    )
}
