//! Error codes for the SBT Minter program

use anchor_lang::prelude::*;

#[error_code]
pub enum SbtMinterError {
    #[msg("Caller is not authorized to perform this action")]
    Unauthorized,

    // Profile errors
    #[msg("Profile field exceeds its maximum length")]
    InvalidLength,

    #[msg("Signature does not recover to the configured signer")]
    InvalidSignature,

    #[msg("Recovery id must be between 0 and 3")]
    InvalidRecoveryId,

    // Fee errors
    #[msg("Fee receiver does not match the admin record")]
    InvalidFeeReceiver,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
