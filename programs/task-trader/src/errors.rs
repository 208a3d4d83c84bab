//! Error codes for the Task Trader program

use anchor_lang::prelude::*;

#[error_code]
pub enum TaskTraderError {
    // Authorization errors
    #[msg("Caller is not authorized to perform this action")]
    Unauthorized,

    #[msg("Only the task requester can perform this action")]
    InvalidRequester,

    #[msg("Only the applicant can perform this action")]
    InvalidApplicant,

    // Task errors
    #[msg("Task is not open")]
    InvalidTaskState,

    #[msg("Task has reached its taker limit")]
    TakerNumExceeded,

    #[msg("Application does not belong to this task")]
    InvalidTaskId,

    #[msg("Task amount and taker count must be greater than zero")]
    InvalidAmount,

    // Application errors
    #[msg("Application is not in a state that allows this action")]
    InvalidApplicationState,

    #[msg("Inviter is invalid or does not match the recorded inviter")]
    InvalidInviter,

    // Asset errors
    #[msg("Coin is not in the supported list")]
    UnsupportedCoin,

    #[msg("Mint account does not match the task coin")]
    InvalidMint,

    #[msg("Too many supported coins")]
    TooManySupportCoins,

    #[msg("Supported coin list contains a duplicate entry")]
    DuplicateSupportCoin,

    #[msg("Supported coin list contains the default public key")]
    InvalidSupportCoin,

    // Settlement errors
    #[msg("Fee ratio must not exceed the fee denominator")]
    InvalidFeeRatio,

    #[msg("Fee receiver account does not match the configured fee receiver")]
    InvalidFeeReceiver,

    #[msg("Payout exceeds the task's remaining escrow")]
    InsufficientEscrowBalance,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
