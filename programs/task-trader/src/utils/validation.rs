//! Input validation helpers for privileged configuration

use anchor_lang::prelude::*;

use crate::errors::TaskTraderError;
use crate::instructions::constants::FEE_RATIO_DENOMINATOR;
use crate::state::MAX_SUPPORT_COINS;

/// Validate a fee ratio expressed over `FEE_RATIO_DENOMINATOR`.
pub fn validate_fee_ratio(fee_ratio: u64) -> Result<()> {
    require!(
        fee_ratio <= FEE_RATIO_DENOMINATOR,
        TaskTraderError::InvalidFeeRatio
    );
    Ok(())
}

/// Validate a support coin list before it replaces the stored one.
///
/// Entries must be non-default and unique, and the list must fit the
/// account's reserved space.
pub fn validate_support_coins(coin_mints: &[Pubkey]) -> Result<()> {
    require!(
        coin_mints.len() <= MAX_SUPPORT_COINS,
        TaskTraderError::TooManySupportCoins
    );
    for (index, mint) in coin_mints.iter().enumerate() {
        require!(
            *mint != Pubkey::default(),
            TaskTraderError::InvalidSupportCoin
        );
        for other in coin_mints.iter().skip(index + 1) {
            require!(*mint != *other, TaskTraderError::DuplicateSupportCoin);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_ratio_bounds() {
        assert!(validate_fee_ratio(0).is_ok());
        assert!(validate_fee_ratio(1000).is_ok());
        assert!(validate_fee_ratio(1001).is_err());
    }

    #[test]
    fn test_support_coins_accepts_unique_list() {
        let mints: Vec<Pubkey> = (0..MAX_SUPPORT_COINS).map(|_| Pubkey::new_unique()).collect();
        assert!(validate_support_coins(&mints).is_ok());
        assert!(validate_support_coins(&[]).is_ok());
    }

    #[test]
    fn test_support_coins_rejects_oversized_list() {
        let mints: Vec<Pubkey> = (0..=MAX_SUPPORT_COINS).map(|_| Pubkey::new_unique()).collect();
        assert_eq!(
            validate_support_coins(&mints).unwrap_err(),
            TaskTraderError::TooManySupportCoins.into()
        );
    }

    #[test]
    fn test_support_coins_rejects_duplicates() {
        let mint = Pubkey::new_unique();
        assert_eq!(
            validate_support_coins(&[mint, Pubkey::new_unique(), mint]).unwrap_err(),
            TaskTraderError::DuplicateSupportCoin.into()
        );
    }

    #[test]
    fn test_support_coins_rejects_default_key() {
        assert_eq!(
            validate_support_coins(&[Pubkey::new_unique(), Pubkey::default()]).unwrap_err(),
            TaskTraderError::InvalidSupportCoin.into()
        );
    }
}
