//! Shared constants for instruction handlers

/// Denominator for `fee_ratio` (100% = 1000)
pub const FEE_RATIO_DENOMINATOR: u64 = 1000;

/// Seed of the PDA that owns every pool token account
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";

