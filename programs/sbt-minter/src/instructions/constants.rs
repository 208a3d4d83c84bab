//! Seeds and profile field limits

/// Seed of the SBT mint PDA, which is also its own mint and freeze authority
pub const MINT_SEED: &[u8] = b"mint";

pub const SBT_INFO_SEED: &[u8] = b"sbt_info";

// Byte lengths, matching the `max_len` attributes on `SbtInfo`
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_PHOTO_LEN: usize = 200;
pub const MAX_TWITTER_ID_LEN: usize = 50;
pub const MAX_DISCORD_ID_LEN: usize = 50;
pub const MAX_TELEGRAM_ID_LEN: usize = 50;

/// Amount minted to each holder
pub const SBT_AMOUNT: u64 = 1;
