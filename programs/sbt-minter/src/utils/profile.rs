//! Profile fields covered by the off-chain signature

use anchor_lang::prelude::*;

use crate::errors::SbtMinterError;
use crate::instructions::constants::{
    MAX_DISCORD_ID_LEN, MAX_NAME_LEN, MAX_PHOTO_LEN, MAX_TELEGRAM_ID_LEN, MAX_TWITTER_ID_LEN,
};

/// Borrowed view of a submitted profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SbtProfile<'a> {
    pub name: &'a str,
    pub photo: &'a str,
    pub twitter_id: &'a str,
    pub discord_id: &'a str,
    pub telegram_id: &'a str,
    pub score: u64,
}

impl SbtProfile<'_> {
    /// Name of the first field longer than its limit, if any.
    pub fn oversized_field(&self) -> Option<&'static str> {
        [
            ("name", self.name.len(), MAX_NAME_LEN),
            ("photo", self.photo.len(), MAX_PHOTO_LEN),
            ("twitter_id", self.twitter_id.len(), MAX_TWITTER_ID_LEN),
            ("discord_id", self.discord_id.len(), MAX_DISCORD_ID_LEN),
            ("telegram_id", self.telegram_id.len(), MAX_TELEGRAM_ID_LEN),
        ]
        .into_iter()
        .find(|(_, len, max)| len > max)
        .map(|(field, _, _)| field)
    }

    pub fn validate_lengths(&self) -> Result<()> {
        if let Some(field) = self.oversized_field() {
            msg!("Profile field too long: {}", field);
            return err!(SbtMinterError::InvalidLength);
        }
        Ok(())
    }

    /// keccak256 over the raw field bytes followed by the little-endian score.
    /// Fields are concatenated without separators.
    pub fn message_hash(&self) -> [u8; 32] {
        let score = self.score.to_le_bytes();
        solana_keccak_hasher::hashv(&[
            self.name.as_bytes(),
            self.photo.as_bytes(),
            self.twitter_id.as_bytes(),
            self.discord_id.as_bytes(),
            self.telegram_id.as_bytes(),
            score.as_ref(),
        ])
        .to_bytes()
    }
}
