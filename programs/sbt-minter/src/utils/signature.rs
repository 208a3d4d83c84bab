//! secp256k1 signer recovery

use anchor_lang::prelude::*;
use solana_secp256k1_recover::secp256k1_recover;

use crate::errors::SbtMinterError;
use crate::utils::profile::SbtProfile;

pub const MAX_RECOVERY_ID: u8 = 3;

/// Address of a secp256k1 key: keccak256 of the 64-byte uncompressed
/// public key without its 0x04 prefix.
pub fn signer_address(uncompressed_pubkey: &[u8; 64]) -> Pubkey {
    Pubkey::new_from_array(solana_keccak_hasher::hashv(&[uncompressed_pubkey.as_ref()]).to_bytes())
}

/// Recover the address that produced `signature` over `message_hash`.
pub fn recover_signer(
    message_hash: &[u8; 32],
    signature: &[u8; 64],
    recovery_id: u8,
) -> Result<Pubkey> {
    require!(
        recovery_id <= MAX_RECOVERY_ID,
        SbtMinterError::InvalidRecoveryId
    );
    let pubkey = secp256k1_recover(message_hash, recovery_id, signature)
        .map_err(|_| error!(SbtMinterError::InvalidSignature))?;
    Ok(signer_address(&pubkey.to_bytes()))
}

/// Check that `profile` was signed by `expected_signer`.
pub fn verify_profile_signature(
    profile: &SbtProfile,
    signature: &[u8; 64],
    recovery_id: u8,
    expected_signer: &Pubkey,
) -> Result<()> {
    let recovered = recover_signer(&profile.message_hash(), signature, recovery_id)?;
    if recovered != *expected_signer {
        msg!("Recovered signer {} does not match", recovered);
        return err!(SbtMinterError::InvalidSignature);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

    fn secret(byte: u8) -> SecretKey {
        SecretKey::from_slice(&[byte; 32]).unwrap()
    }

    fn address_of(key: &SecretKey) -> Pubkey {
        let public = PublicKey::from_secret_key(&Secp256k1::new(), key);
        let mut raw = [0u8; 64];
        raw.copy_from_slice(&public.serialize_uncompressed()[1..]);
        signer_address(&raw)
    }

    fn sign(hash: [u8; 32], key: &SecretKey) -> ([u8; 64], u8) {
        let sig = Secp256k1::new().sign_ecdsa_recoverable(&Message::from_digest(hash), key);
        let (recovery_id, bytes) = sig.serialize_compact();
        (bytes, recovery_id.to_i32() as u8)
    }

    fn profile() -> SbtProfile<'static> {
        SbtProfile {
            name: "bob",
            photo: "ipfs://bob",
            twitter_id: "@bob",
            discord_id: "bob#1234",
            telegram_id: "bob_tg",
            score: 7,
        }
    }

    #[test]
    fn test_valid_signature_recovers_signer() {
        let key = secret(0x11);
        let p = profile();
        let (signature, recovery_id) = sign(p.message_hash(), &key);

        let recovered = recover_signer(&p.message_hash(), &signature, recovery_id).unwrap();
        assert_eq!(recovered, address_of(&key));
        assert!(verify_profile_signature(&p, &signature, recovery_id, &address_of(&key)).is_ok());
    }

    #[test]
    fn test_wrong_signer_rejected() {
        let p = profile();
        let (signature, recovery_id) = sign(p.message_hash(), &secret(0x11));

        let result = verify_profile_signature(&p, &signature, recovery_id, &address_of(&secret(0x22)));
        assert!(result.unwrap_err() == SbtMinterError::InvalidSignature.into());
    }

    #[test]
    fn test_tampered_profile_rejected() {
        let key = secret(0x11);
        let p = profile();
        let (signature, recovery_id) = sign(p.message_hash(), &key);

        let tampered = SbtProfile { score: 8, ..p };
        let result = verify_profile_signature(&tampered, &signature, recovery_id, &address_of(&key));
        assert!(result.unwrap_err() == SbtMinterError::InvalidSignature.into());
    }

    #[test]
    fn test_recovery_id_out_of_range() {
        let p = profile();
        let (signature, _) = sign(p.message_hash(), &secret(0x11));

        let result = recover_signer(&p.message_hash(), &signature, 4);
        assert!(result.unwrap_err() == SbtMinterError::InvalidRecoveryId.into());
    }

    #[test]
    fn test_garbage_signature_rejected() {
        let p = profile();
        let result = recover_signer(&p.message_hash(), &[0u8; 64], 0);
        assert!(result.unwrap_err() == SbtMinterError::InvalidSignature.into());
    }
}
