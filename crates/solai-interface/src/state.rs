//! `UserAccount` byte layout and decoder.
//!
//! The program writes an 8-byte discriminator followed by a fixed 123-byte
//! body. All integers are little-endian.
//!
//! | Field | Offset (after discriminator) | Size |
//! |---|---|---|
//! | authority | 0 | 32 |
//! | total_queries | 32 | 8 |
//! | total_fees_paid | 40 | 8 |
//! | last_prompt_hash | 48 | 32 |
//! | last_response_hash | 80 | 32 |
//! | last_log_slot | 112 | 8 |
//! | bump | 120 | 1 |
//! | reserved | 121 | 2 |
//!
//! The layout is declared once as [`UserAccountLayout`]; offsets are checked
//! against it at compile time and decoding casts the body onto it.
//!
//! Decoding requires exactly [`USER_ACCOUNT_SIZE`] (131) bytes. The deployed
//! program sizes its allocation from a length constant that omits the two
//! reserved bytes, giving 129-byte accounts. Records of that size decode as
//! [`DecodeError::InvalidLength`] and are missed by the 131-byte
//! `getProgramAccounts` filter, so a program built that way shows up as
//! undecodable accounts and empty statistics.

use bytemuck::{Pod, Zeroable};
use core::mem::{offset_of, size_of};
use solana_program::pubkey::Pubkey;

use crate::DecodeError;
use crate::discriminator::{DISCRIMINATOR_LEN, USER_ACCOUNT};

/// Total size of a `UserAccount` on-chain, discriminator included.
pub const USER_ACCOUNT_SIZE: usize = DISCRIMINATOR_LEN + size_of::<UserAccountLayout>();

/// Raw body of a `UserAccount` (everything after the discriminator).
///
/// Integers are kept as byte arrays so the struct has alignment 1 and casts
/// directly over account data at any offset.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct UserAccountLayout {
    /// Owner of the record, set once at creation
    pub authority: [u8; 32],
    /// Number of logged interactions (u64 LE)
    pub total_queries: [u8; 8],
    /// Lamports paid across all logged interactions (u64 LE)
    pub total_fees_paid: [u8; 8],
    /// Prompt hash of the most recent log
    pub last_prompt_hash: [u8; 32],
    /// Response hash of the most recent log
    pub last_response_hash: [u8; 32],
    /// Slot of the most recent log (u64 LE)
    pub last_log_slot: [u8; 8],
    /// PDA bump
    pub bump: u8,
    /// Trailing bytes up to the documented record size
    pub reserved: [u8; 2],
}

/// Byte offsets of each field, relative to the end of the discriminator.
pub mod offsets {
    /// `authority`
    pub const AUTHORITY: usize = 0;
    /// `total_queries`
    pub const TOTAL_QUERIES: usize = 32;
    /// `total_fees_paid`
    pub const TOTAL_FEES_PAID: usize = 40;
    /// `last_prompt_hash`
    pub const LAST_PROMPT_HASH: usize = 48;
    /// `last_response_hash`
    pub const LAST_RESPONSE_HASH: usize = 80;
    /// `last_log_slot`
    pub const LAST_LOG_SLOT: usize = 112;
    /// `bump`
    pub const BUMP: usize = 120;
}

const _: () = {
    assert!(size_of::<UserAccountLayout>() == 123);
    assert!(USER_ACCOUNT_SIZE == 131);
    assert!(offset_of!(UserAccountLayout, authority) == offsets::AUTHORITY);
    assert!(offset_of!(UserAccountLayout, total_queries) == offsets::TOTAL_QUERIES);
    assert!(offset_of!(UserAccountLayout, total_fees_paid) == offsets::TOTAL_FEES_PAID);
    assert!(offset_of!(UserAccountLayout, last_prompt_hash) == offsets::LAST_PROMPT_HASH);
    assert!(offset_of!(UserAccountLayout, last_response_hash) == offsets::LAST_RESPONSE_HASH);
    assert!(offset_of!(UserAccountLayout, last_log_slot) == offsets::LAST_LOG_SLOT);
    assert!(offset_of!(UserAccountLayout, bump) == offsets::BUMP);
};

/// Decoded `UserAccount`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserAccount {
    /// Owner of the record
    pub authority: Pubkey,
    /// Number of logged interactions
    pub total_queries: u64,
    /// Lamports paid across all logged interactions
    pub total_fees_paid: u64,
    /// Prompt hash of the most recent log (zero before the first log)
    pub last_prompt_hash: [u8; 32],
    /// Response hash of the most recent log (zero before the first log)
    pub last_response_hash: [u8; 32],
    /// Slot of the most recent log
    pub last_log_slot: u64,
    /// PDA bump
    pub bump: u8,
}

impl UserAccount {
    /// Decode full account data (discriminator included).
    ///
    /// The length is checked before any field is read; truncated and
    /// oversized buffers are rejected alike.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() != USER_ACCOUNT_SIZE {
            return Err(DecodeError::InvalidLength {
                expected: USER_ACCOUNT_SIZE,
                actual: data.len(),
            });
        }

        let (discriminator, body) = data.split_at(DISCRIMINATOR_LEN);
        if discriminator != USER_ACCOUNT {
            let mut found = [0u8; DISCRIMINATOR_LEN];
            found.copy_from_slice(discriminator);
            return Err(DecodeError::InvalidDiscriminator { found });
        }

        let layout: &UserAccountLayout =
            bytemuck::try_from_bytes(body).map_err(|_| DecodeError::InvalidLength {
                expected: USER_ACCOUNT_SIZE,
                actual: data.len(),
            })?;

        Ok(Self::from(layout))
    }
}

impl From<&UserAccountLayout> for UserAccount {
    fn from(layout: &UserAccountLayout) -> Self {
        Self {
            authority: Pubkey::new_from_array(layout.authority),
            total_queries: u64::from_le_bytes(layout.total_queries),
            total_fees_paid: u64::from_le_bytes(layout.total_fees_paid),
            last_prompt_hash: layout.last_prompt_hash,
            last_response_hash: layout.last_response_hash,
            last_log_slot: u64::from_le_bytes(layout.last_log_slot),
            bump: layout.bump,
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl UserAccount {
    /// Encode as the program would store it. Test fixtures only.
    pub fn to_account_data(&self) -> Vec<u8> {
        let layout = UserAccountLayout {
            authority: self.authority.to_bytes(),
            total_queries: self.total_queries.to_le_bytes(),
            total_fees_paid: self.total_fees_paid.to_le_bytes(),
            last_prompt_hash: self.last_prompt_hash,
            last_response_hash: self.last_response_hash,
            last_log_slot: self.last_log_slot.to_le_bytes(),
            bump: self.bump,
            reserved: [0; 2],
        };

        let mut data = Vec::with_capacity(USER_ACCOUNT_SIZE);
        data.extend_from_slice(&USER_ACCOUNT);
        data.extend_from_slice(bytemuck::bytes_of(&layout));
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    /// Build a 131-byte buffer by writing each field at its documented offset.
    fn hand_written_fixture() -> Vec<u8> {
        let mut data = vec![0u8; 131];
        data[..8].copy_from_slice(&USER_ACCOUNT);
        let body = &mut data[8..];
        body[0..32].copy_from_slice(&[9u8; 32]);
        body[32..40].copy_from_slice(&42u64.to_le_bytes());
        body[40..48].copy_from_slice(&21_000_000u64.to_le_bytes());
        body[48..80].copy_from_slice(&[0xAA; 32]);
        body[80..112].copy_from_slice(&[0xBB; 32]);
        body[112..120].copy_from_slice(&987_654_321u64.to_le_bytes());
        body[120] = 254;
        data
    }

    #[test]
    fn test_decode_reads_documented_offsets() {
        let account = UserAccount::decode(&hand_written_fixture()).unwrap();

        assert_eq!(account.authority, Pubkey::new_from_array([9u8; 32]));
        assert_eq!(account.total_queries, 42);
        assert_eq!(account.total_fees_paid, 21_000_000);
        assert_eq!(account.last_prompt_hash, [0xAA; 32]);
        assert_eq!(account.last_response_hash, [0xBB; 32]);
        assert_eq!(account.last_log_slot, 987_654_321);
        assert_eq!(account.bump, 254);
    }

    #[test]
    fn test_fixture_encoder_matches_hand_written_bytes() {
        let account = UserAccount::decode(&hand_written_fixture()).unwrap();
        assert_eq!(account.to_account_data(), hand_written_fixture());
    }

    #[test_case(0 ; "empty")]
    #[test_case(8 ; "discriminator only")]
    #[test_case(129 ; "fields without reserved bytes")]
    #[test_case(130 ; "one byte short")]
    #[test_case(132 ; "one byte over")]
    #[test_case(165 ; "token account sized")]
    fn test_decode_rejects_wrong_length(len: usize) {
        let mut data = hand_written_fixture();
        data.resize(len, 0);
        assert_eq!(
            UserAccount::decode(&data),
            Err(DecodeError::InvalidLength {
                expected: 131,
                actual: len
            })
        );
    }

    #[test]
    fn test_decode_rejects_foreign_discriminator() {
        let mut data = hand_written_fixture();
        data[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            UserAccount::decode(&data),
            Err(DecodeError::InvalidDiscriminator {
                found: [1, 2, 3, 4, 5, 6, 7, 8]
            })
        );
    }
}
