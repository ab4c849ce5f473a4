//! Program Derived Address (PDA) helpers
//!
//! Seeds must match the on-chain program byte for byte:
//!
//! | PDA | Seeds |
//! |---|---|
//! | UserAccount | `["user", authority]` |
//! | Treasury | `["treasury"]` |
//!
//! A mismatch here is not a runtime error. It produces a valid-looking
//! address the program will reject, so these helpers are only ever called
//! with the constants below.

use solana_program::pubkey::Pubkey;

/// Seed tag for per-authority user accounts.
pub const USER_SEED: &[u8] = b"user";

/// Seed tag for the global treasury.
pub const TREASURY_SEED: &[u8] = b"treasury";

/// Derive a program address and bump from an ordered list of seeds.
///
/// Pure and deterministic: the same inputs give the same `(address, bump)`
/// in every process.
pub fn derive_program_address(program_id: &Pubkey, seeds: &[&[u8]]) -> (Pubkey, u8) {
    Pubkey::find_program_address(seeds, program_id)
}

/// Derive the UserAccount PDA for `authority`.
/// Seeds: ["user", authority]
pub fn find_user_account_pda(program_id: &Pubkey, authority: &Pubkey) -> (Pubkey, u8) {
    derive_program_address(program_id, &[USER_SEED, authority.as_ref()])
}

/// Derive the treasury PDA.
/// Seeds: ["treasury"]
pub fn find_treasury_pda(program_id: &Pubkey) -> (Pubkey, u8) {
    derive_program_address(program_id, &[TREASURY_SEED])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PROGRAM_ID;

    #[test]
    fn test_derivation_is_deterministic() {
        let authority = Pubkey::new_unique();
        assert_eq!(
            find_user_account_pda(&PROGRAM_ID, &authority),
            find_user_account_pda(&PROGRAM_ID, &authority),
        );
        assert_eq!(find_treasury_pda(&PROGRAM_ID), find_treasury_pda(&PROGRAM_ID));
    }

    #[test]
    fn test_distinct_authorities_get_distinct_accounts() {
        let authorities: Vec<Pubkey> = (0..32).map(|_| Pubkey::new_unique()).collect();
        let mut addresses: Vec<Pubkey> = authorities
            .iter()
            .map(|a| find_user_account_pda(&PROGRAM_ID, a).0)
            .collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), authorities.len());
    }

    #[test]
    fn test_user_pda_matches_raw_seed_concatenation() {
        let authority = Pubkey::new_from_array([7u8; 32]);
        let (expected, bump) =
            Pubkey::find_program_address(&[b"user", &[7u8; 32]], &PROGRAM_ID);
        assert_eq!(find_user_account_pda(&PROGRAM_ID, &authority), (expected, bump));
    }

    #[test]
    fn test_pda_verifies_with_bump() {
        let authority = Pubkey::new_unique();
        let (address, bump) = find_user_account_pda(&PROGRAM_ID, &authority);
        let recreated =
            Pubkey::create_program_address(&[USER_SEED, authority.as_ref(), &[bump]], &PROGRAM_ID)
                .unwrap();
        assert_eq!(recreated, address);
        assert!(!address.is_on_curve());
    }

    #[test]
    fn test_program_id_changes_addresses() {
        let other_program = Pubkey::new_unique();
        assert_ne!(find_treasury_pda(&PROGRAM_ID).0, find_treasury_pda(&other_program).0);
    }
}
