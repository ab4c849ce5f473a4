//! Program ID constants.
//!
//! Decoded at compile time from the `solai-program-ids` crate, which is the
//! single source of truth for program addresses.

use solana_program::pubkey::Pubkey;

/// SolAI program ID.
pub const PROGRAM_ID: Pubkey =
    Pubkey::new_from_array(five8_const::decode_32_const(solai_program_ids::SOLAI_PROGRAM_ID));

/// System program ID.
pub const SYSTEM_PROGRAM_ID: Pubkey =
    Pubkey::new_from_array(five8_const::decode_32_const(solai_program_ids::SYSTEM_PROGRAM_ID));
