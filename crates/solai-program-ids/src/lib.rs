//! Single source of truth for the SolAI program ID.
//!
//! Program IDs are `&'static str` constants so they can be decoded at compile
//! time by any crate (see `solai_interface::PROGRAM_ID`) without pulling in a
//! Solana SDK.
//!
//! # Usage
//!
//! ```rust
//! assert_eq!(solai_program_ids::SOLAI_PROGRAM_ID.len(), 44);
//! ```

#![no_std]

// =============================================================================
// SolAI Program ID
// =============================================================================

/// SolAI interaction-logging program ID.
///
/// Matches `declare_id!` in the on-chain program and the `address` field of
/// its published IDL. The program is deployed to devnet.
pub const SOLAI_PROGRAM_ID: &str = "8pMVJamgnZKWmYJQQ8gvPaT7UFVg5BAr3Rg5HY8epYyh";

/// Cluster the program ID above is deployed to.
pub const DEPLOYED_CLUSTER: &str = "devnet";

// =============================================================================
// Native Programs
// =============================================================================

/// System program ID, referenced read-only by both SolAI instructions.
pub const SYSTEM_PROGRAM_ID: &str = "11111111111111111111111111111111";
