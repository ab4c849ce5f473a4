//! SolAI Program Interface
//!
//! Client-side view of the SolAI interaction-logging program. Everything in
//! this crate is pure: no RPC, no clock, no randomness.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    solai_program (on-chain)              │
//! │  • initialize_user  → creates UserAccount PDA            │
//! │  • log_interaction  → bumps counters, pays treasury PDA  │
//! └──────────────────────────────────────────────────────────┘
//!                 ▲                              ▲
//!                 │ instruction bytes            │ account bytes
//! ┌───────────────┴──────────────────────────────┴───────────┐
//! │                    solai-interface (this crate)          │
//! │  • PDA derivation          • discriminator table         │
//! │  • instruction codecs      • UserAccount decoder         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`discriminator`]: The one table mapping operation/account names to wire discriminators
//! - [`pda`]: Seeds and program-derived address helpers
//! - [`instruction`]: Instruction data codecs and account-meta builders
//! - [`state`]: `UserAccount` byte layout and decoder
//! - `error`: Decode, interface-drift and program error codes

pub mod discriminator;
mod error;
pub mod instruction;
pub mod pda;
mod program_ids;
pub mod state;

pub use error::*;
pub use instruction::{LogInteractionArgs, SolaiInstruction};
pub use pda::{find_treasury_pda, find_user_account_pda};
pub use program_ids::*;
pub use state::{USER_ACCOUNT_SIZE, UserAccount};
