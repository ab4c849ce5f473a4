//! SolAI Client
//!
//! On-chain interaction layer for the SolAI program: reads and decodes
//! `UserAccount`s, guards and builds unsigned transactions, and aggregates
//! program-wide statistics. It never signs and never submits.
//!
//! # Architecture
//!
//! ```text
//!   authority, hashes
//!         │
//!         ▼
//! ┌───────────────┐   ┌───────────────┐   ┌────────────────┐   ┌───────────────┐
//! │ Pre-flight    │──▶│ Account State │──▶│ Instruction    │──▶│ Transaction   │──▶ base64
//! │ Guard         │   │ Resolver      │   │ Encoder        │   │ Assembler     │
//! └───────────────┘   └───────┬───────┘   └────────────────┘   └───────┬───────┘
//!                             │ get_account                            │ get_latest_blockhash
//!                             ▼                                        ▼
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │ ChainReader (RpcReader in production, fake in tests) │
//!                     └──────────────────────────────────────────────────────┘
//!                             ▲
//!                             │ get_program_accounts + get_balance
//!                     ┌───────┴───────┐
//!                     │ Statistics    │
//!                     │ Aggregator    │
//!                     └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`rpc`]: `ChainReader` trait and the JSON-RPC reader
//! - [`resolver`]: `AccountState` and single/bulk account decoding
//! - [`guard`]: Uninitialized/Initialized checks before building
//! - [`assembler`]: Unsigned transaction envelopes and their inspection
//! - [`stats`]: Program-wide aggregation
//! - [`hashes`]: Address and hash input parsing
//! - [`idl`]: Interface cross-check against the published IDL
//! - [`config`]: TOML configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use solai_client::{Config, InteractionHashes, RpcReader, SolaiClient, parse_address};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::discover(None)?;
//! let reader = RpcReader::new(
//!     config.solana.rpc_url.clone(),
//!     config.commitment()?,
//!     config.rpc_timeout()?,
//! );
//! let client = SolaiClient::new(Arc::new(reader), config.program_config()?)?;
//!
//! let authority = parse_address("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin")?;
//! let hashes = InteractionHashes::from_texts("What is a PDA?", "A program derived address.");
//! let bundle = client.build_log_interaction(&authority, &hashes).await?;
//! println!("{}", bundle.serialized);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
mod client;
pub mod config;
mod error;
pub mod guard;
pub mod hashes;
pub mod idl;
pub mod resolver;
pub mod rpc;
mod serde_display;
pub mod stats;

pub use assembler::{
    InspectError, InspectedTransaction, TransactionBundle, UnsignedTransaction, inspect_transaction,
};
pub use client::SolaiClient;
pub use config::{Config, ConfigError, ProgramConfig};
pub use error::*;
pub use guard::AccountStatus;
pub use hashes::{InteractionHashes, parse_address};
pub use resolver::{AccountState, UserAccountStatus};
pub use rpc::{ChainReader, RpcReader};
pub use stats::ProgramStats;
