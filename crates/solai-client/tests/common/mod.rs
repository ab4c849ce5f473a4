//! Shared test helpers for solai-client tests.

#![allow(dead_code)]

pub mod mock_accounts;
pub mod mock_rpc;
pub mod setup;

pub use mock_accounts::*;
pub use mock_rpc::*;
pub use setup::*;
