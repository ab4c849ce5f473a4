//! Client construction helpers for solai-client tests.

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use solai_client::{InteractionHashes, ProgramConfig, SolaiClient};

use super::mock_rpc::MockChain;

/// Default logging fee used by the tests.
pub const TEST_FEE_LAMPORTS: u64 = 500_000;

/// A client over a fresh mock chain, with the deployed program ID.
pub fn setup() -> (Arc<MockChain>, SolaiClient<MockChain>) {
    setup_with(ProgramConfig {
        program_id: solai_interface::PROGRAM_ID,
        fee_lamports: TEST_FEE_LAMPORTS,
    })
}

/// A client over a fresh mock chain with custom settings.
pub fn setup_with(config: ProgramConfig) -> (Arc<MockChain>, SolaiClient<MockChain>) {
    let chain = Arc::new(MockChain::new());
    let client = SolaiClient::new(Arc::clone(&chain), config).unwrap();
    (chain, client)
}

/// Program ID the default client targets.
pub fn program_id() -> Pubkey {
    solai_interface::PROGRAM_ID
}

/// Hashes with recognizable bytes.
pub fn sample_hashes() -> InteractionHashes {
    InteractionHashes::from_hex(&"ab".repeat(32), &"cd".repeat(32)).unwrap()
}
