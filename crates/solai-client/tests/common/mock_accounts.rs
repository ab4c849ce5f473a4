//! Mock account creation helpers for solai-client tests.

use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;
use solai_interface::{UserAccount, find_treasury_pda, find_user_account_pda};

use super::mock_rpc::MockChain;

/// Rent-exempt minimum for a 131-byte account.
pub const USER_ACCOUNT_RENT: u64 = 1_802_880;

/// A fresh UserAccount for `authority` with the given counters.
pub fn user_record(
    program_id: &Pubkey,
    authority: &Pubkey,
    total_queries: u64,
    total_fees_paid: u64,
) -> UserAccount {
    let (_, bump) = find_user_account_pda(program_id, authority);
    UserAccount {
        authority: *authority,
        total_queries,
        total_fees_paid,
        last_prompt_hash: [0; 32],
        last_response_hash: [0; 32],
        last_log_slot: 0,
        bump,
    }
}

/// Store `record` at its authority's PDA, owned by `program_id`.
pub fn create_user_account(chain: &MockChain, program_id: &Pubkey, record: &UserAccount) -> Pubkey {
    let (address, _) = find_user_account_pda(program_id, &record.authority);
    chain.set_account(
        address,
        Account {
            lamports: USER_ACCOUNT_RENT,
            data: record.to_account_data(),
            owner: *program_id,
            executable: false,
            rent_epoch: 0,
        },
    );
    address
}

/// Store arbitrary bytes at `address`, owned by `program_id`.
pub fn create_raw_account(chain: &MockChain, program_id: &Pubkey, address: Pubkey, data: Vec<u8>) {
    chain.set_account(
        address,
        Account {
            lamports: USER_ACCOUNT_RENT,
            data,
            owner: *program_id,
            executable: false,
            rent_epoch: 0,
        },
    );
}

/// Give the treasury PDA a balance. It is a plain system account.
pub fn fund_treasury(chain: &MockChain, program_id: &Pubkey, lamports: u64) -> Pubkey {
    let (treasury, _) = find_treasury_pda(program_id);
    chain.set_account(
        treasury,
        Account {
            lamports,
            data: vec![],
            owner: solana_sdk::system_program::ID,
            executable: false,
            rent_epoch: 0,
        },
    );
    treasury
}
