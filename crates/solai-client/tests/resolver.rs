//! Account State Resolver tests against the mock chain.

mod common;

use common::*;
use solana_sdk::pubkey::Pubkey;
use solai_client::{AccountState, ClientError, TransportError, UserAccountStatus};
use solai_interface::{DecodeError, USER_ACCOUNT_SIZE, find_user_account_pda};

#[tokio::test]
async fn test_unknown_authority_is_not_found() {
    let (_chain, client) = setup();
    let authority = Pubkey::new_unique();

    let state = client.user_account(&authority).await.unwrap();

    assert_eq!(
        state,
        AccountState::NotFound {
            address: find_user_account_pda(&program_id(), &authority).0
        }
    );
}

#[tokio::test]
async fn test_initialized_authority_decodes() {
    let (chain, client) = setup();
    let authority = Pubkey::new_unique();
    let mut record = user_record(&program_id(), &authority, 12, 6_000_000);
    record.last_prompt_hash = [0x5A; 32];
    record.last_log_slot = 310_000_123;
    create_user_account(&chain, &program_id(), &record);

    let state = client.user_account(&authority).await.unwrap();

    assert_eq!(state.user_account(), Some(&record));
    assert_eq!(state.lamports(), USER_ACCOUNT_RENT);
}

#[tokio::test]
async fn test_foreign_record_degrades() {
    let (chain, client) = setup();
    let authority = Pubkey::new_unique();
    let (pda, _) = find_user_account_pda(&program_id(), &authority);
    create_raw_account(&chain, &program_id(), pda, vec![0u8; USER_ACCOUNT_SIZE]);

    let state = client.user_account(&authority).await.unwrap();

    assert!(matches!(
        state,
        AccountState::Undecodable {
            reason: DecodeError::InvalidDiscriminator { .. },
            lamports: USER_ACCOUNT_RENT,
            ..
        }
    ));
}

#[tokio::test]
async fn test_status_reports_existence() {
    let (chain, client) = setup();
    let authority = Pubkey::new_unique();
    let (pda, _) = find_user_account_pda(&program_id(), &authority);

    assert_eq!(
        client.user_account_status(&authority).await.unwrap(),
        UserAccountStatus {
            user_account: pda,
            exists: false,
            lamports: 0
        }
    );

    create_user_account(&chain, &program_id(), &user_record(&program_id(), &authority, 0, 0));
    let status = client.user_account_status(&authority).await.unwrap();
    assert!(status.exists);
    assert_eq!(status.lamports, USER_ACCOUNT_RENT);

    let json = serde_json::to_value(status).unwrap();
    assert_eq!(json["userAccount"], pda.to_string());
    assert_eq!(json["exists"], true);
}

#[tokio::test]
async fn test_outage_is_not_reported_as_missing() {
    let (chain, client) = setup();
    chain.fail_with("connection reset");

    let error = client.user_account(&Pubkey::new_unique()).await.unwrap_err();

    assert!(matches!(
        error,
        ClientError::Transport {
            source: TransportError::Connection(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_treasury_balance() {
    let (chain, client) = setup();
    assert_eq!(client.treasury_balance().await.unwrap(), 0);

    let treasury = fund_treasury(&chain, &program_id(), 7_500_000);
    assert_eq!(treasury, client.treasury_address());
    assert_eq!(client.treasury_balance().await.unwrap(), 7_500_000);
}
