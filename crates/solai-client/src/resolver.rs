//! Account State Resolver.
//!
//! Turns raw account reads into [`AccountState`]. Absence and undecodable
//! data are values, not errors; only transport failures propagate.

use serde::Serialize;
use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;
use solai_interface::{DecodeError, USER_ACCOUNT_SIZE, UserAccount};
use tracing::warn;

use crate::error::{ClientError, ClientResult};
use crate::rpc::ChainReader;

/// What is stored at an address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountState {
    /// No account exists
    NotFound {
        /// Address read
        address: Pubkey,
    },

    /// A well-formed `UserAccount`
    Decoded {
        /// Address read
        address: Pubkey,
        /// Lamport balance
        lamports: u64,
        /// Owning program
        owner: Pubkey,
        /// Decoded record
        account: UserAccount,
    },

    /// An account exists but is not a `UserAccount` this client understands
    Undecodable {
        /// Address read
        address: Pubkey,
        /// Lamport balance
        lamports: u64,
        /// Owning program
        owner: Pubkey,
        /// Why decoding failed
        reason: DecodeError,
    },
}

impl AccountState {
    /// Classify a raw read.
    pub fn from_account(address: Pubkey, account: Option<Account>) -> Self {
        let Some(account) = account else {
            return Self::NotFound { address };
        };

        match UserAccount::decode(&account.data) {
            Ok(decoded) => Self::Decoded {
                address,
                lamports: account.lamports,
                owner: account.owner,
                account: decoded,
            },
            Err(reason) => Self::Undecodable {
                address,
                lamports: account.lamports,
                owner: account.owner,
                reason,
            },
        }
    }

    /// Address this state describes.
    pub fn address(&self) -> Pubkey {
        match self {
            Self::NotFound { address }
            | Self::Decoded { address, .. }
            | Self::Undecodable { address, .. } => *address,
        }
    }

    /// Whether any account exists, decodable or not.
    pub fn exists(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }

    /// Lamport balance, zero when absent.
    pub fn lamports(&self) -> u64 {
        match self {
            Self::NotFound { .. } => 0,
            Self::Decoded { lamports, .. } | Self::Undecodable { lamports, .. } => *lamports,
        }
    }

    /// Decoded record, if there is one.
    pub fn user_account(&self) -> Option<&UserAccount> {
        match self {
            Self::Decoded { account, .. } => Some(account),
            _ => None,
        }
    }
}

/// Existence summary returned by `user_account_status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountStatus {
    /// UserAccount PDA
    #[serde(serialize_with = "crate::serde_display::serialize")]
    pub user_account: Pubkey,
    /// Whether an account exists at the PDA
    pub exists: bool,
    /// Lamport balance, zero when absent
    pub lamports: u64,
}

impl From<&AccountState> for UserAccountStatus {
    fn from(state: &AccountState) -> Self {
        Self {
            user_account: state.address(),
            exists: state.exists(),
            lamports: state.lamports(),
        }
    }
}

/// Read one address and classify it.
pub async fn resolve<R: ChainReader + ?Sized>(
    reader: &R,
    address: &Pubkey,
) -> ClientResult<AccountState> {
    let account = reader
        .get_account(address)
        .await
        .map_err(|e| ClientError::transport("get_account", Some(*address), e))?;
    Ok(AccountState::from_account(*address, account))
}

/// Result of a bulk scan: every decodable record plus a skip count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedAccounts {
    /// Decoded records with their addresses
    pub accounts: Vec<(Pubkey, UserAccount)>,
    /// Records that failed to decode
    pub skipped: usize,
}

/// Fetch every `UserAccount`-sized account owned by `program_id` and decode it.
///
/// Records that fail to decode are logged and counted, never fatal. A failed
/// bulk read is fatal.
pub async fn fetch_user_accounts<R: ChainReader + ?Sized>(
    reader: &R,
    program_id: &Pubkey,
) -> ClientResult<DecodedAccounts> {
    let raw = reader
        .get_program_accounts(program_id, USER_ACCOUNT_SIZE as u64)
        .await
        .map_err(|e| ClientError::transport("get_program_accounts", Some(*program_id), e))?;

    Ok(decode_all(raw))
}

/// Decode a batch of raw accounts, skipping the ones that do not parse.
pub fn decode_all(raw: Vec<(Pubkey, Account)>) -> DecodedAccounts {
    let mut decoded = DecodedAccounts::default();
    for (address, account) in raw {
        match UserAccount::decode(&account.data) {
            Ok(user) => decoded.accounts.push((address, user)),
            Err(error) => {
                warn!(%address, %error, "skipping undecodable program account");
                decoded.skipped += 1;
            }
        }
    }
    decoded
}
