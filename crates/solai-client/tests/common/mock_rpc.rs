//! In-memory chain standing in for the JSON-RPC endpoint.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solai_client::{ChainReader, TransportError};

/// Fake cluster: an account map, a fixed blockhash and an optional outage.
pub struct MockChain {
    accounts: Mutex<HashMap<Pubkey, Account>>,
    blockhash: Hash,
    failure: Mutex<Option<String>>,
    blockhash_failure: Mutex<Option<String>>,
    blockhash_requests: AtomicUsize,
    account_requests: AtomicUsize,
}

impl MockChain {
    /// Empty chain.
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            blockhash: Hash::new_unique(),
            failure: Mutex::new(None),
            blockhash_failure: Mutex::new(None),
            blockhash_requests: AtomicUsize::new(0),
            account_requests: AtomicUsize::new(0),
        }
    }

    /// Store `account` at `address`, replacing what was there.
    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.accounts.lock().unwrap().insert(address, account);
    }

    /// Remove the account at `address`.
    pub fn remove_account(&self, address: &Pubkey) {
        self.accounts.lock().unwrap().remove(address);
    }

    /// Make every subsequent call fail with a connection error.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make only blockhash fetches fail.
    pub fn fail_blockhash_with(&self, message: &str) {
        *self.blockhash_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Clear injected failures.
    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
        *self.blockhash_failure.lock().unwrap() = None;
    }

    /// Blockhash every `get_latest_blockhash` returns.
    pub fn blockhash(&self) -> Hash {
        self.blockhash
    }

    /// Number of blockhash fetches so far.
    pub fn blockhash_requests(&self) -> usize {
        self.blockhash_requests.load(Ordering::SeqCst)
    }

    /// Number of single-account reads so far.
    pub fn account_requests(&self) -> usize {
        self.account_requests.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), TransportError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(TransportError::Connection(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError> {
        self.account_requests.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64, TransportError> {
        self.check()?;
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(address)
            .map_or(0, |account| account.lamports))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, TransportError> {
        self.blockhash_requests.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if let Some(message) = self.blockhash_failure.lock().unwrap().as_ref() {
            return Err(TransportError::Connection(message.clone()));
        }
        Ok(self.blockhash)
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        data_size: u64,
    ) -> Result<Vec<(Pubkey, Account)>, TransportError> {
        self.check()?;
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, account)| {
                account.owner == *program_id && account.data.len() as u64 == data_size
            })
            .map(|(address, account)| (*address, account.clone()))
            .collect())
    }
}
