//! Chain read abstraction.
//!
//! Every component reads the cluster through [`ChainReader`], so tests can
//! substitute an in-memory chain. [`RpcReader`] is the JSON-RPC
//! implementation used in production.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::RpcFilterType;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::error::TransportError;

/// Read-only view of the cluster.
///
/// Implementations must report a missing account as `Ok(None)` and must not
/// turn transport failures into `None`.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Fetch one account, `None` if nothing exists at `address`.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError>;

    /// Lamport balance of `address` (zero when it does not exist).
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, TransportError>;

    /// Recent blockhash to anchor a new transaction.
    async fn get_latest_blockhash(&self) -> Result<Hash, TransportError>;

    /// All accounts owned by `program_id` whose data is exactly `data_size` bytes.
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        data_size: u64,
    ) -> Result<Vec<(Pubkey, Account)>, TransportError>;
}

/// HTTP timeout as a multiple of the per-call bound.
const HTTP_TIMEOUT_FACTOR: u32 = 2;

/// [`ChainReader`] over the Solana JSON-RPC API.
///
/// Each call is bounded by a `tokio` timer around the whole request. The HTTP
/// client gets twice that bound as a backstop, so the timer always fires
/// first and a stalled connection surfaces as [`TransportError::Timeout`].
pub struct RpcReader {
    client: RpcClient,
    commitment: CommitmentConfig,
    timeout: Duration,
}

impl RpcReader {
    /// Connect to `url` with the given commitment and per-call timeout.
    pub fn new(url: impl Into<String>, commitment: CommitmentConfig, timeout: Duration) -> Self {
        let client = RpcClient::new_with_timeout_and_commitment(
            url.into(),
            timeout.saturating_mul(HTTP_TIMEOUT_FACTOR),
            commitment,
        );
        Self {
            client,
            commitment,
            timeout,
        }
    }

    /// Endpoint URL.
    pub fn url(&self) -> String {
        self.client.url()
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, solana_client::client_error::ClientError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|e| TransportError::Rpc(Box::new(e))),
            Err(_) => Err(TransportError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl ChainReader for RpcReader {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError> {
        debug!(%address, "getAccountInfo");
        let response = self
            .bounded(
                self.client
                    .get_account_with_commitment(address, self.commitment),
            )
            .await?;
        Ok(response.value)
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64, TransportError> {
        debug!(%address, "getBalance");
        let response = self
            .bounded(
                self.client
                    .get_balance_with_commitment(address, self.commitment),
            )
            .await?;
        Ok(response.value)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, TransportError> {
        debug!("getLatestBlockhash");
        self.bounded(self.client.get_latest_blockhash()).await
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        data_size: u64,
    ) -> Result<Vec<(Pubkey, Account)>, TransportError> {
        debug!(%program_id, data_size, "getProgramAccounts");
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::DataSize(data_size)]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..Default::default()
            },
            with_context: Some(false),
            ..Default::default()
        };
        self.bounded(
            self.client
                .get_program_accounts_with_config(program_id, config),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use tokio::net::TcpListener;

    use super::*;
    use crate::SolaiClient;
    use crate::config::ProgramConfig;
    use crate::error::ClientError;

    const CALL_TIMEOUT: Duration = Duration::from_millis(200);

    /// Accept connections and hold them open without ever answering.
    async fn silent_endpoint() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });
        addr
    }

    fn reader_for(addr: SocketAddr) -> RpcReader {
        RpcReader::new(
            format!("http://{addr}"),
            CommitmentConfig::confirmed(),
            CALL_TIMEOUT,
        )
    }

    #[tokio::test]
    async fn test_stalled_endpoint_times_out() {
        let reader = reader_for(silent_endpoint().await);

        let result = reader.get_account(&Pubkey::new_unique()).await;
        assert!(
            matches!(result, Err(TransportError::Timeout(bound)) if bound == CALL_TIMEOUT),
            "unexpected result: {result:?}"
        );

        let result = reader.get_latest_blockhash().await;
        assert!(matches!(result, Err(TransportError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_stalled_endpoint_is_retryable_not_missing() {
        let reader = reader_for(silent_endpoint().await);
        let client = SolaiClient::new(Arc::new(reader), ProgramConfig::default()).unwrap();
        let authority = Pubkey::new_unique();

        let error = client.user_account(&authority).await.unwrap_err();
        assert!(error.is_retryable());
        assert!(matches!(
            error,
            ClientError::Transport {
                operation: "get_account",
                source: TransportError::Timeout(_),
                ..
            }
        ));
    }
}
