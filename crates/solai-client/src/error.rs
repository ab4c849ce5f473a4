//! Client error taxonomy.
//!
//! | Kind | Raised | Retry |
//! |---|---|---|
//! | [`ValidationError`] | before any RPC call | never |
//! | [`StateConflict`] | by the pre-flight guard | never, caller must act first |
//! | [`TransportError`] | by the RPC layer | at the caller's discretion |
//! | [`InterfaceError`] | at construction | never, the build is wrong |
//!
//! Undecodable accounts are not errors here; see [`crate::AccountState`].

use std::time::Duration;

use solana_sdk::pubkey::Pubkey;
use solai_interface::InterfaceError;

use crate::config::ConfigError;

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Malformed caller input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Not a base58 public key
    #[error("invalid Solana address {input:?}")]
    InvalidAddress {
        /// Rejected input
        input: String,
    },

    /// Not a 32-byte hex hash
    #[error("invalid {field}: {reason}")]
    InvalidHash {
        /// Argument name
        field: &'static str,
        /// What was wrong
        reason: String,
    },

    /// The program rejects zero-lamport logs
    #[error("logging fee must be greater than zero")]
    ZeroFee,
}

/// On-chain state that makes the requested operation pointless.
///
/// Advisory only: the state may change between this check and on-chain
/// execution, and the program re-validates atomically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateConflict {
    /// `initialize_user` requested but the UserAccount already holds data
    #[error("user account {user_account} already initialized")]
    AlreadyInitialized {
        /// UserAccount PDA
        user_account: Pubkey,
    },

    /// `log_interaction` requested but no UserAccount exists
    #[error("user account {user_account} not initialized")]
    NotInitialized {
        /// UserAccount PDA
        user_account: Pubkey,
    },
}

impl StateConflict {
    /// Sentinel for an existing account.
    pub const ALREADY_INITIALIZED: &'static str = "SOLAI_USER_ALREADY_INITIALIZED";
    /// Sentinel for a missing account.
    pub const NOT_INITIALIZED: &'static str = "SOLAI_USER_ACCOUNT_NOT_INITIALIZED";

    /// Stable string callers can match on.
    pub const fn sentinel(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized { .. } => Self::ALREADY_INITIALIZED,
            Self::NotInitialized { .. } => Self::NOT_INITIALIZED,
        }
    }
}

/// Infrastructure failure talking to the cluster.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// No response within the configured bound
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The RPC client reported an error
    #[error(transparent)]
    Rpc(#[from] Box<solana_client::client_error::ClientError>),

    /// Connection-level failure from a non-RPC reader
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Any failure of a client operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Rejected input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Known on-chain state conflict
    #[error("{}: {0}", .0.sentinel())]
    StateConflict(#[from] StateConflict),

    /// RPC failure, with the operation and address involved
    #[error("{operation} failed{}: {source}", .address.map(|a| format!(" for {a}")).unwrap_or_default())]
    Transport {
        /// Operation that issued the RPC call
        operation: &'static str,
        /// Address read, when there is one
        address: Option<Pubkey>,
        /// Underlying failure
        #[source]
        source: TransportError,
    },

    /// Constant table disagrees with the program interface
    #[error(transparent)]
    Interface(#[from] InterfaceError),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Transaction could not be serialized
    #[error("failed to serialize transaction: {0}")]
    Serialization(#[from] bincode::Error),
}

impl ClientError {
    /// Wrap a transport failure with context.
    pub fn transport(
        operation: &'static str,
        address: Option<Pubkey>,
        source: TransportError,
    ) -> Self {
        Self::Transport {
            operation,
            address,
            source,
        }
    }

    /// Whether retrying the same call might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Sentinel string for state conflicts.
    pub fn sentinel(&self) -> Option<&'static str> {
        match self {
            Self::StateConflict(conflict) => Some(conflict.sentinel()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_conflict_display_leads_with_sentinel() {
        let user_account = Pubkey::new_unique();
        let error = ClientError::from(StateConflict::NotInitialized { user_account });

        assert!(error.to_string().starts_with("SOLAI_USER_ACCOUNT_NOT_INITIALIZED"));
        assert_eq!(error.sentinel(), Some(StateConflict::NOT_INITIALIZED));
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_transport_errors_are_retryable_and_carry_context() {
        let address = Pubkey::new_unique();
        let error = ClientError::transport(
            "get_account",
            Some(address),
            TransportError::Timeout(Duration::from_secs(3)),
        );

        assert!(error.is_retryable());
        assert_eq!(error.sentinel(), None);
        assert_eq!(
            error.to_string(),
            format!("get_account failed for {address}: timed out after 3s")
        );
    }
}
