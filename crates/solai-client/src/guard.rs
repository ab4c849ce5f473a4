//! Pre-flight Guard.
//!
//! ```text
//!                 initialize_user (confirmed on-chain)
//!  Uninitialized ─────────────────────────────────────▶ Initialized
//! ```
//!
//! The transition happens on-chain, outside this crate. The guard only reads
//! which side of it an authority is on and refuses to build the instruction
//! that cannot succeed from there. It is advisory: the program re-checks
//! atomically when the transaction executes.

use solana_sdk::pubkey::Pubkey;

use crate::error::StateConflict;
use crate::resolver::AccountState;

/// Lifecycle state of a UserAccount as seen by the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountStatus {
    /// Nothing exists at the PDA
    Uninitialized,
    /// Some account exists at the PDA, whatever its owner or data
    Initialized,
}

impl AccountStatus {
    /// Status implied by a resolved account.
    pub fn of(state: &AccountState) -> Self {
        if state.exists() {
            Self::Initialized
        } else {
            Self::Uninitialized
        }
    }
}

/// Allow `initialize_user` only when the PDA is empty.
///
/// Any account at the address blocks creation, whether or not it decodes.
/// That includes a lamports-only system account sent to the PDA before
/// initialization, which the program itself would accept.
///
/// # Errors
///
/// [`StateConflict::AlreadyInitialized`] if any account exists at the PDA.
pub fn ensure_can_initialize(
    user_account: Pubkey,
    state: &AccountState,
) -> Result<(), StateConflict> {
    match AccountStatus::of(state) {
        AccountStatus::Uninitialized => Ok(()),
        AccountStatus::Initialized => Err(StateConflict::AlreadyInitialized { user_account }),
    }
}

/// Allow `log_interaction` only when the PDA holds an account.
///
/// # Errors
///
/// [`StateConflict::NotInitialized`] if the PDA is empty.
pub fn ensure_can_log(user_account: Pubkey, state: &AccountState) -> Result<(), StateConflict> {
    match AccountStatus::of(state) {
        AccountStatus::Initialized => Ok(()),
        AccountStatus::Uninitialized => Err(StateConflict::NotInitialized { user_account }),
    }
}
