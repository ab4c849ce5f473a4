//! Program Statistics Aggregator.

use serde::Serialize;
use solai_interface::UserAccount;

/// Aggregate view of every UserAccount plus the treasury balance.
///
/// Sums are widened to `u128` so that no number of `u64` counters can
/// overflow them. They serialize as decimal strings, since JSON numbers
/// cannot carry values past `u64::MAX`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramStats {
    /// Decoded UserAccounts
    pub total_users: u64,
    /// Sum of `total_queries`
    #[serde(serialize_with = "crate::serde_display::serialize")]
    pub total_queries: u128,
    /// Sum of `total_fees_paid`, in lamports
    #[serde(serialize_with = "crate::serde_display::serialize")]
    pub total_fees_paid: u128,
    /// Treasury PDA balance
    pub treasury_lamports: u64,
    /// Accounts of the right size that failed to decode
    pub skipped: u64,
}

impl ProgramStats {
    /// Fold decoded records into a snapshot.
    ///
    /// Order does not matter: the fold is a plain sum.
    pub fn fold<'a>(
        accounts: impl IntoIterator<Item = &'a UserAccount>,
        skipped: usize,
        treasury_lamports: u64,
    ) -> Self {
        let mut stats = accounts
            .into_iter()
            .fold(Self::default(), |mut stats, account| {
                stats.total_users += 1;
                stats.total_queries += u128::from(account.total_queries);
                stats.total_fees_paid += u128::from(account.total_fees_paid);
                stats
            });
        stats.skipped = skipped as u64;
        stats.treasury_lamports = treasury_lamports;
        stats
    }

    /// Fees paid, in SOL.
    pub fn total_fees_sol(&self) -> f64 {
        self.total_fees_paid as f64 / solana_sdk::native_token::LAMPORTS_PER_SOL as f64
    }
}
