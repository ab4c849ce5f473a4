//! The SolAI client: every read and build operation behind one handle.

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use solai_interface::{
    LogInteractionArgs, discriminator, find_treasury_pda, find_user_account_pda, instruction,
};
use tracing::{debug, info};

use crate::assembler::{TransactionBundle, assemble_unsigned};
use crate::config::ProgramConfig;
use crate::error::{ClientError, ClientResult, ValidationError};
use crate::guard;
use crate::hashes::{InteractionHashes, short_hex};
use crate::resolver::{self, AccountState, UserAccountStatus};
use crate::rpc::ChainReader;
use crate::stats::ProgramStats;

/// Client for the SolAI program.
///
/// Holds a shared chain reader and the program settings. Cloning is cheap
/// and clones share the reader. Nothing is cached between calls.
pub struct SolaiClient<R: ChainReader> {
    reader: Arc<R>,
    config: ProgramConfig,
}

impl<R: ChainReader> Clone for SolaiClient<R> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
            config: self.config,
        }
    }
}

impl<R: ChainReader> SolaiClient<R> {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Fails if the discriminator table disagrees with the Anchor hashing
    /// rule, or if the configured fee is zero.
    pub fn new(reader: Arc<R>, config: ProgramConfig) -> ClientResult<Self> {
        discriminator::verify()?;
        if config.fee_lamports == 0 {
            return Err(ValidationError::ZeroFee.into());
        }

        debug!(program_id = %config.program_id, fee_lamports = config.fee_lamports, "client ready");
        Ok(Self { reader, config })
    }

    /// Program settings in use.
    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// The shared reader.
    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }

    /// UserAccount PDA for `authority`.
    pub fn user_account_address(&self, authority: &Pubkey) -> Pubkey {
        find_user_account_pda(&self.config.program_id, authority).0
    }

    /// Treasury PDA.
    pub fn treasury_address(&self) -> Pubkey {
        find_treasury_pda(&self.config.program_id).0
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Read and decode the UserAccount of `authority`.
    ///
    /// # Errors
    ///
    /// Only transport failures. Absence and undecodable data are reported
    /// through [`AccountState`].
    pub async fn user_account(&self, authority: &Pubkey) -> ClientResult<AccountState> {
        let address = self.user_account_address(authority);
        resolver::resolve(self.reader.as_ref(), &address).await
    }

    /// Existence and balance of the UserAccount of `authority`.
    ///
    /// # Errors
    ///
    /// Only transport failures.
    pub async fn user_account_status(&self, authority: &Pubkey) -> ClientResult<UserAccountStatus> {
        let state = self.user_account(authority).await?;
        Ok(UserAccountStatus::from(&state))
    }

    /// Lamports held by the treasury PDA.
    ///
    /// # Errors
    ///
    /// Only transport failures.
    pub async fn treasury_balance(&self) -> ClientResult<u64> {
        let treasury = self.treasury_address();
        self.reader
            .get_balance(&treasury)
            .await
            .map_err(|e| ClientError::transport("get_balance", Some(treasury), e))
    }

    /// Aggregate every UserAccount and the treasury balance.
    ///
    /// The bulk scan and the balance read run concurrently. Individual
    /// records that fail to decode are skipped.
    ///
    /// # Errors
    ///
    /// Fails if either read fails.
    pub async fn program_stats(&self) -> ClientResult<ProgramStats> {
        let (decoded, treasury_lamports) = tokio::try_join!(
            resolver::fetch_user_accounts(self.reader.as_ref(), &self.config.program_id),
            self.treasury_balance(),
        )?;

        let stats = ProgramStats::fold(
            decoded.accounts.iter().map(|(_, account)| account),
            decoded.skipped,
            treasury_lamports,
        );
        info!(
            total_users = stats.total_users,
            total_queries = %stats.total_queries,
            total_fees_paid = %stats.total_fees_paid,
            treasury_lamports = stats.treasury_lamports,
            skipped = stats.skipped,
            "program stats"
        );
        Ok(stats)
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Build an unsigned `initialize_user` transaction for `authority`.
    ///
    /// # Errors
    ///
    /// [`ClientError::StateConflict`] if an account already exists at the
    /// PDA; no blockhash is fetched in that case. Transport failures
    /// otherwise.
    pub async fn build_initialize_user(
        &self,
        authority: &Pubkey,
    ) -> ClientResult<TransactionBundle> {
        let user_account = self.user_account_address(authority);
        let state = resolver::resolve(self.reader.as_ref(), &user_account).await?;
        guard::ensure_can_initialize(user_account, &state)?;

        let ix = instruction::initialize_user(&self.config.program_id, authority);
        let bundle = self.finish(&ix, authority, user_account, None).await?;

        info!(%authority, %user_account, "built initialize_user");
        Ok(bundle)
    }

    /// Build an unsigned `log_interaction` transaction for `authority`.
    ///
    /// Charges the configured fee.
    ///
    /// # Errors
    ///
    /// [`ClientError::StateConflict`] if no account exists at the PDA.
    /// Transport failures otherwise.
    pub async fn build_log_interaction(
        &self,
        authority: &Pubkey,
        hashes: &InteractionHashes,
    ) -> ClientResult<TransactionBundle> {
        self.build_log_interaction_with_fee(authority, hashes, self.config.fee_lamports)
            .await
    }

    /// [`Self::build_log_interaction`] with an explicit fee.
    ///
    /// # Errors
    ///
    /// [`ValidationError::ZeroFee`] for a zero fee, before any read.
    /// Otherwise as [`Self::build_log_interaction`].
    pub async fn build_log_interaction_with_fee(
        &self,
        authority: &Pubkey,
        hashes: &InteractionHashes,
        fee_lamports: u64,
    ) -> ClientResult<TransactionBundle> {
        if fee_lamports == 0 {
            return Err(ValidationError::ZeroFee.into());
        }

        let user_account = self.user_account_address(authority);
        let state = resolver::resolve(self.reader.as_ref(), &user_account).await?;
        guard::ensure_can_log(user_account, &state)?;

        let args = LogInteractionArgs {
            prompt_hash: hashes.prompt,
            response_hash: hashes.response,
            fee_lamports,
        };
        let ix = instruction::log_interaction(&self.config.program_id, authority, args);
        let bundle = self
            .finish(&ix, authority, user_account, Some(fee_lamports))
            .await?;

        info!(
            %authority,
            %user_account,
            prompt_hash = %short_hex(&hashes.prompt),
            response_hash = %short_hex(&hashes.response),
            fee_lamports,
            "built log_interaction"
        );
        Ok(bundle)
    }

    async fn finish(
        &self,
        ix: &solana_sdk::instruction::Instruction,
        authority: &Pubkey,
        user_account: Pubkey,
        fee_lamports: Option<u64>,
    ) -> ClientResult<TransactionBundle> {
        let recent_blockhash = self
            .reader
            .get_latest_blockhash()
            .await
            .map_err(|e| ClientError::transport("get_latest_blockhash", None, e))?;

        let unsigned = assemble_unsigned(ix, authority, recent_blockhash)?;
        Ok(TransactionBundle {
            serialized: unsigned.serialized,
            recent_blockhash,
            user_account,
            treasury: self.treasury_address(),
            fee_lamports,
        })
    }
}
