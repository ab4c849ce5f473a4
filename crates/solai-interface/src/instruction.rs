//! Instruction codecs and account-meta builders for the SolAI program.
//!
//! Both instructions use Anchor framing:
//!
//! ```text
//! initialize_user: [discriminator: 8]
//! log_interaction: [discriminator: 8][prompt_hash: 32][response_hash: 32][fee_lamports: u64 LE]
//! ```
//!
//! Account order and flags are part of the ABI and mirror the program's
//! `#[derive(Accounts)]` structs exactly.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;

use crate::InstructionDecodeError;
use crate::discriminator::{self, DISCRIMINATOR_LEN, INITIALIZE_USER, LOG_INTERACTION};
use crate::pda::{find_treasury_pda, find_user_account_pda};
use crate::program_ids::SYSTEM_PROGRAM_ID;

/// Size of `log_interaction` arguments.
pub const LOG_INTERACTION_ARGS_LEN: usize = 32 + 32 + 8;

/// Size of `log_interaction` instruction data.
pub const LOG_INTERACTION_DATA_LEN: usize = DISCRIMINATOR_LEN + LOG_INTERACTION_ARGS_LEN;

// ============================================================================
// Instruction Data
// ============================================================================

/// Arguments of `log_interaction`, in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct LogInteractionArgs {
    /// SHA-256 of the prompt
    pub prompt_hash: [u8; 32],
    /// SHA-256 of the response
    pub response_hash: [u8; 32],
    /// Lamports transferred to the treasury
    pub fee_lamports: u64,
}

impl LogInteractionArgs {
    /// Serialize to the fixed 72-byte wire form.
    pub fn to_bytes(&self) -> [u8; LOG_INTERACTION_ARGS_LEN] {
        let mut bytes = [0u8; LOG_INTERACTION_ARGS_LEN];
        bytes[0..32].copy_from_slice(&self.prompt_hash);
        bytes[32..64].copy_from_slice(&self.response_hash);
        bytes[64..72].copy_from_slice(&self.fee_lamports.to_le_bytes());
        bytes
    }
}

/// Instructions the SolAI program understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolaiInstruction {
    /// Create the caller's UserAccount PDA.
    ///
    /// **Accounts (in order):**
    /// 0. `authority`: signer, writable (pays rent)
    /// 1. `user_account`: writable, PDA `["user", authority]`
    /// 2. `system_program`
    InitializeUser,

    /// Record an interaction and pay the logging fee.
    ///
    /// **Accounts (in order):**
    /// 0. `authority`: signer, writable (pays the fee)
    /// 1. `user_account`: writable, PDA `["user", authority]`
    /// 2. `treasury`: writable, PDA `["treasury"]`
    /// 3. `system_program`
    LogInteraction(LogInteractionArgs),
}

impl SolaiInstruction {
    /// IDL name of the instruction.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InitializeUser => "initialize_user",
            Self::LogInteraction(_) => "log_interaction",
        }
    }

    /// Wire discriminator, taken from the discriminator table.
    pub const fn discriminator(&self) -> [u8; DISCRIMINATOR_LEN] {
        match self {
            Self::InitializeUser => INITIALIZE_USER,
            Self::LogInteraction(_) => LOG_INTERACTION,
        }
    }

    /// Serialize to instruction data.
    pub fn pack(&self) -> Vec<u8> {
        match self {
            Self::InitializeUser => self.discriminator().to_vec(),
            Self::LogInteraction(args) => {
                let mut data = Vec::with_capacity(LOG_INTERACTION_DATA_LEN);
                data.extend_from_slice(&self.discriminator());
                data.extend_from_slice(&args.to_bytes());
                data
            }
        }
    }

    /// Parse instruction data.
    pub fn unpack(data: &[u8]) -> Result<Self, InstructionDecodeError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(InstructionDecodeError::TooShort { len: data.len() });
        }
        let (head, rest) = data.split_at(DISCRIMINATOR_LEN);
        let mut bytes = [0u8; DISCRIMINATOR_LEN];
        bytes.copy_from_slice(head);

        let entry = discriminator::instruction_by_bytes(&bytes)
            .ok_or(InstructionDecodeError::UnknownDiscriminator(bytes))?;

        match entry.bytes {
            INITIALIZE_USER if rest.is_empty() => Ok(Self::InitializeUser),
            INITIALIZE_USER => Err(InstructionDecodeError::InvalidArgs {
                instruction: entry.name,
                reason: format!("expected no arguments, found {} bytes", rest.len()),
            }),
            LOG_INTERACTION => LogInteractionArgs::try_from_slice(rest)
                .map(Self::LogInteraction)
                .map_err(|e| InstructionDecodeError::InvalidArgs {
                    instruction: entry.name,
                    reason: e.to_string(),
                }),
            _ => Err(InstructionDecodeError::UnknownDiscriminator(bytes)),
        }
    }
}

// ============================================================================
// Account Layout Constants
// ============================================================================

/// Account indices for `initialize_user`.
pub mod initialize_user_accounts {
    /// Authority (signer, writable)
    pub const AUTHORITY: usize = 0;
    /// UserAccount PDA (writable)
    pub const USER_ACCOUNT: usize = 1;
    /// System program
    pub const SYSTEM_PROGRAM: usize = 2;
    /// Total number of accounts
    pub const COUNT: usize = 3;
}

/// Account indices for `log_interaction`.
pub mod log_interaction_accounts {
    /// Authority (signer, writable)
    pub const AUTHORITY: usize = 0;
    /// UserAccount PDA (writable)
    pub const USER_ACCOUNT: usize = 1;
    /// Treasury PDA (writable)
    pub const TREASURY: usize = 2;
    /// System program
    pub const SYSTEM_PROGRAM: usize = 3;
    /// Total number of accounts
    pub const COUNT: usize = 4;
}

// ============================================================================
// Instruction Builders
// ============================================================================

/// Build `initialize_user` for `authority`.
pub fn initialize_user(program_id: &Pubkey, authority: &Pubkey) -> Instruction {
    let (user_account, _) = find_user_account_pda(program_id, authority);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(user_account, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: SolaiInstruction::InitializeUser.pack(),
    }
}

/// Build `log_interaction` for `authority`.
pub fn log_interaction(
    program_id: &Pubkey,
    authority: &Pubkey,
    args: LogInteractionArgs,
) -> Instruction {
    let (user_account, _) = find_user_account_pda(program_id, authority);
    let (treasury, _) = find_treasury_pda(program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(user_account, false),
            AccountMeta::new(treasury, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: SolaiInstruction::LogInteraction(args).pack(),
    }
}
