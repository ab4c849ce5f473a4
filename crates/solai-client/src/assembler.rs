//! Transaction Assembler.
//!
//! Wraps one instruction in a legacy transaction paid for by the authority,
//! anchors it to a recent blockhash and serializes it without signatures.
//! The signature slots are present but zeroed; the wallet fills them.
//!
//! [`inspect_transaction`] reverses the process for a serialized envelope.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use solai_interface::SolaiInstruction;
use solai_interface::{InstructionDecodeError, LogInteractionArgs};

use crate::error::ClientResult;
use crate::serde_display;

/// An unsigned transaction and its base64 wire form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedTransaction {
    /// Transaction with default (empty) signatures
    pub transaction: Transaction,
    /// Base64 of the bincode-serialized transaction
    pub serialized: String,
}

/// Build and serialize an unsigned transaction for `instruction`.
pub fn assemble_unsigned(
    instruction: &Instruction,
    fee_payer: &Pubkey,
    recent_blockhash: Hash,
) -> ClientResult<UnsignedTransaction> {
    let message = Message::new_with_blockhash(
        std::slice::from_ref(instruction),
        Some(fee_payer),
        &recent_blockhash,
    );
    let transaction = Transaction::new_unsigned(message);
    let bytes = bincode::serialize(&transaction)?;

    Ok(UnsignedTransaction {
        transaction,
        serialized: STANDARD.encode(bytes),
    })
}

/// What a build operation hands back to its caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBundle {
    /// Base64 unsigned transaction
    pub serialized: String,
    /// Blockhash the transaction is anchored to
    #[serde(serialize_with = "serde_display::serialize")]
    pub recent_blockhash: Hash,
    /// UserAccount PDA of the authority
    #[serde(serialize_with = "serde_display::serialize")]
    pub user_account: Pubkey,
    /// Treasury PDA
    #[serde(serialize_with = "serde_display::serialize")]
    pub treasury: Pubkey,
    /// Fee charged, for `log_interaction` only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_lamports: Option<u64>,
}

// ============================================================================
// Inspection
// ============================================================================

/// Failure to read back a serialized envelope.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// Not base64
    #[error("transaction is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Not a bincode legacy transaction
    #[error("transaction bytes do not deserialize: {0}")]
    Bincode(#[from] bincode::Error),

    /// The transaction has no instruction for `program_id`
    #[error("transaction has no instruction for program {program_id}")]
    NoProgramInstruction {
        /// Program looked for
        program_id: Pubkey,
    },

    /// An account index points outside the key list
    #[error("instruction references account index {index} of {len}")]
    AccountIndex {
        /// Offending index
        index: u8,
        /// Number of account keys
        len: usize,
    },

    /// Instruction data did not decode
    #[error(transparent)]
    Instruction(#[from] InstructionDecodeError),
}

/// One account reference of the inspected instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectedAccount {
    /// Account address
    #[serde(serialize_with = "serde_display::serialize")]
    pub pubkey: Pubkey,
    /// Required signer
    pub is_signer: bool,
    /// Writable
    pub is_writable: bool,
}

/// A decoded SolAI instruction, for JSON output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum InspectedInstruction {
    /// `initialize_user`
    InitializeUser,
    /// `log_interaction`
    #[serde(rename_all = "camelCase")]
    LogInteraction {
        /// Prompt hash, hex
        prompt_hash: String,
        /// Response hash, hex
        response_hash: String,
        /// Fee in lamports
        fee_lamports: u64,
    },
}

impl From<&SolaiInstruction> for InspectedInstruction {
    fn from(instruction: &SolaiInstruction) -> Self {
        match instruction {
            SolaiInstruction::InitializeUser => Self::InitializeUser,
            SolaiInstruction::LogInteraction(LogInteractionArgs {
                prompt_hash,
                response_hash,
                fee_lamports,
            }) => Self::LogInteraction {
                prompt_hash: hex::encode(prompt_hash),
                response_hash: hex::encode(response_hash),
                fee_lamports: *fee_lamports,
            },
        }
    }
}

/// Contents of a serialized SolAI transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectedTransaction {
    /// First account key, pays fees
    #[serde(serialize_with = "serde_display::serialize")]
    pub fee_payer: Pubkey,
    /// Anchoring blockhash
    #[serde(serialize_with = "serde_display::serialize")]
    pub recent_blockhash: Hash,
    /// Program the instruction targets
    #[serde(serialize_with = "serde_display::serialize")]
    pub program_id: Pubkey,
    /// Instruction accounts, in order
    pub accounts: Vec<InspectedAccount>,
    /// Whether every signature slot is still empty
    pub unsigned: bool,
    /// Decoded instruction
    #[serde(skip)]
    pub decoded: SolaiInstruction,
    /// Decoded instruction, for display
    pub instruction: InspectedInstruction,
}

/// Decode a base64 envelope and its SolAI instruction.
pub fn inspect_transaction(
    serialized: &str,
    program_id: &Pubkey,
) -> Result<InspectedTransaction, InspectError> {
    let bytes = STANDARD.decode(serialized.trim())?;
    let transaction: Transaction = bincode::deserialize(&bytes)?;
    let message = &transaction.message;
    let keys = &message.account_keys;

    let compiled = message
        .instructions
        .iter()
        .find(|ix| keys.get(usize::from(ix.program_id_index)) == Some(program_id))
        .ok_or(InspectError::NoProgramInstruction {
            program_id: *program_id,
        })?;

    let accounts = compiled
        .accounts
        .iter()
        .map(|&index| {
            let i = usize::from(index);
            let pubkey = *keys.get(i).ok_or(InspectError::AccountIndex {
                index,
                len: keys.len(),
            })?;
            Ok(InspectedAccount {
                pubkey,
                is_signer: message.is_signer(i),
                is_writable: message.is_maybe_writable(i, None),
            })
        })
        .collect::<Result<Vec<_>, InspectError>>()?;

    let decoded = SolaiInstruction::unpack(&compiled.data)?;

    Ok(InspectedTransaction {
        fee_payer: keys.first().copied().unwrap_or_default(),
        recent_blockhash: message.recent_blockhash,
        program_id: *program_id,
        accounts,
        unsigned: transaction
            .signatures
            .iter()
            .all(|signature| *signature == Default::default()),
        instruction: InspectedInstruction::from(&decoded),
        decoded,
    })
}
