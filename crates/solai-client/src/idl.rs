//! Cross-check of the compiled-in interface against a published Anchor IDL.
//!
//! The constants in `solai_interface` stay authoritative for encoding. This
//! check only reports drift: a discriminator, account list or error code the
//! IDL disagrees with.

use std::str::FromStr;

use serde::Deserialize;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solai_interface::discriminator::{self, DISCRIMINATOR_LEN, Namespace};
use solai_interface::{InterfaceError, LogInteractionArgs, SolaiProgramError, instruction};

/// IDL shipped with this crate.
pub const BUNDLED_IDL: &str = include_str!("../idl/solai_program.json");

#[derive(Debug, Deserialize)]
struct Idl {
    address: Option<String>,
    instructions: Vec<IdlInstruction>,
    #[serde(default)]
    accounts: Vec<IdlTypeDef>,
    #[serde(default)]
    errors: Vec<IdlError>,
}

#[derive(Debug, Deserialize)]
struct IdlInstruction {
    name: String,
    discriminator: Vec<u8>,
    accounts: Vec<IdlAccountItem>,
    #[serde(default)]
    args: Vec<IdlField>,
}

#[derive(Debug, Deserialize)]
struct IdlAccountItem {
    name: String,
    #[serde(default)]
    writable: bool,
    #[serde(default)]
    signer: bool,
}

#[derive(Debug, Deserialize)]
struct IdlField {
    name: String,
}

#[derive(Debug, Deserialize)]
struct IdlTypeDef {
    name: String,
    discriminator: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct IdlError {
    code: u32,
    name: String,
}

/// Compare the interface constants with an Anchor (0.30+) IDL document.
///
/// # Errors
///
/// The first difference found, or [`InterfaceError::Malformed`] if the document
/// does not parse.
pub fn verify_against_idl(json: &str, program_id: &Pubkey) -> Result<(), InterfaceError> {
    let idl: Idl =
        serde_json::from_str(json).map_err(|e| InterfaceError::Malformed(e.to_string()))?;

    if let Some(address) = &idl.address {
        let matches = Pubkey::from_str(address).is_ok_and(|idl_id| idl_id == *program_id);
        if !matches {
            return Err(InterfaceError::ProgramIdMismatch {
                expected: program_id.to_string(),
                actual: address.clone(),
            });
        }
    }

    for entry in discriminator::TABLE {
        let found = match entry.namespace {
            Namespace::Instruction => idl
                .instructions
                .iter()
                .find(|ix| ix.name == entry.name)
                .map(|ix| &ix.discriminator),
            Namespace::Account => idl
                .accounts
                .iter()
                .find(|account| account.name == entry.name)
                .map(|account| &account.discriminator),
        };
        let found = found.ok_or_else(|| InterfaceError::MissingEntry {
            name: entry.name.to_string(),
        })?;

        let expected: [u8; DISCRIMINATOR_LEN] = found.as_slice().try_into().map_err(|_| {
            InterfaceError::Malformed(format!(
                "discriminator of {} has {} bytes",
                entry.name,
                found.len()
            ))
        })?;
        if expected != entry.bytes {
            return Err(InterfaceError::DiscriminatorMismatch {
                name: entry.name.to_string(),
                expected,
                actual: entry.bytes,
            });
        }
    }

    // Any authority works: only order and flags are compared.
    let authority = Pubkey::default();
    let sample_args = LogInteractionArgs {
        prompt_hash: [0; 32],
        response_hash: [0; 32],
        fee_lamports: 1,
    };
    check_accounts(&idl, &instruction::initialize_user(program_id, &authority))?;
    check_accounts(
        &idl,
        &instruction::log_interaction(program_id, &authority, sample_args),
    )?;
    check_args(&idl, "initialize_user", &[])?;
    check_args(
        &idl,
        "log_interaction",
        &["prompt_hash", "response_hash", "fee_lamports"],
    )?;

    for error in &idl.errors {
        match SolaiProgramError::from_u32(error.code) {
            Some(known) if format!("{known:?}") == error.name => {}
            _ => {
                return Err(InterfaceError::Malformed(format!(
                    "error {} ({}) is not a known program error",
                    error.code, error.name
                )));
            }
        }
    }

    Ok(())
}

fn find_instruction<'a>(idl: &'a Idl, name: &str) -> Result<&'a IdlInstruction, InterfaceError> {
    idl.instructions
        .iter()
        .find(|ix| ix.name == name)
        .ok_or_else(|| InterfaceError::MissingEntry {
            name: name.to_string(),
        })
}

fn check_accounts(idl: &Idl, built: &Instruction) -> Result<(), InterfaceError> {
    let decoded = solai_interface::SolaiInstruction::unpack(&built.data)
        .map_err(|e| InterfaceError::Malformed(e.to_string()))?;
    let name = decoded.name();
    let idl_ix = find_instruction(idl, name)?;

    let mismatch = |reason: String| InterfaceError::AccountsMismatch {
        instruction: name.to_string(),
        reason,
    };

    if idl_ix.accounts.len() != built.accounts.len() {
        return Err(mismatch(format!(
            "IDL lists {} accounts, builder emits {}",
            idl_ix.accounts.len(),
            built.accounts.len()
        )));
    }

    for (index, (idl_account, meta)) in idl_ix.accounts.iter().zip(&built.accounts).enumerate() {
        if idl_account.signer != meta.is_signer || idl_account.writable != meta.is_writable {
            return Err(mismatch(format!(
                "account {index} ({}) is signer={} writable={} in the IDL, signer={} writable={} in the builder",
                idl_account.name,
                idl_account.signer,
                idl_account.writable,
                meta.is_signer,
                meta.is_writable
            )));
        }
    }
    Ok(())
}

fn check_args(idl: &Idl, name: &str, expected: &[&str]) -> Result<(), InterfaceError> {
    let idl_ix = find_instruction(idl, name)?;
    let names: Vec<&str> = idl_ix.args.iter().map(|arg| arg.name.as_str()).collect();
    if names != expected {
        return Err(InterfaceError::Malformed(format!(
            "{name} takes {names:?} in the IDL, encoder writes {expected:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solai_interface::PROGRAM_ID;

    fn edited(f: impl FnOnce(&mut serde_json::Value)) -> String {
        let mut value: serde_json::Value = serde_json::from_str(BUNDLED_IDL).unwrap();
        f(&mut value);
        value.to_string()
    }

    #[test]
    fn test_bundled_idl_matches() {
        assert_eq!(verify_against_idl(BUNDLED_IDL, &PROGRAM_ID), Ok(()));
    }

    #[test]
    fn test_detects_discriminator_drift() {
        let json = edited(|idl| idl["instructions"][1]["discriminator"][0] = 0.into());
        assert!(matches!(
            verify_against_idl(&json, &PROGRAM_ID),
            Err(InterfaceError::DiscriminatorMismatch { name, .. }) if name == "log_interaction"
        ));
    }

    #[test]
    fn test_detects_account_flag_drift() {
        let json = edited(|idl| idl["instructions"][1]["accounts"][2]["writable"] = false.into());
        assert!(matches!(
            verify_against_idl(&json, &PROGRAM_ID),
            Err(InterfaceError::AccountsMismatch { instruction, .. })
                if instruction == "log_interaction"
        ));
    }

    #[test]
    fn test_detects_missing_account_type() {
        let json = edited(|idl| idl["accounts"] = serde_json::json!([]));
        assert_eq!(
            verify_against_idl(&json, &PROGRAM_ID),
            Err(InterfaceError::MissingEntry {
                name: "UserAccount".to_string()
            })
        );
    }

    #[test]
    fn test_detects_other_program() {
        assert!(matches!(
            verify_against_idl(BUNDLED_IDL, &Pubkey::new_unique()),
            Err(InterfaceError::ProgramIdMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(matches!(
            verify_against_idl("not json", &PROGRAM_ID),
            Err(InterfaceError::Malformed(_))
        ));
    }
}
