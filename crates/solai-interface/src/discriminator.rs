//! Wire discriminators for SolAI instructions and accounts.
//!
//! This module is the only place discriminator bytes are written down. Every
//! encoder and decoder in the workspace reads them from [`TABLE`] (or the
//! named constants backing it); no call site inlines its own literal.
//!
//! The values are copied from the program's published IDL. They are *not*
//! recomputed when encoding. [`verify`] recomputes them once, at startup,
//! with the Anchor rule
//!
//! ```text
//! discriminator = sha256("<namespace>:<name>")[..8]
//! ```
//!
//! so that a drifted constant fails loudly before any transaction is built
//! instead of failing silently on-chain.

use sha2::{Digest, Sha256};

use crate::InterfaceError;

/// Discriminator length in bytes.
pub const DISCRIMINATOR_LEN: usize = 8;

/// `initialize_user` instruction discriminator.
pub const INITIALIZE_USER: [u8; DISCRIMINATOR_LEN] = [111, 17, 185, 250, 60, 122, 38, 254];

/// `log_interaction` instruction discriminator.
pub const LOG_INTERACTION: [u8; DISCRIMINATOR_LEN] = [84, 149, 144, 32, 114, 222, 76, 188];

/// `UserAccount` account discriminator.
pub const USER_ACCOUNT: [u8; DISCRIMINATOR_LEN] = [211, 33, 136, 16, 186, 110, 242, 127];

/// Anchor hashing namespace of a discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Namespace {
    /// Instruction discriminators (`global:<snake_name>`)
    Instruction,
    /// Account discriminators (`account:<TypeName>`)
    Account,
}

impl Namespace {
    /// Hash prefix used by Anchor.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Instruction => "global",
            Self::Account => "account",
        }
    }
}

/// One row of the discriminator table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscriminatorEntry {
    /// Name as it appears in the IDL
    pub name: &'static str,
    /// Instruction or account
    pub namespace: Namespace,
    /// Wire bytes
    pub bytes: [u8; DISCRIMINATOR_LEN],
}

/// The authoritative name → discriminator table.
pub const TABLE: &[DiscriminatorEntry] = &[
    DiscriminatorEntry {
        name: "initialize_user",
        namespace: Namespace::Instruction,
        bytes: INITIALIZE_USER,
    },
    DiscriminatorEntry {
        name: "log_interaction",
        namespace: Namespace::Instruction,
        bytes: LOG_INTERACTION,
    },
    DiscriminatorEntry {
        name: "UserAccount",
        namespace: Namespace::Account,
        bytes: USER_ACCOUNT,
    },
];

/// Look up a table entry by name.
pub fn lookup(name: &str) -> Option<&'static DiscriminatorEntry> {
    TABLE.iter().find(|entry| entry.name == name)
}

/// Look up an instruction entry by its wire bytes.
pub fn instruction_by_bytes(
    bytes: &[u8; DISCRIMINATOR_LEN],
) -> Option<&'static DiscriminatorEntry> {
    TABLE
        .iter()
        .find(|entry| entry.namespace == Namespace::Instruction && entry.bytes == *bytes)
}

/// Compute the Anchor discriminator for `name` in `namespace`.
pub fn anchor_discriminator(namespace: Namespace, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(namespace.prefix().as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let hash = hasher.finalize();

    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    discriminator
}

/// Check every table entry against the Anchor hashing rule.
///
/// # Errors
///
/// The first mismatch found.
pub fn verify() -> Result<(), InterfaceError> {
    for entry in TABLE {
        let expected = anchor_discriminator(entry.namespace, entry.name);
        if expected != entry.bytes {
            return Err(InterfaceError::DiscriminatorMismatch {
                name: entry.name.to_string(),
                expected,
                actual: entry.bytes,
            });
        }
    }
    Ok(())
}
