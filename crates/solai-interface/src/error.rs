//! Interface error types.

/// Failure to decode raw account bytes as a [`crate::UserAccount`].
///
/// Callers on the read path treat this as a degraded result, not a fault: the
/// account exists, it just is not a `UserAccount` this client understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Data length differs from the fixed record size
    #[error("account data is {actual} bytes, expected {expected}")]
    InvalidLength {
        /// Required byte length
        expected: usize,
        /// Observed byte length
        actual: usize,
    },

    /// First 8 bytes are not the `UserAccount` discriminator
    #[error("account discriminator {found:?} is not the UserAccount discriminator")]
    InvalidDiscriminator {
        /// Discriminator bytes found at the start of the data
        found: [u8; 8],
    },
}

/// Failure to decode instruction data produced for the SolAI program.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InstructionDecodeError {
    /// Data is shorter than a discriminator
    #[error("instruction data is {len} bytes, shorter than a discriminator")]
    TooShort {
        /// Observed byte length
        len: usize,
    },

    /// Discriminator is not in the table
    #[error("unknown instruction discriminator {0:?}")]
    UnknownDiscriminator([u8; 8]),

    /// Arguments after the discriminator do not match the instruction's layout
    #[error("invalid arguments for {instruction}: {reason}")]
    InvalidArgs {
        /// Instruction name
        instruction: &'static str,
        /// What was wrong with the bytes
        reason: String,
    },
}

/// Drift between this crate's constants and the program's interface.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InterfaceError {
    /// A discriminator constant disagrees with its reference value
    #[error("discriminator for {name} is {actual:?}, interface says {expected:?}")]
    DiscriminatorMismatch {
        /// Table entry name
        name: String,
        /// Reference value (recomputed or read from the IDL)
        expected: [u8; 8],
        /// Value held in the constant table
        actual: [u8; 8],
    },

    /// The interface definition does not mention an entry this client uses
    #[error("interface definition has no entry for {name}")]
    MissingEntry {
        /// Table entry name
        name: String,
    },

    /// Instruction accounts differ in order or flags
    #[error("accounts of {instruction} differ from the interface: {reason}")]
    AccountsMismatch {
        /// Instruction name
        instruction: String,
        /// First difference found
        reason: String,
    },

    /// The interface definition names a different program
    #[error("interface is for program {actual}, expected {expected}")]
    ProgramIdMismatch {
        /// Program ID compiled into this crate
        expected: String,
        /// Program ID named by the interface definition
        actual: String,
    },

    /// The interface definition could not be parsed
    #[error("malformed interface definition: {0}")]
    Malformed(String),
}

/// Custom error codes returned by the SolAI program.
///
/// Anchor numbers user errors from 6000, so a failed `log_interaction`
/// surfaces as `InstructionError::Custom(6002)` and so on.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SolaiProgramError {
    /// Signer is not the UserAccount's authority
    #[error("the provided authority does not match the user account owner")]
    UnauthorizedAuthority = 6000,

    /// Counter overflow
    #[error("math overflow detected")]
    MathOverflow = 6001,

    /// Zero fee
    #[error("the provided fee must be greater than zero")]
    InvalidFee = 6002,
}

impl SolaiProgramError {
    /// Convert to error code
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    /// Create from error code
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            6000 => Some(Self::UnauthorizedAuthority),
            6001 => Some(Self::MathOverflow),
            6002 => Some(Self::InvalidFee),
            _ => None,
        }
    }
}
