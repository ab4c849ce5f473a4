//! Client configuration.
//!
//! Read once at process start from a TOML file, then turned into the values
//! each component is constructed with ([`ProgramConfig`], an RPC URL,
//! commitment and timeout). Nothing here is global.
//!
//! ```toml
//! log_level = "info"
//!
//! [solana]
//! cluster = "devnet"
//! rpc_url = "https://api.devnet.solana.com"
//! commitment = "confirmed"
//! timeout_ms = 15000
//!
//! [solana.tokenomics]
//! fee_sol_for_logging_lamports = 500000
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "SOLAI_CONFIG_PATH";

/// Environment variable overriding `solana.rpc_url`.
pub const RPC_URL_ENV: &str = "SOLANA_RPC_URL";

/// Config file used when neither a flag nor the environment names one.
pub const DEFAULT_CONFIG_FILE: &str = "solai.toml";

/// Default logging fee (0.0005 SOL).
pub const DEFAULT_FEE_LAMPORTS: u64 = 500_000;

/// Default per-call RPC bound.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// `program_id` is not a public key
    #[error("invalid program_id {0:?}")]
    InvalidProgramId(String),

    /// `commitment` is not processed/confirmed/finalized
    #[error("invalid commitment {0:?}, expected processed, confirmed or finalized")]
    InvalidCommitment(String),

    /// `timeout_ms` is zero
    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,

    /// `fee_sol_for_logging_lamports` is zero
    #[error("fee_sol_for_logging_lamports must be greater than zero")]
    ZeroFee,
}

/// Top-level config file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default tracing filter
    pub log_level: String,
    /// Cluster and program settings
    pub solana: SolanaConfig,
}

/// `[solana]` section.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolanaConfig {
    /// Cluster name, informational
    pub cluster: String,
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Commitment for every read
    pub commitment: String,
    /// Bound on each RPC call, in milliseconds
    pub timeout_ms: u64,
    /// Program ID override (defaults to the compiled-in ID)
    pub program_id: Option<String>,
    /// Published IDL to cross-check discriminators against
    pub idl_path: Option<PathBuf>,
    /// Fee settings
    pub tokenomics: TokenomicsConfig,
}

/// `[solana.tokenomics]` section.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenomicsConfig {
    /// Lamports charged per logged interaction
    pub fee_sol_for_logging_lamports: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            solana: SolanaConfig::default(),
        }
    }
}

impl Default for SolanaConfig {
    fn default() -> Self {
        Self {
            cluster: solai_program_ids::DEPLOYED_CLUSTER.to_string(),
            rpc_url: "https://api.devnet.solana.com".to_string(),
            commitment: "confirmed".to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            program_id: None,
            idl_path: None,
            tokenomics: TokenomicsConfig::default(),
        }
    }
}

impl Default for TokenomicsConfig {
    fn default() -> Self {
        Self {
            fee_sol_for_logging_lamports: DEFAULT_FEE_LAMPORTS,
        }
    }
}

/// Program-level values injected into [`crate::SolaiClient`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramConfig {
    /// SolAI program ID
    pub program_id: Pubkey,
    /// Lamports charged per logged interaction
    pub fee_lamports: u64,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id: solai_interface::PROGRAM_ID,
            fee_lamports: DEFAULT_FEE_LAMPORTS,
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Locate and load the config, then apply environment overrides.
    ///
    /// An explicit path (flag or `SOLAI_CONFIG_PATH`) must exist. The
    /// implicit `./solai.toml` may be absent, in which case defaults apply.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load(&path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply overrides from a variable lookup (the environment in practice).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(rpc_url) = lookup(RPC_URL_ENV).filter(|url| !url.is_empty()) {
            self.solana.rpc_url = rpc_url;
        }
        self
    }

    /// Validated program settings.
    pub fn program_config(&self) -> Result<ProgramConfig, ConfigError> {
        let program_id = match &self.solana.program_id {
            Some(id) => {
                Pubkey::from_str(id).map_err(|_| ConfigError::InvalidProgramId(id.clone()))?
            }
            None => solai_interface::PROGRAM_ID,
        };

        let fee_lamports = self.solana.tokenomics.fee_sol_for_logging_lamports;
        if fee_lamports == 0 {
            return Err(ConfigError::ZeroFee);
        }

        Ok(ProgramConfig {
            program_id,
            fee_lamports,
        })
    }

    /// Parsed commitment level.
    pub fn commitment(&self) -> Result<CommitmentConfig, ConfigError> {
        match self.solana.commitment.as_str() {
            "processed" => Ok(CommitmentConfig::processed()),
            "confirmed" => Ok(CommitmentConfig::confirmed()),
            "finalized" => Ok(CommitmentConfig::finalized()),
            other => Err(ConfigError::InvalidCommitment(other.to_string())),
        }
    }

    /// Per-call RPC bound.
    pub fn rpc_timeout(&self) -> Result<Duration, ConfigError> {
        match self.solana.timeout_ms {
            0 => Err(ConfigError::ZeroTimeout),
            ms => Ok(Duration::from_millis(ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.solana.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(config.program_config().unwrap(), ProgramConfig::default());
        assert_eq!(config.commitment().unwrap(), CommitmentConfig::confirmed());
        assert_eq!(config.rpc_timeout().unwrap(), Duration::from_millis(15_000));
    }

    #[test]
    fn test_full_document() {
        let program_id = Pubkey::new_unique();
        let config = Config::from_toml_str(&format!(
            r#"
            log_level = "debug"

            [solana]
            cluster = "localnet"
            rpc_url = "http://127.0.0.1:8899"
            commitment = "finalized"
            timeout_ms = 2500
            program_id = "{program_id}"

            [solana.tokenomics]
            fee_sol_for_logging_lamports = 1000
            "#
        ))
        .unwrap();

        assert_eq!(config.solana.cluster, "localnet");
        assert_eq!(config.commitment().unwrap(), CommitmentConfig::finalized());
        assert_eq!(config.rpc_timeout().unwrap(), Duration::from_millis(2500));
        assert_eq!(
            config.program_config().unwrap(),
            ProgramConfig {
                program_id,
                fee_lamports: 1000
            }
        );
    }

    #[test]
    fn test_rejects_invalid_values() {
        let config =
            Config::from_toml_str("[solana]\ncommitment = \"recent\"\ntimeout_ms = 0").unwrap();
        assert!(matches!(config.commitment(), Err(ConfigError::InvalidCommitment(_))));
        assert!(matches!(config.rpc_timeout(), Err(ConfigError::ZeroTimeout)));

        let config = Config::from_toml_str("[solana]\nprogram_id = \"not-a-key\"").unwrap();
        assert!(matches!(config.program_config(), Err(ConfigError::InvalidProgramId(_))));

        let config =
            Config::from_toml_str("[solana.tokenomics]\nfee_sol_for_logging_lamports = 0").unwrap();
        assert!(matches!(config.program_config(), Err(ConfigError::ZeroFee)));

        assert!(matches!(
            Config::from_toml_str("[solana]\nrpc = \"typo\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rpc_url_override() {
        let config = Config::default().with_overrides(|key| {
            (key == RPC_URL_ENV).then(|| "http://localhost:8899".to_string())
        });
        assert_eq!(config.solana.rpc_url, "http://localhost:8899");

        let config = Config::default().with_overrides(|_| Some(String::new()));
        assert_eq!(config.solana.rpc_url, "https://api.devnet.solana.com");
    }
}
