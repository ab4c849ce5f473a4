//! SolAI CLI - read and build tool for the SolAI program
//!
//! Commands:
//! - `solai pda <authority>` - Derive the UserAccount and treasury PDAs
//! - `solai user <authority>` - Read and decode a UserAccount
//! - `solai status <authority>` - Existence and balance of a UserAccount
//! - `solai init <authority>` - Build an unsigned `initialize_user` transaction
//! - `solai log <authority> ...` - Build an unsigned `log_interaction` transaction
//! - `solai treasury` - Treasury balance
//! - `solai stats` - Program-wide statistics
//! - `solai inspect <base64>` - Decode a serialized transaction
//! - `solai verify-idl [path]` - Cross-check the interface against an IDL
//! - `solai error <code>` - Explain a program error code
//!
//! Every command prints JSON on stdout. Logs go to stderr.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use solai_client::{
    AccountState, Config, InteractionHashes, RpcReader, SolaiClient, idl, inspect_transaction,
    parse_address,
};
use solai_interface::{SolaiProgramError, find_treasury_pda, find_user_account_pda};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "solai")]
#[command(about = "Read and build tool for the SolAI interaction-logging program")]
struct Cli {
    /// Config file (defaults to $SOLAI_CONFIG_PATH, then ./solai.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the UserAccount and treasury PDAs
    Pda {
        /// Authority public key
        authority: String,
    },
    /// Read and decode a UserAccount
    User {
        /// Authority public key
        authority: String,
    },
    /// Existence and balance of a UserAccount
    Status {
        /// Authority public key
        authority: String,
    },
    /// Build an unsigned initialize_user transaction
    Init {
        /// Authority public key (fee payer)
        authority: String,
    },
    /// Build an unsigned log_interaction transaction
    Log(LogArgs),
    /// Treasury balance
    Treasury,
    /// Program-wide statistics
    Stats,
    /// Decode a serialized transaction
    Inspect {
        /// Base64 transaction
        transaction: String,
    },
    /// Cross-check the interface against an Anchor IDL
    VerifyIdl {
        /// IDL file (defaults to solana.idl_path, then the bundled IDL)
        path: Option<PathBuf>,
    },
    /// Explain a program error code
    Error {
        /// Custom error code, e.g. 6002
        code: u32,
    },
}

#[derive(Args)]
struct LogArgs {
    /// Authority public key (fee payer)
    authority: String,

    /// Prompt hash, 64 hex characters
    #[arg(long, requires = "response_hash", conflicts_with_all = ["prompt", "response"])]
    prompt_hash: Option<String>,

    /// Response hash, 64 hex characters
    #[arg(long, requires = "prompt_hash")]
    response_hash: Option<String>,

    /// Prompt text, hashed with SHA-256
    #[arg(long, requires = "response", conflicts_with = "response_hash")]
    prompt: Option<String>,

    /// Response text, hashed with SHA-256
    #[arg(long, requires = "prompt")]
    response: Option<String>,

    /// Fee override in lamports
    #[arg(long)]
    fee_lamports: Option<u64>,
}

impl LogArgs {
    fn hashes(&self) -> Result<InteractionHashes> {
        match (&self.prompt_hash, &self.response_hash, &self.prompt, &self.response) {
            (Some(prompt), Some(response), None, None) => {
                Ok(InteractionHashes::from_hex(prompt, response)?)
            }
            (None, None, Some(prompt), Some(response)) => {
                Ok(InteractionHashes::from_texts(prompt, response))
            }
            _ => bail!("pass either --prompt-hash/--response-hash or --prompt/--response"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::discover(cli.config.as_deref()).context("failed to load config")?;
    init_tracing(&config, cli.verbose);

    let output = run(cli.command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing(config: &Config, verbose: bool) {
    let default_level = if verbose { "debug" } else { config.log_level.as_str() };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands, config: &Config) -> Result<Value> {
    let program_config = config.program_config()?;
    let program_id = program_config.program_id;

    match command {
        Commands::Pda { authority } => {
            let authority = parse_address(&authority)?;
            let (user_account, user_bump) = find_user_account_pda(&program_id, &authority);
            let (treasury, treasury_bump) = find_treasury_pda(&program_id);
            Ok(json!({
                "programId": program_id.to_string(),
                "authority": authority.to_string(),
                "userAccount": user_account.to_string(),
                "userAccountBump": user_bump,
                "treasury": treasury.to_string(),
                "treasuryBump": treasury_bump,
            }))
        }
        Commands::User { authority } => {
            let authority = parse_address(&authority)?;
            let state = connect(config)?.user_account(&authority).await?;
            Ok(account_state_json(&state))
        }
        Commands::Status { authority } => {
            let authority = parse_address(&authority)?;
            let status = connect(config)?.user_account_status(&authority).await?;
            Ok(serde_json::to_value(status)?)
        }
        Commands::Init { authority } => {
            let authority = parse_address(&authority)?;
            let bundle = connect(config)?.build_initialize_user(&authority).await?;
            Ok(serde_json::to_value(bundle)?)
        }
        Commands::Log(args) => {
            let authority = parse_address(&args.authority)?;
            let hashes = args.hashes()?;
            let client = connect(config)?;
            let fee = args.fee_lamports.unwrap_or(program_config.fee_lamports);
            let bundle = client
                .build_log_interaction_with_fee(&authority, &hashes, fee)
                .await?;
            Ok(serde_json::to_value(bundle)?)
        }
        Commands::Treasury => {
            let client = connect(config)?;
            let lamports = client.treasury_balance().await?;
            Ok(json!({
                "treasury": client.treasury_address().to_string(),
                "lamports": lamports,
            }))
        }
        Commands::Stats => {
            let stats = connect(config)?.program_stats().await?;
            let mut value = serde_json::to_value(stats)?;
            value["totalFeesSol"] = json!(stats.total_fees_sol());
            Ok(value)
        }
        Commands::Inspect { transaction } => {
            let inspected = inspect_transaction(&transaction, &program_id)?;
            Ok(serde_json::to_value(inspected)?)
        }
        Commands::VerifyIdl { path } => {
            let path = path.or_else(|| config.solana.idl_path.clone());
            let source = read_idl(path.as_deref())?;
            idl::verify_against_idl(&source, &program_id)?;
            Ok(json!({
                "programId": program_id.to_string(),
                "idl": path.map_or_else(|| "bundled".to_string(), |p| p.display().to_string()),
                "ok": true,
            }))
        }
        Commands::Error { code } => {
            let error = SolaiProgramError::from_u32(code)
                .with_context(|| format!("{code} is not a SolAI program error"))?;
            Ok(json!({
                "code": code,
                "name": format!("{error:?}"),
                "message": error.to_string(),
            }))
        }
    }
}

/// Build a client from config, checking the configured IDL first.
fn connect(config: &Config) -> Result<SolaiClient<RpcReader>> {
    let program_config = config.program_config()?;

    if let Some(path) = &config.solana.idl_path {
        let source = read_idl(Some(path))?;
        idl::verify_against_idl(&source, &program_config.program_id)
            .with_context(|| format!("interface drift against {}", path.display()))?;
        debug!(path = %path.display(), "IDL cross-check passed");
    }

    let reader = RpcReader::new(
        config.solana.rpc_url.clone(),
        config.commitment()?,
        config.rpc_timeout()?,
    );
    info!(
        cluster = %config.solana.cluster,
        rpc_url = %reader.url(),
        program_id = %program_config.program_id,
        "connecting"
    );
    Ok(SolaiClient::new(Arc::new(reader), program_config)?)
}

fn read_idl(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read IDL {}", path.display())),
        None => Ok(idl::BUNDLED_IDL.to_string()),
    }
}

fn account_state_json(state: &AccountState) -> Value {
    match state {
        AccountState::NotFound { address } => json!({
            "address": address.to_string(),
            "exists": false,
        }),
        AccountState::Decoded {
            address,
            lamports,
            owner,
            account,
        } => json!({
            "address": address.to_string(),
            "exists": true,
            "lamports": lamports,
            "owner": owner.to_string(),
            "decoded": {
                "authority": account.authority.to_string(),
                "totalQueries": account.total_queries,
                "totalFeesPaid": account.total_fees_paid,
                "lastPromptHash": hex::encode(account.last_prompt_hash),
                "lastResponseHash": hex::encode(account.last_response_hash),
                "lastLogSlot": account.last_log_slot,
                "bump": account.bump,
            },
        }),
        AccountState::Undecodable {
            address,
            lamports,
            owner,
            reason,
        } => json!({
            "address": address.to_string(),
            "exists": true,
            "lamports": lamports,
            "owner": owner.to_string(),
            "decodeError": reason.to_string(),
        }),
    }
}
