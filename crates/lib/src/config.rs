use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use solana_commitment_config::CommitmentConfig;
use spl_token_2022_interface::state::AccountState;
use std::{fs, path::Path, path::PathBuf};

use crate::{
    constant::{
        DEFAULT_AIRDROP_LAMPORTS, DEFAULT_ENV_FILE, DEFAULT_MEMO, DEFAULT_MINT_AMOUNT,
        DEFAULT_MINT_DECIMALS, DEFAULT_MIN_BALANCE_LAMPORTS, DEFAULT_PRIVATE_KEY_ENV,
        DEFAULT_RPC_TIMEOUT_SECS, DEFAULT_RPC_URL, DEFAULT_TRANSFER_AMOUNT,
    },
    error::ExtError,
    sanitize_error,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rpc: RpcConfig,
    pub identity: IdentityConfig,
    pub mint: MintConfig,
    pub scenario: ScenarioConfig,
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub url: String,
    pub commitment: Commitment,
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            commitment: Commitment::default(),
            timeout_secs: DEFAULT_RPC_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_commitment_config(&self) -> CommitmentConfig {
        match self {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Where the primary identity lives between runs and how much SOL it should hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub private_key_env: String,
    pub env_file: PathBuf,
    pub min_balance_lamports: u64,
    pub airdrop_lamports: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            private_key_env: DEFAULT_PRIVATE_KEY_ENV.to_string(),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            min_balance_lamports: DEFAULT_MIN_BALANCE_LAMPORTS,
            airdrop_lamports: DEFAULT_AIRDROP_LAMPORTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MintConfig {
    pub decimals: u8,
    pub default_state: DefaultState,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self { decimals: DEFAULT_MINT_DECIMALS, default_state: DefaultState::Frozen }
    }
}

/// State new token accounts of a mint start in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DefaultState {
    #[default]
    Frozen,
    Thawed,
}

impl DefaultState {
    pub fn as_account_state(&self) -> AccountState {
        match self {
            DefaultState::Frozen => AccountState::Frozen,
            DefaultState::Thawed => AccountState::Initialized,
        }
    }

    pub fn from_account_state(state: AccountState) -> Option<Self> {
        match state {
            AccountState::Frozen => Some(DefaultState::Frozen),
            AccountState::Initialized => Some(DefaultState::Thawed),
            AccountState::Uninitialized => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub mint_amount: u64,
    pub transfer_amount: u64,
    pub memo: String,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            mint_amount: DEFAULT_MINT_AMOUNT,
            transfer_amount: DEFAULT_TRANSFER_AMOUNT,
            memo: DEFAULT_MEMO.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub policy: RunnerPolicy,
}

/// What the scenario runner does when an outcome differs from its expectation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunnerPolicy {
    /// Stop at the first unexpected outcome
    #[default]
    Strict,
    /// Log every outcome and keep going
    Lenient,
}

impl Config {
    /// Load the configuration file, falling back to defaults when it does not exist
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ExtError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            ExtError::ConfigError(format!("Failed to read config file: {}", sanitize_error!(e)))
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            ExtError::ConfigError(format!("Failed to parse config file: {}", sanitize_error!(e)))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ExtError> {
        if self.rpc.url.trim().is_empty() {
            return Err(ExtError::ConfigError("rpc.url cannot be empty".to_string()));
        }
        if self.rpc.timeout_secs == 0 {
            return Err(ExtError::ConfigError("rpc.timeout_secs must be positive".to_string()));
        }
        if self.identity.private_key_env.trim().is_empty() {
            return Err(ExtError::ConfigError(
                "identity.private_key_env cannot be empty".to_string(),
            ));
        }
        if self.scenario.mint_amount == 0 || self.scenario.transfer_amount == 0 {
            return Err(ExtError::ConfigError(
                "scenario amounts must be greater than zero".to_string(),
            ));
        }
        if self.scenario.transfer_amount > self.scenario.mint_amount {
            return Err(ExtError::ConfigError(format!(
                "scenario.transfer_amount ({}) exceeds scenario.mint_amount ({})",
                self.scenario.transfer_amount, self.scenario.mint_amount
            )));
        }
        if self.scenario.memo.is_empty() {
            return Err(ExtError::ConfigError("scenario.memo cannot be empty".to_string()));
        }
        Ok(())
    }
}
