use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use std::{
    env,
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
    time::Duration,
};

use crate::{
    config::IdentityConfig,
    constant::{AIRDROP_CONFIRM_ATTEMPTS, AIRDROP_CONFIRM_INTERVAL_MS},
    error::ExtError,
    ledger::Ledger,
    sanitize_error,
    signer::KeypairUtil,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Read from the environment or the env file
    Environment,
    /// Freshly generated and appended to the env file
    Generated,
}

/// The keypair that pays for, owns and has authority over everything this crate provisions
#[derive(Debug)]
pub struct Identity {
    pub keypair: Keypair,
    pub source: IdentitySource,
}

impl Identity {
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

/// Load the identity from `config.private_key_env`, reading `config.env_file` first.
///
/// When no key is configured a new keypair is generated, appended to the env file and
/// exported to the current process so later loads see the same key.
pub fn load_or_create_identity(config: &IdentityConfig) -> Result<Identity, ExtError> {
    if config.env_file.exists() {
        dotenv::from_path(&config.env_file).map_err(|e| {
            ExtError::ConfigError(format!(
                "Failed to read {}: {}",
                config.env_file.display(),
                sanitize_error!(e)
            ))
        })?;
    }

    match env::var(&config.private_key_env) {
        Ok(value) if !value.trim().is_empty() => {
            let keypair = KeypairUtil::from_private_key_string(&value)?;
            log::info!("Loaded identity {} from {}", keypair.pubkey(), config.private_key_env);
            Ok(Identity { keypair, source: IdentitySource::Environment })
        }
        _ => {
            let keypair = Keypair::new();
            let encoded = KeypairUtil::to_json_bytes(&keypair)?;
            append_env_var(&config.env_file, &config.private_key_env, &encoded)?;
            env::set_var(&config.private_key_env, &encoded);
            log::info!(
                "Generated identity {} and saved it to {}",
                keypair.pubkey(),
                config.env_file.display()
            );
            Ok(Identity { keypair, source: IdentitySource::Generated })
        }
    }
}

fn append_env_var(path: &Path, name: &str, value: &str) -> Result<(), ExtError> {
    let needs_newline = match fs::read_to_string(path) {
        Ok(contents) => !contents.is_empty() && !contents.ends_with('\n'),
        Err(_) => false,
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_newline {
        writeln!(file)?;
    }
    writeln!(file, "{name}={value}")?;
    Ok(())
}

/// Airdrop to `pubkey` when its balance is below `config.min_balance_lamports`.
///
/// Returns the balance after funding.
pub async fn ensure_funded(
    ledger: &dyn Ledger,
    pubkey: &Pubkey,
    config: &IdentityConfig,
) -> Result<u64, ExtError> {
    fund_with_polling(
        ledger,
        pubkey,
        config,
        AIRDROP_CONFIRM_ATTEMPTS,
        Duration::from_millis(AIRDROP_CONFIRM_INTERVAL_MS),
    )
    .await
}

async fn fund_with_polling(
    ledger: &dyn Ledger,
    pubkey: &Pubkey,
    config: &IdentityConfig,
    attempts: u32,
    interval: Duration,
) -> Result<u64, ExtError> {
    let balance = ledger.balance(pubkey).await?;
    if balance >= config.min_balance_lamports {
        log::debug!("{pubkey} holds {balance} lamports, no airdrop needed");
        return Ok(balance);
    }

    log::info!("Requesting airdrop of {} lamports to {pubkey}", config.airdrop_lamports);
    let signature = ledger.request_airdrop(pubkey, config.airdrop_lamports).await?;
    wait_for_confirmation(ledger, &signature, attempts, interval).await?;

    ledger.balance(pubkey).await
}

async fn wait_for_confirmation(
    ledger: &dyn Ledger,
    signature: &Signature,
    attempts: u32,
    interval: Duration,
) -> Result<(), ExtError> {
    for _ in 0..attempts {
        if ledger.confirm(signature).await? {
            return Ok(());
        }
        tokio::time::sleep(interval).await;
    }

    Err(ExtError::RpcError(format!(
        "Airdrop {signature} not confirmed after {attempts} attempts"
    )))
}
