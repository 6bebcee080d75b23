use extlab_lib::{
    config::{Config, DefaultState},
    error::ExtError,
    ledger::Ledger,
    provision::{MintProvisioner, TokenAccountProvisioner},
    scenario::{ScenarioContext, ScenarioReport, ScenarioRunner},
    signer::{ensure_funded, load_or_create_identity},
    token::{MintState, TokenAccountState},
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use std::str::FromStr;

/// Provision the identity, a mint and two token accounts, then run every scenario
pub async fn run_lab(ledger: &dyn Ledger, config: &Config) -> Result<ScenarioReport, ExtError> {
    let identity = load_or_create_identity(&config.identity)?;
    ensure_funded(ledger, &identity.pubkey(), &config.identity).await?;

    let mint = Keypair::new();
    MintProvisioner::provision(
        ledger,
        &identity.keypair,
        &mint,
        config.mint.decimals,
        config.mint.default_state,
    )
    .await?;

    let source = Keypair::new();
    let destination = Keypair::new();
    TokenAccountProvisioner::provision(ledger, &identity.keypair, &source, &mint.pubkey()).await?;
    TokenAccountProvisioner::provision(ledger, &identity.keypair, &destination, &mint.pubkey())
        .await?;

    let context = ScenarioContext::new(
        &identity.keypair,
        mint.pubkey(),
        config.mint.decimals,
        source.pubkey(),
        destination.pubkey(),
        &config.scenario,
    );
    let runner = ScenarioRunner::new(ledger, context, config.runner.policy);
    Ok(runner.run().await)
}

pub async fn show_identity(ledger: &dyn Ledger, config: &Config, fund: bool) -> Result<(), ExtError> {
    let identity = load_or_create_identity(&config.identity)?;
    let pubkey = identity.pubkey();

    let balance = if fund {
        ensure_funded(ledger, &pubkey, &config.identity).await?
    } else {
        ledger.balance(&pubkey).await?
    };

    println!("identity: {pubkey}");
    println!("balance:  {balance} lamports");
    Ok(())
}

pub async fn create_mint(
    ledger: &dyn Ledger,
    config: &Config,
    decimals: Option<u8>,
    default_state: Option<DefaultState>,
) -> Result<(), ExtError> {
    let identity = load_or_create_identity(&config.identity)?;
    ensure_funded(ledger, &identity.pubkey(), &config.identity).await?;

    let mint = Keypair::new();
    let signature = MintProvisioner::provision(
        ledger,
        &identity.keypair,
        &mint,
        decimals.unwrap_or(config.mint.decimals),
        default_state.unwrap_or(config.mint.default_state),
    )
    .await?;

    println!("mint:      {}", mint.pubkey());
    println!("signature: {signature}");
    Ok(())
}

pub async fn create_account(ledger: &dyn Ledger, config: &Config, mint: &str) -> Result<(), ExtError> {
    let mint = parse_pubkey(mint)?;
    let identity = load_or_create_identity(&config.identity)?;
    ensure_funded(ledger, &identity.pubkey(), &config.identity).await?;

    let account = Keypair::new();
    let signature =
        TokenAccountProvisioner::provision(ledger, &identity.keypair, &account, &mint).await?;

    println!("account:   {}", account.pubkey());
    println!("signature: {signature}");
    Ok(())
}

pub async fn inspect_mint(ledger: &dyn Ledger, mint: &str) -> Result<(), ExtError> {
    let address = parse_pubkey(mint)?;
    let state = MintState::fetch(ledger, &address).await?;
    println!("mint:              {address}");
    println!("{state}");
    Ok(())
}

pub async fn inspect_account(ledger: &dyn Ledger, account: &str) -> Result<(), ExtError> {
    let address = parse_pubkey(account)?;
    let state = TokenAccountState::fetch(ledger, &address).await?;
    println!("account:           {address}");
    println!("{state}");
    Ok(())
}

fn parse_pubkey(value: &str) -> Result<Pubkey, ExtError> {
    Pubkey::from_str(value)
        .map_err(|e| ExtError::ConfigError(format!("Invalid public key {value}: {e}")))
}
