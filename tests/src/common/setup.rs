use anyhow::Result;
use extlab_lib::{
    config::{Config, IdentityConfig, RpcConfig},
    ledger::RpcLedger,
    rpc::get_rpc_client,
    signer::ensure_funded,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

use crate::common::{DEFAULT_RPC_URL, RPC_URL_ENV, TEST_IDENTITY_LAMPORTS};

/// A funded throwaway identity connected to a local validator
pub struct LabTestContext {
    pub ledger: RpcLedger,
    pub identity: Keypair,
    pub config: Config,
}

impl LabTestContext {
    pub async fn new() -> Result<Self> {
        dotenv::dotenv().ok();
        let rpc_url = std::env::var(RPC_URL_ENV).unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        Self::new_with_rpc_url(&rpc_url).await
    }

    pub async fn new_with_rpc_url(rpc_url: &str) -> Result<Self> {
        let config = Config {
            rpc: RpcConfig { url: rpc_url.to_string(), ..RpcConfig::default() },
            identity: IdentityConfig {
                min_balance_lamports: TEST_IDENTITY_LAMPORTS / 2,
                airdrop_lamports: TEST_IDENTITY_LAMPORTS,
                ..IdentityConfig::default()
            },
            ..Config::default()
        };

        let ledger = RpcLedger::new(get_rpc_client(&config.rpc));
        let identity = Keypair::new();
        ensure_funded(&ledger, &identity.pubkey(), &config.identity).await?;

        Ok(Self { ledger, identity, config })
    }

    pub fn identity_pubkey(&self) -> Pubkey {
        self.identity.pubkey()
    }
}
