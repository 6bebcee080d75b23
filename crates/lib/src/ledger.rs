use async_trait::async_trait;
use mockall::automock;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use std::sync::Arc;

use crate::error::ExtError;

/// The RPC round trips provisioning and scenarios depend on
#[automock]
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, ExtError>;

    async fn latest_blockhash(&self) -> Result<Hash, ExtError>;

    /// Submit a signed transaction and wait for the configured commitment
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, ExtError>;

    async fn account_data(&self, pubkey: &Pubkey) -> Result<Vec<u8>, ExtError>;

    async fn balance(&self, pubkey: &Pubkey) -> Result<u64, ExtError>;

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64)
        -> Result<Signature, ExtError>;

    async fn confirm(&self, signature: &Signature) -> Result<bool, ExtError>;
}

pub struct RpcLedger {
    rpc_client: Arc<RpcClient>,
}

impl RpcLedger {
    pub fn new(rpc_client: Arc<RpcClient>) -> Self {
        Self { rpc_client }
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, ExtError> {
        Ok(self.rpc_client.get_minimum_balance_for_rent_exemption(data_len).await?)
    }

    async fn latest_blockhash(&self) -> Result<Hash, ExtError> {
        Ok(self.rpc_client.get_latest_blockhash().await?)
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, ExtError> {
        Ok(self.rpc_client.send_and_confirm_transaction(transaction).await?)
    }

    async fn account_data(&self, pubkey: &Pubkey) -> Result<Vec<u8>, ExtError> {
        let account = self.rpc_client.get_account(pubkey).await?;
        Ok(account.data)
    }

    async fn balance(&self, pubkey: &Pubkey) -> Result<u64, ExtError> {
        Ok(self.rpc_client.get_balance(pubkey).await?)
    }

    async fn request_airdrop(
        &self,
        pubkey: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, ExtError> {
        Ok(self.rpc_client.request_airdrop(pubkey, lamports).await?)
    }

    async fn confirm(&self, signature: &Signature) -> Result<bool, ExtError> {
        Ok(self.rpc_client.confirm_transaction(signature).await?)
    }
}
