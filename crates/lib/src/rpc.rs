use std::{sync::Arc, time::Duration};

use solana_client::nonblocking::rpc_client::RpcClient;

use crate::config::RpcConfig;

pub fn get_rpc_client(config: &RpcConfig) -> Arc<RpcClient> {
    Arc::new(RpcClient::new_with_timeout_and_commitment(
        config.url.clone(),
        Duration::from_secs(config.timeout_secs),
        config.commitment.as_commitment_config(),
    ))
}
