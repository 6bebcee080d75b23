use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey};

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_CONFIG_PATH: &str = "extlab.toml";

// Identity
pub const DEFAULT_PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_MIN_BALANCE_LAMPORTS: u64 = LAMPORTS_PER_SOL;
pub const DEFAULT_AIRDROP_LAMPORTS: u64 = LAMPORTS_PER_SOL;
pub const AIRDROP_CONFIRM_ATTEMPTS: u32 = 60;
pub const AIRDROP_CONFIRM_INTERVAL_MS: u64 = 500;

// Mint
pub const DEFAULT_MINT_DECIMALS: u8 = 9;

// Scenarios
pub const DEFAULT_MINT_AMOUNT: u64 = 1_000;
pub const DEFAULT_TRANSFER_AMOUNT: u64 = 300;
pub const DEFAULT_MEMO: &str = "Hello, token extensions";

/// SPL memo program (v2), `MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr`
pub const MEMO_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    5, 74, 83, 90, 153, 41, 33, 6, 77, 36, 232, 113, 96, 218, 56, 124, 124, 53, 181, 221, 188, 146,
    187, 129, 228, 31, 168, 64, 65, 5, 68, 141,
]);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_memo_program_id_matches_published_address() {
        let expected = Pubkey::from_str("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr").unwrap();
        assert_eq!(MEMO_PROGRAM_ID, expected);
    }
}
