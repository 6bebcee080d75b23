// ============================================================================
// Network URLs
// ============================================================================

/// Default local Solana RPC URL
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

// ============================================================================
// Test Environment Variables
// ============================================================================

/// RPC URL environment variable
pub const RPC_URL_ENV: &str = "RPC_URL";

// ============================================================================
// Test Configuration
// ============================================================================

/// Lamports airdropped to each test identity
pub const TEST_IDENTITY_LAMPORTS: u64 = 2_000_000_000;

/// Decimals of the mints created by the tests
pub const TEST_MINT_DECIMALS: u8 = 9;
