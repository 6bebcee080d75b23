pub mod config;
pub mod constant;
pub mod error;
pub mod ledger;
pub mod log;
pub mod provision;
pub mod rpc;
pub mod sanitize;
pub mod scenario;
pub mod signer;
pub mod token;
pub mod transaction;
pub use config::Config;
pub use error::{ExtError, Rejection};
pub use ledger::{Ledger, RpcLedger};
