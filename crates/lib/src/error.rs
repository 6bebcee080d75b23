use serde::Serialize;
use solana_client::client_error::ClientError;
use solana_program::program_error::ProgramError;
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::SignerError,
    transaction::TransactionError,
};
use solana_system_interface::error::SystemError;
use spl_token_2022_interface::error::TokenError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ExtError {
    #[error("Account {0} not found")]
    AccountNotFound(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    /// The ledger executed the transaction and rejected it, not yet attributed to an instruction
    #[error("Transaction failed: {0}")]
    TransactionFailed(TransactionError),

    #[error("Transaction rejected: {0}")]
    Rejected(Rejection),

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Scenario failed: {0}")]
    ScenarioFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ExtError {
    /// Attribute a raw ledger failure to the program that raised it.
    ///
    /// Custom error codes are only meaningful relative to the program of the failing
    /// instruction, so the classification needs the submitted instruction list.
    pub fn classify(self, instructions: &[Instruction]) -> Self {
        match self {
            ExtError::TransactionFailed(err) => {
                ExtError::Rejected(Rejection::classify(&err, instructions))
            }
            other => other,
        }
    }

    /// The ledger rejection carried by this error, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ExtError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// Why the ledger refused a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Rejection {
    AccountFrozen,
    ImmutableOwner,
    MemoRequired,
    OwnerMismatch,
    InsufficientFunds,
    AccountAlreadyInUse,
    Program { program: String, code: u32 },
    Instruction { index: u8, reason: String },
    Transaction(String),
}

const TOKEN_ACCOUNT_FROZEN: u32 = TokenError::AccountFrozen as u32;
const TOKEN_IMMUTABLE_OWNER: u32 = TokenError::ImmutableOwner as u32;
const TOKEN_NO_MEMO: u32 = TokenError::NoMemo as u32;
const TOKEN_OWNER_MISMATCH: u32 = TokenError::OwnerMismatch as u32;
const TOKEN_INSUFFICIENT_FUNDS: u32 = TokenError::InsufficientFunds as u32;
const SYSTEM_ACCOUNT_IN_USE: u32 = SystemError::AccountAlreadyInUse as u32;
const SYSTEM_NEGATIVE_LAMPORTS: u32 = SystemError::ResultWithNegativeLamports as u32;

impl Rejection {
    pub fn classify(err: &TransactionError, instructions: &[Instruction]) -> Self {
        match err {
            TransactionError::InsufficientFundsForFee
            | TransactionError::InsufficientFundsForRent { .. } => Rejection::InsufficientFunds,
            TransactionError::InstructionError(index, InstructionError::Custom(code)) => {
                let program = instructions.get(usize::from(*index)).map(|ix| ix.program_id);
                Self::from_program_code(program, *code)
            }
            TransactionError::InstructionError(index, reason) => {
                Rejection::Instruction { index: *index, reason: reason.to_string() }
            }
            other => Rejection::Transaction(other.to_string()),
        }
    }

    fn from_program_code(program: Option<Pubkey>, code: u32) -> Self {
        match program {
            Some(program) if program == spl_token_2022_interface::id() => match code {
                TOKEN_ACCOUNT_FROZEN => Rejection::AccountFrozen,
                TOKEN_IMMUTABLE_OWNER => Rejection::ImmutableOwner,
                TOKEN_NO_MEMO => Rejection::MemoRequired,
                TOKEN_OWNER_MISMATCH => Rejection::OwnerMismatch,
                TOKEN_INSUFFICIENT_FUNDS => Rejection::InsufficientFunds,
                _ => Rejection::Program { program: program.to_string(), code },
            },
            Some(program) if program == solana_system_interface::program::id() => match code {
                SYSTEM_ACCOUNT_IN_USE => Rejection::AccountAlreadyInUse,
                SYSTEM_NEGATIVE_LAMPORTS => Rejection::InsufficientFunds,
                _ => Rejection::Program { program: program.to_string(), code },
            },
            Some(program) => Rejection::Program { program: program.to_string(), code },
            None => Rejection::Program { program: "unknown".to_string(), code },
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::AccountFrozen => write!(f, "account is frozen"),
            Rejection::ImmutableOwner => write!(f, "account owner is immutable"),
            Rejection::MemoRequired => write!(f, "incoming transfer requires a memo"),
            Rejection::OwnerMismatch => write!(f, "owner does not match"),
            Rejection::InsufficientFunds => write!(f, "insufficient funds"),
            Rejection::AccountAlreadyInUse => write!(f, "account already in use"),
            Rejection::Program { program, code } => {
                write!(f, "program {program} failed with custom error {code:#x}")
            }
            Rejection::Instruction { index, reason } => {
                write!(f, "instruction {index} failed: {reason}")
            }
            Rejection::Transaction(reason) => write!(f, "{reason}"),
        }
    }
}

impl From<ClientError> for ExtError {
    fn from(e: ClientError) -> Self {
        if let Some(tx_error) = e.get_transaction_error() {
            return ExtError::TransactionFailed(tx_error);
        }

        let error_string = e.to_string();
        let message = crate::sanitize_error!(error_string);

        if error_string.contains("AccountNotFound")
            || error_string.contains("could not find account")
        {
            ExtError::AccountNotFound(message)
        } else {
            ExtError::RpcError(message)
        }
    }
}

impl From<SignerError> for ExtError {
    fn from(e: SignerError) -> Self {
        ExtError::SigningError(crate::sanitize_error!(e))
    }
}

impl From<ProgramError> for ExtError {
    fn from(e: ProgramError) -> Self {
        ExtError::InvalidAccountData(crate::sanitize_error!(e))
    }
}

impl From<bs58::decode::Error> for ExtError {
    fn from(e: bs58::decode::Error) -> Self {
        ExtError::SigningError(crate::sanitize_error!(e))
    }
}

impl From<std::io::Error> for ExtError {
    fn from(e: std::io::Error) -> Self {
        ExtError::InternalError(crate::sanitize_error!(e))
    }
}

impl From<toml::de::Error> for ExtError {
    fn from(e: toml::de::Error) -> Self {
        ExtError::ConfigError(crate::sanitize_error!(e))
    }
}
