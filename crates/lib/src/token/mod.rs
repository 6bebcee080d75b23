pub mod builder;
pub mod layout;
pub mod state;

pub use builder::{MintInstructions, TokenAccountInstructions};
pub use layout::{account_len, mint_len, MINT_EXTENSIONS, TOKEN_ACCOUNT_EXTENSIONS};
pub use state::{MintState, TokenAccountState};
