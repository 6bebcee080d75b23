use spl_token_2022_interface::{
    extension::ExtensionType,
    state::{Account as Token2022AccountState, Mint as Token2022MintState},
};

use crate::error::ExtError;

/// Extensions every provisioned mint carries
pub const MINT_EXTENSIONS: &[ExtensionType] = &[ExtensionType::DefaultAccountState];

/// Extensions every provisioned token account carries, in initialization order
pub const TOKEN_ACCOUNT_EXTENSIONS: &[ExtensionType] =
    &[ExtensionType::ImmutableOwner, ExtensionType::MemoTransfer, ExtensionType::CpiGuard];

pub fn mint_len(extensions: &[ExtensionType]) -> Result<usize, ExtError> {
    Ok(ExtensionType::try_calculate_account_len::<Token2022MintState>(extensions)?)
}

pub fn account_len(extensions: &[ExtensionType]) -> Result<usize, ExtError> {
    Ok(ExtensionType::try_calculate_account_len::<Token2022AccountState>(extensions)?)
}
