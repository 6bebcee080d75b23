use solana_sdk::pubkey::Pubkey;
use spl_token_2022_interface::{
    extension::{
        cpi_guard::CpiGuard, default_account_state::DefaultAccountState,
        memo_transfer::MemoTransfer, BaseStateWithExtensions, ExtensionType, StateWithExtensions,
    },
    state::{Account as Token2022AccountState, AccountState, Mint as Token2022MintState},
};
use std::fmt;

use crate::{config::DefaultState, error::ExtError, ledger::Ledger};

/// Decoded token-2022 mint
#[derive(Debug, Clone, PartialEq)]
pub struct MintState {
    pub decimals: u8,
    pub supply: u64,
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
    /// `None` when the mint has no default account state extension
    pub default_state: Option<DefaultState>,
    pub extensions: Vec<ExtensionType>,
}

impl MintState {
    pub fn unpack(data: &[u8]) -> Result<Self, ExtError> {
        let state = StateWithExtensions::<Token2022MintState>::unpack(data)?;
        let extensions = state.get_extension_types()?;

        let default_state = match state.get_extension::<DefaultAccountState>() {
            Ok(extension) => {
                let account_state = AccountState::try_from(extension.state).map_err(|_| {
                    ExtError::InvalidAccountData(format!(
                        "unknown default account state {}",
                        extension.state
                    ))
                })?;
                DefaultState::from_account_state(account_state)
            }
            Err(_) => None,
        };

        Ok(Self {
            decimals: state.base.decimals,
            supply: state.base.supply,
            mint_authority: state.base.mint_authority.into(),
            freeze_authority: state.base.freeze_authority.into(),
            default_state,
            extensions,
        })
    }

    pub async fn fetch(ledger: &dyn Ledger, mint: &Pubkey) -> Result<Self, ExtError> {
        let data = ledger.account_data(mint).await?;
        Self::unpack(&data)
    }
}

/// Decoded token-2022 account with the extension flags this crate provisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccountState {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub frozen: bool,
    pub immutable_owner: bool,
    pub memo_required: bool,
    pub cpi_guard: bool,
}

impl TokenAccountState {
    pub fn unpack(data: &[u8]) -> Result<Self, ExtError> {
        let state = StateWithExtensions::<Token2022AccountState>::unpack(data)?;
        let extensions = state.get_extension_types()?;

        let memo_required = state
            .get_extension::<MemoTransfer>()
            .map(|extension| bool::from(extension.require_incoming_transfer_memos))
            .unwrap_or(false);
        let cpi_guard = state
            .get_extension::<CpiGuard>()
            .map(|extension| bool::from(extension.lock_cpi))
            .unwrap_or(false);

        Ok(Self {
            mint: state.base.mint,
            owner: state.base.owner,
            amount: state.base.amount,
            frozen: state.base.state == AccountState::Frozen,
            immutable_owner: extensions.contains(&ExtensionType::ImmutableOwner),
            memo_required,
            cpi_guard,
        })
    }

    pub async fn fetch(ledger: &dyn Ledger, account: &Pubkey) -> Result<Self, ExtError> {
        let data = ledger.account_data(account).await?;
        Self::unpack(&data)
    }
}

impl fmt::Display for MintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "decimals:          {}", self.decimals)?;
        writeln!(f, "supply:            {}", self.supply)?;
        writeln!(f, "mint authority:    {}", display_authority(&self.mint_authority))?;
        writeln!(f, "freeze authority:  {}", display_authority(&self.freeze_authority))?;
        let default_state = match self.default_state {
            Some(DefaultState::Frozen) => "frozen",
            Some(DefaultState::Thawed) => "thawed",
            None => "none",
        };
        write!(f, "default state:     {default_state}")
    }
}

impl fmt::Display for TokenAccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mint:              {}", self.mint)?;
        writeln!(f, "owner:             {}", self.owner)?;
        writeln!(f, "amount:            {}", self.amount)?;
        writeln!(f, "state:             {}", if self.frozen { "frozen" } else { "thawed" })?;
        writeln!(f, "immutable owner:   {}", self.immutable_owner)?;
        writeln!(f, "memo required:     {}", self.memo_required)?;
        write!(f, "cpi guard:         {}", self.cpi_guard)
    }
}

fn display_authority(authority: &Option<Pubkey>) -> String {
    authority.map(|key| key.to_string()).unwrap_or_else(|| "none".to_string())
}
