//! Ordered instruction batches for creating token-2022 mints and accounts.
//!
//! The token program only accepts extensions in a particular order relative to the core
//! initialization instruction. Both builders carry a stage marker so that a batch in the
//! wrong order does not type check:
//!
//! ```rust,ignore
//! let instructions = MintInstructions::create_account(&payer, &mint, lamports, space)
//!     .initialize_default_account_state(AccountState::Frozen)?
//!     .initialize_mint(9, &payer, Some(&payer))?
//!     .finish()?;
//! ```

use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use solana_system_interface::instruction::create_account;
use spl_token_2022_interface::{
    extension::{
        cpi_guard::instruction::enable_cpi_guard,
        default_account_state::instruction::initialize_default_account_state,
        memo_transfer::instruction::enable_required_transfer_memos, ExtensionType,
    },
    instruction::{initialize_account3, initialize_immutable_owner, initialize_mint2},
    state::AccountState,
};
use std::marker::PhantomData;

use crate::{
    error::ExtError,
    token::layout::{account_len, mint_len},
};

/// Account space is allocated but the core state is not initialized yet
#[derive(Debug)]
pub struct Allocated;

/// Core state is initialized
#[derive(Debug)]
pub struct Initialized;

#[derive(Debug)]
pub struct MintInstructions<Stage> {
    mint: Pubkey,
    space: usize,
    default_state: Option<AccountState>,
    extensions: Vec<ExtensionType>,
    instructions: Vec<Instruction>,
    _stage: PhantomData<Stage>,
}

impl MintInstructions<Allocated> {
    pub fn create_account(payer: &Pubkey, mint: &Pubkey, lamports: u64, space: usize) -> Self {
        let instruction = create_account(
            payer,
            mint,
            lamports,
            space as u64,
            &spl_token_2022_interface::id(),
        );

        Self {
            mint: *mint,
            space,
            default_state: None,
            extensions: Vec::new(),
            instructions: vec![instruction],
            _stage: PhantomData,
        }
    }

    pub fn initialize_default_account_state(
        mut self,
        state: AccountState,
    ) -> Result<Self, ExtError> {
        let instruction =
            initialize_default_account_state(&spl_token_2022_interface::id(), &self.mint, &state)?;
        self.instructions.push(instruction);
        self.extensions.push(ExtensionType::DefaultAccountState);
        self.default_state = Some(state);
        Ok(self)
    }

    pub fn initialize_mint(
        mut self,
        decimals: u8,
        mint_authority: &Pubkey,
        freeze_authority: Option<&Pubkey>,
    ) -> Result<MintInstructions<Initialized>, ExtError> {
        if self.default_state == Some(AccountState::Frozen) && freeze_authority.is_none() {
            return Err(ExtError::InvalidTransaction(
                "a mint whose accounts start frozen needs a freeze authority".to_string(),
            ));
        }

        let instruction = initialize_mint2(
            &spl_token_2022_interface::id(),
            &self.mint,
            mint_authority,
            freeze_authority,
            decimals,
        )?;
        self.instructions.push(instruction);

        Ok(MintInstructions {
            mint: self.mint,
            space: self.space,
            default_state: self.default_state,
            extensions: self.extensions,
            instructions: self.instructions,
            _stage: PhantomData,
        })
    }
}

impl MintInstructions<Initialized> {
    /// The program rejects a mint whose data length differs from the length its extensions need
    pub fn finish(self) -> Result<Vec<Instruction>, ExtError> {
        let required = mint_len(&self.extensions)?;
        if required != self.space {
            return Err(ExtError::InvalidTransaction(format!(
                "mint {} allocates {} bytes but its extensions need exactly {}",
                self.mint, self.space, required
            )));
        }
        Ok(self.instructions)
    }
}

#[derive(Debug)]
pub struct TokenAccountInstructions<Stage> {
    account: Pubkey,
    owner: Option<Pubkey>,
    space: usize,
    extensions: Vec<ExtensionType>,
    instructions: Vec<Instruction>,
    _stage: PhantomData<Stage>,
}

impl<Stage> TokenAccountInstructions<Stage> {
    fn push_extension(&mut self, extension: ExtensionType, instruction: Instruction) {
        self.instructions.push(instruction);
        self.extensions.push(extension);
    }
}

impl TokenAccountInstructions<Allocated> {
    pub fn create_account(payer: &Pubkey, account: &Pubkey, lamports: u64, space: usize) -> Self {
        let instruction = create_account(
            payer,
            account,
            lamports,
            space as u64,
            &spl_token_2022_interface::id(),
        );

        Self {
            account: *account,
            owner: None,
            space,
            extensions: Vec::new(),
            instructions: vec![instruction],
            _stage: PhantomData,
        }
    }

    pub fn initialize_immutable_owner(mut self) -> Result<Self, ExtError> {
        let instruction =
            initialize_immutable_owner(&spl_token_2022_interface::id(), &self.account)?;
        self.push_extension(ExtensionType::ImmutableOwner, instruction);
        Ok(self)
    }

    pub fn initialize_account(
        mut self,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<TokenAccountInstructions<Initialized>, ExtError> {
        let instruction =
            initialize_account3(&spl_token_2022_interface::id(), &self.account, mint, owner)?;
        self.instructions.push(instruction);

        Ok(TokenAccountInstructions {
            account: self.account,
            owner: Some(*owner),
            space: self.space,
            extensions: self.extensions,
            instructions: self.instructions,
            _stage: PhantomData,
        })
    }
}

impl TokenAccountInstructions<Initialized> {
    fn owner(&self) -> Result<Pubkey, ExtError> {
        self.owner.ok_or_else(|| {
            ExtError::InternalError(format!("token account {} has no owner", self.account))
        })
    }

    pub fn enable_required_transfer_memos(mut self) -> Result<Self, ExtError> {
        let owner = self.owner()?;
        let instruction = enable_required_transfer_memos(
            &spl_token_2022_interface::id(),
            &self.account,
            &owner,
            &[],
        )?;
        self.push_extension(ExtensionType::MemoTransfer, instruction);
        Ok(self)
    }

    pub fn enable_cpi_guard(mut self) -> Result<Self, ExtError> {
        let owner = self.owner()?;
        let instruction =
            enable_cpi_guard(&spl_token_2022_interface::id(), &self.account, &owner, &[])?;
        self.push_extension(ExtensionType::CpiGuard, instruction);
        Ok(self)
    }

    pub fn finish(self) -> Result<Vec<Instruction>, ExtError> {
        let required = account_len(&self.extensions)?;
        if required > self.space {
            return Err(ExtError::InvalidTransaction(format!(
                "token account {} allocates {} bytes but its extensions need {}",
                self.account, self.space, required
            )));
        }
        Ok(self.instructions)
    }
}
