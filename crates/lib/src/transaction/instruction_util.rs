use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use spl_token_2022_interface::instruction::{
    mint_to, set_authority, thaw_account, transfer_checked, AuthorityType,
};

use crate::{constant::MEMO_PROGRAM_ID, error::ExtError};

/// Token-2022 and memo instructions used by the scenarios
pub struct InstructionUtil;

impl InstructionUtil {
    /// A memo program instruction carrying `text` as UTF-8, signed by `signer`
    pub fn memo(text: &str, signer: &Pubkey) -> Instruction {
        Instruction {
            program_id: MEMO_PROGRAM_ID,
            accounts: vec![AccountMeta::new_readonly(*signer, true)],
            data: text.as_bytes().to_vec(),
        }
    }

    pub fn mint_to(
        mint: &Pubkey,
        account: &Pubkey,
        mint_authority: &Pubkey,
        amount: u64,
    ) -> Result<Instruction, ExtError> {
        Ok(mint_to(&spl_token_2022_interface::id(), mint, account, mint_authority, &[], amount)?)
    }

    pub fn thaw_account(
        account: &Pubkey,
        mint: &Pubkey,
        freeze_authority: &Pubkey,
    ) -> Result<Instruction, ExtError> {
        Ok(thaw_account(&spl_token_2022_interface::id(), account, mint, freeze_authority, &[])?)
    }

    /// Reassign the owner of a token account
    pub fn set_account_owner(
        account: &Pubkey,
        current_owner: &Pubkey,
        new_owner: &Pubkey,
    ) -> Result<Instruction, ExtError> {
        Ok(set_authority(
            &spl_token_2022_interface::id(),
            account,
            Some(new_owner),
            AuthorityType::AccountOwner,
            current_owner,
            &[],
        )?)
    }

    pub fn transfer_checked(
        source: &Pubkey,
        mint: &Pubkey,
        destination: &Pubkey,
        authority: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<Instruction, ExtError> {
        Ok(transfer_checked(
            &spl_token_2022_interface::id(),
            source,
            mint,
            destination,
            authority,
            &[],
            amount,
            decimals,
        )?)
    }
}
