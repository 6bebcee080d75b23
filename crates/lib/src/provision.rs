use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};

use crate::{
    config::DefaultState,
    error::ExtError,
    ledger::Ledger,
    token::{
        account_len, mint_len, MintInstructions, TokenAccountInstructions, MINT_EXTENSIONS,
        TOKEN_ACCOUNT_EXTENSIONS,
    },
    transaction::TransactionUtil,
};

/// Creates token-2022 mints carrying the default account state extension
pub struct MintProvisioner;

impl MintProvisioner {
    /// Create `mint` in one transaction paid by `authority`, which also becomes the mint
    /// and freeze authority.
    pub async fn provision(
        ledger: &dyn Ledger,
        authority: &Keypair,
        mint: &Keypair,
        decimals: u8,
        default_state: DefaultState,
    ) -> Result<Signature, ExtError> {
        let space = mint_len(MINT_EXTENSIONS)?;
        let lamports = ledger.minimum_balance_for_rent_exemption(space).await?;
        let authority_pubkey = authority.pubkey();

        let instructions =
            MintInstructions::create_account(&authority_pubkey, &mint.pubkey(), lamports, space)
                .initialize_default_account_state(default_state.as_account_state())?
                .initialize_mint(decimals, &authority_pubkey, Some(&authority_pubkey))?
                .finish()?;

        let signature =
            TransactionUtil::submit(ledger, &instructions, authority, &[mint]).await?;
        log::info!(
            "Created mint {} (decimals {decimals}, default state {default_state:?}): {signature}",
            mint.pubkey()
        );
        Ok(signature)
    }
}

/// Creates token-2022 accounts with immutable owner, required memos and CPI guard
pub struct TokenAccountProvisioner;

impl TokenAccountProvisioner {
    /// Create `account` for `mint`, owned by and paid for by `owner`
    pub async fn provision(
        ledger: &dyn Ledger,
        owner: &Keypair,
        account: &Keypair,
        mint: &Pubkey,
    ) -> Result<Signature, ExtError> {
        let space = account_len(TOKEN_ACCOUNT_EXTENSIONS)?;
        let lamports = ledger.minimum_balance_for_rent_exemption(space).await?;

        let instructions = TokenAccountInstructions::create_account(
            &owner.pubkey(),
            &account.pubkey(),
            lamports,
            space,
        )
        .initialize_immutable_owner()?
        .initialize_account(mint, &owner.pubkey())?
        .enable_required_transfer_memos()?
        .enable_cpi_guard()?
        .finish()?;

        let signature = TransactionUtil::submit(ledger, &instructions, owner, &[account]).await?;
        log::info!("Created token account {} for mint {mint}: {signature}", account.pubkey());
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Rejection, ledger::MockLedger};
    use solana_sdk::{
        hash::Hash,
        instruction::InstructionError,
        transaction::{Transaction, TransactionError},
    };
    use solana_system_interface::error::SystemError;
    use std::sync::{Arc, Mutex};

    const RENT: u64 = 2_500_000;

    fn recording_ledger(expected_space: usize) -> (MockLedger, Arc<Mutex<Option<Transaction>>>) {
        let submitted = Arc::new(Mutex::new(None));
        let recorder = submitted.clone();

        let mut ledger = MockLedger::new();
        ledger
            .expect_minimum_balance_for_rent_exemption()
            .withf(move |len| *len == expected_space)
            .times(1)
            .returning(|_| Ok(RENT));
        ledger.expect_latest_blockhash().returning(|| Ok(Hash::new_unique()));
        ledger.expect_send_and_confirm().times(1).returning(move |transaction| {
            *recorder.lock().unwrap() = Some(transaction.clone());
            Ok(transaction.signatures[0])
        });
        (ledger, submitted)
    }

    #[tokio::test]
    async fn test_mint_transaction_layout() {
        let authority = Keypair::new();
        let mint = Keypair::new();
        let space = mint_len(MINT_EXTENSIONS).unwrap();
        let (ledger, submitted) = recording_ledger(space);

        MintProvisioner::provision(&ledger, &authority, &mint, 9, DefaultState::Frozen)
            .await
            .unwrap();

        let transaction = submitted.lock().unwrap().take().unwrap();
        assert!(transaction.is_signed());
        assert_eq!(transaction.message.account_keys[0], authority.pubkey());
        assert!(transaction.message.account_keys.contains(&mint.pubkey()));

        let programs: Vec<_> = transaction
            .message
            .instructions
            .iter()
            .map(|ix| transaction.message.account_keys[ix.program_id_index as usize])
            .collect();
        assert_eq!(
            programs,
            vec![
                solana_system_interface::program::id(),
                spl_token_2022_interface::id(),
                spl_token_2022_interface::id(),
            ]
        );
    }

    #[tokio::test]
    async fn test_token_account_transaction_layout() {
        let owner = Keypair::new();
        let account = Keypair::new();
        let space = account_len(TOKEN_ACCOUNT_EXTENSIONS).unwrap();
        let (ledger, submitted) = recording_ledger(space);

        TokenAccountProvisioner::provision(&ledger, &owner, &account, &Pubkey::new_unique())
            .await
            .unwrap();

        let transaction = submitted.lock().unwrap().take().unwrap();
        assert!(transaction.is_signed());
        assert_eq!(transaction.message.instructions.len(), 5);
        assert_eq!(transaction.signatures.len(), 2);
    }

    #[tokio::test]
    async fn test_existing_account_is_classified() {
        let owner = Keypair::new();
        let account = Keypair::new();

        let mut ledger = MockLedger::new();
        ledger.expect_minimum_balance_for_rent_exemption().returning(|_| Ok(RENT));
        ledger.expect_latest_blockhash().returning(|| Ok(Hash::new_unique()));
        ledger.expect_send_and_confirm().returning(|_| {
            Err(ExtError::TransactionFailed(TransactionError::InstructionError(
                0,
                InstructionError::Custom(SystemError::AccountAlreadyInUse as u32),
            )))
        });

        let result =
            TokenAccountProvisioner::provision(&ledger, &owner, &account, &Pubkey::new_unique())
                .await;
        assert_eq!(result, Err(ExtError::Rejected(Rejection::AccountAlreadyInUse)));
    }

    #[tokio::test]
    async fn test_rent_query_failure_stops_before_submission() {
        let mut ledger = MockLedger::new();
        ledger
            .expect_minimum_balance_for_rent_exemption()
            .returning(|_| Err(ExtError::RpcError("timeout".to_string())));
        ledger.expect_send_and_confirm().never();

        let result = MintProvisioner::provision(
            &ledger,
            &Keypair::new(),
            &Keypair::new(),
            9,
            DefaultState::Frozen,
        )
        .await;
        assert!(matches!(result, Err(ExtError::RpcError(_))));
    }
}
