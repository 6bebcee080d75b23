use solana_sdk::{
    instruction::Instruction,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::{error::ExtError, ledger::Ledger};

pub struct TransactionUtil {}

impl TransactionUtil {
    /// Sign `instructions` against the latest blockhash with the payer and any extra
    /// signers, then submit and wait for confirmation.
    ///
    /// A ledger rejection comes back as [`ExtError::Rejected`], attributed to the
    /// program of the failing instruction.
    pub async fn submit(
        ledger: &dyn Ledger,
        instructions: &[Instruction],
        payer: &Keypair,
        signers: &[&Keypair],
    ) -> Result<Signature, ExtError> {
        let transaction = Self::build_signed(ledger, instructions, payer, signers).await?;
        ledger.send_and_confirm(&transaction).await.map_err(|e| e.classify(instructions))
    }

    pub async fn build_signed(
        ledger: &dyn Ledger,
        instructions: &[Instruction],
        payer: &Keypair,
        signers: &[&Keypair],
    ) -> Result<Transaction, ExtError> {
        let recent_blockhash = ledger.latest_blockhash().await?;

        let mut keypairs: Vec<&Keypair> = vec![payer];
        for signer in signers {
            if !keypairs.iter().any(|existing| existing.pubkey() == signer.pubkey()) {
                keypairs.push(*signer);
            }
        }

        let mut transaction = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
        transaction.try_sign(keypairs.as_slice(), recent_blockhash)?;
        Ok(transaction)
    }
}
