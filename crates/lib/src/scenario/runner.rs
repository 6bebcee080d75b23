use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

use crate::{
    config::{RunnerPolicy, ScenarioConfig},
    error::ExtError,
    ledger::Ledger,
    scenario::{Outcome, Scenario, ScenarioReport, ScenarioResult, Verdict},
    token::TokenAccountState,
    transaction::{InstructionUtil, TransactionUtil},
};

/// Everything the scenarios act on. The identity is payer, owner and authority throughout.
pub struct ScenarioContext<'a> {
    pub identity: &'a Keypair,
    pub mint: Pubkey,
    pub decimals: u8,
    pub source: Pubkey,
    pub destination: Pubkey,
    pub mint_amount: u64,
    pub transfer_amount: u64,
    pub memo: String,
}

impl<'a> ScenarioContext<'a> {
    pub fn new(
        identity: &'a Keypair,
        mint: Pubkey,
        decimals: u8,
        source: Pubkey,
        destination: Pubkey,
        config: &ScenarioConfig,
    ) -> Self {
        Self {
            identity,
            mint,
            decimals,
            source,
            destination,
            mint_amount: config.mint_amount,
            transfer_amount: config.transfer_amount,
            memo: config.memo.clone(),
        }
    }
}

type PostCondition = Result<(), String>;

pub struct ScenarioRunner<'a> {
    ledger: &'a dyn Ledger,
    context: ScenarioContext<'a>,
    policy: RunnerPolicy,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(ledger: &'a dyn Ledger, context: ScenarioContext<'a>, policy: RunnerPolicy) -> Self {
        Self { ledger, context, policy }
    }

    /// Run the scenarios in order. Under [`RunnerPolicy::Strict`] the run stops after the
    /// first failing scenario; the report holds every scenario that was executed.
    pub async fn run(&self) -> ScenarioReport {
        let mut report = ScenarioReport::default();

        for scenario in Scenario::ALL {
            let result = self.execute(scenario).await;
            let passed = result.passed();
            report.push(result);

            if !passed && self.policy == RunnerPolicy::Strict {
                log::error!("Stopping after scenario {} under the strict policy", scenario.number());
                break;
            }
        }

        log::info!("{}/{} scenarios passed", report.passed(), Scenario::ALL.len());
        report
    }

    /// Like [`ScenarioRunner::run`], but a failure under the strict policy is an error
    pub async fn run_all(&self) -> Result<ScenarioReport, ExtError> {
        let report = self.run().await;

        if self.policy == RunnerPolicy::Strict {
            if let Some(failure) = report.failures().next() {
                return Err(ExtError::ScenarioFailed(failure.to_string()));
            }
        }
        Ok(report)
    }

    pub async fn execute(&self, scenario: Scenario) -> ScenarioResult {
        let (outcome, post_condition) = match self.perform(scenario).await {
            Ok(performed) => performed,
            Err(e) => (Outcome::Errored(e.to_string()), Ok(())),
        };

        let verdict = Verdict::judge(&scenario.expectation(), &outcome, post_condition);
        let result = ScenarioResult { scenario, outcome, verdict };

        if result.passed() {
            log::info!("{result}");
        } else {
            log::error!("{result}");
        }
        result
    }

    async fn perform(&self, scenario: Scenario) -> Result<(Outcome, PostCondition), ExtError> {
        let ctx = &self.context;
        let identity = ctx.identity.pubkey();

        match scenario {
            Scenario::MintWhileFrozen => {
                let mint_to =
                    InstructionUtil::mint_to(&ctx.mint, &ctx.source, &identity, ctx.mint_amount)?;
                Ok((self.submit(&[mint_to]).await, Ok(())))
            }
            Scenario::ThawAndMint => {
                let before = self.account(&ctx.source).await?;

                let thaw = InstructionUtil::thaw_account(&ctx.source, &ctx.mint, &identity)?;
                let thawed = self.submit(&[thaw]).await;
                if !thawed.is_success() {
                    return Ok((thawed, Ok(())));
                }

                let mint_to =
                    InstructionUtil::mint_to(&ctx.mint, &ctx.source, &identity, ctx.mint_amount)?;
                let outcome = self.submit(&[mint_to]).await;
                if !outcome.is_success() {
                    return Ok((outcome, Ok(())));
                }

                let post = self
                    .check_amount(&ctx.source, before.amount.saturating_add(ctx.mint_amount))
                    .await;
                Ok((outcome, post))
            }
            Scenario::ReassignImmutableOwner => {
                let before = self.account(&ctx.source).await?;
                let new_owner = Pubkey::new_unique();

                let set_owner =
                    InstructionUtil::set_account_owner(&ctx.source, &identity, &new_owner)?;
                let outcome = self.submit(&[set_owner]).await;

                let post = match self.account(&ctx.source).await {
                    Ok(after) if after.owner == before.owner => Ok(()),
                    Ok(after) => Err(format!(
                        "owner of {} changed from {} to {}",
                        ctx.source, before.owner, after.owner
                    )),
                    Err(e) => Err(format!("could not read {}: {e}", ctx.source)),
                };
                Ok((outcome, post))
            }
            Scenario::TransferWithoutMemo => {
                let transfer = self.transfer_instruction()?;
                Ok((self.submit(&[transfer]).await, Ok(())))
            }
            Scenario::MemoOnly => {
                let memo = InstructionUtil::memo(&ctx.memo, &identity);
                Ok((self.submit(&[memo]).await, Ok(())))
            }
            Scenario::TransferToFrozenAccount => {
                let memo = InstructionUtil::memo(&ctx.memo, &identity);
                let transfer = self.transfer_instruction()?;
                Ok((self.submit(&[memo, transfer]).await, Ok(())))
            }
            Scenario::ThawAndTransferWithMemo => {
                let source_before = self.account(&ctx.source).await?;
                let destination_before = self.account(&ctx.destination).await?;

                let thaw = InstructionUtil::thaw_account(&ctx.destination, &ctx.mint, &identity)?;
                let thawed = self.submit(&[thaw]).await;
                if !thawed.is_success() {
                    return Ok((thawed, Ok(())));
                }

                let memo = InstructionUtil::memo(&ctx.memo, &identity);
                let transfer = self.transfer_instruction()?;
                let outcome = self.submit(&[memo, transfer]).await;
                if !outcome.is_success() {
                    return Ok((outcome, Ok(())));
                }

                let source_post = self
                    .check_amount(
                        &ctx.source,
                        source_before.amount.saturating_sub(ctx.transfer_amount),
                    )
                    .await;
                let destination_post = self
                    .check_amount(
                        &ctx.destination,
                        destination_before.amount.saturating_add(ctx.transfer_amount),
                    )
                    .await;
                Ok((outcome, source_post.and(destination_post)))
            }
        }
    }

    fn transfer_instruction(&self) -> Result<Instruction, ExtError> {
        let ctx = &self.context;
        InstructionUtil::transfer_checked(
            &ctx.source,
            &ctx.mint,
            &ctx.destination,
            &ctx.identity.pubkey(),
            ctx.transfer_amount,
            ctx.decimals,
        )
    }

    async fn submit(&self, instructions: &[Instruction]) -> Outcome {
        TransactionUtil::submit(self.ledger, instructions, self.context.identity, &[]).await.into()
    }

    async fn account(&self, address: &Pubkey) -> Result<TokenAccountState, ExtError> {
        TokenAccountState::fetch(self.ledger, address).await
    }

    async fn check_amount(&self, address: &Pubkey, expected: u64) -> PostCondition {
        match self.account(address).await {
            Ok(state) if state.amount == expected => Ok(()),
            Ok(state) => Err(format!("balance of {address} is {}, expected {expected}", state.amount)),
            Err(e) => Err(format!("could not read {address}: {e}")),
        }
    }
}
