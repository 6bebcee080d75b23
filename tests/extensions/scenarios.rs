use crate::common::{LabTestContext, TEST_MINT_DECIMALS};
use extlab_lib::{
    config::{DefaultState, RunnerPolicy},
    error::Rejection,
    provision::{MintProvisioner, TokenAccountProvisioner},
    scenario::{Outcome, Scenario, ScenarioContext, ScenarioRunner},
    token::TokenAccountState,
};
use solana_sdk::signature::{Keypair, Signer};

struct ProvisionedLab {
    mint: Keypair,
    source: Keypair,
    destination: Keypair,
}

async fn provision_lab(ctx: &LabTestContext) -> ProvisionedLab {
    let lab = ProvisionedLab {
        mint: Keypair::new(),
        source: Keypair::new(),
        destination: Keypair::new(),
    };

    MintProvisioner::provision(
        &ctx.ledger,
        &ctx.identity,
        &lab.mint,
        TEST_MINT_DECIMALS,
        DefaultState::Frozen,
    )
    .await
    .expect("Failed to provision mint");

    for account in [&lab.source, &lab.destination] {
        TokenAccountProvisioner::provision(
            &ctx.ledger,
            &ctx.identity,
            account,
            &lab.mint.pubkey(),
        )
        .await
        .expect("Failed to provision token account");
    }

    lab
}

fn context<'a>(ctx: &'a LabTestContext, lab: &ProvisionedLab) -> ScenarioContext<'a> {
    ScenarioContext::new(
        &ctx.identity,
        lab.mint.pubkey(),
        TEST_MINT_DECIMALS,
        lab.source.pubkey(),
        lab.destination.pubkey(),
        &ctx.config.scenario,
    )
}

#[tokio::test]
#[ignore = "requires a local validator"]
async fn test_full_scenario_sequence_passes() {
    let ctx = LabTestContext::new().await.expect("Failed to create test context");
    let lab = provision_lab(&ctx).await;

    let runner = ScenarioRunner::new(&ctx.ledger, context(&ctx, &lab), RunnerPolicy::Strict);
    let report = runner.run_all().await.expect("Scenario sequence failed");

    assert!(report.all_passed(), "{report}");
    assert!(report.is_complete());

    let source = TokenAccountState::fetch(&ctx.ledger, &lab.source.pubkey())
        .await
        .expect("Failed to fetch source");
    let destination = TokenAccountState::fetch(&ctx.ledger, &lab.destination.pubkey())
        .await
        .expect("Failed to fetch destination");

    let scenario = &ctx.config.scenario;
    assert_eq!(source.amount, scenario.mint_amount - scenario.transfer_amount);
    assert_eq!(destination.amount, scenario.transfer_amount);
    assert!(!source.frozen);
    assert!(!destination.frozen);
    assert_eq!(source.owner, ctx.identity_pubkey());
}

#[tokio::test]
#[ignore = "requires a local validator"]
async fn test_transfer_without_memo_is_rejected_once_thawed() {
    let ctx = LabTestContext::new().await.expect("Failed to create test context");
    let lab = provision_lab(&ctx).await;
    let runner = ScenarioRunner::new(&ctx.ledger, context(&ctx, &lab), RunnerPolicy::Lenient);

    for scenario in [Scenario::ThawAndMint, Scenario::ThawAndTransferWithMemo] {
        let result = runner.execute(scenario).await;
        assert!(result.passed(), "{result}");
    }

    let result = runner.execute(Scenario::TransferWithoutMemo).await;
    assert!(result.passed(), "{result}");
    assert_eq!(result.outcome, Outcome::Rejected(Rejection::MemoRequired));
}
