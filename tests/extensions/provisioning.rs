use crate::common::{LabTestContext, TEST_MINT_DECIMALS};
use extlab_lib::{
    config::DefaultState,
    error::{ExtError, Rejection},
    provision::{MintProvisioner, TokenAccountProvisioner},
    token::{MintState, TokenAccountState, MINT_EXTENSIONS},
};
use solana_sdk::signature::{Keypair, Signer};

#[tokio::test]
#[ignore = "requires a local validator"]
async fn test_frozen_default_mint_round_trip() {
    let ctx = LabTestContext::new().await.expect("Failed to create test context");
    let mint = Keypair::new();

    MintProvisioner::provision(
        &ctx.ledger,
        &ctx.identity,
        &mint,
        TEST_MINT_DECIMALS,
        DefaultState::Frozen,
    )
    .await
    .expect("Failed to provision mint");

    let state = MintState::fetch(&ctx.ledger, &mint.pubkey()).await.expect("Failed to fetch mint");
    assert_eq!(state.decimals, TEST_MINT_DECIMALS);
    assert_eq!(state.supply, 0);
    assert_eq!(state.mint_authority, Some(ctx.identity_pubkey()));
    assert_eq!(state.freeze_authority, Some(ctx.identity_pubkey()));
    assert_eq!(state.default_state, Some(DefaultState::Frozen));
    assert_eq!(state.extensions, MINT_EXTENSIONS.to_vec());
}

#[tokio::test]
#[ignore = "requires a local validator"]
async fn test_accounts_start_frozen_with_every_extension() {
    let ctx = LabTestContext::new().await.expect("Failed to create test context");
    let mint = Keypair::new();
    let account = Keypair::new();

    MintProvisioner::provision(
        &ctx.ledger,
        &ctx.identity,
        &mint,
        TEST_MINT_DECIMALS,
        DefaultState::Frozen,
    )
    .await
    .expect("Failed to provision mint");
    TokenAccountProvisioner::provision(&ctx.ledger, &ctx.identity, &account, &mint.pubkey())
        .await
        .expect("Failed to provision token account");

    let first = TokenAccountState::fetch(&ctx.ledger, &account.pubkey())
        .await
        .expect("Failed to fetch token account");
    assert_eq!(first.mint, mint.pubkey());
    assert_eq!(first.owner, ctx.identity_pubkey());
    assert_eq!(first.amount, 0);
    assert!(first.frozen);
    assert!(first.immutable_owner);
    assert!(first.memo_required);
    assert!(first.cpi_guard);

    let second = TokenAccountState::fetch(&ctx.ledger, &account.pubkey())
        .await
        .expect("Failed to fetch token account");
    assert_eq!(first, second);
}

#[tokio::test]
#[ignore = "requires a local validator"]
async fn test_thawed_default_mint_creates_usable_accounts() {
    let ctx = LabTestContext::new().await.expect("Failed to create test context");
    let mint = Keypair::new();
    let account = Keypair::new();

    MintProvisioner::provision(&ctx.ledger, &ctx.identity, &mint, 2, DefaultState::Thawed)
        .await
        .expect("Failed to provision mint");
    TokenAccountProvisioner::provision(&ctx.ledger, &ctx.identity, &account, &mint.pubkey())
        .await
        .expect("Failed to provision token account");

    let mint_state =
        MintState::fetch(&ctx.ledger, &mint.pubkey()).await.expect("Failed to fetch mint");
    assert_eq!(mint_state.decimals, 2);
    assert_eq!(mint_state.default_state, Some(DefaultState::Thawed));

    let account_state = TokenAccountState::fetch(&ctx.ledger, &account.pubkey())
        .await
        .expect("Failed to fetch token account");
    assert!(!account_state.frozen);
}

#[tokio::test]
#[ignore = "requires a local validator"]
async fn test_provisioning_an_existing_mint_is_rejected() {
    let ctx = LabTestContext::new().await.expect("Failed to create test context");
    let mint = Keypair::new();

    MintProvisioner::provision(
        &ctx.ledger,
        &ctx.identity,
        &mint,
        TEST_MINT_DECIMALS,
        DefaultState::Frozen,
    )
    .await
    .expect("Failed to provision mint");

    let result = MintProvisioner::provision(
        &ctx.ledger,
        &ctx.identity,
        &mint,
        TEST_MINT_DECIMALS,
        DefaultState::Frozen,
    )
    .await;

    match result {
        Err(ExtError::Rejected(rejection)) => assert_eq!(rejection, Rejection::AccountAlreadyInUse),
        other => panic!("Expected AccountAlreadyInUse, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires a local validator"]
async fn test_inspecting_a_missing_account_fails() {
    let ctx = LabTestContext::new().await.expect("Failed to create test context");

    let result = TokenAccountState::fetch(&ctx.ledger, &Keypair::new().pubkey()).await;
    assert!(matches!(result, Err(ExtError::AccountNotFound(_))));
}
