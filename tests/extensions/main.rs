// Token-2022 Extension Integration Tests
//
// REQUIRES: a local validator at RPC_URL (default http://127.0.0.1:8899) with airdrops enabled
// RUN:      cargo test -p tests --test extensions -- --ignored
// TESTS:    Provisioning and the extension scenarios against a live ledger
//           - Mint layout with the default account state extension
//           - Token accounts with immutable owner, required memos and CPI guard
//           - The full scenario sequence and its final balances

mod provisioning;
mod scenarios;

#[path = "../src/common/mod.rs"]
mod common;
