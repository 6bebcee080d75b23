use std::fmt;

use crate::{error::Rejection, scenario::Outcome};

/// The fixed sequence of extension checks, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    MintWhileFrozen,
    ThawAndMint,
    ReassignImmutableOwner,
    TransferWithoutMemo,
    MemoOnly,
    TransferToFrozenAccount,
    ThawAndTransferWithMemo,
}

impl Scenario {
    pub const ALL: [Scenario; 7] = [
        Scenario::MintWhileFrozen,
        Scenario::ThawAndMint,
        Scenario::ReassignImmutableOwner,
        Scenario::TransferWithoutMemo,
        Scenario::MemoOnly,
        Scenario::TransferToFrozenAccount,
        Scenario::ThawAndTransferWithMemo,
    ];

    pub fn number(&self) -> usize {
        match self {
            Scenario::MintWhileFrozen => 1,
            Scenario::ThawAndMint => 2,
            Scenario::ReassignImmutableOwner => 3,
            Scenario::TransferWithoutMemo => 4,
            Scenario::MemoOnly => 5,
            Scenario::TransferToFrozenAccount => 6,
            Scenario::ThawAndTransferWithMemo => 7,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::MintWhileFrozen => "mint into a frozen source account",
            Scenario::ThawAndMint => "thaw the source account, then mint",
            Scenario::ReassignImmutableOwner => "reassign the owner of the source account",
            Scenario::TransferWithoutMemo => "transfer without a memo",
            Scenario::MemoOnly => "memo instruction alone",
            Scenario::TransferToFrozenAccount => "transfer with memo into a frozen account",
            Scenario::ThawAndTransferWithMemo => "thaw the destination, then transfer with memo",
        }
    }

    pub fn expectation(&self) -> Expectation {
        match self {
            Scenario::MintWhileFrozen | Scenario::TransferToFrozenAccount => {
                Expectation::Reject(vec![Rejection::AccountFrozen])
            }
            Scenario::ReassignImmutableOwner => Expectation::Reject(vec![Rejection::ImmutableOwner]),
            // The destination is still frozen here and the frozen check runs before the memo check
            Scenario::TransferWithoutMemo => {
                Expectation::Reject(vec![Rejection::MemoRequired, Rejection::AccountFrozen])
            }
            Scenario::ThawAndMint | Scenario::MemoOnly | Scenario::ThawAndTransferWithMemo => {
                Expectation::Succeed
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Succeed,
    /// Rejected for one of the listed reasons
    Reject(Vec<Rejection>),
}

impl Expectation {
    pub fn matches(&self, outcome: &Outcome) -> bool {
        match (self, outcome) {
            (Expectation::Succeed, Outcome::Succeeded(_)) => true,
            (Expectation::Reject(accepted), Outcome::Rejected(rejection)) => {
                accepted.contains(rejection)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Succeed => write!(f, "success"),
            Expectation::Reject(accepted) => {
                let reasons: Vec<String> = accepted.iter().map(ToString::to_string).collect();
                write!(f, "rejection ({})", reasons.join(" or "))
            }
        }
    }
}
