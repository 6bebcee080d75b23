use solana_sdk::signature::Signature;
use std::fmt;

use crate::{
    error::{ExtError, Rejection},
    scenario::{Expectation, Scenario},
};

/// What the ledger did with a scenario's transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded(Signature),
    Rejected(Rejection),
    /// Transport failure or a local error before anything reached the ledger
    Errored(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

impl From<Result<Signature, ExtError>> for Outcome {
    fn from(result: Result<Signature, ExtError>) -> Self {
        match result {
            Ok(signature) => Outcome::Succeeded(signature),
            Err(ExtError::Rejected(rejection)) => Outcome::Rejected(rejection),
            Err(e) => Outcome::Errored(e.to_string()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Succeeded(signature) => write!(f, "succeeded ({signature})"),
            Outcome::Rejected(rejection) => write!(f, "rejected: {rejection}"),
            Outcome::Errored(message) => write!(f, "errored: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
}

impl Verdict {
    /// Compare an outcome with its expectation, then apply the post-condition check
    pub fn judge(
        expectation: &Expectation,
        outcome: &Outcome,
        post_condition: Result<(), String>,
    ) -> Self {
        if !expectation.matches(outcome) {
            return Verdict::Fail(format!("expected {expectation}, got {outcome}"));
        }
        match post_condition {
            Ok(()) => Verdict::Pass,
            Err(reason) => Verdict::Fail(reason),
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub outcome: Outcome,
    pub verdict: Verdict,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.verdict.passed()
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            Verdict::Pass => write!(f, "[PASS] {}: {}", self.scenario, self.outcome),
            Verdict::Fail(reason) => write!(f, "[FAIL] {}: {reason}", self.scenario),
        }
    }
}

/// Results of the scenarios that were executed, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioReport {
    pub results: Vec<ScenarioResult>,
}

impl ScenarioReport {
    pub fn push(&mut self, result: ScenarioResult) {
        self.results.push(result);
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|result| result.passed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|result| !result.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(ScenarioResult::passed)
    }

    /// True when every scenario ran, whatever the verdicts
    pub fn is_complete(&self) -> bool {
        self.results.len() == Scenario::ALL.len()
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "{result}")?;
        }
        write!(
            f,
            "{}/{} scenarios passed ({} of {} executed)",
            self.passed(),
            Scenario::ALL.len(),
            self.results.len(),
            Scenario::ALL.len()
        )
    }
}
