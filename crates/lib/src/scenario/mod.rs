mod outcome;
mod runner;
mod scenario;

pub use outcome::{Outcome, ScenarioReport, ScenarioResult, Verdict};
pub use runner::{ScenarioContext, ScenarioRunner};
pub use scenario::{Expectation, Scenario};
