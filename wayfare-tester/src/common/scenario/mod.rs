use anyhow::{Result, bail};
use std::time::{Duration, Instant};
use thirtyfour::prelude::*;

use crate::browser::{WizardBridge, WizardSnapshot};
use crate::logic::checks::{self, BookingCheck};

pub mod happy_path;
pub mod smoke;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub seed: u64,
    pub bridge: WizardBridge<'a>,
    pub verbose: bool,
}

impl ScenarioCtx<'_> {
    /// Base URL with the run seed pinned so the grid replays.
    pub fn seeded_url(&self) -> String {
        seeded_url(&self.base_url, self.seed)
    }

    /// Poll the bridge until `done` holds or `timeout` passes.
    pub async fn wait_for(
        &self,
        what: &str,
        timeout: Duration,
        done: impl Fn(&WizardSnapshot) -> bool + Send,
    ) -> Result<WizardSnapshot> {
        let started = Instant::now();
        loop {
            let snapshot = self.bridge.state().await?;
            if done(&snapshot) {
                return Ok(snapshot);
            }
            if started.elapsed() >= timeout {
                bail!("timed out after {timeout:?} waiting for {what}; last state {snapshot:?}");
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// Poll the DOM until `css` matches.
pub async fn wait_for_element(driver: &WebDriver, css: &str, timeout: Duration) -> Result<WebElement> {
    let started = Instant::now();
    loop {
        if let Some(element) = driver.find_all(By::Css(css)).await?.into_iter().next() {
            return Ok(element);
        }
        if started.elapsed() >= timeout {
            bail!("timed out after {timeout:?} waiting for {css}");
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

fn seeded_url(base: &str, seed: u64) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}seed={seed}")
}

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: BookingCheck,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, check: BookingCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// Scenario with only a logic check.
#[derive(Debug, Clone, Copy)]
pub struct LogicScenario {
    name: &'static str,
    check: BookingCheck,
}

#[async_trait::async_trait]
impl BrowserScenario for LogicScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        bail!("{} has no browser flow", self.name)
    }
}

impl CombinedScenario for LogicScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(self.name, self.check))
    }
}

/// Key, display name and check for every registered scenario.
const CATALOG: [(&str, &str, BookingCheck); 11] = [
    ("smoke", smoke::NAME, checks::smoke),
    ("happy-path", happy_path::NAME, checks::happy_path),
    ("step-gating", "Step Gating", checks::step_gating),
    ("seat-budget", "Seat Budget", checks::seat_budget),
    ("seat-toggle", "Seat Toggle", checks::seat_toggle),
    ("grid-cardinality", "Seat Grid Cardinality", checks::grid_cardinality),
    ("occupied-seat", "Occupied Seat Clicks", checks::occupied_seat),
    ("passenger-removal", "Passenger Removal", checks::passenger_removal),
    ("submission-failure", "Submission Failure and Retry", checks::submission_failure),
    ("cabin-filter", "Cabin Filter", checks::cabin_filter),
    ("card-format", "Card Number Formatting", checks::card_format),
];

pub fn scenario_keys() -> Vec<&'static str> {
    CATALOG.iter().map(|(key, _, _)| *key).collect()
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "happy-path" | "happy" => Some(Box::new(happy_path::HappyPathScenario)),
        other => CATALOG
            .iter()
            .find(|(key, _, _)| *key == other)
            .map(|&(_, name, check)| {
                Box::new(LogicScenario { name, check }) as Box<dyn CombinedScenario + Send + Sync>
            }),
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOG.iter().map(|(key, name, _)| (*key, *name)).collect()
}
