use anyhow::{Result, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;
use wayfare_booking::WizardStep;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use crate::logic::checks;

pub const NAME: &str = "Smoke Test";

pub struct SmokeScenario;

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.seeded_url()).await?;

        let heading = driver
            .find(By::Css("[data-testid='wizard-heading']"))
            .await?
            .text()
            .await?;
        ensure!(
            heading.ends_with("Booking"),
            "unexpected wizard heading {heading:?}"
        );
        driver
            .find(By::Css("[data-testid='step-passengers']"))
            .await?;

        ctx.bridge.ensure_available().await?;
        let state = ctx
            .wait_for("bridge snapshot", Duration::from_secs(2), |s| {
                s.is_at(WizardStep::PassengerDetails)
            })
            .await?;
        if ctx.verbose {
            println!("  🌐 Wizard loaded, bridge connected: {state:?}");
        }

        ensure!(state.passengers == 1, "expected one passenger, got {}", state.passengers);
        ensure!(
            state.seed == ctx.seed,
            "wizard seeded with {}, expected {}",
            state.seed,
            ctx.seed
        );
        ensure!(
            state.booking_id.starts_with("BK"),
            "booking id {} lacks the BK prefix",
            state.booking_id
        );
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(NAME, checks::smoke))
    }
}
