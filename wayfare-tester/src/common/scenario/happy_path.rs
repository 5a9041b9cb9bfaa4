use anyhow::{Context, Result, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;
use wayfare_booking::WizardStep;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario, wait_for_element};
use crate::logic::checks;

pub const NAME: &str = "Happy Path Booking";

const STEP_TIMEOUT: Duration = Duration::from_secs(3);
// Covers the simulated processor delay and the booking POST.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HappyPathScenario;

#[async_trait::async_trait]
impl BrowserScenario for HappyPathScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.seeded_url()).await?;
        ctx.bridge.ensure_available().await?;

        ctx.bridge.fill().await?;
        let filled = ctx
            .wait_for("passenger form", STEP_TIMEOUT, |s| s.errors == 0)
            .await?;
        ensure!(
            filled.is_at(WizardStep::PassengerDetails),
            "filling moved the wizard to {}",
            filled.step
        );
        ctx.bridge.next().await?;
        let seats = ctx
            .wait_for("seat step", STEP_TIMEOUT, |s| s.is_at(WizardStep::SeatSelection))
            .await?;
        if ctx.verbose {
            println!(
                "  💺 Seat grid: {} free, {} taken",
                seats.available_seats, seats.occupied_seats
            );
        }

        ctx.bridge.pick_seats().await?;
        let picked = ctx
            .wait_for("seat selection", STEP_TIMEOUT, |s| {
                s.selected_seats.len() == s.passengers
            })
            .await?;
        let first_seat = picked.selected_seats.first().context("no seat picked")?;
        let seat_selector = format!("[data-testid='seat-{first_seat}']");
        driver
            .find(By::Css(seat_selector.as_str()))
            .await
            .with_context(|| format!("seat {first_seat} not rendered"))?;
        ctx.bridge.next().await?;
        ctx.wait_for("payment step", STEP_TIMEOUT, |s| s.is_at(WizardStep::Payment))
            .await?;

        driver
            .find(By::Css("[data-testid='process-payment']"))
            .await?
            .click()
            .await?;
        wait_for_element(driver, "[data-testid='payment-success']", SETTLE_TIMEOUT)
            .await
            .context("payment never settled")?;

        ctx.bridge.next().await?;
        let done = ctx
            .wait_for("booking submission", SETTLE_TIMEOUT, |s| {
                s.is_at(WizardStep::Summary) && s.submission != "pending"
            })
            .await?;
        ensure!(
            done.submission == "succeeded",
            "booking submission ended {}",
            done.submission
        );
        let pnr = done.pnr.context("summary has no PNR")?;
        let receipt = driver
            .find(By::Css("[data-testid='receipt']"))
            .await?
            .text()
            .await?;
        ensure!(receipt.contains(&pnr), "receipt does not show PNR {pnr}");
        if ctx.verbose {
            println!("  🎫 Booking {} confirmed with PNR {pnr}", done.booking_id);
        }
        Ok(())
    }
}

impl CombinedScenario for HappyPathScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(NAME, checks::happy_path))
    }
}
