//! Client for `window.__wayfareTest`, exposed by the web app under `?test=1`.
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use thirtyfour::prelude::*;
use wayfare_booking::WizardStep;

/// Mirror of the snapshot returned by `__wayfareTest.state()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardSnapshot {
    pub step: u8,
    pub booking_id: String,
    pub transport_type: String,
    pub passengers: usize,
    pub selected_seats: Vec<String>,
    pub available_seats: usize,
    pub occupied_seats: usize,
    pub errors: usize,
    pub payment_method: String,
    pub submission: String,
    pub pnr: Option<String>,
    pub seed: u64,
}

impl WizardSnapshot {
    /// The reported step, if the page sent a number the wizard knows.
    #[must_use]
    pub const fn wizard_step(&self) -> Option<WizardStep> {
        WizardStep::from_number(self.step)
    }

    #[must_use]
    pub fn is_at(&self, step: WizardStep) -> bool {
        self.wizard_step() == Some(step)
    }
}

#[derive(Debug, Clone)]
pub struct WizardBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> WizardBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__wayfareTest", vec![])
            .await?;
        if !result.json().as_bool().unwrap_or(false) {
            bail!("__wayfareTest is not available. Did you pass ?test=1 on /booking?");
        }
        Ok(())
    }

    async fn call(&self, method: &str) -> Result<()> {
        self.driver
            .execute(&format!("window.__wayfareTest.{method}()"), vec![])
            .await
            .with_context(|| format!("calling __wayfareTest.{method}"))?;
        Ok(())
    }

    pub async fn fill(&self) -> Result<()> {
        self.call("fill").await
    }

    /// Select one free seat per passenger still without one.
    pub async fn pick_seats(&self) -> Result<()> {
        self.call("pickSeats").await
    }

    pub async fn click_seat(&self, seat_id: &str) -> Result<()> {
        self.driver
            .execute(
                "window.__wayfareTest.clickSeat(arguments[0])",
                vec![seat_id.into()],
            )
            .await
            .context("calling __wayfareTest.clickSeat")?;
        Ok(())
    }

    pub async fn next(&self) -> Result<()> {
        self.call("next").await
    }

    pub async fn previous(&self) -> Result<()> {
        self.call("previous").await
    }

    pub async fn state(&self) -> Result<WizardSnapshot> {
        let result = self
            .driver
            .execute("return window.__wayfareTest.state()", vec![])
            .await?;
        serde_json::from_value(result.json().clone()).context("parsing WizardSnapshot")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_reads_bridge_payload() {
        let payload = json!({
            "step": 2,
            "bookingId": "BK42",
            "transportType": "train",
            "passengers": 2,
            "selectedSeats": ["S1-1"],
            "availableSeats": 500,
            "occupiedSeats": 219,
            "errors": 0,
            "paymentMethod": "card",
            "submission": "idle",
            "pnr": null,
            "seed": 7
        });
        let snapshot: WizardSnapshot = serde_json::from_value(payload).expect("parse");
        assert_eq!(snapshot.step, 2);
        assert!(snapshot.is_at(WizardStep::SeatSelection));
        assert_eq!(snapshot.selected_seats, vec!["S1-1".to_string()]);
        assert!(snapshot.pnr.is_none());
    }

    #[test]
    fn snapshot_tolerates_missing_fields() {
        let snapshot: WizardSnapshot =
            serde_json::from_value(json!({ "step": 4, "pnr": "AB12CD" })).expect("parse");
        assert_eq!(snapshot.pnr.as_deref(), Some("AB12CD"));
        assert_eq!(snapshot.passengers, 0);
        assert_eq!(snapshot.wizard_step(), Some(WizardStep::Summary));
    }

    #[test]
    fn unknown_step_numbers_map_to_none() {
        let snapshot = WizardSnapshot {
            step: 9,
            ..WizardSnapshot::default()
        };
        assert_eq!(snapshot.wizard_step(), None);
        assert!(!snapshot.is_at(WizardStep::PassengerDetails));
    }
}
