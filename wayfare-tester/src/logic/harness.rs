//! Headless driver for one wizard run.
//!
//! Wraps a [`BookingWizard`] and a [`BookingEngine`] over the in-memory store
//! so every effect (payment timer, booking POST) resolves synchronously.
use thiserror::Error;
use wayfare_booking::{
    BookingEngine, BookingQuery, BookingWizard, ContactField, MemoryBookingStore, PassengerField,
    SeatStatus, TransportType, WizardAction, WizardAlert, WizardState, WizardStep,
};

pub const SAMPLE_EMAIL: &str = "qa@example.com";
pub const SAMPLE_PHONE: &str = "9876543210";

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("only {available} free seat(s) left, wanted {wanted}")]
    NotEnoughSeats { available: usize, wanted: usize },
    #[error("wizard blocked on step {step}: {alert}")]
    Blocked { step: u8, alert: WizardAlert },
    #[error("wizard stayed on step {step}")]
    Stalled { step: u8 },
}

pub struct BookingHarness {
    engine: BookingEngine<MemoryBookingStore>,
    wizard: BookingWizard,
    alerts: Vec<WizardAlert>,
}

impl BookingHarness {
    /// A Mumbai to Delhi search for `transport` with `passengers` travellers.
    pub fn new(transport: TransportType, passengers: usize, seed: u64) -> Self {
        let query = BookingQuery::from_pairs([
            ("type", transport.as_str()),
            ("from", "Mumbai"),
            ("to", "Delhi"),
            ("date", "2025-03-01"),
            ("price", "₹2,150"),
        ]);
        let mut harness = Self {
            engine: BookingEngine::new(MemoryBookingStore::new()),
            wizard: BookingWizard::from_query(query, seed),
            alerts: Vec::new(),
        };
        for _ in 1..passengers {
            harness.send(WizardAction::AddPassenger);
        }
        harness
    }

    /// Dispatch `action`, resolving follow-up effects. Returns the last alert raised.
    pub fn send(&mut self, action: WizardAction) -> Option<WizardAlert> {
        let alerts = self.engine.drive(&mut self.wizard, action);
        let last = alerts.last().cloned();
        self.alerts.extend(alerts);
        last
    }

    pub fn state(&self) -> &WizardState {
        self.wizard.state()
    }

    pub const fn engine(&self) -> &BookingEngine<MemoryBookingStore> {
        &self.engine
    }

    pub fn alerts(&self) -> &[WizardAlert] {
        &self.alerts
    }

    pub fn step(&self) -> WizardStep {
        self.state().step()
    }

    /// Give every passenger a valid name and age and fill the contact block.
    pub fn fill_passengers(&mut self) {
        for index in 0..self.state().session.passenger_count() {
            self.send(WizardAction::EditPassenger {
                index,
                field: PassengerField::Name,
                value: format!("Traveller {}", index + 1),
            });
            self.send(WizardAction::EditPassenger {
                index,
                field: PassengerField::Age,
                value: "34".into(),
            });
        }
        self.send(WizardAction::EditContact {
            field: ContactField::Email,
            value: SAMPLE_EMAIL.into(),
        });
        self.send(WizardAction::EditContact {
            field: ContactField::Phone,
            value: SAMPLE_PHONE.into(),
        });
    }

    /// Free seat ids in grid order.
    pub fn free_seats(&self) -> Vec<String> {
        self.state()
            .seat_map
            .seats
            .iter()
            .filter(|seat| seat.status == SeatStatus::Available)
            .map(|seat| seat.id.clone())
            .collect()
    }

    /// Click the first `wanted` free seats.
    pub fn pick_seats(&mut self, wanted: usize) -> Result<Vec<String>, HarnessError> {
        let free = self.free_seats();
        if free.len() < wanted {
            return Err(HarnessError::NotEnoughSeats {
                available: free.len(),
                wanted,
            });
        }
        let picked: Vec<String> = free.into_iter().take(wanted).collect();
        for seat_id in &picked {
            self.send(WizardAction::ClickSeat(seat_id.clone()));
        }
        Ok(picked)
    }

    /// Press Next once and require the wizard to move.
    pub fn next(&mut self) -> Result<(), HarnessError> {
        let before = self.step();
        let alert = self.send(WizardAction::Next);
        if self.step() != before {
            return Ok(());
        }
        match alert {
            Some(alert) => Err(HarnessError::Blocked {
                step: before.number(),
                alert,
            }),
            None => Err(HarnessError::Stalled {
                step: before.number(),
            }),
        }
    }

    /// Fill, pick seats and press Next until `target` is reached.
    pub fn advance_to(&mut self, target: WizardStep) -> Result<(), HarnessError> {
        while self.step() < target {
            match self.step() {
                WizardStep::PassengerDetails => self.fill_passengers(),
                WizardStep::SeatSelection => {
                    let wanted = self.state().session.seats_remaining();
                    self.pick_seats(wanted)?;
                }
                WizardStep::Payment | WizardStep::Summary => {}
            }
            self.next()?;
        }
        Ok(())
    }
}
