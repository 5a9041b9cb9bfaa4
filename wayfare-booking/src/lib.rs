//! Wayfare booking core
//!
//! Platform-agnostic booking wizard: session model, validation, seat maps,
//! payment helpers, receipts and the persisted booking record. The web front
//! end and the QA tester both drive the same reducer.

pub mod api;
pub mod catalog;
pub mod payment;
pub mod query;
pub mod record;
pub mod seats;
pub mod session;
pub mod store;
pub mod summary;
pub mod validation;
pub mod wizard;

// Re-export commonly used types
pub use api::{
    CreateBookingResponse, ListBookingsResponse, SubmitError, interpret_create_response,
};
pub use catalog::{BookingCatalog, BookingDetail, Itinerary, Lookup};
pub use payment::{CardDetails, CardField, PaymentState, PaymentStatus, format_card_number};
pub use query::BookingQuery;
pub use record::{BookingRecord, BookingStatus, TripType, parse_price};
pub use seats::{CabinClass, Seat, SeatLayout, SeatMap, SeatStatus, SeatToggle};
pub use session::{
    BookingSession, ContactField, Gender, Passenger, PassengerField, PaymentMethod, TransportType,
    WizardStep,
};
pub use store::{MemoryBookingStore, StoreError};
pub use summary::{Confirmation, Receipt, generate_pnr, generate_transaction_id};
pub use validation::{FieldErrors, FieldKey};
pub use wizard::{
    BookingWizard, Dispatched, Reduced, SubmissionState, WizardAction, WizardAlert, WizardEffect,
    WizardState, reduce,
};

/// Trait for abstracting booking persistence
/// Platform-specific implementations should provide this
pub trait BookingStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a booking, returning its new id
    ///
    /// # Errors
    ///
    /// Returns an error if the booking cannot be stored.
    fn insert(&self, record: BookingRecord) -> Result<String, Self::Error>;

    /// Bookings owned by `user_id`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the bookings cannot be read.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<BookingRecord>, Self::Error>;
}

/// Serves the bookings endpoint over a store and feeds results back to wizards
pub struct BookingEngine<S>
where
    S: BookingStore,
{
    store: S,
}

impl<S> BookingEngine<S>
where
    S: BookingStore,
{
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Handle `POST /api/bookings`, returning the HTTP status and envelope.
    pub fn create(&self, record: BookingRecord) -> (u16, CreateBookingResponse) {
        match self.store.insert(record) {
            Ok(id) => (200, CreateBookingResponse::created(id)),
            Err(err) => {
                log::error!("Error creating booking: {err}");
                (500, CreateBookingResponse::failed())
            }
        }
    }

    /// Handle `GET /api/bookings?userId=`.
    pub fn list(&self, user_id: &str) -> (u16, ListBookingsResponse) {
        if user_id.is_empty() {
            return (
                400,
                ListBookingsResponse::failed(api::USER_ID_REQUIRED_MESSAGE),
            );
        }
        match self.store.list_for_user(user_id) {
            Ok(bookings) => (200, ListBookingsResponse::listed(bookings)),
            Err(err) => {
                log::error!("Error fetching bookings: {err}");
                (500, ListBookingsResponse::failed(api::LIST_FAILED_MESSAGE))
            }
        }
    }

    /// Round-trip a submission through the wire envelope and turn the
    /// outcome into the wizard's follow-up action.
    pub fn submit(&self, mut record: BookingRecord) -> WizardAction {
        record.stamp(chrono::Utc::now());
        let (status, response) = self.create(record);
        let outcome = serde_json::to_string(&response)
            .map_err(|err| SubmitError::MalformedResponse {
                status,
                reason: err.to_string(),
            })
            .and_then(|body| interpret_create_response(status, &body));
        match outcome {
            Ok(booking_id) => WizardAction::SubmissionSucceeded { booking_id },
            Err(err) => WizardAction::SubmissionFailed {
                message: err.to_string(),
            },
        }
    }

    /// Resolve an effect synchronously. Payment delays are skipped.
    pub fn resolve(&self, effect: WizardEffect) -> WizardAction {
        match effect {
            WizardEffect::SubmitBooking(record) => self.submit(record),
            WizardEffect::SimulatePayment { .. } => WizardAction::PaymentSettled,
        }
    }

    /// Dispatch `action` and keep resolving effects until the wizard is idle.
    /// Returns every alert raised along the way.
    pub fn drive(&self, wizard: &mut BookingWizard, action: WizardAction) -> Vec<WizardAlert> {
        let mut alerts = Vec::new();
        let mut next = Some(action);
        while let Some(action) = next.take() {
            let Dispatched { alert, effect } = wizard.dispatch(action);
            alerts.extend(alert);
            next = effect.map(|effect| self.resolve(effect));
        }
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_wizard() -> BookingWizard {
        let mut session = BookingSession::new("BK9", TransportType::Bus);
        session.passengers = vec![Passenger::new("A", "30", Gender::Male)];
        session.contact_email = "a@b.com".into();
        session.contact_phone = "1234567890".into();
        let mut wizard = BookingWizard::new(session, 11);
        wizard.dispatch(WizardAction::Next);
        let seat = wizard
            .state()
            .seat_map
            .seats
            .iter()
            .find(|s| s.status == SeatStatus::Available)
            .map(|s| s.id.clone())
            .unwrap();
        wizard.dispatch(WizardAction::ClickSeat(seat));
        wizard.dispatch(WizardAction::Next);
        wizard
    }

    #[test]
    fn engine_confirms_submission() {
        let engine = BookingEngine::new(MemoryBookingStore::new());
        let mut wizard = ready_wizard();
        let alerts = engine.drive(&mut wizard, WizardAction::Next);
        assert!(alerts.is_empty());
        assert!(matches!(
            wizard.state().submission,
            SubmissionState::Succeeded { .. }
        ));
        let (status, listed) = engine.list(record::DEFAULT_USER_ID);
        assert_eq!(status, 200);
        assert_eq!(listed.bookings.len(), 1);
    }

    #[test]
    fn engine_surfaces_store_failure() {
        let engine = BookingEngine::new(MemoryBookingStore::new());
        engine.store().fail_next_insert();
        let mut wizard = ready_wizard();
        engine.drive(&mut wizard, WizardAction::Next);
        let SubmissionState::Failed { message } = &wizard.state().submission else {
            panic!("expected failure");
        };
        assert!(message.contains("Error creating booking"));
        engine.drive(&mut wizard, WizardAction::RetrySubmission);
        assert!(wizard.state().submission.is_settled());
    }

    #[test]
    fn listing_without_user_is_bad_request() {
        let engine = BookingEngine::new(MemoryBookingStore::new());
        let (status, response) = engine.list("");
        assert_eq!(status, 400);
        assert!(!response.success);
    }

    #[test]
    fn payment_effect_settles() {
        let engine = BookingEngine::new(MemoryBookingStore::new());
        let mut wizard = ready_wizard();
        engine.drive(&mut wizard, WizardAction::ProcessPayment);
        assert_eq!(wizard.state().payment.status, PaymentStatus::Succeeded);
    }
}
