//! Booking wizard reducer.
//!
//! [`reduce`] is a pure function of `(state, action, rng)`. Anything that
//! needs the outside world (the booking POST, the payment timer) comes back
//! as a [`WizardEffect`] for the caller to run; its result is fed back in as
//! another action.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::payment::{CardField, PROCESSING_DELAY_MS, PaymentState, PaymentStatus};
use crate::query::BookingQuery;
use crate::record::BookingRecord;
use crate::seats::{CabinClass, SeatLayout, SeatMap, SeatToggle};
use crate::session::{
    BookingSession, ContactField, Gender, Passenger, PassengerField, PaymentMethod, TransportType,
    WizardStep,
};
use crate::summary::Receipt;
use crate::validation::{
    FieldErrors, FieldKey, validate_field, validate_passenger_step, validate_payment_step,
    validate_seat_step,
};

/// Blocking messages surfaced to the user (an `alert()` in the browser).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardAlert {
    #[error("Please fill in all passenger details correctly.")]
    PassengerDetailsIncomplete,
    #[error("Please select {required} seat(s).")]
    SeatsIncomplete { required: usize },
    #[error("You can only select {limit} seat(s) for your booking.")]
    SeatLimitReached { limit: usize },
    #[error("The first passenger cannot be removed.")]
    PrimaryPassengerLocked,
}

/// Progress of the booking POST made on reaching the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded { booking_id: String },
    Failed { message: String },
}

impl SubmissionState {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    EditPassenger {
        index: usize,
        field: PassengerField,
        value: String,
    },
    AddPassenger,
    RemovePassenger {
        index: usize,
    },
    EditContact {
        field: ContactField,
        value: String,
    },
    BlurField(FieldKey),
    ChangeTransport(TransportType),
    SelectCabin(CabinClass),
    ClickSeat(String),
    SelectPaymentMethod(PaymentMethod),
    EditCard {
        field: CardField,
        value: String,
    },
    EditUpi(String),
    ProcessPayment,
    PaymentSettled,
    Next,
    Previous,
    SubmissionSucceeded {
        booking_id: String,
    },
    SubmissionFailed {
        message: String,
    },
    RetrySubmission,
}

/// Work the caller must perform and report back on.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    /// POST the record; answer with `SubmissionSucceeded` or `SubmissionFailed`.
    SubmitBooking(BookingRecord),
    /// Wait, then dispatch `PaymentSettled`.
    SimulatePayment { delay_ms: u64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub session: BookingSession,
    pub seat_map: SeatMap,
    pub cabin: CabinClass,
    pub errors: FieldErrors,
    pub payment: PaymentState,
    pub submission: SubmissionState,
    pub receipt: Option<Receipt>,
}

impl WizardState {
    #[must_use]
    pub fn new(session: BookingSession) -> Self {
        Self {
            seat_map: SeatMap::empty(session.transport_type),
            session,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.session.current_step
    }
}

/// Output of one reducer step.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced {
    pub state: WizardState,
    pub alert: Option<WizardAlert>,
    pub effect: Option<WizardEffect>,
}

impl Reduced {
    const fn quiet(state: WizardState) -> Self {
        Self {
            state,
            alert: None,
            effect: None,
        }
    }

    const fn alert(state: WizardState, alert: WizardAlert) -> Self {
        Self {
            state,
            alert: Some(alert),
            effect: None,
        }
    }

    const fn effect(state: WizardState, effect: WizardEffect) -> Self {
        Self {
            state,
            alert: None,
            effect: Some(effect),
        }
    }
}

/// Apply one action to the wizard.
pub fn reduce<R: Rng + ?Sized>(mut state: WizardState, action: WizardAction, rng: &mut R) -> Reduced {
    match action {
        WizardAction::EditPassenger {
            index,
            field,
            value,
        } => {
            edit_passenger(&mut state, index, field, value);
            Reduced::quiet(state)
        }
        WizardAction::AddPassenger => {
            state.session.passengers.push(Passenger::default());
            Reduced::quiet(state)
        }
        WizardAction::RemovePassenger { index } => remove_passenger(state, index),
        WizardAction::EditContact { field, value } => {
            let key = match field {
                ContactField::Email => {
                    state.session.contact_email = value;
                    FieldKey::ContactEmail
                }
                ContactField::Phone => {
                    state.session.contact_phone = value;
                    FieldKey::ContactPhone
                }
            };
            state.errors.clear(key);
            Reduced::quiet(state)
        }
        WizardAction::BlurField(key) => {
            validate_field(&state.session, key, &mut state.errors);
            Reduced::quiet(state)
        }
        WizardAction::ChangeTransport(transport) => {
            change_transport(&mut state, transport, rng);
            Reduced::quiet(state)
        }
        WizardAction::SelectCabin(cabin) => {
            state.cabin = cabin;
            Reduced::quiet(state)
        }
        WizardAction::ClickSeat(seat_id) => click_seat(state, &seat_id),
        WizardAction::SelectPaymentMethod(method) => {
            if state.payment.status != PaymentStatus::Processing {
                state.session.payment_method = method;
                state.payment.reset();
            }
            Reduced::quiet(state)
        }
        WizardAction::EditCard { field, value } => {
            state.payment.card.set(field, &value);
            Reduced::quiet(state)
        }
        WizardAction::EditUpi(value) => {
            state.payment.upi_id = value;
            Reduced::quiet(state)
        }
        WizardAction::ProcessPayment => {
            if state.payment.begin() {
                Reduced::effect(
                    state,
                    WizardEffect::SimulatePayment {
                        delay_ms: PROCESSING_DELAY_MS,
                    },
                )
            } else {
                Reduced::quiet(state)
            }
        }
        WizardAction::PaymentSettled => {
            state.payment.settle();
            Reduced::quiet(state)
        }
        WizardAction::Next => next_step(state, rng),
        WizardAction::Previous => previous_step(state),
        WizardAction::SubmissionSucceeded { booking_id } => {
            if state.submission.is_pending() {
                log::info!("booking {} stored as {booking_id}", state.session.booking_id);
                state.submission = SubmissionState::Succeeded { booking_id };
            }
            Reduced::quiet(state)
        }
        WizardAction::SubmissionFailed { message } => {
            if state.submission.is_pending() {
                log::warn!(
                    "booking {} submission failed: {message}",
                    state.session.booking_id
                );
                state.submission = SubmissionState::Failed { message };
            }
            Reduced::quiet(state)
        }
        WizardAction::RetrySubmission => {
            if matches!(state.submission, SubmissionState::Failed { .. }) {
                state.submission = SubmissionState::Pending;
                let record = BookingRecord::from_session(&state.session);
                Reduced::effect(state, WizardEffect::SubmitBooking(record))
            } else {
                Reduced::quiet(state)
            }
        }
    }
}

fn edit_passenger(state: &mut WizardState, index: usize, field: PassengerField, value: String) {
    let Some(passenger) = state.session.passengers.get_mut(index) else {
        return;
    };
    match field {
        PassengerField::Name => {
            passenger.name = value;
            state.errors.clear(FieldKey::PassengerName(index));
        }
        PassengerField::Age => {
            passenger.age = value;
            state.errors.clear(FieldKey::PassengerAge(index));
        }
        PassengerField::Gender => {
            if let Some(gender) = Gender::from_label(&value) {
                passenger.gender = gender;
            }
        }
    }
}

fn remove_passenger(mut state: WizardState, index: usize) -> Reduced {
    if index == 0 {
        return Reduced::alert(state, WizardAlert::PrimaryPassengerLocked);
    }
    if index >= state.session.passengers.len() {
        return Reduced::quiet(state);
    }
    state.session.passengers.remove(index);
    state.errors.remove_passenger(index);
    let limit = state.session.passengers.len();
    while state.session.selected_seats.len() > limit {
        if let Some(seat_id) = state.session.selected_seats.pop() {
            state.seat_map.release(&seat_id);
        }
    }
    Reduced::quiet(state)
}

fn regenerate_seats<R: Rng + ?Sized>(state: &mut WizardState, rng: &mut R) {
    let valid = SeatLayout::for_transport(state.session.transport_type).seat_ids();
    state.session.selected_seats.retain(|id| valid.contains(id));
    state.seat_map = SeatMap::generate(
        state.session.transport_type,
        &state.session.selected_seats,
        rng,
    );
}

fn change_transport<R: Rng + ?Sized>(state: &mut WizardState, transport: TransportType, rng: &mut R) {
    if state.session.transport_type == transport {
        return;
    }
    log::debug!(
        "transport changed {} -> {transport}",
        state.session.transport_type
    );
    state.session.transport_type = transport;
    state.cabin = CabinClass::default();
    regenerate_seats(state, rng);
}

fn click_seat(mut state: WizardState, seat_id: &str) -> Reduced {
    let limit = state.session.passengers.len();
    match state
        .seat_map
        .toggle(seat_id, &mut state.session.selected_seats, limit)
    {
        SeatToggle::LimitReached { limit } => {
            Reduced::alert(state, WizardAlert::SeatLimitReached { limit })
        }
        SeatToggle::Selected | SeatToggle::Released | SeatToggle::Ignored => Reduced::quiet(state),
    }
}

fn next_step<R: Rng + ?Sized>(mut state: WizardState, rng: &mut R) -> Reduced {
    let from = state.step();
    match from {
        WizardStep::PassengerDetails => {
            if !validate_passenger_step(&state.session, &mut state.errors) {
                return Reduced::alert(state, WizardAlert::PassengerDetailsIncomplete);
            }
            regenerate_seats(&mut state, rng);
        }
        WizardStep::SeatSelection => {
            if !validate_seat_step(&state.session) {
                let required = state.session.passengers.len();
                return Reduced::alert(state, WizardAlert::SeatsIncomplete { required });
            }
        }
        WizardStep::Payment => {
            if !validate_payment_step(&state.session) {
                return Reduced::quiet(state);
            }
        }
        WizardStep::Summary => return Reduced::quiet(state),
    }
    let to = from.next();
    log::debug!("wizard step {} -> {}", from.number(), to.number());
    state.session.current_step = to;
    if to.is_final() {
        state.receipt = Some(Receipt::derive(&state.session, rng));
        state.submission = SubmissionState::Pending;
        let record = BookingRecord::from_session(&state.session);
        return Reduced::effect(state, WizardEffect::SubmitBooking(record));
    }
    Reduced::quiet(state)
}

fn previous_step(mut state: WizardState) -> Reduced {
    let from = state.step();
    if from.is_final() && (state.submission.is_pending() || state.submission.is_settled()) {
        return Reduced::quiet(state);
    }
    let to = from.previous();
    if to != from {
        log::debug!("wizard step {} -> {}", from.number(), to.number());
    }
    if from.is_final() {
        state.receipt = None;
        state.submission = SubmissionState::Idle;
    }
    state.session.current_step = to;
    Reduced::quiet(state)
}

/// Alert and effect produced by one [`BookingWizard::dispatch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatched {
    pub alert: Option<WizardAlert>,
    pub effect: Option<WizardEffect>,
}

/// Wizard state bound to a seeded RNG so a run replays exactly from its seed.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    state: WizardState,
    rng: ChaCha8Rng,
    seed: u64,
}

impl BookingWizard {
    #[must_use]
    pub fn new(session: BookingSession, seed: u64) -> Self {
        Self {
            state: WizardState::new(session),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed a session from the query string; a missing id is drawn from the wizard RNG.
    #[must_use]
    pub fn from_query(query: BookingQuery, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let session = query.into_session(&mut rng);
        Self {
            state: WizardState::new(session),
            rng,
            seed,
        }
    }

    pub fn dispatch(&mut self, action: WizardAction) -> Dispatched {
        let state = std::mem::take(&mut self.state);
        let Reduced {
            state,
            alert,
            effect,
        } = reduce(state, action, &mut self.rng);
        self.state = state;
        if let Some(alert) = &alert {
            log::debug!("wizard alert: {alert}");
        }
        Dispatched { alert, effect }
    }

    #[must_use]
    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    #[must_use]
    pub const fn session(&self) -> &BookingSession {
        &self.state.session
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seats::SeatStatus;

    fn filled_wizard(transport: TransportType, passengers: usize) -> BookingWizard {
        let mut session = BookingSession::new("BK100", transport);
        session.passengers = (0..passengers)
            .map(|i| Passenger::new(format!("P{i}"), "30", Gender::Female))
            .collect();
        session.contact_email = "a@b.com".into();
        session.contact_phone = "1234567890".into();
        BookingWizard::new(session, 42)
    }

    fn free_seats(wizard: &BookingWizard, n: usize) -> Vec<String> {
        wizard
            .state()
            .seat_map
            .seats
            .iter()
            .filter(|s| s.status == SeatStatus::Available)
            .take(n)
            .map(|s| s.id.clone())
            .collect()
    }

    #[test]
    fn valid_passenger_step_advances() {
        let mut wizard = filled_wizard(TransportType::Flight, 1);
        let out = wizard.dispatch(WizardAction::Next);
        assert_eq!(out.alert, None);
        assert_eq!(wizard.state().step(), WizardStep::SeatSelection);
        assert_eq!(wizard.state().seat_map.len(), 180);
    }

    #[test]
    fn invalid_passenger_step_alerts_and_stays() {
        let mut wizard = BookingWizard::new(BookingSession::new("BK1", TransportType::Bus), 1);
        let out = wizard.dispatch(WizardAction::Next);
        assert_eq!(out.alert, Some(WizardAlert::PassengerDetailsIncomplete));
        assert_eq!(wizard.state().step(), WizardStep::PassengerDetails);
        assert!(!wizard.state().errors.is_empty());
    }

    #[test]
    fn seat_step_requires_full_selection() {
        let mut wizard = filled_wizard(TransportType::Bus, 2);
        wizard.dispatch(WizardAction::Next);
        let seats = free_seats(&wizard, 1);
        wizard.dispatch(WizardAction::ClickSeat(seats[0].clone()));
        let out = wizard.dispatch(WizardAction::Next);
        assert_eq!(out.alert, Some(WizardAlert::SeatsIncomplete { required: 2 }));
        assert_eq!(out.alert.unwrap().to_string(), "Please select 2 seat(s).");
        assert_eq!(wizard.state().step(), WizardStep::SeatSelection);
    }

    #[test]
    fn extra_seat_hits_the_limit() {
        let mut wizard = filled_wizard(TransportType::Flight, 1);
        wizard.dispatch(WizardAction::Next);
        let seats = free_seats(&wizard, 2);
        wizard.dispatch(WizardAction::ClickSeat(seats[0].clone()));
        let out = wizard.dispatch(WizardAction::ClickSeat(seats[1].clone()));
        assert_eq!(out.alert, Some(WizardAlert::SeatLimitReached { limit: 1 }));
        assert_eq!(
            out.alert.unwrap().to_string(),
            "You can only select 1 seat(s) for your booking."
        );
        assert_eq!(wizard.session().selected_seats, vec![seats[0].clone()]);
    }

    #[test]
    fn reaching_summary_emits_submission() {
        let mut wizard = filled_wizard(TransportType::Train, 1);
        wizard.dispatch(WizardAction::Next);
        let seat = free_seats(&wizard, 1).remove(0);
        wizard.dispatch(WizardAction::ClickSeat(seat.clone()));
        wizard.dispatch(WizardAction::Next);
        let out = wizard.dispatch(WizardAction::Next);
        let Some(WizardEffect::SubmitBooking(record)) = out.effect else {
            panic!("expected submission effect");
        };
        assert_eq!(record.selected_seats, vec![seat]);
        assert_eq!(wizard.state().submission, SubmissionState::Pending);
        let receipt = wizard.state().receipt.clone().unwrap();
        assert_eq!(receipt.ticket_title, "Train Ticket");

        wizard.dispatch(WizardAction::SubmissionSucceeded {
            booking_id: "abc".into(),
        });
        assert!(wizard.state().submission.is_settled());
        wizard.dispatch(WizardAction::Previous);
        assert_eq!(wizard.state().step(), WizardStep::Summary);
    }

    #[test]
    fn failed_submission_can_be_retried() {
        let mut wizard = filled_wizard(TransportType::Bus, 1);
        wizard.dispatch(WizardAction::Next);
        let seat = free_seats(&wizard, 1).remove(0);
        wizard.dispatch(WizardAction::ClickSeat(seat));
        wizard.dispatch(WizardAction::Next);
        wizard.dispatch(WizardAction::Next);
        wizard.dispatch(WizardAction::SubmissionFailed {
            message: "Error creating booking".into(),
        });
        assert_eq!(
            wizard.state().submission,
            SubmissionState::Failed {
                message: "Error creating booking".into()
            }
        );
        let out = wizard.dispatch(WizardAction::RetrySubmission);
        assert!(matches!(out.effect, Some(WizardEffect::SubmitBooking(_))));
        assert!(wizard.state().submission.is_pending());
    }

    #[test]
    fn first_passenger_cannot_be_removed() {
        let mut wizard = filled_wizard(TransportType::Flight, 2);
        let out = wizard.dispatch(WizardAction::RemovePassenger { index: 0 });
        assert_eq!(out.alert, Some(WizardAlert::PrimaryPassengerLocked));
        assert_eq!(wizard.session().passenger_count(), 2);
    }

    #[test]
    fn removing_passenger_trims_seats() {
        let mut wizard = filled_wizard(TransportType::Bus, 2);
        wizard.dispatch(WizardAction::Next);
        for seat in free_seats(&wizard, 2) {
            wizard.dispatch(WizardAction::ClickSeat(seat));
        }
        let dropped = wizard.session().selected_seats[1].clone();
        wizard.dispatch(WizardAction::RemovePassenger { index: 1 });
        assert_eq!(wizard.session().selected_seats.len(), 1);
        assert_eq!(
            wizard.state().seat_map.get(&dropped).unwrap().status,
            SeatStatus::Available
        );
    }

    #[test]
    fn transport_change_regenerates_grid() {
        let mut wizard = filled_wizard(TransportType::Flight, 1);
        wizard.dispatch(WizardAction::Next);
        wizard.dispatch(WizardAction::ChangeTransport(TransportType::Train));
        assert_eq!(wizard.state().seat_map.len(), 720);
        wizard.dispatch(WizardAction::ChangeTransport(TransportType::Bus));
        assert_eq!(wizard.state().seat_map.len(), 80);
    }

    #[test]
    fn transport_change_drops_foreign_selections() {
        let mut wizard = filled_wizard(TransportType::Flight, 1);
        wizard.dispatch(WizardAction::Next);
        let seat = free_seats(&wizard, 1).remove(0);
        wizard.dispatch(WizardAction::ClickSeat(seat));
        wizard.dispatch(WizardAction::ChangeTransport(TransportType::Train));
        assert!(wizard.session().selected_seats.is_empty());
    }

    #[test]
    fn payment_runs_through_effect() {
        let mut wizard = filled_wizard(TransportType::Flight, 1);
        let out = wizard.dispatch(WizardAction::ProcessPayment);
        assert_eq!(
            out.effect,
            Some(WizardEffect::SimulatePayment {
                delay_ms: PROCESSING_DELAY_MS
            })
        );
        assert_eq!(wizard.state().payment.status, PaymentStatus::Processing);
        wizard.dispatch(WizardAction::SelectPaymentMethod(PaymentMethod::Paypal));
        assert_eq!(wizard.session().payment_method, PaymentMethod::CreditCard);
        wizard.dispatch(WizardAction::PaymentSettled);
        assert_eq!(wizard.state().payment.status, PaymentStatus::Succeeded);
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut wizard = BookingWizard::new(BookingSession::new("BK1", TransportType::Bus), 1);
        wizard.dispatch(WizardAction::BlurField(FieldKey::ContactEmail));
        assert!(wizard.state().errors.get(FieldKey::ContactEmail).is_some());
        wizard.dispatch(WizardAction::EditContact {
            field: ContactField::Email,
            value: "x@y.z".into(),
        });
        assert!(wizard.state().errors.get(FieldKey::ContactEmail).is_none());
    }

    #[test]
    fn same_seed_replays_same_map() {
        let mut a = filled_wizard(TransportType::Train, 1);
        let mut b = filled_wizard(TransportType::Train, 1);
        a.dispatch(WizardAction::Next);
        b.dispatch(WizardAction::Next);
        assert_eq!(a.state().seat_map, b.state().seat_map);
    }
}
