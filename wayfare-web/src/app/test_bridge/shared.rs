use crate::app::state::WizardStore;
use serde::Serialize;
use wayfare_booking::{
    ContactField, PassengerField, SeatStatus, SubmissionState, WizardAction, WizardState,
};

/// Snapshot handed to browser automation through `window.__wayfareTest.state()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BridgeSnapshot {
    pub step: u8,
    pub booking_id: String,
    pub transport_type: &'static str,
    pub passengers: usize,
    pub selected_seats: Vec<String>,
    pub available_seats: usize,
    pub occupied_seats: usize,
    pub errors: usize,
    pub payment_method: &'static str,
    pub submission: &'static str,
    pub pnr: Option<String>,
    pub seed: u64,
}

pub(super) fn snapshot(store: &WizardStore) -> BridgeSnapshot {
    let state = store.state();
    BridgeSnapshot {
        step: state.step().number(),
        booking_id: state.session.booking_id.clone(),
        transport_type: state.session.transport_type.as_str(),
        passengers: state.session.passenger_count(),
        selected_seats: state.session.selected_seats.clone(),
        available_seats: state.seat_map.count(SeatStatus::Available),
        occupied_seats: state.seat_map.count(SeatStatus::Occupied),
        errors: state.errors.len(),
        payment_method: state.session.payment_method.id(),
        submission: submission_label(&state.submission),
        pnr: state.receipt.as_ref().map(|receipt| receipt.pnr.clone()),
        seed: store.wizard.seed(),
    }
}

const fn submission_label(submission: &SubmissionState) -> &'static str {
    match submission {
        SubmissionState::Idle => "idle",
        SubmissionState::Pending => "pending",
        SubmissionState::Succeeded { .. } => "succeeded",
        SubmissionState::Failed { .. } => "failed",
    }
}

/// Actions that fill every passenger and the contact block with valid values.
pub(super) fn fill_actions(state: &WizardState) -> Vec<WizardAction> {
    let mut actions = Vec::new();
    for index in 0..state.session.passenger_count() {
        actions.push(WizardAction::EditPassenger {
            index,
            field: PassengerField::Name,
            value: format!("Traveller {}", index + 1),
        });
        actions.push(WizardAction::EditPassenger {
            index,
            field: PassengerField::Age,
            value: "34".into(),
        });
    }
    actions.push(WizardAction::EditContact {
        field: ContactField::Email,
        value: "qa@example.com".into(),
    });
    actions.push(WizardAction::EditContact {
        field: ContactField::Phone,
        value: "9876543210".into(),
    });
    actions
}

/// First `wanted` available seat ids in grid order.
pub(super) fn pick_available(state: &WizardState, wanted: usize) -> Vec<String> {
    state
        .seat_map
        .seats
        .iter()
        .filter(|seat| seat.status == SeatStatus::Available)
        .take(wanted)
        .map(|seat| seat.id.clone())
        .collect()
}
