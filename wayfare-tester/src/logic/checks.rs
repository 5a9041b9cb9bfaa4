//! Booking invariants exercised by the logic scenarios.
//!
//! Each check receives the iteration seed, builds its own harness and fails
//! with a human-readable reason.
use anyhow::{Context, Result, bail, ensure};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use regex::Regex;
use wayfare_booking::record::DEFAULT_USER_ID;
use wayfare_booking::{
    CabinClass, SeatLayout, SeatStatus, SubmissionState, TransportType, WizardAction, WizardAlert,
    WizardStep, format_card_number,
};

use super::harness::BookingHarness;

pub type BookingCheck = fn(u64) -> Result<()>;

const SEATED: [TransportType; 3] = [
    TransportType::Flight,
    TransportType::Train,
    TransportType::Bus,
];

fn pattern(source: &str) -> Result<Regex> {
    Regex::new(source).with_context(|| format!("compiling {source}"))
}

fn seeded_transport(rng: &mut ChaCha8Rng) -> TransportType {
    SEATED[rng.gen_range(0..SEATED.len())]
}

/// A fresh wizard starts on step one with one blank passenger and a `BK` id.
pub fn smoke(seed: u64) -> Result<()> {
    let booking_id = pattern(r"^BK\d{1,6}$")?;
    for transport in TransportType::ALL {
        let harness = BookingHarness::new(transport, 1, seed);
        let session = &harness.state().session;
        ensure!(
            harness.step() == WizardStep::PassengerDetails,
            "{transport} wizard should open on passenger details, got {:?}",
            harness.step()
        );
        ensure!(
            session.passenger_count() == 1,
            "{transport} wizard should start with one passenger, got {}",
            session.passenger_count()
        );
        ensure!(
            booking_id.is_match(&session.booking_id),
            "generated booking id {} does not look like BK<n>",
            session.booking_id
        );
        ensure!(
            session.heading() == format!("{} Booking", transport.title()),
            "unexpected heading {}",
            session.heading()
        );
        ensure!(
            harness.state().seat_map.is_empty(),
            "seat grid should not exist before step two"
        );
    }
    Ok(())
}

/// Fill, pick, pay and confirm; the booking must land in the store.
pub fn happy_path(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let transport = seeded_transport(&mut rng);
    let passengers = rng.gen_range(1..=4);
    let mut harness = BookingHarness::new(transport, passengers, seed);

    harness.advance_to(WizardStep::Payment)?;
    harness.send(WizardAction::ProcessPayment);
    harness.advance_to(WizardStep::Summary)?;

    let state = harness.state();
    let SubmissionState::Succeeded { booking_id } = &state.submission else {
        bail!("submission should succeed, got {:?}", state.submission);
    };
    ensure!(!booking_id.is_empty(), "stored booking id is empty");

    let receipt = state.receipt.as_ref().context("summary has no receipt")?;
    ensure!(
        pattern(r"^[A-Z0-9]{6}$")?.is_match(&receipt.pnr),
        "PNR {} is not six upper-case alphanumerics",
        receipt.pnr
    );
    ensure!(
        pattern(r"^TXN\d{1,6}$")?.is_match(&receipt.transaction_id),
        "transaction id {} is malformed",
        receipt.transaction_id
    );
    ensure!(
        receipt.passengers.len() == passengers,
        "receipt lists {} passengers, expected {passengers}",
        receipt.passengers.len()
    );

    let (status, listed) = harness.engine().list(DEFAULT_USER_ID);
    ensure!(status == 200, "listing bookings returned {status}");
    let record = listed
        .bookings
        .first()
        .context("stored booking missing from listing")?;
    ensure!(
        record.passengers == passengers,
        "record counts {} passengers, expected {passengers}",
        record.passengers
    );
    ensure!(
        record.selected_seats.len() == passengers,
        "record holds {} seats for {passengers} passengers",
        record.selected_seats.len()
    );
    ensure!(
        record.created_at.is_some(),
        "record was stored without a timestamp"
    );
    Ok(())
}

/// Next refuses to move past incomplete passenger or seat steps.
pub fn step_gating(seed: u64) -> Result<()> {
    let mut harness = BookingHarness::new(TransportType::Flight, 2, seed);

    let alert = harness.send(WizardAction::Next);
    ensure!(
        alert == Some(WizardAlert::PassengerDetailsIncomplete),
        "blank passengers should alert, got {alert:?}"
    );
    ensure!(
        harness.step() == WizardStep::PassengerDetails,
        "wizard advanced with blank passengers"
    );
    ensure!(
        !harness.state().errors.is_empty(),
        "blank passengers should surface inline errors"
    );
    ensure!(
        harness.alerts().len() == 1,
        "expected a single alert, got {:?}",
        harness.alerts()
    );

    harness.fill_passengers();
    ensure!(
        harness.state().errors.is_empty(),
        "editing fields should clear their errors"
    );
    harness.next()?;

    harness.pick_seats(1)?;
    let alert = harness.send(WizardAction::Next);
    ensure!(
        alert == Some(WizardAlert::SeatsIncomplete { required: 2 }),
        "partial seat selection should alert, got {alert:?}"
    );
    ensure!(
        harness.step() == WizardStep::SeatSelection,
        "wizard advanced with one of two seats"
    );

    harness.send(WizardAction::Previous);
    ensure!(
        harness.step() == WizardStep::PassengerDetails,
        "previous should return to passenger details"
    );
    harness.send(WizardAction::Previous);
    ensure!(
        harness.step() == WizardStep::PassengerDetails,
        "previous must not go below step one"
    );
    Ok(())
}

/// Selection never exceeds one seat per passenger.
pub fn seat_budget(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let transport = seeded_transport(&mut rng);
    let passengers = rng.gen_range(1..=4);
    let mut harness = BookingHarness::new(transport, passengers, seed);
    harness.advance_to(WizardStep::SeatSelection)?;
    harness.pick_seats(passengers)?;

    let extra = harness
        .free_seats()
        .into_iter()
        .next()
        .context("no spare seat left to over-select")?;
    let alert = harness.send(WizardAction::ClickSeat(extra.clone()));
    ensure!(
        alert == Some(WizardAlert::SeatLimitReached { limit: passengers }),
        "seat {extra} past the budget should alert, got {alert:?}"
    );
    let state = harness.state();
    ensure!(
        state.session.selected_seats.len() == passengers,
        "selected {} seats for {passengers} passengers",
        state.session.selected_seats.len()
    );
    ensure!(
        state.seat_map.count(SeatStatus::Selected) == passengers,
        "grid and session disagree on the selection"
    );
    Ok(())
}

/// Clicking a selected seat releases it.
pub fn seat_toggle(seed: u64) -> Result<()> {
    let mut harness = BookingHarness::new(TransportType::Bus, 1, seed);
    harness.advance_to(WizardStep::SeatSelection)?;
    let seat = harness
        .pick_seats(1)?
        .pop()
        .context("picked no seat")?;
    ensure!(
        harness.state().session.has_seat(&seat),
        "seat {seat} was not recorded"
    );
    harness.send(WizardAction::ClickSeat(seat.clone()));
    let state = harness.state();
    ensure!(
        state.session.selected_seats.is_empty(),
        "second click should release {seat}"
    );
    ensure!(
        state.seat_map.get(&seat).map(|s| s.status) == Some(SeatStatus::Available),
        "released seat {seat} should be available again"
    );
    Ok(())
}

/// Each transport generates exactly its layout's seats, with a plausible occupancy.
pub fn grid_cardinality(seed: u64) -> Result<()> {
    for transport in TransportType::ALL {
        let mut harness = BookingHarness::new(transport, 1, seed);
        harness.fill_passengers();
        harness.next()?;
        let map = &harness.state().seat_map;
        let capacity = SeatLayout::for_transport(transport).capacity();
        ensure!(
            map.len() == capacity,
            "{transport} grid has {} seats, layout holds {capacity}",
            map.len()
        );
        if capacity > 0 {
            let occupied = map.count(SeatStatus::Occupied);
            ensure!(
                occupied < capacity,
                "{transport} grid came out fully occupied"
            );
        }
    }
    Ok(())
}

/// Occupied seats ignore clicks.
pub fn occupied_seat(seed: u64) -> Result<()> {
    let mut harness = BookingHarness::new(TransportType::Train, 1, seed);
    harness.advance_to(WizardStep::SeatSelection)?;
    let taken = harness
        .state()
        .seat_map
        .seats
        .iter()
        .find(|seat| seat.status == SeatStatus::Occupied)
        .map(|seat| seat.id.clone())
        .context("seed produced no occupied seat")?;
    let alert = harness.send(WizardAction::ClickSeat(taken.clone()));
    ensure!(alert.is_none(), "occupied seat raised {alert:?}");
    let state = harness.state();
    ensure!(
        state.session.selected_seats.is_empty(),
        "occupied seat {taken} was selected"
    );
    ensure!(
        state.seat_map.get(&taken).map(|s| s.status) == Some(SeatStatus::Occupied),
        "occupied seat {taken} changed state"
    );
    Ok(())
}

/// Removing a traveller trims surplus seats; the first one stays put.
pub fn passenger_removal(seed: u64) -> Result<()> {
    let mut harness = BookingHarness::new(TransportType::Flight, 3, seed);
    harness.advance_to(WizardStep::SeatSelection)?;
    let picked = harness.pick_seats(3)?;
    harness.send(WizardAction::Previous);

    let alert = harness.send(WizardAction::RemovePassenger { index: 0 });
    ensure!(
        alert == Some(WizardAlert::PrimaryPassengerLocked),
        "removing the first passenger should alert, got {alert:?}"
    );
    ensure!(
        harness.state().session.passenger_count() == 3,
        "first passenger was removed"
    );

    harness.send(WizardAction::RemovePassenger { index: 2 });
    let state = harness.state();
    ensure!(
        state.session.passenger_count() == 2,
        "expected two passengers, got {}",
        state.session.passenger_count()
    );
    ensure!(
        state.session.selected_seats == picked[..2],
        "expected seats {:?}, got {:?}",
        &picked[..2],
        state.session.selected_seats
    );
    let dropped = &picked[2];
    ensure!(
        state.seat_map.get(dropped).map(|s| s.status) == Some(SeatStatus::Available),
        "trimmed seat {dropped} should be released"
    );

    harness.next()?;
    ensure!(
        harness.state().session.selected_seats.len() == 2,
        "seat selection lost on re-entering step two"
    );
    Ok(())
}

/// A failed POST keeps the user on the summary with a retry that succeeds.
pub fn submission_failure(seed: u64) -> Result<()> {
    let mut harness = BookingHarness::new(TransportType::Bus, 1, seed);
    harness.advance_to(WizardStep::Payment)?;
    harness.engine().store().fail_next_insert();
    harness.next()?;

    let SubmissionState::Failed { message } = &harness.state().submission else {
        bail!(
            "submission should fail, got {:?}",
            harness.state().submission
        );
    };
    ensure!(
        message.contains("Error creating booking"),
        "unexpected failure message: {message}"
    );
    ensure!(
        harness.engine().store().is_empty(),
        "failed insert left a booking behind"
    );

    harness.send(WizardAction::RetrySubmission);
    ensure!(
        harness.state().submission.is_settled(),
        "retry should settle, got {:?}",
        harness.state().submission
    );
    ensure!(
        harness.engine().store().len() == 1,
        "retry should store exactly one booking"
    );
    harness.send(WizardAction::Previous);
    ensure!(
        harness.step() == WizardStep::Summary,
        "a settled booking must not step back"
    );
    Ok(())
}

/// Cabin tabs partition the flight grid by row band.
pub fn cabin_filter(seed: u64) -> Result<()> {
    let mut harness = BookingHarness::new(TransportType::Flight, 1, seed);
    harness.advance_to(WizardStep::SeatSelection)?;
    let mut seen = 0;
    for cabin in CabinClass::ALL {
        harness.send(WizardAction::SelectCabin(cabin));
        let state = harness.state();
        ensure!(state.cabin == cabin, "cabin tab did not switch to {cabin:?}");
        for seat in state.seat_map.visible(cabin) {
            let row = seat
                .row()
                .with_context(|| format!("seat {} has no row", seat.id))?;
            ensure!(
                cabin.contains_row(row),
                "seat {} shown under {}",
                seat.id,
                cabin.label()
            );
            seen += 1;
        }
    }
    let total = harness.state().seat_map.len();
    ensure!(
        seen == total,
        "cabin tabs cover {seen} of {total} seats"
    );
    Ok(())
}

/// Card numbers group in fours and stop at sixteen digits.
pub fn card_format(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let grouped = pattern(r"^\d{4}( \d{4}){3}$")?;
    let digits: String = (0..20)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();

    let formatted = format_card_number(&digits);
    ensure!(
        grouped.is_match(&formatted),
        "{digits} formatted as {formatted}"
    );
    ensure!(
        formatted.replace(' ', "") == digits[..16],
        "formatting changed the digits of {digits}"
    );

    let spaced = format_card_number(&formatted);
    ensure!(spaced == formatted, "reformatting is not stable: {spaced}");

    let short = &digits[..3];
    ensure!(
        format_card_number(short) == short,
        "short input {short} should pass through"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKS: [(&str, BookingCheck); 11] = [
        ("smoke", smoke),
        ("happy-path", happy_path),
        ("step-gating", step_gating),
        ("seat-budget", seat_budget),
        ("seat-toggle", seat_toggle),
        ("grid-cardinality", grid_cardinality),
        ("occupied-seat", occupied_seat),
        ("passenger-removal", passenger_removal),
        ("submission-failure", submission_failure),
        ("cabin-filter", cabin_filter),
        ("card-format", card_format),
    ];

    #[test]
    fn checks_hold_across_seeds() {
        for seed in [1, 7, 42, 1337] {
            for (name, check) in CHECKS {
                if let Err(err) = check(seed) {
                    panic!("{name} failed for seed {seed}: {err:#}");
                }
            }
        }
    }

    #[test]
    fn pattern_reports_bad_regex() {
        let err = pattern("(").expect_err("unbalanced group");
        assert!(format!("{err:#}").contains("compiling ("));
    }
}
