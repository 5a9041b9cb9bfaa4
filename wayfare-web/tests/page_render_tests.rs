use futures::executor::block_on;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wayfare_booking::catalog::NOT_FOUND_MESSAGE;
use wayfare_booking::{
    BookingSession, Confirmation, Gender, Passenger, PaymentMethod, Receipt, SubmissionState,
    TransportType,
};
use wayfare_web::app::AppShell;
use wayfare_web::components::summary_step::SummaryStep;
use yew::prelude::*;
use yew::LocalServerRenderer;
use yew_router::history::{AnyHistory, History, MemoryHistory};
use yew_router::Router;

#[derive(Properties, PartialEq)]
struct RoutedProps {
    path: AttrValue,
    #[prop_or_default]
    query: Vec<(String, String)>,
}

#[function_component(Routed)]
fn routed(props: &RoutedProps) -> Html {
    let history = AnyHistory::from(MemoryHistory::new());
    history
        .push_with_query(props.path.to_string(), props.query.clone())
        .expect("push route");
    html! {
        <Router {history}>
            <AppShell />
        </Router>
    }
}

fn render_path(path: &str, query: &[(&str, &str)]) -> String {
    let props = RoutedProps {
        path: AttrValue::from(path.to_string()),
        query: query
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
    };
    block_on(LocalServerRenderer::<Routed>::with_props(props).render())
}

#[derive(Properties, PartialEq)]
struct SummaryHarnessProps {
    receipt: Option<Receipt>,
    submission: SubmissionState,
}

#[function_component(SummaryHarness)]
fn summary_harness(props: &SummaryHarnessProps) -> Html {
    let history = AnyHistory::from(MemoryHistory::new());
    html! {
        <Router {history}>
            <SummaryStep
                receipt={props.receipt.clone()}
                submission={props.submission.clone()}
                on_action={Callback::noop()}
            />
        </Router>
    }
}

fn render_summary(receipt: Option<Receipt>, submission: SubmissionState) -> String {
    let props = SummaryHarnessProps {
        receipt,
        submission,
    };
    block_on(LocalServerRenderer::<SummaryHarness>::with_props(props).render())
}

fn sample_receipt() -> Receipt {
    let mut session = BookingSession::new("BK4242", TransportType::Train);
    session.origin = "Mumbai".into();
    session.destination = "Delhi".into();
    session.departure_date = "2025-03-01".into();
    session.price_quote = "₹2,150".into();
    session.passengers = vec![
        Passenger::new("Asha Rao", "31", Gender::Female),
        Passenger::new("Dev Rao", "8", Gender::Male),
    ];
    session.selected_seats = vec!["S1-4".into(), "S1-5".into()];
    session.contact_email = "asha@example.com".into();
    session.contact_phone = "9876543210".into();
    session.payment_method = PaymentMethod::Upi;
    Receipt::derive(&session, &mut ChaCha8Rng::seed_from_u64(9))
}

#[test]
fn booking_route_seeds_wizard_from_query() {
    let html = render_path(
        "/booking",
        &[
            ("type", "bus"),
            ("from", "Pune"),
            ("to", "Goa"),
            ("price", "₹899"),
            ("id", "BK7"),
            ("seed", "3"),
        ],
    );
    assert!(html.contains("Bus Booking"));
    assert!(html.contains("Pune → Goa"));
    assert!(html.contains("Booking ID: BK7"));
    assert!(html.contains("₹899"));
    assert!(html.contains("data-testid=\"step-passengers\""));
    assert!(html.contains("Step 1 of 4"));
    assert!(html.contains(wayfare_web::a11y::STATUS_REGION_ID));
}

#[test]
fn booking_route_defaults_to_flight() {
    let html = render_path("/booking", &[]);
    assert!(html.contains("Flight Booking"));
    assert!(html.contains("Booking ID: BK"));
    assert!(html.contains("₹0"));
}

#[test]
fn unknown_transport_falls_back_to_flight() {
    let html = render_path("/booking", &[("type", "ferry")]);
    assert!(html.contains("Flight Booking"));
}

#[test]
fn detail_route_renders_sample_booking() {
    let html = render_path("/booking/train-456", &[]);
    assert!(html.contains("Express Train to Edinburgh"));
    assert!(html.contains("£95.50"));
    assert!(html.contains("detail-journey"));
}

#[test]
fn hotel_detail_shows_stay() {
    let html = render_path("/booking/hotel-012", &[]);
    assert!(html.contains("detail-stay"));
}

#[test]
fn unknown_detail_renders_not_found_view() {
    let html = render_path("/booking/cruise-999", &[]);
    assert!(html.contains("Booking Not Found"));
    assert!(html.contains(NOT_FOUND_MESSAGE));
    assert!(html.contains("Return to Travel"));
}

#[test]
fn confirmation_route_draws_pnr_from_seed() {
    let html = render_path("/booking/confirmation", &[("id", "BK77"), ("seed", "5")]);
    let expected = Confirmation::for_booking("BK77", &mut ChaCha8Rng::seed_from_u64(5));
    assert!(html.contains("Booking ID: BK77"));
    assert!(html.contains(&format!("PNR: {}", expected.pnr)));
    assert!(html.contains("Confirmed"));
}

fn rendered_pnr(html: &str) -> String {
    let start = html.find("PNR: ").expect("pnr shown") + "PNR: ".len();
    html[start..]
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect()
}

#[test]
fn confirmation_without_seed_draws_fresh_pnrs() {
    let first = rendered_pnr(&render_path("/booking/confirmation", &[("id", "BK111")]));
    let second = rendered_pnr(&render_path("/booking/confirmation", &[("id", "BK999999")]));
    let again = rendered_pnr(&render_path("/booking/confirmation", &[("id", "BK111")]));
    assert_eq!(first.len(), 6);
    assert_ne!(first, second);
    assert_ne!(first, again);
}

#[test]
fn confirmation_without_id_asks_for_reference() {
    let html = render_path("/booking/confirmation", &[]);
    assert!(html.contains("confirmation-missing"));
}

#[test]
fn unmatched_paths_render_not_found() {
    let html = render_path("/nowhere/at/all", &[]);
    assert!(html.contains("Page Not Found"));
}

#[test]
fn home_lists_sample_bookings() {
    let html = render_path("/", &[]);
    assert!(html.contains("Flight to Paris"));
    assert!(html.contains("Book a hotel"));
}

#[test]
fn summary_shows_receipt_once_stored() {
    let receipt = sample_receipt();
    let html = render_summary(
        Some(receipt.clone()),
        SubmissionState::Succeeded {
            booking_id: "65f0c0ffee".into(),
        },
    );
    assert!(html.contains("Booking Confirmed!"));
    assert!(html.contains("Train Ticket"));
    assert!(html.contains(&receipt.pnr));
    assert!(html.contains(&receipt.transaction_id));
    assert!(html.contains("S1-4, S1-5"));
    assert!(html.contains("UPI Payment"));
    assert!(html.contains("65f0c0ffee"));
    assert!(html.contains("Dev Rao"));
}

#[test]
fn summary_failure_offers_retry() {
    let html = render_summary(
        Some(sample_receipt()),
        SubmissionState::Failed {
            message: "server rejected booking (500): Error creating booking".into(),
        },
    );
    assert!(html.contains("retry-submission"));
    assert!(html.contains("Error creating booking"));
    assert!(!html.contains("Booking Confirmed!"));
}

#[test]
fn summary_pending_waits_for_server() {
    let html = render_summary(Some(sample_receipt()), SubmissionState::Pending);
    assert!(html.contains("submission-pending"));
    assert!(!html.contains("data-testid=\"receipt\""));
}
