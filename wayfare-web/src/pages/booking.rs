use super::{fallback_seed, query_value, use_query_pairs};
use crate::app::effects::use_wizard_effects;
use crate::app::state::use_wizard;
use crate::app::test_bridge::use_test_bridge;
use crate::components::passenger_step::PassengerStep;
use crate::components::payment_step::PaymentStep;
use crate::components::progress::WizardProgress;
use crate::components::seat_step::SeatStep;
use crate::components::summary_step::SummaryStep;
use wayfare_booking::{BookingQuery, WizardAction, WizardState, WizardStep};
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq)]
pub struct BookingPageProps {
    pub query: BookingQuery,
    pub seed: u64,
}

/// `/booking`: seeds the wizard from the query string. `seed=` pins the RNG.
#[function_component(BookingRoute)]
pub fn booking_route() -> Html {
    let pairs = use_query_pairs();
    let seed = query_value(&pairs, "seed")
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or_else(fallback_seed);
    let query = BookingQuery::from_pairs(pairs);
    html! { <BookingPage {query} {seed} /> }
}

fn step_view(state: &WizardState, on_action: &Callback<WizardAction>) -> Html {
    let on_action = on_action.clone();
    match state.step() {
        WizardStep::PassengerDetails => html! {
            <PassengerStep
                session={state.session.clone()}
                errors={state.errors.clone()}
                {on_action}
            />
        },
        WizardStep::SeatSelection => html! {
            <SeatStep
                seat_map={state.seat_map.clone()}
                cabin={state.cabin}
                selected={state.session.selected_seats.clone()}
                passengers={state.session.passenger_count()}
                {on_action}
            />
        },
        WizardStep::Payment => html! {
            <PaymentStep
                method={state.session.payment_method}
                payment={state.payment.clone()}
                price={AttrValue::from(state.session.price_quote.clone())}
                {on_action}
            />
        },
        WizardStep::Summary => html! {
            <SummaryStep
                receipt={state.receipt.clone()}
                submission={state.submission.clone()}
                {on_action}
            />
        },
    }
}

fn trip_line(state: &WizardState) -> String {
    let session = &state.session;
    let mut line = format!("{} → {}", session.origin, session.destination);
    if !session.departure_date.is_empty() {
        line.push_str(&format!(" · {}", session.departure_date));
    }
    if let Some(ret) = &session.return_date {
        line.push_str(&format!(" · return {ret}"));
    }
    line
}

/// The four-step booking wizard.
#[function_component(BookingPage)]
pub fn booking_page(props: &BookingPageProps) -> Html {
    let handle = use_wizard(props.query.clone(), props.seed);
    use_wizard_effects(&handle);
    use_test_bridge(&handle);

    let on_action = {
        let dispatcher = handle.dispatcher();
        Callback::from(move |action: WizardAction| dispatcher.dispatch(action))
    };
    let on_previous = {
        let cb = on_action.clone();
        Callback::from(move |_| cb.emit(WizardAction::Previous))
    };
    let on_next = {
        let cb = on_action.clone();
        Callback::from(move |_| cb.emit(WizardAction::Next))
    };

    let state = handle.state();
    let step = state.step();
    let previous_disabled = step == WizardStep::PassengerDetails
        || (step.is_final() && (state.submission.is_pending() || state.submission.is_settled()));
    let next_label = if step == WizardStep::Payment {
        "Confirm Booking"
    } else {
        "Continue"
    };

    html! {
        <section class="booking-wizard max-w-4xl mx-auto p-4" data-testid="booking-wizard">
            <header class="mb-6">
                <h1 class="text-3xl font-bold" data-testid="wizard-heading">{ state.session.heading() }</h1>
                <p class="opacity-80" data-testid="wizard-trip">{ trip_line(state) }</p>
                <p class="text-sm opacity-70">
                    { format!("Booking ID: {} · {}", state.session.booking_id, state.session.price_quote) }
                </p>
            </header>
            <WizardProgress {step} />
            <div class="card bg-base-100 shadow p-6 my-6">
                { step_view(state, &on_action) }
            </div>
            <nav class="flex justify-between" aria-label="Wizard navigation">
                <button
                    type="button"
                    class="btn btn-outline"
                    disabled={previous_disabled}
                    onclick={on_previous}
                    data-testid="wizard-previous"
                >
                    { "Previous" }
                </button>
                if !step.is_final() {
                    <button type="button" class="btn btn-primary" onclick={on_next} data-testid="wizard-next">
                        { next_label }
                    </button>
                }
            </nav>
        </section>
    }
}
