use crate::dom;
use crate::router::Route;
use wayfare_booking::summary::SUPPORT_PHONE;
use wayfare_booking::{Receipt, SubmissionState, WizardAction};
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub struct SummaryStepProps {
    pub receipt: Option<Receipt>,
    pub submission: SubmissionState,
    pub on_action: Callback<WizardAction>,
}

fn detail_row(label: &'static str, value: String, testid: &'static str) -> Html {
    html! {
        <div class="flex justify-between py-1">
            <dt class="opacity-70">{ label }</dt>
            <dd class="font-medium" data-testid={testid}>{ value }</dd>
        </div>
    }
}

fn receipt_view(receipt: &Receipt, stored_id: &str) -> Html {
    let on_print = Callback::from(|_| dom::print());
    html! {
        <article class="receipt card bg-base-100 shadow p-6" data-testid="receipt">
            <header class="text-center mb-4">
                <h2 class="text-2xl font-bold text-success">{ "Booking Confirmed!" }</h2>
                <p class="opacity-70">{ receipt.ticket_title.clone() }</p>
            </header>
            <dl>
                { detail_row("Booking ID", receipt.booking_id.clone(), "receipt-booking-id") }
                { detail_row("PNR", receipt.pnr.clone(), "receipt-pnr") }
                { detail_row("Transaction ID", receipt.transaction_id.clone(), "receipt-transaction") }
                { detail_row("Route", receipt.route(), "receipt-route") }
                { detail_row("Departure", receipt.departure_date.clone(), "receipt-departure") }
                if let Some(ret) = receipt.return_date.clone() {
                    { detail_row("Return", ret, "receipt-return") }
                }
                { detail_row("Seats", receipt.seats.clone(), "receipt-seats") }
                { detail_row("Email", receipt.contact_email.clone(), "receipt-email") }
                { detail_row("Phone", receipt.contact_phone.clone(), "receipt-phone") }
                { detail_row("Payment", receipt.payment_method.clone(), "receipt-payment") }
                { detail_row("Amount Paid", receipt.price.clone(), "receipt-price") }
                { detail_row("Reference", stored_id.to_string(), "receipt-reference") }
            </dl>
            <table class="table table-sm mt-4" data-testid="receipt-passengers">
                <thead>
                    <tr><th>{ "Passenger" }</th><th>{ "Age" }</th><th>{ "Gender" }</th></tr>
                </thead>
                <tbody>
                    { for receipt.passengers.iter().map(|p| html! {
                        <tr><td>{ p.name.clone() }</td><td>{ p.age.clone() }</td><td>{ p.gender.label() }</td></tr>
                    }) }
                </tbody>
            </table>
            <p class="text-sm opacity-70 mt-4">
                { format!("Need help? Call {SUPPORT_PHONE}") }
            </p>
            <footer class="flex gap-2 mt-4 print:hidden">
                <button type="button" class="btn btn-primary" onclick={on_print} data-testid="print-ticket">
                    { "Print Ticket" }
                </button>
                <Link<Route> to={Route::Home} classes="btn btn-ghost">{ "Back to Travel" }</Link<Route>>
            </footer>
        </article>
    }
}

/// Step 4: awaits the booking POST, then shows the receipt or a retryable failure.
#[function_component(SummaryStep)]
pub fn summary_step(props: &SummaryStepProps) -> Html {
    let body = match (&props.submission, &props.receipt) {
        (SubmissionState::Succeeded { booking_id }, Some(receipt)) => {
            receipt_view(receipt, booking_id)
        }
        (SubmissionState::Failed { message }, _) => {
            let on_retry = {
                let cb = props.on_action.clone();
                Callback::from(move |_| cb.emit(WizardAction::RetrySubmission))
            };
            html! {
                <div class="alert alert-error flex-col items-start" role="alert" data-testid="submission-failed">
                    <h2 class="font-bold">{ "We could not save your booking." }</h2>
                    <p>{ message.clone() }</p>
                    <button type="button" class="btn btn-sm" onclick={on_retry} data-testid="retry-submission">
                        { "Try again" }
                    </button>
                </div>
            }
        }
        _ => html! {
            <div class="flex items-center gap-3" role="status" data-testid="submission-pending">
                <span class="loading loading-spinner" aria-hidden="true"></span>
                <span>{ "Confirming your booking..." }</span>
            </div>
        },
    };

    html! {
        <section class="summary-step" data-testid="step-summary">
            { body }
        </section>
    }
}
