use crate::dom;
use wayfare_booking::{CardField, PaymentMethod, PaymentState, PaymentStatus, WizardAction};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaymentStepProps {
    pub method: PaymentMethod,
    pub payment: PaymentState,
    pub price: AttrValue,
    pub on_action: Callback<WizardAction>,
}

fn card_input(
    label: &'static str,
    field: CardField,
    value: &str,
    placeholder: &'static str,
    on_action: &Callback<WizardAction>,
) -> Html {
    let oninput = {
        let cb = on_action.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = dom::event_value(&e) {
                cb.emit(WizardAction::EditCard { field, value });
            }
        })
    };
    html! {
        <label class="form-control">
            <span class="label-text">{ label }</span>
            <input
                type="text"
                class="input input-bordered w-full"
                value={value.to_string()}
                {placeholder}
                {oninput}
                data-testid={format!("card-{field:?}").to_lowercase()}
            />
        </label>
    }
}

fn method_details(props: &PaymentStepProps) -> Html {
    let card = &props.payment.card;
    match props.method {
        PaymentMethod::CreditCard => html! {
            <div class="grid gap-4 md:grid-cols-2" data-testid="card-form">
                { card_input("Card Number", CardField::Number, &card.number, "1234 5678 9012 3456", &props.on_action) }
                { card_input("Name on Card", CardField::Name, &card.name, "", &props.on_action) }
                { card_input("Expiry", CardField::Expiry, &card.expiry, "MM/YY", &props.on_action) }
                { card_input("CVV", CardField::Cvv, &card.cvv, "123", &props.on_action) }
            </div>
        },
        PaymentMethod::Upi => {
            let oninput = {
                let cb = props.on_action.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(value) = dom::event_value(&e) {
                        cb.emit(WizardAction::EditUpi(value));
                    }
                })
            };
            html! {
                <label class="form-control" data-testid="upi-form">
                    <span class="label-text">{ "UPI ID" }</span>
                    <input
                        type="text"
                        class="input input-bordered w-full"
                        placeholder="name@bank"
                        value={props.payment.upi_id.clone()}
                        {oninput}
                        data-testid="upi-id"
                    />
                </label>
            }
        }
        other => html! {
            <p class="text-sm opacity-80" data-testid="redirect-note">
                { format!("You will be redirected to {} to complete the payment.", other.display_name()) }
            </p>
        },
    }
}

/// Step 3: method picker with cosmetic detail fields and a simulated processor.
#[function_component(PaymentStep)]
pub fn payment_step(props: &PaymentStepProps) -> Html {
    let status = props.payment.status;
    let locked = status == PaymentStatus::Processing;

    let on_process = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(WizardAction::ProcessPayment))
    };
    let process_label = match status {
        PaymentStatus::Idle => format!("Pay {}", props.price),
        PaymentStatus::Processing => String::from("Processing..."),
        PaymentStatus::Succeeded => String::from("Paid"),
    };

    html! {
        <section class="payment-step" data-testid="step-payment">
            <h2 class="text-xl font-bold mb-4">{ "Payment" }</h2>
            <div class="grid gap-2 md:grid-cols-5 mb-6" role="radiogroup" aria-label="Payment method">
                { for PaymentMethod::ALL.iter().map(|method| {
                    let method = *method;
                    let cb = props.on_action.clone();
                    let onclick = Callback::from(move |_| cb.emit(WizardAction::SelectPaymentMethod(method)));
                    let active = method == props.method;
                    html! {
                        <button
                            type="button"
                            role="radio"
                            class={classes!("card", "p-3", "border", active.then_some("border-primary"))}
                            aria-checked={active.to_string()}
                            disabled={locked}
                            data-testid={format!("method-{}", method.id())}
                            {onclick}
                        >
                            { method.display_name() }
                        </button>
                    }
                }) }
            </div>
            { method_details(props) }
            <div class="flex items-center justify-between mt-6">
                <span class="text-lg font-semibold" data-testid="payment-amount">
                    { format!("Total: {}", props.price) }
                </span>
                <button
                    type="button"
                    class="btn btn-secondary"
                    disabled={status != PaymentStatus::Idle}
                    onclick={on_process}
                    data-testid="process-payment"
                >
                    if locked {
                        <span class="loading loading-spinner loading-sm" aria-hidden="true"></span>
                    }
                    { process_label }
                </button>
            </div>
            if status == PaymentStatus::Succeeded {
                <p class="alert alert-success mt-4" role="status" data-testid="payment-success">
                    { "Payment successful. Continue to confirm your booking." }
                </p>
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(method: PaymentMethod, payment: PaymentState) -> String {
        let props = PaymentStepProps {
            method,
            payment,
            price: "₹4,500".into(),
            on_action: Callback::noop(),
        };
        block_on(LocalServerRenderer::<PaymentStep>::with_props(props).render())
    }

    #[test]
    fn card_form_shows_formatted_number() {
        let mut payment = PaymentState::default();
        payment.card.set(CardField::Number, "4111111111111111");
        let html = render(PaymentMethod::CreditCard, payment);
        assert!(html.contains("card-form"));
        assert!(html.contains("4111 1111 1111 1111"));
        assert!(html.contains("Pay ₹4,500"));
    }

    #[test]
    fn wallets_show_redirect_note() {
        let html = render(PaymentMethod::GooglePay, PaymentState::default());
        assert!(html.contains("redirected to Google Pay"));
        assert!(!html.contains("card-form"));
    }

    #[test]
    fn processing_locks_the_controls() {
        let payment = PaymentState {
            status: PaymentStatus::Processing,
            ..PaymentState::default()
        };
        let html = render(PaymentMethod::Upi, payment);
        assert!(html.contains("Processing..."));
        assert!(html.contains("upi-form"));
    }
}
