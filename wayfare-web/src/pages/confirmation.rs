use super::{fallback_seed, query_value, use_query_pairs};
use crate::router::Route;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wayfare_booking::Confirmation;
use wayfare_booking::summary::SUPPORT_PHONE;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Eq)]
pub struct ConfirmationPageProps {
    #[prop_or_default]
    pub booking_id: Option<AttrValue>,
    #[prop_or_default]
    pub seed: u64,
}

/// `/booking/confirmation?id=`.
#[function_component(ConfirmationRoute)]
pub fn confirmation_route() -> Html {
    let pairs = use_query_pairs();
    let booking_id = query_value(&pairs, "id")
        .filter(|id| !id.is_empty())
        .map(|id| AttrValue::from(id.to_string()));
    let seed = query_value(&pairs, "seed")
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or_else(fallback_seed);
    html! { <ConfirmationPage {booking_id} {seed} /> }
}

/// Standalone confirmation for a booking id, with a freshly drawn PNR.
#[function_component(ConfirmationPage)]
pub fn confirmation_page(props: &ConfirmationPageProps) -> Html {
    let loaded = use_state(|| !cfg!(target_arch = "wasm32"));

    #[cfg(target_arch = "wasm32")]
    {
        let loaded = loaded.clone();
        use_effect_with((), move |()| {
            let delay = i32::try_from(wayfare_booking::summary::CONFIRMATION_LOAD_DELAY_MS)
                .unwrap_or(i32::MAX);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = crate::dom::sleep_ms(delay).await {
                    crate::dom::console_error(&crate::dom::js_error_message(&err));
                }
                loaded.set(true);
            });
            || {}
        });
    }

    let confirmation = {
        let booking_id = props.booking_id.clone();
        let seed = props.seed;
        use_memo((booking_id, seed), |(booking_id, seed)| {
            booking_id.as_ref().map(|id| {
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                Confirmation::for_booking(id, &mut rng)
            })
        })
    };

    if !*loaded {
        return html! {
            <div class="flex justify-center py-16" role="status" data-testid="confirmation-loading">
                <span class="loading loading-spinner loading-lg" aria-label="Loading confirmation"></span>
            </div>
        };
    }

    let Some(confirmation) = &*confirmation else {
        return html! {
            <section class="text-center py-16" role="alert" data-testid="confirmation-missing">
                <h1 class="text-2xl font-bold">{ "No booking reference supplied." }</h1>
                <Link<Route> to={Route::Home} classes="btn btn-primary mt-4">{ "Return to Travel" }</Link<Route>>
            </section>
        };
    };

    html! {
        <section class="card bg-base-100 shadow p-6 max-w-xl mx-auto text-center" data-testid="confirmation">
            <h1 class="text-3xl font-bold text-success">{ "Booking Confirmed!" }</h1>
            <p class="my-2" data-testid="confirmation-id">{ format!("Booking ID: {}", confirmation.id) }</p>
            <p class="my-2" data-testid="confirmation-pnr">{ format!("PNR: {}", confirmation.pnr) }</p>
            <p class="badge badge-success" data-testid="confirmation-status">{ confirmation.status.label() }</p>
            <p class="text-sm opacity-70 mt-4">{ format!("Need help? Call {SUPPORT_PHONE}") }</p>
            <Link<Route> to={Route::Home} classes="btn btn-primary mt-4">{ "Back to Travel" }</Link<Route>>
        </section>
    }
}
