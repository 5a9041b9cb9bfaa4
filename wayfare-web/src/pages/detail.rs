use crate::router::Route;
use wayfare_booking::catalog::{Journey, Stay};
use wayfare_booking::{BookingCatalog, BookingDetail, Itinerary, Lookup};
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Eq)]
pub struct BookingDetailPageProps {
    pub id: AttrValue,
}

fn fact(label: &'static str, value: String) -> Html {
    html! {
        <div class="stat">
            <div class="stat-title">{ label }</div>
            <div class="stat-value text-lg">{ value }</div>
        </div>
    }
}

fn journey_facts(journey: &Journey) -> Html {
    html! {
        <div class="stats stats-vertical md:stats-horizontal" data-testid="detail-journey">
            { fact("From", journey.from.clone()) }
            { fact("To", journey.to.clone()) }
            { fact("Date", format!("{} {}", journey.date, journey.time)) }
            { fact("Duration", journey.duration.clone()) }
            { fact("Passengers", journey.passengers.to_string()) }
        </div>
    }
}

fn stay_facts(stay: &Stay) -> Html {
    html! {
        <div class="stats stats-vertical md:stats-horizontal" data-testid="detail-stay">
            { fact("Location", stay.location.clone()) }
            { fact("Check-in", stay.check_in.clone()) }
            { fact("Check-out", stay.check_out.clone()) }
            { fact("Room", stay.room_type.clone()) }
            { fact("Guests", stay.guests.to_string()) }
            { fact("Nights", stay.nights.to_string()) }
        </div>
    }
}

fn detail_view(detail: &BookingDetail) -> Html {
    let facts = match &detail.itinerary {
        Itinerary::Hotel(stay) => stay_facts(stay),
        Itinerary::Flight(journey) | Itinerary::Train(journey) | Itinerary::Bus(journey) => {
            journey_facts(journey)
        }
    };
    html! {
        <article class="card bg-base-100 shadow p-6" data-testid="booking-detail">
            <header class="flex justify-between items-start mb-4">
                <div>
                    <h1 class="text-2xl font-bold">{ detail.title.clone() }</h1>
                    <p class="opacity-70">
                        { format!("{} · {}", detail.provider, detail.itinerary.transport().title()) }
                    </p>
                </div>
                <span class="badge badge-success" data-testid="detail-status">{ detail.status.label() }</span>
            </header>
            { facts }
            <footer class="flex justify-between items-center mt-6">
                <span data-testid="detail-number">{ format!("Booking #{}", detail.booking_number) }</span>
                <span class="text-xl font-semibold" data-testid="detail-amount">{ detail.amount.clone() }</span>
            </footer>
            <Link<Route> to={Route::Home} classes="btn btn-ghost mt-4">{ "Back to Travel" }</Link<Route>>
        </article>
    }
}

fn not_found_view(message: &'static str) -> Html {
    html! {
        <section class="text-center py-16" role="alert" data-testid="booking-not-found">
            <h1 class="text-2xl font-bold">{ "Booking Not Found" }</h1>
            <p class="my-4">{ message }</p>
            <Link<Route> to={Route::Home} classes="btn btn-primary">{ "Return to Travel" }</Link<Route>>
        </section>
    }
}

/// `/booking/:id`: sample booking details after a short simulated fetch.
#[function_component(BookingDetailPage)]
pub fn booking_detail_page(props: &BookingDetailPageProps) -> Html {
    let loaded = use_state(|| !cfg!(target_arch = "wasm32"));

    #[cfg(target_arch = "wasm32")]
    {
        let loaded = loaded.clone();
        use_effect_with(props.id.clone(), move |_| {
            loaded.set(false);
            let delay = i32::try_from(wayfare_booking::catalog::DETAIL_LOAD_DELAY_MS)
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

    if !*loaded {
        return html! {
            <div class="flex justify-center py-16" role="status" data-testid="detail-loading">
                <span class="loading loading-spinner loading-lg" aria-label="Loading booking"></span>
            </div>
        };
    }

    match BookingCatalog::default_catalog().lookup(&props.id) {
        Lookup::Found(detail) => detail_view(detail),
        Lookup::NotFound { message } => not_found_view(message),
    }
}
