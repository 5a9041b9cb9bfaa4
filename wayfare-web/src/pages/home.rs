use crate::router::Route;
use wayfare_booking::{BookingCatalog, TransportType};
use yew::prelude::*;
use yew_router::prelude::Link;

/// Landing page: start a booking per transport type or open a sample booking.
#[function_component(Home)]
pub fn home() -> Html {
    let catalog = BookingCatalog::default_catalog();
    html! {
        <section class="max-w-4xl mx-auto p-4" data-testid="home">
            <h1 class="text-3xl font-bold mb-6">{ "Plan your trip" }</h1>
            <div class="grid gap-4 md:grid-cols-4 mb-10">
                { for TransportType::ALL.iter().map(|transport| {
                    let query = vec![("type".to_string(), transport.as_str().to_string())];
                    html! {
                        <Link<Route, Vec<(String, String)>>
                            to={Route::Booking}
                            query={Some(query)}
                            classes="btn btn-outline"
                        >
                            { format!("Book a {}", transport.as_str()) }
                        </Link<Route, Vec<(String, String)>>>
                    }
                }) }
            </div>
            <h2 class="text-xl font-semibold mb-2">{ "Your bookings" }</h2>
            <ul class="menu bg-base-200 rounded-box" data-testid="home-bookings">
                { for catalog.bookings.iter().map(|booking| html! {
                    <li>
                        <Link<Route> to={Route::BookingDetail { id: booking.id.clone() }}>
                            { format!("{} · {}", booking.title, booking.amount) }
                        </Link<Route>>
                    </li>
                }) }
            </ul>
        </section>
    }
}
