use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::Link;

/// Not-found page to show when routing fails to match a known view.
#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <section class="panel not-found text-center py-16" aria-live="assertive" data-testid="not-found">
            <h1 class="text-3xl font-bold">{ "Page Not Found" }</h1>
            <p class="my-4">{ "The page you were looking for does not exist." }</p>
            <Link<Route> to={Route::Home} classes="btn btn-primary">{ "Return to Travel" }</Link<Route>>
        </section>
    }
}
