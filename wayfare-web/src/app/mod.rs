use crate::a11y;
use crate::pages::booking::BookingRoute;
use crate::pages::confirmation::ConfirmationRoute;
use crate::pages::detail::BookingDetailPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod effects;
pub mod state;
pub mod test_bridge;

#[must_use]
pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Booking => html! { <BookingRoute /> },
        Route::Confirmation => html! { <ConfirmationRoute /> },
        Route::BookingDetail { id } => html! { <BookingDetailPage id={AttrValue::from(id)} /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

/// Page chrome around the routed view. Expects a router above it.
#[function_component(AppShell)]
pub fn app_shell() -> Html {
    html! {
        <>
            <style>{ a11y::visible_focus_css() }</style>
            <div id={a11y::STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></div>
            <main id="main" class="min-h-screen bg-base-200 py-6">
                <Switch<Route> render={switch} />
            </main>
        </>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppShell />
        </BrowserRouter>
    }
}
