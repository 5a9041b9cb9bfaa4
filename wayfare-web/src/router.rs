use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/booking")]
    Booking,
    #[at("/booking/confirmation")]
    Confirmation,
    #[at("/booking/:id")]
    BookingDetail { id: String },
    #[at("/404")]
    #[not_found]
    NotFound,
}
