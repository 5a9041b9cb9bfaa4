use crate::app::state::WizardHandle;
use yew::prelude::*;

#[hook]
pub fn use_test_bridge(handle: &WizardHandle) {
    let _ = handle;
}

#[cfg(test)]
mod tests {
    use crate::app::state::use_wizard;
    use crate::app::test_bridge::use_test_bridge;
    use futures::executor::block_on;
    use wayfare_booking::BookingQuery;
    use yew::LocalServerRenderer;
    use yew::prelude::*;

    #[function_component(TestBridgeHarness)]
    fn test_bridge_harness() -> Html {
        let handle = use_wizard(BookingQuery::default(), 1);
        use_test_bridge(&handle);
        html! { <span>{ handle.state().session.heading() }</span> }
    }

    #[test]
    fn test_bridge_stub_renders() {
        let html = block_on(LocalServerRenderer::<TestBridgeHarness>::new().render());
        assert!(html.contains("Flight Booking"));
    }
}
