use super::shared::{fill_actions, pick_available, snapshot};
use crate::app::state::WizardHandle;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wayfare_booking::WizardAction;
use yew::prelude::*;

type Latest = Rc<RefCell<WizardHandle>>;

struct BridgeBindings {
    _state: Closure<dyn FnMut() -> JsValue>,
    _fill: Closure<dyn FnMut()>,
    _pick_seats: Closure<dyn FnMut()>,
    _click_seat: Closure<dyn FnMut(JsValue)>,
    _next: Closure<dyn FnMut()>,
    _previous: Closure<dyn FnMut()>,
}

impl BridgeBindings {
    fn keep(&self) {
        let _ = (
            &self._state,
            &self._fill,
            &self._pick_seats,
            &self._click_seat,
            &self._next,
            &self._previous,
        );
    }
}

fn test_mode_enabled() -> bool {
    dom::location_search()
        .map(|search| search.contains("test=1"))
        .unwrap_or(false)
}

fn build_bridge(handle: &WizardHandle, latest: &Latest) -> BridgeBindings {
    let state_latest = latest.clone();
    let state_fn = Closure::wrap(Box::new(move || {
        let store = state_latest.borrow().clone();
        serde_wasm_bindgen::to_value(&snapshot(&store)).unwrap_or(JsValue::NULL)
    }) as Box<dyn FnMut() -> JsValue>);

    let fill_latest = latest.clone();
    let fill_dispatch = handle.dispatcher();
    let fill = Closure::wrap(Box::new(move || {
        let store = fill_latest.borrow().clone();
        for action in fill_actions(store.state()) {
            fill_dispatch.dispatch(action);
        }
    }) as Box<dyn FnMut()>);

    let pick_latest = latest.clone();
    let pick_dispatch = handle.dispatcher();
    let pick_seats = Closure::wrap(Box::new(move || {
        let store = pick_latest.borrow().clone();
        let wanted = store.state().session.seats_remaining();
        for seat_id in pick_available(store.state(), wanted) {
            pick_dispatch.dispatch(WizardAction::ClickSeat(seat_id));
        }
    }) as Box<dyn FnMut()>);

    let click_dispatch = handle.dispatcher();
    let click_seat = Closure::wrap(Box::new(move |value: JsValue| {
        if let Some(seat_id) = value.as_string() {
            click_dispatch.dispatch(WizardAction::ClickSeat(seat_id));
        }
    }) as Box<dyn FnMut(JsValue)>);

    let next_dispatch = handle.dispatcher();
    let next = Closure::wrap(Box::new(move || {
        next_dispatch.dispatch(WizardAction::Next);
    }) as Box<dyn FnMut()>);

    let previous_dispatch = handle.dispatcher();
    let previous = Closure::wrap(Box::new(move || {
        previous_dispatch.dispatch(WizardAction::Previous);
    }) as Box<dyn FnMut()>);

    BridgeBindings {
        _state: state_fn,
        _fill: fill,
        _pick_seats: pick_seats,
        _click_seat: click_seat,
        _next: next,
        _previous: previous,
    }
}

fn attach_bridge(bindings: &BridgeBindings) {
    let Some(window) = dom::window() else {
        return;
    };
    let bridge = js_sys::Object::new();
    let entries: [(&str, &JsValue); 6] = [
        ("state", bindings._state.as_ref()),
        ("fill", bindings._fill.as_ref()),
        ("pickSeats", bindings._pick_seats.as_ref()),
        ("clickSeat", bindings._click_seat.as_ref()),
        ("next", bindings._next.as_ref()),
        ("previous", bindings._previous.as_ref()),
    ];
    for (name, func) in entries {
        let _ = js_sys::Reflect::set(&bridge, &JsValue::from_str(name), func);
    }
    let _ = js_sys::Reflect::set(&window, &JsValue::from_str("__wayfareTest"), &bridge);
}

#[hook]
pub fn use_test_bridge(handle: &WizardHandle) {
    let bridge_handle = use_mut_ref(|| None::<BridgeBindings>);
    let installed = use_mut_ref(|| false);
    let latest = use_mut_ref(|| handle.clone());
    *latest.borrow_mut() = handle.clone();

    let handle = handle.clone();
    use_effect_with((), move |()| {
        let cleanup = || {};
        if *installed.borrow() {
            return cleanup;
        }
        *installed.borrow_mut() = true;
        if test_mode_enabled() {
            let bindings = build_bridge(&handle, &latest);
            attach_bridge(&bindings);
            bindings.keep();
            *bridge_handle.borrow_mut() = Some(bindings);
        }
        cleanup
    });
}
