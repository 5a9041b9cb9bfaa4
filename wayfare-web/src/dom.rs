use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, Headers, HtmlInputElement, HtmlSelectElement, Request, RequestInit, Response, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Send a failed browser call to the console. Returns `true` on success.
pub fn report_js_result(result: Result<(), JsValue>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            console_error(&js_error_message(&err));
            false
        }
    }
}

/// Show a blocking `alert()` dialog.
pub fn alert(message: &str) {
    if let Some(win) = window() {
        report_js_result(win.alert_with_message(message));
    }
}

/// Open the browser print dialog.
pub fn print() {
    if let Some(win) = window() {
        report_js_result(win.print());
    }
}

/// Raw `location.search`, including the leading `?`.
#[must_use]
pub fn location_search() -> Option<String> {
    window().and_then(|win| win.location().search().ok())
}

/// Millisecond clock folded into a seed.
#[must_use]
pub fn clock_seed() -> u64 {
    js_sys::Date::now().to_bits()
}

/// Current value of the `<input>` or `<select>` that fired `event`.
#[must_use]
pub fn event_value(event: &Event) -> Option<String> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    target.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: i32) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    let closure = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        duration_ms,
    )?;
    closure.forget();

    JsFuture::from(promise).await?;
    Ok(())
}

/// POST a JSON body and return the response status with its text.
///
/// # Errors
/// Returns an error if the request cannot be built, the network call fails,
/// or the body cannot be read.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn post_json(url: &str, body: &str) -> Result<(u16, String), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));
    let request = Request::new_with_str_and_init(url, &init)?;

    let resp_value = JsFuture::from(win.fetch_with_request(&request)).await?;
    let response: Response = resp_value.dyn_into()?;
    let text = JsFuture::from(response.text()?).await?;
    Ok((response.status(), text.as_string().unwrap_or_default()))
}
