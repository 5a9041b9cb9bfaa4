use crate::app::state::WizardHandle;
use yew::prelude::*;

/// Surface the latest alert and run the latest effect exactly once per dispatch.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_wizard_effects(handle: &WizardHandle) {
    use wayfare_booking::{WizardAction, WizardEffect};

    let handle = handle.clone();
    use_effect_with(handle.ticket, move |_| {
        if let Some(alert) = &handle.last.alert {
            crate::a11y::announce_alert(&alert.to_string());
        }
        match handle.last.effect.clone() {
            Some(WizardEffect::SubmitBooking(record)) => {
                crate::a11y::set_status("Submitting your booking");
                let dispatcher = handle.dispatcher();
                wasm_bindgen_futures::spawn_local(async move {
                    let action =
                        crate::api::outcome_action(crate::api::submit_booking(record).await);
                    if let WizardAction::SubmissionFailed { message } = &action {
                        crate::a11y::set_status(message);
                    }
                    dispatcher.dispatch(action);
                });
            }
            Some(WizardEffect::SimulatePayment { delay_ms }) => {
                let dispatcher = handle.dispatcher();
                let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = crate::dom::sleep_ms(delay).await {
                        crate::dom::console_error(&crate::dom::js_error_message(&err));
                    }
                    dispatcher.dispatch(WizardAction::PaymentSettled);
                });
            }
            None => {}
        }
        || {}
    });
}

#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_wizard_effects(handle: &WizardHandle) {
    let _ = handle;
}
