pub mod passenger_step;
pub mod payment_step;
pub mod progress;
pub mod seat_step;
pub mod summary_step;

use wayfare_booking::{FieldErrors, FieldKey};
use yew::prelude::*;

/// Inline validation message for one field, if any.
pub(crate) fn field_error(errors: &FieldErrors, key: FieldKey) -> Html {
    errors.get(key).map_or_else(Html::default, |message| {
        html! {
            <p class="text-error text-sm mt-1" role="alert" data-testid={format!("error-{key}")}>
                { message.to_string() }
            </p>
        }
    })
}

/// DaisyUI input class, switched to the error variant when the field failed.
pub(crate) fn input_class(errors: &FieldErrors, key: FieldKey) -> Classes {
    classes!(
        "input",
        "input-bordered",
        "w-full",
        errors.get(key).is_some().then_some("input-error")
    )
}
