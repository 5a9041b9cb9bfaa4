use super::{field_error, input_class};
use crate::dom;
use wayfare_booking::{
    BookingSession, ContactField, FieldErrors, FieldKey, Gender, PassengerField, WizardAction,
};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PassengerStepProps {
    pub session: BookingSession,
    pub errors: FieldErrors,
    pub on_action: Callback<WizardAction>,
}

fn edit_passenger(
    on_action: &Callback<WizardAction>,
    index: usize,
    field: PassengerField,
) -> Callback<Event> {
    let cb = on_action.clone();
    Callback::from(move |e: Event| {
        if let Some(value) = dom::event_value(&e) {
            cb.emit(WizardAction::EditPassenger {
                index,
                field,
                value,
            });
        }
    })
}

fn edit_contact(on_action: &Callback<WizardAction>, field: ContactField) -> Callback<InputEvent> {
    let cb = on_action.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(value) = dom::event_value(&e) {
            cb.emit(WizardAction::EditContact { field, value });
        }
    })
}

fn blur(on_action: &Callback<WizardAction>, key: FieldKey) -> Callback<FocusEvent> {
    let cb = on_action.clone();
    Callback::from(move |_| cb.emit(WizardAction::BlurField(key)))
}

/// Step 1: passenger cards plus the contact block.
#[function_component(PassengerStep)]
pub fn passenger_step(props: &PassengerStepProps) -> Html {
    let on_add = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(WizardAction::AddPassenger))
    };
    let errors = &props.errors;

    let passengers = props.session.passengers.iter().enumerate().map(|(index, passenger)| {
        let name_key = FieldKey::PassengerName(index);
        let age_key = FieldKey::PassengerAge(index);
        let on_name = {
            let cb = edit_passenger(&props.on_action, index, PassengerField::Name);
            Callback::from(move |e: InputEvent| cb.emit(e.into()))
        };
        let on_age = {
            let cb = edit_passenger(&props.on_action, index, PassengerField::Age);
            Callback::from(move |e: InputEvent| cb.emit(e.into()))
        };
        let on_gender = edit_passenger(&props.on_action, index, PassengerField::Gender);
        let remove = (index > 0).then(|| {
            let cb = props.on_action.clone();
            let on_remove = Callback::from(move |_| cb.emit(WizardAction::RemovePassenger { index }));
            html! {
                <button
                    type="button"
                    class="btn btn-ghost btn-sm text-error"
                    onclick={on_remove}
                    data-testid={format!("remove-passenger-{index}")}
                >
                    { "Remove" }
                </button>
            }
        });

        html! {
            <fieldset class="card bg-base-200 p-4 mb-4" data-testid={format!("passenger-{index}")}>
                <legend class="font-semibold flex justify-between w-full">
                    <span>{ format!("Passenger {}", index + 1) }</span>
                    { for remove }
                </legend>
                <div class="grid gap-4 md:grid-cols-3">
                    <label class="form-control">
                        <span class="label-text">{ "Full Name" }</span>
                        <input
                            id={name_key.to_string()}
                            type="text"
                            class={input_class(errors, name_key)}
                            value={passenger.name.clone()}
                            placeholder="As on ID proof"
                            aria-invalid={errors.get(name_key).is_some().then_some("true")}
                            oninput={on_name}
                            onblur={blur(&props.on_action, name_key)}
                            data-testid={format!("input-{name_key}")}
                        />
                        { field_error(errors, name_key) }
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ "Age" }</span>
                        <input
                            id={age_key.to_string()}
                            type="number"
                            min="1"
                            max="120"
                            class={input_class(errors, age_key)}
                            value={passenger.age.clone()}
                            aria-invalid={errors.get(age_key).is_some().then_some("true")}
                            oninput={on_age}
                            onblur={blur(&props.on_action, age_key)}
                            data-testid={format!("input-{age_key}")}
                        />
                        { field_error(errors, age_key) }
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ "Gender" }</span>
                        <select
                            class="select select-bordered w-full"
                            onchange={on_gender}
                            data-testid={format!("input-passenger-{index}-gender")}
                        >
                            { for Gender::ALL.iter().map(|gender| html! {
                                <option value={gender.label()} selected={*gender == passenger.gender}>
                                    { gender.label() }
                                </option>
                            }) }
                        </select>
                    </label>
                </div>
            </fieldset>
        }
    });

    html! {
        <section class="passenger-step" data-testid="step-passengers">
            <h2 class="text-xl font-bold mb-4">{ "Passenger Details" }</h2>
            { for passengers }
            <button type="button" class="btn btn-outline btn-sm mb-6" onclick={on_add} data-testid="add-passenger">
                { "+ Add Passenger" }
            </button>
            <fieldset class="card bg-base-200 p-4" data-testid="contact-details">
                <legend class="font-semibold">{ "Contact Details" }</legend>
                <div class="grid gap-4 md:grid-cols-2">
                    <label class="form-control">
                        <span class="label-text">{ "Email" }</span>
                        <input
                            id={FieldKey::ContactEmail.to_string()}
                            type="email"
                            class={input_class(errors, FieldKey::ContactEmail)}
                            value={props.session.contact_email.clone()}
                            oninput={edit_contact(&props.on_action, ContactField::Email)}
                            onblur={blur(&props.on_action, FieldKey::ContactEmail)}
                            data-testid="input-contactEmail"
                        />
                        { field_error(errors, FieldKey::ContactEmail) }
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ "Phone number" }</span>
                        <input
                            id={FieldKey::ContactPhone.to_string()}
                            type="tel"
                            class={input_class(errors, FieldKey::ContactPhone)}
                            value={props.session.contact_phone.clone()}
                            oninput={edit_contact(&props.on_action, ContactField::Phone)}
                            onblur={blur(&props.on_action, FieldKey::ContactPhone)}
                            data-testid="input-contactPhone"
                        />
                        { field_error(errors, FieldKey::ContactPhone) }
                    </label>
                </div>
            </fieldset>
        </section>
    }
}
