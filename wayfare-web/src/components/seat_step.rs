use wayfare_booking::{CabinClass, Seat, SeatMap, SeatStatus, TransportType, WizardAction};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SeatStepProps {
    pub seat_map: SeatMap,
    pub cabin: CabinClass,
    pub selected: Vec<String>,
    pub passengers: usize,
    pub on_action: Callback<WizardAction>,
}

const fn seat_class(status: SeatStatus) -> &'static str {
    match status {
        SeatStatus::Available => "seat btn btn-sm btn-outline",
        SeatStatus::Occupied => "seat btn btn-sm btn-disabled opacity-50",
        SeatStatus::Selected => "seat btn btn-sm btn-primary",
    }
}

fn seat_button(seat: &Seat, on_action: &Callback<WizardAction>) -> Html {
    let onclick = {
        let cb = on_action.clone();
        let id = seat.id.clone();
        Callback::from(move |_| cb.emit(WizardAction::ClickSeat(id.clone())))
    };
    let occupied = seat.status == SeatStatus::Occupied;
    let selected = seat.status == SeatStatus::Selected;
    html! {
        <button
            type="button"
            class={seat_class(seat.status)}
            disabled={occupied}
            aria-pressed={selected.to_string()}
            aria-label={format!("Seat {}", seat.id)}
            data-status={format!("{:?}", seat.status).to_lowercase()}
            data-testid={format!("seat-{}", seat.id)}
            {onclick}
        >
            { seat.id.clone() }
        </button>
    }
}

fn cabin_tabs(active: CabinClass, on_action: &Callback<WizardAction>) -> Html {
    html! {
        <div role="tablist" class="tabs tabs-boxed mb-4" data-testid="cabin-tabs">
            { for CabinClass::ALL.iter().map(|cabin| {
                let cb = on_action.clone();
                let cabin = *cabin;
                let onclick = Callback::from(move |_| cb.emit(WizardAction::SelectCabin(cabin)));
                let is_active = cabin == active;
                html! {
                    <button
                        type="button"
                        role="tab"
                        class={classes!("tab", is_active.then_some("tab-active"))}
                        aria-selected={is_active.to_string()}
                        data-testid={format!("cabin-{cabin:?}").to_lowercase()}
                        {onclick}
                    >
                        { cabin.label() }
                    </button>
                }
            }) }
        </div>
    }
}

fn legend() -> Html {
    html! {
        <ul class="flex gap-4 text-sm mb-4" aria-label="Seat legend">
            <li><span class="badge badge-outline">{ " " }</span>{ " Available" }</li>
            <li><span class="badge badge-primary">{ " " }</span>{ " Selected" }</li>
            <li><span class="badge opacity-50">{ " " }</span>{ " Occupied" }</li>
        </ul>
    }
}

/// Step 2: seat grid, cabin tabs for flights and a running selection counter.
#[function_component(SeatStep)]
pub fn seat_step(props: &SeatStepProps) -> Html {
    let transport = props.seat_map.transport;
    let counter = html! {
        <p class="font-semibold" aria-live="polite" data-testid="seat-counter">
            { format!("Selected: {} / {}", props.selected.len(), props.passengers) }
        </p>
    };

    if props.seat_map.is_empty() {
        return html! {
            <section class="seat-step" data-testid="step-seats">
                <h2 class="text-xl font-bold mb-4">{ "Select Seats" }</h2>
                <p class="alert" data-testid="no-seats">
                    { format!("Seat selection is not available for {} bookings.", transport.as_str()) }
                </p>
                { counter }
            </section>
        };
    }

    let aisle = props.seat_map.layout().aisle_after();
    let rows = props.seat_map.rows(props.cabin);
    let selected_list = if props.selected.is_empty() {
        String::from("None")
    } else {
        props.selected.join(", ")
    };

    html! {
        <section class="seat-step" data-testid="step-seats">
            <h2 class="text-xl font-bold mb-4">{ "Select Seats" }</h2>
            if transport == TransportType::Flight {
                { cabin_tabs(props.cabin, &props.on_action) }
            }
            { legend() }
            <div class="seat-grid overflow-x-auto" data-testid="seat-grid">
                { for rows.iter().map(|row| html! {
                    <div class="seat-row flex items-center gap-1 mb-1">
                        <span class="w-20 text-xs opacity-70">{ row.label.clone() }</span>
                        { for row.seats.iter().map(|seat| {
                            let gap = aisle.is_some_and(|col| seat.id.ends_with(col));
                            html! {
                                <>
                                    { seat_button(seat, &props.on_action) }
                                    if gap {
                                        <span class="aisle w-6" aria-hidden="true"></span>
                                    }
                                </>
                            }
                        }) }
                    </div>
                }) }
            </div>
            { counter }
            <p class="text-sm" data-testid="selected-seats">{ format!("Seats: {selected_list}") }</p>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use yew::LocalServerRenderer;

    fn render(transport: TransportType, cabin: CabinClass, selected: Vec<String>) -> String {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let seat_map = SeatMap::generate(transport, &selected, &mut rng);
        let props = SeatStepProps {
            seat_map,
            cabin,
            selected,
            passengers: 2,
            on_action: Callback::noop(),
        };
        block_on(LocalServerRenderer::<SeatStep>::with_props(props).render())
    }

    #[test]
    fn flight_shows_only_the_active_cabin() {
        let html = render(TransportType::Flight, CabinClass::First, vec!["2A".into()]);
        assert!(html.contains("cabin-tabs"));
        assert!(html.contains("data-testid=\"seat-3F\""));
        assert!(!html.contains("data-testid=\"seat-4A\""));
        assert!(html.contains("Selected: 1 / 2"));
        assert!(html.contains("Seats: 2A"));
    }

    #[test]
    fn bus_has_no_cabin_tabs() {
        let html = render(TransportType::Bus, CabinClass::Economy, Vec::new());
        assert!(!html.contains("cabin-tabs"));
        assert!(html.contains("data-testid=\"seat-20D\""));
        assert!(html.contains("Seats: None"));
    }

    #[test]
    fn hotel_explains_missing_grid() {
        let html = render(TransportType::Hotel, CabinClass::Economy, Vec::new());
        assert!(html.contains("no-seats"));
        assert!(html.contains("Selected: 0 / 2"));
    }
}
