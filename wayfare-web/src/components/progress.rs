use wayfare_booking::WizardStep;
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq)]
pub struct WizardProgressProps {
    pub step: WizardStep,
}

/// Step indicator with a percentage bar underneath.
#[function_component(WizardProgress)]
pub fn wizard_progress(props: &WizardProgressProps) -> Html {
    let current = props.step;
    // `progress` is a ratio in [0, 1]; the bar works in whole percent.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (current.progress() * 100.0).round() as u32;

    html! {
        <nav class="wizard-progress" aria-label="Booking progress" data-testid="wizard-progress">
            <ol class="steps w-full">
                { for WizardStep::ALL.iter().map(|step| {
                    let reached = step.number() <= current.number();
                    let is_current = *step == current;
                    html! {
                        <li
                            class={classes!("step", reached.then_some("step-primary"))}
                            aria-current={is_current.then_some("step")}
                            data-testid={format!("progress-step-{}", step.number())}
                        >
                            { step.label() }
                        </li>
                    }
                }) }
            </ol>
            <progress
                class="progress progress-primary w-full"
                value={percent.to_string()}
                max="100"
                aria-label={format!("Step {} of {}", current.number(), WizardStep::ALL.len())}
            />
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn marks_reached_steps() {
        let props = WizardProgressProps {
            step: WizardStep::Payment,
        };
        let html = block_on(LocalServerRenderer::<WizardProgress>::with_props(props).render());
        assert!(html.contains("Step 3 of 4"));
        assert!(html.contains("value=\"67\""));
        assert_eq!(html.matches("step-primary").count(), 3);
        assert!(html.contains("Confirmation"));
    }
}
