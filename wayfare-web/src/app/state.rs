use std::rc::Rc;

use wayfare_booking::{BookingQuery, BookingWizard, Dispatched, WizardAction, WizardState};
use yew::prelude::*;

/// Reducer store wrapping the booking wizard.
///
/// `ticket` increases on every dispatch so effect hooks can tell a fresh
/// alert or effect apart from the one already handled.
#[derive(Clone, Debug)]
pub struct WizardStore {
    pub wizard: BookingWizard,
    pub ticket: u64,
    pub last: Dispatched,
}

impl WizardStore {
    #[must_use]
    pub fn new(wizard: BookingWizard) -> Self {
        Self {
            wizard,
            ticket: 0,
            last: Dispatched::default(),
        }
    }

    #[must_use]
    pub fn from_query(query: BookingQuery, seed: u64) -> Self {
        Self::new(BookingWizard::from_query(query, seed))
    }

    #[must_use]
    pub const fn state(&self) -> &WizardState {
        self.wizard.state()
    }
}

impl PartialEq for WizardStore {
    fn eq(&self, other: &Self) -> bool {
        self.ticket == other.ticket && self.wizard.seed() == other.wizard.seed()
    }
}

impl Reducible for WizardStore {
    type Action = WizardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = Rc::unwrap_or_clone(self);
        next.last = next.wizard.dispatch(action);
        next.ticket += 1;
        Rc::new(next)
    }
}

pub type WizardHandle = UseReducerHandle<WizardStore>;

#[hook]
pub fn use_wizard(query: BookingQuery, seed: u64) -> WizardHandle {
    use_reducer(move || WizardStore::from_query(query, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_booking::{WizardAlert, WizardStep};

    fn store() -> Rc<WizardStore> {
        let query = BookingQuery::from_pairs([("type", "bus"), ("from", "Pune"), ("to", "Goa")]);
        Rc::new(WizardStore::from_query(query, 7))
    }

    #[test]
    fn dispatch_bumps_ticket_and_records_alert() {
        let next = store().reduce(WizardAction::Next);
        assert_eq!(next.ticket, 1);
        assert_eq!(next.last.alert, Some(WizardAlert::PassengerDetailsIncomplete));
        assert_eq!(next.state().step(), WizardStep::PassengerDetails);
    }

    #[test]
    fn query_seeds_the_session() {
        let store = store();
        assert_eq!(store.state().session.origin, "Pune");
        assert_eq!(store.wizard.seed(), 7);
    }
}
