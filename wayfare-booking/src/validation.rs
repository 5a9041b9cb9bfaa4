//! Field validation rule table.
//!
//! The blur path (`validate_field`) and the step-advance path
//! (`validate_passenger_step`) both read the same table so their messages
//! cannot drift apart.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::session::BookingSession;

/// Maximum accepted passenger age.
pub const MAX_AGE: f64 = 120.0;
/// Minimum number of characters in a phone number.
pub const MIN_PHONE_LEN: usize = 10;

/// Identifies one validated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    PassengerName(usize),
    PassengerAge(usize),
    ContactEmail,
    ContactPhone,
}

impl FieldKey {
    /// Human label used in "`<label>` is required".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PassengerName(_) => "Name",
            Self::PassengerAge(_) => "Age",
            Self::ContactEmail => "Email",
            Self::ContactPhone => "Phone number",
        }
    }

    const fn rule(self) -> Rule {
        match self {
            Self::PassengerName(_) => Rule::Required,
            Self::PassengerAge(_) => Rule::Age,
            Self::ContactEmail => Rule::Email,
            Self::ContactPhone => Rule::Phone,
        }
    }

    #[must_use]
    pub const fn passenger_index(self) -> Option<usize> {
        match self {
            Self::PassengerName(i) | Self::PassengerAge(i) => Some(i),
            Self::ContactEmail | Self::ContactPhone => None,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassengerName(i) => write!(f, "passenger-{i}-name"),
            Self::PassengerAge(i) => write!(f, "passenger-{i}-age"),
            Self::ContactEmail => f.write_str("contactEmail"),
            Self::ContactPhone => f.write_str("contactPhone"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Required,
    Age,
    Email,
    Phone,
}

/// Outcome of running one rule against a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    Missing(&'static str),
    InvalidAge,
    InvalidEmail,
    InvalidPhone,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(label) => write!(f, "{label} is required"),
            Self::InvalidAge => f.write_str("Please enter a valid age"),
            Self::InvalidEmail => f.write_str("Please enter a valid email address"),
            Self::InvalidPhone => f.write_str("Please enter a valid phone number"),
        }
    }
}

/// Check a single value against the rule registered for `key`.
#[must_use]
pub fn check(key: FieldKey, value: &str) -> Option<FieldIssue> {
    if value.trim().is_empty() {
        return Some(FieldIssue::Missing(key.label()));
    }
    match key.rule() {
        Rule::Required => None,
        Rule::Age => (!is_valid_age(value)).then_some(FieldIssue::InvalidAge),
        Rule::Email => (!value.contains('@')).then_some(FieldIssue::InvalidEmail),
        Rule::Phone => {
            (value.chars().count() < MIN_PHONE_LEN).then_some(FieldIssue::InvalidPhone)
        }
    }
}

/// Ages are free text; anything numeric in (0, 120] passes.
#[must_use]
pub fn is_valid_age(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|age| age > 0.0 && age <= MAX_AGE)
}

/// Side map of field → error message shown inline under inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<FieldKey, String>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.errors.get(&key).map(String::as_str)
    }

    pub fn set(&mut self, key: FieldKey, issue: &FieldIssue) {
        self.errors.insert(key, issue.to_string());
    }

    pub fn clear(&mut self, key: FieldKey) {
        self.errors.remove(&key);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Drop errors for passenger `removed` and shift the ones after it down.
    pub fn remove_passenger(&mut self, removed: usize) {
        let old = std::mem::take(&mut self.errors);
        for (key, message) in old {
            if key.passenger_index() == Some(removed) {
                continue;
            }
            let shifted = match key {
                FieldKey::PassengerName(i) if i > removed => FieldKey::PassengerName(i - 1),
                FieldKey::PassengerAge(i) if i > removed => FieldKey::PassengerAge(i - 1),
                other => other,
            };
            self.errors.insert(shifted, message);
        }
    }
}

/// Read the current value of `key` from the session.
#[must_use]
pub fn field_value(session: &BookingSession, key: FieldKey) -> Option<&str> {
    match key {
        FieldKey::PassengerName(i) => session.passengers.get(i).map(|p| p.name.as_str()),
        FieldKey::PassengerAge(i) => session.passengers.get(i).map(|p| p.age.as_str()),
        FieldKey::ContactEmail => Some(session.contact_email.as_str()),
        FieldKey::ContactPhone => Some(session.contact_phone.as_str()),
    }
}

/// Blur-time validation: update `errors` for one field and report whether it passed.
pub fn validate_field(session: &BookingSession, key: FieldKey, errors: &mut FieldErrors) -> bool {
    let Some(value) = field_value(session, key) else {
        errors.clear(key);
        return true;
    };
    match check(key, value) {
        Some(issue) => {
            errors.set(key, &issue);
            false
        }
        None => {
            errors.clear(key);
            true
        }
    }
}

/// Every field validated on the passenger step, in display order.
#[must_use]
pub fn passenger_step_fields(session: &BookingSession) -> Vec<FieldKey> {
    let mut keys = vec![FieldKey::ContactEmail, FieldKey::ContactPhone];
    for i in 0..session.passengers.len() {
        keys.push(FieldKey::PassengerName(i));
        keys.push(FieldKey::PassengerAge(i));
    }
    keys
}

/// Step-advance validation for step 1; refreshes every inline error.
pub fn validate_passenger_step(session: &BookingSession, errors: &mut FieldErrors) -> bool {
    passenger_step_fields(session)
        .into_iter()
        .fold(true, |ok, key| validate_field(session, key, errors) && ok)
}

/// Step 2 passes only when every passenger holds exactly one seat.
#[must_use]
pub fn validate_seat_step(session: &BookingSession) -> bool {
    session.selected_seats.len() == session.passengers.len()
}

/// Payment details are cosmetic, so the payment step never blocks.
#[must_use]
pub const fn validate_payment_step(_session: &BookingSession) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Gender, Passenger, TransportType};

    fn session() -> BookingSession {
        let mut s = BookingSession::new("BK1", TransportType::Flight);
        s.passengers = vec![Passenger::new("A", "30", Gender::Male)];
        s.contact_email = "a@b.com".into();
        s.contact_phone = "1234567890".into();
        s
    }

    #[test]
    fn rule_messages_match_labels() {
        assert_eq!(
            check(FieldKey::PassengerName(0), "  ").unwrap().to_string(),
            "Name is required"
        );
        assert_eq!(
            check(FieldKey::ContactPhone, "").unwrap().to_string(),
            "Phone number is required"
        );
        assert_eq!(
            check(FieldKey::ContactEmail, "nobody").unwrap().to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(check(FieldKey::ContactPhone, "12345"), Some(FieldIssue::InvalidPhone));
        assert_eq!(check(FieldKey::ContactPhone, "1234567890"), None);
    }

    #[test]
    fn age_bounds() {
        assert!(!is_valid_age("0"));
        assert!(is_valid_age("1"));
        assert!(is_valid_age(" 120 "));
        assert!(!is_valid_age("121"));
        assert!(!is_valid_age("abc"));
        assert!(!is_valid_age("NaN"));
        assert!(is_valid_age("30.5"));
    }

    #[test]
    fn passenger_step_accepts_complete_session() {
        let mut errors = FieldErrors::new();
        assert!(validate_passenger_step(&session(), &mut errors));
        assert!(errors.is_empty());
    }

    #[test]
    fn passenger_step_flags_every_bad_field() {
        let mut s = session();
        s.passengers.push(Passenger::default());
        s.contact_email = "ab.com".into();
        let mut errors = FieldErrors::new();
        assert!(!validate_passenger_step(&s, &mut errors));
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(FieldKey::PassengerName(1)), Some("Name is required"));
        assert_eq!(errors.get(FieldKey::PassengerAge(1)), Some("Age is required"));
        assert!(errors.get(FieldKey::ContactEmail).is_some());
    }

    #[test]
    fn blur_clears_previous_error() {
        let mut s = session();
        let mut errors = FieldErrors::new();
        s.contact_phone = "123".into();
        assert!(!validate_field(&s, FieldKey::ContactPhone, &mut errors));
        s.contact_phone = "1234567890".into();
        assert!(validate_field(&s, FieldKey::ContactPhone, &mut errors));
        assert!(errors.is_empty());
    }

    #[test]
    fn removing_passenger_shifts_errors() {
        let mut errors = FieldErrors::new();
        errors.set(FieldKey::PassengerName(1), &FieldIssue::Missing("Name"));
        errors.set(FieldKey::PassengerAge(2), &FieldIssue::InvalidAge);
        errors.set(FieldKey::ContactEmail, &FieldIssue::InvalidEmail);
        errors.remove_passenger(1);
        assert!(errors.get(FieldKey::PassengerName(1)).is_none());
        assert_eq!(errors.get(FieldKey::PassengerAge(1)), Some("Please enter a valid age"));
        assert!(errors.get(FieldKey::ContactEmail).is_some());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn seat_step_requires_exact_count() {
        let mut s = session();
        assert!(!validate_seat_step(&s));
        s.selected_seats.push("12A".into());
        assert!(validate_seat_step(&s));
        s.selected_seats.push("12B".into());
        assert!(!validate_seat_step(&s));
        assert!(validate_payment_step(&s));
    }

    #[test]
    fn field_keys_render_like_form_ids() {
        assert_eq!(FieldKey::PassengerAge(3).to_string(), "passenger-3-age");
        assert_eq!(FieldKey::PassengerAge(3).passenger_index(), Some(3));
        assert_eq!(FieldKey::ContactEmail.passenger_index(), None);
        assert_eq!(FieldKey::ContactEmail.to_string(), "contactEmail");
    }
}
