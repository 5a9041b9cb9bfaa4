//! Persisted booking document, as sent to `POST /api/bookings`.
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::session::{BookingSession, Passenger, PaymentMethod, TransportType};

/// Placeholder owner until sign-in is wired up.
pub const DEFAULT_USER_ID: &str = "user123";
pub const DEFAULT_TRAVEL_CLASS: &str = "standard";

static PRICE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.\-]+").expect("valid regex"));
static PRICE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    OneWay,
    RoundTrip,
}

/// Read a display price such as `"₹1,299"` as a number.
///
/// Everything except digits, `.` and `-` is dropped, then the longest numeric
/// prefix is parsed. `None` when nothing numeric remains.
#[must_use]
pub fn parse_price(quote: &str) -> Option<f64> {
    let cleaned = PRICE_NOISE.replace_all(quote, "");
    let prefix = PRICE_PREFIX.find(&cleaned)?;
    prefix.as_str().parse().ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub transport_type: TransportType,
    pub from: String,
    pub to: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub passengers: usize,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_type: Option<TripType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus_type: Option<String>,
    pub price: Option<f64>,
    pub status: BookingStatus,
    pub user_id: String,
    #[serde(default)]
    pub selected_seats: Vec<String>,
    #[serde(default)]
    pub passenger_details: Vec<Passenger>,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BookingRecord {
    /// Build the submission body for a completed wizard session.
    #[must_use]
    pub fn from_session(session: &BookingSession) -> Self {
        let trip_type = (session.transport_type == TransportType::Flight).then(|| {
            if session.return_date.is_some() {
                TripType::RoundTrip
            } else {
                TripType::OneWay
            }
        });
        Self {
            id: None,
            transport_type: session.transport_type,
            from: session.origin.clone(),
            to: session.destination.clone(),
            date: session.departure_date.clone(),
            return_date: session.return_date.clone(),
            passengers: session.passengers.len(),
            class: DEFAULT_TRAVEL_CLASS.to_string(),
            trip_type,
            quota: None,
            bus_type: None,
            price: parse_price(&session.price_quote),
            status: BookingStatus::Confirmed,
            user_id: DEFAULT_USER_ID.to_string(),
            selected_seats: session.selected_seats.clone(),
            passenger_details: session.passengers.clone(),
            contact_email: session.contact_email.clone(),
            contact_phone: session.contact_phone.clone(),
            payment_method: session.payment_method,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set both timestamps to `now`.
    pub fn stamp(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
        self.updated_at = Some(now);
    }
}
