//! Query-string contract for entering the wizard.
//!
//! Callers decode the URL themselves (the browser does it through
//! `URLSearchParams`) and hand over plain key/value pairs.
use rand::Rng;

use crate::session::{BookingSession, TransportType};

/// Price shown when the search page did not pass one along.
pub const DEFAULT_PRICE_QUOTE: &str = "₹0";

/// Upper bound (exclusive) of the numeric part of generated booking ids.
pub const BOOKING_ID_SPACE: u32 = 1_000_000;

/// Parameters accepted by `/booking`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingQuery {
    pub transport: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub date: Option<String>,
    pub return_date: Option<String>,
    pub price: Option<String>,
    pub id: Option<String>,
}

impl BookingQuery {
    /// Collect recognised keys; the first occurrence of a key wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "type" => &mut query.transport,
                "from" => &mut query.from,
                "to" => &mut query.to,
                "date" => &mut query.date,
                "returnDate" => &mut query.return_date,
                "price" => &mut query.price,
                "id" => &mut query.id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// Seed a new booking session, generating a booking id when none was given.
    pub fn into_session<R: Rng + ?Sized>(self, rng: &mut R) -> BookingSession {
        let transport = self
            .transport
            .as_deref()
            .map_or(TransportType::Flight, TransportType::parse_or_default);
        let booking_id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| generate_booking_id(rng));
        let mut session = BookingSession::new(booking_id, transport);
        session.origin = self.from.unwrap_or_default();
        session.destination = self.to.unwrap_or_default();
        session.departure_date = self.date.unwrap_or_default();
        session.return_date = self.return_date.filter(|d| !d.trim().is_empty());
        session.price_quote = self
            .price
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PRICE_QUOTE.to_string());
        session
    }
}

/// `BK` followed by a random number below one million.
pub fn generate_booking_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("BK{}", rng.gen_range(0..BOOKING_ID_SPACE))
}
