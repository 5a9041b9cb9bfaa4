//! Receipt derivation for the confirmation step and the standalone
//! confirmation page.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::record::BookingStatus;
use crate::session::{BookingSession, Passenger, TransportType};

const PNR_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const PNR_LEN: usize = 6;
pub const TRANSACTION_ID_SPACE: u32 = 1_000_000;
/// Delay before the confirmation page shows its (simulated) lookup.
pub const CONFIRMATION_LOAD_DELAY_MS: u64 = 1500;
pub const SUPPORT_PHONE: &str = "1800-123-4567";

/// Six characters drawn uniformly from `A-Z0-9`.
pub fn generate_pnr<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..PNR_LEN)
        .map(|_| char::from(PNR_ALPHABET[rng.gen_range(0..PNR_ALPHABET.len())]))
        .collect()
}

pub fn generate_transaction_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("TXN{}", rng.gen_range(0..TRANSACTION_ID_SPACE))
}

/// Everything the summary step prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub booking_id: String,
    pub pnr: String,
    pub transaction_id: String,
    pub transport_type: TransportType,
    pub ticket_title: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub seats: String,
    pub passengers: Vec<Passenger>,
    pub contact_email: String,
    pub contact_phone: String,
    pub payment_method: String,
    pub price: String,
}

impl Receipt {
    /// Derive once when the wizard reaches the final step.
    pub fn derive<R: Rng + ?Sized>(session: &BookingSession, rng: &mut R) -> Self {
        Self {
            booking_id: session.booking_id.clone(),
            pnr: generate_pnr(rng),
            transaction_id: generate_transaction_id(rng),
            transport_type: session.transport_type,
            ticket_title: format!("{} Ticket", session.transport_type.title()),
            origin: session.origin.clone(),
            destination: session.destination.clone(),
            departure_date: session.departure_date.clone(),
            return_date: session.return_date.clone(),
            seats: session.selected_seats.join(", "),
            passengers: session.passengers.clone(),
            contact_email: session.contact_email.clone(),
            contact_phone: session.contact_phone.clone(),
            payment_method: session.payment_method.display_name().to_string(),
            price: session.price_quote.clone(),
        }
    }

    #[must_use]
    pub fn route(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

/// Data shown by `/booking/confirmation?id=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub id: String,
    pub status: BookingStatus,
    pub pnr: String,
}

impl Confirmation {
    pub fn for_booking<R: Rng + ?Sized>(booking_id: &str, rng: &mut R) -> Self {
        Self {
            id: booking_id.to_string(),
            status: BookingStatus::Confirmed,
            pnr: generate_pnr(rng),
        }
    }
}
