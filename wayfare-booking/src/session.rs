//! Booking session model shared by every wizard step.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of inventory being booked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    #[default]
    Flight,
    Train,
    Bus,
    Hotel,
}

impl TransportType {
    pub const ALL: [Self; 4] = [Self::Flight, Self::Train, Self::Bus, Self::Hotel];

    /// Parse a query-string value, falling back to flights for anything unrecognised.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "train" => Self::Train,
            "bus" => Self::Bus,
            "hotel" => Self::Hotel,
            _ => Self::Flight,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Train => "train",
            Self::Bus => "bus",
            Self::Hotel => "hotel",
        }
    }

    /// Capitalised label used in headings ("Flight Booking", "Train Ticket").
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Flight => "Flight",
            Self::Train => "Train",
            Self::Bus => "Bus",
            Self::Hotel => "Hotel",
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

/// Identity record for one traveller. `age` keeps the raw text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    pub age: String,
    pub gender: Gender,
}

impl Passenger {
    #[must_use]
    pub fn new(name: impl Into<String>, age: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            gender,
        }
    }
}

/// Editable passenger attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassengerField {
    Name,
    Age,
    Gender,
}

/// Editable contact channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Email,
    Phone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Upi,
    Paypal,
    GooglePay,
    ApplePay,
}

impl PaymentMethod {
    pub const ALL: [Self; 5] = [
        Self::CreditCard,
        Self::Upi,
        Self::Paypal,
        Self::GooglePay,
        Self::ApplePay,
    ];

    /// Wire identifier (`credit-card`, `google-pay`, ...).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::Upi => "upi",
            Self::Paypal => "paypal",
            Self::GooglePay => "google-pay",
            Self::ApplePay => "apple-pay",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit/Debit Card",
            Self::Upi => "UPI Payment",
            Self::Paypal => "PayPal",
            Self::GooglePay => "Google Pay",
            Self::ApplePay => "Apple Pay",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    /// Whether the method collects extra (cosmetic) fields in the payment step.
    #[must_use]
    pub const fn collects_details(self) -> bool {
        matches!(self, Self::CreditCard | Self::Upi)
    }
}

/// The four ordered wizard steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    PassengerDetails,
    SeatSelection,
    Payment,
    Summary,
}

impl WizardStep {
    pub const ALL: [Self; 4] = [
        Self::PassengerDetails,
        Self::SeatSelection,
        Self::Payment,
        Self::Summary,
    ];

    /// One-based step number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::PassengerDetails => 1,
            Self::SeatSelection => 2,
            Self::Payment => 3,
            Self::Summary => 4,
        }
    }

    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::PassengerDetails),
            2 => Some(Self::SeatSelection),
            3 => Some(Self::Payment),
            4 => Some(Self::Summary),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PassengerDetails => "Passenger Details",
            Self::SeatSelection => "Select Seats",
            Self::Payment => "Payment",
            Self::Summary => "Confirmation",
        }
    }

    /// Next step, capped at the summary.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::PassengerDetails => Self::SeatSelection,
            Self::SeatSelection => Self::Payment,
            Self::Payment | Self::Summary => Self::Summary,
        }
    }

    /// Previous step, floored at passenger details.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::PassengerDetails | Self::SeatSelection => Self::PassengerDetails,
            Self::Payment => Self::SeatSelection,
            Self::Summary => Self::Payment,
        }
    }

    /// Fraction of the progress bar filled when this step is active.
    #[must_use]
    pub fn progress(self) -> f32 {
        f32::from(self.number() - 1) / 3.0
    }

    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Summary)
    }
}

/// Ephemeral booking state for one browsing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSession {
    pub booking_id: String,
    pub transport_type: TransportType,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub price_quote: String,
    pub passengers: Vec<Passenger>,
    pub selected_seats: Vec<String>,
    pub contact_email: String,
    pub contact_phone: String,
    pub payment_method: PaymentMethod,
    pub current_step: WizardStep,
}

impl BookingSession {
    /// Fresh session with a single blank passenger.
    #[must_use]
    pub fn new(booking_id: impl Into<String>, transport_type: TransportType) -> Self {
        Self {
            booking_id: booking_id.into(),
            transport_type,
            passengers: vec![Passenger::default()],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    #[must_use]
    pub fn seats_remaining(&self) -> usize {
        self.passengers.len().saturating_sub(self.selected_seats.len())
    }

    #[must_use]
    pub fn has_seat(&self, seat_id: &str) -> bool {
        self.selected_seats.iter().any(|s| s == seat_id)
    }

    /// Heading shown above the wizard, e.g. "Bus Booking".
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} Booking", self.transport_type.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_transport_falls_back_to_flight() {
        assert_eq!(TransportType::parse_or_default("train"), TransportType::Train);
        assert_eq!(TransportType::parse_or_default(" BUS "), TransportType::Bus);
        assert_eq!(TransportType::parse_or_default("ferry"), TransportType::Flight);
        assert_eq!(TransportType::parse_or_default(""), TransportType::Flight);
    }

    #[test]
    fn steps_cap_and_floor() {
        assert_eq!(WizardStep::Summary.next(), WizardStep::Summary);
        assert_eq!(WizardStep::PassengerDetails.previous(), WizardStep::PassengerDetails);
        assert_eq!(WizardStep::Payment.next().number(), 4);
        assert_eq!(WizardStep::from_number(0), None);
        assert!((WizardStep::Summary.progress() - 1.0).abs() < f32::EPSILON);
        assert!(WizardStep::PassengerDetails.progress().abs() < f32::EPSILON);
    }

    #[test]
    fn payment_ids_roundtrip_through_serde() {
        let json = serde_json::to_string(&PaymentMethod::GooglePay).unwrap();
        assert_eq!(json, "\"google-pay\"");
        assert_eq!(PaymentMethod::from_id("apple-pay"), Some(PaymentMethod::ApplePay));
        assert_eq!(PaymentMethod::from_id("cash"), None);
        assert!(PaymentMethod::Upi.collects_details());
        assert!(!PaymentMethod::Paypal.collects_details());
    }

    #[test]
    fn new_session_has_one_blank_passenger() {
        let session = BookingSession::new("BK1", TransportType::Bus);
        assert_eq!(session.passenger_count(), 1);
        assert_eq!(session.passengers[0].gender, Gender::Male);
        assert_eq!(session.seats_remaining(), 1);
        assert_eq!(session.heading(), "Bus Booking");
        assert_eq!(session.current_step, WizardStep::PassengerDetails);
    }
}
