//! Payment step helpers. Nothing here talks to a real processor.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fixed latency of the simulated processor.
pub const PROCESSING_DELAY_MS: u64 = 2000;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").expect("valid regex"));
static CARD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4,16}").expect("valid regex"));

/// Group card digits in fours. Input without a run of at least four digits is
/// returned untouched; anything past sixteen digits is dropped.
#[must_use]
pub fn format_card_number(input: &str) -> String {
    let digits = NON_DIGIT.replace_all(input, "");
    let Some(run) = CARD_RUN.find(&digits) else {
        return input.to_string();
    };
    run.as_str()
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Card fields as typed. They are shown, never checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub name: String,
    pub expiry: String,
    pub cvv: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    Number,
    Name,
    Expiry,
    Cvv,
}

impl CardDetails {
    /// Store an edit, formatting the card number as it is typed.
    pub fn set(&mut self, field: CardField, value: &str) {
        match field {
            CardField::Number => self.number = format_card_number(value),
            CardField::Name => self.name = value.to_string(),
            CardField::Expiry => self.expiry = value.to_string(),
            CardField::Cvv => self.cvv = value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Idle,
    Processing,
    Succeeded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentState {
    pub card: CardDetails,
    pub upi_id: String,
    pub status: PaymentStatus,
}

impl PaymentState {
    /// Move to `Processing`. Returns false when a run is already in flight or done.
    pub fn begin(&mut self) -> bool {
        if self.status == PaymentStatus::Idle {
            self.status = PaymentStatus::Processing;
            true
        } else {
            false
        }
    }

    /// The simulated processor always approves.
    pub fn settle(&mut self) {
        if self.status == PaymentStatus::Processing {
            self.status = PaymentStatus::Succeeded;
        }
    }

    /// Switching method starts the payment over.
    pub fn reset(&mut self) {
        self.status = PaymentStatus::Idle;
    }
}
