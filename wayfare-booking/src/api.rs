//! Request and response envelopes of the `/api/bookings` endpoint.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::BookingRecord;

pub const BOOKINGS_PATH: &str = "/api/bookings";

pub const CREATED_MESSAGE: &str = "Booking created successfully";
pub const CREATE_FAILED_MESSAGE: &str = "Error creating booking";
pub const USER_ID_REQUIRED_MESSAGE: &str = "UserId is required";
pub const LIST_FAILED_MESSAGE: &str = "Error fetching bookings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl CreateBookingResponse {
    #[must_use]
    pub fn created(booking_id: impl Into<String>) -> Self {
        Self {
            success: true,
            booking_id: Some(booking_id.into()),
            message: CREATED_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self {
            success: false,
            booking_id: None,
            message: CREATE_FAILED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    pub success: bool,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ListBookingsResponse {
    #[must_use]
    pub const fn listed(bookings: Vec<BookingRecord>) -> Self {
        Self {
            success: true,
            bookings,
            message: None,
        }
    }

    #[must_use]
    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            bookings: Vec::new(),
            message: Some(message.to_string()),
        }
    }
}

/// Why a booking submission did not produce a booking id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("booking request failed: {0}")]
    Network(String),
    #[error("server rejected booking ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unreadable booking response ({status}): {reason}")]
    MalformedResponse { status: u16, reason: String },
    #[error("booking response carried no booking id")]
    MissingBookingId,
}

/// Map an HTTP status and body from `POST /api/bookings` to the new booking id.
///
/// # Errors
///
/// Returns a [`SubmitError`] when the status is not 2xx, the body is not a
/// create envelope, or the envelope reports failure.
pub fn interpret_create_response(status: u16, body: &str) -> Result<String, SubmitError> {
    let parsed: Result<CreateBookingResponse, _> = serde_json::from_str(body);
    let response = match parsed {
        Ok(response) => response,
        Err(err) if (200..300).contains(&status) => {
            return Err(SubmitError::MalformedResponse {
                status,
                reason: err.to_string(),
            });
        }
        Err(_) => {
            return Err(SubmitError::Rejected {
                status,
                message: CREATE_FAILED_MESSAGE.to_string(),
            });
        }
    };
    if !(200..300).contains(&status) || !response.success {
        return Err(SubmitError::Rejected {
            status,
            message: response.message,
        });
    }
    response.booking_id.ok_or(SubmitError::MissingBookingId)
}
