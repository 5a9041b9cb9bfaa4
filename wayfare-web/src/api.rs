//! Booking submission over `fetch`.
use thiserror::Error;
use wayfare_booking::api::BOOKINGS_PATH;
use wayfare_booking::{BookingRecord, SubmitError, WizardAction, interpret_create_response};

use crate::{dom, paths};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not encode booking: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// POST the record and wait for the server's answer.
///
/// # Errors
/// Returns an error when the body cannot be encoded, the request fails, or
/// the server does not confirm the booking.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn submit_booking(mut record: BookingRecord) -> Result<String, ApiError> {
    record.stamp(chrono::Utc::now());
    let body = serde_json::to_string(&record)?;
    let (status, text) = dom::post_json(&paths::api_path(BOOKINGS_PATH), &body)
        .await
        .map_err(|err| SubmitError::Network(dom::js_error_message(&err)))?;
    Ok(interpret_create_response(status, &text)?)
}

/// Follow-up wizard action for a finished submission.
#[must_use]
pub fn outcome_action(result: Result<String, ApiError>) -> WizardAction {
    match result {
        Ok(booking_id) => {
            log::info!("booking stored as {booking_id}");
            WizardAction::SubmissionSucceeded { booking_id }
        }
        Err(err) => {
            log::warn!("booking submission failed: {err}");
            dom::console_error(&err.to_string());
            WizardAction::SubmissionFailed {
                message: err.to_string(),
            }
        }
    }
}
