//! Sample bookings shown on `/booking/:id`.
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::record::BookingStatus;
use crate::session::TransportType;

const DEFAULT_CATALOG_DATA: &str = include_str!("../data/bookings.json");

pub const NOT_FOUND_MESSAGE: &str =
    "Booking not found. It may have been cancelled or the link is invalid.";
/// Delay of the simulated detail fetch.
pub const DETAIL_LOAD_DELAY_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid booking catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Scheduled leg for flights, trains and buses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journey {
    pub date: String,
    pub time: String,
    pub from: String,
    pub to: String,
    pub duration: String,
    pub passengers: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stay {
    pub check_in: String,
    pub check_out: String,
    pub location: String,
    pub room_type: String,
    pub guests: u32,
    pub nights: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Itinerary {
    Flight(Journey),
    Train(Journey),
    Bus(Journey),
    Hotel(Stay),
}

impl Itinerary {
    #[must_use]
    pub const fn transport(&self) -> TransportType {
        match self {
            Self::Flight(_) => TransportType::Flight,
            Self::Train(_) => TransportType::Train,
            Self::Bus(_) => TransportType::Bus,
            Self::Hotel(_) => TransportType::Hotel,
        }
    }

    #[must_use]
    pub const fn journey(&self) -> Option<&Journey> {
        match self {
            Self::Flight(j) | Self::Train(j) | Self::Bus(j) => Some(j),
            Self::Hotel(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    pub id: String,
    pub title: String,
    pub provider: String,
    pub booking_number: String,
    pub amount: String,
    pub status: BookingStatus,
    #[serde(flatten)]
    pub itinerary: Itinerary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a BookingDetail),
    NotFound { message: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCatalog {
    #[serde(default)]
    pub bookings: Vec<BookingDetail>,
}

impl BookingCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        match Self::from_json(DEFAULT_CATALOG_DATA) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::error!("{err}");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<BookingCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a catalog.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn lookup(&self, id: &str) -> Lookup<'_> {
        self.bookings
            .iter()
            .find(|b| b.id == id)
            .map_or(Lookup::NotFound { message: NOT_FOUND_MESSAGE }, Lookup::Found)
    }
}
