//! Seat map generation and the per-seat selection state machine.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::session::TransportType;

/// Chance that a freshly generated seat is already taken.
pub const OCCUPIED_PROBABILITY: f64 = 0.3;

const FLIGHT_COLUMNS: &[char] = &['A', 'B', 'C', 'D', 'E', 'F'];
const BUS_COLUMNS: &[char] = &['A', 'B', 'C', 'D'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Occupied,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub status: SeatStatus,
}

impl Seat {
    /// Leading row number (`"12C"` → 12, `"S3-45"` → 3).
    #[must_use]
    pub fn row(&self) -> Option<u32> {
        let digits: String = self
            .id
            .trim_start_matches(|c: char| !c.is_ascii_digit())
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }
}

/// Physical arrangement of bookable seats for one kind of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatLayout {
    /// Numbered rows of lettered seats split by a single aisle.
    Cabin {
        rows: u32,
        columns: &'static [char],
        aisle_after: char,
    },
    /// Sleeper coaches with numbered berths, ids like `S3-45`.
    Coaches { coaches: u32, berths: u32 },
    /// Nothing to pick (hotels).
    Unseated,
}

impl SeatLayout {
    #[must_use]
    pub const fn for_transport(transport: TransportType) -> Self {
        match transport {
            TransportType::Flight => Self::Cabin {
                rows: 30,
                columns: FLIGHT_COLUMNS,
                aisle_after: 'C',
            },
            TransportType::Bus => Self::Cabin {
                rows: 20,
                columns: BUS_COLUMNS,
                aisle_after: 'B',
            },
            TransportType::Train => Self::Coaches {
                coaches: 10,
                berths: 72,
            },
            TransportType::Hotel => Self::Unseated,
        }
    }

    /// Total number of seats the layout produces.
    #[must_use]
    pub fn capacity(self) -> usize {
        match self {
            Self::Cabin { rows, columns, .. } => rows as usize * columns.len(),
            Self::Coaches { coaches, berths } => (coaches * berths) as usize,
            Self::Unseated => 0,
        }
    }

    /// Seats per rendered row.
    #[must_use]
    pub fn row_width(self) -> usize {
        match self {
            Self::Cabin { columns, .. } => columns.len(),
            Self::Coaches { berths, .. } => berths as usize,
            Self::Unseated => 0,
        }
    }

    /// Column after which the aisle gap is drawn.
    #[must_use]
    pub const fn aisle_after(self) -> Option<char> {
        match self {
            Self::Cabin { aisle_after, .. } => Some(aisle_after),
            Self::Coaches { .. } | Self::Unseated => None,
        }
    }

    /// Seat ids in row-major order.
    #[must_use]
    pub fn seat_ids(self) -> Vec<String> {
        match self {
            Self::Cabin { rows, columns, .. } => (1..=rows)
                .flat_map(|row| columns.iter().map(move |col| format!("{row}{col}")))
                .collect(),
            Self::Coaches { coaches, berths } => (1..=coaches)
                .flat_map(|coach| (1..=berths).map(move |berth| format!("S{coach}-{berth}")))
                .collect(),
            Self::Unseated => Vec::new(),
        }
    }
}

/// Flight cabin tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    First,
    Business,
    #[default]
    Economy,
}

impl CabinClass {
    pub const ALL: [Self; 3] = [Self::Economy, Self::Business, Self::First];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "First Class",
            Self::Business => "Business",
            Self::Economy => "Economy",
        }
    }

    #[must_use]
    pub const fn contains_row(self, row: u32) -> bool {
        match self {
            Self::First => row <= 3,
            Self::Business => row >= 4 && row <= 10,
            Self::Economy => row > 10,
        }
    }
}

/// Result of clicking a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatToggle {
    Selected,
    Released,
    /// Occupied or unknown seat; nothing changed.
    Ignored,
    /// Every passenger already holds a seat.
    LimitReached { limit: usize },
}

/// One labelled row of seats ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRow<'a> {
    pub label: String,
    pub seats: Vec<&'a Seat>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMap {
    pub transport: TransportType,
    pub seats: Vec<Seat>,
}

impl SeatMap {
    /// Build a fresh map, marking each seat occupied with fixed probability and
    /// re-applying `selected` on top.
    pub fn generate<R: Rng + ?Sized>(
        transport: TransportType,
        selected: &[String],
        rng: &mut R,
    ) -> Self {
        let seats = SeatLayout::for_transport(transport)
            .seat_ids()
            .into_iter()
            .map(|id| {
                let status = if selected.contains(&id) {
                    SeatStatus::Selected
                } else if rng.gen_bool(OCCUPIED_PROBABILITY) {
                    SeatStatus::Occupied
                } else {
                    SeatStatus::Available
                };
                Seat { id, status }
            })
            .collect();
        Self { transport, seats }
    }

    #[must_use]
    pub const fn empty(transport: TransportType) -> Self {
        Self {
            transport,
            seats: Vec::new(),
        }
    }

    #[must_use]
    pub fn layout(&self) -> SeatLayout {
        SeatLayout::for_transport(self.transport)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    #[must_use]
    pub fn get(&self, seat_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }

    fn get_mut(&mut self, seat_id: &str) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id == seat_id)
    }

    #[must_use]
    pub fn count(&self, status: SeatStatus) -> usize {
        self.seats.iter().filter(|s| s.status == status).count()
    }

    /// Apply a click to `seat_id`, keeping `selected` in step with the map.
    pub fn toggle(&mut self, seat_id: &str, selected: &mut Vec<String>, limit: usize) -> SeatToggle {
        let Some(seat) = self.get_mut(seat_id) else {
            return SeatToggle::Ignored;
        };
        match seat.status {
            SeatStatus::Occupied => SeatToggle::Ignored,
            SeatStatus::Selected => {
                seat.status = SeatStatus::Available;
                selected.retain(|id| id != seat_id);
                SeatToggle::Released
            }
            SeatStatus::Available if selected.len() < limit => {
                seat.status = SeatStatus::Selected;
                selected.push(seat.id.clone());
                SeatToggle::Selected
            }
            SeatStatus::Available => SeatToggle::LimitReached { limit },
        }
    }

    /// Flip a selected seat back to available; other states are left alone.
    pub fn release(&mut self, seat_id: &str) -> bool {
        match self.get_mut(seat_id) {
            Some(seat) if seat.status == SeatStatus::Selected => {
                seat.status = SeatStatus::Available;
                true
            }
            _ => false,
        }
    }

    /// Seats visible under the given cabin tab. Only flights are split by cabin.
    pub fn visible(&self, cabin: CabinClass) -> impl Iterator<Item = &Seat> {
        let filter = self.transport == TransportType::Flight;
        self.seats
            .iter()
            .filter(move |seat| !filter || seat.row().is_some_and(|row| cabin.contains_row(row)))
    }

    /// Visible seats grouped into labelled rows.
    #[must_use]
    pub fn rows(&self, cabin: CabinClass) -> Vec<SeatRow<'_>> {
        let width = self.layout().row_width();
        if width == 0 {
            return Vec::new();
        }
        let visible: Vec<&Seat> = self.visible(cabin).collect();
        visible
            .chunks(width)
            .map(|chunk| {
                let row = chunk.first().and_then(|s| s.row()).unwrap_or_default();
                let label = match self.transport {
                    TransportType::Train => format!("Coach S{row}"),
                    _ => format!("Row {row}"),
                };
                SeatRow {
                    label,
                    seats: chunk.to_vec(),
                }
            })
            .collect()
    }
}
