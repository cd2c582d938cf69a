//! Records that flow through the booking pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Station {
    Chennai,
    Bangalore,
    Hyderabad,
    Coimbatore,
    Delhi,
    Mumbai,
}

impl Station {
    /// Stations a journey may start from.
    pub const SOURCES: [Station; 4] = [
        Station::Chennai,
        Station::Bangalore,
        Station::Hyderabad,
        Station::Coimbatore,
    ];

    /// Stations a journey may end at.
    pub const DESTINATIONS: [Station; 4] = [
        Station::Bangalore,
        Station::Chennai,
        Station::Delhi,
        Station::Mumbai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Station::Chennai => "Chennai",
            Station::Bangalore => "Bangalore",
            Station::Hyderabad => "Hyderabad",
            Station::Coimbatore => "Coimbatore",
            Station::Delhi => "Delhi",
            Station::Mumbai => "Mumbai",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelClass {
    Sleeper,
    #[serde(rename = "3A")]
    ThreeTier,
    #[serde(rename = "2A")]
    TwoTier,
}

impl TravelClass {
    pub const ALL: [TravelClass; 3] = [
        TravelClass::Sleeper,
        TravelClass::ThreeTier,
        TravelClass::TwoTier,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TravelClass::Sleeper => "Sleeper",
            TravelClass::ThreeTier => "3A",
            TravelClass::TwoTier => "2A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    Lower,
    Upper,
    Any,
}

impl Preference {
    pub const ALL: [Preference; 3] = [Preference::Lower, Preference::Upper, Preference::Any];
}

/// Error returned when a station, class, or berth name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    kind: &'static str,
    input: String,
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.input)
    }
}

impl std::error::Error for ParseNameError {}

fn parse_name<T: Copy>(
    kind: &'static str,
    input: &str,
    choices: &[T],
    name: fn(T) -> &'static str,
) -> Result<T, ParseNameError> {
    let wanted = input.trim();
    choices
        .iter()
        .copied()
        .find(|c| name(*c).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ParseNameError {
            kind,
            input: input.to_string(),
        })
}

const ALL_STATIONS: [Station; 6] = [
    Station::Chennai,
    Station::Bangalore,
    Station::Hyderabad,
    Station::Coimbatore,
    Station::Delhi,
    Station::Mumbai,
];

impl FromStr for Station {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_name("station", s, &ALL_STATIONS, Station::as_str)
    }
}

impl FromStr for TravelClass {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_name("class", s, &TravelClass::ALL, TravelClass::as_str)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Train
// ---------------------------------------------------------------------------

/// One row of the synthetic catalog.
///
/// `seat_available` always equals `total_seats - booked_seats`; build rows
/// through [`Train::new`] to keep it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    pub train_id: u32,
    pub train_name: String,
    pub source: Station,
    pub destination: Station,
    pub travel_date: String,
    pub class: TravelClass,
    pub total_seats: u32,
    pub booked_seats: u32,
    pub seat_available: u32,
    pub passenger_age: u32,
    pub preference: Preference,
}

impl Train {
    /// Build a row, clamping `booked_seats` to `total_seats`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        train_id: u32,
        train_name: impl Into<String>,
        source: Station,
        destination: Station,
        travel_date: impl Into<String>,
        class: TravelClass,
        total_seats: u32,
        booked_seats: u32,
        passenger_age: u32,
        preference: Preference,
    ) -> Self {
        let booked_seats = booked_seats.min(total_seats);
        Self {
            train_id,
            train_name: train_name.into(),
            source,
            destination,
            travel_date: travel_date.into(),
            class,
            total_seats,
            booked_seats,
            seat_available: total_seats - booked_seats,
            passenger_age,
            preference,
        }
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Structured booking request produced by the query understanding stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub intent: String,
    pub source: Station,
    pub destination: Station,
    pub class: TravelClass,
    pub original_text: String,
}

// ---------------------------------------------------------------------------
// Seats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatType {
    Lower,
    Upper,
}

impl SeatType {
    /// Odd seats are lower berths, even seats upper.
    pub fn for_seat(seat_no: u32) -> Self {
        if seat_no % 2 == 1 {
            SeatType::Lower
        } else {
            SeatType::Upper
        }
    }
}

impl fmt::Display for SeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatType::Lower => f.write_str("Lower"),
            SeatType::Upper => f.write_str("Upper"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    Available,
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub seat_no: u32,
    pub seat_type: SeatType,
    pub status: SeatStatus,
}

impl Seat {
    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }
}

/// Ordered seat layout for one selected train.
///
/// The layout is a mock: it is not derived from the train's own
/// `booked_seats` count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMap {
    seats: Vec<Seat>,
}

impl SeatMap {
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub(crate) fn seats_mut(&mut self) -> &mut [Seat] {
        &mut self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn get(&self, seat_no: u32) -> Option<&Seat> {
        self.seats.iter().find(|s| s.seat_no == seat_no)
    }

    pub fn available(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|s| s.is_available())
    }

    pub fn booked_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_available()).count()
    }

    /// Book `seat_no` only if it is currently available. Returns whether
    /// the seat changed state.
    pub fn reserve(&mut self, seat_no: u32) -> bool {
        match self.seats.iter_mut().find(|s| s.seat_no == seat_no) {
            Some(seat) if seat.is_available() => {
                seat.status = SeatStatus::Booked;
                true
            }
            _ => false,
        }
    }
}

impl From<Vec<Seat>> for SeatMap {
    fn from(seats: Vec<Seat>) -> Self {
        Self { seats }
    }
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Confirmed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => f.write_str("Confirmed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResult {
    pub train_id: u32,
    pub train_name: String,
    pub seat_number: u32,
    pub status: BookingStatus,
}
