//! The booking pipeline stages.
//!
//! Each stage is a plain function plus a thin [`Agent`](crate::Agent)
//! wrapper so it can be wired into a [`Workflow`](crate::Workflow). The
//! state types below are what flows between stages of each user action.

mod availability;
mod notify;
mod query;
mod search;
mod seat;

pub use availability::{AvailabilityAgent, filter_available};
pub use notify::{
    BookingFinalizer, NO_SEATS_MESSAGE, NoSeatsNotice, NotificationAgent, finalize, notify,
};
pub use query::{BOOK_TICKET_INTENT, QueryAgent, normalize};
pub use search::{SearchAgent, search};
pub use seat::{OccupancyAgent, SeatMapAgent, build_seat_map, mark_booked};

use crate::model::{BookingResult, Query, SeatMap, Station, Train, TravelClass};

/// Raw selections handed over by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub text: String,
    pub source: Station,
    pub destination: Station,
    pub class: TravelClass,
}

/// State of the search pass: query understanding, route search, availability.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub request: SearchRequest,
    pub query: Option<Query>,
    /// Every train on the route, before the availability filter.
    pub found: Vec<Train>,
    /// Trains on the route with at least one free seat.
    pub available: Vec<Train>,
    /// Set when nothing bookable was found.
    pub notice: Option<String>,
}

impl SearchState {
    pub fn new(request: SearchRequest) -> Self {
        Self {
            request,
            query: None,
            found: vec![],
            available: vec![],
            notice: None,
        }
    }
}

/// State of the seat-map pass for one selected train.
#[derive(Debug, Clone)]
pub struct SeatState {
    pub train: Train,
    pub seats: SeatMap,
}

impl SeatState {
    pub fn new(train: Train) -> Self {
        Self {
            train,
            seats: SeatMap::default(),
        }
    }
}

/// State of the confirmation pass.
#[derive(Debug, Clone)]
pub struct BookingState {
    pub train: Train,
    pub seat_no: u32,
    pub result: Option<BookingResult>,
    pub message: String,
}

impl BookingState {
    pub fn new(train: Train, seat_no: u32) -> Self {
        Self {
            train,
            seat_no,
            result: None,
            message: String::new(),
        }
    }
}
