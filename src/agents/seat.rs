use super::SeatState;
use crate::model::{Seat, SeatMap, SeatStatus, SeatType};
use crate::{Agent, Ctx, Outcome, StepResult};
use rand::Rng;
use rand::seq::index;

/// Seats `1..=total_seats`, all available, alternating lower/upper from seat 1.
pub fn build_seat_map(total_seats: u32) -> SeatMap {
    (1..=total_seats)
        .map(|seat_no| Seat {
            seat_no,
            seat_type: SeatType::for_seat(seat_no),
            status: SeatStatus::Available,
        })
        .collect::<Vec<_>>()
        .into()
}

/// Mark `booked_count` distinct seats, drawn uniformly from the whole map,
/// as booked. Requests larger than the map are clamped to its size.
pub fn mark_booked<R: Rng + ?Sized>(
    mut seats: SeatMap,
    booked_count: usize,
    rng: &mut R,
) -> SeatMap {
    let len = seats.len();
    let amount = booked_count.min(len);
    if amount < booked_count {
        tracing::debug!(requested = booked_count, clamped = amount, "booked count clamped");
    }

    let slots = seats.seats_mut();
    for i in index::sample(rng, len, amount) {
        slots[i].status = SeatStatus::Booked;
    }
    seats
}

/// Lays out a fresh mock seat map for the selected train.
pub struct SeatMapAgent {
    size: u32,
}

impl SeatMapAgent {
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl Agent<SeatState> for SeatMapAgent {
    fn name(&self) -> &'static str {
        "seat_map"
    }

    fn run(&mut self, mut state: SeatState, ctx: &mut Ctx) -> StepResult<SeatState> {
        state.seats = build_seat_map(self.size);
        ctx.log(format!(
            "seat map: {} seats for {}",
            state.seats.len(),
            state.train.train_name
        ));
        Ok((state, Outcome::Continue))
    }
}

/// Marks a random subset of the map as already taken.
pub struct OccupancyAgent {
    booked: usize,
}

impl OccupancyAgent {
    pub fn new(booked: usize) -> Self {
        Self { booked }
    }
}

impl Agent<SeatState> for OccupancyAgent {
    fn name(&self) -> &'static str {
        "seat_occupancy"
    }

    fn run(&mut self, mut state: SeatState, ctx: &mut Ctx) -> StepResult<SeatState> {
        state.seats = mark_booked(state.seats, self.booked, ctx.rng());
        ctx.log(format!(
            "seat occupancy: {} booked, {} free",
            state.seats.booked_count(),
            state.seats.available().count()
        ));
        Ok((state, Outcome::Done))
    }
}
