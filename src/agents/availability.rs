use super::SearchState;
use crate::model::Train;
use crate::{Agent, Ctx, Outcome, StepResult};

/// Trains with at least one free seat, order preserved.
pub fn filter_available(trains: &[Train]) -> Vec<Train> {
    trains.iter().filter(|t| t.seat_available > 0).cloned().collect()
}

/// Narrows search results to bookable trains. Hands off to the no-seats
/// notice when nothing is left.
pub struct AvailabilityAgent;

impl Agent<SearchState> for AvailabilityAgent {
    fn name(&self) -> &'static str {
        "seat_availability"
    }

    fn run(&mut self, mut state: SearchState, ctx: &mut Ctx) -> StepResult<SearchState> {
        state.available = filter_available(&state.found);
        ctx.log(format!(
            "seat availability: {} trains with free seats",
            state.available.len()
        ));

        if state.available.is_empty() {
            return Ok((state, Outcome::Next("no_seats_notice")));
        }
        Ok((state, Outcome::Done))
    }
}
