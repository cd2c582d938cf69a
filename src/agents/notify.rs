use super::{BookingState, SearchState};
use crate::model::{BookingResult, BookingStatus, Train};
use crate::{Agent, Ctx, Outcome, StepResult};

pub const NO_SEATS_MESSAGE: &str =
    "❌ Booking Failed: No seats available. Please try another train or class.";

/// Record a confirmed booking. No conflict check is made against other
/// sessions.
pub fn finalize(train: &Train, seat_no: u32) -> BookingResult {
    BookingResult {
        train_id: train.train_id,
        train_name: train.train_name.clone(),
        seat_number: seat_no,
        status: BookingStatus::Confirmed,
    }
}

/// Render the confirmation for `result`, or the failure notice for `None`.
pub fn notify(result: Option<&BookingResult>) -> String {
    let Some(r) = result else {
        return NO_SEATS_MESSAGE.to_string();
    };
    format!(
        "✅ Booking Confirmed!\n\
         Train Name : {}\n\
         Train ID   : {}\n\
         Seat No    : {}\n\
         Status     : {}",
        r.train_name, r.train_id, r.seat_number, r.status
    )
}

pub struct BookingFinalizer;

impl Agent<BookingState> for BookingFinalizer {
    fn name(&self) -> &'static str {
        "booking_finalizer"
    }

    fn run(&mut self, mut state: BookingState, ctx: &mut Ctx) -> StepResult<BookingState> {
        let result = finalize(&state.train, state.seat_no);
        ctx.log(format!(
            "booking finalizer: seat {} on {} ({})",
            result.seat_number, result.train_name, result.status
        ));
        state.result = Some(result);
        Ok((state, Outcome::Continue))
    }
}

pub struct NotificationAgent;

impl Agent<BookingState> for NotificationAgent {
    fn name(&self) -> &'static str {
        "notification"
    }

    fn run(&mut self, mut state: BookingState, ctx: &mut Ctx) -> StepResult<BookingState> {
        state.message = notify(state.result.as_ref());
        ctx.log("notification: sent");
        Ok((state, Outcome::Done))
    }
}

/// End of the search pass when no train on the route has a free seat.
pub struct NoSeatsNotice;

impl Agent<SearchState> for NoSeatsNotice {
    fn name(&self) -> &'static str {
        "no_seats_notice"
    }

    fn run(&mut self, mut state: SearchState, ctx: &mut Ctx) -> StepResult<SearchState> {
        state.notice = Some(notify(None));
        ctx.log("notification: no seats available");
        Ok((state, Outcome::Done))
    }
}
