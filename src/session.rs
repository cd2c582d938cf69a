//! One user's walk through the booking flow.
//!
//! ```text
//! NoSearch -> Searched -> SeatMapShown -> Confirmed
//!     ^          |  ^          |              |
//!     |          |  +----------+ (re-pick)    |
//!     +----------+---- search() resets -------+
//! ```
//!
//! Every action runs one workflow pass to completion. The catalog is shared
//! read-only; the session owns its own selection, seat map, and random
//! source. Seat maps are per session, so two sessions can still confirm the
//! same seat number on the same train.

use crate::agents::{
    AvailabilityAgent, BookingFinalizer, BookingState, NoSeatsNotice, NotificationAgent,
    OccupancyAgent, QueryAgent, SearchAgent, SearchRequest, SearchState, SeatMapAgent, SeatState,
};
use crate::config::{BookingConfig, ConfigError};
use crate::dataset::Catalog;
use crate::model::{BookingResult, Query, SeatMap, Train};
use crate::render::{self, Choice, TrainRow};
use crate::{Ctx, Runner, StepError, Workflow, WorkflowError};
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Workflows
// ---------------------------------------------------------------------------

pub fn search_workflow(catalog: Arc<Catalog>) -> Result<Workflow<SearchState>, WorkflowError> {
    Workflow::builder("search")
        .register(QueryAgent)
        .register(SearchAgent::new(catalog))
        .register(AvailabilityAgent)
        .register(NoSeatsNotice)
        .start_at("query_understanding")
        .then("train_search")
        .then("seat_availability")
        .build()
}

pub fn seat_map_workflow(
    seat_map_size: u32,
    seat_map_booked: usize,
) -> Result<Workflow<SeatState>, WorkflowError> {
    Workflow::builder("seat_map")
        .register(SeatMapAgent::new(seat_map_size))
        .register(OccupancyAgent::new(seat_map_booked))
        .start_at("seat_map")
        .then("seat_occupancy")
        .build()
}

pub fn booking_workflow() -> Result<Workflow<BookingState>, WorkflowError> {
    Workflow::builder("booking")
        .register(BookingFinalizer)
        .register(NotificationAgent)
        .start_at("booking_finalizer")
        .then("notification")
        .build()
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum SessionError {
    /// No search has been run yet.
    NoSearch,
    /// Confirm was requested before a train was picked.
    NoTrainSelected,
    /// The booking is done; only a new search is accepted.
    AlreadyConfirmed,
    /// No offered train at this position.
    UnknownTrain(usize),
    /// The seat map has no seat with this number.
    UnknownSeat(u32),
    /// The seat is already booked in this session's seat map.
    SeatTaken(u32),
    Step(StepError),
    Workflow(WorkflowError),
    Config(ConfigError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSearch => write!(f, "search for trains first"),
            Self::NoTrainSelected => write!(f, "select a train first"),
            Self::AlreadyConfirmed => write!(f, "booking already confirmed, start a new search"),
            Self::UnknownTrain(i) => write!(f, "no train offered at position {i}"),
            Self::UnknownSeat(n) => write!(f, "no seat numbered {n}"),
            Self::SeatTaken(n) => write!(f, "seat {n} is already booked"),
            Self::Step(e) => write!(f, "pipeline error: {e}"),
            Self::Workflow(e) => write!(f, "workflow error: {e}"),
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<StepError> for SessionError {
    fn from(e: StepError) -> Self {
        SessionError::Step(e)
    }
}

impl From<WorkflowError> for SessionError {
    fn from(e: WorkflowError) -> Self {
        SessionError::Workflow(e)
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        SessionError::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Result of the most recent search action.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: Query,
    pub found: Vec<Train>,
    pub available: Vec<Train>,
    /// Failure notification when `available` is empty.
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Phase {
    NoSearch,
    Searched,
    SeatMapShown { train: Train, seats: SeatMap },
    Confirmed { result: BookingResult, message: String },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::NoSearch => "no_search",
            Phase::Searched => "searched",
            Phase::SeatMapShown { .. } => "seat_map_shown",
            Phase::Confirmed { .. } => "confirmed",
        }
    }
}

pub struct Session {
    config: BookingConfig,
    ctx: Ctx,
    search_pass: Runner<SearchState>,
    seat_pass: Runner<SeatState>,
    booking_pass: Runner<BookingState>,
    last_search: Option<SearchOutcome>,
    phase: Phase,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>, config: BookingConfig) -> Result<Self, SessionError> {
        config.validate()?;
        // Offset the seed so seat maps do not replay the catalog's draws.
        let ctx = match config.seed {
            Some(seed) => Ctx::seeded(seed.wrapping_add(1)),
            None => Ctx::new(),
        };
        Ok(Self {
            search_pass: Runner::new(search_workflow(catalog)?).with_tracing(),
            seat_pass: Runner::new(seat_map_workflow(
                config.seat_map_size,
                config.seat_map_booked,
            )?)
            .with_tracing(),
            booking_pass: Runner::new(booking_workflow()?).with_tracing(),
            config,
            ctx,
            last_search: None,
            phase: Phase::NoSearch,
        })
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Evidence lines written by the agents during the last action.
    pub fn logs(&self) -> &[String] {
        self.ctx.logs()
    }

    pub fn last_search(&self) -> Option<&SearchOutcome> {
        self.last_search.as_ref()
    }

    pub fn selected_train(&self) -> Option<&Train> {
        match &self.phase {
            Phase::SeatMapShown { train, .. } => Some(train),
            _ => None,
        }
    }

    pub fn seat_map(&self) -> Option<&SeatMap> {
        match &self.phase {
            Phase::SeatMapShown { seats, .. } => Some(seats),
            _ => None,
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::info!(from = self.phase.name(), to = phase.name(), "session transition");
        self.phase = phase;
    }

    /// Run a new search, discarding any previous selection.
    pub fn search(&mut self, request: SearchRequest) -> Result<&SearchOutcome, SessionError> {
        self.ctx.clear_logs();
        self.last_search = None;
        self.enter(Phase::Searched);

        let state = self.search_pass.run(SearchState::new(request), &mut self.ctx)?;
        let query = state
            .query
            .ok_or_else(|| StepError::other("search pass produced no query"))?;

        Ok(&*self.last_search.insert(SearchOutcome {
            query,
            found: state.found,
            available: state.available,
            notice: state.notice,
        }))
    }

    /// First `display_limit` matching trains, before the availability filter.
    pub fn train_table(&self) -> Vec<TrainRow> {
        self.last_search
            .as_ref()
            .map(|s| render::train_table(&s.found, self.config.display_limit))
            .unwrap_or_default()
    }

    pub fn train_choices(&self) -> Vec<Choice<usize>> {
        self.last_search
            .as_ref()
            .map(|s| render::train_choices(&s.available, self.config.display_limit))
            .unwrap_or_default()
    }

    /// Pick the train at `index` among [`Session::train_choices`] and lay
    /// out a fresh seat map for it.
    pub fn select_train(&mut self, index: usize) -> Result<&SeatMap, SessionError> {
        match self.phase {
            Phase::NoSearch => return Err(SessionError::NoSearch),
            Phase::Confirmed { .. } => return Err(SessionError::AlreadyConfirmed),
            Phase::Searched | Phase::SeatMapShown { .. } => {}
        }

        let train = self
            .last_search
            .as_ref()
            .filter(|_| index < self.config.display_limit)
            .and_then(|s| s.available.get(index))
            .cloned()
            .ok_or(SessionError::UnknownTrain(index))?;

        self.ctx.clear_logs();
        let state = self.seat_pass.run(SeatState::new(train), &mut self.ctx)?;
        self.enter(Phase::SeatMapShown {
            train: state.train,
            seats: state.seats,
        });

        self.seat_map()
            .ok_or_else(|| SessionError::Step(StepError::other("seat map missing after selection")))
    }

    pub fn seat_choices(&self) -> Vec<Choice<u32>> {
        self.seat_map().map(render::seat_choices).unwrap_or_default()
    }

    /// Book `seat_no` on the selected train and return the confirmation text.
    pub fn confirm(&mut self, seat_no: u32) -> Result<String, SessionError> {
        let train = match &self.phase {
            Phase::NoSearch => return Err(SessionError::NoSearch),
            Phase::Searched => return Err(SessionError::NoTrainSelected),
            Phase::Confirmed { .. } => return Err(SessionError::AlreadyConfirmed),
            Phase::SeatMapShown { train, seats } => match seats.get(seat_no) {
                None => return Err(SessionError::UnknownSeat(seat_no)),
                Some(seat) if !seat.is_available() => {
                    return Err(SessionError::SeatTaken(seat_no));
                }
                Some(_) => train.clone(),
            },
        };

        // The seat stays free unless the booking pass succeeds.
        self.ctx.clear_logs();
        let state = self
            .booking_pass
            .run(BookingState::new(train, seat_no), &mut self.ctx)?;
        let result = state
            .result
            .ok_or_else(|| StepError::other("booking pass produced no result"))?;
        if let Phase::SeatMapShown { seats, .. } = &mut self.phase {
            if !seats.reserve(seat_no) {
                return Err(SessionError::SeatTaken(seat_no));
            }
        }

        self.enter(Phase::Confirmed {
            result,
            message: state.message.clone(),
        });
        Ok(state.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::NO_SEATS_MESSAGE;
    use crate::model::{Preference, SeatStatus, Station, TravelClass};
    use crate::{Agent, StepResult};

    struct RejectingFinalizer;

    impl Agent<BookingState> for RejectingFinalizer {
        fn name(&self) -> &'static str {
            "booking_finalizer"
        }
        fn run(&mut self, _state: BookingState, _ctx: &mut Ctx) -> StepResult<BookingState> {
            Err(StepError::invalid("payment declined"))
        }
    }

    fn row(
        id: u32,
        name: &str,
        src: Station,
        dst: Station,
        class: TravelClass,
        free: u32,
    ) -> Train {
        Train::new(
            id,
            name,
            src,
            dst,
            "2025-12-10",
            class,
            80,
            80 - free,
            31,
            Preference::Any,
        )
    }

    fn catalog() -> Arc<Catalog> {
        use Station::*;
        use TravelClass::*;
        Arc::new(Catalog::from(vec![
            row(54321, "Express_7", Chennai, Bangalore, Sleeper, 5),
            row(60001, "Express_9", Chennai, Bangalore, TwoTier, 3),
            row(60002, "Express_10", Hyderabad, Delhi, ThreeTier, 0),
            row(60003, "Express_11", Coimbatore, Mumbai, Sleeper, 12),
        ]))
    }

    fn request(src: Station, dst: Station, class: TravelClass) -> SearchRequest {
        SearchRequest {
            text: "Chennai to Bangalore sleeper ticket venum".into(),
            source: src,
            destination: dst,
            class,
        }
    }

    fn session(config: BookingConfig) -> Session {
        Session::new(catalog(), config.with_seed(99)).unwrap()
    }

    #[test]
    fn workflows_build() {
        assert!(search_workflow(catalog()).is_ok());
        assert!(seat_map_workflow(24, 6).is_ok());
        assert!(booking_workflow().is_ok());
    }

    #[test]
    fn exact_route_finds_the_one_train() {
        let mut s = session(BookingConfig::default());
        let out = s
            .search(request(Station::Chennai, Station::Bangalore, TravelClass::Sleeper))
            .unwrap();

        assert_eq!(out.found.len(), 1);
        assert_eq!(out.found[0].train_id, 54321);
        assert_eq!(out.found[0].seat_available, 5);
        assert_eq!(out.available, out.found);
        assert!(out.notice.is_none());
        assert_eq!(out.query.intent, "Book Ticket");
        assert_eq!(s.phase().name(), "searched");
        assert_eq!(s.logs().len(), 3);
    }

    #[test]
    fn missing_route_yields_no_seats_notice() {
        let mut s = session(BookingConfig::default());
        let out = s
            .search(request(Station::Coimbatore, Station::Mumbai, TravelClass::TwoTier))
            .unwrap();

        assert!(out.found.is_empty());
        assert!(out.available.is_empty());
        assert_eq!(out.notice.as_deref(), Some(NO_SEATS_MESSAGE));
        assert!(s.train_choices().is_empty());
        assert!(matches!(s.select_train(0), Err(SessionError::UnknownTrain(0))));
    }

    #[test]
    fn full_trains_are_found_but_not_offered() {
        let mut s = session(BookingConfig::default());
        let out = s
            .search(request(Station::Hyderabad, Station::Delhi, TravelClass::ThreeTier))
            .unwrap();
        assert_eq!(out.found.len(), 1);
        assert!(out.available.is_empty());
        assert_eq!(s.train_table().len(), 1);
        assert!(s.train_choices().is_empty());
    }

    #[test]
    fn confirming_renders_the_fixed_template() {
        let mut s = session(BookingConfig::default().with_seat_map(24, 0));
        s.search(request(Station::Chennai, Station::Bangalore, TravelClass::Sleeper))
            .unwrap();
        assert_eq!(s.train_choices()[0].label, "Express_7 | ID:54321 | Seats:5");

        let seats = s.select_train(0).unwrap();
        assert_eq!(seats.len(), 24);
        assert_eq!(s.seat_choices().len(), 24);

        let msg = s.confirm(13).unwrap();
        assert_eq!(
            msg,
            "✅ Booking Confirmed!\n\
             Train Name : Express_7\n\
             Train ID   : 54321\n\
             Seat No    : 13\n\
             Status     : Confirmed"
        );
        match s.phase() {
            Phase::Confirmed { result, message } => {
                assert_eq!(result.seat_number, 13);
                assert_eq!(message, &msg);
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    #[test]
    fn seat_map_has_the_configured_occupancy() {
        let mut s = session(BookingConfig::default());
        s.search(request(Station::Chennai, Station::Bangalore, TravelClass::Sleeper))
            .unwrap();
        let seats = s.select_train(0).unwrap();
        assert_eq!(seats.booked_count(), 6);
        assert_eq!(s.seat_choices().len(), 18);
    }

    #[test]
    fn booked_seat_cannot_be_confirmed() {
        let mut s = session(BookingConfig::default());
        s.search(request(Station::Chennai, Station::Bangalore, TravelClass::Sleeper))
            .unwrap();
        let taken = s
            .select_train(0)
            .unwrap()
            .seats()
            .iter()
            .find(|seat| seat.status == SeatStatus::Booked)
            .map(|seat| seat.seat_no)
            .unwrap();

        assert!(matches!(s.confirm(taken), Err(SessionError::SeatTaken(n)) if n == taken));
        assert!(matches!(s.confirm(25), Err(SessionError::UnknownSeat(25))));
        assert_eq!(s.phase().name(), "seat_map_shown");
    }

    #[test]
    fn failed_booking_leaves_the_seat_free() {
        let mut s = session(BookingConfig::default());
        s.search(request(Station::Chennai, Station::Bangalore, TravelClass::Sleeper))
            .unwrap();
        s.select_train(0).unwrap();
        let seat_no = s.seat_choices()[0].value;
        s.booking_pass = Runner::new(
            Workflow::builder("booking")
                .register(RejectingFinalizer)
                .build()
                .unwrap(),
        );

        assert!(matches!(s.confirm(seat_no), Err(SessionError::Step(_))));
        assert!(s.seat_map().unwrap().get(seat_no).unwrap().is_available());
        assert_eq!(s.phase().name(), "seat_map_shown");

        s.booking_pass = Runner::new(booking_workflow().unwrap());
        assert!(s.confirm(seat_no).is_ok());
        assert_eq!(s.phase().name(), "confirmed");
    }

    #[test]
    fn actions_out_of_order_are_rejected() {
        let mut s = session(BookingConfig::default().with_seat_map(24, 0));
        assert!(matches!(s.select_train(0), Err(SessionError::NoSearch)));
        assert!(matches!(s.confirm(1), Err(SessionError::NoSearch)));

        s.search(request(Station::Chennai, Station::Bangalore, TravelClass::Sleeper))
            .unwrap();
        assert!(matches!(s.confirm(1), Err(SessionError::NoTrainSelected)));

        s.select_train(0).unwrap();
        s.confirm(1).unwrap();
        assert!(matches!(s.confirm(2), Err(SessionError::AlreadyConfirmed)));
        assert!(matches!(s.select_train(0), Err(SessionError::AlreadyConfirmed)));
    }

    #[test]
    fn new_search_discards_the_selection() {
        let mut s = session(BookingConfig::default());
        s.search(request(Station::Chennai, Station::Bangalore, TravelClass::Sleeper))
            .unwrap();
        s.select_train(0).unwrap();
        assert!(s.selected_train().is_some());

        s.search(request(Station::Chennai, Station::Bangalore, TravelClass::TwoTier))
            .unwrap();
        assert!(s.selected_train().is_none());
        assert!(s.seat_map().is_none());
        assert_eq!(s.train_choices()[0].value, 0);
        assert_eq!(s.select_train(0).unwrap().len(), 24);
        assert_eq!(s.selected_train().unwrap().train_id, 60001);
    }

    #[test]
    fn train_choices_respect_the_display_limit() {
        let trains: Vec<Train> = (0..15)
            .map(|i| {
                let name = format!("Express_{}", i + 1);
                row(20_000 + i, &name, Station::Chennai, Station::Delhi, TravelClass::Sleeper, 1)
            })
            .collect();
        let mut s = Session::new(
            Arc::new(Catalog::from(trains)),
            BookingConfig::default().with_seed(1),
        )
        .unwrap();

        s.search(request(Station::Chennai, Station::Delhi, TravelClass::Sleeper))
            .unwrap();
        assert_eq!(s.train_choices().len(), 10);
        assert_eq!(s.train_table().len(), 10);
        assert!(matches!(s.select_train(12), Err(SessionError::UnknownTrain(12))));
        assert!(s.select_train(9).is_ok());
    }

    #[test]
    fn same_seed_same_seat_map() {
        let pick = |seed: u64| {
            let mut s = Session::new(catalog(), BookingConfig::default().with_seed(seed)).unwrap();
            s.search(request(Station::Chennai, Station::Bangalore, TravelClass::Sleeper))
                .unwrap();
            let seats = s.select_train(0).unwrap().clone();
            seats
        };
        assert_eq!(pick(3), pick(3));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Session::new(catalog(), BookingConfig::default().with_display_limit(0))
            .err()
            .unwrap();
        assert!(matches!(err, SessionError::Config(ConfigError::Invalid(_))));
    }
}
