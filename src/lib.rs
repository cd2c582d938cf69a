//! A small multi-agent train ticket booking pipeline.
//!
//! A synthetic catalog of trains is generated once at startup. Each user
//! action then runs one synchronous workflow pass over it:
//!
//! - **search**: query understanding, route search, seat availability
//! - **seat map**: lay out a mock seat map, mark a random subset booked
//! - **booking**: finalize the chosen seat, render the notification
//!
//! Agents are plain [`Agent`] implementations wired into a [`Workflow`] and
//! driven by a [`Runner`]. [`Session`] strings the three passes together into
//! the booking state machine; a front end only calls into it and displays
//! what comes back.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use ticket_line::{BookingConfig, Catalog, SearchRequest, Session, Station, TravelClass};
//!
//! let config = BookingConfig::default().with_catalog_size(500).with_seed(7);
//! let catalog = Arc::new(Catalog::from_config(&config));
//! let mut session = Session::new(catalog, config).unwrap();
//!
//! let found = session
//!     .search(SearchRequest {
//!         text: "Chennai to Bangalore sleeper ticket".into(),
//!         source: Station::Chennai,
//!         destination: Station::Bangalore,
//!         class: TravelClass::Sleeper,
//!     })
//!     .unwrap();
//! println!("{} trains found", found.found.len());
//!
//! if let Some(train) = session.train_choices().first() {
//!     session.select_train(train.value).unwrap();
//!     let seat = session.seat_choices()[0].value;
//!     println!("{}", session.confirm(seat).unwrap());
//! }
//! ```

mod agent;
pub mod agents;
mod config;
mod ctx;
pub mod dataset;
pub mod model;
pub mod render;
mod runner;
mod session;
mod workflow;

pub use agent::{Agent, Outcome, StepError, StepResult};
pub use agents::{BookingState, SearchRequest, SearchState, SeatState};
pub use config::{BookingConfig, ConfigError};
pub use ctx::Ctx;
pub use dataset::Catalog;
pub use model::{
    BookingResult, BookingStatus, Preference, Query, Seat, SeatMap, SeatStatus, SeatType, Station,
    Train, TravelClass,
};
pub use runner::{ErrorEvent, Runner, StepEvent};
pub use session::{
    Phase, SearchOutcome, Session, SessionError, booking_workflow, search_workflow,
    seat_map_workflow,
};
pub use workflow::{Workflow, WorkflowBuilder, WorkflowError};
