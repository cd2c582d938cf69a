use super::SearchState;
use crate::model::{Query, Station, TravelClass};
use crate::{Agent, Ctx, Outcome, StepResult};

pub const BOOK_TICKET_INTENT: &str = "Book Ticket";

/// Turn raw selections into a query record.
///
/// The free text is stored verbatim and never interpreted; the structured
/// selections are what drive the search.
pub fn normalize(text: &str, source: Station, destination: Station, class: TravelClass) -> Query {
    Query {
        intent: BOOK_TICKET_INTENT.to_string(),
        source,
        destination,
        class,
        original_text: text.to_string(),
    }
}

pub struct QueryAgent;

impl Agent<SearchState> for QueryAgent {
    fn name(&self) -> &'static str {
        "query_understanding"
    }

    fn run(&mut self, mut state: SearchState, ctx: &mut Ctx) -> StepResult<SearchState> {
        let req = &state.request;
        let query = normalize(&req.text, req.source, req.destination, req.class);
        ctx.log(format!(
            "query understanding: {} {} -> {} ({})",
            query.intent, query.source, query.destination, query.class
        ));
        state.query = Some(query);
        Ok((state, Outcome::Continue))
    }
}
