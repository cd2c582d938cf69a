use super::SearchState;
use crate::dataset::Catalog;
use crate::model::{Query, Train};
use crate::{Agent, Ctx, Outcome, StepError, StepResult};
use std::sync::Arc;

/// Trains whose route and class match the query, in catalog order.
pub fn search(trains: &[Train], query: &Query) -> Vec<Train> {
    trains
        .iter()
        .filter(|t| {
            t.source == query.source && t.destination == query.destination && t.class == query.class
        })
        .cloned()
        .collect()
}

/// Route search over the shared catalog.
pub struct SearchAgent {
    catalog: Arc<Catalog>,
}

impl SearchAgent {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Agent<SearchState> for SearchAgent {
    fn name(&self) -> &'static str {
        "train_search"
    }

    fn run(&mut self, mut state: SearchState, ctx: &mut Ctx) -> StepResult<SearchState> {
        let query = state
            .query
            .as_ref()
            .ok_or_else(|| StepError::invalid("train search ran before query understanding"))?;
        state.found = search(self.catalog.trains(), query);
        ctx.log(format!("train search: {} trains found", state.found.len()));
        Ok((state, Outcome::Continue))
    }
}
