use crate::ctx::Ctx;
use std::fmt;

/// What a pipeline stage hands back: the next state plus where to go from here.
pub type StepResult<S> = Result<(S, Outcome), StepError>;

/// One stage of a booking pipeline.
///
/// Every agent in this crate is synchronous and keeps no state between
/// runs; all data flows through `S` and the session's [`Ctx`].
pub trait Agent<S>: Send + 'static {
    /// Unique name inside a workflow, the target of [`Outcome::Next`].
    fn name(&self) -> &'static str;

    /// Run the stage once.
    fn run(&mut self, state: S, ctx: &mut Ctx) -> StepResult<S>;
}

/// Control flow for the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Follow the workflow's default next stage (set via `.then()`).
    Continue,
    /// Pipeline pass complete, return the final state.
    Done,
    /// Jump to a specific agent by name.
    Next(&'static str),
    /// Stop the pass with an error.
    Fail(String),
}

/// Error type for pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The stage was handed input it cannot work with.
    Invalid(String),
    /// A stage ended the pass via [`Outcome::Fail`].
    Failed(String),
    /// Runner-level problems: unknown stage, step limit, missing successor.
    Other(String),
}

impl StepError {
    /// Create an [`Invalid`](StepError::Invalid) error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        StepError::Invalid(msg.into())
    }

    /// Create an [`Other`](StepError::Other) error.
    pub fn other(msg: impl Into<String>) -> Self {
        StepError::Other(msg.into())
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "invalid: {msg}"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for StepError {}
