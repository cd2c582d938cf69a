use crate::{Ctx, Outcome, StepError, Workflow};
use std::time::{Duration, Instant};

/// Passed to the `on_step` hook after each successful agent step.
pub struct StepEvent<'a> {
    pub workflow: &'a str,
    pub agent: &'a str,
    pub outcome: &'a Outcome,
    pub duration: Duration,
    pub step_number: usize,
}

/// Passed to the `on_error` hook when an agent errors or a limit is exceeded.
pub struct ErrorEvent<'a> {
    pub workflow: &'a str,
    pub agent: &'a str,
    pub error: &'a StepError,
    pub step_number: usize,
}

/// Drives one workflow pass to completion.
///
/// A pass is synchronous and runs until an agent returns [`Outcome::Done`],
/// fails, or the step limit is hit.
pub struct Runner<S: Clone + 'static> {
    wf: Workflow<S>,
    max_steps: usize,
    on_step: Option<Box<dyn FnMut(&StepEvent)>>,
    on_error: Option<Box<dyn FnMut(&ErrorEvent)>>,
}

impl<S: Clone + 'static> Runner<S> {
    pub fn new(wf: Workflow<S>) -> Self {
        Self {
            wf,
            max_steps: 64,
            on_step: None,
            on_error: None,
        }
    }

    /// Guard against `Next` cycles.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn on_step(mut self, cb: impl FnMut(&StepEvent) + 'static) -> Self {
        self.on_step = Some(Box::new(cb));
        self
    }

    pub fn on_error(mut self, cb: impl FnMut(&ErrorEvent) + 'static) -> Self {
        self.on_error = Some(Box::new(cb));
        self
    }

    /// Report every step and error through `tracing`.
    pub fn with_tracing(self) -> Self {
        self.on_step(|e| {
            tracing::debug!(
                workflow = e.workflow,
                agent = e.agent,
                outcome = ?e.outcome,
                step = e.step_number,
                elapsed_us = e.duration.as_micros() as u64,
                "agent step"
            );
        })
        .on_error(|e| {
            tracing::warn!(
                workflow = e.workflow,
                agent = e.agent,
                step = e.step_number,
                error = %e.error,
                "agent error"
            );
        })
    }

    pub fn workflow_name(&self) -> &'static str {
        self.wf.name()
    }

    pub fn run(&mut self, mut state: S, ctx: &mut Ctx) -> Result<S, StepError> {
        let workflow = self.wf.name();
        let mut current = self.wf.start();
        let mut step_number: usize = 0;

        while step_number < self.max_steps {
            step_number += 1;

            let agent = self
                .wf
                .agent_mut(current)
                .ok_or_else(|| StepError::other(format!("unknown step: {current}")))?;

            let started = Instant::now();
            let result = agent.run(state.clone(), ctx);
            let duration = started.elapsed();

            let (next_state, outcome) = match result {
                Ok(step) => step,
                Err(err) => {
                    self.report(current, &err, step_number);
                    return Err(err);
                }
            };

            if let Some(cb) = &mut self.on_step {
                cb(&StepEvent {
                    workflow,
                    agent: current,
                    outcome: &outcome,
                    duration,
                    step_number,
                });
            }

            state = next_state;

            current = match outcome {
                Outcome::Done => return Ok(state),
                Outcome::Fail(msg) => {
                    let err = StepError::Failed(msg);
                    self.report(current, &err, step_number);
                    return Err(err);
                }
                Outcome::Next(stage) => stage,
                Outcome::Continue => match self.wf.successor(current) {
                    Some(next) => next,
                    None => {
                        let err = StepError::other(format!(
                            "stage '{current}' returned Continue but has no next stage"
                        ));
                        self.report(current, &err, step_number);
                        return Err(err);
                    }
                },
            };
        }

        let err = StepError::other(format!(
            "max_steps ({}) exceeded in workflow {workflow}",
            self.max_steps
        ));
        self.report(current, &err, step_number);
        Err(err)
    }

    fn report(&mut self, agent: &str, error: &StepError, step_number: usize) {
        if let Some(cb) = &mut self.on_error {
            cb(&ErrorEvent {
                workflow: self.wf.name(),
                agent,
                error,
                step_number,
            });
        }
    }
}
