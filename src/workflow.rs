use crate::Agent;
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// WorkflowError
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
pub enum WorkflowError {
    DuplicateAgent(&'static str),
    UnknownStep(&'static str),
    MissingStart,
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAgent(name) => write!(f, "agent registered twice: {name}"),
            Self::UnknownStep(name) => write!(f, "no agent named {name}"),
            Self::MissingStart => write!(f, "workflow has no start stage"),
        }
    }
}

impl std::error::Error for WorkflowError {}

// ---------------------------------------------------------------------------
// WorkflowBuilder
// ---------------------------------------------------------------------------

/// Collects the stages of one booking pipeline and the order they run in.
///
/// Nothing is checked until [`build`](WorkflowBuilder::build), so stages may
/// be chained before they are registered.
pub struct WorkflowBuilder<S: Clone + 'static> {
    name: &'static str,
    stages: Vec<Box<dyn Agent<S>>>,
    start: Option<&'static str>,
    links: Vec<(&'static str, &'static str)>,
}

impl<S: Clone + 'static> WorkflowBuilder<S> {
    /// Add a stage. Without `start_at`, the first stage registered starts.
    pub fn register<A: Agent<S>>(mut self, agent: A) -> Self {
        self.stages.push(Box::new(agent));
        self
    }

    pub fn start_at(mut self, stage: &'static str) -> Self {
        self.start = Some(stage);
        self
    }

    /// Run `stage` after the last chained one (the start stage at first).
    pub fn then(mut self, stage: &'static str) -> Self {
        let from = self
            .links
            .last()
            .map(|&(_, to)| to)
            .or(self.start)
            .or_else(|| self.stages.first().map(|a| a.name()));
        match from {
            Some(from) => self.links.push((from, stage)),
            None => self.start = Some(stage),
        }
        self
    }

    pub fn build(self) -> Result<Workflow<S>, WorkflowError> {
        let names: Vec<&'static str> = self.stages.iter().map(|a| a.name()).collect();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(WorkflowError::DuplicateAgent(*name));
            }
        }

        let start = self
            .start
            .or_else(|| names.first().copied())
            .ok_or(WorkflowError::MissingStart)?;
        let known = |stage: &'static str| {
            if names.contains(&stage) {
                Ok(stage)
            } else {
                Err(WorkflowError::UnknownStep(stage))
            }
        };
        known(start)?;

        let mut successors = HashMap::new();
        for &(from, to) in &self.links {
            successors.insert(known(from)?, known(to)?);
        }

        Ok(Workflow {
            name: self.name,
            start,
            stages: self.stages,
            successors,
        })
    }
}

// ---------------------------------------------------------------------------
// Workflow (validated, only constructed via build())
// ---------------------------------------------------------------------------

/// A validated pipeline: stage names are unique and every link resolves.
pub struct Workflow<S: Clone + 'static> {
    name: &'static str,
    start: &'static str,
    stages: Vec<Box<dyn Agent<S>>>,
    successors: HashMap<&'static str, &'static str>,
}

impl<S: Clone + 'static> Workflow<S> {
    pub fn builder(name: &'static str) -> WorkflowBuilder<S> {
        WorkflowBuilder {
            name,
            stages: vec![],
            start: None,
            links: vec![],
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stage names in registration order.
    pub fn stages(&self) -> Vec<&'static str> {
        self.stages.iter().map(|a| a.name()).collect()
    }

    pub(crate) fn start(&self) -> &'static str {
        self.start
    }

    pub(crate) fn agent_mut(&mut self, name: &str) -> Option<&mut (dyn Agent<S> + 'static)> {
        self.stages
            .iter_mut()
            .find(|a| a.name() == name)
            .map(|a| &mut **a)
    }

    pub(crate) fn successor(&self, from: &str) -> Option<&'static str> {
        self.successors.get(from).copied()
    }
}
