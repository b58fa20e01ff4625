use std::fmt;

/// A constraint builder aborted the whole instance (§7). Distinct from `BuildResult.success =
/// false`, which a caller can inspect and choose to ignore for a single builder; this is raised
/// when the driver decides the instance cannot proceed at all (e.g. a required variable family
/// was never materialized).
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderFailure {
    pub kind: &'static str,
    pub reason: String,
}

impl BuilderFailure {
    pub fn new(kind: &'static str, reason: impl Into<String>) -> Self {
        Self { kind, reason: reason.into() }
    }
}

impl fmt::Display for BuilderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "builder '{}' failed: {}", self.kind, self.reason)
    }
}

impl std::error::Error for BuilderFailure {}

/// The solver adapter could not even attempt a solve (§7) - as opposed to `SolverStatus`, which
/// covers outcomes the solver itself reports (infeasible, unbounded, time limit).
#[derive(Debug, Clone, PartialEq)]
pub struct SolverError {
    pub reason: String,
}

impl SolverError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solver error: {}", self.reason)
    }
}

impl std::error::Error for SolverError {}
