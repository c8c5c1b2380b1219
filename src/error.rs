//! Error types for parameter submission and task execution.
//!
//! Constraint violations are not errors: they are collected in a
//! [`ViolationReport`] and only wrapped here once a caller asks to execute.

use thiserror::Error;

use crate::parameters::TaskKind;
use crate::validation::ViolationReport;

/// Main error type for submitting and executing task parameters.
#[derive(Error, Debug)]
pub enum ParamsError {
    /// The parameters failed validation, nothing was executed
    #[error("Invalid parameters: {0}")]
    Invalid(ViolationReport),

    /// Programming-contract violation, never retried
    #[error("Misuse: {0}")]
    Misuse(#[from] MisuseError),

    /// The executor ran and reported a failure
    #[error("Task execution failed: {0}")]
    Task(#[from] TaskFailure),
}

/// Contract violations detected at runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MisuseError {
    /// An executor was handed a parameter variant it does not run.
    #[error("executor for {executor} cannot run {params} parameters")]
    KindMismatch { executor: TaskKind, params: TaskKind },
}

/// Failure reported by a task executor. Its content belongs to the executor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} task failed: {message}")]
pub struct TaskFailure {
    pub kind: TaskKind,
    pub message: String,
}

impl TaskFailure {
    pub fn new(kind: TaskKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Result type alias for submission and execution.
pub type ParamsResult<T> = Result<T, ParamsError>;
