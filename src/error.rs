//! Error types for estimation
//!
//! Three families of failure surface from the engine, all raised
//! synchronously and never retried:
//!
//! - **Configuration**: invalid distribution parameters or estimator names,
//!   raised when a [`Distribution`](crate::distributions::Distribution) is built.
//! - **Graph integrity**: unknown dependencies or cycles, raised by
//!   [`Project::add_task`](crate::project::Project::add_task) with the graph
//!   left untouched.
//! - **Unconfigured task**: sampling a task that has no distribution bound.

use thiserror::Error;

/// Errors for project modelling and simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MonacoError {
    #[error("Invalid {distribution} distribution: {reason}")]
    InvalidParameter {
        distribution: &'static str,
        reason: String,
    },

    #[error("Unknown estimator '{name}'. Valid options: triangular, uniform, normal, pert, lognormal, beta")]
    UnknownEstimator { name: String },

    #[error("{distribution} distribution requires '{field}'")]
    MissingParameter {
        distribution: &'static str,
        field: &'static str,
    },

    #[error("Dependency '{dependency}' of task '{task}' must be added to the project before being used as a dependency")]
    DependencyNotRegistered { task: String, dependency: String },

    #[error("Circular dependency detected while adding task '{task}': task dependencies must form a DAG")]
    CycleDetected { task: String },

    #[error("Task '{task}' has no distribution configured")]
    UnconfiguredTask { task: String },

    #[error("Cannot compute statistics over zero simulations")]
    EmptySample,
}

pub type Result<T> = std::result::Result<T, MonacoError>;

impl MonacoError {
    pub(crate) fn invalid(distribution: &'static str, reason: impl Into<String>) -> Self {
        MonacoError::InvalidParameter {
            distribution,
            reason: reason.into(),
        }
    }

    /// True for errors raised while validating distribution parameters
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MonacoError::InvalidParameter { .. }
                | MonacoError::UnknownEstimator { .. }
                | MonacoError::MissingParameter { .. }
        )
    }

    /// True for errors raised by graph mutation
    pub fn is_graph_error(&self) -> bool {
        matches!(
            self,
            MonacoError::DependencyNotRegistered { .. } | MonacoError::CycleDetected { .. }
        )
    }
}
