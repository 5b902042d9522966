//! Tasks: named units of work with a probabilistic duration

use crate::distributions::{Distribution, EstimateParams, Estimator};
use crate::error::{MonacoError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique task identifier
///
/// Allocated once when a [`Task`] is constructed; clones of a task share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    fn next() -> Self {
        TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// A unit of work whose duration is drawn from a [`Distribution`]
///
/// A task without a distribution is legal to build; sampling it fails with
/// [`MonacoError::UnconfiguredTask`].
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    name: Option<String>,
    distribution: Option<Distribution>,
}

impl Task {
    pub fn new(name: impl Into<String>, distribution: Distribution) -> Self {
        Self {
            id: TaskId::next(),
            name: Some(name.into()),
            distribution: Some(distribution),
        }
    }

    /// Unnamed task; displayed by its id
    pub fn anonymous(distribution: Distribution) -> Self {
        Self {
            id: TaskId::next(),
            name: None,
            distribution: Some(distribution),
        }
    }

    /// Task with no distribution yet
    pub fn unconfigured(name: impl Into<String>) -> Self {
        Self {
            id: TaskId::next(),
            name: Some(name.into()),
            distribution: None,
        }
    }

    /// Three-point estimate with a named estimator
    ///
    /// `estimator` must be one of the three-point families (`triangular`,
    /// `pert`, `uniform`; the latter ignores `mode`). Other families need
    /// fields this constructor does not take and are rejected as missing
    /// parameters.
    ///
    /// ```
    /// use monaco::task::Task;
    ///
    /// let task = Task::with_estimate("Research", "triangular", 2.0, 5.0, 10.0).unwrap();
    /// assert_eq!(task.estimator().unwrap().as_str(), "triangular");
    /// assert!(Task::with_estimate("Research", "gamma", 2.0, 5.0, 10.0).is_err());
    /// ```
    pub fn with_estimate(
        name: impl Into<String>,
        estimator: &str,
        min: f64,
        mode: f64,
        max: f64,
    ) -> Result<Self> {
        let params = EstimateParams::three_point(min, mode, max);
        let distribution = Distribution::from_estimator(estimator, &params)?;
        Ok(Self::new(name, distribution))
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name if set, otherwise the id (`task-<n>`)
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }

    pub fn distribution(&self) -> Option<&Distribution> {
        self.distribution.as_ref()
    }

    pub fn estimator(&self) -> Option<Estimator> {
        self.distribution.as_ref().map(Distribution::estimator)
    }

    pub fn is_configured(&self) -> bool {
        self.distribution.is_some()
    }

    /// Draw one duration for this task
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        match &self.distribution {
            Some(distribution) => Ok(distribution.sample(rng)),
            None => Err(MonacoError::UnconfiguredTask {
                task: self.display_name(),
            }),
        }
    }
}
