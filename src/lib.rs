//! Monaco - Monte Carlo project estimation with critical path analysis
//!
//! A project is a dependency graph of tasks, each carrying a duration
//! distribution. Every trial samples one duration per task, schedules the
//! graph with a forward/backward pass, and records the project duration and
//! which tasks had zero slack. Repeating this thousands of times yields
//! completion percentiles and per-task criticality.
//!
//! # Example
//!
//! ```
//! use monaco::{Distribution, Project, Task};
//!
//! let mut project = Project::new("Website");
//! let design = project
//!     .add_task(Task::new("Design", Distribution::triangular(2.0, 3.0, 5.0).unwrap()), &[])
//!     .unwrap();
//! project
//!     .add_task(Task::new("Build", Distribution::pert(5.0, 8.0, 14.0).unwrap()), &[design])
//!     .unwrap();
//!
//! let stats = project.statistics_seeded(1_000, Some(42)).unwrap();
//! assert!(stats.percentiles.p10 <= stats.percentiles.p90);
//! assert!(stats.min >= 7.0);
//! ```

pub mod cli;
pub mod config;
pub mod critical_path;
pub mod csv_output;
pub mod distributions;
pub mod error;
pub mod graph;
pub mod json_output;
pub mod project;
pub mod simulation;
pub mod stats;
pub mod task;

pub use distributions::{Distribution, Estimator};
pub use error::{MonacoError, Result};
pub use project::Project;
pub use simulation::CriticalPathAnalysis;
pub use stats::StatisticsReport;
pub use task::{Task, TaskId};
