//! Projects: an ordered set of tasks plus their dependency DAG
//!
//! A [`Project`] owns its tasks (in insertion order) and a [`TaskGraph`]
//! indexed by insertion position. The graph is only ever changed through
//! [`Project::add_task`], which either applies a change completely or leaves
//! the project exactly as it was.
//!
//! # Example
//!
//! ```
//! use monaco::project::Project;
//! use monaco::task::Task;
//!
//! # fn main() -> monaco::error::Result<()> {
//! let mut project = Project::new("Web App");
//! let backend = project.add_task(Task::with_estimate("Backend", "triangular", 10.0, 15.0, 20.0)?, &[])?;
//! let frontend = project.add_task(Task::with_estimate("Frontend", "triangular", 8.0, 12.0, 15.0)?, &[])?;
//! project.add_task(
//!     Task::with_estimate("Integration", "triangular", 2.0, 3.0, 5.0)?,
//!     &[backend, frontend],
//! )?;
//!
//! let stats = project.statistics_seeded(2_000, Some(42))?;
//! assert!(stats.percentiles.p10 <= stats.percentiles.p95);
//! assert!(stats.min >= 12.0 && stats.max <= 25.0);
//! # Ok(())
//! # }
//! ```

use crate::critical_path::{SchedulePlan, TrialSchedule};
use crate::error::{MonacoError, Result};
use crate::graph::TaskGraph;
use crate::simulation::{self, CriticalPathAnalysis, SimulationRun};
use crate::stats::StatisticsReport;
use crate::task::{Task, TaskId};
use fnv::FnvHashMap;
use rand::Rng;

pub const DEFAULT_UNIT: &str = "days";

/// A collection of tasks with optional dependencies between them
#[derive(Debug, Clone)]
pub struct Project {
    name: Option<String>,
    unit: String,
    tasks: Vec<Task>,
    index: FnvHashMap<TaskId, usize>,
    graph: TaskGraph,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: None,
            unit: DEFAULT_UNIT.to_string(),
            tasks: Vec::new(),
            index: FnvHashMap::default(),
            graph: TaskGraph::new(),
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Set the time-unit label (no conversion is performed)
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.index.get(&id).map(|&pos| &self.tasks[pos])
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Ids of the tasks `id` waits on, in the order they were declared
    pub fn dependencies_of(&self, id: TaskId) -> Vec<TaskId> {
        match self.index.get(&id) {
            Some(&pos) => self
                .graph
                .dependencies(pos)
                .iter()
                .map(|&dep| self.tasks[dep].id())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Tasks ordered dependencies-first
    ///
    /// Ties between tasks that become ready together follow insertion order.
    pub fn topological_order(&self) -> Vec<&Task> {
        self.graph
            .topological_order()
            .into_iter()
            .map(|pos| &self.tasks[pos])
            .collect()
    }

    /// Register `task`, which starts after every task in `depends_on`
    ///
    /// Each dependency must already be part of the project. Adding a task
    /// that is already registered keeps its position: a non-empty
    /// `depends_on` replaces its dependency set, an empty one leaves its
    /// dependencies alone.
    ///
    /// # Errors
    ///
    /// - [`MonacoError::DependencyNotRegistered`] if a dependency is unknown
    /// - [`MonacoError::CycleDetected`] if the new edges would close a cycle
    ///
    /// On error the project is unchanged.
    pub fn add_task(&mut self, task: Task, depends_on: &[TaskId]) -> Result<TaskId> {
        let id = task.id();

        let mut dep_positions = Vec::with_capacity(depends_on.len());
        for dep in depends_on {
            match self.index.get(dep) {
                Some(&pos) => dep_positions.push(pos),
                None => {
                    return Err(MonacoError::DependencyNotRegistered {
                        task: task.display_name(),
                        dependency: dep.to_string(),
                    })
                }
            }
        }

        let existing = self.index.get(&id).copied();
        let pos = match existing {
            Some(pos) => pos,
            None => self.graph.add_node(),
        };

        if !dep_positions.is_empty() && self.graph.set_dependencies(pos, &dep_positions).is_err() {
            if existing.is_none() {
                self.graph.truncate(pos);
            }
            return Err(MonacoError::CycleDetected {
                task: task.display_name(),
            });
        }

        tracing::debug!(
            task = %task.display_name(),
            dependencies = dep_positions.len(),
            replaced = existing.is_some(),
            "task added"
        );

        match existing {
            Some(pos) => self.tasks[pos] = task,
            None => {
                self.tasks.push(task);
                self.index.insert(id, pos);
            }
        }
        Ok(id)
    }

    /// Sample every task once and compute the full schedule
    pub fn simulate_once<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TrialSchedule> {
        let mut durations = vec![0.0; self.tasks.len()];
        simulation::sample_durations(&self.tasks, &mut durations, rng)?;
        Ok(SchedulePlan::new(&self.graph).schedule(&durations))
    }

    /// Duration of one simulated trial
    pub fn estimate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        self.simulate_once(rng).map(|schedule| schedule.project_duration)
    }

    /// Run `n` trials, keeping raw durations and critical counts
    pub fn simulate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<SimulationRun> {
        simulation::run_trials(self, n, rng)
    }

    /// Summary statistics over `n` trials
    pub fn statistics<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<StatisticsReport> {
        let run = self.simulate(n, rng)?;
        StatisticsReport::from_durations(&run.durations, &self.unit)
    }

    /// [`statistics`](Self::statistics) with a generator built from `seed`
    /// (OS entropy when `None`)
    pub fn statistics_seeded(&self, n: usize, seed: Option<u64>) -> Result<StatisticsReport> {
        let mut rng = simulation::rng_from_seed(seed);
        self.statistics(n, &mut rng)
    }

    /// How often each task is critical over `n` trials
    ///
    /// The same `seed` always yields the same frequencies.
    pub fn critical_path_analysis(
        &self,
        n: usize,
        seed: Option<u64>,
    ) -> Result<CriticalPathAnalysis> {
        let mut rng = simulation::rng_from_seed(seed);
        self.critical_path_analysis_with(n, &mut rng)
    }

    pub fn critical_path_analysis_with<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<CriticalPathAnalysis> {
        let run = self.simulate(n, rng)?;
        Ok(CriticalPathAnalysis::from_run(self, &run))
    }
}
