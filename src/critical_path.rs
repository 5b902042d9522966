//! Critical Path Method for a single simulated trial
//!
//! Given one sampled duration per task, this module computes the project
//! duration and which tasks have zero slack.
//!
//! # Algorithm: Forward/Backward Pass
//!
//! Both passes are dynamic programs over a topological order, so one trial
//! costs O(V + E):
//!
//! ```text
//! forward  (topological order):
//!     ES[t] = max(EF[d]) over dependencies d, or 0 without dependencies
//!     EF[t] = ES[t] + duration[t]
//! project duration = max(EF[t])
//!
//! backward (reverse topological order):
//!     LF[t] = min(LS[u]) over dependents u, or project duration without dependents
//!     LS[t] = LF[t] - duration[t]
//!
//! slack[t] = LS[t] - ES[t];  critical iff |slack[t]| < 1e-9
//! ```
//!
//! # Example Project
//!
//! ```text
//!        ┌─ B (5) ─┐
//! A (2) ─┤         ├─ D (3)
//!        └─ C (8) ─┘
//!
//! Critical path: A → C → D
//! Total duration: 2 + 8 + 3 = 13   (B has 3 units of slack)
//! ```
//!
//! # Edgeless Projects
//!
//! When no task declares a dependency anywhere, tasks are treated as a plain
//! sequence in insertion order: the duration is the sum of all task
//! durations and every task is critical.
//!
//! # Example
//!
//! ```
//! use monaco::critical_path::SchedulePlan;
//! use monaco::graph::TaskGraph;
//!
//! let mut graph = TaskGraph::new();
//! for _ in 0..4 {
//!     graph.add_node();
//! }
//! graph.set_dependencies(1, &[0]).unwrap();
//! graph.set_dependencies(2, &[0]).unwrap();
//! graph.set_dependencies(3, &[1, 2]).unwrap();
//!
//! let plan = SchedulePlan::new(&graph);
//! let schedule = plan.schedule(&[2.0, 5.0, 8.0, 3.0]);
//!
//! assert_eq!(schedule.project_duration, 13.0);
//! assert_eq!(schedule.critical_path(), vec![0, 2, 3]);
//! ```

use crate::graph::TaskGraph;

/// Slack below which a task counts as critical
pub const CRITICAL_TOLERANCE: f64 = 1e-9;

/// Graph structure precomputed once and reused for every trial
#[derive(Debug, Clone)]
pub struct SchedulePlan {
    order: Vec<usize>,
    dependencies: Vec<Vec<usize>>,
    dependents: Vec<Vec<usize>>,
    sequential: bool,
}

impl SchedulePlan {
    pub fn new(graph: &TaskGraph) -> Self {
        let n = graph.node_count();
        let sequential = graph.is_edgeless();
        let order = if sequential {
            (0..n).collect()
        } else {
            graph.topological_order()
        };
        Self {
            order,
            dependencies: (0..n).map(|i| graph.dependencies(i).to_vec()).collect(),
            dependents: graph.dependents(),
            sequential,
        }
    }

    pub fn task_count(&self) -> usize {
        self.order.len()
    }

    /// True when the plan sums durations instead of running CPM
    pub fn is_sequential(&self) -> bool {
        self.sequential
    }

    /// Tasks in the order the passes visit them
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Full forward/backward pass over one trial's durations
    ///
    /// `durations[i]` is the sampled duration of node `i`.
    pub fn schedule(&self, durations: &[f64]) -> TrialSchedule {
        let n = self.order.len();
        debug_assert_eq!(durations.len(), n);

        if self.sequential {
            return self.sequential_schedule(durations);
        }

        let mut earliest_start = vec![0.0; n];
        let mut earliest_finish = vec![0.0; n];
        for &task in &self.order {
            let start = self.dependencies[task]
                .iter()
                .map(|&dep| earliest_finish[dep])
                .fold(0.0, f64::max);
            earliest_start[task] = start;
            earliest_finish[task] = start + durations[task];
        }

        let project_duration = earliest_finish.iter().copied().fold(0.0, f64::max);

        let mut latest_start = vec![0.0; n];
        let mut latest_finish = vec![0.0; n];
        for &task in self.order.iter().rev() {
            let finish = self.dependents[task]
                .iter()
                .map(|&dependent| latest_start[dependent])
                .fold(project_duration, f64::min);
            latest_finish[task] = finish;
            latest_start[task] = finish - durations[task];
        }

        let slack: Vec<f64> = (0..n)
            .map(|i| latest_start[i] - earliest_start[i])
            .collect();
        let critical = slack
            .iter()
            .map(|s| s.abs() < CRITICAL_TOLERANCE)
            .collect();

        TrialSchedule {
            order: self.order.clone(),
            earliest_start,
            earliest_finish,
            latest_start,
            latest_finish,
            slack,
            critical,
            project_duration,
        }
    }

    fn sequential_schedule(&self, durations: &[f64]) -> TrialSchedule {
        let n = durations.len();
        let mut earliest_start = Vec::with_capacity(n);
        let mut earliest_finish = Vec::with_capacity(n);
        let mut elapsed = 0.0;
        for &duration in durations {
            earliest_start.push(elapsed);
            elapsed += duration;
            earliest_finish.push(elapsed);
        }

        TrialSchedule {
            order: self.order.clone(),
            latest_start: earliest_start.clone(),
            latest_finish: earliest_finish.clone(),
            earliest_start,
            earliest_finish,
            slack: vec![0.0; n],
            critical: vec![true; n],
            project_duration: elapsed,
        }
    }
}

/// Outcome of the forward/backward pass for one trial
///
/// All vectors are indexed by task position.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSchedule {
    /// Visit order of the passes
    pub order: Vec<usize>,
    pub earliest_start: Vec<f64>,
    pub earliest_finish: Vec<f64>,
    pub latest_start: Vec<f64>,
    pub latest_finish: Vec<f64>,
    pub slack: Vec<f64>,
    pub critical: Vec<bool>,
    pub project_duration: f64,
}

impl TrialSchedule {
    /// Critical task positions in visit order
    pub fn critical_path(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&i| self.critical[i])
            .collect()
    }

    pub fn is_critical(&self, task: usize) -> bool {
        self.critical.get(task).copied().unwrap_or(false)
    }

    /// Task with the most slack, i.e. the safest to let slip
    pub fn max_slack(&self) -> Option<(usize, f64)> {
        self.slack
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}
