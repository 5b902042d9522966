//! Monte Carlo driver
//!
//! A trial samples every task once (in insertion order), runs the
//! forward/backward pass and records the project duration plus which tasks
//! were critical. Trials share nothing but the random source.
//!
//! The sequential path threads one caller-supplied RNG through every draw, so
//! a fixed seed reproduces the whole run. The parallel path gives each worker
//! its own [`StdRng`] derived from `(seed, worker index)` and a contiguous
//! slice of the trials; worker 0 uses the seed unchanged, so one worker
//! matches the sequential run exactly.

use crate::critical_path::SchedulePlan;
use crate::error::Result;
use crate::project::Project;
use crate::task::{Task, TaskId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const WORKER_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Build a generator from an optional seed, falling back to OS entropy
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Independent generator for one parallel worker
pub fn worker_rng(seed: u64, worker: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add((worker as u64).wrapping_mul(WORKER_SEED_STRIDE)))
}

/// Raw output of `n` trials
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    /// Project duration of each trial, in trial order
    pub durations: Vec<f64>,
    /// Per task position: number of trials in which the task was critical
    pub critical_counts: Vec<usize>,
}

impl SimulationRun {
    fn empty(tasks: usize, capacity: usize) -> Self {
        Self {
            durations: Vec::with_capacity(capacity),
            critical_counts: vec![0; tasks],
        }
    }

    pub fn trials(&self) -> usize {
        self.durations.len()
    }

    /// Append another run's trials after this one's
    fn merge(&mut self, other: SimulationRun) {
        self.durations.extend(other.durations);
        for (count, extra) in self.critical_counts.iter_mut().zip(other.critical_counts) {
            *count += extra;
        }
    }
}

/// Sample one duration per task into `durations`
pub(crate) fn sample_durations<R: Rng + ?Sized>(
    tasks: &[Task],
    durations: &mut [f64],
    rng: &mut R,
) -> Result<()> {
    for (slot, task) in durations.iter_mut().zip(tasks) {
        *slot = task.sample(rng)?;
    }
    Ok(())
}

/// Run `n` sequential trials drawing from `rng`
pub fn run_trials<R: Rng + ?Sized>(
    project: &Project,
    n: usize,
    rng: &mut R,
) -> Result<SimulationRun> {
    let tasks = project.tasks();
    let plan = SchedulePlan::new(project.graph());
    let mut run = SimulationRun::empty(tasks.len(), n);
    let mut durations = vec![0.0; tasks.len()];

    tracing::debug!(
        trials = n,
        tasks = tasks.len(),
        sequential = plan.is_sequential(),
        "running simulation"
    );

    for _ in 0..n {
        sample_durations(tasks, &mut durations, rng)?;
        let schedule = plan.schedule(&durations);
        run.durations.push(schedule.project_duration);
        for (count, critical) in run.critical_counts.iter_mut().zip(&schedule.critical) {
            if *critical {
                *count += 1;
            }
        }
    }

    Ok(run)
}

/// Trials per worker: contiguous, remainder spread over the first workers
fn partition(n: usize, workers: usize) -> Vec<usize> {
    let base = n / workers;
    let extra = n % workers;
    (0..workers)
        .map(|w| base + usize::from(w < extra))
        .collect()
}

/// Run `n` trials across `workers` scoped threads
///
/// Results are concatenated in worker order, so the output is reproducible
/// for a fixed `(seed, workers)` pair.
pub fn run_trials_parallel(
    project: &Project,
    n: usize,
    seed: u64,
    workers: usize,
) -> Result<SimulationRun> {
    let workers = workers.clamp(1, n.max(1));
    let sizes = partition(n, workers);
    tracing::debug!(trials = n, workers, seed, "running parallel simulation");

    let partials: Vec<Result<SimulationRun>> = crossbeam::scope(|scope| {
        let handles: Vec<_> = sizes
            .iter()
            .enumerate()
            .map(|(worker, &size)| {
                scope.spawn(move |_| {
                    let mut rng = worker_rng(seed, worker);
                    run_trials(project, size, &mut rng)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect::<Vec<_>>()
    })
    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));

    let mut run = SimulationRun::empty(project.len(), n);
    for partial in partials {
        run.merge(partial?);
    }
    Ok(run)
}

/// How often one task was critical
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalTaskFrequency {
    pub task_id: TaskId,
    pub name: String,
    pub count: usize,
    pub frequency: f64,
}

/// Per-task critical-path frequencies over a run, in task insertion order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalPathAnalysis {
    pub n_simulations: usize,
    pub tasks: Vec<CriticalTaskFrequency>,
}

impl CriticalPathAnalysis {
    pub fn from_run(project: &Project, run: &SimulationRun) -> Self {
        let n = run.trials();
        if n == 0 {
            tracing::warn!("critical path analysis over zero simulations, all frequencies are 0");
        }

        let tasks = project
            .tasks()
            .iter()
            .zip(&run.critical_counts)
            .map(|(task, &count)| CriticalTaskFrequency {
                task_id: task.id(),
                name: task.display_name(),
                count,
                frequency: if n == 0 { 0.0 } else { count as f64 / n as f64 },
            })
            .collect();

        Self {
            n_simulations: n,
            tasks,
        }
    }

    /// Look up a task by display name
    pub fn get(&self, name: &str) -> Option<&CriticalTaskFrequency> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn by_id(&self, id: TaskId) -> Option<&CriticalTaskFrequency> {
        self.tasks.iter().find(|t| t.task_id == id)
    }

    /// `(name, frequency)` pairs in task order
    pub fn frequencies(&self) -> Vec<(&str, f64)> {
        self.tasks
            .iter()
            .map(|t| (t.name.as_str(), t.frequency))
            .collect()
    }

    /// Tasks sorted by descending frequency (stable for ties)
    pub fn ranked(&self) -> Vec<&CriticalTaskFrequency> {
        let mut ranked: Vec<_> = self.tasks.iter().collect();
        ranked.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
        ranked
    }
}
