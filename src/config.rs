//! Project files
//!
//! A project file declares project metadata plus a map of task ids to task
//! definitions. YAML is the primary format; `.toml` files are accepted with
//! the same structure.
//!
//! # Example project.yaml
//!
//! ```yaml
//! project:
//!   name: "Website"
//!   unit: "days"
//!   seed: 42            # optional
//!
//! tasks:
//!   design:
//!     name: "Design Phase"
//!     estimator: "triangular"   # default
//!     min_duration: 2
//!     mode_duration: 3
//!     max_duration: 5
//!   build:
//!     estimator: "normal"
//!     mean: 8.0
//!     std_dev: 2.0
//!     depends_on: [design]
//! ```
//!
//! Task order in the file is preserved. A task may reference dependencies
//! declared after it; tasks are added to the project dependencies-first.

use crate::distributions::{Distribution, EstimateParams, Estimator};
use crate::error::MonacoError;
use crate::project::{Project, DEFAULT_UNIT};
use crate::task::{Task, TaskId};
use anyhow::{Context, Result};
use fnv::{FnvHashMap, FnvHashSet};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Structural problems in a project file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("At least one task must be defined")]
    NoTasks,

    #[error("Task '{task}' has no configuration")]
    EmptyTask { task: String },

    #[error("Task '{task}' has unknown estimator '{estimator}'. Valid options: triangular, uniform, normal, pert, lognormal, beta")]
    UnknownEstimator { task: String, estimator: String },

    #[error("Task '{task}' uses {estimator} estimator but missing '{field}'")]
    MissingField {
        task: String,
        estimator: &'static str,
        field: &'static str,
    },

    #[error("Task '{task}' depends on unknown task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    #[error("Circular dependency detected at task '{task}'")]
    CircularDependency { task: String },

    #[error("Task '{task}': {source}")]
    Task {
        task: String,
        #[source]
        source: MonacoError,
    },
}

/// File format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` is TOML; everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// `project:` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectSection {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

/// One entry of the `tasks:` map
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub estimator: Option<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(flatten)]
    pub params: EstimateParams,
}

impl TaskConfig {
    pub fn estimator_name(&self) -> &str {
        self.estimator.as_deref().unwrap_or("triangular")
    }
}

/// Parsed project file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectSection,
    /// Task definitions in file order; `None` for an empty entry
    #[serde(deserialize_with = "ordered_tasks")]
    pub tasks: TaskEntries,
}

pub type TaskEntries = Vec<(String, Option<TaskConfig>)>;

fn ordered_tasks<'de, D>(deserializer: D) -> std::result::Result<TaskEntries, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedTasks;

    impl<'de> Visitor<'de> for OrderedTasks {
        type Value = TaskEntries;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of task ids to task definitions")
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut tasks = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((id, config)) = map.next_entry::<String, Option<TaskConfig>>()? {
                tasks.push((id, config));
            }
            Ok(tasks)
        }
    }

    deserializer.deserialize_any(OrderedTasks)
}

fn require(
    task: &str,
    estimator: Estimator,
    field: &'static str,
    value: Option<f64>,
) -> std::result::Result<(), ConfigError> {
    match value {
        Some(_) => Ok(()),
        None => Err(ConfigError::MissingField {
            task: task.to_string(),
            estimator: estimator.as_str(),
            field,
        }),
    }
}

impl ProjectConfig {
    /// Load and validate a project file
    ///
    /// ```no_run
    /// use monaco::config::ProjectConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = ProjectConfig::from_file("project.yaml")?;
    /// let project = config.build_project()?;
    /// println!("Loaded {} tasks", project.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => Self::from_yaml_str(&content),
            ConfigFormat::Toml => Self::from_toml_str(&content),
        }
        .with_context(|| format!("Invalid project file {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without validating
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            anyhow::bail!("Configuration file is empty");
        }
        serde_yaml::from_str(content).context("Failed to parse YAML")
    }

    /// Parse TOML without validating
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    pub fn seed(&self) -> Option<u64> {
        self.project.seed
    }

    /// Check structure and required fields before building anything
    ///
    /// Parameter values themselves (ordering, signs) are checked when the
    /// distributions are built.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.tasks.is_empty() {
            return Err(ConfigError::NoTasks);
        }

        let ids: FnvHashSet<&str> = self.tasks.iter().map(|(id, _)| id.as_str()).collect();

        for (id, config) in &self.tasks {
            let config = config
                .as_ref()
                .ok_or_else(|| ConfigError::EmptyTask { task: id.clone() })?;

            let estimator: Estimator = config.estimator_name().parse().map_err(|_| {
                ConfigError::UnknownEstimator {
                    task: id.clone(),
                    estimator: config.estimator_name().to_string(),
                }
            })?;

            let p = &config.params;
            match estimator {
                Estimator::Normal | Estimator::LogNormal => {
                    require(id, estimator, "mean", p.mean)?;
                    require(id, estimator, "std_dev", p.std_dev)?;
                }
                Estimator::Beta => {
                    require(id, estimator, "alpha", p.alpha)?;
                    require(id, estimator, "beta", p.beta)?;
                    require(id, estimator, "max_value", p.max_value)?;
                }
                Estimator::Triangular | Estimator::Pert | Estimator::Uniform => {
                    require(id, estimator, "min_duration", p.min_duration)?;
                    require(id, estimator, "max_duration", p.max_duration)?;
                    if estimator != Estimator::Uniform {
                        require(id, estimator, "mode_duration", p.mode_duration)?;
                    }
                }
            }

            if let Some(dep) = config.depends_on.iter().find(|d| !ids.contains(d.as_str())) {
                return Err(ConfigError::UnknownDependency {
                    task: id.clone(),
                    dependency: dep.clone(),
                });
            }
        }
        Ok(())
    }

    /// Build a ready-to-simulate project
    ///
    /// Tasks are added depth-first so every dependency is registered before
    /// its dependents; shared dependencies (diamonds) are added once.
    pub fn build_project(&self) -> std::result::Result<Project, ConfigError> {
        self.validate()?;

        let mut project = match &self.project.name {
            Some(name) => Project::new(name.clone()),
            None => Project::unnamed(),
        }
        .with_unit(self.project.unit.clone());

        let mut pending: FnvHashMap<&str, (&TaskConfig, Task)> = FnvHashMap::default();
        for (id, config) in &self.tasks {
            // validate() guarantees every entry is configured
            let Some(config) = config else { continue };
            let distribution =
                Distribution::from_estimator(config.estimator_name(), &config.params).map_err(
                    |source| ConfigError::Task {
                        task: id.clone(),
                        source,
                    },
                )?;
            let name = config.name.clone().unwrap_or_else(|| id.clone());
            pending.insert(id.as_str(), (config, Task::new(name, distribution)));
        }

        let mut builder = Builder {
            pending,
            added: FnvHashMap::default(),
            visiting: FnvHashSet::default(),
        };
        for (id, _) in &self.tasks {
            builder.add(id, &mut project)?;
        }

        tracing::debug!(
            project = project.name().unwrap_or("Unnamed"),
            tasks = project.len(),
            edges = project.edge_count(),
            "project built from configuration"
        );
        Ok(project)
    }
}

struct Builder<'a> {
    pending: FnvHashMap<&'a str, (&'a TaskConfig, Task)>,
    added: FnvHashMap<&'a str, TaskId>,
    visiting: FnvHashSet<&'a str>,
}

impl<'a> Builder<'a> {
    fn add(
        &mut self,
        id: &'a str,
        project: &mut Project,
    ) -> std::result::Result<TaskId, ConfigError> {
        if let Some(&task_id) = self.added.get(id) {
            return Ok(task_id);
        }
        if !self.visiting.insert(id) {
            return Err(ConfigError::CircularDependency {
                task: id.to_string(),
            });
        }

        let config = match self.pending.get(id) {
            Some((config, _)) => *config,
            None => {
                return Err(ConfigError::UnknownDependency {
                    task: id.to_string(),
                    dependency: id.to_string(),
                })
            }
        };

        let mut deps = Vec::with_capacity(config.depends_on.len());
        for dep in &config.depends_on {
            deps.push(self.add(dep.as_str(), project)?);
        }

        let (_, task) = self
            .pending
            .remove(id)
            .ok_or_else(|| ConfigError::CircularDependency {
                task: id.to_string(),
            })?;
        let task_id = project
            .add_task(task, &deps)
            .map_err(|source| ConfigError::Task {
                task: id.to_string(),
                source,
            })?;

        self.visiting.remove(id);
        self.added.insert(id, task_id);
        Ok(task_id)
    }
}

/// Seed to use for a run: the command line wins over the project file
pub fn resolve_seed(cli_seed: Option<u64>, config: &ProjectConfig) -> Option<u64> {
    cli_seed.or(config.project.seed)
}

/// Starter project file covering every estimator
pub fn template(project_name: &str) -> String {
    format!(
        r#"# Monaco Project Configuration
# Estimators: triangular (default), uniform, normal, pert, lognormal, beta

project:
  name: "{project_name}"
  unit: "days"
  # seed: 42  # uncomment for reproducible results

tasks:
  design:
    name: "Design Phase"
    estimator: "triangular"
    min_duration: 2
    mode_duration: 3
    max_duration: 5

  development:
    name: "Development"
    estimator: "pert"
    min_duration: 5
    mode_duration: 8
    max_duration: 12
    depends_on:
      - design

  code_review:
    name: "Code Review"
    estimator: "normal"
    mean: 2.0
    std_dev: 0.5
    depends_on:
      - development

  testing:
    name: "Testing"
    estimator: "lognormal"
    mean: 3.0
    std_dev: 1.0
    depends_on:
      - code_review

  integration:
    name: "Integration"
    estimator: "beta"
    alpha: 2.0
    beta: 5.0
    min_value: 1.0
    max_value: 5.0
    depends_on:
      - testing

  deployment:
    name: "Deployment"
    estimator: "uniform"
    min_duration: 1
    max_duration: 2
    depends_on:
      - integration
"#
    )
}
