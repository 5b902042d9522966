//! Project file loading tests (YAML and TOML on disk)

use monaco::config::{ConfigError, ProjectConfig};
use std::io::Write;
use tempfile::NamedTempFile;

const WEBSITE_YAML: &str = r#"
project:
  name: "Website"
  unit: "weeks"
  seed: 42

tasks:
  deploy:
    name: "Deploy"
    estimator: "uniform"
    min_duration: 1
    max_duration: 2
    depends_on: [frontend, backend]
  design:
    name: "Design"
    min_duration: 2
    mode_duration: 3
    max_duration: 5
  frontend:
    estimator: "pert"
    min_duration: 3
    mode_duration: 5
    max_duration: 9
    depends_on: [design]
  backend:
    estimator: "normal"
    mean: 6.0
    std_dev: 1.5
    depends_on: [design]
"#;

const WEBSITE_TOML: &str = r#"
[project]
name = "Website"
seed = 7

[tasks.design]
name = "Design"
min_duration = 2
mode_duration = 3
max_duration = 5

[tasks.build]
estimator = "beta"
alpha = 2.0
beta = 5.0
min_value = 1.0
max_value = 5.0
depends_on = ["design"]
"#;

fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_yaml_project() {
    let file = write_temp(WEBSITE_YAML, ".yaml");
    let config = ProjectConfig::from_file(file.path()).unwrap();
    assert_eq!(config.seed(), Some(42));

    let project = config.build_project().unwrap();
    assert_eq!(project.name(), Some("Website"));
    assert_eq!(project.unit(), "weeks");
    assert_eq!(project.len(), 4);
    assert_eq!(project.edge_count(), 4);

    // Dependencies are added before dependents even when declared later
    let names: Vec<String> = project.tasks().iter().map(|t| t.display_name()).collect();
    let pos = |name: &str| names.iter().position(|n| n == name).unwrap();
    assert!(pos("Design") < pos("frontend"));
    assert!(pos("frontend") < pos("Deploy"));
    assert!(pos("backend") < pos("Deploy"));
}

#[test]
fn test_yaml_project_statistics_are_reproducible() {
    let file = write_temp(WEBSITE_YAML, ".yml");
    let config = ProjectConfig::from_file(file.path()).unwrap();
    let project = config.build_project().unwrap();

    let first = project.statistics_seeded(500, config.seed()).unwrap();
    let second = project.statistics_seeded(500, config.seed()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.unit, "weeks");
    // Design ≥ 2, frontend ≥ 3, deploy ≥ 1 along the shortest possible chain
    assert!(first.min >= 6.0);
}

#[test]
fn test_load_toml_project() {
    let file = write_temp(WEBSITE_TOML, ".toml");
    let config = ProjectConfig::from_file(file.path()).unwrap();
    assert_eq!(config.seed(), Some(7));

    let project = config.build_project().unwrap();
    assert_eq!(project.unit(), "days");
    assert_eq!(project.len(), 2);

    let stats = project.statistics_seeded(200, Some(7)).unwrap();
    // Design in [2, 5] plus build in [1, 5]
    assert!(stats.min >= 3.0);
    assert!(stats.max <= 10.0);
}

#[test]
fn test_missing_file_reports_path() {
    let err = ProjectConfig::from_file("/nonexistent/monaco/project.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/monaco/project.yaml"));
}

#[test]
fn test_empty_file_rejected() {
    let file = write_temp("   \n", ".yaml");
    let err = ProjectConfig::from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("empty"));
}

#[test]
fn test_unknown_dependency_rejected_on_load() {
    let yaml = r#"
project:
  name: "P"

tasks:
  build:
    min_duration: 1
    mode_duration: 2
    max_duration: 3
    depends_on: [design]
"#;
    let file = write_temp(yaml, ".yaml");
    let err = ProjectConfig::from_file(file.path()).unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    assert_eq!(
        config_err,
        &ConfigError::UnknownDependency {
            task: "build".to_string(),
            dependency: "design".to_string(),
        }
    );
}

#[test]
fn test_circular_dependency_rejected_on_build() {
    let yaml = r#"
project:
  name: "P"

tasks:
  a:
    min_duration: 1
    mode_duration: 2
    max_duration: 3
    depends_on: [b]
  b:
    min_duration: 1
    mode_duration: 2
    max_duration: 3
    depends_on: [a]
"#;
    let config = ProjectConfig::from_yaml_str(yaml).unwrap();
    assert!(matches!(
        config.build_project(),
        Err(ConfigError::CircularDependency { .. })
    ));
}

#[test]
fn test_invalid_parameters_name_the_task() {
    let yaml = r#"
project:
  name: "P"

tasks:
  review:
    estimator: "triangular"
    min_duration: 5
    mode_duration: 2
    max_duration: 3
"#;
    let config = ProjectConfig::from_yaml_str(yaml).unwrap();
    let err = config.build_project().unwrap_err();
    assert!(matches!(err, ConfigError::Task { ref task, .. } if task == "review"));
    assert!(err.to_string().contains("review"));
}

#[test]
fn test_missing_project_section_rejected() {
    let yaml = r#"
tasks:
  build:
    min_duration: 1
    mode_duration: 2
    max_duration: 3
"#;
    let err = ProjectConfig::from_yaml_str(yaml).unwrap_err();
    assert!(format!("{:#}", err).contains("project"));
}

#[test]
fn test_full_width_uniform_range_simulates() {
    let yaml = r#"
project:
  name: "Wide"

tasks:
  open_ended:
    estimator: "uniform"
    min_duration: 0
    max_duration: 1.7976931348623157e308
"#;
    let file = write_temp(yaml, ".yaml");
    let project = ProjectConfig::from_file(file.path())
        .unwrap()
        .build_project()
        .unwrap();

    let stats = project.statistics_seeded(100, Some(3)).unwrap();
    assert!(stats.min >= 0.0);
    assert!(stats.max.is_finite());
}
