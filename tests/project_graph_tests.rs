//! Graph integrity tests: rejected mutations must leave the project as it was

use monaco::{Distribution, MonacoError, Project, Task, TaskId};

fn task(name: &str, duration: f64) -> Task {
    Task::new(name, Distribution::constant(duration).unwrap())
}

/// Observable shape of a project: task order plus each task's dependencies
fn snapshot(project: &Project) -> Vec<(TaskId, Vec<TaskId>)> {
    project
        .tasks()
        .iter()
        .map(|t| (t.id(), project.dependencies_of(t.id())))
        .collect()
}

#[test]
fn test_cycle_rejected_and_project_unchanged() {
    let mut project = Project::new("Cycle");
    let a_task = task("A", 2.0);
    let a = project.add_task(a_task.clone(), &[]).unwrap();
    let b = project.add_task(task("B", 3.0), &[a]).unwrap();
    let c = project.add_task(task("C", 1.0), &[b]).unwrap();

    let before = snapshot(&project);
    let edges_before = project.edge_count();

    // Re-adding A after C closes A → B → C → A
    let err = project.add_task(a_task, &[c]).unwrap_err();
    assert!(matches!(err, MonacoError::CycleDetected { .. }));
    assert!(err.is_graph_error());
    assert!(err.to_string().contains("A"));

    assert_eq!(snapshot(&project), before);
    assert_eq!(project.edge_count(), edges_before);
    assert_eq!(project.estimate(&mut monaco::simulation::rng_from_seed(Some(1))).unwrap(), 6.0);
}

#[test]
fn test_self_dependency_rejected() {
    let mut project = Project::new("Self");
    let a_task = task("A", 1.0);
    let a = project.add_task(a_task.clone(), &[]).unwrap();

    let err = project.add_task(a_task, &[a]).unwrap_err();
    assert!(matches!(err, MonacoError::CycleDetected { .. }));
    assert!(project.dependencies_of(a).is_empty());
}

#[test]
fn test_unregistered_dependency_rejected() {
    let mut project = Project::new("Unregistered");
    let a = project.add_task(task("A", 1.0), &[]).unwrap();
    let stray = task("Stray", 1.0);
    let stray_id = stray.id();

    let before = snapshot(&project);
    let err = project.add_task(task("B", 1.0), &[a, stray_id]).unwrap_err();

    match err {
        MonacoError::DependencyNotRegistered { task, dependency } => {
            assert_eq!(task, "B");
            assert_eq!(dependency, stray_id.to_string());
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(snapshot(&project), before);
    assert_eq!(project.len(), 1);
}

#[test]
fn test_readding_task_replaces_dependencies_in_place() {
    let mut project = Project::new("Replace");
    let a = project.add_task(task("A", 1.0), &[]).unwrap();
    let b = project.add_task(task("B", 2.0), &[]).unwrap();
    let c_task = task("C", 3.0);
    let c = project.add_task(c_task.clone(), &[a]).unwrap();

    project.add_task(c_task.clone(), &[b]).unwrap();
    assert_eq!(project.dependencies_of(c), vec![b]);
    assert_eq!(project.len(), 3);
    assert_eq!(project.tasks()[2].id(), c);

    // Empty dependency list keeps the current edges
    project.add_task(c_task, &[]).unwrap();
    assert_eq!(project.dependencies_of(c), vec![b]);
}

#[test]
fn test_topological_order_puts_dependencies_first() {
    let mut project = Project::new("Order");
    let a = project.add_task(task("A", 1.0), &[]).unwrap();
    let b = project.add_task(task("B", 1.0), &[a]).unwrap();
    let c = project.add_task(task("C", 1.0), &[a]).unwrap();
    let d = project.add_task(task("D", 1.0), &[b, c]).unwrap();

    let order: Vec<TaskId> = project.topological_order().iter().map(|t| t.id()).collect();
    let position = |id: TaskId| order.iter().position(|&x| x == id).unwrap();

    assert_eq!(order.len(), 4);
    assert!(position(a) < position(b));
    assert!(position(a) < position(c));
    assert!(position(b) < position(d));
    assert!(position(c) < position(d));
}

#[test]
fn test_unconfigured_task_fails_at_sampling() {
    let mut project = Project::new("Unconfigured");
    project.add_task(Task::unconfigured("Pending"), &[]).unwrap();

    let err = project.statistics_seeded(10, Some(1)).unwrap_err();
    assert!(matches!(err, MonacoError::UnconfiguredTask { .. }));
}

#[test]
fn test_zero_simulations_rejected_by_statistics() {
    let mut project = Project::new("Empty");
    project.add_task(task("A", 1.0), &[]).unwrap();

    assert_eq!(
        project.statistics_seeded(0, Some(1)).unwrap_err(),
        MonacoError::EmptySample
    );

    let analysis = project.critical_path_analysis(0, Some(1)).unwrap();
    assert_eq!(analysis.n_simulations, 0);
    assert_eq!(analysis.tasks[0].frequency, 0.0);
}
