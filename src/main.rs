use anyhow::{Context, Result};
use clap::Parser;
use monaco::cli::{Cli, Command, ExportFormat, SimulationArgs};
use monaco::config::{self, ProjectConfig};
use monaco::csv_output::CsvExport;
use monaco::json_output::JsonExport;
use monaco::project::Project;
use monaco::simulation::{self, CriticalPathAnalysis, SimulationRun};
use monaco::stats::StatisticsReport;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load a project file and build the project, resolving the run seed
fn load_project(path: &Path, cli_seed: Option<u64>) -> Result<(Project, Option<u64>)> {
    let config = ProjectConfig::from_file(path)?;
    let project = config
        .build_project()
        .with_context(|| format!("Failed to build project from {}", path.display()))?;

    let seed = config::resolve_seed(cli_seed, &config);
    if seed.is_none() {
        eprintln!("Note: No seed specified. Results will vary between runs.");
        eprintln!("      Add 'seed: <number>' to your project config for reproducible results.");
    }
    Ok((project, seed))
}

fn simulate(project: &Project, args: &SimulationArgs, seed: Option<u64>) -> Result<SimulationRun> {
    let run = if args.workers > 1 {
        let seed = seed.unwrap_or_else(rand::random);
        let workers = usize::from(args.workers);
        simulation::run_trials_parallel(project, args.simulations, seed, workers)?
    } else {
        let mut rng = simulation::rng_from_seed(seed);
        project.simulate(args.simulations, &mut rng)?
    };
    Ok(run)
}

fn statistics_for(project: &Project, run: &SimulationRun) -> Result<StatisticsReport> {
    StatisticsReport::from_durations(&run.durations, project.unit())
        .context("Number of simulations must be at least 1")
}

fn cmd_init(output: &Path, name: &str, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!("File '{}' already exists", output.display());
    }
    fs::write(output, config::template(name))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Created template project file: {}", output.display());
    println!("\nEdit the file to define your tasks, then run:");
    println!("  monaco stats {}", output.display());
    Ok(())
}

fn cmd_run(
    path: &Path,
    args: &SimulationArgs,
    output: Option<&Path>,
    format: ExportFormat,
    critical_path: bool,
) -> Result<()> {
    let (project, seed) = load_project(path, args.seed)?;
    let run = simulate(&project, args, seed)?;
    let stats = statistics_for(&project, &run)?;

    let Some(output) = output else {
        stats.print_summary(project.name());
        return Ok(());
    };

    let content = match format {
        ExportFormat::Json => {
            let mut export = JsonExport::new(project.name(), stats, run.durations.clone());
            if critical_path {
                let analysis = CriticalPathAnalysis::from_run(&project, &run);
                export = export.with_critical_path(analysis);
            }
            export.to_json()?
        }
        ExportFormat::Csv => CsvExport::new(project.name(), &stats, &run.durations).to_csv(),
    };
    fs::write(output, content).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Results exported to {}", output.display());
    Ok(())
}

fn cmd_stats(path: &Path, args: &SimulationArgs, json: bool) -> Result<()> {
    let (project, seed) = load_project(path, args.seed)?;
    let run = simulate(&project, args, seed)?;
    let stats = statistics_for(&project, &run)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        stats.print_summary(project.name());
    }
    Ok(())
}

fn cmd_critical(path: &Path, args: &SimulationArgs, json: bool) -> Result<()> {
    let (project, seed) = load_project(path, args.seed)?;
    let run = simulate(&project, args, seed)?;
    let analysis = CriticalPathAnalysis::from_run(&project, &run);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!();
    println!("Critical Path Analysis: {}", project.name().unwrap_or("Unnamed"));
    println!("{}", "=".repeat(50));
    println!("Simulations: {}", analysis.n_simulations);
    println!();
    for task in analysis.ranked() {
        println!(
            "  {:<30} {:>6.1}%  ({} runs)",
            task.name,
            task.frequency * 100.0,
            task.count
        );
    }
    Ok(())
}

fn cmd_tasks(path: &Path) -> Result<()> {
    let config = ProjectConfig::from_file(path)?;
    let project = config
        .build_project()
        .with_context(|| format!("Failed to build project from {}", path.display()))?;

    println!("Project: {}", project.name().unwrap_or("Unnamed"));
    println!("Time Unit: {}", project.unit());
    println!("Tasks ({}, dependencies first):", project.len());
    for task in project.topological_order() {
        let distribution = task
            .distribution()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unconfigured".to_string());
        let deps: Vec<String> = project
            .dependencies_of(task.id())
            .into_iter()
            .filter_map(|id| project.get(id).map(|t| t.display_name()))
            .collect();

        if deps.is_empty() {
            println!("  {:<30} {}", task.display_name(), distribution);
        } else {
            println!(
                "  {:<30} {}  <- {}",
                task.display_name(),
                distribution,
                deps.join(", ")
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    match &args.command {
        Command::Init {
            output,
            name,
            force,
        } => cmd_init(output, name, *force),
        Command::Run {
            config,
            simulation,
            output,
            format,
            critical_path,
        } => cmd_run(
            config,
            simulation,
            output.as_deref(),
            *format,
            *critical_path,
        ),
        Command::Stats {
            config,
            simulation,
            json,
        } => cmd_stats(config, simulation, *json),
        Command::Critical {
            config,
            simulation,
            json,
        } => cmd_critical(config, simulation, *json),
        Command::Tasks { config } => cmd_tasks(config),
    }
}
