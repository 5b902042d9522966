//! CLI argument parsing for Monaco

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Export format for `monaco run -o`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Statistics plus raw simulations as JSON (default)
    Json,
    /// Summary rows followed by one row per simulation
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "monaco")]
#[command(version)]
#[command(about = "Monte Carlo project estimation with critical path analysis", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output (to stderr)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every simulating subcommand
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SimulationArgs {
    /// Number of simulations to run
    #[arg(short = 'n', long = "simulations", default_value_t = 10_000)]
    pub simulations: usize,

    /// Random seed for reproducibility (overrides the project file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads; 1 runs sequentially
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: u16,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a template project file
    Init {
        /// Path of the file to create
        #[arg(default_value = "project.yaml")]
        output: PathBuf,

        /// Project name written into the template
        #[arg(long, default_value = "My Project")]
        name: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Run Monte Carlo simulation and export results
    Run {
        /// Project file (.yaml, .yml or .toml)
        config: PathBuf,

        #[command(flatten)]
        simulation: SimulationArgs,

        /// Output file for results (default: print statistics)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
        format: ExportFormat,

        /// Include critical-path frequencies in JSON exports
        #[arg(long)]
        critical_path: bool,
    },

    /// Calculate and display project statistics
    Stats {
        /// Project file (.yaml, .yml or .toml)
        config: PathBuf,

        #[command(flatten)]
        simulation: SimulationArgs,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show how often each task lies on the critical path
    Critical {
        /// Project file (.yaml, .yml or .toml)
        config: PathBuf,

        #[command(flatten)]
        simulation: SimulationArgs,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List tasks, their distributions and dependencies
    Tasks {
        /// Project file (.yaml, .yml or .toml)
        config: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_stats() {
        let cli = Cli::parse_from(["monaco", "stats", "project.yaml", "-n", "500", "--seed", "42"]);
        match cli.command {
            Command::Stats {
                config,
                simulation,
                json,
            } => {
                assert_eq!(config, PathBuf::from("project.yaml"));
                assert_eq!(simulation.simulations, 500);
                assert_eq!(simulation.seed, Some(42));
                assert_eq!(simulation.workers, 1);
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_run_defaults() {
        let cli = Cli::parse_from(["monaco", "run", "p.yaml"]);
        match cli.command {
            Command::Run {
                simulation,
                output,
                format,
                critical_path,
                ..
            } => {
                assert_eq!(simulation.simulations, 10_000);
                assert!(simulation.seed.is_none());
                assert!(output.is_none());
                assert_eq!(format, ExportFormat::Json);
                assert!(!critical_path);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_run_csv_export() {
        let cli = Cli::parse_from(["monaco", "run", "p.yaml", "-o", "out.csv", "-f", "csv"]);
        match cli.command {
            Command::Run { output, format, .. } => {
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert_eq!(format, ExportFormat::Csv);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_debug_is_global() {
        let cli = Cli::parse_from(["monaco", "tasks", "p.yaml", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_rejects_zero_workers() {
        assert!(Cli::try_parse_from(["monaco", "stats", "p.yaml", "--workers", "0"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["monaco", "run", "p.yaml", "-f", "xml"]).is_err());
    }

    #[test]
    fn test_cli_init_defaults() {
        let cli = Cli::parse_from(["monaco", "init"]);
        match cli.command {
            Command::Init {
                output,
                name,
                force,
            } => {
                assert_eq!(output, PathBuf::from("project.yaml"));
                assert_eq!(name, "My Project");
                assert!(!force);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
