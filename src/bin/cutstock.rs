//! C11: the command-line entry point. Wires C8 (instance loader) through C6
//! (branch-and-price) to C9 (cut-plan writer), installing the C10 logger and
//! mapping terminal state to exit codes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cutstock::bnb;
use cutstock::config::SolverConfig;
use cutstock::incumbent::build_report;
use cutstock::instance::load_instance;
use cutstock::output::write_cutting_plan;
use cutstock::terminators::{InterruptTerminator, NullTerminator, Terminator};

/// Branch-and-price solver for two-stage 2D guillotine cutting-stock instances.
#[derive(Parser, Debug)]
#[command(name = "cutstock", version, about)]
struct Cli {
    /// Tab-separated instance file.
    instance: PathBuf,

    /// Directory to write Stock_<k>.txt cut-plan files into.
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Column-generation iteration cap per node.
    #[arg(long)]
    max_cg_iter: Option<usize>,

    /// Branch-and-bound node cap.
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Stop gracefully on Ctrl-C, reporting the current incumbent.
    #[arg(long)]
    interruptible: bool,

    /// Prefix for the console/log file pair (`<prefix>.log`).
    #[arg(long, default_value = "cutstock")]
    log_prefix: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = cutstock::logger::install(&cli.log_prefix) {
        eprintln!("failed to install logger: {e}");
        return ExitCode::FAILURE;
    }

    let mut config = SolverConfig::default();
    if let Some(v) = cli.max_cg_iter {
        config.max_cg_iter = v;
    }
    if let Some(v) = cli.max_nodes {
        config.max_nodes = v;
    }
    config.interruptible = cli.interruptible;

    let instance = match load_instance(&cli.instance) {
        Ok(instance) => instance,
        Err(e) => {
            tracing::error!(error = %e, "failed to load instance");
            return ExitCode::FAILURE;
        }
    };

    let terminator: Box<dyn Terminator> = if config.interruptible {
        Box::new(InterruptTerminator::new())
    } else {
        Box::new(NullTerminator)
    };

    let outcome = match bnb::solve_with_terminator(&instance, &config, terminator.as_ref()) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "solver reported a fatal error");
            return ExitCode::FAILURE;
        }
    };

    let report = build_report(&instance, &outcome);
    tracing::info!(
        ub = report.ub,
        gap = report.gap,
        nodes_explored = report.nodes_explored,
        hit_node_limit = report.hit_node_limit,
        "branch-and-price finished"
    );

    if let Err(e) = write_cutting_plan(&report.plan, &instance, &cli.output_dir) {
        tracing::error!(error = %e, "failed to write cut plan");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
