use clap::{Parser, Subcommand};
use fp_results::{RunManifest, RunStore, compute_run_id, describe_run_type, write_delimited};
use fp_sim::{DerivHook, run_sim};
use std::io::{self, Write};
use std::path::PathBuf;

mod scenario;

use scenario::Scenario;

/// Baked into run ids so solver changes invalidate the cache.
const SOLVER_VERSION: &str = "forceprobe-0.1";

#[derive(Parser)]
#[command(name = "fp-cli")]
#[command(about = "forceprobe CLI - actuator force perturbation analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a perturbation scenario
    Run {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Run directory (defaults to .forceprobe/runs next to the scenario)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a scenario
    Runs {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Export a run's force series as a delimited table
    Export {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_store(scenario_path: &PathBuf, out_dir: Option<PathBuf>) -> Result<RunStore, Box<dyn std::error::Error>> {
    let store = match out_dir {
        Some(dir) => RunStore::new(dir)?,
        None => RunStore::for_scenario(scenario_path)?,
    };
    Ok(store)
}

fn cmd_run(
    scenario_path: PathBuf,
    out_dir: Option<PathBuf>,
    no_cache: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::load(&scenario_path)?;
    let scenario_json = serde_json::to_string(&scenario)?;
    let run_type = scenario.run_type();
    let run_id = compute_run_id(&scenario_json, &run_type, SOLVER_VERSION);

    let store = open_store(&scenario_path, out_dir)?;
    if store.has_run(&run_id) && !no_cache {
        println!("cached: {run_id}");
        return Ok(());
    }

    let (mut engine, target) = scenario.build_engine()?;
    let mut hook = scenario.build_hook(target)?;
    let opts = scenario.sim_options();

    let record = match hook.as_mut() {
        Some(h) => {
            let mut hooks: Vec<&mut dyn DerivHook> = vec![h];
            run_sim(&mut engine, &mut hooks, &opts)?
        }
        None => run_sim(&mut engine, &mut [], &opts)?,
    };

    let samples = hook
        .as_ref()
        .map(|h| h.recorder().rows().to_vec())
        .unwrap_or_default();

    let manifest = RunManifest::new(run_id.clone(), &scenario.id, run_type, SOLVER_VERSION);
    store.save_run(&manifest, &samples)?;

    let last = record.x.last().expect("record always has the final state");
    println!("run: {run_id}");
    println!("  kind:        {}", describe_run_type(&manifest.run_type));
    println!("  steps:       {}", record.t.len() - 1);
    println!("  force rows:  {}", samples.len());
    println!(
        "  final state: position={:.6} velocity={:.6}",
        last.position, last.velocity
    );
    Ok(())
}

fn cmd_runs(scenario_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::load(&scenario_path)?;
    let store = open_store(&scenario_path, None)?;

    let mut runs = store.list_runs(&scenario.id)?;
    runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    if runs.is_empty() {
        println!("no cached runs for scenario '{}'", scenario.id);
        return Ok(());
    }
    for manifest in runs {
        println!(
            "{}  {}  {}",
            manifest.run_id,
            manifest.timestamp,
            describe_run_type(&manifest.run_type)
        );
    }
    Ok(())
}

fn cmd_export(
    scenario_path: PathBuf,
    run_id: String,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&scenario_path, None)?;
    let samples = store.load_samples(&run_id)?;

    match output {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            write_delimited(io::BufWriter::new(file), &samples)?;
            println!("wrote {} rows to {}", samples.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_delimited(&mut lock, &samples)?;
            lock.flush()?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            scenario_path,
            out_dir,
            no_cache,
        } => cmd_run(scenario_path, out_dir, no_cache),
        Commands::Runs { scenario_path } => cmd_runs(scenario_path),
        Commands::Export {
            scenario_path,
            run_id,
            output,
        } => cmd_export(scenario_path, run_id, output),
    }
}
