//! Influence game driver.
//!
//! Usage:
//!   cargo run --release --bin influence -- <NODES> <EDGE_PROB> [OPTIONS]
//!
//! Options:
//!   --config <FILE>      Configuration JSON file (positional args override it)
//!   --iterations <N>     Solver periods (default: 500000)
//!   --seed <N>           Random seed (default: random)
//!   --exact              Full-precision edge probability instead of whole percents
//!   --parallel           Parallelize solver matrix-vector products
//!   --runs <N>           Run N independent simulations and print a summary
//!   --output <FILE>      Write the JSON report to FILE
//!   --quiet              Only print strategies and payoffs
//!
//! Set `RUST_LOG=debug` for per-stage logging.

use std::env;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use influence_game::network::EdgeSampling;
use influence_game::simulation::{self, InfluenceGame, SimulationConfig};

struct Args {
    nodes: Option<usize>,
    edge_probability: Option<f64>,
    config_file: Option<String>,
    iterations: Option<u64>,
    seed: Option<u64>,
    exact: bool,
    parallel: bool,
    runs: Option<usize>,
    output_file: Option<String>,
    quiet: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(Some(args)) => args,
        Ok(None) => return,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.runs {
        Some(runs) => run_batch(&config, runs, args.output_file.as_deref()),
        None => run_single(&config, args.output_file.as_deref(), args.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Value following `flag`, parsed as `T`.
fn flag_value<T: std::str::FromStr>(argv: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = argv
        .get(i)
        .ok_or_else(|| format!("{} requires a value", flag))?;
    raw.parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, raw))
}

/// Parse `argv` (program name first).
///
/// Returns `Ok(None)` when help was requested.
fn parse_args(argv: &[String]) -> Result<Option<Args>, String> {
    let mut args = Args {
        nodes: None,
        edge_probability: None,
        config_file: None,
        iterations: None,
        seed: None,
        exact: false,
        parallel: false,
        runs: None,
        output_file: None,
        quiet: false,
    };
    let mut positional = Vec::new();
    let mut errors = Vec::new();

    let mut i = 1;
    while i < argv.len() {
        let arg = argv[i].as_str();
        match arg {
            "--config" | "-c" => {
                i += 1;
                match flag_value(argv, i, arg) {
                    Ok(path) => args.config_file = Some(path),
                    Err(e) => errors.push(e),
                }
            }
            "--iterations" | "-i" => {
                i += 1;
                match flag_value(argv, i, arg) {
                    Ok(iterations) => args.iterations = Some(iterations),
                    Err(e) => errors.push(e),
                }
            }
            "--seed" | "-s" => {
                i += 1;
                match flag_value(argv, i, arg) {
                    Ok(seed) => args.seed = Some(seed),
                    Err(e) => errors.push(e),
                }
            }
            "--runs" | "-r" => {
                i += 1;
                match flag_value(argv, i, arg) {
                    Ok(runs) => args.runs = Some(runs),
                    Err(e) => errors.push(e),
                }
            }
            "--output" | "-o" => {
                i += 1;
                match flag_value(argv, i, arg) {
                    Ok(path) => args.output_file = Some(path),
                    Err(e) => errors.push(e),
                }
            }
            "--exact" => args.exact = true,
            "--parallel" | "-p" => args.parallel = true,
            "--quiet" | "-q" => args.quiet = true,
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other if other.starts_with('-') && other.parse::<f64>().is_err() => {
                errors.push(format!("Unknown argument: {}", other));
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    if let Some(nodes) = positional.first() {
        match nodes.parse() {
            Ok(n) => args.nodes = Some(n),
            Err(_) => errors.push(format!("Node count is not a non-negative integer: {}", nodes)),
        }
    }
    if let Some(prob) = positional.get(1) {
        match prob.parse() {
            Ok(p) => args.edge_probability = Some(p),
            Err(_) => errors.push(format!("Edge probability is not a number: {}", prob)),
        }
    }
    if positional.len() > 2 {
        errors.push(format!("Unexpected argument: {}", positional[2]));
    }
    if args.runs == Some(0) {
        errors.push("--runs must be at least 1".to_string());
    }
    if errors.is_empty() && args.config_file.is_none() && args.edge_probability.is_none() {
        errors.push("Expected <NODES> <EDGE_PROB> or --config <FILE>".to_string());
    }

    if errors.is_empty() {
        Ok(Some(args))
    } else {
        Err(errors.join("\n"))
    }
}

fn build_config(args: &Args) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config_file {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(nodes) = args.nodes {
        config.nodes = nodes;
    }
    if let Some(p) = args.edge_probability {
        config.edge_probability = p;
    }
    if let Some(iterations) = args.iterations {
        config.solver.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.exact {
        config.sampling = EdgeSampling::Exact;
    }
    if args.parallel {
        config.solver.parallel = true;
    }

    config.validate()?;
    Ok(config)
}

fn run_single(
    config: &SimulationConfig,
    output_file: Option<&str>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let seed = simulation::resolve_seed(config);
    let mut rng = StdRng::seed_from_u64(seed);

    if !quiet {
        println!("=================================================");
        println!("  Influence Game");
        println!("=================================================");
        println!();
        println!("Nodes: {}", config.nodes);
        println!("Edge probability: {} ({:?} sampling)", config.edge_probability, config.sampling);
        println!("Iterations: {}", config.solver.iterations);
        println!("Seed: {}", seed);
        println!();
    }

    let total = config.solver.iterations;
    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total)
    };
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let start = Instant::now();
    let report_interval = (total / 100).max(1);
    let game = InfluenceGame::simulate_with_callback(config, &mut rng, report_interval, |p| {
        bar.set_position(p.iteration)
    })?;
    bar.finish_and_clear();

    if !quiet {
        println!("Network ({} edges):", game.network.edge_count());
        println!("{}", game.network);
        println!("Distances:");
        println!("{}", game.distances);
        println!("Payoffs:");
        println!("{}", game.payoffs);
    }

    println!("Row player strategy:    {}", game.equilibrium.row);
    println!("Column player strategy: {}", game.equilibrium.column);
    println!("Row player payoff:    {:.4}", game.row_payoff()?);
    println!("Column player payoff: {:.4}", game.column_payoff()?);
    println!("Duality gap: {:.6}", game.equilibrium.duality_gap(&game.payoffs)?);

    if !quiet {
        let closeness: Vec<String> = game.closeness().iter().map(|c| format!("{:.3}", c)).collect();
        println!("Closeness centrality of all nodes: [{}]", closeness.join(", "));
        println!("Degree of all nodes: {:?}", game.degree());
        println!();
        println!("Total time: {:.2}s", start.elapsed().as_secs_f64());
    }

    if let Some(path) = output_file {
        game.report(seed)?.save_json(path)?;
        println!("Saved JSON: {}", path);
    }

    Ok(())
}

fn run_batch(
    config: &SimulationConfig,
    runs: usize,
    output_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Influence Game Batch ===\n");
    println!("Nodes: {} | Edge probability: {} | Iterations: {}", config.nodes, config.edge_probability, config.solver.iterations);
    println!();

    let start = Instant::now();
    let summary = simulation::run_batch(config, runs)?;

    summary.print_summary();
    println!("\nTotal time: {:.2}s", start.elapsed().as_secs_f64());

    if let Some(path) = output_file {
        summary.save_json(path)?;
        println!("Saved JSON: {}", path);
    }

    Ok(())
}

fn print_help() {
    println!("Influence game on a random connected network");
    println!();
    println!("Usage: influence <NODES> <EDGE_PROB> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>      Configuration JSON file");
    println!("  -i, --iterations <N>     Solver periods (default: 500000)");
    println!("  -s, --seed <N>           Random seed (default: random)");
    println!("      --exact              Full-precision edge probability");
    println!("  -p, --parallel           Parallelize solver matrix-vector products");
    println!("  -r, --runs <N>           Run N independent simulations");
    println!("  -o, --output <FILE>      Write JSON report");
    println!("  -q, --quiet              Only print strategies and payoffs");
    println!("  -h, --help               Show this help");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("influence")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parses_positionals_and_flags() {
        let args = parse_args(&argv(&["20", "0.1", "--iterations", "1000", "--seed", "7", "--exact", "-q"]))
            .unwrap()
            .unwrap();
        assert_eq!(args.nodes, Some(20));
        assert_eq!(args.edge_probability, Some(0.1));
        assert_eq!(args.iterations, Some(1_000));
        assert_eq!(args.seed, Some(7));
        assert!(args.exact);
        assert!(args.quiet);
        assert!(args.runs.is_none());
    }

    #[test]
    fn test_bad_flag_values_are_errors() {
        for bad in [
            &["20", "0.1", "--iterations", "-5"][..],
            &["20", "0.1", "--iterations", "1e6"],
            &["20", "0.1", "--seed", "abc"],
            &["20", "0.1", "--runs", "x"],
            &["20", "0.1", "--runs", "0"],
            &["20", "0.1", "--iterations"],
        ] {
            assert!(parse_args(&argv(bad)).is_err(), "{:?}", bad);
        }

        let err = parse_args(&argv(&["20", "0.1", "--iterations", "-5"])).err().unwrap();
        assert!(err.contains("--iterations"));
        assert!(err.contains("-5"));
    }

    #[test]
    fn test_every_bad_value_is_reported() {
        let err = parse_args(&argv(&["20", "0.1", "--seed", "abc", "--runs", "x"])).err().unwrap();
        assert!(err.contains("abc"));
        assert!(err.contains("x"));
    }

    #[test]
    fn test_bad_positionals_are_errors() {
        assert!(parse_args(&argv(&["-1", "0.5"])).is_err());
        assert!(parse_args(&argv(&["ten", "0.5"])).is_err());
        assert!(parse_args(&argv(&["10", "half"])).is_err());
        assert!(parse_args(&argv(&["10"])).is_err());
        assert!(parse_args(&argv(&[])).is_err());
        assert!(parse_args(&argv(&["10", "0.5", "3"])).is_err());
    }

    #[test]
    fn test_bad_iterations_fail_config_validation() {
        let args = parse_args(&argv(&["20", "0.1", "--iterations", "0"])).unwrap().unwrap();
        assert!(build_config(&args).is_err());

        let args = parse_args(&argv(&["0", "0.1"])).unwrap().unwrap();
        assert!(build_config(&args).is_err());
    }
}
