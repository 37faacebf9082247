mod driver;
mod scenarios;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::time::Instant;

use scenarios::{ScenarioOutcome, list_scenarios, run_scenario};

#[derive(Debug, Parser)]
#[command(name = "quizdash-tester", version = "0.1.0")]
#[command(about = "Headless QA sweeps for the Quizdash race engine")]
struct Args {
    /// Scenarios to run (comma-separated)
    #[arg(long, default_value = "idle-timeout,random-sweep,quiz-ace")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: u64,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        println!("Available scenarios:");
        for (key, description) in list_scenarios() {
            println!("  {key:15} - {description}");
        }
        return Ok(());
    }

    let console_report = args.report == "console";
    if console_report {
        println!("{}", "🏁 Quizdash Engine Tester".bright_cyan().bold());
        println!("{}", "================================".cyan());
    }

    let start_time = Instant::now();
    let scenario_names = split_csv(&args.scenarios);
    let seeds = parse_seeds(&args.seeds)?;

    let mut all_results = Vec::new();
    for name in &scenario_names {
        for &seed in &seeds {
            for iteration in 0..args.iterations {
                // Vary the seed per iteration so sweeps cover fresh streams.
                let run_seed = seed.wrapping_add(iteration);
                let result = run_scenario(name, run_seed)?;
                if console_report && (args.verbose || !result.passed) {
                    print_outcome(&result);
                }
                all_results.push(result);
            }
        }
    }

    if args.report == "json" {
        println!("{}", serde_json::to_string_pretty(&all_results)?);
    } else {
        print_summary(&all_results, start_time);
    }

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn print_outcome(result: &ScenarioOutcome) {
    let status = if result.passed {
        "PASS".green()
    } else {
        "FAIL".red().bold()
    };
    println!(
        "  [{status}] {:13} seed={:<12} {}",
        result.scenario, result.seed, result.details
    );
}

fn print_summary(results: &[ScenarioOutcome], start_time: Instant) {
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;
    let elapsed = start_time.elapsed();
    println!("{}", "--------------------------------".cyan());
    let verdict = if failed == 0 {
        format!("{passed} passed").green().to_string()
    } else {
        format!("{passed} passed, {failed} failed").red().bold().to_string()
    };
    println!("Ran {} checks in {elapsed:.2?}: {verdict}", results.len());
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_seeds(input: &str) -> Result<Vec<u64>> {
    split_csv(input)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed '{token}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_drops_empties() {
        assert_eq!(split_csv("a, b,,c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_seeds_rejects_garbage() {
        assert!(parse_seeds("12,banana").is_err());
        assert_eq!(parse_seeds("1, 2").unwrap(), vec![1, 2]);
    }

    #[test]
    fn registered_scenarios_all_run() {
        for (name, _) in list_scenarios() {
            let outcome = run_scenario(name, 1337).expect("scenario runs");
            assert!(outcome.passed, "{name} failed: {}", outcome.details);
        }
    }
}
