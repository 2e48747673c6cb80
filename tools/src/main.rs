//! churn-runner: headless front end for the churn scoring engine.
//!
//! Usage:
//!   churn-runner --input customer.json [--json] [--latency-ms 1500]
//!   churn-runner --synthetic 1000 --seed 42
//!   churn-runner --ipc-mode
//!
//! `--data-dir <dir>` loads data/model/model_config.json from <dir>;
//! without it the reference constants are used.

use anyhow::Result;
use churn_core::{
    engine::{ChurnEngine, FixedLatency},
    input::ChurnInput,
    portfolio::PortfolioSummary,
    report::PredictionReport,
    synthetic,
    ModelConfig,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    Predict { input: ChurnInput },
    Breakdown { input: ChurnInput },
    Config,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let latency_ms = parse_arg(&args, "--latency-ms", 0u64);
    let seed = parse_arg(&args, "--seed", 42u64);
    let synthetic_count = parse_arg(&args, "--synthetic", 0usize);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json_out = args.iter().any(|a| a == "--json");
    let data_dir = flag_value(&args, "--data-dir");
    let input_path = flag_value(&args, "--input");

    let config = match data_dir {
        Some(dir) => ModelConfig::load(dir)?,
        None => ModelConfig::reference(),
    };

    let mut engine = ChurnEngine::new(Arc::new(config));
    if latency_ms > 0 {
        engine = engine.with_latency(FixedLatency(Duration::from_millis(latency_ms)));
    }

    if ipc_mode {
        return run_ipc_loop(&engine);
    }

    if synthetic_count > 0 {
        let customers = synthetic::generate_customers(seed, synthetic_count, &engine.config().bounds);
        let inputs: Vec<ChurnInput> = customers.into_iter().map(|c| c.input).collect();
        let summary = engine.score_portfolio(&inputs);
        if json_out {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_portfolio(&summary, seed);
        }
        return Ok(());
    }

    let input: ChurnInput = match input_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
            serde_json::from_str(&content)?
        }
        None => ChurnInput::form_default(),
    };

    let result = engine.predict(&input)?;
    let report = PredictionReport::new(&engine.config().model_version, input, result);
    if json_out {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

/// One JSON request per stdin line, one JSON reply per stdout line.
fn run_ipc_loop(engine: &ChurnEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::Predict { input } => match engine.predict(&input) {
                Ok(result) => writeln!(stdout, "{}", serde_json::to_string(&result)?)?,
                Err(e) => write_error(&mut stdout, &e.to_string())?,
            },
            IpcRequest::Breakdown { input } => {
                let breakdown = engine.breakdown(&input);
                writeln!(stdout, "{}", serde_json::to_string(&breakdown)?)?;
            }
            IpcRequest::Config => {
                writeln!(stdout, "{}", serde_json::to_string(engine.config())?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{}", err_json)?;
    stdout.flush()?;
    Ok(())
}

fn print_portfolio(summary: &PortfolioSummary, seed: u64) {
    println!("=== PORTFOLIO SUMMARY ===");
    println!("  seed:            {seed}");
    println!("  customers:       {}", summary.total_customers);
    println!("  skipped:         {}", summary.skipped);
    println!("  loyal (low):     {}", summary.loyal_customers());
    println!("  medium:          {}", summary.medium_risk);
    println!("  at risk (high):  {}", summary.at_risk_customers());
    println!("  avg probability: {:.1}%", summary.average_probability * 100.0);
    println!("  max probability: {:.1}%", summary.max_probability * 100.0);
    println!();
    println!("=== TOP DRIVERS ===");
    for d in summary.driver_frequency.iter().take(5) {
        println!("  {:<26} {}", d.factor, d.count);
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
