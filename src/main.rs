//! Expense Settlement Engine CLI
//!
//! Command-line interface for computing household balances and settlement
//! suggestions from expense CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --members members.csv expenses.csv > balances.csv
//! cargo run -- --members members.csv --report settlements expenses.csv > settlements.csv
//! cargo run -- --members members.csv --strategy sync expenses.csv > balances.csv
//! cargo run -- --members members.csv --strategy async --batch-size 2000 --max-concurrent 8 expenses.csv
//! ```
//!
//! The program reads the household roster and expense records from the
//! input CSV files, processes them through the settlement engine using the
//! selected strategy, and writes the requested report to stdout.
//!
//! # Processing Strategies
//!
//! - **sync**: Synchronous CSV parsing with single-threaded ingest
//! - **async**: Asynchronous batch ingest with multi-threaded parallelism (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use expense_settlement_engine::cli;
use expense_settlement_engine::strategy;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Create the appropriate processing strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config)
    };

    let options = args.to_run_options();

    // Process expenses using the selected strategy
    // Output goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&options, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
