use clap::Parser;
use std::process::ExitCode;
use std::time::Instant;

use cagesum::constraints::{Bounds, ConstraintSet};
use cagesum::errors::ParseError;
use cagesum::parser::{parse_digit_counts, parse_int_list};
use cagesum::search;

/// Killer sudoku cage-sum calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Specific target sums, comma-separated (replaces the min/max sum scan)
    #[arg(short = 's', long, default_value = "")]
    sums: String,

    /// Minimum target sum
    #[arg(long, default_value_t = 0)]
    min_sum: i32,

    /// Maximum target sum
    #[arg(long, default_value_t = 0)]
    max_sum: i32,

    /// Minimum digit value (0-9)
    #[arg(long, default_value_t = 1)]
    min_digit: i32,

    /// Maximum digit value (0-9)
    #[arg(long, default_value_t = 9)]
    max_digit: i32,

    /// Minimum number of digits per combination
    #[arg(long, default_value_t = 1)]
    min_count: i32,

    /// Maximum number of digits per combination
    #[arg(long, default_value_t = 9)]
    max_count: i32,

    /// Maximum times any single digit may repeat within one combination
    #[arg(short = 'r', long, default_value_t = 1)]
    max_repeats: i32,

    /// Digits that must never appear, comma-separated
    #[arg(long, default_value = "")]
    ignore: String,

    /// Digits that must each appear at least once, comma-separated
    #[arg(long, default_value = "")]
    require: String,

    /// Per-digit occurrence ranges, e.g. "1:3,2:2-5"
    #[arg(short = 'd', long, default_value = "")]
    digit_counts: String,
}

/// Entry point of the cagesum CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("CAGESUM_DEBUG").is_ok();
    cagesum::log::init_logger(debug_enabled);

    log::info!("Starting cagesum");

    if let Err(e) = try_main() {
        // Print the error to stderr, with detailed formatting for our own error types
        if let Some(invalid) = e.downcast_ref::<cagesum::constraints::InvalidConstraint>() {
            eprintln!("Error: {}", invalid.display_detailed());
        } else if let Some(parse_err) = e.downcast_ref::<Box<ParseError>>() {
            eprintln!("Error: {}", parse_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the cagesum CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Parse the free-text list fields into a `ConstraintSet`.
/// 3. Run the combination search.
/// 4. Print each sum group on stdout.
/// 5. Print performance metrics (timing, counts) on stderr.
///
/// Returns `Ok(())` on success or an error (invalid field text, invalid
/// constraints) which bubbles up to [`main`].
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // 1. Turn the free-text fields into typed constraint values
    let mut constraints = ConstraintSet {
        sum_range: Bounds::of(cli.min_sum, cli.max_sum),
        exact_sums: parse_int_list(&cli.sums)?,
        count_range: Bounds::of(cli.min_count, cli.max_count),
        digit_range: Bounds::of(cli.min_digit, cli.max_digit),
        max_repeats: cli.max_repeats,
        digit_counts: parse_digit_counts(&cli.digit_counts)?,
        ..Default::default()
    };
    constraints.ignored_digits = parse_int_list(&cli.ignore)?.into_iter().collect();
    constraints.must_have_digits = parse_int_list(&cli.require)?.into_iter().collect();

    // 2. Enumerate every valid combination, grouped by target sum
    let t_search = Instant::now();
    let mapping = search::search(&constraints)?;
    let search_secs = t_search.elapsed().as_secs_f64();

    // 3. Print each sum group on stdout
    let mut total = 0usize;
    for group in mapping.iter() {
        println!("Sum {}:", group.sum);
        for combination in &group.combinations {
            println!("  {combination}");
        }
        total += group.combinations.len();
    }
    if mapping.is_empty() {
        println!("No combinations satisfy {constraints}");
    }

    // 4. Print diagnostics (timing, counts) to stderr
    eprintln!(
        "Found {} combination(s) across {} sum(s) in {:.3}s.",
        total,
        mapping.len(),
        search_secs
    );

    Ok(())
}
