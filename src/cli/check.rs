//! Check command - match one pattern against one text with a chosen algorithm.

use clap::Args;

use crate::cli::{InputArgs, OutputFormat};
use crate::core::types::AlgorithmId;
use crate::matching::engine::{MatchEngine, MatchOutcome};
use crate::source::{load_pair, TextSource};

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Algorithm: kmp (Knuth-Morris-Pratt), rk (Rabin-Karp) or bm (Boyer-Moore)
    #[arg(short, long)]
    pub algorithm: String,

    #[command(flatten)]
    pub input: InputArgs,

    /// List every match position (text output; JSON always includes them)
    #[arg(long)]
    pub positions: bool,
}

/// Execute the check command
///
/// # Errors
///
/// Returns an error if inputs cannot be loaded, the algorithm is unknown, or an
/// input exceeds the engine's size limit.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: CheckArgs,
    format: OutputFormat,
    verbose: bool,
    engine: &MatchEngine,
) -> anyhow::Result<()> {
    let algorithm: AlgorithmId = args.algorithm.parse()?;

    let text_source = args.input.text_source();
    let pattern_source = args.input.pattern_source();
    let (text, pattern) = load_pair(&text_source, &pattern_source)?;

    if verbose {
        eprintln!(
            "Text: {} ({} characters)",
            text_source.describe(),
            text.chars().count()
        );
        eprintln!(
            "Pattern: {} ({} characters)",
            pattern_source.describe(),
            pattern.chars().count()
        );
    }

    let outcome = engine.run_with(&text, &pattern, algorithm)?;

    match format {
        OutputFormat::Text => {
            print_text_result(&outcome, &text_source, &pattern_source, args.positions);
        }
        OutputFormat::Json => print_json_result(&outcome)?,
        OutputFormat::Tsv => print_tsv_result(&outcome),
    }

    Ok(())
}

fn print_text_result(
    outcome: &MatchOutcome,
    text_source: &TextSource,
    pattern_source: &TextSource,
    show_positions: bool,
) {
    println!("Plagiarism Check");
    println!("{}", "=".repeat(60));

    println!(
        "\nAlgorithm: {} ({})",
        outcome.algorithm.display_name(),
        outcome.algorithm
    );
    println!(
        "Text: {} ({} characters)",
        text_source.describe(),
        outcome.text_len
    );
    println!(
        "Pattern: {} ({} characters)",
        pattern_source.describe(),
        outcome.pattern_len
    );

    println!("\nPlagiarism percentage: {}%", outcome.report.percentage);
    println!("Occurrences: {}", outcome.occurrences());
    println!(
        "Execution time: {:.4} seconds",
        outcome.report.elapsed.as_secs_f64()
    );

    if show_positions {
        println!("Positions: {}", format_positions(&outcome.positions));
    }
}

/// Comma-separated positions, or `none`
pub(crate) fn format_positions(positions: &[usize]) -> String {
    if positions.is_empty() {
        return "none".to_string();
    }
    positions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// JSON rendering of one outcome, shared with `compare`
pub(crate) fn outcome_json(outcome: &MatchOutcome) -> serde_json::Value {
    serde_json::json!({
        "algorithm": outcome.algorithm,
        "algorithm_name": outcome.algorithm.display_name(),
        "percentage": outcome.report.percentage,
        "elapsed_seconds": outcome.report.elapsed.as_secs_f64(),
        "elapsed_us": u64::try_from(outcome.report.elapsed.as_micros()).unwrap_or(u64::MAX),
        "occurrences": outcome.occurrences(),
        "text_length": outcome.text_len,
        "pattern_length": outcome.pattern_len,
        "positions": outcome.positions,
    })
}

fn print_json_result(outcome: &MatchOutcome) -> anyhow::Result<()> {
    let mut output = outcome_json(outcome);
    output["checked_at"] = serde_json::Value::String(chrono::Utc::now().to_rfc3339());

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_result(outcome: &MatchOutcome) {
    println!("algorithm\tpercentage\toccurrences\telapsed_seconds\ttext_length\tpattern_length");
    println!(
        "{}\t{:.2}\t{}\t{:.6}\t{}\t{}",
        outcome.algorithm,
        outcome.report.percentage,
        outcome.occurrences(),
        outcome.report.elapsed.as_secs_f64(),
        outcome.text_len,
        outcome.pattern_len,
    );
}
