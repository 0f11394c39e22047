//! Compare command - run every algorithm on the same input.

use clap::Args;

use crate::cli::check::outcome_json;
use crate::cli::{InputArgs, OutputFormat};
use crate::matching::engine::{Comparison, MatchEngine};
use crate::source::load_pair;

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: CompareArgs,
    format: OutputFormat,
    verbose: bool,
    engine: &MatchEngine,
) -> anyhow::Result<()> {
    let text_source = args.input.text_source();
    let pattern_source = args.input.pattern_source();
    let (text, pattern) = load_pair(&text_source, &pattern_source)?;

    if verbose {
        eprintln!("Text: {}", text_source.describe());
        eprintln!("Pattern: {}", pattern_source.describe());
    }

    let comparison = engine.compare(&text, &pattern)?;

    match format {
        OutputFormat::Text => print_text_comparison(&comparison),
        OutputFormat::Json => print_json_comparison(&comparison)?,
        OutputFormat::Tsv => print_tsv_comparison(&comparison),
    }

    Ok(())
}

fn print_text_comparison(comparison: &Comparison) {
    println!("Algorithm Comparison");
    println!("{}", "=".repeat(60));

    if let Some(first) = comparison.outcomes.first() {
        println!(
            "\nText: {} characters, pattern: {} characters",
            first.text_len, first.pattern_len
        );
    }

    println!(
        "\n  {:<20} {:>12} {:>12} {:>14}",
        "Algorithm", "Percentage", "Occurrences", "Time (s)"
    );
    for outcome in &comparison.outcomes {
        println!(
            "  {:<20} {:>11.2}% {:>12} {:>14.6}",
            outcome.algorithm.display_name(),
            outcome.report.percentage,
            outcome.occurrences(),
            outcome.report.elapsed.as_secs_f64(),
        );
    }

    if let Some(fastest) = comparison
        .outcomes
        .iter()
        .min_by_key(|outcome| outcome.report.elapsed)
    {
        println!("\nFastest: {}", fastest.algorithm.display_name());
    }

    if comparison.agree {
        println!("All algorithms agree on match positions");
    } else {
        println!("WARNING: algorithms disagree on match positions");
    }
}

fn print_json_comparison(comparison: &Comparison) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "results": comparison.outcomes.iter().map(outcome_json).collect::<Vec<_>>(),
        "agree": comparison.agree,
        "checked_at": chrono::Utc::now().to_rfc3339(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_comparison(comparison: &Comparison) {
    println!("algorithm\tpercentage\toccurrences\telapsed_seconds\tagree");
    for outcome in &comparison.outcomes {
        println!(
            "{}\t{:.2}\t{}\t{:.6}\t{}",
            outcome.algorithm,
            outcome.report.percentage,
            outcome.occurrences(),
            outcome.report.elapsed.as_secs_f64(),
            comparison.agree,
        );
    }
}
