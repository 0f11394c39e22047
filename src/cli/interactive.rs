//! Interactive command - drive the screen router at the terminal.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::cli::check::format_positions;
use crate::cli::session::{Event, Screen, Transition};
use crate::core::types::AlgorithmId;
use crate::matching::engine::{MatchEngine, MatchOutcome};
use crate::source::TextSource;

/// Execute the interactive command on stdin/stdout
///
/// # Errors
///
/// Returns an error only if the terminal cannot be read or written.
pub fn run(engine: &MatchEngine) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(engine, stdin.lock(), stdout.lock())
}

/// Run a session until the user quits or input ends.
///
/// Problems with the user's input (unknown algorithm, empty text, unreadable
/// file) are printed and the current screen is shown again.
///
/// # Errors
///
/// Returns an error only on I/O failure of `reader` or `writer`.
pub fn run_session<R: BufRead, W: Write>(
    engine: &MatchEngine,
    mut reader: R,
    mut writer: W,
) -> anyhow::Result<()> {
    let mut screen = Screen::SelectAlgorithm;
    let mut last_outcome: Option<MatchOutcome> = None;

    writeln!(writer, "plagscan interactive session (type 'quit' to exit, 'back' to go back)")?;

    loop {
        writeln!(writer, "\n{}", screen.title())?;
        render_options(&mut writer, screen, last_outcome.as_ref())?;

        let event = match screen {
            Screen::ManualInput { algorithm } => {
                match read_manual_input(engine, algorithm, &mut reader, &mut writer)? {
                    Step::Event(event, outcome) => {
                        last_outcome = outcome;
                        event
                    }
                    Step::Retry => continue,
                    Step::Eof => break,
                }
            }
            Screen::FileInput { algorithm } => {
                match read_file_input(engine, algorithm, &mut reader, &mut writer)? {
                    Step::Event(event, outcome) => {
                        last_outcome = outcome;
                        event
                    }
                    Step::Retry => continue,
                    Step::Eof => break,
                }
            }
            Screen::SelectAlgorithm | Screen::SelectInputMode { .. } | Screen::Result { .. } => {
                let Some(line) = prompt(&mut reader, &mut writer, "> ")? else {
                    break;
                };
                match screen.parse_command(&line) {
                    Ok(Some(event)) => event,
                    Ok(None) => continue,
                    Err(message) => {
                        writeln!(writer, "Error: {message}")?;
                        continue;
                    }
                }
            }
        };

        match screen.handle(event) {
            Transition::Goto(next) => {
                tracing::debug!(from = ?screen, to = ?next, "Screen transition");
                screen = next;
            }
            Transition::Stay => {}
            Transition::Exit => break,
        }
    }

    writeln!(writer, "Goodbye")?;
    writer.flush()?;
    Ok(())
}

enum Step {
    Event(Event, Option<MatchOutcome>),
    Retry,
    Eof,
}

fn render_options<W: Write>(
    writer: &mut W,
    screen: Screen,
    last_outcome: Option<&MatchOutcome>,
) -> std::io::Result<()> {
    match screen {
        Screen::SelectAlgorithm => {
            writeln!(writer, "  1) {} (bm)", AlgorithmId::BadCharacter.display_name())?;
            writeln!(writer, "  2) {} (kmp)", AlgorithmId::PrefixFunction.display_name())?;
            writeln!(writer, "  3) {} (rk)", AlgorithmId::RollingHash.display_name())?;
        }
        Screen::SelectInputMode { algorithm } => {
            writeln!(writer, "Algorithm: {}", algorithm.display_name())?;
            writeln!(writer, "  1) Manual input")?;
            writeln!(writer, "  2) Upload files")?;
        }
        Screen::ManualInput { .. } | Screen::FileInput { .. } => {}
        Screen::Result { algorithm, report } => {
            writeln!(writer, "Algorithm: {}", algorithm.display_name())?;
            writeln!(writer, "Plagiarism percentage: {}%", report.percentage)?;
            if let Some(outcome) = last_outcome {
                writeln!(writer, "Occurrences: {}", outcome.occurrences())?;
                writeln!(writer, "Positions: {}", format_positions(&outcome.positions))?;
            }
            writeln!(
                writer,
                "Execution time: {:.4} seconds",
                report.elapsed.as_secs_f64()
            )?;
            writeln!(writer, "Press Enter to check again, or type 'quit'")?;
        }
    }
    Ok(())
}

/// Print `label`, read one line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> std::io::Result<Option<String>> {
    write!(writer, "{label}")?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Read one data field; navigation words become events
fn read_field<R: BufRead, W: Write>(
    screen: Screen,
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> anyhow::Result<Result<String, Step>> {
    let Some(line) = prompt(reader, writer, label)? else {
        return Ok(Err(Step::Eof));
    };
    match screen.parse_command(&line) {
        Ok(Some(event)) => Ok(Err(Step::Event(event, None))),
        _ => Ok(Ok(line)),
    }
}

fn read_manual_input<R: BufRead, W: Write>(
    engine: &MatchEngine,
    algorithm: AlgorithmId,
    reader: &mut R,
    writer: &mut W,
) -> anyhow::Result<Step> {
    let screen = Screen::ManualInput { algorithm };

    let text = match read_field(screen, reader, writer, "Text: ")? {
        Ok(text) => TextSource::Inline(text),
        Err(step) => return Ok(step),
    };
    let pattern = match read_field(screen, reader, writer, "Pattern: ")? {
        Ok(pattern) => TextSource::Inline(pattern),
        Err(step) => return Ok(step),
    };

    check(engine, algorithm, &text, &pattern, writer)
}

fn read_file_input<R: BufRead, W: Write>(
    engine: &MatchEngine,
    algorithm: AlgorithmId,
    reader: &mut R,
    writer: &mut W,
) -> anyhow::Result<Step> {
    let screen = Screen::FileInput { algorithm };

    let text = match read_field(screen, reader, writer, "Text file: ")? {
        Ok(path) => TextSource::File(PathBuf::from(path.trim())),
        Err(step) => return Ok(step),
    };
    let pattern = match read_field(screen, reader, writer, "Pattern file: ")? {
        Ok(path) => TextSource::File(PathBuf::from(path.trim())),
        Err(step) => return Ok(step),
    };

    check(engine, algorithm, &text, &pattern, writer)
}

fn check<W: Write>(
    engine: &MatchEngine,
    algorithm: AlgorithmId,
    text: &TextSource,
    pattern: &TextSource,
    writer: &mut W,
) -> anyhow::Result<Step> {
    let loaded = text
        .load("Text")
        .and_then(|text| pattern.load("Pattern").map(|pattern| (text, pattern)));
    let (text, pattern) = match loaded {
        Ok(pair) => pair,
        Err(e) => {
            writeln!(writer, "Error: {e}")?;
            return Ok(Step::Retry);
        }
    };

    match engine.run_with(&text, &pattern, algorithm) {
        Ok(outcome) => Ok(Step::Event(Event::Submitted(outcome.report), Some(outcome))),
        Err(e) => {
            writeln!(writer, "Error: {e}")?;
            Ok(Step::Retry)
        }
    }
}
