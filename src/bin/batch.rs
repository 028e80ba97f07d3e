//! Parallel batch evaluator.
//!
//! Reads one `ScenarioConfig` JSON object per line (NDJSON) from the file
//! given as the first positional argument, or stdin, and writes one result
//! per non-blank input line to `--output PATH` or stdout. Results keep input
//! order; a line that fails to parse or validate yields an error record and
//! does not stop the batch.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use appetite::config::ScenarioConfig;
use appetite::report::FirmReport;
use appetite::snapshot::evaluate_batch;

#[derive(Serialize)]
#[serde(untagged)]
enum BatchLine<'a> {
    Report { line: usize, report: &'a FirmReport },
    Error { line: usize, error: String },
}

/// Counts of evaluated and rejected lines.
#[derive(Debug, PartialEq, Eq)]
struct BatchOutcome {
    evaluated: usize,
    rejected: usize,
}

fn run(reader: impl BufRead, writer: impl Write) -> anyhow::Result<BatchOutcome> {
    // ── Parse: keep per-line failures instead of aborting ─────────────────────
    let mut parsed: Vec<(usize, Result<usize, String>)> = Vec::new();
    let mut configs: Vec<ScenarioConfig> = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("error reading line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        match ScenarioConfig::from_json_str(&line) {
            Ok(config) => {
                parsed.push((line_no + 1, Ok(configs.len())));
                configs.push(config);
            }
            Err(e) => parsed.push((line_no + 1, Err(e.to_string()))),
        }
    }
    info!(scenarios = configs.len(), unparsed = parsed.len() - configs.len(), "evaluating batch");

    // ── Evaluate and write ────────────────────────────────────────────────────
    let results = evaluate_batch(&configs);

    let mut writer = BufWriter::new(writer);
    let mut outcome = BatchOutcome { evaluated: 0, rejected: 0 };
    for (line, entry) in parsed {
        let error = match entry {
            Ok(idx) => match &results[idx] {
                Ok(report) => {
                    outcome.evaluated += 1;
                    serde_json::to_writer(&mut writer, &BatchLine::Report { line, report })
                        .context("failed to serialize result")?;
                    writeln!(writer).context("failed to write newline")?;
                    continue;
                }
                Err(e) => e.to_string(),
            },
            Err(e) => e,
        };
        outcome.rejected += 1;
        warn!(line, error = %error, "scenario rejected");
        serde_json::to_writer(&mut writer, &BatchLine::Error { line, error })
            .context("failed to serialize result")?;
        writeln!(writer).context("failed to write newline")?;
    }
    writer.flush().context("failed to flush output")?;
    Ok(outcome)
}

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    // ── Arguments: optional positional input, optional --output ───────────────
    let args: Vec<String> = std::env::args().collect();
    let mut input_path: Option<String> = None;
    let mut output_path: Option<String> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().context("--output requires a value")?);
            }
            other => input_path = Some(other.to_string()),
        }
        i += 1;
    }

    let reader: Box<dyn BufRead> = match &input_path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {path}"))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let sink: Box<dyn Write> = match &output_path {
        Some(path) => Box::new(File::create(path).with_context(|| format!("failed to create {path}"))?),
        None => Box::new(io::stdout().lock()),
    };

    let outcome = run(reader, sink)?;
    info!(evaluated = outcome.evaluated, rejected = outcome.rejected, "batch complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"board_appetite": 100, "units": [{"name": "A", "allocation_percentage": 100, "individual_risk_exposure": 40, "risk_tolerance_factor": 1.0}]}"#;
    const BAD_SUM: &str = r#"{"board_appetite": 100, "units": [{"name": "A", "allocation_percentage": 90, "individual_risk_exposure": 40, "risk_tolerance_factor": 1.0}]}"#;

    fn run_lines(input: &str) -> (BatchOutcome, Vec<serde_json::Value>) {
        let mut out: Vec<u8> = Vec::new();
        let outcome = run(input.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (outcome, lines)
    }

    #[test]
    fn malformed_line_yields_error_record_and_batch_continues() {
        let input = format!("{VALID}\n{{not json\n\n{BAD_SUM}\n{VALID}\n");
        let (outcome, lines) = run_lines(&input);

        assert_eq!(outcome, BatchOutcome { evaluated: 2, rejected: 2 });
        assert_eq!(lines.len(), 4);
        let numbers: Vec<u64> = lines.iter().map(|v| v["line"].as_u64().unwrap()).collect();
        assert_eq!(numbers, vec![1, 2, 4, 5]);

        assert!(lines[0].get("report").is_some());
        assert!(lines[1]["error"].as_str().unwrap().contains("cannot parse scenario"));
        assert!(lines[2]["error"].as_str().unwrap().contains("sum to 100%"));
        assert_eq!(lines[3]["report"]["summary"]["Total Firm Risk Profile"], 40.0);
    }

    #[test]
    fn out_of_range_input_is_an_error_record() {
        let negative_board = VALID.replace(r#""board_appetite": 100"#, r#""board_appetite": -100"#);
        let (outcome, lines) = run_lines(&negative_board);
        assert_eq!(outcome, BatchOutcome { evaluated: 0, rejected: 1 });
        assert!(lines[0]["error"].as_str().unwrap().contains("board appetite must be positive"));
    }
}
