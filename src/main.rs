use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, bail};
use tracing::info;

use appetite::config::ScenarioConfig;
use appetite::snapshot::FirmSnapshot;

struct Args {
    input: Option<String>,
    seed: Option<u64>,
    board_appetite: Option<f64>,
    output: Option<String>,
    quiet: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        input: None,
        seed: None,
        board_appetite: None,
        output: None,
        quiet: false,
    };

    let value = |i: usize, flag: &str| -> anyhow::Result<String> {
        args.get(i).cloned().with_context(|| format!("{flag} requires a value"))
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                parsed.input = Some(value(i, "--input")?);
            }
            "--seed" => {
                i += 1;
                parsed.seed = Some(value(i, "--seed")?.parse().context("--seed requires a u64")?);
            }
            "--board-appetite" => {
                i += 1;
                parsed.board_appetite = Some(
                    value(i, "--board-appetite")?
                        .parse()
                        .context("--board-appetite requires a number")?,
                );
            }
            "--output" => {
                i += 1;
                parsed.output = Some(value(i, "--output")?);
            }
            "--quiet" => parsed.quiet = true,
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }
    Ok(parsed)
}

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let args = parse_args()?;

    let mut config = match (&args.input, args.seed) {
        (Some(path), _) => ScenarioConfig::from_json_file(path)
            .with_context(|| format!("loading scenario from {path}"))?,
        (None, Some(seed)) => ScenarioConfig::synthetic(seed),
        (None, None) => ScenarioConfig::canonical(),
    };
    if let Some(b) = args.board_appetite {
        config.board_appetite = b;
    }
    // Re-check after overrides; a file-loaded scenario was checked on parse.
    config.validate().context("invalid scenario")?;
    info!(units = config.units.len(), board_appetite = config.board_appetite, "evaluating scenario");

    // Stops here with the offending entries, sum or duplicate name.
    let snapshot = FirmSnapshot::from_config(&config).context("invalid scenario")?;
    let report = snapshot.evaluate();

    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("failed to create {path}"))?;
        report
            .write_json(BufWriter::new(file))
            .with_context(|| format!("failed to write {path}"))?;
        info!(path = %path, "report written");
    }

    if !args.quiet {
        println!("=== Risk allocation & status ===");
        print!("{}", report.render_table());
    }
    Ok(())
}
