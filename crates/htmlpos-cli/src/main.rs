//! htmlpos binary - print a position-annotated HTML tree as JSON

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use htmlpos_html::{ParseOptions, parse_bytes};

#[derive(Parser, Debug)]
#[command(name = "htmlpos")]
#[command(about = "Parse HTML and print the DOM tree with source positions")]
struct Args {
    /// HTML file to parse (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Tab stop width used for column numbers
    #[arg(long, default_value_t = ParseOptions::DEFAULT_TAB_STOP)]
    tab_stop: usize,

    /// Stop parsing at the first parse error
    #[arg(long)]
    stop_on_first_error: bool,

    /// Include parse errors in the output
    #[arg(long)]
    errors: bool,

    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long)]
    compact: bool,
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    match file {
        Some(path) => std::fs::read(path).with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "htmlpos_html=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let options = ParseOptions::new()
        .with_tab_stop(args.tab_stop)
        .with_stop_on_first_error(args.stop_on_first_error)
        .with_collect_errors(args.errors);

    let input = read_input(args.file.as_ref())?;
    tracing::debug!(bytes = input.len(), "read input");

    let output = parse_bytes(&input, &options).context("failed to parse HTML")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.compact {
        serde_json::to_writer(&mut out, &output)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &output)?;
    }
    writeln!(out)?;
    Ok(())
}
