use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use grille::{DEFAULT_META_SHEET, DuplicateIdPolicy, GrilleOptions, xlsx_to_json_with};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "grille",
    version,
    about = "Convert a metadata-driven spreadsheet into one JSON document"
)]
struct Cli {
    /// Workbook to convert (xlsx, xlsm, xlsb, xls or ods).
    input: PathBuf,

    /// Sheet holding the metadata table.
    #[arg(long, default_value = DEFAULT_META_SHEET)]
    meta: String,

    /// Write the document here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON.
    #[arg(long)]
    compact: bool,

    /// Fail when a hash sheet repeats an id instead of keeping the last row.
    #[arg(long)]
    reject_duplicate_ids: bool,

    /// Log more (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> GrilleOptions {
        let policy = if self.reject_duplicate_ids {
            DuplicateIdPolicy::Reject
        } else {
            DuplicateIdPolicy::LastWins
        };
        GrilleOptions::new()
            .meta_sheet(self.meta.clone())
            .duplicate_ids(policy)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let doc = xlsx_to_json_with(&cli.input, cli.options())
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;

    let mut rendered = if cli.compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    rendered.push('\n');

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "document written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}
