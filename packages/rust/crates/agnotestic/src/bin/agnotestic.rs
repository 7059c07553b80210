//! agnotestic CLI: list, inspect and query a Markdown note collection.
//!
//! Logging: set `RUST_LOG=agnotestic=debug` (or `info`) to see scan logs on stderr.

#![allow(missing_docs)]

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use agnotestic::{
    ConfigFile, NoteCollection, NoteScanner, NotesConfig, OutFormat, ScanOptions, Zettel,
    write_notes, write_paths, write_zettels,
};

#[derive(Parser, Debug)]
#[command(
    name = "agnotestic",
    version,
    about = "Scan a Markdown note collection and query its links, headers and tags"
)]
struct Cli {
    /// Notes root directory.
    #[arg(
        long,
        short = 'r',
        value_name = "DIR",
        env = "AGNOTESTIC_ROOT",
        global = true
    )]
    root: Option<PathBuf>,

    /// Config file (defaults to `config.toml` in the working directory when present).
    #[arg(
        long = "config",
        short = 'c',
        value_name = "FILE",
        env = "AGNOTESTIC_CONFIG",
        global = true
    )]
    config_file: Option<PathBuf>,

    /// Sort entries by file name while walking.
    #[arg(long, default_value_t = false, global = true)]
    sort: bool,

    /// Include dot-prefixed files and directories.
    #[arg(long, default_value_t = false, global = true)]
    hidden: bool,

    /// Warn about and skip unreadable directories and notes instead of failing.
    #[arg(long = "skip-unreadable", default_value_t = false, global = true)]
    skip_unreadable: bool,

    /// Follow symbolic links while walking.
    #[arg(long = "follow-links", default_value_t = false, global = true)]
    follow_links: bool,

    /// Maximum directory depth below the root (0 = root files only).
    #[arg(long = "max-depth", value_name = "N", global = true)]
    max_depth: Option<usize>,

    /// Output format for `tags`, `links` and `full-text` [default: plain].
    #[arg(long, short = 'f', value_enum, global = true)]
    format: Option<FormatArg>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Print every note path, one per line (default).
    Scan,
    /// Print every parsed note with its headers, links and tags as JSON.
    Notes,
    /// Find notes with a matching tag.
    Tags { text: String },
    /// Find notes linking to a matching target.
    Links { text: String },
    /// Search the text of all notes.
    FullText { text: String },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum FormatArg {
    Plain,
    Json,
    Alfred,
}

impl From<FormatArg> for OutFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Plain => Self::Plain,
            FormatArg::Json => Self::Json,
            FormatArg::Alfred => Self::Alfred,
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<NotesConfig> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let file = ConfigFile::discover(cli.config_file.as_deref(), &cwd)?;
    Ok(NotesConfig::resolve(cli.root.clone(), file)?)
}

fn build_scanner(cli: &Cli, config: &NotesConfig) -> NoteScanner {
    NoteScanner::new(&config.root).with_options(ScanOptions {
        sort_by_name: cli.sort,
        include_hidden: cli.hidden,
        follow_links: cli.follow_links,
        max_depth: cli.max_depth,
        skip_unreadable: cli.skip_unreadable,
    })
}

fn run_scan(scanner: &NoteScanner) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let paths = scanner.scan()?.map(|path| path.map_err(anyhow::Error::from));
    let count = write_paths(&mut out, paths)?;
    out.flush().context("failed to write to stdout")?;
    tracing::info!(count, root = %scanner.root().display(), "scan finished");
    Ok(())
}

fn print_matches(matches: &[&Zettel], format: OutFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_zettels(&mut out, matches, format).context("failed to write results")?;
    out.flush().context("failed to write results")?;
    Ok(())
}

fn execute(cli: &Cli) -> Result<()> {
    let command = cli.command.clone().unwrap_or(Command::Scan);
    if matches!(command, Command::Scan | Command::Notes) && cli.format.is_some() {
        bail!("--format applies only to the tags, links and full-text commands");
    }
    let format: OutFormat = cli.format.unwrap_or(FormatArg::Plain).into();

    let config = resolve_config(cli)?;
    let scanner = build_scanner(cli, &config);
    let load = || NoteCollection::load(&scanner, &config);

    match command {
        Command::Scan => run_scan(&scanner),
        Command::Notes => {
            let collection = load()?;
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_notes(&mut out, collection.zettels()).context("failed to write notes")?;
            out.flush().context("failed to write notes")?;
            Ok(())
        }
        Command::Tags { text } => print_matches(&load()?.with_tag(&text), format),
        Command::Links { text } => print_matches(&load()?.linking_to(&text), format),
        Command::FullText { text } => print_matches(&load()?.full_text(&text), format),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; default keeps stderr quiet unless something is skipped.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("agnotestic=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    execute(&cli)
}
