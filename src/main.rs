use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serialquill::config::Config;
use serialquill::format::Format;
use serialquill::logging;
use serialquill::search::Query;
use serialquill::session::{is_quit_command, Session};

/// SerialQuill - Search JSON, XML and YAML documents by key path and value
#[derive(Parser)]
#[command(name = "serialquill")]
#[command(version)]
#[command(about = "Search JSON, XML and YAML documents by key path and value", long_about = None)]
struct Cli {
    /// Document to search (omit to be prompted for one)
    file: Option<PathBuf>,

    /// Run a query and exit instead of starting the prompt (repeatable).
    /// Use `key=value`, `root.key=value` or just `value`.
    #[arg(short, long = "query", value_name = "QUERY")]
    queries: Vec<String>,

    /// Input format, overriding the file extension (json, xml, yaml)
    #[arg(short, long, value_parser = parse_format)]
    format: Option<Format>,

    /// Config file (default: ~/.config/serialquill/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print match contexts on a single line
    #[arg(long)]
    compact: bool,

    /// Do not print match contexts
    #[arg(long)]
    no_context: bool,
}

fn parse_format(name: &str) -> Result<Format, String> {
    Format::from_name(name).ok_or_else(|| format!("unknown format '{}'", name))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::try_load_from(path),
        None => Config::try_load(),
    };
    let (mut config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    // CLI flags override config
    if cli.compact {
        config.pretty_context = false;
    }
    if cli.no_context {
        config.show_context = false;
    }

    logging::init(&config.log_level);
    // Reported only now so the subscriber is in place
    if let Some(e) = config_error {
        tracing::warn!(error = %format!("{:#}", e), "ignoring config file, using defaults");
    }

    let mut session = Session::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.queries.is_empty() {
        let file = cli
            .file
            .as_deref()
            .context("--query needs a FILE to search")?;
        load(&mut session, file, cli.format)
            .with_context(|| format!("Failed to load {}", file.display()))?;

        for line in &cli.queries {
            run_query(&mut out, &session, &config, line)?;
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    if let Some(file) = cli.file.as_deref() {
        if let Err(e) = load(&mut session, file, cli.format) {
            writeln!(out, "{}", e)?;
        }
    }

    // Ask for a document until one loads
    while !session.is_loaded() {
        writeln!(out, "Input the serialized file to be parsed. Supported file types are:")?;
        for format in Format::ALL {
            for ext in format.extensions() {
                writeln!(out, " - .{}", ext)?;
            }
        }
        writeln!(out, "Type quit or x at any time to close the application.")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_quit_command(line) {
            return Ok(());
        }

        if let Err(e) = load(&mut session, Path::new(line), cli.format) {
            writeln!(out, "{}", e)?;
        }
    }

    if let Some(document) = session.document() {
        writeln!(out, "File {} is ready to be searched.", document.display_name())?;
    }

    loop {
        writeln!(
            out,
            "Input any search parameters (key=value or value). Type quit or x at any time to close the application."
        )?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }
        if is_quit_command(&line) {
            return Ok(());
        }

        run_query(&mut out, &session, &config, &line)?;
    }
}

fn load(
    session: &mut Session,
    path: &Path,
    format: Option<Format>,
) -> Result<(), serialquill::LoadError> {
    let document = match format {
        Some(format) => session.load_document_as(path, format)?,
        None => session.load_document(path)?,
    };
    tracing::debug!(name = %document.display_name(), "document ready");
    Ok(())
}

fn run_query<W: Write>(out: &mut W, session: &Session, config: &Config, line: &str) -> Result<()> {
    let query = Query::parse(line);
    let matches = session.find(&query)?;

    for found in &matches {
        writeln!(out, "Found node that matches term at {}.", found.path_string())?;
        if config.show_context {
            writeln!(out, "{}", found.context.render(config.pretty_context))?;
        }
    }

    let noun = if matches.len() == 1 { "node" } else { "nodes" };
    writeln!(out, "{} {} matched {}.", matches.len(), noun, query)?;
    out.flush()?;

    Ok(())
}
