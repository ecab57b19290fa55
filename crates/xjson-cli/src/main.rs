use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xjson::config::DEFAULT_MAX_DEPTH;

/// Largest input accepted unless `--max-size` says otherwise (10 MiB)
const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Parser)]
#[command(name = "xjson", version, about = "Convert XML documents to JSON")]
struct Args {
    /// Input XML file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Write compact JSON instead of indented JSON
    #[arg(long)]
    compact: bool,
    /// Maximum element nesting depth (0 disables the limit)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u16,
    /// Maximum input size in bytes (0 disables the limit)
    #[arg(long, value_name = "BYTES", default_value_t = MAX_UPLOAD_SIZE)]
    max_size: usize,
    /// Log progress to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = xjson::Config::new(args.max_depth, args.max_size);
    let input = read_input(args.input.as_deref(), config.max_size)?;
    let node = xjson::convert_bytes_with_config(&input, config)
        .context("failed to convert XML to JSON")?;

    let mut output = if args.compact {
        xjson::json::to_string(&node)
    } else {
        xjson::json::to_string_pretty(&node)
    };
    output.push('\n');

    write_output(args.output.as_deref(), output.as_bytes())?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn read_input(path: Option<&Path>, max_size: usize) -> Result<Vec<u8>> {
    let Some(path) = path else {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("failed to read stdin")?;
        if buffer.trim_ascii().is_empty() {
            bail!("no input provided on stdin");
        }
        debug!(bytes = buffer.len(), "read stdin");
        return Ok(buffer);
    };

    if !is_xml_file(path) {
        bail!("only XML files are allowed: {}", path.display());
    }

    let len = std::fs::metadata(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?
        .len();
    let limit = u64::try_from(max_size).unwrap_or(u64::MAX);
    if limit > 0 && len > limit {
        bail!("file too large: {len} bytes, maximum is {max_size} bytes");
    }

    info!(path = %path.display(), bytes = len, "reading input");
    std::fs::read(path).with_context(|| format!("failed to read input file {}", path.display()))
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            info!(path = %path.display(), bytes = data.len(), "writing output");
            std::fs::write(path, data)
                .with_context(|| format!("failed to write output file {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}

fn is_xml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}
