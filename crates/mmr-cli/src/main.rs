use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use glob::glob;
use mmr_core::{RegionFile, RenderStyle};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MMRDUMP_BUILD_COMMIT"),
    " ",
    env!("MMRDUMP_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  mmrdump region show firmware.img -o region.json\n  mmrdump region show firmware.img --end-offset 0x40000 --stdout\n  mmrdump -vv region dump 'build/*.img' --stdout --compact";

#[derive(Parser, Debug)]
#[command(name = "mmrdump")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Inspect manufacturing meta regions (MMR) appended to firmware images.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace; RUST_LOG overrides)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on meta regions.
    Region {
        #[command(subcommand)]
        command: RegionCommands,
    },
}

#[derive(Subcommand, Debug)]
enum RegionCommands {
    /// Decode the region ending at the given offset and write its JSON projection.
    #[command(alias = "dump")]
    #[command(after_help = EXAMPLES)]
    Show(ShowArgs),
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Path to a firmware image or raw region file
    input: PathBuf,

    /// Offset at which the region ends (decimal or 0x-prefixed hex; default: end of file)
    #[arg(long, value_parser = parse_offset)]
    end_offset: Option<u64>,

    /// Output path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Write JSON to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Single-line JSON output (default is indented)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Region { command } => match command {
            RegionCommands::Show(args) => cmd_region_show(args),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_region_show(args: ShowArgs) -> Result<(), CliError> {
    let input = resolve_input_path(&args.input)?;
    validate_input_file(&input)?;

    let output = if args.stdout {
        None
    } else {
        let output = args.output.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?;
        ensure_distinct_output(&input, &output)?;
        Some(output)
    };

    let region = RegionFile::open(&input, args.end_offset).map_err(|err| {
        CliError::new(
            format!("failed to decode region in {}: {}", input.display(), err),
            Some("check --end-offset; it must point just past the region footer".to_string()),
        )
    })?;
    tracing::debug!(
        tlvs = region.meta.tlvs.len(),
        size = region.meta.footer.size,
        "decoded meta region"
    );

    let style = if args.compact {
        RenderStyle::Compact
    } else {
        RenderStyle::Pretty
    };
    let json = region.render(style).context("JSON rendering failed")?;

    let Some(output) = output else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output, json)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;

    if !args.quiet {
        eprintln!("OK: region written -> {}", output.display());
    }
    Ok(())
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A missing output directory cannot contain the input.
    let Ok(output_dir) = fs::canonicalize(output_dir) else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", output.display()))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a firmware image or region file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a firmware image or region file".to_string()),
        ));
    }
    Ok(())
}

fn parse_offset(value: &str) -> Result<u64, String> {
    let value = value.trim();
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse::<u64>(),
    };
    parsed.map_err(|err| format!("invalid offset '{}': {}", value, err))
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}",
                    pattern, count, listed
                ),
                Some("pass a single image, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::{is_glob_pattern, parse_offset};

    #[test]
    fn parse_offset_accepts_decimal_and_hex() {
        assert_eq!(parse_offset("1024"), Ok(1024));
        assert_eq!(parse_offset("0x400"), Ok(1024));
        assert_eq!(parse_offset("0X40000"), Ok(0x40000));
    }

    #[test]
    fn parse_offset_rejects_garbage() {
        assert!(parse_offset("-1").is_err());
        assert!(parse_offset("0xzz").is_err());
        assert!(parse_offset("").is_err());
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("build/*.img"));
        assert!(is_glob_pattern("fw?.bin"));
        assert!(!is_glob_pattern("firmware.img"));
    }
}
