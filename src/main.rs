//! mdhelp - Markdown to help-screen converter

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use mdhelp::{Config, convert};

const CONFIG_FILE: &str = "mdhelp.toml";
const CONFIG_PATH_VAR: &str = "MDHELP_PATH";

#[derive(Parser)]
#[command(name = "mdhelp")]
#[command(version, about = "Convert Markdown to 40-column help screens", long_about = None)]
#[command(after_help = "EXAMPLES:
    mdhelp -f manual.md -o MANUAL.HLP    Convert a file
    mdhelp < manual.md > MANUAL.HLP      Filter stdin to stdout
    mdhelp -c styles.toml -f manual.md   Use an explicit style file")]
struct Cli {
    /// Style configuration file (default: ./mdhelp.toml, then $MDHELP_PATH/mdhelp.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Input file (standard input when omitted)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output file (standard output when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Print resolved paths to stderr before converting
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config_path = locate_config(cli.config.as_deref())?;

    if cli.verbose {
        eprintln!("Config file: {}", config_path.display());
        eprintln!("Input file : {}", display_or(cli.file.as_deref(), "<stdin>"));
        eprintln!("Output file: {}", display_or(cli.output.as_deref(), "<stdout>"));
    }

    let config = Config::load(&config_path).map_err(|e| e.to_string())?;

    let output = match &cli.file {
        Some(path) => {
            let file = File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
            convert(BufReader::new(file), &config)
        }
        None => convert(io::stdin().lock(), &config),
    }
    .map_err(|e| e.to_string())?;

    match &cli.output {
        Some(path) => {
            fs::write(path, output.as_bytes()).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => io::stdout()
            .write_all(output.as_bytes())
            .map_err(|e| e.to_string()),
    }
}

fn display_or(path: Option<&Path>, fallback: &str) -> String {
    path.map_or_else(|| fallback.to_string(), |p| p.display().to_string())
}

/// Resolve the configuration path: an explicit `-c` path must exist;
/// otherwise try the working directory, then `$MDHELP_PATH`.
fn locate_config(explicit: Option<&Path>) -> Result<PathBuf, String> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(format!("configuration file '{}' not found", path.display()))
        };
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.is_file() {
        return Ok(local);
    }

    if let Ok(dir) = std::env::var(CONFIG_PATH_VAR) {
        let candidate = Path::new(&dir).join(CONFIG_FILE);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(format!("configuration file '{CONFIG_FILE}' not found"))
}
