mod debug_report;

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use syntaxgen::{DiagnosticKind, DiagnosticMask, Options, encode, grammars, simplify};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SYNTAXGEN_LOG";

fn main() {
    let config = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print!("{}", help_text());
            return;
        }
        Ok(Command::Version) => {
            println!("gen-syntax {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging();

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn run(config: &CliConfig) -> syntaxgen::Result<()> {
    let mut grammar = grammars::cue::grammar();
    let report = simplify(&mut grammar, &config.options)?;

    if config.verbose {
        debug_report::print_run(&grammar, &report, config.color);
    }

    match &config.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            encode::write_json(&grammar, &mut out)?;
            out.flush()?;
        }
        None => {
            let mut out = io::stdout().lock();
            encode::write_json(&grammar, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(CliConfig),
    Help,
    Version,
}

#[derive(Debug, PartialEq)]
struct CliConfig {
    /// `None` writes to stdout.
    output: Option<PathBuf>,
    options: Options,
    verbose: bool,
    color: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
    let mut output: Option<String> = None;
    let mut deny = DiagnosticMask::empty();
    let mut verbose = false;
    let mut color = io::stderr().is_terminal();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-v" | "--verbose" => verbose = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--strict" => deny = DiagnosticMask::all(),
            "--deny" => {
                let value = args.next().ok_or_else(|| "error: --deny expects a value".to_string())?;
                deny |= parse_deny(&value)?;
            }
            "-o" | "--output" => {
                let value = args.next().ok_or_else(|| format!("error: {arg} expects a value"))?;
                set_output(value, &mut output)?;
            }
            "-" => set_output(arg, &mut output)?,
            _ if arg.starts_with("--deny=") => {
                deny |= parse_deny(arg.trim_start_matches("--deny="))?;
            }
            _ if arg.starts_with("--output=") => {
                set_output(arg.trim_start_matches("--output=").to_string(), &mut output)?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => set_output(arg, &mut output)?,
        }
    }

    let output = output.filter(|path| path != "-").map(PathBuf::from);
    Ok(Command::Run(CliConfig { output, options: Options { deny }, verbose, color }))
}

fn set_output(value: String, output: &mut Option<String>) -> Result<(), String> {
    if output.is_some() {
        return Err("error: output provided multiple times".to_string());
    }
    *output = Some(value);
    Ok(())
}

fn parse_deny(value: &str) -> Result<DiagnosticMask, String> {
    DiagnosticKind::from_label(value).map(DiagnosticKind::mask).ok_or_else(|| {
        let known: Vec<&str> = DiagnosticKind::ALL.iter().map(|kind| kind.label()).collect();
        format!("error: invalid --deny '{value}' (expected one of: {})", known.join(", "))
    })
}

fn help_text() -> String {
    format!(
        "gen-syntax {version}

Generate the CUE TextMate grammar as JSON.

Usage:
  gen-syntax [OPTIONS] [<output>]

Arguments:
  <output>                   File to write. Writes to stdout when omitted or '-'.

Options:
  -o, --output <path>        Same as <output>.
  --strict                   Fail on any warning.
  --deny <kind>              Fail on warnings of this kind: unused, single-use.
                             May be repeated.
  -v, --verbose              Print a compaction report to stderr.
  --color                    Force ANSI color in the report.
  --no-color                 Disable ANSI color in the report.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}              Log filter (default: warn).

Exit codes:
  0  Success.
  1  Unresolved rule, denied warning, or write failure.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
