// modthree-cli: shared utilities for the mod-three command-line tool.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use modthree_core::Residue;
use modthree_dfa::TransitionObserver;
use modthree_fsm::ModThreeHandle;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable naming a log file, used when `--log-file` is absent.
pub const LOG_FILE_ENV: &str = "MODTHREE_LOG_FILE";

/// Filter directive used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Prompt printed in interactive mode.
pub const PROMPT: &str = "Enter a binary number: ";

/// Error type for argument parsing and logging setup.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("--interactive cannot be combined with BINARY arguments")]
    InteractiveWithInputs,

    #[error("line {line} is not valid UTF-8")]
    NotUtf8 { line: usize },

    #[error("failed to open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Binary numerals given as positional arguments.
    pub inputs: Vec<String>,
    /// Prompt for a single numeral.
    pub interactive: bool,
    /// Print only the remainder.
    pub quiet: bool,
    /// Also print the residue after each digit.
    pub trace: bool,
    /// Also write log records to this file.
    pub log_file: Option<PathBuf>,
    /// `-h` or `--help` was given.
    pub help: bool,
}

impl CliOptions {
    /// Fill in settings that may come from the environment.
    pub fn with_env(mut self) -> Self {
        if self.log_file.is_none() {
            self.log_file = std::env::var_os(LOG_FILE_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from);
        }
        self
    }
}

/// Parse command-line arguments (without the program name).
///
/// Arguments after `--` are always inputs, even if they start with `-`.
pub fn parse_args(args: &[String]) -> Result<CliOptions, CliError> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "-i" | "--interactive" => options.interactive = true,
            "-q" | "--quiet" => options.quiet = true,
            "-t" | "--trace" => options.trace = true,
            "--log-file" => {
                let path = iter
                    .next()
                    .ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                options.log_file = Some(PathBuf::from(path));
            }
            "--" => {
                options.inputs.extend(iter.by_ref().cloned());
            }
            other => {
                if let Some(path) = other.strip_prefix("--log-file=") {
                    if path.is_empty() {
                        return Err(CliError::MissingValue("--log-file".to_string()));
                    }
                    options.log_file = Some(PathBuf::from(path));
                } else if other.starts_with('-') && other.len() > 1 {
                    return Err(CliError::UnknownOption(other.to_string()));
                } else {
                    options.inputs.push(other.to_string());
                }
            }
        }
    }

    if options.interactive && !options.inputs.is_empty() {
        return Err(CliError::InteractiveWithInputs);
    }

    Ok(options)
}

/// Decode one raw stdin line (1-based `line`), dropping surrounding
/// whitespace including a trailing `\r`.
pub fn decode_line(bytes: &[u8], line: usize) -> Result<&str, CliError> {
    std::str::from_utf8(bytes)
        .map(str::trim)
        .map_err(|_| CliError::NotUtf8 { line })
}

/// Open (creating parent directories) a log file for appending.
pub fn open_log_file(path: &Path) -> Result<File, CliError> {
    let to_error = |source: io::Error| CliError::LogFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}

/// Install the global tracing subscriber: colored records on stderr, plus
/// plain-text records in `log_file` if given. The level comes from
/// `RUST_LOG`, defaulting to `warn`.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file_layer = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .try_init()?;
    Ok(())
}

/// Format the residues visited while reading a numeral.
pub fn format_trace(states: &[Residue]) -> String {
    states
        .iter()
        .map(|r| r.value().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Compute and print the result for one input.
///
/// Returns `Ok(false)` when the input was rejected; the rejection message
/// itself goes through the handle's diagnostics sink.
pub fn process_input<O, W>(
    handle: &mut ModThreeHandle<O>,
    input: &str,
    options: &CliOptions,
    out: &mut W,
) -> io::Result<bool>
where
    O: TransitionObserver<Residue, char>,
    W: Write,
{
    let (remainder, trace) = if options.trace {
        match handle.trace(input) {
            Ok(states) => (
                states.last().map_or(0, |r| r.value()),
                Some(format_trace(&states)),
            ),
            Err(_) => return Ok(false),
        }
    } else {
        match handle.remainder(input) {
            Ok(remainder) => (remainder, None),
            Err(_) => return Ok(false),
        }
    };

    if options.quiet {
        writeln!(out, "{remainder}")?;
    } else {
        writeln!(out, "Remainder when {input} is divided by 3: {remainder}")?;
    }
    if let Some(trace) = trace {
        writeln!(out, "  residues: {trace}")?;
    }
    Ok(true)
}

/// Print an error message and exit with code 2.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(2);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_positional_inputs() {
        let options = parse_args(&args(&["1101", "0", "10a1"])).unwrap();
        assert_eq!(options.inputs, vec!["1101", "0", "10a1"]);
        assert!(!options.interactive && !options.quiet && !options.trace);
    }

    #[test]
    fn parse_flags() {
        let options = parse_args(&args(&["-q", "--trace", "-i"])).unwrap();
        assert!(options.quiet);
        assert!(options.trace);
        assert!(options.interactive);
        assert!(options.inputs.is_empty());

        assert!(parse_args(&args(&["--help"])).unwrap().help);
    }

    #[test]
    fn parse_log_file_forms() {
        let options = parse_args(&args(&["--log-file", "logs/a.log"])).unwrap();
        assert_eq!(options.log_file, Some(PathBuf::from("logs/a.log")));

        let options = parse_args(&args(&["--log-file=b.log", "1"])).unwrap();
        assert_eq!(options.log_file, Some(PathBuf::from("b.log")));
        assert_eq!(options.inputs, vec!["1"]);
    }

    #[test]
    fn log_file_requires_value() {
        assert!(matches!(
            parse_args(&args(&["--log-file"])),
            Err(CliError::MissingValue(_))
        ));
        assert!(matches!(
            parse_args(&args(&["--log-file="])),
            Err(CliError::MissingValue(_))
        ));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = parse_args(&args(&["--verbose"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown option: --verbose");
    }

    #[test]
    fn interactive_rejects_positional_inputs() {
        let err = parse_args(&args(&["-i", "101"])).unwrap_err();
        assert!(matches!(err, CliError::InteractiveWithInputs));
        assert!(parse_args(&args(&["--", "101", "-i"])).is_ok());
    }

    #[test]
    fn decode_line_trims_and_checks_utf8() {
        assert_eq!(decode_line(b"  1101 \r", 1).unwrap(), "1101");
        assert_eq!(decode_line(b"", 2).unwrap(), "");
        let err = decode_line(b"\xff\xfe", 3).unwrap_err();
        assert!(matches!(err, CliError::NotUtf8 { line: 3 }));
        assert_eq!(err.to_string(), "line 3 is not valid UTF-8");
    }

    #[test]
    fn double_dash_ends_options() {
        let options = parse_args(&args(&["-q", "--", "-1", "--trace"])).unwrap();
        assert!(options.quiet);
        assert!(!options.trace);
        assert_eq!(options.inputs, vec!["-1", "--trace"]);
    }

    #[test]
    fn explicit_log_file_wins_over_env() {
        let options = CliOptions {
            log_file: Some(PathBuf::from("explicit.log")),
            ..CliOptions::default()
        }
        .with_env();
        assert_eq!(options.log_file, Some(PathBuf::from("explicit.log")));
    }

    #[test]
    fn open_log_file_creates_directories() {
        let dir = std::env::temp_dir().join(format!("modthree-cli-test-{}", process::id()));
        let path = dir.join("nested").join("fsm.log");
        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "record").unwrap();
        assert!(path.is_file());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn format_trace_joins_residues() {
        assert_eq!(
            format_trace(&[Residue::R0, Residue::R1, Residue::R2]),
            "0 -> 1 -> 2"
        );
        assert_eq!(format_trace(&[Residue::R0]), "0");
    }

    #[test]
    fn process_input_prints_result() {
        let mut handle = ModThreeHandle::new();
        let mut out = Vec::new();
        let ok = process_input(&mut handle, "1110", &CliOptions::default(), &mut out).unwrap();
        assert!(ok);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Remainder when 1110 is divided by 3: 2\n"
        );
    }

    #[test]
    fn process_input_quiet_and_trace() {
        let mut handle = ModThreeHandle::new();
        let options = CliOptions {
            quiet: true,
            trace: true,
            ..CliOptions::default()
        };
        let mut out = Vec::new();
        assert!(process_input(&mut handle, "110", &options, &mut out).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0\n  residues: 0 -> 1 -> 0 -> 0\n"
        );
    }

    #[test]
    fn process_input_rejects_without_output() {
        let mut handle = ModThreeHandle::new();
        let mut out = Vec::new();
        let ok = process_input(&mut handle, "1102", &CliOptions::default(), &mut out).unwrap();
        assert!(!ok);
        assert!(out.is_empty());
    }
}
