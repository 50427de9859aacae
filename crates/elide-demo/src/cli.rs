#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `ELIDE_DEMO_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_TEXT: &str = "The quick brown fox jumps over the lazy dog while \
the five boxing wizards jump quickly and a wizard's job is to vex chumps quickly in fog.";

const HELP_TEXT: &str = "\
elide demo: a text box that trims itself to fit, word by word

USAGE:
    elide-demo [OPTIONS]

OPTIONS:
    --text=TEXT          Text to show (default: a pangram paragraph)
    --width=N            Box width in cells (default: terminal width - 4)
    --height=N           Box height in rows (default: 3)
    --ellipsis=TEXT      Ellipsis marker (default: ' ...')
    --debounce-ms=N      Coalesce resizes for N ms (default: 0, off)
    --no-mouse           Disable mouse hover tooltips
    --log=PATH           Write tracing output to PATH
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    + / -           Widen / narrow the box by one column
    ] / [           Add / remove a box row
    q / Esc         Quit

ENVIRONMENT VARIABLES:
    ELIDE_DEMO_TEXT           Override --text
    ELIDE_DEMO_WIDTH          Override --width
    ELIDE_DEMO_HEIGHT         Override --height
    ELIDE_DEMO_DEBOUNCE_MS    Override --debounce-ms
    ELIDE_DEMO_LOG            Override --log
    ELIDE_DEMO_LOG_FILTER     Tracing filter (default: elide_widgets=debug,elide_demo=debug)
    ELIDE_DEMO_EXIT_AFTER_MS  Auto-quit after N milliseconds (for testing)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Text shown in the box.
    pub text: String,
    /// Box width; `None` follows the terminal.
    pub width: Option<u16>,
    /// Box height in rows.
    pub height: u16,
    /// Ellipsis marker.
    pub ellipsis: String,
    /// Resize debounce delay in milliseconds (0 = disabled).
    pub debounce_ms: u64,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Tracing output file.
    pub log: Option<PathBuf>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.into(),
            width: None,
            height: 3,
            ellipsis: " ...".into(),
            debounce_ms: 0,
            mouse: true,
            log: None,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version`, or invalid input.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Parsed::Run(opts)) => opts,
            Ok(Parsed::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("elide-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment lookups through `var`.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse_from<I, F>(args: I, var: F) -> Result<Parsed, String>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = var("ELIDE_DEMO_TEXT") {
            opts.text = val;
        }
        if let Some(val) = var("ELIDE_DEMO_WIDTH")
            && let Ok(n) = val.parse()
        {
            opts.width = Some(n);
        }
        if let Some(val) = var("ELIDE_DEMO_HEIGHT")
            && let Ok(n) = val.parse()
        {
            opts.height = n;
        }
        if let Some(val) = var("ELIDE_DEMO_DEBOUNCE_MS")
            && let Ok(n) = val.parse()
        {
            opts.debounce_ms = n;
        }
        if let Some(val) = var("ELIDE_DEMO_LOG")
            && !val.is_empty()
        {
            opts.log = Some(PathBuf::from(val));
        }
        if let Some(val) = var("ELIDE_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--version" | "-V" => return Ok(Parsed::Version),
                "--no-mouse" => opts.mouse = false,
                other => {
                    if let Some(val) = other.strip_prefix("--text=") {
                        opts.text = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--width=") {
                        opts.width = Some(parse_number("--width", val)?);
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        opts.height = parse_number("--height", val)?;
                    } else if let Some(val) = other.strip_prefix("--ellipsis=") {
                        opts.ellipsis = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--debounce-ms=") {
                        opts.debounce_ms = parse_number("--debounce-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--log=") {
                        opts.log = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = parse_number("--exit-after-ms", val)?;
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Ok(Parsed::Run(opts))
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, val: &str) -> Result<T, String> {
    val.parse().map_err(|_| format!("Invalid {flag} value: {val}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Parsed, String> {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Opts::parse_from(args.iter().map(|a| a.to_string()), |key| {
            env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    fn run(args: &[&str], env: &[(&str, &str)]) -> Opts {
        match parse(args, env) {
            Ok(Parsed::Run(opts)) => opts,
            other => panic!("expected options, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.width, None);
        assert_eq!(opts.height, 3);
        assert_eq!(opts.ellipsis, " ...");
        assert_eq!(opts.debounce_ms, 0);
        assert!(opts.mouse);
        assert_eq!(opts.exit_after_ms, 0);
        assert_eq!(run(&[], &[]), opts);
    }

    #[test]
    fn flags_are_parsed() {
        let opts = run(
            &["--text=hi there", "--width=30", "--height=2", "--no-mouse", "--debounce-ms=20"],
            &[],
        );
        assert_eq!(opts.text, "hi there");
        assert_eq!(opts.width, Some(30));
        assert_eq!(opts.height, 2);
        assert!(!opts.mouse);
        assert_eq!(opts.debounce_ms, 20);
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let env = [("ELIDE_DEMO_WIDTH", "12"), ("ELIDE_DEMO_LOG", "/tmp/elide.log")];
        let opts = run(&[], &env);
        assert_eq!(opts.width, Some(12));
        assert_eq!(opts.log, Some(PathBuf::from("/tmp/elide.log")));

        let opts = run(&["--width=40"], &env);
        assert_eq!(opts.width, Some(40));
    }

    #[test]
    fn unparsable_env_values_are_ignored() {
        let opts = run(&[], &[("ELIDE_DEMO_HEIGHT", "tall")]);
        assert_eq!(opts.height, 3);
    }

    #[test]
    fn invalid_flag_value_is_an_error() {
        assert_eq!(
            parse(&["--width=wide"], &[]),
            Err("Invalid --width value: wide".to_string())
        );
        assert!(parse(&["--bogus"], &[]).is_err());
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["-h"], &[]), Ok(Parsed::Help));
        assert_eq!(parse(&["--version"], &[]), Ok(Parsed::Version));
        assert!(!VERSION.is_empty());
        assert!(HELP_TEXT.contains("ELIDE_DEMO_TEXT"));
    }
}
