mod config;
mod pipe;
mod pretty;

use std::io::IsTerminal;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use colored::{control::set_override, Colorize};
use datespan_core::{DateOrder, DateParser, FixedClock, TimeZoneSpec};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::config::Config;
use crate::pretty::JsonRecord;

const LONG_ABOUT: &str = r##"
datespan turns loosely written date expressions into concrete dates and periods.

SUPPORTED INPUT:
  Relative days:  today, tomorrow, yesterday, now
  Weekdays:       friday, this friday, next friday, last friday
  Periods:        this week, next month, last year, current month
  Months:         march, next january, last december
  Dates:          January 15, 2020   jan 1st 2020   03/04/2020   the 5th of march
  Ranges:         A to B, A - B, A through B (bounds are ordered automatically)

EXAMPLES:
  datespan next friday                Day period for next Friday
  datespan last month                 Whole previous month
  datespan 'jan 1st - 03/04/2020'     Range between two dates
  datespan --single 'Dec 25'          A single date instead of a day period
  datespan --lenient 3/4/2020         Accept unpadded numbers
  datespan --json this week           Machine-readable output

PIPED INPUT:
  Each line of stdin is resolved on its own:
    cat dates.txt | datespan           One result per line
    cat dates.txt | datespan --json    JSON Lines output

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting       | CLI flag       | Env var                 | Default
  --------------|----------------|-------------------------|---------
  tz            | --tz           | DATESPAN_TZ             | local
  strict        | --lenient      | DATESPAN_STRICT         | true
  periods       | --no-periods   | DATESPAN_PERIODS        | true
  always_period | --single       | DATESPAN_ALWAYS_PERIOD  | true
  day_first     | --day-first    | DATESPAN_DAY_FIRST      | false
  no_color      | -C, --no-color | DATESPAN_NO_COLOR       | false

  Config file location: datespan --config-path
  Generate default config: datespan --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"##;

#[derive(Parser)]
#[command(name = "datespan")]
#[command(version)]
#[command(about = "Turn loose date expressions into concrete dates and periods")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// The expression to resolve
    ///
    /// Multiple words are joined with spaces, so quoting is optional:
    ///   datespan next friday
    ///   datespan 'jan 1 - feb 1'
    #[arg(value_name = "EXPRESSION", num_args = 0..)]
    input: Vec<String>,

    /// Output results as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// Do not split input into ranges
    #[arg(long)]
    no_periods: bool,

    /// Return single dates as dates instead of whole-day periods
    #[arg(long, short = 's')]
    single: bool,

    /// Match templates without the exact length check
    ///
    /// Accepts unpadded numbers (3/4/2020) and reads a two-digit year
    /// matched as a full year as 20xx.
    #[arg(long, short = 'l')]
    lenient: bool,

    /// Zone used to read "now" (local, utc, or an IANA name)
    #[arg(long, value_name = "ZONE")]
    tz: Option<String>,

    /// Prefer day-first readings of numeric dates
    #[arg(long)]
    day_first: bool,

    /// Resolve relative to this instant instead of the clock
    ///
    /// Accepts 2024-01-05, 2024-01-05T09:30:00 or "2024-01-05 09:30:00".
    #[arg(long, value_name = "DATETIME", value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    /// Print the normalized form of the input and exit
    #[arg(long)]
    normalize: bool,

    /// List templates in priority order
    #[arg(long)]
    templates: bool,

    /// List every relative phrase and what it currently means
    #[arg(long)]
    phrases: bool,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages, -vv shows trace messages.
    /// Useful for understanding why a template was or wasn't matched.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Show config file path
    #[arg(long)]
    config_path: bool,

    /// Generate default config file (see --config-path for location)
    #[arg(long)]
    config_init: bool,
}

/// Parse the `--now` override.
fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| format!("invalid date-time '{s}' (expected YYYY-MM-DD[THH:MM[:SS]])"))
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", "error".red().bold(), message);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    // Handle --config-path
    if cli.config_path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => fail("Cannot determine config directory"),
        }
        return;
    }

    // Handle --config-init
    if cli.config_init {
        match config::init_config() {
            Ok(path) => println!("Created config file: {}", path.display()),
            Err(e) => fail(e),
        }
        return;
    }

    // Initialize tracing based on verbosity level (before config loading for logging)
    let level = match cli.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    // Load config file and merge with CLI args
    // Precedence: CLI args > Environment vars > Config file > Defaults
    let file_config = Config::load();

    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    let mut parser_config = file_config.parser_config().unwrap_or_else(|e| fail(e));

    // CLI flags only ever override in one direction
    if let Some(ref tz) = cli.tz {
        let zone: TimeZoneSpec = tz.parse().unwrap_or_else(|e| fail(e));
        tracing::debug!("tz = {} (from CLI)", zone);
        parser_config.tz = zone;
    }
    if cli.lenient {
        tracing::debug!("strict = false (from CLI)");
        parser_config.strict = false;
    }
    if cli.no_periods {
        tracing::debug!("periods = false (from CLI)");
        parser_config.support_periods = false;
    }
    if cli.single {
        tracing::debug!("always_period = false (from CLI)");
        parser_config.always_return_period = false;
    }
    if cli.day_first {
        tracing::debug!("day_first = true (from CLI)");
        parser_config.date_order = DateOrder::DayFirst;
    }

    let no_color = cli.no_color || file_config.no_color();
    if no_color {
        set_override(false);
    }

    let mut parser = DateParser::with_config(parser_config).unwrap_or_else(|e| fail(e));
    if let Some(now) = cli.now {
        tracing::debug!("now = {} (from CLI)", now);
        parser = parser.with_clock(FixedClock(now));
    }

    if cli.templates {
        for line in pretty::format_templates(parser.templates()) {
            println!("{line}");
        }
        return;
    }

    if cli.phrases {
        for line in pretty::format_phrases(parser.phrases()) {
            println!("{line}");
        }
        return;
    }

    let stdin_is_pipe = !std::io::stdin().is_terminal();
    if cli.input.is_empty() {
        if !stdin_is_pipe {
            fail("no expression given (see --help)");
        }

        let pipe_config = pipe::PipeModeConfig {
            json: cli.json,
            normalize_only: cli.normalize,
        };
        match pipe::run_pipe_mode(&parser, &pipe_config) {
            Ok(summary) => tracing::debug!(
                resolved = summary.resolved,
                failed = summary.failed,
                "Pipe mode finished"
            ),
            Err(e) => fail(format!("Failed to read stdin: {e}")),
        }
        return;
    }

    let input = cli.input.join(" ");

    if cli.normalize {
        println!("{}", parser.normalize(&input));
        return;
    }

    let outcome = parser.resolve_cached(&input);

    if cli.json {
        let record = JsonRecord::new(&input, parser.normalize(&input), &outcome);
        match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        }
        if outcome.is_err() {
            std::process::exit(1);
        }
        return;
    }

    match outcome {
        Ok(resolved) => println!("{}", pretty::format_resolved(&resolved)),
        Err(e) => {
            eprintln!("{}", pretty::format_error(&e));
            std::process::exit(1);
        }
    }
}
