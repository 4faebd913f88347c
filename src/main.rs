use calver::{tag_type, Calver, Clock, CompositeError, Config, Date, DateError, DEFAULT_SEPARATOR};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Library(#[from] CompositeError),

    #[error("{0}")]
    Date(#[from] DateError),

    #[error("Unknown tag `{0}`")]
    UnknownTag(String),
}

/// Where to read today's date from. At most one may be given; UTC is the default.
#[derive(Args, Debug)]
#[group(required = false, multiple = false)]
struct DateArg {
    /// [DATE PROVIDER] Use the current UTC date to update calendar tags (default). Exclusive with
    /// other date providers.
    #[arg(long)]
    utc: bool,

    /// [DATE PROVIDER] Use the current local date to update calendar tags. Exclusive with other
    /// date providers.
    #[arg(long)]
    local: bool,

    /// [DATE PROVIDER] Use a date in format `YYYY-MM-DD` to update calendar tags. Exclusive with
    /// other date providers.
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<String>,
}

impl DateArg {
    fn clock(&self) -> Clock {
        if self.local {
            Clock::Local
        } else {
            Clock::Utc
        }
    }

    fn explicit_date(&self) -> Result<Option<Date>, CliError> {
        Ok(self.date.as_deref().map(str::parse::<Date>).transpose()?)
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints the version that follows `VERSION` when incrementing `LEVEL`.
    ///
    /// `LEVEL` is one to three `.`-joined levels among `CALENDAR`, `MAJOR`, `MINOR`, `PATCH`,
    /// `DEV`, `ALPHA`, `BETA` and `RC`, like `CALENDAR.PATCH` or `MINOR.RC`.
    ///
    /// # Date Providers
    ///
    /// Use one of `--utc`, `--local`, or `--date YYYY-MM-DD` to choose the date calendar tags are
    /// updated to.
    Inc {
        /// The version string to increment. Omit to start a new version.
        #[arg(default_value = "")]
        version: String,

        /// The format string of the version, like `YYYY.0M.PATCH`
        #[arg(short, long)]
        format: String,

        /// The levels to increment
        #[arg(short, long)]
        level: String,

        /// The separator between tags
        #[arg(short, long, default_value_t = DEFAULT_SEPARATOR)]
        separator: char,

        /// The value reset semantic tags and new modifier counters start at
        #[arg(long, default_value_t = 0)]
        start_from: u64,

        #[command(flatten)]
        date: DateArg,
    },

    /// Validates that a version matches a format
    Valid {
        /// The version string to validate
        version: String,

        /// The format string to validate against
        #[arg(short, long)]
        format: String,

        /// The separator between tags
        #[arg(short, long, default_value_t = DEFAULT_SEPARATOR)]
        separator: char,
    },

    /// Prints the family of a tag: `calendar`, `semantic` or `modifier`
    TagType {
        /// The tag name, like `0M` or `rc`
        tag: String,
    },
}

type Output = (String, i32);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed arguments");

    match run(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<Output, CliError> {
    match cli.command {
        Commands::Inc {
            version,
            format,
            level,
            separator,
            start_from,
            date,
        } => {
            let config = Config::default()
                .with_separator(separator)
                .with_clock(date.clock())
                .with_start_from(start_from);
            let calver = Calver::new(config);
            let next = match date.explicit_date()? {
                Some(date) => calver.inc_at(&format, &version, &level, &date)?,
                None => calver.inc(&format, &version, &level)?,
            };
            Ok((next, 0))
        }
        Commands::Valid {
            version,
            format,
            separator,
        } => {
            let calver = Calver::new(Config::default().with_separator(separator));
            Ok(if calver.is_valid(&format, &version) {
                ("true".to_string(), 0)
            } else {
                ("false".to_string(), 1)
            })
        }
        Commands::TagType { tag } => tag_type(&tag)
            .map(|tag_type| (tag_type.to_string(), 0))
            .ok_or(CliError::UnknownTag(tag)),
    }
}
