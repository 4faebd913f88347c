use crate::date::Clock;

/// The separator used between tags when none is configured.
pub const DEFAULT_SEPARATOR: char = '.';

/// Settings shared by every call on a [`Calver`](crate::Calver).
///
/// ```
/// use calver::{Clock, Config};
///
/// let config = Config::default().with_separator('-').with_clock(Clock::Local);
/// assert_eq!('-', config.separator);
/// assert_eq!(0, config.start_from);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Delimiter between tags in format and version strings.
    pub separator: char,
    /// Where today's date is read from for calendar increments.
    pub clock: Clock,
    /// The value semantic tags are reset to, and modifier counters start at.
    pub start_from: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            clock: Clock::default(),
            start_from: 0,
        }
    }
}

impl Config {
    /// Set the separator between tags.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Set the clock read for calendar increments.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Read today's date in the system's local timezone instead of UTC.
    pub fn with_local_time(self, local: bool) -> Self {
        self.with_clock(if local { Clock::Local } else { Clock::Utc })
    }

    /// Set the start value for reset semantic tags and new modifier counters.
    pub fn with_start_from(mut self, start_from: u64) -> Self {
        self.start_from = start_from;
        self
    }
}
