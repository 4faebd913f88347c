//! # calver
//!
//! A library for computing the next version of a project that mixes calendar, semantic and
//! pre-release parts, like `2024.03.2-rc.1`.
//!
//! A version is described by a *format*: a sequence of [tags](Tag) joined by a separator, such as
//! `YYYY.0M.PATCH`. Incrementing a version applies one to three *levels*, like `CALENDAR.PATCH` or
//! `MINOR.RC`, and renders the result back into a string.
//!
//! ## Examples
//!
//! Quickly get a next version:
//!
//! ```
//! use calver::prelude::*;
//!
//! let calver = Calver::default();
//! let today = Date::explicit(2024, 1, 2).unwrap();
//!
//! // the calendar moved on, so the semantic tags are reset
//! let next = calver.inc_at("YYYY.0M.PATCH", "2023.12.42", "CALENDAR.PATCH", &today).unwrap();
//! assert_eq!(next, "2024.01.0");
//!
//! // same month: the patch is bumped instead
//! let next = calver.inc_at("YYYY.0M.PATCH", "2024.01.0", "CALENDAR.PATCH", &today).unwrap();
//! assert_eq!(next, "2024.01.1");
//!
//! // start, bump and drop a pre-release
//! let next = calver.inc_at("MAJOR.MINOR", "2.0", "MINOR.RC", &today).unwrap();
//! assert_eq!(next, "2.1-rc.0");
//! let next = calver.inc_at("MAJOR.MINOR", "2.1-rc.0", "RC", &today).unwrap();
//! assert_eq!(next, "2.1-rc.1");
//! let next = calver.inc_at("MAJOR.MINOR", "2.1-rc.1", "MINOR", &today).unwrap();
//! assert_eq!(next, "2.1");
//! ```
//!
//! Use [`Calver::inc`] to read today's date from the configured [Clock] instead:
//!
//! ```
//! use calver::prelude::*;
//!
//! let calver = Calver::new(Config::default().with_clock(Clock::Local));
//! let next = calver.inc("MAJOR.MINOR.PATCH", "1.4.2", "PATCH").unwrap();
//! assert_eq!(next, "1.4.3");
//! ```
//!
//! ## Tags
//!
//! | Tag | Family | Description |
//! |---|---|---|
//! | `YYYY`, `YY`, `0Y` | calendar | Full year, year modulo 100, and the same zero-padded |
//! | `MM`, `0M` | calendar | Month, unpadded or zero-padded |
//! | `WW`, `0W` | calendar | ISO-8601 week, unpadded or zero-padded |
//! | `DD`, `0D` | calendar | Day of the month, unpadded or zero-padded |
//! | `MAJOR`, `MINOR`, `PATCH` | semantic | Counters, in decreasing precedence |
//! | `DEV`, `ALPHA`, `BETA`, `RC` | modifier | Pre-release marker, written as `-rc.0` |
//!
//! Modifier tags never appear in a format string. They become part of the format when requested
//! as a level.
//!
//! ## Levels
//!
//! | Request | Effect |
//! |---|---|
//! | `CALENDAR` | Recompute calendar tags from today. If they changed and the format starts with a calendar tag, reset the semantic tags. |
//! | `MAJOR`, `MINOR`, `PATCH` | Bump that tag and reset the ones below it. |
//! | `DEV`, `ALPHA`, `BETA`, `RC` | Start the modifier at the start value, or bump its counter. |
//! | `<level>.<modifier>` | Apply the first level, then the modifier. |
//! | `<level>.<semantic>` | Apply the first level. Bump the semantic tag only if the calendar did not move and the version had no modifier. |
//! | `<level>.<semantic>.<modifier>` | Both of the above. |
//!
//! A single non-modifier level on a version carrying a modifier only removes the modifier.
//!
//! ## Prelude
//!
//! calver provides a prelude module for convenience. Use it with:
//!
//! ```
//! use calver::prelude::*;
//! ```
#![warn(missing_docs)]

mod config;
mod date;
mod error;
mod format;
mod level;
mod segment;
mod tag;
mod version;

use tracing::debug;

pub use crate::config::{Config, DEFAULT_SEPARATOR};
pub use crate::date::{Clock, Date};
pub use crate::error::{CompositeError, DateError, FormatError, LevelError, VersionError};
pub use crate::format::Format;
pub use crate::level::{Level, Levels, LEVEL_SEPARATOR};
pub use crate::tag::{tag_type, Tag, TagType};
pub use crate::version::Version;

/// The entry point: increments and validates versions under one [Config].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calver {
    config: Config,
}

impl Calver {
    /// Returns a new [Calver] using `config`.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration of this instance.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Increments `version_str`, formatted by `format_str`, by the `.`-joined `levels_str`, reading
    /// today's date from the configured clock.
    ///
    /// An empty `version_str` is an initial version.
    ///
    /// # Errors
    ///
    /// See [`Calver::inc_at`].
    pub fn inc(
        &self,
        format_str: &str,
        version_str: &str,
        levels_str: &str,
    ) -> Result<String, CompositeError> {
        self.inc_at(
            format_str,
            version_str,
            levels_str,
            &self.config.clock.today(),
        )
    }

    /// Like [`Calver::inc`], with an explicit date for calendar tags.
    ///
    /// # Errors
    ///
    /// - [`LevelError`] if `levels_str` is not a valid request. Levels are checked first.
    /// - [`FormatError`] if `format_str` is not a valid format.
    /// - [`VersionError::InvalidTagValue`] if `version_str` does not match the format.
    /// - [`VersionError::UnsupportedLevel`] if a level has nothing to increment in the format.
    /// - [`VersionError::NegativeYear`] if `date` is before year 0.
    /// - [`VersionError::ValueOverflow`] if a bumped value is already at `u64::MAX`.
    /// - [`VersionError::NoChange`] if the result equals `version_str`.
    ///
    /// ```
    /// use calver::{Calver, CompositeError, Date, VersionError};
    ///
    /// let calver = Calver::default();
    /// let date = Date::explicit(2024, 3, 1).unwrap();
    /// let err = calver.inc_at("YYYY.MM", "2024.3", "CALENDAR", &date).unwrap_err();
    /// assert_eq!(CompositeError::Version(VersionError::NoChange), err);
    /// ```
    pub fn inc_at(
        &self,
        format_str: &str,
        version_str: &str,
        levels_str: &str,
        date: &Date,
    ) -> Result<String, CompositeError> {
        let levels: Levels = levels_str.parse()?;
        let format = Format::parse(format_str, self.config.separator)?
            .with_modifiers(levels.modifier_tags());
        let mut version = Version::parse(version_str, &format, self.config.start_from)?;

        version.inc(&levels, date)?;
        let next = version.to_string();
        debug!(%format, %levels, %date, prev = version_str, %next, "incremented version");

        if next == version_str {
            return Err(VersionError::NoChange.into());
        }
        Ok(next)
    }

    /// Returns true if `version_str` is non-empty and matches `format_str`. Never fails.
    ///
    /// ```
    /// use calver::Calver;
    ///
    /// let calver = Calver::default();
    /// assert!(calver.is_valid("YYYY.0M.MINOR", "2024.03.1"));
    /// assert!(!calver.is_valid("YYYY.0M.MINOR", "2024.3.1"));
    /// assert!(!calver.is_valid("YYYY.0M.MINOR", ""));
    /// assert!(!calver.is_valid("YYYY.FOO", "2024.1"));
    /// ```
    pub fn is_valid(&self, format_str: &str, version_str: &str) -> bool {
        !version_str.is_empty() && self.parse_version(format_str, version_str).is_ok()
    }

    /// Parses `version_str` against `format_str` without incrementing it.
    ///
    /// # Errors
    ///
    /// - [`FormatError`] if `format_str` is not a valid format.
    /// - [`VersionError::InvalidTagValue`] if `version_str` does not match the format.
    pub fn parse_version(
        &self,
        format_str: &str,
        version_str: &str,
    ) -> Result<Version, CompositeError> {
        let format = Format::parse(format_str, self.config.separator)?;
        let version = Version::parse(version_str, &format, self.config.start_from)?;
        Ok(version)
    }
}

/// A convenience module appropriate for glob imports (`use calver::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::tag_type;
    #[doc(no_inline)]
    pub use crate::Calver;
    #[doc(no_inline)]
    pub use crate::Clock;
    #[doc(no_inline)]
    pub use crate::CompositeError;
    #[doc(no_inline)]
    pub use crate::Config;
    #[doc(no_inline)]
    pub use crate::Date;
    #[doc(no_inline)]
    pub use crate::DateError;
    #[doc(no_inline)]
    pub use crate::Format;
    #[doc(no_inline)]
    pub use crate::FormatError;
    #[doc(no_inline)]
    pub use crate::Level;
    #[doc(no_inline)]
    pub use crate::LevelError;
    #[doc(no_inline)]
    pub use crate::Levels;
    #[doc(no_inline)]
    pub use crate::Tag;
    #[doc(no_inline)]
    pub use crate::TagType;
    #[doc(no_inline)]
    pub use crate::Version;
    #[doc(no_inline)]
    pub use crate::VersionError;
}
