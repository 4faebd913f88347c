/// Errors raised while turning a format string into a [`Format`](crate::Format).
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum FormatError {
    /// The format references a tag that is neither a calendar nor a semantic tag.
    #[error("Invalid format tag `{tag}`")]
    InvalidFormatTag {
        /// The offending piece of the format string, upper-cased
        tag: String,
    },

    /// The same tag was given more than once.
    #[error("Format tag `{tag}` should appear at most once in format")]
    DuplicateFormatTag {
        /// The repeated tag
        tag: &'static str,
    },
}

/// Errors raised while parsing a level request such as `MINOR.RC`.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum LevelError {
    /// A level is not one of `CALENDAR`, `MAJOR`, `MINOR`, `PATCH`, `DEV`, `ALPHA`, `BETA`, `RC`.
    #[error("Invalid level `{level}`")]
    InvalidLevel {
        /// The level as given
        level: String,
    },

    /// More than three levels were given.
    #[error("At most 3 levels may be requested, but got {count}")]
    TooManyLevels {
        /// The number of levels given
        count: usize,
    },

    /// The second level is neither a modifier nor a semantic tag, or both the first and second
    /// levels are modifiers.
    #[error("The second level should be either a modifier or a semantic tag, but got `{second}` after `{first}`")]
    InvalidSecondLevel {
        /// The first level
        first: &'static str,
        /// The second level
        second: &'static str,
    },

    /// A three-level request is not shaped like `<primary>.<semantic>.<modifier>`.
    #[error("A three-level request should be a non-modifier, then a semantic tag, then a modifier tag, but the third level is `{third}`")]
    InvalidThirdLevel {
        /// The third level
        third: &'static str,
    },
}

/// Errors raised while reading or incrementing a version.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum VersionError {
    /// The requested level has no counterpart in the version's format.
    #[error("To increment `{level}`, it should be present in format")]
    UnsupportedLevel {
        /// The requested level
        level: &'static str,
    },

    /// A value in the version string does not satisfy its tag's rules.
    #[error("Tag `{tag}` has an invalid value `{value}`")]
    InvalidTagValue {
        /// The tag the value was read for
        tag: &'static str,
        /// The value as found in the version string
        value: String,
    },

    /// The date's year cannot be rendered by the year tags.
    #[error("Year `{year}` should not be negative when formatted")]
    NegativeYear {
        /// The year of the date
        year: i32,
    },

    /// Incrementing a value would exceed the largest representable number.
    #[error("Tag `{tag}` cannot be incremented past its maximum value")]
    ValueOverflow {
        /// The tag being incremented
        tag: &'static str,
    },

    /// Incrementing produced the same version string.
    #[error("Version should change, but did not when incrementing")]
    NoChange,
}

/// Errors raised while building a [`Date`](crate::Date).
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum DateError {
    /// The date string could not be parsed.
    #[error("Could not parse date: {0}")]
    UnparseableDate(#[from] chrono::ParseError),

    /// The explicit year, month, and day do not form a real date.
    #[error("Explicit year ({year}), month ({month}), and day ({day}) arguments cannot be made into a valid date")]
    InvalidDateArguments {
        /// Year
        year: i32,
        /// Month
        month: u32,
        /// Day
        day: u32,
    },
}

/// Any error the entry points of this crate may return.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum CompositeError {
    /// See [`FormatError`].
    #[error(transparent)]
    Format(#[from] FormatError),

    /// See [`LevelError`].
    #[error(transparent)]
    Level(#[from] LevelError),

    /// See [`VersionError`].
    #[error(transparent)]
    Version(#[from] VersionError),
}
