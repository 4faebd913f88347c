use crate::error::VersionError;
use chrono::{Datelike, NaiveDate};
use core::fmt::{self, Display};

/// The character that introduces a modifier in a version string, as in `1.2-rc.0`.
pub(crate) const MODIFIER_MARKER: char = '-';

/// The family a [`Tag`] belongs to. Every tag belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    /// Tags derived from the current date, like `YYYY` or `0M`.
    Calendar,
    /// `MAJOR`, `MINOR` and `PATCH`.
    Semantic,
    /// Pre-release tags: `DEV`, `ALPHA`, `BETA` and `RC`.
    Modifier,
}

impl TagType {
    /// Returns the lowercase name of the family.
    pub fn name(&self) -> &'static str {
        match self {
            TagType::Calendar => "calendar",
            TagType::Semantic => "semantic",
            TagType::Modifier => "modifier",
        }
    }
}

impl Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tag of a format, like `YYYY`, `MINOR` or `RC`.
///
/// | Tag | Example (`2001-02-03`, major `1`) | Family | Description |
/// |---|---|---|---|
/// | `YYYY` | `2001` | calendar | Full year |
/// | `YY` | `1` | calendar | Year modulo 100 |
/// | `0Y` | `01` | calendar | Same as `YY`, zero-padded to 2 digits |
/// | `MM` | `2` | calendar | Month (`1`–`12`) |
/// | `0M` | `02` | calendar | Same as `MM`, zero-padded to 2 digits |
/// | `WW` | `5` | calendar | ISO-8601 week of the year (`1`–`53`) |
/// | `0W` | `05` | calendar | Same as `WW`, zero-padded to 2 digits |
/// | `DD` | `3` | calendar | Day of the month (`1`–`31`) |
/// | `0D` | `03` | calendar | Same as `DD`, zero-padded to 2 digits |
/// | `MAJOR` | `1` | semantic | |
/// | `MINOR` | | semantic | |
/// | `PATCH` | | semantic | |
/// | `DEV`, `ALPHA`, `BETA`, `RC` | `-rc.0` | modifier | Pre-release marker and counter |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `YYYY`
    FullYear,
    /// `YY`
    ShortYear,
    /// `0Y`
    ZeroPaddedYear,
    /// `MM`
    ShortMonth,
    /// `0M`
    ZeroPaddedMonth,
    /// `WW`
    ShortWeek,
    /// `0W`
    ZeroPaddedWeek,
    /// `DD`
    ShortDay,
    /// `0D`
    ZeroPaddedDay,
    /// `MAJOR`
    Major,
    /// `MINOR`
    Minor,
    /// `PATCH`
    Patch,
    /// `DEV`
    Dev,
    /// `ALPHA`
    Alpha,
    /// `BETA`
    Beta,
    /// `RC`
    Rc,
}

impl Tag {
    /// Calendar tags, in the order their values are serialized.
    pub const CALENDAR: [Tag; 9] = [
        Tag::FullYear,
        Tag::ShortYear,
        Tag::ZeroPaddedYear,
        Tag::ShortMonth,
        Tag::ZeroPaddedMonth,
        Tag::ShortWeek,
        Tag::ZeroPaddedWeek,
        Tag::ShortDay,
        Tag::ZeroPaddedDay,
    ];

    /// Semantic tags, from highest to lowest precedence.
    pub const SEMANTIC: [Tag; 3] = [Tag::Major, Tag::Minor, Tag::Patch];

    /// Modifier tags.
    pub const MODIFIER: [Tag; 4] = [Tag::Dev, Tag::Alpha, Tag::Beta, Tag::Rc];

    /// Returns the upper-case name used for this tag in format strings.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::FullYear => "YYYY",
            Tag::ShortYear => "YY",
            Tag::ZeroPaddedYear => "0Y",
            Tag::ShortMonth => "MM",
            Tag::ZeroPaddedMonth => "0M",
            Tag::ShortWeek => "WW",
            Tag::ZeroPaddedWeek => "0W",
            Tag::ShortDay => "DD",
            Tag::ZeroPaddedDay => "0D",
            Tag::Major => "MAJOR",
            Tag::Minor => "MINOR",
            Tag::Patch => "PATCH",
            Tag::Dev => "DEV",
            Tag::Alpha => "ALPHA",
            Tag::Beta => "BETA",
            Tag::Rc => "RC",
        }
    }

    /// Returns the family of this tag.
    pub fn tag_type(&self) -> TagType {
        match self {
            Tag::FullYear
            | Tag::ShortYear
            | Tag::ZeroPaddedYear
            | Tag::ShortMonth
            | Tag::ZeroPaddedMonth
            | Tag::ShortWeek
            | Tag::ZeroPaddedWeek
            | Tag::ShortDay
            | Tag::ZeroPaddedDay => TagType::Calendar,
            Tag::Major | Tag::Minor | Tag::Patch => TagType::Semantic,
            Tag::Dev | Tag::Alpha | Tag::Beta | Tag::Rc => TagType::Modifier,
        }
    }

    /// Looks up a tag by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Tag> {
        Self::CALENDAR
            .iter()
            .chain(Self::SEMANTIC.iter())
            .chain(Self::MODIFIER.iter())
            .find(|tag| tag.name().eq_ignore_ascii_case(name))
            .copied()
    }

    /// Position of this tag within its family's constant order.
    pub(crate) fn family_index(&self) -> usize {
        let family: &[Tag] = match self.tag_type() {
            TagType::Calendar => &Self::CALENDAR,
            TagType::Semantic => &Self::SEMANTIC,
            TagType::Modifier => &Self::MODIFIER,
        };
        // every tag is listed in its own family
        family
            .iter()
            .position(|tag| tag == self)
            .unwrap_or_default()
    }

    fn zero_pad_len(&self) -> Option<usize> {
        match self {
            Tag::ZeroPaddedYear
            | Tag::ZeroPaddedMonth
            | Tag::ZeroPaddedWeek
            | Tag::ZeroPaddedDay => Some(2),
            _ => None,
        }
    }

    /// Renders a value the way this tag is written in a version string.
    pub(crate) fn format_value(&self, value: u64) -> String {
        match self.zero_pad_len() {
            Some(len) => format!("{:0len$}", value, len = len),
            None => value.to_string(),
        }
    }

    /// Checks that `value` has the shape and range this tag allows in a version string.
    pub(crate) fn is_valid_value(&self, value: &str) -> bool {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        let Ok(number) = value.parse::<u64>() else {
            return false;
        };
        let leading_zero = value.starts_with('0');

        match self {
            Tag::FullYear => value.len() == 4 && !leading_zero,
            Tag::ShortYear => (1..=3).contains(&value.len()) && (value == "0" || !leading_zero),
            Tag::ZeroPaddedYear => value.len() == 2 || (value.len() == 3 && !leading_zero),
            Tag::ShortMonth => (1..=12).contains(&number),
            Tag::ZeroPaddedMonth => value.len() == 2 && (1..=12).contains(&number),
            Tag::ShortWeek => (1..=53).contains(&number),
            Tag::ZeroPaddedWeek => value.len() == 2 && (1..=53).contains(&number),
            Tag::ShortDay => (1..=31).contains(&number),
            Tag::ZeroPaddedDay => value.len() == 2 && (1..=31).contains(&number),
            // semantic values and modifier counters only need to be digits
            _ => true,
        }
    }

    /// Computes the value of a calendar tag for `date`. Returns `None` for non-calendar tags.
    pub(crate) fn value_from_date(&self, date: &NaiveDate) -> Option<Result<u64, VersionError>> {
        let value = match self {
            Tag::FullYear => full_year(date),
            Tag::ShortYear | Tag::ZeroPaddedYear => short_year(date),
            Tag::ShortMonth | Tag::ZeroPaddedMonth => Ok(u64::from(date.month())),
            Tag::ShortWeek | Tag::ZeroPaddedWeek => Ok(u64::from(date.iso_week().week())),
            Tag::ShortDay | Tag::ZeroPaddedDay => Ok(u64::from(date.day())),
            _ => return None,
        };
        Some(value)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn full_year(date: &NaiveDate) -> Result<u64, VersionError> {
    let year = date.year();
    u64::try_from(year).map_err(|_| VersionError::NegativeYear { year })
}

fn short_year(date: &NaiveDate) -> Result<u64, VersionError> {
    full_year(date).map(|year| year % 100)
}

/// Returns the family of the tag named `tag` (case-insensitive), or `None` if no such tag exists.
///
/// ```
/// use calver::{tag_type, TagType};
///
/// assert_eq!(tag_type("yyyy"), Some(TagType::Calendar));
/// assert_eq!(tag_type("MINOR"), Some(TagType::Semantic));
/// assert_eq!(tag_type("rc"), Some(TagType::Modifier));
/// assert_eq!(tag_type("nope"), None);
/// ```
pub fn tag_type(tag: &str) -> Option<TagType> {
    Tag::from_name(tag).map(|tag| tag.tag_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[rstest]
    #[case("yyyy", Some(TagType::Calendar))]
    #[case("0w", Some(TagType::Calendar))]
    #[case("Major", Some(TagType::Semantic))]
    #[case("PATCH", Some(TagType::Semantic))]
    #[case("alpha", Some(TagType::Modifier))]
    #[case("RC", Some(TagType::Modifier))]
    #[case("CALENDAR", None)]
    #[case("", None)]
    fn test_tag_type(#[case] name: &str, #[case] expected: Option<TagType>) {
        assert_eq!(expected, tag_type(name));
    }

    #[test]
    fn test_families_are_disjoint_and_indexed() {
        for (index, tag) in Tag::CALENDAR.iter().enumerate() {
            assert_eq!(TagType::Calendar, tag.tag_type());
            assert_eq!(index, tag.family_index());
        }
        for (index, tag) in Tag::SEMANTIC.iter().enumerate() {
            assert_eq!(TagType::Semantic, tag.tag_type());
            assert_eq!(index, tag.family_index());
        }
        for (index, tag) in Tag::MODIFIER.iter().enumerate() {
            assert_eq!(TagType::Modifier, tag.tag_type());
            assert_eq!(index, tag.family_index());
        }
    }

    #[rstest]
    #[case(Tag::FullYear, ymd(2006, 1, 1), 2006)]
    #[case(Tag::ShortYear, ymd(2006, 1, 1), 6)]
    #[case(Tag::ShortYear, ymd(2106, 1, 1), 6)]
    #[case(Tag::ZeroPaddedYear, ymd(2016, 1, 1), 16)]
    #[case(Tag::ShortMonth, ymd(2024, 11, 3), 11)]
    #[case(Tag::ShortDay, ymd(2024, 11, 3), 3)]
    // 2021-01-01 is a Friday, so it belongs to the last ISO week of 2020
    #[case(Tag::ShortWeek, ymd(2021, 1, 1), 53)]
    // 2024-12-30 is a Monday whose Thursday is in 2025
    #[case(Tag::ShortWeek, ymd(2024, 12, 30), 1)]
    #[case(Tag::ZeroPaddedWeek, ymd(2024, 2, 10), 6)]
    fn test_value_from_date(#[case] tag: Tag, #[case] date: NaiveDate, #[case] expected: u64) {
        assert_eq!(Some(Ok(expected)), tag.value_from_date(&date));
    }

    #[test]
    fn test_value_from_date_negative_year() {
        let date = ymd(-1, 1, 1);
        for tag in [Tag::FullYear, Tag::ShortYear, Tag::ZeroPaddedYear] {
            assert_eq!(
                Some(Err(VersionError::NegativeYear { year: -1 })),
                tag.value_from_date(&date)
            );
        }
        assert_eq!(None, Tag::Major.value_from_date(&date));
    }

    #[rstest]
    #[case(Tag::ShortMonth, 3, "3")]
    #[case(Tag::ZeroPaddedMonth, 3, "03")]
    #[case(Tag::ZeroPaddedYear, 0, "00")]
    #[case(Tag::ZeroPaddedDay, 31, "31")]
    #[case(Tag::Major, 120, "120")]
    fn test_format_value(#[case] tag: Tag, #[case] value: u64, #[case] expected: &str) {
        assert_eq!(expected, tag.format_value(value));
    }

    #[rstest]
    #[case(Tag::FullYear, "2024", true)]
    #[case(Tag::FullYear, "0202", false)]
    #[case(Tag::FullYear, "202", false)]
    #[case(Tag::ShortYear, "0", true)]
    #[case(Tag::ShortYear, "24", true)]
    #[case(Tag::ShortYear, "04", false)]
    #[case(Tag::ZeroPaddedYear, "04", true)]
    #[case(Tag::ZeroPaddedYear, "4", false)]
    #[case(Tag::ShortMonth, "12", true)]
    #[case(Tag::ShortMonth, "13", false)]
    #[case(Tag::ShortMonth, "0", false)]
    #[case(Tag::ZeroPaddedMonth, "01", true)]
    #[case(Tag::ZeroPaddedMonth, "1", false)]
    #[case(Tag::ShortWeek, "53", true)]
    #[case(Tag::ZeroPaddedWeek, "54", false)]
    #[case(Tag::ShortDay, "31", true)]
    #[case(Tag::ZeroPaddedDay, "32", false)]
    #[case(Tag::Minor, "0", true)]
    #[case(Tag::Minor, "", false)]
    #[case(Tag::Minor, "1a", false)]
    #[case(Tag::Rc, "-1", false)]
    fn test_is_valid_value(#[case] tag: Tag, #[case] value: &str, #[case] expected: bool) {
        assert_eq!(expected, tag.is_valid_value(value));
    }
}
