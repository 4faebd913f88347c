//! The three independent parts of a version: calendar, semantic and modifier.
//!
//! Each segment holds a fixed slot per tag of its family. A slot is `Some` when the version's
//! format contains that tag, and values are always serialized in the family's constant order.

use crate::{
    error::VersionError,
    tag::{Tag, TagType},
};
use chrono::NaiveDate;
use tracing::trace;

fn checked_value(tag: Tag, value: &str) -> Result<u64, VersionError> {
    let invalid = || VersionError::InvalidTagValue {
        tag: tag.name(),
        value: value.to_owned(),
    };
    if !tag.is_valid_value(value) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

fn unsupported(tag: Tag) -> VersionError {
    VersionError::UnsupportedLevel { level: tag.name() }
}

fn checked_inc(tag: Tag, value: u64) -> Result<u64, VersionError> {
    value
        .checked_add(1)
        .ok_or(VersionError::ValueOverflow { tag: tag.name() })
}

/// Calendar tag values, recomputed from a date on every increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CalendarSegment {
    values: [Option<u64>; 9],
    separator: char,
    has_changed: bool,
}

impl CalendarSegment {
    /// A segment holding `tags`, every value set to the `0` placeholder of an initial version.
    pub(crate) fn placeholder(tags: impl IntoIterator<Item = Tag>, separator: char) -> Self {
        let mut values = [None; 9];
        for tag in tags {
            values[tag.family_index()] = Some(0);
        }
        Self {
            values,
            separator,
            has_changed: false,
        }
    }

    /// Builds a segment from raw version string values, validating each against its tag.
    pub(crate) fn parse<'a>(
        values: impl IntoIterator<Item = (Tag, &'a str)>,
        separator: char,
    ) -> Result<Self, VersionError> {
        let mut segment = Self::placeholder(core::iter::empty(), separator);
        for (tag, value) in values {
            segment.values[tag.family_index()] = Some(checked_value(tag, value)?);
        }
        Ok(segment)
    }

    pub(crate) fn get(&self, tag: Tag) -> Option<u64> {
        match tag.tag_type() {
            TagType::Calendar => self.values[tag.family_index()],
            _ => None,
        }
    }

    /// Recomputes every held tag from `date`, and records whether the rendered segment changed.
    pub(crate) fn inc(&mut self, date: &NaiveDate) -> Result<(), VersionError> {
        let prev = self.to_string();

        for (slot, tag) in self.values.iter_mut().zip(Tag::CALENDAR) {
            if slot.is_some() {
                if let Some(value) = tag.value_from_date(date) {
                    *slot = Some(value?);
                }
            }
        }

        let next = self.to_string();
        trace!(%prev, %next, "recomputed calendar segment");
        self.has_changed = prev != next;
        Ok(())
    }

    /// True if the last [`inc`](Self::inc) changed the rendered segment.
    pub(crate) fn has_changed(&self) -> bool {
        self.has_changed
    }
}

impl core::fmt::Display for CalendarSegment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let rendered = Tag::CALENDAR
            .iter()
            .zip(self.values)
            .filter_map(|(tag, value)| value.map(|value| tag.format_value(value)))
            .collect::<Vec<_>>();
        let separator = self.separator.to_string();
        f.write_str(&rendered.join(separator.as_str()))
    }
}

/// `MAJOR`, `MINOR` and `PATCH` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SemanticSegment {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    start_from: u64,
}

impl SemanticSegment {
    /// A segment holding `tags`, every value set to the `0` placeholder of an initial version.
    pub(crate) fn placeholder(tags: impl IntoIterator<Item = Tag>, start_from: u64) -> Self {
        let mut segment = Self {
            major: None,
            minor: None,
            patch: None,
            start_from,
        };
        for tag in tags {
            if let Some(slot) = segment.slot_mut(tag) {
                *slot = Some(0);
            }
        }
        segment
    }

    /// Builds a segment from raw version string values, validating each against its tag.
    pub(crate) fn parse<'a>(
        values: impl IntoIterator<Item = (Tag, &'a str)>,
        start_from: u64,
    ) -> Result<Self, VersionError> {
        let mut segment = Self::placeholder(core::iter::empty(), start_from);
        for (tag, value) in values {
            let value = checked_value(tag, value)?;
            if let Some(slot) = segment.slot_mut(tag) {
                *slot = Some(value);
            }
        }
        Ok(segment)
    }

    fn slot_mut(&mut self, tag: Tag) -> Option<&mut Option<u64>> {
        match tag {
            Tag::Major => Some(&mut self.major),
            Tag::Minor => Some(&mut self.minor),
            Tag::Patch => Some(&mut self.patch),
            _ => None,
        }
    }

    pub(crate) fn get(&self, tag: Tag) -> Option<u64> {
        match tag {
            Tag::Major => self.major,
            Tag::Minor => self.minor,
            Tag::Patch => self.patch,
            _ => None,
        }
    }

    /// Increments `tag` and resets every held tag of lower precedence to the start value.
    ///
    /// # Errors
    ///
    /// - [`VersionError::UnsupportedLevel`] if this segment does not hold `tag`.
    /// - [`VersionError::ValueOverflow`] if `tag` is already at `u64::MAX`.
    pub(crate) fn inc(&mut self, tag: Tag) -> Result<(), VersionError> {
        let start_from = self.start_from;
        let slot = self
            .slot_mut(tag)
            .and_then(|slot| slot.as_mut())
            .ok_or_else(|| unsupported(tag))?;
        *slot = checked_inc(tag, *slot)?;

        let lower: &[Tag] = match tag {
            Tag::Major => &[Tag::Minor, Tag::Patch],
            Tag::Minor => &[Tag::Patch],
            _ => &[],
        };
        for &lower_tag in lower {
            if let Some(Some(value)) = self.slot_mut(lower_tag) {
                *value = start_from;
            }
        }
        Ok(())
    }

    /// Resets every held tag to the start value.
    pub(crate) fn reset(&mut self) {
        let start_from = self.start_from;
        for value in [&mut self.major, &mut self.minor, &mut self.patch]
            .into_iter()
            .flatten()
        {
            *value = start_from;
        }
    }
}

/// The single active pre-release tag and its counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModifierSegment {
    tag: Tag,
    /// `None` when the tag was not active in the previous version string.
    counter: Option<u64>,
    start_from: u64,
}

impl ModifierSegment {
    /// A segment for `tag` whose counter has not started yet.
    pub(crate) fn absent(tag: Tag, start_from: u64) -> Self {
        Self {
            tag,
            counter: None,
            start_from,
        }
    }

    /// Builds a segment for `tag` from the counter text found in a version string.
    pub(crate) fn parse(tag: Tag, counter: &str, start_from: u64) -> Result<Self, VersionError> {
        Ok(Self {
            tag,
            counter: Some(checked_value(tag, counter)?),
            start_from,
        })
    }

    pub(crate) fn tag(&self) -> Tag {
        self.tag
    }

    pub(crate) fn counter(&self) -> Option<u64> {
        self.counter
    }

    /// Starts the counter at the start value, or increments it if already started.
    ///
    /// # Errors
    ///
    /// - [`VersionError::UnsupportedLevel`] if `tag` is not this segment's active tag.
    /// - [`VersionError::ValueOverflow`] if the counter is already at `u64::MAX`.
    pub(crate) fn inc(&mut self, tag: Tag) -> Result<(), VersionError> {
        if tag != self.tag {
            return Err(unsupported(tag));
        }
        self.counter = Some(match self.counter {
            Some(counter) => checked_inc(tag, counter)?,
            None => self.start_from,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn semantic(values: [&str; 3]) -> SemanticSegment {
        let values = Tag::SEMANTIC.into_iter().zip(values);
        SemanticSegment::parse(values, 0).unwrap()
    }

    #[test]
    fn test_calendar_inc_recomputes_all_tags() {
        let mut segment = CalendarSegment::placeholder(Tag::CALENDAR, '.');
        segment.inc(&ymd(2024, 3, 5)).unwrap();
        assert_eq!("2024.24.24.3.03.10.10.5.05", segment.to_string());
        assert!(segment.has_changed());
    }

    #[test]
    fn test_calendar_has_changed() {
        let values = [(Tag::FullYear, "2024"), (Tag::ShortMonth, "3")];
        let mut segment = CalendarSegment::parse(values, '.').unwrap();

        segment.inc(&ymd(2024, 3, 28)).unwrap();
        assert!(!segment.has_changed());
        assert_eq!("2024.3", segment.to_string());

        segment.inc(&ymd(2024, 4, 1)).unwrap();
        assert!(segment.has_changed());
        assert_eq!("2024.4", segment.to_string());
    }

    #[test]
    fn test_calendar_leading_zero_month_is_not_a_change() {
        let values = [(Tag::FullYear, "2023"), (Tag::ShortMonth, "01")];
        let mut segment = CalendarSegment::parse(values, '.').unwrap();
        segment.inc(&ymd(2023, 1, 20)).unwrap();
        assert!(!segment.has_changed());
        assert_eq!(Some(1), segment.get(Tag::ShortMonth));
    }

    #[test]
    fn test_calendar_invalid_value() {
        let values = [(Tag::FullYear, "2023"), (Tag::ZeroPaddedMonth, "13")];
        let expected = VersionError::InvalidTagValue {
            tag: "0M",
            value: "13".to_string(),
        };
        assert_eq!(expected, CalendarSegment::parse(values, '.').unwrap_err());
    }

    #[test]
    fn test_calendar_negative_year() {
        let mut segment = CalendarSegment::placeholder([Tag::ShortYear], '.');
        assert_eq!(
            Err(VersionError::NegativeYear { year: -5 }),
            segment.inc(&ymd(-5, 1, 1))
        );
    }

    #[rstest]
    #[case(Tag::Major, [Some(2), Some(0), Some(0)])]
    #[case(Tag::Minor, [Some(1), Some(3), Some(0)])]
    #[case(Tag::Patch, [Some(1), Some(2), Some(4)])]
    fn test_semantic_inc(#[case] tag: Tag, #[case] expected: [Option<u64>; 3]) {
        let mut segment = semantic(["1", "2", "3"]);
        segment.inc(tag).unwrap();
        assert_eq!(expected, Tag::SEMANTIC.map(|tag| segment.get(tag)));
    }

    #[test]
    fn test_semantic_inc_resets_to_start_from() {
        let values = [(Tag::Major, "1"), (Tag::Minor, "7"), (Tag::Patch, "3")];
        let mut segment = SemanticSegment::parse(values, 1).unwrap();
        segment.inc(Tag::Minor).unwrap();
        assert_eq!(Some(1), segment.get(Tag::Major));
        assert_eq!(Some(8), segment.get(Tag::Minor));
        assert_eq!(Some(1), segment.get(Tag::Patch));
    }

    #[test]
    fn test_semantic_inc_skips_absent_lower_tags() {
        let values = [(Tag::Major, "4"), (Tag::Patch, "9")];
        let mut segment = SemanticSegment::parse(values, 0).unwrap();
        segment.inc(Tag::Major).unwrap();
        assert_eq!(None, segment.get(Tag::Minor));
        assert_eq!(Some(0), segment.get(Tag::Patch));
    }

    #[test]
    fn test_semantic_unsupported() {
        let mut segment = SemanticSegment::parse([(Tag::Major, "4")], 0).unwrap();
        assert_eq!(
            Err(VersionError::UnsupportedLevel { level: "MINOR" }),
            segment.inc(Tag::Minor)
        );
    }

    #[test]
    fn test_semantic_overflow() {
        let max = u64::MAX.to_string();
        let mut segment = semantic(["1", "2", &max]);
        assert_eq!(
            Err(VersionError::ValueOverflow { tag: "PATCH" }),
            segment.inc(Tag::Patch)
        );
        assert_eq!(Some(u64::MAX), segment.get(Tag::Patch));
    }

    #[test]
    fn test_semantic_reset() {
        let values = [(Tag::Minor, "4"), (Tag::Patch, "9")];
        let mut segment = SemanticSegment::parse(values, 3).unwrap();
        segment.reset();
        assert_eq!(None, segment.get(Tag::Major));
        assert_eq!(Some(3), segment.get(Tag::Minor));
        assert_eq!(Some(3), segment.get(Tag::Patch));
    }

    #[test]
    fn test_semantic_invalid_value() {
        let err = SemanticSegment::parse([(Tag::Major, "x")], 0).unwrap_err();
        let expected = VersionError::InvalidTagValue {
            tag: "MAJOR",
            value: "x".to_string(),
        };
        assert_eq!(expected, err);
    }

    #[test]
    fn test_modifier_lifecycle() {
        let mut segment = ModifierSegment::absent(Tag::Rc, 0);
        assert_eq!(None, segment.counter());

        segment.inc(Tag::Rc).unwrap();
        assert_eq!(Some(0), segment.counter());

        segment.inc(Tag::Rc).unwrap();
        assert_eq!(Some(1), segment.counter());

        assert_eq!(
            Err(VersionError::UnsupportedLevel { level: "BETA" }),
            segment.inc(Tag::Beta)
        );
    }

    #[test]
    fn test_modifier_parse() {
        let mut segment = ModifierSegment::parse(Tag::Alpha, "3", 0).unwrap();
        segment.inc(Tag::Alpha).unwrap();
        assert_eq!(Some(4), segment.counter());
        assert_eq!(Tag::Alpha, segment.tag());

        assert!(ModifierSegment::parse(Tag::Alpha, "x", 0).is_err());
    }

    #[test]
    fn test_modifier_overflow() {
        let max = u64::MAX.to_string();
        let mut segment = ModifierSegment::parse(Tag::Rc, &max, 0).unwrap();
        assert_eq!(
            Err(VersionError::ValueOverflow { tag: "RC" }),
            segment.inc(Tag::Rc)
        );
        assert_eq!(Some(u64::MAX), segment.counter());
    }
}
