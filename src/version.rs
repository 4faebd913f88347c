use crate::{
    date::Date,
    error::VersionError,
    format::Format,
    level::{Level, Levels},
    segment::{CalendarSegment, ModifierSegment, SemanticSegment},
    tag::{Tag, TagType, MODIFIER_MARKER},
};
use core::fmt::{self, Display};
use tracing::{debug, trace};

/// The value recovered for one format tag while scanning a version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawValue<'vs> {
    /// Text found at this tag's position. Empty tokens are reported as `"0"`.
    Text(&'vs str),
    /// The version string ended before this tag was reached.
    Missing,
    /// The position held the marker of a different modifier tag.
    Inactive(&'vs str),
}

/// The result of scanning a version string against a [Format].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawVersion<'vs> {
    pub(crate) values: Vec<(Tag, RawValue<'vs>)>,
    /// The version string mentions a modifier tag name anywhere.
    pub(crate) has_modifier: bool,
    /// The version string is empty.
    pub(crate) is_initial: bool,
}

fn non_empty(text: &str) -> &str {
    if text.is_empty() {
        "0"
    } else {
        text
    }
}

fn mentions_modifier(version_str: &str) -> bool {
    let lower = version_str.to_ascii_lowercase();
    Tag::MODIFIER
        .iter()
        .any(|tag| lower.contains(&tag.name().to_ascii_lowercase()))
}

/// Walks `version_str` along the tags of `format`, recovering one raw value per tag.
///
/// Tokens end at the format's separator, or at the modifier marker when the token contains one.
/// A token naming the modifier tag being consumed yields the counter that follows it. Scanning
/// never fails: validation happens when the values are turned into segments.
pub(crate) fn parse_raw<'vs>(version_str: &'vs str, format: &Format) -> RawVersion<'vs> {
    let separator = format.separator();
    let mut values = Vec::with_capacity(format.tags().len());
    // byte offset of the next token, `None` once the string is exhausted
    let mut cursor = if version_str.is_empty() { None } else { Some(0) };

    for &tag in format.tags() {
        let Some(start) = cursor else {
            values.push((tag, RawValue::Missing));
            continue;
        };

        let rest = &version_str[start..];
        let mut end = rest.find(separator);
        let mut token = &rest[..end.unwrap_or(rest.len())];
        if let Some(marker) = token.find(MODIFIER_MARKER) {
            end = Some(marker);
            token = &rest[..marker];
        }

        let marked = Tag::from_name(token).filter(|t| t.tag_type() == TagType::Modifier);
        let value = match marked {
            Some(marked) if marked == tag => {
                // skip the tag name and the single character joining it to the counter
                let mut counter = rest[token.len()..].chars();
                counter.next();
                RawValue::Text(non_empty(counter.as_str()))
            }
            Some(_) => RawValue::Inactive(token),
            None => RawValue::Text(non_empty(token)),
        };
        values.push((tag, value));

        cursor = end.map(|end| {
            let boundary_len = rest[end..].chars().next().map_or(0, char::len_utf8);
            start + end + boundary_len
        });
    }

    RawVersion {
        values,
        has_modifier: mentions_modifier(version_str),
        is_initial: version_str.is_empty(),
    }
}

fn base_value<'vs>((tag, value): (Tag, RawValue<'vs>)) -> Result<(Tag, &'vs str), VersionError> {
    match value {
        RawValue::Text(text) => Ok((tag, text)),
        RawValue::Missing => Ok((tag, "0")),
        RawValue::Inactive(text) => Err(VersionError::InvalidTagValue {
            tag: tag.name(),
            value: text.to_owned(),
        }),
    }
}

/// A parsed version: zero or one of each of the calendar, semantic and modifier segments, laid
/// out by its [Format].
///
/// Versions are created with [`Calver::parse_version`](crate::Calver::parse_version), incremented
/// in place with [`Version::inc`], and rendered with [`Display`].
///
/// ```
/// use calver::{Calver, Date, Tag};
///
/// let calver = Calver::default();
/// let mut version = calver.parse_version("YYYY.0M.MINOR", "2023.12.4").unwrap();
/// assert_eq!(Some(12), version.get(Tag::ZeroPaddedMonth));
///
/// version.inc(&"CALENDAR.MINOR".parse().unwrap(), &Date::explicit(2024, 1, 2).unwrap()).unwrap();
/// assert_eq!("2024.01.0", version.to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    format: Format,
    calendar: Option<CalendarSegment>,
    semantic: Option<SemanticSegment>,
    modifier: Option<ModifierSegment>,
    has_modifier: bool,
    is_initial: bool,
}

impl Version {
    /// Parses `version_str` against `format`. An empty string is an initial version: every
    /// segment the format implies is seeded with placeholders instead of being validated.
    ///
    /// # Errors
    ///
    /// - [`VersionError::InvalidTagValue`] if a recovered value breaks its tag's rules.
    pub(crate) fn parse(
        version_str: &str,
        format: &Format,
        start_from: u64,
    ) -> Result<Self, VersionError> {
        let raw = parse_raw(version_str, format);
        trace!(?raw, "scanned version string");

        let separator = format.separator();
        let values_of = |tag_type: TagType| {
            raw.values
                .iter()
                .copied()
                .filter(move |(tag, _)| tag.tag_type() == tag_type)
        };

        let (calendar, semantic) = if raw.is_initial {
            (
                CalendarSegment::placeholder(format.tags_of(TagType::Calendar), separator),
                SemanticSegment::placeholder(format.tags_of(TagType::Semantic), start_from),
            )
        } else {
            let calendar = values_of(TagType::Calendar)
                .map(base_value)
                .collect::<Result<Vec<_>, _>>()?;
            let semantic = values_of(TagType::Semantic)
                .map(base_value)
                .collect::<Result<Vec<_>, _>>()?;
            (
                CalendarSegment::parse(calendar, separator)?,
                SemanticSegment::parse(semantic, start_from)?,
            )
        };

        // a level request addresses at most one modifier tag
        let modifier = values_of(TagType::Modifier)
            .last()
            .map(|(tag, value)| match value {
                RawValue::Text(counter) => ModifierSegment::parse(tag, counter, start_from),
                RawValue::Missing | RawValue::Inactive(_) => {
                    Ok(ModifierSegment::absent(tag, start_from))
                }
            })
            .transpose()?;

        let has_calendar = format.tags_of(TagType::Calendar).next().is_some();
        let has_semantic = format.tags_of(TagType::Semantic).next().is_some();

        Ok(Self {
            format: format.clone(),
            calendar: has_calendar.then_some(calendar),
            semantic: has_semantic.then_some(semantic),
            modifier,
            has_modifier: raw.has_modifier,
            is_initial: raw.is_initial,
        })
    }

    /// The format this version is laid out by, including any appended modifier tags.
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// The current value of `tag`, or `None` if this version does not hold it. For a modifier
    /// tag, this is its counter, which is `None` until the modifier is started.
    pub fn get(&self, tag: Tag) -> Option<u64> {
        match tag.tag_type() {
            TagType::Calendar => self.calendar.as_ref().and_then(|c| c.get(tag)),
            TagType::Semantic => self.semantic.as_ref().and_then(|s| s.get(tag)),
            TagType::Modifier => self
                .modifier
                .as_ref()
                .filter(|m| m.tag() == tag)
                .and_then(ModifierSegment::counter),
        }
    }

    /// True if the version string this was parsed from mentioned a modifier.
    pub fn has_modifier(&self) -> bool {
        self.has_modifier
    }

    /// True if this version was parsed from an empty string.
    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    /// Applies an increment request.
    ///
    /// - A single `CALENDAR`, `MAJOR`, `MINOR` or `PATCH` level on a version that had a modifier
    ///   only removes the modifier.
    /// - Otherwise the primary level is incremented. Then:
    ///   - with a semantic level, a calendar-leading format whose calendar changed resets its
    ///     semantic tags; if the calendar did not change and the version had no modifier, the
    ///     semantic level is bumped.
    ///   - without one, a calendar-leading format whose calendar changed resets its semantic tags.
    ///   - with a modifier level, that modifier is started or bumped.
    ///
    /// # Errors
    ///
    /// - [`VersionError::UnsupportedLevel`] if a level that must be bumped is not in the format.
    /// - [`VersionError::NegativeYear`] if `date` is before year 0.
    /// - [`VersionError::ValueOverflow`] if a bumped value is already at `u64::MAX`.
    pub fn inc(&mut self, levels: &Levels, date: &Date) -> Result<(), VersionError> {
        let primary = levels.primary();

        if levels.is_single() && !primary.is_modifier() && self.has_modifier {
            debug!(level = %primary, "removing modifier");
            self.modifier = None;
            return Ok(());
        }

        self.inc_level(primary, date)?;

        if let Some(modifier) = levels.modifier() {
            self.inc_level(modifier, date)?;
        }

        match levels.semantic() {
            Some(semantic) => self.reset_or_inc_semantic(semantic),
            None => {
                self.reset_if_calendar_changed();
                Ok(())
            }
        }
    }

    fn inc_level(&mut self, level: Level, date: &Date) -> Result<(), VersionError> {
        let unsupported = || VersionError::UnsupportedLevel {
            level: level.name(),
        };
        trace!(%level, "incrementing level");

        match level.tag() {
            None => self.calendar.as_mut().ok_or_else(unsupported)?.inc(date),
            Some(tag) if tag.tag_type() == TagType::Semantic => {
                self.semantic.as_mut().ok_or_else(unsupported)?.inc(tag)
            }
            Some(tag) => self.modifier.as_mut().ok_or_else(unsupported)?.inc(tag),
        }
    }

    fn calendar_changed(&self) -> bool {
        self.format.is_calendar_leading()
            && self
                .calendar
                .as_ref()
                .is_some_and(CalendarSegment::has_changed)
    }

    fn reset_if_calendar_changed(&mut self) {
        if self.calendar_changed() {
            if let Some(semantic) = self.semantic.as_mut() {
                debug!("calendar changed, resetting semantic tags");
                semantic.reset();
            }
        }
    }

    fn reset_or_inc_semantic(&mut self, level: Level) -> Result<(), VersionError> {
        let changed = self.calendar_changed();
        if !changed && self.has_modifier {
            return Ok(());
        }

        let unsupported = || VersionError::UnsupportedLevel {
            level: level.name(),
        };
        let semantic = self.semantic.as_mut().ok_or_else(unsupported)?;
        if changed {
            debug!("calendar changed, resetting semantic tags");
            semantic.reset();
            Ok(())
        } else {
            semantic.inc(level.tag().ok_or_else(unsupported)?)
        }
    }
}

impl Display for Version {
    /// Renders the version string. A modifier is written as `-<tag><separator><counter>` and
    /// directly follows the preceding value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = self.format.separator();
        let mut parts = Vec::with_capacity(self.format.tags().len());

        for &tag in self.format.tags() {
            if tag.tag_type() == TagType::Modifier {
                if let Some(counter) = self.get(tag) {
                    parts.push(format!(
                        "{}{}{}{}",
                        MODIFIER_MARKER,
                        tag.name().to_ascii_lowercase(),
                        separator,
                        counter
                    ));
                }
            } else if let Some(value) = self.get(tag) {
                parts.push(tag.format_value(value));
            }
        }

        let joined = parts.join(separator.to_string().as_str());
        let doubled = format!("{}{}", separator, MODIFIER_MARKER);
        f.write_str(&joined.replacen(&doubled, &MODIFIER_MARKER.to_string(), 1))
    }
}
