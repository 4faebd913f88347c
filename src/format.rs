use crate::{
    error::FormatError,
    tag::{Tag, TagType},
};
use core::fmt::{self, Display};

/// A Format describes the structure of a version: an ordered sequence of tags joined by a
/// separator, like `YYYY.0M.MINOR`.
///
/// Only calendar and semantic tags may be written in a format string. Modifier tags become part of
/// a format when they are requested as increment levels.
///
/// ```
/// use calver::{Format, Tag};
///
/// let format = Format::parse("yyyy.0m.minor", '.').unwrap();
/// assert_eq!(&[Tag::FullYear, Tag::ZeroPaddedMonth, Tag::Minor], format.tags());
/// assert!(format.is_calendar_leading());
/// assert_eq!("YYYY.0M.MINOR", format.to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    tags: Vec<Tag>,
    separator: char,
}

impl Format {
    /// Parses a format string. Tags are separated by `separator` and matched case-insensitively.
    ///
    /// # Errors
    ///
    /// - [`FormatError::InvalidFormatTag`] if a piece is not a calendar or semantic tag. This
    ///   includes the empty format string and modifier tags.
    /// - [`FormatError::DuplicateFormatTag`] if a tag is given twice.
    pub fn parse(format_str: &str, separator: char) -> Result<Self, FormatError> {
        let mut tags: Vec<Tag> = Vec::new();

        for piece in format_str.split(separator) {
            let tag = Tag::from_name(piece)
                .filter(|tag| tag.tag_type() != TagType::Modifier)
                .ok_or_else(|| FormatError::InvalidFormatTag {
                    tag: piece.to_uppercase(),
                })?;
            if tags.contains(&tag) {
                return Err(FormatError::DuplicateFormatTag { tag: tag.name() });
            }
            tags.push(tag);
        }

        Ok(Self { tags, separator })
    }

    /// Appends modifier tags so that they become addressable in a version string.
    pub(crate) fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Tag>) -> Self {
        for tag in modifiers {
            if tag.tag_type() == TagType::Modifier && !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    /// The tags of this format, in order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The tags of this format that belong to `tag_type`, in order.
    pub fn tags_of(&self, tag_type: TagType) -> impl Iterator<Item = Tag> + '_ {
        self.tags
            .iter()
            .copied()
            .filter(move |tag| tag.tag_type() == tag_type)
    }

    /// True if the first tag is a calendar tag. Only calendar-leading formats reset their semantic
    /// tags when the calendar moves on.
    pub fn is_calendar_leading(&self) -> bool {
        self.tags
            .first()
            .is_some_and(|tag| tag.tag_type() == TagType::Calendar)
    }

    /// The separator between tags.
    pub fn separator(&self) -> char {
        self.separator
    }
}

impl Display for Format {
    /// Display a format as a normalized (upper-case) format string, including any modifier tags
    /// that were appended for an increment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, tag) in self.tags.iter().enumerate() {
            if index > 0 {
                write!(f, "{}", self.separator)?;
            }
            f.write_str(tag.name())?;
        }
        Ok(())
    }
}
