use crate::{error::LevelError, tag::Tag};
use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// Delimiter between the levels of a request, as in `CALENDAR.MINOR.RC`.
pub const LEVEL_SEPARATOR: char = '.';

/// A named target of an increment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Recompute all calendar tags from the current date.
    Calendar,
    /// Bump `MAJOR`.
    Major,
    /// Bump `MINOR`.
    Minor,
    /// Bump `PATCH`.
    Patch,
    /// Bump or attach the `dev` modifier.
    Dev,
    /// Bump or attach the `alpha` modifier.
    Alpha,
    /// Bump or attach the `beta` modifier.
    Beta,
    /// Bump or attach the `rc` modifier.
    Rc,
}

impl Level {
    /// Every level, in vocabulary order.
    pub const ALL: [Level; 8] = [
        Level::Calendar,
        Level::Major,
        Level::Minor,
        Level::Patch,
        Level::Dev,
        Level::Alpha,
        Level::Beta,
        Level::Rc,
    ];

    /// Returns the upper-case name of this level.
    pub fn name(&self) -> &'static str {
        match self.tag() {
            Some(tag) => tag.name(),
            None => "CALENDAR",
        }
    }

    /// Returns the tag this level targets. `CALENDAR` targets the whole calendar segment and
    /// has no single tag.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Level::Calendar => None,
            Level::Major => Some(Tag::Major),
            Level::Minor => Some(Tag::Minor),
            Level::Patch => Some(Tag::Patch),
            Level::Dev => Some(Tag::Dev),
            Level::Alpha => Some(Tag::Alpha),
            Level::Beta => Some(Tag::Beta),
            Level::Rc => Some(Tag::Rc),
        }
    }

    pub(crate) fn is_semantic(&self) -> bool {
        matches!(self, Level::Major | Level::Minor | Level::Patch)
    }

    pub(crate) fn is_modifier(&self) -> bool {
        matches!(self, Level::Dev | Level::Alpha | Level::Beta | Level::Rc)
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| LevelError::InvalidLevel {
                level: s.to_owned(),
            })
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated increment request of one to three levels.
///
/// The request reads as "primary target, optional semantic cascade target, optional modifier
/// target":
///
/// | Request | `primary` | `semantic` | `modifier` |
/// |---|---|---|---|
/// | `MINOR` | `MINOR` | | |
/// | `MINOR.RC` | `MINOR` | | `RC` |
/// | `CALENDAR.PATCH` | `CALENDAR` | `PATCH` | |
/// | `CALENDAR.PATCH.RC` | `CALENDAR` | `PATCH` | `RC` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Levels {
    pub(crate) primary: Level,
    pub(crate) semantic: Option<Level>,
    pub(crate) modifier: Option<Level>,
}

impl Levels {
    /// The level whose segment is always incremented.
    pub fn primary(&self) -> Level {
        self.primary
    }

    /// The semantic level bumped when the calendar did not cascade, if any.
    pub fn semantic(&self) -> Option<Level> {
        self.semantic
    }

    /// The modifier level bumped or attached alongside the primary one, if any.
    pub fn modifier(&self) -> Option<Level> {
        self.modifier
    }

    /// True if this request is a single level.
    pub fn is_single(&self) -> bool {
        self.semantic.is_none() && self.modifier.is_none()
    }

    /// Modifier tags this request addresses. These are appended to the format so the version
    /// parser can recover them.
    pub(crate) fn modifier_tags(&self) -> impl Iterator<Item = Tag> {
        [Some(self.primary), self.modifier]
            .into_iter()
            .flatten()
            .filter(Level::is_modifier)
            .filter_map(|level| level.tag())
    }

    fn from_parts(parts: &[Level]) -> Result<Self, LevelError> {
        match *parts {
            [primary] => Ok(Self {
                primary,
                semantic: None,
                modifier: None,
            }),
            [primary, second] => {
                if second.is_modifier() && !primary.is_modifier() {
                    Ok(Self {
                        primary,
                        semantic: None,
                        modifier: Some(second),
                    })
                } else if second.is_semantic() {
                    Ok(Self {
                        primary,
                        semantic: Some(second),
                        modifier: None,
                    })
                } else {
                    Err(LevelError::InvalidSecondLevel {
                        first: primary.name(),
                        second: second.name(),
                    })
                }
            }
            [primary, second, third] => {
                if second.is_semantic() && third.is_modifier() && !primary.is_modifier() {
                    Ok(Self {
                        primary,
                        semantic: Some(second),
                        modifier: Some(third),
                    })
                } else {
                    Err(LevelError::InvalidThirdLevel {
                        third: third.name(),
                    })
                }
            }
            _ => Err(LevelError::TooManyLevels { count: parts.len() }),
        }
    }
}

impl FromStr for Levels {
    type Err = LevelError;

    /// Parses a `.`-joined, case-insensitive list of levels, like `minor.rc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(LEVEL_SEPARATOR)
            .map(Level::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parts(&parts)
    }
}

impl Display for Levels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        for level in [self.semantic, self.modifier].into_iter().flatten() {
            write!(f, "{}{}", LEVEL_SEPARATOR, level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("calendar", Level::Calendar)]
    #[case("MAJOR", Level::Major)]
    #[case("Minor", Level::Minor)]
    #[case("rc", Level::Rc)]
    fn test_level_from_str(#[case] input: &str, #[case] expected: Level) {
        assert_eq!(Ok(expected), input.parse::<Level>());
    }

    #[rstest]
    #[case("MINOR", Level::Minor, None, None)]
    #[case("minor.rc", Level::Minor, None, Some(Level::Rc))]
    #[case("CALENDAR.DEV", Level::Calendar, None, Some(Level::Dev))]
    #[case("CALENDAR.PATCH", Level::Calendar, Some(Level::Patch), None)]
    #[case("RC.MINOR", Level::Rc, Some(Level::Minor), None)]
    #[case("MAJOR.MINOR", Level::Major, Some(Level::Minor), None)]
    #[case(
        "calendar.minor.beta",
        Level::Calendar,
        Some(Level::Minor),
        Some(Level::Beta)
    )]
    fn test_levels_ok(
        #[case] input: &str,
        #[case] primary: Level,
        #[case] semantic: Option<Level>,
        #[case] modifier: Option<Level>,
    ) {
        let levels: Levels = input.parse().unwrap();
        assert_eq!(primary, levels.primary());
        assert_eq!(semantic, levels.semantic());
        assert_eq!(modifier, levels.modifier());
        assert_eq!(input.to_ascii_uppercase(), levels.to_string());
    }

    #[test]
    fn test_levels_err() {
        use LevelError::*;

        let args = [
            (
                "",
                InvalidLevel {
                    level: "".to_string(),
                },
            ),
            (
                "MAJOR.HUGE",
                InvalidLevel {
                    level: "HUGE".to_string(),
                },
            ),
            (
                "MAJOR.CALENDAR",
                InvalidSecondLevel {
                    first: "MAJOR",
                    second: "CALENDAR",
                },
            ),
            (
                "RC.BETA",
                InvalidSecondLevel {
                    first: "RC",
                    second: "BETA",
                },
            ),
            ("MAJOR.MINOR.PATCH", InvalidThirdLevel { third: "PATCH" }),
            ("RC.MINOR.BETA", InvalidThirdLevel { third: "BETA" }),
            ("MAJOR.CALENDAR.RC", InvalidThirdLevel { third: "RC" }),
            ("MAJOR.MINOR.PATCH.RC", TooManyLevels { count: 4 }),
        ];

        for (input, err) in args {
            assert_eq!(Err(err), input.parse::<Levels>());
        }
    }

    #[test]
    fn test_modifier_tags() {
        let levels: Levels = "MINOR.RC".parse().unwrap();
        assert_eq!(vec![Tag::Rc], levels.modifier_tags().collect::<Vec<_>>());

        let levels: Levels = "BETA".parse().unwrap();
        assert_eq!(vec![Tag::Beta], levels.modifier_tags().collect::<Vec<_>>());

        let levels: Levels = "CALENDAR.PATCH".parse().unwrap();
        assert_eq!(0, levels.modifier_tags().count());
    }
}
