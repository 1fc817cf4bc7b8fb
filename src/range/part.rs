use std::str::FromStr;

use derive_more::Debug;
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_until},
    combinator::rest,
    sequence::separated_pair,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Constraint, Error, ParseError, Version, error};

/// A single alternative in a [`VersionRange`](crate::VersionRange).
///
/// Parts are written as:
/// - `VERSION` for [`RangePart::Exact`].
/// - `!VERSION` for [`RangePart::Exclude`].
/// - `START..!END` for [`RangePart::Interval`], where either bound may be left out.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum RangePart {
    /// Matches only this version.
    #[debug("{self}")]
    Exact(Version),

    /// Matches every version except this one.
    #[debug("{self}")]
    Exclude(Version),

    /// Matches versions from `start` (inclusive) up to `end` (exclusive).
    ///
    /// A missing bound is unbounded in that direction.
    #[debug("{self}")]
    Interval {
        /// The lowest matching version.
        start: Option<Version>,

        /// The first version above `start` that does not match.
        end: Option<Version>,
    },
}

impl RangePart {
    /// Parse a range part.
    pub fn parse(input: &str) -> Result<Self, Error> {
        fn interval(input: &str) -> IResult<&str, (&str, &str)> {
            separated_pair(take_until(".."), tag(".."), rest).parse(input)
        }

        if input.is_empty() {
            error::fatal!(ParseError::Empty)
        }

        if let Ok((_, (start, end))) = interval(input) {
            let start = match start {
                "" => None,
                start => Some(
                    Version::parse(start)
                        .map_err(|err| error::field!(input, "start" => (0, start.len()), err))?,
                ),
            };

            let end = match end {
                "" => None,
                end => {
                    let Some(version) = end.strip_prefix('!') else {
                        error::fatal!(ParseError::InclusiveEnd {
                            input: input.to_string(),
                            end: end.to_string(),
                            span: error::remainder(input, end).into(),
                        })
                    };
                    Some(Version::parse(version).map_err(
                        |err| error::field!(input, "end" => error::remainder(input, version), err),
                    )?)
                }
            };

            return Ok(Self::Interval { start, end });
        }

        if let Some(excluded) = input.strip_prefix('!') {
            return Version::parse(excluded)
                .map(Self::Exclude)
                .map_err(|err| error::field!(input, "excluded" => (1, excluded.len()), err).into());
        }

        Version::parse(input)
            .map(Self::Exact)
            .map_err(|err| error::field!(input, "exact" => (0, input.len()), err).into())
    }

    /// Whether the version is matched by this part.
    ///
    /// # Panics
    ///
    /// Ordering versions with template variables panics; see [`Version::try_cmp`].
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            Self::Exact(exact) => version == exact,
            Self::Exclude(excluded) => version != excluded,
            Self::Interval { start, end } => {
                start.as_ref().is_none_or(|start| version >= start)
                    && end.as_ref().is_none_or(|end| version < end)
            }
        }
    }

    /// Narrow this part to the versions also allowed by the constraint.
    ///
    /// Returns `None` if no version matched by this part is allowed.
    ///
    /// An [`RangePart::Exclude`] whose version lies inside the constraint
    /// is eliminated entirely instead of splitting the constraint in two,
    /// so the result may be narrower than the true intersection.
    pub fn intersect(&self, constraint: &Constraint) -> Option<Self> {
        match self {
            Self::Exact(exact) => constraint.contains(exact).then(|| self.clone()),
            Self::Exclude(excluded) if constraint.contains(excluded) => {
                warn!(%excluded, %constraint, "dropping range part: exclusion lies inside constraint");
                None
            }
            Self::Exclude(_) => Some(Self::Interval {
                start: constraint.not_before.clone(),
                end: constraint.before.clone(),
            }),
            Self::Interval { start, end } => {
                let start = match (start, &constraint.not_before) {
                    (Some(lhs), Some(rhs)) => Some(lhs.max(rhs)),
                    (lhs, rhs) => lhs.as_ref().or(rhs.as_ref()),
                };
                let end = match (end, &constraint.before) {
                    (Some(lhs), Some(rhs)) => Some(lhs.min(rhs)),
                    (lhs, rhs) => lhs.as_ref().or(rhs.as_ref()),
                };

                if let (Some(start), Some(end)) = (start, end) {
                    if start >= end {
                        return None;
                    }
                }

                Some(Self::Interval {
                    start: start.cloned(),
                    end: end.cloned(),
                })
            }
        }
    }
}

impl FromStr for RangePart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Version> for RangePart {
    fn from(version: Version) -> Self {
        Self::Exact(version)
    }
}

impl std::fmt::Display for RangePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(exact) => write!(f, "{exact}"),
            Self::Exclude(excluded) => write!(f, "!{excluded}"),
            Self::Interval { start, end } => {
                if let Some(start) = start {
                    write!(f, "{start}")?;
                }
                f.write_str("..")?;
                if let Some(end) = end {
                    write!(f, "!{end}")?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for RangePart {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RangePart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
