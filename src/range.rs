use std::{
    borrow::{Borrow, Cow},
    str::FromStr,
};

use derive_more::Debug;
use documented::Documented;
use duplicate::duplicate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{ObjectBuilder, Type},
};

use crate::{Constraint, Error, ParseError, Version, error};

mod part;

pub use part::*;

/// A set of versions, written as `|`-separated alternatives like `1.0..!2.0|!1.5|3.0`.
///
/// A version matches the range if it matches any of its [`RangePart`]s.
/// A range with no parts (the [`Default`]) is unconstrained and matches every version,
/// while [`VersionRange::none`] matches no version at all.
///
/// Ranges keep their parts in the order written:
/// two ranges covering the same versions with differently ordered parts are not equal.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug, Documented)]
#[debug("{self}")]
pub struct VersionRange(Vec<RangePart>);

impl VersionRange {
    /// Parse a range.
    ///
    /// Empty input is rejected; use [`VersionRange::default`] for the unconstrained range.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, Error> {
        input.as_ref().parse()
    }

    /// Parse a range, returning `None` if it is invalid.
    pub fn try_parse(input: impl AsRef<str>) -> Option<Self> {
        Self::parse(input).ok()
    }

    /// The range which matches no version, written `0..!0`.
    pub fn none() -> Self {
        Self::between(
            Some(Version::from_segments([0])),
            Some(Version::from_segments([0])),
        )
    }

    /// The range of versions from `not_before` (inclusive) up to `before` (exclusive).
    pub fn between(not_before: Option<Version>, before: Option<Version>) -> Self {
        Self(vec![RangePart::Interval {
            start: not_before,
            end: before,
        }])
    }

    /// View the parts of the range.
    pub fn parts(&self) -> &[RangePart] {
        &self.0
    }

    /// Whether the range has no parts, and so matches every version.
    pub fn is_unconstrained(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the version is in the range.
    pub fn matches(&self, version: &Version) -> bool {
        self.is_unconstrained() || self.0.iter().any(|part| part.matches(version))
    }

    /// Narrow the range to the versions also allowed by the constraint.
    ///
    /// If no version remains, the result is [`VersionRange::none`].
    /// See [`RangePart::intersect`] for how exclusions are narrowed.
    #[tracing::instrument]
    pub fn intersect(&self, constraint: &Constraint) -> Self {
        if self.is_unconstrained() {
            return Self::between(constraint.not_before.clone(), constraint.before.clone());
        }

        let parts = self
            .0
            .iter()
            .filter_map(|part| {
                let intersected = part.intersect(constraint);
                if intersected.is_none() {
                    debug!(%part, "range part eliminated");
                }
                intersected
            })
            .collect::<Vec<_>>();

        if parts.is_empty() {
            debug!("no range part remains");
            Self::none()
        } else {
            Self(parts)
        }
    }

    /// Narrow the range by each constraint in turn.
    pub fn intersect_all<I>(&self, constraints: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Constraint>,
    {
        constraints
            .into_iter()
            .fold(self.clone(), |range, constraint| {
                range.intersect(constraint.borrow())
            })
    }
}

impl FromStr for VersionRange {
    type Err = Error;

    #[tracing::instrument(level = "debug")]
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            error::fatal!(ParseError::Empty)
        }

        input
            .split('|')
            .map(str::trim)
            .map(RangePart::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

duplicate! {
    [
        ty;
        [ &str ];
        [ &String ];
        [ String ];
    ]
    impl TryFrom<ty> for VersionRange {
        type Error = Error;
        fn try_from(s: ty) -> Result<Self, Self::Error> {
            Self::parse(s)
        }
    }
}

impl From<Version> for VersionRange {
    /// The version becomes the lower bound of the range, as in `1.0..`.
    fn from(version: Version) -> Self {
        Self::between(Some(version), None)
    }
}

impl From<Constraint> for VersionRange {
    fn from(constraint: Constraint) -> Self {
        Self::between(constraint.not_before, constraint.before)
    }
}

impl From<RangePart> for VersionRange {
    fn from(part: RangePart) -> Self {
        Self(vec![part])
    }
}

impl FromIterator<Constraint> for VersionRange {
    /// Fold the constraints into a single range, starting from the unconstrained range.
    fn from_iter<T: IntoIterator<Item = Constraint>>(iter: T) -> Self {
        Self::default().intersect_all(iter)
    }
}

impl std::fmt::Display for VersionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = self.0.iter();
        if let Some(first) = parts.next() {
            write!(f, "{first}")?;
        }
        for part in parts {
            write!(f, "|{part}")?;
        }
        Ok(())
    }
}

impl Serialize for VersionRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VersionRange {
    /// An empty string deserializes to the unconstrained range.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(Self::default());
        }
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for VersionRange {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ObjectBuilder::new()
            .description(Some(Self::DOCS))
            .examples([json!("1.0..!2.0"), json!("!1.5"), json!("1.0|2.0-pre1..")])
            .schema_type(Type::String)
            .build()
            .into()
    }
}

impl ToSchema for VersionRange {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("VersionRange")
    }
}

/// Create a [`VersionRange`], panicking if the input is invalid.
///
/// ```
/// # use feedver::version;
/// let range = feedver::range!("1.0..!2.0|3.0");
/// assert!(range.matches(&version!(1, 2)));
/// assert!(range.matches(&version!(3, 0)));
/// assert!(!range.matches(&version!(2, 0)));
/// ```
#[macro_export]
macro_rules! range {
    ($value:expr) => {
        $crate::VersionRange::parse($value).expect("parse version range")
    };
}
