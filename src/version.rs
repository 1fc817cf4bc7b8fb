use std::{borrow::Cow, cmp::Ordering, str::FromStr};

use compact_str::{CompactString, ToCompactString};
use derive_more::Debug;
use documented::Documented;
use duplicate::duplicate;
use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{ObjectBuilder, Type},
};

use crate::{CompareError, DottedList, Error, ParseError, VersionModifier, VersionPart, error};

/// A version of an implementation listed in a feed, like `1.0`, `2.1-pre3` or `1.0-rc1-post2`.
///
/// A version is a dotted list of numbers optionally followed by hyphen-separated
/// [`VersionPart`]s, each of which may carry a release-stage modifier
/// (`pre`, `rc`, `post`) and its own dotted list.
///
/// Versions are totally ordered:
/// - The first dotted list is compared first (`1.0` < `1.0.1` < `1.1`).
/// - Then the additional parts are compared in order.
///   Parts order by modifier before number, and a missing part sorts above
///   `pre` and `rc` parts but below any other part,
///   so `1.0-pre1` < `1.0-rc1` < `1.0` < `1.0-1` < `1.0-post1`.
///
/// Feed templates may contain versions with template variables, such as `{version}`.
/// These are kept verbatim: they render and compare for equality as strings
/// but have no order (see [`Version::try_cmp`]).
#[derive(Clone, Eq, PartialEq, Hash, Debug, Documented)]
#[debug("{self}")]
pub struct Version(Repr);

#[derive(Clone, Eq, PartialEq, Hash)]
enum Repr {
    Parsed {
        first_part: DottedList,
        additional_parts: Vec<VersionPart>,
    },
    Template(CompactString),
}

impl Version {
    /// Parse a version.
    ///
    /// Input containing a template variable (a `{` followed later by a `}`)
    /// is accepted verbatim without further parsing.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, Error> {
        input.as_ref().parse()
    }

    /// Parse a version, returning `None` if it is invalid.
    pub fn try_parse(input: impl AsRef<str>) -> Option<Self> {
        Self::parse(input).ok()
    }

    /// Create a version consisting only of the provided dotted list,
    /// like `version!(1, 2, 3)`.
    ///
    /// An empty iterator produces the version `0`.
    pub fn from_segments(segments: impl IntoIterator<Item = u32>) -> Self {
        let mut segments = segments.into_iter().collect::<Vec<_>>();
        if segments.is_empty() {
            segments.push(0);
        }
        Self(Repr::Parsed {
            first_part: DottedList::from(segments),
            additional_parts: Vec::new(),
        })
    }

    /// Whether the version contains template variables.
    ///
    /// Such versions only make sense inside feed templates;
    /// they must be filtered out before versions are ordered.
    pub fn contains_template_variables(&self) -> bool {
        matches!(self.0, Repr::Template(_))
    }

    /// The leading dotted list of the version.
    ///
    /// Returns `None` for versions with template variables.
    pub fn first_part(&self) -> Option<&DottedList> {
        match &self.0 {
            Repr::Parsed { first_part, .. } => Some(first_part),
            Repr::Template(_) => None,
        }
    }

    /// The hyphen-separated parts following the first part.
    ///
    /// Empty for versions with template variables.
    pub fn additional_parts(&self) -> &[VersionPart] {
        match &self.0 {
            Repr::Parsed {
                additional_parts, ..
            } => additional_parts,
            Repr::Template(_) => &[],
        }
    }

    /// Compare two versions.
    ///
    /// Fails if either version contains template variables.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, CompareError> {
        let (lhs_first, lhs_rest) = self.components()?;
        let (rhs_first, rhs_rest) = other.components()?;

        // A missing part keys lower than any present part with the same modifier.
        fn key(part: Option<&VersionPart>) -> (VersionModifier, Option<&DottedList>) {
            match part {
                Some(part) => (part.modifier(), Some(part.dotted_list())),
                None => (VersionModifier::None, None),
            }
        }

        let rest = || {
            (0..lhs_rest.len().max(rhs_rest.len()))
                .map(|i| key(lhs_rest.get(i)).cmp(&key(rhs_rest.get(i))))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        };

        Ok(lhs_first.cmp(rhs_first).then_with(rest))
    }

    fn components(&self) -> Result<(&DottedList, &[VersionPart]), CompareError> {
        match &self.0 {
            Repr::Parsed {
                first_part,
                additional_parts,
            } => Ok((first_part, additional_parts)),
            Repr::Template(version) => Err(CompareError::TemplateVariable {
                version: version.to_string(),
            }),
        }
    }

    fn has_template_variables(input: &str) -> bool {
        regex_is_match!(r"(?s)\{.*\}", input)
    }
}

impl FromStr for Version {
    type Err = Error;

    #[tracing::instrument(level = "debug")]
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            error::fatal!(ParseError::Empty)
        }

        if Self::has_template_variables(input) {
            return Ok(Self(Repr::Template(input.to_compact_string())));
        }

        let mut parts = input.split('-');
        let first = parts.next().unwrap_or_default();
        if !DottedList::is_valid(first) {
            let span = error::span(input, first);
            error::fatal!(error::syntax!(input => span, "version must start with a dotted list of numbers"));
        }
        let first_part = DottedList::parse(first)?;

        let mut offset = first.len();
        let additional_parts = parts
            .map(|part| {
                let start = offset + 1;
                offset = start + part.len();
                VersionPart::parse(part)
                    .map_err(|err| error::field!(input, "part" => (start, part.len()), err))
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        Ok(Self(Repr::Parsed {
            first_part,
            additional_parts,
        }))
    }
}

duplicate! {
    [
        ty;
        [ &str ];
        [ &String ];
        [ String ];
    ]
    impl TryFrom<ty> for Version {
        type Error = Error;
        fn try_from(s: ty) -> Result<Self, Self::Error> {
            Self::parse(s)
        }
    }
}

impl TryFrom<&semver::Version> for Version {
    type Error = Error;

    /// Semver versions convert when their pre-release
    /// (if any) is a valid [`VersionPart`], like `1.2.3-rc1`.
    fn try_from(value: &semver::Version) -> Result<Self, Self::Error> {
        Self::parse(value.to_string())
    }
}

impl TryFrom<semver::Version> for Version {
    type Error = Error;

    fn try_from(value: semver::Version) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl From<&Version> for Version {
    fn from(value: &Version) -> Self {
        value.clone()
    }
}

impl Ord for Version {
    /// # Panics
    ///
    /// Panics if either version contains template variables.
    /// Use [`Version::try_cmp`] when that is possible.
    fn cmp(&self, other: &Self) -> Ordering {
        match self.try_cmp(other) {
            Ok(ordering) => ordering,
            Err(err) => panic!("{err}"),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Repr::Parsed {
                first_part,
                additional_parts,
            } => {
                write!(f, "{first_part}")?;
                for part in additional_parts {
                    write!(f, "-{part}")?;
                }
                Ok(())
            }
            Repr::Template(version) => f.write_str(version),
        }
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for Version {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ObjectBuilder::new()
            .description(Some(Self::DOCS))
            .examples([json!("1.0"), json!("2.1-pre3"), json!("1.0-rc1-post2")])
            .min_length(Some(1))
            .schema_type(Type::String)
            .build()
            .into()
    }
}

impl ToSchema for Version {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Version")
    }
}

/// Create a [`Version`] in a manner that is known to not fail at compile time.
///
/// ```
/// # use feedver::Version;
/// let version = feedver::version!(1, 2, 3);
/// assert_eq!(version, Version::parse("1.2.3").unwrap());
///
/// let version = feedver::version!(parse => "1.0-pre1");
/// assert_eq!(version.to_string(), "1.0-pre1");
/// ```
#[macro_export]
macro_rules! version {
    // Panics if the provided value fails to parse.
    (parse => $value:expr) => {
        $crate::Version::parse($value).expect("parse version")
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::Version::from_segments([$($segment),+])
    };
}
