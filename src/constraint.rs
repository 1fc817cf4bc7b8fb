use bon::Builder;
use derive_new::new;
use documented::Documented;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::Version;

/// A simple version constraint: an inclusive lower bound and an exclusive upper bound,
/// either of which may be absent.
///
/// Feeds write constraints as `<version not-before="1.0" before="2.0"/>`,
/// which is how this type is serialized.
/// Constraints are the unit of intersection for [`VersionRange`](crate::VersionRange).
///
/// A constraint whose lower bound is not below its upper bound matches nothing;
/// this is not rejected at construction.
///
/// ```
/// # use feedver::{Constraint, version};
/// let constraint = Constraint::builder()
///     .not_before(version!(1, 0))
///     .before(version!(2, 0))
///     .build();
/// assert!(constraint.contains(&version!(1, 5)));
/// assert!(!constraint.contains(&version!(2, 0)));
/// ```
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Builder,
    new,
    Serialize,
    Deserialize,
    Documented,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[schema(example = json!({ "not-before": "1.0", "before": "2.0" }))]
pub struct Constraint {
    /// The lowest version allowed.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<Version>,

    /// The first version after `not_before` that is no longer allowed.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Version>,
}

impl Constraint {
    /// Whether the version lies within the bounds of the constraint.
    pub fn contains(&self, version: &Version) -> bool {
        self.not_before.as_ref().is_none_or(|bound| version >= bound)
            && self.before.as_ref().is_none_or(|bound| version < bound)
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.not_before.is_none() && self.before.is_none()
    }
}

impl std::fmt::Display for Constraint {
    /// Renders for diagnostics, like `1.0 =< Ver < 2.0`.
    /// This form is not parsed back.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(not_before) = &self.not_before {
            write!(f, "{not_before}")?;
        }
        f.write_str(" =< Ver < ")?;
        if let Some(before) = &self.before {
            write!(f, "{before}")?;
        }
        Ok(())
    }
}

/// Create a [`Constraint`] from version literals, panicking if any is invalid.
///
/// ```
/// # use feedver::{Constraint, version};
/// let constraint = feedver::constraint!("1.0" .. "2.0");
/// assert_eq!(constraint, Constraint::new(Some(version!(1, 0)), Some(version!(2, 0))));
///
/// let constraint = feedver::constraint!(.. "2.0");
/// assert_eq!(constraint.not_before, None);
///
/// let constraint = feedver::constraint!("1.0" ..);
/// assert_eq!(constraint.before, None);
/// ```
#[macro_export]
macro_rules! constraint {
    ($not_before:literal .. $before:literal) => {
        $crate::Constraint::new(
            Some($crate::version!(parse => $not_before)),
            Some($crate::version!(parse => $before)),
        )
    };
    (.. $before:literal) => {
        $crate::Constraint::new(None, Some($crate::version!(parse => $before)))
    };
    ($not_before:literal ..) => {
        $crate::Constraint::new(Some($crate::version!(parse => $not_before)), None)
    };
}
