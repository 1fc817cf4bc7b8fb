use std::collections::{BTreeMap, btree_map};

use documented::Documented;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{Version, VersionRange};

/// Additional version restrictions, keyed by the URI of the interface they apply to.
///
/// Restrictions narrow which implementations of an interface may be selected,
/// on top of whatever the feeds themselves require.
/// An interface without a restriction allows every version.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, Documented, ToSchema)]
#[serde(transparent)]
#[schema(example = json!({ "https://example.com/app.xml": "1.0..!2.0" }))]
pub struct Restrictions(BTreeMap<String, VersionRange>);

impl Restrictions {
    /// Restrict the interface to the range, returning the restriction it replaces.
    pub fn insert(
        &mut self,
        interface: impl Into<String>,
        range: VersionRange,
    ) -> Option<VersionRange> {
        self.0.insert(interface.into(), range)
    }

    /// The restriction on the interface, if any.
    pub fn get(&self, interface: &str) -> Option<&VersionRange> {
        self.0.get(interface)
    }

    /// Whether the version of the interface is allowed.
    pub fn allows(&self, interface: &str, version: &Version) -> bool {
        self.get(interface)
            .is_none_or(|range| range.matches(version))
    }

    /// Iterate over the restrictions in interface order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, VersionRange> {
        self.0.iter()
    }

    /// Whether there are no restrictions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, VersionRange)> for Restrictions {
    fn from_iter<T: IntoIterator<Item = (S, VersionRange)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(interface, range)| (interface.into(), range))
                .collect(),
        )
    }
}

impl<S: Into<String>> Extend<(S, VersionRange)> for Restrictions {
    fn extend<T: IntoIterator<Item = (S, VersionRange)>>(&mut self, iter: T) {
        self.0.extend(
            iter.into_iter()
                .map(|(interface, range)| (interface.into(), range)),
        );
    }
}

impl<'a> IntoIterator for &'a Restrictions {
    type Item = (&'a String, &'a VersionRange);
    type IntoIter = btree_map::Iter<'a, String, VersionRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Whether an element guarded by an `if-0install-version` style range
/// applies to the running version of the tool.
///
/// Elements without a range always apply.
/// The running version is supplied by the caller.
pub fn is_applicable(if_version: Option<&VersionRange>, running: &Version) -> bool {
    if_version.is_none_or(|range| range.matches(running))
}
