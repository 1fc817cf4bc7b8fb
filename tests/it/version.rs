use std::{
    cmp::Ordering,
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use itertools::Itertools;
use proptest::prelude::*;
use simple_test_case::test_case;

use feedver::*;

/// Versions as feeds write them, in ascending order.
const ASCENDING: &[&str] = &[
    "0",
    "0.0",
    "0.1-pre",
    "0.1-pre1",
    "0.1-pre1.1",
    "0.1-rc1",
    "0.1",
    "0.1-",
    "0.1-0",
    "0.1-1-pre1",
    "0.1-1",
    "0.1-post",
    "0.1-post1",
    "0.1.0",
    "0.9",
    "0.10",
    "1.0-pre1",
    "1.0-rc1",
    "1.0",
    "1.0-post1",
    "1.0.1",
    "2",
];

#[test]
fn orders_feed_versions() {
    let versions = ASCENDING
        .iter()
        .map(|v| Version::parse(v).expect("must parse"))
        .collect_vec();

    for (lower, higher) in versions.iter().tuple_windows() {
        assert!(lower < higher, "'{lower}' < '{higher}'");
    }

    let shuffled = versions.iter().rev().cloned().sorted().collect_vec();
    assert_eq!(shuffled, versions);
}

#[test]
fn modifier_ordering() {
    let pre = version!(parse => "1.0-pre1");
    let rc = version!(parse => "1.0-rc1");
    let release = version!(parse => "1.0");
    let post = version!(parse => "1.0-post1");

    assert!(pre < rc);
    assert!(rc < release);
    assert!(release < post);
    assert!(!(release < pre), "a pre-release sorts below its release");
}

#[test]
fn dotted_list_padding() {
    assert!(version!(1, 0) < version!(1, 0, 1));
    assert!(version!(1) < version!(1, 0));
}

#[test_case("01.0", "1.0"; "leading_zero_first")]
#[test_case("1.0-rc007", "1.0-rc7"; "leading_zero_part")]
#[test]
fn canonicalizes(input: &str, expected: &str) {
    let version = Version::parse(input).expect("must parse");
    assert_eq!(version.to_string(), expected);
    assert_eq!(version, Version::parse(expected).expect("must parse"));
}

fn hash_of(version: &Version) -> u64 {
    let mut hasher = DefaultHasher::new();
    version.hash(&mut hasher);
    hasher.finish()
}

/// Regular expression that matches version strings written in canonical form:
/// - A dotted list of up to four numbers without leading zeroes
/// - Up to three hyphen-separated parts, each with an optional modifier and dotted list
const VALID_VERSIONS: &str = r"(0|[1-9][0-9]{0,3})(\.(0|[1-9][0-9]{0,3})){0,3}(-(pre|rc|post)?((0|[1-9][0-9]{0,2})(\.(0|[1-9][0-9]{0,2})){0,2})?){0,3}";

/// Like [`VALID_VERSIONS`], but with small numbers so that generated versions collide often.
const SMALL_VERSIONS: &str = r"[0-2](\.[0-2]){0,2}(-(pre|rc|post)?([0-2](\.[0-2])?)?){0,2}";

proptest! {
    /// Tests randomly generated versions against the parser.
    /// Validates that the parser succeeds by converting the version back into a string again.
    #[test]
    fn parses_arbitrary_version(input in VALID_VERSIONS) {
        let parsed = Version::parse(&input).expect("must parse version");
        prop_assert_eq!(parsed.to_string(), input);
    }

    #[test]
    fn ordering_is_antisymmetric(a in SMALL_VERSIONS, b in SMALL_VERSIONS) {
        let a = Version::parse(&a).expect("must parse version");
        let b = Version::parse(&b).expect("must parse version");
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn ordering_agrees_with_equality(a in SMALL_VERSIONS, b in SMALL_VERSIONS) {
        let a = Version::parse(&a).expect("must parse version");
        let b = Version::parse(&b).expect("must parse version");
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    #[test]
    fn ordering_is_transitive(a in SMALL_VERSIONS, b in SMALL_VERSIONS, c in SMALL_VERSIONS) {
        let versions = [a, b, c].map(|v| Version::parse(&v).expect("must parse version"));
        for ordered in versions.iter().permutations(3) {
            let [x, y, z] = ordered[..] else { unreachable!() };
            if x <= y && y <= z {
                prop_assert!(x <= z, "'{x}' <= '{y}' <= '{z}'");
            }
        }
    }

    #[test]
    fn try_cmp_agrees_with_cmp(a in SMALL_VERSIONS, b in SMALL_VERSIONS) {
        let a = Version::parse(&a).expect("must parse version");
        let b = Version::parse(&b).expect("must parse version");
        prop_assert_eq!(a.try_cmp(&b), Ok(a.cmp(&b)));
    }
}
