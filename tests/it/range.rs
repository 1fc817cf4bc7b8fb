use proptest::prelude::*;
use simple_test_case::test_case;

use feedver::*;

#[test_case("1.0..!2.0", "1.5", true; "interval_inside")]
#[test_case("1.0..!2.0", "2.0", false; "interval_exclusive_upper")]
#[test_case("1.0..!2.0", "1.0", true; "interval_inclusive_lower")]
#[test_case("1.0", "1.0", true; "exact_same")]
#[test_case("1.0", "1.1", false; "exact_other")]
#[test_case("!1.0", "1.0", false; "exclude_same")]
#[test_case("!1.0", "2.0", true; "exclude_other")]
#[test_case("..!1.0|2.0..", "1.5", false; "gap_between_parts")]
#[test_case("..!1.0|2.0..", "2.5", true; "after_gap")]
#[test_case("1.0..!2.0|3.0", "2.0", false; "between_interval_and_exact")]
#[test_case("1.0..!2.0|3.0", "3.0", true; "exact_after_interval")]
#[test_case("1.0..!2.0|!1.5", "2.0", true; "exclusion_admits_outside_interval")]
#[test_case("1.0..!2.0|!1.5", "1.5", true; "interval_admits_excluded")]
#[test]
fn matches(range: &str, version: &str, expected: bool) {
    let range = VersionRange::parse(range).expect("must parse");
    let version = Version::parse(version).expect("must parse");
    assert_eq!(range.matches(&version), expected, "'{range}' matches '{version}'");
}

#[test]
fn intersect_narrows() {
    let range = range!("1.0..").intersect(&constraint!(.. "2.0"));
    assert_eq!(range, range!("1.0..!2.0"));
}

#[test]
fn intersect_to_impossible_is_none() {
    let range = range!("5.0..").intersect(&constraint!(.. "1.0"));
    assert_eq!(range, VersionRange::none());
    for version in ["0", "1.0", "5.0", "99"] {
        let version = Version::parse(version).expect("must parse");
        assert!(!range.matches(&version), "'{range}' matches '{version}'");
    }
}

#[test]
fn folds_constraint_list() {
    let constraints = vec![constraint!("1.0" .. "2.0"), constraint!("1.5" ..)];
    let range = VersionRange::default()
        .intersect(&constraints[0])
        .intersect(&constraints[1]);

    assert_eq!(range, range!("1.5..!2.0"));
    assert_eq!(range, VersionRange::default().intersect_all(&constraints));
    assert_eq!(range, constraints.into_iter().collect::<VersionRange>());

    for (version, expected) in [("1.4", false), ("1.5", true), ("1.9", true), ("2.0", false)] {
        let version = Version::parse(version).expect("must parse");
        assert_eq!(range.matches(&version), expected, "'{range}' matches '{version}'");
    }
}

/// Intersecting an exclusion with a constraint that contains the excluded version
/// eliminates the exclusion instead of splitting the constraint around it.
/// The result matches none of the versions the true intersection would.
#[test]
fn intersect_exclusion_inside_constraint_is_lossy() {
    let range = range!("!1.5");
    let constraint = constraint!("1.0" .. "2.0");

    let intersected = range.intersect(&constraint);
    assert_eq!(intersected, VersionRange::none());
    assert!(!intersected.matches(&version!(1, 2)));
}

#[test]
fn intersect_exclusion_outside_constraint_becomes_constraint() {
    let range = range!("!3.0");
    let intersected = range.intersect(&constraint!("1.0" .. "2.0"));
    assert_eq!(intersected, range!("1.0..!2.0"));
}

#[test]
fn intersect_exclusion_survives_beside_other_parts() {
    let range = range!("!1.5|1.0..!1.2");
    let intersected = range.intersect(&constraint!("1.0" .. "2.0"));
    assert_eq!(intersected, range!("1.0..!1.2"));
}

#[test]
fn parts_are_exposed_in_order() {
    let range = range!("3.0|!2.0|1.0..");
    let parts = range.parts();
    assert_eq!(
        parts,
        &[
            RangePart::Exact(version!(3, 0)),
            RangePart::Exclude(version!(2, 0)),
            RangePart::Interval {
                start: Some(version!(1, 0)),
                end: None
            },
        ]
    );
}

#[test]
fn between_and_conversions() {
    assert_eq!(
        VersionRange::between(Some(version!(1)), Some(version!(2))),
        range!("1..!2")
    );
    assert_eq!(VersionRange::from(constraint!(.. "2")), range!("..!2"));
    assert_eq!(
        VersionRange::from(RangePart::Exclude(version!(1))),
        range!("!1")
    );
}

/// Regular expression that matches range strings made of canonical versions.
const VALID_RANGES: &str = r"(!?[1-9](\.[0-9]){0,2}(-(pre|rc|post)[0-9])?|([1-9](\.[0-9]){0,2})?\.\.(![1-9](\.[0-9]){0,2})?)(\|(!?[1-9](\.[0-9]){0,2}|([1-9](\.[0-9]){0,2})?\.\.(![1-9](\.[0-9]){0,2})?)){0,3}";

/// Small versions that land inside and outside the generated ranges.
const SMALL_VERSIONS: &str = r"[0-9](\.[0-9]){0,2}(-(pre|rc|post)[0-9])?";

proptest! {
    /// Tests randomly generated ranges against the parser.
    /// Validates that the parser succeeds by converting the range back into a string again.
    #[test]
    fn parses_arbitrary_range(input in VALID_RANGES) {
        let parsed = VersionRange::parse(&input).expect("must parse range");
        prop_assert_eq!(parsed.to_string(), input);
    }

    /// Intersection never admits a version that either side rejects,
    /// and keeps every version an interval or exact part shares with the constraint.
    #[test]
    fn intersection_is_bounded(
        input in VALID_RANGES,
        version in SMALL_VERSIONS,
        not_before in proptest::option::of(SMALL_VERSIONS),
        before in proptest::option::of(SMALL_VERSIONS),
    ) {
        let range = VersionRange::parse(&input).expect("must parse range");
        let version = Version::parse(&version).expect("must parse version");
        let constraint = Constraint::new(
            not_before.map(|v| Version::parse(v).expect("must parse version")),
            before.map(|v| Version::parse(v).expect("must parse version")),
        );

        let intersected = range.intersect(&constraint);
        if intersected.matches(&version) {
            prop_assert!(range.matches(&version));
            prop_assert!(constraint.contains(&version));
        }

        let has_exclusion = range.parts().iter().any(|part| matches!(part, RangePart::Exclude(_)));
        if !has_exclusion && range.matches(&version) && constraint.contains(&version) {
            prop_assert!(intersected.matches(&version));
        }
    }
}
