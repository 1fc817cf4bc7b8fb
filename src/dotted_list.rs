use std::str::FromStr;

use derive_more::Debug;
use lazy_regex::regex_is_match;
use nom::{
    Finish, IResult, Parser,
    character::complete::{char, digit1},
    combinator::all_consuming,
    multi::separated_list1,
};

use crate::{Error, ParseError, error};

/// An ordered list of non-negative integers, written separated by dots (`1.2.10`).
///
/// Dotted lists order element by element.
/// A list that runs out of elements sorts below one that doesn't,
/// as though it were padded with a value lower than any real number;
/// this makes `1` sort before `1.0`.
#[derive(Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[debug("{self}")]
pub struct DottedList(Vec<i64>);

impl DottedList {
    /// Parse a dotted list.
    ///
    /// Every segment must be a base-10 integer which fits in a signed 64-bit integer.
    pub fn parse(input: &str) -> Result<Self, Error> {
        fn segments(input: &str) -> IResult<&str, Vec<&str>> {
            all_consuming(separated_list1(char('.'), digit1)).parse(input)
        }

        if input.is_empty() {
            error::fatal!(ParseError::Empty)
        }

        let segments = match segments(input).finish() {
            Ok((_, segments)) => segments,
            Err(err) => {
                let span = error::remainder(input, err.input);
                error::fatal!(error::syntax!(input => span, err.cloned()))
            }
        };

        segments
            .into_iter()
            .map(|segment| {
                segment
                    .parse::<i64>()
                    .map_err(|err| ParseError::Segment {
                        input: input.to_string(),
                        segment: segment.to_string(),
                        span: error::span(input, segment).into(),
                        error: err,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(Error::from)
    }

    /// Report whether the input has the shape of a dotted list, without parsing it.
    ///
    /// This does not check whether each segment fits in 64 bits.
    pub fn is_valid(input: &str) -> bool {
        regex_is_match!(r"^[0-9]+(\.[0-9]+)*$", input)
    }

    /// View the segments of the list.
    pub fn segments(&self) -> &[i64] {
        &self.0
    }

    /// Whether the list has no segments.
    ///
    /// Only a [`VersionPart`](crate::VersionPart) may have an empty list, as in `1.0-pre`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for DottedList {
    fn from(segments: Vec<u32>) -> Self {
        Self(segments.into_iter().map(i64::from).collect())
    }
}

impl FromStr for DottedList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DottedList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut segments = self.0.iter();
        if let Some(first) = segments.next() {
            write!(f, "{first}")?;
        }
        for segment in segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}
