use std::str::FromStr;

use derive_more::Display;
use enum_assoc::Assoc;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    combinator::{opt, rest, value},
};

use crate::{DottedList, Error};

/// The release stage a [`VersionPart`] describes.
///
/// Stages order by their numeric value:
/// `Pre` < `Rc` < `None` < `Post`.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Assoc)]
#[func(const fn as_keyword(&self) -> &'static str)]
#[repr(i8)]
pub enum VersionModifier {
    /// A pre-release, written `pre`.
    #[assoc(as_keyword = "pre")]
    Pre = -2,

    /// A release candidate, written `rc`.
    #[assoc(as_keyword = "rc")]
    Rc = -1,

    /// No modifier.
    #[default]
    #[assoc(as_keyword = "")]
    None = 0,

    /// A post-release, written `post`.
    #[assoc(as_keyword = "post")]
    Post = 1,
}

impl VersionModifier {
    /// The keyword introducing the modifier; empty for [`VersionModifier::None`].
    pub const fn keyword(self) -> &'static str {
        self.as_keyword()
    }

    /// The numeric value of the modifier, which determines its order.
    pub const fn value(self) -> i8 {
        self as i8
    }

    /// `nom` parser for an optional modifier keyword.
    fn parser(input: &str) -> IResult<&str, Self> {
        let keyword = alt((
            value(Self::Pre, tag("pre")),
            value(Self::Rc, tag("rc")),
            value(Self::Post, tag("post")),
        ));
        opt(keyword)
            .map(Option::unwrap_or_default)
            .parse(input)
    }
}

impl std::fmt::Display for VersionModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One hyphen-separated part of a [`Version`](crate::Version) after the first,
/// like `pre1` or `post2.1` or `5`.
///
/// A part is an optional modifier immediately followed by an optional dotted list.
/// Parts order by modifier first, then by dotted list.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
#[display("{modifier}{dotted_list}")]
pub struct VersionPart {
    modifier: VersionModifier,
    dotted_list: DottedList,
}

impl VersionPart {
    /// Parse a version part.
    ///
    /// A leading `pre`, `rc` or `post` keyword sets the modifier;
    /// whatever follows (if anything) must be a dotted list.
    pub fn parse(input: &str) -> Result<Self, Error> {
        fn parts(input: &str) -> IResult<&str, (VersionModifier, &str)> {
            (VersionModifier::parser, rest).parse(input)
        }

        // Neither parser can fail: the modifier is optional and `rest` takes anything.
        let (modifier, list) = match parts(input) {
            Ok((_, parsed)) => parsed,
            Err(_) => (VersionModifier::None, input),
        };

        let dotted_list = if list.is_empty() {
            DottedList::default()
        } else {
            DottedList::parse(list)?
        };

        Ok(Self {
            modifier,
            dotted_list,
        })
    }

    /// The release stage of this part.
    pub fn modifier(&self) -> VersionModifier {
        self.modifier
    }

    /// The numbers of this part; empty if none were written.
    pub fn dotted_list(&self) -> &DottedList {
        &self.dotted_list
    }
}

impl FromStr for VersionPart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
