#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

mod constraint;
mod dotted_list;
mod error;
mod range;
mod restriction;
mod version;
mod version_part;

pub use constraint::*;
pub use dotted_list::*;
pub use error::*;
pub use range::*;
pub use restriction::*;
pub use version::*;
pub use version_part::*;
