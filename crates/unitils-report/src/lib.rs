//! Difference reports for Unitils.
//!
//! Turns the [`Difference`](unitils_compare::Difference) tree of a failed
//! comparison into text: values are rendered by the [`ObjectFormatter`],
//! unordered collections are linearized by the [`BestMatchFinder`], and a
//! [`DifferenceFormatter`] lays the tree out.
//!
//! # Key Types
//!
//! - [`ObjectFormatter`] -- Renders captured values (`Person<name="Bob">`, `[1, 2, ...]`)
//! - [`BestMatchFinder`] / [`BestMatch`] -- Closest pairing for unordered collections
//! - [`DefaultDifferenceFormatter`] -- Numbered list of leaf differences
//! - [`TreeDifferenceFormatter`] -- `[L]`/`[R]` pair per node
//! - [`DifferenceReport`] -- User message, compared values and formatted differences

pub mod best_match;
pub mod default;
pub mod error;
pub mod formatter;
pub mod object_formatter;
pub mod report;
pub mod tree;

pub use best_match::{BestMatch, BestMatchFinder};
pub use default::DefaultDifferenceFormatter;
pub use error::{ReportError, ReportResult};
pub use formatter::{DifferenceFormatter, FormatterStyle};
pub use object_formatter::ObjectFormatter;
pub use report::DifferenceReport;
pub use tree::TreeDifferenceFormatter;
