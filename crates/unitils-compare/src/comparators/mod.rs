//! Built-in comparison strategies, one per file.

pub mod collection;
pub mod ignore_defaults;
pub mod lenient_dates;
pub mod lenient_number;
pub mod lenient_order;
pub mod map;
pub mod object;
pub mod simple_cases;

pub use collection::CollectionComparator;
pub use ignore_defaults::IgnoreDefaultsComparator;
pub use lenient_dates::LenientDatesComparator;
pub use lenient_number::LenientNumberComparator;
pub use lenient_order::LenientOrderCollectionComparator;
pub use map::MapComparator;
pub use object::ObjectComparator;
pub use simple_cases::SimpleCasesComparator;

use crate::comparator::Operand;
use crate::context::{type_label, ComparisonContext};
use crate::difference::Difference;
use crate::error::CompareResult;

/// Leaf difference for two values of incompatible types.
pub(crate) fn type_mismatch(
    cx: &ComparisonContext<'_>,
    left: &Operand<'_>,
    right: &Operand<'_>,
) -> CompareResult<Option<Difference>> {
    let message = format!(
        "Different types. Left: {}, right: {}",
        type_label(left),
        type_label(right)
    );
    cx.leaf(message, left, right)
}

/// Leaf difference for two sequences or maps of different sizes.
pub(crate) fn size_mismatch(
    cx: &ComparisonContext<'_>,
    what: &str,
    left_len: usize,
    right_len: usize,
    left: &Operand<'_>,
    right: &Operand<'_>,
) -> CompareResult<Option<Difference>> {
    let message = format!("Different {what} sizes. Left size: {left_len}, right size: {right_len}");
    cx.leaf(message, left, right)
}
