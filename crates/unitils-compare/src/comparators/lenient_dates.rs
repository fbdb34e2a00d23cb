use unitils_types::Kind;

use crate::comparator::{Comparator, Operand};
use crate::context::ComparisonContext;
use crate::difference::Difference;
use crate::error::CompareResult;

/// Dates match when both are present or both absent; the instants
/// themselves are not compared.
pub struct LenientDatesComparator;

impl Comparator for LenientDatesComparator {
    fn name(&self) -> &str {
        "lenient-dates"
    }

    fn can_compare(&self, left: &Kind<'_>, right: &Kind<'_>) -> bool {
        match (left, right) {
            (Kind::Date(_), Kind::Date(_) | Kind::Null) => true,
            (Kind::Null, Kind::Date(_)) => true,
            _ => false,
        }
    }

    fn compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        cx: &mut ComparisonContext<'_>,
    ) -> CompareResult<Option<Difference>> {
        if left.kind.is_null() != right.kind.is_null() {
            return cx.leaf("Lenient dates, but not both value or both null.", left, right);
        }
        Ok(None)
    }
}
