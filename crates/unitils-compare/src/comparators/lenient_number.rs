use unitils_types::Kind;

use crate::comparator::{Comparator, Operand};
use crate::context::ComparisonContext;
use crate::difference::Difference;
use crate::error::CompareResult;

/// Numbers compare by value whatever their width, signedness or floatness:
/// `5i64` equals `5u8` and `5.0f32`.
pub struct LenientNumberComparator;

impl Comparator for LenientNumberComparator {
    fn name(&self) -> &str {
        "lenient-number"
    }

    fn can_compare(&self, left: &Kind<'_>, right: &Kind<'_>) -> bool {
        matches!((left, right), (Kind::Number(_), Kind::Number(_)))
    }

    fn compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        cx: &mut ComparisonContext<'_>,
    ) -> CompareResult<Option<Difference>> {
        match (&left.kind, &right.kind) {
            (Kind::Number(l), Kind::Number(r)) if l.value_eq(r) => Ok(None),
            _ => cx.leaf("Different primitive values.", left, right),
        }
    }
}
