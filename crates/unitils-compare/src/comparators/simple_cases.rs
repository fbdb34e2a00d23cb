use unitils_types::Kind;

use crate::comparator::{Comparator, Operand};
use crate::comparators::type_mismatch;
use crate::context::ComparisonContext;
use crate::difference::Difference;
use crate::error::CompareResult;

/// Nulls, identical composites and scalars.
///
/// - null vs null is equal, null vs anything else differs
/// - a composite compared with itself is equal without descending
/// - scalars of the same kind compare by value, different kinds differ
pub struct SimpleCasesComparator;

impl Comparator for SimpleCasesComparator {
    fn name(&self) -> &str {
        "simple-cases"
    }

    fn can_compare(&self, left: &Kind<'_>, right: &Kind<'_>) -> bool {
        left.is_null()
            || right.is_null()
            || left.is_scalar()
            || right.is_scalar()
            || (left.identity().is_some() && left.identity() == right.identity())
    }

    fn compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        cx: &mut ComparisonContext<'_>,
    ) -> CompareResult<Option<Difference>> {
        let message = match (&left.kind, &right.kind) {
            (Kind::Null, Kind::Null) => return Ok(None),
            (Kind::Null, _) => "Left value null.",
            (_, Kind::Null) => "Right value null.",
            (Kind::Bool(l), Kind::Bool(r)) if l == r => return Ok(None),
            (Kind::Char(l), Kind::Char(r)) if l == r => return Ok(None),
            (Kind::Str(l), Kind::Str(r)) if l == r => return Ok(None),
            (Kind::Date(l), Kind::Date(r)) if l == r => return Ok(None),
            (Kind::Unit(l), Kind::Unit(r)) if l == r => return Ok(None),
            (Kind::Bool(_), Kind::Bool(_))
            | (Kind::Char(_), Kind::Char(_))
            | (Kind::Str(_), Kind::Str(_)) => "Different object values.",
            (Kind::Date(_), Kind::Date(_)) => "Different date values.",
            (Kind::Unit(l), Kind::Unit(r)) if l.type_name == r.type_name => {
                "Different enum values."
            }
            _ if left.kind.identity().is_some() && left.kind.identity() == right.kind.identity() => {
                return Ok(None)
            }
            _ => return type_mismatch(cx, left, right),
        };
        cx.leaf(message, left, right)
    }
}
