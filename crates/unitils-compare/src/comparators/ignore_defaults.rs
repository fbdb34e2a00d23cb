use unitils_types::Kind;

use crate::comparator::{Comparator, Operand};
use crate::context::ComparisonContext;
use crate::difference::Difference;
use crate::error::CompareResult;

/// An expected value that is null, `false`, `'\0'` or zero matches any
/// actual value. Only the expected side is inspected.
pub struct IgnoreDefaultsComparator;

impl Comparator for IgnoreDefaultsComparator {
    fn name(&self) -> &str {
        "ignore-defaults"
    }

    fn can_compare(&self, left: &Kind<'_>, _right: &Kind<'_>) -> bool {
        left.is_default()
    }

    fn compare(
        &self,
        _left: &Operand<'_>,
        _right: &Operand<'_>,
        _cx: &mut ComparisonContext<'_>,
    ) -> CompareResult<Option<Difference>> {
        Ok(None)
    }
}
