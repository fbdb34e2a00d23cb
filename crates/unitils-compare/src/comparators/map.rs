use unitils_types::{Kind, Reflect};

use crate::comparator::{Comparator, Operand};
use crate::comparators::{size_mismatch, type_mismatch};
use crate::context::{ComparisonContext, NULL};
use crate::difference::{Difference, MapDifference, Step};
use crate::error::CompareResult;

/// Maps compared entry by entry, driven by the expected side.
///
/// Every expected key is looked up in the actual map by strict key
/// equality and the values are compared; a missing entry compares against
/// null. Extra actual keys are ignored, but an expected map larger than the
/// actual one is a size mismatch.
pub struct MapComparator;

impl Comparator for MapComparator {
    fn name(&self) -> &str {
        "map"
    }

    fn can_compare(&self, left: &Kind<'_>, right: &Kind<'_>) -> bool {
        matches!((left, right), (Kind::Map(_), Kind::Map(_)))
    }

    fn compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        cx: &mut ComparisonContext<'_>,
    ) -> CompareResult<Option<Difference>> {
        let (Kind::Map(l), Kind::Map(r)) = (&left.kind, &right.kind) else {
            return type_mismatch(cx, left, right);
        };
        if l.len() > r.len() {
            return size_mismatch(cx, "map", l.len(), r.len(), left, right);
        }

        let mut entries = Vec::new();
        for (l_key, l_value) in &l.entries {
            let mut r_value: &dyn Reflect = NULL;
            for (r_key, candidate) in &r.entries {
                if cx.strictly_equal(*l_key, *r_key)? {
                    r_value = *candidate;
                    break;
                }
            }
            let key = cx.snapshot(*l_key)?;
            if let Some(difference) = cx.nested(Step::Key(key.clone()), *l_value, r_value)? {
                entries.push((key, difference));
                if cx.only_first_difference() {
                    break;
                }
            }
        }

        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(Difference::Map(MapDifference {
            detail: cx.detail("Different map values.", left, right)?,
            entries,
        })))
    }
}
