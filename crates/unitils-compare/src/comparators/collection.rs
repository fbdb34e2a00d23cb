use std::collections::BTreeMap;

use unitils_types::Kind;

use crate::comparator::{Comparator, Operand};
use crate::comparators::{size_mismatch, type_mismatch, LenientOrderCollectionComparator};
use crate::context::ComparisonContext;
use crate::difference::{CollectionDifference, Difference, Step};
use crate::error::CompareResult;

/// Sequences compared position by position.
///
/// Arrays, vectors, lists and sets are all sequences, so a `Vec` may be
/// compared with an array. Sizes are checked first; a size mismatch is
/// reported without looking at any element.
///
/// A sequence with no meaningful order, such as a hash set, is compared as
/// a multiset whatever the modes.
pub struct CollectionComparator;

impl Comparator for CollectionComparator {
    fn name(&self) -> &str {
        "collection"
    }

    fn can_compare(&self, left: &Kind<'_>, right: &Kind<'_>) -> bool {
        matches!((left, right), (Kind::Seq(_), Kind::Seq(_)))
    }

    fn compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        cx: &mut ComparisonContext<'_>,
    ) -> CompareResult<Option<Difference>> {
        let (Kind::Seq(l), Kind::Seq(r)) = (&left.kind, &right.kind) else {
            return type_mismatch(cx, left, right);
        };
        if !l.ordered || !r.ordered {
            return LenientOrderCollectionComparator.compare(left, right, cx);
        }
        if l.len() != r.len() {
            return size_mismatch(cx, "array/collection", l.len(), r.len(), left, right);
        }

        let mut elements = BTreeMap::new();
        for (index, (l_item, r_item)) in l.items.iter().zip(&r.items).enumerate() {
            if let Some(difference) = cx.nested(Step::Index(index), *l_item, *r_item)? {
                elements.insert(index, difference);
                if cx.only_first_difference() {
                    break;
                }
            }
        }

        if elements.is_empty() {
            return Ok(None);
        }
        Ok(Some(Difference::Collection(CollectionDifference {
            detail: cx.detail("Different elements.", left, right)?,
            elements,
        })))
    }
}
