use tracing::trace;
use unitils_types::Kind;

use crate::comparator::{Comparator, Operand};
use crate::comparators::{size_mismatch, type_mismatch};
use crate::context::ComparisonContext;
use crate::difference::{Difference, Step, UnorderedCollectionDifference};
use crate::error::CompareResult;

/// Sequences compared as multisets.
///
/// Every left element is compared with every right element. The sequences
/// are equal when the exact matches admit a one-to-one pairing of all
/// elements; otherwise the full difference matrix is reported so the
/// closest pairs can be shown.
pub struct LenientOrderCollectionComparator;

impl Comparator for LenientOrderCollectionComparator {
    fn name(&self) -> &str {
        "lenient-order-collection"
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
        if l.len() != r.len() {
            return size_mismatch(cx, "array/collection", l.len(), r.len(), left, right);
        }

        let mut matrix = Vec::with_capacity(l.len());
        let mut exact = Vec::with_capacity(l.len());
        for (i, l_item) in l.items.iter().enumerate() {
            let mut row = Vec::with_capacity(r.len());
            let mut matches = Vec::new();
            for (j, r_item) in r.items.iter().enumerate() {
                let difference = cx.nested(Step::Pair(i, j), *l_item, *r_item)?;
                if difference.is_none() {
                    matches.push(j);
                }
                row.push(difference);
            }
            matrix.push(row);
            exact.push(matches);
        }

        let matched = has_complete_matching(&exact, r.len());
        trace!(
            size = l.len(),
            exact_pairs = exact.iter().map(Vec::len).sum::<usize>(),
            matched,
            "unordered comparison"
        );
        if matched {
            return Ok(None);
        }
        Ok(Some(Difference::Unordered(UnorderedCollectionDifference {
            detail: cx.detail("Different elements.", left, right)?,
            matrix,
        })))
    }
}

/// Whether every left index can be paired with a distinct right index
/// using only exact matches (augmenting paths).
pub(crate) fn has_complete_matching(exact: &[Vec<usize>], right_len: usize) -> bool {
    let mut owner: Vec<Option<usize>> = vec![None; right_len];
    for left in 0..exact.len() {
        let mut visited = vec![false; right_len];
        if !augment(left, exact, &mut visited, &mut owner) {
            return false;
        }
    }
    true
}

fn augment(
    left: usize,
    exact: &[Vec<usize>],
    visited: &mut [bool],
    owner: &mut [Option<usize>],
) -> bool {
    for &right in &exact[left] {
        if visited[right] {
            continue;
        }
        visited[right] = true;
        let free = match owner[right] {
            None => true,
            Some(other) => augment(other, exact, visited, owner),
        };
        if free {
            owner[right] = Some(left);
            return true;
        }
    }
    false
}
