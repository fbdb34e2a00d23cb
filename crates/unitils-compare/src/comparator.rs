use unitils_types::{Kind, Reflect};

use crate::context::ComparisonContext;
use crate::difference::Difference;
use crate::error::CompareResult;

// ---------------------------------------------------------------------------
// Operand
// ---------------------------------------------------------------------------

/// One side of a comparison: the value and its resolved classification.
///
/// `kind` is never [`Kind::Indirect`] or [`Kind::Copied`]; the context
/// resolves handles before dispatching.
pub struct Operand<'v> {
    /// The value as handed to the chain, used for snapshots and type names.
    pub value: &'v dyn Reflect,
    /// Its classification.
    pub kind: Kind<'v>,
}

impl<'v> Operand<'v> {
    pub fn new(value: &'v dyn Reflect, kind: Kind<'v>) -> Self {
        Self { value, kind }
    }
}

// ---------------------------------------------------------------------------
// Comparator trait
// ---------------------------------------------------------------------------

/// A single comparison strategy in a [`ReflectionComparator`] chain.
///
/// The chain asks its comparators in order; the first one whose
/// [`can_compare`](Self::can_compare) accepts the pair computes the result.
/// Comparators are stateless and shared across threads; per-call state lives
/// in the [`ComparisonContext`].
///
/// [`ReflectionComparator`]: crate::ReflectionComparator
pub trait Comparator: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Whether this comparator handles the given pair.
    fn can_compare(&self, left: &Kind<'_>, right: &Kind<'_>) -> bool;

    /// Compare the pair, recursing through `cx` for nested values.
    ///
    /// Returns `Ok(None)` when the values are equal.
    fn compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        cx: &mut ComparisonContext<'_>,
    ) -> CompareResult<Option<Difference>>;
}
