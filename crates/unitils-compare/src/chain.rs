use std::sync::OnceLock;

use tracing::debug;
use unitils_types::{Reflect, SnapshotLimits};

use crate::comparator::Comparator;
use crate::comparators::{
    CollectionComparator, IgnoreDefaultsComparator, LenientDatesComparator,
    LenientNumberComparator, LenientOrderCollectionComparator, MapComparator, ObjectComparator,
    SimpleCasesComparator,
};
use crate::context::ComparisonContext;
use crate::difference::Difference;
use crate::error::CompareResult;
use crate::mode::{ComparatorMode, ComparatorModes};

/// An ordered chain of [`Comparator`]s.
///
/// Start with [`Self::for_modes`] for the shared chain of a mode set, or
/// assemble a custom one with [`Self::new`] and [`Self::add_comparator`].
/// A chain holds no per-call state and may be shared across threads.
pub struct ReflectionComparator {
    comparators: Vec<Box<dyn Comparator>>,
    modes: Option<ComparatorModes>,
}

impl ReflectionComparator {
    /// Create a chain asking `comparators` in the given order.
    pub fn new(comparators: Vec<Box<dyn Comparator>>) -> Self {
        Self {
            comparators,
            modes: None,
        }
    }

    /// Build a fresh chain for `modes`:
    /// LenientDates -> IgnoreDefaults -> LenientNumber -> SimpleCases ->
    /// Collection or LenientOrderCollection -> Map -> Object.
    ///
    /// The mode-specific comparators are present only when their mode is.
    pub fn with_modes(modes: ComparatorModes) -> Self {
        let mut chain = Self::new(Vec::new());
        if modes.contains(ComparatorMode::LenientDates) {
            chain.add_comparator(Box::new(LenientDatesComparator));
        }
        if modes.contains(ComparatorMode::IgnoreDefaults) {
            chain.add_comparator(Box::new(IgnoreDefaultsComparator));
        }
        chain.add_comparator(Box::new(LenientNumberComparator));
        chain.add_comparator(Box::new(SimpleCasesComparator));
        if modes.contains(ComparatorMode::LenientOrder) {
            chain.add_comparator(Box::new(LenientOrderCollectionComparator));
        } else {
            chain.add_comparator(Box::new(CollectionComparator));
        }
        chain.add_comparator(Box::new(MapComparator));
        chain.add_comparator(Box::new(ObjectComparator));
        chain.modes = Some(modes);
        chain
    }

    /// The shared chain for `modes`, built once per process.
    pub fn for_modes(modes: ComparatorModes) -> &'static ReflectionComparator {
        static CHAINS: OnceLock<Vec<ReflectionComparator>> = OnceLock::new();
        let chains = CHAINS.get_or_init(|| {
            ComparatorModes::all_combinations()
                .map(ReflectionComparator::with_modes)
                .collect()
        });
        &chains[modes.index()]
    }

    /// The shared strict chain.
    pub fn strict() -> &'static ReflectionComparator {
        Self::for_modes(ComparatorModes::STRICT)
    }

    /// Append a comparator to the end of the chain.
    pub fn add_comparator(&mut self, comparator: Box<dyn Comparator>) {
        self.comparators.push(comparator);
    }

    pub(crate) fn comparators(&self) -> impl Iterator<Item = &dyn Comparator> {
        self.comparators.iter().map(|c| c.as_ref())
    }

    /// Names of the comparators, in the order they are asked.
    pub fn comparator_names(&self) -> Vec<&str> {
        self.comparators().map(|c| c.name()).collect()
    }

    /// Number of comparators in the chain.
    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// The modes this chain was built for, if it is a standard chain.
    pub fn modes(&self) -> Option<ComparatorModes> {
        self.modes
    }

    /// Compare `expected` with `actual`, collecting every difference.
    pub fn get_difference(
        &self,
        expected: &dyn Reflect,
        actual: &dyn Reflect,
    ) -> CompareResult<Option<Difference>> {
        self.get_difference_with_limits(expected, actual, SnapshotLimits::default())
    }

    /// Like [`Self::get_difference`], capturing values within `limits`.
    pub fn get_difference_with_limits(
        &self,
        expected: &dyn Reflect,
        actual: &dyn Reflect,
        limits: SnapshotLimits,
    ) -> CompareResult<Option<Difference>> {
        let mut cx = ComparisonContext::new(self, false, limits);
        let difference = cx.difference(expected, actual)?;
        debug!(
            modes = %self.modes_label(),
            equal = difference.is_none(),
            leaves = difference.as_ref().map_or(0, Difference::leaf_count),
            "comparison finished"
        );
        Ok(difference)
    }

    /// Whether `expected` and `actual` are equal under this chain.
    ///
    /// Stops at the first mismatch where possible; always agrees with
    /// `get_difference(..).is_none()`.
    pub fn is_equal(&self, expected: &dyn Reflect, actual: &dyn Reflect) -> CompareResult<bool> {
        let mut cx = ComparisonContext::new(self, true, SnapshotLimits::default());
        let equal = cx.difference(expected, actual)?.is_none();
        debug!(modes = %self.modes_label(), equal, "equality check finished");
        Ok(equal)
    }

    fn modes_label(&self) -> String {
        self.modes
            .map_or_else(|| String::from("custom"), |modes| modes.to_string())
    }
}

impl Default for ReflectionComparator {
    fn default() -> Self {
        Self::with_modes(ComparatorModes::STRICT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_chain_order() {
        let chain = ReflectionComparator::with_modes(ComparatorModes::STRICT);
        assert_eq!(
            chain.comparator_names(),
            ["lenient-number", "simple-cases", "collection", "map", "object"]
        );
    }

    #[test]
    fn lenient_dates_precede_ignore_defaults() {
        let modes: ComparatorModes = ComparatorMode::ALL.as_slice().into();
        let chain = ReflectionComparator::with_modes(modes);
        assert_eq!(
            chain.comparator_names(),
            [
                "lenient-dates",
                "ignore-defaults",
                "lenient-number",
                "simple-cases",
                "lenient-order-collection",
                "map",
                "object"
            ]
        );
    }

    #[test]
    fn registry_returns_the_same_chain() {
        let modes = ComparatorModes::lenient();
        let a = ReflectionComparator::for_modes(modes);
        let b = ReflectionComparator::for_modes(modes);
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.modes(), Some(modes));
        assert!(!std::ptr::eq(a, ReflectionComparator::strict()));
    }

    #[test]
    fn empty_chain_rejects_everything() {
        let chain = ReflectionComparator::new(Vec::new());
        assert!(chain.is_empty());
        let err = chain.get_difference(&1, &1).unwrap_err();
        assert!(err.to_string().contains("no comparator accepts"));
    }

    #[test]
    fn custom_chain_uses_added_comparators() {
        let mut chain = ReflectionComparator::new(vec![Box::new(LenientNumberComparator)]);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.modes(), None);
        chain.add_comparator(Box::new(ObjectComparator));
        assert_eq!(chain.comparator_names(), ["lenient-number", "object"]);
        assert!(chain.is_equal(&5i64, &5u8).unwrap());
        assert!(chain.get_difference(&"a", &"a").unwrap().is_some());
    }
}
