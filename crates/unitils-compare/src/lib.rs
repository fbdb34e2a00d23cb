//! Lenient structural comparison for Unitils.
//!
//! Two values are compared by walking their [`Reflect`] structure with a
//! chain of comparators. The chain for a set of [`ComparatorModes`] decides
//! which differences are tolerated: defaults on the expected side, the order
//! of collection elements, or the actual value of dates. The outcome is
//! `None` when the values are equal, or a [`Difference`] tree describing every
//! mismatch.
//!
//! # Quick Start
//!
//! ```rust
//! use unitils_compare::{get_difference, ComparatorMode, ComparatorModes};
//!
//! let expected = vec![1, 2, 3];
//! let actual = vec![3, 1, 2];
//!
//! let strict = get_difference(&expected, &actual, ComparatorModes::STRICT).unwrap();
//! assert!(strict.is_some());
//!
//! let lenient = get_difference(&expected, &actual, ComparatorMode::LenientOrder.into()).unwrap();
//! assert!(lenient.is_none());
//! ```
//!
//! # Key Types
//!
//! - [`ComparatorModes`] -- Set of leniency flags
//! - [`ReflectionComparator`] -- Ordered chain of comparators, one shared chain per mode set
//! - [`Comparator`] -- A single comparison strategy
//! - [`ComparisonContext`] -- Per-call path and cycle bookkeeping
//! - [`Difference`] -- Immutable tree of mismatches

pub mod chain;
pub mod comparator;
pub mod comparators;
pub mod context;
pub mod difference;
pub mod error;
pub mod mode;

// Re-exports for convenience.
pub use chain::ReflectionComparator;
pub use comparator::{Comparator, Operand};
pub use context::ComparisonContext;
pub use difference::{
    CollectionDifference, Detail, Difference, FieldPath, MapDifference, ObjectDifference, Step,
    UnorderedCollectionDifference,
};
pub use error::{CompareError, CompareResult};
pub use mode::{ComparatorMode, ComparatorModes, ParseModeError};

use unitils_types::Reflect;

/// Compare `expected` with `actual` under `modes`.
///
/// Returns `Ok(None)` when they are equal.
pub fn get_difference(
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    modes: ComparatorModes,
) -> CompareResult<Option<Difference>> {
    ReflectionComparator::for_modes(modes).get_difference(expected, actual)
}

/// Whether `expected` equals `actual` under `modes`.
pub fn is_equal(
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    modes: ComparatorModes,
) -> CompareResult<bool> {
    ReflectionComparator::for_modes(modes).is_equal(expected, actual)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeMap, HashMap, HashSet};
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use unitils_types::ReflectError;

    use super::*;

    #[derive(unitils_types::Reflect, Clone)]
    struct Address {
        street: String,
        city: String,
    }

    #[derive(unitils_types::Reflect, Clone)]
    struct Person {
        name: Option<String>,
        age: u32,
        address: Option<Address>,
    }

    #[derive(unitils_types::Reflect)]
    struct Pet {
        name: String,
    }

    #[derive(unitils_types::Reflect)]
    struct Node {
        name: String,
        next: Option<Rc<RefCell<Node>>>,
    }

    fn person(name: Option<&str>, age: u32) -> Person {
        Person {
            name: name.map(str::to_owned),
            age,
            address: Some(Address {
                street: "Main St 1".into(),
                city: "Ghent".into(),
            }),
        }
    }

    fn strict(expected: &dyn Reflect, actual: &dyn Reflect) -> Option<Difference> {
        get_difference(expected, actual, ComparatorModes::STRICT).unwrap()
    }

    // -----------------------------------------------------------------------
    // 1. Strict comparison of equal graphs finds nothing
    // -----------------------------------------------------------------------
    #[test]
    fn strict_equal_graphs() {
        let a = person(Some("Alice"), 30);
        let b = a.clone();
        assert!(strict(&a, &b).is_none());
        assert!(is_equal(&a, &b, ComparatorModes::STRICT).unwrap());
    }

    // -----------------------------------------------------------------------
    // 2. Nested field difference carries its full path
    // -----------------------------------------------------------------------
    #[test]
    fn nested_difference_path() {
        let a = person(Some("Alice"), 30);
        let mut b = a.clone();
        if let Some(address) = b.address.as_mut() {
            address.city = "Bruges".into();
        }
        let diff = strict(&a, &b).unwrap();
        let Difference::Object(object) = &diff else {
            panic!("expected an object difference, got {diff:?}");
        };
        assert_eq!(object.fields.len(), 1);
        let (name, nested) = &object.fields[0];
        assert_eq!(name, "address");
        let Difference::Object(address) = nested else {
            panic!("expected a nested object difference");
        };
        let (_, leaf) = &address.fields[0];
        assert_eq!(leaf.path().to_string(), "address.city");
        assert_eq!(leaf.message(), "Different object values.");
        assert_eq!(diff.leaf_count(), 1);
    }

    // -----------------------------------------------------------------------
    // 3. Size mismatch short-circuits without element comparison
    // -----------------------------------------------------------------------
    #[test]
    fn size_mismatch_is_a_leaf() {
        let diff = strict(&vec![1, 2, 3], &vec![1, 2]).unwrap();
        assert!(matches!(diff, Difference::Leaf(_)));
        assert_eq!(
            diff.message(),
            "Different array/collection sizes. Left size: 3, right size: 2"
        );
    }

    #[test]
    fn size_mismatch_visits_no_element() {
        use unitils_types::Kind;

        // Counts the number pairs offered to the chain, then declines them.
        struct CountNumbers(Arc<AtomicUsize>);
        impl Comparator for CountNumbers {
            fn name(&self) -> &str {
                "count-numbers"
            }
            fn can_compare(&self, left: &Kind<'_>, right: &Kind<'_>) -> bool {
                if matches!((left, right), (Kind::Number(_), Kind::Number(_))) {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
                false
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

        let chain_with = |collection: Box<dyn Comparator>, seen: &Arc<AtomicUsize>| {
            ReflectionComparator::new(vec![
                Box::new(CountNumbers(Arc::clone(seen))),
                Box::new(comparators::LenientNumberComparator),
                collection,
            ])
        };

        let seen = Arc::new(AtomicUsize::new(0));
        let ordered = chain_with(Box::new(comparators::CollectionComparator), &seen);
        let diff = ordered.get_difference(&vec![1, 2, 3], &vec![1, 2]).unwrap();
        assert!(matches!(diff, Some(Difference::Leaf(_))));
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        let unordered = chain_with(Box::new(comparators::LenientOrderCollectionComparator), &seen);
        let diff = unordered.get_difference(&vec![1, 2, 3], &vec![1, 2]).unwrap();
        assert!(matches!(diff, Some(Difference::Leaf(_))));
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        // Same sizes do reach the elements.
        assert!(!ordered.is_equal(&vec![1, 2], &vec![1, 3]).unwrap());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    // -----------------------------------------------------------------------
    // 4. Element order only matters without LENIENT_ORDER
    // -----------------------------------------------------------------------
    #[test]
    fn lenient_order() {
        let expected = [1, 2, 3];
        let actual = vec![3, 1, 2];
        let diff = strict(&expected, &actual).unwrap();
        let Difference::Collection(collection) = &diff else {
            panic!("expected a collection difference");
        };
        assert_eq!(collection.elements.keys().copied().collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(collection.elements[&1].path().to_string(), "[1]");

        let modes = ComparatorMode::LenientOrder.into();
        assert!(get_difference(&expected, &actual, modes).unwrap().is_none());
        assert!(is_equal(&expected, &actual, modes).unwrap());
    }

    // -----------------------------------------------------------------------
    // 5. Unordered failure keeps the full matrix
    // -----------------------------------------------------------------------
    #[test]
    fn unordered_failure_matrix() {
        let modes = ComparatorMode::LenientOrder.into();
        let diff = get_difference(&vec![1, 2], &vec![2, 3], modes).unwrap().unwrap();
        let Difference::Unordered(unordered) = &diff else {
            panic!("expected an unordered difference");
        };
        assert_eq!((unordered.left_len(), unordered.right_len()), (2, 2));
        assert!(unordered.is_exact_match(1, 0));
        assert!(!unordered.is_exact_match(0, 0));
        assert_eq!(unordered.element(0, 1).unwrap().path().to_string(), "[0,1]");
    }

    // -----------------------------------------------------------------------
    // 6. Duplicates cannot all be matched to one element
    // -----------------------------------------------------------------------
    #[test]
    fn unordered_respects_multiplicity() {
        let modes = ComparatorMode::LenientOrder.into();
        assert!(!is_equal(&vec![1, 1, 2], &vec![1, 2, 2], modes).unwrap());
        assert!(is_equal(&vec![1, 2, 1], &vec![1, 1, 2], modes).unwrap());
    }

    // -----------------------------------------------------------------------
    // 7. Ignore defaults skips null expected fields only
    // -----------------------------------------------------------------------
    #[test]
    fn ignore_defaults() {
        let modes = ComparatorMode::IgnoreDefaults.into();
        let bob = Person {
            name: Some("Bob".into()),
            age: 31,
            address: None,
        };
        let differs = Person {
            name: None,
            age: 30,
            address: None,
        };
        let matches = Person {
            name: None,
            age: 31,
            address: None,
        };
        let diff = get_difference(&differs, &bob, modes).unwrap().unwrap();
        assert_eq!(diff.leaf_count(), 1);
        assert!(get_difference(&matches, &bob, modes).unwrap().is_none());
        // Not symmetric: the actual side's defaults are not ignored.
        assert!(get_difference(&bob, &matches, modes).unwrap().is_some());
    }

    // -----------------------------------------------------------------------
    // 8. Cyclic graphs terminate
    // -----------------------------------------------------------------------
    #[test]
    fn cycles_terminate_equal() {
        let cyclic = |name: &str| {
            let node = Rc::new(RefCell::new(Node {
                name: name.into(),
                next: None,
            }));
            node.borrow_mut().next = Some(Rc::clone(&node));
            node
        };
        let a = cyclic("loop");
        let b = cyclic("loop");
        assert!(strict(&a, &b).is_none());

        let c = cyclic("other");
        let diff = strict(&a, &c).unwrap();
        assert_eq!(diff.leaf_count(), 1);

        for node in [a, b, c] {
            node.borrow_mut().next = None;
        }
    }

    // -----------------------------------------------------------------------
    // 9. Maps: extra actual keys ignored, missing expected keys differ
    // -----------------------------------------------------------------------
    #[test]
    fn map_entries() {
        let expected: HashMap<&str, i32> = [("a", 1)].into();
        let actual: HashMap<&str, i32> = [("a", 1), ("b", 2)].into();
        assert!(strict(&expected, &actual).is_none());

        let diff = strict(&actual, &expected).unwrap();
        assert_eq!(diff.message(), "Different map sizes. Left size: 2, right size: 1");

        let expected: BTreeMap<&str, i32> = [("a", 1), ("c", 3)].into();
        let actual: BTreeMap<&str, i32> = [("a", 1), ("b", 3)].into();
        let diff = strict(&expected, &actual).unwrap();
        let Difference::Map(map) = &diff else {
            panic!("expected a map difference");
        };
        assert_eq!(map.entries.len(), 1);
        let (_, missing) = &map.entries[0];
        assert_eq!(missing.message(), "Right value null.");
        assert_eq!(missing.path().to_string(), "[\"c\"]");
    }

    // -----------------------------------------------------------------------
    // 10. Numbers compare by value across widths
    // -----------------------------------------------------------------------
    #[test]
    fn numbers_by_value() {
        assert!(strict(&5i32, &5u64).is_none());
        assert!(strict(&5i32, &5.0f64).is_none());
        assert!(strict(&f64::NAN, &f32::NAN).is_none());
        let diff = strict(&5u8, &6i64).unwrap();
        assert_eq!(diff.message(), "Different primitive values.");
        assert!(strict(&5.5f64, &5i32).is_some());
    }

    // -----------------------------------------------------------------------
    // 11. Lenient dates only check presence
    // -----------------------------------------------------------------------
    #[test]
    fn lenient_dates() {
        let jan = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let feb = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(strict(&jan, &feb).unwrap().message(), "Different date values.");

        let modes = ComparatorMode::LenientDates.into();
        assert!(get_difference(&jan, &feb, modes).unwrap().is_none());
        let diff = get_difference(&jan, &None::<chrono::DateTime<Utc>>, modes)
            .unwrap()
            .unwrap();
        assert_eq!(diff.message(), "Lenient dates, but not both value or both null.");
    }

    // -----------------------------------------------------------------------
    // 12. Different types yield a type leaf
    // -----------------------------------------------------------------------
    #[test]
    fn type_mismatch() {
        let pet = Pet { name: "Rex".into() };
        let diff = strict(&person(Some("Rex"), 3), &pet).unwrap();
        assert_eq!(diff.message(), "Different types. Left: Person, right: Pet");
        assert!(diff.path().is_root());

        let diff = strict(&"1", &1).unwrap();
        assert!(diff.message().starts_with("Different types."));
    }

    // -----------------------------------------------------------------------
    // 13. Null handling
    // -----------------------------------------------------------------------
    #[test]
    fn null_sides() {
        assert!(strict(&None::<i32>, &None::<String>).is_none());
        assert_eq!(strict(&None::<i32>, &Some(1)).unwrap().message(), "Left value null.");
        assert_eq!(strict(&Some(1), &None::<i32>).unwrap().message(), "Right value null.");
    }

    // -----------------------------------------------------------------------
    // 14. A borrowed cell aborts with a reflection error
    // -----------------------------------------------------------------------
    #[test]
    fn borrow_conflict_is_an_error() {
        let cell = RefCell::new(vec![1]);
        let _guard = cell.borrow_mut();
        let err = get_difference(&cell, &vec![1], ComparatorModes::STRICT).unwrap_err();
        assert!(matches!(
            err,
            CompareError::Reflect {
                source: ReflectError::BorrowConflict { .. },
                ..
            }
        ));
    }

    // -----------------------------------------------------------------------
    // 15. is_equal agrees with get_difference
    // -----------------------------------------------------------------------
    #[test]
    fn is_equal_agrees_with_get_difference() {
        let pairs: [(&dyn Reflect, &dyn Reflect); 4] = [
            (&[1, 2], &[1, 2]),
            (&[1, 2], &[2, 1]),
            (&"x", &"y"),
            (&None::<i32>, &0),
        ];
        for modes in ComparatorModes::all_combinations() {
            for (expected, actual) in pairs {
                assert_eq!(
                    is_equal(expected, actual, modes).unwrap(),
                    get_difference(expected, actual, modes).unwrap().is_none(),
                    "modes {modes}"
                );
            }
        }
    }

    // -----------------------------------------------------------------------
    // 16. Custom comparators take part in the chain
    // -----------------------------------------------------------------------
    #[test]
    fn custom_comparator() {
        use unitils_types::Kind;

        struct CaseInsensitive;
        impl Comparator for CaseInsensitive {
            fn name(&self) -> &str {
                "case-insensitive"
            }
            fn can_compare(&self, left: &Kind<'_>, right: &Kind<'_>) -> bool {
                matches!((left, right), (Kind::Str(_), Kind::Str(_)))
            }
            fn compare(
                &self,
                left: &Operand<'_>,
                right: &Operand<'_>,
                cx: &mut ComparisonContext<'_>,
            ) -> CompareResult<Option<Difference>> {
                match (&left.kind, &right.kind) {
                    (Kind::Str(l), Kind::Str(r)) if l.eq_ignore_ascii_case(r) => Ok(None),
                    _ => cx.leaf("Different text.", left, right),
                }
            }
        }

        let mut chain = ReflectionComparator::new(vec![Box::new(CaseInsensitive)]);
        chain.add_comparator(Box::new(comparators::CollectionComparator));
        assert!(chain.is_equal(&vec!["A", "b"], &vec!["a", "B"]).unwrap());
        assert!(!chain.is_equal(&vec!["A"], &vec!["c"]).unwrap());
    }

    // -----------------------------------------------------------------------
    // 17. Hash sets compare as multisets in every mode
    // -----------------------------------------------------------------------
    #[test]
    fn hash_sets_ignore_iteration_order() {
        let expected: HashSet<i32> = (0..20).collect();
        let actual: HashSet<i32> = (0..20).rev().collect();
        assert!(strict(&expected, &actual).is_none());
        assert!(is_equal(&expected, &actual, ComparatorModes::STRICT).unwrap());

        let changed: HashSet<i32> = (0..19).chain([42]).collect();
        let diff = strict(&expected, &changed).unwrap();
        assert!(matches!(diff, Difference::Unordered(_)));
        assert!(!is_equal(&expected, &changed, ComparatorModes::STRICT).unwrap());
    }

    // -----------------------------------------------------------------------
    // 18. Values copied out of cells are compared, never assumed equal
    // -----------------------------------------------------------------------
    #[test]
    fn cell_contents_are_always_compared() {
        let expected = vec![Cell::new((1, 2)), Cell::new((3, 4))];
        let actual = vec![Cell::new((1, 2)), Cell::new((3, 5))];
        let diff = strict(&expected, &actual).unwrap();
        let Difference::Collection(collection) = &diff else {
            panic!("expected a collection difference, got {diff:?}");
        };
        assert_eq!(collection.elements.keys().copied().collect::<Vec<_>>(), [1]);
        assert_eq!(diff.leaf_count(), 1);
        assert!(!is_equal(&expected, &actual, ComparatorModes::STRICT).unwrap());

        let same = vec![Cell::new((1, 2)), Cell::new((3, 4))];
        assert!(strict(&expected, &same).is_none());
    }

    // -----------------------------------------------------------------------
    // 19. is_equal does not capture the compared values
    // -----------------------------------------------------------------------
    #[test]
    fn first_difference_skips_snapshots() {
        use unitils_types::{Snapshot, SnapshotLimits};

        let mut cx = ComparisonContext::new(ReflectionComparator::strict(), true, SnapshotLimits::default());
        let diff = cx.difference(&vec![1, 2], &vec![1, 3]).unwrap().unwrap();
        assert_eq!(diff.left(), &Snapshot::null());
        assert_eq!(diff.path().to_string(), "<top-level>");

        let mut cx = ComparisonContext::new(ReflectionComparator::strict(), false, SnapshotLimits::default());
        let diff = cx.difference(&vec![1, 2], &vec![1, 3]).unwrap().unwrap();
        assert_ne!(diff.left(), &Snapshot::null());
    }
}
