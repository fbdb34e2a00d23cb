use std::collections::HashMap;

use tracing::trace;
use unitils_types::{Identity, Kind, Reflect, Snapshot, SnapshotLimits};

use crate::chain::ReflectionComparator;
use crate::comparator::Operand;
use crate::difference::{Detail, Difference, FieldPath, Step};
use crate::error::{CompareError, CompareResult};

/// Stand-in for a value that is absent, e.g. a missing map entry.
pub const NULL: &dyn Reflect = &();

/// Per-call state of one top-level comparison.
///
/// Holds the path from the root to the pair currently compared and the
/// outcome of every composite pair visited so far. A pair is registered as
/// equal before its children are compared, so a cycle back to it is treated
/// as equal; afterwards the real outcome replaces the registration.
///
/// Values reached through a [`Kind::Copied`] handle live in a temporary box
/// whose address may be reused once it is dropped, so they are never
/// registered.
pub struct ComparisonContext<'c> {
    chain: &'c ReflectionComparator,
    path: Vec<Step>,
    traversed: HashMap<(Identity, Identity), bool>,
    /// Number of copied handles between the root and the current pair.
    copies: usize,
    only_first_difference: bool,
    limits: SnapshotLimits,
}

impl<'c> ComparisonContext<'c> {
    pub fn new(
        chain: &'c ReflectionComparator,
        only_first_difference: bool,
        limits: SnapshotLimits,
    ) -> Self {
        Self {
            chain,
            path: Vec::new(),
            traversed: HashMap::new(),
            copies: 0,
            only_first_difference,
            limits,
        }
    }

    /// When set, comparators may stop at the first mismatch.
    pub fn only_first_difference(&self) -> bool {
        self.only_first_difference
    }

    pub fn limits(&self) -> SnapshotLimits {
        self.limits
    }

    /// The path to the pair currently being compared.
    pub fn field_path(&self) -> FieldPath {
        FieldPath::new(self.path.clone())
    }

    /// Compare two values with the chain, at the current path.
    pub fn difference(
        &mut self,
        left: &dyn Reflect,
        right: &dyn Reflect,
    ) -> CompareResult<Option<Difference>> {
        let left_kind = match self.reflect(left)? {
            Kind::Indirect(inner) => return self.difference(inner.as_ref(), right),
            Kind::Copied(inner) => return self.through_copy(inner.as_ref(), right),
            kind => kind,
        };
        let right_kind = match self.reflect(right)? {
            Kind::Indirect(inner) => return self.difference(left, inner.as_ref()),
            Kind::Copied(inner) => return self.through_copy(left, inner.as_ref()),
            kind => kind,
        };

        let pair = if self.copies == 0 {
            left_kind.identity().zip(right_kind.identity())
        } else {
            None
        };
        if let Some(pair) = pair {
            if self.traversed.get(&pair) == Some(&true) {
                trace!(path = %self.field_path(), "pair already traversed, treated as equal");
                return Ok(None);
            }
            self.traversed.insert(pair, true);
        }

        let left = Operand::new(left, left_kind);
        let right = Operand::new(right, right_kind);
        let chain = self.chain;
        let comparator = chain
            .comparators()
            .find(|c| c.can_compare(&left.kind, &right.kind))
            .ok_or_else(|| CompareError::NoComparator {
                path: self.field_path().to_string(),
                left: left.kind.label(),
                right: right.kind.label(),
            })?;
        trace!(comparator = comparator.name(), path = %self.field_path(), "comparing");
        let result = comparator.compare(&left, &right, self)?;

        if let Some(pair) = pair {
            self.traversed.insert(pair, result.is_none());
        }
        Ok(result)
    }

    fn through_copy(
        &mut self,
        left: &dyn Reflect,
        right: &dyn Reflect,
    ) -> CompareResult<Option<Difference>> {
        self.copies += 1;
        let result = self.difference(left, right);
        self.copies -= 1;
        result
    }

    /// Compare a nested pair one `step` below the current path.
    pub fn nested(
        &mut self,
        step: Step,
        left: &dyn Reflect,
        right: &dyn Reflect,
    ) -> CompareResult<Option<Difference>> {
        self.path.push(step);
        let result = self.difference(left, right);
        self.path.pop();
        result
    }

    /// Compare two values strictly, in a context of their own.
    ///
    /// Used to match map keys, which are never compared leniently.
    pub fn strictly_equal(&self, left: &dyn Reflect, right: &dyn Reflect) -> CompareResult<bool> {
        let strict = ReflectionComparator::strict();
        let mut cx = ComparisonContext::new(strict, true, self.limits);
        Ok(cx.difference(left, right)?.is_none())
    }

    /// Capture `value` for a difference report.
    pub fn snapshot(&self, value: &dyn Reflect) -> CompareResult<Snapshot> {
        Snapshot::capture(value, self.limits)
            .map_err(|e| CompareError::reflect(self.field_path().to_string(), e))
    }

    /// The detail record of a difference between `left` and `right` at the
    /// current path.
    ///
    /// When only the first difference is wanted nobody reads the values, so
    /// they are not captured.
    pub fn detail(
        &self,
        message: impl Into<String>,
        left: &Operand<'_>,
        right: &Operand<'_>,
    ) -> CompareResult<Detail> {
        if self.only_first_difference {
            return Ok(Detail {
                message: message.into(),
                left: Snapshot::null(),
                right: Snapshot::null(),
                path: self.field_path(),
            });
        }
        Ok(Detail {
            message: message.into(),
            left: self.snapshot(left.value)?,
            right: self.snapshot(right.value)?,
            path: self.field_path(),
        })
    }

    /// A leaf difference at the current path.
    pub fn leaf(
        &self,
        message: impl Into<String>,
        left: &Operand<'_>,
        right: &Operand<'_>,
    ) -> CompareResult<Option<Difference>> {
        Ok(Some(Difference::Leaf(self.detail(message, left, right)?)))
    }

    fn reflect<'v>(&self, value: &'v dyn Reflect) -> CompareResult<Kind<'v>> {
        value
            .reflect()
            .map_err(|e| CompareError::reflect(self.field_path().to_string(), e))
    }
}

/// Short type name of an operand, for messages.
pub(crate) fn type_label(operand: &Operand<'_>) -> String {
    match &operand.kind {
        Kind::Object(object) => unitils_types::short_type_name(object.type_name),
        Kind::Unit(unit) => unitils_types::short_type_name(unit.type_name),
        _ => unitils_types::short_type_name(operand.value.type_name()),
    }
}
