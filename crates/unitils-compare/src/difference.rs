//! The difference tree produced by a comparison.
//!
//! `None` means "equal under the active modes"; otherwise a [`Difference`]
//! is built bottom-up in a single traversal and never changes afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use unitils_types::{Captured, Snapshot};

// ---------------------------------------------------------------------------
// FieldPath
// ---------------------------------------------------------------------------

/// One step from a parent value to a nested one.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// An object field.
    Field(String),
    /// A position in an ordered sequence.
    Index(usize),
    /// A map entry, identified by its expected-side key.
    Key(Snapshot),
    /// A left/right pairing inside an unordered sequence.
    Pair(usize, usize),
}

/// The location of a difference, from the compared root downwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<Step>);

impl FieldPath {
    /// A path made of `steps`, outermost first.
    pub fn new(steps: Vec<Step>) -> Self {
        Self(steps)
    }

    /// The steps from the root, outermost first.
    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    /// Whether this is the compared root itself.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<top-level>");
        }
        for (i, step) in self.0.iter().enumerate() {
            match step {
                Step::Field(name) if i == 0 => write!(f, "{name}")?,
                Step::Field(name) => write!(f, ".{name}")?,
                Step::Index(index) => write!(f, "[{index}]")?,
                Step::Key(key) => write!(f, "[{}]", key_label(key))?,
                Step::Pair(left, right) => write!(f, "[{left},{right}]")?,
            }
        }
        Ok(())
    }
}

fn key_label(key: &Snapshot) -> String {
    match &key.value {
        Captured::Null => "null".to_owned(),
        Captured::Bool { value } => value.to_string(),
        Captured::Char { value } => format!("'{value}'"),
        Captured::Number { value } => value.to_string(),
        Captured::Str { value } => format!("\"{value}\""),
        Captured::Date { value } => value.to_rfc3339(),
        Captured::Unit { name } => name.clone(),
        _ => key.type_name.clone(),
    }
}

// ---------------------------------------------------------------------------
// Difference
// ---------------------------------------------------------------------------

/// What every difference records about the pair it describes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Detail {
    /// Why the pair differs, e.g. `Different object values.`
    pub message: String,
    /// Capture of the expected side.
    pub left: Snapshot,
    /// Capture of the actual side.
    pub right: Snapshot,
    pub path: FieldPath,
}

/// Differing fields of two objects of the same type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectDifference {
    pub detail: Detail,
    /// Field name to difference, in declaration order.
    pub fields: Vec<(String, Difference)>,
}

/// Differing elements of two ordered sequences of equal length.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CollectionDifference {
    pub detail: Detail,
    /// Index to difference, for the mismatching positions only.
    pub elements: BTreeMap<usize, Difference>,
}

/// Differing values of two maps, keyed by the expected-side key.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapDifference {
    pub detail: Detail,
    pub entries: Vec<(Snapshot, Difference)>,
}

/// Two unordered sequences with no exact one-to-one pairing.
///
/// `matrix[i][j]` is the difference between left element `i` and right
/// element `j`; `None` marks an exact match.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnorderedCollectionDifference {
    pub detail: Detail,
    pub matrix: Vec<Vec<Option<Difference>>>,
}

impl UnorderedCollectionDifference {
    /// Number of expected elements.
    pub fn left_len(&self) -> usize {
        self.matrix.len()
    }

    /// Number of actual elements.
    pub fn right_len(&self) -> usize {
        self.matrix.first().map_or(0, Vec::len)
    }

    /// The difference between left element `i` and right element `j`.
    pub fn element(&self, left: usize, right: usize) -> Option<&Difference> {
        self.matrix.get(left)?.get(right)?.as_ref()
    }

    /// Whether the `left` and `right` elements are equal.
    pub fn is_exact_match(&self, left: usize, right: usize) -> bool {
        matches!(self.matrix.get(left).and_then(|row| row.get(right)), Some(None))
    }
}

/// The result of comparing an expected value with an actual one.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// A terminal mismatch: different scalars, types or sizes.
    Leaf(Detail),
    /// Two objects of the same type with differing fields.
    Object(ObjectDifference),
    /// Two ordered sequences of the same length.
    Collection(CollectionDifference),
    /// Two maps with differing values.
    Map(MapDifference),
    /// Two sequences compared regardless of order.
    Unordered(UnorderedCollectionDifference),
}

impl Difference {
    /// The record shared by every kind of difference.
    pub fn detail(&self) -> &Detail {
        match self {
            Difference::Leaf(detail) => detail,
            Difference::Object(d) => &d.detail,
            Difference::Collection(d) => &d.detail,
            Difference::Map(d) => &d.detail,
            Difference::Unordered(d) => &d.detail,
        }
    }

    /// Why the pair differs.
    pub fn message(&self) -> &str {
        &self.detail().message
    }

    /// The expected side.
    pub fn left(&self) -> &Snapshot {
        &self.detail().left
    }

    /// The actual side.
    pub fn right(&self) -> &Snapshot {
        &self.detail().right
    }

    /// Where the pair sits below the compared root.
    pub fn path(&self) -> &FieldPath {
        &self.detail().path
    }

    /// Number of leaf differences in the tree.
    ///
    /// An unordered difference counts as one, since it has no single pairing.
    pub fn leaf_count(&self) -> usize {
        match self {
            Difference::Leaf(_) | Difference::Unordered(_) => 1,
            Difference::Object(d) => d.fields.iter().map(|(_, d)| d.leaf_count()).sum(),
            Difference::Collection(d) => d.elements.values().map(Difference::leaf_count).sum(),
            Difference::Map(d) => d.entries.iter().map(|(_, d)| d.leaf_count()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use unitils_types::{Number, SnapshotLimits};

    use super::*;

    fn snap(value: &dyn unitils_types::Reflect) -> Snapshot {
        Snapshot::capture(value, SnapshotLimits::default()).unwrap()
    }

    fn leaf(path: Vec<Step>) -> Difference {
        Difference::Leaf(Detail {
            message: "Different values.".into(),
            left: snap(&1),
            right: snap(&2),
            path: FieldPath::new(path),
        })
    }

    #[test]
    fn path_display() {
        assert_eq!(FieldPath::default().to_string(), "<top-level>");
        let path = FieldPath::new(vec![
            Step::Field("orders".into()),
            Step::Index(2),
            Step::Field("lines".into()),
            Step::Pair(0, 1),
            Step::Key(snap(&"sku")),
        ]);
        assert_eq!(path.to_string(), "orders[2].lines[0,1][\"sku\"]");
        assert_eq!(FieldPath::new(vec![Step::Index(0)]).to_string(), "[0]");
    }

    #[test]
    fn unordered_matrix_lookup() {
        let diff = UnorderedCollectionDifference {
            detail: Detail {
                message: "Different elements.".into(),
                left: Snapshot::null(),
                right: Snapshot::null(),
                path: FieldPath::default(),
            },
            matrix: vec![vec![None, Some(leaf(vec![Step::Pair(0, 1)]))]],
        };
        assert_eq!((diff.left_len(), diff.right_len()), (1, 2));
        assert!(diff.is_exact_match(0, 0));
        assert!(!diff.is_exact_match(0, 1));
        assert!(!diff.is_exact_match(3, 0));
        assert!(diff.element(0, 1).is_some());
        assert!(diff.element(0, 0).is_none());
    }

    #[test]
    fn leaf_count_sums_nested_leaves() {
        let object = Difference::Object(ObjectDifference {
            detail: leaf(vec![]).detail().clone(),
            fields: vec![
                ("a".into(), leaf(vec![Step::Field("a".into())])),
                ("b".into(), leaf(vec![Step::Field("b".into())])),
            ],
        });
        assert_eq!(object.leaf_count(), 2);
        assert_eq!(object.left().value, Captured::Number { value: Number::from(1) });
    }
}
