//! Owned, bounded captures of reflected values.
//!
//! Borrowed [`Kind`] views cannot outlive a comparison, so differences keep
//! a [`Snapshot`] of each side instead. Captures stop at a maximum depth and
//! element count, which also makes them safe on cyclic graphs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReflectResult;
use crate::number::Number;
use crate::reflect::{Kind, Reflect};

/// Bounds applied while capturing a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLimits {
    /// Composite values nested deeper than this are elided.
    pub max_depth: usize,
    /// Sequences and maps keep at most this many elements.
    pub max_elements: usize,
}

impl Default for SnapshotLimits {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_elements: 15,
        }
    }
}

/// A captured value together with its short runtime type name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Short type name, e.g. `Person` or `Vec<i32>`.
    pub type_name: String,
    pub value: Captured,
}

/// The captured shape of a value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Captured {
    Null,
    Bool { value: bool },
    Char { value: char },
    Number { value: Number },
    Str { value: String },
    Date { value: DateTime<Utc> },
    /// A fieldless enum variant or unit struct, by name.
    Unit { name: String },
    /// `items` holds at most `max_elements` entries; `len` is the real length.
    /// Beyond the depth limit `items` is empty.
    Seq { items: Vec<Snapshot>, len: usize },
    Map {
        entries: Vec<(Snapshot, Snapshot)>,
        len: usize,
    },
    /// Fields in declaration order.
    Object { fields: Vec<(String, Snapshot)> },
    /// An object beyond the depth limit.
    Elided,
}

impl Snapshot {
    /// The snapshot of an absent value.
    pub fn null() -> Self {
        Self {
            type_name: String::from("null"),
            value: Captured::Null,
        }
    }

    /// Capture `value` within `limits`.
    pub fn capture(value: &dyn Reflect, limits: SnapshotLimits) -> ReflectResult<Self> {
        capture_at(value, limits, 0)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Captured::Null)
    }

    /// Returns `true` when both sides are non-null and of different types.
    pub fn differs_in_type(&self, other: &Snapshot) -> bool {
        !self.is_null() && !other.is_null() && self.type_name != other.type_name
    }
}

fn capture_at(value: &dyn Reflect, limits: SnapshotLimits, depth: usize) -> ReflectResult<Snapshot> {
    let type_name = short_type_name(value.type_name());
    let captured = match value.reflect()? {
        Kind::Null => return Ok(Snapshot::null()),
        Kind::Bool(value) => Captured::Bool { value },
        Kind::Char(value) => Captured::Char { value },
        Kind::Number(value) => Captured::Number { value },
        Kind::Str(s) => Captured::Str {
            value: s.to_owned(),
        },
        Kind::Date(value) => Captured::Date { value },
        Kind::Unit(unit) => {
            return Ok(Snapshot {
                type_name: unit.type_name.to_owned(),
                value: Captured::Unit {
                    name: unit.name.to_owned(),
                },
            })
        }
        Kind::Indirect(inner) | Kind::Copied(inner) => {
            return capture_at(inner.as_ref(), limits, depth)
        }
        Kind::Seq(seq) => {
            let len = seq.len();
            let mut items = Vec::new();
            if depth < limits.max_depth {
                for item in seq.items.iter().take(limits.max_elements) {
                    items.push(capture_at(*item, limits, depth + 1)?);
                }
            }
            Captured::Seq { items, len }
        }
        Kind::Map(map) => {
            let len = map.len();
            let mut entries = Vec::new();
            if depth < limits.max_depth {
                for (k, v) in map.entries.iter().take(limits.max_elements) {
                    entries.push((
                        capture_at(*k, limits, depth + 1)?,
                        capture_at(*v, limits, depth + 1)?,
                    ));
                }
            }
            Captured::Map { entries, len }
        }
        Kind::Object(object) => {
            let type_name = short_type_name(object.type_name);
            if depth >= limits.max_depth {
                return Ok(Snapshot {
                    type_name,
                    value: Captured::Elided,
                });
            }
            let mut fields = Vec::with_capacity(object.fields.len());
            for field in &object.fields {
                fields.push((
                    field.name.to_owned(),
                    capture_at(field.value, limits, depth + 1)?,
                ));
            }
            return Ok(Snapshot {
                type_name,
                value: Captured::Object { fields },
            });
        }
    };
    Ok(Snapshot {
        type_name,
        value: captured,
    })
}

/// Strip module paths from a type name, including inside generic arguments.
///
/// Idempotent on names that are already short.
///
/// `alloc::vec::Vec<my_crate::model::User>` becomes `Vec<User>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    for (i, c) in full.char_indices() {
        if matches!(c, '<' | '>' | ',' | '(' | ')' | '[' | ']' | ';' | '&' | '*' | ' ') {
            push_type_path(&mut out, &full[segment_start..i]);
            out.push(c);
            segment_start = i + c.len_utf8();
        }
    }
    push_type_path(&mut out, &full[segment_start..]);
    out
}

// Module segments are snake_case; the first segment starting with an
// uppercase letter begins the type (`Enum::Variant` stays intact).
fn push_type_path(out: &mut String, token: &str) {
    let parts: Vec<&str> = token.split("::").collect();
    let start = parts
        .iter()
        .position(|part| part.starts_with(|c: char| c.is_uppercase()))
        .unwrap_or(parts.len().saturating_sub(1));
    out.push_str(&parts[start..].join("::"));
}
