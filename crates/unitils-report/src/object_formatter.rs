//! Human-readable rendering of captured values.

use unitils_types::{Captured, Reflect, Snapshot, SnapshotLimits};

use crate::error::ReportResult;

/// Renders [`Snapshot`]s the way they appear in difference reports.
///
/// | Value            | Output                   |
/// |------------------|--------------------------|
/// | string           | `"text"`                 |
/// | char             | `'c'`                    |
/// | null             | `null`                   |
/// | sequence         | `[1, 2, ...]`            |
/// | map              | `{"a"=1, "b"=2}`         |
/// | object           | `Person<name="Bob", age=31>` |
/// | object too deep  | `Person<...>`            |
///
/// Depth and element bounds are applied when the snapshot is captured; the
/// formatter only marks where something was left out.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectFormatter {
    limits: SnapshotLimits,
}

impl ObjectFormatter {
    pub fn new(limits: SnapshotLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SnapshotLimits {
        self.limits
    }

    /// Capture `value` within this formatter's limits and render it.
    pub fn format_value(&self, value: &dyn Reflect) -> ReportResult<String> {
        Ok(self.format(&Snapshot::capture(value, self.limits)?))
    }

    pub fn format(&self, snapshot: &Snapshot) -> String {
        let mut out = String::new();
        write_snapshot(snapshot, &mut out);
        out
    }
}

fn write_snapshot(snapshot: &Snapshot, out: &mut String) {
    match &snapshot.value {
        Captured::Null => out.push_str("null"),
        Captured::Bool { value } => out.push_str(&value.to_string()),
        Captured::Char { value } => {
            out.push('\'');
            out.push(*value);
            out.push('\'');
        }
        Captured::Number { value } => out.push_str(&value.to_string()),
        Captured::Str { value } => {
            out.push('"');
            out.push_str(value);
            out.push('"');
        }
        Captured::Date { value } => out.push_str(&value.to_rfc3339()),
        Captured::Unit { name } => out.push_str(name),
        Captured::Seq { items, len } => {
            out.push('[');
            write_items(items, *len, out, write_snapshot);
            out.push(']');
        }
        Captured::Map { entries, len } => {
            out.push('{');
            write_items(entries, *len, out, |(key, value), out| {
                write_snapshot(key, out);
                out.push('=');
                write_snapshot(value, out);
            });
            out.push('}');
        }
        Captured::Object { fields } => {
            out.push_str(&snapshot.type_name);
            out.push('<');
            for (i, (name, value)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(name);
                out.push('=');
                write_snapshot(value, out);
            }
            out.push('>');
        }
        Captured::Elided => {
            out.push_str(&snapshot.type_name);
            out.push_str("<...>");
        }
    }
}

/// Comma-separated items, with `...` standing in for whatever was not
/// captured.
fn write_items<T>(items: &[T], len: usize, out: &mut String, write: impl Fn(&T, &mut String)) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write(item, out);
    }
    if items.len() < len {
        if !items.is_empty() {
            out.push_str(", ");
        }
        out.push_str("...");
    }
}
