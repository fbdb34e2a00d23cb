use unitils_compare::Difference;

use crate::formatter::{DifferenceFormatter, FormatterStyle};
use crate::object_formatter::ObjectFormatter;

/// The full failure text of a comparison: an optional user message, the
/// compared values and the formatted differences.
///
/// ```text
/// order mismatch
/// Expected: Order<id=1, lines=[2, 3]>
///   Actual: Order<id=1, lines=[3, 4]>
///
/// --- Found following differences ---
/// 1) ...
/// ```
pub struct DifferenceReport {
    message: Option<String>,
    objects: ObjectFormatter,
    formatter: Box<dyn DifferenceFormatter>,
}

impl DifferenceReport {
    pub fn new(style: FormatterStyle, objects: ObjectFormatter) -> Self {
        Self {
            message: None,
            objects,
            formatter: style.formatter(objects),
        }
    }

    /// Use a custom formatter for the differences.
    pub fn with_formatter(formatter: Box<dyn DifferenceFormatter>, objects: ObjectFormatter) -> Self {
        Self {
            message: None,
            objects,
            formatter,
        }
    }

    /// Prefix the report with `message`. Blank messages are ignored.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message = (!message.trim().is_empty()).then_some(message);
        self
    }

    pub fn render(&self, difference: &Difference) -> String {
        let mut out = String::new();
        if let Some(message) = &self.message {
            out.push_str(message);
            out.push('\n');
        }
        out.push_str(&format!(
            "Expected: {}\n  Actual: {}\n\n",
            self.objects.format(difference.left()),
            self.objects.format(difference.right())
        ));
        out.push_str("--- Found following differences ---\n");
        out.push_str(&self.formatter.format(difference));
        out
    }
}

impl Default for DifferenceReport {
    fn default() -> Self {
        Self::new(FormatterStyle::default(), ObjectFormatter::default())
    }
}
