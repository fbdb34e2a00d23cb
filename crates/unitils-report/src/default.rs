use unitils_compare::{Difference, FieldPath, UnorderedCollectionDifference};

use crate::best_match::BestMatchFinder;
use crate::formatter::DifferenceFormatter;
use crate::object_formatter::ObjectFormatter;

const INDENT: &str = "    ";

/// Numbered list of the leaf differences.
///
/// ```text
/// 1) Different object values.
/// ---------------------------
/// Field: name
///
/// Left : "Bob"
/// Right: "Alice"
/// ```
///
/// An unordered collection that did not match gets its own entry, followed
/// by an indented block per best match. Numbering restarts inside each
/// block and field paths there are relative to the compared elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultDifferenceFormatter {
    objects: ObjectFormatter,
    finder: BestMatchFinder,
}

impl DefaultDifferenceFormatter {
    pub fn new(objects: ObjectFormatter) -> Self {
        Self {
            objects,
            finder: BestMatchFinder::new(),
        }
    }
}

impl DifferenceFormatter for DefaultDifferenceFormatter {
    fn name(&self) -> &str {
        "default"
    }

    fn format(&self, difference: &Difference) -> String {
        let mut writer = Writer {
            objects: &self.objects,
            finder: &self.finder,
            count: 0,
            indent: 0,
            base: 0,
            out: String::new(),
        };
        writer.difference(difference);
        writer.out
    }
}

struct Writer<'f> {
    objects: &'f ObjectFormatter,
    finder: &'f BestMatchFinder,
    count: usize,
    indent: usize,
    /// Path steps above the current block, hidden from `Field:` lines.
    base: usize,
    out: String,
}

impl Writer<'_> {
    fn difference(&mut self, difference: &Difference) {
        match difference {
            Difference::Leaf(_) => self.leaf(difference),
            Difference::Object(d) => {
                for (_, field) in &d.fields {
                    self.difference(field);
                }
            }
            Difference::Collection(d) => {
                for element in d.elements.values() {
                    self.difference(element);
                }
            }
            Difference::Map(d) => {
                for (_, entry) in &d.entries {
                    self.difference(entry);
                }
            }
            Difference::Unordered(d) => self.unordered(difference, d),
        }
    }

    fn leaf(&mut self, difference: &Difference) {
        self.heading(difference.message());
        self.field(difference.path());
        self.line(&format!("Left : {}", self.objects.format(difference.left())));
        self.line(&format!("Right: {}", self.objects.format(difference.right())));
        self.out.push('\n');
    }

    fn unordered(&mut self, difference: &Difference, unordered: &UnorderedCollectionDifference) {
        self.heading("Different collections - Multiple possible matches");
        self.field(difference.path());
        self.line("Differences with best matches:");
        self.line("Compared elements are indicated as [leftIndex,rightIndex]");
        self.out.push('\n');

        let (count, base) = (self.count, self.base);
        for best in self.finder.best_matches(unordered) {
            let label = format!("* [{},{}]", best.left, best.right);
            if matches!(best.difference, Difference::Leaf(_)) {
                self.line(&label);
            } else {
                let left = self.objects.format(best.difference.left());
                let right = self.objects.format(best.difference.right());
                self.line(&format!("{label}   Left : {left}"));
                self.line(&format!("{:width$}   Right: {right}", "", width = label.len()));
            }
            self.out.push('\n');

            self.indent += 1;
            self.count = 0;
            self.base = best.difference.path().steps().len();
            self.difference(best.difference);
            self.indent -= 1;
        }
        self.count = count;
        self.base = base;
    }

    fn heading(&mut self, message: &str) {
        self.count += 1;
        let heading = format!("{}) {message}", self.count);
        let underline = "-".repeat(heading.chars().count());
        self.line(&heading);
        self.line(&underline);
    }

    fn field(&mut self, path: &FieldPath) {
        let Some(relative) = path.steps().get(self.base..).filter(|steps| !steps.is_empty()) else {
            return;
        };
        let relative = FieldPath::new(relative.to_vec());
        self.line(&format!("Field: {relative}"));
        self.out.push('\n');
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}
