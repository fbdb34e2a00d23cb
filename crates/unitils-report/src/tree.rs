use unitils_compare::Difference;

use crate::best_match::BestMatchFinder;
use crate::formatter::DifferenceFormatter;
use crate::object_formatter::ObjectFormatter;

/// Prints every node of the difference tree as a `[L]`/`[R]` pair, prefixed
/// by its path.
///
/// ```text
/// <top-level>   [L] Person<name="Bob", age=31>
///               [R] Person<name="Bob", age=32>
/// age   [L] 31
///       [R] 32
/// ```
///
/// Unordered collections show only the best match of each left element.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeDifferenceFormatter {
    objects: ObjectFormatter,
    finder: BestMatchFinder,
}

impl TreeDifferenceFormatter {
    pub fn new(objects: ObjectFormatter) -> Self {
        Self {
            objects,
            finder: BestMatchFinder::new(),
        }
    }

    fn write(&self, difference: &Difference, out: &mut String) {
        let prefix = format!("{}   ", difference.path());
        out.push_str(&format!(
            "{prefix}[L] {}\n",
            self.objects.format(difference.left())
        ));
        out.push_str(&format!(
            "{:width$}[R] {}\n",
            "",
            self.objects.format(difference.right()),
            width = prefix.chars().count()
        ));

        match difference {
            Difference::Leaf(_) => {}
            Difference::Object(d) => {
                for (_, field) in &d.fields {
                    self.write(field, out);
                }
            }
            Difference::Collection(d) => {
                for element in d.elements.values() {
                    self.write(element, out);
                }
            }
            Difference::Map(d) => {
                for (_, entry) in &d.entries {
                    self.write(entry, out);
                }
            }
            Difference::Unordered(d) => {
                for best in self.finder.best_matches(d) {
                    self.write(best.difference, out);
                }
            }
        }
    }
}

impl DifferenceFormatter for TreeDifferenceFormatter {
    fn name(&self) -> &str {
        "tree"
    }

    fn format(&self, difference: &Difference) -> String {
        let mut out = String::new();
        self.write(difference, &mut out);
        out
    }
}
