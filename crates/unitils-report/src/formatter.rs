use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unitils_compare::Difference;

use crate::default::DefaultDifferenceFormatter;
use crate::error::ReportError;
use crate::object_formatter::ObjectFormatter;
use crate::tree::TreeDifferenceFormatter;

/// Renders a difference tree as text.
pub trait DifferenceFormatter: Send + Sync {
    /// Short name of the layout, e.g. `tree`.
    fn name(&self) -> &str;

    fn format(&self, difference: &Difference) -> String;
}

/// The built-in report layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterStyle {
    /// Numbered list of differences with `Left :`/`Right:` lines.
    #[default]
    Default,
    /// One `[L]`/`[R]` pair per node of the tree.
    Tree,
}

impl FormatterStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            FormatterStyle::Default => "default",
            FormatterStyle::Tree => "tree",
        }
    }

    /// A formatter of this style rendering values with `objects`.
    pub fn formatter(self, objects: ObjectFormatter) -> Box<dyn DifferenceFormatter> {
        match self {
            FormatterStyle::Default => Box::new(DefaultDifferenceFormatter::new(objects)),
            FormatterStyle::Tree => Box::new(TreeDifferenceFormatter::new(objects)),
        }
    }
}

impl fmt::Display for FormatterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatterStyle {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(FormatterStyle::Default),
            "tree" => Ok(FormatterStyle::Tree),
            _ => Err(ReportError::UnknownStyle(s.to_owned())),
        }
    }
}
