use unitils_types::Kind;

use crate::comparator::{Comparator, Operand};
use crate::comparators::type_mismatch;
use crate::context::{ComparisonContext, NULL};
use crate::difference::{Difference, ObjectDifference, Step};
use crate::error::CompareResult;

/// Catch-all: objects of the same type compared field by field.
///
/// Fields are matched by name in the expected side's declaration order. Any
/// pair that is not two objects of the same type is a type mismatch.
pub struct ObjectComparator;

impl Comparator for ObjectComparator {
    fn name(&self) -> &str {
        "object"
    }

    fn can_compare(&self, _left: &Kind<'_>, _right: &Kind<'_>) -> bool {
        true
    }

    fn compare(
        &self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        cx: &mut ComparisonContext<'_>,
    ) -> CompareResult<Option<Difference>> {
        let (Kind::Object(l), Kind::Object(r)) = (&left.kind, &right.kind) else {
            return type_mismatch(cx, left, right);
        };
        if l.type_name != r.type_name {
            return type_mismatch(cx, left, right);
        }

        let mut fields = Vec::new();
        for field in &l.fields {
            let r_value = r.field(field.name).unwrap_or(NULL);
            let step = Step::Field(field.name.to_owned());
            if let Some(difference) = cx.nested(step, field.value, r_value)? {
                fields.push((field.name.to_owned(), difference));
                if cx.only_first_difference() {
                    break;
                }
            }
        }

        if fields.is_empty() {
            return Ok(None);
        }
        Ok(Some(Difference::Object(ObjectDifference {
            detail: cx.detail("Different field values.", left, right)?,
            fields,
        })))
    }
}
