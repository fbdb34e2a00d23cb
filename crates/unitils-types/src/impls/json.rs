use serde_json::Value;

use crate::error::ReflectResult;
use crate::number::Number;
use crate::reflect::{Identity, Kind, MapView, Reflect, SeqView};

impl Reflect for Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(match self {
            Value::Null => Kind::Null,
            Value::Bool(b) => Kind::Bool(*b),
            Value::Number(n) => Kind::Number(json_number(n)),
            Value::String(s) => Kind::Str(s),
            Value::Array(items) => Kind::Seq(SeqView::new(
                Identity::of(self),
                items.iter().map(|item| item as &dyn Reflect).collect(),
            )),
            Value::Object(entries) => Kind::Map(MapView::new(
                Identity::of(self),
                entries
                    .iter()
                    .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
                    .collect(),
            )),
        })
    }
}

fn json_number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::from(i)
    } else if let Some(u) = n.as_u64() {
        Number::from(u)
    } else {
        Number::from(n.as_f64().unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_values_classify_structurally() {
        let doc = json!({"name": "Bob", "tags": [1, 2.5], "ok": true, "none": null});
        let Kind::Map(map) = doc.reflect().unwrap() else {
            panic!("expected map");
        };
        assert_eq!(map.len(), 4);
        let tags = map.get_by_str("tags").unwrap();
        assert_eq!(tags.type_name(), "Array");
        assert!(matches!(tags.reflect().unwrap(), Kind::Seq(s) if s.len() == 2));
        assert!(map.get_by_str("none").unwrap().reflect().unwrap().is_null());
    }

    #[test]
    fn json_numbers_keep_integer_precision() {
        assert_eq!(json_number(&serde_json::Number::from(u64::MAX)), Number::from(u64::MAX));
        assert_eq!(json_number(&serde_json::Number::from(-3)), Number::from(-3));
        let float = serde_json::Number::from_f64(0.5).unwrap();
        assert_eq!(json_number(&float), Number::Float(0.5));
    }
}
