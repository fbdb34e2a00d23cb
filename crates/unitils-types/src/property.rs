//! Nested and indexed property access: `address.lines[2].street`.

use std::fmt;

use crate::error::{ReflectError, ReflectResult};
use crate::reflect::{with_kind, Kind, Reflect};

/// One step of a [`PropertyPath`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A field of an object, or a string key of a map.
    Name(String),
    /// An element of a sequence.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A parsed property path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    /// Parse `name(.name | [index])*`.
    pub fn parse(path: &str) -> ReflectResult<Self> {
        let invalid = |reason: &str| ReflectError::InvalidPath {
            path: path.to_owned(),
            reason: reason.to_owned(),
        };

        let mut segments = Vec::new();
        let mut rest = path;
        let mut expect_name = true;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let close = after.find(']').ok_or_else(|| invalid("unclosed '['"))?;
                let index = after[..close]
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid("index must be a non-negative integer"))?;
                segments.push(PathSegment::Index(index));
                rest = &after[close + 1..];
                expect_name = false;
                continue;
            }
            if !expect_name {
                rest = rest
                    .strip_prefix('.')
                    .ok_or_else(|| invalid("expected '.' or '[' between segments"))?;
            }
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            let name = &rest[..end];
            if name.is_empty() {
                return Err(invalid("empty property name"));
            }
            if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(invalid("property names may only contain letters, digits and '_'"));
            }
            segments.push(PathSegment::Name(name.to_owned()));
            rest = &rest[end..];
            expect_name = false;
        }

        if segments.is_empty() {
            return Err(invalid("path is empty"));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Name(name) if i > 0 => write!(f, ".{name}")?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for PropertyPath {
    type Err = ReflectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// PropertyView
// ---------------------------------------------------------------------------

enum Base<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect + 'a>),
}

impl Base<'_> {
    fn get(&self) -> &dyn Reflect {
        match self {
            Base::Borrowed(value) => *value,
            Base::Owned(value) => value.as_ref(),
        }
    }
}

/// The value found by following a [`PropertyPath`] from a root object.
///
/// The path is walked again on every reflection, so the view always sees
/// the current state of interior-mutable containers.
pub struct PropertyView<'a> {
    base: Base<'a>,
    segments: Vec<PathSegment>,
}

enum Step<'s> {
    Found(&'s dyn Reflect),
    /// The walk reached a temporary handle; the rest continues from it.
    /// The flag is set when the handle owns a copy of the value.
    Deferred(Box<dyn Reflect + 's>, usize, bool),
}

impl<'a> PropertyView<'a> {
    /// Resolve `path` against `root`, failing early on unknown properties,
    /// bad indices or nulls along the way.
    pub fn resolve(root: &'a dyn Reflect, path: &PropertyPath) -> ReflectResult<Self> {
        let view = Self {
            base: Base::Borrowed(root),
            segments: path.segments.clone(),
        };
        with_kind(&view, |_| ())?;
        Ok(view)
    }

    fn walk<'s>(start: &'s dyn Reflect, segments: &[PathSegment]) -> ReflectResult<Step<'s>> {
        let mut current = start;
        for (i, segment) in segments.iter().enumerate() {
            let next = match (current.reflect()?, segment) {
                (Kind::Indirect(inner), _) => return Ok(Step::Deferred(inner, i, false)),
                (Kind::Copied(inner), _) => return Ok(Step::Deferred(inner, i, true)),
                (Kind::Null, segment) => {
                    return Err(ReflectError::NullInPath {
                        property: segment.to_string(),
                    })
                }
                (Kind::Object(object), PathSegment::Name(name)) => {
                    object
                        .field(name)
                        .ok_or_else(|| ReflectError::UnknownProperty {
                            property: name.clone(),
                            type_name: object.type_name.to_owned(),
                        })?
                }
                (Kind::Map(map), PathSegment::Name(name)) => {
                    map.get_by_str(name)
                        .ok_or_else(|| ReflectError::UnknownProperty {
                            property: name.clone(),
                            type_name: current.type_name().to_owned(),
                        })?
                }
                (Kind::Seq(seq), PathSegment::Index(index)) => {
                    let len = seq.len();
                    seq.items.get(*index).copied().ok_or_else(|| {
                        ReflectError::IndexOutOfBounds {
                            index: *index,
                            len,
                            type_name: current.type_name().to_owned(),
                        }
                    })?
                }
                (_, PathSegment::Index(index)) => {
                    return Err(ReflectError::NotIndexable {
                        index: *index,
                        type_name: current.type_name().to_owned(),
                    })
                }
                (_, PathSegment::Name(name)) => {
                    return Err(ReflectError::UnknownProperty {
                        property: name.clone(),
                        type_name: current.type_name().to_owned(),
                    })
                }
            };
            current = next;
        }
        Ok(Step::Found(current))
    }

    fn continue_from<'s>(inner: Box<dyn Reflect + 's>, rest: &[PathSegment]) -> PropertyView<'s> {
        PropertyView {
            base: Base::Owned(inner),
            segments: rest.to_vec(),
        }
    }
}

impl Reflect for PropertyView<'_> {
    fn type_name(&self) -> &'static str {
        match Self::walk(self.base.get(), &self.segments) {
            Ok(Step::Found(value)) => value.type_name(),
            Ok(Step::Deferred(inner, at, _)) => {
                Self::continue_from(inner, &self.segments[at..]).type_name()
            }
            Err(_) => "<unresolved>",
        }
    }

    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        match Self::walk(self.base.get(), &self.segments)? {
            Step::Found(value) => value.reflect(),
            Step::Deferred(inner, at, copied) => {
                let rest = Box::new(Self::continue_from(inner, &self.segments[at..]));
                Ok(if copied {
                    Kind::Copied(rest)
                } else {
                    Kind::Indirect(rest)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::reflect::{Field, Identity, ObjectView};

    struct Address {
        street: String,
        lines: Vec<String>,
    }

    struct Person {
        name: Option<String>,
        address: RefCell<Address>,
        tags: HashMap<String, i32>,
    }

    impl Reflect for Address {
        fn type_name(&self) -> &'static str {
            "Address"
        }

        fn reflect(&self) -> ReflectResult<Kind<'_>> {
            Ok(Kind::Object(ObjectView::new(
                Identity::of(self),
                "Address",
                vec![
                    Field::new("street", &self.street),
                    Field::new("lines", &self.lines),
                ],
            )))
        }
    }

    impl Reflect for Person {
        fn type_name(&self) -> &'static str {
            "Person"
        }

        fn reflect(&self) -> ReflectResult<Kind<'_>> {
            Ok(Kind::Object(ObjectView::new(
                Identity::of(self),
                "Person",
                vec![
                    Field::new("name", &self.name),
                    Field::new("address", &self.address),
                    Field::new("tags", &self.tags),
                ],
            )))
        }
    }

    fn person() -> Person {
        Person {
            name: None,
            address: RefCell::new(Address {
                street: "Main".into(),
                lines: vec!["a".into(), "b".into(), "c".into()],
            }),
            tags: HashMap::from([("age".to_owned(), 31)]),
        }
    }

    fn resolve_str(root: &dyn Reflect, path: &str) -> ReflectResult<String> {
        let path = PropertyPath::parse(path)?;
        let view = PropertyView::resolve(root, &path)?;
        with_kind(&view, |kind| match kind {
            Kind::Str(s) => s.to_owned(),
            other => format!("{other:?}"),
        })
    }

    #[test]
    fn parses_names_and_indices() {
        let path = PropertyPath::parse("address.lines[2].x").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Name("address".into()),
                PathSegment::Name("lines".into()),
                PathSegment::Index(2),
                PathSegment::Name("x".into()),
            ]
        );
        assert_eq!(path.to_string(), "address.lines[2].x");
        assert_eq!(PropertyPath::parse("[0].id").unwrap().to_string(), "[0].id");
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["", "a..b", "a[", "a[x]", "a[-1]", "a.", "a b", "a[0]b"] {
            assert!(
                matches!(PropertyPath::parse(bad), Err(ReflectError::InvalidPath { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn resolves_through_refcell_and_index() {
        let p = person();
        assert_eq!(resolve_str(&p, "address.lines[1]").unwrap(), "b");
        assert_eq!(resolve_str(&p, "address.street").unwrap(), "Main");
    }

    #[test]
    fn resolves_map_keys_by_name() {
        let p = person();
        assert_eq!(resolve_str(&p, "tags.age").unwrap(), "Number(31)");
    }

    #[test]
    fn reports_resolution_failures() {
        let p = person();
        let err = |path: &str| resolve_str(&p, path).unwrap_err();
        assert!(matches!(err("missing"), ReflectError::UnknownProperty { .. }));
        assert!(matches!(err("name.first"), ReflectError::NullInPath { .. }));
        assert!(matches!(
            err("address.lines[7]"),
            ReflectError::IndexOutOfBounds { index: 7, len: 3, .. }
        ));
        assert!(matches!(err("address.street[0]"), ReflectError::NotIndexable { .. }));
    }

    #[test]
    fn borrowed_refcell_is_a_conflict() {
        let p = person();
        let _guard = p.address.borrow_mut();
        let path = PropertyPath::parse("address.street").unwrap();
        assert!(matches!(
            PropertyView::resolve(&p, &path),
            Err(ReflectError::BorrowConflict { .. })
        ));
    }
}
