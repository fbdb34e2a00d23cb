use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::ReflectResult;
use crate::number::Number;

// ---------------------------------------------------------------------------
// Reflect trait
// ---------------------------------------------------------------------------

/// Capability of exposing a value's structure to the comparator.
///
/// This replaces runtime reflection: a type describes itself as one of the
/// [`Kind`]s, listing its fields, elements or entries as borrowed trait
/// objects. Implementations are provided for the standard library, `chrono`
/// and `serde_json`; user types normally get one from `#[derive(Reflect)]`.
///
/// The trait is object-safe so arbitrary graphs can be walked through
/// `&dyn Reflect`.
pub trait Reflect {
    /// Runtime type name of this value.
    ///
    /// Wrappers such as `Option`, `Box` or `Rc` report the name of the value
    /// they hold.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Classify this value and expose its parts.
    fn reflect(&self) -> ReflectResult<Kind<'_>>;
}

/// Reflect `value`, following [`Kind::Indirect`] and [`Kind::Copied`]
/// handles, and hand the resolved kind to `f`.
pub fn with_kind<R, F>(value: &dyn Reflect, f: F) -> ReflectResult<R>
where
    F: FnOnce(Kind<'_>) -> R,
{
    match value.reflect()? {
        Kind::Indirect(inner) | Kind::Copied(inner) => with_kind(inner.as_ref(), f),
        kind => Ok(f(kind)),
    }
}

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// Classification of a reflected value.
///
/// Comparison strategies dispatch on this: scalars are compared by value,
/// sequences element-wise, maps key-wise and objects field-wise.
pub enum Kind<'a> {
    /// Absent value (`None`, JSON `null`, unit).
    Null,
    /// A boolean.
    Bool(bool),
    /// A single character.
    Char(char),
    /// Any integer or float, whatever its width.
    Number(Number),
    /// String contents.
    Str(&'a str),
    /// A point in time, normalized to UTC.
    Date(DateTime<Utc>),
    /// Fieldless enum variant or unit struct.
    Unit(UnitView),
    /// Elements of an array, list or set.
    Seq(SeqView<'a>),
    /// Key/value entries.
    Map(MapView<'a>),
    /// Named fields of a struct, tuple or enum variant.
    Object(ObjectView<'a>),
    /// A temporary handle that must itself be reflected, e.g. a `RefCell`
    /// borrow guard or an upgraded `Weak`. The value behind it lives
    /// elsewhere and keeps its address.
    Indirect(Box<dyn Reflect + 'a>),
    /// A copy of the held value, e.g. the content of a `Cell`. Values
    /// reached through it live in the box and have no lasting identity.
    Copied(Box<dyn Reflect + 'a>),
}

impl<'a> Kind<'a> {
    /// Short label naming the variant, used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Date(_) => "date",
            Self::Unit(_) => "unit",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
            Self::Indirect(_) => "indirect",
            Self::Copied(_) => "copied",
        }
    }

    /// Returns `true` for the absent value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for values that cannot be decomposed further.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_)
                | Self::Char(_)
                | Self::Number(_)
                | Self::Str(_)
                | Self::Date(_)
                | Self::Unit(_)
        )
    }

    /// Returns `true` if this is the language default for its type:
    /// null, `false`, `'\0'` or a numeric zero.
    pub fn is_default(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !*b,
            Self::Char(c) => *c == '\0',
            Self::Number(n) => n.is_zero(),
            _ => false,
        }
    }

    /// Identity of a composite value, `None` for scalars.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Self::Seq(seq) => Some(seq.identity),
            Self::Map(map) => Some(map.identity),
            Self::Object(object) => Some(object.identity),
            _ => None,
        }
    }
}

impl fmt::Debug for Kind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Char(c) => write!(f, "Char({c:?})"),
            Self::Number(n) => write!(f, "Number({n})"),
            Self::Str(s) => write!(f, "Str({s:?})"),
            Self::Date(d) => write!(f, "Date({d})"),
            Self::Unit(u) => write!(f, "Unit({}::{})", u.type_name, u.name),
            Self::Seq(s) => write!(f, "Seq(len={})", s.len()),
            Self::Map(m) => write!(f, "Map(len={})", m.len()),
            Self::Object(o) => write!(f, "Object({}, fields={})", o.type_name, o.fields.len()),
            Self::Indirect(_) => write!(f, "Indirect"),
            Self::Copied(_) => write!(f, "Copied"),
        }
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Reference identity of a composite value: its address plus its type.
///
/// The type name keeps a struct distinct from its first field, which lives
/// at the same address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    type_name: &'static str,
}

impl Identity {
    /// Identity of the value behind `value`.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self {
            addr: std::ptr::from_ref(value).cast::<()>() as usize,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Identity of a trait object, using its reported type name.
    pub fn of_dyn(value: &dyn Reflect) -> Self {
        Self {
            addr: std::ptr::from_ref(value).cast::<()>() as usize,
            type_name: value.type_name(),
        }
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A fieldless enum variant or unit struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitView {
    /// Type the variant belongs to.
    pub type_name: &'static str,
    /// Variant name, or the type name for a unit struct.
    pub name: &'static str,
}

impl UnitView {
    pub fn new(type_name: &'static str, name: &'static str) -> Self {
        Self { type_name, name }
    }
}

/// Elements of an array, list or set, in iteration order.
pub struct SeqView<'a> {
    pub identity: Identity,
    /// The elements, in iteration order.
    pub items: Vec<&'a dyn Reflect>,
    /// `false` when the iteration order carries no meaning, as for hash
    /// sets. Such sequences are always compared as multisets.
    pub ordered: bool,
}

impl<'a> SeqView<'a> {
    /// A sequence whose element order matters.
    pub fn new(identity: Identity, items: Vec<&'a dyn Reflect>) -> Self {
        Self {
            identity,
            items,
            ordered: true,
        }
    }

    /// A sequence whose iteration order is arbitrary.
    pub fn unordered(identity: Identity, items: Vec<&'a dyn Reflect>) -> Self {
        Self {
            identity,
            items,
            ordered: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Entries of a map, in iteration order.
pub struct MapView<'a> {
    pub identity: Identity,
    /// Key/value pairs, in iteration order.
    pub entries: Vec<(&'a dyn Reflect, &'a dyn Reflect)>,
}

impl<'a> MapView<'a> {
    pub fn new(identity: Identity, entries: Vec<(&'a dyn Reflect, &'a dyn Reflect)>) -> Self {
        Self { identity, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value stored under a string key, if any.
    ///
    /// Keys that fail to reflect are skipped.
    pub fn get_by_str(&self, key: &str) -> Option<&'a dyn Reflect> {
        self.entries.iter().find_map(|(k, v)| match k.reflect() {
            Ok(Kind::Str(s)) if s == key => Some(*v),
            _ => None,
        })
    }
}

/// A named field of an object.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    /// Declared name, or the `#[reflect(rename)]` override.
    pub name: &'static str,
    pub value: &'a dyn Reflect,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: &'a dyn Reflect) -> Self {
        Self { name, value }
    }
}

/// The declared fields of a struct or enum variant, in declaration order.
pub struct ObjectView<'a> {
    pub identity: Identity,
    /// Short type name; for enum variants `Enum::Variant`.
    pub type_name: &'static str,
    /// Fields in declaration order; skipped fields are absent.
    pub fields: Vec<Field<'a>>,
}

impl<'a> ObjectView<'a> {
    pub fn new(identity: Identity, type_name: &'static str, fields: Vec<Field<'a>>) -> Self {
        Self {
            identity,
            type_name,
            fields,
        }
    }

    /// Value of the field with the given name.
    pub fn field(&self, name: &str) -> Option<&'a dyn Reflect> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }
}
