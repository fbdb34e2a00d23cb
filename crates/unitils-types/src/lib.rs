//! Reflection capability for Unitils.
//!
//! Rust has no runtime reflection, so values that take part in a lenient
//! comparison describe themselves through the [`Reflect`] trait. Every other
//! Unitils crate depends on `unitils-types`.
//!
//! # Key Types
//!
//! - [`Reflect`] -- Object-safe capability of exposing a value's structure
//! - [`Kind`] -- Classification of a value: scalar, sequence, map or object
//! - [`Number`] -- Width-independent numeric value with lenient equality
//! - [`Identity`] -- Address plus type, used to detect cycles
//! - [`Snapshot`] -- Owned, bounded capture of a value for reporting
//! - [`PropertyPath`] / [`PropertyView`] -- Nested property access (`a.b[2].c`)
//!
//! `#[derive(Reflect)]` is re-exported from `unitils-derive`.

extern crate self as unitils_types;

pub mod error;
mod impls;
pub mod number;
pub mod property;
pub mod reflect;
pub mod snapshot;

pub use error::{ReflectError, ReflectResult};
pub use number::Number;
pub use property::{PathSegment, PropertyPath, PropertyView};
pub use reflect::{
    with_kind, Field, Identity, Kind, MapView, ObjectView, Reflect, SeqView, UnitView,
};
pub use snapshot::{short_type_name, Captured, Snapshot, SnapshotLimits};
pub use unitils_derive::Reflect;
