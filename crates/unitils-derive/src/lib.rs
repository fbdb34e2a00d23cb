//! # Unitils Derive
//!
//! `#[derive(Reflect)]` implements `unitils_types::Reflect` so a type can be
//! compared field by field.
//!
//! | Input | Reflected as |
//! |-------|--------------|
//! | struct with named or tuple fields | `Kind::Object` named after the struct |
//! | unit struct | `Kind::Unit` |
//! | fieldless enum variant | `Kind::Unit` |
//! | enum variant with data | `Kind::Object` named `Enum::Variant` |
//!
//! ## Field attributes
//!
//! - `#[reflect(skip)]` - leave the field out of comparisons
//! - `#[reflect(rename = "...")]` - report the field under another name
//!
//! ## Example
//!
//! ```ignore
//! use unitils_types::Reflect;
//!
//! #[derive(Reflect)]
//! struct Person {
//!     name: Option<String>,
//!     age: u32,
//!     #[reflect(skip)]
//!     cache: Vec<u8>,
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod reflect;
mod support;

/// Derive macro for the `Reflect` trait.
///
/// Every type parameter gets a `Reflect` bound.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    reflect::derive(input)
}
