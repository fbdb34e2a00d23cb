//! Reflection assertions for Unitils.
//!
//! Compares expected and actual values field by field and fails with a
//! readable difference report. Lenient assertions ignore element order and
//! fields left at their default on the expected side.
//!
//! # Quick Start
//!
//! ```rust
//! use unitils_assert::{assert_lenient_eq, assert_property_eq, ComparatorModes, Reflect};
//!
//! #[derive(Reflect)]
//! struct User {
//!     name: Option<String>,
//!     roles: Vec<&'static str>,
//! }
//!
//! let actual = User { name: Some("ann".into()), roles: vec!["admin", "dev"] };
//! let expected = User { name: None, roles: vec!["dev", "admin"] };
//!
//! assert_lenient_eq(&expected, &actual);
//! assert_property_eq("roles[0]", &"admin", &actual, ComparatorModes::STRICT);
//! ```
//!
//! # Key Types
//!
//! - [`ReflectionAssert`] -- Assertions bound to a configuration, returning errors
//! - [`UnitilsConfig`] -- Formatter and lenient-mode settings (`unitils.toml`)
//! - [`AssertError`] -- Mismatch report, property or configuration failure
//!
//! The free `assert_*` functions panic with the report; `check_*` return it.
//! They read their configuration once from the file named by
//! `UNITILS_CONFIG`, falling back to the defaults.

pub mod assert;
pub mod config;
pub mod error;
mod macros;

use std::sync::OnceLock;

use tracing::warn;

pub use assert::ReflectionAssert;
pub use config::{AssertConfig, FormatterConfig, UnitilsConfig, CONFIG_ENV};
pub use error::{AssertError, AssertResult};

// Re-export what callers need to write assertions.
pub use unitils_compare::{ComparatorMode, ComparatorModes};
pub use unitils_types::Reflect;

/// The process-wide assertion settings.
pub fn global() -> &'static ReflectionAssert {
    static GLOBAL: OnceLock<ReflectionAssert> = OnceLock::new();
    GLOBAL.get_or_init(|| {
        let config = UnitilsConfig::from_env().unwrap_or_else(|err| {
            warn!(error = %err, "ignoring unusable config, using defaults");
            UnitilsConfig::default()
        });
        ReflectionAssert::new(config)
    })
}

#[track_caller]
fn fail_on(result: AssertResult<()>) {
    if let Err(err) = result {
        panic!("{err}");
    }
}

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

pub fn check_reflection_eq(
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    modes: ComparatorModes,
) -> AssertResult<()> {
    global().check_eq(None, expected, actual, modes)
}

pub fn check_reflection_eq_msg(
    message: &str,
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    modes: ComparatorModes,
) -> AssertResult<()> {
    global().check_eq(Some(message), expected, actual, modes)
}

pub fn check_lenient_eq(expected: &dyn Reflect, actual: &dyn Reflect) -> AssertResult<()> {
    global().check_lenient_eq(None, expected, actual)
}

pub fn check_lenient_eq_msg(
    message: &str,
    expected: &dyn Reflect,
    actual: &dyn Reflect,
) -> AssertResult<()> {
    global().check_lenient_eq(Some(message), expected, actual)
}

/// Panics with a difference report unless `expected` equals `actual` under
/// `modes`.
#[track_caller]
pub fn assert_reflection_eq(expected: &dyn Reflect, actual: &dyn Reflect, modes: ComparatorModes) {
    fail_on(check_reflection_eq(expected, actual, modes));
}

#[track_caller]
pub fn assert_reflection_eq_msg(
    message: &str,
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    modes: ComparatorModes,
) {
    fail_on(check_reflection_eq_msg(message, expected, actual, modes));
}

/// [`assert_reflection_eq`] with the lenient modes, `LENIENT_ORDER` and
/// `IGNORE_DEFAULTS` unless configured otherwise.
#[track_caller]
pub fn assert_lenient_eq(expected: &dyn Reflect, actual: &dyn Reflect) {
    fail_on(check_lenient_eq(expected, actual));
}

#[track_caller]
pub fn assert_lenient_eq_msg(message: &str, expected: &dyn Reflect, actual: &dyn Reflect) {
    fail_on(check_lenient_eq_msg(message, expected, actual));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Panics unless the property at `path` of `object` equals `expected`.
///
/// A malformed or unresolvable path also panics.
#[track_caller]
pub fn assert_property_eq(
    path: &str,
    expected: &dyn Reflect,
    object: &dyn Reflect,
    modes: ComparatorModes,
) {
    fail_on(global().check_property_eq(None, path, expected, object, modes));
}

#[track_caller]
pub fn assert_property_eq_msg(
    message: &str,
    path: &str,
    expected: &dyn Reflect,
    object: &dyn Reflect,
    modes: ComparatorModes,
) {
    fail_on(global().check_property_eq(Some(message), path, expected, object, modes));
}

#[track_caller]
pub fn assert_property_lenient_eq(path: &str, expected: &dyn Reflect, object: &dyn Reflect) {
    fail_on(global().check_property_lenient_eq(None, path, expected, object));
}

#[track_caller]
pub fn assert_property_lenient_eq_msg(
    message: &str,
    path: &str,
    expected: &dyn Reflect,
    object: &dyn Reflect,
) {
    fail_on(global().check_property_lenient_eq(Some(message), path, expected, object));
}

/// Panics unless the property at `path` of each element of `objects`
/// equals the matching element of `expected`.
#[track_caller]
pub fn assert_property_eq_each(
    path: &str,
    expected: &dyn Reflect,
    objects: &dyn Reflect,
    modes: ComparatorModes,
) {
    fail_on(global().check_property_eq_each(None, path, expected, objects, modes));
}

#[track_caller]
pub fn assert_property_lenient_eq_each(path: &str, expected: &dyn Reflect, objects: &dyn Reflect) {
    fail_on(global().check_property_lenient_eq_each(None, path, expected, objects));
}

/// Panics if any field of `object` is null.
#[track_caller]
pub fn assert_properties_not_null(message: &str, object: &dyn Reflect) {
    let message = (!message.is_empty()).then_some(message);
    fail_on(global().check_properties_not_null(message, object));
}
