use tracing::debug;
use unitils_compare::{ComparatorModes, ReflectionComparator};
use unitils_types::{
    short_type_name, with_kind, Kind, PropertyPath, PropertyView, Reflect, ReflectError,
};

use crate::config::UnitilsConfig;
use crate::error::{AssertError, AssertResult};

/// Reflection assertions bound to a [`UnitilsConfig`].
///
/// Every `check_*` method returns [`AssertError::Mismatch`] carrying the
/// formatted report when the values differ. The free `assert_*` functions
/// of this crate panic with that report instead.
#[derive(Clone, Debug, Default)]
pub struct ReflectionAssert {
    config: UnitilsConfig,
}

impl ReflectionAssert {
    pub fn new(config: UnitilsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UnitilsConfig {
        &self.config
    }

    /// The modes used by the `lenient` checks.
    pub fn lenient_modes(&self) -> ComparatorModes {
        self.config.assertions.lenient_modes
    }

    /// Check that `expected` equals `actual` under `modes`.
    pub fn check_eq(
        &self,
        message: Option<&str>,
        expected: &dyn Reflect,
        actual: &dyn Reflect,
        modes: ComparatorModes,
    ) -> AssertResult<()> {
        let chain = ReflectionComparator::for_modes(modes);
        let limits = self.config.limits();
        let Some(difference) = chain.get_difference_with_limits(expected, actual, limits)? else {
            return Ok(());
        };
        debug!(%modes, leaves = difference.leaf_count(), "reflection assertion failed");
        let mut report = self.config.report();
        if let Some(message) = message {
            report = report.message(message);
        }
        Err(AssertError::Mismatch(report.render(&difference)))
    }

    /// [`Self::check_eq`] under the lenient modes.
    pub fn check_lenient_eq(
        &self,
        message: Option<&str>,
        expected: &dyn Reflect,
        actual: &dyn Reflect,
    ) -> AssertResult<()> {
        self.check_eq(message, expected, actual, self.lenient_modes())
    }

    /// Check the property at `path` of `object` against `expected`.
    ///
    /// `path` may nest and index: `address.lines[1]`. Map entries are
    /// looked up by key name.
    pub fn check_property_eq(
        &self,
        message: Option<&str>,
        path: &str,
        expected: &dyn Reflect,
        object: &dyn Reflect,
        modes: ComparatorModes,
    ) -> AssertResult<()> {
        let parsed = parse_path(path, object)?;
        let property = resolve(object, &parsed)?;
        let message = property_message(message, path);
        self.check_eq(Some(&message), expected, &property, modes)
    }

    pub fn check_property_lenient_eq(
        &self,
        message: Option<&str>,
        path: &str,
        expected: &dyn Reflect,
        object: &dyn Reflect,
    ) -> AssertResult<()> {
        self.check_property_eq(message, path, expected, object, self.lenient_modes())
    }

    /// Check the property at `path` of every element of `objects` against
    /// the matching element of `expected`.
    pub fn check_property_eq_each(
        &self,
        message: Option<&str>,
        path: &str,
        expected: &dyn Reflect,
        objects: &dyn Reflect,
        modes: ComparatorModes,
    ) -> AssertResult<()> {
        let parsed = parse_path(path, objects)?;
        let target = short_type_name(objects.type_name());
        let outcome = with_kind(objects, |kind| {
            let Kind::Seq(seq) = kind else {
                return Err(AssertError::NotACollection(target.clone()));
            };
            let mut properties = Vec::with_capacity(seq.len());
            for item in &seq.items {
                properties.push(resolve(*item, &parsed)?);
            }
            let message = property_message(message, path);
            self.check_eq(Some(&message), expected, &properties, modes)
        });
        outcome.map_err(|source| property_error(path, target, source))?
    }

    pub fn check_property_lenient_eq_each(
        &self,
        message: Option<&str>,
        path: &str,
        expected: &dyn Reflect,
        objects: &dyn Reflect,
    ) -> AssertResult<()> {
        self.check_property_eq_each(message, path, expected, objects, self.lenient_modes())
    }

    /// Check that no field of `object` is null.
    pub fn check_properties_not_null(
        &self,
        message: Option<&str>,
        object: &dyn Reflect,
    ) -> AssertResult<()> {
        let target = short_type_name(object.type_name());
        let outcome = with_kind(object, |kind| {
            let Kind::Object(view) = kind else {
                return Ok(Err(AssertError::NotAnObject(target.clone())));
            };
            for field in &view.fields {
                if with_kind(field.value, |k| k.is_null())? {
                    return Ok(Err(AssertError::NullProperty {
                        property: field.name.to_owned(),
                        target: target.clone(),
                        message: message.map(str::to_owned),
                    }));
                }
            }
            Ok(Ok(()))
        });
        outcome
            .and_then(|inner| inner)
            .map_err(|source| property_error("", target, source))?
    }
}

fn parse_path(path: &str, object: &dyn Reflect) -> AssertResult<PropertyPath> {
    PropertyPath::parse(path)
        .map_err(|source| property_error(path, short_type_name(object.type_name()), source))
}

fn resolve<'a>(object: &'a dyn Reflect, path: &PropertyPath) -> AssertResult<PropertyView<'a>> {
    PropertyView::resolve(object, path).map_err(|source| {
        property_error(&path.to_string(), short_type_name(object.type_name()), source)
    })
}

fn property_error(path: &str, target: String, source: ReflectError) -> AssertError {
    AssertError::Property {
        path: path.to_owned(),
        target,
        source,
    }
}

/// `Incorrect value for property: <path>`, after the user's message if any.
fn property_message(message: Option<&str>, path: &str) -> String {
    match message {
        Some(message) if !message.trim().is_empty() => {
            format!("{message}\nIncorrect value for property: {path}")
        }
        _ => format!("Incorrect value for property: {path}"),
    }
}
