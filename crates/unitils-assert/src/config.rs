use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use unitils_compare::ComparatorModes;
use unitils_report::{DifferenceReport, FormatterStyle, ObjectFormatter};
use unitils_types::SnapshotLimits;

use crate::error::{AssertError, AssertResult};

/// Environment variable naming the config file used by the free assertion
/// functions.
pub const CONFIG_ENV: &str = "UNITILS_CONFIG";

/// Settings for assertions and their reports, usually read from
/// `unitils.toml`:
///
/// ```toml
/// [formatter]
/// max_depth = 3
/// max_elements = 15
/// style = "tree"
///
/// [assert]
/// lenient_modes = ["LENIENT_ORDER", "IGNORE_DEFAULTS"]
/// ```
///
/// Missing sections and keys take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitilsConfig {
    pub formatter: FormatterConfig,
    #[serde(rename = "assert")]
    pub assertions: AssertConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Objects nested deeper than this print as `Type<...>`.
    pub max_depth: usize,
    /// Collections print at most this many elements.
    pub max_elements: usize,
    pub style: FormatterStyle,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        let limits = SnapshotLimits::default();
        Self {
            max_depth: limits.max_depth,
            max_elements: limits.max_elements,
            style: FormatterStyle::Default,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssertConfig {
    /// Modes used by the lenient assertions.
    pub lenient_modes: ComparatorModes,
}

impl Default for AssertConfig {
    fn default() -> Self {
        Self {
            lenient_modes: ComparatorModes::lenient(),
        }
    }
}

impl UnitilsConfig {
    /// Read a config file.
    pub fn load(path: impl AsRef<Path>) -> AssertResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AssertError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| AssertError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The config named by `UNITILS_CONFIG`, or the defaults when it is
    /// unset.
    pub fn from_env() -> AssertResult<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_toml_string(&self) -> AssertResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn limits(&self) -> SnapshotLimits {
        SnapshotLimits {
            max_depth: self.formatter.max_depth,
            max_elements: self.formatter.max_elements,
        }
    }

    pub fn object_formatter(&self) -> ObjectFormatter {
        ObjectFormatter::new(self.limits())
    }

    /// A report laid out in the configured style.
    pub fn report(&self) -> DifferenceReport {
        DifferenceReport::new(self.formatter.style, self.object_formatter())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use unitils_compare::ComparatorMode;

    use super::*;

    #[test]
    fn defaults() {
        let config = UnitilsConfig::default();
        assert_eq!(config.limits(), SnapshotLimits::default());
        assert_eq!(config.formatter.style, FormatterStyle::Default);
        assert_eq!(config.assertions.lenient_modes, ComparatorModes::lenient());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = UnitilsConfig::from_toml_str(
            r#"
            [formatter]
            style = "tree"

            [assert]
            lenient_modes = ["lenient_order"]
            "#,
        );
        // Mode names are matched exactly in files.
        assert!(config.is_err());

        let config = UnitilsConfig::from_toml_str(
            r#"
            [formatter]
            style = "tree"

            [assert]
            lenient_modes = ["LENIENT_ORDER"]
            "#,
        )
        .unwrap();
        assert_eq!(config.formatter.style, FormatterStyle::Tree);
        assert_eq!(config.formatter.max_depth, 3);
        assert_eq!(
            config.assertions.lenient_modes,
            ComparatorMode::LenientOrder.into()
        );
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = UnitilsConfig::default();
        config.formatter.max_elements = 4;
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("max_elements = 4"));
        assert_eq!(UnitilsConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn load_reports_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[formatter]\nmax_depth = \"deep\"").unwrap();
        let err = UnitilsConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, AssertError::ConfigParse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));

        let missing = file.path().with_extension("missing");
        let err = UnitilsConfig::load(&missing).unwrap_err();
        assert!(matches!(err, AssertError::ConfigRead { .. }));
    }

    #[test]
    fn load_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[formatter]\nmax_elements = 2").unwrap();
        let config = UnitilsConfig::load(file.path()).unwrap();
        assert_eq!(config.limits().max_elements, 2);
    }
}
