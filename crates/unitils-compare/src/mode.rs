use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ComparatorMode
// ---------------------------------------------------------------------------

/// A leniency flag. Flags combine freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparatorMode {
    /// Null or default values on the expected side match anything.
    IgnoreDefaults,
    /// Dates only need to be both present or both absent.
    LenientDates,
    /// Element order of sequences is ignored.
    LenientOrder,
}

impl ComparatorMode {
    /// All modes, in flag order.
    pub const ALL: [ComparatorMode; 3] = [
        ComparatorMode::IgnoreDefaults,
        ComparatorMode::LenientDates,
        ComparatorMode::LenientOrder,
    ];

    fn bit(self) -> u8 {
        match self {
            ComparatorMode::IgnoreDefaults => 0b001,
            ComparatorMode::LenientDates => 0b010,
            ComparatorMode::LenientOrder => 0b100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComparatorMode::IgnoreDefaults => "IGNORE_DEFAULTS",
            ComparatorMode::LenientDates => "LENIENT_DATES",
            ComparatorMode::LenientOrder => "LENIENT_ORDER",
        }
    }
}

impl fmt::Display for ComparatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparator mode '{0}' (expected IGNORE_DEFAULTS, LENIENT_DATES or LENIENT_ORDER)")]
pub struct ParseModeError(pub String);

impl FromStr for ComparatorMode {
    type Err = ParseModeError;

    /// Accepts `LENIENT_ORDER`, `lenient_order` and `lenient-order`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        ComparatorMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ParseModeError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// ComparatorModes
// ---------------------------------------------------------------------------

/// A set of [`ComparatorMode`]s. The empty set is strict comparison.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ComparatorMode>", into = "Vec<ComparatorMode>")]
pub struct ComparatorModes(u8);

impl ComparatorModes {
    /// No leniency.
    pub const STRICT: ComparatorModes = ComparatorModes(0);

    /// `LENIENT_ORDER` + `IGNORE_DEFAULTS`, the modes of a lenient assertion.
    pub fn lenient() -> Self {
        ComparatorMode::LenientOrder | ComparatorMode::IgnoreDefaults
    }

    /// This set plus `mode`.
    pub fn with(self, mode: ComparatorMode) -> Self {
        Self(self.0 | mode.bit())
    }

    /// Whether `mode` is in the set.
    pub fn contains(self, mode: ComparatorMode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Whether the set is empty.
    pub fn is_strict(self) -> bool {
        self.0 == 0
    }

    /// Modes in the set, in flag order.
    pub fn iter(self) -> impl Iterator<Item = ComparatorMode> {
        ComparatorMode::ALL
            .into_iter()
            .filter(move |mode| self.contains(*mode))
    }

    /// Dense index in `0..8`, one per combination.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Every combination, ordered by [`Self::index`].
    pub fn all_combinations() -> impl Iterator<Item = ComparatorModes> {
        (0u8..8).map(ComparatorModes)
    }
}

impl From<ComparatorMode> for ComparatorModes {
    fn from(mode: ComparatorMode) -> Self {
        Self(mode.bit())
    }
}

impl From<&[ComparatorMode]> for ComparatorModes {
    fn from(modes: &[ComparatorMode]) -> Self {
        modes.iter().copied().collect()
    }
}

impl From<Vec<ComparatorMode>> for ComparatorModes {
    fn from(modes: Vec<ComparatorMode>) -> Self {
        modes.into_iter().collect()
    }
}

impl From<ComparatorModes> for Vec<ComparatorMode> {
    fn from(modes: ComparatorModes) -> Self {
        modes.iter().collect()
    }
}

impl FromIterator<ComparatorMode> for ComparatorModes {
    fn from_iter<I: IntoIterator<Item = ComparatorMode>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ComparatorModes::STRICT, ComparatorModes::with)
    }
}

impl BitOr for ComparatorMode {
    type Output = ComparatorModes;

    fn bitor(self, rhs: ComparatorMode) -> ComparatorModes {
        ComparatorModes::from(self).with(rhs)
    }
}

impl BitOr<ComparatorMode> for ComparatorModes {
    type Output = ComparatorModes;

    fn bitor(self, rhs: ComparatorMode) -> ComparatorModes {
        self.with(rhs)
    }
}

impl fmt::Debug for ComparatorModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for ComparatorModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_strict() {
            return f.write_str("STRICT");
        }
        let names: Vec<&str> = self.iter().map(ComparatorMode::as_str).collect();
        f.write_str(&names.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_have_distinct_indices() {
        let indices: Vec<usize> = ComparatorModes::all_combinations()
            .map(ComparatorModes::index)
            .collect();
        assert_eq!(indices, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn lenient_is_order_plus_defaults() {
        let lenient = ComparatorModes::lenient();
        assert!(lenient.contains(ComparatorMode::LenientOrder));
        assert!(lenient.contains(ComparatorMode::IgnoreDefaults));
        assert!(!lenient.contains(ComparatorMode::LenientDates));
        assert_eq!(lenient.to_string(), "IGNORE_DEFAULTS+LENIENT_ORDER");
        assert_eq!(ComparatorModes::STRICT.to_string(), "STRICT");
    }

    #[test]
    fn parses_mode_names_leniently() {
        assert_eq!("lenient-order".parse(), Ok(ComparatorMode::LenientOrder));
        assert_eq!("IGNORE_DEFAULTS".parse(), Ok(ComparatorMode::IgnoreDefaults));
        assert_eq!(" lenient_dates ".parse(), Ok(ComparatorMode::LenientDates));
        assert!("sloppy".parse::<ComparatorMode>().is_err());
    }

    #[test]
    fn serializes_as_a_list_of_names() {
        let modes = ComparatorMode::LenientDates | ComparatorMode::LenientOrder;
        let json = serde_json::to_string(&modes).unwrap();
        assert_eq!(json, r#"["LENIENT_DATES","LENIENT_ORDER"]"#);
        let back: ComparatorModes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, modes);
    }
}
