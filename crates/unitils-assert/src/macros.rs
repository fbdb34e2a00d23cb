/// Assert reflection equality, strictly or under the given modes.
///
/// ```rust
/// use unitils_assert::{assert_reflection_eq, ComparatorMode};
///
/// assert_reflection_eq!(vec![1, 2], vec![1, 2]);
/// assert_reflection_eq!(vec![1, 2], vec![2, 1], ComparatorMode::LenientOrder.into());
/// assert_reflection_eq!(5u8, 5i64, Default::default(), "widths differ for {}", "u8");
/// ```
#[macro_export]
macro_rules! assert_reflection_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::assert_reflection_eq(&$expected, &$actual, $crate::ComparatorModes::STRICT)
    };
    ($expected:expr, $actual:expr, $modes:expr $(,)?) => {
        $crate::assert_reflection_eq(&$expected, &$actual, $modes)
    };
    ($expected:expr, $actual:expr, $modes:expr, $($arg:tt)+) => {
        $crate::assert_reflection_eq_msg(&::std::format!($($arg)+), &$expected, &$actual, $modes)
    };
}

/// Assert lenient reflection equality.
///
/// ```rust
/// use unitils_assert::assert_lenient_eq;
///
/// assert_lenient_eq!(vec![None, Some(2)], vec![Some(2), Some(1)]);
/// ```
#[macro_export]
macro_rules! assert_lenient_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::assert_lenient_eq(&$expected, &$actual)
    };
    ($expected:expr, $actual:expr, $($arg:tt)+) => {
        $crate::assert_lenient_eq_msg(&::std::format!($($arg)+), &$expected, &$actual)
    };
}
