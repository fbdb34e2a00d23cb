//! The free assertions pick up the file named by `UNITILS_CONFIG`.
//!
//! Kept in its own test binary: the configuration is read once per process.

use std::io::Write;

use unitils_assert::{check_lenient_eq, check_reflection_eq, global, ComparatorModes, CONFIG_ENV};

#[test]
fn config_file_from_environment() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[formatter]
style = "tree"
max_elements = 2

[assert]
lenient_modes = ["IGNORE_DEFAULTS"]
"#
    )
    .unwrap();
    std::env::set_var(CONFIG_ENV, file.path());

    assert_eq!(global().config().formatter.max_elements, 2);

    // Element order now matters for lenient assertions.
    assert!(check_lenient_eq(&vec![1, 2], &vec![2, 1]).is_err());
    assert!(check_lenient_eq(&vec![None, Some(2)], &vec![Some(1), Some(2)]).is_ok());

    let err = check_reflection_eq(&vec![1, 2, 3], &vec![1, 2, 4], ComparatorModes::STRICT)
        .unwrap_err()
        .to_string();
    assert!(err.contains("Expected: [1, 2, ...]"));
    assert!(err.contains("[2]   [L] 3"));
}
