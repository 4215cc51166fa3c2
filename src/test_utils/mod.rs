//! Shared test utilities for cidx.

pub mod fixtures;
pub mod logging;

#[cfg(test)]
pub mod arbitrary;

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

/// Run table-driven tests, reporting the failing case by name.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F)
where
    I: std::fmt::Debug,
    E: std::fmt::Debug + PartialEq,
    F: Fn(&I) -> E,
{
    for case in cases {
        let start = std::time::Instant::now();
        let actual = test_fn(&case.input);
        println!(
            "[TEST] {}: {:?} -> {:?} ({:?})",
            case.name,
            case.input,
            actual,
            start.elapsed()
        );
        assert_eq!(actual, case.expected, "case '{}' failed", case.name);
    }
}
