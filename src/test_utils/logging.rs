use std::time::Instant;

use crate::search::BaseItem;

/// Step logger for verbose test output.
pub struct TestLogger {
    test_name: String,
    start_time: Instant,
}

impl TestLogger {
    pub fn new(test_name: &str) -> Self {
        println!("\n[TEST START] {test_name}");
        Self {
            test_name: test_name.to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn log_query(&self, category: &str, query: &str) {
        println!("[QUERY] {category}: {query:?}");
    }

    pub fn log_results(&self, results: &[&BaseItem]) {
        let names: Vec<&str> = results.iter().map(|item| item.base_name.as_str()).collect();
        println!("[RESULTS] {} match(es): {names:?}", results.len());
    }

    pub fn log_value<T: std::fmt::Debug>(&self, label: &str, value: &T) {
        println!("[{label}] {value:?}");
    }

    pub fn pass(&self) {
        println!(
            "[RESULT] {} PASSED in {:?}\n",
            self.test_name,
            self.start_time.elapsed()
        );
    }
}
