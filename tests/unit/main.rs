//! Unit test suite entry point.

mod loader_tests;
mod normalize_tests;
mod search_examples_tests;
mod store_tests;
