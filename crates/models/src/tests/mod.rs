/// Validation behaviour of the built-in resource catalogue
pub mod catalog_tests;
