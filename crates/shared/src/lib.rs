pub mod domain;
pub mod error;
pub mod i18n;
pub mod protocol;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
