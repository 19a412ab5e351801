//! Reusable field filters
//!
//! These filters normalise raw form values before validation

/// Filter: trim surrounding whitespace
pub fn trim() -> impl Fn(&str) -> String + Send + Sync + Clone {
    |value: &str| value.trim().to_string()
}
