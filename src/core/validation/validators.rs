//! Reusable field validators
//!
//! Each validator takes the raw (possibly absent) form value and either
//! returns the coerced value or the user-facing message it was built with.

use std::str::FromStr;

/// Validator: field must be present and non-empty
pub fn required_string(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<String, String> + Send + Sync + Clone {
    move |value: Option<&str>| match value {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(message.to_string()),
    }
}

/// Validator: field must coerce to a finite number strictly greater than zero
///
/// An empty value coerces to `0` and is rejected by the range check rather
/// than by the parse, so both report the same message.
pub fn positive_number(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<f64, String> + Send + Sync + Clone {
    move |value: Option<&str>| {
        let Some(raw) = value else {
            return Err(message.to_string());
        };
        let num = if raw.is_empty() {
            0.0
        } else {
            raw.parse::<f64>().map_err(|_| message.to_string())?
        };
        if num.is_finite() && num > 0.0 {
            Ok(num)
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: field must parse into one of the variants of `T`
pub fn one_of<T: FromStr>(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<T, String> + Send + Sync + Clone {
    move |value: Option<&str>| {
        value
            .and_then(|s| s.parse::<T>().ok())
            .ok_or_else(|| message.to_string())
    }
}
