//! Reusable field validators
//!
//! Each validator is a small closure checking one rule against an already
//! type-checked value. The [`FieldReader`](super::FieldReader) runs them and
//! records the returned message against the field path.

use std::fmt::Display;

/// Validator: string must not be empty
pub fn non_empty() -> impl Fn(&str) -> Result<(), String> + Send + Sync + Clone {
    |value: &str| {
        if value.is_empty() {
            Err("must not be empty".to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be at least `min`
pub fn min_value<N>(min: N) -> impl Fn(N) -> Result<(), String> + Send + Sync + Clone
where
    N: PartialOrd + Display + Copy + Send + Sync,
{
    move |value: N| {
        if value < min {
            Err(format!("must be greater than or equal to {}", min))
        } else {
            Ok(())
        }
    }
}

/// Validator: number must not exceed `max`
pub fn max_value<N>(max: N) -> impl Fn(N) -> Result<(), String> + Send + Sync + Clone
where
    N: PartialOrd + Display + Copy + Send + Sync,
{
    move |value: N| {
        if value > max {
            Err(format!("must be less than or equal to {}", max))
        } else {
            Ok(())
        }
    }
}
