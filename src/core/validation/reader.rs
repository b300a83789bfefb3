//! Field-by-field reader over an untyped JSON payload
//!
//! A [`FieldReader`] walks one JSON object, type-checks the requested
//! fields, runs validators on them and collects every failure instead of
//! stopping at the first one. Accessors always return a value (a
//! placeholder when the field is invalid) so record constructors can be
//! written straight-line; [`FieldReader::finish`] then decides whether the
//! record may be built.

use crate::core::error::{FieldValidationError, ValidationError};
use serde_json::{Map, Value};

/// Rule applied to a string field
pub type StrRule<'r> = &'r dyn Fn(&str) -> Result<(), String>;
/// Rule applied to a numeric field
pub type NumberRule<'r> = &'r dyn Fn(f64) -> Result<(), String>;
/// Rule applied to an integer field
pub type IntegerRule<'r> = &'r dyn Fn(i64) -> Result<(), String>;

pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    path: String,
    errors: Vec<FieldValidationError>,
}

impl<'a> FieldReader<'a> {
    /// Start reading a top-level payload, which must be a JSON object
    pub fn new(payload: &'a Value) -> Result<Self, ValidationError> {
        match payload {
            Value::Object(object) => Ok(Self::nested(object, String::new())),
            other => Err(ValidationError::NotAnObject {
                found: json_type_name(other).to_string(),
            }),
        }
    }

    fn nested(object: &'a Map<String, Value>, path: String) -> Self {
        Self {
            object,
            path,
            errors: Vec::new(),
        }
    }

    fn path_of(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.path, field)
        }
    }

    fn fail(&mut self, field: &str, message: impl Into<String>) {
        let path = self.path_of(field);
        self.errors.push(FieldValidationError::new(path, message));
    }

    /// The field's value, treating JSON `null` like an absent field
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.object.get(field).filter(|v| !v.is_null())
    }

    fn apply<T: Copy>(
        &mut self,
        field: &str,
        value: T,
        rules: &[&dyn Fn(T) -> Result<(), String>],
    ) {
        for rule in rules {
            if let Err(message) = rule(value) {
                self.fail(field, message);
            }
        }
    }

    /// Required text field
    pub fn required_str(&mut self, field: &str, rules: &[StrRule<'_>]) -> String {
        match self.present(field) {
            None => {
                self.fail(field, "field required");
                String::new()
            }
            Some(Value::String(s)) => {
                for rule in rules {
                    if let Err(message) = rule(s) {
                        self.fail(field, message);
                    }
                }
                s.clone()
            }
            Some(_) => {
                self.fail(field, "must be a string");
                String::new()
            }
        }
    }

    /// Optional text field; absent and `null` both read as `None`
    pub fn optional_str(&mut self, field: &str) -> Option<String> {
        match self.present(field) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.fail(field, "must be a string");
                None
            }
        }
    }

    /// Required number (integer or float)
    pub fn required_number(&mut self, field: &str, rules: &[NumberRule<'_>]) -> f64 {
        match self.present(field).map(|v| (v, v.as_f64())) {
            None => {
                self.fail(field, "field required");
                0.0
            }
            Some((Value::Number(_), Some(number))) => {
                self.apply(field, number, rules);
                number
            }
            Some(_) => {
                self.fail(field, "must be a number");
                0.0
            }
        }
    }

    /// Required integer; floats with no fractional part are accepted
    ///
    /// Values outside the `i64` range fail the field instead of saturating.
    pub fn required_integer(&mut self, field: &str, rules: &[IntegerRule<'_>]) -> i64 {
        let Some(value) = self.present(field) else {
            self.fail(field, "field required");
            return 0;
        };

        let integer = match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_f64_to_i64)),
            _ => None,
        };

        match integer {
            Some(integer) => {
                self.apply(field, integer, rules);
                integer
            }
            None => {
                self.fail(field, "must be an integer");
                0
            }
        }
    }

    /// Boolean field with a default when absent
    pub fn bool_or(&mut self, field: &str, default: bool) -> bool {
        match self.object.get(field) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.fail(field, "must be a boolean");
                default
            }
        }
    }

    /// Required array of objects, each read with `read_item`
    pub fn required_list<T>(
        &mut self,
        field: &str,
        mut read_item: impl FnMut(&mut FieldReader<'a>) -> T,
    ) -> Vec<T> {
        let items = match self.present(field) {
            None => {
                self.fail(field, "field required");
                return Vec::new();
            }
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.fail(field, "must be an array");
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", self.path_of(field), index);
            match item {
                Value::Object(object) => {
                    let mut reader = FieldReader::nested(object, item_path);
                    out.push(read_item(&mut reader));
                    self.errors.append(&mut reader.errors);
                }
                _ => self
                    .errors
                    .push(FieldValidationError::new(item_path, "must be an object")),
            }
        }
        out
    }

    /// Failures recorded so far
    pub fn errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    /// `Ok` when every field read so far was valid
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(self.errors))
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `f` as an `i64` when it is whole and representable
fn whole_f64_to_i64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validators::{max_value, min_value, non_empty};
    use serde_json::json;

    #[test]
    fn test_non_object_payload_is_rejected() {
        let payload = json!([1, 2, 3]);
        let err = FieldReader::new(&payload).err().expect("should fail");
        assert!(matches!(err, ValidationError::NotAnObject { ref found } if found == "array"));
    }

    #[test]
    fn test_required_str_missing_null_and_wrong_type() {
        let payload = json!({"b": null, "c": 42});
        let mut reader = FieldReader::new(&payload).unwrap();
        reader.required_str("a", &[]);
        reader.required_str("b", &[]);
        reader.required_str("c", &[]);
        let errors = reader.errors().to_vec();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].message, "field required");
        assert_eq!(errors[1].message, "field required");
        assert_eq!(errors[2].message, "must be a string");
    }

    #[test]
    fn test_required_str_runs_rules() {
        let payload = json!({"name": ""});
        let mut reader = FieldReader::new(&payload).unwrap();
        reader.required_str("name", &[&non_empty()]);
        assert_eq!(reader.errors()[0].message, "must not be empty");
    }

    #[test]
    fn test_optional_str_absent_null_and_present() {
        let payload = json!({"notes": null, "image": "https://cdn/latte.png"});
        let mut reader = FieldReader::new(&payload).unwrap();
        assert_eq!(reader.optional_str("description"), None);
        assert_eq!(reader.optional_str("notes"), None);
        assert_eq!(
            reader.optional_str("image").as_deref(),
            Some("https://cdn/latte.png")
        );
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_required_number_accepts_integers_and_rejects_strings() {
        let payload = json!({"a": 4, "b": 4.5, "c": "4.5", "d": true});
        let mut reader = FieldReader::new(&payload).unwrap();
        assert_eq!(reader.required_number("a", &[]), 4.0);
        assert_eq!(reader.required_number("b", &[]), 4.5);
        reader.required_number("c", &[]);
        reader.required_number("d", &[]);
        assert_eq!(reader.errors().len(), 2);
    }

    #[test]
    fn test_required_number_applies_minimum() {
        let payload = json!({"price": -1});
        let mut reader = FieldReader::new(&payload).unwrap();
        reader.required_number("price", &[&min_value(0.0)]);
        let err = reader.finish().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "price");
    }

    #[test]
    fn test_required_integer_bounds() {
        let payload = json!({"low": 0, "high": 1001, "ok": 1000, "whole": 12.0, "frac": 1.5});
        let mut reader = FieldReader::new(&payload).unwrap();
        let rules: [IntegerRule<'_>; 2] = [&min_value(1_i64), &max_value(1000_i64)];
        reader.required_integer("low", &rules);
        reader.required_integer("high", &rules);
        assert_eq!(reader.required_integer("ok", &rules), 1000);
        assert_eq!(reader.required_integer("whole", &rules), 12);
        reader.required_integer("frac", &rules);
        let fields: Vec<_> = reader.errors().iter().map(|e| e.field.clone()).collect();
        assert_eq!(fields, vec!["low", "high", "frac"]);
    }

    #[test]
    fn test_required_integer_rejects_values_beyond_i64() {
        let payload = json!({
            "huge": 1e20,
            "negative_huge": -1e20,
            "unsigned": u64::MAX,
            "edge": 9_007_199_254_740_992.0
        });
        let mut reader = FieldReader::new(&payload).unwrap();
        let rules: [IntegerRule<'_>; 1] = [&min_value(1_i64)];

        reader.required_integer("huge", &rules);
        reader.required_integer("negative_huge", &[]);
        reader.required_integer("unsigned", &rules);
        assert_eq!(
            reader.required_integer("edge", &rules),
            9_007_199_254_740_992
        );

        let errors = reader.errors();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["huge", "negative_huge", "unsigned"]);
        assert!(errors.iter().all(|e| e.message == "must be an integer"));
    }

    #[test]
    fn test_bool_or_defaults_when_absent() {
        let payload = json!({"flag": false, "bad": "yes"});
        let mut reader = FieldReader::new(&payload).unwrap();
        assert!(reader.bool_or("available", true));
        assert!(!reader.bool_or("flag", true));
        reader.bool_or("bad", true);
        assert_eq!(reader.errors().len(), 1);
    }

    #[test]
    fn test_required_list_prefixes_nested_paths() {
        let payload = json!({"items": [{"quantity": 2}, {"quantity": 0}, "oops"]});
        let mut reader = FieldReader::new(&payload).unwrap();
        let quantities = reader.required_list("items", |item| {
            item.required_integer("quantity", &[&min_value(1_i64)])
        });
        assert_eq!(quantities, vec![2, 0]);
        let fields: Vec<_> = reader.errors().iter().map(|e| e.field.clone()).collect();
        assert_eq!(fields, vec!["items[1].quantity", "items[2]"]);
    }

    #[test]
    fn test_required_list_accepts_empty_array() {
        let payload = json!({"items": []});
        let mut reader = FieldReader::new(&payload).unwrap();
        let items: Vec<i64> = reader.required_list("items", |item| item.required_integer("q", &[]));
        assert!(items.is_empty());
        assert!(reader.finish().is_ok());
    }
}
