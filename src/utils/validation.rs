use crate::utils::error::{PlannerError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// A single field-level problem, addressed by a JSON-ish path such as
/// `main_workout[1].exercises[0].sets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub reason: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn summarize(violations: &[Violation]) -> String {
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads typed fields out of a JSON object, recording a [`Violation`] for
/// every missing or mistyped field instead of stopping at the first one.
///
/// Explicit `null` counts as absent: fine for optional fields, a violation
/// for required ones. Keys that are never asked for are ignored.
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    path: String,
    violations: &'a mut Vec<Violation>,
}

impl<'a> FieldReader<'a> {
    /// Open `value` as an object, or record a violation at `path` and return `None`.
    pub fn open(
        value: &'a Value,
        path: &str,
        violations: &'a mut Vec<Violation>,
    ) -> Option<Self> {
        match value {
            Value::Object(object) => Some(Self {
                object,
                path: path.to_string(),
                violations,
            }),
            other => {
                let at = if path.is_empty() { "$" } else { path };
                violations.push(Violation::new(
                    at,
                    format!("must be an object, found {}", kind_of(other)),
                ));
                None
            }
        }
    }

    pub fn path_of(&self, key: &str) -> String {
        join_path(&self.path, key)
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|v| !v.is_null())
    }

    fn missing(&mut self, key: &str) {
        let path = self.path_of(key);
        self.violations.push(Violation::new(path, "is required"));
    }

    fn wrong_kind(&mut self, key: &str, expected: &str, found: &Value) {
        let path = self.path_of(key);
        self.violations.push(Violation::new(
            path,
            format!("must be {}, found {}", expected, kind_of(found)),
        ));
    }

    pub fn optional_string(&mut self, key: &str) -> Option<String> {
        let value = self.present(key)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.wrong_kind(key, "a string", value);
                None
            }
        }
    }

    pub fn required_string(&mut self, key: &str) -> Option<String> {
        if self.present(key).is_none() {
            self.missing(key);
            return None;
        }
        self.optional_string(key)
    }

    /// Integer ≥ 1. Floats such as `3.0` are rejected rather than truncated.
    pub fn optional_positive_int(&mut self, key: &str) -> Option<u32> {
        let value = self.present(key)?;
        match value.as_u64() {
            Some(n) if n >= 1 && n <= u64::from(u32::MAX) => Some(n as u32),
            _ => {
                let path = self.path_of(key);
                self.violations.push(Violation::new(
                    path,
                    format!("must be a positive integer, found {}", value),
                ));
                None
            }
        }
    }

    pub fn optional_bool(&mut self, key: &str) -> Option<bool> {
        let value = self.present(key)?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.wrong_kind(key, "a boolean", value);
                None
            }
        }
    }

    /// Object whose values must all be booleans.
    pub fn optional_bool_map(&mut self, key: &str) -> Option<Vec<(String, bool)>> {
        let value = self.present(key)?;
        let Some(map) = value.as_object() else {
            self.wrong_kind(key, "an object of booleans", value);
            return None;
        };

        let mut entries = Vec::with_capacity(map.len());
        let mut ok = true;
        for (name, flag) in map {
            match flag.as_bool() {
                Some(b) => entries.push((name.clone(), b)),
                None => {
                    ok = false;
                    let path = join_path(&self.path_of(key), name);
                    self.violations.push(Violation::new(
                        path,
                        format!("must be a boolean, found {}", kind_of(flag)),
                    ));
                }
            }
        }
        ok.then_some(entries)
    }

    /// Required array; `item` is called for every element with its path and
    /// returns `None` when the element itself was invalid.
    pub fn required_array<T>(
        &mut self,
        key: &str,
        mut item: impl FnMut(&Value, &str, &mut Vec<Violation>) -> Option<T>,
    ) -> Option<Vec<T>> {
        let Some(value) = self.present(key) else {
            self.missing(key);
            return None;
        };
        let Some(elements) = value.as_array() else {
            self.wrong_kind(key, "an array", value);
            return None;
        };

        let base = self.path_of(key);
        let mut items = Vec::with_capacity(elements.len());
        let mut ok = true;
        for (index, element) in elements.iter().enumerate() {
            let path = format!("{}[{}]", base, index);
            match item(element, &path, &mut *self.violations) {
                Some(parsed) => items.push(parsed),
                None => ok = false,
            }
        }
        ok.then_some(items)
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PlannerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PlannerError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PlannerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PlannerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("ollama_endpoint", "http://localhost:11434").is_ok());
        assert!(validate_url("ollama_endpoint", "https://example.com").is_ok());
        assert!(validate_url("ollama_endpoint", "").is_err());
        assert!(validate_url("ollama_endpoint", "invalid-url").is_err());
        assert!(validate_url("ollama_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeout_seconds", 120, 1, 600).is_ok());
        assert!(validate_range("timeout_seconds", 0, 1, 600).is_err());
        assert!(validate_range("timeout_seconds", 601, 1, 600).is_err());
    }

    #[test]
    fn test_field_reader_collects_all_violations() {
        let value = json!({"name": 5, "count": -1, "flag": "yes", "note": null});
        let mut violations = Vec::new();
        let mut reader = FieldReader::open(&value, "", &mut violations).unwrap();

        assert_eq!(reader.required_string("name"), None);
        assert_eq!(reader.optional_positive_int("count"), None);
        assert_eq!(reader.optional_bool("flag"), None);
        assert_eq!(reader.optional_string("note"), None);
        assert_eq!(reader.required_string("missing"), None);

        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "count", "flag", "missing"]);
    }

    #[test]
    fn test_field_reader_rejects_float_counts() {
        let value = json!({"sets": 3.0});
        let mut violations = Vec::new();
        let mut reader = FieldReader::open(&value, "warmup[0]", &mut violations).unwrap();

        assert_eq!(reader.optional_positive_int("sets"), None);
        assert_eq!(violations[0].path, "warmup[0].sets");
    }

    #[test]
    fn test_field_reader_array_paths() {
        let value = json!({"items": ["a", 1, "c"]});
        let mut violations = Vec::new();
        let mut reader = FieldReader::open(&value, "", &mut violations).unwrap();

        let items = reader.required_array("items", |element, path, violations| {
            match element.as_str() {
                Some(s) => Some(s.to_string()),
                None => {
                    violations.push(Violation::new(path, "must be a string"));
                    None
                }
            }
        });

        assert!(items.is_none());
        assert_eq!(violations, vec![Violation::new("items[1]", "must be a string")]);
    }

    #[test]
    fn test_open_non_object() {
        let mut violations = Vec::new();
        assert!(FieldReader::open(&json!([1, 2]), "", &mut violations).is_none());
        assert_eq!(violations[0].path, "$");
    }
}
