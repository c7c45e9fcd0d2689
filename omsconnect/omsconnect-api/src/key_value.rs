use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use crate::ConnectError;

/// String-to-string configuration map with typed readers.
///
/// Used for connector and task configuration and for record extensions.
/// Keys iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValue {
    entries: BTreeMap<String, String>,
}

impl KeyValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` in its display form, replacing any previous value.
    pub fn put(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.entries.insert(key.into(), value.to_string());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_string(key).unwrap_or(default)
    }

    pub fn get_int(&self, key: &str) -> Result<Option<i32>, ConnectError> {
        self.parsed(key, "an int")
    }

    pub fn get_int_or(&self, key: &str, default: i32) -> Result<i32, ConnectError> {
        Ok(self.get_int(key)?.unwrap_or(default))
    }

    pub fn get_long(&self, key: &str) -> Result<Option<i64>, ConnectError> {
        self.parsed(key, "a long")
    }

    pub fn get_long_or(&self, key: &str, default: i64) -> Result<i64, ConnectError> {
        Ok(self.get_long(key)?.unwrap_or(default))
    }

    pub fn get_double(&self, key: &str) -> Result<Option<f64>, ConnectError> {
        self.parsed(key, "a double")
    }

    pub fn get_double_or(&self, key: &str, default: f64) -> Result<f64, ConnectError> {
        Ok(self.get_double(key)?.unwrap_or(default))
    }

    /// Only `true` and `false` are accepted, ignoring ASCII case.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConnectError> {
        let Some(raw) = self.get_string(key) else {
            return Ok(None);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(self.invalid(key, raw, "a bool")),
        }
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, ConnectError> {
        Ok(self.get_bool(key)?.unwrap_or(default))
    }

    /// Copy every entry of `other` into `self`, overwriting equal keys.
    pub fn merge(&mut self, other: &KeyValue) -> &mut Self {
        for (key, value) in other.iter() {
            self.entries.insert(key.to_string(), value.to_string());
        }
        self
    }

    fn parsed<T: FromStr>(&self, key: &str, expected: &'static str) -> Result<Option<T>, ConnectError> {
        self.get_string(key)
            .map(|raw| raw.trim().parse().map_err(|_| self.invalid(key, raw, expected)))
            .transpose()
    }

    fn invalid(&self, key: &str, raw: &str, expected: &'static str) -> ConnectError {
        ConnectError::InvalidConfig {
            key: key.to_string(),
            value: raw.to_string(),
            expected,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for KeyValue {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_reads() {
        let mut config = KeyValue::new();
        config
            .put("tasks", 4)
            .put("offset", -9_000_000_000i64)
            .put("ratio", 0.25)
            .put("enabled", "TRUE")
            .put("name", "orders");

        assert_eq!(config.get_int("tasks").ok().flatten(), Some(4));
        assert_eq!(config.get_long("offset").ok().flatten(), Some(-9_000_000_000));
        assert_eq!(config.get_double("ratio").ok().flatten(), Some(0.25));
        assert_eq!(config.get_bool("enabled").ok().flatten(), Some(true));
        assert_eq!(config.get_string("name"), Some("orders"));
        assert_eq!(config.get_int_or("missing", 7).ok(), Some(7));
        assert_eq!(config.get_string_or("missing", "x"), "x");
    }

    #[test]
    fn malformed_values_are_errors() {
        let config: KeyValue = [("tasks", "many"), ("flag", "yes")].into_iter().collect();
        let err = config.get_int("tasks").unwrap_err();
        assert!(matches!(
            err,
            ConnectError::InvalidConfig { ref key, expected: "an int", .. } if key == "tasks"
        ));
        assert_eq!(err.code(), "InternalError");
        assert!(config.get_bool("flag").is_err());
        assert!(config.get_long_or("tasks", 1).is_err());
    }
}
