use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single parsed catalog row, keyed by (locale-specific) column name.
///
/// Values are kept as raw JSON so that numeric columns such as credits survive
/// whichever parser produced the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseRecord {
    fields: BTreeMap<String, Value>,
}

impl CourseRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for constructing rows in code.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Raw JSON value of a field.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field value as trimmed text; `None` when absent, blank, or not scalar.
    pub fn text(&self, key: &str) -> Option<String> {
        let text = match self.fields.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First non-blank value among several candidate column names.
    pub fn first_text<S: AsRef<str>>(&self, keys: &[S]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key.as_ref()))
    }

    /// Field value as text, or an empty string.
    pub fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    /// Number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for CourseRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_normalizes_scalars() {
        let record = CourseRecord::new()
            .with("name", "  Databases ")
            .with("credits", 3)
            .with("blank", "   ")
            .with("nested", json!({"a": 1}))
            .with("missing", Value::Null);

        assert_eq!(record.text("name").as_deref(), Some("Databases"));
        assert_eq!(record.text("credits").as_deref(), Some("3"));
        assert_eq!(record.text("blank"), None);
        assert_eq!(record.text("nested"), None);
        assert_eq!(record.text("missing"), None);
        assert_eq!(record.text("absent"), None);
        assert_eq!(record.text_or_empty("absent"), "");
    }

    #[test]
    fn test_first_text_falls_back() {
        let record: CourseRecord = [("教室", "管203")].into_iter().collect();
        assert_eq!(
            record.first_text(&["上課教室", "教室"]).as_deref(),
            Some("管203")
        );
        assert_eq!(record.first_text::<&str>(&[]), None);
    }

    #[test]
    fn test_deserializes_from_json_object() {
        let record: CourseRecord =
            serde_json::from_str(r#"{"課程名稱":"資料庫","學分數":3}"#).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.text("學分數").as_deref(), Some("3"));
    }
}
