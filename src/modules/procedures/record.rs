//! JSON-safe representation of stored procedure result rows
//!
//! A [`Record`] keeps the columns in the order the procedure returned them,
//! and every cell is reduced to a [`ScalarValue`] so nothing driver specific
//! reaches the response body.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Nullable scalar cell value
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ScalarValue {
    /// Render the value as text, `None` for SQL null
    pub fn as_text(&self) -> Option<String> {
        match self {
            ScalarValue::Null => None,
            ScalarValue::Bool(b) => Some(b.to_string()),
            ScalarValue::Int(i) => Some(i.to_string()),
            ScalarValue::Float(f) => Some(f.to_string()),
            ScalarValue::Text(s) => Some(s.clone()),
        }
    }

    /// Coerce the value to an integer when it holds one exactly
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Null => None,
            ScalarValue::Bool(b) => Some(i64::from(*b)),
            ScalarValue::Int(i) => Some(*i),
            ScalarValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            ScalarValue::Float(_) => None,
            ScalarValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScalarValue::Null => serializer.serialize_none(),
            ScalarValue::Bool(b) => serializer.serialize_bool(*b),
            ScalarValue::Int(i) => serializer.serialize_i64(*i),
            // NaN and infinities have no JSON form
            ScalarValue::Float(f) if !f.is_finite() => serializer.serialize_none(),
            ScalarValue::Float(f) => serializer.serialize_f64(*f),
            ScalarValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Int(value.into())
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float(value)
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ScalarValue::Null)
    }
}

/// One result row as ordered column name / value pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, ScalarValue)>,
}

impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a column. A name already present (ignoring case) gets the first
    /// free numeric suffix, so two `ID` columns become `ID` and `ID1`.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<ScalarValue>) {
        let column = self.unique_name(column.into());
        self.fields.push((column, value.into()));
    }

    fn contains(&self, column: &str) -> bool {
        self.fields
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(column))
    }

    fn unique_name(&self, column: String) -> String {
        if !self.contains(&column) {
            return column;
        }

        let mut suffix = 1;
        loop {
            let candidate = format!("{}{}", column, suffix);
            if !self.contains(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Builder form of [`Record::push`]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.push(column, value);
        self
    }

    /// Case-insensitive lookup by column name
    pub fn get(&self, column: &str) -> Option<&ScalarValue> {
        self.fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
    }

    /// Value of the first column
    pub fn first(&self) -> Option<&ScalarValue> {
        self.fields.first().map(|(_, value)| value)
    }

    #[allow(dead_code)]
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_in_column_order() {
        let record = Record::default()
            .with("Zeta", 1)
            .with("Alpha", ScalarValue::Null)
            .with("Mid", "x");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Zeta":1,"Alpha":null,"Mid":"x"}"#);
    }

    #[test]
    fn test_duplicate_columns_are_all_kept() {
        let record = Record::default()
            .with("ID", 1)
            .with("FileName", "a.pdf")
            .with("ID", 2)
            .with("id", 3)
            .with("ID1", 4);

        assert_eq!(record.len(), 5);
        assert_eq!(
            record.columns().collect::<Vec<_>>(),
            vec!["ID", "FileName", "ID1", "id2", "ID11"]
        );
        assert_eq!(record.get("ID"), Some(&ScalarValue::Int(1)));
        assert_eq!(record.get("ID1"), Some(&ScalarValue::Int(2)));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"ID":1,"FileName":"a.pdf","ID1":2,"id2":3,"ID11":4}"#);
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let record = Record::default().with("OI_Status", 3);
        assert_eq!(record.get("oi_status"), Some(&ScalarValue::Int(3)));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_scalar_serialization() {
        let values = vec![
            ScalarValue::Null,
            ScalarValue::Bool(true),
            ScalarValue::Int(-7),
            ScalarValue::Float(1.5),
            ScalarValue::Float(f64::NAN),
            ScalarValue::Text("A100".into()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,true,-7,1.5,null,"A100"]"#);
    }

    #[test]
    fn test_scalar_coercions() {
        assert_eq!(ScalarValue::Text(" 42 ".into()).as_i64(), Some(42));
        assert_eq!(ScalarValue::Text("abc".into()).as_i64(), None);
        assert_eq!(ScalarValue::Float(3.0).as_i64(), Some(3));
        assert_eq!(ScalarValue::Float(3.5).as_i64(), None);
        assert_eq!(ScalarValue::Bool(true).as_i64(), Some(1));
        assert_eq!(ScalarValue::Null.as_i64(), None);

        assert_eq!(ScalarValue::Int(12).as_text(), Some("12".to_string()));
        assert_eq!(ScalarValue::Bool(false).as_text(), Some("false".to_string()));
        assert_eq!(ScalarValue::Null.as_text(), None);
    }

    #[test]
    fn test_option_into_scalar() {
        assert_eq!(ScalarValue::from(None::<String>), ScalarValue::Null);
        assert_eq!(
            ScalarValue::from(Some("x")),
            ScalarValue::Text("x".to_string())
        );
    }
}
