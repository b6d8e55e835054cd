use chrono::{NaiveDate, NaiveDateTime, SecondsFormat};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::row::Row;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Value produced by a field for one column of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    ZonedDateTime(chrono::DateTime<Tz>),
    List(Vec<Value>),
    Map(Row),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Plain-text rendering used by the CSV writer and string templates.
    ///
    /// Nulls render empty; nested lists and maps render as compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(value) => value.to_string(),
            Value::Int(value) => value.to_string(),
            Value::Float(value) if value.is_finite() => format!("{value:?}"),
            Value::Float(value) => value.to_string(),
            Value::Str(value) => value.clone(),
            Value::Date(value) => value.format(DATE_FORMAT).to_string(),
            Value::DateTime(value) => value.format(DATETIME_FORMAT).to_string(),
            Value::ZonedDateTime(value) => value.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            Value::List(_) | Value::Map(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(value) => Some(*value),
            Value::DateTime(value) => Some(value.date()),
            Value::ZonedDateTime(value) => Some(value.date_naive()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Row> {
        match self {
            Value::Map(row) => Some(row),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::Str(value) => serializer.serialize_str(value),
            Value::Date(value) => serializer.collect_str(&value.format(DATE_FORMAT)),
            Value::DateTime(value) => serializer.collect_str(&value.format(DATETIME_FORMAT)),
            Value::ZonedDateTime(value) => {
                serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(row) => row.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<chrono::DateTime<Tz>> for Value {
    fn from(value: chrono::DateTime<Tz>) -> Self {
        Value::ZonedDateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Row> for Value {
    fn from(value: Row) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporal_values_render_as_iso_strings() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date");
        let datetime = date.and_hms_opt(13, 5, 9).expect("valid time");

        assert_eq!(Value::Date(date).to_text(), "2024-02-29");
        assert_eq!(Value::DateTime(datetime).to_text(), "2024-02-29T13:05:09");
        assert_eq!(
            serde_json::to_string(&Value::DateTime(datetime)).expect("serialize"),
            "\"2024-02-29T13:05:09\""
        );
    }

    #[test]
    fn zoned_datetime_keeps_offset() {
        use chrono::TimeZone;

        let utc = chrono::Utc
            .with_ymd_and_hms(2024, 7, 1, 12, 0, 0)
            .single()
            .expect("valid instant");
        let paris = utc.with_timezone(&chrono_tz::Europe::Paris);
        assert_eq!(
            Value::ZonedDateTime(paris).to_text(),
            "2024-07-01T14:00:00+02:00"
        );
    }

    #[test]
    fn whole_floats_keep_their_decimal_point() {
        assert_eq!(Value::Float(3.0).to_text(), "3.0");
        assert_eq!(Value::Float(-0.25).to_text(), "-0.25");
        assert_eq!(Value::Float(12.5).to_text(), "12.5");
        assert_eq!(
            serde_json::to_string(&Value::Float(3.0)).expect("serialize"),
            Value::Float(3.0).to_text()
        );
    }

    #[test]
    fn nested_values_render_as_compact_json() {
        let mut row = Row::new();
        row.insert("a", Value::Int(1));
        row.insert("b", Value::Null);
        let value = Value::List(vec![Value::Map(row), Value::Bool(true)]);
        assert_eq!(value.to_text(), r#"[{"a":1,"b":null},true]"#);
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Str("x".to_string()));
    }
}
