use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};
use tracing::warn;
use uuid::Uuid;

use super::record::{Record, ScalarValue};

/// How a column is read, chosen from its Postgres type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Numeric,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Uuid,
    Text,
    Other,
}

impl ColumnKind {
    fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "BOOL" => ColumnKind::Bool,
            "INT2" => ColumnKind::Int2,
            "INT4" => ColumnKind::Int4,
            "INT8" => ColumnKind::Int8,
            "FLOAT4" => ColumnKind::Float4,
            "FLOAT8" => ColumnKind::Float8,
            "NUMERIC" => ColumnKind::Numeric,
            "DATE" => ColumnKind::Date,
            "TIME" => ColumnKind::Time,
            "TIMESTAMP" => ColumnKind::Timestamp,
            "TIMESTAMPTZ" => ColumnKind::TimestampTz,
            "UUID" => ColumnKind::Uuid,
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => ColumnKind::Text,
            _ => ColumnKind::Other,
        }
    }
}

/// Normalize a driver row into a [`Record`], keyed by the row's own column names
pub fn record_from_row(row: &PgRow) -> Result<Record, sqlx::Error> {
    let mut record = Record::with_capacity(row.len());

    for (index, column) in row.columns().iter().enumerate() {
        let value = decode_column(row, index, column.type_info().name())?;
        record.push(column.name(), value);
    }

    Ok(record)
}

fn decode_column(row: &PgRow, index: usize, type_name: &str) -> Result<ScalarValue, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(ScalarValue::Null);
    }

    let value = match ColumnKind::from_type_name(type_name) {
        ColumnKind::Bool => ScalarValue::Bool(row.try_get::<bool, _>(index)?),
        ColumnKind::Int2 => ScalarValue::Int(row.try_get::<i16, _>(index)?.into()),
        ColumnKind::Int4 => ScalarValue::Int(row.try_get::<i32, _>(index)?.into()),
        ColumnKind::Int8 => ScalarValue::Int(row.try_get::<i64, _>(index)?),
        ColumnKind::Float4 => ScalarValue::Float(row.try_get::<f32, _>(index)?.into()),
        ColumnKind::Float8 => ScalarValue::Float(row.try_get::<f64, _>(index)?),
        ColumnKind::Numeric => numeric_value(row.try_get::<Decimal, _>(index)?),
        ColumnKind::Date => date_value(row.try_get::<NaiveDate, _>(index)?),
        ColumnKind::Time => ScalarValue::Text(row.try_get::<NaiveTime, _>(index)?.to_string()),
        ColumnKind::Timestamp => timestamp_value(row.try_get::<NaiveDateTime, _>(index)?),
        ColumnKind::TimestampTz => {
            ScalarValue::Text(row.try_get::<DateTime<Utc>, _>(index)?.to_rfc3339())
        }
        ColumnKind::Uuid => ScalarValue::Text(row.try_get::<Uuid, _>(index)?.to_string()),
        ColumnKind::Text => ScalarValue::Text(row.try_get::<String, _>(index)?),
        ColumnKind::Other => match row.try_get::<String, _>(index) {
            Ok(text) => ScalarValue::Text(text),
            Err(e) => {
                warn!(
                    "Unsupported column type {} at index {}, returning null: {}",
                    type_name, index, e
                );
                ScalarValue::Null
            }
        },
    };

    Ok(value)
}

/// Numerics become floats; values outside f64 keep their exact text
fn numeric_value(decimal: Decimal) -> ScalarValue {
    decimal
        .to_f64()
        .map(ScalarValue::Float)
        .unwrap_or_else(|| ScalarValue::Text(decimal.to_string()))
}

fn date_value(date: NaiveDate) -> ScalarValue {
    ScalarValue::Text(date.format("%Y-%m-%d").to_string())
}

fn timestamp_value(timestamp: NaiveDateTime) -> ScalarValue {
    ScalarValue::Text(timestamp.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}
