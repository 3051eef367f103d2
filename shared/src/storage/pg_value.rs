//! Conversion of `PostgreSQL` column values to JSON.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::error::Error;
use tokio_postgres::types::{FromSql, Kind, Type};
use tokio_postgres::Row;
use uuid::Uuid;

/// Reads column `idx` of `row` as a JSON value.
///
/// SQL `NULL`, non-finite floats, and types without a mapping become `null`.
pub(crate) fn column_value(row: &Row, idx: usize) -> Result<Value, tokio_postgres::Error> {
    let ty = row.columns()[idx].type_();

    let value = match *ty {
        Type::BOOL => row.try_get::<_, Option<bool>>(idx)?.map(Value::Bool),
        Type::INT2 => row.try_get::<_, Option<i16>>(idx)?.map(Value::from),
        Type::INT4 => row.try_get::<_, Option<i32>>(idx)?.map(Value::from),
        Type::INT8 => row.try_get::<_, Option<i64>>(idx)?.map(Value::from),
        Type::OID => row.try_get::<_, Option<u32>>(idx)?.map(Value::from),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(idx)?
            .and_then(|v| float(f64::from(v))),
        Type::FLOAT8 => row.try_get::<_, Option<f64>>(idx)?.and_then(float),
        Type::NUMERIC => numeric(row, idx),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            row.try_get::<_, Option<String>>(idx)?.map(Value::String)
        }
        Type::JSON | Type::JSONB => row.try_get::<_, Option<Value>>(idx)?,
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(idx)?
            .map(|d| Value::String(d.to_string())),
        Type::TIME => row
            .try_get::<_, Option<NaiveTime>>(idx)?
            .map(|t| Value::String(t.to_string())),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(|t| Value::String(t.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(|t| Value::String(t.to_rfc3339())),
        Type::UUID => row
            .try_get::<_, Option<Uuid>>(idx)?
            .map(|u| Value::String(u.to_string())),
        Type::BOOL_ARRAY => array::<bool>(row, idx)?,
        Type::INT2_ARRAY => array::<i16>(row, idx)?,
        Type::INT4_ARRAY => array::<i32>(row, idx)?,
        Type::INT8_ARRAY => array::<i64>(row, idx)?,
        Type::FLOAT8_ARRAY => array::<f64>(row, idx)?,
        Type::TEXT_ARRAY | Type::VARCHAR_ARRAY => array::<String>(row, idx)?,
        _ if matches!(ty.kind(), Kind::Enum(_)) => row
            .try_get::<_, Option<EnumLabel>>(idx)?
            .map(|label| Value::String(label.0)),
        _ => {
            tracing::debug!(column = idx, pg_type = %ty, "No JSON mapping for column type");
            None
        }
    };

    Ok(value.unwrap_or(Value::Null))
}

fn float(v: f64) -> Option<Value> {
    Number::from_f64(v).map(Value::Number)
}

fn decimal(v: Decimal) -> Option<Value> {
    v.to_f64().and_then(float)
}

/// `NaN`, infinities and values wider than 96 bits do not fit a `Decimal`
/// and come back as `null`.
fn numeric(row: &Row, idx: usize) -> Option<Value> {
    match row.try_get::<_, Option<Decimal>>(idx) {
        Ok(value) => value.and_then(decimal),
        Err(e) => {
            tracing::debug!(column = idx, error = %e, "Unrepresentable numeric value");
            None
        }
    }
}

fn array<'a, T>(row: &'a Row, idx: usize) -> Result<Option<Value>, tokio_postgres::Error>
where
    T: FromSql<'a> + Into<Value>,
{
    Ok(row
        .try_get::<_, Option<Vec<Option<T>>>>(idx)?
        .map(|items| {
            Value::Array(
                items
                    .into_iter()
                    .map(|item| item.map_or(Value::Null, Into::into))
                    .collect(),
            )
        }))
}

/// Label of a user-defined enum value, sent as text on the wire.
struct EnumLabel(String);

impl<'a> FromSql<'a> for EnumLabel {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Ok(Self(std::str::from_utf8(raw)?.to_string()))
    }

    fn accepts(ty: &Type) -> bool {
        matches!(ty.kind(), Kind::Enum(_))
    }
}
