//! Schema driven decoding of the `{"f": [{"v": ...}]}` row encoding used by
//! query results. Every scalar arrives as a JSON string; the column type in the
//! schema decides what it becomes.
use serde_json::Value as Json;

use crate::error::{BigQueryError, Result};
use crate::structs::table_field_schema::{Mode, TableFieldSchema, Type};
use crate::structs::table_row::TableRow;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Seconds since the unix epoch, with microsecond precision.
    Timestamp(f64),
    Record(Row),
    Array(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) | Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

/// One decoded row, columns kept in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub fn format_rows(rows: &[TableRow], schema_fields: &[TableFieldSchema]) -> Result<Vec<Row>> {
    rows.iter()
        .map(|row| {
            let cells: Vec<&Json> = row.fields.iter().map(|cell| &cell.value).collect();
            format_row(&cells, schema_fields)
        })
        .collect()
}

fn format_row(cells: &[&Json], schema_fields: &[TableFieldSchema]) -> Result<Row> {
    if cells.len() < schema_fields.len() {
        return Err(BigQueryError::NotEnoughFields {
            expected: schema_fields.len(),
            found: cells.len(),
        });
    }
    let fields = schema_fields
        .iter()
        .zip(cells)
        .map(|(field, cell)| Ok((field.name.clone(), format_cell(field, cell)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Row { fields })
}

fn format_cell(field: &TableFieldSchema, value: &Json) -> Result<Value> {
    if field.mode != Mode::Repeated {
        return format_value(field, value);
    }
    match value {
        Json::Null => Ok(Value::Array(Vec::new())),
        Json::Array(items) => items
            .iter()
            .map(|item| format_value(field, item.get("v").unwrap_or(&Json::Null)))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Err(unexpected(field, "repeated", other)),
    }
}

fn format_value(field: &TableFieldSchema, value: &Json) -> Result<Value> {
    let text = match value {
        Json::Null => return Ok(Value::Null),
        Json::String(text) => text.as_str(),
        Json::Object(_) if is_record(&field.field_type) => {
            let cells: Vec<&Json> = value
                .get("f")
                .and_then(Json::as_array)
                .map(|cells| {
                    cells
                        .iter()
                        .map(|cell| cell.get("v").unwrap_or(&Json::Null))
                        .collect()
                })
                .unwrap_or_default();
            let nested = field.fields.as_deref().unwrap_or_default();
            return format_row(&cells, nested).map(Value::Record);
        }
        other => return Err(unexpected(field, "string", other)),
    };
    match field.field_type {
        Type::Integer | Type::Int64 => text
            .parse()
            .map(Value::Integer)
            .map_err(|_| unexpected(field, "integer", value)),
        Type::Float | Type::Float64 => text
            .parse()
            .map(Value::Float)
            .map_err(|_| unexpected(field, "float", value)),
        Type::Timestamp => text
            .parse()
            .map(Value::Timestamp)
            .map_err(|_| unexpected(field, "timestamp", value)),
        Type::Boolean | Type::Bool => {
            if text.eq_ignore_ascii_case("true") {
                Ok(Value::Boolean(true))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(Value::Boolean(false))
            } else {
                Err(unexpected(field, "boolean", value))
            }
        }
        Type::Record | Type::Struct => Err(unexpected(field, "record", value)),
        _ => Ok(Value::String(text.to_string())),
    }
}

fn is_record(field_type: &Type) -> bool {
    matches!(field_type, Type::Record | Type::Struct)
}

fn unexpected(field: &TableFieldSchema, expected: &str, found: &Json) -> BigQueryError {
    BigQueryError::UnexpectedFieldType(format!(
        "Expected {} value for field {}, found {}",
        expected, field.name, found
    ))
}
