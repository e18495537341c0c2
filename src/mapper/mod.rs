use crate::{
    errors::MapperError,
    record::{ChangeRecord, FieldValue},
    schema::{Field, FieldType, PhysicalSchema, PrimaryKeyFields},
};
use aws_sdk_dynamodb::{primitives::Blob, types::AttributeValue};
use std::collections::HashMap;

/// DynamoDB attributes for every field of a record, keyed by field name.
pub type AttributeMapping = HashMap<String, AttributeValue>;

/// Converts a [`ChangeRecord`] into the DynamoDB attributes of the item it describes.
///
/// Implementations must be total over the fields of the schema they were built for and must not
/// look at the record's [`ChangeKind`](crate::ChangeKind). Deciding what to do with a delete or an
/// update is the job of the [`ChangeEventConverter`](crate::ChangeEventConverter).
pub trait AttributeMapper {
    fn for_schema(schema: &PhysicalSchema) -> Self
    where
        Self: Sized;

    fn convert(&self, record: &ChangeRecord) -> Result<AttributeMapping, MapperError>;
}

/// [`AttributeMapper`] which type checks each value against its declared [`FieldType`].
///
/// | Field type | Attribute |
/// |---|---|
/// | `STRING` | `S` |
/// | `BOOLEAN` | `BOOL` |
/// | integers, `FLOAT`, `DOUBLE`, `DECIMAL` | `N` |
/// | `BINARY` | `B` |
/// | `ARRAY` | `L` |
/// | `MAP` | `M` |
/// | null | `NULL` |
///
/// Key fields must hold a non-empty string or binary since DynamoDB rejects empty key attributes.
#[derive(Debug, Clone)]
pub struct SchemaMapper {
    fields: Vec<Field>,
    primary_key: PrimaryKeyFields,
}

impl AttributeMapper for SchemaMapper {
    fn for_schema(schema: &PhysicalSchema) -> Self {
        Self {
            fields: schema.fields().to_vec(),
            primary_key: schema.primary_key().clone(),
        }
    }

    fn convert(&self, record: &ChangeRecord) -> Result<AttributeMapping, MapperError> {
        if record.arity() != self.fields.len() {
            return Err(MapperError::ArityMismatch {
                expected: self.fields.len(),
                actual: record.arity(),
            });
        }

        self.fields
            .iter()
            .zip(record.values())
            .map(|(field, value)| {
                if value.is_null() && !field.is_nullable() {
                    return Err(MapperError::NullValue(field.name().to_string()));
                }

                if self.primary_key.contains(field.name()) && is_empty_key_value(value) {
                    return Err(MapperError::EmptyKeyValue(field.name().to_string()));
                }

                let attribute = to_attribute_value(field.name(), field.field_type(), value)?;
                Ok((field.name().to_string(), attribute))
            })
            .collect()
    }
}

fn to_attribute_value(
    path: &str,
    field_type: &FieldType,
    value: &FieldValue,
) -> Result<AttributeValue, MapperError> {
    let attribute = match (field_type, value) {
        (_, FieldValue::Null) => AttributeValue::Null(true),

        (FieldType::String, FieldValue::String(s)) => AttributeValue::S(s.clone()),
        (FieldType::Boolean, FieldValue::Boolean(b)) => AttributeValue::Bool(*b),

        (FieldType::TinyInt, FieldValue::TinyInt(n)) => AttributeValue::N(n.to_string()),
        (FieldType::SmallInt, FieldValue::SmallInt(n)) => AttributeValue::N(n.to_string()),
        (FieldType::Int, FieldValue::Int(n)) => AttributeValue::N(n.to_string()),
        (FieldType::BigInt, FieldValue::BigInt(n)) => AttributeValue::N(n.to_string()),
        (FieldType::Float, FieldValue::Float(n)) if n.is_finite() => {
            AttributeValue::N(n.to_string())
        }
        (FieldType::Double, FieldValue::Double(n)) if n.is_finite() => {
            AttributeValue::N(n.to_string())
        }
        (FieldType::Float, FieldValue::Float(_)) | (FieldType::Double, FieldValue::Double(_)) => {
            return Err(MapperError::NonFiniteNumber(path.to_string()));
        }
        (FieldType::Decimal, FieldValue::Decimal(d)) => {
            let d = d.trim();
            if !is_storable_decimal(d) {
                return Err(MapperError::InvalidDecimal {
                    field: path.to_string(),
                    value: d.to_string(),
                });
            }
            AttributeValue::N(d.to_string())
        }

        (FieldType::Binary, FieldValue::Binary(bytes)) => AttributeValue::B(Blob::new(bytes.clone())),

        (FieldType::Array(element_type), FieldValue::Array(items)) => AttributeValue::L(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| to_attribute_value(&format!("{path}[{i}]"), element_type, item))
                .collect::<Result<_, _>>()?,
        ),
        (FieldType::Map(value_type), FieldValue::Map(entries)) => AttributeValue::M(
            entries
                .iter()
                .map(|(key, item)| {
                    let attribute = to_attribute_value(&format!("{path}.{key}"), value_type, item)?;
                    Ok((key.clone(), attribute))
                })
                .collect::<Result<_, MapperError>>()?,
        ),

        (expected, actual) => {
            return Err(MapperError::TypeMismatch {
                field: path.to_string(),
                expected: expected.clone(),
                actual: actual.type_name(),
            })
        }
    };

    Ok(attribute)
}

fn is_empty_key_value(value: &FieldValue) -> bool {
    match value {
        FieldValue::String(s) => s.is_empty(),
        FieldValue::Binary(bytes) => bytes.is_empty(),
        _ => false,
    }
}

/// DynamoDB numbers hold at most 38 significant digits
const MAX_PRECISION: usize = 38;
/// Decimal exponent range of a non-zero DynamoDB number: 1e-130 up to 9.99..e125
const MIN_EXPONENT: i64 = -130;
const MAX_EXPONENT: i64 = 125;

/// Checks `value` is a plain decimal literal, `[+-]digits[.digits][(e|E)[+-]digits]`, whose
/// precision and magnitude fit in a DynamoDB number.
fn is_storable_decimal(value: &str) -> bool {
    let (mantissa, exponent) = match value.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => match exponent.parse::<i64>() {
            Ok(exponent) => (mantissa, exponent),
            Err(_) => return false,
        },
        None => (value, 0),
    };

    let mantissa = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mantissa_ok = !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());

    if !mantissa_ok {
        return false;
    }

    let digits = whole.bytes().chain(fraction.bytes());
    let total = whole.len() + fraction.len();
    let leading = digits.clone().take_while(|b| *b == b'0').count();

    // Zero is always storable
    if leading == total {
        return true;
    }

    let trailing = digits.rev().take_while(|b| *b == b'0').count();
    let precision = total - leading - trailing;

    // Exponent of the first significant digit
    let magnitude = exponent
        .saturating_add(whole.len() as i64)
        .saturating_sub(1 + leading as i64);

    precision <= MAX_PRECISION && (MIN_EXPONENT..=MAX_EXPONENT).contains(&magnitude)
}
