use thiserror::Error;

pub use aws_sdk_dynamodb::error::BuildError;

use crate::schema::FieldType;

/// Error returned by [`PhysicalSchemaBuilder::build`](crate::schema::PhysicalSchemaBuilder::build)
/// when a schema definition cannot be used to address items in DynamoDB
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Schema must declare at least one field")]
    NoFields,
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),
    #[error("Missing partition key")]
    MissingPartitionKey,
    #[error("Key field '{0}' is not declared in the schema")]
    UndeclaredKeyField(String),
    #[error("Key field '{field}' has type {field_type} but keys must be a string, number or binary")]
    UnsupportedKeyType { field: String, field_type: FieldType },
    #[error("Field '{0}' cannot be both the partition key and the sort key")]
    DuplicateKeyField(String),
    #[error("Invalid schema definition: {0}")]
    InvalidDefinition(String),
}

/// Error returned by an [`AttributeMapper`](crate::mapper::AttributeMapper) when a record does not
/// conform to the schema the mapper was built for
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapperError {
    #[error("Record has {actual} values but the schema declares {expected} fields")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("Field '{field}' expected a {expected} value, got {actual}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        actual: &'static str,
    },
    #[error("Field '{0}' is NOT NULL but the record holds a null")]
    NullValue(String),
    #[error("Field '{0}' holds a non-finite number")]
    NonFiniteNumber(String),
    #[error("Field '{field}' holds a decimal DynamoDB cannot store: '{value}'")]
    InvalidDecimal { field: String, value: String },
    #[error("Key field '{0}' holds an empty value")]
    EmptyKeyValue(String),
}

/// Error returned by [`DynamoDbWriteRequestBuilder::build`](crate::write_request::DynamoDbWriteRequestBuilder::build)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteRequestError {
    #[error("Write request is missing required field: {0}")]
    MissingField(&'static str),
}

/// Error returned by [`ChangeEventConverter::apply`](crate::converter::ChangeEventConverter)
/// when a change record cannot be expressed as a single DynamoDB write
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Unsupported change kind: {0}")]
    UnsupportedChangeKind(String),
    #[error("MapperError: {0}")]
    Mapper(#[from] MapperError),
    #[error("Mapped item is missing key attribute: {0}")]
    MissingKeyAttribute(String),
    #[error("WriteRequestError: {0}")]
    WriteRequest(#[from] WriteRequestError),
}

/// Error abstracting all errors returned by `dynamodb-change-sink`.
///
/// If you use this error you can use `?` to convert from other `dynamodb-change-sink` errors to
/// this one.
#[derive(Error, Debug)]
pub enum Error {
    #[error("SchemaError: {0}")]
    SchemaError(#[from] SchemaError),
    #[error("MapperError: {0}")]
    MapperError(#[from] MapperError),
    #[error("ConvertError: {0}")]
    ConvertError(#[from] ConvertError),
    #[error("WriteRequestError: {0}")]
    WriteRequestError(#[from] WriteRequestError),
    #[error("AwsBuildError: {0}")]
    AwsBuildError(#[from] BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_error_from_mapper_error() {
        let err: ConvertError = MapperError::NullValue("userId".to_string()).into();

        assert_eq!(
            err.to_string(),
            "MapperError: Field 'userId' is NOT NULL but the record holds a null"
        );
    }

    #[test]
    fn test_umbrella_error_wraps_convert_error() {
        let err: Error = ConvertError::UnsupportedChangeKind("-U".to_string()).into();

        assert!(matches!(
            err,
            Error::ConvertError(ConvertError::UnsupportedChangeKind(ref kind)) if kind == "-U"
        ));
    }
}
