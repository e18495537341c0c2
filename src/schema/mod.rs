mod builder;
pub use builder::PhysicalSchemaBuilder;

use crate::errors::SchemaError;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, io::Read};

/// Logical type of a field in a [`PhysicalSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Binary,
    Array(Box<FieldType>),
    /// Map keyed by strings
    Map(Box<FieldType>),
}

impl FieldType {
    pub fn array(element: FieldType) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn map(value: FieldType) -> Self {
        Self::Map(Box::new(value))
    }

    /// DynamoDB only allows string, number and binary attributes in a primary key.
    pub fn is_key_type(&self) -> bool {
        matches!(
            self,
            Self::String
                | Self::TinyInt
                | Self::SmallInt
                | Self::Int
                | Self::BigInt
                | Self::Float
                | Self::Double
                | Self::Decimal
                | Self::Binary
        )
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => f.write_str("STRING"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::TinyInt => f.write_str("TINYINT"),
            Self::SmallInt => f.write_str("SMALLINT"),
            Self::Int => f.write_str("INT"),
            Self::BigInt => f.write_str("BIGINT"),
            Self::Float => f.write_str("FLOAT"),
            Self::Double => f.write_str("DOUBLE"),
            Self::Decimal => f.write_str("DECIMAL"),
            Self::Binary => f.write_str("BINARY"),
            Self::Array(element) => write!(f, "ARRAY<{element}>"),
            Self::Map(value) => write!(f, "MAP<STRING, {value}>"),
        }
    }
}

fn default_nullable() -> bool {
    true
}

/// A named, typed field of a [`PhysicalSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default = "default_nullable")]
    nullable: bool,
}

impl Field {
    /// Create a new nullable field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            nullable: true,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// The fields which make up the DynamoDB primary key of an item.
///
/// DynamoDB keys are either a single partition key or a partition key plus a sort key so this
/// set is never empty and holds at most two field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeyFields {
    partition_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sort_key: Option<String>,
}

impl PrimaryKeyFields {
    pub fn new(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: None,
        }
    }

    pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    /// Iterate over the key field names, partition key first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.partition_key.as_str()).chain(self.sort_key.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|key| key == name)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + usize::from(self.sort_key.is_some())
    }
}

/// Wire shape of a [`PhysicalSchema`], validated on the way in.
#[derive(Serialize, Deserialize)]
struct PhysicalSchemaDefinition {
    fields: Vec<Field>,
    primary_key: PrimaryKeyFields,
}

/// The fixed shape of every [`ChangeRecord`](crate::ChangeRecord) handed to a converter: the
/// ordered list of fields and which of them form the DynamoDB primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "PhysicalSchemaDefinition",
    into = "PhysicalSchemaDefinition"
)]
pub struct PhysicalSchema {
    fields: Vec<Field>,
    primary_key: PrimaryKeyFields,
}

impl PhysicalSchema {
    pub fn builder() -> PhysicalSchemaBuilder {
        PhysicalSchemaBuilder::new()
    }

    /// Load a schema definition from a JSON document.
    ///
    /// ```
    /// use dynamodb_change_sink::PhysicalSchema;
    ///
    /// let schema = PhysicalSchema::from_json_str(r#"{
    ///     "fields": [
    ///         { "name": "userId", "type": "string" },
    ///         { "name": "age", "type": "int" }
    ///     ],
    ///     "primary_key": { "partition_key": "userId" }
    /// }"#).unwrap();
    ///
    /// assert_eq!(schema.primary_key().partition_key(), "userId");
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::InvalidDefinition(e.to_string()))
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, SchemaError> {
        serde_json::from_reader(reader).map_err(|e| SchemaError::InvalidDefinition(e.to_string()))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn primary_key(&self) -> &PrimaryKeyFields {
        &self.primary_key
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<PhysicalSchemaDefinition> for PhysicalSchema {
    type Error = SchemaError;

    fn try_from(definition: PhysicalSchemaDefinition) -> Result<Self, Self::Error> {
        builder::validate(definition.fields, definition.primary_key)
    }
}

impl From<PhysicalSchema> for PhysicalSchemaDefinition {
    fn from(schema: PhysicalSchema) -> Self {
        Self {
            fields: schema.fields,
            primary_key: schema.primary_key,
        }
    }
}
