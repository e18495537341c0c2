use super::{Field, PhysicalSchema, PrimaryKeyFields};
use crate::errors::SchemaError;
use itertools::Itertools;

/// Builder for a validated [`PhysicalSchema`].
///
/// ```
/// use dynamodb_change_sink::schema::{Field, FieldType, PhysicalSchema};
///
/// let schema = PhysicalSchema::builder()
///     .field(Field::new("userId", FieldType::String))
///     .field(Field::new("name", FieldType::String))
///     .field(Field::new("age", FieldType::Int))
///     .partition_key("userId")
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct PhysicalSchemaBuilder {
    fields: Vec<Field>,
    partition_key: Option<String>,
    sort_key: Option<String>,
}

impl PhysicalSchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn partition_key(mut self, name: impl Into<String>) -> Self {
        self.partition_key = Some(name.into());
        self
    }

    pub fn sort_key(mut self, name: impl Into<String>) -> Self {
        self.sort_key = Some(name.into());
        self
    }

    pub fn build(self) -> Result<PhysicalSchema, SchemaError> {
        let partition_key = self
            .partition_key
            .ok_or(SchemaError::MissingPartitionKey)?;

        let primary_key = match self.sort_key {
            Some(sort_key) => PrimaryKeyFields::new(partition_key).with_sort_key(sort_key),
            None => PrimaryKeyFields::new(partition_key),
        };

        validate(self.fields, primary_key)
    }
}

/// Check a field list and key against what DynamoDB can address.
/// Key fields are marked NOT NULL on success.
pub(super) fn validate(
    fields: Vec<Field>,
    primary_key: PrimaryKeyFields,
) -> Result<PhysicalSchema, SchemaError> {
    if fields.is_empty() {
        return Err(SchemaError::NoFields);
    }

    if let Some(name) = fields.iter().map(Field::name).duplicates().next() {
        return Err(SchemaError::DuplicateField(name.to_string()));
    }

    if primary_key.sort_key() == Some(primary_key.partition_key()) {
        return Err(SchemaError::DuplicateKeyField(
            primary_key.partition_key().to_string(),
        ));
    }

    for key in primary_key.iter() {
        let field = fields
            .iter()
            .find(|field| field.name() == key)
            .ok_or_else(|| SchemaError::UndeclaredKeyField(key.to_string()))?;

        if !field.field_type().is_key_type() {
            return Err(SchemaError::UnsupportedKeyType {
                field: key.to_string(),
                field_type: field.field_type().clone(),
            });
        }
    }

    let fields = fields
        .into_iter()
        .map(|field| {
            if primary_key.contains(field.name()) {
                field.not_null()
            } else {
                field
            }
        })
        .collect();

    Ok(PhysicalSchema {
        fields,
        primary_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    fn user_fields() -> Vec<Field> {
        vec![
            Field::new("userId", FieldType::String),
            Field::new("name", FieldType::String),
            Field::new("age", FieldType::Int),
        ]
    }

    #[test]
    fn test_build() {
        let schema = PhysicalSchema::builder()
            .fields(user_fields())
            .partition_key("userId")
            .build()
            .unwrap();

        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["userId", "name", "age"]
        );
        assert_eq!(schema.primary_key(), &PrimaryKeyFields::new("userId"));
        assert!(!schema.field("userId").unwrap().is_nullable());
        assert!(schema.field("name").unwrap().is_nullable());
    }

    #[test]
    fn test_build_composite_key() {
        let schema = PhysicalSchema::builder()
            .fields(user_fields())
            .partition_key("userId")
            .sort_key("age")
            .build()
            .unwrap();

        assert_eq!(
            schema.primary_key().iter().collect::<Vec<_>>(),
            vec!["userId", "age"]
        );
        assert_eq!(schema.index_of("age"), Some(2));
    }

    #[test]
    fn test_no_fields() {
        let err = PhysicalSchema::builder()
            .partition_key("userId")
            .build()
            .unwrap_err();

        assert_eq!(err, SchemaError::NoFields);
    }

    #[test]
    fn test_missing_partition_key() {
        let err = PhysicalSchema::builder()
            .fields(user_fields())
            .build()
            .unwrap_err();

        assert_eq!(err, SchemaError::MissingPartitionKey);
    }

    #[test]
    fn test_duplicate_field() {
        let err = PhysicalSchema::builder()
            .fields(user_fields())
            .field(Field::new("name", FieldType::Binary))
            .partition_key("userId")
            .build()
            .unwrap_err();

        assert_eq!(err, SchemaError::DuplicateField("name".to_string()));
    }

    #[test]
    fn test_undeclared_sort_key() {
        let err = PhysicalSchema::builder()
            .fields(user_fields())
            .partition_key("userId")
            .sort_key("createdAt")
            .build()
            .unwrap_err();

        assert_eq!(err, SchemaError::UndeclaredKeyField("createdAt".to_string()));
    }

    #[test]
    fn test_same_partition_and_sort_key() {
        let err = PhysicalSchema::builder()
            .fields(user_fields())
            .partition_key("userId")
            .sort_key("userId")
            .build()
            .unwrap_err();

        assert_eq!(err, SchemaError::DuplicateKeyField("userId".to_string()));
    }

    #[test]
    fn test_unsupported_key_type() {
        let err = PhysicalSchema::builder()
            .field(Field::new("active", FieldType::Boolean))
            .partition_key("active")
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            SchemaError::UnsupportedKeyType {
                field: "active".to_string(),
                field_type: FieldType::Boolean
            }
        );
    }
}
