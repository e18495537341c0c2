use crate::{
    errors::ConvertError,
    mapper::{AttributeMapper, AttributeMapping, SchemaMapper},
    record::{ChangeKind, ChangeRecord},
    schema::PhysicalSchema,
    write_request::{DynamoDbWriteRequest, WriteRequestType},
};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, sync::OnceLock};

/// Information about the sink invocation a record is being converted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkContext {
    pub current_watermark: i64,
    pub timestamp: Option<i64>,
}

impl Default for SinkContext {
    fn default() -> Self {
        Self {
            current_watermark: i64::MIN,
            timestamp: None,
        }
    }
}

/// Turns one input element into one request entry for a sink writer.
pub trait ElementConverter<In, Out> {
    type Error;

    fn apply(&self, element: In, context: &SinkContext) -> Result<Out, Self::Error>;
}

/// Converts changelog records into DynamoDB write requests.
///
/// Inserts and the new image of an update become a [`WriteRequestType::Put`] of the whole item.
/// Deletes become a [`WriteRequestType::Delete`] carrying only the primary key attributes, which
/// is all DynamoDB uses to address the item. The old image of an update cannot be expressed as a
/// single write and is rejected with [`ConvertError::UnsupportedChangeKind`].
///
/// The [`AttributeMapper`] is built on first use rather than in [`ChangeEventConverter::new`].
/// Only the schema is serialized, so a converter which is serialized and restored elsewhere
/// (or cloned) starts without a mapper and builds its own on the next call to `apply`.
///
/// ```
/// use dynamodb_change_sink::{
///     schema::{Field, FieldType},
///     ChangeEventConverter, ChangeRecord, ElementConverter, PhysicalSchema, SinkContext,
///     WriteRequestType,
/// };
///
/// let schema = PhysicalSchema::builder()
///     .field(Field::new("userId", FieldType::String))
///     .field(Field::new("name", FieldType::String))
///     .partition_key("userId")
///     .build()
///     .unwrap();
///
/// let converter: ChangeEventConverter = ChangeEventConverter::new(schema);
/// let request = converter
///     .apply(
///         ChangeRecord::delete(vec!["u1".into(), "Alice".into()]),
///         &SinkContext::default(),
///     )
///     .unwrap();
///
/// assert_eq!(request.request_type(), WriteRequestType::Delete);
/// assert_eq!(request.item().len(), 1);
/// ```
#[derive(Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct ChangeEventConverter<M = SchemaMapper> {
    schema: PhysicalSchema,
    #[serde(skip)]
    mapper: OnceLock<M>,
}

impl<M: AttributeMapper> ChangeEventConverter<M> {
    pub fn new(schema: PhysicalSchema) -> Self {
        Self {
            schema,
            mapper: OnceLock::new(),
        }
    }

    pub fn schema(&self) -> &PhysicalSchema {
        &self.schema
    }

    /// Return the mapper, building it if this converter has not used one yet.
    pub fn mapper(&self) -> &M {
        self.mapper.get_or_init(|| {
            debug!(
                "Building attribute mapper for {} fields (primary key: {})",
                self.schema.len(),
                self.schema.primary_key().iter().collect::<Vec<_>>().join(", ")
            );
            M::for_schema(&self.schema)
        })
    }

    pub fn is_mapper_initialized(&self) -> bool {
        self.mapper.get().is_some()
    }

    /// Convert every record in stream order, stopping at the first failure.
    pub fn convert_all(
        &self,
        records: impl IntoIterator<Item = ChangeRecord>,
        context: &SinkContext,
    ) -> Result<Vec<DynamoDbWriteRequest>, ConvertError> {
        records
            .into_iter()
            .map(|record| self.apply(record, context))
            .collect()
    }

    fn key_only(&self, mut item: AttributeMapping) -> Result<AttributeMapping, ConvertError> {
        self.schema
            .primary_key()
            .iter()
            .map(|key| {
                item.remove_entry(key)
                    .ok_or_else(|| ConvertError::MissingKeyAttribute(key.to_string()))
            })
            .collect()
    }
}

impl<M: AttributeMapper> ElementConverter<ChangeRecord, DynamoDbWriteRequest>
    for ChangeEventConverter<M>
{
    type Error = ConvertError;

    fn apply(
        &self,
        element: ChangeRecord,
        _context: &SinkContext,
    ) -> Result<DynamoDbWriteRequest, Self::Error> {
        let item = self.mapper().convert(&element)?;

        let (request_type, item) = match element.kind() {
            ChangeKind::Insert | ChangeKind::UpdateAfter => (WriteRequestType::Put, item),
            ChangeKind::Delete => (WriteRequestType::Delete, self.key_only(item)?),
            ChangeKind::UpdateBefore => {
                warn!("Rejecting record with change kind {}", element.kind());
                return Err(ConvertError::UnsupportedChangeKind(
                    element.kind().to_string(),
                ));
            }
        };

        trace!("Converted {} record into {request_type} request", element.kind());

        Ok(DynamoDbWriteRequest::builder()
            .request_type(request_type)
            .item(item)
            .build()?)
    }
}

impl<M> Clone for ChangeEventConverter<M> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            mapper: OnceLock::new(),
        }
    }
}

impl<M> Debug for ChangeEventConverter<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeEventConverter")
            .field("schema", &self.schema)
            .field("mapper_initialized", &self.mapper.get().is_some())
            .finish()
    }
}
