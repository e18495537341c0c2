//! Convert a changelog stream into DynamoDB writes.
//!
//! Each [`ChangeRecord`] is tagged with a [`ChangeKind`]. The [`ChangeEventConverter`] maps the
//! record onto DynamoDB attributes and then decides which write expresses the change:
//!
//! | Change kind | Write |
//! |---|---|
//! | `+I` insert | put of the full item |
//! | `+U` update (new image) | put of the full item |
//! | `-D` delete | delete by primary key |
//! | `-U` update (old image) | rejected |
extern crate self as dynamodb_change_sink;

pub mod converter;
pub mod errors;
pub mod mapper;
pub mod record;
pub mod schema;
pub mod traits;
pub mod write_request;

// Re-exports
pub use converter::{ChangeEventConverter, ElementConverter, SinkContext};
pub use dynamodb_change_sink_derive::ChangeRow;
pub use errors::Error;
pub use mapper::{AttributeMapper, AttributeMapping, SchemaMapper};
pub use record::{ChangeKind, ChangeRecord, FieldValue};
pub use schema::{PhysicalSchema, PrimaryKeyFields};
pub use traits::{ChangeRow, FieldTyped};
pub use write_request::{DynamoDbWriteRequest, WriteRequestType};
