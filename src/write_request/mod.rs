use crate::{
    errors::{BuildError, WriteRequestError},
    mapper::AttributeMapping,
};
use aws_sdk_dynamodb::types::{
    Delete, DeleteRequest, Put, PutRequest, TransactWriteItem, WriteRequest,
};
use std::fmt::Display;

/// The two writes DynamoDB understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteRequestType {
    /// Create or fully replace the item
    Put,
    /// Remove the item addressed by its primary key
    Delete,
}

impl Display for WriteRequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Put => f.write_str("PUT"),
            Self::Delete => f.write_str("DELETE"),
        }
    }
}

/// A single write destined for a DynamoDB table.
///
/// For [`WriteRequestType::Put`] the item holds every attribute of the item, for
/// [`WriteRequestType::Delete`] it holds only the primary key attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamoDbWriteRequest {
    request_type: WriteRequestType,
    item: AttributeMapping,
}

impl DynamoDbWriteRequest {
    pub fn builder() -> DynamoDbWriteRequestBuilder {
        DynamoDbWriteRequestBuilder::default()
    }

    pub fn request_type(&self) -> WriteRequestType {
        self.request_type
    }

    pub fn item(&self) -> &AttributeMapping {
        &self.item
    }

    pub fn into_parts(self) -> (WriteRequestType, AttributeMapping) {
        (self.request_type, self.item)
    }

    /// Convert into an item for a `TransactWriteItems` call against `table_name`.
    pub fn into_transact_write_item(
        self,
        table_name: impl Into<String>,
    ) -> Result<TransactWriteItem, BuildError> {
        let item = match self.request_type {
            WriteRequestType::Put => TransactWriteItem::builder()
                .put(
                    Put::builder()
                        .table_name(table_name)
                        .set_item(Some(self.item))
                        .build()?,
                )
                .build(),
            WriteRequestType::Delete => TransactWriteItem::builder()
                .delete(
                    Delete::builder()
                        .table_name(table_name)
                        .set_key(Some(self.item))
                        .build()?,
                )
                .build(),
        };

        Ok(item)
    }
}

/// Convert into a request for a `BatchWriteItem` call.
impl TryFrom<DynamoDbWriteRequest> for WriteRequest {
    type Error = BuildError;

    fn try_from(request: DynamoDbWriteRequest) -> Result<Self, Self::Error> {
        let request = match request.request_type {
            WriteRequestType::Put => WriteRequest::builder()
                .put_request(PutRequest::builder().set_item(Some(request.item)).build()?)
                .build(),
            WriteRequestType::Delete => WriteRequest::builder()
                .delete_request(DeleteRequest::builder().set_key(Some(request.item)).build()?)
                .build(),
        };

        Ok(request)
    }
}

#[derive(Debug, Default)]
pub struct DynamoDbWriteRequestBuilder {
    request_type: Option<WriteRequestType>,
    item: Option<AttributeMapping>,
}

impl DynamoDbWriteRequestBuilder {
    pub fn request_type(mut self, request_type: WriteRequestType) -> Self {
        self.request_type = Some(request_type);
        self
    }

    pub fn item(mut self, item: AttributeMapping) -> Self {
        self.item = Some(item);
        self
    }

    pub fn build(self) -> Result<DynamoDbWriteRequest, WriteRequestError> {
        Ok(DynamoDbWriteRequest {
            request_type: self
                .request_type
                .ok_or(WriteRequestError::MissingField("request_type"))?,
            item: self.item.ok_or(WriteRequestError::MissingField("item"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::AttributeValue;

    fn key() -> AttributeMapping {
        AttributeMapping::from([("userId".to_string(), AttributeValue::S("u1".to_string()))])
    }

    #[test]
    fn test_build() {
        let request = DynamoDbWriteRequest::builder()
            .request_type(WriteRequestType::Delete)
            .item(key())
            .build()
            .unwrap();

        assert_eq!(request.request_type(), WriteRequestType::Delete);
        assert_eq!(request.item(), &key());
    }

    #[test]
    fn test_build_missing_type() {
        let err = DynamoDbWriteRequest::builder()
            .item(key())
            .build()
            .unwrap_err();

        assert_eq!(err, WriteRequestError::MissingField("request_type"));
    }

    #[test]
    fn test_build_missing_item() {
        let err = DynamoDbWriteRequest::builder()
            .request_type(WriteRequestType::Put)
            .build()
            .unwrap_err();

        assert_eq!(err, WriteRequestError::MissingField("item"));
    }

    #[test]
    fn test_into_put_write_request() {
        let request = DynamoDbWriteRequest::builder()
            .request_type(WriteRequestType::Put)
            .item(key())
            .build()
            .unwrap();

        let request = WriteRequest::try_from(request).unwrap();

        assert_eq!(request.put_request().map(|put| put.item()), Some(&key()));
        assert!(request.delete_request().is_none());
    }

    #[test]
    fn test_into_delete_write_request() {
        let request = DynamoDbWriteRequest::builder()
            .request_type(WriteRequestType::Delete)
            .item(key())
            .build()
            .unwrap();

        let request = WriteRequest::try_from(request).unwrap();

        assert_eq!(
            request.delete_request().map(|delete| delete.key()),
            Some(&key())
        );
        assert!(request.put_request().is_none());
    }

    #[test]
    fn test_into_transact_write_item() {
        let request = DynamoDbWriteRequest::builder()
            .request_type(WriteRequestType::Delete)
            .item(key())
            .build()
            .unwrap();

        let item = request.into_transact_write_item("users").unwrap();
        let delete = item.delete().unwrap();

        assert_eq!(delete.table_name(), "users");
        assert_eq!(delete.key(), &key());
        assert!(item.put().is_none());
    }
}
