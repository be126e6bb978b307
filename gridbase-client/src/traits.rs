//! The polymorphic field-client capability trait and its request shapes.
//!
//! Every request carries the identity triple (or the part of it the
//! operation needs) plus an opaque `request_options` passthrough the entity
//! never inspects — implementations decide how to forward it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ClientConfig, Result};

/// Attribute mapping as the remote service reports it: name to untyped value.
pub type FieldAttributes = IndexMap<String, Value>;

/// Fetch one field by its identity triple.
#[derive(Debug, Clone)]
pub struct GetFieldRequest {
    pub app_id: String,
    pub table_id: String,
    pub field_id: i64,
    pub request_options: Option<Value>,
}

/// Create a field. No field id — the service assigns one.
#[derive(Debug, Clone)]
pub struct PostFieldRequest {
    pub app_id: String,
    pub table_id: String,
    pub request_options: Option<Value>,
    pub attributes: FieldAttributes,
}

/// Update an existing field in place.
#[derive(Debug, Clone)]
pub struct PutFieldRequest {
    pub app_id: String,
    pub table_id: String,
    pub field_id: i64,
    pub request_options: Option<Value>,
    pub attributes: FieldAttributes,
}

/// Delete one field by its identity triple.
#[derive(Debug, Clone)]
pub struct DeleteFieldRequest {
    pub app_id: String,
    pub table_id: String,
    pub field_id: i64,
    pub request_options: Option<Value>,
}

/// Outcome of a field deletion as the service reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFieldResult {
    pub deleted_field_ids: Vec<i64>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Remote operations a field entity depends on.
///
/// Implementations are shared behind `Arc<dyn FieldClient>`; the trait does
/// no locking because callers never mutate the client through it.
#[async_trait::async_trait]
pub trait FieldClient: Send + Sync {
    /// Fetch the field's attributes. Fails with
    /// [`crate::ClientError::FieldNotFound`] when the id doesn't exist.
    async fn get_field(&self, req: GetFieldRequest) -> Result<FieldAttributes>;

    /// Create a field. The returned attributes include the newly assigned
    /// numeric field id.
    async fn post_field(&self, req: PostFieldRequest) -> Result<FieldAttributes>;

    /// Update a field, returning its attributes as stored.
    async fn put_field(&self, req: PutFieldRequest) -> Result<FieldAttributes>;

    /// Delete a field. Fails with [`crate::ClientError::FieldNotFound`] when
    /// the id doesn't exist.
    async fn delete_field(&self, req: DeleteFieldRequest) -> Result<DeleteFieldResult>;

    /// Serialize this client back to a configuration snapshot.
    fn config_snapshot(&self) -> ClientConfig;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_result_uses_camel_case_keys() {
        let result = DeleteFieldResult {
            deleted_field_ids: vec![7],
            errors: Vec::new(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["deletedFieldIds"], serde_json::json!([7]));
        assert_eq!(json["errors"], serde_json::json!([]));
    }

    #[test]
    fn delete_result_errors_default_when_absent() {
        let result: DeleteFieldResult =
            serde_json::from_str(r#"{"deletedFieldIds": [3]}"#).unwrap();
        assert_eq!(result.deleted_field_ids, vec![3]);
        assert!(result.errors.is_empty());
    }
}
