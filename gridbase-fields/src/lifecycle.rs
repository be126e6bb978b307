//! Sync lifecycle: load, save, delete.
//!
//! The state machine is driven entirely by the field id: non-positive means
//! draft (save creates), positive means persisted (save updates). Remote
//! responses are folded back through [`Field::set`], so identity-like keys
//! in a response update identity instead of polluting the attribute map —
//! that fold is also how a create response's assigned id flips a draft to
//! persisted.

use gridbase_client::{
    ClientError, DeleteFieldRequest, DeleteFieldResult, FieldAttributes, GetFieldRequest,
    PostFieldRequest, PutFieldRequest,
};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::Field;

impl Field {
    /// Fetch the remote field addressed by the current identity triple and
    /// fold every response entry into local state. Returns the full
    /// attribute map after folding.
    ///
    /// Remote failures propagate unmodified and leave local state untouched.
    pub async fn load(&mut self, request_options: Option<Value>) -> Result<FieldAttributes> {
        debug!(
            app_id = %self.app_id(),
            table_id = %self.table_id(),
            field_id = self.fid(),
            "loading field"
        );
        let response = self
            .client
            .get_field(GetFieldRequest {
                app_id: self.app_id().to_string(),
                table_id: self.table_id().to_string(),
                field_id: self.fid(),
                request_options,
            })
            .await?;
        self.apply_response(response);
        Ok(self.attribute_snapshot())
    }

    /// Persist local state: update when a remote identity exists, create
    /// otherwise.
    ///
    /// `attribute_names`, when given, limits the payload to those generic
    /// attributes (unknown names are skipped); the identity fields ride in
    /// the request envelope regardless. The response is folded back through
    /// `set` — on a create, that's where the newly assigned field id lands.
    /// Returns the full attribute map after folding. No local retry.
    pub async fn save(
        &mut self,
        attribute_names: Option<&[&str]>,
        request_options: Option<Value>,
    ) -> Result<FieldAttributes> {
        let attributes = match attribute_names {
            Some(names) => {
                let mut selected = FieldAttributes::new();
                for name in names {
                    if let Some(value) = self.attributes().get(*name) {
                        selected.insert((*name).to_string(), value.clone());
                    }
                }
                selected
            }
            None => self.attribute_snapshot(),
        };

        let response = if self.is_persisted() {
            debug!(field_id = self.fid(), count = attributes.len(), "updating field");
            self.client
                .put_field(PutFieldRequest {
                    app_id: self.app_id().to_string(),
                    table_id: self.table_id().to_string(),
                    field_id: self.fid(),
                    request_options,
                    attributes,
                })
                .await?
        } else {
            debug!(count = attributes.len(), "creating field");
            self.client
                .post_field(PostFieldRequest {
                    app_id: self.app_id().to_string(),
                    table_id: self.table_id().to_string(),
                    request_options,
                    attributes,
                })
                .await?
        };

        self.apply_response(response);
        Ok(self.attribute_snapshot())
    }

    /// Delete the remote field and reset to draft.
    ///
    /// Deleting a draft is a successful no-op: no network call, the entity
    /// is cleared and a success-shaped result is synthesized. A remote
    /// not-found for the current fid is treated the same way — the field is
    /// already gone. Any other failure propagates and the entity is left
    /// untouched for inspection or retry.
    pub async fn delete(&mut self, request_options: Option<Value>) -> Result<DeleteFieldResult> {
        let field_id = self.fid();
        if field_id <= 0 {
            debug!(field_id, "delete on draft field, skipping remote call");
            self.clear();
            return Ok(DeleteFieldResult {
                deleted_field_ids: vec![field_id],
                errors: Vec::new(),
            });
        }

        let request = DeleteFieldRequest {
            app_id: self.app_id().to_string(),
            table_id: self.table_id().to_string(),
            field_id,
            request_options,
        };
        match self.client.delete_field(request).await {
            Ok(result) => {
                self.clear();
                Ok(result)
            }
            Err(ClientError::FieldNotFound { field_id: missing }) if missing == field_id => {
                debug!(field_id, "field already gone, treating delete as success");
                self.clear();
                Ok(DeleteFieldResult {
                    deleted_field_ids: vec![field_id],
                    errors: Vec::new(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}
