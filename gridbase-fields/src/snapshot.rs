//! Portable JSON envelope: snapshot and restore.
//!
//! The envelope captures the table id, field id, the full attribute map,
//! and the client configuration the entity depends on:
//!
//! ```json
//! {
//!   "remoteClientSnapshot": { "host": "...", "userToken": "..." },
//!   "tableId": "t1",
//!   "fieldId": 7,
//!   "data": { "name": "Status" }
//! }
//! ```
//!
//! The application id is deliberately not part of the envelope — a restored
//! field is expected to be re-homed by the restoring context.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use gridbase_client::{ClientConfig, HttpFieldClient};

use crate::error::{FieldError, Result};
use crate::{Field, FieldOptions};

/// The persisted-state layout of a [`Field`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldSnapshot {
    pub remote_client_snapshot: ClientConfig,
    pub table_id: String,
    #[serde(alias = "id")]
    pub field_id: i64,
    pub data: IndexMap<String, Value>,
}

impl Default for FieldSnapshot {
    fn default() -> Self {
        Self {
            remote_client_snapshot: ClientConfig::default(),
            table_id: String::new(),
            field_id: -1,
            data: IndexMap::new(),
        }
    }
}

impl Field {
    /// Take a deep, independent snapshot of the entity. Mutating the entity
    /// afterwards does not affect a snapshot already taken.
    pub fn to_snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            remote_client_snapshot: self.client.config_snapshot(),
            table_id: self.table_id().to_string(),
            field_id: self.fid(),
            data: self.attribute_snapshot(),
        }
    }

    /// The snapshot as a JSON value.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.to_snapshot()).expect("field snapshot serializes")
    }

    /// Restore from a parsed envelope, in place.
    ///
    /// Each part is optional and applied only when present: a client
    /// snapshot replaces the current handle with a freshly constructed
    /// [`HttpFieldClient`]; `tableId` is set when present; the field id
    /// comes from `fieldId` or, failing that, the legacy `id` key, and
    /// falls back to `-1` when neither yields a usable value. Every `data`
    /// entry is folded through [`Field::set`], so identity aliasing applies
    /// on restore too. Returns the entity for chaining.
    ///
    /// Non-object input is rejected synchronously with
    /// [`FieldError::Snapshot`] before any state changes.
    pub fn from_json(&mut self, json: &Value) -> Result<&mut Self> {
        let object = json.as_object().ok_or_else(|| FieldError::Snapshot {
            message: format!("expected a JSON object, got {}", value_kind(json)),
        })?;

        if let Some(snapshot) = object.get("remoteClientSnapshot") {
            let config: ClientConfig = serde_json::from_value(snapshot.clone())?;
            self.replace_client(Arc::new(HttpFieldClient::from_config(config)));
        }

        if let Some(table_id) = object.get("tableId") {
            self.set("tableId", table_id.clone());
        }

        let field_id = object
            .get("fieldId")
            .or_else(|| object.get("id"))
            .cloned()
            .unwrap_or(Value::from(-1));
        self.set("fieldId", field_id);

        if let Some(Value::Object(data)) = object.get("data") {
            for (name, value) in data {
                self.set(name, value.clone());
            }
        }

        Ok(self)
    }

    /// Restore from a JSON-encoded string; parsed first, then applied as
    /// [`Field::from_json`].
    pub fn from_json_str(&mut self, json: &str) -> Result<&mut Self> {
        let value: Value = serde_json::from_str(json)?;
        self.from_json(&value)
    }

    /// Restore into a fresh default entity instead of mutating an existing
    /// one.
    pub fn from_snapshot(json: &Value) -> Result<Field> {
        let mut field = Field::new(FieldOptions::new());
        field.from_json(json)?;
        Ok(field)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gridbase_client::testing::MockFieldClient;
    use gridbase_client::ClientConfig;
    use serde_json::json;

    use super::*;

    fn sample_field() -> Field {
        let config = ClientConfig {
            host: "my.realm.example".into(),
            user_token: "tok".into(),
            ..ClientConfig::default()
        };
        let mock = Arc::new(MockFieldClient::with_config(config));
        let mut field = Field::with_client(
            FieldOptions::new()
                .app_id("app1")
                .table_id("t1")
                .field_id(7),
            mock,
        );
        field
            .set("name", "Status")
            .set("choices", json!(["Open", "Closed"]));
        field
    }

    // --- to_json ---

    #[test]
    fn snapshot_captures_identity_data_and_client_config() {
        let json = sample_field().to_json();
        assert_eq!(json["tableId"], "t1");
        assert_eq!(json["fieldId"], 7);
        assert_eq!(json["data"]["name"], "Status");
        assert_eq!(json["remoteClientSnapshot"]["host"], "my.realm.example");
        assert_eq!(json["remoteClientSnapshot"]["userToken"], "tok");
    }

    #[test]
    fn snapshot_excludes_application_id() {
        let json = sample_field().to_json();
        assert!(json.get("applicationId").is_none());
        assert!(json.get("appId").is_none());
        assert!(json["data"].get("applicationId").is_none());
    }

    #[test]
    fn snapshot_is_independent_of_later_mutation() {
        let mut field = sample_field();
        let snapshot = field.to_snapshot();

        field.set("name", "Renamed").set("fid", 99);

        assert_eq!(snapshot.field_id, 7);
        assert_eq!(snapshot.data.get("name"), Some(&json!("Status")));
    }

    // --- from_json ---

    #[test]
    fn round_trip_restores_identity_and_data() {
        let original = sample_field();
        let restored = Field::from_snapshot(&original.to_json()).unwrap();

        assert_eq!(restored.table_id(), original.table_id());
        assert_eq!(restored.fid(), original.fid());
        assert_eq!(restored.attributes(), original.attributes());
    }

    #[test]
    fn restore_accepts_a_json_string() {
        let mut field = Field::new(FieldOptions::new());
        field
            .from_json_str(r#"{"tableId": "t9", "fieldId": 3, "data": {"name": "X"}}"#)
            .unwrap();
        assert_eq!(field.table_id(), "t9");
        assert_eq!(field.fid(), 3);
        assert_eq!(field.get("name"), Some(json!("X")));
    }

    #[test]
    fn restore_rejects_non_object_input() {
        let mut field = Field::new(FieldOptions::new());
        let err = field.from_json(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, FieldError::Snapshot { .. }));

        let err = field.from_json_str("not json at all").unwrap_err();
        assert!(matches!(err, FieldError::Json(_)));
    }

    #[test]
    fn envelope_struct_accepts_the_legacy_id_key() {
        let snapshot: FieldSnapshot =
            serde_json::from_str(r#"{"tableId": "t1", "id": 11}"#).unwrap();
        assert_eq!(snapshot.field_id, 11);
        assert_eq!(snapshot.table_id, "t1");
    }

    #[test]
    fn restore_accepts_the_legacy_id_key() {
        let mut field = Field::new(FieldOptions::new());
        field.from_json(&json!({"id": 11})).unwrap();
        assert_eq!(field.fid(), 11);
    }

    #[test]
    fn field_id_wins_over_legacy_id() {
        let mut field = Field::new(FieldOptions::new());
        field.from_json(&json!({"fieldId": 5, "id": 11})).unwrap();
        assert_eq!(field.fid(), 5);
    }

    #[test]
    fn missing_field_id_defaults_to_draft() {
        let mut field = Field::new(FieldOptions::new().field_id(4));
        field.from_json(&json!({"tableId": "t1"})).unwrap();
        assert_eq!(field.fid(), -1);
    }

    #[test]
    fn data_entries_are_aliased_on_restore() {
        let mut field = Field::new(FieldOptions::new());
        field
            .from_json(&json!({"data": {"fid": 21, "name": "X"}}))
            .unwrap();
        assert_eq!(field.fid(), 21);
        assert!(!field.attributes().contains_key("fid"));
    }

    #[test]
    fn client_snapshot_reconstructs_the_client() {
        let mut field = Field::new(FieldOptions::new());
        field
            .from_json(&json!({
                "remoteClientSnapshot": {"host": "other.realm.example", "userToken": "t2"}
            }))
            .unwrap();

        let config = field.to_snapshot().remote_client_snapshot;
        assert_eq!(config.host, "other.realm.example");
        assert_eq!(config.user_token, "t2");
        // Unspecified settings merge with defaults.
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn restore_chains() {
        let mut field = Field::new(FieldOptions::new());
        field
            .from_json(&json!({"tableId": "t1"}))
            .unwrap()
            .set("name", "X");
        assert_eq!(field.get("name"), Some(json!("X")));
    }
}
