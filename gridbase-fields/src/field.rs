//! The field entity: identity, attribute store, construction.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;
use ulid::Ulid;

use gridbase_client::{ClientConfig, FieldAttributes, FieldClient, HttpFieldClient};

use crate::alias::IdentityKey;

/// Options for constructing a [`Field`].
///
/// Defaults: empty application and table ids, field id `-1` (draft), no
/// client configuration (the default [`ClientConfig`] is used when the
/// entity constructs its own client).
#[derive(Debug, Clone)]
pub struct FieldOptions {
    pub app_id: String,
    pub table_id: String,
    pub field_id: i64,
    pub client_config: Option<ClientConfig>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            table_id: String::new(),
            field_id: -1,
            client_config: None,
        }
    }
}

impl FieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    pub fn table_id(mut self, table_id: impl Into<String>) -> Self {
        self.table_id = table_id.into();
        self
    }

    pub fn field_id(mut self, field_id: i64) -> Self {
        self.field_id = field_id;
        self
    }

    /// Connection configuration for an entity-owned client.
    pub fn client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = Some(config);
        self
    }
}

/// One remote field definition as a local, mutable record.
///
/// A field id of `-1` (any non-positive value) marks a draft that hasn't
/// been created remotely; a positive fid addresses an existing remote field.
/// All non-identity state lives in the generic attribute map and is reached
/// through [`Field::get`] / [`Field::set`].
pub struct Field {
    instance_id: Ulid,
    app_id: String,
    table_id: String,
    field_id: i64,
    attributes: IndexMap<String, Value>,
    pub(crate) client: Arc<dyn FieldClient>,
}

impl Field {
    /// Construct a draft field owning its own client, built from the
    /// options' client configuration (or the default configuration).
    pub fn new(options: FieldOptions) -> Self {
        let config = options.client_config.clone().unwrap_or_default();
        let client: Arc<dyn FieldClient> = Arc::new(HttpFieldClient::from_config(config));
        Self::build(options, client)
    }

    /// Construct a field sharing an existing client handle. The caller
    /// keeps its own `Arc`; many entities may share one client.
    pub fn with_client(options: FieldOptions, client: Arc<dyn FieldClient>) -> Self {
        Self::build(options, client)
    }

    /// Construct and hydrate in one step: build from `options`, then apply
    /// each attribute entry through [`Field::set`] (aliasing applies).
    pub fn create(options: FieldOptions, attributes: FieldAttributes) -> Self {
        let mut field = Self::new(options);
        for (name, value) in attributes {
            field.set(&name, value);
        }
        field
    }

    fn build(options: FieldOptions, client: Arc<dyn FieldClient>) -> Self {
        let field = Self {
            instance_id: Ulid::new(),
            app_id: options.app_id,
            table_id: options.table_id,
            field_id: options.field_id,
            attributes: IndexMap::new(),
            client,
        };
        debug!(instance_id = %field.instance_id, field_id = field.field_id, "field constructed");
        field
    }

    /// Locally generated opaque id. Never transmitted to the remote
    /// service; only useful for tracking instances in the caller's process.
    pub fn instance_id(&self) -> Ulid {
        self.instance_id
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn set_app_id(&mut self, app_id: impl Into<String>) -> &mut Self {
        self.app_id = app_id.into();
        self
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn set_table_id(&mut self, table_id: impl Into<String>) -> &mut Self {
        self.table_id = table_id.into();
        self
    }

    /// The remote field id. `-1` means no remote identity assigned yet.
    pub fn fid(&self) -> i64 {
        self.field_id
    }

    pub fn set_fid(&mut self, field_id: i64) -> &mut Self {
        self.field_id = field_id;
        self
    }

    /// Whether this field has a remote identity.
    pub fn is_persisted(&self) -> bool {
        self.field_id > 0
    }

    /// Read an attribute. Identity aliases answer from the dedicated
    /// identity fields (always present); anything else answers from the
    /// generic map (`None` when unset).
    pub fn get(&self, name: &str) -> Option<Value> {
        match IdentityKey::resolve(name) {
            Some(IdentityKey::App) => Some(Value::from(self.app_id.clone())),
            Some(IdentityKey::Table) => Some(Value::from(self.table_id.clone())),
            Some(IdentityKey::Fid) => Some(Value::from(self.field_id)),
            None => self.attributes.get(name).cloned(),
        }
    }

    /// Write an attribute. Identity aliases update the dedicated identity
    /// fields and never land in the generic map. Returns the entity for
    /// chaining. No name or type validation happens here — the remote
    /// service validates on the next call.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match IdentityKey::resolve(name) {
            Some(IdentityKey::App) => self.app_id = coerce_string(value),
            Some(IdentityKey::Table) => self.table_id = coerce_string(value),
            Some(IdentityKey::Fid) => self.field_id = coerce_fid(&value),
            None => {
                self.attributes.insert(name.to_string(), value);
            }
        }
        self
    }

    /// The generic attribute map (identity fields excluded).
    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    /// An owned copy of the attribute map, as lifecycle operations return it.
    pub fn attribute_snapshot(&self) -> FieldAttributes {
        self.attributes.clone()
    }

    /// Reset to draft: fid back to `-1`, attribute map emptied. The parent
    /// identity (application, table) and the client handle survive.
    /// Idempotent and infallible.
    pub fn clear(&mut self) {
        self.field_id = -1;
        self.attributes.clear();
    }

    pub(crate) fn apply_response(&mut self, response: FieldAttributes) {
        for (name, value) in response {
            self.set(&name, value);
        }
    }

    pub(crate) fn replace_client(&mut self, client: Arc<dyn FieldClient>) {
        self.client = client;
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("instance_id", &self.instance_id)
            .field("app_id", &self.app_id)
            .field("table_id", &self.table_id)
            .field("field_id", &self.field_id)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

/// Identity ids are strings; accept JSON strings directly and render
/// anything else through its JSON form (`null` becomes empty).
fn coerce_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Field ids are integers; numeric strings parse, anything else falls back
/// to the `-1` draft sentinel.
fn coerce_fid(value: &Value) -> i64 {
    if let Some(n) = value.as_i64() {
        return n;
    }
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or(-1)
}
