//! reqwest-backed implementation of [`FieldClient`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    ClientConfig, ClientError, DeleteFieldRequest, DeleteFieldResult, FieldAttributes,
    FieldClient, GetFieldRequest, PostFieldRequest, PutFieldRequest, Result,
};

/// HTTP client for the hosted platform's field endpoints.
///
/// Field routes:
/// ```text
/// GET    {base}/v1/apps/{appId}/tables/{tableId}/fields/{fieldId}
/// POST   {base}/v1/apps/{appId}/tables/{tableId}/fields
/// PUT    {base}/v1/apps/{appId}/tables/{tableId}/fields/{fieldId}
/// DELETE {base}/v1/apps/{appId}/tables/{tableId}/fields/{fieldId}
/// ```
#[derive(Debug, Clone)]
pub struct HttpFieldClient {
    client: Client,
    config: ClientConfig,
}

impl HttpFieldClient {
    /// Build a client from a configuration snapshot.
    ///
    /// The underlying connection pool is created once here and reused for
    /// every request, with the snapshot's timeout and user agent applied.
    pub fn from_config(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn fields_url(&self, app_id: &str, table_id: &str) -> String {
        format!(
            "{}/v1/apps/{}/tables/{}/fields",
            self.config.base_url(),
            app_id,
            table_id
        )
    }

    fn field_url(&self, app_id: &str, table_id: &str, field_id: i64) -> String {
        format!("{}/{}", self.fields_url(app_id, table_id), field_id)
    }

    /// Attach auth and passthrough request options to a request.
    ///
    /// `request_options`, when a JSON object, flattens into query
    /// parameters; any other shape is logged and dropped.
    fn prepare(&self, builder: RequestBuilder, options: &Option<Value>) -> RequestBuilder {
        let mut builder = builder;
        if !self.config.user_token.is_empty() {
            builder = builder.bearer_auth(&self.config.user_token);
        }
        match options {
            Some(Value::Object(map)) => {
                for (key, value) in map {
                    let rendered = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    builder = builder.query(&[(key.as_str(), rendered.as_str())]);
                }
            }
            Some(other) => {
                debug!(options = %other, "ignoring non-object request options");
            }
            None => {}
        }
        builder
    }

    /// Map non-success statuses to errors. 404 on a request addressing a
    /// concrete field id becomes the structured not-found variant.
    async fn check_status(&self, field_id: Option<i64>, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(field_id) = field_id {
                debug!(field_id, "remote reports field not found");
                return Err(ClientError::FieldNotFound { field_id });
            }
        }
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(&self, response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse {
                message: e.to_string(),
            })
    }
}

#[async_trait::async_trait]
impl FieldClient for HttpFieldClient {
    #[instrument(skip(self, req), fields(table_id = %req.table_id, field_id = req.field_id))]
    async fn get_field(&self, req: GetFieldRequest) -> Result<FieldAttributes> {
        let url = self.field_url(&req.app_id, &req.table_id, req.field_id);
        let builder = self.prepare(self.client.get(&url), &req.request_options);
        let response = builder.send().await?;
        let response = self.check_status(Some(req.field_id), response).await?;
        self.decode(response).await
    }

    #[instrument(skip(self, req), fields(table_id = %req.table_id))]
    async fn post_field(&self, req: PostFieldRequest) -> Result<FieldAttributes> {
        let url = self.fields_url(&req.app_id, &req.table_id);
        let builder = self
            .prepare(self.client.post(&url), &req.request_options)
            .json(&req.attributes);
        let response = builder.send().await?;
        let response = self.check_status(None, response).await?;
        self.decode(response).await
    }

    #[instrument(skip(self, req), fields(table_id = %req.table_id, field_id = req.field_id))]
    async fn put_field(&self, req: PutFieldRequest) -> Result<FieldAttributes> {
        let url = self.field_url(&req.app_id, &req.table_id, req.field_id);
        let builder = self
            .prepare(self.client.put(&url), &req.request_options)
            .json(&req.attributes);
        let response = builder.send().await?;
        let response = self.check_status(Some(req.field_id), response).await?;
        self.decode(response).await
    }

    #[instrument(skip(self, req), fields(table_id = %req.table_id, field_id = req.field_id))]
    async fn delete_field(&self, req: DeleteFieldRequest) -> Result<DeleteFieldResult> {
        let url = self.field_url(&req.app_id, &req.table_id, req.field_id);
        let builder = self.prepare(self.client.delete(&url), &req.request_options);
        let response = builder.send().await?;
        let response = self.check_status(Some(req.field_id), response).await?;
        self.decode(response).await
    }

    fn config_snapshot(&self) -> ClientConfig {
        self.config.clone()
    }
}
