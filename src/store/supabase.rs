// file: src/store/supabase.rs
// description: hosted backend pairing a PostgREST document row with a storage bucket
// reference: https://supabase.com/docs/guides/api

use crate::error::{FolioError, Result};
use crate::models::{ContentDocument, fresh_id};
use crate::store::DocumentStore;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Hosted relational + object-store backend. The whole document lives in one
/// row (`id`, `payload`) read and upserted over PostgREST; images upload raw
/// to a storage bucket and come back as fetchable public URLs, so no
/// client-side compression is applied here.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
    table: String,
    row_id: String,
    bucket: String,
}

#[derive(Debug, Deserialize)]
struct DocumentRow {
    payload: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct UpsertRow<'a> {
    id: &'a str,
    payload: &'a ContentDocument,
}

impl SupabaseStore {
    pub fn new(
        base_url: String,
        anon_key: String,
        table: String,
        row_id: String,
        bucket: String,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            table,
            row_id,
            bucket,
        }
    }

    fn rest_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    fn map_transport_error(e: reqwest::Error) -> FolioError {
        FolioError::Connectivity(e.to_string())
    }

    async fn check_status(response: Response, context: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "no response body".to_string());

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                FolioError::Unauthorized(format!("{}: {}", context, message))
            }
            StatusCode::TOO_MANY_REQUESTS => FolioError::RateLimited,
            _ => FolioError::Remote {
                status: status.as_u16(),
                message: format!("{}: {}", context, message),
            },
        })
    }

    /// Object keys are namespaced by a fresh id so re-uploads of the same
    /// filename never clobber an image already referenced by the document.
    fn object_path(filename: &str) -> String {
        let safe: String = filename
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}-{}", fresh_id(), safe)
    }
}

#[async_trait]
impl DocumentStore for SupabaseStore {
    fn backend_name(&self) -> &'static str {
        "supabase"
    }

    async fn ping(&self) -> Result<bool> {
        let response = self
            .authed(self.client.head(self.rest_url()))
            .send()
            .await;
        match response {
            Ok(r) => Ok(!r.status().is_server_error()),
            Err(e) if e.is_connect() || e.is_timeout() => Ok(false),
            Err(e) => Err(Self::map_transport_error(e)),
        }
    }

    async fn load_document(&self) -> Result<Option<ContentDocument>> {
        let url = format!(
            "{}?id=eq.{}&select=payload",
            self.rest_url(),
            self.row_id
        );
        debug!("Fetching document row from {}", url);

        let response = self
            .authed(self.client.get(&url))
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let response = Self::check_status(response, "document read").await?;
        let rows: Vec<DocumentRow> = response
            .json()
            .await
            .map_err(|e| FolioError::InvalidPayload(format!("unreadable row response: {}", e)))?;

        let Some(row) = rows.into_iter().next() else {
            debug!("No document row with id {}", self.row_id);
            return Ok(None);
        };

        if !ContentDocument::has_valid_shape(&row.payload) {
            warn!("Document row {} failed shape check", self.row_id);
            return Ok(None);
        }

        match serde_json::from_value(row.payload) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                warn!(
                    "Document row {} does not decode, treating as absent: {}",
                    self.row_id, e
                );
                Ok(None)
            }
        }
    }

    async fn save_document(&self, doc: &ContentDocument) -> Result<()> {
        let rows = [UpsertRow {
            id: &self.row_id,
            payload: doc,
        }];

        debug!("Upserting document row {} into {}", self.row_id, self.table);

        let response = self
            .authed(self.client.post(self.rest_url()))
            .header("Content-Type", "application/json")
            .header("Prefer", "resolution=merge-duplicates")
            .json(&rows)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        Self::check_status(response, "document upsert").await?;
        Ok(())
    }

    async fn upload_image(&self, bytes: &[u8], filename: &str) -> Result<String> {
        if bytes.is_empty() {
            return Err(FolioError::Image("input file is empty".to_string()));
        }

        let path = Self::object_path(filename);
        let url = self.object_url(&path);
        debug!("Uploading {} bytes to {}", bytes.len(), url);

        let response = self
            .authed(self.client.post(&url))
            .header("Content-Type", crate::image::content_type_for(filename))
            .header("x-upsert", "true")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(FolioError::Remote {
                status: 404,
                message: format!(
                    "storage bucket '{}' not found; create it in the project dashboard",
                    self.bucket
                ),
            });
        }

        Self::check_status(response, "image upload").await?;
        Ok(self.public_url(&path))
    }
}
