// file: src/store/docbin.rs
// description: generic HTTP document-bin backend (JSONbin-style v3 API)
// reference: https://jsonbin.io/api-reference

use crate::error::{FolioError, Result};
use crate::image::ImageEncoder;
use crate::models::ContentDocument;
use crate::store::DocumentStore;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

const MASTER_KEY_HEADER: &str = "X-Master-Key";

/// Document-bin cloud backend: one bin holds the whole document, replaced on
/// every save. The service has a hard payload ceiling, so the serialized size
/// is checked client-side before any network round-trip; oversized documents
/// (usually many embedded data-URI images) fail fast with the offending size.
///
/// There is no blob store on this backend, so uploads are compressed
/// client-side into data URIs.
pub struct DocBinStore {
    client: Client,
    base_url: String,
    bin_id: String,
    master_key: String,
    max_payload_bytes: usize,
    encoder: ImageEncoder,
}

/// Read envelope: the bin service wraps the stored document in `record`.
#[derive(Debug, Deserialize)]
struct BinReadResponse {
    record: serde_json::Value,
}

impl DocBinStore {
    pub fn new(
        base_url: String,
        bin_id: String,
        master_key: String,
        max_payload_bytes: usize,
        encoder: ImageEncoder,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bin_id,
            master_key,
            max_payload_bytes,
            encoder,
        }
    }

    fn bin_url(&self) -> String {
        format!("{}/b/{}", self.base_url, self.bin_id)
    }

    fn map_transport_error(e: reqwest::Error) -> FolioError {
        FolioError::Connectivity(e.to_string())
    }

    /// `payload_size` is `Some` only on writes; a 413 on a request that sent
    /// no payload is reported as a plain remote error, not a capacity one.
    fn map_error_status(
        &self,
        status: StatusCode,
        message: String,
        payload_size: Option<usize>,
    ) -> FolioError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FolioError::Unauthorized(message),
            StatusCode::PAYLOAD_TOO_LARGE => match payload_size {
                Some(size) => FolioError::Capacity {
                    size,
                    limit: self.max_payload_bytes,
                },
                None => FolioError::Remote {
                    status: status.as_u16(),
                    message,
                },
            },
            StatusCode::TOO_MANY_REQUESTS => FolioError::RateLimited,
            _ => FolioError::Remote {
                status: status.as_u16(),
                message,
            },
        }
    }

    async fn check_status(&self, response: Response, payload_size: Option<usize>) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "no response body".to_string());

        Err(self.map_error_status(status, message, payload_size))
    }
}

#[async_trait]
impl DocumentStore for DocBinStore {
    fn backend_name(&self) -> &'static str {
        "docbin"
    }

    async fn ping(&self) -> Result<bool> {
        match self.load_document().await {
            Ok(_) => Ok(true),
            Err(FolioError::Connectivity(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn load_document(&self) -> Result<Option<ContentDocument>> {
        let url = format!("{}/latest", self.bin_url());
        debug!("Fetching document from {}", url);

        let response = self
            .client
            .get(&url)
            .header(MASTER_KEY_HEADER, &self.master_key)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Bin {} holds no document", self.bin_id);
            return Ok(None);
        }

        let response = self.check_status(response, None).await?;
        let envelope: BinReadResponse = response
            .json()
            .await
            .map_err(|e| FolioError::InvalidPayload(format!("unreadable bin response: {}", e)))?;

        if !ContentDocument::has_valid_shape(&envelope.record) {
            warn!("Bin {} payload failed shape check", self.bin_id);
            return Ok(None);
        }

        match serde_json::from_value(envelope.record) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                warn!("Bin {} payload does not decode, treating as absent: {}", self.bin_id, e);
                Ok(None)
            }
        }
    }

    async fn save_document(&self, doc: &ContentDocument) -> Result<()> {
        let serialized = serde_json::to_vec(doc)?;
        let payload_size = serialized.len();
        if payload_size > self.max_payload_bytes {
            return Err(FolioError::Capacity {
                size: serialized.len(),
                limit: self.max_payload_bytes,
            });
        }

        debug!(
            "Replacing bin {} with {} byte document",
            self.bin_id,
            serialized.len()
        );

        let response = self
            .client
            .put(self.bin_url())
            .header(MASTER_KEY_HEADER, &self.master_key)
            .header("Content-Type", "application/json")
            .body(serialized)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        self.check_status(response, Some(payload_size)).await?;
        Ok(())
    }

    async fn upload_image(&self, bytes: &[u8], _filename: &str) -> Result<String> {
        self.encoder.encode_to_data_uri(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Localhost discard port with no listener: connections are refused
    // immediately, which is exactly the "configured but unreachable" contract
    // under test.
    fn unreachable_store(max_payload: usize) -> DocBinStore {
        DocBinStore::new(
            "http://127.0.0.1:9".to_string(),
            "bin123".to_string(),
            "key456".to_string(),
            max_payload,
            ImageEncoder::new(1000, 70),
        )
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_connectivity_error() {
        let store = unreachable_store(500_000);
        let err = store.load_document().await.unwrap_err();
        assert!(matches!(err, FolioError::Connectivity(_)));
    }

    #[tokio::test]
    async fn test_ping_reports_unreachable_as_false() {
        let store = unreachable_store(500_000);
        assert_eq!(store.ping().await.unwrap(), false);
    }

    #[tokio::test]
    async fn test_oversized_document_rejected_before_network() {
        // Ceiling of one byte: any document trips it. The target host is
        // unreachable, so getting Capacity instead of Connectivity proves the
        // check ran before the request was sent.
        let store = unreachable_store(1);
        let doc = ContentDocument::initial();
        let err = store.save_document(&doc).await.unwrap_err();
        match err {
            FolioError::Capacity { size, limit } => {
                assert!(size > 1);
                assert_eq!(limit, 1);
            }
            other => panic!("expected Capacity, got {:?}", other),
        }
        // The caller's copy is untouched and retryable.
        assert_eq!(doc, ContentDocument::initial());
    }

    #[tokio::test]
    async fn test_upload_compresses_without_network() {
        let store = unreachable_store(500_000);
        let mut img = image::RgbImage::new(32, 32);
        img.pixels_mut().for_each(|p| p.0 = [120, 20, 200]);
        let mut bytes = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, 90);
        img.write_with_encoder(encoder).unwrap();

        let reference = store.upload_image(&bytes, "still.jpg").await.unwrap();
        assert!(ImageEncoder::is_data_uri(&reference));
    }

    #[test]
    fn test_413_maps_to_capacity_only_on_writes() {
        let store = unreachable_store(500_000);

        let on_write = store.map_error_status(
            StatusCode::PAYLOAD_TOO_LARGE,
            "too big".to_string(),
            Some(600_000),
        );
        assert!(matches!(
            on_write,
            FolioError::Capacity {
                size: 600_000,
                limit: 500_000
            }
        ));

        let on_read =
            store.map_error_status(StatusCode::PAYLOAD_TOO_LARGE, "too big".to_string(), None);
        assert!(matches!(on_read, FolioError::Remote { status: 413, .. }));
    }

    #[test]
    fn test_error_status_taxonomy() {
        let store = unreachable_store(500_000);
        assert!(matches!(
            store.map_error_status(StatusCode::UNAUTHORIZED, "bad key".to_string(), None),
            FolioError::Unauthorized(_)
        ));
        assert!(matches!(
            store.map_error_status(StatusCode::TOO_MANY_REQUESTS, String::new(), None),
            FolioError::RateLimited
        ));
        assert!(matches!(
            store.map_error_status(StatusCode::INTERNAL_SERVER_ERROR, String::new(), None),
            FolioError::Remote { status: 500, .. }
        ));
    }

    #[test]
    fn test_bin_url_joins_without_double_slash() {
        let store = DocBinStore::new(
            "https://api.jsonbin.io/v3/".to_string(),
            "abc".to_string(),
            "key".to_string(),
            500_000,
            ImageEncoder::new(1000, 70),
        );
        assert_eq!(store.bin_url(), "https://api.jsonbin.io/v3/b/abc");
    }
}
