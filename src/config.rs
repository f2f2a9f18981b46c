// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{FolioError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub document: DocumentConfig,
    pub image: ImageConfig,
    pub admin: AdminConfig,
}

/// Which backend holds the document, plus per-backend credentials.
///
/// Credentials are plain `Option`s: an absent credential is a normal,
/// representable state that resolves to "no backend", never an error.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub kind: BackendKind,
    #[serde(default)]
    pub docbin: DocBinConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    None,
    Local,
    DocBin,
    Supabase,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocBinConfig {
    #[serde(default = "default_docbin_base_url")]
    pub base_url: String,
    pub bin_id: Option<String>,
    pub master_key: Option<String>,
}

impl Default for DocBinConfig {
    fn default() -> Self {
        Self {
            base_url: default_docbin_base_url(),
            bin_id: None,
            master_key: None,
        }
    }
}

fn default_docbin_base_url() -> String {
    "https://api.jsonbin.io/v3".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    #[serde(default = "default_supabase_table")]
    pub table: String,
    #[serde(default = "default_supabase_row_id")]
    pub row_id: String,
    #[serde(default = "default_supabase_bucket")]
    pub bucket: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            table: default_supabase_table(),
            row_id: default_supabase_row_id(),
            bucket: default_supabase_bucket(),
        }
    }
}

fn default_supabase_table() -> String {
    "portfolio".to_string()
}

fn default_supabase_row_id() -> String {
    "site".to_string()
}

fn default_supabase_bucket() -> String {
    "portfolio-images".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentConfig {
    pub local_path: PathBuf,
    /// Serialized-size ceiling checked before any network write.
    pub max_payload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageConfig {
    /// Longest output dimension in pixels after client-side re-encoding.
    pub max_dimension: u32,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

/// Shared static passphrase for mutating commands. Checked client-side and
/// explicitly not a security boundary; the content is public marketing copy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdminConfig {
    pub passphrase: Option<String>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| FolioError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| FolioError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            backend: BackendConfig {
                kind: BackendKind::Local,
                docbin: DocBinConfig {
                    base_url: default_docbin_base_url(),
                    bin_id: None,
                    master_key: None,
                },
                supabase: SupabaseConfig {
                    url: None,
                    anon_key: None,
                    table: default_supabase_table(),
                    row_id: default_supabase_row_id(),
                    bucket: default_supabase_bucket(),
                },
            },
            document: DocumentConfig {
                local_path: PathBuf::from("data/portfolio.json"),
                max_payload_bytes: 500_000,
            },
            image: ImageConfig {
                max_dimension: 1200,
                jpeg_quality: 70,
            },
            admin: AdminConfig { passphrase: None },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.document.max_payload_bytes == 0 {
            return Err(FolioError::Config(
                "max_payload_bytes must be greater than 0".to_string(),
            ));
        }

        if self.image.max_dimension == 0 {
            return Err(FolioError::Config(
                "max_dimension must be greater than 0".to_string(),
            ));
        }

        if self.image.jpeg_quality == 0 || self.image.jpeg_quality > 100 {
            return Err(FolioError::Config(
                "jpeg_quality must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.kind, BackendKind::Local);
        assert_eq!(config.image.max_dimension, 1200);
    }

    #[test]
    fn test_default_config_has_no_credentials() {
        let config = Config::default_config();
        assert!(config.backend.docbin.bin_id.is_none());
        assert!(config.backend.supabase.url.is_none());
        assert!(config.admin.passphrase.is_none());
    }

    #[test]
    fn test_zero_quality_rejected() {
        let mut config = Config::default_config();
        config.image.jpeg_quality = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_payload_ceiling_rejected() {
        let mut config = Config::default_config();
        config.document.max_payload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(
            &path,
            r#"
[backend]
kind = "docbin"

[backend.docbin]
bin_id = "abc123"
master_key = "secret"

[document]
local_path = "data/portfolio.json"
max_payload_bytes = 250000

[image]
max_dimension = 1000
jpeg_quality = 60

[admin]
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.backend.kind, BackendKind::DocBin);
        assert_eq!(config.backend.docbin.bin_id.as_deref(), Some("abc123"));
        assert_eq!(config.document.max_payload_bytes, 250_000);
        assert_eq!(config.image.max_dimension, 1000);
    }
}
