// file: src/image.rs
// description: client-side image re-encoding for size-bounded uploads
// reference: https://docs.rs/image

use crate::config::ImageConfig;
use crate::error::{FolioError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use tracing::debug;

const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Re-encodes arbitrary source images into size-bounded JPEG data URIs so
/// embedded images cannot blow past the document payload ceiling. Backends
/// with a real object store upload raw bytes instead and skip this entirely.
#[derive(Debug, Clone)]
pub struct ImageEncoder {
    max_dimension: u32,
    jpeg_quality: u8,
}

impl ImageEncoder {
    pub fn new(max_dimension: u32, jpeg_quality: u8) -> Self {
        Self {
            max_dimension,
            jpeg_quality,
        }
    }

    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(config.max_dimension, config.jpeg_quality)
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    /// Decode, scale so the longer dimension does not exceed the ceiling,
    /// re-encode as lossy JPEG, and wrap in a self-contained data URI.
    pub fn encode_to_data_uri(&self, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(FolioError::Image("input file is empty".to_string()));
        }

        let decoded = image::load_from_memory(bytes)
            .map_err(|e| FolioError::Image(format!("cannot decode input image: {}", e)))?;

        let (w, h) = (decoded.width(), decoded.height());
        let scaled = if w.max(h) > self.max_dimension {
            debug!(
                "Scaling image from {}x{} to fit {} px",
                w, h, self.max_dimension
            );
            decoded.resize(self.max_dimension, self.max_dimension, FilterType::Lanczos3)
        } else {
            decoded
        };

        let rgb = scaled.to_rgb8();
        let mut encoded = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut encoded, self.jpeg_quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| FolioError::Image(format!("jpeg encoding failed: {}", e)))?;

        debug!(
            "Re-encoded image: {} bytes in, {} bytes out",
            bytes.len(),
            encoded.len()
        );

        Ok(format!("{}{}", DATA_URI_PREFIX, BASE64.encode(&encoded)))
    }

    pub fn is_data_uri(reference: &str) -> bool {
        reference.starts_with("data:")
    }

    /// Raw bytes of an encoded data URI, for inspection or re-upload.
    pub fn decode_data_uri(reference: &str) -> Result<Vec<u8>> {
        let payload = reference
            .split_once(";base64,")
            .map(|(_, tail)| tail)
            .ok_or_else(|| FolioError::Image("not a base64 data URI".to_string()))?;
        BASE64
            .decode(payload)
            .map_err(|e| FolioError::Image(format!("invalid base64 payload: {}", e)))
    }
}

/// Best-effort content type from a filename extension, for backends that
/// upload raw bytes.
pub fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "webp" => "image/webp",
        Some(ext) if ext == "gif" => "image/gif",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            // Noisy gradient so the encoding is not trivially compressible.
            pixel.0 = [
                (x % 256) as u8,
                (y % 256) as u8,
                ((x * 7 + y * 13) % 256) as u8,
            ];
        }
        let mut bytes = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut bytes, 95);
        img.write_with_encoder(encoder).unwrap();
        bytes
    }

    fn decoded_dimensions(data_uri: &str) -> (u32, u32) {
        let bytes = ImageEncoder::decode_data_uri(data_uri).unwrap();
        let img: DynamicImage = image::load_from_memory(&bytes).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn test_large_image_scaled_to_ceiling() {
        let encoder = ImageEncoder::new(1000, 70);
        let source = sample_jpeg(2400, 1600);
        let uri = encoder.encode_to_data_uri(&source).unwrap();

        let (w, h) = decoded_dimensions(&uri);
        assert_eq!(w.max(h), encoder.max_dimension());
        // Aspect ratio preserved: 2400x1600 -> 1000x666ish.
        assert!(h < w);
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let encoder = ImageEncoder::new(1200, 70);
        let source = sample_jpeg(320, 200);
        let uri = encoder.encode_to_data_uri(&source).unwrap();

        let (w, h) = decoded_dimensions(&uri);
        assert_eq!((w, h), (320, 200));
    }

    #[test]
    fn test_reencoding_shrinks_large_high_quality_source() {
        let encoder = ImageEncoder::new(1000, 60);
        let source = sample_jpeg(2400, 1600);
        let uri = encoder.encode_to_data_uri(&source).unwrap();
        let out = ImageEncoder::decode_data_uri(&uri).unwrap();
        assert!(out.len() < source.len());
    }

    #[test]
    fn test_output_is_data_uri() {
        let encoder = ImageEncoder::new(1000, 70);
        let uri = encoder.encode_to_data_uri(&sample_jpeg(64, 64)).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert!(ImageEncoder::is_data_uri(&uri));
        assert!(!ImageEncoder::is_data_uri("https://example.com/a.jpg"));
    }

    #[test]
    fn test_garbage_input_fails_decode() {
        let encoder = ImageEncoder::new(1000, 70);
        let err = encoder.encode_to_data_uri(b"not an image").unwrap_err();
        assert!(err.to_string().contains("decode"));
    }

    #[test]
    fn test_empty_input_rejected() {
        let encoder = ImageEncoder::new(1000, 70);
        assert!(encoder.encode_to_data_uri(&[]).is_err());
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_for("still.png"), "image/png");
        assert_eq!(content_type_for("still.JPG"), "image/jpeg");
        assert_eq!(content_type_for("noext"), "image/jpeg");
    }
}
