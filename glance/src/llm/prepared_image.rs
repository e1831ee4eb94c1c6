use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};

use crate::error::{GlanceError, Result};

pub const INVALID_IMAGE_FORMAT: &str =
    "Invalid image format. Please provide a base64 encoded image.";

/// An uploaded image normalized to RGB and re-encoded as PNG, ready to be
/// attached to a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl PreparedImage {
    /// Decode a `data:image/...;base64,<payload>` URL. The payload is
    /// everything after the first comma.
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        if !data_url.starts_with("data:image/") {
            return Err(GlanceError::Validation(INVALID_IMAGE_FORMAT.to_string()));
        }

        let payload = data_url
            .split_once(',')
            .map(|(_, payload)| payload.trim())
            .ok_or_else(|| GlanceError::Validation(INVALID_IMAGE_FORMAT.to_string()))?;

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| GlanceError::Validation(format!("Invalid base64 image data: {e}")))?;

        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = ImageReader::new(std::io::Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| GlanceError::Validation(format!("Failed to read image: {e}")))?
            .decode()
            .map_err(|e| GlanceError::Validation(format!("Failed to decode image: {e}")))?;

        let (width, height) = img.dimensions();
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

        let mut png = Vec::new();
        rgb.write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(Self { png, width, height })
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}
