use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// A generated scene, kept as an embeddable data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneImage {
    data_uri: String,
}

impl SceneImage {
    pub fn from_jpeg_base64(encoded: &str) -> Self {
        Self {
            data_uri: format!("{JPEG_DATA_URI_PREFIX}{encoded}"),
        }
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Raw image bytes behind the data URI.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let payload = self
            .data_uri
            .split_once(',')
            .map(|(_, data)| data)
            .unwrap_or_default();
        STANDARD.decode(payload)
    }
}

/// What the image panel currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SceneSlot {
    #[default]
    Empty,
    Pending,
    Ready(SceneImage),
    Unavailable,
}

impl SceneSlot {
    pub fn image(&self) -> Option<&SceneImage> {
        match self {
            SceneSlot::Ready(image) => Some(image),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_payload_as_jpeg_data_uri() {
        let image = SceneImage::from_jpeg_base64("AAEC");
        assert_eq!(image.data_uri(), "data:image/jpeg;base64,AAEC");
    }

    #[test]
    fn decodes_payload_bytes() {
        let image = SceneImage::from_jpeg_base64("AAEC");
        assert_eq!(image.decode_bytes().unwrap(), vec![0u8, 1, 2]);
    }

    #[test]
    fn invalid_payload_fails_to_decode() {
        let image = SceneImage::from_jpeg_base64("not base64!");
        assert!(image.decode_bytes().is_err());
    }
}
