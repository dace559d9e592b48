use anyhow::{Context, Result};
use eframe::egui;

use crate::model::scene_image::{SceneImage, SceneSlot};

/// GPU texture for the scene currently on screen.
///
/// Decoding happens once per new image, not every frame.
#[derive(Default)]
pub struct SceneTexture {
    source: Option<String>,
    handle: Option<egui::TextureHandle>,
}

impl SceneTexture {
    pub fn sync(&mut self, ctx: &egui::Context, slot: &SceneSlot) {
        let Some(scene) = slot.image() else {
            self.source = None;
            self.handle = None;
            return;
        };

        if self.source.as_deref() == Some(scene.data_uri()) {
            return;
        }

        self.source = Some(scene.data_uri().to_string());
        self.handle = match decode_scene(scene) {
            Ok(pixels) => Some(ctx.load_texture("scene", pixels, egui::TextureOptions::LINEAR)),
            Err(e) => {
                tracing::warn!(error = %e, "could not decode scene image");
                None
            }
        };
    }

    pub fn handle(&self) -> Option<&egui::TextureHandle> {
        self.handle.as_ref()
    }
}

pub fn decode_scene(scene: &SceneImage) -> Result<egui::ColorImage> {
    let bytes = scene.decode_bytes().context("scene payload is not valid base64")?;
    let rgba = image::load_from_memory(&bytes)
        .context("scene payload is not a supported image")?
        .to_rgba8();

    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use std::io::Cursor;

    fn encoded_jpeg(width: u32, height: u32) -> String {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .unwrap();
        STANDARD.encode(bytes)
    }

    #[test]
    fn decodes_jpeg_scene() {
        let scene = SceneImage::from_jpeg_base64(&encoded_jpeg(16, 9));
        let pixels = decode_scene(&scene).unwrap();
        assert_eq!(pixels.size, [16, 9]);
    }

    #[test]
    fn garbage_payload_is_an_error() {
        let scene = SceneImage::from_jpeg_base64(&STANDARD.encode(b"definitely not a jpeg"));
        assert!(decode_scene(&scene).is_err());
    }
}
