use crate::engine::error::ImageError;
use crate::engine::llm_client::{ImageModel, ImageRequest};
use crate::engine::prompt_builder::PromptBuilder;
use crate::model::scene_image::SceneImage;

pub const SCENE_ASPECT_RATIO: &str = "16:9";
pub const SCENE_MIME_TYPE: &str = "image/jpeg";

pub fn request_image(model: &dyn ImageModel, description: &str) -> Result<SceneImage, ImageError> {
    let request = ImageRequest {
        prompt: PromptBuilder::scene_prompt(description),
        count: 1,
        aspect_ratio: SCENE_ASPECT_RATIO.into(),
        mime_type: SCENE_MIME_TYPE.into(),
    };

    let images = model.generate_images(&request)?;

    images
        .first()
        .map(|image| SceneImage::from_jpeg_base64(&image.base64))
        .ok_or(ImageError::NoImages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::ClientError;
    use crate::engine::llm_client::GeneratedImage;
    use std::sync::Mutex;

    struct FixedImages {
        images: Vec<&'static str>,
        prompts: Mutex<Vec<ImageRequest>>,
    }

    impl ImageModel for FixedImages {
        fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, ClientError> {
            self.prompts.lock().unwrap().push(request.clone());
            Ok(self
                .images
                .iter()
                .map(|b| GeneratedImage { base64: b.to_string() })
                .collect())
        }
    }

    #[test]
    fn requests_one_wide_jpeg_with_style() {
        let model = FixedImages {
            images: vec!["AAEC"],
            prompts: Mutex::new(Vec::new()),
        };

        let image = request_image(&model, "a lighthouse in a storm").unwrap();
        assert_eq!(image.data_uri(), "data:image/jpeg;base64,AAEC");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts[0].count, 1);
        assert_eq!(prompts[0].aspect_ratio, "16:9");
        assert_eq!(prompts[0].mime_type, "image/jpeg");
        assert!(prompts[0].prompt.contains("a lighthouse in a storm"));
        assert!(prompts[0].prompt.contains("vibrant, detailed, epic fantasy"));
    }

    #[test]
    fn no_images_is_an_error() {
        let model = FixedImages {
            images: vec![],
            prompts: Mutex::new(Vec::new()),
        };

        let err = request_image(&model, "anything").unwrap_err();
        assert!(matches!(err, ImageError::NoImages));
    }
}
