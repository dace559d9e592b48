use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AppConfig;
use crate::engine::error::ClientError;

/// A structured-output request to the text model.
#[derive(Debug, Clone)]
pub struct TextRequest {
    pub system_instruction: String,
    pub user_text: String,
    pub response_schema: Value,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    pub count: u32,
    pub aspect_ratio: String,
    pub mime_type: String,
}

/// Base64 payload of one generated image.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub base64: String,
}

pub trait TextModel: Send + Sync {
    /// Returns the raw text the model produced.
    fn generate_text(&self, request: &TextRequest) -> Result<String, ClientError>;
}

pub trait ImageModel: Send + Sync {
    fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, ClientError>;
}

/* =========================
   Gemini wire types
   ========================= */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
    pub temperature: f32,
}

#[derive(Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Serialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Serialize)]
pub struct PredictInstance {
    pub prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub output_options: OutputOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub mime_type: String,
}

#[derive(Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: Option<String>,
}

impl GenerateContentRequest {
    pub fn from_text_request(request: &TextRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some(request.user_text.clone()),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(request.system_instruction.clone()),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: request.response_schema.clone(),
                temperature: request.temperature,
            },
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        (!text.trim().is_empty()).then_some(text)
    }
}

impl PredictRequest {
    pub fn from_image_request(request: &ImageRequest) -> Self {
        Self {
            instances: vec![PredictInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: PredictParameters {
                sample_count: request.count,
                aspect_ratio: request.aspect_ratio.clone(),
                output_options: OutputOptions {
                    mime_type: request.mime_type.clone(),
                },
            },
        }
    }
}

impl PredictResponse {
    pub fn into_images(self) -> Vec<GeneratedImage> {
        self.predictions
            .into_iter()
            .filter_map(|p| p.bytes_base64_encoded)
            .filter(|b| !b.is_empty())
            .map(|base64| GeneratedImage { base64 })
            .collect()
    }
}

/* =========================
   Client
   ========================= */

/// Blocking client for the Gemini text and Imagen endpoints.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    api_base: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        // A `None` timeout lets requests run until the server answers.
        let http = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.api_base, model, method)
    }

    fn post<B, R>(&self, url: String, body: &B) -> Result<R, ClientError>
    where
        B: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json::<R>()?)
    }
}

impl TextModel for GeminiClient {
    fn generate_text(&self, request: &TextRequest) -> Result<String, ClientError> {
        let url = self.endpoint(&self.text_model, "generateContent");
        tracing::debug!(model = %self.text_model, "requesting story turn");

        let body = GenerateContentRequest::from_text_request(request);
        let resp: GenerateContentResponse = self.post(url, &body)?;

        resp.text().ok_or(ClientError::EmptyResponse)
    }
}

impl ImageModel for GeminiClient {
    fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, ClientError> {
        let url = self.endpoint(&self.image_model, "predict");
        tracing::debug!(model = %self.image_model, "requesting scene image");

        let body = PredictRequest::from_image_request(request);
        let resp: PredictResponse = self.post(url, &body)?;

        Ok(resp.into_images())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_request_has_gemini_shape() {
        let request = TextRequest {
            system_instruction: "be a dungeon master".into(),
            user_text: "start".into(),
            response_schema: json!({ "type": "OBJECT" }),
            temperature: 0.9,
        };

        let body = serde_json::to_value(GenerateContentRequest::from_text_request(&request)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "start");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be a dungeon master");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(resp.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn response_without_candidates_has_no_text() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.text().is_none());
    }

    #[test]
    fn predict_request_has_imagen_shape() {
        let request = ImageRequest {
            prompt: "a castle".into(),
            count: 1,
            aspect_ratio: "16:9".into(),
            mime_type: "image/jpeg".into(),
        };

        let body = serde_json::to_value(PredictRequest::from_image_request(&request)).unwrap();

        assert_eq!(body["instances"][0]["prompt"], "a castle");
        assert_eq!(body["parameters"]["sampleCount"], 1);
        assert_eq!(body["parameters"]["aspectRatio"], "16:9");
        assert_eq!(body["parameters"]["outputOptions"]["mimeType"], "image/jpeg");
    }

    #[test]
    fn predictions_without_bytes_are_dropped() {
        let resp: PredictResponse = serde_json::from_value(json!({
            "predictions": [
                { "raiFilteredReason": "blocked" },
                { "bytesBase64Encoded": "AAEC", "mimeType": "image/jpeg" }
            ]
        }))
        .unwrap();

        let images = resp.into_images();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].base64, "AAEC");
    }

    #[test]
    fn client_builds_without_timeout() {
        let config = AppConfig::from_lookup(|key| match key {
            "API_KEY" => Some("k".to_string()),
            "ADVENTURE_HTTP_TIMEOUT_SECS" => Some("0".to_string()),
            _ => None,
        })
        .unwrap();

        assert!(config.http_timeout.is_none());
        assert!(GeminiClient::new(&config).is_ok());
    }

    #[test]
    fn client_builds_from_config() {
        let config = AppConfig::from_lookup(|key| (key == "API_KEY").then(|| "k".to_string())).unwrap();
        let client = GeminiClient::new(&config).unwrap();

        assert_eq!(
            client.endpoint(&client.text_model, "generateContent"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
