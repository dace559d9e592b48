use crate::engine::error::TurnError;
use crate::engine::llm_client::{TextModel, TextRequest};
use crate::engine::prompt_builder::PromptBuilder;
use crate::engine::protocol::TurnRequest;
use crate::engine::turn_parser::parse_turn;
use crate::model::turn::AdventureTurn;

/// Knobs for the text model that do not change between turns.
#[derive(Debug, Clone)]
pub struct StorySettings {
    pub language: String,
    pub temperature: f32,
}

pub fn request_turn(
    model: &dyn TextModel,
    settings: &StorySettings,
    request: &TurnRequest,
) -> Result<AdventureTurn, TurnError> {
    let text_request = TextRequest {
        system_instruction: PromptBuilder::system_instruction(
            &request.transcript,
            &request.inventory,
            &request.quest,
        ),
        user_text: PromptBuilder::player_instruction(request.choice.as_deref(), &settings.language),
        response_schema: PromptBuilder::response_schema(),
        temperature: settings.temperature,
    };

    let text = model.generate_text(&text_request)?;

    parse_turn(&text).inspect_err(|e| {
        tracing::error!(error = %e, raw = %text, "failed to parse storyteller response");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::ClientError;
    use std::sync::Mutex;

    struct ScriptedText {
        reply: Result<String, u16>,
        seen: Mutex<Vec<TextRequest>>,
    }

    impl ScriptedText {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextModel for ScriptedText {
        fn generate_text(&self, request: &TextRequest) -> Result<String, ClientError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(ClientError::Api {
                    status: *status,
                    message: "quota exceeded".into(),
                }),
            }
        }
    }

    fn settings() -> StorySettings {
        StorySettings {
            language: "English".into(),
            temperature: 0.9,
        }
    }

    const TURN_JSON: &str = r#"{"story":"The bridge creaks.","imagePrompt":"a rope bridge over a chasm","choices":["Cross","Cut the ropes","Turn back"],"inventory":["knife"],"quest":"Cross the chasm"}"#;

    #[test]
    fn sends_state_and_choice_to_the_model() {
        let model = ScriptedText::replying(TURN_JSON);
        let request = TurnRequest {
            transcript: vec!["You reach a chasm.".into()],
            inventory: vec!["knife".into(), "rope".into()],
            quest: "Cross the chasm".into(),
            choice: Some("Test the bridge".into()),
        };

        let turn = request_turn(&model, &settings(), &request).unwrap();
        assert_eq!(turn.story, "The bridge creaks.");

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].system_instruction.contains("Cross the chasm"));
        assert!(seen[0].system_instruction.contains("knife, rope"));
        assert!(seen[0].system_instruction.contains("You reach a chasm."));
        assert!(seen[0].user_text.contains("\"Test the bridge\""));
        assert_eq!(seen[0].temperature, 0.9);
        assert_eq!(seen[0].response_schema, PromptBuilder::response_schema());
    }

    #[test]
    fn opening_turn_uses_start_phrase() {
        let model = ScriptedText::replying(TURN_JSON);
        let request = TurnRequest {
            transcript: vec![],
            inventory: vec![],
            quest: String::new(),
            choice: None,
        };

        request_turn(&model, &settings(), &request).unwrap();

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen[0].user_text, PromptBuilder::player_instruction(None, "English"));
    }

    #[test]
    fn invalid_json_fails_the_turn() {
        let model = ScriptedText::replying("```json\nnot really json\n```");
        let request = TurnRequest {
            transcript: vec![],
            inventory: vec![],
            quest: String::new(),
            choice: None,
        };

        let err = request_turn(&model, &settings(), &request).unwrap_err();
        assert!(matches!(err, TurnError::Parse(_)));
    }

    #[test]
    fn transport_errors_propagate() {
        let model = ScriptedText {
            reply: Err(429),
            seen: Mutex::new(Vec::new()),
        };
        let request = TurnRequest {
            transcript: vec![],
            inventory: vec![],
            quest: String::new(),
            choice: None,
        };

        let err = request_turn(&model, &settings(), &request).unwrap_err();
        assert!(matches!(err, TurnError::Request(ClientError::Api { status: 429, .. })));
    }
}
