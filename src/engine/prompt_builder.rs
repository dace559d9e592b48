use serde_json::{json, Value};

use crate::model::transcript::TRANSCRIPT_SEPARATOR;
use crate::model::turn::CHOICE_COUNT;

/// Quest text used before the storyteller has assigned one.
pub const OPENING_QUEST: &str = "Begin your journey.";

/// Builds the text sent to the storyteller.
/// This struct only formats text. No networking, no parsing.
pub struct PromptBuilder;

impl PromptBuilder {
    /// System instruction carrying the dungeon master rules and the current state.
    pub fn system_instruction(transcript: &[String], inventory: &[String], quest: &str) -> String {
        let mut prompt = String::new();

        push_dungeon_master_rules(&mut prompt);
        push_current_state(&mut prompt, transcript, inventory, quest);

        prompt
    }

    /// The user-role instruction for this turn.
    pub fn player_instruction(choice: Option<&str>, language: &str) -> String {
        match choice {
            Some(choice) => format!("The player selected \"{choice}\". Continue the story."),
            None => format!(
                "This is the beginning of the adventure. Start a new, original fantasy story written in {language}."
            ),
        }
    }

    /// Scene description with the fixed art style appended.
    pub fn scene_prompt(description: &str) -> String {
        format!(
            "A digital painting of: {}, in a vibrant, detailed, epic fantasy art style.",
            description.trim()
        )
    }

    /// Output schema the text model must follow.
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "story": {
                    "type": "STRING",
                    "description": "The next part of the story. One or two paragraphs of immersive second-person narration describing the scene, emotions and events."
                },
                "imagePrompt": {
                    "type": "STRING",
                    "description": "A detailed, descriptive prompt for an image generator that vividly captures the current scene, characters and mood. Focus on visual elements."
                },
                "choices": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "minItems": CHOICE_COUNT,
                    "maxItems": CHOICE_COUNT,
                    "description": "Exactly three meaningful choices for the player. Each choice should lead to a different outcome."
                },
                "inventory": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "The player's current inventory. Add or remove items according to the events of the story. If nothing changed, return the current inventory unchanged."
                },
                "quest": {
                    "type": "STRING",
                    "description": "The player's current main quest or objective. Update it when the story moves to a new goal."
                }
            },
            "required": ["story", "imagePrompt", "choices", "inventory", "quest"]
        })
    }
}

fn push_dungeon_master_rules(prompt: &mut String) {
    prompt.push_str(
        "You are the AI dungeon master of an endless, text-based choose-your-own-adventure game. \
Your goal is to build a deep, consistent story that reacts dynamically to the player's choices.\n\
The user provides the story so far, the current state, and their latest choice.\n\
Your task is to generate the next turn of the adventure.\n\n\
Rules:\n\
- The story must continue from the previous events.\n\
- Your response must be a single JSON object that strictly follows the provided schema. Do not add any extra text or markdown.\n\
- Write the 'story' in the second person (e.g. \"You step into the dark cave...\").\n\
- The 'imagePrompt' must be descriptive enough to render the scene.\n\
- Provide exactly 3 meaningful 'choices' that significantly affect the story.\n\
- Update 'inventory' and 'quest' according to the new events in the 'story'.\n\n",
    );
}

fn push_current_state(prompt: &mut String, transcript: &[String], inventory: &[String], quest: &str) {
    let quest = if quest.trim().is_empty() {
        OPENING_QUEST
    } else {
        quest
    };

    prompt.push_str("CURRENT STATE:\n");
    prompt.push_str(&format!("- Quest: {quest}\n"));
    prompt.push_str(&format!("- Inventory: {}\n", inventory.join(", ")));
    prompt.push_str(&format!(
        "- Story so far: {}\n",
        transcript.join(TRANSCRIPT_SEPARATOR)
    ));
}
