/// Number of choices the storyteller must offer every turn.
pub const CHOICE_COUNT: usize = 3;

/// One unit of narrative progression, as produced by the storyteller.
/// On the wire `image_prompt` is `imagePrompt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdventureTurn {
    pub story: String,
    pub image_prompt: String,
    pub choices: Vec<String>,
    pub inventory: Vec<String>,
    pub quest: String,
}
