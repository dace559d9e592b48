use crate::model::scene_image::SceneImage;
use crate::model::turn::AdventureTurn;

/// Identifies the turn a request was issued for. Strictly increasing
/// within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TurnId(pub u64);

impl TurnId {
    pub fn next(self) -> Self {
        TurnId(self.0 + 1)
    }
}

/// Everything the storyteller needs to produce the next turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    pub transcript: Vec<String>,
    pub inventory: Vec<String>,
    pub quest: String,
    pub choice: Option<String>,
}

pub enum EngineCommand {
    RequestTurn { turn_id: TurnId, request: TurnRequest },
}

pub enum EngineResponse {
    TurnReady {
        turn_id: TurnId,
        turn: AdventureTurn,
    },

    TurnFailed {
        turn_id: TurnId,
        message: String,
    },

    /// `None` when image generation failed.
    SceneReady {
        turn_id: TurnId,
        image: Option<SceneImage>,
    },
}

impl EngineResponse {
    pub fn turn_id(&self) -> TurnId {
        match self {
            EngineResponse::TurnReady { turn_id, .. }
            | EngineResponse::TurnFailed { turn_id, .. }
            | EngineResponse::SceneReady { turn_id, .. } => *turn_id,
        }
    }
}
