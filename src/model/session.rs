use crate::engine::protocol::{EngineCommand, EngineResponse, TurnId, TurnRequest};
use crate::model::scene_image::SceneSlot;
use crate::model::transcript::Transcript;
use crate::model::turn::AdventureTurn;

/// UI-visible state of one adventure, plus the rules for moving it forward.
///
/// Lives on the UI thread. Requests leave as `EngineCommand`s and results
/// come back through `apply`; anything tagged with a superseded turn is
/// dropped there.
#[derive(Debug, Default)]
pub struct SessionState {
    turn: Option<AdventureTurn>,
    transcript: Transcript,
    scene: SceneSlot,
    loading: bool,
    error: Option<String>,
    current: TurnId,
    pending_choice: Option<String>,
}

impl SessionState {
    pub fn new(transcript_limit: Option<usize>) -> Self {
        Self {
            transcript: Transcript::new(transcript_limit),
            ..Default::default()
        }
    }

    pub fn turn(&self) -> Option<&AdventureTurn> {
        self.turn.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn scene(&self) -> &SceneSlot {
        &self.scene
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_turn(&self) -> TurnId {
        self.current
    }

    /// Starts a new turn. Returns `None` while another turn is in flight.
    pub fn begin_turn(&mut self, choice: Option<String>) -> Option<EngineCommand> {
        if self.loading {
            tracing::debug!("turn already in flight, ignoring request");
            return None;
        }

        self.current = self.current.next();
        self.loading = true;
        self.error = None;

        if choice.is_some() {
            self.scene = SceneSlot::Empty;
        }

        let (inventory, quest) = match &self.turn {
            Some(turn) => (turn.inventory.clone(), turn.quest.clone()),
            None => (Vec::new(), String::new()),
        };

        self.pending_choice = choice.clone();

        Some(EngineCommand::RequestTurn {
            turn_id: self.current,
            request: TurnRequest {
                transcript: self.transcript.to_vec(),
                inventory,
                quest,
                choice,
            },
        })
    }

    /// Asks for a fresh opening scene. The transcript is kept, so the
    /// storyteller still sees what happened before.
    pub fn restart(&mut self) -> Option<EngineCommand> {
        self.begin_turn(None)
    }

    pub fn apply(&mut self, resp: EngineResponse) {
        let turn_id = resp.turn_id();
        if turn_id != self.current {
            tracing::debug!(
                turn = turn_id.0,
                current = self.current.0,
                "discarding response for superseded turn"
            );
            return;
        }

        match resp {
            EngineResponse::TurnReady { turn, .. } => {
                self.loading = false;

                if let Some(choice) = self.pending_choice.take() {
                    self.transcript.push(choice);
                }
                self.transcript.push(turn.story.clone());

                self.turn = Some(turn);
                self.scene = SceneSlot::Pending;
            }

            EngineResponse::TurnFailed { message, .. } => {
                self.loading = false;
                self.pending_choice = None;
                self.error = Some(message);
            }

            EngineResponse::SceneReady { image, .. } => {
                self.scene = match image {
                    Some(image) => SceneSlot::Ready(image),
                    None => SceneSlot::Unavailable,
                };
            }
        }
    }
}
