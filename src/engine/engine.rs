use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use crate::engine::image_requester::request_image;
use crate::engine::llm_client::{ImageModel, TextModel};
use crate::engine::protocol::{EngineCommand, EngineResponse, TurnId, TurnRequest};
use crate::engine::turn_requester::{request_turn, StorySettings};

/// Called after every response so the UI wakes up and drains the channel.
pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    text: Arc<dyn TextModel>,
    images: Arc<dyn ImageModel>,
    settings: StorySettings,
    repaint: RepaintHook,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        text: Arc<dyn TextModel>,
        images: Arc<dyn ImageModel>,
        settings: StorySettings,
        repaint: RepaintHook,
    ) -> Self {
        Self {
            rx,
            tx,
            text,
            images,
            settings,
            repaint,
        }
    }

    /// Runs until the command channel closes.
    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::RequestTurn { turn_id, request } => {
                    self.handle_turn(turn_id, &request);
                }
            }
        }

        tracing::debug!("engine command channel closed");
    }

    fn handle_turn(&self, turn_id: TurnId, request: &TurnRequest) {
        tracing::info!(
            turn = turn_id.0,
            choice = request.choice.as_deref().unwrap_or("<start>"),
            transcript_len = request.transcript.len(),
            "requesting turn"
        );

        match request_turn(self.text.as_ref(), &self.settings, request) {
            Ok(turn) => {
                let description = turn.image_prompt.clone();
                self.send(EngineResponse::TurnReady { turn_id, turn });
                self.spawn_scene(turn_id, description);
            }
            Err(e) => {
                tracing::error!(turn = turn_id.0, error = %e, "turn request failed");
                self.send(EngineResponse::TurnFailed {
                    turn_id,
                    message: e.user_message().to_string(),
                });
            }
        }
    }

    /// Image generation runs detached; its result is tagged with the turn it
    /// belongs to and the session drops it if that turn is no longer current.
    fn spawn_scene(&self, turn_id: TurnId, description: String) {
        let images = Arc::clone(&self.images);
        let tx = self.tx.clone();
        let repaint = Arc::clone(&self.repaint);

        std::thread::spawn(move || {
            let image = match request_image(images.as_ref(), &description) {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!(turn = turn_id.0, error = %e, "image generation failed");
                    None
                }
            };

            let _ = tx.send(EngineResponse::SceneReady { turn_id, image });
            repaint();
        });
    }

    fn send(&self, resp: EngineResponse) {
        let _ = self.tx.send(resp);
        (self.repaint)();
    }
}
