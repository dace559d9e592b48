use eframe::egui;
use std::sync::mpsc;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::engine::engine::Engine;
use crate::engine::llm_client::{ImageModel, TextModel};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::turn_requester::StorySettings;
use crate::model::session::SessionState;
use crate::ui::center_panel::{draw_center_panel, PlayerAction};
use crate::ui::right_panel::draw_right_panel;
use crate::ui::scene_texture::SceneTexture;
use crate::ui::settings::UiSettings;

pub const APP_TITLE: &str = "Infinite Adventure Engine";

/* =========================
   App
   ========================= */

pub struct AdventureApp {
    session: SessionState,
    settings: UiSettings,
    scene: SceneTexture,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl AdventureApp {
    pub fn new<M>(cc: &eframe::CreationContext<'_>, config: &AppConfig, model: Arc<M>) -> Self
    where
        M: TextModel + ImageModel + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let repaint_ctx = cc.egui_ctx.clone();
        let settings = StorySettings {
            language: config.language.clone(),
            temperature: config.temperature,
        };
        let text: Arc<dyn TextModel> = model.clone();
        let images: Arc<dyn ImageModel> = model;

        std::thread::spawn(move || {
            let mut engine = Engine::new(
                cmd_rx,
                resp_tx,
                text,
                images,
                settings,
                Arc::new(move || repaint_ctx.request_repaint()),
            );
            engine.run();
        });

        let mut app = Self {
            session: SessionState::new(config.transcript_limit),
            settings: UiSettings::default(),
            scene: SceneTexture::default(),
            cmd_tx,
            resp_rx,
        };

        // The adventure opens without waiting for the player.
        let opening = app.session.begin_turn(None);
        app.send_command(opening);

        app
    }

    fn send_command(&self, cmd: Option<EngineCommand>) {
        let Some(cmd) = cmd else {
            return;
        };

        if self.cmd_tx.send(cmd).is_err() {
            tracing::error!("engine thread is gone, command dropped");
        }
    }

    fn handle_action(&mut self, action: PlayerAction) {
        let cmd = match action {
            PlayerAction::Choose(choice) => {
                tracing::info!(%choice, "player chose");
                self.session.begin_turn(Some(choice))
            }
            PlayerAction::Restart => {
                tracing::info!("restarting adventure");
                self.session.restart()
            }
        };

        if cmd.is_some() {
            tracing::debug!(
                turn = self.session.current_turn().0,
                transcript_len = self.session.transcript().len(),
                "turn started"
            );
        }
        self.send_command(cmd);
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for AdventureApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        while let Ok(resp) = self.resp_rx.try_recv() {
            self.session.apply(resp);
        }
        self.scene.sync(ctx, self.session.scene());

        /* HEADER */
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new(APP_TITLE)
                        .strong()
                        .color(self.settings.color("Title")),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(egui::Slider::new(&mut self.settings.ui_scale, 0.75..=2.0));
                    ui.label("UI Scale");
                });
            });
        });

        /* SIDEBAR */
        if let Some(turn) = self.session.turn() {
            draw_right_panel(ctx, turn, &self.settings);
        }

        /* CENTER */
        let action = draw_center_panel(ctx, &self.session, &self.settings, self.scene.handle());

        if let Some(action) = action {
            self.handle_action(action);
        }
    }
}
