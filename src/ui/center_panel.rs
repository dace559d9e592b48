use eframe::egui;

use crate::model::scene_image::SceneSlot;
use crate::model::session::SessionState;
use crate::ui::settings::UiSettings;

/// What the player asked for this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Choose(String),
    Restart,
}

pub fn draw_center_panel(
    ctx: &egui::Context,
    session: &SessionState,
    settings: &UiSettings,
    scene: Option<&egui::TextureHandle>,
) -> Option<PlayerAction> {
    let mut action = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            if let Some(message) = session.error() {
                if error_banner(ui, settings, message) {
                    action = Some(PlayerAction::Restart);
                }
                ui.add_space(12.0);
            }

            scene_panel(ui, session, settings, scene);
            ui.add_space(16.0);

            narrative_panel(ui, session, settings);
            ui.add_space(16.0);

            if let Some(choice) = choice_buttons(ui, session, settings) {
                action = Some(PlayerAction::Choose(choice));
            }
        });
    });

    action
}

/* =========================
   Error banner
   ========================= */

/// Returns true when the restart button was pressed.
fn error_banner(ui: &mut egui::Ui, settings: &UiSettings, message: &str) -> bool {
    let mut restart = false;

    egui::Frame::new()
        .fill(settings.color("ErrorFill"))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!("Something went wrong: {message}"))
                        .color(settings.color("ErrorText"))
                        .strong(),
                );
                if ui.button("Restart adventure").clicked() {
                    restart = true;
                }
            });
        });

    restart
}

/* =========================
   Scene
   ========================= */

fn scene_panel(
    ui: &mut egui::Ui,
    session: &SessionState,
    settings: &UiSettings,
    scene: Option<&egui::TextureHandle>,
) {
    let width = ui.available_width();
    let size = egui::vec2(width, width * 9.0 / 16.0);

    egui::Frame::new()
        .fill(settings.color("Panel"))
        .corner_radius(6.0)
        .show(ui, |ui| {
            ui.set_min_size(size);
            ui.set_max_size(size);

            let waiting = matches!(session.scene(), SceneSlot::Pending)
                || (session.is_loading() && session.scene().image().is_none());

            ui.centered_and_justified(|ui| match scene {
                Some(texture) => {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                }
                None if waiting => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(spinner_top_padding(size.y));
                        ui.add(egui::Spinner::new().size(48.0));
                        ui.label(
                            egui::RichText::new("Painting the scene…").color(settings.color("Muted")),
                        );
                    });
                }
                None => {
                    ui.label(
                        egui::RichText::new("The scene will appear here.")
                            .color(settings.color("Muted")),
                    );
                }
            });
        });
}

/// Space above the spinner so it sits near the middle of a panel of this height.
fn spinner_top_padding(height: f32) -> f32 {
    (height / 2.0 - 40.0).max(0.0)
}

/* =========================
   Narrative
   ========================= */

fn narrative_panel(ui: &mut egui::Ui, session: &SessionState, settings: &UiSettings) {
    match session.turn() {
        Some(turn) if !turn.story.is_empty() => {
            ui.label(egui::RichText::new(&turn.story).size(17.0));
        }
        _ if session.is_loading() => skeleton(ui, settings),
        _ => {}
    }
}

/// Three pulsing bars standing in for text that has not arrived yet.
fn skeleton(ui: &mut egui::Ui, settings: &UiSettings) {
    let t = ui.input(|i| i.time) as f32;
    let alpha = 0.55 + 0.45 * (t * 3.0).sin().abs();
    let fill = settings.color("Skeleton").gamma_multiply(alpha);

    let width = ui.available_width();
    for fraction in [1.0, 5.0 / 6.0, 3.0 / 4.0] {
        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(width * fraction, 14.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 4.0, fill);
        ui.add_space(6.0);
    }

    ui.ctx().request_repaint();
}

/* =========================
   Choices
   ========================= */

fn choice_buttons(
    ui: &mut egui::Ui,
    session: &SessionState,
    settings: &UiSettings,
) -> Option<String> {
    let turn = session.turn()?;
    let enabled = !session.is_loading();
    let mut picked = None;

    ui.columns(turn.choices.len().max(1), |columns| {
        for (column, choice) in columns.iter_mut().zip(&turn.choices) {
            let button = egui::Button::new(
                egui::RichText::new(choice)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(settings.color("Choice"))
            .min_size(egui::vec2(column.available_width(), 56.0));

            if column.add_enabled(enabled, button).clicked() {
                picked = Some(choice.clone());
            }
        }
    });

    if session.is_loading() {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.add(egui::Spinner::new());
            ui.label(
                egui::RichText::new("The dungeon master is thinking…")
                    .color(settings.color("Title")),
            );
        });
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_padding_centres_in_tall_panels() {
        assert_eq!(spinner_top_padding(400.0), 160.0);
    }

    #[test]
    fn spinner_padding_never_goes_negative() {
        assert_eq!(spinner_top_padding(80.0), 0.0);
        assert_eq!(spinner_top_padding(20.0), 0.0);
        assert_eq!(spinner_top_padding(0.0), 0.0);
    }
}
