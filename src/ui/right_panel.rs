use eframe::egui;

use crate::model::turn::AdventureTurn;
use crate::ui::settings::UiSettings;

pub fn draw_right_panel(ctx: &egui::Context, turn: &AdventureTurn, settings: &UiSettings) {
    egui::SidePanel::right("sidebar")
        .resizable(true)
        .default_width(300.0)
        .min_width(220.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(8.0);
                draw_quest(ui, &turn.quest, settings);

                ui.add_space(16.0);
                ui.separator();
                ui.add_space(8.0);

                draw_inventory(ui, &turn.inventory, settings);
            });
        });
}

/* =========================
   Quest
   ========================= */

fn draw_quest(ui: &mut egui::Ui, quest: &str, settings: &UiSettings) {
    ui.heading(egui::RichText::new("Current Quest").color(settings.color("Quest")));
    ui.add_space(6.0);

    if quest.trim().is_empty() {
        ui.label(
            egui::RichText::new("The adventure is just beginning…")
                .italics()
                .color(settings.color("Muted")),
        );
    } else {
        ui.label(egui::RichText::new(quest).italics());
    }
}

/* =========================
   Inventory
   ========================= */

fn draw_inventory(ui: &mut egui::Ui, items: &[String], settings: &UiSettings) {
    ui.heading(egui::RichText::new("Inventory").color(settings.color("Inventory")));
    ui.add_space(6.0);

    if items.is_empty() {
        ui.label(
            egui::RichText::new("Your pockets are empty.")
                .italics()
                .color(settings.color("Muted")),
        );
        return;
    }

    for item in items {
        egui::Frame::new()
            .fill(settings.color("Panel"))
            .corner_radius(6.0)
            .inner_margin(egui::Margin::symmetric(10, 6))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(format!("• {item}"));
            });
        ui.add_space(4.0);
    }
}
