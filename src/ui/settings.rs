use egui::Color32;
use std::collections::HashMap;

/// Display settings. Kept in memory for the lifetime of the window.
#[derive(Clone)]
pub struct UiSettings {
    pub ui_scale: f32,

    // Role → color mapping
    pub palette: HashMap<String, [u8; 4]>,
}

impl Default for UiSettings {
    fn default() -> Self {
        let mut palette = HashMap::new();

        palette.insert("Title".into(), [167, 139, 250, 255]);
        palette.insert("Quest".into(), [250, 204, 21, 255]);
        palette.insert("Inventory".into(), [245, 158, 11, 255]);
        palette.insert("Choice".into(), [79, 70, 229, 220]);
        palette.insert("ErrorFill".into(), [127, 29, 29, 200]);
        palette.insert("ErrorText".into(), [254, 202, 202, 255]);
        palette.insert("Skeleton".into(), [55, 65, 81, 255]);
        palette.insert("Panel".into(), [17, 24, 39, 255]);
        palette.insert("Muted".into(), [107, 114, 128, 255]);

        Self {
            ui_scale: 1.0,
            palette,
        }
    }
}

impl UiSettings {
    pub fn color(&self, key: &str) -> Color32 {
        self.palette
            .get(key)
            .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
            .unwrap_or(Color32::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_role_uses_palette() {
        let settings = UiSettings::default();
        assert_eq!(settings.color("Quest"), Color32::from_rgb(250, 204, 21));
    }

    #[test]
    fn unknown_role_falls_back_to_white() {
        let settings = UiSettings::default();
        assert_eq!(settings.color("Nope"), Color32::WHITE);
    }
}
