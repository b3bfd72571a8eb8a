use crate::ui::regression_ui::RegressionApp;
use egui::FontFamily;
use regrs_core::{WorkflowSettings, SETTINGS_FILE};

pub struct RegrsApp {
    pub regression_panel: RegressionApp,
    settings: WorkflowSettings,
    font_size: f32,
}

impl RegrsApp {
    pub fn new() -> Self {
        let settings = WorkflowSettings::load_or_default(SETTINGS_FILE);
        Self { regression_panel: RegressionApp::new(settings.clone()), settings, font_size: 14.0 }
    }

    fn apply_font_size(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        for font_id in style.text_styles.values_mut() {
            font_id.size = self.font_size;
        }
        ctx.set_style(style);
    }
}

impl Default for RegrsApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for RegrsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_font_size(ctx);
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            for (_text_style, font_id) in ui.style_mut().text_styles.iter_mut() {
                font_id.family = FontFamily::Monospace;
            }
            egui::menu::bar(ui, |ui| {
                egui::widgets::global_theme_preference_buttons(ui);
                ui.add_space(16.0);

                egui::ComboBox::from_label("Select font size")
                    .selected_text(format!("{}", self.font_size))
                    .show_ui(ui, |ui| {
                        for size in 10..=32 {
                            ui.selectable_value(&mut self.font_size, size as f32, size.to_string());
                        }
                    });
                ui.add_space(16.0);
                ui.label(format!(
                    "Split: {:.0}% test, seed {}",
                    self.settings.test_ratio * 100.0,
                    self.settings.seed
                ));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.regression_panel.ui(ui, ctx);
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.kind = self.regression_panel.kind();
        if let Err(e) = self.settings.save_to_file(SETTINGS_FILE) {
            tracing::warn!("Could not save {}: {}", SETTINGS_FILE, e);
        }
    }
}
