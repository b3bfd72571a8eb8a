use crate::ui::plotting_ui::comparison_plot;
use crate::utils::{bad_message, error_message, good_message, warn_message};

use egui::{Context, RichText, Ui};
use egui_file::FileDialog;
use regrs_core::{ComparisonSeries, RegressionKind, RegressionSession, WorkflowSettings};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

const MAX_LOG_MESSAGES: usize = 200;

/// The "Linear Regression" tab: pick a CSV, pick columns, predict, score.
pub struct RegressionApp {
    session: RegressionSession,
    pub initial_path: Option<PathBuf>,
    pub open_file_dialog: Option<FileDialog>,
    pub opened_file: Option<PathBuf>,
    independent: String,
    dependent: String,
    input_text: String,
    pub plot_graph: bool,
    prediction_label: Option<String>,
    comparison: Option<ComparisonSeries>,
    pub log_messages: VecDeque<RichText>,
}

impl Default for RegressionApp {
    fn default() -> Self {
        Self::new(WorkflowSettings::default())
    }
}

impl RegressionApp {
    pub fn new(settings: WorkflowSettings) -> Self {
        Self {
            session: RegressionSession::new(settings),
            initial_path: std::env::current_dir().ok(),
            open_file_dialog: None,
            opened_file: None,
            independent: String::new(),
            dependent: String::new(),
            input_text: String::new(),
            plot_graph: false,
            prediction_label: None,
            comparison: None,
            log_messages: VecDeque::new(),
        }
    }

    pub fn kind(&self) -> RegressionKind {
        self.session.kind()
    }

    pub fn ui(&mut self, ui: &mut Ui, ctx: &Context) {
        ui.heading("Linear Regression");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("Select CSV File").clicked() {
                self.open_file_dialog("Select dataset");
            }
            match &self.opened_file {
                Some(path) => ui.label(path.display().to_string()),
                None => ui.label("No file selected"),
            };
        });
        self.handle_file_selection(ctx);

        if self.session.dataset().is_none() {
            self.log_display(ui);
            return;
        }

        ui.add_space(8.0);
        self.column_selectors(ui);
        self.kind_selector(ui);

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(format!("{}:", self.independent));
            ui.add(egui::TextEdit::singleline(&mut self.input_text).desired_width(120.0));
            ui.checkbox(&mut self.plot_graph, "Plot Graph");
        });

        ui.horizontal(|ui| {
            if ui.button("Predict").clicked() {
                self.predict_clicked();
            }
            if ui.button("Accuracy").clicked() {
                self.accuracy_clicked();
            }
        });

        if let Some(label) = &self.prediction_label {
            ui.label(RichText::new(label).strong());
        }

        if self.plot_graph {
            if let Some(series) = &self.comparison {
                let w = ui.available_width().min(800.0);
                comparison_plot(ui, series, w, 400.0);
            }
        }

        self.log_display(ui);
    }

    fn column_selectors(&mut self, ui: &mut Ui) {
        let columns: Vec<String> =
            self.session.dataset().map(|d| d.column_names().to_vec()).unwrap_or_default();
        let mut independent = self.independent.clone();
        let mut dependent = self.dependent.clone();

        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Independent")
                .selected_text(independent.as_str())
                .show_ui(ui, |ui| {
                    for name in feature_choices(&columns, &dependent) {
                        ui.selectable_value(&mut independent, name.clone(), name);
                    }
                });
            ui.add_space(16.0);
            egui::ComboBox::from_label("Target")
                .selected_text(dependent.as_str())
                .show_ui(ui, |ui| {
                    for name in &columns {
                        ui.selectable_value(&mut dependent, name.clone(), name);
                    }
                });
        });
        if dependent != self.dependent {
            independent = reconcile_feature(&columns, &independent, &dependent);
        }

        if independent != self.independent || dependent != self.dependent {
            match self.session.select_columns(&independent, &dependent) {
                Ok(()) => {
                    if independent == dependent {
                        self.log(warn_message(&format!(
                            "'{independent}' is both feature and target"
                        )));
                    }
                    self.independent = independent;
                    self.dependent = dependent;
                    self.clear_results();
                },
                Err(e) => self.log(error_message(&e)),
            }
        }
    }

    fn kind_selector(&mut self, ui: &mut Ui) {
        let mut kind = self.session.kind();
        egui::ComboBox::from_label("Model")
            .selected_text(kind.to_string())
            .show_ui(ui, |ui| {
                for k in RegressionKind::all() {
                    ui.selectable_value(&mut kind, *k, k.to_string());
                }
            });
        if kind != self.session.kind() {
            self.session.set_kind(kind);
            self.clear_results();
        }
    }

    fn predict_clicked(&mut self) {
        match self.session.train_and_predict(&self.input_text) {
            Ok(prediction) => {
                self.prediction_label = Some(prediction.label());
                self.log(good_message(&prediction.label()));
                self.refresh_comparison();
            },
            Err(e) => {
                tracing::error!("{e}");
                self.prediction_label = None;
                self.log(error_message(&e));
            },
        }
    }

    fn accuracy_clicked(&mut self) {
        match self.session.score() {
            Ok(report) => self.log(good_message(&report.to_string())),
            Err(e) => {
                tracing::error!("{e}");
                self.log(error_message(&e));
            },
        }
    }

    fn refresh_comparison(&mut self) {
        self.comparison = match self.session.comparison() {
            Ok(series) => Some(series),
            Err(e) => {
                self.log(error_message(&e));
                None
            },
        };
    }

    fn clear_results(&mut self) {
        self.prediction_label = None;
        self.comparison = None;
    }

    fn load_file(&mut self, path: &Path) {
        match self.session.load(path) {
            Ok(dataset) => {
                let msg = format!(
                    "Loaded {}: {} rows, {} numeric columns, {} rows dropped",
                    path.display(),
                    dataset.n_rows(),
                    dataset.n_columns(),
                    dataset.dropped_rows()
                );
                let skipped = dataset.dropped_columns().join(", ");
                self.log(good_message(&msg));
                if !skipped.is_empty() {
                    self.log(warn_message(&format!("Skipped non-numeric columns: {skipped}")));
                }
                if let Some(selection) = self.session.selection() {
                    self.independent = selection.independent.clone();
                    self.dependent = selection.dependent.clone();
                }
                self.opened_file = Some(path.to_path_buf());
                self.clear_results();
            },
            Err(e) => {
                tracing::error!("{e}");
                self.log(bad_message(&format!("Failed to load {}: {e}", path.display())));
            },
        }
    }

    pub fn open_file_dialog(&mut self, title: &str) {
        let mut dialog = FileDialog::open_file(self.initial_path.clone())
            .title(title)
            .open_button_text(Cow::from("Open"))
            .show_rename(false)
            .show_new_folder(false);

        dialog.open();
        self.open_file_dialog = Some(dialog);
    }

    pub fn handle_file_selection(&mut self, ctx: &Context) {
        let Some(dialog) = &mut self.open_file_dialog else {
            return;
        };
        dialog.show(ctx);

        match dialog.state() {
            egui_file::State::Selected => {
                let selected = dialog.path().map(Path::to_path_buf);
                self.open_file_dialog = None;
                if let Some(path) = selected {
                    self.initial_path = path.parent().map(Path::to_path_buf);
                    self.load_file(&path);
                }
            },
            egui_file::State::Cancelled | egui_file::State::Closed => {
                self.log(RichText::new("File selection cancelled."));
                self.open_file_dialog = None;
            },
            _ => {},
        }
    }

    fn log(&mut self, message: RichText) {
        self.log_messages.push_front(message);
        self.log_messages.truncate(MAX_LOG_MESSAGES);
    }

    pub fn log_display(&mut self, ui: &mut Ui) {
        ui.separator();
        if ui.button("Clear Log").clicked() {
            self.log_messages.clear();
        }
        ui.label("**Log Messages:**");
        egui::ScrollArea::vertical().show(ui, |ui| {
            for message in &self.log_messages {
                ui.label(message.clone());
            }
        });
    }
}

/// Columns offered as the feature: every column except the current target.
fn feature_choices<'a>(columns: &'a [String], target: &'a str) -> impl Iterator<Item = &'a String> {
    columns.iter().filter(move |name| name.as_str() != target)
}

/// Moves the feature off the target column. A one-column dataset keeps it.
fn reconcile_feature(columns: &[String], independent: &str, target: &str) -> String {
    if independent != target {
        return independent.to_owned();
    }
    feature_choices(columns, target).next().map_or_else(|| independent.to_owned(), Clone::clone)
}
