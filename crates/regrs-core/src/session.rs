//! Train / predict / score workflow of one regression tab.
//!
//! A [`RegressionSession`] owns the dataset, the column selection, the split
//! and the fitted model. It moves through
//! `Unconfigured -> Configured -> Trained`; prediction, scoring and plotting
//! only read the `Trained` state and fail with
//! [`RegressionError::NotTrained`] before it.

use crate::dataset::Dataset;
use crate::error::{RegressionError, Result};
use crate::model::{RegressionKind, RegressionModel};
use crate::plot::ComparisonSeries;
use crate::report::{AccuracyReport, Prediction};
use crate::settings::WorkflowSettings;
use crate::split::{split_sizes, train_test_split, SplitPartition, MIN_PARTITION_ROWS};

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unconfigured,
    Configured,
    Trained,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    pub independent: String,
    pub dependent: String,
}

impl ColumnSelection {
    pub fn new(independent: impl Into<String>, dependent: impl Into<String>) -> Self {
        Self { independent: independent.into(), dependent: dependent.into() }
    }

    /// First column as feature, last column as target.
    pub fn default_for(dataset: &Dataset) -> Option<Self> {
        let names = dataset.column_names();
        Some(Self::new(names.first()?.clone(), names.last()?.clone()))
    }

    /// Feature and target are the same column; the fit is then a perfect
    /// identity line.
    pub fn is_same_column(&self) -> bool {
        self.independent == self.dependent
    }
}

#[derive(Debug, Clone)]
struct Trained {
    model: Box<dyn RegressionModel>,
    split: SplitPartition,
}

/// Parses a free-text entry as the value to predict for.
pub fn parse_input(text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RegressionError::InvalidInput(text.to_owned())),
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegressionSession {
    settings: WorkflowSettings,
    kind: RegressionKind,
    dataset: Option<Dataset>,
    selection: Option<ColumnSelection>,
    trained: Option<Trained>,
}

impl RegressionSession {
    pub fn new(settings: WorkflowSettings) -> Self {
        Self { kind: settings.kind, settings, ..Default::default() }
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    pub fn state(&self) -> SessionState {
        match (&self.selection, &self.trained) {
            (_, Some(_)) => SessionState::Trained,
            (Some(_), None) => SessionState::Configured,
            (None, None) => SessionState::Unconfigured,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn selection(&self) -> Option<&ColumnSelection> {
        self.selection.as_ref()
    }

    pub fn kind(&self) -> RegressionKind {
        self.kind
    }

    /// Switches strategy; a trained model is discarded.
    pub fn set_kind(&mut self, kind: RegressionKind) {
        if kind != self.kind {
            self.kind = kind;
            self.trained = None;
        }
    }

    /// Loads a new dataset with the default column selection. On failure the
    /// session keeps its previous state.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<&Dataset> {
        let dataset = Dataset::load(path, &self.settings.load_options())?;
        let selection = ColumnSelection::default_for(&dataset);

        self.trained = None;
        self.selection = selection;
        let dataset: &Dataset = self.dataset.insert(dataset);
        Ok(dataset)
    }

    pub fn configure(
        &mut self,
        dataset: Dataset,
        independent: &str,
        dependent: &str,
    ) -> Result<()> {
        let selection = validate_selection(&dataset, independent, dependent)?;
        self.dataset = Some(dataset);
        self.selection = Some(selection);
        self.trained = None;
        Ok(())
    }

    /// Picks new columns on the already loaded dataset.
    pub fn select_columns(&mut self, independent: &str, dependent: &str) -> Result<()> {
        let dataset = self.dataset.as_ref().ok_or(RegressionError::NotConfigured)?;
        let selection = validate_selection(dataset, independent, dependent)?;
        if self.selection.as_ref() != Some(&selection) {
            self.selection = Some(selection);
            self.trained = None;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.dataset = None;
        self.selection = None;
        self.trained = None;
    }

    /// Splits the selected columns and fits the current strategy on the
    /// training rows, replacing any earlier fit.
    pub fn train(&mut self) -> Result<&dyn RegressionModel> {
        self.trained = None;

        let (dataset, selection) = match (&self.dataset, &self.selection) {
            (Some(dataset), Some(selection)) => (dataset, selection),
            _ => return Err(RegressionError::NotConfigured),
        };
        let x = dataset
            .column(&selection.independent)
            .ok_or_else(|| RegressionError::UnknownColumn(selection.independent.clone()))?;
        let y = dataset
            .column(&selection.dependent)
            .ok_or_else(|| RegressionError::UnknownColumn(selection.dependent.clone()))?;

        let split = train_test_split(x, y, self.settings.test_ratio, self.settings.seed)?;
        if split.n_train() < self.kind.min_points() {
            let (train, test) = split_sizes(x.len(), self.settings.test_ratio);
            return Err(RegressionError::NotEnoughRows {
                rows: x.len(),
                train,
                test,
                needed: self.kind.min_points().max(MIN_PARTITION_ROWS),
            });
        }
        let model = self.kind.fit(&split.x_train, &split.y_train)?;

        tracing::info!(
            "Trained {} of '{}' on '{}' with {} training and {} test rows: {}",
            self.kind,
            selection.dependent,
            selection.independent,
            split.n_train(),
            split.n_test(),
            model.equation()
        );

        let trained = self.trained.insert(Trained { model, split });
        Ok(trained.model.as_ref())
    }

    pub fn model(&self) -> Result<&dyn RegressionModel> {
        self.trained.as_ref().map(|t| t.model.as_ref()).ok_or(RegressionError::NotTrained)
    }

    pub fn split(&self) -> Result<&SplitPartition> {
        self.trained.as_ref().map(|t| &t.split).ok_or(RegressionError::NotTrained)
    }

    fn target(&self) -> Result<&str> {
        self.selection
            .as_ref()
            .map(|s| s.dependent.as_str())
            .ok_or(RegressionError::NotConfigured)
    }

    pub fn predict_value(&self, x: f64) -> Result<Prediction> {
        let model = self.model()?;
        let prediction =
            Prediction { target: self.target()?.to_owned(), input: x, value: model.predict(x) };
        tracing::debug!("{}", prediction);
        Ok(prediction)
    }

    pub fn predict_input(&self, text: &str) -> Result<Prediction> {
        let x = parse_input(text)?;
        self.predict_value(x)
    }

    /// Validates the entry, retrains, then predicts for it.
    pub fn train_and_predict(&mut self, text: &str) -> Result<Prediction> {
        let x = parse_input(text)?;
        self.train()?;
        self.predict_value(x)
    }

    pub fn score(&self) -> Result<AccuracyReport> {
        let trained = self.trained.as_ref().ok_or(RegressionError::NotTrained)?;
        let split = &trained.split;
        let y_hat = trained.model.predict_all(&split.x_test);

        let report = AccuracyReport::from_predictions(self.kind, &split.y_test, &y_hat).ok_or(
            RegressionError::NotEnoughRows {
                rows: split.n_train() + split.n_test(),
                train: split.n_train(),
                test: split.n_test(),
                needed: MIN_PARTITION_ROWS,
            },
        )?;
        tracing::info!("{}", report);
        Ok(report)
    }

    pub fn comparison(&self) -> Result<ComparisonSeries> {
        let trained = self.trained.as_ref().ok_or(RegressionError::NotTrained)?;
        let selection = self.selection.as_ref().ok_or(RegressionError::NotConfigured)?;
        Ok(ComparisonSeries::from_model(
            trained.model.as_ref(),
            &trained.split,
            &selection.independent,
            &selection.dependent,
        ))
    }
}

fn validate_selection(
    dataset: &Dataset,
    independent: &str,
    dependent: &str,
) -> Result<ColumnSelection> {
    for name in [independent, dependent] {
        if !dataset.contains(name) {
            return Err(RegressionError::UnknownColumn(name.to_owned()));
        }
    }
    let selection = ColumnSelection::new(independent, dependent);
    if selection.is_same_column() {
        tracing::warn!("'{}' selected as both feature and target; the fit is trivial", dependent);
    }
    Ok(selection)
}
