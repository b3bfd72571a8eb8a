use crate::dataset::Dataset;
use crate::error::RegressionError;
use crate::model::RegressionKind;
use crate::plot::{render_comparison, PlotOptions};
use crate::session::RegressionSession;
use crate::settings::{SettingsError, WorkflowSettings};

use std::io::{self, Write};
use std::path::PathBuf;

/* =================== Public configuration types =================== */

#[derive(Debug)]
pub struct Config {
    pub settings_path: PathBuf,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    Columns(Columns),
    Fit(Fit),
}

#[derive(Debug, Clone)]
pub struct Columns {
    pub file: PathBuf,
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone)]
pub struct Fit {
    pub file: PathBuf,
    pub independent: String,
    pub dependent: Option<String>,
    pub kind: Option<RegressionKind>,
    pub predict: Option<String>,
    pub plot: Option<PathBuf>,
    pub delimiter: Option<char>,
    pub test_ratio: Option<f64>,
    pub seed: Option<u64>,
}

/* =================== Error type (no process::exit) =================== */

#[derive(thiserror::Error, Debug)]
pub enum CmdError {
    #[error(transparent)]
    Regression(#[from] RegressionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/* =================== Entry point =================== */

impl Config {
    pub fn run(&self) -> Result<(), CmdError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Runs the action, writing its report to `out`.
    pub fn run_to<W: Write>(&self, out: &mut W) -> Result<(), CmdError> {
        match &self.action {
            Action::Columns(c) => self.run_columns(c, out),
            Action::Fit(f) => self.run_fit(f, out),
        }
    }

    fn settings(&self) -> WorkflowSettings {
        WorkflowSettings::load_or_default(&self.settings_path)
    }
}

/* =================== Actions =================== */

impl Config {
    fn run_columns<W: Write>(&self, c: &Columns, out: &mut W) -> Result<(), CmdError> {
        let mut settings = self.settings();
        if let Some(d) = c.delimiter {
            settings.delimiter = d;
        }
        settings.validate()?;

        let dataset = Dataset::load(&c.file, &settings.load_options())?;
        for name in dataset.column_names() {
            writeln!(out, "{name}")?;
        }
        writeln!(out, "rows kept: {}, rows dropped: {}", dataset.n_rows(), dataset.dropped_rows())?;
        if !dataset.dropped_columns().is_empty() {
            writeln!(out, "non-numeric columns: {}", dataset.dropped_columns().join(", "))?;
        }
        Ok(())
    }

    fn run_fit<W: Write>(&self, f: &Fit, out: &mut W) -> Result<(), CmdError> {
        let settings = apply_overrides(self.settings(), f)?;
        let plot_options = PlotOptions {
            width: settings.plot_width,
            height: settings.plot_height,
            ..Default::default()
        };

        let mut session = RegressionSession::new(settings);
        let dataset = session.load(&f.file)?;
        let dependent = match &f.dependent {
            Some(y) => y.clone(),
            None => dataset
                .column_names()
                .last()
                .cloned()
                .ok_or(RegressionError::NoNumericColumns)?,
        };
        session.select_columns(&f.independent, &dependent)?;

        let model = session.train()?;
        let stats = model.fit_stats();
        writeln!(out, "{}", model.equation())?;
        write!(out, "training: n: {}, r2: {}, rmse: {}", stats.n, stats.r2, stats.rmse)?;
        if let Some(p) = stats.p_value {
            write!(out, ", p-value: {p}")?;
        }
        writeln!(out)?;

        let report = session.score()?;
        writeln!(out, "{report}")?;

        if let Some(text) = &f.predict {
            let prediction = session.predict_input(text)?;
            writeln!(out, "{prediction}")?;
        }

        if let Some(path) = &f.plot {
            render_comparison(&session.comparison()?, path, &plot_options)?;
            writeln!(out, "plot written to {}", path.display())?;
        }
        Ok(())
    }
}

fn apply_overrides(
    mut settings: WorkflowSettings,
    f: &Fit,
) -> Result<WorkflowSettings, SettingsError> {
    if let Some(kind) = f.kind {
        settings.kind = kind;
    }
    if let Some(d) = f.delimiter {
        settings.delimiter = d;
    }
    if let Some(r) = f.test_ratio {
        settings.test_ratio = r;
    }
    if let Some(s) = f.seed {
        settings.seed = s;
    }
    settings.validate()?;
    Ok(settings)
}
