use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::cmd::config::{Action, Columns as ColumnsCfg, Config, Fit as FitCfg};
use crate::model::RegressionKind;
use crate::settings::SETTINGS_FILE;

#[derive(Debug, Parser)]
#[command(
    name = "regrs",
    about = "Fit, score and plot a one-column regression from a CSV file",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Path to the workflow settings JSON
    #[arg(long = "settings", value_name = "PATH", default_value = SETTINGS_FILE, global = true)]
    pub settings_path: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the numeric columns of a CSV file
    Columns(ColumnsArgs),

    /// Train a model, print its accuracy and optionally predict / plot
    Fit(FitArgs),
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// CSV file to inspect
    #[arg(value_hint = ValueHint::FilePath, value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter
    #[arg(short = 'd', long = "delimiter")]
    pub delimiter: Option<char>,
}

#[derive(Debug, Args)]
pub struct FitArgs {
    /// CSV file with the training data
    #[arg(value_hint = ValueHint::FilePath, value_name = "FILE")]
    pub file: PathBuf,

    /// Independent (feature) column
    #[arg(short = 'x', long = "x", value_name = "COL")]
    pub independent: String,

    /// Target column, defaults to the last numeric column
    #[arg(short = 'y', long = "y", value_name = "COL")]
    pub dependent: Option<String>,

    /// Regression strategy
    #[arg(short = 'k', long = "kind", value_enum)]
    pub kind: Option<RegressionKind>,

    /// Value of the feature to predict the target for
    #[arg(short = 'p', long = "predict", value_name = "VALUE", allow_hyphen_values = true)]
    pub predict: Option<String>,

    /// Write the actual vs predicted plot here (.svg or .png)
    #[arg(long = "plot", value_hint = ValueHint::FilePath, value_name = "PATH")]
    pub plot: Option<PathBuf>,

    /// Field delimiter
    #[arg(short = 'd', long = "delimiter")]
    pub delimiter: Option<char>,

    /// Share of rows held out for scoring
    #[arg(long = "test-ratio")]
    pub test_ratio: Option<f64>,

    /// Shuffle seed of the split
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

// -------- Map CLI -> Config/Action types --------

impl Cli {
    pub fn into_config(self) -> Config {
        let settings_path = PathBuf::from(self.settings_path);

        match self.command {
            Commands::Columns(args) => Config {
                settings_path,
                action: Action::Columns(ColumnsCfg { file: args.file, delimiter: args.delimiter }),
            },
            Commands::Fit(args) => Config {
                settings_path,
                action: Action::Fit(FitCfg {
                    file: args.file,
                    independent: args.independent,
                    dependent: args.dependent,
                    kind: args.kind,
                    predict: args.predict,
                    plot: args.plot,
                    delimiter: args.delimiter,
                    test_ratio: args.test_ratio,
                    seed: args.seed,
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_command() {
        let cli = Cli::try_parse_from(["regrs", "columns", "data.csv", "-d", ";"]).unwrap();
        let cfg = cli.into_config();
        assert_eq!(cfg.settings_path, PathBuf::from(SETTINGS_FILE));
        match cfg.action {
            Action::Columns(c) => {
                assert_eq!(c.file, PathBuf::from("data.csv"));
                assert_eq!(c.delimiter, Some(';'));
            },
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_fit_command() {
        let cli = Cli::try_parse_from([
            "regrs",
            "fit",
            "spend.csv",
            "--x",
            "Spend",
            "--kind",
            "robust",
            "--predict",
            "-12.5",
            "--plot",
            "out.svg",
            "--seed",
            "7",
            "--settings",
            "custom.json",
        ])
        .unwrap();
        let cfg = cli.into_config();
        assert_eq!(cfg.settings_path, PathBuf::from("custom.json"));
        match cfg.action {
            Action::Fit(f) => {
                assert_eq!(f.independent, "Spend");
                assert_eq!(f.dependent, None);
                assert_eq!(f.kind, Some(RegressionKind::Robust));
                assert_eq!(f.predict.as_deref(), Some("-12.5"));
                assert_eq!(f.plot, Some(PathBuf::from("out.svg")));
                assert_eq!(f.seed, Some(7));
                assert_eq!(f.test_ratio, None);
            },
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_fit_requires_feature_column() {
        assert!(Cli::try_parse_from(["regrs", "fit", "spend.csv"]).is_err());
        let args = ["regrs", "fit", "a.csv", "--x", "a", "--kind", "cubic"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
