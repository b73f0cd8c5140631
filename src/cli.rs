//! Command-line front end: offline training plus artifact smoke checks.
//!
//! ```bash
//! titanic-predictor train --data ml_model/train.csv --out ml_model
//! titanic-predictor predict --class 1 --sex female --age 28 --embarked C
//! titanic-predictor example survives
//! titanic-predictor stats --data ml_model/train.csv
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::common::config::AppCfg;
use crate::common::error::{SurvivalError, SurvivalResult};
use crate::common::log;
use crate::data::{CsvDataRepo, DataRepo};
use crate::evaluation::service as eval_service;
use crate::features::PassengerInput;
use crate::form::{self, FormOutcome};
use crate::inference::{service as inference_service, Example, PredictionResult, Predictor};
use crate::training::{service as training_service, FsArtifactRepo, TrainConfig};

#[derive(Parser, Debug)]
#[command(name = "titanic-predictor", version, about = "Passenger survival model: train and predict")]
pub struct Cli {
    /// Log filter, overrides TITANIC_LOG (RUST_LOG still wins).
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fit scaler and classifier on a labelled CSV and write the artifacts.
    Train(TrainArgs),
    /// Validate four fields and predict survival.
    Predict(PredictArgs),
    /// Run one of the canned demo passengers.
    Example(ExampleArgs),
    /// Historical survival rates of a labelled CSV.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Labelled CSV; defaults to TITANIC_DATA_PATH.
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Artifact directory; defaults to TITANIC_MODEL_DIR.
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,
    #[arg(long, default_value_t = 1000)]
    pub max_iter: usize,
    #[arg(long, default_value_t = 1e-4)]
    pub tol: f64,
    /// Inverse regularisation strength.
    #[arg(short = 'C', long = "c", default_value_t = 1.0)]
    pub c: f64,
}

impl TrainArgs {
    pub fn config(&self) -> TrainConfig {
        TrainConfig {
            seed: self.seed,
            test_fraction: self.test_fraction,
            max_iter: self.max_iter,
            tol: self.tol,
            c: self.c,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[arg(long = "class")]
    pub pclass: String,
    #[arg(long)]
    pub sex: String,
    #[arg(long)]
    pub age: String,
    #[arg(long)]
    pub embarked: String,
    #[arg(long)]
    pub model_dir: Option<PathBuf>,
    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExampleArg {
    Survives,
    DoesNotSurvive,
}

impl From<ExampleArg> for Example {
    fn from(value: ExampleArg) -> Self {
        match value {
            ExampleArg::Survives => Example::Survives,
            ExampleArg::DoesNotSurvive => Example::DoesNotSurvive,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExampleArgs {
    #[arg(value_enum)]
    pub which: ExampleArg,
    #[arg(long)]
    pub model_dir: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[arg(long)]
    pub data: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

/// Parse arguments from an explicit iterator.
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

fn print_json<T: serde::Serialize>(value: &T) -> SurvivalResult<()> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|err| SurvivalError::Config(format!("render json: {err}")))?;
    println!("{body}");
    Ok(())
}

fn print_prediction(result: &PredictionResult) {
    let verdict = if result.survived {
        "SURVIVES"
    } else {
        "DOES NOT SURVIVE"
    };
    println!("{verdict}");
    println!("  class:     {}", result.labels.pclass);
    println!("  sex:       {}", result.labels.sex);
    println!("  age:       {}", result.age);
    println!("  embarked:  {}", result.labels.embarked);
    println!("  survival probability: {:.2}%", result.survival_probability);
    println!("  death probability:    {:.2}%", result.death_probability);
    if result.is_example {
        println!("  (example passenger)");
    }
}

fn load_predictor(cfg: &AppCfg, model_dir: Option<PathBuf>) -> SurvivalResult<Predictor> {
    let repo = FsArtifactRepo::new(model_dir.unwrap_or_else(|| cfg.model_dir.clone()));
    Predictor::load(&repo)
}

fn run_train(cfg: &AppCfg, args: TrainArgs) -> SurvivalResult<()> {
    let data = CsvDataRepo::new(args.data.clone().unwrap_or_else(|| cfg.data_path.clone()));
    let out = FsArtifactRepo::new(args.out.clone().unwrap_or_else(|| cfg.model_dir.clone()));
    println!("Training on {}", data.path().display());
    let report = training_service::train_and_save(&data, &out, &args.config())?;

    println!("Model accuracy: {:.4}", report.evaluation.accuracy);
    println!();
    println!("Classification report:");
    print!("{}", eval_service::classification_report(&report.evaluation));
    println!();
    println!("Model saved to {}/", out.root().display());
    println!(
        "Feature order: {}",
        report.artifacts.feature_order.feature_order.join(", ")
    );
    Ok(())
}

fn run_predict(cfg: &AppCfg, args: PredictArgs) -> SurvivalResult<()> {
    let input = PassengerInput::new(args.pclass, args.sex, args.age, args.embarked);
    let predictor = load_predictor(cfg, args.model_dir)?;
    match form::submit(&predictor, &input) {
        FormOutcome::Predicted(result) if args.json => print_json(&result),
        FormOutcome::Predicted(result) => {
            print_prediction(&result);
            Ok(())
        }
        FormOutcome::Invalid { errors, .. } => Err(SurvivalError::InvalidInput(errors.to_string())),
        FormOutcome::Failed { error, .. } => Err(error),
    }
}

fn run_example(cfg: &AppCfg, args: ExampleArgs) -> SurvivalResult<()> {
    let predictor = load_predictor(cfg, args.model_dir)?;
    let result = inference_service::run_example(&predictor, args.which.into())?;
    if args.json {
        print_json(&result)
    } else {
        print_prediction(&result);
        Ok(())
    }
}

fn run_stats(cfg: &AppCfg, args: StatsArgs) -> SurvivalResult<()> {
    let repo = CsvDataRepo::new(args.data.unwrap_or_else(|| cfg.data_path.clone()));
    let stats = eval_service::survival_stats(&repo.load()?);
    if args.json {
        return print_json(&stats);
    }
    let line = |group: &crate::evaluation::GroupRate| {
        println!(
            "  {:<14} {:>5.1}%  ({}/{})",
            group.group,
            group.rate() * 100.0,
            group.survivors,
            group.passengers
        );
    };
    println!("Overall survival:");
    line(&stats.overall);
    println!("By sex:");
    stats.by_sex.iter().for_each(line);
    println!("By class:");
    stats.by_class.iter().for_each(line);
    Ok(())
}

/// Install logging and dispatch the parsed command.
pub fn run_command(cli: Cli) -> SurvivalResult<()> {
    let mut cfg = AppCfg::load();
    if let Some(filter) = cli.log {
        cfg.log_filter = filter;
    }
    log::init(&cfg.log_filter, cfg.log_format)?;

    match cli.command {
        Command::Train(args) => run_train(&cfg, args),
        Command::Predict(args) => run_predict(&cfg, args),
        Command::Example(args) => run_example(&cfg, args),
        Command::Stats(args) => run_stats(&cfg, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_train_with_overrides() {
        let cli = parse_args([
            "titanic-predictor",
            "train",
            "--data",
            "train.csv",
            "--seed",
            "7",
            "-C",
            "0.5",
        ])
        .unwrap();
        match cli.command {
            Command::Train(args) => {
                assert_eq!(args.data, Some(PathBuf::from("train.csv")));
                let cfg = args.config();
                assert_eq!(cfg.seed, 7);
                assert_eq!(cfg.c, 0.5);
                assert_eq!(cfg.max_iter, 1000);
                assert_eq!(cfg.test_fraction, 0.2);
            }
            other => panic!("expected train, got {other:?}"),
        }
    }

    #[test]
    fn parses_predict_fields_verbatim() {
        let cli = parse_args([
            "titanic-predictor",
            "predict",
            "--class",
            "3",
            "--sex",
            "male",
            "--age",
            "35",
            "--embarked",
            "S",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Predict(args) => {
                assert_eq!(args.pclass, "3");
                assert_eq!(args.embarked, "S");
                assert!(args.json);
            }
            other => panic!("expected predict, got {other:?}"),
        }
    }

    #[test]
    fn example_names_are_kebab_case() {
        let cli = parse_args(["titanic-predictor", "example", "does-not-survive"]).unwrap();
        match cli.command {
            Command::Example(args) => {
                assert_eq!(Example::from(args.which), Example::DoesNotSurvive)
            }
            other => panic!("expected example, got {other:?}"),
        }
        assert!(parse_args(["titanic-predictor", "example", "maybe"]).is_err());
    }

    #[test]
    fn predict_requires_all_fields() {
        assert!(parse_args(["titanic-predictor", "predict", "--class", "1"]).is_err());
    }
}
