//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser};

pub mod parsers;

#[derive(Parser)]
#[command(author, version, about, long_about = None, propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(short, long, env = "SCORE_PREDICTOR_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance traces sample rate for Sentry (0.0..=1.0)
    #[arg(long, default_value = "0", value_parser = parsers::sample_rate)]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    Web(WebOpts),
    Predict(PredictOpts),
}

/// Trains the model on the dataset and serves the predictions
#[derive(Args)]
pub struct WebOpts {
    /// Web application bind host
    #[arg(long, default_value = "::")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Training dataset CSV file
    #[arg(long = "dataset", default_value = "Student_performance_dataset.csv")]
    pub dataset_path: PathBuf,

    #[command(flatten)]
    pub model: ModelOpts,
}

/// Predicts a single score with a previously saved model
#[derive(Args)]
pub struct PredictOpts {
    #[command(flatten)]
    pub model: ModelOpts,

    /// Study hours
    #[arg(long, allow_hyphen_values = true)]
    pub study_hours: f64,

    /// Attendance
    #[arg(long, allow_hyphen_values = true)]
    pub attendance: f64,
}

#[derive(Args)]
pub struct ModelOpts {
    /// Model artifact file
    #[arg(long = "model", default_value = "score_prediction_model.pkl")]
    pub model_path: PathBuf,
}
