//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod parsers;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(long, default_value = "0", env = "TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fits the model on a CSV dataset and saves the artifacts
    Train(TrainOpts),

    /// Serves predictions over HTTP
    Web(WebOpts),
}

#[derive(Args, Clone)]
pub struct TrainOpts {
    /// CSV dataset path
    #[arg(long, default_value = "car.csv", env = "CAR_PRICE_DATASET")]
    pub dataset: PathBuf,

    #[arg(long, default_value = "car_price_model.pkl", env = "CAR_PRICE_MODEL_PATH")]
    pub model_path: PathBuf,

    #[arg(long, default_value = "label_encoders.pkl", env = "CAR_PRICE_ENCODERS_PATH")]
    pub encoders_path: PathBuf,

    /// Fraction of the rows held out for testing
    #[arg(
        long,
        default_value = "0.2",
        value_parser = parsers::test_size,
        env = "CAR_PRICE_TEST_SIZE",
    )]
    pub test_size: f64,

    /// Train/test split random seed
    #[arg(long, default_value = "42", env = "CAR_PRICE_SEED")]
    pub seed: u64,
}

#[derive(Args)]
pub struct WebOpts {
    /// Web application bind host
    #[arg(long, default_value = "0.0.0.0", env = "CAR_PRICE_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "5000", env = "CAR_PRICE_PORT")]
    pub port: u16,

    #[arg(long, default_value = "car_price_model.pkl", env = "CAR_PRICE_MODEL_PATH")]
    pub model_path: PathBuf,

    #[arg(long, default_value = "label_encoders.pkl", env = "CAR_PRICE_ENCODERS_PATH")]
    pub encoders_path: PathBuf,
}
