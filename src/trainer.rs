//! Fits the resale price model on a CSV dataset and saves the artifacts.

use crate::encoding::{CategoricalColumn, Encoders, LabelEncoder};
use crate::features::{car_age, FeatureVector, Features};
use crate::logging::format_elapsed;
use crate::opts::TrainOpts;
use crate::prelude::*;
use crate::regression::LinearRegression;
use crate::trainer::dataset::{Dataset, Record};
use crate::trainer::split::train_test_split;

pub mod dataset;
mod report;
pub mod split;

pub fn run(opts: TrainOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "trainer"));
    let start_instant = Instant::now();

    let dataset = Dataset::load(&opts.dataset)?;
    println!("{}\n", report::format_preview(&dataset));
    println!("{}\n", report::format_info(&dataset));
    println!("{}\n", report::format_null_counts(&dataset));

    let trained = train(&dataset.records, opts.test_size, opts.seed)?;
    println!("{}", report::format_scores(trained.train_score, trained.test_score));

    crate::artifacts::save(
        &trained.model,
        &opts.model_path,
        &trained.encoders,
        &opts.encoders_path,
    )?;
    println!("Model and encoders saved successfully!");

    info!(elapsed = format_elapsed(start_instant).as_str(), "finished");
    Ok(())
}

pub struct Trained {
    pub model: LinearRegression,
    pub encoders: Encoders,
    pub train_score: f64,
    pub test_score: f64,
}

/// Encodes the records, splits them and fits the regression on the train subset.
#[instrument(skip_all, fields(n_records = records.len(), test_size = test_size, seed = seed))]
pub fn train(records: &[Record], test_size: f64, seed: u64) -> Result<Trained> {
    let encoders = fit_encoders(records)?;
    let x = records
        .iter()
        .map(|record| features(&encoders, record))
        .collect::<Result<Vec<FeatureVector>>>()?;
    let y: Vec<f64> = records.iter().map(|record| record.selling_price).collect();

    let split = train_test_split(records.len(), test_size, seed)?;
    let (x_train, y_train) = select(&x, &y, &split.train);
    let (x_test, y_test) = select(&x, &y, &split.test);
    info!(n_train = x_train.len(), n_test = x_test.len(), "split");

    let model = LinearRegression::fit(&x_train, &y_train)?;
    let train_score = model.score(&x_train, &y_train);
    let test_score = model.score(&x_test, &y_test);
    info!(train_score, test_score, "fitted");

    Ok(Trained {
        model,
        encoders,
        train_score,
        test_score,
    })
}

fn fit_encoders(records: &[Record]) -> Result<Encoders> {
    let fit = |column: CategoricalColumn| {
        LabelEncoder::fit(records.iter().map(|record| record.label(column)))
            .with_context(|| format!("failed to fit the `{}` encoder", column.column_name()))
    };
    let encoders = Encoders {
        fuel: fit(CategoricalColumn::Fuel)?,
        seller: fit(CategoricalColumn::Seller)?,
        transmission: fit(CategoricalColumn::Transmission)?,
    };
    for column in CategoricalColumn::ALL {
        debug!(column = column.column_name(), classes = ?encoders.encoder(column).classes());
    }
    Ok(encoders)
}

/// Feature vector of a dataset row, derived the same way as for a prediction request.
pub fn features(encoders: &Encoders, record: &Record) -> Result<FeatureVector> {
    let car_age =
        car_age(record.year).ok_or_else(|| anyhow!("year {} is out of range", record.year))?;
    let features = Features {
        car_age,
        present_price: record.present_price,
        kms_driven: record.kms_driven,
        fuel_code: encoders.encode(CategoricalColumn::Fuel, &record.fuel_type)?,
        seller_code: encoders.encode(CategoricalColumn::Seller, &record.seller_type)?,
        transmission_code: encoders
            .encode(CategoricalColumn::Transmission, &record.transmission)?,
    };
    Ok(features.to_vector())
}

fn select(x: &[FeatureVector], y: &[f64], indices: &[usize]) -> (Vec<FeatureVector>, Vec<f64>) {
    indices.iter().map(|&index| (x[index], y[index])).unzip()
}
