//! Immutable prediction context, loaded once at startup.

use std::path::Path;

pub use self::error::ValidationError;
pub use self::request::PredictRequest;
use crate::artifacts;
use crate::encoding::{CategoricalColumn, Encoders};
use crate::features::{car_age, round2, FeatureVector, Features};
use crate::prelude::*;
use crate::regression::LinearRegression;

mod error;
mod request;

pub struct Predictor {
    model: LinearRegression,
    encoders: Encoders,
}

impl Predictor {
    #[must_use]
    pub const fn new(model: LinearRegression, encoders: Encoders) -> Self {
        Self { model, encoders }
    }

    /// Loads the artifacts, any failure here must prevent the service from starting.
    #[instrument(skip_all)]
    pub fn load(model_path: &Path, encoders_path: &Path) -> Result<Self> {
        let start_instant = Instant::now();
        let model = artifacts::load_model(model_path).context("failed to load the model")?;
        let encoders =
            artifacts::load_encoders(encoders_path).context("failed to load the encoders")?;
        info!(
            elapsed = crate::logging::format_elapsed(start_instant).as_str(),
            n_fuel_types = encoders.fuel.classes().len(),
            n_seller_types = encoders.seller.classes().len(),
            n_transmissions = encoders.transmission.classes().len(),
            "loaded",
        );
        Ok(Self::new(model, encoders))
    }

    #[must_use]
    pub const fn encoders(&self) -> &Encoders {
        &self.encoders
    }

    pub fn features(&self, request: &PredictRequest) -> Result<FeatureVector, ValidationError> {
        if !request.present_price.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "present_price",
                expected: "a finite number",
                value: request.present_price.to_string(),
            });
        }
        let year: i32 = whole_number("year", "a whole year", request.year)?;
        let car_age = car_age(year).ok_or_else(|| ValidationError::InvalidValue {
            field: "year",
            expected: "a year within the representable car age range",
            value: year.to_string(),
        })?;
        let features = Features {
            car_age,
            present_price: request.present_price,
            kms_driven: whole_number(
                "kms_driven",
                "a non-negative whole number",
                request.kms_driven,
            )?,
            fuel_code: self.encoders.encode(CategoricalColumn::Fuel, &request.fuel_type)?,
            seller_code: self
                .encoders
                .encode(CategoricalColumn::Seller, &request.seller_type)?,
            transmission_code: self
                .encoders
                .encode(CategoricalColumn::Transmission, &request.transmission)?,
        };
        Ok(features.to_vector())
    }

    /// Predicted selling price, rounded to cents.
    pub fn predict(&self, request: &PredictRequest) -> Result<f64, ValidationError> {
        let features = self.features(request)?;
        let price = self.model.predict(&features);
        if !price.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "predicted_price",
                expected: "a finite number",
                value: price.to_string(),
            });
        }
        Ok(round2(price))
    }
}

/// Converts a whole number into the target integer type, rejecting fractions and overflows.
fn whole_number<T: TryFrom<i64>>(
    field: &'static str,
    expected: &'static str,
    value: f64,
) -> Result<T, ValidationError> {
    let invalid = || ValidationError::InvalidValue {
        field,
        expected,
        value: value.to_string(),
    };
    if value.fract() != 0.0 {
        return Err(invalid());
    }
    T::try_from(value as i64).map_err(|_| invalid())
}
