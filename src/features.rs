//! Feature derivation shared by the trainer and the web service.

/// Car age is counted relative to this year, both in training and in prediction.
pub const REFERENCE_YEAR: i32 = 2025;

pub const N_FEATURES: usize = 6;

/// Column order of [`FeatureVector`].
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Present_Price",
    "Kms_Driven",
    "Fuel_Type",
    "Seller_Type",
    "Transmission",
    "Car_Age",
];

pub type FeatureVector = [f64; N_FEATURES];

/// `None` when the year is too far off to be represented.
#[must_use]
pub const fn car_age(year: i32) -> Option<i32> {
    REFERENCE_YEAR.checked_sub(year)
}

/// Numeric inputs of a single car, with the categorical columns already encoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub car_age: i32,
    pub present_price: f64,
    pub kms_driven: u32,
    pub fuel_code: usize,
    pub seller_code: usize,
    pub transmission_code: usize,
}

impl Features {
    #[must_use]
    pub fn to_vector(&self) -> FeatureVector {
        [
            self.present_price,
            self.kms_driven as f64,
            self.fuel_code as f64,
            self.seller_code as f64,
            self.transmission_code as f64,
            self.car_age as f64,
        ]
    }
}

/// Rounds the price to cents, values too large to scale are returned as is.
#[must_use]
pub fn round2(value: f64) -> f64 {
    let cents = value * 100.0;
    if cents.is_finite() {
        cents.round() / 100.0
    } else {
        value
    }
}
