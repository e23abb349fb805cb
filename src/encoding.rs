//! Label encoding of the categorical columns.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalColumn {
    Fuel,
    Seller,
    Transmission,
}

impl CategoricalColumn {
    pub const ALL: [Self; 3] = [Self::Fuel, Self::Seller, Self::Transmission];

    /// Dataset column header.
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Fuel => "Fuel_Type",
            Self::Seller => "Seller_Type",
            Self::Transmission => "Transmission",
        }
    }
}

impl Display for CategoricalColumn {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            Self::Fuel => "fuel type",
            Self::Seller => "seller type",
            Self::Transmission => "transmission",
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {column} `{label}`, expected one of: {expected}")]
pub struct UnknownCategory {
    pub column: CategoricalColumn,
    pub label: String,
    expected: String,
}

/// Maps each label seen during fitting onto `0..n`, in sorted label order.
///
/// Persisted as the sorted label list, the lookup index is rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: AHashMap<String, usize>,
}

impl LabelEncoder {
    pub fn fit<L: AsRef<str>>(labels: impl IntoIterator<Item = L>) -> Result<Self> {
        let classes: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();
        if classes.is_empty() {
            bail!("cannot fit a label encoder on no labels");
        }
        Ok(Self::from_sorted(classes.into_iter().collect()))
    }

    fn from_sorted(classes: Vec<String>) -> Self {
        let index = classes
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code))
            .collect();
        Self { classes, index }
    }

    #[must_use]
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    #[must_use]
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl PartialEq for LabelEncoder {
    fn eq(&self, other: &Self) -> bool {
        self.classes == other.classes
    }
}

impl Eq for LabelEncoder {}

impl TryFrom<Vec<String>> for LabelEncoder {
    type Error = anyhow::Error;

    fn try_from(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            bail!("label encoder has no classes");
        }
        if !classes.iter().tuple_windows().all(|(lhs, rhs)| lhs < rhs) {
            bail!("label encoder classes are not sorted and unique: {:?}", classes);
        }
        Ok(Self::from_sorted(classes))
    }
}

impl From<LabelEncoder> for Vec<String> {
    fn from(encoder: LabelEncoder) -> Self {
        encoder.classes
    }
}

/// Fitted encoders of all the categorical columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoders {
    pub fuel: LabelEncoder,
    pub seller: LabelEncoder,
    pub transmission: LabelEncoder,
}

impl Encoders {
    #[must_use]
    pub const fn encoder(&self, column: CategoricalColumn) -> &LabelEncoder {
        match column {
            CategoricalColumn::Fuel => &self.fuel,
            CategoricalColumn::Seller => &self.seller,
            CategoricalColumn::Transmission => &self.transmission,
        }
    }

    pub fn encode(&self, column: CategoricalColumn, label: &str) -> Result<usize, UnknownCategory> {
        let encoder = self.encoder(column);
        encoder.encode(label).ok_or_else(|| UnknownCategory {
            column,
            label: label.to_string(),
            expected: encoder.classes().join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoders() -> Result<Encoders> {
        Ok(Encoders {
            fuel: LabelEncoder::fit(["Petrol", "Diesel", "Petrol", "CNG"])?,
            seller: LabelEncoder::fit(["Dealer", "Individual"])?,
            transmission: LabelEncoder::fit(["Manual", "Automatic", "Manual"])?,
        })
    }

    #[test]
    fn fit_sorted_codes_ok() -> Result {
        let encoder = LabelEncoder::fit(["Petrol", "Diesel", "Petrol", "CNG"])?;
        assert_eq!(encoder.classes(), ["CNG", "Diesel", "Petrol"]);
        assert_eq!(encoder.encode("CNG"), Some(0));
        assert_eq!(encoder.encode("Diesel"), Some(1));
        assert_eq!(encoder.encode("Petrol"), Some(2));
        Ok(())
    }

    #[test]
    fn fit_empty_fails() {
        assert!(LabelEncoder::fit(Vec::<String>::new()).is_err());
    }

    #[test]
    fn round_trip_ok() -> Result {
        let encoders = encoders()?;
        for column in CategoricalColumn::ALL {
            let encoder = encoders.encoder(column);
            for label in encoder.classes() {
                let code = encoders.encode(column, label)?;
                assert_eq!(encoder.decode(code), Some(label.as_str()));
            }
        }
        Ok(())
    }

    #[test]
    fn unknown_label_fails_for_every_column() -> Result {
        let encoders = encoders()?;
        for column in CategoricalColumn::ALL {
            let error = encoders.encode(column, "Hydrogen").unwrap_err();
            assert_eq!(error.column, column);
            assert_eq!(error.label, "Hydrogen");
        }
        Ok(())
    }

    #[test]
    fn labels_are_case_sensitive() -> Result {
        let encoders = encoders()?;
        assert!(encoders.encode(CategoricalColumn::Fuel, "petrol").is_err());
        Ok(())
    }

    #[test]
    fn unknown_category_message_ok() -> Result {
        let error = encoders()?
            .encode(CategoricalColumn::Fuel, "Hydrogen")
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "unknown fuel type `Hydrogen`, expected one of: CNG, Diesel, Petrol",
        );
        Ok(())
    }

    #[test]
    fn decode_out_of_range_ok() -> Result {
        assert_eq!(encoders()?.fuel.decode(3), None);
        Ok(())
    }

    #[test]
    fn try_from_unsorted_fails() {
        let classes = vec!["Petrol".to_string(), "Diesel".to_string()];
        assert!(LabelEncoder::try_from(classes).is_err());
    }

    #[test]
    fn try_from_duplicates_fails() {
        let classes = vec!["Diesel".to_string(), "Diesel".to_string()];
        assert!(LabelEncoder::try_from(classes).is_err());
    }
}
