use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Prediction input, numbers may also come as strings.
///
/// `year` and `kms_driven` are checked to be whole numbers by the predictor,
/// so that `2015.0` is accepted as well.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub year: f64,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub present_price: f64,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub kms_driven: f64,

    pub fuel_type: String,
    pub seller_type: String,
    pub transmission: String,
}
