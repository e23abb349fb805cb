use poem::http::StatusCode;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};
use serde::Serialize;

use crate::predictor::{PredictRequest, Predictor, ValidationError};
use crate::prelude::*;

#[derive(Serialize)]
#[serde(untagged)]
enum PredictResponse {
    Success {
        success: bool,
        predicted_price: f64,
        message: &'static str,
    },
    Failure {
        success: bool,
        error: String,
        message: &'static str,
    },
}

impl PredictResponse {
    const fn success(predicted_price: f64) -> Self {
        Self::Success {
            success: true,
            predicted_price,
            message: "Prediction successful",
        }
    }

    fn failure(error: &ValidationError) -> Self {
        Self::Failure {
            success: false,
            error: error.to_string(),
            message: "Prediction failed",
        }
    }
}

/// Any request parsing error ends up here too, so that the caller always gets the same shape.
#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post(
    request: poem::Result<Json<PredictRequest>>,
    Data(predictor): Data<&Arc<Predictor>>,
) -> Response {
    let result = request
        .map_err(|error| ValidationError::MalformedRequest(error.to_string()))
        .and_then(|Json(request)| {
            debug!(?request);
            predictor.predict(&request)
        });
    match result {
        Ok(predicted_price) => {
            info!(predicted_price, "predicted");
            Json(PredictResponse::success(predicted_price)).into_response()
        }
        Err(error) => {
            info!("{:#}", error);
            Json(PredictResponse::failure(&error))
                .with_status(StatusCode::BAD_REQUEST)
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use serde_json::{json, Value};

    use crate::features::round2;
    use crate::prelude::*;
    use crate::web::test::{create_test_client, read_json};

    fn payload() -> Value {
        json!({
            "year": 2015,
            "present_price": 9.5,
            "kms_driven": 40000,
            "fuel_type": "Petrol",
            "seller_type": "Dealer",
            "transmission": "Manual",
        })
    }

    #[tokio::test]
    async fn predict_ok() -> Result {
        let client = create_test_client()?;
        let response = client.post("/predict").body_json(&payload()).send().await;
        response.assert_status_is_ok();

        let body = read_json(response).await?;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Prediction successful");
        assert!(body.get("error").is_none());
        let predicted_price = body["predicted_price"]
            .as_f64()
            .ok_or_else(|| anyhow!("`predicted_price` is not a number"))?;
        assert_eq!(round2(predicted_price), predicted_price);
        assert!((predicted_price - 5.55).abs() < 0.01, "{}", predicted_price);
        Ok(())
    }

    #[tokio::test]
    async fn predict_is_deterministic_ok() -> Result {
        let client = create_test_client()?;
        let mut prices = Vec::new();
        for _ in 0..3 {
            let response = client.post("/predict").body_json(&payload()).send().await;
            let body = read_json(response).await?;
            prices.push(body["predicted_price"].clone());
        }
        assert!(prices.iter().all(|price| price == &prices[0]));
        Ok(())
    }

    #[tokio::test]
    async fn numeric_strings_ok() -> Result {
        let client = create_test_client()?;
        let mut payload = payload();
        payload["year"] = json!("2015");
        payload["kms_driven"] = json!("40000");
        let response = client.post("/predict").body_json(&payload).send().await;
        response.assert_status_is_ok();
        Ok(())
    }

    #[tokio::test]
    async fn whole_floats_ok() -> Result {
        let client = create_test_client()?;
        let mut payload = payload();
        payload["year"] = json!(2015.0);
        payload["kms_driven"] = json!(40000.0);
        let response = client.post("/predict").body_json(&payload).send().await;
        response.assert_status_is_ok();
        Ok(())
    }

    #[tokio::test]
    async fn huge_price_is_numeric_ok() -> Result {
        let client = create_test_client()?;
        let mut payload = payload();
        payload["present_price"] = json!(1e307);
        let response = client.post("/predict").body_json(&payload).send().await;
        response.assert_status_is_ok();

        let body = read_json(response).await?;
        assert_eq!(body["success"], true);
        assert!(body["predicted_price"].is_f64(), "{}", body);
        Ok(())
    }

    #[tokio::test]
    async fn year_overflow_fails() -> Result {
        let client = create_test_client()?;
        let mut payload = payload();
        payload["year"] = json!(i32::MIN);
        let response = client.post("/predict").body_json(&payload).send().await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = read_json(response).await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Prediction failed");
        let error = body["error"].as_str().unwrap_or_default();
        assert!(error.contains("year"), "{}", error);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_category_fails() -> Result {
        let client = create_test_client()?;
        let mut payload = payload();
        payload["fuel_type"] = json!("Hydrogen");
        let response = client.post("/predict").body_json(&payload).send().await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = read_json(response).await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Prediction failed");
        assert!(body.get("predicted_price").is_none());
        let error = body["error"].as_str().unwrap_or_default();
        assert!(error.contains("Hydrogen"), "{}", error);
        Ok(())
    }

    #[tokio::test]
    async fn missing_field_fails() -> Result {
        let client = create_test_client()?;
        let mut payload = payload();
        payload
            .as_object_mut()
            .ok_or_else(|| anyhow!("payload is not an object"))?
            .remove("kms_driven");
        let response = client.post("/predict").body_json(&payload).send().await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = read_json(response).await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Prediction failed");
        let error = body["error"].as_str().unwrap_or_default();
        assert!(error.contains("kms_driven"), "{}", error);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_type_fails() -> Result {
        let client = create_test_client()?;
        let mut payload = payload();
        payload["present_price"] = json!("expensive");
        let response = client.post("/predict").body_json(&payload).send().await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = read_json(response).await?;
        assert_eq!(body["success"], false);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_fails() -> Result {
        let client = create_test_client()?;
        let response = client
            .post("/predict")
            .content_type("application/json")
            .body("{\"year\": 2015,")
            .send()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = read_json(response).await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Prediction failed");
        Ok(())
    }

    #[tokio::test]
    async fn get_is_not_allowed() -> Result {
        let client = create_test_client()?;
        let response = client.get("/predict").send().await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        Ok(())
    }
}
