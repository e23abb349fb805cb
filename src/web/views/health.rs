use poem::web::Json;
use poem::{handler, IntoResponse};
use serde_json::json;

use crate::prelude::*;

const CACHE_CONTROL: &str = "no-cache";

#[handler]
#[instrument(skip_all, level = "debug")]
pub async fn get() -> impl IntoResponse {
    Json(json!({"status": "healthy", "message": "API is running"}))
        .with_header("Cache-Control", CACHE_CONTROL)
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;

    use crate::prelude::*;
    use crate::web::test::{create_test_client, read_json};

    #[tokio::test]
    async fn get_ok() -> Result {
        let client = create_test_client()?;
        let response = client.get("/health").send().await;
        response.assert_status_is_ok();
        let body = read_json(response).await?;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["message"], "API is running");
        Ok(())
    }

    #[tokio::test]
    async fn healthy_after_failed_predictions_ok() -> Result {
        let client = create_test_client()?;
        for _ in 0..3 {
            client
                .post("/predict")
                .body("not json")
                .send()
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }
        let response = client.get("/health").send().await;
        response.assert_status_is_ok();
        let body = read_json(response).await?;
        assert_eq!(body["status"], "healthy");
        Ok(())
    }

    #[tokio::test]
    async fn cors_ok() -> Result {
        let client = create_test_client()?;
        let response = client
            .get("/health")
            .header("Origin", "https://example.com")
            .send()
            .await;
        response.assert_status_is_ok();
        assert!(response.0.headers().contains_key("access-control-allow-origin"));
        Ok(())
    }
}
