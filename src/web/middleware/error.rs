use poem::error::{MethodNotAllowedError, NotFoundError};
use poem::http::StatusCode;
use poem::web::Json;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};
use serde_json::json;

use crate::prelude::*;

/// Turns the errors escaping the routes into JSON responses.
pub struct ErrorMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for ErrorMiddleware {
    type Output = ErrorMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorMiddlewareImpl { ep }
    }
}

pub struct ErrorMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for ErrorMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let error = match self.ep.call(request).await {
            Err(error) => error,
            result => return result,
        };

        let status = if error.is::<NotFoundError>() {
            StatusCode::NOT_FOUND
        } else if error.is::<MethodNotAllowedError>() {
            StatusCode::METHOD_NOT_ALLOWED
        } else {
            error.status()
        };
        if status.is_server_error() {
            error!(?method, ?uri, %status, "{:#}", error);
        } else {
            info!(?method, ?uri, %status, "{:#}", error);
        }

        let body = json!({
            "success": false,
            "error": error.to_string(),
            "message": status.canonical_reason().unwrap_or("Request failed"),
        });
        Ok(Json(body).with_status(status).into_response())
    }
}
