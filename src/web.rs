use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Cors, Tracing};
use poem::{get, post, Endpoint, EndpointExt, Route, Server};

use crate::opts::WebOpts;
use crate::predictor::Predictor;
use crate::prelude::*;
use crate::web::middleware::{ErrorMiddleware, SentryMiddleware};

mod middleware;
mod views;

const SHUTDOWN_TIMEOUT: StdDuration = StdDuration::from_secs(5);

/// Run the prediction web app.
pub async fn run(opts: WebOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "web"));
    let predictor = Predictor::load(&opts.model_path, &opts.encoders_path)?;
    let app = create_app(Arc::new(predictor));
    info!(host = opts.host.as_str(), port = opts.port, "listening");
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run_with_graceful_shutdown(
            app,
            async {
                let _ = tokio::signal::ctrl_c().await;
            },
            Some(SHUTDOWN_TIMEOUT),
        )
        .await
        .context("the web server has crashed")?;
    info!("stopped");
    Ok(())
}

pub fn create_app(predictor: Arc<Predictor>) -> impl Endpoint {
    Route::new()
        .at("/", get(views::index::get))
        .at("/predict", post(views::predict::post))
        .at("/health", get(views::health::get))
        .data(predictor)
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(Cors::new())
        .with(SentryMiddleware)
}
