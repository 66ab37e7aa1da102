use std::any::Any;
use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::http::StatusCode;
use poem::{post, Endpoint, EndpointExt, Response, Route, Server};

use crate::prelude::*;
use crate::trainer::regression::Predictor;
use crate::web::middleware::{ErrorMiddleware, TimeItMiddleware};
use crate::web::models::ErrorDetail;

mod middleware;
pub mod models;
#[cfg(test)]
mod test;
mod views;

const SHUTDOWN_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Serves the predictions until Ctrl+C.
pub async fn run(host: &str, port: u16, predictor: Predictor) -> Result {
    let app = create_app(Arc::new(predictor));
    info!(host, port, "listening…");
    Server::new(TcpListener::bind((IpAddr::from_str(host)?, port)))
        .run_with_graceful_shutdown(app, shutdown_signal(), Some(SHUTDOWN_TIMEOUT))
        .await
        .context("the web server has failed")?;
    Ok(())
}

pub fn create_app(predictor: Arc<Predictor>) -> impl Endpoint {
    with_middleware(Route::new().at("/predict", post(views::predict::post)).data(predictor))
}

fn with_middleware(endpoint: impl Endpoint<Output = Response>) -> impl Endpoint {
    endpoint
        .with(Tracing)
        .with(CatchPanic::new().with_handler(panic_response))
        .with(ErrorMiddleware)
        .with(TimeItMiddleware)
}

fn panic_response(payload: Box<dyn Any + Send>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "internal server error".to_string());
    error!(detail = detail.as_str(), "the handler has panicked");
    ErrorDetail::new(detail).into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl+C: {:#}", error);
    }
    info!("shutting down…");
}
