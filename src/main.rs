use clap::Parser;

use crate::opts::{Opts, PredictOpts, Subcommand, WebOpts};
use crate::prelude::*;
use crate::trainer::{persistence, prepare};
use crate::web::models::PredictionResponse;

mod error;
mod math;
mod opts;
mod prelude;
#[cfg(test)]
mod testing;
mod tracing;
mod trainer;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = crate::tracing::init(opts.sentry_dsn, opts.traces_sample_rate)?;
    let result = match opts.subcommand {
        Subcommand::Web(opts) => run_web(opts).await,
        Subcommand::Predict(opts) => run_predict(&opts),
    };
    if let Err(error) = &result {
        error!("fatal error: {:#}", error);
    }
    result
}

async fn run_web(opts: WebOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "web"));

    let WebOpts {
        host,
        port,
        dataset_path,
        model,
    } = opts;
    let predictor =
        tokio::task::spawn_blocking(move || prepare(&dataset_path, &model.model_path)).await??;
    web::run(&host, port, predictor).await
}

fn run_predict(opts: &PredictOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "predict"));

    let predictor = persistence::load(&opts.model.model_path)?;
    let prediction = predictor.predict(&[opts.study_hours, opts.attendance])?;
    info!(opts.study_hours, opts.attendance, prediction);
    println!("{}", serde_json::to_string(&PredictionResponse::new(prediction))?);
    Ok(())
}
