use clap::Parser;

use crate::opts::{Command, Opts};
use crate::prelude::*;

mod artifacts;
mod encoding;
mod features;
mod logging;
mod math;
mod opts;
mod predictor;
mod prelude;
mod regression;
mod trainer;
mod web;

fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = logging::init(opts.sentry_dsn, opts.traces_sample_rate)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    let result = match opts.subcommand {
        Command::Train(opts) => trainer::run(opts),
        Command::Web(opts) => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(web::run(opts)),
    };
    if let Err(error) = &result {
        error!("fatal error: {:#}", error);
    }
    result
}
