use std::process::ExitCode;

use clap::Parser;

use crate::cli::app::App;

mod cli;
mod logging;

fn main() -> ExitCode {
    let app = App::parse();

    // Must outlive the runtime so events from worker threads are flushed.
    let _reporting = logging::init_error_reporting();

    if let Err(err) = logging::init(app.log_format) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!("failed to start async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(app.run()) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
