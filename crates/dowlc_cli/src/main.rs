use clap::Parser;
use dowlc_cli::args::Args;
use dowlc_cli::logging::init_logging;
use dowlc_cli::run;
use std::io::{stderr, stdout};
use std::process::ExitCode;
use tracing::{debug, trace};

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting dowlc with args: {args:?}");
    debug!("dowlc version: {}", env!("CARGO_PKG_VERSION"));

    let status = run(&args, &mut stdout().lock(), &mut stderr().lock())?;
    Ok(status.into())
}
