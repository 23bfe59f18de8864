//! Guibox CLI - build the image, then run it on the host's display

use clap::Parser;
use guibox::cli::Args;
use guibox::logging::setup_logging;
use guibox::{format_plan, CliEngine, HostEnv, Launcher};
use tracing::debug;

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(args: &Args) -> guibox::Result<i32> {
    let config = args.to_config()?;
    debug!(?config, "launch configuration");

    let host = HostEnv::capture(config.env_names());
    let launcher = Launcher::new(config, host, CliEngine::new());

    if args.dry_run {
        println!("{}", format_plan(&launcher.plan(), &args.output_format()));
        return Ok(0);
    }

    let outcome = launcher.launch()?;
    debug!(stage = ?outcome.stage, code = outcome.exit_code(), "launch finished");
    Ok(outcome.exit_code())
}
