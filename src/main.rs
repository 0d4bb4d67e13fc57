use clap::Parser;

use treatcat::{app, cli};

fn main() {
    env_logger::init();
    log::info!("TreatCat starting up");

    let args = cli::Args::parse();
    if let Err(e) = app::run(args) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
