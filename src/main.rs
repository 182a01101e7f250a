use anyhow::Result;
use clap::Parser;

use urlmatch::logging;
use urlmatch::processor;
use urlmatch::settings::Settings;
use urlmatch::types::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    logging::init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("urlmatch error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::from_cli(cli)?;
    processor::run(&settings)?;
    Ok(())
}
