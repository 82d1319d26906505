use clap::Parser;
use retail_ingest::app::{handle_fatal_error, init_logging, AppConfig};
use retail_ingest::cli::{execute_command, Cli};

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    init_logging(&AppConfig::new(verbose));

    if let Err(e) = execute_command(cli) {
        handle_fatal_error(e, verbose);
    }
}
