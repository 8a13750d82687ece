use clap::Parser;
use editor_verify::{cli::Cli, logging, steps};
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = steps::run(&cli).await {
        error!(target = "verify", error = %err, "verification failed");
        std::process::exit(1);
    }
}
