use clap::Parser;

use apm_deploy::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = apm_deploy::logging::init(cli.verbose) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let code = match cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    std::process::exit(code);
}
